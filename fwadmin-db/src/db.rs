use log::{error, info};

use fwadmin_error::Result;

use crate::pool::DatabasePool;
use crate::sql::{ip_rules, port_rules, url_rules};

/// 데이터베이스 초기화 (테이블 + 인덱스 부트스트랩)
pub async fn initialize_db(pool: &DatabasePool) -> Result<()> {
    // 커넥션 풀에서 로드
    let conn = pool.get_connection().await?;

    create_table(&conn, "ip_rules", ip_rules::CREATE_TABLE, &ip_rules::CREATE_INDICES).await?;
    create_table(&conn, "url_rules", url_rules::CREATE_TABLE, &url_rules::CREATE_INDICES).await?;
    create_table(
        &conn,
        "port_rules",
        port_rules::CREATE_TABLE,
        &port_rules::CREATE_INDICES,
    )
    .await?;

    Ok(())
}

/// 테이블 생성, 인덱싱
async fn create_table(
    conn: &deadpool_postgres::Object,
    name: &str,
    create_table: &str,
    indices: &[&str],
) -> Result<()> {
    match conn.execute(create_table, &[]).await {
        Ok(_) => {
            info!("{name} 테이블 생성 완료");

            // 인덱싱
            for index_query in indices {
                if let Err(e) = conn.execute(*index_query, &[]).await {
                    error!("{name} 인덱스 생성 실패: {e}");
                }
            }
            Ok(())
        }
        Err(e) => {
            error!("{name} 테이블 생성중 오류 발생: {e}");
            Err(e.into())
        }
    }
}
