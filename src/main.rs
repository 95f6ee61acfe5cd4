use std::io::Write;

use chrono::Local;
use env_logger::Builder;
use log::{LevelFilter, info, warn};
use once_cell::sync::Lazy;

use fwadmin_config::Settings;
use fwadmin_db::{connect_with_retry, initialize_db};
use fwadmin_error::Result;
use fwadmin_server::ApiServer;

/// 파일 디스크립터 제한 설정
static FD_LIMIT: Lazy<u64> = Lazy::new(|| {
    std::env::var("FD_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000000) // 기본값 1M
});

/// 시스템 리소스 제한 설정
fn setup_resource_limits() {
    #[cfg(unix)]
    {
        use nix::sys::resource::{Resource, setrlimit};
        // fd 제한 늘리기
        match setrlimit(Resource::RLIMIT_NOFILE, *FD_LIMIT, *FD_LIMIT) {
            Ok(_) => {
                info!("파일 디스크립터 제한 {}", *FD_LIMIT);
            }
            Err(e) => {
                warn!("파일 디스크립터 제한 설정 실패: {:?}", e);
            }
        }
    }
}

/// 로거 세팅
fn setup_logger() {
    #[cfg(debug_assertions)]
    {
        Builder::new()
            .filter(None, LevelFilter::Debug)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} {} {}:{}] {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .init()
    }

    #[cfg(not(debug_assertions))]
    {
        Builder::new().filter(None, LevelFilter::Info).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 로거 세팅
    setup_logger();

    // fd 세팅
    setup_resource_limits();

    info!("fwadmin 서버 시작");

    // 통합 설정 로드
    let settings = Settings::new()?;

    // db 연결 (고정 간격 재시도)
    let db_pool = connect_with_retry(&settings.database).await?;

    // 테이블/인덱스 부트스트랩
    initialize_db(&db_pool).await?;

    // API 서버 실행
    let server = ApiServer::new(settings, db_pool);
    server.run().await
}
