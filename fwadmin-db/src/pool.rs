use std::sync::Arc;
use std::time::Duration;

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use log::{info, warn};
use tokio_postgres::{NoTls, config::Config};

use fwadmin_config::DbConfig;
use fwadmin_error::{FwError, Result};

/// db 풀 인스턴스
#[derive(Clone)]
pub struct DatabasePool {
    pool: Arc<Pool>,
}

impl DatabasePool {
    /// db 풀 생성
    pub async fn new(dbconfig: &DbConfig) -> Result<Self> {
        info!("db 풀 초기화");

        // PostgreSQL 설정 생성
        let pg_config = Self::create_pg_config(dbconfig);

        // 연결 풀 생성
        let pool = Self::create_connection_pool(pg_config, dbconfig).await?;

        info!(
            "데이터베이스 연결 풀 초기화 완료 (최대 연결 수: {})",
            dbconfig.pool.max_connections
        );

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// `PostgreSQL` 설정 생성
    fn create_pg_config(dbconfig: &DbConfig) -> Config {
        let mut pg_config = Config::new();
        pg_config
            .host(dbconfig.connection.host.as_str())
            .port(dbconfig.connection.port)
            .dbname(dbconfig.connection.database.as_str())
            .user(dbconfig.connection.user.as_str())
            .password(dbconfig.connection.password.as_str())
            .connect_timeout(Duration::from_secs(
                dbconfig.pool.connection_timeout_seconds,
            ));

        pg_config
    }

    /// 연결 풀 생성 및 테스트
    async fn create_connection_pool(pg_config: Config, dbconfig: &DbConfig) -> Result<Pool> {
        // 연결 풀 설정
        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

        // 풀 빌더 설정
        let pool = Pool::builder(mgr)
            .max_size(dbconfig.pool.max_connections)
            .runtime(Runtime::Tokio1)
            .recycle_timeout(Some(Duration::from_secs(dbconfig.pool.recycle_seconds)))
            .build()
            .map_err(|e| FwError::Database(format!("db 풀 생성 실패: {e}")))?;

        // 연결 테스트
        let conn = pool
            .get()
            .await
            .map_err(|e| FwError::Database(format!("데이터베이스 연결 테스트 실패: {e}")))?;

        // 간단한 쿼리로 연결 확인
        conn.query_one("SELECT 1", &[])
            .await
            .map_err(|e| FwError::Database(format!("데이터베이스 쿼리 테스트 실패: {e}")))?;

        Ok(pool)
    }

    /// 연결 풀에서 연결 가져오기
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| FwError::Database(format!("연결 풀에서 연결 가져오기 실패: {e}")))
    }

    /// 연결 풀 상태 정보
    pub fn pool_status(&self) -> PoolStatus {
        let status = self.pool.status();
        PoolStatus {
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }
}

/// 연결 풀 상태 정보
#[derive(Debug, Clone)]
pub struct PoolStatus {
    pub size: usize,
    pub available: usize,
    pub waiting: usize,
}

/// 기동시 데이터베이스 연결. 고정 간격으로 재시도한다.
pub async fn connect_with_retry(config: &DbConfig) -> Result<DatabasePool> {
    let attempts = config.pool.connect_retry_attempts.max(1);
    let interval = Duration::from_secs(config.pool.connect_retry_interval_seconds);

    let mut last_err = None;
    for attempt in 1..=attempts {
        match DatabasePool::new(config).await {
            Ok(pool) => {
                let status = pool.pool_status();
                info!(
                    "db 풀 준비 완료 (연결 {}, 유휴 {}, 대기 {})",
                    status.size, status.available, status.waiting
                );
                return Ok(pool);
            }
            Err(e) => {
                warn!("데이터베이스 연결 실패 ({attempt}/{attempts}): {e}");
                last_err = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| FwError::Database("데이터베이스 연결 실패".to_string())))
}
