use fwadmin_db::pool::DatabasePool;

/// 애플리케이션의 공유 상태를 관리하는 구조체
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabasePool,
}
