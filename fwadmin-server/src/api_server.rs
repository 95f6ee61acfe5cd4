use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as AutoConnBuilder;
use log::{debug, error, info};
use tokio::net::TcpListener;

use fwadmin_config::Settings;
use fwadmin_db::pool::DatabasePool;
use fwadmin_error::Result;

use crate::router::handle_request;
use crate::state::AppState;

/// REST API 서버
pub struct ApiServer {
    /// 서버 설정 정보
    settings: Settings,
    /// 공유 상태
    state: AppState,
}

impl ApiServer {
    /// 새로운 API 서버 인스턴스를 생성
    pub fn new(settings: Settings, db_pool: DatabasePool) -> Self {
        Self {
            settings,
            state: AppState { db_pool },
        }
    }

    /// 서버실행
    pub async fn run(&self) -> Result<()> {
        // 바인딩 주소
        let addr = format!(
            "{}:{}",
            self.settings.server.bind_host, self.settings.server.bind_port
        );
        let listener = TcpListener::bind(&addr).await?;
        info!("fwadmin API 서버 시작: {addr}");

        loop {
            let (stream, client_addr) = listener.accept().await?;
            let state = self.state.clone();

            tokio::spawn(async move {
                let io = TokioIo::new(stream);
                if let Err(err) = AutoConnBuilder::new(TokioExecutor::default())
                    .serve_connection(
                        io,
                        service_fn(move |req| handle_request(req, state.clone())),
                    )
                    .await
                {
                    error!("커넥션 에러: {err}");
                } else {
                    debug!("커넥션 종료: {client_addr}");
                }
            });
        }
    }
}
