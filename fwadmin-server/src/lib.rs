pub mod api_server;
mod handlers;
mod response;
mod router;
mod state;

pub use api_server::ApiServer;
pub use state::AppState;
