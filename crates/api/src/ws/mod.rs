//! WebSocket infrastructure: connection management, heartbeat monitoring,
//! the broadcast endpoint handler, and the camera frame stream.

mod handler;
mod heartbeat;
pub mod manager;
pub mod stream;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
