//! HTTP Layer - RESTful API + MCP JSON-RPC

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{create_gateway_routes, create_tts_routes, gateway_app, tts_app};
pub use server::{HttpServer, ServerConfig};
pub use state::{GatewayState, TtsState};
