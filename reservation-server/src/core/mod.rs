//! Core Module
//!
//! 配置、状态、HTTP 服务器。

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, MailConfig};
pub use server::Server;
pub use state::ServerState;
