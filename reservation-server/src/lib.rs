//! Reservation Server - 餐厅桌台预订后端
//!
//! # 架构概述
//!
//! 本模块是预订后端的主入口，提供以下核心功能：
//!
//! - **空桌计算** (`booking::availability`): closed-interval 重叠判定
//! - **预订生命周期** (`booking::lifecycle`): 创建 / 列表 / 两步取消协议
//! - **数据库** (`db`): SQLite (sqlx) 存储与迁移
//! - **通知** (`notify`): 可注入的邮件投递能力
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! reservation-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── booking/       # 空桌计算 + 预订生命周期
//! ├── api/           # HTTP 路由和处理器
//! ├── notify/        # 邮件投递 (SMTP / 日志 / 测试替身)
//! ├── utils/         # 错误、日志、时间、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置进程环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    ____
   / __ \___  ________  ______   _____
  / /_/ / _ \/ ___/ _ \/ ___/ | / / _ \
 / _, _/  __(__  )  __/ /   | |/ /  __/
/_/ |_|\___/____/\___/_/    |___/\___/
    "#
    );
}
