use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::notify::{LogMailer, Mailer, SmtpMailer};
use crate::utils::AppError;

/// 服务器状态 - 持有所有共享服务的引用
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | mailer | Arc<dyn Mailer> | 邮件投递能力 (可注入) |
///
/// 使用 Arc/池句柄实现浅拷贝，每个请求 handler 克隆成本极低。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 邮件投递能力
    pub mailer: Arc<dyn Mailer>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试时注入 mailer 用)
    pub fn new(config: Config, pool: SqlitePool, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config,
            pool,
            mailer,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 数据库 (连接池 + 迁移 + 桌台种子数据)
    /// 2. 邮件投递 (配置了 SMTP_HOST 用 SMTP，否则日志投递)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_path).await?;

        let mailer: Arc<dyn Mailer> = if config.mail.smtp_enabled() {
            let smtp = SmtpMailer::new(&config.mail)
                .map_err(|e| AppError::internal(format!("SMTP setup failed: {e}")))?;
            tracing::info!(host = %config.mail.smtp_host, "SMTP delivery enabled");
            Arc::new(smtp)
        } else {
            tracing::info!("SMTP not configured, emails will be logged only");
            Arc::new(LogMailer)
        };

        Ok(Self::new(config.clone(), db.pool, mailer))
    }
}
