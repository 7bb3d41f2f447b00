//! Booking Core
//!
//! 预订系统的算法核心：
//!
//! - [`availability`] - 空桌计算 (closed-interval 重叠判定)
//! - [`lifecycle`] - 预订生命周期 (创建 / 列表 / 两步取消协议)

pub mod availability;
pub mod lifecycle;
