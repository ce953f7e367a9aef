// ==========================================
// 苗圃育苗排产系统 - API 层
// ==========================================
// 职责: 编排数据访问、缓存与引擎,提供业务查询接口
// 红线: 撤销后的结果不得提交缓存或当作新状态返回
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;
pub mod sowing_api;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use dto::{
    OperationsSnapshot, ReminderFeedResponse, SlotOverviewResponse, SlotOverviewRow,
    StatsRollupResponse,
};
pub use error::{ApiError, ApiResult};
pub use sowing_api::SowingApi;

// ==========================================
// CancelToken - 撤销令牌
// ==========================================
/// 撤销令牌
///
/// 消费方销毁(如界面切走)时调用 cancel();编排方法在每次
/// 网络往返后检查令牌,已撤销则丢弃结果并返回 Cancelled,
/// 保证过期结果不会覆盖较新状态。实际的网络中断由实现方自理。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// 创建新的撤销令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 标记撤销
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// 是否已撤销
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
