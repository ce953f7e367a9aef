// ==========================================
// 苗圃育苗排产系统 - 排产数据访问接口
// ==========================================
// 职责: 定义五类只读抓取操作的形状(传输方式不在本核心范围)
// 红线: 返回原始/松散记录,清洗归一由引擎层负责
// ==========================================

use crate::domain::alerts::{AlertsOverview, TodaySummary};
use crate::domain::plant::Plant;
use crate::domain::reminder::RawReminderRecord;
use crate::domain::slot::RawSlotRecord;
use crate::domain::stats::AggregateStats;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

/// 排产数据访问接口
///
/// 外部记录系统的只读门面。实现方(HTTP 客户端等)负责传输、
/// 重试与认证;本核心只约定数据形状。
///
/// 各抓取操作相互独立,可并发调用,不保证完成顺序。
#[async_trait]
pub trait SowingDataRepository: Send + Sync {
    /// 抓取作物目录(含品种与品种级默认值)
    async fn fetch_plant_catalog(&self) -> RepositoryResult<Vec<Plant>>;

    /// 抓取聚合统计(全局 + 作物级 + 品种级)
    async fn fetch_aggregate_stats(&self) -> RepositoryResult<AggregateStats>;

    /// 抓取原始提醒列表(未过滤,可能含无效记录)
    async fn fetch_reminders(&self) -> RepositoryResult<Vec<RawReminderRecord>>;

    /// 抓取告警总览
    async fn fetch_alerts(&self) -> RepositoryResult<AlertsOverview>;

    /// 抓取当日播种摘要
    async fn fetch_today_summary(&self) -> RepositoryResult<TodaySummary>;

    /// 抓取指定作物/品种/年度的原始槽位列表
    async fn fetch_slots_for(
        &self,
        plant_id: &str,
        subtype_id: &str,
        year: i32,
    ) -> RepositoryResult<Vec<RawSlotRecord>>;
}
