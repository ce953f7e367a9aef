// ==========================================
// 苗圃育苗排产系统 - API 层 DTO 定义
// ==========================================
// 职责: 定义编排接口的响应结构
// ==========================================

use crate::domain::alerts::{AlertsOverview, TodaySummary};
use crate::domain::reminder::{Reminder, ReminderSummary};
use crate::domain::slot::{Slot, SlotDerived, SlotUrgency};
use crate::domain::stats::StatsRollup;
use crate::engine::normalizer::QualityReport;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 槽位总览
// ==========================================

/// 槽位总览行: 槽位 + 供需派生量 + 紧迫度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOverviewRow {
    /// 槽位
    pub slot: Slot,

    /// 供需派生量
    pub derived: SlotDerived,

    /// 紧迫度视图
    pub urgency: SlotUrgency,

    /// 优先级展示标签(按当前语言)
    pub priority_label: String,
}

/// 槽位总览响应
///
/// 行序按运营紧迫度降序;quality 报告记录被跳过/修正的上游记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOverviewResponse {
    /// 作物 ID
    pub plant_id: String,

    /// 品种 ID
    pub subtype_id: String,

    /// 年度
    pub year: i32,

    /// 生成日期(判定所用的"今天")
    pub generated_on: NaiveDate,

    /// 总览行
    pub rows: Vec<SlotOverviewRow>,

    /// 归一化质量报告
    pub quality: QualityReport,
}

// ==========================================
// 提醒流
// ==========================================

/// 提醒流响应(永不缓存,每次都是新抓取)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderFeedResponse {
    /// 有效提醒(已过滤)
    pub reminders: Vec<Reminder>,

    /// 汇总计数
    pub summary: ReminderSummary,

    /// 归一化质量报告
    pub quality: QualityReport,
}

// ==========================================
// 运营快照
// ==========================================

/// 运营快照: 告警总览 + 当日摘要(并发抓取)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationsSnapshot {
    /// 告警总览
    pub alerts: AlertsOverview,

    /// 当日摘要
    pub today: TodaySummary,
}

// ==========================================
// 驾驶舱统计
// ==========================================

/// 驾驶舱完成度响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRollupResponse {
    /// 完成度汇总
    pub rollup: StatsRollup,

    /// 全局档位展示标签(按当前语言)
    pub overall_band_label: String,
}
