// ==========================================
// 苗圃育苗排产系统 - 播种告警实体
// ==========================================
// 职责: 定义上游下发的告警总览与当日摘要(透传数据形状)
// 红线: 告警由上游计算,本核心只缓存与转发,不重算
// ==========================================

use crate::domain::types::SowPriority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 告警汇总计数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertsSummary {
    /// 告警总数
    pub total_alerts: i64,

    /// 逾期告警数
    pub overdue_count: i64,

    /// 紧急告警数
    pub urgent_count: i64,
}

/// 按日告警: 某个最迟播种日聚合的待播压力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAlert {
    /// 最迟播种日
    pub sow_by_date: NaiveDate,

    /// 涉及作物数
    pub plants_due: i64,

    /// 剩余待播总量
    pub total_remaining: i64,
}

/// 槽位告警
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAlert {
    /// 槽位 ID
    pub slot_id: String,

    /// 作物名称
    pub plant_name: String,

    /// 品种名称
    pub subtype_name: String,

    /// 最迟播种日(上游可能缺失)
    pub sow_by_date: Option<NaiveDate>,

    /// 剩余待播数量
    pub remaining_to_sow: i64,

    /// 上游判定的优先级
    pub priority: SowPriority,
}

/// 作物告警: 单作物维度的待播压力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantAlert {
    /// 作物 ID
    pub plant_id: String,

    /// 作物名称
    pub plant_name: String,

    /// 剩余待播总量
    pub total_remaining: i64,

    /// 涉及槽位数
    pub slot_count: i64,
}

/// 告警总览
///
/// 各分段独立下发,缺失分段按空集合处理。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertsOverview {
    /// 汇总计数
    #[serde(default)]
    pub summary: AlertsSummary,

    /// 按日告警
    #[serde(default)]
    pub day_alerts: Vec<DayAlert>,

    /// 槽位告警
    #[serde(default)]
    pub slot_alerts: Vec<SlotAlert>,

    /// 作物告警
    #[serde(default)]
    pub plant_alerts: Vec<PlantAlert>,
}

/// 当日播种摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySummary {
    /// 摘要日期
    pub date: NaiveDate,

    /// 今日到期槽位数
    pub slots_due_today: i64,

    /// 涉及作物数
    pub plants_involved: i64,

    /// 剩余待播总量
    pub total_remaining: i64,
}
