// ==========================================
// 苗圃育苗排产系统 - 统计实体
// ==========================================
// 职责: 定义上游聚合统计与驾驶舱完成度汇总视图
// 红线: 完成度比值的除零保护在 StatsRollupEngine,实体只承载数据
// ==========================================

use crate::domain::types::CompletionBand;
use serde::{Deserialize, Serialize};

// ==========================================
// 上游聚合统计
// ==========================================

/// 作物级统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantStat {
    /// 作物 ID
    pub plant_id: String,

    /// 作物名称
    pub plant_name: String,

    /// 订购总苗数
    pub total_booked_plants: i64,

    /// 已播总量
    pub total_sowed: i64,

    /// 缺口
    pub total_gap: i64,
}

/// 品种级统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtypeStat {
    /// 品种 ID
    pub subtype_id: String,

    /// 品种名称
    pub subtype_name: String,

    /// 所属作物 ID
    pub plant_id: String,

    /// 订购总苗数
    pub total_booked_plants: i64,

    /// 已播总量
    pub total_sowed: i64,

    /// 缺口
    pub total_gap: i64,
}

/// 上游聚合统计
///
/// 各分段独立下发,缺失分段按空集合处理。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// 全局订购总苗数
    pub total_booked_plants: i64,

    /// 全局已播总量
    pub total_sowed: i64,

    /// 全局缺口
    pub total_gap: i64,

    /// 作物级统计
    #[serde(default)]
    pub plant_wise: Vec<PlantStat>,

    /// 品种级统计
    #[serde(default)]
    pub subtype_wise: Vec<SubtypeStat>,
}

// ==========================================
// 完成度汇总视图 (StatsRollupEngine 产出)
// ==========================================

/// 单作物完成度行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantCompletion {
    /// 作物 ID
    pub plant_id: String,

    /// 作物名称
    pub plant_name: String,

    /// 订购总苗数
    pub total_booked_plants: i64,

    /// 已播总量
    pub total_sowed: i64,

    /// 缺口
    pub gap: i64,

    /// 完成度比值 (total_booked_plants=0 时定义为 0.0)
    pub completion: f64,

    /// 完成度档位
    pub band: CompletionBand,
}

/// 驾驶舱完成度汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRollup {
    /// 汇总快照 ID (UUID)
    pub snapshot_id: String,

    /// 全局完成度比值
    pub overall_completion: f64,

    /// 全局完成度档位
    pub overall_band: CompletionBand,

    /// 全局订购总苗数
    pub total_booked_plants: i64,

    /// 全局已播总量
    pub total_sowed: i64,

    /// 全局缺口
    pub total_gap: i64,

    /// 作物级完成度(按完成度升序,危急在前)
    pub by_plant: Vec<PlantCompletion>,
}
