// ==========================================
// 苗圃育苗排产系统 - 生产槽位实体
// ==========================================
// 职责: 定义槽位实体、上游原始记录、派生量与紧迫度视图
// 红线: 派生量只读,本核心不回写槽位
// ==========================================

use crate::domain::types::SowPriority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawSlotRecord - 上游原始槽位记录
// ==========================================
// 用途: 数据归一化管道中间产物(上游 JSON → 字段清洗 → Slot)
// 生命周期: 仅在归一化流程内
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSlotRecord {
    /// 槽位 ID
    pub slot_id: Option<String>,

    /// 生产窗口起始日 (YYYY-MM-DD, 上游字符串)
    pub start_day: Option<String>,

    /// 生产窗口结束日 (YYYY-MM-DD, 上游字符串)
    pub end_day: Option<String>,

    /// 订单已订购总苗数
    pub total_booked_plants: Option<i64>,

    /// 穴盘已播数量
    pub office_sowed: Option<i64>,

    /// 大田已播数量
    pub primary_sowed: Option<i64>,

    /// 槽位级成苗天数覆盖值
    pub ready_days: Option<i32>,

    /// 槽位级备苗比例覆盖值 (0-100)
    pub buffer_pct: Option<f64>,
}

// ==========================================
// Slot - 生产槽位
// ==========================================
/// 生产槽位
///
/// 一个品种在一段日期窗口内的生产分配。
/// 数量字段经归一化后保证非负;日期字段解析失败时为 None,
/// 该槽位不参与过期/未来判定,但数量派生照常进行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// 槽位 ID
    pub slot_id: String,

    /// 生产窗口起始日
    pub start_day: Option<NaiveDate>,

    /// 生产窗口结束日
    pub end_day: Option<NaiveDate>,

    /// 订单已订购总苗数
    pub total_booked_plants: i64,

    /// 穴盘已播数量
    pub office_sowed: i64,

    /// 大田已播数量
    pub primary_sowed: i64,

    /// 槽位级成苗天数覆盖值(缺省时用品种默认值)
    pub ready_days: Option<i32>,

    /// 槽位级备苗比例覆盖值 (0-100, 缺省时用品种默认值)
    pub buffer_pct: Option<f64>,
}

// ==========================================
// SlotDerived - 槽位供需派生量
// ==========================================
/// 槽位供需派生量
///
/// gap 与 surplus 互补: 两者不会同时为正。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDerived {
    /// 槽位 ID
    pub slot_id: String,

    /// 已播总量 (穴盘 + 大田)
    pub total_sown: i64,

    /// 缺口 = 订购 - 已播 (可为负,负值表示超播)
    pub gap: i64,

    /// 富余 = max(0, 已播 - 订购), 可转拨给其他槽位
    pub surplus: i64,

    /// 含备苗比例的目标量 = ceil(订购 * (1 + 备苗比例/100))
    pub required_with_buffer: i64,

    /// 是否已过期 (end_day < today); 结束日未知时为 None
    pub is_past: Option<bool>,
}

// ==========================================
// SlotUrgency - 槽位紧迫度视图
// ==========================================
/// 槽位紧迫度视图
///
/// 由 ReadinessScheduler 产出,reason 为 JSON 结构化判定依据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotUrgency {
    /// 槽位 ID
    pub slot_id: String,

    /// 是否有可用的成苗天数(槽位覆盖值或品种默认值)
    pub has_ready_days: bool,

    /// 槽位自身是否携带成苗天数覆盖值(仅用于界面标注)
    pub is_slot_ready_days_set: bool,

    /// 实际参与计算的成苗天数
    pub ready_days: Option<i32>,

    /// 最迟播种日 = start_day - ready_days
    pub sow_by_date: Option<NaiveDate>,

    /// 距最迟播种日天数 (可为负)
    pub days_until_sow: Option<i64>,

    /// 播种优先级
    pub priority: SowPriority,

    /// 判定依据 (JSON)
    pub reason: String,
}
