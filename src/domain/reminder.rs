// ==========================================
// 苗圃育苗排产系统 - 播种提醒实体
// ==========================================
// 职责: 定义提醒的标签联合模型与上游原始记录
// 红线: 有效性判定规则在 ReminderFilter 引擎,实体只承载数据
// ==========================================

use crate::domain::types::{ReminderKind, SowPriority};
use serde::{Deserialize, Serialize};

// ==========================================
// RawReminderRecord - 上游原始提醒记录
// ==========================================
// 用途: 归一化管道中间产物(上游松散结构 → 标签联合)
// 生命周期: 仅在归一化流程内
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReminderRecord {
    /// 提醒 ID
    pub reminder_id: Option<String>,

    /// 提醒类型标签 ("SLOT" / "ORDER" / 其他)
    pub reminder_type: Option<String>,

    /// 上游已判定的优先级标签
    pub priority: Option<String>,

    /// 关联槽位 ID (槽位级提醒)
    pub slot_id: Option<String>,

    /// 关联订单 ID (订单级提醒)
    pub order_id: Option<String>,

    /// 作物名称(展示用)
    pub plant_name: Option<String>,

    /// 品种名称(展示用)
    pub subtype_name: Option<String>,

    /// 剩余待播数量
    pub remaining_to_sow: Option<i64>,

    /// 目标总量
    pub total_quantity_required: Option<i64>,

    /// 已预订订单数(槽位级)
    pub orders_booked: Option<i64>,

    /// 订购总苗数(槽位级)
    pub total_booked_plants: Option<i64>,
}

// ==========================================
// ReminderPayload - 提醒载荷(标签联合)
// ==========================================
/// 提醒载荷
///
/// SLOT 与 ORDER 各自携带显式字段,有效性判定可以穷举匹配。
/// Other 变体透传未识别类型(向前兼容,不参与过滤)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderPayload {
    /// 槽位级提醒
    Slot {
        slot_id: String,
        remaining_to_sow: i64,
        total_quantity_required: i64,
        orders_booked: i64,
        total_booked_plants: i64,
    },
    /// 订单级提醒
    Order {
        order_id: String,
        remaining_to_sow: i64,
        total_quantity_required: i64,
    },
    /// 未识别类型,保留原始标签
    Other { type_tag: String },
}

impl ReminderPayload {
    /// 载荷对应的提醒类型
    pub fn kind(&self) -> ReminderKind {
        match self {
            ReminderPayload::Slot { .. } => ReminderKind::Slot,
            ReminderPayload::Order { .. } => ReminderKind::Order,
            ReminderPayload::Other { .. } => ReminderKind::Other,
        }
    }
}

// ==========================================
// Reminder - 播种提醒
// ==========================================
/// 播种提醒
///
/// priority 由上游下发,本核心只过滤、不重判;
/// 上游缺失或无法识别时为 None。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// 提醒 ID
    pub reminder_id: String,

    /// 作物名称(展示用)
    pub plant_name: Option<String>,

    /// 品种名称(展示用)
    pub subtype_name: Option<String>,

    /// 上游已判定的优先级
    pub priority: Option<SowPriority>,

    /// 提醒载荷
    pub payload: ReminderPayload,
}

impl Reminder {
    /// 提醒类型
    pub fn kind(&self) -> ReminderKind {
        self.payload.kind()
    }
}

// ==========================================
// ReminderSummary - 提醒汇总
// ==========================================
/// 提醒汇总计数
///
/// 消费方据此显示角标,无需重新推导优先级。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderSummary {
    /// 有效提醒总数
    pub total: usize,

    /// 紧急或逾期的提醒数
    pub urgent_or_overdue: usize,

    /// 槽位级提醒数
    pub slot_count: usize,

    /// 订单级提醒数
    pub order_count: usize,

    /// 未识别类型提醒数
    pub other_count: usize,
}
