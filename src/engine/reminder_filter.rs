// ==========================================
// 苗圃育苗排产系统 - 提醒过滤引擎
// ==========================================
// 职责: 过滤无实际待办的提醒 + 生成汇总计数
// 输入: 归一化后的提醒列表
// 输出: 有效提醒列表 + ReminderSummary
// 红线: 只过滤不改判,优先级口径以上游为准
// ==========================================

use crate::domain::reminder::{Reminder, ReminderPayload, ReminderSummary};
use crate::domain::types::ReminderKind;
use tracing::{debug, instrument};

// ==========================================
// ReminderFilter - 提醒过滤引擎
// ==========================================
// 无状态引擎,所有方法都是纯函数
pub struct ReminderFilter;

impl ReminderFilter {
    /// 创建新的提醒过滤引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 过滤有效提醒
    ///
    /// 无效提醒(无实际待办)绝不下发给消费方。
    #[instrument(skip(self, reminders), fields(count = reminders.len()))]
    pub fn filter_valid(&self, reminders: Vec<Reminder>) -> Vec<Reminder> {
        let before = reminders.len();
        let retained: Vec<Reminder> = reminders
            .into_iter()
            .filter(|reminder| self.is_actionable(reminder))
            .collect();
        debug!(
            before,
            retained = retained.len(),
            dropped = before - retained.len(),
            "提醒过滤完成"
        );
        retained
    }

    /// 有效性判定
    ///
    /// 规则(按载荷穷举):
    /// - SLOT: (remaining_to_sow > 0 或 total_quantity_required > 0)
    ///         且 (orders_booked > 0 或 total_booked_plants > 0)
    ///   —— 既要有未完成的量,也要有真实订购背书,
    ///      过滤掉已清零的陈旧槽位提醒
    /// - ORDER: remaining_to_sow > 0 且 total_quantity_required > 0
    /// - 其他类型: 一律保留(向前兼容)
    pub fn is_actionable(&self, reminder: &Reminder) -> bool {
        match &reminder.payload {
            ReminderPayload::Slot {
                remaining_to_sow,
                total_quantity_required,
                orders_booked,
                total_booked_plants,
                ..
            } => {
                (*remaining_to_sow > 0 || *total_quantity_required > 0)
                    && (*orders_booked > 0 || *total_booked_plants > 0)
            }
            ReminderPayload::Order {
                remaining_to_sow,
                total_quantity_required,
                ..
            } => *remaining_to_sow > 0 && *total_quantity_required > 0,
            ReminderPayload::Other { .. } => true,
        }
    }

    // ==========================================
    // 汇总计数
    // ==========================================

    /// 生成提醒汇总
    ///
    /// 紧急/逾期计数直接取上游下发的 priority,本引擎不重新推导。
    pub fn summarize(&self, reminders: &[Reminder]) -> ReminderSummary {
        let mut summary = ReminderSummary {
            total: reminders.len(),
            ..ReminderSummary::default()
        };

        for reminder in reminders {
            if reminder
                .priority
                .map(|priority| priority.is_actionable_now())
                .unwrap_or(false)
            {
                summary.urgent_or_overdue += 1;
            }
            match reminder.kind() {
                ReminderKind::Slot => summary.slot_count += 1,
                ReminderKind::Order => summary.order_count += 1,
                ReminderKind::Other => summary.other_count += 1,
            }
        }

        summary
    }
}

impl Default for ReminderFilter {
    fn default() -> Self {
        Self::new()
    }
}
