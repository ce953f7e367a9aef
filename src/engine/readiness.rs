// ==========================================
// 苗圃育苗排产系统 - 临播判定引擎
// ==========================================
// 职责: 计算最迟播种日 + 判定播种优先级
// 输入: Slot + SlotDerived + 品种默认成苗天数 + 今天 + 临播窗口
// 输出: SlotUrgency (含 JSON 判定依据)
// 红线: 判定顺序固定,命中即返回;所有判定必须输出 reason
// ==========================================

use crate::domain::slot::{Slot, SlotDerived, SlotUrgency};
use crate::domain::types::SowPriority;
use chrono::{Duration, NaiveDate};
use serde_json::json;
use std::cmp::Ordering;
use tracing::instrument;

// ==========================================
// ReadinessScheduler - 临播判定引擎
// ==========================================
pub struct ReadinessScheduler;

impl ReadinessScheduler {
    /// 创建新的临播判定引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 批量判定(推荐使用)
    ///
    /// slots 与 derived 按下标一一对应(同一批聚合的产物)。
    #[instrument(skip(self, pairs), fields(count = pairs.len()))]
    pub fn evaluate_batch(
        &self,
        pairs: &[(&Slot, &SlotDerived)],
        subtype_default_ready_days: Option<i32>,
        today: NaiveDate,
        urgent_window_days: i32,
    ) -> Vec<SlotUrgency> {
        pairs
            .iter()
            .map(|(slot, derived)| {
                self.evaluate(
                    slot,
                    derived,
                    subtype_default_ready_days,
                    today,
                    urgent_window_days,
                )
            })
            .collect()
    }

    /// 单槽位判定
    ///
    /// 判定顺序(命中即定级):
    /// 1) 无成苗天数(槽位覆盖值与品种默认值均缺失) → MissingReadyDays, 跳过日期计算
    /// 2) gap <= 0 → Complete (完成优先于一切日期状态)
    /// 3) 最迟播种日已过且有缺口 → Overdue
    /// 4) 距最迟播种日 0..=urgent_window_days 天 → Urgent
    /// 5) 其他 → Normal
    ///
    /// 边界处理:
    /// - start_day 未知时无法计算最迟播种日,有缺口按 Normal 处理并在
    ///   reason 中注明窗口起点缺失
    /// - is_slot_ready_days_set 仅标注覆盖值来源,不参与定级
    pub fn evaluate(
        &self,
        slot: &Slot,
        derived: &SlotDerived,
        subtype_default_ready_days: Option<i32>,
        today: NaiveDate,
        urgent_window_days: i32,
    ) -> SlotUrgency {
        let is_slot_ready_days_set = slot.ready_days.is_some();
        let ready_days = slot.ready_days.or(subtype_default_ready_days);

        // 规则1: 缺成苗天数
        let Some(ready_days_value) = ready_days else {
            let reason = json!({
                "priority": SowPriority::MissingReadyDays.to_string(),
                "primary_reason": "MISSING_READY_DAYS",
                "factors": ["slot_ready_days=absent", "subtype_default=absent"],
                "details": { "today": today.to_string() },
            });
            return SlotUrgency {
                slot_id: slot.slot_id.clone(),
                has_ready_days: false,
                is_slot_ready_days_set,
                ready_days: None,
                sow_by_date: None,
                days_until_sow: None,
                priority: SowPriority::MissingReadyDays,
                reason: reason.to_string(),
            };
        };

        // 最迟播种日 = 窗口起始日 - 成苗天数
        let sow_by_date = slot
            .start_day
            .map(|start_day| start_day - Duration::days(ready_days_value as i64));
        let days_until_sow = sow_by_date.map(|sow_by| (sow_by - today).num_days());

        let (priority, primary_reason, factors) = self.classify(
            derived.gap,
            slot.start_day,
            days_until_sow,
            urgent_window_days,
        );

        let reason = json!({
            "priority": priority.to_string(),
            "primary_reason": primary_reason,
            "factors": factors,
            "details": {
                "today": today.to_string(),
                "ready_days": ready_days_value,
                "ready_days_source": if is_slot_ready_days_set { "slot" } else { "subtype_default" },
                "gap": derived.gap,
                "sow_by_date": sow_by_date.map(|d| d.to_string()),
                "days_until_sow": days_until_sow,
                "urgent_window_days": urgent_window_days,
            },
        });

        SlotUrgency {
            slot_id: slot.slot_id.clone(),
            has_ready_days: true,
            is_slot_ready_days_set,
            ready_days: Some(ready_days_value),
            sow_by_date,
            days_until_sow,
            priority,
            reason: reason.to_string(),
        }
    }

    // ==========================================
    // 定级规则 (规则2-5)
    // ==========================================

    fn classify(
        &self,
        gap: i64,
        start_day: Option<NaiveDate>,
        days_until_sow: Option<i64>,
        urgent_window_days: i32,
    ) -> (SowPriority, &'static str, Vec<String>) {
        // 规则2: 已完成(缺口 <= 0),日期状态不影响
        if gap <= 0 {
            return (
                SowPriority::Complete,
                "COMPLETE",
                vec![format!("gap={} <= 0", gap)],
            );
        }

        // 窗口起点未知: 无法计算最迟播种日,按正常处理
        let Some(days) = days_until_sow else {
            let factor = if start_day.is_none() {
                "start_day=unknown, sow_by_date unavailable".to_string()
            } else {
                "sow_by_date unavailable".to_string()
            };
            return (SowPriority::Normal, "START_DAY_UNKNOWN", vec![factor]);
        };

        // 规则3: 逾期
        if days < 0 {
            return (
                SowPriority::Overdue,
                "SOW_BY_PASSED",
                vec![format!("days_until_sow={} < 0, gap={}", days, gap)],
            );
        }

        // 规则4: 临播窗口内
        if days <= urgent_window_days as i64 {
            return (
                SowPriority::Urgent,
                "WITHIN_URGENT_WINDOW",
                vec![format!(
                    "days_until_sow={} <= urgent_window_days={}",
                    days, urgent_window_days
                )],
            );
        }

        // 规则5: 正常
        (
            SowPriority::Normal,
            "AHEAD_OF_WINDOW",
            vec![format!(
                "days_until_sow={} > urgent_window_days={}",
                days, urgent_window_days
            )],
        )
    }

    // ==========================================
    // 排序
    // ==========================================

    /// 按运营紧迫度排序
    ///
    /// 排序键:
    /// 1) 优先级降序 (Overdue > Urgent > Normal > MissingReadyDays > Complete)
    /// 2) 距最迟播种日升序 (未知日期排在同级末尾)
    /// 3) 槽位 ID 升序 (稳定可复现)
    pub fn sort_by_urgency(&self, mut urgencies: Vec<SlotUrgency>) -> Vec<SlotUrgency> {
        urgencies.sort_by(|a, b| self.compare(a, b));
        urgencies
    }

    /// 比较两个槽位的紧迫度
    pub fn compare(&self, a: &SlotUrgency, b: &SlotUrgency) -> Ordering {
        b.priority
            .cmp(&a.priority)
            .then_with(|| match (a.days_until_sow, b.days_until_sow) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.slot_id.cmp(&b.slot_id))
    }
}

impl Default for ReadinessScheduler {
    fn default() -> Self {
        Self::new()
    }
}
