// ==========================================
// 苗圃育苗排产系统 - 槽位供需聚合引擎
// ==========================================
// 职责: 计算槽位已播总量、缺口、富余、含备苗目标量与过期标志
// 输入: 归一化后的 Slot + 备苗比例默认值 + 今天
// 输出: SlotDerived
// 红线: 纯函数,时间一律由调用方注入
// ==========================================

use crate::domain::slot::{Slot, SlotDerived};
use chrono::NaiveDate;
use tracing::instrument;

// ==========================================
// SlotAggregator - 槽位供需聚合引擎
// ==========================================
// 无状态引擎,不需要注入依赖
pub struct SlotAggregator;

impl SlotAggregator {
    /// 创建新的聚合引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 批量聚合(推荐使用)
    #[instrument(skip(self, slots), fields(count = slots.len()))]
    pub fn derive_batch(
        &self,
        slots: &[Slot],
        default_buffer_pct: Option<f64>,
        today: NaiveDate,
    ) -> Vec<SlotDerived> {
        slots
            .iter()
            .map(|slot| self.derive(slot, default_buffer_pct, today))
            .collect()
    }

    /// 单槽位聚合
    ///
    /// 口径:
    /// - total_sown = office_sowed + primary_sowed
    /// - gap = total_booked_plants - total_sown (可为负 = 超播)
    /// - surplus = max(0, total_sown - total_booked_plants)
    /// - required_with_buffer = ceil(total_booked_plants * (1 + buffer/100)),
    ///   备苗比例取槽位覆盖值,缺省回落到品种默认值,再缺省按 0
    /// - is_past: end_day < today (日历日比较); 结束日未知时为 None,
    ///   该槽位不参与过期/未来分类,数量派生照常
    pub fn derive(
        &self,
        slot: &Slot,
        default_buffer_pct: Option<f64>,
        today: NaiveDate,
    ) -> SlotDerived {
        let total_sown = slot.office_sowed + slot.primary_sowed;
        let gap = slot.total_booked_plants - total_sown;
        let surplus = (total_sown - slot.total_booked_plants).max(0);

        let buffer_pct = slot.buffer_pct.or(default_buffer_pct).unwrap_or(0.0);
        let required_with_buffer =
            (slot.total_booked_plants as f64 * (1.0 + buffer_pct / 100.0)).ceil() as i64;

        let is_past = slot.end_day.map(|end_day| end_day < today);

        SlotDerived {
            slot_id: slot.slot_id.clone(),
            total_sown,
            gap,
            surplus,
            required_with_buffer,
            is_past,
        }
    }
}

impl Default for SlotAggregator {
    fn default() -> Self {
        Self::new()
    }
}
