// ==========================================
// 苗圃育苗排产系统 - 数据归一化引擎
// ==========================================
// 职责: 上游原始记录清洗(缺省补零、负值钳制、日期解析)+ 质量报告
// 输入: RawSlotRecord / RawReminderRecord 批次
// 输出: 领域实体批次 + 质量报告
// 红线: 单条坏记录只跳过或修正,绝不让整批失败
// ==========================================

use crate::domain::reminder::{RawReminderRecord, Reminder, ReminderPayload};
use crate::domain::slot::{RawSlotRecord, Slot};
use crate::domain::types::{QualityLevel, SowPriority};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use uuid::Uuid;

// ==========================================
// 质量报告
// ==========================================

/// 单条质量违规
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityViolation {
    /// 记录在批次中的序号(从 0 起)
    pub record_no: usize,

    /// 记录 ID(可得时)
    pub record_id: Option<String>,

    /// 涉及字段
    pub field: String,

    /// 违规说明
    pub message: String,

    /// 质量等级
    pub level: QualityLevel,
}

/// 批次质量报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 批次 ID (UUID)
    pub batch_id: String,

    /// 输入记录总数
    pub total: usize,

    /// 接受记录数
    pub accepted: usize,

    /// 跳过记录数 (ERROR 级)
    pub skipped: usize,

    /// 违规明细
    pub violations: Vec<QualityViolation>,
}

/// 归一化批次结果
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch<T> {
    /// 清洗后的记录
    pub records: Vec<T>,

    /// 质量报告
    pub report: QualityReport,
}

// ==========================================
// RecordNormalizer - 数据归一化引擎
// ==========================================
// 无状态引擎,所有方法都是纯函数
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// 创建新的归一化引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 槽位归一化
    // ==========================================

    /// 归一化槽位批次
    ///
    /// 规则:
    /// - slot_id 缺失 → ERROR, 跳过该记录
    /// - 数量字段缺失 → 补 0 (边界统一补零,内层引擎按全量字段处理)
    /// - 数量为负 → WARNING, 钳制为 0
    /// - 日期解析失败 → WARNING, 置 None (不参与过期判定)
    /// - ready_days 为负 → WARNING, 置 None
    /// - buffer_pct 超出 [0, 100] → WARNING, 钳制入界
    #[instrument(skip(self, raw_records), fields(count = raw_records.len()))]
    pub fn normalize_slots(&self, raw_records: Vec<RawSlotRecord>) -> NormalizedBatch<Slot> {
        let total = raw_records.len();
        let mut records = Vec::with_capacity(total);
        let mut violations = Vec::new();

        for (record_no, raw) in raw_records.into_iter().enumerate() {
            let slot_id = match raw.slot_id {
                Some(id) if !id.trim().is_empty() => id,
                _ => {
                    violations.push(QualityViolation {
                        record_no,
                        record_id: None,
                        field: "slot_id".to_string(),
                        message: "槽位 ID 缺失,记录跳过".to_string(),
                        level: QualityLevel::Error,
                    });
                    continue;
                }
            };

            let start_day = self.parse_day(
                raw.start_day.as_deref(),
                record_no,
                &slot_id,
                "start_day",
                &mut violations,
            );
            let end_day = self.parse_day(
                raw.end_day.as_deref(),
                record_no,
                &slot_id,
                "end_day",
                &mut violations,
            );

            let total_booked_plants = self.clamp_quantity(
                raw.total_booked_plants,
                record_no,
                &slot_id,
                "total_booked_plants",
                &mut violations,
            );
            let office_sowed = self.clamp_quantity(
                raw.office_sowed,
                record_no,
                &slot_id,
                "office_sowed",
                &mut violations,
            );
            let primary_sowed = self.clamp_quantity(
                raw.primary_sowed,
                record_no,
                &slot_id,
                "primary_sowed",
                &mut violations,
            );

            let ready_days = match raw.ready_days {
                Some(days) if days < 0 => {
                    violations.push(QualityViolation {
                        record_no,
                        record_id: Some(slot_id.clone()),
                        field: "ready_days".to_string(),
                        message: format!("成苗天数为负({}),按缺失处理", days),
                        level: QualityLevel::Warning,
                    });
                    None
                }
                other => other,
            };

            let buffer_pct = match raw.buffer_pct {
                Some(pct) if !(0.0..=100.0).contains(&pct) => {
                    let clamped = pct.clamp(0.0, 100.0);
                    violations.push(QualityViolation {
                        record_no,
                        record_id: Some(slot_id.clone()),
                        field: "buffer_pct".to_string(),
                        message: format!("备苗比例超界({}),钳制为 {}", pct, clamped),
                        level: QualityLevel::Warning,
                    });
                    Some(clamped)
                }
                other => other,
            };

            records.push(Slot {
                slot_id,
                start_day,
                end_day,
                total_booked_plants,
                office_sowed,
                primary_sowed,
                ready_days,
                buffer_pct,
            });
        }

        self.finish_batch(total, records, violations)
    }

    // ==========================================
    // 提醒归一化
    // ==========================================

    /// 归一化提醒批次
    ///
    /// 规则:
    /// - reminder_type 为 "SLOT"/"ORDER" → 对应载荷,关联 ID 缺失时 ERROR 跳过
    /// - 其他 reminder_type → Other 载荷透传(向前兼容)
    /// - reminder_id 缺失 → WARNING, 生成 UUID 兜底
    /// - priority 无法识别 → WARNING, 置 None
    /// - 数量字段缺失 → 补 0, 为负 → WARNING 钳制为 0
    #[instrument(skip(self, raw_records), fields(count = raw_records.len()))]
    pub fn normalize_reminders(
        &self,
        raw_records: Vec<RawReminderRecord>,
    ) -> NormalizedBatch<Reminder> {
        let total = raw_records.len();
        let mut records = Vec::with_capacity(total);
        let mut violations = Vec::new();

        for (record_no, raw) in raw_records.into_iter().enumerate() {
            let reminder_id = match raw.reminder_id {
                Some(id) if !id.trim().is_empty() => id,
                _ => {
                    let generated = Uuid::new_v4().to_string();
                    violations.push(QualityViolation {
                        record_no,
                        record_id: Some(generated.clone()),
                        field: "reminder_id".to_string(),
                        message: "提醒 ID 缺失,已生成兜底 ID".to_string(),
                        level: QualityLevel::Warning,
                    });
                    generated
                }
            };

            let priority = match raw.priority.as_deref() {
                None => None,
                Some(tag) => match SowPriority::parse_tag(tag) {
                    Some(priority) => Some(priority),
                    None => {
                        violations.push(QualityViolation {
                            record_no,
                            record_id: Some(reminder_id.clone()),
                            field: "priority".to_string(),
                            message: format!("无法识别的优先级标签: {}", tag),
                            level: QualityLevel::Warning,
                        });
                        None
                    }
                },
            };

            let type_tag = raw
                .reminder_type
                .as_deref()
                .map(|t| t.trim().to_uppercase())
                .unwrap_or_else(|| "UNKNOWN".to_string());

            let payload = match type_tag.as_str() {
                "SLOT" => {
                    let Some(slot_id) = raw.slot_id.clone().filter(|id| !id.trim().is_empty())
                    else {
                        violations.push(QualityViolation {
                            record_no,
                            record_id: Some(reminder_id.clone()),
                            field: "slot_id".to_string(),
                            message: "槽位级提醒缺少槽位 ID,记录跳过".to_string(),
                            level: QualityLevel::Error,
                        });
                        continue;
                    };
                    ReminderPayload::Slot {
                        slot_id,
                        remaining_to_sow: self.clamp_quantity(
                            raw.remaining_to_sow,
                            record_no,
                            &reminder_id,
                            "remaining_to_sow",
                            &mut violations,
                        ),
                        total_quantity_required: self.clamp_quantity(
                            raw.total_quantity_required,
                            record_no,
                            &reminder_id,
                            "total_quantity_required",
                            &mut violations,
                        ),
                        orders_booked: self.clamp_quantity(
                            raw.orders_booked,
                            record_no,
                            &reminder_id,
                            "orders_booked",
                            &mut violations,
                        ),
                        total_booked_plants: self.clamp_quantity(
                            raw.total_booked_plants,
                            record_no,
                            &reminder_id,
                            "total_booked_plants",
                            &mut violations,
                        ),
                    }
                }
                "ORDER" => {
                    let Some(order_id) = raw.order_id.clone().filter(|id| !id.trim().is_empty())
                    else {
                        violations.push(QualityViolation {
                            record_no,
                            record_id: Some(reminder_id.clone()),
                            field: "order_id".to_string(),
                            message: "订单级提醒缺少订单 ID,记录跳过".to_string(),
                            level: QualityLevel::Error,
                        });
                        continue;
                    };
                    ReminderPayload::Order {
                        order_id,
                        remaining_to_sow: self.clamp_quantity(
                            raw.remaining_to_sow,
                            record_no,
                            &reminder_id,
                            "remaining_to_sow",
                            &mut violations,
                        ),
                        total_quantity_required: self.clamp_quantity(
                            raw.total_quantity_required,
                            record_no,
                            &reminder_id,
                            "total_quantity_required",
                            &mut violations,
                        ),
                    }
                }
                other => ReminderPayload::Other {
                    type_tag: other.to_string(),
                },
            };

            records.push(Reminder {
                reminder_id,
                plant_name: raw.plant_name,
                subtype_name: raw.subtype_name,
                priority,
                payload,
            });
        }

        self.finish_batch(total, records, violations)
    }

    // ==========================================
    // 共用清洗规则
    // ==========================================

    /// 解析 YYYY-MM-DD 日期字符串
    ///
    /// 解析失败不报错,记 WARNING 后置 None。
    fn parse_day(
        &self,
        raw: Option<&str>,
        record_no: usize,
        record_id: &str,
        field: &str,
        violations: &mut Vec<QualityViolation>,
    ) -> Option<NaiveDate> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(day) => Some(day),
            Err(_) => {
                warn!(record_id, field, value = raw, "日期解析失败,置为未知");
                violations.push(QualityViolation {
                    record_no,
                    record_id: Some(record_id.to_string()),
                    field: field.to_string(),
                    message: format!("日期无法解析: {}", raw),
                    level: QualityLevel::Warning,
                });
                None
            }
        }
    }

    /// 数量字段清洗: 缺失补 0,负值钳制为 0
    fn clamp_quantity(
        &self,
        raw: Option<i64>,
        record_no: usize,
        record_id: &str,
        field: &str,
        violations: &mut Vec<QualityViolation>,
    ) -> i64 {
        match raw {
            None => 0,
            Some(value) if value < 0 => {
                violations.push(QualityViolation {
                    record_no,
                    record_id: Some(record_id.to_string()),
                    field: field.to_string(),
                    message: format!("数量为负({}),钳制为 0", value),
                    level: QualityLevel::Warning,
                });
                0
            }
            Some(value) => value,
        }
    }

    fn finish_batch<T>(
        &self,
        total: usize,
        records: Vec<T>,
        violations: Vec<QualityViolation>,
    ) -> NormalizedBatch<T> {
        let accepted = records.len();
        NormalizedBatch {
            records,
            report: QualityReport {
                batch_id: Uuid::new_v4().to_string(),
                total,
                accepted,
                skipped: total - accepted,
                violations,
            },
        }
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
