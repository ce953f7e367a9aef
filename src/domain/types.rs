// ==========================================
// 苗圃育苗排产系统 - 领域类型定义
// ==========================================
// 职责: 定义播种优先级、提醒类型、完成度档位等核心枚举
// 红线: 优先级是"等级制",不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 播种优先级 (Sow Priority)
// ==========================================
// 判定顺序与排序顺序是两回事:
// - 判定顺序见 ReadinessScheduler (缺成苗天数 → 已完成 → 逾期 → 紧急 → 正常)
// - 排序顺序按运营紧迫度升序派生 Ord: Complete < MissingReadyDays < Normal < Urgent < Overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SowPriority {
    Complete,         // 已完成(缺口 <= 0)
    MissingReadyDays, // 缺成苗天数,无法判定
    Normal,           // 正常,距最迟播种日尚有余量
    Urgent,           // 紧急,进入临播窗口
    Overdue,          // 逾期,最迟播种日已过且仍有缺口
}

impl SowPriority {
    /// 是否属于需要立即关注的等级(紧急或逾期)
    pub fn is_actionable_now(&self) -> bool {
        matches!(self, SowPriority::Urgent | SowPriority::Overdue)
    }

    /// 从上游字符串解析优先级
    ///
    /// 上游提醒记录自带 priority 字段,口径与本地判定一致。
    /// 无法识别的值返回 None,由调用方决定是否告警。
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "COMPLETE" => Some(SowPriority::Complete),
            "MISSING_READY_DAYS" => Some(SowPriority::MissingReadyDays),
            "NORMAL" => Some(SowPriority::Normal),
            "URGENT" => Some(SowPriority::Urgent),
            "OVERDUE" => Some(SowPriority::Overdue),
            _ => None,
        }
    }
}

impl fmt::Display for SowPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SowPriority::Complete => write!(f, "COMPLETE"),
            SowPriority::MissingReadyDays => write!(f, "MISSING_READY_DAYS"),
            SowPriority::Normal => write!(f, "NORMAL"),
            SowPriority::Urgent => write!(f, "URGENT"),
            SowPriority::Overdue => write!(f, "OVERDUE"),
        }
    }
}

// ==========================================
// 提醒类型 (Reminder Kind)
// ==========================================
// SLOT = 槽位级提醒, ORDER = 订单级提醒
// 未识别的类型保留原样透传(向前兼容)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderKind {
    Slot,
    Order,
    Other,
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderKind::Slot => write!(f, "SLOT"),
            ReminderKind::Order => write!(f, "ORDER"),
            ReminderKind::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// 完成度档位 (Completion Band)
// ==========================================
// 顺序: Critical < Partial < Satisfied
// 阈值定义见 StatsRollupEngine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionBand {
    Critical,  // 完成度不足一半
    Partial,   // 部分完成
    Satisfied, // 订购需求已全部满足
}

impl fmt::Display for CompletionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionBand::Critical => write!(f, "CRITICAL"),
            CompletionBand::Partial => write!(f, "PARTIAL"),
            CompletionBand::Satisfied => write!(f, "SATISFIED"),
        }
    }
}

// ==========================================
// 数据质量等级 (Quality Level)
// ==========================================
// WARNING: 字段被修正后记录保留
// ERROR: 记录被跳过,不进入批次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityLevel {
    Warning,
    Error,
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityLevel::Warning => write!(f, "WARNING"),
            QualityLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ord_by_operational_urgency() {
        // 排序顺序: 逾期最高,已完成最低
        assert!(SowPriority::Overdue > SowPriority::Urgent);
        assert!(SowPriority::Urgent > SowPriority::Normal);
        assert!(SowPriority::Normal > SowPriority::MissingReadyDays);
        assert!(SowPriority::MissingReadyDays > SowPriority::Complete);
    }

    #[test]
    fn test_priority_parse_tag() {
        assert_eq!(SowPriority::parse_tag("URGENT"), Some(SowPriority::Urgent));
        assert_eq!(SowPriority::parse_tag(" overdue "), Some(SowPriority::Overdue));
        assert_eq!(
            SowPriority::parse_tag("MISSING_READY_DAYS"),
            Some(SowPriority::MissingReadyDays)
        );
        assert_eq!(SowPriority::parse_tag("???"), None);
    }

    #[test]
    fn test_priority_serde_tag_format() {
        let json = serde_json::to_string(&SowPriority::MissingReadyDays).unwrap();
        assert_eq!(json, "\"MISSING_READY_DAYS\"");
    }

    #[test]
    fn test_is_actionable_now() {
        assert!(SowPriority::Urgent.is_actionable_now());
        assert!(SowPriority::Overdue.is_actionable_now());
        assert!(!SowPriority::Normal.is_actionable_now());
        assert!(!SowPriority::Complete.is_actionable_now());
    }
}
