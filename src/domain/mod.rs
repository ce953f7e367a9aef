// ==========================================
// 苗圃育苗排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、只读派生视图
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod alerts;
pub mod plant;
pub mod reminder;
pub mod slot;
pub mod stats;
pub mod types;

// 重导出核心类型
pub use alerts::{AlertsOverview, AlertsSummary, DayAlert, PlantAlert, SlotAlert, TodaySummary};
pub use plant::{find_plant_subtype, Plant, Subtype};
pub use reminder::{RawReminderRecord, Reminder, ReminderPayload, ReminderSummary};
pub use slot::{RawSlotRecord, Slot, SlotDerived, SlotUrgency};
pub use stats::{AggregateStats, PlantCompletion, PlantStat, StatsRollup, SubtypeStat};
pub use types::{CompletionBand, QualityLevel, ReminderKind, SowPriority};
