// ==========================================
// 苗圃育苗排产系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,纯函数、同步、时间显式注入
// 红线: 引擎不做 I/O, 所有判定必须输出 reason
// ==========================================

pub mod normalizer;
pub mod readiness;
pub mod reminder_filter;
pub mod slot_aggregator;
pub mod stats_rollup;

// 重导出核心引擎
pub use normalizer::{NormalizedBatch, QualityReport, QualityViolation, RecordNormalizer};
pub use readiness::ReadinessScheduler;
pub use reminder_filter::ReminderFilter;
pub use slot_aggregator::SlotAggregator;
pub use stats_rollup::{StatsRollupEngine, PARTIAL_THRESHOLD, SATISFIED_THRESHOLD};
