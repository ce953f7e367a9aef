// ==========================================
// 苗圃育苗排产系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio
// 系统定位: 决策支持核心库 (只读派生,不回写记录系统)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据访问层 - 外部记录系统接口
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 缓存层 - 时效缓存与抓取合并
pub mod cache;

// 配置层 - 排产配置
pub mod config;

// 时钟能力
pub mod clock;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CompletionBand, QualityLevel, ReminderKind, SowPriority};

// 领域实体
pub use domain::{
    AggregateStats, AlertsOverview, Plant, PlantCompletion, RawReminderRecord, RawSlotRecord,
    Reminder, ReminderPayload, ReminderSummary, Slot, SlotDerived, SlotUrgency, StatsRollup,
    Subtype, TodaySummary,
};

// 引擎
pub use engine::{
    QualityReport, ReadinessScheduler, RecordNormalizer, ReminderFilter, SlotAggregator,
    StatsRollupEngine,
};

// 缓存与时钟
pub use cache::{SingleFlight, TemporalCache};
pub use clock::{Clock, FixedClock, SystemClock};

// 配置
pub use config::SowingConfig;

// API
pub use api::{ApiError, ApiResult, CancelToken, DashboardApi, SowingApi};

// 数据访问
pub use repository::{RepositoryError, SowingDataRepository};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "苗圃育苗排产系统";
