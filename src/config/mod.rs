// ==========================================
// 苗圃育苗排产系统 - 配置层
// ==========================================
// 职责: 排产与缓存配置的定义、加载、校验
// 红线: 本核心无持久化,配置由宿主注入或从 JSON 载入
// ==========================================

pub mod sowing_config;

// 重导出核心配置
pub use sowing_config::{
    ConfigError, SowingConfig, DEFAULT_ALERTS_CACHE_TTL_SECS, DEFAULT_BULK_CACHE_TTL_SECS,
    DEFAULT_URGENT_WINDOW_DAYS,
};
