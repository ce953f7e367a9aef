// ==========================================
// 苗圃育苗排产系统 - 时效缓存层
// ==========================================
// 职责: 带 TTL 的进程内缓存与同键并发抓取合并
// 红线: 缓存不发起网络调用,不是数据权威来源
// ==========================================

pub mod single_flight;
pub mod temporal_cache;

// 重导出核心类型
pub use single_flight::SingleFlight;
pub use temporal_cache::{CacheEntry, TemporalCache};
