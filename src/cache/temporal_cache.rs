// ==========================================
// 苗圃育苗排产系统 - 时效缓存
// ==========================================
// 职责: 按键缓存派生结果,TTL 到期自动失效,支持子串批量失效
// 输入: 键(请求指纹) + 值
// 输出: 未过期的缓存值
// 红线: 每个数据类一个缓存实例,各自持有自己的 TTL
// ==========================================

use crate::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// CacheEntry - 缓存条目
// ==========================================
/// 缓存条目
///
/// 条目不可原地修改,刷新时整体替换。
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// 缓存值
    pub data: V,

    /// 写入时刻 (UTC)
    pub stored_at: DateTime<Utc>,
}

// ==========================================
// TemporalCache - 时效缓存
// ==========================================
/// 时效缓存
///
/// 过期边界取"到期即失效": elapsed >= ttl 判为过期,
/// 即 TTL 前 1ms 可命中、TTL 整点起不可命中。
///
/// 内部用 Mutex 同步,单键写入整体替换,无部分写可见。
pub struct TemporalCache<V> {
    /// 缓存名(日志用)
    name: &'static str,

    /// 条目存活时长
    ttl: Duration,

    /// 时钟能力(测试注入固定时钟)
    clock: Arc<dyn Clock>,

    /// 条目表
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TemporalCache<V> {
    /// 创建新的时效缓存
    ///
    /// # 参数
    /// - name: 缓存名(日志用)
    /// - ttl: 条目存活时长
    /// - clock: 时钟能力
    pub fn new(name: &'static str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 读取缓存值
    ///
    /// 仅当 now - stored_at < ttl 时命中;过期条目顺带清除。
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_utc();
        let mut entries = self.lock_entries();

        match entries.get(key) {
            Some(entry) if now - entry.stored_at < self.ttl => {
                debug!(cache = self.name, key, "缓存命中");
                Some(entry.data.clone())
            }
            Some(_) => {
                debug!(cache = self.name, key, "缓存过期");
                entries.remove(key);
                None
            }
            None => {
                debug!(cache = self.name, key, "缓存未命中");
                None
            }
        }
    }

    /// 写入缓存值
    ///
    /// 以当前时刻整体替换已有条目。
    pub fn set(&self, key: &str, value: V) {
        let stored_at = self.clock.now_utc();
        let mut entries = self.lock_entries();
        entries.insert(
            key.to_string(),
            CacheEntry {
                data: value,
                stored_at,
            },
        );
        debug!(cache = self.name, key, "缓存写入");
    }

    /// 失效缓存
    ///
    /// - None: 清空全部条目
    /// - Some(pattern): 删除所有键中包含该子串的条目(前缀式匹配)
    pub fn invalidate(&self, pattern: Option<&str>) {
        let mut entries = self.lock_entries();
        match pattern {
            None => {
                let removed = entries.len();
                entries.clear();
                debug!(cache = self.name, removed, "缓存整体清空");
            }
            Some(pattern) => {
                let before = entries.len();
                entries.retain(|key, _| !key.contains(pattern));
                debug!(
                    cache = self.name,
                    pattern,
                    removed = before - entries.len(),
                    "缓存按模式失效"
                );
            }
        }
    }

    /// 当前条目数(含已过期未清除的条目)
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    // 锁中毒时接管内部数据继续服务,缓存内容可安全丢弃重建
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
