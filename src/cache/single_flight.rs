// ==========================================
// 苗圃育苗排产系统 - 同键抓取合并
// ==========================================
// 职责: 对同一缓存键的并发抓取按键串行化,避免重复打后端
// 用法: 先取键锁,再查缓存,未命中才抓取
// ==========================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// 同键抓取合并
///
/// 每个键对应一把异步锁;后到的同键调用在锁上等待,
/// 醒来后先查缓存即可命中首个调用写入的结果。
/// 键集合有界(请求指纹数量有限),锁表不做回收。
#[derive(Default)]
pub struct SingleFlight {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SingleFlight {
    /// 创建新的合并器
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得键锁
    ///
    /// 返回的守卫存活期间,同键的其他调用会在此等待。
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.lock_table();
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    fn lock_table(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        match self.locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
