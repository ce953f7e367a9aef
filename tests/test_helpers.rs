// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供内存版数据访问实现、固定时钟与测试数据构造
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use nursery_sowing_aps::domain::alerts::{AlertsOverview, TodaySummary};
use nursery_sowing_aps::domain::plant::{Plant, Subtype};
use nursery_sowing_aps::domain::reminder::RawReminderRecord;
use nursery_sowing_aps::domain::slot::RawSlotRecord;
use nursery_sowing_aps::domain::stats::{AggregateStats, PlantStat};
use nursery_sowing_aps::repository::{
    RepositoryError, RepositoryResult, SowingDataRepository,
};

// ==========================================
// 调用计数
// ==========================================

/// 各抓取操作的调用计数(断言缓存/合并行为用)
#[derive(Debug, Default)]
pub struct CallCounters {
    pub catalog: AtomicUsize,
    pub stats: AtomicUsize,
    pub reminders: AtomicUsize,
    pub alerts: AtomicUsize,
    pub today: AtomicUsize,
    pub slots: AtomicUsize,
}

// ==========================================
// FakeSowingRepository - 内存版数据访问实现
// ==========================================

/// 内存版数据访问实现
///
/// 数据在构造时注入,每次抓取记一次调用;
/// fail_all=true 时模拟上游整体不可用。
pub struct FakeSowingRepository {
    pub catalog: Vec<Plant>,
    pub stats: AggregateStats,
    pub reminders: Vec<RawReminderRecord>,
    pub alerts: AlertsOverview,
    pub today: TodaySummary,
    pub slots: Mutex<HashMap<(String, String, i32), Vec<RawSlotRecord>>>,
    pub calls: CallCounters,
    pub fail_all: bool,
}

impl FakeSowingRepository {
    /// 创建空数据的实现(各分段均为空集合)
    pub fn empty() -> Self {
        Self {
            catalog: Vec::new(),
            stats: AggregateStats::default(),
            reminders: Vec::new(),
            alerts: AlertsOverview::default(),
            today: TodaySummary {
                date: day(2024, 5, 10),
                slots_due_today: 0,
                plants_involved: 0,
                total_remaining: 0,
            },
            slots: Mutex::new(HashMap::new()),
            calls: CallCounters::default(),
            fail_all: false,
        }
    }

    /// 注入作物目录
    pub fn with_catalog(mut self, catalog: Vec<Plant>) -> Self {
        self.catalog = catalog;
        self
    }

    /// 注入聚合统计
    pub fn with_stats(mut self, stats: AggregateStats) -> Self {
        self.stats = stats;
        self
    }

    /// 注入原始提醒
    pub fn with_reminders(mut self, reminders: Vec<RawReminderRecord>) -> Self {
        self.reminders = reminders;
        self
    }

    /// 注入某作物/品种/年度的原始槽位
    pub fn with_slots(
        self,
        plant_id: &str,
        subtype_id: &str,
        year: i32,
        slots: Vec<RawSlotRecord>,
    ) -> Self {
        self.slots.lock().unwrap().insert(
            (plant_id.to_string(), subtype_id.to_string(), year),
            slots,
        );
        self
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.fail_all {
            return Err(RepositoryError::UpstreamUnavailable(
                "模拟上游不可用".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SowingDataRepository for FakeSowingRepository {
    async fn fetch_plant_catalog(&self) -> RepositoryResult<Vec<Plant>> {
        self.calls.catalog.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.catalog.clone())
    }

    async fn fetch_aggregate_stats(&self) -> RepositoryResult<AggregateStats> {
        self.calls.stats.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.stats.clone())
    }

    async fn fetch_reminders(&self) -> RepositoryResult<Vec<RawReminderRecord>> {
        self.calls.reminders.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.reminders.clone())
    }

    async fn fetch_alerts(&self) -> RepositoryResult<AlertsOverview> {
        self.calls.alerts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.alerts.clone())
    }

    async fn fetch_today_summary(&self) -> RepositoryResult<TodaySummary> {
        self.calls.today.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.today.clone())
    }

    async fn fetch_slots_for(
        &self,
        plant_id: &str,
        subtype_id: &str,
        year: i32,
    ) -> RepositoryResult<Vec<RawSlotRecord>> {
        self.calls.slots.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let slots = self.slots.lock().unwrap();
        Ok(slots
            .get(&(plant_id.to_string(), subtype_id.to_string(), year))
            .cloned()
            .unwrap_or_default())
    }
}

// ==========================================
// 测试数据构造
// ==========================================

/// 日期简写
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 创建测试用的作物目录: 番茄 P1 (开放排产, 品种 S1) + 休耕作物 P2
pub fn test_catalog() -> Vec<Plant> {
    vec![
        Plant {
            plant_id: "P1".to_string(),
            name: "番茄".to_string(),
            sowing_allowed: true,
            subtypes: vec![Subtype {
                subtype_id: "S1".to_string(),
                name: "樱桃番茄".to_string(),
                default_ready_days: Some(20),
                default_buffer_pct: Some(10.0),
            }],
        },
        Plant {
            plant_id: "P2".to_string(),
            name: "休耕作物".to_string(),
            sowing_allowed: false,
            subtypes: vec![Subtype {
                subtype_id: "S9".to_string(),
                name: "停产品种".to_string(),
                default_ready_days: None,
                default_buffer_pct: None,
            }],
        },
    ]
}

/// 创建测试用的原始槽位记录
pub fn raw_slot(
    slot_id: &str,
    start_day: &str,
    end_day: &str,
    booked: i64,
    office: i64,
    primary: i64,
    ready_days: Option<i32>,
) -> RawSlotRecord {
    RawSlotRecord {
        slot_id: Some(slot_id.to_string()),
        start_day: Some(start_day.to_string()),
        end_day: Some(end_day.to_string()),
        total_booked_plants: Some(booked),
        office_sowed: Some(office),
        primary_sowed: Some(primary),
        ready_days,
        buffer_pct: None,
    }
}

/// 创建测试用的作物级统计
pub fn plant_stat(id: &str, name: &str, booked: i64, sowed: i64) -> PlantStat {
    PlantStat {
        plant_id: id.to_string(),
        plant_name: name.to_string(),
        total_booked_plants: booked,
        total_sowed: sowed,
        total_gap: booked - sowed,
    }
}

/// 创建测试用的 Arc 仓储
pub fn arc_repo(repo: FakeSowingRepository) -> Arc<FakeSowingRepository> {
    Arc::new(repo)
}
