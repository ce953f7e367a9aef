// ==========================================
// 苗圃育苗排产系统 - 排产查询 API
// ==========================================
// 职责: 编排槽位/提醒/告警查询: 抓取 → 归一化 → 引擎派生 → 缓存
// 架构: API 层 → Repository (外部记录系统) + 引擎层 + 缓存层
// 红线: 提醒永不缓存;同键并发抓取合并;撤销后不提交结果
// ==========================================

use std::sync::Arc;

use crate::api::dto::{
    OperationsSnapshot, ReminderFeedResponse, SlotOverviewResponse, SlotOverviewRow,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::CancelToken;
use crate::cache::{SingleFlight, TemporalCache};
use crate::clock::Clock;
use crate::config::SowingConfig;
use crate::domain::alerts::{AlertsOverview, TodaySummary};
use crate::domain::plant::{find_plant_subtype, Plant};
use crate::engine::{ReadinessScheduler, RecordNormalizer, ReminderFilter, SlotAggregator};
use crate::i18n;
use crate::repository::SowingDataRepository;
use tracing::{info, instrument};

// 缓存键(请求指纹)
const KEY_PLANT_CATALOG: &str = "plant_catalog";
const KEY_ALERTS: &str = "alerts";
const KEY_TODAY_SUMMARY: &str = "today_summary";
const KEY_SLOTS_PREFIX: &str = "plant_slots";

/// 槽位查询的年度合法区间
const YEAR_MIN: i32 = 2000;
const YEAR_MAX: i32 = 2100;

// ==========================================
// SowingApi - 排产查询 API
// ==========================================

/// 排产查询API
///
/// 职责:
/// 1. 槽位总览: 抓取原始槽位 → 归一化 → 供需聚合 + 临播判定 → 按紧迫度排序
/// 2. 提醒流: 强制新抓取 → 归一化 → 有效性过滤 → 汇总计数
/// 3. 告警总览/当日摘要: 短 TTL 缓存的透传查询
/// 4. 作物目录: 长 TTL 缓存,同时为槽位判定提供品种默认值
///
/// 缓存策略按数据类区分 TTL: 目录用批量 TTL,告警/摘要用时效 TTL,
/// 提醒不缓存(过期的紧迫度会误导操作)。
pub struct SowingApi {
    /// 外部记录系统访问接口
    repo: Arc<dyn SowingDataRepository>,

    /// 时钟能力
    clock: Arc<dyn Clock>,

    /// 排产配置
    config: SowingConfig,

    // 引擎(无状态)
    normalizer: RecordNormalizer,
    aggregator: SlotAggregator,
    scheduler: ReadinessScheduler,
    reminder_filter: ReminderFilter,

    // 按数据类拆分的缓存
    catalog_cache: TemporalCache<Vec<Plant>>,
    slots_cache: TemporalCache<SlotOverviewResponse>,
    alerts_cache: TemporalCache<AlertsOverview>,
    today_cache: TemporalCache<TodaySummary>,

    /// 同键抓取合并
    flight: SingleFlight,
}

impl SowingApi {
    /// 创建新的排产查询API
    ///
    /// # 参数
    /// - repo: 外部记录系统访问接口
    /// - clock: 时钟能力(测试注入固定时钟)
    /// - config: 排产配置(构造时校验)
    pub fn new(
        repo: Arc<dyn SowingDataRepository>,
        clock: Arc<dyn Clock>,
        config: SowingConfig,
    ) -> ApiResult<Self> {
        config.validate()?;

        let bulk_ttl = config.bulk_cache_ttl();
        let alerts_ttl = config.alerts_cache_ttl();

        Ok(Self {
            repo,
            clock: clock.clone(),
            config,
            normalizer: RecordNormalizer::new(),
            aggregator: SlotAggregator::new(),
            scheduler: ReadinessScheduler::new(),
            reminder_filter: ReminderFilter::new(),
            catalog_cache: TemporalCache::new("plant_catalog", bulk_ttl, clock.clone()),
            slots_cache: TemporalCache::new("plant_slots", bulk_ttl, clock.clone()),
            alerts_cache: TemporalCache::new("alerts", alerts_ttl, clock.clone()),
            today_cache: TemporalCache::new("today_summary", alerts_ttl, clock),
            flight: SingleFlight::new(),
        })
    }

    /// 槽位缓存键(请求指纹)
    pub fn slot_cache_key(plant_id: &str, subtype_id: &str, year: i32) -> String {
        format!("{}-{}-{}-{}", KEY_SLOTS_PREFIX, plant_id, subtype_id, year)
    }

    // ==========================================
    // 作物目录
    // ==========================================

    /// 查询作物目录(批量 TTL 缓存)
    #[instrument(skip(self, cancel))]
    pub async fn plant_catalog(&self, cancel: &CancelToken) -> ApiResult<Vec<Plant>> {
        let _guard = self.flight.acquire(KEY_PLANT_CATALOG).await;

        if let Some(catalog) = self.catalog_cache.get(KEY_PLANT_CATALOG) {
            return Ok(catalog);
        }

        let catalog = self.repo.fetch_plant_catalog().await?;
        self.ensure_live(cancel)?;

        self.catalog_cache.set(KEY_PLANT_CATALOG, catalog.clone());
        Ok(catalog)
    }

    // ==========================================
    // 槽位总览
    // ==========================================

    /// 查询槽位总览
    ///
    /// # 参数
    /// - plant_id / subtype_id: 作物与品种 ID
    /// - year: 年度
    /// - cancel: 撤销令牌
    ///
    /// # 返回
    /// - Ok(SlotOverviewResponse): 按紧迫度降序的总览行 + 质量报告
    /// - Err(ApiError): 入参非法 / 作物品种不存在 / 作物未开放排产 / 上游失败
    #[instrument(skip(self, cancel))]
    pub async fn slot_overview(
        &self,
        plant_id: &str,
        subtype_id: &str,
        year: i32,
        cancel: &CancelToken,
    ) -> ApiResult<SlotOverviewResponse> {
        if plant_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("作物ID不能为空".to_string()));
        }
        if subtype_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("品种ID不能为空".to_string()));
        }
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(ApiError::InvalidInput(format!(
                "年度超出合法区间 [{}, {}]: {}",
                YEAR_MIN, YEAR_MAX, year
            )));
        }

        let key = Self::slot_cache_key(plant_id, subtype_id, year);
        let _guard = self.flight.acquire(&key).await;

        if let Some(response) = self.slots_cache.get(&key) {
            return Ok(response);
        }

        // 目录提供品种默认值(成苗天数/备苗比例)与排产开关
        let catalog = self.plant_catalog(cancel).await?;
        let (plant, subtype) = find_plant_subtype(&catalog, plant_id, subtype_id)
            .ok_or_else(|| {
                ApiError::NotFound(format!("作物/品种不存在: {}/{}", plant_id, subtype_id))
            })?;
        if !plant.sowing_allowed {
            return Err(ApiError::BusinessRuleViolation(format!(
                "作物未开放排产: {}",
                plant.name
            )));
        }
        let default_ready_days = subtype.default_ready_days;
        let default_buffer_pct = subtype
            .default_buffer_pct
            .or(Some(self.config.default_buffer_pct));

        let raw_slots = self.repo.fetch_slots_for(plant_id, subtype_id, year).await?;
        self.ensure_live(cancel)?;

        let today = self.clock.today_local();
        let batch = self.normalizer.normalize_slots(raw_slots);

        let mut rows: Vec<SlotOverviewRow> = batch
            .records
            .into_iter()
            .map(|slot| {
                let derived = self.aggregator.derive(&slot, default_buffer_pct, today);
                let urgency = self.scheduler.evaluate(
                    &slot,
                    &derived,
                    default_ready_days,
                    today,
                    self.config.urgent_window_days,
                );
                let priority_label = i18n::priority_label(urgency.priority);
                SlotOverviewRow {
                    slot,
                    derived,
                    urgency,
                    priority_label,
                }
            })
            .collect();
        rows.sort_by(|a, b| self.scheduler.compare(&a.urgency, &b.urgency));

        info!(
            plant_id,
            subtype_id,
            year,
            rows = rows.len(),
            skipped = batch.report.skipped,
            "槽位总览生成完成"
        );

        let response = SlotOverviewResponse {
            plant_id: plant_id.to_string(),
            subtype_id: subtype_id.to_string(),
            year,
            generated_on: today,
            rows,
            quality: batch.report,
        };

        self.ensure_live(cancel)?;
        self.slots_cache.set(&key, response.clone());
        Ok(response)
    }

    // ==========================================
    // 提醒流
    // ==========================================

    /// 查询提醒流
    ///
    /// 提醒永不缓存: 过期的紧迫度会让用户按旧数据行动,
    /// 因此每次都强制新抓取。
    #[instrument(skip(self, cancel))]
    pub async fn reminder_feed(&self, cancel: &CancelToken) -> ApiResult<ReminderFeedResponse> {
        let raw = self.repo.fetch_reminders().await?;
        self.ensure_live(cancel)?;

        let batch = self.normalizer.normalize_reminders(raw);
        let reminders = self.reminder_filter.filter_valid(batch.records);
        let summary = self.reminder_filter.summarize(&reminders);

        Ok(ReminderFeedResponse {
            reminders,
            summary,
            quality: batch.report,
        })
    }

    // ==========================================
    // 告警与当日摘要
    // ==========================================

    /// 查询告警总览(时效 TTL 缓存)
    #[instrument(skip(self, cancel))]
    pub async fn alerts_overview(&self, cancel: &CancelToken) -> ApiResult<AlertsOverview> {
        let _guard = self.flight.acquire(KEY_ALERTS).await;

        if let Some(alerts) = self.alerts_cache.get(KEY_ALERTS) {
            return Ok(alerts);
        }

        let alerts = self.repo.fetch_alerts().await?;
        self.ensure_live(cancel)?;

        self.alerts_cache.set(KEY_ALERTS, alerts.clone());
        Ok(alerts)
    }

    /// 查询当日播种摘要(时效 TTL 缓存)
    #[instrument(skip(self, cancel))]
    pub async fn today_summary(&self, cancel: &CancelToken) -> ApiResult<TodaySummary> {
        let _guard = self.flight.acquire(KEY_TODAY_SUMMARY).await;

        if let Some(summary) = self.today_cache.get(KEY_TODAY_SUMMARY) {
            return Ok(summary);
        }

        let summary = self.repo.fetch_today_summary().await?;
        self.ensure_live(cancel)?;

        self.today_cache.set(KEY_TODAY_SUMMARY, summary.clone());
        Ok(summary)
    }

    /// 运营快照: 告警总览 + 当日摘要并发抓取
    ///
    /// 两路查询相互独立,任一失败整体失败;完成顺序不影响结果。
    #[instrument(skip(self, cancel))]
    pub async fn operations_snapshot(&self, cancel: &CancelToken) -> ApiResult<OperationsSnapshot> {
        let (alerts, today) = futures::future::try_join(
            self.alerts_overview(cancel),
            self.today_summary(cancel),
        )
        .await?;

        Ok(OperationsSnapshot { alerts, today })
    }

    // ==========================================
    // 缓存失效
    // ==========================================

    /// 失效槽位缓存
    ///
    /// - None: 清空全部槽位缓存
    /// - Some(plant_id): 仅失效该作物的槽位缓存(前缀匹配)
    pub fn invalidate_slots(&self, plant_id: Option<&str>) {
        match plant_id {
            None => self.slots_cache.invalidate(Some(KEY_SLOTS_PREFIX)),
            Some(plant_id) => self
                .slots_cache
                .invalidate(Some(&format!("{}-{}", KEY_SLOTS_PREFIX, plant_id))),
        }
    }

    /// 清空本 API 的全部缓存
    pub fn invalidate_all(&self) {
        self.catalog_cache.invalidate(None);
        self.slots_cache.invalidate(None);
        self.alerts_cache.invalidate(None);
        self.today_cache.invalidate(None);
    }

    // ==========================================
    // 内部工具
    // ==========================================

    /// 撤销检查: 已撤销则丢弃结果
    fn ensure_live(&self, cancel: &CancelToken) -> ApiResult<()> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        Ok(())
    }
}
