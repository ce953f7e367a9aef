// ==========================================
// 苗圃育苗排产系统 - 驾驶舱 API
// ==========================================
// 职责: 驾驶舱聚合查询(完成度汇总 + 目录透传)
// 架构: API 层 → SowingApi (目录) + Repository (统计) + 引擎层
// ==========================================

use std::sync::Arc;

use crate::api::dto::StatsRollupResponse;
use crate::api::error::ApiResult;
use crate::api::sowing_api::SowingApi;
use crate::api::CancelToken;
use crate::cache::{SingleFlight, TemporalCache};
use crate::clock::Clock;
use crate::config::SowingConfig;
use crate::domain::plant::Plant;
use crate::engine::StatsRollupEngine;
use crate::i18n;
use crate::repository::SowingDataRepository;
use tracing::instrument;

const KEY_STATS: &str = "stats";

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责:
/// 1. 完成度汇总查询(批量 TTL 缓存)
/// 2. 目录查询(委托给 SowingApi,复用其缓存)
///
/// 架构说明:
/// - 驾驶舱是前端汇总视图的专用 API 层
/// - 统计数据由上游计算,本层只做档位汇总与缓存
pub struct DashboardApi {
    /// 外部记录系统访问接口
    repo: Arc<dyn SowingDataRepository>,

    /// 排产查询 API(目录委托)
    sowing_api: Arc<SowingApi>,

    /// 完成度汇总引擎
    rollup_engine: StatsRollupEngine,

    /// 完成度汇总缓存(批量 TTL)
    stats_cache: TemporalCache<StatsRollupResponse>,

    /// 同键抓取合并
    flight: SingleFlight,
}

impl DashboardApi {
    /// 创建新的驾驶舱API
    ///
    /// # 参数
    /// - repo: 外部记录系统访问接口
    /// - sowing_api: 排产查询 API
    /// - clock: 时钟能力
    /// - config: 排产配置(构造时校验)
    pub fn new(
        repo: Arc<dyn SowingDataRepository>,
        sowing_api: Arc<SowingApi>,
        clock: Arc<dyn Clock>,
        config: &SowingConfig,
    ) -> ApiResult<Self> {
        config.validate()?;

        Ok(Self {
            repo,
            sowing_api,
            rollup_engine: StatsRollupEngine::new(),
            stats_cache: TemporalCache::new("stats", config.bulk_cache_ttl(), clock),
            flight: SingleFlight::new(),
        })
    }

    // ==========================================
    // 完成度汇总
    // ==========================================

    /// 查询驾驶舱完成度汇总(批量 TTL 缓存)
    #[instrument(skip(self, cancel))]
    pub async fn stats_rollup(&self, cancel: &CancelToken) -> ApiResult<StatsRollupResponse> {
        let _guard = self.flight.acquire(KEY_STATS).await;

        if let Some(response) = self.stats_cache.get(KEY_STATS) {
            return Ok(response);
        }

        let stats = self.repo.fetch_aggregate_stats().await?;
        if cancel.is_cancelled() {
            return Err(crate::api::error::ApiError::Cancelled);
        }

        let rollup = self.rollup_engine.rollup(&stats);
        let response = StatsRollupResponse {
            overall_band_label: i18n::band_label(rollup.overall_band),
            rollup,
        };

        self.stats_cache.set(KEY_STATS, response.clone());
        Ok(response)
    }

    // ==========================================
    // 目录查询(委托)
    // ==========================================

    /// 查询作物目录
    ///
    /// 委托给 SowingApi,复用其目录缓存。
    pub async fn plant_catalog(&self, cancel: &CancelToken) -> ApiResult<Vec<Plant>> {
        self.sowing_api.plant_catalog(cancel).await
    }

    /// 查询开放排产的作物
    pub async fn sowing_allowed_plants(&self, cancel: &CancelToken) -> ApiResult<Vec<Plant>> {
        let catalog = self.sowing_api.plant_catalog(cancel).await?;
        Ok(catalog.into_iter().filter(|p| p.sowing_allowed).collect())
    }

    // ==========================================
    // 缓存失效
    // ==========================================

    /// 失效完成度汇总缓存
    pub fn invalidate_stats(&self) {
        self.stats_cache.invalidate(Some(KEY_STATS));
    }
}
