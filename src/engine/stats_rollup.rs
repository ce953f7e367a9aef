// ==========================================
// 苗圃育苗排产系统 - 完成度汇总引擎
// ==========================================
// 职责: 驾驶舱完成度指标生成
// 输入: 上游聚合统计
// 输出: StatsRollup (全局 + 作物级完成度与档位)
// 红线: 比值必须有除零保护,不允许 NaN/Infinity 进入视图
// ==========================================

use crate::domain::stats::{AggregateStats, PlantCompletion, StatsRollup};
use crate::domain::types::CompletionBand;
use tracing::instrument;
use uuid::Uuid;

/// 完成度档位阈值: 比值达到 1.0 为满足
pub const SATISFIED_THRESHOLD: f64 = 1.0;

/// 完成度档位阈值: 比值达到 0.5 为部分完成
pub const PARTIAL_THRESHOLD: f64 = 0.5;

// ==========================================
// StatsRollupEngine - 完成度汇总引擎
// ==========================================
// 无状态引擎,所有方法都是纯函数
pub struct StatsRollupEngine;

impl StatsRollupEngine {
    /// 创建新的完成度汇总引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成驾驶舱完成度汇总
    ///
    /// 作物级分段缺失时按空集合处理,不报错。
    /// by_plant 按完成度升序排列(危急在前)。
    #[instrument(skip(self, stats), fields(plants = stats.plant_wise.len()))]
    pub fn rollup(&self, stats: &AggregateStats) -> StatsRollup {
        let overall_completion =
            self.completion_ratio(stats.total_sowed, stats.total_booked_plants);

        let mut by_plant: Vec<PlantCompletion> = stats
            .plant_wise
            .iter()
            .map(|plant| {
                let completion =
                    self.completion_ratio(plant.total_sowed, plant.total_booked_plants);
                PlantCompletion {
                    plant_id: plant.plant_id.clone(),
                    plant_name: plant.plant_name.clone(),
                    total_booked_plants: plant.total_booked_plants,
                    total_sowed: plant.total_sowed,
                    gap: plant.total_booked_plants - plant.total_sowed,
                    completion,
                    band: self.band(completion),
                }
            })
            .collect();

        by_plant.sort_by(|a, b| {
            a.completion
                .partial_cmp(&b.completion)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.plant_id.cmp(&b.plant_id))
        });

        StatsRollup {
            snapshot_id: Uuid::new_v4().to_string(),
            overall_completion,
            overall_band: self.band(overall_completion),
            total_booked_plants: stats.total_booked_plants,
            total_sowed: stats.total_sowed,
            total_gap: stats.total_gap,
            by_plant,
        }
    }

    // ==========================================
    // 指标计算
    // ==========================================

    /// 完成度比值
    ///
    /// 订购量为 0 时定义为 0.0,绝不返回 NaN/Infinity。
    pub fn completion_ratio(&self, total_sowed: i64, total_booked_plants: i64) -> f64 {
        if total_booked_plants == 0 {
            return 0.0;
        }
        total_sowed as f64 / total_booked_plants as f64
    }

    /// 完成度档位
    ///
    /// 阈值: >= 1.0 满足, >= 0.5 部分完成, 其余危急。
    pub fn band(&self, completion: f64) -> CompletionBand {
        if completion >= SATISFIED_THRESHOLD {
            CompletionBand::Satisfied
        } else if completion >= PARTIAL_THRESHOLD {
            CompletionBand::Partial
        } else {
            CompletionBand::Critical
        }
    }
}

impl Default for StatsRollupEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::PlantStat;

    fn plant_stat(id: &str, booked: i64, sowed: i64) -> PlantStat {
        PlantStat {
            plant_id: id.to_string(),
            plant_name: format!("作物{}", id),
            total_booked_plants: booked,
            total_sowed: sowed,
            total_gap: booked - sowed,
        }
    }

    #[test]
    fn test_scenario_1_zero_booked_completion_is_zero() {
        // 场景1: 订购量为 0 → 完成度定义为 0,不是 NaN
        let engine = StatsRollupEngine::new();

        let ratio = engine.completion_ratio(0, 0);
        assert_eq!(ratio, 0.0);
        assert!(ratio.is_finite());

        let ratio = engine.completion_ratio(500, 0);
        assert_eq!(ratio, 0.0, "有播无订同样按 0 处理");
    }

    #[test]
    fn test_scenario_2_band_thresholds() {
        // 场景2: 档位阈值边界
        let engine = StatsRollupEngine::new();

        assert_eq!(engine.band(1.0), CompletionBand::Satisfied);
        assert_eq!(engine.band(1.3), CompletionBand::Satisfied);
        assert_eq!(engine.band(0.99), CompletionBand::Partial);
        assert_eq!(engine.band(0.5), CompletionBand::Partial);
        assert_eq!(engine.band(0.49), CompletionBand::Critical);
        assert_eq!(engine.band(0.0), CompletionBand::Critical);
    }

    #[test]
    fn test_scenario_3_rollup_orders_critical_first() {
        // 场景3: 作物级完成度升序,危急在前
        let engine = StatsRollupEngine::new();
        let stats = AggregateStats {
            total_booked_plants: 3000,
            total_sowed: 1600,
            total_gap: 1400,
            plant_wise: vec![
                plant_stat("P_DONE", 1000, 1000),
                plant_stat("P_CRIT", 1000, 100),
                plant_stat("P_HALF", 1000, 500),
            ],
            subtype_wise: vec![],
        };

        let rollup = engine.rollup(&stats);

        let ids: Vec<&str> = rollup.by_plant.iter().map(|p| p.plant_id.as_str()).collect();
        assert_eq!(ids, vec!["P_CRIT", "P_HALF", "P_DONE"]);
        assert_eq!(rollup.by_plant[0].band, CompletionBand::Critical);
        assert_eq!(rollup.by_plant[1].band, CompletionBand::Partial);
        assert_eq!(rollup.by_plant[2].band, CompletionBand::Satisfied);
        assert_eq!(rollup.by_plant[0].gap, 900);
    }

    #[test]
    fn test_scenario_4_overall_band() {
        // 场景4: 全局档位来自全局比值
        let engine = StatsRollupEngine::new();
        let stats = AggregateStats {
            total_booked_plants: 1000,
            total_sowed: 700,
            total_gap: 300,
            plant_wise: vec![],
            subtype_wise: vec![],
        };

        let rollup = engine.rollup(&stats);

        assert!((rollup.overall_completion - 0.7).abs() < 1e-9);
        assert_eq!(rollup.overall_band, CompletionBand::Partial);
        assert!(rollup.by_plant.is_empty(), "作物分段缺失按空集合处理");
    }
}
