// ==========================================
// 苗圃育苗排产系统 - 排产配置
// ==========================================
// 职责: 临播窗口、缓存 TTL、默认备苗比例的集中定义与校验
// 红线: 阈值是命名配置项,不允许散落为魔法数
// ==========================================

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 临播窗口默认值(天): 距最迟播种日不超过该天数即判定紧急
pub const DEFAULT_URGENT_WINDOW_DAYS: i32 = 3;

/// 批量/低频数据缓存 TTL 默认值(秒): 作物目录、聚合统计
pub const DEFAULT_BULK_CACHE_TTL_SECS: u64 = 60;

/// 时效数据缓存 TTL 默认值(秒): 告警、当日摘要
pub const DEFAULT_ALERTS_CACHE_TTL_SECS: u64 = 30;

/// 默认备苗比例(百分比): 品种与槽位均未设置时的兜底值
pub const DEFAULT_BUFFER_PCT: f64 = 0.0;

// ==========================================
// 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置项取值非法 (field={field}): {message}")]
    InvalidValue { field: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),
}

// ==========================================
// SowingConfig - 排产配置
// ==========================================
/// 排产配置
///
/// 提醒数据永不缓存(时效敏感,过期数据会误导操作),
/// 因此没有对应的 TTL 配置项。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SowingConfig {
    /// 临播窗口(天)
    #[serde(default = "default_urgent_window_days")]
    pub urgent_window_days: i32,

    /// 批量/低频数据缓存 TTL (秒)
    #[serde(default = "default_bulk_cache_ttl_secs")]
    pub bulk_cache_ttl_secs: u64,

    /// 时效数据缓存 TTL (秒)
    #[serde(default = "default_alerts_cache_ttl_secs")]
    pub alerts_cache_ttl_secs: u64,

    /// 默认备苗比例 (0-100, 百分比)
    #[serde(default = "default_buffer_pct")]
    pub default_buffer_pct: f64,
}

fn default_urgent_window_days() -> i32 {
    DEFAULT_URGENT_WINDOW_DAYS
}

fn default_bulk_cache_ttl_secs() -> u64 {
    DEFAULT_BULK_CACHE_TTL_SECS
}

fn default_alerts_cache_ttl_secs() -> u64 {
    DEFAULT_ALERTS_CACHE_TTL_SECS
}

fn default_buffer_pct() -> f64 {
    DEFAULT_BUFFER_PCT
}

impl Default for SowingConfig {
    fn default() -> Self {
        Self {
            urgent_window_days: DEFAULT_URGENT_WINDOW_DAYS,
            bulk_cache_ttl_secs: DEFAULT_BULK_CACHE_TTL_SECS,
            alerts_cache_ttl_secs: DEFAULT_ALERTS_CACHE_TTL_SECS,
            default_buffer_pct: DEFAULT_BUFFER_PCT,
        }
    }
}

impl SowingConfig {
    /// 从 JSON 字符串载入并校验
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SowingConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置取值
    ///
    /// 规则:
    /// - urgent_window_days >= 0 (0 表示仅当日视为紧急)
    /// - 两个 TTL 均 > 0
    /// - default_buffer_pct 在 [0, 100]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.urgent_window_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "urgent_window_days".to_string(),
                message: format!("不能为负: {}", self.urgent_window_days),
            });
        }
        if self.bulk_cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bulk_cache_ttl_secs".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        if self.alerts_cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "alerts_cache_ttl_secs".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        if !(0.0..=100.0).contains(&self.default_buffer_pct) {
            return Err(ConfigError::InvalidValue {
                field: "default_buffer_pct".to_string(),
                message: format!("必须在 [0, 100] 内: {}", self.default_buffer_pct),
            });
        }
        Ok(())
    }

    /// 批量/低频数据缓存 TTL
    pub fn bulk_cache_ttl(&self) -> Duration {
        Duration::seconds(self.bulk_cache_ttl_secs as i64)
    }

    /// 时效数据缓存 TTL
    pub fn alerts_cache_ttl(&self) -> Duration {
        Duration::seconds(self.alerts_cache_ttl_secs as i64)
    }

    /// 配置快照 (JSON)
    ///
    /// 记录到日志或汇总快照,便于回溯判定所用的阈值。
    pub fn to_json_snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SowingConfig::default();
        assert_eq!(config.urgent_window_days, 3);
        assert_eq!(config.bulk_cache_ttl_secs, 60);
        assert_eq!(config.alerts_cache_ttl_secs, 30);
        assert_eq!(config.default_buffer_pct, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_fields() {
        // 缺省字段回落到默认值
        let config = SowingConfig::from_json_str(r#"{"urgent_window_days": 5}"#).unwrap();
        assert_eq!(config.urgent_window_days, 5);
        assert_eq!(config.bulk_cache_ttl_secs, 60);
    }

    #[test]
    fn test_validate_rejects_negative_window() {
        let config = SowingConfig {
            urgent_window_days: -1,
            ..SowingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "urgent_window_days"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = SowingConfig {
            bulk_cache_ttl_secs: 0,
            ..SowingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_buffer_out_of_range() {
        let config = SowingConfig {
            default_buffer_pct: 120.0,
            ..SowingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
