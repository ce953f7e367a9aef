// ==========================================
// 苗圃育苗排产系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换数据访问/配置错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因(可解释性)
// ==========================================

use crate::config::sowing_config::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 生命周期错误
    // ==========================================
    /// 消费方已撤销请求,结果被丢弃、未提交缓存
    #[error("请求已撤销,结果未提交")]
    Cancelled,

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    // ==========================================
    // 上游数据错误
    // ==========================================
    #[error("上游数据获取失败: {0}")]
    UpstreamError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// API层结果类型
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 从 RepositoryError 转换
// 目的: 将数据访问层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::UpstreamUnavailable(msg) => {
                ApiError::UpstreamError(format!("上游服务不可用: {}", msg))
            }
            RepositoryError::UpstreamStatus { status, message } => {
                ApiError::UpstreamError(format!("上游返回错误状态 {}: {}", status, message))
            }
            RepositoryError::Timeout(msg) => ApiError::UpstreamError(format!("上游请求超时: {}", msg)),
            RepositoryError::DecodeError(msg) => {
                ApiError::UpstreamError(format!("响应解码失败: {}", msg))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}
