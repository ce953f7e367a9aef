// ==========================================
// 苗圃育苗排产系统 - 数据访问层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 职责: 定义上游抓取失败的错误类型;重试/退避由调用方负责
// ==========================================

use thiserror::Error;

/// 数据访问层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 上游抓取错误 =====
    #[error("上游服务不可用: {0}")]
    UpstreamUnavailable(String),

    #[error("上游返回错误状态: status={status}, message={message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("上游请求超时: {0}")]
    Timeout(String),

    // ===== 数据解码错误 =====
    #[error("响应解码失败: {0}")]
    DecodeError(String),

    // ===== 业务查询错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 数据访问层结果类型
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::DecodeError(err.to_string())
    }
}
