// ==========================================
// 宣教分队分配系统 - API层错误类型
// ==========================================
// 职责: 定义对外错误类型,所有错误必须带显式原因
// 红线: 引擎本身不抛错,前置条件全部在 API 层拦截
// ==========================================

use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("报名者列表为空,无法执行分配")]
    EmptyRegistrantList,

    #[error("分队数无效: number_of_sites={number_of_sites},必须 >= 1")]
    InvalidSiteCount { number_of_sites: usize },

    #[error("报名者 ID 重复: registrant_id={registrant_id}")]
    DuplicateRegistrantId { registrant_id: String },

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 内部错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

/// API结果类型别名
pub type ApiResult<T> = Result<T, ApiError>;
