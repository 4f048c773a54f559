// ==========================================
// 宣教分队分配系统 - API 层
// ==========================================
// 职责: 对外业务接口,前置校验 + 运行记录装配
// ==========================================

pub mod distribution_api;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use distribution_api::{DistributionApi, DistributionRunResult, SiteSummary};
pub use error::{ApiError, ApiResult};
pub use validator::validate_request;
