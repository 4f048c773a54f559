// ==========================================
// 宣教分队分配系统 - 核心库
// ==========================================
// 系统定位: 宣教分队分配决策引擎
// 输入: 已规范化的报名者列表 + 分队数
// 输出: 人人有队、规模受控的分队划分
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配算法
pub mod engine;

// 配置层 - 策略参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{ExperienceTier, Gender, Registrant, Site, SiteStats, VISITOR_CAMPUS};

// 引擎
pub use engine::{DistributionEngine, GlobalTargets};

// 配置
pub use config::DistributionProfile;

// API
pub use api::{ApiError, ApiResult, DistributionApi, DistributionRunResult, SiteSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "宣教分队分配系统";

// ==========================================
// 预编译检查
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
