// ==========================================
// 宣教分队分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、统计缓存
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod registrant;
pub mod site;
pub mod types;

// 重导出核心类型
pub use registrant::Registrant;
pub use site::{Site, SiteStats};
pub use types::{ExperienceTier, Gender, VISITOR_CAMPUS};
