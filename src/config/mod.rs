// ==========================================
// 宣教分队分配系统 - 配置层
// ==========================================
// 职责: 分配策略参数定义与加载
// ==========================================

pub mod loader;
pub mod profile;

// 重导出核心类型
pub use loader::{default_profile_path, load_profile, load_profile_or_default};
pub use profile::DistributionProfile;
