// ==========================================
// 宣教分队分配系统 - 引擎层
// ==========================================
// 职责: 实现分配算法各阶段
// 红线: 引擎不做 I/O,所有输入在内存中
// 红线: 成员归属只经 ops 原语改变,任何时刻守恒
// ==========================================

pub mod annealing;
pub mod balancing;
pub mod bucketing;
pub mod distributor;
pub mod local_search;
pub mod ops;
pub mod scoring;
pub mod snapshot;
pub mod targets;
pub mod verification;

// 重导出核心引擎
pub use distributor::DistributionEngine;
pub use scoring::{finite_or, fit_score, site_score, total_score, INVALID_SCORE_FALLBACK};
pub use snapshot::SiteSnapshot;
pub use targets::GlobalTargets;
pub use verification::verify_and_repair;
