// ==========================================
// 宣教分队分配系统 - 分配 API
// ==========================================
// 职责: 校验请求 → 构建引擎 → 执行分配 → 装配运行元数据
// 输出: 运行记录(run_id + 时间戳) + 分队结果 +
//       registrant_id → site_number 指派映射(供持久化协作方
//       按 (run_id, registrant_id) 原子替换落库)
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::validate_request;
use crate::config::profile::DistributionProfile;
use crate::domain::registrant::Registrant;
use crate::domain::site::Site;
use crate::engine::DistributionEngine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// SiteSummary - 单分队摘要
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct SiteSummary {
    pub site_number: i32,
    pub total: usize,
    pub male_count: usize,
    pub female_count: usize,
    pub visitor_count: usize,
    pub first_timers: usize,
    pub experienced: usize,
    pub veterans: usize,
}

impl SiteSummary {
    fn from_site(site: &Site) -> Self {
        let stats = site.stats();
        Self {
            site_number: site.site_number(),
            total: stats.total,
            male_count: stats.male_count,
            female_count: stats.female_count,
            visitor_count: stats.visitor_count,
            first_timers: stats.first_timers,
            experienced: stats.experienced,
            veterans: stats.veterans,
        }
    }
}

// ==========================================
// DistributionRunResult - 运行记录
// ==========================================
#[derive(Debug, Serialize)]
pub struct DistributionRunResult {
    /// 运行标识(持久化协作方以此为键做替换写入)
    pub run_id: Uuid,
    pub executed_at: DateTime<Utc>,
    pub registrant_count: usize,
    pub number_of_sites: usize,

    /// registrant_id → site_number 指派映射
    pub assignments: HashMap<String, i32>,

    /// 分队摘要(编号升序)
    pub site_summaries: Vec<SiteSummary>,

    /// 完整分队结果(含成员与统计)
    pub sites: Vec<Site>,
}

// ==========================================
// DistributionApi - 分配 API
// ==========================================
pub struct DistributionApi {
    profile: DistributionProfile,
}

impl DistributionApi {
    /// 创建 API 实例
    ///
    /// # 参数
    /// - `profile`: 分配策略参数
    pub fn new(profile: DistributionProfile) -> Self {
        Self { profile }
    }

    /// 执行一次分配(生产路径,随机种子取自系统熵源)
    #[instrument(skip(self, registrants), fields(
        registrant_count = registrants.len(),
        number_of_sites
    ))]
    pub fn run(
        &self,
        registrants: Vec<Registrant>,
        number_of_sites: usize,
    ) -> ApiResult<DistributionRunResult> {
        validate_request(&registrants, number_of_sites)?;
        let engine =
            DistributionEngine::new(registrants, number_of_sites, self.profile.clone());
        Ok(self.assemble(engine.distribute(), number_of_sites))
    }

    /// 执行一次分配(固定种子,结果可复现)
    #[instrument(skip(self, registrants), fields(
        registrant_count = registrants.len(),
        number_of_sites,
        seed
    ))]
    pub fn run_with_seed(
        &self,
        registrants: Vec<Registrant>,
        number_of_sites: usize,
        seed: u64,
    ) -> ApiResult<DistributionRunResult> {
        validate_request(&registrants, number_of_sites)?;
        let engine = DistributionEngine::with_seed(
            registrants,
            number_of_sites,
            self.profile.clone(),
            seed,
        );
        Ok(self.assemble(engine.distribute(), number_of_sites))
    }

    /// 装配运行记录
    fn assemble(&self, sites: Vec<Site>, number_of_sites: usize) -> DistributionRunResult {
        let run_id = Uuid::new_v4();
        let mut assignments = HashMap::new();
        for site in &sites {
            for member in site.members() {
                assignments.insert(member.registrant_id.clone(), site.site_number());
            }
        }

        let result = DistributionRunResult {
            run_id,
            executed_at: Utc::now(),
            registrant_count: assignments.len(),
            number_of_sites,
            assignments,
            site_summaries: sites.iter().map(SiteSummary::from_site).collect(),
            sites,
        };

        info!(
            run_id = %result.run_id,
            registrant_count = result.registrant_count,
            number_of_sites = result.number_of_sites,
            "分配运行记录已装配"
        );
        result
    }
}

impl Default for DistributionApi {
    fn default() -> Self {
        Self::new(DistributionProfile::default())
    }
}
