// ==========================================
// 宣教分队分配系统 - 分配引擎
// ==========================================
// 职责: 编排四阶段分配流程:
//       分层初始指派 → 局部搜索 → 末端均衡 → 守恒校验
// 红线: 引擎实例与单次 distribute() 调用同生命周期,
//       并发宿主必须一请求一实例,实例间无共享可变状态
// 红线: 同步纯计算,无 I/O,无外部副作用
// ==========================================

use crate::config::profile::DistributionProfile;
use crate::domain::registrant::Registrant;
use crate::domain::site::Site;
use crate::engine::annealing::annealing_pass;
use crate::engine::balancing::{
    balance_campuses, balance_genders, balance_totals, balance_years,
};
use crate::engine::bucketing::initial_assignment;
use crate::engine::local_search::{move_pass, swap_pass};
use crate::engine::scoring::total_score;
use crate::engine::snapshot::SiteSnapshot;
use crate::engine::targets::GlobalTargets;
use crate::engine::verification::verify_and_repair;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use tracing::{debug, info};

// ==========================================
// DistributionEngine - 分配引擎
// ==========================================
pub struct DistributionEngine {
    registrants: Vec<Registrant>,
    /// registrant_id → Registrant 索引(存档恢复用)
    registrant_index: HashMap<String, Registrant>,
    profile: DistributionProfile,
    targets: GlobalTargets,
    sites: Vec<Site>,
    rng: ChaCha8Rng,
}

impl DistributionEngine {
    /// 创建分配引擎(生产路径,随机种子取自系统熵源)
    ///
    /// # 前置条件(由调用方/API 层保证)
    /// - `registrants` 非空
    /// - `number_of_sites` >= 1
    pub fn new(
        registrants: Vec<Registrant>,
        number_of_sites: usize,
        profile: DistributionProfile,
    ) -> Self {
        Self::build(registrants, number_of_sites, profile, ChaCha8Rng::from_entropy())
    }

    /// 创建分配引擎(固定种子,测试可复现)
    pub fn with_seed(
        registrants: Vec<Registrant>,
        number_of_sites: usize,
        profile: DistributionProfile,
        seed: u64,
    ) -> Self {
        Self::build(
            registrants,
            number_of_sites,
            profile,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    fn build(
        registrants: Vec<Registrant>,
        number_of_sites: usize,
        profile: DistributionProfile,
        rng: ChaCha8Rng,
    ) -> Self {
        let targets = GlobalTargets::compute(&registrants, number_of_sites);
        let registrant_index = registrants
            .iter()
            .map(|r| (r.registrant_id.clone(), r.clone()))
            .collect();
        let sites = (1..=number_of_sites as i32).map(Site::new).collect();

        Self {
            registrants,
            registrant_index,
            profile,
            targets,
            sites,
            rng,
        }
    }

    /// 执行完整分配流程
    ///
    /// # 返回
    /// 最终分队集合,全体报名者每人恰好出现一次
    pub fn distribute(mut self) -> Vec<Site> {
        info!(
            registrant_count = self.registrants.len(),
            number_of_sites = self.targets.number_of_sites,
            "开始执行分配流程"
        );

        // ==========================================
        // 阶段1: 分层初始指派
        // ==========================================
        debug!("阶段1: 分层初始指派");
        initial_assignment(&self.registrants, &mut self.sites, &mut self.rng);

        // ==========================================
        // 阶段2: 迭代局部搜索
        // ==========================================
        debug!("阶段2: 迭代局部搜索");
        self.optimize();

        // ==========================================
        // 阶段3: 末端确定性均衡
        // ==========================================
        debug!("阶段3: 末端确定性均衡");
        let limit = self.profile.balance_iteration_limit;
        balance_genders(&mut self.sites, limit);
        balance_totals(&mut self.sites, self.targets.mean_site_size, limit);
        balance_campuses(&mut self.sites, &self.targets);
        balance_years(&mut self.sites, &self.targets);

        // ==========================================
        // 阶段4: 守恒校验与修复
        // ==========================================
        debug!("阶段4: 守恒校验与修复");
        let repaired = verify_and_repair(&self.registrants, &mut self.sites);

        info!(
            final_score = total_score(&self.profile, &self.targets, &self.sites),
            repaired,
            "分配流程完成"
        );
        self.sites
    }

    /// 局部搜索主循环: 每轮执行互换搜索 + 迁移搜索,
    /// 前 annealing_passes 轮附加模拟退火;
    /// 逐轮追踪最优状态,结束时若当前劣于最优则回滚
    fn optimize(&mut self) {
        let mut best_snapshot = SiteSnapshot::capture(&self.sites);
        let mut best_score = total_score(&self.profile, &self.targets, &self.sites);
        let mut previous_score = best_score;
        let mut stall_passes = 0usize;

        for pass in 0..self.profile.max_passes {
            let swaps = swap_pass(&mut self.sites, &self.profile, &self.targets);
            let moves = move_pass(&mut self.sites, &self.profile, &self.targets);
            let annealed = if pass < self.profile.annealing_passes {
                annealing_pass(&mut self.sites, &self.profile, &self.targets, &mut self.rng)
            } else {
                0
            };

            let score = total_score(&self.profile, &self.targets, &self.sites);
            if score < best_score {
                best_score = score;
                best_snapshot = SiteSnapshot::capture(&self.sites);
            }

            let improvement = previous_score - score;
            debug!(pass, swaps, moves, annealed, score, improvement, "局部搜索轮结束");

            if improvement < self.profile.convergence_threshold {
                stall_passes += 1;
            } else {
                stall_passes = 0;
            }
            if stall_passes >= self.profile.stall_pass_limit {
                debug!(pass, "连续无改进,提前停止");
                break;
            }
            if improvement >= 0.0 && improvement < self.profile.convergence_threshold {
                debug!(pass, improvement, "改进低于收敛阈值,提前停止");
                break;
            }
            previous_score = score;
        }

        // 若退火等随机步骤让终态劣于历史最优,回滚到最优存档
        let final_score = total_score(&self.profile, &self.targets, &self.sites);
        if final_score > best_score {
            debug!(final_score, best_score, "终态劣于最优存档,回滚");
            best_snapshot.restore(&mut self.sites, &self.registrant_index);
        }
    }
}
