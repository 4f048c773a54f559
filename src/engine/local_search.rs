// ==========================================
// 宣教分队分配系统 - 局部搜索优化
// ==========================================
// 职责: 两两交换搜索 + 单人迁移搜索
// 红线: 所有改动经由 ops 原语,任何时刻守恒
// 红线: 单人迁移受规模走廊与单一性别防线硬约束
// ==========================================

use crate::config::profile::DistributionProfile;
use crate::domain::site::Site;
use crate::domain::types::Gender;
use crate::engine::ops::{swap_members, transfer};
use crate::engine::scoring::{fit_score, site_score};
use crate::engine::targets::GlobalTargets;
use tracing::debug;

/// 单一性别防线的最小分队规模
const SINGLE_GENDER_GUARD_SIZE: usize = 8;

/// 源队性别保底: 某性别减到该值以下
const SOURCE_GENDER_FLOOR: usize = 2;

/// 源队性别保底触发线: 另一性别超过该值
const SOURCE_OTHER_GENDER_TRIGGER: usize = 5;

// ==========================================
// 两两交换搜索
// ==========================================

/// 对每个无序分队对,搜索并应用改进最大的一次互换
///
/// 候选集限制在单侧 `swap_candidate_limit` 人,
/// 优先纳入能纠正对侧性别倾斜的候选;
/// 最佳互换的改进量超过 `swap_improvement_threshold` 才生效
///
/// # 返回
/// 本轮生效的互换次数
pub fn swap_pass(
    sites: &mut [Site],
    profile: &DistributionProfile,
    targets: &GlobalTargets,
) -> usize {
    let site_count = sites.len();
    let mut applied = 0usize;

    for a in 0..site_count {
        for b in (a + 1)..site_count {
            let candidates_a = swap_candidates(&sites[a], &sites[b], profile.swap_candidate_limit);
            let candidates_b = swap_candidates(&sites[b], &sites[a], profile.swap_candidate_limit);

            let baseline = site_score(profile, targets, &sites[a])
                + site_score(profile, targets, &sites[b]);

            // 逐对试换-评分-还原,记录最佳改进
            let mut best: Option<(String, String, f64)> = None;
            for id_a in &candidates_a {
                for id_b in &candidates_b {
                    if !swap_members(sites, a, b, id_a, id_b) {
                        continue;
                    }
                    let after = site_score(profile, targets, &sites[a])
                        + site_score(profile, targets, &sites[b]);
                    // 还原(此时 id_a 在 b 队,id_b 在 a 队)
                    swap_members(sites, a, b, id_b, id_a);

                    let improvement = baseline - after;
                    if improvement > profile.swap_improvement_threshold
                        && best
                            .as_ref()
                            .map(|(_, _, best_gain)| improvement > *best_gain)
                            .unwrap_or(true)
                    {
                        best = Some((id_a.clone(), id_b.clone(), improvement));
                    }
                }
            }

            if let Some((id_a, id_b, improvement)) = best {
                if swap_members(sites, a, b, &id_a, &id_b) {
                    debug!(
                        site_a = sites[a].site_number(),
                        site_b = sites[b].site_number(),
                        improvement,
                        "应用最佳互换"
                    );
                    applied += 1;
                }
            }
        }
    }

    applied
}

/// 互换候选集: 优先纳入能纠正目标分队性别倾斜的成员
fn swap_candidates(source: &Site, destination: &Site, limit: usize) -> Vec<String> {
    let dest_stats = destination.stats();
    let preferred_gender = if dest_stats.male_count > dest_stats.female_count {
        Some(Gender::Female)
    } else if dest_stats.female_count > dest_stats.male_count {
        Some(Gender::Male)
    } else {
        None
    };

    let mut candidates: Vec<String> = Vec::with_capacity(limit);
    if let Some(gender) = preferred_gender {
        for member in source.members() {
            if candidates.len() >= limit {
                break;
            }
            if member.gender == gender {
                candidates.push(member.registrant_id.clone());
            }
        }
    }
    for member in source.members() {
        if candidates.len() >= limit {
            break;
        }
        if !candidates.contains(&member.registrant_id) {
            candidates.push(member.registrant_id.clone());
        }
    }
    candidates
}

// ==========================================
// 单人迁移搜索
// ==========================================

/// 为每个分队寻找在别处适配度明显更优的成员并迁移
///
/// 迁移硬约束:
/// 1. 源队不得缩到均值的 (1 - corridor) 倍以下
/// 2. 目标队不得超过均值的 (1 + corridor) 倍
/// 3. 不得制造/加剧单一性别分队
///
/// # 返回
/// 本轮生效的迁移人数
pub fn move_pass(
    sites: &mut [Site],
    profile: &DistributionProfile,
    targets: &GlobalTargets,
) -> usize {
    let site_count = sites.len();
    let mut moved = 0usize;

    for source in 0..site_count {
        // 迭代期间成员会变动,按快照逐个处理
        for registrant_id in sites[source].member_ids_snapshot() {
            let member = match sites[source]
                .members()
                .iter()
                .find(|m| m.registrant_id == registrant_id)
            {
                Some(member) => member.clone(),
                None => continue,
            };

            // "留任/迁移"都按各分队当前统计量评估
            let current_fit = fit_score(profile, targets, &sites[source], &member);
            let mut best: Option<(usize, f64)> = None;
            for destination in 0..site_count {
                if destination == source {
                    continue;
                }
                let candidate_fit = fit_score(profile, targets, &sites[destination], &member);
                if best
                    .map(|(_, best_fit)| candidate_fit < best_fit)
                    .unwrap_or(true)
                {
                    best = Some((destination, candidate_fit));
                }
            }

            let (destination, best_fit) = match best {
                Some(found) => found,
                None => continue,
            };
            if current_fit - best_fit <= profile.move_improvement_threshold {
                continue;
            }
            if !move_allowed(sites, source, destination, member.gender, profile, targets) {
                continue;
            }

            if transfer(sites, source, destination, &registrant_id) {
                moved += 1;
            }
        }
    }

    if moved > 0 {
        debug!(moved, "单人迁移搜索完成");
    }
    moved
}

/// 迁移硬约束判定
fn move_allowed(
    sites: &[Site],
    source: usize,
    destination: usize,
    gender: Gender,
    profile: &DistributionProfile,
    targets: &GlobalTargets,
) -> bool {
    let mean = targets.mean_site_size;
    let source_after = sites[source].total() as f64 - 1.0;
    let destination_after = sites[destination].total() as f64 + 1.0;

    // 规模走廊: 源队不缩过下限,目标队不超上限
    if source_after < mean * (1.0 - profile.size_corridor_ratio) {
        return false;
    }
    if destination_after > mean * (1.0 + profile.size_corridor_ratio) {
        return false;
    }

    // 目标队防线: 较大分队不得保持单一性别
    let dest_stats = sites[destination].stats();
    if dest_stats.total + 1 >= SINGLE_GENDER_GUARD_SIZE
        && dest_stats.gender_count(gender.opposite()) == 0
    {
        return false;
    }

    // 源队防线: 本性别减到保底线以下且对侧性别偏多
    let source_stats = sites[source].stats();
    let same_after = source_stats.gender_count(gender).saturating_sub(1);
    if same_after <= SOURCE_GENDER_FLOOR
        && source_stats.gender_count(gender.opposite()) > SOURCE_OTHER_GENDER_TRIGGER
    {
        return false;
    }

    true
}
