// ==========================================
// 宣教分队分配系统 - 适配度评分
// ==========================================
// 职责: 评估"把某人放在某分队"的惩罚分,分数越低越好
// 红线: 所有数值必须有限,NaN/Infinity 一律就地兜底,
//       不允许流入比较运算
// ==========================================
// 两个层面:
// - fit_score: 单人视角,候选安置决策用(迁移搜索)
// - site_score/total_score: 分队汇总视角,
//   交换增量、退火接受、最优状态追踪用
// ==========================================

use crate::config::profile::DistributionProfile;
use crate::domain::registrant::Registrant;
use crate::domain::site::Site;
use crate::domain::types::ExperienceTier;
use crate::engine::targets::GlobalTargets;

/// 整体评分完全失效时的兜底值(远大于任何正常分数)
pub const INVALID_SCORE_FALLBACK: f64 = 1.0e9;

/// 有限性兜底: 非有限数值替换为给定回退值
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// 单人适配度评分(惩罚分,越低越好)
///
/// 评估"把 `person` 安置/保留在 `site`"的不公平程度,
/// 各项直接读取 `site` 当前统计量,
/// 仅性别项对候选人自身做 +1 前瞻
///
/// # 参数
/// - `profile`: 权重参数
/// - `targets`: 全局均衡目标
/// - `site`: 目标分队
/// - `person`: 候选人
pub fn fit_score(
    profile: &DistributionProfile,
    targets: &GlobalTargets,
    site: &Site,
    person: &Registrant,
) -> f64 {
    let stats = site.stats();

    // 总人数均衡: 最大权重,压过其余所有维度
    let size_deviation = (stats.total as f64 - targets.mean_site_size).abs();
    let total_term = finite_or(size_deviation.powf(1.5) * profile.total_weight, 0.0);

    // 性别均衡: 加入后加剧倾斜的程度,二次惩罚
    let same = stats.gender_count(person.gender) as f64;
    let other = stats.gender_count(person.gender.opposite()) as f64;
    let gender_skew = ((same + 1.0) - other).max(0.0);
    let gender_term = finite_or(gender_skew.powi(2) * profile.gender_weight, 0.0);

    // 经验层级均衡: 对全局均摊目标的偏离
    let tier = person.experience_tier();
    let tier_deviation =
        (stats.tier_count(tier) as f64 - targets.tier_target_per_site(tier)).abs();
    let experience_term =
        finite_or(tier_deviation.powf(1.5) * profile.experience_weight, 0.0);

    // 营地多样性: 引入新营地加分,同营地聚集按人数递增惩罚
    let campus_here = stats.campus_count(&person.campus);
    let campus_term = if campus_here == 0 {
        -profile.campus_new_bonus
    } else {
        finite_or(campus_here as f64 * profile.campus_weight, 0.0)
    };

    // 年级多样性: 同形状,权重更小; 年级缺失不计项
    let year_term = match person.year_of_study {
        Some(year) => {
            let year_here = stats.year_count(year);
            if year_here == 0 {
                -profile.year_new_bonus
            } else {
                finite_or(year_here as f64 * profile.year_weight, 0.0)
            }
        }
        None => 0.0,
    };

    // 访客分散: 仅候选人为访客时生效
    let visitor_term = if person.is_visitor() {
        let deviation = (stats.visitor_count as f64 - targets.mean_visitors_per_site).abs();
        finite_or(deviation * profile.visitor_weight, 0.0)
    } else {
        0.0
    };

    finite_or(
        total_term + gender_term + experience_term + campus_term + year_term + visitor_term,
        INVALID_SCORE_FALLBACK,
    )
}

/// 分队汇总不均衡评分(惩罚分,越低越好)
pub fn site_score(
    profile: &DistributionProfile,
    targets: &GlobalTargets,
    site: &Site,
) -> f64 {
    let stats = site.stats();

    let size_deviation = (stats.total as f64 - targets.mean_site_size).abs();
    let total_term = finite_or(size_deviation.powf(1.5) * profile.total_weight, 0.0);

    let gender_term = finite_or(
        (stats.gender_gap() as f64).powi(2) * profile.gender_weight,
        0.0,
    );

    let mut experience_term = 0.0;
    for tier in ExperienceTier::all() {
        let deviation =
            (stats.tier_count(tier) as f64 - targets.tier_target_per_site(tier)).abs();
        experience_term += finite_or(deviation.powf(1.5) * profile.experience_weight, 0.0);
    }

    // 同营地/同年级聚集: 超过 1 人的部分计惩罚
    let campus_concentration: usize = stats
        .campus_counts
        .values()
        .map(|count| count.saturating_sub(1))
        .sum();
    let campus_term =
        finite_or(campus_concentration as f64 * profile.campus_weight, 0.0);

    let year_concentration: usize = stats
        .year_counts
        .values()
        .map(|count| count.saturating_sub(1))
        .sum();
    let year_term = finite_or(year_concentration as f64 * profile.year_weight, 0.0);

    let visitor_deviation =
        (stats.visitor_count as f64 - targets.mean_visitors_per_site).abs();
    let visitor_term = finite_or(visitor_deviation * profile.visitor_weight, 0.0);

    finite_or(
        total_term + gender_term + experience_term + campus_term + year_term + visitor_term,
        INVALID_SCORE_FALLBACK,
    )
}

/// 全体分队总评分
pub fn total_score(
    profile: &DistributionProfile,
    targets: &GlobalTargets,
    sites: &[Site],
) -> f64 {
    sites
        .iter()
        .map(|site| site_score(profile, targets, site))
        .sum()
}
