// ==========================================
// 宣教分队分配系统 - 末端确定性均衡
// ==========================================
// 职责: 局部搜索结束后的确定性收尾:
//       性别传递 → 总人数拉平 → 营地/年级摊匀
// 红线: 所有改动经由 transfer 原语
// ==========================================

use crate::domain::site::Site;
use crate::domain::types::Gender;
use crate::engine::ops::transfer;
use crate::engine::targets::GlobalTargets;
use tracing::debug;

/// 营地强制摊匀的全局人数门槛系数 (2 × 分队数)
const CAMPUS_BALANCE_FACTOR: f64 = 2.0;

/// 年级强制摊匀的全局人数门槛系数 (1.5 × 分队数)
const YEAR_BALANCE_FACTOR: f64 = 1.5;

/// 营地/年级摊匀的最大允许极差
const SPREAD_TOLERANCE: usize = 2;

/// 宽松迁移判定: 两队性别计数差与总人数差的上限
const LENIENT_DELTA_LIMIT: usize = 3;

// ==========================================
// 性别均衡传递
// ==========================================

/// 在性别最失衡的分队与反向盈余的分队之间传递个体
///
/// 每次迭代做一次传递,直到所有分队 |male-female| <= 1、
/// 找不到有效传递、或达到迭代上限
///
/// # 返回
/// 生效的传递次数
pub fn balance_genders(sites: &mut [Site], iteration_limit: usize) -> usize {
    let mut transferred = 0usize;

    for _ in 0..iteration_limit {
        // 性别差最大的分队
        let worst = match sites
            .iter()
            .enumerate()
            .filter(|(_, site)| site.stats().gender_gap() > 1)
            .max_by_key(|(_, site)| site.stats().gender_gap())
        {
            Some((index, _)) => index,
            None => break,
        };

        let stats = sites[worst].stats();
        let surplus_gender = if stats.male_count > stats.female_count {
            Gender::Male
        } else {
            Gender::Female
        };

        // 反向盈余最大的分队(该性别反而偏少)
        let partner = sites
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != worst)
            .filter(|(_, site)| {
                site.stats().gender_count(surplus_gender)
                    < site.stats().gender_count(surplus_gender.opposite())
            })
            .max_by_key(|(_, site)| {
                site.stats().gender_count(surplus_gender.opposite())
                    - site.stats().gender_count(surplus_gender)
            })
            .map(|(index, _)| index);
        let partner = match partner {
            Some(index) => index,
            None => break,
        };

        let candidate = sites[worst]
            .members()
            .iter()
            .find(|member| member.gender == surplus_gender)
            .map(|member| member.registrant_id.clone());
        let candidate = match candidate {
            Some(id) => id,
            None => break,
        };

        if !transfer(sites, worst, partner, &candidate) {
            break;
        }
        transferred += 1;
    }

    if transferred > 0 {
        debug!(transferred, "性别均衡传递完成");
    }
    transferred
}

// ==========================================
// 总人数拉平
// ==========================================

/// 把超出均值 0.5 以上的分队的人移往低于均值 0.5 以上的分队
///
/// # 返回
/// 生效的迁移人数
pub fn balance_totals(sites: &mut [Site], mean: f64, iteration_limit: usize) -> usize {
    let mut moved = 0usize;

    for _ in 0..iteration_limit {
        let over = sites
            .iter()
            .enumerate()
            .filter(|(_, site)| site.total() as f64 > mean + 0.5)
            .max_by_key(|(_, site)| site.total())
            .map(|(index, _)| index);
        let under = sites
            .iter()
            .enumerate()
            .filter(|(_, site)| (site.total() as f64) < mean - 0.5)
            .min_by_key(|(_, site)| site.total())
            .map(|(index, _)| index);

        let (over, under) = match (over, under) {
            (Some(over), Some(under)) if over != under => (over, under),
            _ => break,
        };

        // 优先移走盈余性别,避免拉平人数的同时制造性别失衡
        let over_stats = sites[over].stats();
        let preferred_gender = if over_stats.male_count > over_stats.female_count {
            Gender::Male
        } else {
            Gender::Female
        };
        let candidate = sites[over]
            .members()
            .iter()
            .find(|member| member.gender == preferred_gender)
            .or_else(|| sites[over].members().first())
            .map(|member| member.registrant_id.clone());
        let candidate = match candidate {
            Some(id) => id,
            None => break,
        };

        if !transfer(sites, over, under, &candidate) {
            break;
        }
        moved += 1;
    }

    if moved > 0 {
        debug!(moved, "总人数拉平完成");
    }
    moved
}

// ==========================================
// 营地摊匀
// ==========================================

/// 对全局人数 >= 2 x 分队数的每个营地,
/// 当最多队与最少队的极差超过 2 时,从最多队向最少队移一人
///
/// # 返回
/// 生效的迁移人数
pub fn balance_campuses(sites: &mut [Site], targets: &GlobalTargets) -> usize {
    let threshold = (CAMPUS_BALANCE_FACTOR * targets.number_of_sites as f64).ceil() as usize;
    let qualified: Vec<String> = targets
        .campus_totals
        .iter()
        .filter(|(_, count)| **count >= threshold)
        .map(|(campus, _)| campus.clone())
        .collect();

    let mut moved = 0usize;
    for campus in qualified {
        moved += spread_one_characteristic(
            sites,
            |site| site.stats().campus_count(&campus),
            |member| member.campus == campus,
        );
    }

    if moved > 0 {
        debug!(moved, "营地摊匀完成");
    }
    moved
}

// ==========================================
// 年级摊匀
// ==========================================

/// 对全局人数 >= 1.5 x 分队数的每个年级,
/// 当最多队与最少队的极差超过 2 时,从最多队向最少队移一人
///
/// # 返回
/// 生效的迁移人数
pub fn balance_years(sites: &mut [Site], targets: &GlobalTargets) -> usize {
    let threshold = (YEAR_BALANCE_FACTOR * targets.number_of_sites as f64).ceil() as usize;
    let qualified: Vec<i32> = targets
        .year_totals
        .iter()
        .filter(|(_, count)| **count >= threshold)
        .map(|(year, _)| *year)
        .collect();

    let mut moved = 0usize;
    for year in qualified {
        moved += spread_one_characteristic(
            sites,
            |site| site.stats().year_count(year),
            |member| member.year_of_study == Some(year),
        );
    }

    if moved > 0 {
        debug!(moved, "年级摊匀完成");
    }
    moved
}

/// 单一特征的极差收敛: 反复从持有最多的分队向最少的分队移一人,
/// 直到极差 <= 2 或找不到通过宽松判定的移动
fn spread_one_characteristic<C, M>(sites: &mut [Site], count_of: C, matches: M) -> usize
where
    C: Fn(&Site) -> usize,
    M: Fn(&crate::domain::registrant::Registrant) -> bool,
{
    let mut moved = 0usize;

    // 防御性迭代上限,避免计数器异常时死循环
    for _ in 0..sites.len() * 8 {
        let counts: Vec<usize> = sites.iter().map(&count_of).collect();
        let (max_index, max_count) = match counts
            .iter()
            .enumerate()
            .max_by_key(|(_, count)| **count)
        {
            Some((index, count)) => (index, *count),
            None => break,
        };
        let (min_index, min_count) = match counts
            .iter()
            .enumerate()
            .min_by_key(|(_, count)| **count)
        {
            Some((index, count)) => (index, *count),
            None => break,
        };
        if max_index == min_index || max_count - min_count <= SPREAD_TOLERANCE {
            break;
        }

        // 从最多队挑一名该特征成员,通过宽松判定后迁移
        let candidate = sites[max_index]
            .members()
            .iter()
            .find(|member| {
                matches(member) && lenient_move_ok(sites, max_index, min_index, member.gender)
            })
            .map(|member| member.registrant_id.clone());
        let candidate = match candidate {
            Some(id) => id,
            None => break,
        };

        if !transfer(sites, max_index, min_index, &candidate) {
            break;
        }
        moved += 1;
    }

    moved
}

/// 宽松迁移判定: 移动后两队该性别计数差与总人数差都不超过 3
fn lenient_move_ok(sites: &[Site], from: usize, to: usize, gender: Gender) -> bool {
    let from_gender_after = sites[from].stats().gender_count(gender).saturating_sub(1);
    let to_gender_after = sites[to].stats().gender_count(gender) + 1;
    if from_gender_after.abs_diff(to_gender_after) > LENIENT_DELTA_LIMIT {
        return false;
    }

    let from_total_after = sites[from].total().saturating_sub(1);
    let to_total_after = sites[to].total() + 1;
    from_total_after.abs_diff(to_total_after) <= LENIENT_DELTA_LIMIT
}
