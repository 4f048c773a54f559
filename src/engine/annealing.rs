// ==========================================
// 宣教分队分配系统 - 模拟退火
// ==========================================
// 职责: 随机互换 + Metropolis 接受准则,跳出局部最优
// 红线: 仅在前几轮局部搜索中执行,温度几何衰减
// ==========================================

use crate::config::profile::DistributionProfile;
use crate::domain::site::Site;
use crate::engine::ops::swap_members;
use crate::engine::scoring::site_score;
use crate::engine::targets::GlobalTargets;
use rand::Rng;
use tracing::debug;

/// 执行一轮模拟退火
///
/// 反复随机选取两个分队各一名成员试换:
/// 改进则接受,劣化则以 exp(-Δ/温度) 的概率接受
///
/// # 参数
/// - `rng`: 注入的随机源
///
/// # 返回
/// 被接受的互换次数
pub fn annealing_pass<R: Rng>(
    sites: &mut [Site],
    profile: &DistributionProfile,
    targets: &GlobalTargets,
    rng: &mut R,
) -> usize {
    let site_count = sites.len();
    if site_count < 2 {
        return 0;
    }

    let iterations = profile.annealing_min_iterations.max(targets.total);
    let mut temperature = profile.initial_temperature;
    let mut accepted = 0usize;

    for _ in 0..iterations {
        let a = rng.gen_range(0..site_count);
        let b = rng.gen_range(0..site_count);
        if a == b || sites[a].total() == 0 || sites[b].total() == 0 {
            temperature *= profile.cooling_rate;
            continue;
        }

        let id_a = sites[a].members()[rng.gen_range(0..sites[a].total())]
            .registrant_id
            .clone();
        let id_b = sites[b].members()[rng.gen_range(0..sites[b].total())]
            .registrant_id
            .clone();

        let before =
            site_score(profile, targets, &sites[a]) + site_score(profile, targets, &sites[b]);
        if !swap_members(sites, a, b, &id_a, &id_b) {
            temperature *= profile.cooling_rate;
            continue;
        }
        let after =
            site_score(profile, targets, &sites[a]) + site_score(profile, targets, &sites[b]);

        let delta = after - before;
        let accept = if delta <= 0.0 {
            true
        } else if temperature > 0.0 {
            // Metropolis 准则: 以 exp(-Δ/温度) 概率接受劣化
            rng.gen::<f64>() < (-delta / temperature).exp()
        } else {
            false
        };

        if accept {
            accepted += 1;
        } else {
            // 还原(此时 id_a 在 b 队,id_b 在 a 队)
            swap_members(sites, a, b, &id_b, &id_a);
        }

        temperature *= profile.cooling_rate;
    }

    debug!(accepted, iterations, "模拟退火完成");
    accepted
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registrant::Registrant;
    use crate::domain::types::Gender;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_registrant(id: &str, gender: Gender) -> Registrant {
        Registrant {
            registrant_id: id.to_string(),
            first_name: "测试".to_string(),
            last_name: "成员".to_string(),
            email: format!("{}@example.com", id),
            gender,
            campus: "北区营地".to_string(),
            year_of_study: Some(1),
            previous_missions_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_annealing_conserves_members() {
        let profile = DistributionProfile::default();
        let mut sites = vec![Site::new(1), Site::new(2), Site::new(3)];
        let mut registrants = Vec::new();
        for i in 0..18 {
            let member = create_test_registrant(
                &format!("R{:02}", i),
                if i % 2 == 0 { Gender::Male } else { Gender::Female },
            );
            registrants.push(member.clone());
            sites[i % 3].add_member(member);
        }
        let targets = GlobalTargets::compute(&registrants, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        annealing_pass(&mut sites, &profile, &targets, &mut rng);

        let mut ids: Vec<String> = sites
            .iter()
            .flat_map(|s| s.member_ids_snapshot())
            .collect();
        assert_eq!(ids.len(), 18);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 18);
    }

    #[test]
    fn test_annealing_single_site_is_noop() {
        let profile = DistributionProfile::default();
        let mut sites = vec![Site::new(1)];
        sites[0].add_member(create_test_registrant("R01", Gender::Male));
        let targets = GlobalTargets::compute(&sites[0].members().to_vec(), 1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(annealing_pass(&mut sites, &profile, &targets, &mut rng), 0);
        assert_eq!(sites[0].total(), 1);
    }
}
