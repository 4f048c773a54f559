// ==========================================
// 宣教分队分配系统 - 守恒校验与修复
// ==========================================
// 职责: 末端校验"人人有队,无人重复",缺员强制补排
// 红线: 引擎不对外抛守恒错误,就地自愈并告警
// ==========================================
// 注: 移动原语已在结构上保证守恒,本阶段是防线而非承重;
//     健康运行下必然是空操作(幂等性质)
// ==========================================

use crate::domain::registrant::Registrant;
use crate::domain::site::Site;
use std::collections::HashSet;
use tracing::warn;

/// 校验全体成员守恒,缺员按轮转强制补排
///
/// # 参数
/// - `registrants`: 原始输入全集
/// - `sites`: 分配结果(可能被补排修改)
///
/// # 返回
/// 被强制补排的人数(健康运行应为 0)
pub fn verify_and_repair(registrants: &[Registrant], sites: &mut [Site]) -> usize {
    if sites.is_empty() {
        return 0;
    }

    let assigned: HashSet<String> = sites
        .iter()
        .flat_map(|site| site.member_ids_snapshot())
        .collect();

    let mut repaired = 0usize;
    let mut cursor = 0usize;
    for registrant in registrants {
        if assigned.contains(&registrant.registrant_id) {
            continue;
        }
        warn!(
            registrant_id = %registrant.registrant_id,
            "发现未分配成员,强制轮转补排"
        );
        // 轮转找到第一个能接收的分队(同 ID 冲突时顺延)
        for _ in 0..sites.len() {
            let target = cursor % sites.len();
            cursor += 1;
            if sites[target].add_member(registrant.clone()) {
                repaired += 1;
                break;
            }
        }
    }

    repaired
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Gender;
    use chrono::Utc;

    fn create_test_registrant(id: &str) -> Registrant {
        Registrant {
            registrant_id: id.to_string(),
            first_name: "测试".to_string(),
            last_name: "成员".to_string(),
            email: format!("{}@example.com", id),
            gender: Gender::Male,
            campus: "北区营地".to_string(),
            year_of_study: None,
            previous_missions_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_repair_assigns_missing_registrants() {
        let registrants: Vec<Registrant> = (0..5)
            .map(|i| create_test_registrant(&format!("R{}", i)))
            .collect();
        let mut sites = vec![Site::new(1), Site::new(2)];
        // 只分配前 3 人,漏掉 R3/R4
        for registrant in registrants.iter().take(3) {
            sites[0].add_member(registrant.clone());
        }

        let repaired = verify_and_repair(&registrants, &mut sites);
        assert_eq!(repaired, 2);

        let assigned: HashSet<String> = sites
            .iter()
            .flat_map(|s| s.member_ids_snapshot())
            .collect();
        assert_eq!(assigned.len(), 5);
        for registrant in &registrants {
            assert!(assigned.contains(&registrant.registrant_id));
        }
    }

    #[test]
    fn test_repair_is_noop_on_conserving_assignment() {
        // 幂等性质: 已守恒的结果上修复为空操作
        let registrants: Vec<Registrant> = (0..4)
            .map(|i| create_test_registrant(&format!("R{}", i)))
            .collect();
        let mut sites = vec![Site::new(1), Site::new(2)];
        for (i, registrant) in registrants.iter().enumerate() {
            sites[i % 2].add_member(registrant.clone());
        }
        let totals_before: Vec<usize> = sites.iter().map(|s| s.total()).collect();

        assert_eq!(verify_and_repair(&registrants, &mut sites), 0);
        let totals_after: Vec<usize> = sites.iter().map(|s| s.total()).collect();
        assert_eq!(totals_before, totals_after);
    }
}
