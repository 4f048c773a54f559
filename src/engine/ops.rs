// ==========================================
// 宣教分队分配系统 - 成员移动原语
// ==========================================
// 职责: 单人转移与两两互换的唯一实现
// 红线: 所有优化阶段只允许经由本模块改变成员归属,
//       原语只搬运既有成员,不可能复制或丢弃
// ==========================================

use crate::domain::site::Site;

/// 将一名成员从一个分队转移到另一个分队
///
/// 转移前先做成员资格预检,预检通过后
/// remove 与 add 必然同时成功,守恒性由结构保证
///
/// # 参数
/// - `sites`: 全部分队
/// - `from` / `to`: 源/目标分队下标
/// - `registrant_id`: 被转移成员 ID
///
/// # 返回
/// - `true`: 转移完成
/// - `false`: 同队转移 / 成员不在源队 / 目标队已有同 ID
pub fn transfer(sites: &mut [Site], from: usize, to: usize, registrant_id: &str) -> bool {
    if from == to || from >= sites.len() || to >= sites.len() {
        return false;
    }
    if !sites[from].contains(registrant_id) || sites[to].contains(registrant_id) {
        return false;
    }

    // 预检已通过,以下两步不会失败
    let member = match sites[from].remove_member(registrant_id) {
        Some(member) => member,
        None => return false,
    };
    sites[to].add_member(member)
}

/// 互换两个分队中的各一名成员
///
/// # 返回
/// - `true`: 互换完成
/// - `false`: 预检失败(同队 / 成员缺失 / 目标冲突)
pub fn swap_members(
    sites: &mut [Site],
    site_a: usize,
    site_b: usize,
    id_a: &str,
    id_b: &str,
) -> bool {
    if site_a == site_b || site_a >= sites.len() || site_b >= sites.len() || id_a == id_b {
        return false;
    }
    if !sites[site_a].contains(id_a) || !sites[site_b].contains(id_b) {
        return false;
    }
    if sites[site_b].contains(id_a) || sites[site_a].contains(id_b) {
        return false;
    }

    let member_a = match sites[site_a].remove_member(id_a) {
        Some(member) => member,
        None => return false,
    };
    let member_b = match sites[site_b].remove_member(id_b) {
        Some(member) => member,
        None => {
            // id_b 预检存在,此分支不可达; 仍然把 member_a 放回,保持守恒
            sites[site_a].add_member(member_a);
            return false;
        }
    };

    sites[site_b].add_member(member_a);
    sites[site_a].add_member(member_b);
    true
}
