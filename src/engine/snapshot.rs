// ==========================================
// 宣教分队分配系统 - 最优状态存档
// ==========================================
// 职责: 轮间保存/恢复最优成员分布
// 红线: 存档只存成员 ID 列表,不深拷贝成员对象;
//       恢复走 add_member,统计量随之重建
// ==========================================

use crate::domain::registrant::Registrant;
use crate::domain::site::Site;
use std::collections::HashMap;

// ==========================================
// SiteSnapshot - 成员分布存档
// ==========================================
#[derive(Debug, Clone)]
pub struct SiteSnapshot {
    /// 每个分队的成员 ID 列表(下标与 sites 对齐)
    member_ids: Vec<Vec<String>>,
}

impl SiteSnapshot {
    /// 捕获当前成员分布
    pub fn capture(sites: &[Site]) -> Self {
        Self {
            member_ids: sites.iter().map(|s| s.member_ids_snapshot()).collect(),
        }
    }

    /// 把成员分布恢复到存档时刻
    ///
    /// # 参数
    /// - `sites`: 待恢复的分队集合(编号保持不变,成员清空重建)
    /// - `registrant_index`: registrant_id → Registrant 索引
    pub fn restore(&self, sites: &mut [Site], registrant_index: &HashMap<String, Registrant>) {
        for (index, site) in sites.iter_mut().enumerate() {
            *site = Site::new(site.site_number());
            if let Some(ids) = self.member_ids.get(index) {
                for registrant_id in ids {
                    if let Some(member) = registrant_index.get(registrant_id) {
                        site.add_member(member.clone());
                    }
                }
            }
        }
    }
}
