// ==========================================
// 宣教分队分配系统 - 分层初始指派
// ==========================================
// 职责: 按 (性别, 经验层级, 访客, 营地) 分层分桶,
//       桶内洗牌后跨桶连续轮转指派
// 红线: 轮转游标跨桶延续,不得按桶重置,
//       否则单一大桶会把人堆到编号靠前的分队
// ==========================================

use crate::domain::registrant::Registrant;
use crate::domain::site::Site;
use crate::domain::types::{ExperienceTier, Gender};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

/// 分层桶键: 四个特征的全组合各成一桶
///
/// BTreeMap 保证桶遍历顺序稳定,固定种子下结果可复现
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct BucketKey {
    gender: Gender,
    tier: ExperienceTier,
    is_visitor: bool,
    campus: String,
}

/// 分层初始指派
///
/// # 参数
/// - `registrants`: 全部报名者
/// - `sites`: 空分队集合(会被填充)
/// - `rng`: 注入的随机源(桶内洗牌)
pub fn initial_assignment<R: Rng>(
    registrants: &[Registrant],
    sites: &mut [Site],
    rng: &mut R,
) {
    let number_of_sites = sites.len();
    if number_of_sites == 0 {
        return;
    }

    // 1. 分桶
    let mut buckets: BTreeMap<BucketKey, Vec<Registrant>> = BTreeMap::new();
    for registrant in registrants {
        let key = BucketKey {
            gender: registrant.gender,
            tier: registrant.experience_tier(),
            is_visitor: registrant.is_visitor(),
            campus: registrant.campus.clone(),
        };
        buckets.entry(key).or_default().push(registrant.clone());
    }

    debug!(
        bucket_count = buckets.len(),
        registrant_count = registrants.len(),
        "分层分桶完成"
    );

    // 2. 桶内独立洗牌,跨桶连续轮转指派
    let mut cursor = 0usize;
    for (_, mut bucket) in buckets {
        bucket.shuffle(rng);
        for member in bucket {
            sites[cursor % number_of_sites].add_member(member);
            cursor += 1;
        }
    }
}
