// ==========================================
// 宣教分队分配系统 - 请求校验器
// ==========================================
// 职责: 在调用引擎前拦截非法输入
// 红线: 引擎对非法输入的行为未定义,校验必须前置
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::registrant::Registrant;
use std::collections::HashSet;
use tracing::warn;

/// 实用分队数上限(超过仅告警,不拒绝)
const PRACTICAL_SITE_LIMIT: usize = 20;

/// 校验分配请求
///
/// # 校验规则
/// 1. 报名者列表非空
/// 2. 分队数 >= 1(> 20 仅告警)
/// 3. 报名者 ID 不重复
/// 4. 报名者营地字段非空(录入层规范化契约)
pub fn validate_request(registrants: &[Registrant], number_of_sites: usize) -> ApiResult<()> {
    if registrants.is_empty() {
        return Err(ApiError::EmptyRegistrantList);
    }
    if number_of_sites == 0 {
        return Err(ApiError::InvalidSiteCount { number_of_sites });
    }
    if number_of_sites > PRACTICAL_SITE_LIMIT {
        warn!(
            number_of_sites,
            "分队数超过实用上限 {},继续执行", PRACTICAL_SITE_LIMIT
        );
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(registrants.len());
    for registrant in registrants {
        if registrant.registrant_id.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "registrant_id 不能为空".to_string(),
            ));
        }
        if !seen.insert(registrant.registrant_id.as_str()) {
            return Err(ApiError::DuplicateRegistrantId {
                registrant_id: registrant.registrant_id.clone(),
            });
        }
        if registrant.campus.trim().is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "报名者 {} 的营地字段为空,录入层未完成规范化",
                registrant.registrant_id
            )));
        }
        if let Some(year) = registrant.year_of_study {
            if !(1..=7).contains(&year) {
                return Err(ApiError::InvalidInput(format!(
                    "报名者 {} 的年级 {} 超出 1~7",
                    registrant.registrant_id, year
                )));
            }
        }
    }

    Ok(())
}
