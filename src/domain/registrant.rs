// ==========================================
// 宣教分队分配系统 - 报名者实体
// ==========================================
// 职责: 定义分配运行的输入记录
// 红线: 单次运行内不可变,引擎只读取不修改
// ==========================================
// 输入契约: 录入协作方已完成规范化
// - gender 已强制为 MALE/FEMALE
// - campus 已规范化为营地名或 VISITOR 哨兵
// - year_of_study 为 1~7 或缺失(其他/研究生)
// - previous_missions_count 已合并用户填写与历史记录自动探测
// ==========================================

use crate::domain::types::{ExperienceTier, Gender, VISITOR_CAMPUS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Registrant - 报名者
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registrant {
    /// 唯一标识(不透明,由录入层分配)
    pub registrant_id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// 性别(录入层已规范化)
    pub gender: Gender,

    /// 规范化营地名,访客为 VISITOR 哨兵
    pub campus: String,

    /// 年级 1~7,其他/研究生为 None
    #[serde(default)]
    pub year_of_study: Option<i32>,

    /// 既往宣教次数(>=0)
    #[serde(default)]
    pub previous_missions_count: i32,

    /// 报名时间(由录入层写入,对算法无影响)
    pub created_at: DateTime<Utc>,
}

impl Registrant {
    /// 是否为访客(营地规范化为 VISITOR 哨兵)
    pub fn is_visitor(&self) -> bool {
        self.campus == VISITOR_CAMPUS
    }

    /// 经验层级(由既往宣教次数派生)
    pub fn experience_tier(&self) -> ExperienceTier {
        ExperienceTier::from_missions_count(self.previous_missions_count)
    }

    /// 姓名拼接(导出/日志用)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_registrant(campus: &str, missions: i32) -> Registrant {
        Registrant {
            registrant_id: "R001".to_string(),
            first_name: "明".to_string(),
            last_name: "王".to_string(),
            email: "ming.wang@example.com".to_string(),
            gender: Gender::Male,
            campus: campus.to_string(),
            year_of_study: Some(2),
            previous_missions_count: missions,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_visitor() {
        assert!(create_test_registrant(VISITOR_CAMPUS, 0).is_visitor());
        assert!(!create_test_registrant("北区营地", 0).is_visitor());
    }

    #[test]
    fn test_experience_tier_derivation() {
        assert_eq!(
            create_test_registrant("北区营地", 0).experience_tier(),
            ExperienceTier::FirstTimer
        );
        assert_eq!(
            create_test_registrant("北区营地", 1).experience_tier(),
            ExperienceTier::Experienced
        );
        assert_eq!(
            create_test_registrant("北区营地", 4).experience_tier(),
            ExperienceTier::Veteran
        );
    }

    #[test]
    fn test_full_name() {
        assert_eq!(create_test_registrant("北区营地", 0).full_name(), "明 王");
    }
}
