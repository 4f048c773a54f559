// ==========================================
// 宣教分队分配系统 - 领域类型定义
// ==========================================
// 职责: 定义分配领域的枚举与常量
// 红线: 录入层已完成规范化,引擎不做字符串猜测
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 访客营地哨兵值
// ==========================================
// 录入层的营地规范化结果: 规范营地名 或 VISITOR
pub const VISITOR_CAMPUS: &str = "VISITOR";

// ==========================================
// 性别 (Gender)
// ==========================================
// 录入层保证: 无法解析时默认 MALE,引擎只见到枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// 返回相反性别
    pub fn opposite(&self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
        }
    }
}

// ==========================================
// 经验层级 (Experience Tier)
// ==========================================
// 由既往宣教次数派生: 0=首次 / 1=有经验 / >=2=资深
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceTier {
    FirstTimer,  // 首次参加
    Experienced, // 参加过一次
    Veteran,     // 参加过两次及以上
}

impl ExperienceTier {
    /// 由既往宣教次数派生经验层级
    ///
    /// # 参数
    /// - `previous_missions_count`: 既往宣教次数(负数按 0 处理)
    pub fn from_missions_count(previous_missions_count: i32) -> Self {
        match previous_missions_count.max(0) {
            0 => ExperienceTier::FirstTimer,
            1 => ExperienceTier::Experienced,
            _ => ExperienceTier::Veteran,
        }
    }

    /// 全部层级(固定顺序,供统计遍历)
    pub fn all() -> [ExperienceTier; 3] {
        [
            ExperienceTier::FirstTimer,
            ExperienceTier::Experienced,
            ExperienceTier::Veteran,
        ]
    }
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceTier::FirstTimer => write!(f, "FIRST_TIMER"),
            ExperienceTier::Experienced => write!(f, "EXPERIENCED"),
            ExperienceTier::Veteran => write!(f, "VETERAN"),
        }
    }
}
