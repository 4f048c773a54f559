// ==========================================
// 宣教分队分配系统 - 分队实体
// ==========================================
// 职责: 定义分配过程中的可变累加器
// 红线: 统计量是成员集合的反规范化缓存,
//       只能经 add_member/remove_member 原子更新,
//       不暴露任何统计量直接写入口
// ==========================================
// 生命周期: 每次 distribute() 调用新建 N 个空分队,
//           调用结束即失效,由调用方另行持久化
// ==========================================

use crate::domain::registrant::Registrant;
use crate::domain::types::{ExperienceTier, Gender};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

// ==========================================
// SiteStats - 分队统计量
// ==========================================
// 成员集合的精确反规范化缓存
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteStats {
    pub total: usize,
    pub male_count: usize,
    pub female_count: usize,
    pub visitor_count: usize,
    pub first_timers: usize,
    pub experienced: usize,
    pub veterans: usize,
    pub campus_counts: HashMap<String, usize>,
    pub year_counts: HashMap<i32, usize>,
}

impl SiteStats {
    /// 按性别读取人数
    pub fn gender_count(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.male_count,
            Gender::Female => self.female_count,
        }
    }

    /// 按经验层级读取人数
    pub fn tier_count(&self, tier: ExperienceTier) -> usize {
        match tier {
            ExperienceTier::FirstTimer => self.first_timers,
            ExperienceTier::Experienced => self.experienced,
            ExperienceTier::Veteran => self.veterans,
        }
    }

    /// 按营地读取人数(未出现过的营地为 0)
    pub fn campus_count(&self, campus: &str) -> usize {
        self.campus_counts.get(campus).copied().unwrap_or(0)
    }

    /// 按年级读取人数
    pub fn year_count(&self, year: i32) -> usize {
        self.year_counts.get(&year).copied().unwrap_or(0)
    }

    /// 性别差 |male - female|
    pub fn gender_gap(&self) -> usize {
        self.male_count.abs_diff(self.female_count)
    }

    /// 记一名成员入统计
    fn record_add(&mut self, member: &Registrant) {
        self.total += 1;
        match member.gender {
            Gender::Male => self.male_count += 1,
            Gender::Female => self.female_count += 1,
        }
        if member.is_visitor() {
            self.visitor_count += 1;
        }
        match member.experience_tier() {
            ExperienceTier::FirstTimer => self.first_timers += 1,
            ExperienceTier::Experienced => self.experienced += 1,
            ExperienceTier::Veteran => self.veterans += 1,
        }
        *self.campus_counts.entry(member.campus.clone()).or_insert(0) += 1;
        if let Some(year) = member.year_of_study {
            *self.year_counts.entry(year).or_insert(0) += 1;
        }
    }

    /// 记一名成员出统计(计数归零时清除键,保持映射精确)
    fn record_remove(&mut self, member: &Registrant) {
        self.total = self.total.saturating_sub(1);
        match member.gender {
            Gender::Male => self.male_count = self.male_count.saturating_sub(1),
            Gender::Female => self.female_count = self.female_count.saturating_sub(1),
        }
        if member.is_visitor() {
            self.visitor_count = self.visitor_count.saturating_sub(1);
        }
        match member.experience_tier() {
            ExperienceTier::FirstTimer => {
                self.first_timers = self.first_timers.saturating_sub(1)
            }
            ExperienceTier::Experienced => {
                self.experienced = self.experienced.saturating_sub(1)
            }
            ExperienceTier::Veteran => self.veterans = self.veterans.saturating_sub(1),
        }
        if let Some(count) = self.campus_counts.get_mut(&member.campus) {
            *count -= 1;
            if *count == 0 {
                self.campus_counts.remove(&member.campus);
            }
        }
        if let Some(year) = member.year_of_study {
            if let Some(count) = self.year_counts.get_mut(&year) {
                *count -= 1;
                if *count == 0 {
                    self.year_counts.remove(&year);
                }
            }
        }
    }
}

// ==========================================
// Site - 宣教分队
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    /// 分队编号 1..N,稳定标识,永不重分配
    site_number: i32,

    /// 成员集合(按 registrant_id 去重)
    members: Vec<Registrant>,

    /// 成员 ID 索引(成员资格按 ID 判定)
    member_ids: HashSet<String>,

    /// 反规范化统计缓存
    stats: SiteStats,
}

impl Site {
    /// 创建空分队
    ///
    /// # 参数
    /// - `site_number`: 分队编号(1..N)
    pub fn new(site_number: i32) -> Self {
        Self {
            site_number,
            members: Vec::new(),
            member_ids: HashSet::new(),
            stats: SiteStats::default(),
        }
    }

    pub fn site_number(&self) -> i32 {
        self.site_number
    }

    pub fn members(&self) -> &[Registrant] {
        &self.members
    }

    pub fn stats(&self) -> &SiteStats {
        &self.stats
    }

    pub fn total(&self) -> usize {
        self.stats.total
    }

    /// 成员资格判定(按 ID)
    pub fn contains(&self, registrant_id: &str) -> bool {
        self.member_ids.contains(registrant_id)
    }

    /// 加入成员,成员集合与统计量在同一操作内更新
    ///
    /// # 返回
    /// - `true`: 成功加入
    /// - `false`: 同 ID 成员已存在,拒绝重复加入
    pub fn add_member(&mut self, member: Registrant) -> bool {
        if !self.member_ids.insert(member.registrant_id.clone()) {
            return false;
        }
        self.stats.record_add(&member);
        self.members.push(member);
        true
    }

    /// 移除成员,成员集合与统计量在同一操作内更新
    ///
    /// # 返回
    /// - `Some(Registrant)`: 被移除的成员(交还调用方,保证不丢失)
    /// - `None`: 该 ID 不在本分队
    pub fn remove_member(&mut self, registrant_id: &str) -> Option<Registrant> {
        if !self.member_ids.remove(registrant_id) {
            return None;
        }
        let index = self
            .members
            .iter()
            .position(|m| m.registrant_id == registrant_id)?;
        let member = self.members.swap_remove(index);
        self.stats.record_remove(&member);
        Some(member)
    }

    /// 成员 ID 快照(供最优状态存档使用)
    pub fn member_ids_snapshot(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.registrant_id.clone())
            .collect()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::VISITOR_CAMPUS;
    use chrono::Utc;

    fn create_test_member(
        registrant_id: &str,
        gender: Gender,
        campus: &str,
        year: Option<i32>,
        missions: i32,
    ) -> Registrant {
        Registrant {
            registrant_id: registrant_id.to_string(),
            first_name: "测试".to_string(),
            last_name: "成员".to_string(),
            email: format!("{}@example.com", registrant_id),
            gender,
            campus: campus.to_string(),
            year_of_study: year,
            previous_missions_count: missions,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_member_updates_stats_atomically() {
        let mut site = Site::new(1);
        assert!(site.add_member(create_test_member(
            "R001",
            Gender::Female,
            "北区营地",
            Some(2),
            1
        )));

        assert_eq!(site.total(), 1);
        assert_eq!(site.stats().female_count, 1);
        assert_eq!(site.stats().male_count, 0);
        assert_eq!(site.stats().experienced, 1);
        assert_eq!(site.stats().campus_count("北区营地"), 1);
        assert_eq!(site.stats().year_count(2), 1);
        assert!(site.contains("R001"));
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let mut site = Site::new(1);
        assert!(site.add_member(create_test_member(
            "R001",
            Gender::Male,
            "北区营地",
            None,
            0
        )));
        // 同 ID 再次加入被拒绝,统计不变
        assert!(!site.add_member(create_test_member(
            "R001",
            Gender::Male,
            "北区营地",
            None,
            0
        )));
        assert_eq!(site.total(), 1);
        assert_eq!(site.stats().male_count, 1);
    }

    #[test]
    fn test_remove_member_returns_registrant() {
        let mut site = Site::new(1);
        site.add_member(create_test_member(
            "R001",
            Gender::Male,
            VISITOR_CAMPUS,
            Some(3),
            2,
        ));
        site.add_member(create_test_member(
            "R002",
            Gender::Female,
            "南区营地",
            None,
            0,
        ));

        let removed = site.remove_member("R001");
        assert!(removed.is_some());
        assert_eq!(removed.unwrap().registrant_id, "R001");

        // 统计量回退到精确状态
        assert_eq!(site.total(), 1);
        assert_eq!(site.stats().visitor_count, 0);
        assert_eq!(site.stats().veterans, 0);
        assert_eq!(site.stats().campus_count(VISITOR_CAMPUS), 0);
        assert_eq!(site.stats().year_count(3), 0);
        assert!(!site.contains("R001"));
        assert!(site.contains("R002"));
    }

    #[test]
    fn test_remove_missing_member_is_none() {
        let mut site = Site::new(1);
        assert!(site.remove_member("R999").is_none());
        assert_eq!(site.total(), 0);
    }

    #[test]
    fn test_gender_gap() {
        let mut site = Site::new(1);
        site.add_member(create_test_member("R001", Gender::Male, "北区营地", None, 0));
        site.add_member(create_test_member("R002", Gender::Male, "北区营地", None, 0));
        site.add_member(create_test_member(
            "R003",
            Gender::Female,
            "北区营地",
            None,
            0,
        ));
        assert_eq!(site.stats().gender_gap(), 1);
    }

    #[test]
    fn test_campus_key_cleared_when_zero() {
        let mut site = Site::new(1);
        site.add_member(create_test_member("R001", Gender::Male, "东区营地", None, 0));
        site.remove_member("R001");
        // 归零的营地键被清除,避免残留键影响"新营地加分"判断
        assert!(!site.stats().campus_counts.contains_key("东区营地"));
    }
}
