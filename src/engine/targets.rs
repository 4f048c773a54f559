// ==========================================
// 宣教分队分配系统 - 全局统计目标
// ==========================================
// 职责: 运行开始时预计算全局汇总,作为各阶段的均衡目标
// 红线: 单次运行内只计算一次,各阶段只读
// ==========================================

use crate::domain::registrant::Registrant;
use crate::domain::types::{ExperienceTier, Gender};
use std::collections::HashMap;

// ==========================================
// GlobalTargets - 全局均衡目标
// ==========================================
#[derive(Debug, Clone)]
pub struct GlobalTargets {
    pub total: usize,
    pub number_of_sites: usize,

    pub male_total: usize,
    pub female_total: usize,
    pub visitor_total: usize,

    pub first_timers_total: usize,
    pub experienced_total: usize,
    pub veterans_total: usize,

    /// 每个营地的全局人数
    pub campus_totals: HashMap<String, usize>,

    /// 每个年级的全局人数
    pub year_totals: HashMap<i32, usize>,

    /// 平均每队人数
    pub mean_site_size: f64,

    /// 平均每队访客数
    pub mean_visitors_per_site: f64,
}

impl GlobalTargets {
    /// 计算全局均衡目标
    ///
    /// # 参数
    /// - `registrants`: 全部报名者
    /// - `number_of_sites`: 分队数(>=1,由调用方保证)
    pub fn compute(registrants: &[Registrant], number_of_sites: usize) -> Self {
        let mut targets = Self {
            total: registrants.len(),
            number_of_sites,
            male_total: 0,
            female_total: 0,
            visitor_total: 0,
            first_timers_total: 0,
            experienced_total: 0,
            veterans_total: 0,
            campus_totals: HashMap::new(),
            year_totals: HashMap::new(),
            mean_site_size: 0.0,
            mean_visitors_per_site: 0.0,
        };

        for registrant in registrants {
            match registrant.gender {
                Gender::Male => targets.male_total += 1,
                Gender::Female => targets.female_total += 1,
            }
            if registrant.is_visitor() {
                targets.visitor_total += 1;
            }
            match registrant.experience_tier() {
                ExperienceTier::FirstTimer => targets.first_timers_total += 1,
                ExperienceTier::Experienced => targets.experienced_total += 1,
                ExperienceTier::Veteran => targets.veterans_total += 1,
            }
            *targets
                .campus_totals
                .entry(registrant.campus.clone())
                .or_insert(0) += 1;
            if let Some(year) = registrant.year_of_study {
                *targets.year_totals.entry(year).or_insert(0) += 1;
            }
        }

        let sites = number_of_sites.max(1) as f64;
        targets.mean_site_size = targets.total as f64 / sites;
        targets.mean_visitors_per_site = targets.visitor_total as f64 / sites;
        targets
    }

    /// 指定经验层级的全局人数
    pub fn tier_total(&self, tier: ExperienceTier) -> usize {
        match tier {
            ExperienceTier::FirstTimer => self.first_timers_total,
            ExperienceTier::Experienced => self.experienced_total,
            ExperienceTier::Veteran => self.veterans_total,
        }
    }

    /// 指定经验层级的每队目标人数
    pub fn tier_target_per_site(&self, tier: ExperienceTier) -> f64 {
        self.tier_total(tier) as f64 / self.number_of_sites.max(1) as f64
    }
}
