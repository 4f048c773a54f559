// ==========================================
// 宣教分队分配系统 - 分配策略参数
// ==========================================
// 职责: 评分权重与优化过程参数(可序列化,可覆写)
// 红线: 总人数均衡权重必须占主导,其余维度为次级目标
// ==========================================

use serde::{Deserialize, Serialize};

/// 分配策略参数(权重/阈值)
///
/// 所有字段带默认值,配置文件可只覆写关心的字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionProfile {
    // ==========================================
    // 评分权重(惩罚项系数,分数越低越好)
    // ==========================================
    /// 总人数均衡权重(最大权重,压过其余所有维度)
    #[serde(default = "default_total_weight")]
    pub total_weight: f64,

    /// 性别均衡权重(二次惩罚加剧性别倾斜)
    #[serde(default = "default_gender_weight")]
    pub gender_weight: f64,

    /// 经验层级均衡权重
    #[serde(default = "default_experience_weight")]
    pub experience_weight: f64,

    /// 营地多样性权重(同营地聚集惩罚)
    #[serde(default = "default_campus_weight")]
    pub campus_weight: f64,

    /// 引入新营地的加分(以负惩罚形式生效)
    #[serde(default = "default_campus_bonus")]
    pub campus_new_bonus: f64,

    /// 年级多样性权重(小于营地权重)
    #[serde(default = "default_year_weight")]
    pub year_weight: f64,

    /// 引入新年级的加分
    #[serde(default = "default_year_bonus")]
    pub year_new_bonus: f64,

    /// 访客分散权重(仅候选人为访客时生效)
    #[serde(default = "default_visitor_weight")]
    pub visitor_weight: f64,

    // ==========================================
    // 优化过程参数
    // ==========================================
    /// 局部搜索最大轮数
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,

    /// 两两交换搜索单侧候选上限
    #[serde(default = "default_swap_candidate_limit")]
    pub swap_candidate_limit: usize,

    /// 交换生效的最小改进量
    #[serde(default = "default_swap_improvement_threshold")]
    pub swap_improvement_threshold: f64,

    /// 单人迁移生效的最小改进量
    #[serde(default = "default_move_improvement_threshold")]
    pub move_improvement_threshold: f64,

    /// 分队规模走廊比例(均值的 ±ratio,默认 75%~125%)
    #[serde(default = "default_size_corridor_ratio")]
    pub size_corridor_ratio: f64,

    /// 执行模拟退火的轮数(仅前几轮)
    #[serde(default = "default_annealing_passes")]
    pub annealing_passes: usize,

    /// 退火初始温度
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,

    /// 退火降温系数(几何降温)
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate: f64,

    /// 每轮退火的尝试次数下限(实际取 max(此值, 人数))
    #[serde(default = "default_annealing_min_iterations")]
    pub annealing_min_iterations: usize,

    /// 连续无改进轮数上限(提前停止)
    #[serde(default = "default_stall_pass_limit")]
    pub stall_pass_limit: usize,

    /// 轮间改进收敛阈值(提前停止)
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,

    /// 末端均衡传递迭代上限
    #[serde(default = "default_balance_iteration_limit")]
    pub balance_iteration_limit: usize,
}

fn default_total_weight() -> f64 {
    10.0
}
fn default_gender_weight() -> f64 {
    5.0
}
fn default_experience_weight() -> f64 {
    3.0
}
fn default_campus_weight() -> f64 {
    1.5
}
fn default_campus_bonus() -> f64 {
    2.0
}
fn default_year_weight() -> f64 {
    0.8
}
fn default_year_bonus() -> f64 {
    1.0
}
fn default_visitor_weight() -> f64 {
    2.0
}
fn default_max_passes() -> usize {
    10
}
fn default_swap_candidate_limit() -> usize {
    10
}
fn default_swap_improvement_threshold() -> f64 {
    0.1
}
fn default_move_improvement_threshold() -> f64 {
    1.0
}
fn default_size_corridor_ratio() -> f64 {
    0.25
}
fn default_annealing_passes() -> usize {
    2
}
fn default_initial_temperature() -> f64 {
    0.3
}
fn default_cooling_rate() -> f64 {
    0.95
}
fn default_annealing_min_iterations() -> usize {
    60
}
fn default_stall_pass_limit() -> usize {
    3
}
fn default_convergence_threshold() -> f64 {
    0.001
}
fn default_balance_iteration_limit() -> usize {
    5
}

impl Default for DistributionProfile {
    // serde(default) 与 Default 必须一致,两边共用同一组 default_* 函数
    fn default() -> Self {
        Self {
            total_weight: default_total_weight(),
            gender_weight: default_gender_weight(),
            experience_weight: default_experience_weight(),
            campus_weight: default_campus_weight(),
            campus_new_bonus: default_campus_bonus(),
            year_weight: default_year_weight(),
            year_new_bonus: default_year_bonus(),
            visitor_weight: default_visitor_weight(),
            max_passes: default_max_passes(),
            swap_candidate_limit: default_swap_candidate_limit(),
            swap_improvement_threshold: default_swap_improvement_threshold(),
            move_improvement_threshold: default_move_improvement_threshold(),
            size_corridor_ratio: default_size_corridor_ratio(),
            annealing_passes: default_annealing_passes(),
            initial_temperature: default_initial_temperature(),
            cooling_rate: default_cooling_rate(),
            annealing_min_iterations: default_annealing_min_iterations(),
            stall_pass_limit: default_stall_pass_limit(),
            convergence_threshold: default_convergence_threshold(),
            balance_iteration_limit: default_balance_iteration_limit(),
        }
    }
}

impl DistributionProfile {
    /// 验证参数有效性
    ///
    /// # 验证规则
    /// 1. 所有权重必须为有限非负数
    /// 2. 走廊比例必须在 (0.0, 1.0) 内
    /// 3. 降温系数必须在 (0.0, 1.0) 内
    /// 4. 初始温度必须为有限正数
    ///
    /// # 返回
    /// - `Ok(())`: 参数有效
    /// - `Err(String)`: 参数无效,返回错误描述
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("total_weight", self.total_weight),
            ("gender_weight", self.gender_weight),
            ("experience_weight", self.experience_weight),
            ("campus_weight", self.campus_weight),
            ("campus_new_bonus", self.campus_new_bonus),
            ("year_weight", self.year_weight),
            ("year_new_bonus", self.year_new_bonus),
            ("visitor_weight", self.visitor_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(format!("权重 {} 不是有限数值: {}", name, value));
            }
            if value < 0.0 {
                return Err(format!("权重 {} 不能为负: {}", name, value));
            }
        }

        if !(self.size_corridor_ratio > 0.0 && self.size_corridor_ratio < 1.0) {
            return Err(format!(
                "规模走廊比例超出有效范围 (0.0, 1.0): {}",
                self.size_corridor_ratio
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(format!(
                "降温系数超出有效范围 (0.0, 1.0): {}",
                self.cooling_rate
            ));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(format!(
                "初始温度必须为有限正数: {}",
                self.initial_temperature
            ));
        }
        if self.max_passes == 0 {
            return Err("局部搜索轮数不能为 0".to_string());
        }

        Ok(())
    }
}
