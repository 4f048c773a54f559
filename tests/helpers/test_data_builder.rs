// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::Utc;
use mission_distribution::domain::types::{Gender, VISITOR_CAMPUS};
use mission_distribution::domain::Registrant;

// ==========================================
// Registrant 构建器
// ==========================================

pub struct RegistrantBuilder {
    registrant_id: String,
    gender: Gender,
    campus: String,
    year_of_study: Option<i32>,
    previous_missions_count: i32,
}

impl RegistrantBuilder {
    pub fn new(registrant_id: &str) -> Self {
        Self {
            registrant_id: registrant_id.to_string(),
            gender: Gender::Male,
            campus: "北区营地".to_string(),
            year_of_study: Some(1),
            previous_missions_count: 0,
        }
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn campus(mut self, campus: &str) -> Self {
        self.campus = campus.to_string();
        self
    }

    pub fn visitor(mut self) -> Self {
        self.campus = VISITOR_CAMPUS.to_string();
        self
    }

    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year_of_study = year;
        self
    }

    pub fn missions(mut self, count: i32) -> Self {
        self.previous_missions_count = count;
        self
    }

    pub fn build(self) -> Registrant {
        Registrant {
            registrant_id: self.registrant_id.clone(),
            first_name: "成员".to_string(),
            last_name: self.registrant_id.clone(),
            email: format!("{}@example.com", self.registrant_id),
            gender: self.gender,
            campus: self.campus,
            year_of_study: self.year_of_study,
            previous_missions_count: self.previous_missions_count,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// 典型人群构建函数
// ==========================================

/// 40 人标准人群: 20男/20女,4 营地均分,全部首次参加
pub fn balanced_population_40() -> Vec<Registrant> {
    let campuses = ["北区营地", "南区营地", "东区营地", "西区营地"];
    (0..40)
        .map(|i| {
            RegistrantBuilder::new(&format!("R{:03}", i))
                .gender(if i < 20 { Gender::Male } else { Gender::Female })
                .campus(campuses[i % 4])
                .missions(0)
                .year(Some((i % 4 + 1) as i32))
                .build()
        })
        .collect()
}

/// 营地倾斜人群: 25 人主营地 + 5 人小营地
pub fn campus_skewed_population_30() -> Vec<Registrant> {
    (0..30)
        .map(|i| {
            RegistrantBuilder::new(&format!("R{:03}", i))
                .gender(if i % 2 == 0 { Gender::Male } else { Gender::Female })
                .campus(if i < 25 { "主营地" } else { "小营地" })
                .year(Some((i % 3 + 1) as i32))
                .build()
        })
        .collect()
}

/// 混合人群: 含访客、不同经验层级、部分年级缺失
pub fn mixed_population(count: usize) -> Vec<Registrant> {
    let campuses = ["北区营地", "南区营地", "东区营地"];
    (0..count)
        .map(|i| {
            let builder = RegistrantBuilder::new(&format!("R{:03}", i))
                .gender(if i % 2 == 0 { Gender::Male } else { Gender::Female })
                .missions((i % 3) as i32)
                .year(if i % 7 == 0 { None } else { Some((i % 4 + 1) as i32) });
            if i % 6 == 5 {
                builder.visitor().build()
            } else {
                builder.campus(campuses[i % 3]).build()
            }
        })
        .collect()
}
