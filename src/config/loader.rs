// ==========================================
// 宣教分队分配系统 - 配置加载器
// ==========================================
// 职责: 从 JSON 文件加载分配策略参数
// 约定: 文件缺失时回退默认参数,文件损坏时报错
// ==========================================

use crate::config::profile::DistributionProfile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认配置文件路径: <用户配置目录>/mission-distribution/profile.json
pub fn default_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mission-distribution").join("profile.json"))
}

/// 从指定路径加载策略参数
///
/// # 参数
/// - `path`: 配置文件路径
///
/// # 返回
/// - `Ok(DistributionProfile)`: 加载并通过验证的参数
/// - `Err`: 文件读取失败 / JSON 解析失败 / 参数验证失败
pub fn load_profile(path: &Path) -> Result<DistributionProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取配置文件失败: {}", path.display()))?;

    let profile: DistributionProfile = serde_json::from_str(&content)
        .with_context(|| format!("解析配置文件失败: {}", path.display()))?;

    profile
        .validate()
        .map_err(|reason| anyhow::anyhow!("配置参数无效: {}", reason))?;

    info!(path = %path.display(), "已加载分配策略参数");
    Ok(profile)
}

/// 加载默认位置的策略参数,文件不存在时回退默认值
///
/// 路径存在但内容损坏属于配置错误,不回退,直接报错
pub fn load_profile_or_default() -> Result<DistributionProfile> {
    match default_profile_path() {
        Some(path) if path.exists() => load_profile(&path),
        _ => {
            debug!("未找到配置文件,使用默认分配策略参数");
            Ok(DistributionProfile::default())
        }
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"total_weight": 12.0, "max_passes": 6}}"#).unwrap();

        let profile = load_profile(&path).unwrap();
        assert!((profile.total_weight - 12.0).abs() < 1e-9);
        assert_eq!(profile.max_passes, 6);
        // 未覆写字段保持默认
        assert_eq!(profile.swap_candidate_limit, 10);
    }

    #[test]
    fn test_load_profile_rejects_broken_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_profile(&path).is_err());
    }

    #[test]
    fn test_load_profile_rejects_invalid_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{"cooling_rate": 2.0}"#).unwrap();
        assert!(load_profile(&path).is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_profile(&path).is_err());
    }
}
