//! # 规划器配置文件
//!
//! 笛卡尔轨迹细化的可调参数，TOML 格式。缺省字段取默认值，
//! 数值合法性由规划器在构造时统一校验。

use lintrail_model::Frame;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// 标准插值步长（米）
pub const DEFAULT_STANDARD_STEP: f64 = 0.01;

/// 单连杆相邻样本间允许的最大有效位移（米）
pub const DEFAULT_CRITICAL_DISTANCE: f64 = 0.005;

/// 连续不收敛细分的最大次数（经验值）
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

pub const DEFAULT_PLANNING_GROUP: &str = "manipulator";

pub const DEFAULT_END_EFFECTOR: &str = "link_6";

/// 配置文件错误
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 规划器配置文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// 机器人相关
    pub robot: RobotSettings,

    /// 插值相关
    pub interpolation: InterpolationSettings,

    /// 距离细化相关
    pub refinement: RefinementSettings,
}

impl PlannerSettings {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// 序列化为 TOML 字符串
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded planner settings from {}", path.display());
        Ok(settings)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

/// 机器人相关配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    /// 规划组名
    pub planning_group: String,

    /// 末端执行器连杆名
    pub end_effector: String,

    /// 需要细化的连杆（空 = 模型中除基座外的所有连杆）
    pub links: Vec<String>,

    /// 目标位姿参考坐标系
    pub frame: Frame,
}

impl Default for RobotSettings {
    fn default() -> Self {
        Self {
            planning_group: DEFAULT_PLANNING_GROUP.to_string(),
            end_effector: DEFAULT_END_EFFECTOR.to_string(),
            links: Vec::new(),
            frame: Frame::Global,
        }
    }
}

/// 插值相关配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationSettings {
    /// 标准插值步长（米）
    pub standard_step: f64,

    /// IK 求解超时（毫秒），缺省表示由求解器决定
    pub ik_timeout_ms: Option<u64>,
}

impl Default for InterpolationSettings {
    fn default() -> Self {
        Self {
            standard_step: DEFAULT_STANDARD_STEP,
            ik_timeout_ms: None,
        }
    }
}

/// 距离细化相关配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementSettings {
    /// 临界距离（米）
    pub critical_distance: f64,

    /// 连续不收敛细分的最大次数
    pub max_attempts: usize,
}

impl Default for RefinementSettings {
    fn default() -> Self {
        Self {
            critical_distance: DEFAULT_CRITICAL_DISTANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = PlannerSettings::default();
        assert_eq!(settings.robot.planning_group, "manipulator");
        assert_eq!(settings.robot.end_effector, "link_6");
        assert!(settings.robot.links.is_empty());
        assert_eq!(settings.robot.frame, Frame::Global);
        assert_eq!(settings.interpolation.standard_step, 0.01);
        assert_eq!(settings.interpolation.ik_timeout_ms, None);
        assert_eq!(settings.refinement.critical_distance, 0.005);
        assert_eq!(settings.refinement.max_attempts, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = PlannerSettings::from_toml_str(
            r#"
[robot]
frame = "local"

[refinement]
critical_distance = 0.002
"#,
        )
        .unwrap();

        assert_eq!(settings.robot.frame, Frame::Local);
        assert_eq!(settings.robot.end_effector, "link_6");
        assert_eq!(settings.refinement.critical_distance, 0.002);
        assert_eq!(settings.refinement.max_attempts, 10);
        assert_eq!(settings.interpolation.standard_step, 0.01);
    }

    #[test]
    fn test_empty_file_is_default() {
        let settings = PlannerSettings::from_toml_str("").unwrap();
        assert_eq!(settings, PlannerSettings::default());
    }

    #[test]
    fn test_invalid_frame_is_rejected() {
        let result = PlannerSettings::from_toml_str("[robot]\nframe = \"world\"\n");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let mut settings = PlannerSettings::default();
        settings.robot.links = vec!["link_1".to_string(), "link_2".to_string()];
        settings.interpolation.ik_timeout_ms = Some(100);
        settings.refinement.max_attempts = 4;

        let file = NamedTempFile::new().unwrap();
        settings.save_to_file(file.path()).unwrap();

        let loaded = PlannerSettings::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file() {
        let result = PlannerSettings::load_from_file("/nonexistent/lintrail/settings.toml");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
