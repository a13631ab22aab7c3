//! 规划器配置

use lintrail_model::Frame;
use lintrail_tools::PlannerSettings;
use lintrail_tools::settings::{
    DEFAULT_CRITICAL_DISTANCE, DEFAULT_END_EFFECTOR, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_PLANNING_GROUP, DEFAULT_STANDARD_STEP,
};
use std::time::Duration;
use thiserror::Error;

/// 配置校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 数值必须为正的有限值
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// 最大尝试次数必须至少为 1
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    /// 名称不能为空
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// 插值步数超出可表示范围
    #[error("Step count {0} is too large")]
    TooManySteps(usize),
}

/// 规划器配置
///
/// # Example
///
/// ```
/// use lintrail_planner::PlannerConfig;
/// use lintrail_model::Frame;
///
/// let config = PlannerConfig::default()
///     .with_critical_distance(0.002)
///     .with_frame(Frame::Local);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// 规划组名（默认 `"manipulator"`）
    pub planning_group: String,

    /// 末端执行器连杆名（默认 `"link_6"`）
    pub end_effector: String,

    /// 需要细化的连杆，按顺序处理
    ///
    /// 为空时使用模型中除固定基座外的所有连杆。
    pub links: Vec<String>,

    /// 目标位姿参考坐标系（默认全局）
    pub frame: Frame,

    /// 标准插值步长（米，默认 0.01）
    pub standard_step: f64,

    /// IK 求解超时（默认由求解器决定）
    pub ik_timeout: Option<Duration>,

    /// 单连杆相邻样本之间允许的最大有效位移（米，默认 0.005）
    pub critical_distance: f64,

    /// 同一段上连续不收敛细分的最大次数（默认 10）
    pub max_attempts: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            planning_group: DEFAULT_PLANNING_GROUP.to_string(),
            end_effector: DEFAULT_END_EFFECTOR.to_string(),
            links: Vec::new(),
            frame: Frame::Global,
            standard_step: DEFAULT_STANDARD_STEP,
            ik_timeout: None,
            critical_distance: DEFAULT_CRITICAL_DISTANCE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PlannerConfig {
    pub fn with_planning_group(mut self, group: impl Into<String>) -> Self {
        self.planning_group = group.into();
        self
    }

    pub fn with_end_effector(mut self, link: impl Into<String>) -> Self {
        self.end_effector = link.into();
        self
    }

    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_standard_step(mut self, step: f64) -> Self {
        self.standard_step = step;
        self
    }

    pub fn with_ik_timeout(mut self, timeout: Duration) -> Self {
        self.ik_timeout = Some(timeout);
        self
    }

    pub fn with_critical_distance(mut self, distance: f64) -> Self {
        self.critical_distance = distance;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planning_group.is_empty() {
            return Err(ConfigError::EmptyName("planning_group"));
        }
        if self.end_effector.is_empty() {
            return Err(ConfigError::EmptyName("end_effector"));
        }
        if self.links.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyName("links"));
        }
        check_positive("standard_step", self.standard_step)?;
        check_positive("critical_distance", self.critical_distance)?;
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl From<PlannerSettings> for PlannerConfig {
    fn from(settings: PlannerSettings) -> Self {
        Self {
            planning_group: settings.robot.planning_group,
            end_effector: settings.robot.end_effector,
            links: settings.robot.links,
            frame: settings.robot.frame,
            standard_step: settings.interpolation.standard_step,
            ik_timeout: settings.interpolation.ik_timeout_ms.map(Duration::from_millis),
            critical_distance: settings.refinement.critical_distance,
            max_attempts: settings.refinement.max_attempts,
        }
    }
}
