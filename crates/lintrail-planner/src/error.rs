//! 规划层错误类型定义
//!
//! 所有失败都是本次运行不可恢复的：任何错误都会中止整条流水线，
//! 不会把部分有效的轨迹交给调用方。

use crate::config::ConfigError;
use lintrail_model::{ConsumerError, ModelError, Transform};
use thiserror::Error;

/// 逆运动学求解失败（某个中间位姿不可达）
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "No IK solution for pose #{step} at ({:.4}, {:.4}, {:.4}); check joint limits and self-collision",
    .target.translation.vector.x,
    .target.translation.vector.y,
    .target.translation.vector.z
)]
pub struct InterpolationFailure {
    /// 失败的位姿序号（从 1 开始）
    pub step: usize,
    /// 请求的目标位姿
    pub target: Transform,
}

/// 轨迹无效
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidTrajectory {
    /// 重复细分无法使距离减半（真实的不连续，例如奇异位形）
    #[error(
        "Space jump on {link} at segment {index}: distance {distance:.5} did not halve in {attempts} consecutive subdivisions"
    )]
    SpaceJump {
        link: String,
        index: usize,
        distance: f64,
        attempts: usize,
    },

    /// 段中点没有逆解，无法桥接
    #[error("Space jump on {link} at segment {index}: no IK solution bridges the segment")]
    Unbridgeable { link: String, index: usize },

    /// 轨迹样本发生碰撞
    #[error("Collision along trajectory at sample {index}")]
    Collision { index: usize },
}

/// 失败的检查项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedCheck {
    /// 逆运动学
    Ik,
    /// 距离阈值收敛
    Convergence,
    /// 碰撞
    Collision,
    /// 配置 / 模型 / 运行环境
    Setup,
    /// 轨迹交付
    Delivery,
}

/// 规划层错误类型
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Interpolation failure: {0}")]
    Interpolation(#[from] InterpolationFailure),

    #[error("Invalid trajectory: {0}")]
    TrajectoryInvalid(#[from] InvalidTrajectory),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Delivery error: {0}")]
    Consumer(#[from] ConsumerError),

    /// 碰撞检测线程 panic
    #[error("Collision validation task panicked")]
    TaskPanicked,
}

impl PlannerError {
    /// 哪一项检查失败
    pub fn check(&self) -> FailedCheck {
        match self {
            PlannerError::Interpolation(_) => FailedCheck::Ik,
            PlannerError::TrajectoryInvalid(InvalidTrajectory::Collision { .. }) => {
                FailedCheck::Collision
            },
            PlannerError::TrajectoryInvalid(_) => FailedCheck::Convergence,
            PlannerError::Consumer(_) => FailedCheck::Delivery,
            PlannerError::Config(_) | PlannerError::Model(_) | PlannerError::TaskPanicked => {
                FailedCheck::Setup
            },
        }
    }
}
