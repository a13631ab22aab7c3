//! # Lintrail Planner
//!
//! 自适应笛卡尔轨迹规划：在末端执行器的起始位姿与目标位姿之间插值，
//! 逐连杆细化使相邻样本间的有效位移不超过临界距离，并检查每个样本是否碰撞。
//!
//! ## 流水线
//!
//! 1. [`TrajectoryBuilder`]：按标准步长插值并逐点求 IK（全有或全无）
//! 2. [`LinkRefiner`]：对每个连杆二分过长的段，[`ConvergenceGuard`] 检测空间跳变
//! 3. [`CollisionValidator`]：与细化并行检查本轮开始时的快照
//! 4. [`CartesianPlanner`]：编排以上步骤，任何失败都中止整条流水线
//!
//! ## 错误
//!
//! 失败原因由 [`PlannerError::check`] 给出：IK、收敛、碰撞、配置或交付。

pub mod builder;
pub mod config;
pub mod error;
pub mod guard;
pub mod interpolate;
pub mod metric;
pub mod orchestrator;
pub mod refine;
pub mod validate;

// 重新导出常用类型
pub use builder::TrajectoryBuilder;
pub use config::{ConfigError, PlannerConfig};
pub use error::{FailedCheck, InterpolationFailure, InvalidTrajectory, PlannerError};
pub use guard::{ConvergenceGuard, Diverged};
pub use interpolate::{PoseInterpolator, interpolate_pose};
pub use metric::{LinkMetric, effective_distance};
pub use orchestrator::{CartesianPlanner, Plan, PlanReport};
pub use refine::{LinkRefiner, RefineReport};
pub use validate::{CollisionValidator, ValidationReport};
