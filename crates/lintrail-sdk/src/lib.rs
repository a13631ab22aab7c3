//! Lintrail SDK - 机械臂自适应笛卡尔路径规划
//!
//! 让末端执行器沿直线从起始位姿移动到目标位姿，并保证：
//!
//! - 每个连杆在相邻样本之间的有效位移不超过临界距离（默认 5mm）
//! - 逆解中的真实不连续（空间跳变）被检测并拒绝
//! - 返回的轨迹中没有任何样本发生碰撞
//!
//! # 架构设计
//!
//! - **模型层** (`model`): 位形、轨迹，以及运动学模型 / 碰撞检测 / 轨迹消费者接口
//! - **配置层** (`tools`): TOML 配置文件
//! - **规划层** (`planner`): 插值、逐连杆细化、碰撞检测与编排
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lintrail_sdk::prelude::*;
//!
//! # fn demo(
//! #     model: Arc<dyn KinematicModel>,
//! #     oracle: Arc<dyn CollisionOracle>,
//! #     start: Configuration,
//! # ) -> Result<(), PlannerError> {
//! lintrail_sdk::logging::init();
//!
//! let planner = CartesianPlanner::new(model, oracle, PlannerConfig::default())?;
//! let plan = planner.plan(&start, &Transform::translation(0.3, 0.0, 0.2))?;
//! println!("{} samples", plan.trajectory.len());
//! # Ok(())
//! # }
//! ```

pub mod logging;
pub mod prelude;

// 各层通过模块路径访问
pub use lintrail_model as model;
pub use lintrail_planner as planner;
pub use lintrail_tools as tools;

// --- 常用类型 ---

pub use lintrail_model::{
    CollisionOracle, Configuration, ConsumerError, Frame, KinematicModel, ModelError, Trajectory,
    TrajectoryConsumer, Transform,
};
pub use lintrail_planner::{
    CartesianPlanner, FailedCheck, InvalidTrajectory, Plan, PlanReport, PlannerConfig,
    PlannerError, TrajectoryBuilder,
};
pub use lintrail_tools::{PlannerSettings, SettingsError};
