//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use lintrail_sdk::prelude::*;
//! ```

// 规划入口
pub use lintrail_planner::{CartesianPlanner, Plan, PlanReport, PlannerConfig, TrajectoryBuilder};

// 数据类型
pub use lintrail_model::{Configuration, Frame, JointGroup, Trajectory, Transform};

// 外部协作方接口
pub use lintrail_model::{CollisionOracle, IkRequest, KinematicModel, TrajectoryConsumer};

// 配置文件
pub use lintrail_tools::PlannerSettings;

// 错误类型
pub use lintrail_model::{ConsumerError, ModelError};
pub use lintrail_planner::{FailedCheck, InvalidTrajectory, PlannerError};
pub use lintrail_tools::SettingsError;
