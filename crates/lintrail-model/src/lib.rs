//! # Lintrail Model
//!
//! 机械臂位形、轨迹以及外部运动学协作方接口定义（无规划逻辑）
//!
//! ## 模块
//!
//! - `configuration`: 关节位形（`Configuration`）
//! - `trajectory`: 有序轨迹与只读快照
//! - `traits`: 外部协作方接口（运动学模型 / 碰撞检测 / 轨迹消费者）
//! - `error`: 模型层错误
//! - `mock`: 解析解龙门臂与盒子障碍物（需要 `mock` feature）
//!
//! ## 在架构中的位置
//!
//! ```text
//! lintrail-sdk      (facade, logging)
//!     ↓
//! lintrail-planner  (interpolate / refine / validate / orchestrate)
//!     ↓
//! lintrail-tools    (TOML settings)
//!     ↓
//! lintrail-model    (此 crate)
//! ```

pub mod configuration;
pub mod error;
pub mod frame;
pub mod trajectory;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// 重新导出常用类型
pub use configuration::Configuration;
pub use error::{ConsumerError, ModelError};
pub use frame::{Frame, Transform};
pub use trajectory::{Trajectory, TrajectorySnapshot};
pub use traits::{CollisionOracle, IkRequest, JointGroup, KinematicModel, TrajectoryConsumer};
