//! # Lintrail Tools - 共享配置与工具
//!
//! **依赖原则**: 只依赖 `lintrail-model`，避免依赖 `lintrail-planner`
//!
//! ## 包含模块
//!
//! - `settings` - 规划器 TOML 配置文件（读写，纯数据结构）
//!
//! ## 配置文件示例
//!
//! ```toml
//! [robot]
//! planning_group = "manipulator"
//! end_effector = "link_6"
//! frame = "local"
//!
//! [interpolation]
//! standard_step = 0.01
//!
//! [refinement]
//! critical_distance = 0.005
//! max_attempts = 10
//! ```

pub mod settings;

// 重新导出常用类型
pub use settings::{
    InterpolationSettings, PlannerSettings, RefinementSettings, RobotSettings, SettingsError,
};
