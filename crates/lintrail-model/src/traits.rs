//! 外部协作方接口
//!
//! 规划核心只通过这些 trait 访问机器人模型、碰撞场景和轨迹消费者，
//! 不关心它们背后是 URDF 模型、仿真器还是真实控制器。

use crate::configuration::Configuration;
use crate::error::{ConsumerError, ModelError};
use crate::frame::Transform;
use crate::trajectory::Trajectory;
use nalgebra::Vector3;
use std::time::Duration;

/// 关节组（规划组）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointGroup {
    /// 组名，如 `"manipulator"`
    pub name: String,
    /// 组内受控关节名（运动链顺序）
    pub joints: Vec<String>,
}

impl JointGroup {
    pub fn new(name: impl Into<String>, joints: Vec<String>) -> Self {
        Self {
            name: name.into(),
            joints,
        }
    }

    /// 受控关节数量
    pub fn dof(&self) -> usize {
        self.joints.len()
    }
}

/// 逆运动学求解请求
#[derive(Debug, Clone, Copy)]
pub struct IkRequest<'a> {
    /// 求解使用的关节组
    pub group: &'a JointGroup,
    /// 目标位姿所约束的连杆（通常为末端执行器）
    pub tip: &'a str,
    /// 全局坐标系下的目标位姿
    pub target: &'a Transform,
    /// 种子位形：求解器应优先返回离种子最近的解，以保证轨迹连续
    pub seed: Option<&'a Configuration>,
    /// 求解超时（`None` 表示使用求解器默认值）
    pub timeout: Option<Duration>,
}

/// 运动学模型（外部协作方）
///
/// 提供正运动学（连杆位姿）、碰撞几何尺寸和逆运动学求解。
/// 实现必须是确定性的：同一位形总是得到同一位姿。
pub trait KinematicModel: Send + Sync {
    /// 固定基座连杆名（不参与距离细化）
    fn base_link(&self) -> &str;

    /// 带碰撞几何体的连杆，按运动链顺序排列（可以包含基座）
    fn controlled_links(&self) -> Vec<String>;

    /// 查找关节组
    fn joint_group(&self, name: &str) -> Result<JointGroup, ModelError>;

    /// 连杆在给定位形下的全局位姿
    fn link_transform(&self, config: &Configuration, link: &str)
    -> Result<Transform, ModelError>;

    /// 连杆碰撞形状的包围盒尺寸（x, y, z）
    fn link_extent(&self, link: &str) -> Result<Vector3<f64>, ModelError>;

    /// 逆运动学求解，无解时返回 `None`
    fn solve_ik(&self, request: &IkRequest<'_>) -> Option<Configuration>;
}

/// 碰撞检测（规划场景，外部协作方）
pub trait CollisionOracle: Send + Sync {
    /// 位形是否发生自碰撞或与环境碰撞
    fn is_colliding(&self, config: &Configuration, group: &JointGroup) -> bool;
}

/// 轨迹消费者（显示或执行，外部协作方）
///
/// 只会收到已经通过细化与碰撞检测的轨迹。
pub trait TrajectoryConsumer {
    fn consume(&mut self, trajectory: Trajectory) -> Result<(), ConsumerError>;
}
