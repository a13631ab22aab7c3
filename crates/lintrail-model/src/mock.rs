//! Mock 协作方
//!
//! 用于测试和演示、无需真实机器人模型的协作方实现：
//!
//! - [`GantryArm`]: 六自由度龙门臂（3 个移动关节 + 3 个转动关节），具有解析逆解
//! - [`BoxObstacles`]: 轴对齐盒子障碍物碰撞检测
//! - [`RecordingConsumer`]: 记录收到的轨迹
//!
//! # 龙门臂结构
//!
//! 关节顺序为 `[x, y, z, roll, pitch, yaw]`：
//!
//! | 连杆 | 平移 | 旋转 |
//! |------|------|------|
//! | `base_link` | 原点 | 无 |
//! | `link_1` | `(x, 0, 0)` | 无 |
//! | `link_2` | `(x, y, 0)` | 无 |
//! | `link_3` | `(x, y, z)` | 无 |
//! | `link_4` | `(x, y, z)` | `Rz(yaw)` |
//! | `link_5` | `(x, y, z)` | `Rz(yaw)·Ry(pitch)` |
//! | `link_6` | `(x, y, z)` | `Rz(yaw)·Ry(pitch)·Rx(roll)` |

use crate::configuration::Configuration;
use crate::error::{ConsumerError, ModelError};
use crate::frame::Transform;
use crate::trajectory::Trajectory;
use crate::traits::{CollisionOracle, IkRequest, JointGroup, KinematicModel, TrajectoryConsumer};
use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::{PI, TAU};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 龙门臂关节数
pub const GANTRY_DOF: usize = 6;

/// 龙门臂末端执行器连杆
pub const GANTRY_END_EFFECTOR: &str = "link_6";

/// 龙门臂规划组
pub const GANTRY_GROUP: &str = "manipulator";

const GANTRY_BASE: &str = "base_link";

const GANTRY_LINKS: [&str; GANTRY_DOF + 1] = [
    GANTRY_BASE,
    "link_1",
    "link_2",
    "link_3",
    "link_4",
    "link_5",
    "link_6",
];

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// 以 `center` 为中心、半边长为 `half_extent` 的立方体
    pub fn cube(center: Point3<f64>, half_extent: f64) -> Self {
        let half = Vector3::repeat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}

/// 六自由度龙门臂
#[derive(Debug)]
pub struct GantryArm {
    group: JointGroup,
    extents: [Vector3<f64>; GANTRY_DOF + 1],
    unreachable: Vec<Aabb>,
    ik_calls: AtomicUsize,
}

impl GantryArm {
    /// 创建默认龙门臂（每个连杆包围盒 4cm × 4cm × 12cm）
    pub fn new() -> Self {
        let joints = (1..=GANTRY_DOF).map(|i| format!("joint_{}", i)).collect();
        Self {
            group: JointGroup::new(GANTRY_GROUP, joints),
            extents: [Vector3::new(0.04, 0.04, 0.12); GANTRY_DOF + 1],
            unreachable: Vec::new(),
            ik_calls: AtomicUsize::new(0),
        }
    }

    /// 设置某个连杆的包围盒尺寸
    pub fn with_extent(mut self, link: &str, extent: Vector3<f64>) -> Self {
        if let Some(index) = link_index(link) {
            self.extents[index] = extent;
        }
        self
    }

    /// 添加逆解不可达区域：目标平移落在盒内时 IK 失败
    pub fn with_unreachable(mut self, region: Aabb) -> Self {
        self.unreachable.push(region);
        self
    }

    /// 已执行的 IK 求解次数
    pub fn ik_calls(&self) -> usize {
        self.ik_calls.load(Ordering::Relaxed)
    }

    /// 正运动学的逆：从末端位姿直接得到关节值（不检查可达性）
    pub fn configuration_for(pose: &Transform) -> Configuration {
        let t = pose.translation.vector;
        let (roll, pitch, yaw) = pose.rotation.euler_angles();
        Configuration::from([t.x, t.y, t.z, roll, pitch, yaw])
    }

    fn check_dof(config: &Configuration) -> Result<(), ModelError> {
        if config.len() != GANTRY_DOF {
            return Err(ModelError::JointCountMismatch {
                expected: GANTRY_DOF,
                actual: config.len(),
            });
        }
        Ok(())
    }
}

impl Default for GantryArm {
    fn default() -> Self {
        Self::new()
    }
}

fn link_index(link: &str) -> Option<usize> {
    GANTRY_LINKS.iter().position(|name| *name == link)
}

/// 将角度平移 2π 的整数倍，使其最接近参考角度
fn unwrap_near(angle: f64, reference: f64) -> f64 {
    let mut value = angle;
    while value - reference > PI {
        value -= TAU;
    }
    while value - reference < -PI {
        value += TAU;
    }
    value
}

impl KinematicModel for GantryArm {
    fn base_link(&self) -> &str {
        GANTRY_BASE
    }

    fn controlled_links(&self) -> Vec<String> {
        GANTRY_LINKS.iter().map(|name| name.to_string()).collect()
    }

    fn joint_group(&self, name: &str) -> Result<JointGroup, ModelError> {
        if name == self.group.name {
            Ok(self.group.clone())
        } else {
            Err(ModelError::UnknownGroup(name.to_string()))
        }
    }

    fn link_transform(
        &self,
        config: &Configuration,
        link: &str,
    ) -> Result<Transform, ModelError> {
        let index = link_index(link).ok_or_else(|| ModelError::UnknownLink(link.to_string()))?;
        Self::check_dof(config)?;

        let (x, y, z) = (config[0], config[1], config[2]);
        let (roll, pitch, yaw) = (config[3], config[4], config[5]);

        let translation = match index {
            0 => Translation3::identity(),
            1 => Translation3::new(x, 0.0, 0.0),
            2 => Translation3::new(x, y, 0.0),
            _ => Translation3::new(x, y, z),
        };
        let rotation = match index {
            4 => UnitQuaternion::from_euler_angles(0.0, 0.0, yaw),
            5 => UnitQuaternion::from_euler_angles(0.0, pitch, yaw),
            6 => UnitQuaternion::from_euler_angles(roll, pitch, yaw),
            _ => UnitQuaternion::identity(),
        };
        Ok(Transform::from_parts(translation, rotation))
    }

    fn link_extent(&self, link: &str) -> Result<Vector3<f64>, ModelError> {
        link_index(link)
            .map(|index| self.extents[index])
            .ok_or_else(|| ModelError::UnknownLink(link.to_string()))
    }

    fn solve_ik(&self, request: &IkRequest<'_>) -> Option<Configuration> {
        self.ik_calls.fetch_add(1, Ordering::Relaxed);

        if request.tip != GANTRY_END_EFFECTOR || request.group.name != self.group.name {
            tracing::warn!(
                "GantryArm only solves {} for group {}, got tip {} / group {}",
                GANTRY_END_EFFECTOR,
                GANTRY_GROUP,
                request.tip,
                request.group.name
            );
            return None;
        }

        let target = Point3::from(request.target.translation.vector);
        if self.unreachable.iter().any(|region| region.contains(&target)) {
            return None;
        }

        let solution = Self::configuration_for(request.target);
        match request.seed {
            // 转动关节取离种子最近的等价角度
            Some(seed) if seed.len() == GANTRY_DOF => {
                let mut values = solution.positions().to_vec();
                for joint in 3..GANTRY_DOF {
                    values[joint] = unwrap_near(values[joint], seed[joint]);
                }
                Some(Configuration::from(values))
            },
            _ => Some(solution),
        }
    }
}

/// 轴对齐盒子障碍物
///
/// 检查龙门臂末端位置（关节 0..3）是否落在任一盒子内。
#[derive(Debug, Default)]
pub struct BoxObstacles {
    obstacles: Vec<Aabb>,
    queries: AtomicUsize,
}

impl BoxObstacles {
    pub fn new(obstacles: Vec<Aabb>) -> Self {
        Self {
            obstacles,
            queries: AtomicUsize::new(0),
        }
    }

    /// 空场景
    pub fn empty() -> Self {
        Self::default()
    }

    /// 已执行的碰撞查询次数
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl CollisionOracle for BoxObstacles {
    fn is_colliding(&self, config: &Configuration, _group: &JointGroup) -> bool {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if config.len() < 3 {
            return false;
        }
        let point = Point3::new(config[0], config[1], config[2]);
        self.obstacles.iter().any(|obstacle| obstacle.contains(&point))
    }
}

/// 记录收到的轨迹
#[derive(Debug, Default)]
pub struct RecordingConsumer {
    pub received: Vec<Trajectory>,
}

impl TrajectoryConsumer for RecordingConsumer {
    fn consume(&mut self, trajectory: Trajectory) -> Result<(), ConsumerError> {
        self.received.push(trajectory);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn request<'a>(
        group: &'a JointGroup,
        target: &'a Transform,
        seed: Option<&'a Configuration>,
    ) -> IkRequest<'a> {
        IkRequest {
            group,
            tip: GANTRY_END_EFFECTOR,
            target,
            seed,
            timeout: None,
        }
    }

    #[test]
    fn test_forward_kinematics_chain() {
        let arm = GantryArm::new();
        let config = Configuration::from([0.1, 0.2, 0.3, 0.0, 0.0, 0.5]);

        let link_1 = arm.link_transform(&config, "link_1").unwrap();
        assert_relative_eq!(link_1.translation.vector.x, 0.1);
        assert_relative_eq!(link_1.translation.vector.y, 0.0);

        let link_4 = arm.link_transform(&config, "link_4").unwrap();
        assert_relative_eq!(link_4.translation.vector.z, 0.3);
        assert_relative_eq!(link_4.rotation.angle(), 0.5, epsilon = 1e-12);

        let base = arm.link_transform(&config, "base_link").unwrap();
        assert_eq!(base, Transform::identity());
    }

    #[test]
    fn test_unknown_link_and_dof_mismatch() {
        let arm = GantryArm::new();
        let config = Configuration::from([0.0; 6]);
        assert_eq!(
            arm.link_transform(&config, "link_7"),
            Err(ModelError::UnknownLink("link_7".to_string()))
        );

        let short = Configuration::from([0.0; 3]);
        assert!(matches!(
            arm.link_transform(&short, "link_1"),
            Err(ModelError::JointCountMismatch { expected: 6, actual: 3 })
        ));
    }

    #[test]
    fn test_ik_roundtrip_matches_forward_kinematics() {
        let arm = GantryArm::new();
        let group = arm.joint_group(GANTRY_GROUP).unwrap();
        let config = Configuration::from([0.3, -0.2, 0.5, 0.1, 0.2, 0.3]);
        let pose = arm.link_transform(&config, GANTRY_END_EFFECTOR).unwrap();

        let solved = arm.solve_ik(&request(&group, &pose, Some(&config))).unwrap();
        assert!(solved.max_joint_delta(&config) < 1e-9);
        assert_eq!(arm.ik_calls(), 1);
    }

    #[test]
    fn test_ik_unwraps_yaw_near_seed() {
        let arm = GantryArm::new();
        let group = arm.joint_group(GANTRY_GROUP).unwrap();
        let seed = Configuration::from([0.0, 0.0, 0.0, 0.0, 0.0, 3.1]);
        let target_config = Configuration::from([0.0, 0.0, 0.0, 0.0, 0.0, 3.2]);
        let target = arm
            .link_transform(&target_config, GANTRY_END_EFFECTOR)
            .unwrap();

        let solved = arm.solve_ik(&request(&group, &target, Some(&seed))).unwrap();
        assert_relative_eq!(solved[5], 3.2, epsilon = 1e-9);
    }

    #[test]
    fn test_ik_fails_inside_unreachable_region() {
        let arm = GantryArm::new().with_unreachable(Aabb::cube(Point3::new(0.5, 0.0, 0.0), 0.05));
        let group = arm.joint_group(GANTRY_GROUP).unwrap();
        let target = Transform::translation(0.52, 0.0, 0.0);
        assert!(arm.solve_ik(&request(&group, &target, None)).is_none());

        let target = Transform::translation(0.6, 0.0, 0.0);
        assert!(arm.solve_ik(&request(&group, &target, None)).is_some());
    }

    #[test]
    fn test_box_obstacles() {
        let oracle = BoxObstacles::new(vec![Aabb::cube(Point3::new(0.2, 0.0, 0.0), 0.01)]);
        let group = GantryArm::new().joint_group(GANTRY_GROUP).unwrap();

        assert!(oracle.is_colliding(&Configuration::from([0.2, 0.0, 0.0, 0.0, 0.0, 0.0]), &group));
        assert!(!oracle.is_colliding(&Configuration::from([0.3, 0.0, 0.0, 0.0, 0.0, 0.0]), &group));
        assert_eq!(oracle.queries(), 2);
    }
}
