//! Collision Validator - 碰撞检测
//!
//! 按时间顺序检查快照中的每个样本，遇到第一个碰撞样本立即停止。
//! 只读快照，不修改轨迹，可以与细化器并行运行。

use crate::error::{InvalidTrajectory, PlannerError};
use lintrail_model::{CollisionOracle, JointGroup, TrajectorySnapshot};
use tracing::{error, trace};

/// 碰撞检测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    /// 已检查的样本数
    pub checked: usize,
}

/// 碰撞检测器
pub struct CollisionValidator<'a> {
    oracle: &'a dyn CollisionOracle,
    group: &'a JointGroup,
}

impl<'a> CollisionValidator<'a> {
    pub fn new(oracle: &'a dyn CollisionOracle, group: &'a JointGroup) -> Self {
        Self { oracle, group }
    }

    /// 检查快照中的全部样本
    ///
    /// # 错误
    ///
    /// 第一个碰撞样本返回 [`InvalidTrajectory::Collision`]，其后的样本不再检查。
    pub fn validate(&self, snapshot: &TrajectorySnapshot) -> Result<ValidationReport, PlannerError> {
        for (index, config) in snapshot.iter().enumerate() {
            if self.oracle.is_colliding(config, self.group) {
                error!("Collision along trajectory at sample {}: {}", index, config);
                return Err(InvalidTrajectory::Collision { index }.into());
            }
        }

        trace!("{} samples collision free", snapshot.len());
        Ok(ValidationReport {
            checked: snapshot.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintrail_model::mock::{Aabb, BoxObstacles, GANTRY_GROUP, GantryArm};
    use lintrail_model::{Configuration, KinematicModel, Trajectory};
    use nalgebra::Point3;

    fn line(points: &[f64]) -> Trajectory {
        points
            .iter()
            .map(|x| Configuration::from([*x, 0.0, 0.0, 0.0, 0.0, 0.0]))
            .collect()
    }

    #[test]
    fn test_collision_free() {
        let arm = GantryArm::new();
        let group = arm.joint_group(GANTRY_GROUP).unwrap();
        let oracle = BoxObstacles::empty();
        let validator = CollisionValidator::new(&oracle, &group);

        let report = validator.validate(&line(&[0.0, 0.1, 0.2]).snapshot()).unwrap();
        assert_eq!(report.checked, 3);
        assert_eq!(oracle.queries(), 3);
    }

    #[test]
    fn test_stops_at_first_collision() {
        let arm = GantryArm::new();
        let group = arm.joint_group(GANTRY_GROUP).unwrap();
        let oracle = BoxObstacles::new(vec![Aabb::cube(Point3::new(0.2, 0.0, 0.0), 0.05)]);
        let validator = CollisionValidator::new(&oracle, &group);

        let result = validator.validate(&line(&[0.0, 0.1, 0.2, 0.22, 0.3]).snapshot());
        match result {
            Err(PlannerError::TrajectoryInvalid(InvalidTrajectory::Collision { index })) => {
                assert_eq!(index, 2)
            },
            other => panic!("Expected collision, got {:?}", other),
        }
        // 0.22 和 0.3 不再检查
        assert_eq!(oracle.queries(), 3);
    }

    #[test]
    fn test_empty_snapshot() {
        let arm = GantryArm::new();
        let group = arm.joint_group(GANTRY_GROUP).unwrap();
        let oracle = BoxObstacles::empty();
        let validator = CollisionValidator::new(&oracle, &group);

        let report = validator.validate(&Trajectory::new().snapshot()).unwrap();
        assert_eq!(report.checked, 0);
    }
}
