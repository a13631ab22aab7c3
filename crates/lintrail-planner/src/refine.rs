//! Per-Link Distance Refiner - 单连杆距离细化
//!
//! 保证轨迹中任意相邻两个样本之间，指定连杆的有效位移不超过临界距离。
//!
//! # 算法
//!
//! 从左到右扫描相邻样本对 `(A, B)`（扫描的是不断增长的轨迹本身，
//! 新插入的样本在前进之前同样会被检查）：
//!
//! 1. `d = distance(A, B)`，若 `d ≤ critical` 则前进到下一对
//! 2. 否则在 `A` 与 `B` 之间插值一个中点（IK 失败即无法桥接，轨迹无效）
//! 3. 中点插入 `B` 之前，`d' = distance(A, mid)` 作为新的工作距离
//! 4. 由 [`ConvergenceGuard`] 判断是否收敛，连续不收敛达到上限即为空间跳变
//! 5. 以同一个 `A` 和新中点继续，直到满足阈值或失败

use crate::error::{InvalidTrajectory, PlannerError};
use crate::guard::ConvergenceGuard;
use crate::interpolate::PoseInterpolator;
use crate::metric::LinkMetric;
use lintrail_model::Trajectory;
use tracing::{debug, error, info};

/// 单个连杆的细化结果
#[derive(Debug, Clone, PartialEq)]
pub struct RefineReport {
    /// 连杆名
    pub link: String,
    /// 插入的样本数
    pub insertions: usize,
    /// 细化后相邻样本间的最大有效位移
    pub max_distance: f64,
}

/// 单连杆距离细化器
pub struct LinkRefiner<'a> {
    interpolator: &'a PoseInterpolator<'a>,
    metric: LinkMetric<'a>,
    critical_distance: f64,
    max_attempts: usize,
}

impl<'a> LinkRefiner<'a> {
    /// 创建细化器，读取一次连杆包围盒尺寸
    pub fn new(
        interpolator: &'a PoseInterpolator<'a>,
        link: &'a str,
        critical_distance: f64,
        max_attempts: usize,
    ) -> Result<Self, PlannerError> {
        let metric = LinkMetric::new(interpolator.model(), link)?;
        Ok(Self {
            interpolator,
            metric,
            critical_distance,
            max_attempts,
        })
    }

    pub fn link(&self) -> &'a str {
        self.metric.link()
    }

    /// 原地细化轨迹（只插入，不删除、不重排）
    pub fn refine(&self, trajectory: &mut Trajectory) -> Result<RefineReport, PlannerError> {
        let link = self.metric.link();
        let mut report = RefineReport {
            link: link.to_string(),
            insertions: 0,
            max_distance: 0.0,
        };
        let mut guard = ConvergenceGuard::new(self.max_attempts);

        let mut index = 0;
        while index + 1 < trajectory.len() {
            guard.reset();
            let mut distance = self
                .metric
                .distance(&trajectory[index], &trajectory[index + 1])?;

            while distance > self.critical_distance {
                debug!(
                    "{} has too large translation {:.5} at segment {}",
                    link, distance, index
                );

                let midpoint = match self
                    .interpolator
                    .midpoint(&trajectory[index], &trajectory[index + 1])
                {
                    Ok(config) => config,
                    Err(PlannerError::Interpolation(failure)) => {
                        error!("Space jump on {} at segment {}: {}", link, index, failure);
                        return Err(InvalidTrajectory::Unbridgeable {
                            link: link.to_string(),
                            index,
                        }
                        .into());
                    },
                    Err(other) => return Err(other),
                };
                trajectory.insert_before(index + 1, midpoint);
                report.insertions += 1;

                let refined = self
                    .metric
                    .distance(&trajectory[index], &trajectory[index + 1])?;
                // 已满足阈值的细分直接接受
                if refined > self.critical_distance {
                    if let Err(diverged) = guard.observe(distance, refined) {
                        error!(
                            "Space jump on {} at segment {}: {:.5} after {} non-converging subdivisions",
                            link, index, refined, diverged.attempts
                        );
                        return Err(InvalidTrajectory::SpaceJump {
                            link: link.to_string(),
                            index,
                            distance: refined,
                            attempts: diverged.attempts,
                        }
                        .into());
                    }
                }
                distance = refined;
            }

            report.max_distance = report.max_distance.max(distance);
            index += 1;
        }

        info!(
            "{} translate: max {:.5} over {} samples ({} inserted)",
            link,
            report.max_distance,
            trajectory.len(),
            report.insertions
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::effective_distance;
    use lintrail_model::mock::{Aabb, GANTRY_END_EFFECTOR, GANTRY_GROUP, GantryArm};
    use lintrail_model::{Configuration, JointGroup, KinematicModel};
    use nalgebra::Point3;

    fn line(points: &[f64]) -> Trajectory {
        points
            .iter()
            .map(|x| Configuration::from([*x, 0.0, 0.0, 0.0, 0.0, 0.0]))
            .collect()
    }

    fn group(arm: &GantryArm) -> JointGroup {
        arm.joint_group(GANTRY_GROUP).unwrap()
    }

    #[test]
    fn test_conforming_trajectory_is_untouched() {
        let arm = GantryArm::new();
        let group = group(&arm);
        let interpolator = PoseInterpolator::new(&arm, &group, GANTRY_END_EFFECTOR);
        let refiner = LinkRefiner::new(&interpolator, "link_1", 0.005, 10).unwrap();

        let mut trajectory = line(&[0.0, 0.004, 0.008, 0.012]);
        let report = refiner.refine(&mut trajectory).unwrap();

        assert_eq!(report.insertions, 0);
        assert_eq!(trajectory.len(), 4);
        assert_eq!(arm.ik_calls(), 0);
    }

    #[test]
    fn test_long_segment_is_bisected() {
        let arm = GantryArm::new();
        let group = group(&arm);
        let interpolator = PoseInterpolator::new(&arm, &group, GANTRY_END_EFFECTOR);
        let refiner = LinkRefiner::new(&interpolator, "link_1", 0.005, 10).unwrap();

        // 0.016 → 4 段各 0.004
        let mut trajectory = line(&[0.0, 0.016]);
        let report = refiner.refine(&mut trajectory).unwrap();

        let xs: Vec<f64> = trajectory.iter().map(|c| c[0]).collect();
        assert_eq!(xs.len(), 5);
        for (i, x) in xs.iter().enumerate() {
            assert!((x - 0.004 * i as f64).abs() < 1e-12, "xs = {:?}", xs);
        }
        assert_eq!(report.insertions, 3);
        assert!(report.max_distance <= 0.005);
    }

    #[test]
    fn test_refined_trajectory_satisfies_threshold_and_is_idempotent() {
        let arm = GantryArm::new();
        let group = group(&arm);
        let interpolator = PoseInterpolator::new(&arm, &group, GANTRY_END_EFFECTOR);
        let refiner = LinkRefiner::new(&interpolator, GANTRY_END_EFFECTOR, 0.005, 10).unwrap();

        let mut trajectory: Trajectory = [
            Configuration::from([0.1, 0.0, 0.3, 0.0, 0.0, 0.0]),
            Configuration::from([0.13, 0.01, 0.3, 0.0, 0.1, 0.05]),
        ]
        .into_iter()
        .collect();
        refiner.refine(&mut trajectory).unwrap();

        let extent = arm.link_extent(GANTRY_END_EFFECTOR).unwrap().norm();
        for pair in trajectory.into_configurations().windows(2) {
            let a = arm.link_transform(&pair[0], GANTRY_END_EFFECTOR).unwrap();
            let b = arm.link_transform(&pair[1], GANTRY_END_EFFECTOR).unwrap();
            assert!(effective_distance(&a, &b, extent) <= 0.005);
        }

        // 再次细化不插入
        let mut again: Trajectory = [
            Configuration::from([0.1, 0.0, 0.3, 0.0, 0.0, 0.0]),
            Configuration::from([0.13, 0.01, 0.3, 0.0, 0.1, 0.05]),
        ]
        .into_iter()
        .collect();
        refiner.refine(&mut again).unwrap();
        let len = again.len();
        let report = refiner.refine(&mut again).unwrap();
        assert_eq!(report.insertions, 0);
        assert_eq!(again.len(), len);
    }

    #[test]
    fn test_unreachable_midpoint_is_unbridgeable() {
        let arm = GantryArm::new().with_unreachable(Aabb::cube(Point3::new(0.05, 0.0, 0.0), 0.001));
        let group = group(&arm);
        let interpolator = PoseInterpolator::new(&arm, &group, GANTRY_END_EFFECTOR);
        let refiner = LinkRefiner::new(&interpolator, "link_1", 0.005, 10).unwrap();

        let mut trajectory = line(&[0.0, 0.1]);
        let result = refiner.refine(&mut trajectory);

        match result {
            Err(PlannerError::TrajectoryInvalid(InvalidTrajectory::Unbridgeable { link, index })) => {
                assert_eq!(link, "link_1");
                assert_eq!(index, 0);
            },
            other => panic!("Expected unbridgeable segment, got {:?}", other),
        }
    }

    #[test]
    fn test_single_sample_trajectory() {
        let arm = GantryArm::new();
        let group = group(&arm);
        let interpolator = PoseInterpolator::new(&arm, &group, GANTRY_END_EFFECTOR);
        let refiner = LinkRefiner::new(&interpolator, "link_3", 0.005, 10).unwrap();

        let mut trajectory = line(&[0.2]);
        let report = refiner.refine(&mut trajectory).unwrap();
        assert_eq!(report.insertions, 0);
        assert_eq!(report.max_distance, 0.0);
    }
}
