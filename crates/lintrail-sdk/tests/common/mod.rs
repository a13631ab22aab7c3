//! 集成测试共享辅助
//!
//! - [`CuspArm`]: 在龙门臂上构造一个逆解不连续的连杆
//! - 轨迹断言：阈值后置条件、原始样本保序

#![allow(dead_code)]

use lintrail_model::mock::GantryArm;
use lintrail_model::{
    Configuration, IkRequest, JointGroup, KinematicModel, ModelError, Trajectory, Transform,
};
use lintrail_planner::LinkMetric;
use nalgebra::{Translation3, Vector3};

/// 默认起始位形（末端位于 (0.1, 0, 0.2)，无旋转）
pub const START: [f64; 6] = [0.1, 0.0, 0.2, 0.0, 0.0, 0.0];

/// 每次二分距离缩小 10% 的指数：`0.5^p = 0.9`
pub fn cusp_exponent() -> f64 {
    0.9f64.ln() / 0.5f64.ln()
}

/// 在 `x = origin` 处有尖点的龙门臂
///
/// `link` 的 x 平移被替换为 `sign(x − origin)·|x − origin|^p`，
/// 越靠近尖点细分越不收敛：每次二分后距离只缩小 10%。
/// 其余连杆、IK 与碰撞几何体全部委托给内部的 [`GantryArm`]。
pub struct CuspArm {
    inner: GantryArm,
    link: String,
    origin: f64,
    exponent: f64,
}

impl CuspArm {
    pub fn new(link: &str, origin: f64) -> Self {
        Self {
            inner: GantryArm::new(),
            link: link.to_string(),
            origin,
            exponent: cusp_exponent(),
        }
    }
}

impl KinematicModel for CuspArm {
    fn base_link(&self) -> &str {
        self.inner.base_link()
    }

    fn controlled_links(&self) -> Vec<String> {
        self.inner.controlled_links()
    }

    fn joint_group(&self, name: &str) -> Result<JointGroup, ModelError> {
        self.inner.joint_group(name)
    }

    fn link_transform(&self, config: &Configuration, link: &str) -> Result<Transform, ModelError> {
        let transform = self.inner.link_transform(config, link)?;
        if link != self.link {
            return Ok(transform);
        }
        let offset = config[0] - self.origin;
        let x = offset.signum() * offset.abs().powf(self.exponent);
        let mut translation = transform.translation.vector;
        translation.x = x;
        Ok(Transform::from_parts(
            Translation3::from(translation),
            transform.rotation,
        ))
    }

    fn link_extent(&self, link: &str) -> Result<Vector3<f64>, ModelError> {
        self.inner.link_extent(link)
    }

    fn solve_ik(&self, request: &IkRequest<'_>) -> Option<Configuration> {
        self.inner.solve_ik(request)
    }
}

/// 断言每个连杆在相邻样本之间的有效位移不超过 `critical`
pub fn assert_within_threshold(
    model: &dyn KinematicModel,
    links: &[String],
    trajectory: &Trajectory,
    critical: f64,
) {
    let samples: Vec<&Configuration> = trajectory.iter().collect();
    for link in links {
        let metric = LinkMetric::new(model, link).expect("link has geometry");
        for (index, pair) in samples.windows(2).enumerate() {
            let distance = metric.distance(pair[0], pair[1]).expect("link transform");
            assert!(
                distance <= critical,
                "{} moves {:.6} at segment {} (critical {})",
                link,
                distance,
                index,
                critical
            );
        }
    }
}

/// `original` 是否按顺序出现在 `refined` 中（子序列）
pub fn is_ordered_subsequence(original: &[Configuration], refined: &[Configuration]) -> bool {
    let mut remaining = refined.iter();
    original
        .iter()
        .all(|sample| remaining.any(|candidate| candidate == sample))
}
