//! Trajectory Builder - 轨迹构建器
//!
//! 包装一次顶层插值调用，输出从起始位形到目标位姿的有序轨迹。

use crate::config::check_positive;
use crate::error::{InterpolationFailure, PlannerError};
use crate::interpolate::PoseInterpolator;
use lintrail_model::{Configuration, Frame, Trajectory, Transform};
use tracing::{debug, error};

/// 计算步数时扣除的容差（步），避免 `0.5 / 0.01` 之类的浮点噪声多出一步
const STEP_COUNT_TOLERANCE: f64 = 1.0e-9;

/// 判定目标与起点重合的容差（米 / 弧度）
const COINCIDENT_TOLERANCE: f64 = 1.0e-9;

/// 默认插值步数：`ceil(‖p1 − p0‖ / standard_step)`
pub fn default_steps(start: &Transform, target: &Transform, standard_step: f64) -> usize {
    let distance = (target.translation.vector - start.translation.vector).norm();
    let steps = (distance / standard_step - STEP_COUNT_TOLERANCE).ceil();
    if steps > 0.0 { steps as usize } else { 0 }
}

/// 两个位姿是否重合
pub fn is_coincident(a: &Transform, b: &Transform) -> bool {
    (a.translation.vector - b.translation.vector).norm() <= COINCIDENT_TOLERANCE
        && a.rotation.angle_to(&b.rotation) <= COINCIDENT_TOLERANCE
}

/// 轨迹构建器（链式构造）
///
/// # Example
///
/// ```no_run
/// # use lintrail_planner::{PoseInterpolator, TrajectoryBuilder};
/// # use lintrail_model::{Configuration, Frame, Transform};
/// # fn demo(interpolator: &PoseInterpolator<'_>, start: &Configuration) {
/// let trajectory = TrajectoryBuilder::new(Transform::translation(-0.4, 0.0, -0.5))
///     .frame(Frame::Local)
///     .standard_step(0.01)
///     .build(interpolator, start)
///     .unwrap();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrajectoryBuilder {
    goal: Transform,
    frame: Frame,
    steps: Option<usize>,
    standard_step: f64,
}

impl TrajectoryBuilder {
    /// 创建 Builder（默认全局坐标系，步长 0.01 米）
    pub fn new(goal: Transform) -> Self {
        Self {
            goal,
            frame: Frame::Global,
            steps: None,
            standard_step: lintrail_tools::settings::DEFAULT_STANDARD_STEP,
        }
    }

    /// 目标位姿的参考坐标系
    pub fn frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// 显式指定插值步数（不指定时按标准步长计算）
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// 标准插值步长（米）
    pub fn standard_step(mut self, step: f64) -> Self {
        self.standard_step = step;
        self
    }

    /// 构建轨迹
    ///
    /// 插值序列之后追加一次目标位姿本身的求解（目标与起点重合时除外），
    /// 因此轨迹总是以目标结束。
    ///
    /// # 错误
    ///
    /// - 标准步长不是正的有限值：[`PlannerError::Config`]
    /// - 任何一次 IK 失败：[`PlannerError::Interpolation`]，不产生轨迹
    pub fn build(
        &self,
        interpolator: &PoseInterpolator<'_>,
        start: &Configuration,
    ) -> Result<Trajectory, PlannerError> {
        check_positive("standard_step", self.standard_step)?;
        let start_pose = interpolator.end_effector_pose(start)?;
        let target = self.frame.resolve(&start_pose, &self.goal);
        let steps = self
            .steps
            .unwrap_or_else(|| default_steps(&start_pose, &target, self.standard_step));
        debug!("Interpolating {} steps toward goal ({:?} frame)", steps, self.frame);

        let sequence = interpolator.interpolate(start, &self.goal, self.frame, steps)?;
        let mut trajectory: Trajectory = sequence.into_iter().collect();

        if !is_coincident(&start_pose, &target) {
            match interpolator.solve(&target, trajectory.last()) {
                Some(config) => trajectory.push(config),
                None => {
                    error!("Cannot create whole path: goal pose has no IK solution");
                    return Err(InterpolationFailure {
                        step: steps.saturating_add(1),
                        target,
                    }
                    .into());
                },
            }
        }

        Ok(trajectory)
    }
}
