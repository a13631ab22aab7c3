//! Pose Interpolator - 位姿插值器
//!
//! 在末端执行器的起始位姿与目标位姿之间生成中间位姿，
//! 并为每个中间位姿请求外部 IK 求解器给出关节位形。
//!
//! # 算法
//!
//! 对 `i ∈ 1..=steps`，参数 `t = i / (steps + 1)`：
//!
//! ```text
//! R(t) = slerp(R0, R1, t)
//! p(t) = (1 - t)·p0 + t·p1
//! ```
//!
//! 每次求解以上一个位形为种子，使求解器优先返回最近的解，保证连续性。
//!
//! # 全有或全无
//!
//! 任意一步 IK 失败，整个调用失败，不返回部分序列：
//! 悬空的部分路径可能被调用方误当作有效轨迹。

use crate::config::ConfigError;
use crate::error::{InterpolationFailure, PlannerError};
use lintrail_model::{Configuration, Frame, IkRequest, JointGroup, KinematicModel, Transform};
use nalgebra::{Translation3, UnitQuaternion};
use std::time::Duration;
use tracing::{error, trace};

/// slerp 判定两旋转相对退化时使用的阈值
const SLERP_EPSILON: f64 = 1.0e-9;

/// 在两个位姿之间插值
///
/// 旋转使用球面线性插值，平移使用线性插值。`t` 取 `[0, 1]`。
pub fn interpolate_pose(start: &Transform, goal: &Transform, t: f64) -> Transform {
    let rotation: UnitQuaternion<f64> = start
        .rotation
        .try_slerp(&goal.rotation, t, SLERP_EPSILON)
        .unwrap_or_else(|| start.rotation.nlerp(&goal.rotation, t));
    let translation = start.translation.vector * (1.0 - t) + goal.translation.vector * t;
    Transform::from_parts(Translation3::from(translation), rotation)
}

/// 位姿插值器
///
/// 借用运动学模型和关节组，本身不持有状态，可以在一次规划中重复使用。
pub struct PoseInterpolator<'a> {
    model: &'a dyn KinematicModel,
    group: &'a JointGroup,
    tip: &'a str,
    timeout: Option<Duration>,
}

impl<'a> PoseInterpolator<'a> {
    /// 创建插值器
    ///
    /// # 参数
    ///
    /// - `model`: 运动学模型（正解 + 逆解）
    /// - `group`: IK 使用的关节组
    /// - `tip`: 末端执行器连杆
    pub fn new(model: &'a dyn KinematicModel, group: &'a JointGroup, tip: &'a str) -> Self {
        Self {
            model,
            group,
            tip,
            timeout: None,
        }
    }

    /// 设置每次 IK 求解的超时
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &'a dyn KinematicModel {
        self.model
    }

    /// 末端执行器在给定位形下的全局位姿
    pub fn end_effector_pose(&self, config: &Configuration) -> Result<Transform, PlannerError> {
        Ok(self.model.link_transform(config, self.tip)?)
    }

    /// 以 `seed` 为种子求解目标位姿
    pub fn solve(&self, target: &Transform, seed: Option<&Configuration>) -> Option<Configuration> {
        self.model.solve_ik(&IkRequest {
            group: self.group,
            tip: self.tip,
            target,
            seed,
            timeout: self.timeout,
        })
    }

    /// 生成从 `source` 出发的位形序列
    ///
    /// # 返回
    ///
    /// 长度为 `steps + 1` 的序列，第一个元素是 `source` 的副本；
    /// 参数 `t` 不会到达 1，目标位姿本身不在序列中。
    ///
    /// # 错误
    ///
    /// 任一步 IK 失败时返回 [`PlannerError::Interpolation`]，不返回部分结果；
    /// `steps + 1` 溢出时返回 [`ConfigError::TooManySteps`]。
    pub fn interpolate(
        &self,
        source: &Configuration,
        goal: &Transform,
        frame: Frame,
        steps: usize,
    ) -> Result<Vec<Configuration>, PlannerError> {
        let start_pose = self.end_effector_pose(source)?;
        let target = frame.resolve(&start_pose, goal);

        let divisions = steps.checked_add(1).ok_or(ConfigError::TooManySteps(steps))? as f64;

        let mut sequence = vec![source.clone()];
        for step in 1..=steps {
            let t = step as f64 / divisions;
            let pose = interpolate_pose(&start_pose, &target, t);

            match self.solve(&pose, sequence.last()) {
                Some(config) => {
                    if let Some(previous) = sequence.last() {
                        trace!(
                            "Step {}/{}: max joint delta {:.6}",
                            step,
                            steps,
                            config.max_joint_delta(previous)
                        );
                    }
                    sequence.push(config);
                },
                None => {
                    error!(
                        "Cannot create whole path: no IK solution at step {}/{} (t = {:.3})",
                        step, steps, t
                    );
                    return Err(InterpolationFailure { step, target: pose }.into());
                },
            }
        }

        Ok(sequence)
    }

    /// 在 `a` 与 `b` 之间求一个中点位形
    ///
    /// 等价于以 `b` 的末端位姿为全局目标、步数为 1 的 [`interpolate`](Self::interpolate)，
    /// 只返回新生成的样本。
    pub fn midpoint(
        &self,
        a: &Configuration,
        b: &Configuration,
    ) -> Result<Configuration, PlannerError> {
        let goal = self.end_effector_pose(b)?;
        let mut sequence = self.interpolate(a, &goal, Frame::Global, 1)?;
        // 成功时长度恒为 steps + 1 = 2
        Ok(sequence.swap_remove(1))
    }
}
