//! Orchestrator - 规划流水线编排
//!
//! ```text
//! TrajectoryBuilder ──► for link in links_of_interest:
//!                           ┌─ validator thread: validate(snapshot)   (只读)
//!                           └─ this thread:      refine(&mut trajectory) (唯一写者)
//!                           join
//!                       final validate(trajectory)
//! ```
//!
//! 每个连杆迭代开始时取一次快照，碰撞检测线程只读快照，细化器只插入，
//! scope 结束即为同步屏障，下一个连杆的细化在本轮碰撞检测结束之后才开始。
//! 最后一个连杆细化插入的样本由收尾的一次全量检测覆盖。

use crate::builder::TrajectoryBuilder;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::interpolate::PoseInterpolator;
use crate::refine::{LinkRefiner, RefineReport};
use crate::validate::CollisionValidator;
use lintrail_model::{
    CollisionOracle, Configuration, JointGroup, KinematicModel, Trajectory, TrajectoryConsumer,
    Transform,
};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

/// 一次规划的统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanReport {
    /// 各连杆的细化结果（按处理顺序）
    pub links: Vec<RefineReport>,
    /// 最终轨迹样本数
    pub samples: usize,
    /// 收尾碰撞检测覆盖的样本数
    pub validated: usize,
}

impl PlanReport {
    /// 所有连杆插入的样本总数
    pub fn insertions(&self) -> usize {
        self.links.iter().map(|link| link.insertions).sum()
    }
}

/// 规划结果：通过全部检查的轨迹及其统计
#[derive(Debug, Clone)]
pub struct Plan {
    pub trajectory: Trajectory,
    pub report: PlanReport,
}

/// 笛卡尔路径规划器
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use lintrail_planner::{CartesianPlanner, PlannerConfig, PlannerError};
/// # use lintrail_model::{CollisionOracle, Configuration, Frame, KinematicModel, Transform};
/// # fn demo(
/// #     model: Arc<dyn KinematicModel>,
/// #     oracle: Arc<dyn CollisionOracle>,
/// #     start: &Configuration,
/// # ) -> Result<(), PlannerError> {
/// let planner = CartesianPlanner::new(
///     model,
///     oracle,
///     PlannerConfig::default().with_frame(Frame::Local),
/// )?;
/// let plan = planner.plan(start, &Transform::translation(-0.4, 0.0, -0.5))?;
/// println!("{} samples", plan.trajectory.len());
/// # Ok(())
/// # }
/// ```
pub struct CartesianPlanner {
    model: Arc<dyn KinematicModel>,
    oracle: Arc<dyn CollisionOracle>,
    config: PlannerConfig,
    group: JointGroup,
    links: Vec<String>,
}

impl CartesianPlanner {
    /// 创建规划器
    ///
    /// 校验配置，查找规划组，并确认每个待细化连杆都有碰撞几何尺寸。
    pub fn new(
        model: Arc<dyn KinematicModel>,
        oracle: Arc<dyn CollisionOracle>,
        config: PlannerConfig,
    ) -> Result<Self, PlannerError> {
        config.validate()?;
        let group = model.joint_group(&config.planning_group)?;

        let links: Vec<String> = if config.links.is_empty() {
            let base = model.base_link();
            model
                .controlled_links()
                .into_iter()
                .filter(|link| link != base)
                .collect()
        } else {
            config.links.clone()
        };
        for link in &links {
            model.link_extent(link)?;
        }

        info!(
            "CartesianPlanner ready: group '{}' ({} joints), end effector '{}', {} links of interest",
            group.name,
            group.dof(),
            config.end_effector,
            links.len()
        );
        Ok(Self {
            model,
            oracle,
            config,
            group,
            links,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn model(&self) -> &dyn KinematicModel {
        self.model.as_ref()
    }

    pub fn group(&self) -> &JointGroup {
        &self.group
    }

    /// 需要细化的连杆（按处理顺序）
    pub fn links_of_interest(&self) -> &[String] {
        &self.links
    }

    /// 按配置构造的插值器
    pub fn interpolator(&self) -> PoseInterpolator<'_> {
        PoseInterpolator::new(self.model.as_ref(), &self.group, &self.config.end_effector)
            .with_timeout(self.config.ik_timeout)
    }

    /// 按配置（坐标系、步长）构造的轨迹构建器
    pub fn builder(&self, goal: Transform) -> TrajectoryBuilder {
        TrajectoryBuilder::new(goal)
            .frame(self.config.frame)
            .standard_step(self.config.standard_step)
    }

    /// 只构建插值轨迹（不细化、不做碰撞检测）
    pub fn build_trajectory(
        &self,
        start: &Configuration,
        goal: &Transform,
    ) -> Result<Trajectory, PlannerError> {
        self.builder(*goal).build(&self.interpolator(), start)
    }

    /// 完整规划：构建 → 逐连杆细化 + 碰撞检测
    pub fn plan(&self, start: &Configuration, goal: &Transform) -> Result<Plan, PlannerError> {
        self.plan_with(start, &self.builder(*goal))
    }

    /// 使用自定义构建器（坐标系、步数）完成规划
    pub fn plan_with(
        &self,
        start: &Configuration,
        builder: &TrajectoryBuilder,
    ) -> Result<Plan, PlannerError> {
        let mut trajectory = builder.build(&self.interpolator(), start)?;
        debug!("Interpolated trajectory with {} samples", trajectory.len());

        let report = self.refine_and_validate(&mut trajectory)?;
        Ok(Plan { trajectory, report })
    }

    /// 对已有轨迹逐连杆细化并做碰撞检测
    ///
    /// 每个连杆一轮：碰撞检测线程检查本轮开始时的快照，本线程同时细化该连杆；
    /// 两者都结束后才进入下一轮。同一轮两者都失败时报告碰撞。
    pub fn refine_and_validate(
        &self,
        trajectory: &mut Trajectory,
    ) -> Result<PlanReport, PlannerError> {
        let interpolator = self.interpolator();
        let validator = CollisionValidator::new(self.oracle.as_ref(), &self.group);
        let mut report = PlanReport::default();

        for link in &self.links {
            let refiner = LinkRefiner::new(
                &interpolator,
                link,
                self.config.critical_distance,
                self.config.max_attempts,
            )?;
            let snapshot = trajectory.snapshot();
            debug!("Refining {} over {} samples", link, snapshot.len());

            let (validation, refinement) = thread::scope(|scope| {
                let validation = scope.spawn(|| validator.validate(&snapshot));
                let refinement = refiner.refine(trajectory);
                (validation.join(), refinement)
            });

            let validation = validation.map_err(|_| {
                error!("Collision validation task panicked while refining {}", link);
                PlannerError::TaskPanicked
            })?;
            validation?;
            report.links.push(refinement?);
        }

        let last = validator.validate(&trajectory.snapshot())?;
        report.samples = trajectory.len();
        report.validated = last.checked;

        info!(
            "Trajectory ready: {} samples ({} inserted across {} links)",
            report.samples,
            report.insertions(),
            report.links.len()
        );
        Ok(report)
    }

    /// 规划并将通过检查的轨迹交给消费者
    ///
    /// 任何检查失败时消费者不会被调用。
    pub fn plan_and_deliver(
        &self,
        start: &Configuration,
        goal: &Transform,
        consumer: &mut dyn TrajectoryConsumer,
    ) -> Result<PlanReport, PlannerError> {
        let plan = self.plan(start, goal)?;
        consumer.consume(plan.trajectory)?;
        Ok(plan.report)
    }
}
