//! 笛卡尔路径规划演示 - Mock 龙门臂
//!
//! 这个示例展示了完整的规划流水线：
//! - 从 TOML 配置构造规划器（可选）
//! - 局部坐标系下的直线 + 旋转运动
//! - 逐连杆细化统计
//! - 碰撞检测失败时的错误分类
//!
//! # 运行
//!
//! ```bash
//! cargo run --example cartesian_demo --features mock
//! cargo run --example cartesian_demo --features mock -- planner.toml
//! RUST_LOG=lintrail_planner=debug cargo run --example cartesian_demo --features mock
//! ```

use std::sync::Arc;

use anyhow::Context;
use lintrail_sdk::model::mock::{Aabb, BoxObstacles, GANTRY_END_EFFECTOR, GantryArm};
use lintrail_sdk::prelude::*;
use nalgebra::{Point3, Translation3, UnitQuaternion};

/// 把轨迹打印到终端的消费者
struct ConsoleConsumer<'a> {
    model: &'a dyn KinematicModel,
}

impl TrajectoryConsumer for ConsoleConsumer<'_> {
    fn consume(&mut self, trajectory: Trajectory) -> Result<(), ConsumerError> {
        let waypoints = trajectory
            .waypoints(self.model, GANTRY_END_EFFECTOR)
            .map_err(|e| ConsumerError(e.to_string()))?;

        let stride = (waypoints.len() / 8).max(1);
        for (index, pose) in waypoints.iter().enumerate().step_by(stride) {
            let t = pose.translation.vector;
            println!(
                "   #{:<4} ({:.4}, {:.4}, {:.4})  {}",
                index, t.x, t.y, t.z, trajectory[index]
            );
        }
        println!("   ... {} samples delivered", waypoints.len());
        Ok(())
    }
}

fn load_config() -> anyhow::Result<PlannerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let settings = PlannerSettings::load_from_file(&path)
                .with_context(|| format!("failed to load settings from {}", path))?;
            Ok(PlannerConfig::from(settings))
        },
        None => Ok(PlannerConfig::default().with_frame(Frame::Local)),
    }
}

fn main() -> anyhow::Result<()> {
    lintrail_sdk::logging::init();

    println!("📐 Lintrail - Cartesian Path Demo");
    println!("=================================\n");

    let arm = Arc::new(GantryArm::new());
    let start = Configuration::from([0.1, 0.0, 0.3, 0.0, 0.0, 0.0]);
    let config = load_config()?;

    println!("🎯 配置:");
    println!("   - 坐标系: {:?}", config.frame);
    println!("   - 标准步长: {} m", config.standard_step);
    println!("   - 临界距离: {} m", config.critical_distance);
    println!("   - 最大尝试次数: {}", config.max_attempts);
    println!();

    // 1. 无障碍场景：沿局部 X 前进 0.3 米并绕 Z 转 0.4 弧度
    let planner = CartesianPlanner::new(arm.clone(), Arc::new(BoxObstacles::empty()), config.clone())?;
    let goal = Transform::from_parts(
        Translation3::new(0.3, 0.0, -0.1),
        UnitQuaternion::from_euler_angles(0.0, 0.0, 0.4),
    );

    println!("▶️  规划无障碍路径...\n");
    let mut consumer = ConsoleConsumer {
        model: arm.as_ref(),
    };
    let report = planner.plan_and_deliver(&start, &goal, &mut consumer)?;

    println!("\n📊 细化统计:");
    for link in &report.links {
        println!(
            "   - {}: 插入 {} 个样本, 最大位移 {:.5} m",
            link.link, link.insertions, link.max_distance
        );
    }
    println!("   - 总样本数: {}", report.samples);
    println!();

    // 2. 路径中间放一个障碍物
    let obstacle = Aabb::cube(Point3::new(0.25, 0.0, 0.25), 0.02);
    let blocked = CartesianPlanner::new(
        arm.clone(),
        Arc::new(BoxObstacles::new(vec![obstacle])),
        config,
    )?;

    println!("▶️  规划穿过障碍物的路径...\n");
    match blocked.plan(&start, &goal) {
        Ok(plan) => println!("   ⚠️  意外成功: {} samples", plan.trajectory.len()),
        Err(e) => println!("   ❌ {:?} 检查失败: {}", e.check(), e),
    }

    println!("\n✅ Demo 完成");
    Ok(())
}
