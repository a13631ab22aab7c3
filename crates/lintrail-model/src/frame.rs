//! 位姿与参考坐标系

use nalgebra::Isometry3;

/// 刚体位姿（旋转 + 平移），由运动学模型根据位形计算得到
pub type Transform = Isometry3<f64>;

/// 目标位姿的参考坐标系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Frame {
    /// 目标位姿位于全局（模型）坐标系
    #[default]
    Global,
    /// 目标位姿相对于当前末端执行器位姿
    Local,
}

impl Frame {
    /// 计算有效目标位姿
    ///
    /// - `Global`: `goal`
    /// - `Local`: `current ∘ goal`
    pub fn resolve(self, current: &Transform, goal: &Transform) -> Transform {
        match self {
            Frame::Global => *goal,
            Frame::Local => current * goal,
        }
    }
}
