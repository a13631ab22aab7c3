//! 连杆有效位移度量
//!
//! 只看连杆原点的平移会低估绕远处转动的连杆的真实运动量，
//! 因此在平移之外加上一个扫掠项，近似连杆最远几何点划过的弧长：
//!
//! ```text
//! diag     = ‖extent‖
//! θ        = angle(R_a, R_b)                    (最短旋转，弧度)
//! sweep    = (‖p_a‖ + diag) · sin θ
//! distance = ‖p_a − p_b‖ + sweep
//! ```

use lintrail_model::{Configuration, KinematicModel, ModelError, Transform};

/// 两个连杆位姿之间的有效位移
///
/// `diagonal` 是连杆碰撞形状包围盒的对角线长度。
pub fn effective_distance(a: &Transform, b: &Transform, diagonal: f64) -> f64 {
    let theta = a.rotation.angle_to(&b.rotation);
    let sweep = (a.translation.vector.norm() + diagonal) * theta.sin();
    (a.translation.vector - b.translation.vector).norm() + sweep
}

/// 单个连杆的位移度量
///
/// 包围盒尺寸在构造时读取一次，之后视为不变；
/// 连杆位姿每次都从位形重新计算，不做缓存。
pub struct LinkMetric<'a> {
    model: &'a dyn KinematicModel,
    link: &'a str,
    diagonal: f64,
}

impl<'a> LinkMetric<'a> {
    pub fn new(model: &'a dyn KinematicModel, link: &'a str) -> Result<Self, ModelError> {
        let extent = model.link_extent(link)?;
        Ok(Self {
            model,
            link,
            diagonal: extent.norm(),
        })
    }

    pub fn link(&self) -> &'a str {
        self.link
    }

    /// 包围盒对角线长度
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    /// 位形 `a` 到位形 `b` 之间该连杆的有效位移
    pub fn distance(&self, a: &Configuration, b: &Configuration) -> Result<f64, ModelError> {
        let from = self.model.link_transform(a, self.link)?;
        let to = self.model.link_transform(b, self.link)?;
        Ok(effective_distance(&from, &to, self.diagonal))
    }
}
