//! 关节位形
//!
//! 一个 `Configuration` 是运动学模型所有可控关节在同一时刻的完整取值。
//! 构造后不可变；在轨迹中以 `Arc<Configuration>` 形式共享。

use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

/// 常见机械臂关节数不超过 8，避免堆分配
type JointVec = SmallVec<[f64; 8]>;

/// 关节位形（弧度 / 米，取决于关节类型）
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    positions: JointVec,
}

impl Configuration {
    /// 从关节值序列创建
    pub fn new(positions: impl IntoIterator<Item = f64>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// 从切片创建
    pub fn from_slice(positions: &[f64]) -> Self {
        Self {
            positions: SmallVec::from_slice(positions),
        }
    }

    /// 关节值
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// 关节数量
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, joint_index: usize) -> Option<f64> {
        self.positions.get(joint_index).copied()
    }

    /// 两个位形之间单关节的最大差值
    ///
    /// 关节数不一致时返回 `f64::INFINITY`。
    pub fn max_joint_delta(&self, other: &Configuration) -> f64 {
        if self.len() != other.len() {
            return f64::INFINITY;
        }
        self.positions
            .iter()
            .zip(other.positions.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl<const N: usize> From<[f64; N]> for Configuration {
    fn from(positions: [f64; N]) -> Self {
        Self::from_slice(&positions)
    }
}

impl From<Vec<f64>> for Configuration {
    fn from(positions: Vec<f64>) -> Self {
        Self::new(positions)
    }
}

impl Index<usize> for Configuration {
    type Output = f64;

    fn index(&self, joint_index: usize) -> &f64 {
        &self.positions[joint_index]
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.positions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", value)?;
        }
        write!(f, "]")
    }
}
