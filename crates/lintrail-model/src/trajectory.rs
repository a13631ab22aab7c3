//! 轨迹与只读快照
//!
//! # 所有权规则
//!
//! - 轨迹只支持两种修改：尾部追加（`push`）和在两个相邻样本之间插入
//!   （`insert_before`）。不提供删除与重排。
//! - 样本以 `Arc<Configuration>` 存储，`snapshot()` 只复制指针，
//!   快照与后续插入互不影响，碰撞检测线程可以在细化线程修改轨迹的同时读取快照。

use crate::configuration::Configuration;
use crate::error::ModelError;
use crate::frame::Transform;
use crate::traits::KinematicModel;
use std::ops::Index;
use std::sync::Arc;

/// 有序轨迹（时间顺序）
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    samples: Vec<Arc<Configuration>>,
}

impl Trajectory {
    /// 创建空轨迹
    pub fn new() -> Self {
        Self::default()
    }

    /// 在尾部追加样本
    pub fn push(&mut self, config: Configuration) {
        self.samples.push(Arc::new(config));
    }

    /// 在 `index` 处的样本之前插入新样本
    ///
    /// 新样本必须位于 `index - 1` 与 `index` 两个样本之间，
    /// 因此 `index` 必须满足 `0 < index < len`。
    ///
    /// # Panics
    ///
    /// `index` 越界时 panic。
    pub fn insert_before(&mut self, index: usize, config: Configuration) {
        assert!(
            index > 0 && index < self.samples.len(),
            "insert index {} must lie strictly inside trajectory of length {}",
            index,
            self.samples.len()
        );
        self.samples.insert(index, Arc::new(config));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Configuration> {
        self.samples.get(index).map(|sample| sample.as_ref())
    }

    pub fn first(&self) -> Option<&Configuration> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&Configuration> {
        self.samples.last().map(|sample| sample.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.samples.iter().map(|sample| sample.as_ref())
    }

    /// 获取当前轨迹的不可变快照
    pub fn snapshot(&self) -> TrajectorySnapshot {
        TrajectorySnapshot {
            samples: self.samples.iter().cloned().collect(),
        }
    }

    /// 计算每个样本中某连杆的全局位姿（用于显示路径线）
    pub fn waypoints(
        &self,
        model: &dyn KinematicModel,
        link: &str,
    ) -> Result<Vec<Transform>, ModelError> {
        self.iter()
            .map(|config| model.link_transform(config, link))
            .collect()
    }

    /// 取出所有位形
    pub fn into_configurations(self) -> Vec<Configuration> {
        self.samples.into_iter().map(Arc::unwrap_or_clone).collect()
    }
}

impl FromIterator<Configuration> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Configuration>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl Index<usize> for Trajectory {
    type Output = Configuration;

    fn index(&self, index: usize) -> &Configuration {
        &self.samples[index]
    }
}

/// 轨迹的只读快照
///
/// 克隆成本为一次原子引用计数增加。
#[derive(Debug, Clone)]
pub struct TrajectorySnapshot {
    samples: Arc<[Arc<Configuration>]>,
}

impl TrajectorySnapshot {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Configuration> {
        self.samples.get(index).map(|sample| sample.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.samples.iter().map(|sample| sample.as_ref())
    }
}
