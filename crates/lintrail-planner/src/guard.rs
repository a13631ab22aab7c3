//! Convergence Guard - 细分收敛守卫
//!
//! 每次细分后比较新距离与**上一步**的工作距离：
//!
//! - 新距离 ≤ 上一步的一半：收敛，连续失败计数清零
//! - 否则：连续失败计数加一，达到上限即判定为空间跳变
//!
//! 光滑曲线的细分距离按几何级数缩小，真实的不连续（相邻连杆奇异、
//! 中间位姿不可达）则无论细分多少次距离都不会减半。

/// 每段细分总次数上限 = `max_attempts` × 该系数
///
/// 收敛与不收敛交替出现时连续计数会被反复清零，用总次数兜底保证终止。
const SUBDIVISION_BUDGET_FACTOR: usize = 64;

/// 判定为不收敛
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diverged {
    /// 触发时连续不收敛的次数
    pub attempts: usize,
}

/// 细分收敛守卫（每段一个）
#[derive(Debug, Clone)]
pub struct ConvergenceGuard {
    max_attempts: usize,
    streak: usize,
    subdivisions: usize,
}

impl ConvergenceGuard {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            streak: 0,
            subdivisions: 0,
        }
    }

    /// 记录一次细分：`previous` 为细分前的工作距离，`current` 为细分后的距离
    pub fn observe(&mut self, previous: f64, current: f64) -> Result<(), Diverged> {
        self.subdivisions += 1;
        if current <= previous / 2.0 {
            self.streak = 0;
        } else {
            self.streak += 1;
        }

        if self.streak >= self.max_attempts
            || self.subdivisions >= self.max_attempts * SUBDIVISION_BUDGET_FACTOR
        {
            return Err(Diverged {
                attempts: self.streak,
            });
        }
        Ok(())
    }

    /// 进入新的段时重置
    pub fn reset(&mut self) {
        self.streak = 0;
        self.subdivisions = 0;
    }

    /// 当前连续不收敛次数
    pub fn streak(&self) -> usize {
        self.streak
    }
}
