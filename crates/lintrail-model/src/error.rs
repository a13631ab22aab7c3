//! 模型层错误类型定义

use thiserror::Error;

/// 运动学模型错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// 模型中不存在该连杆
    #[error("Unknown link: {0}")]
    UnknownLink(String),

    /// 模型中不存在该关节组
    #[error("Unknown joint group: {0}")]
    UnknownGroup(String),

    /// 位形的关节数与模型不一致
    #[error("Joint count mismatch: expected {expected}, got {actual}")]
    JointCountMismatch { expected: usize, actual: usize },
}

/// 轨迹消费者（显示 / 执行）返回的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Trajectory consumer failed: {0}")]
pub struct ConsumerError(pub String);

impl From<&str> for ConsumerError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}
