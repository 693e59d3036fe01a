//! 客户端层错误类型定义

use dobot_protocol::ProtocolError;
use dobot_serial::SerialError;
use thiserror::Error;

/// 客户端层错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// 串口传输错误（打开失败、写入失败、写入超时）
    #[error("Serial transport error: {0}")]
    Serial(#[from] SerialError),

    /// 协议编码错误
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// 读取不到有效位姿（无应答或校验失败）
    #[error("Could not read pose")]
    PoseUnavailable,

    /// 会话已关闭
    #[error("Session is closed")]
    Closed,

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 客户端层 Result 类型
pub type Result<T> = std::result::Result<T, ClientError>;
