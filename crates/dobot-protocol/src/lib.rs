//! # Dobot Protocol
//!
//! 机械臂串口协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `ids`: 指令 ID、控制字节、PTP 运动模式
//! - `constants`: 协议常量定义
//! - `frame`: 帧编码/解码与校验和
//! - `control`: 控制帧构建
//! - `feedback`: 反馈帧解析（位姿）
//!
//! ## 字节序
//!
//! 协议参数使用小端字节序（坐标/速度为 `f32`，等待时长为 `u32`）。
//! 本模块提供了字节序转换工具函数。

pub mod constants;
pub mod control;
pub mod feedback;
pub mod frame;
pub mod ids;

// 重新导出常用类型
pub use constants::*;
pub use control::*;
pub use feedback::*;
pub use frame::*;
pub use ids::*;

use thiserror::Error;

/// 协议解析错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid frame length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Payload too long: at most {max} parameter bytes, got {actual}")]
    PayloadTooLong { max: usize, actual: usize },

    #[error("Frame header not found")]
    HeaderNotFound,

    #[error("Truncated frame: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("Invalid value for field {field}: {value}")]
    InvalidValue { field: String, value: u8 },
}

/// 小端字节序转 f32
pub fn bytes_to_f32_le(bytes: [u8; 4]) -> f32 {
    f32::from_le_bytes(bytes)
}

/// f32 转小端字节序
pub fn f32_to_bytes_le(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}

/// u32 转小端字节序
pub fn u32_to_bytes_le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}
