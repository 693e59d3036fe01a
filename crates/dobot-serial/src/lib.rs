//! # Dobot Serial Transport
//!
//! 串口传输层抽象，提供统一的字节流接口。
//!
//! 指令层只依赖 [`SerialTransport`] trait：
//! - `write()`: 写入字节，返回前等待一个固定的稳定延时（设备处理时间）
//! - `read_all()`: 非阻塞地取出当前缓冲区内的全部字节，没有数据时返回空
//! - `close()`: 释放连接，可重复调用

use thiserror::Error;

pub mod port;

pub use port::{SerialConfig, SerialPortTransport};

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockHandle, MockTransport};

/// 传输层统一错误类型
#[derive(Error, Debug)]
pub enum SerialError {
    /// 串口库错误（打开失败、参数不支持等）
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// 底层 IO 错误
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    /// 写入超时（致命，连接不可用）
    #[error("Write timeout")]
    WriteTimeout,

    /// 串口未打开或已关闭
    #[error("Serial port is not open")]
    NotOpen,
}

/// 串口传输 Trait
///
/// 单线程、同步、阻塞模型；调用方负责串行化所有指令。
/// 不做跨多次 `read_all()` 的拼包：应答必须在稳定窗口内一次到达。
pub trait SerialTransport {
    /// 写入字节
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError>;

    /// 取出当前已缓冲的全部字节（非阻塞）
    fn read_all(&mut self) -> Result<Vec<u8>, SerialError>;

    /// 关闭连接（幂等）
    fn close(&mut self);

    /// 连接是否仍然打开
    fn is_open(&self) -> bool;

    /// 清空输入/输出缓冲区
    fn clear_buffers(&mut self) -> Result<(), SerialError> {
        Ok(())
    }
}

impl<T: SerialTransport + ?Sized> SerialTransport for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        (**self).write(bytes)
    }

    fn read_all(&mut self) -> Result<Vec<u8>, SerialError> {
        (**self).read_all()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn clear_buffers(&mut self) -> Result<(), SerialError> {
        (**self).clear_buffers()
    }
}
