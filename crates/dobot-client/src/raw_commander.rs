//! 原始指令发送器
//!
//! 短生命周期的借用包装：编码帧、写入串口，必要时读取一次应答。
//! 指令层的所有写入都经过这里，日志格式因此保持一致。

use std::time::Duration;

use dobot_protocol::Frame;
use dobot_serial::SerialTransport;
use tracing::{debug, trace};

use crate::error::Result;

/// 原始指令发送器
pub struct RawCommander<'a, T: SerialTransport + ?Sized> {
    port: &'a mut T,
}

impl<'a, T: SerialTransport + ?Sized> RawCommander<'a, T> {
    pub fn new(port: &'a mut T) -> Self {
        Self { port }
    }

    /// 编码并写入一帧（不读取应答）
    pub fn send(&mut self, frame: &Frame) -> Result<()> {
        let bytes = frame.encode()?;
        debug!(
            "Sending command {} (ctrl={}, {} param bytes)",
            frame.command_id,
            frame.control,
            frame.params.len()
        );
        self.port.write(&bytes)?;
        Ok(())
    }

    /// 写入一帧，等待 `settle` 后读取并解码应答
    ///
    /// 没有数据或数据无法解码时返回 `Ok(None)`，失败原因记录在 trace 日志中。
    pub fn request(&mut self, frame: &Frame, settle: Duration) -> Result<Option<Frame>> {
        self.send(frame)?;
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }

        let rx = self.port.read_all()?;
        match Frame::try_decode(&rx) {
            Ok(reply) => Ok(Some(reply)),
            Err(e) => {
                trace!("No valid reply to command {}: {} ({} bytes)", frame.command_id, e, rx.len());
                Ok(None)
            },
        }
    }
}
