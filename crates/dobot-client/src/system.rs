//! 系统指令
//!
//! 一次性写入，不读取应答。写入成功即视为指令成功（协议没有 NACK）。

use std::time::Duration;

use dobot_protocol::{ArmEnableCommand, ClearAlarmsCommand, QueueExecCommand};
use dobot_serial::SerialTransport;
use tracing::debug;

use crate::config::TimingConfig;
use crate::error::Result;
use crate::raw_commander::RawCommander;

/// 系统指令（借用串口，无状态）
pub struct SystemCommands<'a, T: SerialTransport + ?Sized> {
    port: &'a mut T,
    timing: &'a TimingConfig,
}

impl<'a, T: SerialTransport + ?Sized> SystemCommands<'a, T> {
    pub fn new(port: &'a mut T, timing: &'a TimingConfig) -> Self {
        Self { port, timing }
    }

    /// 清除所有报警
    pub fn clear_alarms(&mut self) -> Result<()> {
        debug!("Clearing alarms");
        RawCommander::new(&mut *self.port).send(&ClearAlarmsCommand::new().to_frame())?;
        settle(self.timing.command_settle());
        Ok(())
    }

    /// 使能电机
    pub fn enable_motors(&mut self) -> Result<()> {
        debug!("Enabling motors");
        RawCommander::new(&mut *self.port).send(&ArmEnableCommand::enable().to_frame())?;
        settle(self.timing.command_settle());
        Ok(())
    }

    /// 启动指令队列
    pub fn start_queue(&mut self) -> Result<()> {
        debug!("Starting command queue");
        RawCommander::new(&mut *self.port).send(&QueueExecCommand::Start.to_frame())
    }

    /// 停止指令队列
    pub fn stop_queue(&mut self) -> Result<()> {
        debug!("Stopping command queue");
        RawCommander::new(&mut *self.port).send(&QueueExecCommand::Stop.to_frame())
    }
}

pub(crate) fn settle(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
