//! # 运动指令
//!
//! 所有运动指令与运动参数指令都使用 `Control::Queued`，在设备队列中按提交顺序执行。
//! 写入成功不代表运动完成：需要等待时由 [`MotionMonitor`] 轮询位姿推断。

use std::fmt;
use std::time::Duration;

use dobot_protocol::{
    CpCommand, Frame, Pose, PtpCommand, PtpCommonParams, PtpCoordinateParams, PtpJumpParams,
    PtpMode, WaitCommand,
};
use dobot_serial::SerialTransport;
use tracing::{debug, info, warn};

use crate::config::{CartesianPoint, SessionConfig};
use crate::error::{ClientError, Result};
use crate::monitor::{Completion, MotionMonitor};
use crate::pose::query_pose;
use crate::raw_commander::RawCommander;
use crate::system::settle;

/// 点动轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    R,
}

impl Axis {
    /// 解析轴名（不区分大小写），未知轴名返回 `None`
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            "r" => Some(Axis::R),
            _ => None,
        }
    }

    /// 对位姿的对应坐标加上 `delta`
    pub fn offset(self, pose: &mut Pose, delta: f32) {
        match self {
            Axis::X => pose.x += delta,
            Axis::Y => pose.y += delta,
            Axis::Z => pose.z += delta,
            Axis::R => pose.r += delta,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::R => "r",
        };
        f.write_str(name)
    }
}

/// 运动指令（借用串口，无状态）
pub struct MotionCommands<'a, T: SerialTransport + ?Sized> {
    port: &'a mut T,
    config: &'a SessionConfig,
}

impl<'a, T: SerialTransport + ?Sized> MotionCommands<'a, T> {
    pub fn new(port: &'a mut T, config: &'a SessionConfig) -> Self {
        Self { port, config }
    }

    fn send(&mut self, frame: &Frame) -> Result<()> {
        RawCommander::new(&mut *self.port).send(frame)
    }

    // ==================== 运动参数 ====================

    /// 设置 PTP 公共速度/加速度
    pub fn set_motion_params(&mut self, velocity: f32, acceleration: f32) -> Result<()> {
        debug!("Setting motion params: v={} a={}", velocity, acceleration);
        self.send(&PtpCommonParams::new(velocity, acceleration).to_frame())?;
        settle(self.config.timing.command_settle());
        Ok(())
    }

    /// 设置 PTP 坐标轴速度/加速度
    pub fn set_ptp_coordinate_params(&mut self, velocity: f32, acceleration: f32) -> Result<()> {
        self.send(&PtpCoordinateParams::new(velocity, acceleration).to_frame())?;
        settle(self.config.timing.command_settle());
        Ok(())
    }

    /// 设置门型运动参数
    pub fn set_ptp_jump_params(&mut self, jump_height: f32, z_limit: f32) -> Result<()> {
        self.send(&PtpJumpParams::new(jump_height, z_limit).to_frame())?;
        settle(self.config.timing.command_settle());
        Ok(())
    }

    /// 下发全部运动参数（公共、坐标轴、门型），取值来自 `MotionConfig`
    pub fn initialize_parameters(&mut self) -> Result<()> {
        let motion = &self.config.motion;
        let (velocity, acceleration) = (motion.velocity, motion.acceleration);
        let (coord_v, coord_a) = (motion.coordinate_velocity, motion.coordinate_acceleration);
        let (jump_height, z_limit) = (motion.jump_height, motion.jump_z_limit);

        self.set_motion_params(velocity, acceleration)?;
        self.set_ptp_coordinate_params(coord_v, coord_a)?;
        self.set_ptp_jump_params(jump_height, z_limit)?;
        Ok(())
    }

    // ==================== 运动 ====================

    /// 点到点运动
    ///
    /// `wait = true` 时阻塞直到 [`MotionMonitor`] 判定完成，并返回判定结果。
    pub fn move_point_to_point(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        r: f32,
        mode: PtpMode,
        wait: bool,
    ) -> Result<Option<Completion>> {
        debug!("PTP {:?} to ({:.2}, {:.2}, {:.2}, {:.2})", mode, x, y, z, r);
        self.send(&PtpCommand::new(mode, x, y, z, r).to_frame())?;
        self.finish(wait)
    }

    /// 点到点运动到指定坐标点
    pub fn move_to_point(
        &mut self,
        point: CartesianPoint,
        mode: PtpMode,
        wait: bool,
    ) -> Result<Option<Completion>> {
        self.move_point_to_point(point.x, point.y, point.z, point.r, mode, wait)
    }

    /// 连续轨迹运动
    pub fn move_continuous_path(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        wait: bool,
    ) -> Result<Option<Completion>> {
        debug!("CP to ({:.2}, {:.2}, {:.2})", x, y, z);
        self.send(&CpCommand::new(x, y, z).to_frame())?;
        self.finish(wait)
    }

    /// 点动：在当前位姿的某个轴上移动 `direction × speed`
    ///
    /// 未知轴名不改变位姿（仍然下发一次到当前位姿的直线运动）。
    ///
    /// # Errors
    /// - `ClientError::PoseUnavailable`: 读取不到当前位姿
    pub fn jog(&mut self, axis: &str, direction: f32, speed: f32) -> Result<Completion> {
        let mut pose = self.get_pose()?.ok_or(ClientError::PoseUnavailable)?;

        match Axis::parse(axis) {
            Some(parsed) => parsed.offset(&mut pose, direction * speed),
            None => warn!("Unknown jog axis '{}', pose unchanged", axis),
        }

        self.move_point_to_point(
            pose.x,
            pose.y,
            pose.z,
            pose.r,
            PtpMode::MovlXyz,
            false,
        )?;
        self.wait_for_motion()
    }

    /// 队列延时：设备队列插入等待，同时在本地阻塞相同时长
    pub fn wait(&mut self, millis: u32) -> Result<()> {
        debug!("Queued wait {} ms", millis);
        self.send(&WaitCommand::new(millis).to_frame())?;
        settle(Duration::from_millis(u64::from(millis)));
        Ok(())
    }

    /// 回零
    ///
    /// 先直线运动到安全中间点（总是等待完成），再关节插补到最终位姿。
    pub fn home(&mut self, wait: bool) -> Result<Option<Completion>> {
        let home = &self.config.home;
        let (approach, target) = (home.approach, home.home);

        info!("Homing via ({:.1}, {:.1}, {:.1})", approach.x, approach.y, approach.z);
        self.move_to_point(approach, PtpMode::MovlXyz, true)?;
        self.move_to_point(target, PtpMode::MovjXyz, wait)
    }

    // ==================== 查询 ====================

    /// 查询实时位姿
    pub fn get_pose(&mut self) -> Result<Option<Pose>> {
        query_pose(&mut *self.port, self.config.timing.pose_settle())
    }

    /// 阻塞等待当前运动完成
    pub fn wait_for_motion(&mut self) -> Result<Completion> {
        let monitor = MotionMonitor::new(self.config.monitor.clone());
        let settle = self.config.timing.pose_settle();
        let port = &mut *self.port;
        monitor.wait_for_completion(|| query_pose(&mut *port, settle))
    }

    fn finish(&mut self, wait: bool) -> Result<Option<Completion>> {
        if wait {
            self.wait_for_motion().map(Some)
        } else {
            Ok(None)
        }
    }
}
