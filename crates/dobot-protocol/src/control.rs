//! 控制帧结构体定义
//!
//! 包含所有指令帧的结构体，提供构建指令的方法和转换为 `Frame` 的方法。
//!
//! 运动类指令（PTP、CP、等待、运动参数）固定使用 `Control::Queued`，
//! 保证设备按提交顺序执行，而不是打断正在执行的运动。

use crate::f32_to_bytes_le;
use crate::frame::Frame;
use crate::ids::{CommandId, Control, PtpMode};
use crate::u32_to_bytes_le;

fn f32_params(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|&v| f32_to_bytes_le(v)).collect()
}

// ============================================================================
// 系统指令
// ============================================================================

/// 清除所有报警指令 (20)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearAlarmsCommand {
    pub control: Control,
}

impl ClearAlarmsCommand {
    /// 立即执行版本（面向用户的系统指令）
    pub fn new() -> Self {
        Self {
            control: Control::Immediate,
        }
    }

    /// 指定控制字节
    pub fn with_control(control: Control) -> Self {
        Self { control }
    }

    /// 转换为帧
    pub fn to_frame(self) -> Frame {
        Frame::new(CommandId::ClearAllAlarmsState, self.control, Vec::new())
    }
}

impl Default for ClearAlarmsCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// 电机使能/失能指令 (19)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmEnableCommand {
    pub enable: bool, // Byte 0: 1 = 使能, 0 = 失能
    pub control: Control,
}

impl ArmEnableCommand {
    /// 创建使能指令
    pub fn enable() -> Self {
        Self {
            enable: true,
            control: Control::Immediate,
        }
    }

    /// 创建失能指令
    pub fn disable() -> Self {
        Self {
            enable: false,
            control: Control::Immediate,
        }
    }

    /// 指定控制字节
    pub fn with_control(mut self, control: Control) -> Self {
        self.control = control;
        self
    }

    /// 转换为帧
    pub fn to_frame(self) -> Frame {
        Frame::new(
            CommandId::SetArmEnabled,
            self.control,
            vec![self.enable as u8],
        )
    }
}

/// 指令队列启停 (240 / 241)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueExecCommand {
    Start,
    Stop,
}

impl QueueExecCommand {
    /// 转换为帧（立即执行）
    pub fn to_frame(self) -> Frame {
        let id = match self {
            QueueExecCommand::Start => CommandId::SetQueuedCmdStartExec,
            QueueExecCommand::Stop => CommandId::SetQueuedCmdStopExec,
        };
        Frame::new(id, Control::Immediate, Vec::new())
    }
}

// ============================================================================
// 运动参数指令
// ============================================================================

/// PTP 公共速度/加速度参数 (83)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtpCommonParams {
    pub velocity: f32,     // Byte 0-3
    pub acceleration: f32, // Byte 4-7
}

impl PtpCommonParams {
    pub fn new(velocity: f32, acceleration: f32) -> Self {
        Self {
            velocity,
            acceleration,
        }
    }

    /// 转换为帧
    pub fn to_frame(self) -> Frame {
        Frame::new(
            CommandId::SetPtpCommonParams,
            Control::Queued,
            f32_params(&[self.velocity, self.acceleration]),
        )
    }
}

/// PTP 坐标轴速度/加速度参数 (81)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtpCoordinateParams {
    pub velocity: f32,
    pub acceleration: f32,
}

impl PtpCoordinateParams {
    pub fn new(velocity: f32, acceleration: f32) -> Self {
        Self {
            velocity,
            acceleration,
        }
    }

    pub fn to_frame(self) -> Frame {
        Frame::new(
            CommandId::SetPtpCoordinateParams,
            Control::Queued,
            f32_params(&[self.velocity, self.acceleration]),
        )
    }
}

/// PTP 门型运动参数 (82)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtpJumpParams {
    pub jump_height: f32,
    pub z_limit: f32,
}

impl PtpJumpParams {
    pub fn new(jump_height: f32, z_limit: f32) -> Self {
        Self {
            jump_height,
            z_limit,
        }
    }

    pub fn to_frame(self) -> Frame {
        Frame::new(
            CommandId::SetPtpJumpParams,
            Control::Queued,
            f32_params(&[self.jump_height, self.z_limit]),
        )
    }
}

// ============================================================================
// 运动指令
// ============================================================================

/// 点到点运动指令 (84)
///
/// 参数布局：`[mode] ‖ x ‖ y ‖ z ‖ r`（每个坐标为小端 f32，共 17 字节）。
/// 控制字节固定为 `Control::Queued`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtpCommand {
    pub mode: PtpMode,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
}

impl PtpCommand {
    pub fn new(mode: PtpMode, x: f32, y: f32, z: f32, r: f32) -> Self {
        Self { mode, x, y, z, r }
    }

    /// 直线插补
    pub fn linear(x: f32, y: f32, z: f32, r: f32) -> Self {
        Self::new(PtpMode::MovlXyz, x, y, z, r)
    }

    /// 关节插补
    pub fn joint(x: f32, y: f32, z: f32, r: f32) -> Self {
        Self::new(PtpMode::MovjXyz, x, y, z, r)
    }

    /// 转换为帧
    pub fn to_frame(self) -> Frame {
        let mut params = Vec::with_capacity(17);
        params.push(u8::from(self.mode));
        params.extend(f32_params(&[self.x, self.y, self.z, self.r]));
        Frame::new(CommandId::SetPtpCmd, Control::Queued, params)
    }
}

/// 连续轨迹运动指令 (91)
///
/// 参数布局：`[1] ‖ x ‖ y ‖ z ‖ [0]`（共 14 字节）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpCommand {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CpCommand {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_frame(self) -> Frame {
        let mut params = Vec::with_capacity(14);
        params.push(0x01);
        params.extend(f32_params(&[self.x, self.y, self.z]));
        params.push(0x00);
        Frame::new(CommandId::SetCpCmd, Control::Queued, params)
    }
}

/// 队列延时指令 (110)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitCommand {
    pub millis: u32, // Byte 0-3: 小端 u32
}

impl WaitCommand {
    pub fn new(millis: u32) -> Self {
        Self { millis }
    }

    pub fn to_frame(self) -> Frame {
        Frame::new(
            CommandId::SetWaitCmd,
            Control::Queued,
            u32_to_bytes_le(self.millis).to_vec(),
        )
    }
}

/// 位姿查询请求 (10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoseRequest;

impl PoseRequest {
    pub fn to_frame(self) -> Frame {
        Frame::new(CommandId::GetPose, Control::Queued, Vec::new())
    }
}
