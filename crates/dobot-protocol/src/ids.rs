//! 指令 ID 与控制字节定义
//!
//! 指令 ID 采用 Dobot Magician 串口协议编号。

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ProtocolError;

/// 指令 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CommandId {
    /// 查询实时位姿
    GetPose = 10,
    /// 电机使能
    SetArmEnabled = 19,
    /// 清除所有报警
    ClearAllAlarmsState = 20,
    /// PTP 坐标轴速度/加速度
    SetPtpCoordinateParams = 81,
    /// PTP 门型运动参数
    SetPtpJumpParams = 82,
    /// PTP 公共速度/加速度
    SetPtpCommonParams = 83,
    /// 点到点运动
    SetPtpCmd = 84,
    /// 连续轨迹运动
    SetCpCmd = 91,
    /// 队列延时
    SetWaitCmd = 110,
    /// 启动指令队列
    SetQueuedCmdStartExec = 240,
    /// 停止指令队列
    SetQueuedCmdStopExec = 241,
}

impl CommandId {
    /// 从原始字节解析（未知 ID 返回错误）
    pub fn from_u8(value: u8) -> Result<Self, ProtocolError> {
        Self::try_from(value).map_err(|_| ProtocolError::InvalidValue {
            field: "command_id".to_string(),
            value,
        })
    }
}

/// 控制字节
///
/// - `Queued` (0x00)：进入设备指令队列，按提交顺序执行。
///   运动指令与初始化参数指令必须使用此值。
/// - `Immediate` (0x01)：立即执行，用于面向用户的系统指令。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Control {
    Queued = 0x00,
    Immediate = 0x01,
}

// 不使用 `#[default]`：num_enum 会把它当作 try_from 的兜底值
impl Default for Control {
    fn default() -> Self {
        Control::Queued
    }
}

/// PTP 运动模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PtpMode {
    /// 门型运动（笛卡尔坐标）
    JumpXyz = 0,
    /// 关节插补（笛卡尔坐标）
    MovjXyz = 1,
    /// 直线插补（笛卡尔坐标）
    MovlXyz = 2,
    /// 门型运动（关节角）
    JumpAngle = 3,
    /// 关节插补（关节角）
    MovjAngle = 4,
    /// 直线插补（关节角）
    MovlAngle = 5,
    /// 关节插补（关节角增量）
    MovjInc = 6,
    /// 直线插补（笛卡尔增量）
    MovlInc = 7,
    /// 关节插补（笛卡尔增量）
    MovjXyzInc = 8,
    /// 门型直线运动
    JumpMovlXyz = 9,
}

impl Default for PtpMode {
    fn default() -> Self {
        PtpMode::MovlXyz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_id_values() {
        assert_eq!(u8::from(CommandId::GetPose), 10);
        assert_eq!(u8::from(CommandId::ClearAllAlarmsState), 20);
        assert_eq!(u8::from(CommandId::SetPtpCommonParams), 83);
        assert_eq!(u8::from(CommandId::SetPtpCmd), 84);
        assert_eq!(u8::from(CommandId::SetCpCmd), 91);
        assert_eq!(u8::from(CommandId::SetWaitCmd), 110);
        assert_eq!(u8::from(CommandId::SetQueuedCmdStartExec), 240);
        assert_eq!(u8::from(CommandId::SetQueuedCmdStopExec), 241);
    }

    #[test]
    fn test_command_id_from_u8() {
        assert_eq!(CommandId::from_u8(84).unwrap(), CommandId::SetPtpCmd);
        match CommandId::from_u8(0xFE) {
            Err(ProtocolError::InvalidValue { field, value }) => {
                assert_eq!(field, "command_id");
                assert_eq!(value, 0xFE);
            },
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_control_values() {
        assert_eq!(u8::from(Control::Queued), 0x00);
        assert_eq!(u8::from(Control::Immediate), 0x01);
        assert_eq!(Control::default(), Control::Queued);
        assert!(Control::try_from(0x02).is_err());
    }

    #[test]
    fn test_ptp_mode_values() {
        assert_eq!(u8::from(PtpMode::MovjXyz), 1);
        assert_eq!(u8::from(PtpMode::MovlXyz), 2);
        assert_eq!(PtpMode::try_from(9).unwrap(), PtpMode::JumpMovlXyz);
        assert!(PtpMode::try_from(10).is_err());
    }
}
