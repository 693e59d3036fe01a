//! 反馈帧解析
//!
//! 目前唯一的反馈是位姿查询的应答。

use crate::constants::POSE_PARAMS_LEN;
use crate::frame::Frame;
use crate::{ProtocolError, bytes_to_f32_le};

/// 机械臂位姿
///
/// 笛卡尔坐标 `x, y, z, r` 加四个关节角 `j1..j4`。
/// 每次查询都重新构建，不缓存。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub j1: f32,
    pub j2: f32,
    pub j3: f32,
    pub j4: f32,
}

impl Pose {
    /// 按协议顺序返回 8 个值
    pub fn to_array(&self) -> [f32; 8] {
        [
            self.x, self.y, self.z, self.r, self.j1, self.j2, self.j3, self.j4,
        ]
    }

    /// 从参数区解析（至少 32 字节，多余字节忽略）
    pub fn from_params(params: &[u8]) -> Result<Self, ProtocolError> {
        if params.len() < POSE_PARAMS_LEN {
            return Err(ProtocolError::InvalidLength {
                expected: POSE_PARAMS_LEN,
                actual: params.len(),
            });
        }

        let mut values = [0f32; 8];
        for (value, chunk) in values.iter_mut().zip(params.chunks_exact(4)) {
            // chunks_exact 保证长度为 4
            *value = bytes_to_f32_le([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let [x, y, z, r, j1, j2, j3, j4] = values;
        Ok(Self {
            x,
            y,
            z,
            r,
            j1,
            j2,
            j3,
            j4,
        })
    }

    /// 编码为参数区（用于模拟设备应答）
    pub fn to_params(&self) -> Vec<u8> {
        self.to_array()
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect()
    }
}

impl TryFrom<&Frame> for Pose {
    type Error = ProtocolError;

    fn try_from(frame: &Frame) -> Result<Self, Self::Error> {
        Pose::from_params(&frame.params)
    }
}
