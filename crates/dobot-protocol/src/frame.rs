//! 帧编码/解码
//!
//! 串口帧格式（逐位精确）：
//!
//! ```text
//! [0xAA][0xAA][length][command_id][control][params ...][checksum]
//! ```
//!
//! - `length = 2 + params.len()`
//! - `checksum = (256 - (command_id + control + Σparams) % 256) % 256`
//!
//! 解码时允许帧头前存在残留的噪声字节（上一次不完整读取留下的数据），
//! 但只解析第一个有效帧，不处理多帧拼接。

use crate::ProtocolError;
use crate::constants::{FRAME_HEADER, MAX_PARAMS_LEN, MIN_FRAME_LEN};
use crate::ids::{CommandId, Control};

/// 串口协议帧
///
/// 帧在发送前构建、编码后即丢弃，不做缓存。
///
/// # 示例
///
/// ```rust
/// use dobot_protocol::{CommandId, Control, Frame};
///
/// let frame = Frame::new(CommandId::SetArmEnabled, Control::Immediate, vec![0x01]);
/// let bytes = frame.encode().unwrap();
/// assert_eq!(bytes, [0xAA, 0xAA, 0x03, 19, 0x01, 0x01, 0xEB]);
///
/// let decoded = Frame::decode(&bytes).unwrap();
/// assert_eq!(decoded, frame);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// 指令 ID
    pub command_id: u8,

    /// 控制字节（保留原始值，任意字节都可往返）
    pub control: u8,

    /// 参数区（由指令层解释）
    pub params: Vec<u8>,
}

impl Frame {
    /// 通用构造器
    pub fn new(command: CommandId, control: Control, params: impl Into<Vec<u8>>) -> Self {
        Self::from_raw(command.into(), control.into(), params)
    }

    /// 使用原始字节构造（不校验 ID 是否已知）
    pub fn from_raw(command_id: u8, control: u8, params: impl Into<Vec<u8>>) -> Self {
        Self {
            command_id,
            control,
            params: params.into(),
        }
    }

    /// 解析指令 ID
    pub fn command(&self) -> Result<CommandId, ProtocolError> {
        CommandId::from_u8(self.command_id)
    }

    /// 计算本帧的校验和
    pub fn checksum(&self) -> u8 {
        checksum(self.command_id, self.control, &self.params)
    }

    /// 编码为字节序列
    ///
    /// # Errors
    /// - `ProtocolError::PayloadTooLong`: 参数超过 253 字节（长度字节放不下）
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        if self.params.len() > MAX_PARAMS_LEN {
            return Err(ProtocolError::PayloadTooLong {
                max: MAX_PARAMS_LEN,
                actual: self.params.len(),
            });
        }

        let mut out = Vec::with_capacity(MIN_FRAME_LEN + self.params.len());
        out.extend_from_slice(&FRAME_HEADER);
        out.push((2 + self.params.len()) as u8);
        out.push(self.command_id);
        out.push(self.control);
        out.extend_from_slice(&self.params);
        out.push(self.checksum());
        Ok(out)
    }

    /// 从接收缓冲区解码第一个有效帧
    ///
    /// 找不到帧头、长度不足、校验失败均返回 `None`：
    /// 调用方无法区分"无数据"与"数据损坏"。需要区分时使用 [`Frame::try_decode`]。
    pub fn decode(buf: &[u8]) -> Option<Self> {
        Self::try_decode(buf).ok()
    }

    /// 从接收缓冲区解码第一个帧，并报告失败原因
    ///
    /// 只解码第一个帧。帧头前的噪声可能制造错位的候选位置：
    /// 候选位置长度不足（`Truncated` / `InvalidLength`），或者帧头后紧跟
    /// 另一个 `0xAA`（`AA AA AA`，真实帧头在下一个字节）时，继续尝试下一个候选位置。
    /// 其他情况下校验失败即结束解码，不会在损坏帧的参数区内部继续寻找帧头。
    pub fn try_decode(buf: &[u8]) -> Result<Self, ProtocolError> {
        let mut first_error = None;
        let mut offset = 0;

        while let Some(pos) = find_header(&buf[offset..]) {
            let start = offset + pos;
            match parse_at(&buf[start..]) {
                Ok(frame) => return Ok(frame),
                Err(e @ ProtocolError::ChecksumMismatch { .. }) => {
                    let overlapping = buf.get(start + 2) == Some(&FRAME_HEADER[1]);
                    if !overlapping {
                        return Err(e);
                    }
                    first_error.get_or_insert(e);
                },
                Err(e) => {
                    first_error.get_or_insert(e);
                },
            }
            offset = start + 1;
        }

        Err(first_error.unwrap_or(ProtocolError::HeaderNotFound))
    }
}

/// 校验和：`command_id + control + Σparams` 的补码（mod 256）
pub fn checksum(command_id: u8, control: u8, params: &[u8]) -> u8 {
    params
        .iter()
        .fold(command_id.wrapping_add(control), |acc, &b| acc.wrapping_add(b))
        .wrapping_neg()
}

fn find_header(buf: &[u8]) -> Option<usize> {
    buf.windows(FRAME_HEADER.len()).position(|w| w == FRAME_HEADER)
}

/// 解析以帧头开始的缓冲区
fn parse_at(buf: &[u8]) -> Result<Frame, ProtocolError> {
    let Some(&length) = buf.get(2) else {
        return Err(ProtocolError::Truncated {
            expected: MIN_FRAME_LEN,
            actual: buf.len(),
        });
    };

    // length 至少覆盖 command_id + control
    if length < 2 {
        return Err(ProtocolError::InvalidLength {
            expected: 2,
            actual: length as usize,
        });
    }

    // header(2) + len(1) + length + checksum(1)
    let total = 3 + length as usize + 1;
    if buf.len() < total {
        return Err(ProtocolError::Truncated {
            expected: total,
            actual: buf.len(),
        });
    }

    let command_id = buf[3];
    let control = buf[4];
    let params = &buf[5..total - 1];
    let received = buf[total - 1];

    let expected = checksum(command_id, control, params);
    if received != expected {
        return Err(ProtocolError::ChecksumMismatch {
            expected,
            actual: received,
        });
    }

    Ok(Frame::from_raw(command_id, control, params))
}
