//! 协议常量定义
//!
//! 集中定义帧格式相关的常量，避免在代码中散落"魔法数"。

/// 帧头（固定 2 字节）
pub const FRAME_HEADER: [u8; 2] = [0xAA, 0xAA];

/// 长度字节只有 8 位，且需容纳 command_id + control 两个字节
pub const MAX_PARAMS_LEN: usize = u8::MAX as usize - 2;

/// 最短帧：header(2) + len(1) + id(1) + ctrl(1) + checksum(1)
pub const MIN_FRAME_LEN: usize = 6;

/// 位姿反馈参数长度：8 个 f32（x, y, z, r, j1..j4）
pub const POSE_PARAMS_LEN: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_constants() {
        assert_eq!(FRAME_HEADER, [0xAA, 0xAA]);
        assert_eq!(MAX_PARAMS_LEN, 253);
        assert_eq!(MIN_FRAME_LEN, 6);
        assert_eq!(POSE_PARAMS_LEN, 8 * 4);
    }
}
