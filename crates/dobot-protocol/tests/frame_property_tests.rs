//! 帧编解码的属性测试
//!
//! 使用 proptest 验证往返、校验和与帧头扫描属性。

use dobot_protocol::{FRAME_HEADER, Frame, MAX_PARAMS_LEN, Pose, ProtocolError};
use proptest::prelude::*;

proptest! {
    /// 编码后解码应得到相同的 (command_id, control, params)
    #[test]
    fn encode_decode_roundtrip(
        command_id in any::<u8>(),
        control in any::<u8>(),
        params in prop::collection::vec(any::<u8>(), 0..=MAX_PARAMS_LEN),
    ) {
        let frame = Frame::from_raw(command_id, control, params);
        let bytes = frame.encode().unwrap();
        prop_assert_eq!(bytes.len(), 6 + frame.params.len());
        prop_assert_eq!(Frame::decode(&bytes), Some(frame));
    }

    /// 修改 id/control/params/checksum 中任意一个字节都会导致解码失败
    ///
    /// 参数区可以包含 0xAA，甚至包含完整的帧。
    #[test]
    fn single_byte_corruption_is_rejected(
        command_id in any::<u8>(),
        control in any::<u8>(),
        params in prop::collection::vec(any::<u8>(), 0..64),
        index_seed in any::<usize>(),
        delta in 1u8..=255,
    ) {
        let bytes = Frame::from_raw(command_id, control, params).encode().unwrap();
        // 跳过 header(2) + length(1)
        let index = 3 + index_seed % (bytes.len() - 3);
        let mut corrupted = bytes.clone();
        corrupted[index] = corrupted[index].wrapping_add(delta);
        prop_assert_eq!(Frame::decode(&corrupted), None);
    }

    /// 帧头前的任意噪声不影响解码
    #[test]
    fn decode_skips_leading_noise(
        noise in prop::collection::vec(0u8..0xAA, 0..64),
        command_id in any::<u8>(),
        control in any::<u8>(),
        params in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let frame = Frame::from_raw(command_id, control, params);
        let mut buf = noise;
        buf.extend(frame.encode().unwrap());
        prop_assert_eq!(Frame::decode(&buf), Some(frame));
    }

    /// 32 字节参数按顺序解析为 8 个 f32
    #[test]
    fn pose_parse_preserves_order(values in prop::array::uniform8(-1000.0f32..1000.0)) {
        let params: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let pose = Pose::from_params(&params).unwrap();
        prop_assert_eq!(pose.to_array(), values);
    }
}

proptest! {
    /// 损坏帧的参数区内嵌一个有效帧时，内嵌帧不会被当作应答
    #[test]
    fn corrupted_frame_never_yields_embedded_frame(
        inner_id in any::<u8>(),
        inner_params in prop::collection::vec(any::<u8>(), 0..16),
        prefix in prop::collection::vec(any::<u8>(), 0..8),
        index_seed in any::<usize>(),
        delta in 1u8..=255,
    ) {
        let mut params = prefix;
        params.extend(Frame::from_raw(inner_id, 0, inner_params).encode().unwrap());
        let bytes = Frame::from_raw(84, 0, params).encode().unwrap();

        let index = 3 + index_seed % (bytes.len() - 3);
        let mut corrupted = bytes.clone();
        corrupted[index] = corrupted[index].wrapping_add(delta);
        prop_assert_eq!(Frame::decode(&corrupted), None);
    }
}

#[test]
fn corrupted_outer_frame_with_embedded_get_pose() {
    let inner = Frame::from_raw(10, 0, vec![]).encode().unwrap();
    let mut bytes = Frame::from_raw(84, 0, inner).encode().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    assert_eq!(Frame::decode(&bytes), None);
}

#[test]
fn corrupted_header_is_rejected() {
    let mut bytes = Frame::from_raw(10, 0, vec![1, 2, 3]).encode().unwrap();
    bytes[1] = 0xAB;
    assert_eq!(Frame::try_decode(&bytes), Err(ProtocolError::HeaderNotFound));
}

#[test]
fn enlarged_length_is_rejected() {
    let mut bytes = Frame::from_raw(10, 0, vec![1, 2, 3]).encode().unwrap();
    bytes[2] += 1;
    assert!(matches!(
        Frame::try_decode(&bytes),
        Err(ProtocolError::Truncated { .. })
    ));
}

#[test]
fn header_constant_is_bit_exact() {
    let bytes = Frame::from_raw(0, 0, vec![]).encode().unwrap();
    assert_eq!(&bytes[..2], &FRAME_HEADER);
    assert_eq!(bytes, vec![0xAA, 0xAA, 0x02, 0x00, 0x00, 0x00]);
}
