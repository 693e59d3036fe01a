//! 位姿查询

use std::time::Duration;

use dobot_protocol::{Pose, PoseRequest};
use dobot_serial::SerialTransport;
use tracing::trace;

use crate::error::Result;
use crate::raw_commander::RawCommander;

/// 查询一次实时位姿
///
/// 写入无参数的 GetPose 帧，等待 `settle` 后读取全部缓冲字节并解码。
///
/// - `Ok(Some(pose))`: 收到有效应答
/// - `Ok(None)`: 没有可解析的应答（无数据、校验失败或参数区不足 32 字节）
/// - `Err(_)`: 传输层错误
pub fn query_pose<T: SerialTransport + ?Sized>(port: &mut T, settle: Duration) -> Result<Option<Pose>> {
    let Some(reply) = RawCommander::new(port).request(&PoseRequest.to_frame(), settle)? else {
        return Ok(None);
    };

    match Pose::try_from(&reply) {
        Ok(pose) => {
            trace!("Pose: x={:.2} y={:.2} z={:.2} r={:.2}", pose.x, pose.y, pose.z, pose.r);
            Ok(Some(pose))
        },
        Err(e) => {
            trace!("Reply to pose query is not a pose: {}", e);
            Ok(None)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dobot_protocol::{CommandId, Control, Frame};
    use dobot_serial::MockTransport;

    fn pose_reply(pose: Pose) -> Vec<u8> {
        Frame::new(CommandId::GetPose, Control::Queued, pose.to_params())
            .encode()
            .unwrap()
    }

    #[test]
    fn test_query_pose_writes_get_pose_frame() {
        let mut mock = MockTransport::new();
        let handle = mock.handle();

        let _ = query_pose(&mut mock, Duration::ZERO).unwrap();

        // 10 + 0 = 10 → 校验和 246
        assert_eq!(handle.written(), vec![vec![0xAA, 0xAA, 0x02, 10, 0x00, 246]]);
        assert_eq!(handle.read_count(), 1);
    }

    #[test]
    fn test_query_pose_parses_reply() {
        let pose = Pose {
            x: 200.0,
            y: -1.5,
            z: 120.25,
            r: 3.0,
            j1: 1.0,
            j2: 2.0,
            j3: 3.0,
            j4: 4.0,
        };
        let reply = pose_reply(pose);
        let mut mock = MockTransport::new().with_responder(move |_| Some(reply.clone()));

        assert_eq!(query_pose(&mut mock, Duration::ZERO).unwrap(), Some(pose));
    }

    #[test]
    fn test_query_pose_with_leading_noise() {
        let mut reply = vec![0x00, 0x13, 0xAA];
        reply.extend(pose_reply(Pose::default()));
        let mut mock = MockTransport::new().with_responder(move |_| Some(reply.clone()));

        assert_eq!(
            query_pose(&mut mock, Duration::ZERO).unwrap(),
            Some(Pose::default())
        );
    }

    #[test]
    fn test_query_pose_no_reply() {
        let mut mock = MockTransport::new();
        assert_eq!(query_pose(&mut mock, Duration::ZERO).unwrap(), None);
    }

    #[test]
    fn test_query_pose_corrupt_reply() {
        let mut reply = pose_reply(Pose::default());
        let last = reply.len() - 1;
        reply[last] ^= 0xFF;
        let mut mock = MockTransport::new().with_responder(move |_| Some(reply.clone()));

        assert_eq!(query_pose(&mut mock, Duration::ZERO).unwrap(), None);
    }

    #[test]
    fn test_query_pose_short_params() {
        let reply = Frame::new(CommandId::GetPose, Control::Queued, vec![0u8; 16])
            .encode()
            .unwrap();
        let mut mock = MockTransport::new().with_responder(move |_| Some(reply.clone()));

        assert_eq!(query_pose(&mut mock, Duration::ZERO).unwrap(), None);
    }
}
