//! 集成测试公共设施：模拟机械臂
//!
//! `SimArm` 在 `MockTransport` 的应答函数中解析写入的帧：
//! - GetPose：回复当前位姿
//! - SetPtpCmd：立即把位姿设置为目标点（运动瞬间完成）
//! - 其他指令：不回复

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use dobot_protocol::{CommandId, Control, Frame, Pose, bytes_to_f32_le};
use dobot_serial::{MockHandle, MockTransport};

#[derive(Clone)]
pub struct SimArm {
    pose: Arc<Mutex<Pose>>,
    corrupt_replies: Arc<Mutex<bool>>,
}

impl SimArm {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose: Arc::new(Mutex::new(pose)),
            corrupt_replies: Arc::new(Mutex::new(false)),
        }
    }

    /// 创建连接到模拟机械臂的串口
    pub fn transport(&self) -> (MockTransport, MockHandle) {
        let arm = self.clone();
        let mock = MockTransport::new().with_responder(move |bytes| arm.respond(bytes));
        let handle = mock.handle();
        (mock, handle)
    }

    pub fn pose(&self) -> Pose {
        *self.pose.lock().unwrap()
    }

    /// 之后的位姿应答校验和错误
    pub fn set_corrupt_replies(&self, corrupt: bool) {
        *self.corrupt_replies.lock().unwrap() = corrupt;
    }

    fn respond(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let frame = Frame::decode(bytes)?;
        match frame.command().ok()? {
            CommandId::GetPose => {
                let pose = self.pose();
                let mut reply = Frame::new(CommandId::GetPose, Control::Queued, pose.to_params())
                    .encode()
                    .unwrap();
                if *self.corrupt_replies.lock().unwrap() {
                    let last = reply.len() - 1;
                    reply[last] = reply[last].wrapping_add(1);
                }
                Some(reply)
            },
            CommandId::SetPtpCmd => {
                let target = ptp_target(&frame);
                let mut pose = self.pose.lock().unwrap();
                pose.x = target.1;
                pose.y = target.2;
                pose.z = target.3;
                pose.r = target.4;
                None
            },
            _ => None,
        }
    }
}

/// 解析 PTP 帧：(mode, x, y, z, r)
pub fn ptp_target(frame: &Frame) -> (u8, f32, f32, f32, f32) {
    let p = &frame.params;
    let f = |offset: usize| bytes_to_f32_le(p[offset..offset + 4].try_into().unwrap());
    (p[0], f(1), f(5), f(9), f(13))
}

/// 所有写入的 PTP 帧
pub fn ptp_frames(handle: &MockHandle) -> Vec<Frame> {
    handle
        .written_frames()
        .into_iter()
        .filter(|f| f.command_id == u8::from(CommandId::SetPtpCmd))
        .collect()
}

/// 写入帧的指令 ID 序列
pub fn command_ids(handle: &MockHandle) -> Vec<CommandId> {
    handle
        .written_frames()
        .iter()
        .map(|f| f.command().unwrap())
        .collect()
}

pub fn pose_at(x: f32, y: f32, z: f32, r: f32) -> Pose {
    Pose {
        x,
        y,
        z,
        r,
        ..Pose::default()
    }
}
