//! 移动命令
//!
//! 直线运动到目标位姿，未指定的坐标使用缺省值（x=200, y=0, z=150, r=0）

use clap::Args;
use dobot_client::Request;

/// 移动命令参数
#[derive(Args, Debug, Default)]
pub struct MoveCommand {
    /// 目标 X（毫米）
    #[arg(short, long, allow_negative_numbers = true)]
    pub x: Option<f32>,

    /// 目标 Y（毫米）
    #[arg(short, long, allow_negative_numbers = true)]
    pub y: Option<f32>,

    /// 目标 Z（毫米）
    #[arg(short, long, allow_negative_numbers = true)]
    pub z: Option<f32>,

    /// 末端旋转角（度）
    #[arg(short, long, allow_negative_numbers = true)]
    pub r: Option<f32>,
}

impl MoveCommand {
    /// 转换为边界请求
    pub fn to_request(&self) -> Request {
        Request {
            x: self.x,
            y: self.y,
            z: self.z,
            r: self.r,
            ..Request::new("move")
        }
    }
}
