//! # 会话配置
//!
//! 所有原本散落在模块级常量中的参数（默认速度/加速度、各类稳定延时、
//! 轮询参数、回零位姿）都集中在 [`SessionConfig`] 中，在构造会话时显式传入。
//!
//! 配置可以从 TOML 文件读取（只读，不做持久化）：
//!
//! ```toml
//! [motion]
//! velocity = 80.0
//! acceleration = 80.0
//!
//! [monitor]
//! max_polls = 60
//! poll_interval_ms = 50
//!
//! [home.approach]
//! x = 200.0
//! y = 0.0
//! z = 160.0
//! r = 0.0
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use dobot_serial::SerialConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::monitor::MonitorConfig;

/// 会话配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 串口参数
    pub serial: SerialConfig,

    /// 运动参数
    pub motion: MotionConfig,

    /// 稳定延时
    pub timing: TimingConfig,

    /// 运动完成监视器
    pub monitor: MonitorConfig,

    /// 回零位姿
    pub home: HomeConfig,
}

impl SessionConfig {
    /// 从 TOML 字符串解析（缺省字段使用默认值）
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// 所有延时为零的配置
    ///
    /// 用于模拟设备和测试：指令不再等待设备处理时间。
    pub fn immediate() -> Self {
        Self {
            serial: SerialConfig {
                open_settle_ms: 0,
                write_settle_ms: 0,
                ..SerialConfig::default()
            },
            timing: TimingConfig {
                command_settle_ms: 0,
                pose_settle_ms: 0,
                init_step_delay_ms: 0,
            },
            monitor: MonitorConfig {
                poll_interval_ms: 0,
                ..MonitorConfig::default()
            },
            ..Self::default()
        }
    }
}

/// 运动参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// PTP 公共速度（初始化时下发）
    pub velocity: f32,
    /// PTP 公共加速度（初始化时下发）
    pub acceleration: f32,
    /// 初始化时是否额外下发坐标轴参数与门型参数
    pub extended_init: bool,
    /// PTP 坐标轴速度
    pub coordinate_velocity: f32,
    /// PTP 坐标轴加速度
    pub coordinate_acceleration: f32,
    /// 门型运动抬升高度
    pub jump_height: f32,
    /// 门型运动最大抬升高度
    pub jump_z_limit: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            velocity: 100.0,
            acceleration: 100.0,
            extended_init: false,
            coordinate_velocity: 200.0,
            coordinate_acceleration: 200.0,
            jump_height: 10.0,
            jump_z_limit: 10.0,
        }
    }
}

/// 稳定延时（毫秒）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// 清除报警、使能、运动参数指令之后的等待
    pub command_settle_ms: u64,
    /// 位姿查询写入后、读取前的等待
    pub pose_settle_ms: u64,
    /// 初始化序列中每一步之间的等待
    pub init_step_delay_ms: u64,
}

impl TimingConfig {
    pub fn command_settle(&self) -> Duration {
        Duration::from_millis(self.command_settle_ms)
    }

    pub fn pose_settle(&self) -> Duration {
        Duration::from_millis(self.pose_settle_ms)
    }

    pub fn init_step_delay(&self) -> Duration {
        Duration::from_millis(self.init_step_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            command_settle_ms: 50,
            pose_settle_ms: 50,
            init_step_delay_ms: 100,
        }
    }
}

/// 笛卡尔坐标点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub r: f32,
}

impl CartesianPoint {
    pub const fn new(x: f32, y: f32, z: f32, r: f32) -> Self {
        Self { x, y, z, r }
    }
}

/// 回零位姿
///
/// 先直线运动到目标正上方的安全点，再关节插补到最终位姿，
/// 避免在桌面高度与障碍物碰撞。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// 安全中间点
    pub approach: CartesianPoint,
    /// 最终位姿
    pub home: CartesianPoint,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            approach: CartesianPoint::new(200.0, 0.0, 140.0, 0.0),
            home: CartesianPoint::new(200.0, 0.0, 120.0, 0.0),
        }
    }
}
