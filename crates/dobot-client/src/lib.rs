//! # Dobot Client
//!
//! 指令层、运动完成监视器与会话门面。
//!
//! # 架构
//!
//! ```text
//! Session（门面：initialize / move_to / pose / home / stop / close）
//!     ↓
//! SystemCommands / MotionCommands（指令层，借用串口，无状态）
//!     ↓                      ↘
//! RawCommander（编码、写入、读取应答）   MotionMonitor（轮询位姿推断运动完成）
//!     ↓
//! SerialTransport（dobot-serial）
//! ```
//!
//! 协议没有"运动完成"事件，也没有 NACK：写入成功即视为指令成功，
//! 运动是否完成由 [`MotionMonitor`] 根据位姿稳定性推断。
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use dobot_client::{Session, SessionConfig};
//!
//! let mut session = Session::open("/dev/ttyUSB0", SessionConfig::default())?;
//! session.move_to(240.0, 0.0, 150.0, 0.0, true)?;
//! if let Some(pose) = session.pose()? {
//!     println!("x = {}", pose.x);
//! }
//! session.close();
//! # Ok::<(), dobot_client::ClientError>(())
//! ```

pub mod config;
pub mod error;
pub mod monitor;
pub mod motion;
pub mod pose;
pub mod raw_commander;
pub mod request;
pub mod session;
pub mod system;

pub use config::{CartesianPoint, HomeConfig, MotionConfig, SessionConfig, TimingConfig};
pub use error::{ClientError, Result};
pub use monitor::{Completion, MonitorConfig, MotionMonitor};
pub use motion::{Axis, MotionCommands};
pub use raw_commander::RawCommander;
pub use request::{Request, Response, RobotCommand, execute, execute_serial};
pub use session::Session;
pub use system::SystemCommands;

// 常用的协议层类型
pub use dobot_protocol::{Pose, PtpMode};
pub use dobot_serial::{SerialConfig, SerialError, SerialPortTransport, SerialTransport};
