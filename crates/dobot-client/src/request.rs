//! # 请求/应答边界
//!
//! 外部进程以 JSON 请求驱动机械臂：
//!
//! ```json
//! {"command": "move", "port": "/dev/ttyUSB0", "x": 220, "z": 140}
//! ```
//!
//! 每个请求产生且只产生一个应答 `{"success": bool, "msg": string, "data"?: any}`，
//! 所有错误都转换为 `success = false` 的应答，不会向调用方传播。

use dobot_serial::{SerialError, SerialPortTransport, SerialTransport};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::SessionConfig;
use crate::error::ClientError;
use crate::session::Session;

/// `move` 缺省坐标
const DEFAULT_MOVE_TARGET: (f32, f32, f32, f32) = (200.0, 0.0, 150.0, 0.0);

/// JSON 请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f32>,
}

impl Request {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// `move` 的目标坐标（缺省 x=200, y=0, z=150, r=0）
    pub fn move_target(&self) -> (f32, f32, f32, f32) {
        let (dx, dy, dz, dr) = DEFAULT_MOVE_TARGET;
        (
            self.x.unwrap_or(dx),
            self.y.unwrap_or(dy),
            self.z.unwrap_or(dz),
            self.r.unwrap_or(dr),
        )
    }
}

/// JSON 应答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Response {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// 单行 JSON
    pub fn to_json(&self) -> String {
        // 只包含字符串、布尔值与 JSON 值，序列化不会失败
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"msg":"Serialization error: {}"}}"#, e)
        })
    }
}

/// 边界支持的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotCommand {
    Init,
    Home,
    Move,
    Stop,
    Pose,
}

impl RobotCommand {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "init" => Some(RobotCommand::Init),
            "home" => Some(RobotCommand::Home),
            "move" => Some(RobotCommand::Move),
            "stop" => Some(RobotCommand::Stop),
            "pose" => Some(RobotCommand::Pose),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RobotCommand::Init => "init",
            RobotCommand::Home => "home",
            RobotCommand::Move => "move",
            RobotCommand::Stop => "stop",
            RobotCommand::Pose => "pose",
        }
    }
}

/// 执行一个请求
///
/// 未知指令在打开串口之前就被拒绝。`open` 负责按端口名打开传输；
/// 执行结束后会话总会被关闭。
pub fn execute<T, F>(request: &Request, config: &SessionConfig, open: F) -> Response
where
    T: SerialTransport,
    F: FnOnce(&str) -> Result<T, SerialError>,
{
    let Some(command) = RobotCommand::parse(&request.command) else {
        debug!("Rejecting unknown command '{}'", request.command);
        return Response::failure("Unknown command");
    };

    let Some(port_name) = request.port.as_deref() else {
        return Response::failure("Runtime error: no serial port given");
    };

    let transport = match open(port_name) {
        Ok(transport) => transport,
        Err(e) => {
            error!("Failed to open {}: {}", port_name, e);
            return Response::failure(format!("Runtime error: {}", e));
        },
    };

    let mut session = Session::new(transport, config.clone());
    let response = dispatch(&mut session, command, request);
    session.close();
    response
}

/// 使用真实串口执行请求
pub fn execute_serial(request: &Request, config: &SessionConfig) -> Response {
    execute(request, config, |name| {
        SerialPortTransport::open(name, config.serial.clone())
    })
}

fn dispatch<T: SerialTransport>(
    session: &mut Session<T>,
    command: RobotCommand,
    request: &Request,
) -> Response {
    debug!("Executing '{}'", command.as_str());

    match command {
        RobotCommand::Init => match session.initialize() {
            Ok(()) => Response::success("Dobot initialized"),
            Err(e) => Response::failure(format!("Init failure: {}", e)),
        },
        RobotCommand::Home => respond(session.home(), "Homing complete"),
        RobotCommand::Move => {
            let (x, y, z, r) = request.move_target();
            respond(session.move_to(x, y, z, r, true), "Movement complete")
        },
        RobotCommand::Stop => respond(session.stop(), "Stopped"),
        RobotCommand::Pose => match session.pose() {
            Ok(Some(pose)) => match serde_json::to_value(pose) {
                Ok(data) => Response::success("Pose read").with_data(data),
                Err(e) => Response::failure(format!("Runtime error: {}", e)),
            },
            Ok(None) => runtime_error(ClientError::PoseUnavailable),
            Err(e) => runtime_error(e),
        },
    }
}

fn respond<V>(result: Result<V, ClientError>, msg: &str) -> Response {
    match result {
        Ok(_) => Response::success(msg),
        Err(e) => runtime_error(e),
    }
}

fn runtime_error(e: ClientError) -> Response {
    error!("Command failed: {}", e);
    Response::failure(format!("Runtime error: {}", e))
}
