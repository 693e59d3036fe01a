//! # Dobot CLI
//!
//! Command-line interface for Dobot robot arm control.
//!
//! 每次调用执行一个指令（内部：打开串口 -> 执行 -> 关闭），
//! 并在 stdout 上输出且只输出一行 JSON 应答；日志写入 stderr。
//!
//! ```bash
//! dobot-cli --port /dev/ttyUSB0 init
//! dobot-cli --port /dev/ttyUSB0 move -x 220 -z 140
//! dobot-cli --port /dev/ttyUSB0 pose
//! dobot-cli request '{"command":"home","port":"/dev/ttyUSB0"}'
//! ```
//!
//! 日志级别通过 `RUST_LOG` 调整，例如 `RUST_LOG=dobot_serial=trace` 打印原始帧。

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use dobot_client::{Request, Response, SessionConfig, execute_serial};
use tracing::debug;

mod commands;

use commands::{MoveCommand, RequestCommand};

/// Dobot CLI - 机械臂命令行工具
#[derive(Parser, Debug)]
#[command(name = "dobot-cli")]
#[command(about = "Command-line interface for Dobot robot arm control", long_about = None)]
#[command(version)]
struct Cli {
    /// 串口名（例如 /dev/ttyUSB0 或 COM3）
    #[arg(short, long, global = true)]
    port: Option<String>,

    /// 会话配置文件（TOML）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 执行 JSON 请求
    Request {
        #[command(flatten)]
        args: RequestCommand,
    },

    /// 初始化（清除报警、使能、运动参数、启动队列）
    Init,

    /// 回零
    Home,

    /// 直线运动到目标位姿
    Move {
        #[command(flatten)]
        args: MoveCommand,
    },

    /// 停止指令队列
    Stop,

    /// 查询当前位姿
    Pose,
}

impl Commands {
    fn to_request(&self) -> Result<Request> {
        let request = match self {
            Commands::Request { args } => args.parse()?,
            Commands::Init => Request::new("init"),
            Commands::Home => Request::new("home"),
            Commands::Move { args } => args.to_request(),
            Commands::Stop => Request::new("stop"),
            Commands::Pose => Request::new("pose"),
        };
        Ok(request)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

fn run(cli: &Cli) -> Result<Response> {
    let config = load_config(cli.config.as_ref())?;

    let mut request = cli.command.to_request()?;
    // 命令行 --port 只补充 JSON 中缺失的端口
    if request.port.is_none() {
        request.port = cli.port.clone();
    }

    debug!("Request: {:?}", request);
    Ok(execute_serial(&request, &config))
}

/// 解析命令行参数
///
/// `--help` / `--version` 照常输出并退出；其他参数错误转换为失败应答，
/// 保证 stdout 仍然只有一行 JSON。
fn parse_cli<I, T>(args: I) -> std::result::Result<Cli, Response>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let rendered = e.render().to_string();
            let message = rendered.lines().next().unwrap_or_default();
            let message = message.strip_prefix("error: ").unwrap_or(message);
            Response::failure(format!("Runtime error: {}", message))
        },
    })
}

fn main() {
    // 初始化日志（stderr，stdout 只输出 JSON 应答）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dobot_cli=info,dobot_client=info")),
        )
        .init();

    let cli = match parse_cli(std::env::args_os()) {
        Ok(cli) => cli,
        Err(response) => {
            println!("{}", response.to_json());
            return;
        },
    };

    let response = run(&cli).unwrap_or_else(|e| Response::failure(format!("Runtime error: {:#}", e)));
    println!("{}", response.to_json());
}
