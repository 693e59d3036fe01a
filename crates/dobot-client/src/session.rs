//! # 会话门面
//!
//! [`Session`] 独占一个串口连接，对外提供初始化、运动、位姿查询、回零、停止与关闭。
//! 所有方法都需要 `&mut self`，指令的串行化由借用检查器保证。

use dobot_protocol::{Pose, PtpMode};
use dobot_serial::{SerialPortTransport, SerialTransport};
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::{ClientError, Result};
use crate::monitor::Completion;
use crate::motion::MotionCommands;
use crate::system::{SystemCommands, settle};

/// 机械臂会话
pub struct Session<T: SerialTransport> {
    port: T,
    config: SessionConfig,
    initialized: bool,
    closed: bool,
}

impl Session<SerialPortTransport> {
    /// 打开串口并初始化
    ///
    /// 串口打开失败返回错误；初始化失败只记录警告，会话仍然返回
    /// （见 [`Session::connect`]）。
    pub fn open(port_name: &str, config: SessionConfig) -> Result<Self> {
        let port = SerialPortTransport::open(port_name, config.serial.clone())?;
        Ok(Self::connect(port, config))
    }
}

impl<T: SerialTransport> Session<T> {
    /// 创建会话（不产生任何设备通信）
    pub fn new(port: T, config: SessionConfig) -> Self {
        Self {
            port,
            config,
            initialized: false,
            closed: false,
        }
    }

    /// 创建会话并执行初始化
    ///
    /// 初始化失败时记录 `warn` 日志并返回部分初始化的会话，
    /// 可通过 [`Session::is_initialized`] 检查。
    pub fn connect(port: T, config: SessionConfig) -> Self {
        let mut session = Self::new(port, config);
        if let Err(e) = session.initialize() {
            warn!("Initialization failed: {}", e);
        }
        session
    }

    /// 初始化序列
    ///
    /// 清除报警 → 使能电机 → 下发运动参数 → 启动指令队列，每一步之后等待
    /// `init_step_delay`。
    pub fn initialize(&mut self) -> Result<()> {
        self.ensure_open()?;
        let step = self.config.timing.init_step_delay();

        let mut system = SystemCommands::new(&mut self.port, &self.config.timing);
        system.clear_alarms()?;
        settle(step);
        system.enable_motors()?;
        settle(step);

        let mut motion = MotionCommands::new(&mut self.port, &self.config);
        if self.config.motion.extended_init {
            motion.initialize_parameters()?;
        } else {
            motion.set_motion_params(self.config.motion.velocity, self.config.motion.acceleration)?;
        }
        settle(step);

        SystemCommands::new(&mut self.port, &self.config.timing).start_queue()?;
        settle(step);

        self.initialized = true;
        info!("Dobot initialized");
        Ok(())
    }

    /// 直线运动到指定位姿
    pub fn move_to(&mut self, x: f32, y: f32, z: f32, r: f32, wait: bool) -> Result<Option<Completion>> {
        self.motion()?
            .move_point_to_point(x, y, z, r, PtpMode::MovlXyz, wait)
    }

    /// 查询当前位姿
    pub fn pose(&mut self) -> Result<Option<Pose>> {
        self.motion()?.get_pose()
    }

    /// 回零（等待最终运动完成）
    pub fn home(&mut self) -> Result<Option<Completion>> {
        let completion = self.motion()?.home(true)?;
        info!("Homing complete");
        Ok(completion)
    }

    /// 点动
    pub fn jog(&mut self, axis: &str, direction: f32, speed: f32) -> Result<Completion> {
        self.motion()?.jog(axis, direction, speed)
    }

    /// 队列延时
    pub fn wait(&mut self, millis: u32) -> Result<()> {
        self.motion()?.wait(millis)
    }

    /// 停止指令队列
    pub fn stop(&mut self) -> Result<()> {
        self.system()?.stop_queue()
    }

    /// 启动指令队列
    pub fn start(&mut self) -> Result<()> {
        self.system()?.start_queue()
    }

    /// 关闭会话（幂等）
    ///
    /// 关闭后所有指令返回 `ClientError::Closed`，不再访问串口。
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.port.close();
        self.closed = true;
        info!("Session closed");
    }

    /// 系统指令
    pub fn system(&mut self) -> Result<SystemCommands<'_, T>> {
        self.ensure_open()?;
        Ok(SystemCommands::new(&mut self.port, &self.config.timing))
    }

    /// 运动指令
    pub fn motion(&mut self) -> Result<MotionCommands<'_, T>> {
        self.ensure_open()?;
        Ok(MotionCommands::new(&mut self.port, &self.config))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(ClientError::Closed)
        } else {
            Ok(())
        }
    }
}

impl<T: SerialTransport> Drop for Session<T> {
    fn drop(&mut self) {
        self.close();
    }
}
