//! 基于 `serialport` crate 的串口传输实现

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info, trace};

use crate::{SerialError, SerialTransport};

/// 默认波特率
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// 串口配置
///
/// 时间参数以毫秒表示，便于从配置文件读取。
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialConfig {
    /// 波特率（默认 115200，8N1）
    pub baud_rate: u32,
    /// 读写超时（serialport 对读写使用同一个超时）
    pub timeout_ms: u64,
    /// 打开后等待设备稳定的时间，之后清空缓冲区
    pub open_settle_ms: u64,
    /// 每次写入后的稳定延时
    pub write_settle_ms: u64,
}

impl SerialConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn open_settle(&self) -> Duration {
        Duration::from_millis(self.open_settle_ms)
    }

    pub fn write_settle(&self) -> Duration {
        Duration::from_millis(self.write_settle_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: 1000,
            open_settle_ms: 100,
            write_settle_ms: 20,
        }
    }
}

/// 串口传输
///
/// 独占一个串口连接。`close()` 之后所有读写返回 `SerialError::NotOpen`。
pub struct SerialPortTransport {
    port: Option<Box<dyn SerialPort>>,
    port_name: String,
    config: SerialConfig,
}

impl SerialPortTransport {
    /// 打开串口（115200 8N1，无流控），稳定后清空输入/输出缓冲区
    ///
    /// # Errors
    /// - `SerialError::Serial`: 串口不存在、被占用或参数不支持
    pub fn open(port_name: &str, config: SerialConfig) -> Result<Self, SerialError> {
        let mut port = serialport::new(port_name, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.timeout())
            .open()?;

        std::thread::sleep(config.open_settle());
        port.clear(ClearBuffer::All)?;

        info!(
            "Serial port opened: {} @ {} baud",
            port_name, config.baud_rate
        );

        Ok(Self {
            port: Some(port),
            port_name: port_name.to_string(),
            config,
        })
    }

    /// 串口名称
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// 当前配置
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl SerialTransport for SerialPortTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        trace!("TX {}", hex::encode(bytes));
        port.write_all(bytes)
            .and_then(|_| port.flush())
            .map_err(|e| match e.kind() {
                ErrorKind::TimedOut => SerialError::WriteTimeout,
                _ => SerialError::Io(e),
            })?;

        // 给设备留出处理时间
        std::thread::sleep(self.config.write_settle());
        Ok(())
    }

    fn read_all(&mut self) -> Result<Vec<u8>, SerialError> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;

        let available = port.bytes_to_read()? as usize;
        if available == 0 {
            return Ok(Vec::new());
        }

        let mut buf = vec![0u8; available];
        let n = match port.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::TimedOut => 0,
            Err(e) => return Err(SerialError::Io(e)),
        };
        buf.truncate(n);

        trace!("RX {}", hex::encode(&buf));
        Ok(buf)
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            debug!("Serial port closed: {}", self.port_name);
        }
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn clear_buffers(&mut self) -> Result<(), SerialError> {
        let port = self.port.as_mut().ok_or(SerialError::NotOpen)?;
        port.clear(ClearBuffer::All)?;
        Ok(())
    }
}

impl Drop for SerialPortTransport {
    fn drop(&mut self) {
        self.close();
    }
}
