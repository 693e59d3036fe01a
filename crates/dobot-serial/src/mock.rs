//! Mock 串口传输
//!
//! 用于测试的模拟设备：记录所有写入的字节，并通过应答函数模拟设备回复。
//! 应答在 `write()` 时生成，放入接收缓冲区，下一次 `read_all()` 一次性取出。

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use dobot_protocol::Frame;

use crate::{SerialError, SerialTransport};

/// 应答函数：输入写入的字节，返回设备回复（`None` 表示不回复）
pub type Responder = Box<dyn FnMut(&[u8]) -> Option<Vec<u8>> + Send>;

struct MockState {
    written: Vec<Vec<u8>>,
    rx_buffer: Vec<u8>,
    scripted_rx: VecDeque<Vec<u8>>,
    responder: Option<Responder>,
    open: bool,
    fail_writes: bool,
    read_count: usize,
}

/// 模拟串口
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// 创建新的模拟串口（已打开，无应答）
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                written: Vec::new(),
                rx_buffer: Vec::new(),
                scripted_rx: VecDeque::new(),
                responder: None,
                open: true,
                fail_writes: false,
                read_count: 0,
            })),
        }
    }

    /// 设置应答函数
    pub fn with_responder<F>(self, responder: F) -> Self
    where
        F: FnMut(&[u8]) -> Option<Vec<u8>> + Send + 'static,
    {
        self.state.lock().unwrap().responder = Some(Box::new(responder));
        self
    }

    /// 获取检查句柄（transport 移交给 Session 后仍可检查）
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialTransport for MockTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        let mut state = self.state.lock().unwrap();
        if !state.open {
            return Err(SerialError::NotOpen);
        }
        if state.fail_writes {
            return Err(SerialError::WriteTimeout);
        }

        state.written.push(bytes.to_vec());

        let reply = state.responder.as_mut().and_then(|f| f(bytes));
        if let Some(reply) = reply {
            state.rx_buffer.extend(reply);
        }
        Ok(())
    }

    fn read_all(&mut self) -> Result<Vec<u8>, SerialError> {
        let mut state = self.state.lock().unwrap();
        if !state.open {
            return Err(SerialError::NotOpen);
        }
        state.read_count += 1;

        if let Some(scripted) = state.scripted_rx.pop_front() {
            state.rx_buffer.extend(scripted);
        }
        Ok(std::mem::take(&mut state.rx_buffer))
    }

    fn close(&mut self) {
        self.state.lock().unwrap().open = false;
    }

    fn is_open(&self) -> bool {
        self.state.lock().unwrap().open
    }

    fn clear_buffers(&mut self) -> Result<(), SerialError> {
        self.state.lock().unwrap().rx_buffer.clear();
        Ok(())
    }
}

/// 模拟串口检查句柄
#[derive(Clone)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    /// 所有写入（按顺序）
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().written.clone()
    }

    /// 所有写入解码后的帧（无法解码的写入被跳过）
    pub fn written_frames(&self) -> Vec<Frame> {
        self.written()
            .iter()
            .filter_map(|bytes| Frame::decode(bytes))
            .collect()
    }

    /// 写入次数
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().written.len()
    }

    /// `read_all()` 调用次数
    pub fn read_count(&self) -> usize {
        self.state.lock().unwrap().read_count
    }

    /// 为后续某一次 `read_all()` 预置数据（每次读取取出一条）
    pub fn push_rx(&self, bytes: Vec<u8>) {
        self.state.lock().unwrap().scripted_rx.push_back(bytes);
    }

    /// 模拟写入失败（超时）
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    /// 连接是否打开
    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap().open
    }

    /// 清空写入记录
    pub fn clear_written(&self) {
        self.state.lock().unwrap().written.clear();
    }
}
