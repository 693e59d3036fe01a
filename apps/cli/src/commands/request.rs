//! 原始 JSON 请求
//!
//! 供其他进程直接转发 `{"command": ..., "port": ..., ...}`。

use anyhow::{Context, Result};
use clap::Args;
use dobot_client::Request;

/// JSON 请求参数
#[derive(Args, Debug)]
pub struct RequestCommand {
    /// JSON 请求，例如 '{"command":"move","port":"/dev/ttyUSB0","x":220}'
    pub json: String,
}

impl RequestCommand {
    pub fn parse(&self) -> Result<Request> {
        Request::from_json(&self.json).context("Invalid JSON request")
    }
}
