//! # 运动完成监视器
//!
//! 协议没有"运动完成"事件，只能通过轮询位姿推断：
//! 连续两次读数的 `x` 之差小于容差时认为运动已经结束。
//!
//! ```text
//! AwaitingReading ──有效位姿──▶ Tracking { last_x }
//!        ▲                          │
//!        └───── 无效读数保持当前状态 ─┘
//! Tracking ──|x - last_x| < tolerance──▶ Settled
//! 达到 max_polls ──────────────────────▶ BoundReached
//! ```
//!
//! 达到轮询上限时仍然报告完成（这是一个近似：设备可能仍在运动）。

use std::time::Duration;

use dobot_protocol::Pose;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// 监视器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// 最大轮询次数
    pub max_polls: u32,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 判定稳定的 `x` 容差
    pub tolerance: f32,
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_polls: 40,
            poll_interval_ms: 100,
            tolerance: 0.05,
        }
    }
}

/// 等待结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 位姿已稳定
    Settled { polls: u32 },
    /// 达到轮询上限（仍视为完成）
    BoundReached { polls: u32 },
}

impl Completion {
    /// 实际使用的轮询次数
    pub fn polls(&self) -> u32 {
        match self {
            Completion::Settled { polls } | Completion::BoundReached { polls } => *polls,
        }
    }

    /// 是否观察到位姿稳定
    pub fn is_settled(&self) -> bool {
        matches!(self, Completion::Settled { .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum MonitorState {
    AwaitingReading,
    Tracking { last_x: f32 },
}

/// 运动完成监视器
#[derive(Debug, Clone, Default)]
pub struct MotionMonitor {
    config: MonitorConfig,
}

impl MotionMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// 阻塞等待运动完成
    ///
    /// `poll` 每次调用读取一次位姿：`Ok(None)` 表示本次没有可解析的应答，
    /// 视为"尚未收敛"；`Err` 立即中止等待并向上传递。
    ///
    /// # 阻塞行为
    ///
    /// 两次轮询之间使用 `std::thread::sleep`，最长阻塞约
    /// `max_polls × (poll_interval + 单次查询耗时)`。
    pub fn wait_for_completion<F, E>(&self, mut poll: F) -> Result<Completion, E>
    where
        F: FnMut() -> Result<Option<Pose>, E>,
    {
        let mut state = MonitorState::AwaitingReading;

        for n in 1..=self.config.max_polls {
            let reading = poll()?;

            state = match (state, reading) {
                (MonitorState::Tracking { last_x }, Some(pose))
                    if (pose.x - last_x).abs() < self.config.tolerance =>
                {
                    trace!("Motion settled at x = {:.3} after {} polls", pose.x, n);
                    return Ok(Completion::Settled { polls: n });
                },
                (_, Some(pose)) => MonitorState::Tracking { last_x: pose.x },
                (current, None) => {
                    trace!("Poll {}: no pose reading", n);
                    current
                },
            };

            std::thread::sleep(self.config.poll_interval());
        }

        warn!(
            "Motion did not settle within {} polls, assuming complete",
            self.config.max_polls
        );
        Ok(Completion::BoundReached {
            polls: self.config.max_polls,
        })
    }
}
