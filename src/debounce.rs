//! 按键消抖
//!
//! 原始电平需要稳定保持 `hold_us` 后才会被接受为新的状态。

use crate::clock::Instant;

#[derive(Debug, Clone)]
pub struct Debouncer {
    hold_us: u32,
    /// 已接受的电平
    stable: bool,
    /// 最近一次观察到的原始电平及其开始时间
    candidate: bool,
    since: Instant,
}

impl Debouncer {
    /// 创建消抖器
    /// initial: 上电时的电平
    pub fn new(initial: bool, hold_ms: u32, now: Instant) -> Self {
        Debouncer {
            hold_us: hold_ms.saturating_mul(1000),
            stable: initial,
            candidate: initial,
            since: now,
        }
    }

    /// 当前稳定电平
    pub fn level(&self) -> bool {
        self.stable
    }

    /// 输入一次采样
    /// 返回 Some(level) 表示稳定电平发生了变化
    pub fn update(&mut self, level: bool, now: Instant) -> Option<bool> {
        if level != self.candidate {
            self.candidate = level;
            self.since = now;
            return None;
        }

        if self.candidate != self.stable && now.micros_since(self.since) >= self.hold_us {
            self.stable = self.candidate;
            return Some(self.stable);
        }

        None
    }
}
