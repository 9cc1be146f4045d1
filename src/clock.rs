//! 单调时钟
//!
//! 微秒计数, 32 位回绕 (约 71.6 分钟), 时间差均按回绕减法计算。

use core::fmt;

/// 微秒时间点
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Instant(u32);

impl Instant {
    pub const fn from_micros(us: u32) -> Self {
        Instant(us)
    }

    pub const fn from_millis(ms: u32) -> Self {
        Instant(ms.wrapping_mul(1000))
    }

    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// 自 `earlier` 起经过的微秒数
    pub const fn micros_since(self, earlier: Instant) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    pub const fn add_micros(self, us: u32) -> Self {
        Instant(self.0.wrapping_add(us))
    }
}

impl From<Instant> for u32 {
    fn from(i: Instant) -> Self {
        i.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

/// 时钟源
pub trait Clock {
    fn now(&mut self) -> Instant;
}
