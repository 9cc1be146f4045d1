//! 定时器
//! DWT 周期计数器扩展为 32 位微秒时钟

use cortex_m::peripheral::{DCB, DWT};
use stm32f1xx_hal::rcc::Clocks;

use crate::clock::{Clock, Instant};

/// 微秒时钟
/// 周期计数器 64MHz 下约 67 秒回绕一次, 两次读取的间隔不能超过该时长
pub struct DwtClock {
    cycles_per_us: u32,
    last_cycles: u32,
    // 不足 1us 的余数
    remainder: u32,
    micros: u32,
}

impl DwtClock {
    /// 初始化并启用周期计数器
    pub fn new(mut dcb: DCB, mut dwt: DWT, clocks: &Clocks) -> Self {
        dcb.enable_trace();
        dwt.enable_cycle_counter();

        DwtClock {
            cycles_per_us: clocks.sysclk().raw() / 1_000_000,
            last_cycles: DWT::cycle_count(),
            remainder: 0,
            micros: 0,
        }
    }
}

impl Clock for DwtClock {
    fn now(&mut self) -> Instant {
        let cycles = DWT::cycle_count();
        let elapsed = u64::from(cycles.wrapping_sub(self.last_cycles)) + u64::from(self.remainder);
        let per_us = u64::from(self.cycles_per_us);

        self.last_cycles = cycles;
        self.remainder = (elapsed % per_us) as u32;
        self.micros = self.micros.wrapping_add((elapsed / per_us) as u32);

        Instant::from_micros(self.micros)
    }
}
