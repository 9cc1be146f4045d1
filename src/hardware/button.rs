//! 用户按键 B1
//! 板上已有上拉, 按下为低电平

use stm32f1xx_hal::gpio::{self, Floating, Input, PC13};

use crate::clock::Instant;
use crate::config::BUTTON_DEBOUNCE_MS;
use crate::debounce::Debouncer;

/// 用户按键
pub struct UserButton {
    pin: PC13<Input<Floating>>,
    debouncer: Debouncer,
}

impl UserButton {
    /// 初始化按键
    pub fn new(pc13: PC13, crh: &mut gpio::Cr<'C', true>, now: Instant) -> Self {
        let pin = pc13.into_floating_input(crh);
        let debouncer = Debouncer::new(pin.is_low(), BUTTON_DEBOUNCE_MS, now);
        UserButton { pin, debouncer }
    }

    /// 轮询按键
    /// 消抖后检测到按下时返回 true
    pub fn poll(&mut self, now: Instant) -> bool {
        self.debouncer.update(self.pin.is_low(), now) == Some(true)
    }
}
