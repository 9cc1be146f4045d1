//! NEC 发送

use embedded_hal::blocking::delay::DelayUs;

use super::encode::{self, Pulse};

/// 红外载波
pub trait Carrier {
    /// 开启载波
    fn on(&mut self);
    /// 关闭载波
    fn off(&mut self);
}

/// NEC 发送器
pub struct NecTransmitter<C, D> {
    carrier: C,
    delay: D,
}

impl<C, D> NecTransmitter<C, D>
where
    C: Carrier,
    D: DelayUs<u32>,
{
    pub fn new(mut carrier: C, delay: D) -> Self {
        carrier.off();
        NecTransmitter { carrier, delay }
    }

    /// 发送标准帧
    pub fn send(&mut self, address: u8, command: u8) {
        self.send_pulses(&encode::encode(address, command));
    }

    /// 发送扩展帧
    pub fn send_extended(&mut self, address: u16, command: u8) {
        self.send_pulses(&encode::encode_extended(address, command));
    }

    /// 发送重复码
    pub fn send_repeat(&mut self) {
        self.send_pulses(&encode::encode_repeat());
    }

    /// 逐个脉冲发送, 结束时载波关闭
    pub fn send_pulses(&mut self, pulses: &[Pulse]) {
        for pulse in pulses {
            self.carrier.on();
            self.delay.delay_us(pulse.mark_us);
            self.carrier.off();
            if pulse.space_us > 0 {
                self.delay.delay_us(pulse.space_us);
            }
        }
    }

    /// 释放载波与延时
    pub fn release(self) -> (C, D) {
        (self.carrier, self.delay)
    }
}
