//! USART2 串口控制台
//! 经 ST-LINK 虚拟串口输出, 115200 8N1
mod utils;

use core::fmt;

use stm32f1xx_hal::{
    afio::MAPR,
    gpio::{self, PA2, PA3},
    pac::USART2,
    rcc::Clocks,
    serial::{self, Serial, StopBits, Tx},
    time::U32Ext,
};
use unwrap_infallible::UnwrapInfallible;

use crate::config::USART2_BAUDRATE;

pub use utils::*;

/// USART 串口
pub struct Usart {
    tx: Tx<USART2>,
}

impl Usart {
    /// 初始化 USART2 串口
    /// 固定引脚: PA2、PA3
    pub fn new(
        pa2: PA2,
        pa3: PA3,
        crl: &mut gpio::Cr<'A', false>,
        usart2: USART2,
        mapr: &mut MAPR,
        clocks: &Clocks,
    ) -> Self {
        let tx = pa2.into_alternate_push_pull(crl);
        let rx = pa3;

        // 设置usart设备。取得USART寄存器和tx/rx引脚的所有权。其余寄存器用于启用和配置设备。
        let (tx, _rx) = Serial::new(
            usart2,
            (tx, rx),
            mapr,
            serial::Config::default()
                .baudrate(USART2_BAUDRATE.bps())
                .wordlength_8bits()
                .stopbits(StopBits::STOP1)
                .parity_none(),
            clocks,
        )
        .split();

        Usart { tx }
    }

    /// 打印字符串到串口
    pub fn print_string(&mut self, data: &str) {
        send_string(&mut self.tx, data).unwrap_infallible()
    }
}

impl fmt::Write for Usart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print_string(s);
        Ok(())
    }
}
