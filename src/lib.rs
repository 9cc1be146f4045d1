#![no_std]

pub mod clock;
pub mod config;
pub mod debounce;
pub mod ir;
pub mod report;

#[cfg(feature = "firmware")]
pub mod hardware;

// global logger
#[cfg(feature = "firmware")]
use defmt_rtt as _;
#[cfg(feature = "firmware")]
use panic_probe as _;
// memory layout
#[cfg(feature = "firmware")]
use stm32f1xx_hal as _;

// 引脚分配
// 备注*的引脚尽量不替换
#[allow(unused)]
enum _Pin {
    // 红外接收头, EXTI0
    PA0, // *

    // 状态 LED 灯 (板载 LD2)
    PA5,

    // 红外发射管, TIM1_CH1 38kHz 载波
    PA8, // *

    // USART2 串口, 经 ST-LINK 虚拟串口
    PA2, // *
    PA3, // *

    // 用户按键 B1
    PC13,

    // 不可使用引脚, 需要重置才可使用
    PA13,
    PA14,
}
