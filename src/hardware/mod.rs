//! 硬件外设
pub mod button;
pub mod ir_input;
pub mod ir_led;
pub mod led;
pub mod timer;
pub mod usart;
