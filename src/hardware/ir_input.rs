//! 红外接收头
//! 输出低电平有效, 空闲为高电平

use stm32f1xx_hal::{
    afio,
    gpio::{self, Edge, ExtiPin, Input, PullUp, PA0},
    pac::EXTI,
};

use crate::clock::Instant;
use crate::ir::{EdgeEvent, EdgeKind};

/// 红外接收输入引脚
pub struct IrInput {
    pin: PA0<Input<PullUp>>,
}

impl IrInput {
    /// 初始化红外接收引脚
    /// 上升沿、下降沿均触发 EXTI0, 中断由 RTIC 任务绑定并使能
    pub fn new(
        pa0: PA0,
        crl: &mut gpio::Cr<'A', false>,
        exti: &mut EXTI,
        afio: &mut afio::Parts,
    ) -> Self {
        let mut pin = pa0.into_pull_up_input(crl);
        // 配置 AFIO 外部中断引脚选择
        pin.make_interrupt_source(afio);
        // 双边沿生成中断
        pin.trigger_on_edge(exti, Edge::RisingFalling);
        // 从该引脚启用外部中断
        pin.enable_interrupt(exti);

        IrInput { pin }
    }

    /// 在中断中读取边沿
    /// 清除中断标识, 以当前电平判断边沿方向
    pub fn capture(&mut self, at: Instant) -> EdgeEvent {
        self.pin.clear_interrupt_pending_bit();
        EdgeEvent::new(at, EdgeKind::from_level(self.pin.is_high()))
    }
}
