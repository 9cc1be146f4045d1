//! 红外发射管
//! TIM1 CH1 输出 38kHz PWM 作为载波, 通过开关通道调制

use stm32f1xx_hal::{
    afio::MAPR,
    gpio::{self, Alternate, PA8},
    pac::TIM1,
    prelude::_fugit_RateExtU32,
    rcc::Clocks,
    timer::{Ch, Channel, PwmExt, PwmHz, Tim1NoRemap},
};

use crate::config::IR_CARRIER_HZ;
use crate::ir::Carrier;

// pwm 类型别名
type PwmTy = PwmHz<TIM1, Tim1NoRemap, Ch<0>, PA8<Alternate>>;

/// 红外发射管
pub struct IrLed {
    pwm: PwmTy,
}

impl IrLed {
    /// 初始化红外载波
    /// 占空比 1/3
    pub fn new(
        pa8: PA8,
        crh: &mut gpio::Cr<'A', true>,
        tim1: TIM1,
        mapr: &mut MAPR,
        clocks: &Clocks,
    ) -> Self {
        let pin = pa8.into_alternate_push_pull(crh);
        let mut pwm = tim1.pwm_hz::<Tim1NoRemap, _, _>(pin, mapr, IR_CARRIER_HZ.Hz(), clocks);

        let max_duty = pwm.get_max_duty();
        pwm.set_duty(Channel::C1, max_duty / 3);
        pwm.disable(Channel::C1);

        IrLed { pwm }
    }
}

impl Carrier for IrLed {
    fn on(&mut self) {
        self.pwm.enable(Channel::C1);
    }

    fn off(&mut self) {
        self.pwm.disable(Channel::C1);
    }
}
