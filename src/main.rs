#![no_std]
#![no_main]

use nucleo_f103_ir::{
    clock::Clock,
    config::{IR_EDGE_QUEUE_CAPACITY, IR_TX_ADDRESS, IR_TX_COMMAND, SYSCLK_HZ},
    hardware::{
        button::UserButton, ir_input::IrInput, ir_led::IrLed, led::Led, timer::DwtClock,
        usart::Usart,
    },
    ir::{
        capture::{self, EdgeConsumer, EdgeProducer, EdgeQueue},
        IrEvent, IrReceiver, NecTransmitter,
    },
    report,
};

use cortex_m::asm;
use defmt::{info, println, warn};
use rtic_sync::{
    channel::{Receiver, Sender},
    make_channel,
};
use stm32f1xx_hal::{
    afio::AfioExt,
    flash::FlashExt,
    prelude::{_fugit_RateExtU32, _stm32_hal_gpio_GpioExt, _stm32_hal_rcc_RccExt},
    timer::{SysDelay, SysTimerExt},
};

// 解码结果消息通道
const IR_EVENT_CAPACITY: usize = 2;

// 主循环轮询间隔, 约 1ms
const IDLE_POLL_CYCLES: u32 = SYSCLK_HZ / 1000;

// 定义应用程序资源和任务
#[rtic::app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [SPI1, SPI2])]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        clock: DwtClock,
        console: Usart,
        led: Led,
    }

    #[local]
    struct Local {
        ir_input: IrInput,
        edge_producer: EdgeProducer<'static, IR_EDGE_QUEUE_CAPACITY>,
        edge_consumer: EdgeConsumer<'static, IR_EDGE_QUEUE_CAPACITY>,
        ir_receiver: IrReceiver,
        ir_sender: Sender<'static, IrEvent, IR_EVENT_CAPACITY>,
        button: UserButton,
        transmitter: NecTransmitter<IrLed, SysDelay>,
    }

    // 初始化函数
    #[init(local = [edge_queue: EdgeQueue<IR_EDGE_QUEUE_CAPACITY> = EdgeQueue::new()])]
    fn init(ctx: init::Context) -> (Shared, Local) {
        // 获取外设实例
        let mut afio = ctx.device.AFIO.constrain();
        let mut flash = ctx.device.FLASH.constrain();
        let rcc = ctx.device.RCC.constrain();
        let mut exti = ctx.device.EXTI;

        let mut gpioa = ctx.device.GPIOA.split();
        let mut gpioc = ctx.device.GPIOC.split();

        // 初始化时钟, HSI 经 PLL 倍频到 64MHz
        let clocks = rcc
            .cfgr
            .sysclk(SYSCLK_HZ.Hz())
            .pclk1((SYSCLK_HZ / 2).Hz())
            .freeze(&mut flash.acr);
        // 具有自定义精度的阻塞延迟, 用于发送时序
        let delay = ctx.core.SYST.delay(&clocks);
        // 微秒时钟, 用于接收时间戳
        let mut clock = DwtClock::new(ctx.core.DCB, ctx.core.DWT, &clocks);

        println!("init start ...");

        // 初始化串口控制台
        let mut console = Usart::new(
            gpioa.pa2,
            gpioa.pa3,
            &mut gpioa.crl,
            ctx.device.USART2,
            &mut afio.mapr,
            &clocks,
        );
        // 初始化状态 LED 灯
        let led = Led::new(gpioa.pa5, &mut gpioa.crl);
        // 初始化红外接收头
        let ir_input = IrInput::new(gpioa.pa0, &mut gpioa.crl, &mut exti, &mut afio);
        // 初始化红外发射管
        let ir_led = IrLed::new(
            gpioa.pa8,
            &mut gpioa.crh,
            ctx.device.TIM1,
            &mut afio.mapr,
            &clocks,
        );
        let transmitter = NecTransmitter::new(ir_led, delay);
        // 初始化用户按键
        let button = UserButton::new(gpioc.pc13, &mut gpioc.crh, clock.now());

        // 中断到主循环的边沿队列
        let (edge_producer, edge_consumer) = capture::split(ctx.local.edge_queue);

        // 解码结果传递
        let (ir_sender, ir_events) = make_channel!(IrEvent, IR_EVENT_CAPACITY);
        if ir_reporter::spawn(ir_events).is_err() {
            defmt::panic!("spawn ir_reporter failed");
        }

        report::write_banner(&mut console).ok();
        println!("init end ...");
        (
            Shared {
                clock,
                console,
                led,
            },
            Local {
                ir_input,
                edge_producer,
                edge_consumer,
                ir_receiver: IrReceiver::new(),
                ir_sender,
                button,
                transmitter,
            },
        )
    }

    /// 红外接收头边沿中断, 记录时间戳
    #[task(binds = EXTI0, priority = 2, local = [ir_input, edge_producer], shared = [clock])]
    fn ir_edge(mut ctx: ir_edge::Context) {
        let now = ctx.shared.clock.lock(|clock| clock.now());
        let event = ctx.local.ir_input.capture(now);
        if !ctx.local.edge_producer.push(event) {
            warn!("edge queue full, edge dropped");
        }
    }

    /// 输出解码结果
    #[task(priority = 1, shared = [console])]
    async fn ir_reporter(
        mut ctx: ir_reporter::Context,
        mut receiver: Receiver<'static, IrEvent, IR_EVENT_CAPACITY>,
    ) {
        while let Ok(event) = receiver.recv().await {
            match &event.result {
                Ok(frame) => info!("[{}] {}", event.sequence, frame),
                Err(failure) => warn!("[{}] decode failed: {}", event.sequence, failure.error),
            }
            ctx.shared.console.lock(|console| {
                report::write_event(console, &event).ok();
            });
        }
    }

    /// 发送测试帧
    #[task(priority = 1, local = [transmitter, tx_count: u32 = 0], shared = [console])]
    async fn ir_transmit(mut ctx: ir_transmit::Context) {
        *ctx.local.tx_count += 1;
        let count = *ctx.local.tx_count;

        ctx.local.transmitter.send(IR_TX_ADDRESS, IR_TX_COMMAND);

        info!("[TX {}] sent {=u8:#x}/{=u8:#x}", count, IR_TX_ADDRESS, IR_TX_COMMAND);
        ctx.shared.console.lock(|console| {
            report::write_transmit(console, count, IR_TX_ADDRESS, IR_TX_COMMAND).ok();
        });
    }

    /// 主循环: 处理边沿、检测信号结束、轮询按键
    #[idle(local = [edge_consumer, ir_receiver, ir_sender, button], shared = [clock, led])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            let receiver = &mut *ctx.local.ir_receiver;

            if ctx.local.edge_consumer.drain_into(receiver) > 0 {
                ctx.shared.led.lock(|led| led.toggle());
            }

            let now = ctx.shared.clock.lock(|clock| clock.now());
            while let Some(event) = receiver.poll(now) {
                if ctx.local.ir_sender.try_send(event).is_err() {
                    warn!("ir event channel full, result dropped");
                }
            }

            if ctx.local.button.poll(now) && ir_transmit::spawn().is_err() {
                warn!("transmission already in progress");
            }

            asm::delay(IDLE_POLL_CYCLES);
        }
    }
}
