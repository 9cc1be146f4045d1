//! 全局配置

/// 系统时钟频率, HSI 经 PLL 倍频
pub const SYSCLK_HZ: u32 = 64_000_000;

/// USART2 波特率
pub const USART2_BAUDRATE: u32 = 115200;

/// NEC 引导码脉冲, 单位 us
pub const NEC_LEADER_MARK_US: u32 = 9000;
/// NEC 引导码间隔
pub const NEC_LEADER_SPACE_US: u32 = 4500;
/// NEC 重复码间隔
pub const NEC_REPEAT_SPACE_US: u32 = 2250;
/// NEC 数据位脉冲
pub const NEC_BIT_MARK_US: u32 = 560;
/// NEC 逻辑 0 间隔
pub const NEC_ZERO_SPACE_US: u32 = 560;
/// NEC 逻辑 1 间隔
pub const NEC_ONE_SPACE_US: u32 = 1690;
/// NEC 停止位脉冲
pub const NEC_STOP_MARK_US: u32 = 560;

/// 引导码容差, 百分比
pub const NEC_TOLERANCE_PERCENT: u32 = 25;
/// 数据位脉冲最小宽度, 更短的视为噪声
pub const NEC_BIT_MARK_MIN_US: u32 = 300;
/// 数据位脉冲最大宽度
pub const NEC_BIT_MARK_MAX_US: u32 = 1000;
/// 间隔 >= 该阈值为逻辑 1
pub const NEC_BIT_THRESHOLD_US: u32 = 1100;
/// 解码成功所需的最少位数
pub const NEC_MIN_BITS: u8 = 24;

/// 单次红外信号最多记录的边沿数
pub const IR_MAX_EDGES: usize = 100;
/// 解码失败时输出的原始边沿数
pub const IR_RAW_DUMP_EDGES: usize = 24;
/// 边沿间隔超过该时长视为信号结束, 单位 ms
pub const IR_SIGNAL_TIMEOUT_MS: u32 = 50;
/// 已结束但尚未取走的信号数, 超出时丢弃最早的
pub const IR_PENDING_EVENTS: usize = 4;
/// 中断到主循环的边沿队列长度
pub const IR_EDGE_QUEUE_CAPACITY: usize = 128;

/// 红外载波频率
pub const IR_CARRIER_HZ: u32 = 38_000;
/// 发送测试地址
pub const IR_TX_ADDRESS: u8 = 0x00;
/// 发送测试命令
pub const IR_TX_COMMAND: u8 = 0x12;

/// 按键消抖保持时间, 单位 ms
pub const BUTTON_DEBOUNCE_MS: u32 = 20;
