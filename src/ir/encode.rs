//! NEC 编码
//!
//! 生成载波脉冲序列, 供发送或构造测试边沿使用。

use core::iter;

use heapless::Vec;

use crate::config::{
    NEC_BIT_MARK_US, NEC_LEADER_MARK_US, NEC_LEADER_SPACE_US, NEC_ONE_SPACE_US,
    NEC_REPEAT_SPACE_US, NEC_STOP_MARK_US, NEC_ZERO_SPACE_US,
};

use super::edge::{Edge, EdgeBuffer};

/// 引导码 + 32 位 + 停止位
pub const NEC_FRAME_PULSES: usize = 34;

/// 载波开启 `mark_us` 后关闭 `space_us`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    pub mark_us: u32,
    pub space_us: u32,
}

impl Pulse {
    pub const fn new(mark_us: u32, space_us: u32) -> Self {
        Pulse { mark_us, space_us }
    }

    pub const fn bit(one: bool) -> Self {
        if one {
            Pulse::new(NEC_BIT_MARK_US, NEC_ONE_SPACE_US)
        } else {
            Pulse::new(NEC_BIT_MARK_US, NEC_ZERO_SPACE_US)
        }
    }
}

pub type PulseTrain = Vec<Pulse, NEC_FRAME_PULSES>;

/// 由 32 位原始数据生成完整帧, 低位先发
pub fn encode_raw(raw: u32) -> PulseTrain {
    let leader = Pulse::new(NEC_LEADER_MARK_US, NEC_LEADER_SPACE_US);
    let stop = Pulse::new(NEC_STOP_MARK_US, 0);
    let bits = (0..32).map(|i| Pulse::bit(raw & (1 << i) != 0));

    iter::once(leader).chain(bits).chain(iter::once(stop)).collect()
}

/// 标准 NEC: 地址、地址反码、命令、命令反码
pub fn encode(address: u8, command: u8) -> PulseTrain {
    encode_raw(u32::from_le_bytes([address, !address, command, !command]))
}

/// 扩展 NEC: 16 位地址
pub fn encode_extended(address: u16, command: u8) -> PulseTrain {
    let [lo, hi] = address.to_le_bytes();
    encode_raw(u32::from_le_bytes([lo, hi, command, !command]))
}

/// 重复码
pub fn encode_repeat() -> PulseTrain {
    [
        Pulse::new(NEC_LEADER_MARK_US, NEC_REPEAT_SPACE_US),
        Pulse::new(NEC_STOP_MARK_US, 0),
    ]
    .into_iter()
    .collect()
}

/// 将脉冲序列转换为接收头输出的边沿
/// 载波开启时接收头输出低电平
pub fn pulses_to_edges<const N: usize>(pulses: &[Pulse]) -> EdgeBuffer<N> {
    let mut edges = EdgeBuffer::new();
    let mut t = 0_u32;
    for pulse in pulses {
        edges.push(Edge::falling(t));
        t += pulse.mark_us;
        edges.push(Edge::rising(t));
        t += pulse.space_us;
    }
    edges
}

/// 脉冲序列总时长
pub fn duration_us(pulses: &[Pulse]) -> u32 {
    pulses.iter().map(|p| p.mark_us + p.space_us).sum()
}
