//! # NEC 红外协议解码
//!
//! 帧格式 (时间单位 us, 接收头输出低电平为载波):
//!
//! | 引导脉冲 | 引导间隔 | 地址 | 地址反码 | 命令 | 命令反码 | 停止位 |
//! |----------|----------|------|----------|------|----------|--------|
//! | 9000     | 4500     | 8 位 | 8 位     | 8 位 | 8 位     | 560    |
//!
//! 重复码为 9000 脉冲 + 2250 间隔 + 停止位。
//!
//! 每个数据位为 560 的脉冲, 其后的间隔决定位值: 560 为 0, 1690 为 1。
//! 数据低位先发, 32 位字依次为地址、地址反码、命令、命令反码。
//!
//! 边沿序列: edge[0] 下降沿 (引导脉冲开始), edge[1] 上升沿, edge[2] 下降沿
//! (第一个数据位开始)。第 n 位由 edge[2+2n] 下降沿、edge[3+2n] 上升沿组成,
//! 间隔为 edge[4+2n] - edge[3+2n]。

use core::fmt;

use crate::config::{
    NEC_BIT_MARK_MAX_US, NEC_BIT_MARK_MIN_US, NEC_BIT_THRESHOLD_US, NEC_LEADER_MARK_US,
    NEC_LEADER_SPACE_US, NEC_MIN_BITS, NEC_REPEAT_SPACE_US, NEC_TOLERANCE_PERCENT,
};

use super::edge::{Edge, EdgeKind};

/// 一帧的数据位数
pub const NEC_FRAME_BITS: u8 = 32;

/// 解码时序参数
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NecTiming {
    pub leader_mark_min: u32,
    pub leader_mark_max: u32,
    pub leader_space_min: u32,
    pub leader_space_max: u32,
    pub repeat_space_min: u32,
    pub repeat_space_max: u32,
    pub bit_mark_min: u32,
    pub bit_mark_max: u32,
    /// 间隔 >= 阈值为 1
    pub bit_threshold: u32,
    /// 少于该位数视为解码失败
    pub min_bits: u8,
}

impl NecTiming {
    /// 以标称值和百分比容差构造
    pub const fn with_tolerance(percent: u32) -> Self {
        NecTiming {
            leader_mark_min: lower(NEC_LEADER_MARK_US, percent),
            leader_mark_max: upper(NEC_LEADER_MARK_US, percent),
            leader_space_min: lower(NEC_LEADER_SPACE_US, percent),
            leader_space_max: upper(NEC_LEADER_SPACE_US, percent),
            repeat_space_min: lower(NEC_REPEAT_SPACE_US, percent),
            repeat_space_max: upper(NEC_REPEAT_SPACE_US, percent),
            bit_mark_min: NEC_BIT_MARK_MIN_US,
            bit_mark_max: NEC_BIT_MARK_MAX_US,
            bit_threshold: NEC_BIT_THRESHOLD_US,
            min_bits: NEC_MIN_BITS,
        }
    }

    pub fn is_leader_mark(&self, us: u32) -> bool {
        (self.leader_mark_min..=self.leader_mark_max).contains(&us)
    }

    pub fn is_leader_space(&self, us: u32) -> bool {
        (self.leader_space_min..=self.leader_space_max).contains(&us)
    }

    pub fn is_repeat_space(&self, us: u32) -> bool {
        (self.repeat_space_min..=self.repeat_space_max).contains(&us)
    }

    pub fn is_bit_mark(&self, us: u32) -> bool {
        (self.bit_mark_min..=self.bit_mark_max).contains(&us)
    }
}

impl Default for NecTiming {
    fn default() -> Self {
        NecTiming::with_tolerance(NEC_TOLERANCE_PERCENT)
    }
}

// 容差超过 100% 时下限为 0
const fn lower(nominal: u32, percent: u32) -> u32 {
    nominal * 100_u32.saturating_sub(percent) / 100
}

const fn upper(nominal: u32, percent: u32) -> u32 {
    nominal.saturating_mul(100_u32.saturating_add(percent)) / 100
}

/// 协议类型
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// 地址和命令校验均正确
    Standard { address: u8 },
    /// 仅命令校验正确, 16 位地址
    Extended { address: u16 },
    /// 命令校验失败
    ChecksumError,
    /// 重复码
    Repeat,
}

/// 解码得到的一帧
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NecFrame {
    pub address: u8,
    pub address_inv: u8,
    pub command: u8,
    pub command_inv: u8,
    /// 原始 32 位数据, 低位先收
    pub raw: u32,
    pub bit_count: u8,
    pub repeat: bool,
}

impl NecFrame {
    /// 重复码
    pub const fn repeat() -> Self {
        NecFrame {
            address: 0,
            address_inv: 0,
            command: 0,
            command_inv: 0,
            raw: 0,
            bit_count: 0,
            repeat: true,
        }
    }

    /// 由原始数据拆分字段
    pub const fn from_raw(raw: u32, bit_count: u8) -> Self {
        let bytes = raw.to_le_bytes();
        NecFrame {
            address: bytes[0],
            address_inv: bytes[1],
            command: bytes[2],
            command_inv: bytes[3],
            raw,
            bit_count,
            repeat: false,
        }
    }

    pub fn address_valid(&self) -> bool {
        self.address ^ self.address_inv == 0xFF
    }

    pub fn command_valid(&self) -> bool {
        self.command ^ self.command_inv == 0xFF
    }

    /// 地址与命令校验均正确
    pub fn checksum_ok(&self) -> bool {
        self.address_valid() && self.command_valid()
    }

    /// 收齐 32 位
    pub fn is_complete(&self) -> bool {
        self.repeat || self.bit_count >= NEC_FRAME_BITS
    }

    /// 扩展 NEC 的 16 位地址
    pub fn extended_address(&self) -> u16 {
        u16::from_le_bytes([self.address, self.address_inv])
    }

    pub fn protocol(&self) -> Protocol {
        if self.repeat {
            Protocol::Repeat
        } else if self.checksum_ok() {
            Protocol::Standard {
                address: self.address,
            }
        } else if self.command_valid() {
            Protocol::Extended {
                address: self.extended_address(),
            }
        } else {
            Protocol::ChecksumError
        }
    }
}

/// 解码失败原因
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// 边沿数不足以构成引导码
    TooFewEdges { count: usize },
    /// 引导脉冲超出容差
    LeaderMark { us: u32 },
    /// 引导间隔既不是帧也不是重复码
    LeaderSpace { us: u32 },
    /// 有效位数不足
    TooFewBits { bits: u8, raw: u32 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeError::TooFewEdges { count } => write!(f, "too few edges ({})", count),
            DecodeError::LeaderMark { us } => write!(f, "bad leader pulse ({} us)", us),
            DecodeError::LeaderSpace { us } => write!(f, "bad leader space ({} us)", us),
            DecodeError::TooFewBits { bits, .. } => write!(f, "too few bits ({})", bits),
        }
    }
}

/// 两个边沿之间的时长
/// 索引越界或时间倒序时返回 0
fn duration(edges: &[Edge], from: usize, to: usize) -> u32 {
    match (edges.get(from), edges.get(to)) {
        (Some(a), Some(b)) if to > from => b.time_us.saturating_sub(a.time_us),
        _ => 0,
    }
}

/// 从 edge[2] 开始逐位解析
/// 返回 (原始数据, 位数), 最多 32 位
pub fn collect_bits(edges: &[Edge], timing: &NecTiming) -> (u32, u8) {
    let mut raw = 0_u32;
    let mut bits = 0_u8;

    let mut i = 2;
    while i + 2 < edges.len() && bits < NEC_FRAME_BITS {
        let mark_start = edges[i];
        let mark_end = edges[i + 1];

        // 多出的单个边沿会打乱配对, 逐个边沿前移重新对齐
        if mark_start.kind != EdgeKind::Falling || mark_end.kind != EdgeKind::Rising {
            i += 1;
            continue;
        }
        i += 2;
        if !timing.is_bit_mark(mark_end.time_us.saturating_sub(mark_start.time_us)) {
            continue;
        }

        // 间隔: 本位上升沿到下一个下降沿
        let space = edges[i].time_us.saturating_sub(mark_end.time_us);
        if space >= timing.bit_threshold {
            raw |= 1 << bits;
        }
        bits += 1;
    }

    (raw, bits)
}

/// 解码一次完整的红外信号
pub fn decode(edges: &[Edge], timing: &NecTiming) -> Result<NecFrame, DecodeError> {
    if edges.len() < 4 {
        return Err(DecodeError::TooFewEdges { count: edges.len() });
    }

    let leader_mark = duration(edges, 0, 1);
    if !timing.is_leader_mark(leader_mark) {
        return Err(DecodeError::LeaderMark { us: leader_mark });
    }

    let leader_space = duration(edges, 1, 2);
    if timing.is_repeat_space(leader_space) {
        return Ok(NecFrame::repeat());
    }
    if !timing.is_leader_space(leader_space) {
        return Err(DecodeError::LeaderSpace { us: leader_space });
    }

    let (raw, bits) = collect_bits(edges, timing);
    if bits < timing.min_bits {
        return Err(DecodeError::TooFewBits { bits, raw });
    }

    Ok(NecFrame::from_raw(raw, bits))
}
