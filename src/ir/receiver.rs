//! 红外接收状态机
//!
//! 空闲时只有下降沿会开始一次信号; 接收过程中记录每个边沿相对第一个边沿的时间;
//! 边沿间隔超过超时时间后尝试解码, 随后复位等待下一次信号。
//! 间隔既可由 `poll` 发现, 也可由迟到的下一个边沿发现; 后者的结果暂存到下一次 `poll`。

use heapless::{Deque, Vec};

use crate::clock::Instant;
use crate::config::{IR_MAX_EDGES, IR_PENDING_EVENTS, IR_RAW_DUMP_EDGES, IR_SIGNAL_TIMEOUT_MS};

use super::edge::{Edge, EdgeBuffer, EdgeEvent, EdgeKind};
use super::nec::{self, DecodeError, NecFrame, NecTiming};

/// 解码失败时保留的诊断信息
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeFailure {
    pub error: DecodeError,
    /// 前若干个原始边沿
    pub edges: Vec<Edge, IR_RAW_DUMP_EDGES>,
    /// 尝试逐位解析的结果
    pub raw: u32,
    pub bits: u8,
}

/// 一次信号的处理结果
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrEvent {
    /// 自上电起的信号序号, 从 1 开始
    pub sequence: u32,
    pub edge_count: usize,
    /// 缓冲区溢出丢弃的边沿数
    pub dropped: u16,
    pub result: Result<NecFrame, DecodeFailure>,
}

impl IrEvent {
    pub fn frame(&self) -> Option<&NecFrame> {
        self.result.as_ref().ok()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Receiving { start: Instant, last: Instant },
}

/// 红外接收器
pub struct IrReceiver {
    timing: NecTiming,
    timeout_us: u32,
    state: State,
    edges: EdgeBuffer<IR_MAX_EDGES>,
    sequence: u32,
    /// 已结束待取走的信号
    pending: Deque<IrEvent, IR_PENDING_EVENTS>,
}

impl IrReceiver {
    pub fn new() -> Self {
        Self::with_timing(NecTiming::default(), IR_SIGNAL_TIMEOUT_MS)
    }

    pub fn with_timing(timing: NecTiming, timeout_ms: u32) -> Self {
        IrReceiver {
            timing,
            timeout_us: timeout_ms.saturating_mul(1000),
            state: State::Idle,
            edges: EdgeBuffer::new(),
            sequence: 0,
            pending: Deque::new(),
        }
    }

    pub fn timing(&self) -> &NecTiming {
        &self.timing
    }

    /// 是否正在接收
    pub fn is_receiving(&self) -> bool {
        matches!(self.state, State::Receiving { .. })
    }

    /// 当前信号已记录的边沿
    pub fn edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    /// 已开始接收的信号总数
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// 记录一个边沿
    /// 返回 true 表示开始了新的信号
    pub fn on_edge(&mut self, event: EdgeEvent) -> bool {
        match self.state {
            State::Idle => self.start(event),
            State::Receiving { start, last } => {
                // 与上一个边沿的间隔已超时, 当前信号结束
                if event.at.micros_since(last) > self.timeout_us {
                    self.complete();
                    return self.start(event);
                }

                self.edges
                    .push(Edge::new(event.at.micros_since(start), event.kind));
                self.state = State::Receiving {
                    start,
                    last: event.at,
                };
                false
            }
        }
    }

    /// 检查信号是否结束
    /// 超时后解码并复位, 返回处理结果; 暂存的结果按先后顺序返回
    pub fn poll(&mut self, now: Instant) -> Option<IrEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let State::Receiving { last, .. } = self.state else {
            return None;
        };
        if now.micros_since(last) <= self.timeout_us {
            return None;
        }

        self.complete();
        self.pending.pop_front()
    }

    /// 立即对已记录的边沿解码, 不复位
    pub fn decode(&self) -> Result<NecFrame, DecodeError> {
        nec::decode(self.edges.as_slice(), &self.timing)
    }

    /// 清空接收状态和暂存结果, 信号序号保留
    pub fn reset(&mut self) {
        self.pending.clear();
        self.idle();
    }

    fn idle(&mut self) {
        self.state = State::Idle;
        self.edges.clear();
    }

    /// 下降沿开始新的信号
    fn start(&mut self, event: EdgeEvent) -> bool {
        if event.kind != EdgeKind::Falling {
            return false;
        }
        self.edges.clear();
        self.edges.push(Edge::falling(0));
        self.sequence = self.sequence.wrapping_add(1);
        self.state = State::Receiving {
            start: event.at,
            last: event.at,
        };
        true
    }

    /// 结束当前信号, 结果放入暂存队列
    fn complete(&mut self) {
        let mut event = self.finish();
        self.idle();
        while let Err(rejected) = self.pending.push_back(event) {
            self.pending.pop_front();
            event = rejected;
        }
    }

    fn finish(&self) -> IrEvent {
        let edges = self.edges.as_slice();
        let result = self.decode().map_err(|error| {
            let (raw, bits) = nec::collect_bits(edges, &self.timing);
            DecodeFailure {
                error,
                edges: edges.iter().take(IR_RAW_DUMP_EDGES).copied().collect(),
                raw,
                bits,
            }
        });

        IrEvent {
            sequence: self.sequence,
            edge_count: edges.len(),
            dropped: self.edges.dropped(),
            result,
        }
    }
}

impl Default for IrReceiver {
    fn default() -> Self {
        Self::new()
    }
}
