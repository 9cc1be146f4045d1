//! 边沿记录

use core::fmt;

use heapless::Vec;

use crate::clock::Instant;
use crate::config::IR_MAX_EDGES;

/// 边沿方向
/// 接收头低电平有效: 下降沿为脉冲开始, 上升沿为脉冲结束
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeKind {
    Falling,
    Rising,
}

impl EdgeKind {
    /// 由边沿之后的引脚电平得到边沿方向
    pub fn from_level(is_high: bool) -> Self {
        if is_high {
            EdgeKind::Rising
        } else {
            EdgeKind::Falling
        }
    }

    /// 边沿之后的电平
    pub fn level(self) -> bool {
        self == EdgeKind::Rising
    }
}

/// 单个边沿, 时间相对于本次信号的第一个边沿
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edge {
    pub time_us: u32,
    pub kind: EdgeKind,
}

impl Edge {
    pub const fn new(time_us: u32, kind: EdgeKind) -> Self {
        Edge { time_us, kind }
    }

    pub const fn falling(time_us: u32) -> Self {
        Edge::new(time_us, EdgeKind::Falling)
    }

    pub const fn rising(time_us: u32) -> Self {
        Edge::new(time_us, EdgeKind::Rising)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let level = if self.kind.level() { 'H' } else { 'L' };
        write!(f, "{} {}us", level, self.time_us)
    }
}

/// 中断中采集到的边沿事件, 绝对时间
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    pub at: Instant,
    pub kind: EdgeKind,
}

impl EdgeEvent {
    pub const fn new(at: Instant, kind: EdgeKind) -> Self {
        EdgeEvent { at, kind }
    }
}

/// 定长边沿缓冲区
/// 溢出策略: 拒绝新边沿并计数
#[derive(Clone, Debug, Default)]
pub struct EdgeBuffer<const N: usize = IR_MAX_EDGES> {
    edges: Vec<Edge, N>,
    dropped: u16,
}

impl<const N: usize> EdgeBuffer<N> {
    pub const fn new() -> Self {
        EdgeBuffer {
            edges: Vec::new(),
            dropped: 0,
        }
    }

    /// 追加边沿
    /// 缓冲区已满时返回 false
    pub fn push(&mut self, edge: Edge) -> bool {
        match self.edges.push(edge) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                false
            }
        }
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.edges.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// 因溢出被丢弃的边沿数
    pub fn dropped(&self) -> u16 {
        self.dropped
    }

    pub fn last(&self) -> Option<&Edge> {
        self.edges.last()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> FromIterator<Edge> for EdgeBuffer<N> {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut buffer = EdgeBuffer::new();
        for edge in iter {
            buffer.push(edge);
        }
        buffer
    }
}
