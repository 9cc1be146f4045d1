//! Shared test infrastructure for the IR integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayUs;
use nucleo_f103_ir::clock::{Clock, Instant};
use nucleo_f103_ir::ir::encode::{self, pulses_to_edges, Pulse};
use nucleo_f103_ir::ir::{Carrier, Edge, EdgeBuffer, EdgeEvent, IrReceiver};

// ============================================================================
// Fake clock
// ============================================================================

/// Manually advanced microsecond clock
#[derive(Debug, Default)]
pub struct FakeClock {
    now: u32,
}

impl FakeClock {
    pub fn starting_at(us: u32) -> Self {
        FakeClock { now: us }
    }

    pub fn advance_us(&mut self, us: u32) {
        self.now = self.now.wrapping_add(us);
    }

    pub fn advance_ms(&mut self, ms: u32) {
        self.advance_us(ms * 1000);
    }
}

impl Clock for FakeClock {
    fn now(&mut self) -> Instant {
        Instant::from_micros(self.now)
    }
}

// ============================================================================
// Mock carrier / delay sharing one timeline
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    On,
    Off,
    Delay(u32),
}

pub type Timeline = Rc<RefCell<Vec<Op>>>;

pub struct MockCarrier(pub Timeline);

impl Carrier for MockCarrier {
    fn on(&mut self) {
        self.0.borrow_mut().push(Op::On);
    }

    fn off(&mut self) {
        self.0.borrow_mut().push(Op::Off);
    }
}

pub struct MockDelay(pub Timeline);

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(Op::Delay(us));
    }
}

/// Rebuild the mark/space pulses a carrier was keyed with
pub fn timeline_to_pulses(ops: &[Op]) -> Vec<Pulse> {
    let mut pulses = Vec::new();
    let mut carrier_on = false;
    let mut current: Option<Pulse> = None;

    for op in ops {
        match *op {
            Op::On => {
                if let Some(p) = current.take() {
                    pulses.push(p);
                }
                carrier_on = true;
                current = Some(Pulse::new(0, 0));
            }
            Op::Off => carrier_on = false,
            Op::Delay(us) => {
                if let Some(p) = current.as_mut() {
                    if carrier_on {
                        p.mark_us += us;
                    } else {
                        p.space_us += us;
                    }
                }
            }
        }
    }
    if let Some(p) = current.take() {
        pulses.push(p);
    }
    pulses
}

// ============================================================================
// Edge synthesis
// ============================================================================

pub fn frame_edges(address: u8, command: u8) -> EdgeBuffer {
    pulses_to_edges(&encode::encode(address, command))
}

pub fn raw_edges(raw: u32) -> EdgeBuffer {
    pulses_to_edges(&encode::encode_raw(raw))
}

pub fn repeat_edges() -> EdgeBuffer {
    pulses_to_edges(&encode::encode_repeat())
}

/// Build edges from explicit (mark, space) pairs
pub fn edges_from_pairs(pairs: &[(u32, u32)]) -> EdgeBuffer {
    let pulses: Vec<Pulse> = pairs.iter().map(|&(m, s)| Pulse::new(m, s)).collect();
    pulses_to_edges(&pulses)
}

/// Replay relative edges into a receiver as absolute events starting at `start`
pub fn feed(receiver: &mut IrReceiver, edges: &[Edge], start: Instant) -> Instant {
    let mut last = start;
    for edge in edges {
        last = start.add_micros(edge.time_us);
        receiver.on_edge(EdgeEvent::new(last, edge.kind));
    }
    last
}
