//! Integration tests for the NEC edge decoder

mod common;
use common::*;

use nucleo_f103_ir::ir::encode::{self, Pulse};
use nucleo_f103_ir::ir::nec::{collect_bits, NEC_FRAME_BITS};
use nucleo_f103_ir::ir::{decode, DecodeError, Edge, EdgeBuffer, NecFrame, NecTiming, Protocol};
use proptest::prelude::*;

fn timing() -> NecTiming {
    NecTiming::default()
}

#[test]
fn default_timing_uses_quarter_tolerance() {
    let t = timing();
    assert_eq!((t.leader_mark_min, t.leader_mark_max), (6750, 11250));
    assert_eq!((t.leader_space_min, t.leader_space_max), (3375, 5625));
    assert_eq!((t.repeat_space_min, t.repeat_space_max), (1687, 2812));
    assert_eq!(t.bit_threshold, 1100);
    assert_eq!(t.min_bits, 24);
}

#[test]
fn decodes_standard_frame() {
    let edges = frame_edges(0x00, 0x45);
    assert_eq!(edges.len(), 68);

    let frame = decode(edges.as_slice(), &timing()).unwrap();
    assert_eq!(frame.address, 0x00);
    assert_eq!(frame.address_inv, 0xFF);
    assert_eq!(frame.command, 0x45);
    assert_eq!(frame.command_inv, 0xBA);
    assert_eq!(frame.raw, 0xBA45_FF00);
    assert_eq!(frame.bit_count, 32);
    assert!(!frame.repeat);
    assert!(frame.checksum_ok());
    assert!(frame.is_complete());
    assert_eq!(frame.protocol(), Protocol::Standard { address: 0x00 });
}

#[test]
fn bits_are_assembled_lsb_first() {
    // address 0x01: only the very first data bit has a long space
    let edges = frame_edges(0x01, 0x80);
    let slice = edges.as_slice();
    assert_eq!(slice[4].time_us - slice[3].time_us, 1690);
    assert_eq!(slice[6].time_us - slice[5].time_us, 560);

    let frame = decode(slice, &timing()).unwrap();
    assert_eq!(frame.address, 0x01);
    assert_eq!(frame.address_inv, 0xFE);
    assert_eq!(frame.command, 0x80);
    assert_eq!(frame.command_inv, 0x7F);
}

#[test]
fn hand_written_edges_decode_to_address_zero() {
    // leader, then address 0x00 (eight short spaces) and its complement 0xFF
    let mut pairs = vec![(9000, 4500)];
    pairs.extend(std::iter::repeat((560, 560)).take(8));
    pairs.extend(std::iter::repeat((560, 1690)).take(8));
    pairs.extend(std::iter::repeat((560, 560)).take(8));
    pairs.extend(std::iter::repeat((560, 1690)).take(8));
    pairs.push((560, 0));
    let edges = edges_from_pairs(&pairs);

    let expected = [
        Edge::falling(0),
        Edge::rising(9000),
        Edge::falling(13500),
        Edge::rising(14060),
        Edge::falling(14620),
    ];
    assert_eq!(&edges.as_slice()[..5], &expected);

    let frame = decode(edges.as_slice(), &timing()).unwrap();
    assert_eq!(frame.address, 0x00);
    assert_eq!(frame.address_inv, 0xFF);
    assert_eq!(frame.command, 0x00);
    assert_eq!(frame.command_inv, 0xFF);
}

#[test]
fn repeat_code_has_no_data() {
    for space in [2250, 2500, 2800] {
        let edges = edges_from_pairs(&[(9000, space), (560, 0)]);
        let frame = decode(edges.as_slice(), &timing()).unwrap();
        assert!(frame.repeat, "space {} should be a repeat", space);
        assert_eq!(frame, NecFrame::repeat());
        assert_eq!(frame.bit_count, 0);
        assert_eq!(frame.protocol(), Protocol::Repeat);
    }
}

#[test]
fn encoded_repeat_is_recognised() {
    let edges = repeat_edges();
    assert_eq!(edges.len(), 4);
    assert!(decode(edges.as_slice(), &timing()).unwrap().repeat);
}

#[test]
fn checksum_failure_still_surfaces_bytes() {
    let raw = u32::from_le_bytes([0x10, 0x10, 0x20, 0x20]);
    let frame = decode(raw_edges(raw).as_slice(), &timing()).unwrap();

    assert_eq!(frame.raw, raw);
    assert_eq!(frame.address, 0x10);
    assert_eq!(frame.address_inv, 0x10);
    assert_eq!(frame.command, 0x20);
    assert_eq!(frame.command_inv, 0x20);
    assert!(!frame.address_valid());
    assert!(!frame.command_valid());
    assert!(!frame.checksum_ok());
    assert_eq!(frame.protocol(), Protocol::ChecksumError);
}

#[test]
fn address_checksum_failure_only_is_extended_nec() {
    let edges: EdgeBuffer = encode::pulses_to_edges(&encode::encode_extended(0x1234, 0x05));
    let frame = decode(edges.as_slice(), &timing()).unwrap();

    assert!(!frame.address_valid());
    assert!(frame.command_valid());
    assert_eq!(frame.extended_address(), 0x1234);
    assert_eq!(frame.protocol(), Protocol::Extended { address: 0x1234 });
}

#[test]
fn too_few_bits_fails() {
    let mut pairs = vec![(9000, 4500)];
    pairs.extend(std::iter::repeat((560, 1690)).take(20));
    pairs.push((560, 0));
    let edges = edges_from_pairs(&pairs);

    let err = decode(edges.as_slice(), &timing()).unwrap_err();
    assert_eq!(
        err,
        DecodeError::TooFewBits {
            bits: 20,
            raw: 0x000F_FFFF
        }
    );
}

#[test]
fn truncated_frame_above_minimum_is_incomplete() {
    let mut pairs = vec![(9000, 4500)];
    pairs.extend(std::iter::repeat((560, 560)).take(28));
    pairs.push((560, 0));
    let edges = edges_from_pairs(&pairs);

    let frame = decode(edges.as_slice(), &timing()).unwrap();
    assert_eq!(frame.bit_count, 28);
    assert!(!frame.is_complete());
}

#[test]
fn minimum_bits_is_configurable() {
    let mut pairs = vec![(9000, 4500)];
    pairs.extend(std::iter::repeat((560, 560)).take(16));
    pairs.push((560, 0));
    let edges = edges_from_pairs(&pairs);

    assert!(decode(edges.as_slice(), &timing()).is_err());

    let relaxed = NecTiming {
        min_bits: 16,
        ..NecTiming::default()
    };
    assert_eq!(decode(edges.as_slice(), &relaxed).unwrap().bit_count, 16);
}

#[test]
fn leader_mark_outside_tolerance_fails() {
    for mark in [6000, 6749, 11251, 12000] {
        let mut pulses: Vec<Pulse> = encode::encode(0x00, 0x45).to_vec();
        pulses[0].mark_us = mark;
        let edges: EdgeBuffer = encode::pulses_to_edges(&pulses);

        assert_eq!(
            decode(edges.as_slice(), &timing()),
            Err(DecodeError::LeaderMark { us: mark })
        );
    }
}

#[test]
fn leader_mark_at_tolerance_edge_decodes() {
    for mark in [6750, 11250] {
        let mut pulses: Vec<Pulse> = encode::encode(0x00, 0x45).to_vec();
        pulses[0].mark_us = mark;
        let edges: EdgeBuffer = encode::pulses_to_edges(&pulses);

        assert_eq!(decode(edges.as_slice(), &timing()).unwrap().command, 0x45);
    }
}

#[test]
fn leader_space_between_repeat_and_frame_fails() {
    let edges = edges_from_pairs(&[(9000, 3000), (560, 560), (560, 0)]);
    assert_eq!(
        decode(edges.as_slice(), &timing()),
        Err(DecodeError::LeaderSpace { us: 3000 })
    );
}

#[test]
fn too_few_edges_fails() {
    let edges = [Edge::falling(0), Edge::rising(9000), Edge::falling(13500)];
    assert_eq!(
        decode(&edges, &timing()),
        Err(DecodeError::TooFewEdges { count: 3 })
    );
    assert_eq!(
        decode(&[], &timing()),
        Err(DecodeError::TooFewEdges { count: 0 })
    );
}

#[test]
fn glitch_marks_are_skipped() {
    let mut pulses = vec![Pulse::new(9000, 4500), Pulse::new(100, 200)];
    pulses.extend_from_slice(&encode::encode(0x00, 0x16)[1..]);
    let edges: EdgeBuffer = encode::pulses_to_edges(&pulses);

    let frame = decode(edges.as_slice(), &timing()).unwrap();
    assert_eq!(frame.bit_count, 32);
    assert_eq!(frame.command, 0x16);
    assert!(frame.checksum_ok());
}

#[test]
fn collect_bits_stops_at_frame_length() {
    // a frame followed directly by a repeat code in the same burst
    let mut pulses: Vec<Pulse> = encode::encode(0x00, 0x07).to_vec();
    pulses.last_mut().unwrap().space_us = 40_000;
    pulses.extend_from_slice(&encode::encode_repeat());
    let edges: EdgeBuffer = encode::pulses_to_edges(&pulses);

    let (raw, bits) = collect_bits(edges.as_slice(), &timing());
    assert_eq!(bits, NEC_FRAME_BITS);
    assert_eq!(raw, u32::from_le_bytes([0x00, 0xFF, 0x07, 0xF8]));
}

#[test]
fn decode_error_display() {
    assert_eq!(
        DecodeError::LeaderMark { us: 12000 }.to_string(),
        "bad leader pulse (12000 us)"
    );
    assert_eq!(
        DecodeError::TooFewBits { bits: 3, raw: 0 }.to_string(),
        "too few bits (3)"
    );
}

fn jittered_edges(raw: u32, jitter: &[i32]) -> EdgeBuffer {
    let pulses: Vec<Pulse> = encode::encode_raw(raw)
        .iter()
        .zip(jitter.chunks(2))
        .enumerate()
        .map(|(i, (p, j))| {
            // leader pulse tolerates more drift than the data bits
            let scale = if i == 0 { 5 } else { 1 };
            let mark = (p.mark_us as i32 + j[0] * scale) as u32;
            let space = if p.space_us == 0 {
                0
            } else {
                (p.space_us as i32 + j[1] * scale) as u32
            };
            Pulse::new(mark, space)
        })
        .collect();
    encode::pulses_to_edges(&pulses)
}

proptest! {
    #[test]
    fn any_word_round_trips(raw in any::<u32>()) {
        let frame = decode(raw_edges(raw).as_slice(), &timing()).unwrap();
        prop_assert_eq!(frame.raw, raw);
        prop_assert_eq!(frame.bit_count, 32);
        prop_assert_eq!(
            [frame.address, frame.address_inv, frame.command, frame.command_inv],
            raw.to_le_bytes()
        );
    }

    #[test]
    fn standard_frames_pass_checksum(address in any::<u8>(), command in any::<u8>()) {
        let frame = decode(frame_edges(address, command).as_slice(), &timing()).unwrap();
        prop_assert_eq!(frame.protocol(), Protocol::Standard { address });
        prop_assert_eq!(frame.command, command);
    }

    #[test]
    fn receiver_jitter_is_tolerated(
        raw in any::<u32>(),
        jitter in prop::collection::vec(-100i32..=100, 68),
    ) {
        let edges = jittered_edges(raw, &jitter);
        let frame = decode(edges.as_slice(), &timing()).unwrap();
        prop_assert_eq!(frame.raw, raw);
    }
}

/// Leader followed by 24 zero bits, the first of which uses the given space
fn first_bit_space(space: u32) -> EdgeBuffer {
    let mut pairs = vec![(9000, 4500), (560, space)];
    pairs.extend(std::iter::repeat((560, 560)).take(23));
    pairs.push((560, 0));
    edges_from_pairs(&pairs)
}

#[test]
fn bit_threshold_boundary() {
    let zero = decode(first_bit_space(1099).as_slice(), &timing()).unwrap();
    assert_eq!(zero.raw, 0);

    let one = decode(first_bit_space(1100).as_slice(), &timing()).unwrap();
    assert_eq!(one.raw, 1);
    assert_eq!(one.bit_count, 24);
}

fn with_leader_space(space: u32) -> EdgeBuffer {
    let mut pulses: Vec<Pulse> = encode::encode(0x00, 0x44).to_vec();
    pulses[0].space_us = space;
    encode::pulses_to_edges(&pulses)
}

#[test]
fn leader_space_window_boundaries() {
    for space in [3375, 5625] {
        let frame = decode(with_leader_space(space).as_slice(), &timing()).unwrap();
        assert_eq!(frame.command, 0x44, "space {}", space);
    }
    for space in [3374, 5626] {
        assert_eq!(
            decode(with_leader_space(space).as_slice(), &timing()),
            Err(DecodeError::LeaderSpace { us: space })
        );
    }
}

#[test]
fn bit_mark_window_upper_boundary() {
    let mut pulses: Vec<Pulse> = encode::encode(0x00, 0x43).to_vec();
    pulses[1].mark_us = 1000;
    let edges: EdgeBuffer = encode::pulses_to_edges(&pulses);
    let frame = decode(edges.as_slice(), &timing()).unwrap();
    assert_eq!(frame.bit_count, 32);
    assert!(frame.checksum_ok());

    // the first address bit is skipped, so everything shifts down by one
    pulses[1].mark_us = 1001;
    let edges: EdgeBuffer = encode::pulses_to_edges(&pulses);
    let frame = decode(edges.as_slice(), &timing()).unwrap();
    assert_eq!(frame.bit_count, 31);
    assert!(!frame.is_complete());
    assert_eq!(frame.raw, u32::from_le_bytes([0x00, 0xFF, 0x43, 0xBC]) >> 1);
}

#[test]
fn repeat_window_boundaries() {
    for space in [1687, 2812] {
        let edges = edges_from_pairs(&[(9000, space), (560, 0)]);
        assert!(decode(edges.as_slice(), &timing()).unwrap().repeat);
    }
    for space in [1686, 2813] {
        let edges = edges_from_pairs(&[(9000, space), (560, 0)]);
        assert_eq!(
            decode(edges.as_slice(), &timing()),
            Err(DecodeError::LeaderSpace { us: space })
        );
    }
}

#[test]
fn tolerance_above_full_range_saturates() {
    let t = NecTiming::with_tolerance(150);
    assert_eq!(t.leader_mark_min, 0);
    assert_eq!(t.leader_mark_max, 22_500);
    assert_eq!(t.repeat_space_min, 0);
}

#[test]
fn stray_edge_does_not_break_bit_pairing() {
    let clean = frame_edges(0x00, 0x45);
    let mut edges: Vec<Edge> = clean.as_slice().to_vec();
    // duplicate falling edge right where the fifth bit starts
    let duplicate = edges[10];
    edges.insert(10, duplicate);

    let (raw, bits) = collect_bits(&edges, &timing());
    assert_eq!(bits, NEC_FRAME_BITS);
    assert_eq!(raw, 0xBA45_FF00);

    let frame = decode(&edges, &timing()).unwrap();
    assert_eq!(frame.command, 0x45);
    assert!(frame.checksum_ok());
}
