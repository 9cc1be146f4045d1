//! 串口输出格式

use core::fmt::{self, Write};

use crate::config::{IR_CARRIER_HZ, IR_RAW_DUMP_EDGES, SYSCLK_HZ};
use crate::ir::keymap::key_name;
use crate::ir::{DecodeFailure, IrEvent, NecFrame, Protocol};

const RULE: &str = "----------------------------------------";

/// 上电信息
pub fn write_banner<W: Write>(w: &mut W) -> fmt::Result {
    write!(w, "\r\n========================================\r\n")?;
    write!(w, "  IR Receiver & NEC Decoder - STM32F103\r\n")?;
    write!(w, "========================================\r\n")?;
    write!(w, " System Clock : {} MHz\r\n", SYSCLK_HZ / 1_000_000)?;
    write!(w, " IR Input     : PA0 (EXTI0)\r\n")?;
    write!(w, " Status LED   : PA5\r\n")?;
    write!(w, " IR LED       : PA8 ({} Hz carrier)\r\n", IR_CARRIER_HZ)?;
    write!(w, " Protocol     : NEC / Extended NEC\r\n")?;
    write!(w, "========================================\r\n")?;
    write!(w, "\r\nWaiting for IR signals...\r\n\r\n")
}

/// 发送提示
pub fn write_transmit<W: Write>(w: &mut W, count: u32, address: u8, command: u8) -> fmt::Result {
    write!(w, "[TX {}] Address: 0x{:02X}, Command: 0x{:02X}\r\n", count, address, command)
}

/// 一次信号的处理结果
pub fn write_event<W: Write>(w: &mut W, event: &IrEvent) -> fmt::Result {
    write!(w, "{}\r\n", RULE)?;
    write!(
        w,
        "[{}] IR Signal Received ({} edges)\r\n",
        event.sequence, event.edge_count
    )?;
    if event.dropped > 0 {
        write!(w, "    Warning: {} edges dropped\r\n", event.dropped)?;
    }

    match &event.result {
        Ok(frame) => write_frame(w, frame)?,
        Err(failure) => write_failure(w, failure, event.edge_count)?,
    }
    write!(w, "\r\n")
}

fn check(ok: bool) -> &'static str {
    if ok {
        "[OK]"
    } else {
        "[ER]"
    }
}

/// 解码成功的帧
pub fn write_frame<W: Write>(w: &mut W, frame: &NecFrame) -> fmt::Result {
    if frame.repeat {
        return write!(w, "    >> REPEAT <<\r\n");
    }

    write!(w, "    Raw (hex)  : 0x{:08X}\r\n", frame.raw)?;
    write!(w, "    Bits       : {}", frame.bit_count)?;
    if !frame.is_complete() {
        write!(w, " (incomplete)")?;
    }
    write!(w, "\r\n")?;
    write!(w, "    Address    : 0x{:02X} ({:3})\r\n", frame.address, frame.address)?;
    write!(
        w,
        "    Address~   : 0x{:02X} ({:3}) {}\r\n",
        frame.address_inv,
        frame.address_inv,
        check(frame.address_valid())
    )?;
    write!(w, "    Command    : 0x{:02X} ({:3})\r\n", frame.command, frame.command)?;
    write!(
        w,
        "    Command~   : 0x{:02X} ({:3}) {}\r\n",
        frame.command_inv,
        frame.command_inv,
        check(frame.command_valid())
    )?;

    match frame.protocol() {
        Protocol::Standard { address } => {
            write!(w, "    * Standard NEC\r\n")?;
            write!(w, "      Device  : 0x{:02X}\r\n", address)?;
            write!(w, "      Key Code: 0x{:02X}\r\n", frame.command)?;
        }
        Protocol::Extended { address } => {
            write!(w, "    * Extended NEC\r\n")?;
            write!(w, "      Device  : 0x{:04X}\r\n", address)?;
            write!(w, "      Key Code: 0x{:02X}\r\n", frame.command)?;
        }
        Protocol::ChecksumError => {
            write!(w, "    * Checksum Error (data may be corrupted)\r\n")?;
        }
        Protocol::Repeat => {}
    }

    if frame.checksum_ok() {
        if let Some(name) = key_name(frame.address, frame.command) {
            write!(w, "      Key     : {}\r\n", name)?;
        }
    }

    write_binary(w, frame.raw)
}

/// 二进制表示, 高位在左, 按字节分组
fn write_binary<W: Write>(w: &mut W, raw: u32) -> fmt::Result {
    write!(w, "    Binary: ")?;
    for i in (0..32).rev() {
        w.write_char(if raw & (1 << i) != 0 { '1' } else { '0' })?;
        if i == 24 || i == 16 || i == 8 {
            w.write_char(' ')?;
        }
    }
    write!(w, "\r\n            CMD~     CMD      ADDR~    ADDR\r\n")
}

/// 解码失败, 输出原始时序
pub fn write_failure<W: Write>(
    w: &mut W,
    failure: &DecodeFailure,
    edge_count: usize,
) -> fmt::Result {
    write!(w, "    Status: Decode failed ({})\r\n", failure.error)?;
    write!(w, "\r\n    Raw Edge Timing (first {}):\r\n", IR_RAW_DUMP_EDGES)?;

    let mut previous: Option<u32> = None;
    for (i, edge) in failure.edges.iter().enumerate() {
        let level = if edge.kind.level() { 'H' } else { 'L' };
        write!(w, "    [{:2}] {} {:7} us", i, level, edge.time_us)?;
        if let Some(prev) = previous {
            write!(w, " (+{:5})", edge.time_us.saturating_sub(prev))?;
        }
        write!(w, "\r\n")?;
        previous = Some(edge.time_us);
    }
    if edge_count > failure.edges.len() {
        write!(w, "    ... +{} more edges\r\n", edge_count - failure.edges.len())?;
    }

    write!(w, "\r\n    Bit decode attempt:\r\n    ")?;
    for i in 0..failure.bits {
        w.write_char(if failure.raw & (1 << i) != 0 { '1' } else { '0' })?;
        if i == 7 || i == 15 || i == 23 {
            w.write_char(' ')?;
        }
    }
    write!(w, " ({} bits)\r\n", failure.bits)?;

    if failure.bits >= 8 {
        write!(w, "    Hex:")?;
        for (n, byte) in failure.raw.to_le_bytes().iter().enumerate() {
            if failure.bits as usize >= (n + 1) * 8 {
                write!(w, " 0x{:02X}", byte)?;
            }
        }
        write!(w, "\r\n")?;
    }
    Ok(())
}
