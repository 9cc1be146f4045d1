//! 常见 21 键 NEC 遥控器键名

/// 按地址和命令查询键名
pub fn key_name(address: u8, command: u8) -> Option<&'static str> {
    if address != 0x00 {
        return None;
    }

    let name = match command {
        0x45 => "CH-",
        0x46 => "CH",
        0x47 => "CH+",
        0x44 => "PREV",
        0x40 => "NEXT",
        0x43 => "PLAY/PAUSE",
        0x07 => "VOL-",
        0x15 => "VOL+",
        0x09 => "EQ",
        0x16 => "0",
        0x19 => "100+",
        0x0D => "200+",
        0x0C => "1",
        0x18 => "2",
        0x5E => "3",
        0x08 => "4",
        0x1C => "5",
        0x5A => "6",
        0x42 => "7",
        0x52 => "8",
        0x4A => "9",
        _ => return None,
    };
    Some(name)
}
