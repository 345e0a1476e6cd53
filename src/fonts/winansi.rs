//! WinAnsiEncoding (Windows code page 1252) as used by simple PDF fonts.

/// Byte substituted for characters the encoding cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Characters at codes 0x80..=0x9F; `None` marks undefined slots.
const HIGH_CONTROL: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Encode one character, or `None` if WinAnsi has no slot for it.
pub fn encode_char(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u32 as u8),
        _ => HIGH_CONTROL
            .iter()
            .position(|slot| *slot == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Decode one code back to its character.
pub fn decode_byte(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        0x80..=0x9F => HIGH_CONTROL[(code - 0x80) as usize],
        _ => None,
    }
}

/// Encode a string, replacing unrepresentable characters with `?`.
///
/// Tabs and other control characters are mapped to a space so that a
/// stray tab in user input still renders as whitespace.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c.is_whitespace() && encode_char(c).is_none() {
                b' '
            } else {
                encode_char(c).unwrap_or(REPLACEMENT)
            }
        })
        .collect()
}

/// Whether every character of `text` survives encoding unchanged.
pub fn is_encodable(text: &str) -> bool {
    text.chars()
        .all(|c| encode_char(c).is_some() || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode("Cel: 614"), b"Cel: 614".to_vec());
    }

    #[test]
    fn test_spanish_letters() {
        assert_eq!(encode("ñ"), vec![0xF1]);
        assert_eq!(encode("Dirección"), b"Direcci\xF3n".to_vec());
        assert_eq!(encode("¿¡"), vec![0xBF, 0xA1]);
    }

    #[test]
    fn test_high_control_range() {
        assert_eq!(encode_char('€'), Some(0x80));
        assert_eq!(encode_char('—'), Some(0x97));
        assert_eq!(decode_byte(0x93), Some('“'));
        assert_eq!(decode_byte(0x81), None);
    }

    #[test]
    fn test_unencodable_replaced() {
        assert_eq!(encode("a漢b"), b"a?b".to_vec());
        assert!(!is_encodable("漢"));
        assert!(is_encodable("Atentamente:\t"));
    }

    #[test]
    fn test_tab_becomes_space() {
        assert_eq!(encode("a\tb"), b"a b".to_vec());
    }
}
