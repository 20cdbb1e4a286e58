//! Lenient UTF-8 decoding for scheme values.
//!
//! Scheme files are hand edited, so a value token may contain stray bytes.
//! Instead of rejecting the whole line, `decode_lenient` drops the offending
//! byte and resumes at the next one.

/// Width of a sequence announced by its leading byte, or `None` for a byte
/// that cannot start a sequence.
fn sequence_width(lead: u8) -> Option<(usize, u32)> {
    if lead < 0x80 {
        Some((1, lead as u32))
    } else if lead >> 5 == 0b110 {
        Some((2, (lead & 0x1F) as u32))
    } else if lead >> 4 == 0b1110 {
        Some((3, (lead & 0x0F) as u32))
    } else if lead >> 3 == 0b1_1110 {
        Some((4, (lead & 0x07) as u32))
    } else {
        None
    }
}

/// Decode `bytes` into a `String`, skipping one byte whenever the input at
/// the current position is not a complete, well-formed scalar value.
///
/// This never fails; malformed characters are simply dropped.
///
/// # Example
/// ```
/// use scripa_core::utf8::decode_lenient;
///
/// assert_eq!(decode_lenient("θ".as_bytes()), "θ");
/// assert_eq!(decode_lenient(&[b'a', 0xFF, b'b']), "ab");
/// ```
pub fn decode_lenient(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let Some((width, mut code)) = sequence_width(bytes[i]) else {
            i += 1;
            continue;
        };

        if i + width > bytes.len() {
            // truncated by end of input
            i += 1;
            continue;
        }

        let tail = &bytes[i + 1..i + width];
        if tail.iter().any(|b| b & 0xC0 != 0x80) {
            i += 1;
            continue;
        }
        for b in tail {
            code = (code << 6) | (b & 0x3F) as u32;
        }

        match char::from_u32(code) {
            Some(ch) => {
                out.push(ch);
                i += width;
            }
            None => i += 1,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_ipa_pass_through() {
        assert_eq!(decode_lenient(b"th"), "th");
        assert_eq!(decode_lenient("ʕɢθ".as_bytes()), "ʕɢθ");
        assert_eq!(decode_lenient("t͡ʃ".as_bytes()), "t͡ʃ");
    }

    #[test]
    fn four_byte_sequences_decode() {
        assert_eq!(decode_lenient("𝼀".as_bytes()), "𝼀");
    }

    #[test]
    fn invalid_leading_byte_is_skipped() {
        assert_eq!(decode_lenient(&[0x80, b'a']), "a");
        assert_eq!(decode_lenient(&[b'x', 0xF8, b'y']), "xy");
    }

    #[test]
    fn truncated_sequence_skips_one_byte() {
        // "θ" is CE B8; drop the continuation byte
        assert_eq!(decode_lenient(&[b'a', 0xCE]), "a");
        // lead byte followed by ASCII: the ASCII survives
        assert_eq!(decode_lenient(&[0xCE, b'b']), "b");
    }

    #[test]
    fn surrogate_code_points_are_dropped() {
        // ED A0 80 would be U+D800
        assert_eq!(decode_lenient(&[0xED, 0xA0, 0x80, b'z']), "z");
    }

    #[test]
    fn empty_input() {
        assert!(decode_lenient(&[]).is_empty());
    }
}
