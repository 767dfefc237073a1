//! Encoding normalization: control-character stripping and lossy UTF-8 recovery
//! for byte input.

/// Returns `true` for ASCII control characters other than tab, newline and
/// carriage return, and for DEL.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

/// Removes ASCII control characters (0x00-0x1F except `\t`, `\n`, `\r`, and 0x7F).
pub fn strip_ascii_ctrl(s: &str) -> String {
    s.chars().filter(|&c| !is_stripped_control(c)).collect()
}

/// Normalizes one string leaf.
///
/// Control characters are removed. A `String` is already valid UTF-8, so
/// every other character, U+FFFD and noncharacters included, is kept.
pub fn clean_str(s: String) -> String {
    if s.chars().any(is_stripped_control) {
        strip_ascii_ctrl(&s)
    } else {
        s
    }
}

/// Decodes `bytes` as UTF-8, silently discarding every invalid sequence.
///
/// Unlike [`String::from_utf8_lossy`], nothing is substituted for the
/// dropped bytes.
pub fn discard_invalid_utf8(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                // valid_up_to() guarantees this prefix decodes
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match err.error_len() {
                    Some(len) => rest = &after[len..],
                    // truncated sequence at end of input
                    None => return out,
                }
            }
        }
    }
}

/// Cleans raw bytes into a normalized string.
pub fn clean_bytes(bytes: &[u8]) -> String {
    clean_str(discard_invalid_utf8(bytes))
}
