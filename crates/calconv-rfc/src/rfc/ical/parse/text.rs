//! Turning raw uploaded bytes into parser input.

use std::borrow::Cow;

/// Repairs UTF-8 sequences that a line fold split in two.
///
/// When a fold (CRLF or bare LF followed by one SPACE or HTAB) comes right
/// after a non-ASCII byte and the continuation line starts with UTF-8
/// continuation bytes, those bytes are moved in front of the line break.
/// Every line break and fold whitespace stays in place, so physical line
/// numbers are unchanged and [`super::unfold`] still does the unfolding.
#[must_use]
pub fn rejoin_split_sequences(input: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let len = input.len();
    let mut i = 0;

    while i < len {
        let break_len = match input[i] {
            b'\r' if input.get(i + 1) == Some(&b'\n') => 2,
            b'\n' => 1,
            _ => 0,
        };
        if break_len == 0 {
            result.push(input[i]);
            i += 1;
            continue;
        }

        let fold_end = i + break_len;
        let after_non_ascii = result.last().is_some_and(|&b| !b.is_ascii());
        if after_non_ascii && matches!(input.get(fold_end), Some(b' ' | b'\t')) {
            let tail_start = fold_end + 1;
            let tail_len = input[tail_start..]
                .iter()
                .take_while(|&&b| is_continuation_byte(b))
                .count();
            if tail_len > 0 {
                result.extend_from_slice(&input[tail_start..tail_start + tail_len]);
                result.extend_from_slice(&input[i..tail_start]);
                i = tail_start + tail_len;
                continue;
            }
        }

        result.extend_from_slice(&input[i..fold_end]);
        i = fold_end;
    }

    result
}

const fn is_continuation_byte(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Decodes raw input bytes into text.
///
/// Valid UTF-8 is borrowed as is. Otherwise sequences split by folding are
/// rejoined with [`rejoin_split_sequences`] and the result decoded again.
/// Input that is still not UTF-8 is decoded as Latin-1, which maps every byte
/// to a character and leaves the ASCII structure intact.
#[must_use]
pub fn decode_input(input: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(input) {
        return Cow::Borrowed(text);
    }

    match String::from_utf8(rejoin_split_sequences(input)) {
        Ok(text) => {
            tracing::debug!("Input decoded as UTF-8 after rejoining folded sequences");
            Cow::Owned(text)
        }
        Err(err) => {
            tracing::warn!(
                valid_up_to = err.utf8_error().valid_up_to(),
                "Input is not valid UTF-8, decoding as Latin-1"
            );
            Cow::Owned(err.into_bytes().into_iter().map(char::from).collect())
        }
    }
}
