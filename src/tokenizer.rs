//! Null-delimited text tokens in a fixed size window,
//! read directly after a located atom header.
//!
//! Some cameras write the recording date as one of many
//! null-terminated strings inside `moov`. Which token holds
//! the date depends on the device, so the position is a parameter,
//! see `consts::DEFAULT_TOKEN_INDEX`.

use std::io::Read;

use tracing::debug;

use crate::{errors::TokenError, support::ascii_string};

/// Reads exactly `window_size` bytes at the current position.
pub fn read_window<R: Read>(stream: &mut R, window_size: usize) -> Result<Vec<u8>, TokenError> {
    let mut window = Vec::with_capacity(window_size);
    let got = stream.take(window_size as u64).read_to_end(&mut window)?;

    if got != window_size {
        return Err(TokenError::ShortWindow{got, expected: window_size})
    }

    Ok(window)
}

/// Splits `window` on null bytes. Empty segments are dropped
/// and do not count towards token positions.
///
/// Only ASCII bytes are kept in token text. A segment consisting
/// of nothing but non-ASCII bytes still counts as a token
/// (with empty text), so that positions follow the raw layout.
pub fn tokens(window: &[u8]) -> Vec<String> {
    window.split(|b| *b == 0)
        .filter(|segment| !segment.is_empty())
        .map(ascii_string)
        .collect()
}

/// Returns token at `token_index` in `window`.
pub fn select_token(window: &[u8], token_index: usize) -> Result<String, TokenError> {
    let mut tokens = tokens(window);
    let available = tokens.len();
    debug!("{available} tokens in {} byte window", window.len());

    if token_index >= available {
        return Err(TokenError::TokenIndexOutOfRange{index: token_index, available})
    }

    Ok(tokens.swap_remove(token_index))
}

/// Reads a `window_size` byte window from `stream` and returns
/// the non-empty, null-delimited token at `token_index`.
pub fn extract_token<R: Read>(
    stream: &mut R,
    window_size: usize,
    token_index: usize
) -> Result<String, TokenError> {
    let window = read_window(stream, window_size)?;
    select_token(&window, token_index)
}
