/// String from the ASCII bytes in `bytes`.
/// Anything above `0x7F` is dropped.
pub(crate) fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter()
        .filter_map(|b| if b.is_ascii() {Some(*b as char)} else {None})
        .collect()
}

/// Returns the last `n` lines of `text`.
pub(crate) fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
