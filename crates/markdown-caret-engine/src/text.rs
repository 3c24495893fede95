//! Character-offset helpers.
//!
//! Every offset the engine hands out counts Unicode scalar values, never
//! bytes, so hosts can feed them straight into a text widget.

/// Length of `s` in characters.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Characters `[start, end)` of `s`, clamped to its length.
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let from = byte_of_char(s, start);
    let to = byte_of_char(s, end.max(start));
    &s[from..to]
}

/// Byte position of the `char_idx`-th character, or `s.len()` past the end.
pub fn byte_of_char(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Converts byte positions of one string into character positions.
///
/// Regex matches report bytes; this turns them into character offsets in
/// O(log n) per lookup after an O(n) build.
#[derive(Debug, Clone)]
pub struct CharMap {
    /// Byte start of every character, plus a final `len()` sentinel
    starts: Vec<usize>,
}

impl CharMap {
    pub fn new(s: &str) -> Self {
        let mut starts: Vec<usize> = s.char_indices().map(|(byte, _)| byte).collect();
        starts.push(s.len());
        Self { starts }
    }

    /// Character index of a byte position on a char boundary.
    pub fn char_at(&self, byte: usize) -> usize {
        match self.starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }
}
