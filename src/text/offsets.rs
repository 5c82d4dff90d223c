/// Byte to UTF-16 offset mapping for a whole document.
///
/// Only characters whose UTF-8 and UTF-16 lengths differ (everything
/// outside ASCII) are recorded, so ASCII text maps with an empty table.
#[derive(Debug, Clone, Default)]
pub struct Utf16Offsets {
    /// `(byte offset after a non-ASCII char, bytes minus UTF-16 units so far)`
    checkpoints: Vec<(usize, usize)>,
    len_bytes: usize,
}

impl Utf16Offsets {
    pub fn new(text: &str) -> Self {
        let mut checkpoints = Vec::new();
        let mut shrink = 0;

        for (byte, ch) in text.char_indices() {
            let diff = ch.len_utf8() - ch.len_utf16();
            if diff > 0 {
                shrink += diff;
                checkpoints.push((byte + ch.len_utf8(), shrink));
            }
        }

        Self {
            checkpoints,
            len_bytes: text.len(),
        }
    }

    /// Convert a byte offset to a UTF-16 offset.
    ///
    /// `byte` must be a char boundary (tree-sitter node bounds always are).
    /// Offsets past the end clamp to the end.
    pub fn to_utf16(&self, byte: usize) -> usize {
        let byte = byte.min(self.len_bytes);
        let idx = self.checkpoints.partition_point(|&(at, _)| at <= byte);
        let shrink = if idx == 0 { 0 } else { self.checkpoints[idx - 1].1 };
        byte - shrink
    }

    /// Length of the document in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.to_utf16(self.len_bytes)
    }
}

/// Convert a byte position to a UTF-16 position within `text`.
///
/// Returns None if the byte position is not on a char boundary or is past
/// the end.
pub fn convert_byte_to_utf16(text: &str, byte_pos: usize) -> Option<usize> {
    if byte_pos > text.len() || !text.is_char_boundary(byte_pos) {
        return None;
    }
    Some(text[..byte_pos].encode_utf16().count())
}
