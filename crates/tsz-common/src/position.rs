//! Line/character positions for byte offsets.

use serde::Serialize;

/// A zero-based line and character (byte column) position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Precomputed line start offsets for one source file.
#[derive(Clone, Debug)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map, treating `\n`, `\r\n` and lone `\r` as line breaks.
    #[must_use]
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];
        let mut pos = 0;
        while pos < bytes.len() {
            match bytes[pos] {
                b'\r' => {
                    if bytes.get(pos + 1) == Some(&b'\n') {
                        pos += 1;
                    }
                    line_starts.push((pos + 1) as u32);
                }
                b'\n' => line_starts.push((pos + 1) as u32),
                _ => {}
            }
            pos += 1;
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a position.
    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position {
            line: line as u32,
            character: offset - self.line_starts[line],
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
