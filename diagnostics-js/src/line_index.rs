use serde::Serialize;

/// 1-based line and byte column of an offset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct LineCol {
  pub line: u32,
  pub column: u32,
}

/// Maps byte offsets to line/column positions.
///
/// Recognises the ECMAScript line terminators: `\n`, `\r`, `\r\n`, U+2028 and U+2029.
#[derive(Clone, Debug)]
pub struct LineIndex {
  line_starts: Vec<u32>,
  len: u32,
}

impl LineIndex {
  pub fn new(text: &str) -> Self {
    let mut line_starts = vec![0];
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
      match bytes[i] {
        b'\n' => {
          i += 1;
          line_starts.push(i as u32);
        }
        b'\r' => {
          i += 1;
          if bytes.get(i) == Some(&b'\n') {
            i += 1;
          }
          line_starts.push(i as u32);
        }
        // U+2028 and U+2029 are encoded as E2 80 A8 and E2 80 A9.
        0xE2 if bytes.get(i + 1) == Some(&0x80) && matches!(bytes.get(i + 2), Some(0xA8 | 0xA9)) => {
          i += 3;
          line_starts.push(i as u32);
        }
        _ => i += 1,
      }
    }
    Self {
      line_starts,
      len: u32::try_from(text.len()).unwrap_or(u32::MAX),
    }
  }

  pub fn line_count(&self) -> usize {
    self.line_starts.len()
  }

  /// Offsets past the end of the text are clamped to the end.
  pub fn line_col(&self, offset: u32) -> LineCol {
    let offset = offset.min(self.len);
    let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
    LineCol {
      line: line as u32 + 1,
      column: offset - self.line_starts[line] + 1,
    }
  }

  /// Byte offset where the given 1-based line starts.
  pub fn line_start(&self, line: u32) -> Option<u32> {
    let idx = usize::try_from(line).ok()?.checked_sub(1)?;
    self.line_starts.get(idx).copied()
  }
}
