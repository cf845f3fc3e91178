#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SrcLoc {
  pub offset: u32,
  pub len: u32,
}

impl SrcLoc {
  pub const fn new(offset: u32, len: u32) -> Self {
    SrcLoc { offset, len }
  }

  pub const fn end(&self) -> u32 {
    self.offset + self.len
  }

  pub fn text<'a>(&self, src: &'a str) -> &'a str {
    let offset = self.offset as usize;
    &src[offset..offset + self.len as usize]
  }
}

/// A loaded buffer together with its logical origin, used to turn byte
/// offsets into `line:col` pairs when rendering diagnostics.
#[derive(Debug)]
pub struct SourceFile {
  pub name: String,
  pub text: String,
  line_starts: Vec<u32>,
}

impl SourceFile {
  /// # Panics
  ///
  /// Panics if `text` is longer than `u32::MAX` bytes.
  pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
    let text = text.into();
    assert!(text.len() <= u32::MAX as usize);
    let mut line_starts = vec![0];
    line_starts.extend(
      text
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'\n')
        .map(|(i, _)| i as u32 + 1),
    );
    SourceFile { name: name.into(), text, line_starts }
  }

  /// 1-based line and column (in bytes) of `offset`.
  pub fn line_col(&self, offset: u32) -> (u32, u32) {
    let line = match self.line_starts.binary_search(&offset) {
      Ok(line) => line,
      Err(next) => next - 1,
    };
    (line as u32 + 1, offset - self.line_starts[line] + 1)
  }

  pub fn line_text(&self, line: u32) -> &str {
    let idx = line.saturating_sub(1) as usize;
    let Some(&start) = self.line_starts.get(idx) else {
      return "";
    };
    let end = self
      .line_starts
      .get(idx + 1)
      .map_or(self.text.len(), |next| *next as usize - 1);
    self.text[start as usize..end].trim_end_matches('\r')
  }
}
