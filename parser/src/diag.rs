use crate::src_loc::{SourceFile, SrcLoc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
  Note,
  Warning,
  Error,
  Fatal,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Severity::Note => "note",
      Severity::Warning => "warning",
      Severity::Error => "error",
      Severity::Fatal => "fatal error",
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagKind {
  UnknownChar,
  InvalidSuffix,
  UnterminatedBlockComment,
  Expected,
  ExpectedLvalue,
  InvalidDeclName,
  WrongKeywordCase,
  NestingTooDeep,
}

impl DiagKind {
  pub const fn severity(self) -> Severity {
    match self {
      DiagKind::UnterminatedBlockComment => Severity::Fatal,
      DiagKind::UnknownChar
      | DiagKind::InvalidSuffix
      | DiagKind::Expected
      | DiagKind::ExpectedLvalue
      | DiagKind::InvalidDeclName
      | DiagKind::WrongKeywordCase
      | DiagKind::NestingTooDeep => Severity::Error,
    }
  }

  /// Message template, `{n}` is replaced by the n-th argument.
  pub const fn template(self) -> &'static str {
    match self {
      DiagKind::UnknownChar => "unknown character '{0}'",
      DiagKind::InvalidSuffix => "invalid suffix '{0}' on numeric constant",
      DiagKind::UnterminatedBlockComment => "unterminated /* comment",
      DiagKind::Expected => "expected {0} but found {1}",
      DiagKind::ExpectedLvalue => "expected lvalue on the left of '='",
      DiagKind::InvalidDeclName => "invalid function or variable name '{0}'",
      DiagKind::WrongKeywordCase => "keyword '{0}' must be written as '{1}'",
      DiagKind::NestingTooDeep => "nesting exceeds the maximum depth of {0}",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub loc: SrcLoc,
  pub kind: DiagKind,
  pub args: Vec<String>,
}

impl Diagnostic {
  pub fn new(loc: SrcLoc, kind: DiagKind, args: Vec<String>) -> Self {
    Diagnostic { loc, kind, args }
  }

  pub const fn severity(&self) -> Severity {
    self.kind.severity()
  }

  pub fn message(&self) -> String {
    let mut msg = String::with_capacity(self.kind.template().len());
    let mut rest = self.kind.template();
    while let Some(open) = rest.find('{') {
      msg.push_str(&rest[..open]);
      let after = &rest[open + 1..];
      let arg = after
        .find('}')
        .and_then(|close| after[..close].parse::<usize>().ok().map(|n| (n, close)));
      match arg {
        Some((n, close)) => {
          msg.push_str(self.args.get(n).map_or("", String::as_str));
          rest = &after[close + 1..];
        }
        None => {
          msg.push('{');
          rest = after;
        }
      }
    }
    msg.push_str(rest);
    msg
  }

  /// `name:line:col: severity: message`
  pub fn render(&self, file: &SourceFile) -> String {
    let (line, col) = file.line_col(self.loc.offset);
    format!(
      "{}:{line}:{col}: {}: {}",
      file.name,
      self.severity(),
      self.message()
    )
  }
}

/// Receives diagnostics from the lexer and parser. Implementations only
/// record; stopping is always the caller's decision.
pub trait DiagnosticSink {
  fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
  fn report(&mut self, diagnostic: Diagnostic) {
    self.push(diagnostic);
  }
}

/// Recording sink that also keeps the running error count.
#[derive(Debug, Default)]
pub struct Diagnostics {
  list: Vec<Diagnostic>,
  num_errors: usize,
}

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  pub const fn error_count(&self) -> usize {
    self.num_errors
  }

  pub fn len(&self) -> usize {
    self.list.len()
  }

  pub fn is_empty(&self) -> bool {
    self.list.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.list.iter()
  }

  pub fn kinds(&self) -> Vec<DiagKind> {
    self.list.iter().map(|d| d.kind).collect()
  }

  pub fn render(&self, file: &SourceFile) -> String {
    let mut out = String::new();
    for diag in &self.list {
      out.push_str(&diag.render(file));
      out.push('\n');
    }
    out
  }

  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.list
  }
}

impl DiagnosticSink for Diagnostics {
  fn report(&mut self, diagnostic: Diagnostic) {
    if diagnostic.severity() >= Severity::Error {
      self.num_errors += 1;
    }
    self.list.push(diagnostic);
  }
}
