use crate::internal::{TokenKind as T, *};

mod decls;
mod exprs;
mod recovery;
mod stmts;

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
  /// Deepest allowed nesting of expressions and statements.
  pub max_depth: usize,
}

impl Default for ParseOptions {
  fn default() -> Self {
    ParseOptions { max_depth: DEFAULT_MAX_DEPTH }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
  pub decls: Vec<Decl>,
  /// Error and fatal diagnostics issued by the lexer and the parser.
  pub error_count: usize,
  /// Set when scanning stopped early; `decls` holds what was built before.
  pub fatal: Option<LexError>,
}

impl Parsed {
  pub const fn is_ok(&self) -> bool {
    self.error_count == 0 && self.fatal.is_none()
  }
}

pub struct Parser<'src, 'd> {
  lexer: Lexer<'src>,
  diags: &'d mut dyn DiagnosticSink,
  cur: Token,
  options: ParseOptions,
  depth: usize,
  depth_reported: bool,
  num_errors: usize,
  fatal: Option<LexError>,
}

impl<'src, 'd> Parser<'src, 'd> {
  pub fn new(src: &'src str, diags: &'d mut dyn DiagnosticSink) -> Self {
    Self::with_options(src, diags, ParseOptions::default())
  }

  pub fn with_options(
    src: &'src str,
    diags: &'d mut dyn DiagnosticSink,
    options: ParseOptions,
  ) -> Self {
    #[cfg(test)]
    crate::log::configure_test_tracing();

    let mut parser = Parser {
      lexer: Lexer::new(src),
      diags,
      cur: Token::new(T::Eof, SrcLoc::default()),
      options,
      depth: 0,
      depth_reported: false,
      num_errors: 0,
      fatal: None,
    };
    parser.advance();
    parser
  }

  #[instrument(skip_all)]
  pub fn parse(mut self) -> Parsed {
    trace!("Parser::parse()");
    let mut decls = Vec::new();
    while !self.cur_is(T::Eof) {
      if self.cur_is(T::RBrace) {
        trace!(offset = self.cur.loc.offset, "discarding stray '}}'");
        self.advance();
        continue;
      }
      self.depth_reported = false;
      if let Some(decl) = self.parse_top_level_decl() {
        decls.push(decl);
      }
    }
    let error_count = self.num_errors + self.lexer.error_count();
    debug!(decls = decls.len(), error_count, "parse finished");
    Parsed { decls, error_count, fatal: self.fatal }
  }

  /// Runs `production` one nesting level deeper, failing it instead of
  /// recursing past `max_depth`.
  fn nested<R>(&mut self, production: impl FnOnce(&mut Self) -> Option<R>) -> Option<R> {
    if self.depth >= self.options.max_depth {
      if !self.depth_reported {
        self.depth_reported = true;
        let max = self.options.max_depth.to_string();
        self.report(self.cur.loc, DiagKind::NestingTooDeep, vec![max]);
      }
      return None;
    }
    self.depth += 1;
    let result = production(self);
    self.depth -= 1;
    result
  }

  /// Moves to the next token, returning the one just consumed.
  fn advance(&mut self) -> Token {
    let prev = self.cur;
    self.cur = match self.lexer.next(&mut *self.diags) {
      Ok(token) => token,
      Err(err) => {
        debug!(%err, "scanning stopped");
        self.fatal.get_or_insert(err);
        Token::new(T::Eof, SrcLoc::new(self.lexer.src().len() as u32, 0))
      }
    };
    trace!(kind = %self.cur.kind, offset = self.cur.loc.offset, "advance");
    prev
  }

  fn cur_is(&self, kind: TokenKind) -> bool {
    self.cur.is(kind)
  }

  fn cur_is_one_of(&self, kinds: &[TokenKind]) -> bool {
    self.cur.is_one_of(kinds)
  }

  fn consume(&mut self, kind: TokenKind) -> bool {
    if self.cur_is(kind) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn consume_expecting(&mut self, kind: TokenKind) -> Option<Token> {
    if self.cur_is(kind) {
      Some(self.advance())
    } else {
      self.expected(&describe(kind));
      None
    }
  }

  fn text(&self, token: Token) -> &'src str {
    token.loc.text(self.lexer.src())
  }

  fn expected(&mut self, what: &str) {
    let found = describe(self.cur.kind);
    self.report(self.cur.loc, DiagKind::Expected, vec![what.to_string(), found]);
  }

  fn report(&mut self, loc: SrcLoc, kind: DiagKind, args: Vec<String>) {
    // after a fatal scan error the token stream is just Eof
    if self.fatal.is_some() {
      return;
    }
    if kind.severity() >= Severity::Error {
      self.num_errors += 1;
    }
    debug!(?kind, offset = loc.offset, "diagnostic");
    self.diags.report(Diagnostic::new(loc, kind, args));
  }
}

fn describe(kind: TokenKind) -> String {
  match kind.spelling() {
    Some(spelling) => format!("'{spelling}'"),
    None => kind.name().to_string(),
  }
}

/// Parses `src`, collecting diagnostics into a fresh `Diagnostics`.
pub fn parse_str(src: &str) -> (Parsed, Diagnostics) {
  let mut diags = Diagnostics::new();
  let parsed = Parser::new(src, &mut diags).parse();
  (parsed, diags)
}

#[cfg(test)]
pub(crate) fn parse_dump(src: &str) -> (String, Vec<DiagKind>) {
  let (parsed, diags) = parse_str(src);
  assert_eq!(parsed.error_count, diags.error_count());
  (dump(&parsed.decls), diags.kinds())
}
