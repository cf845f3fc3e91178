use crate::internal::{TokenKind as T, *};
use thiserror::Error;

/// The only lexical condition that ends scanning. Everything else is
/// reported to the sink and scanning carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
  #[error("unterminated block comment starting at byte {}", loc.offset)]
  UnterminatedBlockComment { loc: SrcLoc },
}

#[derive(Debug)]
pub struct Lexer<'src> {
  src: &'src str,
  pos: usize,
  lookahead: Option<Token>,
  halted: bool,
  num_errors: usize,
}

impl<'src> Lexer<'src> {
  /// # Panics
  ///
  /// Panics if `src` is longer than `u32::MAX` bytes, since locations store
  /// 32-bit offsets.
  pub fn new(src: &'src str) -> Self {
    assert!(src.len() <= u32::MAX as usize);
    Lexer {
      src,
      pos: 0,
      lookahead: None,
      halted: false,
      num_errors: 0,
    }
  }

  pub const fn src(&self) -> &'src str {
    self.src
  }

  pub fn text(&self, token: &Token) -> &'src str {
    token.loc.text(self.src)
  }

  /// Errors (and fatal errors) this lexer has reported so far.
  pub const fn error_count(&self) -> usize {
    self.num_errors
  }

  pub fn next(&mut self, diags: &mut dyn DiagnosticSink) -> Result<Token, LexError> {
    if let Some(token) = self.lookahead.take() {
      return Ok(token);
    }
    self.scan(diags)
  }

  pub fn peek(&mut self, diags: &mut dyn DiagnosticSink) -> Result<Token, LexError> {
    if let Some(token) = self.lookahead {
      return Ok(token);
    }
    let token = self.scan(diags)?;
    self.lookahead = Some(token);
    Ok(token)
  }

  /// Every token through `Eof`, inclusive.
  pub fn tokenize(mut self, diags: &mut dyn DiagnosticSink) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::with_capacity(64);
    loop {
      let token = self.next(diags)?;
      tokens.push(token);
      if token.is(T::Eof) {
        return Ok(tokens);
      }
    }
  }

  fn scan(&mut self, diags: &mut dyn DiagnosticSink) -> Result<Token, LexError> {
    if self.halted {
      return Ok(self.eof_token());
    }
    self.skip_trivia(diags)?;
    if self.eof() {
      return Ok(self.eof_token());
    }
    let token = match self.byte() {
      b'{' => self.simple_token(T::LBrace),
      b'}' => self.simple_token(T::RBrace),
      b'(' => self.simple_token(T::LParen),
      b')' => self.simple_token(T::RParen),
      b';' => self.simple_token(T::Semicolon),
      b',' => self.simple_token(T::Comma),
      b'+' => self.simple_token(T::Plus),
      b'-' => self.simple_token(T::Minus),
      b'*' => self.simple_token(T::Star),
      b'/' => self.simple_token(T::Slash),
      b'=' => self.simple_token(T::Equal),
      b'<' => self.simple_token(T::Less),
      b'>' => self.simple_token(T::Greater),
      b if is_ident_head(b) => self.ident(),
      b if b.is_ascii_digit() => self.number(diags),
      _ => self.unknown(diags),
    };
    Ok(token)
  }

  fn skip_trivia(&mut self, diags: &mut dyn DiagnosticSink) -> Result<(), LexError> {
    loop {
      while !self.eof() && is_whitespace(self.byte()) {
        self.pos += 1;
      }
      match (self.byte(), self.peek_byte()) {
        (b'/', b'/') => {
          while !self.eof() && self.byte() != b'\n' {
            self.pos += 1;
          }
        }
        (b'/', b'*') => self.block_comment(diags)?,
        _ => return Ok(()),
      }
    }
  }

  fn block_comment(&mut self, diags: &mut dyn DiagnosticSink) -> Result<(), LexError> {
    let start = self.pos;
    match self.src[start + 2..].find("*/") {
      Some(close) => {
        self.pos = start + 2 + close + 2;
        Ok(())
      }
      None => {
        let loc = SrcLoc::new(start as u32, 2);
        debug!(offset = start, "unterminated block comment, halting lexer");
        self.report(diags, loc, DiagKind::UnterminatedBlockComment, vec![]);
        self.halted = true;
        self.pos = self.src.len();
        Err(LexError::UnterminatedBlockComment { loc })
      }
    }
  }

  fn ident(&mut self) -> Token {
    let start = self.pos;
    self.pos += 1;
    while !self.eof() && is_ident_body(self.byte()) {
      self.pos += 1;
    }
    let kind = keywords::classify(&self.src.as_bytes()[start..self.pos]);
    self.token_from(kind, start)
  }

  fn number(&mut self, diags: &mut dyn DiagnosticSink) -> Token {
    let start = self.pos;
    let mut kind = T::IntLit;

    if self.byte() == b'0' && matches!(self.peek_byte(), b'x' | b'X') {
      self.pos += 2;
      if !self.byte().is_ascii_hexdigit() {
        self.invalid_suffix(diags);
        return self.token_from(T::IntLit, start);
      }
      while self.byte().is_ascii_hexdigit() {
        self.pos += 1;
      }
    } else {
      let octal = self.byte() == b'0' && self.peek_byte().is_ascii_digit();
      self.skip_digits();
      let first_non_octal = if octal {
        (start..self.pos).find(|&i| matches!(self.byte_at(i), b'8' | b'9'))
      } else {
        None
      };
      if self.byte() == b'.' {
        kind = T::FloatLit;
        self.pos += 1;
        self.skip_digits();
      }
      if matches!(self.byte(), b'e' | b'E') {
        let mut exp = self.pos + 1;
        if matches!(self.byte_at(exp), b'+' | b'-') {
          exp += 1;
        }
        if self.byte_at(exp).is_ascii_digit() {
          kind = T::FloatLit;
          self.pos = exp;
          self.skip_digits();
        }
      }
      // 8 and 9 are only octal errors when the numeral stays an integer
      if let Some(pos) = first_non_octal.filter(|_| kind == T::IntLit) {
        self.pos = pos;
      }
    }

    if self.cur_char().is_some_and(|c| !is_numeral_terminator(c)) {
      self.invalid_suffix(diags);
      while let Some(c) = self.cur_char() {
        if is_numeral_terminator(c) {
          break;
        }
        self.pos += c.len_utf8();
      }
    }
    self.token_from(kind, start)
  }

  fn invalid_suffix(&mut self, diags: &mut dyn DiagnosticSink) {
    let (arg, len) = match self.cur_char() {
      Some(c) => (c.to_string(), c.len_utf8()),
      None => (String::new(), 0),
    };
    let loc = SrcLoc::new(self.pos as u32, len as u32);
    self.report(diags, loc, DiagKind::InvalidSuffix, vec![arg]);
  }

  fn unknown(&mut self, diags: &mut dyn DiagnosticSink) -> Token {
    let start = self.pos;
    let c = self.cur_char().unwrap_or(char::REPLACEMENT_CHARACTER);
    self.pos += c.len_utf8();
    let token = self.token_from(T::Unknown, start);
    self.report(diags, token.loc, DiagKind::UnknownChar, vec![c.to_string()]);
    token
  }

  fn report(&mut self, diags: &mut dyn DiagnosticSink, loc: SrcLoc, kind: DiagKind, args: Vec<String>) {
    if kind.severity() >= Severity::Error {
      self.num_errors += 1;
    }
    diags.report(Diagnostic::new(loc, kind, args));
  }

  fn simple_token(&mut self, kind: TokenKind) -> Token {
    let start = self.pos;
    self.pos += 1;
    self.token_from(kind, start)
  }

  fn token_from(&self, kind: TokenKind, start: usize) -> Token {
    Token::new(kind, SrcLoc::new(start as u32, (self.pos - start) as u32))
  }

  fn eof_token(&self) -> Token {
    Token::new(T::Eof, SrcLoc::new(self.src.len() as u32, 0))
  }

  fn skip_digits(&mut self) {
    while self.byte().is_ascii_digit() {
      self.pos += 1;
    }
  }

  fn cur_char(&self) -> Option<char> {
    self.src[self.pos..].chars().next()
  }

  fn byte(&self) -> u8 {
    self.byte_at(self.pos)
  }

  fn peek_byte(&self) -> u8 {
    self.byte_at(self.pos + 1)
  }

  fn byte_at(&self, pos: usize) -> u8 {
    *self.src.as_bytes().get(pos).unwrap_or(&0)
  }

  const fn eof(&self) -> bool {
    self.pos >= self.src.len()
  }
}

const fn is_whitespace(b: u8) -> bool {
  matches!(b, b' ' | b'\t' | b'\x0c' | b'\x0b' | b'\r' | b'\n')
}

const fn is_ident_head(b: u8) -> bool {
  b.is_ascii_alphabetic() || b == b'_'
}

const fn is_ident_body(b: u8) -> bool {
  is_ident_head(b) || b.is_ascii_digit()
}

/// Characters allowed to follow a numeral directly.
const fn is_numeral_terminator(c: char) -> bool {
  (c.is_ascii() && is_whitespace(c as u8))
    || matches!(
      c,
      ';' | ',' | ')' | ']' | '}' | '(' | '{' | '+' | '-' | '*' | '/' | '=' | '<' | '>'
    )
}
