use crate::src_loc::SrcLoc;
use std::fmt;

/// Lexical categories. Keyword kinds sit between `KwStart` and `KwEnd` so
/// keyword checks are a single range comparison.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Unknown,
  Eof,
  Ident,
  IntLit,
  FloatLit,
  // punctuators
  LParen,
  RParen,
  LBrace,
  RBrace,
  Semicolon,
  Comma,
  Plus,
  Minus,
  Star,
  Slash,
  Equal,
  Less,
  Greater,
  // keywords
  KwStart,
  KwInt,
  KwFloat,
  KwVoid,
  KwIf,
  KwElse,
  KwReturn,
  KwEnd,
}

const NAMES: [&str; TokenKind::KwEnd as usize + 1] = [
  "unknown",
  "eof",
  "identifier",
  "integer_literal",
  "float_literal",
  "l_paren",
  "r_paren",
  "l_brace",
  "r_brace",
  "semi",
  "comma",
  "plus",
  "minus",
  "star",
  "slash",
  "equal",
  "less",
  "greater",
  "kw_start",
  "kw_int",
  "kw_float",
  "kw_void",
  "kw_if",
  "kw_else",
  "kw_return",
  "kw_end",
];

const PUNCTUATORS: [&str; 13] = ["(", ")", "{", "}", ";", ",", "+", "-", "*", "/", "=", "<", ">"];

pub(crate) const KEYWORDS: [&str; 6] = ["int", "float", "void", "if", "else", "return"];

impl TokenKind {
  pub const fn name(self) -> &'static str {
    NAMES[self as usize]
  }

  pub const fn is_keyword(self) -> bool {
    self as u8 > TokenKind::KwStart as u8 && (self as u8) < TokenKind::KwEnd as u8
  }

  pub const fn is_punctuator(self) -> bool {
    self as u8 >= TokenKind::LParen as u8 && self as u8 <= TokenKind::Greater as u8
  }

  pub const fn is_type_specifier(self) -> bool {
    matches!(self, TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwVoid)
  }

  /// Fixed spelling of punctuators and keywords, `None` for everything else.
  pub const fn spelling(self) -> Option<&'static str> {
    if self.is_punctuator() {
      Some(PUNCTUATORS[self as usize - TokenKind::LParen as usize])
    } else if self.is_keyword() {
      Some(KEYWORDS[self as usize - TokenKind::KwInt as usize])
    } else {
      None
    }
  }

  /// Keyword kinds in table order, for iterating the keyword sub-range.
  pub(crate) const fn keyword_at(index: usize) -> Option<TokenKind> {
    match index {
      0 => Some(TokenKind::KwInt),
      1 => Some(TokenKind::KwFloat),
      2 => Some(TokenKind::KwVoid),
      3 => Some(TokenKind::KwIf),
      4 => Some(TokenKind::KwElse),
      5 => Some(TokenKind::KwReturn),
      _ => None,
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub loc: SrcLoc,
}

impl Token {
  pub const fn new(kind: TokenKind, loc: SrcLoc) -> Self {
    Token { kind, loc }
  }

  pub const fn is(&self, kind: TokenKind) -> bool {
    self.kind as u8 == kind as u8
  }

  pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
    kinds.contains(&self.kind)
  }

  pub fn text<'a>(&self, src: &'a str) -> &'a str {
    self.loc.text(src)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use TokenKind as T;

  #[test]
  fn keyword_range() {
    for kind in [T::KwInt, T::KwFloat, T::KwVoid, T::KwIf, T::KwElse, T::KwReturn] {
      assert!(kind.is_keyword(), "{kind:?}");
      assert!(!kind.is_punctuator(), "{kind:?}");
    }
    for kind in [T::KwStart, T::KwEnd, T::Ident, T::Eof, T::Greater] {
      assert!(!kind.is_keyword(), "{kind:?}");
    }
  }

  #[test]
  fn names_and_spellings() {
    assert_eq!(T::Semicolon.name(), "semi");
    assert_eq!(T::Ident.name(), "identifier");
    assert_eq!(T::KwReturn.name(), "kw_return");
    assert_eq!(T::KwEnd.name(), "kw_end");
    assert_eq!(T::LParen.spelling(), Some("("));
    assert_eq!(T::Greater.spelling(), Some(">"));
    assert_eq!(T::Equal.spelling(), Some("="));
    assert_eq!(T::KwInt.spelling(), Some("int"));
    assert_eq!(T::KwReturn.spelling(), Some("return"));
    assert_eq!(T::Ident.spelling(), None);
    assert_eq!(T::KwStart.spelling(), None);
    for i in 0..KEYWORDS.len() {
      let kind = TokenKind::keyword_at(i).unwrap();
      assert_eq!(kind.spelling(), Some(KEYWORDS[i]));
    }
    assert_eq!(TokenKind::keyword_at(KEYWORDS.len()), None);
  }
}
