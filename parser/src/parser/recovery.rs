use super::Parser;
use crate::internal::{TokenKind as T, *};

impl Parser<'_, '_> {
  /// Skips to the end of the broken statement: past a `;`, past a balanced
  /// `{ ... }`, or up to a `}` or `Eof` which the caller's loop handles.
  pub(super) fn synchronize(&mut self) {
    trace!(offset = self.cur.loc.offset, "synchronize");
    loop {
      match self.cur.kind {
        T::Semicolon => {
          self.advance();
          return;
        }
        T::LBrace => {
          self.skip_balanced(T::LBrace, T::RBrace);
          return;
        }
        T::RBrace | T::Eof => return,
        _ => {
          self.advance();
        }
      }
    }
  }

  /// Like `synchronize`, but a `(` also ends the skip: the parenthesized
  /// group goes, along with a body or `;` right after it.
  pub(super) fn synchronize_decl(&mut self) {
    trace!(offset = self.cur.loc.offset, "synchronize_decl");
    loop {
      match self.cur.kind {
        T::LParen => {
          self.skip_balanced(T::LParen, T::RParen);
          self.skip_trailing_body();
          return;
        }
        T::Semicolon => {
          self.advance();
          return;
        }
        T::LBrace => {
          self.skip_balanced(T::LBrace, T::RBrace);
          return;
        }
        T::RBrace | T::Eof => return,
        _ => {
          self.advance();
        }
      }
    }
  }

  /// Skips from `open` through its matching `close`, or to `Eof`.
  pub(super) fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) {
    let mut depth = 0usize;
    loop {
      let kind = self.cur.kind;
      if kind == T::Eof {
        return;
      }
      self.advance();
      if kind == open {
        depth += 1;
      } else if kind == close {
        depth = depth.saturating_sub(1);
        if depth == 0 {
          return;
        }
      }
    }
  }

  pub(super) fn skip_trailing_body(&mut self) {
    if self.cur_is(T::LBrace) {
      self.skip_balanced(T::LBrace, T::RBrace);
    } else if self.cur_is(T::Semicolon) {
      self.advance();
    }
  }

  /// Reports and drops identifiers that are keywords in the wrong case,
  /// e.g. `RETURN`, so the production can start over on the next token.
  pub(super) fn skip_wrong_case_keywords(&mut self) {
    while self.cur_is(T::Ident) {
      let text = self.text(self.cur);
      let Some(keyword) = keywords::case_mismatch(text).and_then(TokenKind::spelling) else {
        return;
      };
      let args = vec![text.to_string(), keyword.to_string()];
      self.report(self.cur.loc, DiagKind::WrongKeywordCase, args);
      self.advance();
    }
  }
}
