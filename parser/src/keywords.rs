use crate::token::{KEYWORDS, TokenKind as T};

/// Exact, case-sensitive keyword lookup. Anything that is not a keyword
/// spelling is an identifier.
pub fn classify(spelling: &[u8]) -> T {
  match spelling {
    b"int" => T::KwInt,
    b"float" => T::KwFloat,
    b"void" => T::KwVoid,
    b"if" => T::KwIf,
    b"else" => T::KwElse,
    b"return" => T::KwReturn,
    _ => T::Ident,
  }
}

/// The keyword `spelling` was probably meant to be: equal ignoring ASCII case,
/// but not an exact match.
pub fn case_mismatch(spelling: &str) -> Option<T> {
  KEYWORDS
    .iter()
    .position(|kw| spelling.eq_ignore_ascii_case(kw) && spelling != *kw)
    .and_then(T::keyword_at)
}
