use super::Parser;
use crate::internal::{TokenKind as T, *};

#[derive(Eq, Ord, PartialEq, PartialOrd, Copy, Clone, Debug)]
enum Prec {
  Lowest,
  Relational,
  Sum,
  Product,
  Prefix,
}

impl Prec {
  const fn next(self) -> Prec {
    match self {
      Prec::Lowest => Prec::Relational,
      Prec::Relational => Prec::Sum,
      Prec::Sum => Prec::Product,
      Prec::Product | Prec::Prefix => Prec::Prefix,
    }
  }
}

/// Binary operators by token. `=` also lives at the relational level, so an
/// `=` after a complete relational operand is consumed there first.
const fn binary_op(kind: TokenKind) -> Option<(BinaryOp, Prec)> {
  match kind {
    T::Less => Some((BinaryOp::LessThan, Prec::Relational)),
    T::Greater => Some((BinaryOp::GreaterThan, Prec::Relational)),
    T::Equal => Some((BinaryOp::EqualOrAssign, Prec::Relational)),
    T::Plus => Some((BinaryOp::Add, Prec::Sum)),
    T::Minus => Some((BinaryOp::Sub, Prec::Sum)),
    T::Star => Some((BinaryOp::Mul, Prec::Product)),
    T::Slash => Some((BinaryOp::Div, Prec::Product)),
    _ => None,
  }
}

impl<'src> Parser<'src, '_> {
  pub(super) fn parse_expr(&mut self) -> Option<Expr> {
    self.nested(Self::parse_assign)
  }

  fn parse_assign(&mut self) -> Option<Expr> {
    let lhs = self.parse_binary(Prec::Relational)?;
    // parse_binary already took every `=`, so this only matters if that changes
    if !self.cur_is(T::Equal) {
      return Some(lhs);
    }
    let op = self.advance();
    let rhs = self.parse_expr()?;
    if !lhs.is_var_ref() {
      self.report(op.loc, DiagKind::ExpectedLvalue, vec![]);
      return None;
    }
    Some(Expr::Binary {
      op: BinaryOp::EqualOrAssign,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
      loc: op.loc,
    })
  }

  fn parse_binary(&mut self, min: Prec) -> Option<Expr> {
    let mut lhs = self.parse_unary()?;
    while let Some((op, prec)) = binary_op(self.cur.kind) {
      if prec < min {
        break;
      }
      let token = self.advance();
      let rhs = self.parse_binary(prec.next())?;
      lhs = Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        loc: token.loc,
      };
    }
    Some(lhs)
  }

  fn parse_unary(&mut self) -> Option<Expr> {
    if !self.cur_is(T::Minus) {
      return self.parse_primary();
    }
    let op = self.advance();
    let operand = self.nested(Self::parse_unary)?;
    Some(Expr::Unary {
      op: UnaryOp::Negate,
      operand: Box::new(operand),
      loc: op.loc,
    })
  }

  fn parse_primary(&mut self) -> Option<Expr> {
    match self.cur.kind {
      T::Ident => {
        let token = self.advance();
        let name = self.text(token).to_string();
        if self.cur_is(T::LParen) {
          self.parse_call(name, token.loc)
        } else {
          Some(Expr::VarRef { name, loc: token.loc })
        }
      }
      T::IntLit => {
        let token = self.advance();
        let value = int_lit_value(self.text(token));
        Some(Expr::IntLit { value, loc: token.loc })
      }
      T::FloatLit => {
        let token = self.advance();
        let value = float_prefix(self.text(token)).parse().unwrap_or_default();
        Some(Expr::FloatLit { value, loc: token.loc })
      }
      T::LParen => {
        self.advance();
        let expr = self.parse_expr()?;
        self.consume_expecting(T::RParen)?;
        Some(expr)
      }
      _ => {
        self.expected("expression");
        None
      }
    }
  }

  fn parse_call(&mut self, callee: String, loc: SrcLoc) -> Option<Expr> {
    self.advance(); // `(`
    let mut args = Vec::new();
    if !self.cur_is(T::RParen) {
      loop {
        args.push(self.parse_expr()?);
        if !self.consume(T::Comma) {
          break;
        }
      }
    }
    self.consume_expecting(T::RParen)?;
    Some(Expr::Call { callee, args, loc })
  }
}

/// Radix and significant digits of an integer token. The token may carry an
/// invalid suffix (already diagnosed by the lexer) which is ignored here.
fn int_lit_value(text: &str) -> IntLit {
  let bytes = text.as_bytes();
  let (radix, body) = match bytes {
    [b'0', b'x' | b'X', ..] => (Radix::Hex, &text[2..]),
    [b'0', d, ..] if d.is_ascii_digit() => (Radix::Octal, &text[1..]),
    _ => (Radix::Decimal, text),
  };
  let digits: String = body
    .chars()
    .take_while(|c| c.is_digit(radix as u32))
    .collect();
  let digits = digits.trim_start_matches('0');
  IntLit::new(radix, if digits.is_empty() { "0" } else { digits })
}

/// The part of a float token that forms the numeral: digits, an optional
/// fraction and an optional exponent.
fn float_prefix(text: &str) -> &str {
  let bytes = text.as_bytes();
  let digits_from = |mut i: usize| {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
      i += 1;
    }
    i
  };
  let mut end = digits_from(0);
  if bytes.get(end) == Some(&b'.') {
    end = digits_from(end + 1);
  }
  if matches!(bytes.get(end), Some(b'e' | b'E')) {
    let mut exp = end + 1;
    if matches!(bytes.get(exp), Some(b'+' | b'-')) {
      exp += 1;
    }
    if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
      end = digits_from(exp);
    }
  }
  &text[..end]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse_dump;
  use pretty_assertions::assert_eq;

  fn expr(src: &str) -> (String, Vec<DiagKind>) {
    let mut diags = Diagnostics::new();
    let mut parser = Parser::new(src, &mut diags);
    let expr = parser.parse_expr().map(|e| e.to_string());
    drop(parser);
    (expr.unwrap_or_default(), diags.kinds())
  }

  #[test]
  fn precedence_and_associativity() {
    let cases = [
      ("1+2*3", "(+ 1 (* 2 3))"),
      ("1*2+3", "(+ (* 1 2) 3)"),
      ("1-2-3", "(- (- 1 2) 3)"),
      ("8/4/2", "(/ (/ 8 4) 2)"),
      ("(1+2)*3", "(* (+ 1 2) 3)"),
      ("a < b + 1", "(< a (+ b 1))"),
      ("a > b < c", "(< (> a b) c)"),
      ("-x * 2", "(* (neg x) 2)"),
      ("- -x", "(neg (neg x))"),
      ("a - -1", "(- a (neg 1))"),
    ];
    for (src, expected) in cases {
      assert_eq!(expr(src), (expected.to_string(), vec![]), "{src}");
    }
  }

  #[test]
  fn equal_sign_is_consumed_at_relational_level() {
    let cases = [
      ("x = 1", "(= x 1)"),
      ("a < b = c", "(= (< a b) c)"),
      ("a = b = c", "(= (= a b) c)"),
      ("1 = 2", "(= 1 2)"),
      ("x = y + 1 * 2", "(= x (+ y (* 1 2)))"),
    ];
    for (src, expected) in cases {
      assert_eq!(expr(src), (expected.to_string(), vec![]), "{src}");
    }
  }

  #[test]
  fn equal_sign_after_non_variable_is_not_an_lvalue_error() {
    assert_eq!(expr("f() = 3"), ("(= (call f) 3)".to_string(), vec![]));
    assert_eq!(expr("-x = 1"), ("(= (neg x) 1)".to_string(), vec![]));
  }

  #[test]
  fn calls() {
    let cases = [
      ("f()", "(call f)"),
      ("f(1)", "(call f 1)"),
      ("f(a, b + 1, g(2))", "(call f a (+ b 1) (call g 2))"),
      ("-f(x) * 2", "(* (neg (call f x)) 2)"),
    ];
    for (src, expected) in cases {
      assert_eq!(expr(src), (expected.to_string(), vec![]), "{src}");
    }
  }

  #[test]
  fn literals() {
    let cases = [
      ("42", "42"),
      ("0x1F", "0x1F"),
      ("0xff", "0xff"),
      ("017", "017"),
      ("000", "0"),
      ("3.5", "3.5"),
      ("1.", "1.0"),
      ("2e3", "2000.0"),
      ("1.5E-1", "0.15"),
    ];
    for (src, expected) in cases {
      assert_eq!(expr(src), (expected.to_string(), vec![]), "{src}");
    }
  }

  #[test]
  fn literal_values_ignore_bad_suffix() {
    assert_eq!(int_lit_value("12abc"), IntLit::new(Radix::Decimal, "12"));
    assert_eq!(int_lit_value("0x"), IntLit::new(Radix::Hex, "0"));
    assert_eq!(int_lit_value("09"), IntLit::new(Radix::Octal, "0"));
    assert_eq!(int_lit_value("0"), IntLit::new(Radix::Decimal, "0"));
    assert_eq!(int_lit_value("0x00ffz"), IntLit::new(Radix::Hex, "ff"));
    assert_eq!(float_prefix("1.5e3x"), "1.5e3");
    assert_eq!(float_prefix("2.5.1"), "2.5");
    assert_eq!(float_prefix("1.e"), "1.");
    assert_eq!(float_prefix("6.02E+23f"), "6.02E+23");
  }

  #[test]
  fn huge_integer_keeps_all_digits() {
    let (dump, diags) = parse_dump("int big = 123456789012345678901234567890;");
    assert_eq!(dump, "(var int big 123456789012345678901234567890)");
    assert_eq!(diags, vec![]);
  }

  #[test]
  fn missing_operand() {
    assert_eq!(expr("1 +"), (String::new(), vec![DiagKind::Expected]));
    assert_eq!(expr(")"), (String::new(), vec![DiagKind::Expected]));
    assert_eq!(expr("(1"), (String::new(), vec![DiagKind::Expected]));
    assert_eq!(expr("f(1,"), (String::new(), vec![DiagKind::Expected]));
    assert_eq!(expr("f(1 2)"), (String::new(), vec![DiagKind::Expected]));
  }

  #[test]
  fn expected_message_names_tokens() {
    let mut diags = Diagnostics::new();
    let mut parser = Parser::new("(1;", &mut diags);
    assert_eq!(parser.parse_expr(), None);
    drop(parser);
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.message(), "expected ')' but found ';'");
    assert_eq!(diag.loc.offset, 2);
  }
}
