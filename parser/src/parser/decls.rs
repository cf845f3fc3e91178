use super::Parser;
use crate::internal::{TokenKind as T, *};

impl Parser<'_, '_> {
  #[instrument(skip_all)]
  pub(super) fn parse_top_level_decl(&mut self) -> Option<Decl> {
    self.skip_wrong_case_keywords();
    if self.cur_is_one_of(&[T::RBrace, T::Eof]) {
      return None;
    }
    let Some(type_name) = TypeName::from_token(self.cur.kind) else {
      self.expected("type specifier");
      self.synchronize_decl();
      return None;
    };
    self.advance();

    match self.cur.kind {
      T::Ident => {}
      T::IntLit | T::FloatLit => {
        let literal = self.advance();
        let args = vec![self.text(literal).to_string()];
        self.report(literal.loc, DiagKind::InvalidDeclName, args);
        if self.cur_is(T::LParen) {
          self.skip_balanced(T::LParen, T::RParen);
          self.skip_trailing_body();
        } else {
          self.synchronize_decl();
        }
        return None;
      }
      _ => {
        self.expected("identifier");
        self.synchronize_decl();
        return None;
      }
    }

    let name = self.advance();
    let name_text = self.text(name).to_string();
    trace!(name = %name_text, "declaration");
    if self.cur_is(T::LParen) {
      self
        .parse_function(type_name, name_text, name.loc)
        .map(Decl::Function)
    } else {
      self
        .parse_global_var(type_name, name_text, name.loc)
        .map(Decl::Var)
    }
  }

  fn parse_function(
    &mut self,
    return_type: TypeName,
    name: String,
    loc: SrcLoc,
  ) -> Option<FunctionDecl> {
    self.advance(); // `(`
    let Some(params) = self.parse_params() else {
      self.synchronize_decl();
      return None;
    };
    let mut func = FunctionDecl { name, loc, return_type, params, body: None };
    match self.cur.kind {
      T::LBrace => func.body = Some(self.parse_compound()?),
      T::Semicolon => {
        self.advance();
      }
      _ => {
        self.expected("'{' or ';'");
        while !self.cur_is_one_of(&[T::Semicolon, T::LBrace, T::Eof]) {
          self.advance();
        }
        if self.cur_is(T::LBrace) {
          func.body = Some(self.parse_compound()?);
        } else {
          self.consume(T::Semicolon);
        }
      }
    }
    Some(func)
  }

  /// Parameters through the closing `)`. A lone `void` means none.
  fn parse_params(&mut self) -> Option<Vec<Param>> {
    let mut params = Vec::new();
    if self.consume(T::RParen) {
      return Some(params);
    }
    loop {
      let Some(type_name) = TypeName::from_token(self.cur.kind) else {
        self.expected("type specifier");
        return None;
      };
      self.advance();
      if type_name == TypeName::Void && params.is_empty() && self.consume(T::RParen) {
        return Some(params);
      }
      let name = self.consume_expecting(T::Ident)?;
      params.push(Param {
        name: self.text(name).to_string(),
        type_name,
        loc: name.loc,
      });
      if !self.consume(T::Comma) {
        break;
      }
    }
    self.consume_expecting(T::RParen)?;
    Some(params)
  }

  fn parse_global_var(
    &mut self,
    type_name: TypeName,
    name: String,
    loc: SrcLoc,
  ) -> Option<VarDecl> {
    let mut init = None;
    if self.consume(T::Equal) {
      init = self.parse_expr();
      if init.is_none() {
        self.synchronize();
        return None;
      }
    }
    if self.consume_expecting(T::Semicolon).is_none() {
      self.synchronize();
      return None;
    }
    Some(VarDecl { name, loc, type_name, init })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse_dump;
  use pretty_assertions::assert_eq;

  #[test]
  fn global_variables() {
    let (dump, diags) = parse_dump("int a; float b = 1.5; int c = -a * 2; void d;");
    assert_eq!(
      dump,
      "(var int a)\n(var float b 1.5)\n(var int c (* (neg a) 2))\n(var void d)"
    );
    assert_eq!(diags, vec![]);
  }

  #[test]
  fn functions_and_prototypes() {
    let (dump, diags) = parse_dump(
      r#"
      int max(int a, int b);
      float half(float x) { return x / 2; }
      void noop() {}
      int main(void) {
        if (max(1, 2) > 1) return 0;
        return 1;
      }"#,
    );
    assert_eq!(diags, vec![]);
    assert_eq!(
      dump,
      "(proto int max (int a, int b))\n\
       (fn float half (float x) (return (/ x 2)))\n\
       (fn void noop ())\n\
       (fn int main () (if (> (call max 1 2) 1) (return 0)) (return 1))"
    );
  }

  #[test]
  fn void_is_only_special_alone() {
    let (dump, diags) = parse_dump("int f(int a, void);");
    assert_eq!(dump, "");
    assert_eq!(diags, vec![DiagKind::Expected]);

    let (dump, diags) = parse_dump("int g(void v);");
    assert_eq!(dump, "(proto int g (void v))");
    assert_eq!(diags, vec![]);
  }

  #[test]
  fn numeric_name_skips_the_whole_declaration() {
    let (dump, diags) = parse_dump("int 123() {} int y;");
    assert_eq!(dump, "(var int y)");
    assert_eq!(diags, vec![DiagKind::InvalidDeclName]);

    let (dump, diags) = parse_dump("float 2.5 = 3; int 7(int a); int z;");
    assert_eq!(dump, "(var int z)");
    assert_eq!(diags, vec![DiagKind::InvalidDeclName, DiagKind::InvalidDeclName]);
  }

  #[test]
  fn invalid_name_message() {
    let (parsed, diags) = parse_str("int 0x10;");
    assert!(parsed.decls.is_empty());
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.message(), "invalid function or variable name '0x10'");
    assert_eq!(diag.loc, SrcLoc::new(4, 4));
  }

  #[test]
  fn missing_body_or_semicolon() {
    let (text, diags) = parse_dump("int f() x y { return 1; } int g;");
    assert_eq!(text, "(fn int f () (return 1))\n(var int g)");
    assert_eq!(diags, vec![DiagKind::Expected]);

    let (parsed, diags) = parse_str("int f() = 3; int g;");
    assert_eq!(dump(&parsed.decls), "(proto int f ())\n(var int g)");
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.message(), "expected '{' or ';' but found '='");
  }

  #[test]
  fn not_a_declaration() {
    let (dump, diags) = parse_dump("x = 1; return; int y;");
    assert_eq!(dump, "(var int y)");
    assert_eq!(diags, vec![DiagKind::Expected, DiagKind::Expected]);

    let (parsed, diags) = parse_str("int ;");
    assert!(parsed.decls.is_empty());
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.message(), "expected identifier but found ';'");
  }

  #[test]
  fn wrong_case_type_specifier_is_retried() {
    let (dump, diags) = parse_dump("INT int x; Float y;");
    assert_eq!(dump, "(var int x)");
    assert_eq!(
      diags,
      vec![
        DiagKind::WrongKeywordCase,
        DiagKind::WrongKeywordCase,
        DiagKind::Expected,
      ]
    );
  }

  #[test]
  fn missing_semicolon_after_variable() {
    let (dump, diags) = parse_dump("int a = 1 int b; int c;");
    assert_eq!(dump, "(var int c)");
    assert_eq!(diags, vec![DiagKind::Expected]);
  }
}
