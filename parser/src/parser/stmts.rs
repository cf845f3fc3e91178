use super::Parser;
use crate::internal::{TokenKind as T, *};

impl Parser<'_, '_> {
  /// A single statement. A local declaration with an initializer needs two
  /// statements, so in this position the pair is wrapped in a block.
  pub(super) fn parse_stmt(&mut self) -> Option<Stmt> {
    let (stmt, init) = self.parse_block_item()?;
    Some(match init {
      Some(init) => Stmt::Compound(vec![stmt, init]),
      None => stmt,
    })
  }

  #[instrument(skip_all)]
  fn parse_block_item(&mut self) -> Option<(Stmt, Option<Stmt>)> {
    self.nested(|parser| {
      parser.skip_wrong_case_keywords();
      let stmt = match parser.cur.kind {
        kind if kind.is_type_specifier() => return parser.parse_local_var(),
        T::KwReturn => parser.parse_return(),
        T::KwIf => parser.parse_if(),
        T::LBrace => parser.parse_compound().map(Stmt::Compound),
        _ => parser.parse_expr_stmt(),
      };
      stmt.map(|stmt| (stmt, None))
    })
  }

  /// `{ stmt* }`. Broken statements are skipped so the rest of the block
  /// still parses.
  pub(super) fn parse_compound(&mut self) -> Option<Vec<Stmt>> {
    self.consume_expecting(T::LBrace)?;
    let mut stmts = Vec::new();
    while !self.cur_is_one_of(&[T::RBrace, T::Eof]) {
      match self.parse_block_item() {
        Some((stmt, init)) => {
          stmts.push(stmt);
          stmts.extend(init);
        }
        None => self.synchronize(),
      }
    }
    self.consume_expecting(T::RBrace)?;
    Some(stmts)
  }

  /// A local declaration is marked by an expression statement holding just
  /// the variable. An initializer follows as a separate assignment.
  fn parse_local_var(&mut self) -> Option<(Stmt, Option<Stmt>)> {
    self.advance(); // type specifier
    let name = self.consume_expecting(T::Ident)?;
    let text = self.text(name);
    let var = || Expr::VarRef { name: text.to_string(), loc: name.loc };
    let marker = Stmt::Expr(var());
    let init = if self.cur_is(T::Equal) {
      let equal = self.advance();
      let value = self.parse_expr()?;
      Some(Stmt::Expr(Expr::Binary {
        op: BinaryOp::EqualOrAssign,
        lhs: Box::new(var()),
        rhs: Box::new(value),
        loc: equal.loc,
      }))
    } else {
      None
    };
    self.consume_expecting(T::Semicolon)?;
    Some((marker, init))
  }

  fn parse_return(&mut self) -> Option<Stmt> {
    let loc = self.advance().loc;
    if self.consume(T::Semicolon) {
      return Some(Stmt::Return { value: None, loc });
    }
    let value = self.parse_expr()?;
    self.consume_expecting(T::Semicolon)?;
    Some(Stmt::Return { value: Some(value), loc })
  }

  fn parse_if(&mut self) -> Option<Stmt> {
    let loc = self.advance().loc;
    self.consume_expecting(T::LParen)?;
    let cond = self.parse_expr()?;
    self.consume_expecting(T::RParen)?;
    let then = Box::new(self.parse_stmt()?);
    let els = if self.consume(T::KwElse) {
      Some(Box::new(self.parse_stmt()?))
    } else {
      None
    };
    Some(Stmt::If { cond, then, els, loc })
  }

  fn parse_expr_stmt(&mut self) -> Option<Stmt> {
    let expr = self.parse_expr()?;
    self.consume_expecting(T::Semicolon)?;
    Some(Stmt::Expr(expr))
  }
}
