use crate::internal::{TokenKind as T, *};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
  Int,
  Float,
  Void,
}

impl TypeName {
  pub const fn from_token(kind: TokenKind) -> Option<Self> {
    match kind {
      T::KwInt => Some(TypeName::Int),
      T::KwFloat => Some(TypeName::Float),
      T::KwVoid => Some(TypeName::Void),
      _ => None,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      TypeName::Int => "int",
      TypeName::Float => "float",
      TypeName::Void => "void",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
  Function(FunctionDecl),
  Var(VarDecl),
}

impl Decl {
  pub fn name(&self) -> &str {
    match self {
      Decl::Function(func) => &func.name,
      Decl::Var(var) => &var.name,
    }
  }

  pub const fn loc(&self) -> SrcLoc {
    match self {
      Decl::Function(func) => func.loc,
      Decl::Var(var) => var.loc,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
  pub name: String,
  pub type_name: TypeName,
  pub loc: SrcLoc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
  pub name: String,
  pub loc: SrcLoc,
  pub return_type: TypeName,
  pub params: Vec<Param>,
  /// `None` for a prototype.
  pub body: Option<Vec<Stmt>>,
}

impl FunctionDecl {
  pub const fn is_prototype(&self) -> bool {
    self.body.is_none()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
  pub name: String,
  pub loc: SrcLoc,
  pub type_name: TypeName,
  pub init: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
  Octal = 8,
  Decimal = 10,
  Hex = 16,
}

/// Integer constant of any width: the digits (without prefix) in `radix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntLit {
  pub radix: Radix,
  pub digits: String,
}

impl IntLit {
  pub fn new(radix: Radix, digits: impl Into<String>) -> Self {
    IntLit { radix, digits: digits.into() }
  }

  pub fn to_u64(&self) -> Option<u64> {
    u64::from_str_radix(&self.digits, self.radix as u32).ok()
  }

  pub fn to_i128(&self) -> Option<i128> {
    i128::from_str_radix(&self.digits, self.radix as u32).ok()
  }
}

impl fmt::Display for IntLit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.radix {
      Radix::Decimal => write!(f, "{}", self.digits),
      Radix::Octal if self.digits == "0" => f.write_str("0"),
      Radix::Octal => write!(f, "0{}", self.digits),
      Radix::Hex => write!(f, "0x{}", self.digits),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
  Negate,
  LogicalNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  LessThan,
  GreaterThan,
  /// `=`: assignment when the left side had to be a `VarRef`, equality
  /// everywhere else.
  EqualOrAssign,
}

impl BinaryOp {
  pub const fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::LessThan => "<",
      BinaryOp::GreaterThan => ">",
      BinaryOp::EqualOrAssign => "=",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  IntLit {
    value: IntLit,
    loc: SrcLoc,
  },
  FloatLit {
    value: f64,
    loc: SrcLoc,
  },
  VarRef {
    name: String,
    loc: SrcLoc,
  },
  Unary {
    op: UnaryOp,
    operand: Box<Expr>,
    loc: SrcLoc,
  },
  Binary {
    op: BinaryOp,
    lhs: Box<Expr>,
    rhs: Box<Expr>,
    loc: SrcLoc,
  },
  Call {
    callee: String,
    args: Vec<Expr>,
    loc: SrcLoc,
  },
}

impl Expr {
  pub const fn loc(&self) -> SrcLoc {
    match self {
      Expr::IntLit { loc, .. }
      | Expr::FloatLit { loc, .. }
      | Expr::VarRef { loc, .. }
      | Expr::Unary { loc, .. }
      | Expr::Binary { loc, .. }
      | Expr::Call { loc, .. } => *loc,
    }
  }

  pub const fn is_var_ref(&self) -> bool {
    matches!(self, Expr::VarRef { .. })
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
  Expr(Expr),
  Return {
    value: Option<Expr>,
    loc: SrcLoc,
  },
  If {
    cond: Expr,
    then: Box<Stmt>,
    els: Option<Box<Stmt>>,
    loc: SrcLoc,
  },
  Compound(Vec<Stmt>),
}

/// One S-expression per declaration, newline separated.
pub fn dump(decls: &[Decl]) -> String {
  decls
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("\n")
}

impl fmt::Display for Decl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Decl::Function(func) => {
        let head = if func.is_prototype() { "proto" } else { "fn" };
        write!(f, "({head} {} {} (", func.return_type.as_str(), func.name)?;
        for (i, param) in func.params.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{} {}", param.type_name.as_str(), param.name)?;
        }
        f.write_str(")")?;
        for stmt in func.body.iter().flatten() {
          write!(f, " {stmt}")?;
        }
        f.write_str(")")
      }
      Decl::Var(var) => {
        write!(f, "(var {} {}", var.type_name.as_str(), var.name)?;
        if let Some(init) = &var.init {
          write!(f, " {init}")?;
        }
        f.write_str(")")
      }
    }
  }
}

impl fmt::Display for Stmt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stmt::Expr(expr) => write!(f, "(expr {expr})"),
      Stmt::Return { value: None, .. } => f.write_str("(return)"),
      Stmt::Return { value: Some(value), .. } => write!(f, "(return {value})"),
      Stmt::If { cond, then, els, .. } => {
        write!(f, "(if {cond} {then}")?;
        if let Some(els) = els {
          write!(f, " {els}")?;
        }
        f.write_str(")")
      }
      Stmt::Compound(stmts) => {
        f.write_str("(block")?;
        for stmt in stmts {
          write!(f, " {stmt}")?;
        }
        f.write_str(")")
      }
    }
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::IntLit { value, .. } => write!(f, "{value}"),
      Expr::FloatLit { value, .. } => write!(f, "{value:?}"),
      Expr::VarRef { name, .. } => f.write_str(name),
      Expr::Unary { op, operand, .. } => {
        let op = match op {
          UnaryOp::Negate => "neg",
          UnaryOp::LogicalNot => "not",
        };
        write!(f, "({op} {operand})")
      }
      Expr::Binary { op, lhs, rhs, .. } => write!(f, "({} {lhs} {rhs})", op.symbol()),
      Expr::Call { callee, args, .. } => {
        write!(f, "(call {callee}")?;
        for arg in args {
          write!(f, " {arg}")?;
        }
        f.write_str(")")
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn var(name: &str) -> Expr {
    Expr::VarRef { name: name.into(), loc: SrcLoc::default() }
  }

  fn int(digits: &str) -> Expr {
    Expr::IntLit {
      value: IntLit::new(Radix::Decimal, digits),
      loc: SrcLoc::default(),
    }
  }

  #[test]
  fn int_lit_views() {
    assert_eq!(IntLit::new(Radix::Hex, "ff").to_u64(), Some(255));
    assert_eq!(IntLit::new(Radix::Octal, "17").to_u64(), Some(15));
    assert_eq!(IntLit::new(Radix::Decimal, "42").to_i128(), Some(42));
    let huge = IntLit::new(Radix::Decimal, "123456789012345678901234567890");
    assert_eq!(huge.to_u64(), None);
    assert_eq!(huge.to_i128(), Some(123456789012345678901234567890));
    assert_eq!(IntLit::new(Radix::Hex, "1F").to_string(), "0x1F");
    assert_eq!(IntLit::new(Radix::Octal, "17").to_string(), "017");
  }

  #[test]
  fn dump_shapes() {
    let call = Expr::Call {
      callee: "g".into(),
      args: vec![int("1"), var("x")],
      loc: SrcLoc::default(),
    };
    let neg = Expr::Unary {
      op: UnaryOp::Negate,
      operand: Box::new(var("y")),
      loc: SrcLoc::default(),
    };
    let body = vec![
      Stmt::If {
        cond: Expr::Binary {
          op: BinaryOp::LessThan,
          lhs: Box::new(var("a")),
          rhs: Box::new(neg),
          loc: SrcLoc::default(),
        },
        then: Box::new(Stmt::Expr(call)),
        els: Some(Box::new(Stmt::Compound(vec![]))),
        loc: SrcLoc::default(),
      },
      Stmt::Return { value: None, loc: SrcLoc::default() },
    ];
    let decls = vec![
      Decl::Function(FunctionDecl {
        name: "f".into(),
        loc: SrcLoc::default(),
        return_type: TypeName::Void,
        params: vec![
          Param { name: "a".into(), type_name: TypeName::Int, loc: SrcLoc::default() },
          Param { name: "b".into(), type_name: TypeName::Float, loc: SrcLoc::default() },
        ],
        body: Some(body),
      }),
      Decl::Function(FunctionDecl {
        name: "h".into(),
        loc: SrcLoc::default(),
        return_type: TypeName::Int,
        params: vec![],
        body: None,
      }),
      Decl::Var(VarDecl {
        name: "x".into(),
        loc: SrcLoc::default(),
        type_name: TypeName::Float,
        init: Some(Expr::FloatLit { value: 1.5, loc: SrcLoc::default() }),
      }),
    ];
    assert_eq!(
      dump(&decls),
      "(fn void f (int a, float b) (if (< a (neg y)) (expr (call g 1 x)) (block)) (return))\n\
       (proto int h ())\n\
       (var float x 1.5)"
    );
  }

  #[test]
  fn type_names() {
    assert_eq!(TypeName::from_token(T::KwInt), Some(TypeName::Int));
    assert_eq!(TypeName::from_token(T::KwFloat), Some(TypeName::Float));
    assert_eq!(TypeName::from_token(T::KwVoid), Some(TypeName::Void));
    assert_eq!(TypeName::from_token(T::Ident), None);
    assert_eq!(TypeName::Float.as_str(), "float");
  }
}
