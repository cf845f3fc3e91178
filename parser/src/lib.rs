pub mod ast;
pub mod diag;
pub mod keywords;
pub mod lexer;
pub mod log;
pub mod parser;
pub mod src_loc;
pub mod token;


pub use ast::{Decl, Expr, Stmt, dump};
pub use diag::{DiagKind, Diagnostic, DiagnosticSink, Diagnostics, Severity};
pub use lexer::{LexError, Lexer};
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, Parsed, Parser, parse_str};
pub use src_loc::{SourceFile, SrcLoc};
pub use token::{Token, TokenKind};

pub mod internal {
  pub use crate::ast::*;
  pub use crate::diag::*;
  pub use crate::keywords;
  pub use crate::lexer::*;
  pub use crate::parser::*;
  pub use crate::src_loc::*;
  pub use crate::token::*;
  pub use tracing::{debug, instrument, trace};
}
