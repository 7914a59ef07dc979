use super::expr::Expr;
use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;
use super::stx::Directive;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, From, PartialEq, Serialize, TryInto)]
#[serde(tag = "$t", content = "$c")]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // Concise arrow bodies.
  Expression(Node<Expr>),
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  #[drive(skip)]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  // The prologue of a block body. Always empty for concise bodies.
  pub directives: Vec<Node<Directive>>,
  pub body: FuncBody,
}

impl Func {
  pub fn has_use_strict(&self) -> bool {
    self.directives.iter().any(|d| d.stx.is_use_strict())
  }

  /// Whether every parameter is a plain identifier without a default or rest.
  pub fn has_simple_parameters(&self) -> bool {
    self.parameters.iter().all(|p| p.stx.is_simple())
  }
}
