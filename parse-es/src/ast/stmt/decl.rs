use crate::ast::class_or_object::ClassMember;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// Anonymous `export default` functions and classes bind this name.
pub const DEFAULT_EXPORT_BINDING: &str = "*default*";

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  pub name: Node<ClassOrFuncName>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  pub name: Node<ClassOrFuncName>,
  pub function: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ParamDecl {
  #[drive(skip)]
  pub rest: bool,
  pub pattern: Node<PatDecl>,
  pub default_value: Option<Node<Expr>>,
}

impl ParamDecl {
  pub fn is_simple(&self) -> bool {
    !self.rest && self.default_value.is_none() && matches!(*self.pattern.stx.pat.stx, Pat::Id(_))
  }
}

/// A pattern in a binding position: declarations, parameters, catch clauses, imports.
#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct PatDecl {
  pub pat: Node<Pat>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<PatDecl>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}
