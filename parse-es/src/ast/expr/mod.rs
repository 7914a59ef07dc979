pub mod lit;
pub mod pat;

use super::class_or_object::ClassMember;
use super::func::Func;
use super::node::Node;
use crate::operator::OperatorName;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use lit::LitArrExpr;
use lit::LitBoolExpr;
use lit::LitNullExpr;
use lit::LitNumExpr;
use lit::LitObjExpr;
use lit::LitRegexExpr;
use lit::LitStrExpr;
use lit::LitTemplateExpr;
use lit::LitTemplatePart;
use pat::ClassOrFuncName;
use pat::Pat;
use serde::Serialize;
use std::mem;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, PartialEq, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Assign(Node<AssignExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  NewTarget(Node<NewTargetExpr>),
  Super(Node<SuperExpr>),
  TaggedTemplate(Node<TaggedTemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),
  Yield(Node<YieldExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),
}

impl Expr {
  /// Identifiers and member accesses: the only expressions a compound assignment or update may target.
  pub fn is_simple_target(&self) -> bool {
    matches!(self, Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_))
  }
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>, // Always has `arrow` set.
}

/// Simple and compound assignment. For compound operators, the target is always an identifier or member pattern.
#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct AssignExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub target: Node<Pat>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

// Long operator chains nest thousands deep. Operands that are themselves binary are detached and dropped from a
// worklist, so dropping a chain doesn't recurse once per operator.
impl Drop for BinaryExpr {
  fn drop(&mut self) {
    let mut pending = Vec::new();
    detach_binary(&mut self.left, &mut pending);
    detach_binary(&mut self.right, &mut pending);
    while let Some(mut operand) = pending.pop() {
      if let Expr::Binary(n) = &mut operand {
        detach_binary(&mut n.stx.left, &mut pending);
        detach_binary(&mut n.stx.right, &mut pending);
      };
    }
  }
}

fn detach_binary(operand: &mut Node<Expr>, pending: &mut Vec<Expr>) {
  if matches!(*operand.stx, Expr::Binary(_)) {
    let placeholder = Expr::This(Node::new(operand.loc, ThisExpr {}));
    pending.push(mem::replace(&mut *operand.stx, placeholder));
  };
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CallExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ComputedMemberExpr {
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct FuncExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct MemberExpr {
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct NewExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct NewTargetExpr {}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct TaggedTemplateExpr {
  pub function: Node<Expr>,
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct UnaryPostfixExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct YieldExpr {
  #[drive(skip)]
  pub delegate: bool,
  pub argument: Option<Node<Expr>>,
}
