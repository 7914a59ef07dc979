use super::ComputedMemberExpr;
use super::Expr;
use super::MemberExpr;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::node::Node;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// A binding or assignment target. Member targets only appear in assignment positions, never in declarations or parameters.
#[derive(Debug, Drive, DriveMut, From, PartialEq, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
  Member(Node<MemberExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ArrPat {
  // Holes are None.
  pub elements: Vec<Option<ArrPatElem>>,
  pub rest: Option<Node<Pat>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ObjPatProp {
  pub key: ClassOrObjKey,
  // For shorthands, this is an identifier pattern with the key's name.
  pub target: Node<Pat>,
  #[drive(skip)]
  pub shorthand: bool,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
}

// Not really a pattern but functions similarly; separated out for easy replacement when minifying.
#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassOrFuncName {
  #[drive(skip)]
  pub name: String,
}
