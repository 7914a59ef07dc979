use super::Expr;
use crate::ast::class_or_object::ObjMember;
use crate::ast::node::Node;
use crate::num::JsNumber;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
#[serde(tag = "$t")]
pub enum LitArrElem {
  Single(Node<Expr>),
  Rest(Node<Expr>),
  Empty,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitRegexExpr {
  #[drive(skip)]
  pub pattern: String,
  #[drive(skip)]
  pub flags: String,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

// Raw template text is kept as written; escapes have already been validated.
#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
#[serde(tag = "$t", content = "$c")]
pub enum LitTemplatePart {
  Substitution(Node<Expr>),
  String(#[drive(skip)] String),
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<LitTemplatePart>,
}
