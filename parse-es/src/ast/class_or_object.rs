use super::expr::Expr;
use super::expr::IdExpr;
use super::func::Func;
use super::node::Node;
use crate::token::TT;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  // The property name: identifier names as written, strings unescaped, numbers canonicalised.
  #[drive(skip)]
  pub key: String,
  #[drive(skip)]
  pub tt: TT,
}

#[derive(Debug, Drive, DriveMut, From, PartialEq, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum ClassOrObjKey {
  // Identifier, keyword, string, number.
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

impl ClassOrObjKey {
  /// The static property name, if the key isn't computed.
  pub fn static_name(&self) -> Option<&str> {
    match self {
      ClassOrObjKey::Direct(key) => Some(&key.stx.key),
      ClassOrObjKey::Computed(_) => None,
    }
  }
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassOrObjGetter {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassOrObjMethod {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassOrObjSetter {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, From, PartialEq, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum ClassOrObjVal {
  Getter(Node<ClassOrObjGetter>),
  Setter(Node<ClassOrObjSetter>),
  Method(Node<ClassOrObjMethod>),
  // Only in object literals.
  Prop(Node<Expr>),
}

impl ClassOrObjVal {
  pub fn func(&self) -> Option<&Node<Func>> {
    match self {
      ClassOrObjVal::Getter(g) => Some(&g.stx.func),
      ClassOrObjVal::Setter(s) => Some(&s.stx.func),
      ClassOrObjVal::Method(m) => Some(&m.stx.func),
      ClassOrObjVal::Prop(_) => None,
    }
  }
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
#[serde(tag = "$t")]
pub enum ObjMemberType {
  Valued { key: ClassOrObjKey, val: ClassOrObjVal },
  Shorthand { id: Node<IdExpr> },
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ClassMember {
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  // Never `Prop`.
  pub val: ClassOrObjVal,
}
