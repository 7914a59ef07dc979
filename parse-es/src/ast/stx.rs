use super::node::Node;
use super::stmt::Stmt;
use crate::SourceType;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// A string literal statement in a prologue. `raw` is the text between the quotes, escapes included.
#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Directive {
  #[drive(skip)]
  pub raw: String,
}

impl Directive {
  pub fn is_use_strict(&self) -> bool {
    self.raw == "use strict"
  }
}

/// The root of a script or module.
#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct TopLevel {
  #[drive(skip)]
  pub source_type: SourceType,
  pub directives: Vec<Node<Directive>>,
  pub body: Vec<Node<Stmt>>,
}
