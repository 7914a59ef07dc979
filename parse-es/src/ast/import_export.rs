use super::node::Node;
use super::stmt::decl::PatDecl;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ExportName {
  // The local binding, or the name imported from the other module for `export {...} from`.
  #[drive(skip)]
  pub exportable: String,
  #[drive(skip)]
  pub alias: Option<String>,
}

impl ExportName {
  /// The name other modules see.
  pub fn exported(&self) -> &str {
    self.alias.as_deref().unwrap_or(&self.exportable)
  }
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
#[serde(tag = "$t", content = "$c")]
pub enum ExportNames {
  // `export * from "module"`
  All,
  Specific(Vec<Node<ExportName>>),
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ImportName {
  #[drive(skip)]
  pub importable: String,
  // The local binding. For `import {a}` the binding is `a` itself.
  pub alias: Node<PatDecl>,
}

#[derive(Debug, Drive, DriveMut, PartialEq, Serialize)]
#[serde(tag = "$t", content = "$c")]
pub enum ImportNames {
  // `import * as name`
  All(Node<PatDecl>),
  Specific(Vec<Node<ImportName>>),
}
