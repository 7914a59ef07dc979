//! Static-semantics ("early error") checks that the grammar alone can't express.
//!
//! The checks are a single bottom-up fold over a finished tree. Each node's children are summarised into an [`state::EarlyErrorState`], combined left to right, and adjusted by node-specific rules; scope boundaries check and then clear the binding facts they own. Errors that only apply to strict code are held back until the enclosing function, class or program turns out to be strict.

use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use crate::loc::Loc;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use tracing::debug;

mod check;
pub mod state;
#[cfg(test)]
mod tests;

/// Statements whose body must not be a labelled function declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum LabelledFunctionParent {
  DoWhile,
  ForIn,
  ForOf,
  For,
  While,
  With,
  IfConsequent,
  IfAlternate,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum EarlyErrorKind {
  DuplicateBinding(String),
  FreeContinue,
  UnboundContinue(String),
  FreeBreak,
  UnboundBreak(String),
  SuperCall,
  SuperProperty,
  DuplicateConstructor,
  BindingIdentifierStrict(String),
  TargetIdentifierStrict(String),
  IdentifierExpressionStrict(String),
  SpecialConstructor,
  StaticPrototypeMethod,
  LabelledFunctionBody(LabelledFunctionParent),
  ConstWithoutInitializer,
  FunctionDeclarationInIfStrict,
  YieldLabelStrict,
  DuplicateLabel(String),
  LabelledFunctionStrict,
  DuplicateExport(String),
  UndeclaredExport(String),
  ReservedWordExport(String),
  NewTargetOutsideFunction,
  DuplicateProto,
  DeleteIdentifierStrict,
  LexicalLetBinding,
  WithStrict,
  YieldInArrowBody,
  YieldInArrowParameters,
  YieldInGeneratorParameters,
  UseStrictWithNonSimpleParameters,
  AwaitInArrowParameters,
  AwaitInAsyncParameters,
}

fn quoted(name: &str) -> String {
  let mut out = String::with_capacity(name.len() + 2);
  out.push('"');
  for c in name.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      c => out.push(c),
    };
  }
  out.push('"');
  out
}

impl EarlyErrorKind {
  pub fn message(&self) -> String {
    match self {
      EarlyErrorKind::DuplicateBinding(name) => format!("Duplicate binding {}", quoted(name)),
      EarlyErrorKind::FreeContinue => {
        "Continue statement must be nested within an iteration statement".into()
      }
      EarlyErrorKind::UnboundContinue(label) => format!(
        "Continue statement must be nested within an iteration statement with label {}",
        quoted(label)
      ),
      EarlyErrorKind::FreeBreak => {
        "Break statement must be nested within an iteration statement or a switch statement".into()
      }
      EarlyErrorKind::UnboundBreak(label) => format!(
        "Break statement must be nested within a statement with label {}",
        quoted(label)
      ),
      EarlyErrorKind::SuperCall => "Calls to super must be in the \"constructor\" method of a class expression or class declaration that has a superclass".into(),
      EarlyErrorKind::SuperProperty => "Member access on super must be in a method".into(),
      EarlyErrorKind::DuplicateConstructor => "Duplicate constructor method in class".into(),
      EarlyErrorKind::BindingIdentifierStrict(name)
      | EarlyErrorKind::TargetIdentifierStrict(name) => format!(
        "The identifier {} must not be in binding position in strict mode",
        quoted(name)
      ),
      EarlyErrorKind::IdentifierExpressionStrict(name) => format!(
        "The identifier {} must not be in expression position in strict mode",
        quoted(name)
      ),
      EarlyErrorKind::SpecialConstructor => {
        "Constructors cannot be async, generators, getters or setters".into()
      }
      EarlyErrorKind::StaticPrototypeMethod => {
        "Static class methods cannot be named \"prototype\"".into()
      }
      EarlyErrorKind::LabelledFunctionBody(parent) => match parent {
        LabelledFunctionParent::IfConsequent => {
          "The consequent of an if statement must not be a labeled function declaration".into()
        }
        LabelledFunctionParent::IfAlternate => {
          "The alternate of an if statement must not be a labeled function declaration".into()
        }
        parent => format!(
          "The body of a {} statement must not be a labeled function declaration",
          match parent {
            LabelledFunctionParent::DoWhile => "do-while",
            LabelledFunctionParent::ForIn => "for-in",
            LabelledFunctionParent::ForOf => "for-of",
            LabelledFunctionParent::For => "for",
            LabelledFunctionParent::While => "while",
            _ => "with",
          }
        ),
      },
      EarlyErrorKind::ConstWithoutInitializer => {
        "Constant lexical declarations must have an initialiser".into()
      }
      EarlyErrorKind::FunctionDeclarationInIfStrict => {
        "FunctionDeclarations in IfStatements are disallowed in strict mode".into()
      }
      EarlyErrorKind::YieldLabelStrict => {
        "The identifier \"yield\" must not be in label position in strict mode".into()
      }
      EarlyErrorKind::DuplicateLabel(label) => {
        format!("Label {} has already been declared", quoted(label))
      }
      EarlyErrorKind::LabelledFunctionStrict => {
        "Labeled FunctionDeclarations are disallowed in strict mode".into()
      }
      EarlyErrorKind::DuplicateExport(name) => format!("Duplicate export {}", quoted(name)),
      EarlyErrorKind::UndeclaredExport(name) => {
        format!("Exported binding {} is not declared", quoted(name))
      }
      EarlyErrorKind::ReservedWordExport(name) => {
        format!("Reserved word {} cannot be exported as a local binding", quoted(name))
      }
      EarlyErrorKind::NewTargetOutsideFunction => {
        "new.target must be within function (but not arrow expression) code".into()
      }
      EarlyErrorKind::DuplicateProto => {
        "Duplicate __proto__ property in object literal not allowed".into()
      }
      EarlyErrorKind::DeleteIdentifierStrict => {
        "Identifier expressions must not be deleted in strict mode".into()
      }
      EarlyErrorKind::LexicalLetBinding => {
        "Lexical declarations must not have a binding named \"let\"".into()
      }
      EarlyErrorKind::WithStrict => "Strict mode code must not include a with statement".into(),
      EarlyErrorKind::YieldInArrowBody => {
        "Concise arrow bodies must not contain yield expressions".into()
      }
      EarlyErrorKind::YieldInArrowParameters => {
        "Arrow parameters must not contain yield expressions".into()
      }
      EarlyErrorKind::YieldInGeneratorParameters => {
        "Generator parameters must not contain yield expressions".into()
      }
      EarlyErrorKind::UseStrictWithNonSimpleParameters => {
        "Functions with non-simple parameter lists may not contain a \"use strict\" directive".into()
      }
      EarlyErrorKind::AwaitInArrowParameters => {
        "Arrow parameters must not contain await expressions".into()
      }
      EarlyErrorKind::AwaitInAsyncParameters => {
        "Async function parameters must not contain await expressions".into()
      }
    }
  }
}

/// A static-semantics violation. `loc` covers the offending node.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EarlyError {
  pub loc: Loc,
  pub kind: EarlyErrorKind,
}

impl EarlyError {
  pub fn new(loc: Loc, kind: EarlyErrorKind) -> EarlyError {
    EarlyError { loc, kind }
  }

  pub fn message(&self) -> String {
    self.kind.message()
  }
}

impl Display for EarlyError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self.message(), self.loc.0, self.loc.1)
  }
}

/// Checks a parsed script or module, returning every early error ordered by position.
pub fn validate(top_level: &Node<TopLevel>) -> Vec<EarlyError> {
  let mut errors = check::top_level(top_level).errors;
  errors.sort_by_key(|e| e.loc.0);
  debug!(count = errors.len(), "validated");
  errors
}
