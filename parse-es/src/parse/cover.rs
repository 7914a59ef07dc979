use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;

/// What we know so far about whether the expression being parsed could instead be a pattern.
///
/// Productions that rule out a reinterpretation clear the matching flag. Errors that only apply if the expression stays an expression (e.g. `{a = 1}` outside a pattern) are deferred in `first_error`.
#[derive(Debug)]
pub struct CoverGrammar {
  pub is_binding_element: bool,
  pub is_assignment_target: bool,
  pub first_error: Option<SyntaxError>,
}

impl CoverGrammar {
  pub fn new() -> CoverGrammar {
    CoverGrammar {
      is_binding_element: true,
      is_assignment_target: true,
      first_error: None,
    }
  }

  /// Neither a binding element nor an assignment target.
  pub fn clear(&mut self) {
    self.is_binding_element = false;
    self.is_assignment_target = false;
  }

  /// Keeps the earliest deferred error.
  pub fn defer(&mut self, err: SyntaxError) {
    self.first_error.get_or_insert(err);
  }
}

impl Default for CoverGrammar {
  fn default() -> Self {
    CoverGrammar::new()
  }
}

/// A parenthesised parameter list (or `async (...)`) seen before its `=>`.
#[derive(Debug)]
pub struct ArrowHead {
  pub loc: Loc,
  pub parameters: Vec<Node<ParamDecl>>,
  pub async_: bool,
}

/// The result of parsing under a cover grammar.
#[derive(Debug)]
pub enum CoverExpr {
  Expr(Node<Expr>),
  // Only valid if `=>` follows.
  ArrowHead(ArrowHead),
  // Only valid as a pattern, e.g. an object literal with `a = 1` shorthands.
  Target(Node<Pat>),
}

impl<'a> Parser<'a> {
  /// Parses with a fresh cover state. A deferred error surfaces here, since the result can no longer become a pattern.
  pub fn isolate<T, F>(&mut self, f: F) -> SyntaxResult<T>
  where
    F: FnOnce(&mut Self, &mut CoverGrammar) -> SyntaxResult<T>,
  {
    let mut cg = CoverGrammar::new();
    let res = f(self, &mut cg)?;
    match cg.first_error {
      Some(err) => Err(err),
      None => Ok(res),
    }
  }

  /// Parses with a fresh cover state, then merges it into `outer`: flags are conjoined and the earliest deferred error wins.
  pub fn inherit<T, F>(&mut self, outer: &mut CoverGrammar, f: F) -> SyntaxResult<T>
  where
    F: FnOnce(&mut Self, &mut CoverGrammar) -> SyntaxResult<T>,
  {
    let mut cg = CoverGrammar::new();
    let res = f(self, &mut cg)?;
    outer.is_binding_element &= cg.is_binding_element;
    outer.is_assignment_target &= cg.is_assignment_target;
    if outer.first_error.is_none() {
      outer.first_error = cg.first_error;
    };
    Ok(res)
  }

  /// Requires a plain expression.
  pub fn cover_to_expr(&mut self, cover: CoverExpr) -> SyntaxResult<Node<Expr>> {
    match cover {
      CoverExpr::Expr(e) => Ok(e),
      CoverExpr::ArrowHead(_) => {
        let t = self.peek()?;
        Err(self.unexpected(t))
      }
      CoverExpr::Target(t) => Err(t.error(SyntaxErrorType::UnexpectedObjectBinding)),
    }
  }
}
