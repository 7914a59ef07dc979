use super::Parser;
use super::ParserCheckpoint;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

impl<'a> Parser<'a> {
  pub fn with_loc<S: Drive + DriveMut, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.checkpoint();
    let stx = f(self)?;
    Ok(self.finish(&start, stx))
  }

  /// Creates a node spanning everything consumed since `start`.
  pub fn finish<S: Drive + DriveMut>(&self, start: &ParserCheckpoint, stx: S) -> Node<S> {
    self.node(self.since_checkpoint(start), stx)
  }

  pub fn repeat_while<S, F, W>(&mut self, w: W, f: F) -> SyntaxResult<Vec<S>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
    W: Fn(&mut Self) -> SyntaxResult<bool>,
  {
    let mut nodes = Vec::new();
    while w(self)? {
      nodes.push(f(self)?);
    }
    Ok(nodes)
  }

  /// Repeats `f` until the next token is `tt` or the end of input. Neither is consumed.
  pub fn repeat_until_tt<S, F>(&mut self, tt: TT, f: F) -> SyntaxResult<Vec<S>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    self.repeat_while(
      |p| {
        let t = p.peek()?;
        Ok(t.typ != tt && t.typ != TT::EOF)
      },
      f,
    )
  }
}
