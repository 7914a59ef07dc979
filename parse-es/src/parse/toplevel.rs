use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxResult;
use crate::token::TT;
use crate::SourceType;

impl<'a> Parser<'a> {
  /// Parses a whole script or module. Everything must be consumed.
  pub fn parse_top_level(&mut self, source_type: SourceType) -> SyntaxResult<Node<TopLevel>> {
    let ctx = ParseCtx::new(source_type);
    let (directives, body) = self.body(ctx, source_type == SourceType::Module)?;
    self.require(TT::EOF)?;
    Ok(self.node(self.source_range(), TopLevel {
      source_type,
      directives,
      body,
    }))
  }
}
