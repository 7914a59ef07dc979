use ast::node::Node;
use ast::stx::TopLevel;
use early::EarlyError;
use error::SyntaxResult;
use lex::tokenizer::Tokenizer;
use lex::Lexer;
use loc::LineIndex;
use parse::Parser;
use serde::Deserialize;
use serde::Serialize;
use token::Token;
use tracing::debug;
use tracing::debug_span;

pub mod ast;
pub mod char;
pub mod early;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod regex;
pub mod token;

/// The goal symbol. Module code is always strict and may contain `import` and `export`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SourceType {
  #[default]
  Script,
  Module,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ParseOptions {
  pub source_type: SourceType,
  // Attach a resolved `SourceSpan` to every node.
  pub locations: bool,
}

/// Parses `source` as a script.
pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  parse_with_options(source, ParseOptions::default())
}

pub fn parse_script(source: &str) -> SyntaxResult<Node<TopLevel>> {
  parse_with_options(source, ParseOptions {
    source_type: SourceType::Script,
    ..ParseOptions::default()
  })
}

pub fn parse_module(source: &str) -> SyntaxResult<Node<TopLevel>> {
  parse_with_options(source, ParseOptions {
    source_type: SourceType::Module,
    ..ParseOptions::default()
  })
}

/// Parses `source` to completion. On failure, the returned error has its position and message resolved.
pub fn parse_with_options(source: &str, opts: ParseOptions) -> SyntaxResult<Node<TopLevel>> {
  let span = debug_span!("parse", source_type = ?opts.source_type, len = source.len());
  let _guard = span.enter();
  let lexer = Lexer::new(source).with_html_comments(opts.source_type == SourceType::Script);
  let mut parser = Parser::new(lexer);
  if opts.locations {
    parser = parser.with_spans();
  };
  parser.parse_top_level(opts.source_type).map_err(|err| {
    debug!(code = err.typ.code(), offset = err.offset(), "parse failed");
    err.resolve(source, &LineIndex::new(source))
  })
}

/// Runs the static-semantics checks over a parsed tree. An empty list means the program has no early errors.
pub fn validate(top_level: &Node<TopLevel>) -> Vec<EarlyError> {
  early::validate(top_level)
}

/// Scans `source` without parsing, deciding whether each `/` starts a regular expression from the preceding tokens. The final token is always EOF.
pub fn tokenize(source: &str, source_type: SourceType) -> SyntaxResult<Vec<Token>> {
  Tokenizer::new(source, source_type)
    .collect::<SyntaxResult<Vec<_>>>()
    .map_err(|err| err.resolve(source, &LineIndex::new(source)))
}
