use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::lex::Lexer;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use crate::token::TT;
use crate::util::test::evaluate_test_input_files;
use crate::SourceType;
use serde_json::Value;

fn parse_expr(input: &str) -> Node<Expr> {
  let mut parser = Parser::new(Lexer::new(input));
  let expr = parser.expr(ParseCtx::new(SourceType::Script)).unwrap();
  parser.require(TT::EOF).unwrap();
  expr
}

fn parse_expr_and_serialize(input: String) -> Value {
  let node = parse_expr(input.trim_end());
  serde_json::to_value(&node).unwrap()
}

#[test]
fn test_parse_expression() {
  evaluate_test_input_files("parse/tests/expr", parse_expr_and_serialize);
}

#[test]
fn parses_nested_templates() {
  let Expr::LitTemplate(template) = *parse_expr("`a${`b${c}`}d`").stx else {
    panic!("expected template");
  };
  assert_eq!(template.stx.parts.len(), 3);
}

#[test]
fn exponentiation_is_right_associative() {
  let Expr::Binary(outer) = *parse_expr("a ** b ** c").stx else {
    panic!("expected binary expression");
  };
  assert!(matches!(*outer.stx.left.stx, Expr::Id(_)));
  assert!(matches!(*outer.stx.right.stx, Expr::Binary(_)));
}
