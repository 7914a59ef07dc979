mod expr;
mod stmt;

use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::operator::OperatorName;
use crate::parse;
use crate::parse_module;
use crate::parse_with_options;
use crate::token::TT;
use crate::ParseOptions;
use crate::SourceType;

#[test]
fn test_parser() {
  let lexer = Lexer::new("let x = /a/ / 1;");
  let mut p = Parser::new(lexer);
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peek the first token.
  let t = p.peek().unwrap();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the first token.
  let t = p.consume().unwrap();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the second token.
  let t = p.consume().unwrap();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::Identifier);

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 2);

  // A different mode doesn't invalidate tokens that can't start with a slash.
  let t = p.peek_with_mode(LexMode::SlashIsRegex).unwrap();
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::KeywordLet);
}

#[test]
fn test_regex_rescan() {
  let mut p = Parser::new(Lexer::new("x = /a/g;"));
  p.consume().unwrap();
  p.consume().unwrap();
  assert_eq!(p.peek().unwrap().typ, TT::Slash);
  assert_eq!(p.buf.len(), 3);
  // The buffered division token is dropped and rescanned.
  let t = p.peek_with_mode(LexMode::SlashIsRegex).unwrap();
  assert_eq!(t.typ, TT::LiteralRegex);
  assert_eq!(p.str(t.loc), "/a/g");
  assert_eq!(p.buf.len(), 3);
  assert_eq!(p.consume().unwrap().typ, TT::Slash);
}

fn only_expr(source: &str) -> Expr {
  let mut top = parse(source).unwrap();
  assert_eq!(top.stx.body.len(), 1);
  match *top.stx.body.remove(0).stx {
    Stmt::Expr(e) => *e.stx.expr.stx,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

#[test]
fn test_arrow_versus_sequence() {
  assert!(matches!(only_expr("(a, b) => a + b"), Expr::ArrowFunc(_)));
  assert!(matches!(only_expr("(a, b)"), Expr::Binary(_)));
  assert!(matches!(only_expr("async (a) => a"), Expr::ArrowFunc(_)));
  assert!(matches!(only_expr("async (a)"), Expr::Call(_)));
}

#[test]
fn test_cover_grammar_errors() {
  // Initialisers in object literals are only valid in patterns.
  assert_eq!(
    parse("({a = 1})").unwrap_err().typ,
    SyntaxErrorType::IllegalPropertyInitializer
  );
  assert!(parse("({a = 1}) => a").is_ok());
  assert!(parse("({a = 1} = b)").is_ok());
  assert!(parse("(a, b) + 1 => c").is_err());
  assert!(parse("[a + b] = c").is_err());
}

#[test]
fn test_asi() {
  let top = parse("a\n++b").unwrap();
  assert_eq!(top.stx.body.len(), 2);
  assert!(parse("a ++b").is_err());
  let top = parse("return_ = 1\n(function () {})").unwrap();
  assert_eq!(top.stx.body.len(), 1);
  assert_eq!(
    parse("throw\nx").unwrap_err().typ,
    SyntaxErrorType::LineTerminatorAfterThrow
  );
}

#[test]
fn test_regex_or_division() {
  let Expr::Binary(outer) = only_expr("a / b / c") else {
    panic!("expected division");
  };
  assert!(matches!(*outer.stx.left.stx, Expr::Binary(_)));
  let top = parse("if (1) /x/.test(a)").unwrap();
  let Stmt::If(if_stmt) = &*top.stx.body[0].stx else {
    panic!("expected if statement");
  };
  let Stmt::Expr(test) = &*if_stmt.stx.consequent.stx else {
    panic!("expected expression statement");
  };
  let Expr::Call(call) = &*test.stx.expr.stx else {
    panic!("expected call");
  };
  let Expr::Member(member) = &*call.stx.callee.stx else {
    panic!("expected member");
  };
  assert!(matches!(*member.stx.left.stx, Expr::LitRegex(_)));
}

#[test]
fn test_source_types() {
  assert!(parse("import a from 'a';").is_err());
  assert!(parse_module("import a from 'a';").is_ok());
  assert!(parse("var await;").is_ok());
  assert!(parse_module("var await;").is_err());
  // HTML-like comments are only recognised in scripts.
  assert!(parse("<!-- comment\nx").is_ok());
  assert!(parse_module("<!-- comment\nx").is_err());
}

#[test]
fn test_spans_are_optional() {
  let source = "let a =\n  1";
  let plain = parse(source).unwrap();
  assert!(plain.stx.body[0].span().is_none());
  let spanned = parse_with_options(source, ParseOptions {
    source_type: SourceType::Script,
    locations: true,
  })
  .unwrap();
  let span = spanned.stx.body[0].span().unwrap();
  assert_eq!((span.start.line, span.start.column), (1, 0));
  assert_eq!((span.end.line, span.end.column), (2, 3));
  // Spans don't change the tree.
  assert_eq!(plain, spanned);
}

#[test]
fn test_error_position() {
  let err = parse("a;\nb c").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedIdentifier);
  assert_eq!(err.offset(), 5);
  assert_eq!(err.line(), Some(2));
  assert_eq!(err.column(), Some(2));
}

#[test]
fn test_deterministic() {
  let source = "label: for (let [a, {b}] of c) { if (a) continue label; x = y => ({z}) }";
  let a = serde_json::to_value(parse(source).unwrap()).unwrap();
  let b = serde_json::to_value(parse(source).unwrap()).unwrap();
  assert_eq!(a, b);
}

#[test]
fn test_long_operator_chains() {
  let source = vec!["a * b"; 10_000].join(" + ");
  let top = parse(&source).unwrap();
  let Stmt::Expr(stmt) = &*top.stx.body[0].stx else {
    panic!("expected expression statement");
  };
  let Expr::Binary(outer) = &*stmt.stx.expr.stx else {
    panic!("expected binary expression");
  };
  assert_eq!(outer.stx.operator, OperatorName::Addition);
  assert!(matches!(*outer.stx.right.stx, Expr::Binary(_)));
  // Dropping the chain mustn't recurse once per operator.
  drop(top);
}
