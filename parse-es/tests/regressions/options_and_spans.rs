use parse_es::ast::expr::pat::Pat;
use parse_es::ast::expr::Expr;
use parse_es::ast::stmt::Stmt;
use parse_es::loc::SourceSpan;
use parse_es::parse;
use parse_es::parse_with_options;
use parse_es::ParseOptions;
use parse_es::SourceType;

fn with_locations(source_type: SourceType) -> ParseOptions {
  ParseOptions {
    source_type,
    locations: true,
  }
}

fn line_col(span: &SourceSpan) -> ((usize, usize), (usize, usize)) {
  (
    (span.start.line, span.start.column),
    (span.end.line, span.end.column),
  )
}

#[test]
fn options_deserialize_with_defaults() {
  let opts: ParseOptions = serde_json::from_str("{}").unwrap();
  assert_eq!(opts, ParseOptions::default());
  assert_eq!(opts.source_type, SourceType::Script);
  assert!(!opts.locations);
  let opts: ParseOptions = serde_json::from_str(r#"{"source_type": "Module"}"#).unwrap();
  assert_eq!(opts, ParseOptions {
    source_type: SourceType::Module,
    locations: false,
  });
  let opts: ParseOptions = serde_json::from_str(r#"{"locations": true}"#).unwrap();
  assert!(opts.locations);
}

#[test]
fn source_type_selects_the_goal_symbol() {
  assert!(parse_with_options("export {};", ParseOptions::default()).is_err());
  assert!(parse_with_options("export {};", with_locations(SourceType::Module)).is_ok());
}

#[test]
fn nested_nodes_carry_spans() {
  let source = "if (a) {\n  b = c;\n}";
  let top = parse_with_options(source, with_locations(SourceType::Script)).unwrap();
  let stmt = &top.stx.body[0];
  assert_eq!(line_col(stmt.span().unwrap()), ((1, 0), (3, 1)));
  let Stmt::If(if_stmt) = stmt.stx.as_ref() else {
    panic!("expected if statement");
  };
  assert_eq!(line_col(if_stmt.stx.test.span().unwrap()), ((1, 4), (1, 5)));
  let Stmt::Block(block) = if_stmt.stx.consequent.stx.as_ref() else {
    panic!("expected block");
  };
  let Stmt::Expr(expr_stmt) = block.stx.body[0].stx.as_ref() else {
    panic!("expected expression statement");
  };
  let span = expr_stmt.stx.expr.span().unwrap();
  assert_eq!(line_col(span), ((2, 2), (2, 7)));
  assert_eq!((span.start.offset, span.end.offset), (11, 16));
}

#[test]
fn rewritten_patterns_keep_spans() {
  let top = parse_with_options("[a, b] = c", with_locations(SourceType::Script)).unwrap();
  let Stmt::Expr(expr_stmt) = top.stx.body[0].stx.as_ref() else {
    panic!("expected expression statement");
  };
  let Expr::Assign(assign) = expr_stmt.stx.expr.stx.as_ref() else {
    panic!("expected assignment");
  };
  assert!(matches!(assign.stx.target.stx.as_ref(), Pat::Arr(_)));
  assert_eq!(line_col(assign.stx.target.span().unwrap()), ((1, 0), (1, 6)));
}

#[test]
fn every_line_terminator_starts_a_line() {
  let source = "a\r\nb\rc\u{2028}d\u{2029}e\nf";
  let top = parse_with_options(source, with_locations(SourceType::Script)).unwrap();
  let lines: Vec<_> = top
    .stx
    .body
    .iter()
    .map(|s| s.span().unwrap().start.line)
    .collect();
  assert_eq!(lines, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn columns_count_characters_not_bytes() {
  let source = "'日本'; x";
  let top = parse_with_options(source, with_locations(SourceType::Script)).unwrap();
  let span = top.stx.body[1].span().unwrap();
  assert_eq!(span.start.column, 6);
  assert_eq!(span.start.offset, 10);
}

#[test]
fn locations_do_not_change_the_tree() {
  let source = "label: for (var i = 0; i < 3; i++) { if (i) continue label; }";
  let plain = parse(source).unwrap();
  let spanned = parse_with_options(source, with_locations(SourceType::Script)).unwrap();
  assert_eq!(plain, spanned);
  assert_eq!(
    serde_json::to_value(&plain).unwrap(),
    serde_json::to_value(&spanned).unwrap()
  );
  assert!(plain.span().is_none());
  assert!(spanned.span().is_some());
}
