use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use derive_visitor::VisitorMut;
use parse_es::ast::expr::pat::IdPat;
use parse_es::ast::expr::IdExpr;
use parse_es::ast::node::Node;
use parse_es::loc::SourceSpan;
use parse_es::parse;
use parse_es::parse_with_options;
use parse_es::ParseOptions;

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;

#[derive(Default, Visitor)]
#[visitor(IdExprNode(enter), IdPatNode(enter))]
struct Names {
  bindings: Vec<(String, Option<SourceSpan>)>,
  references: Vec<String>,
}

impl Names {
  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.references.push(node.stx.name.clone());
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    self
      .bindings
      .push((node.stx.name.clone(), node.span().copied()));
  }
}

#[derive(Default, VisitorMut)]
#[visitor(IdExprNode(enter))]
struct Rename {
  renamed: usize,
}

impl Rename {
  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    if node.stx.name == "a" {
      node.stx.name = "b".to_string();
      self.renamed += 1;
    };
  }
}

#[test]
fn visitor_sees_bindings_and_references_in_source_order() {
  let source = "let [x, {y}] = z;\nfunction f(p = x) { return p + y; }";
  let top = parse_with_options(source, ParseOptions {
    locations: true,
    ..ParseOptions::default()
  })
  .unwrap();
  let mut names = Names::default();
  top.drive(&mut names);
  let bound: Vec<_> = names.bindings.iter().map(|(n, _)| n.as_str()).collect();
  assert_eq!(bound, ["x", "y", "p"]);
  assert_eq!(names.references, ["z", "x", "p", "y"]);
  let (_, span) = &names.bindings[2];
  let span = span.expect("bindings carry spans when locations are requested");
  assert_eq!((span.start.line, span.start.column), (2, 11));
}

#[test]
fn mutable_visitor_rewrites_in_place() {
  let mut top = parse("a + a.a; b;").unwrap();
  let mut rename = Rename::default();
  top.drive_mut(&mut rename);
  // The property name of `a.a` isn't a reference.
  assert_eq!(rename.renamed, 2);
  assert_eq!(top, parse("b + b.a; b;").unwrap());
}
