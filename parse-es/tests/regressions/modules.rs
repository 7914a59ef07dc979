use parse_es::ast::import_export::ExportNames;
use parse_es::ast::import_export::ImportNames;
use parse_es::ast::stmt::decl::VarDeclMode;
use parse_es::ast::stmt::decl::DEFAULT_EXPORT_BINDING;
use parse_es::ast::stmt::Stmt;
use parse_es::early::EarlyErrorKind;
use parse_es::parse;
use parse_es::parse_module;
use parse_es::validate;
use parse_es::SourceType;

#[test]
fn top_level_records_its_source_type() {
  assert_eq!(parse("a").unwrap().stx.source_type, SourceType::Script);
  assert_eq!(parse_module("a").unwrap().stx.source_type, SourceType::Module);
}

#[test]
fn side_effect_and_namespace_imports() {
  let top = parse_module("import 'polyfill'; import * as path from \"path\";").unwrap();
  let Stmt::Import(side_effect) = top.stx.body[0].stx.as_ref() else {
    panic!("expected import");
  };
  assert_eq!(side_effect.stx.module, "polyfill");
  assert!(side_effect.stx.default.is_none());
  assert!(side_effect.stx.names.is_none());
  let Stmt::Import(namespace) = top.stx.body[1].stx.as_ref() else {
    panic!("expected import");
  };
  assert!(matches!(namespace.stx.names, Some(ImportNames::All(_))));
}

#[test]
fn trailing_commas_in_specifier_lists() {
  let top = parse_module("import {a, b as c,} from 'm'; export {a, c as d,};").unwrap();
  let Stmt::ExportList(list) = top.stx.body[1].stx.as_ref() else {
    panic!("expected export list");
  };
  let ExportNames::Specific(names) = &list.stx.names else {
    panic!("expected specific names");
  };
  let exported: Vec<_> = names.iter().map(|n| n.stx.exported()).collect();
  assert_eq!(exported, ["a", "d"]);
  assert!(list.stx.from.is_none());
}

#[test]
fn exported_declarations_are_flagged() {
  let top = parse_module(
    "export const a = 1; export function f() {} export async function g() {} export class C {}",
  )
  .unwrap();
  assert_eq!(top.stx.body.len(), 4);
  let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected variable declaration");
  };
  assert!(decl.stx.export);
  assert_eq!(decl.stx.mode, VarDeclMode::Const);
  let Stmt::FunctionDecl(f) = top.stx.body[1].stx.as_ref() else {
    panic!("expected function declaration");
  };
  assert!(f.stx.export && !f.stx.export_default);
  let Stmt::FunctionDecl(g) = top.stx.body[2].stx.as_ref() else {
    panic!("expected function declaration");
  };
  assert!(g.stx.function.stx.async_);
  assert!(matches!(top.stx.body[3].stx.as_ref(), Stmt::ClassDecl(c) if c.stx.export));
}

#[test]
fn export_default_forms() {
  let top = parse_module("export default async function () {}").unwrap();
  let Stmt::FunctionDecl(f) = top.stx.body[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  assert!(f.stx.export_default);
  assert_eq!(f.stx.name.stx.name, DEFAULT_EXPORT_BINDING);
  let top = parse_module("export default function named() {}").unwrap();
  let Stmt::FunctionDecl(f) = top.stx.body[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  assert_eq!(f.stx.name.stx.name, "named");
  let top = parse_module("export default a = 'x' in b;").unwrap();
  assert!(matches!(top.stx.body[0].stx.as_ref(), Stmt::ExportDefaultExpr(_)));
}

#[test]
fn module_items_only_at_top_level() {
  assert!(parse("import a from 'a';").is_err());
  assert!(parse_module("{ import a from 'a'; }").is_err());
  assert!(parse_module("function f() { export var a; }").is_err());
  assert!(parse_module("export default").is_err());
  assert!(parse_module("import {a} from b;").is_err());
}

#[test]
fn await_is_reserved_in_modules() {
  parse("var await; await = 1;").unwrap();
  assert!(parse_module("var await;").is_err());
  assert!(parse_module("await = 1;").is_err());
  assert!(parse_module("function f(await) {}").is_err());
}

#[test]
fn module_validation() {
  let top = parse_module(
    "import def, {a as b} from 'm';\nlet c;\nexport {b, c as d, def as default};\nexport var e;",
  )
  .unwrap();
  assert_eq!(validate(&top), vec![]);

  let kinds: Vec<_> = validate(&parse_module("let a; export {a as x, a as x};").unwrap())
    .into_iter()
    .map(|e| e.kind)
    .collect();
  assert_eq!(kinds, vec![EarlyErrorKind::DuplicateExport("x".into())]);

  let kinds: Vec<_> = validate(&parse_module("import a from 'm'; var a;").unwrap())
    .into_iter()
    .map(|e| e.kind)
    .collect();
  assert_eq!(kinds, vec![EarlyErrorKind::DuplicateBinding("a".into())]);
}
