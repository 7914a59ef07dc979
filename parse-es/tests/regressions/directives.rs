use parse_es::ast::func::FuncBody;
use parse_es::ast::stmt::Stmt;
use parse_es::error::SyntaxErrorType;
use parse_es::parse;
use parse_es::parse_module;

#[test]
fn prologue_strings_become_directives() {
  let top = parse("'use strict'; \"other\"; x; 'not a directive';").unwrap();
  let raws: Vec<_> = top.stx.directives.iter().map(|d| d.stx.raw.as_str()).collect();
  assert_eq!(raws, ["use strict", "other"]);
  assert_eq!(top.stx.body.len(), 2);
}

#[test]
fn string_expressions_end_the_prologue() {
  let top = parse("'a' + b; 'use strict'; 010").unwrap();
  assert!(top.stx.directives.is_empty());
  assert_eq!(top.stx.body.len(), 3);
  parse("('use strict'); 010").unwrap();
}

#[test]
fn function_directives_are_kept_on_the_function() {
  let top = parse("function f(a) { 'use strict'; return a }").unwrap();
  let Stmt::FunctionDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  let func = &decl.stx.function.stx;
  assert!(func.has_use_strict());
  assert!(func.has_simple_parameters());
  let FuncBody::Block(body) = &func.body else {
    panic!("expected block body");
  };
  assert_eq!(body.len(), 1);
}

#[test]
fn legacy_octal_literals_are_rejected_in_strict_code() {
  parse("010; 089;").unwrap();
  let err = parse("'use strict'; 010").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictOctalLiteral);
  let err = parse("'use strict'; 089").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictNoctalLiteral);
  let err = parse("function f() { 'use strict'; return 07 }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictOctalLiteral);
  parse("function f() { 'use strict' } 07").unwrap();
}

#[test]
fn legacy_octal_escapes_are_rejected_in_strict_code() {
  parse("'\\07'").unwrap();
  let err = parse("'use strict'; '\\07'").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictOctalEscape);
  parse("'use strict'; '\\0'").unwrap();
}

#[test]
fn octal_escape_directive_before_use_strict_is_rejected() {
  let err = parse("'\\07'; 'use strict';").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictOctalEscape);
  let err = parse("function f() { '\\07'; 'use strict'; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictOctalEscape);
  parse("'use strict' + 1; '\\07';").unwrap();
}

#[test]
fn module_and_class_code_is_strict() {
  let err = parse_module("010").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictOctalLiteral);
  let err = parse("class A { m() { return 010 } }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::StrictOctalLiteral);
}
