use super::state::EarlyErrorState;
use super::EarlyErrorKind;
use super::LabelledFunctionParent;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::CallArg;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportNames;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::lex::KEYWORD_STRS;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::SourceType;

type State = EarlyErrorState;

const STRICT_RESERVED: &[&str] = &[
  "implements",
  "interface",
  "let",
  "package",
  "private",
  "protected",
  "public",
  "static",
  "yield",
];

fn is_strict_reserved(name: &str) -> bool {
  STRICT_RESERVED.contains(&name)
}

/// Words that can't be an IdentifierReference in module code, where `export { x }` refers to a local binding.
fn is_module_reserved(name: &str) -> bool {
  name == "await" || KEYWORD_STRS.get(name).is_some_and(|tt| tt.is_reserved())
}

fn is_restricted(name: &str) -> bool {
  name == "eval" || name == "arguments"
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FuncKind {
  Decl,
  Expr,
  Arrow,
  Method { constructor: bool },
  Getter,
  Setter,
}

pub fn top_level(top: &Node<TopLevel>) -> State {
  let s: State = top.stx.body.iter().map(stmt).sum();
  match top.stx.source_type {
    SourceType::Script => {
      let mut declared = s.var.clone();
      declared.append(s.function_names.clone());
      let s = s
        .enforce_duplicate_lexically_declared_names()
        .enforce_conflicting_lexically_declared_names(&declared)
        .enforce_new_target()
        .enforce_free_break_and_continue()
        .enforce_super_calls()
        .enforce_super_properties();
      if top.stx.directives.iter().any(|d| d.stx.is_use_strict()) {
        s.enforce_strict()
      } else {
        s
      }
    }
    SourceType::Module => {
      let s = s.function_names_are_lexical();
      let var = s.var.clone();
      s.enforce_duplicate_lexically_declared_names()
        .enforce_conflicting_lexically_declared_names(&var)
        .enforce_duplicate_exported_names()
        .enforce_exported_bindings_declared()
        .enforce_new_target()
        .enforce_free_break_and_continue()
        .enforce_super_calls()
        .enforce_super_properties()
        .enforce_strict()
    }
  }
}

// Patterns.

fn binding_id(name: &str, loc: Loc) -> State {
  let s = State::default().bind_name(name, loc);
  if is_restricted(name) || is_strict_reserved(name) {
    s.add_strict_error(loc, EarlyErrorKind::BindingIdentifierStrict(name.to_string()))
  } else {
    s
  }
}

fn target_id(name: &str, loc: Loc) -> State {
  if is_restricted(name) || is_strict_reserved(name) {
    State::default().add_strict_error(loc, EarlyErrorKind::TargetIdentifierStrict(name.to_string()))
  } else {
    State::default()
  }
}

fn key(key: &ClassOrObjKey) -> State {
  match key {
    ClassOrObjKey::Direct(_) => State::default(),
    ClassOrObjKey::Computed(e) => expr(e),
  }
}

/// A pattern in a declaration or parameter if `binding`, otherwise an assignment target.
fn pat(p: &Node<Pat>, binding: bool) -> State {
  match &*p.stx {
    Pat::Id(id) => {
      if binding {
        binding_id(&id.stx.name, id.loc)
      } else {
        target_id(&id.stx.name, id.loc)
      }
    }
    Pat::Arr(arr) => {
      let elements: State = arr
        .stx
        .elements
        .iter()
        .flatten()
        .map(|e| pat(&e.target, binding) + opt_expr(e.default_value.as_ref()))
        .sum();
      elements
        + arr
          .stx
          .rest
          .as_ref()
          .map(|r| pat(r, binding))
          .unwrap_or_default()
    }
    Pat::Obj(obj) => obj
      .stx
      .properties
      .iter()
      .map(|prop| {
        key(&prop.stx.key) + pat(&prop.stx.target, binding) + opt_expr(prop.stx.default_value.as_ref())
      })
      .sum(),
    Pat::Member(m) => member(&m.stx.left, m.loc),
    Pat::ComputedMember(m) => computed_member(&m.stx.object, &m.stx.member, m.loc),
  }
}

fn pat_decl(p: &Node<PatDecl>) -> State {
  pat(&p.stx.pat, true)
}

// Expressions.

fn opt_expr(e: Option<&Node<Expr>>) -> State {
  e.map(expr).unwrap_or_default()
}

fn args(args: &[Node<CallArg>]) -> State {
  args.iter().map(|a| expr(&a.stx.value)).sum()
}

fn template_parts(parts: &[LitTemplatePart]) -> State {
  parts
    .iter()
    .map(|p| match p {
      LitTemplatePart::Substitution(e) => expr(e),
      LitTemplatePart::String(_) => State::default(),
    })
    .sum()
}

fn id_expr(name: &str, loc: Loc) -> State {
  if is_strict_reserved(name) {
    State::default().add_strict_error(
      loc,
      EarlyErrorKind::IdentifierExpressionStrict(name.to_string()),
    )
  } else {
    State::default()
  }
}

fn member(object: &Node<Expr>, loc: Loc) -> State {
  match &*object.stx {
    Expr::Super(_) => State::default().observe_super_property(loc),
    _ => expr(object),
  }
}

fn computed_member(object: &Node<Expr>, member: &Node<Expr>, loc: Loc) -> State {
  let object = match &*object.stx {
    Expr::Super(_) => State::default().observe_super_property(loc),
    _ => expr(object),
  };
  object + expr(member)
}

/// The operand of `++` or `--`.
fn update_target(arg: &Node<Expr>) -> State {
  match &*arg.stx {
    Expr::Id(id) => target_id(&id.stx.name, id.loc),
    _ => expr(arg),
  }
}

/// Folds the operands of a binary expression in source order without recursing along the chain.
#[inline(never)]
fn binary_operands(e: &Node<Expr>) -> State {
  let mut s = State::default();
  let mut pending = vec![e];
  while let Some(next) = pending.pop() {
    match &*next.stx {
      Expr::Binary(n) => {
        pending.push(&n.stx.right);
        pending.push(&n.stx.left);
      }
      _ => s = s + expr(next),
    };
  }
  s
}

fn expr(e: &Node<Expr>) -> State {
  match &*e.stx {
    Expr::ArrowFunc(n) => func(&n.stx.func, None, FuncKind::Arrow),
    Expr::Assign(n) => pat(&n.stx.target, false) + expr(&n.stx.value),
    Expr::Binary(_) => binary_operands(e),
    Expr::Call(n) => {
      let callee = match &*n.stx.callee.stx {
        Expr::Super(_) => State::default().observe_super_call(e.loc),
        _ => expr(&n.stx.callee),
      };
      callee + args(&n.stx.arguments)
    }
    Expr::Class(n) => class(
      n.stx.name.as_ref(),
      n.stx.extends.as_ref(),
      &n.stx.members,
      false,
    ),
    Expr::ComputedMember(n) => computed_member(&n.stx.object, &n.stx.member, e.loc),
    Expr::Cond(n) => expr(&n.stx.test) + expr(&n.stx.consequent) + expr(&n.stx.alternate),
    Expr::Func(n) => func(&n.stx.func, n.stx.name.as_ref(), FuncKind::Expr),
    Expr::Id(n) => id_expr(&n.stx.name, e.loc),
    Expr::Member(n) => member(&n.stx.left, e.loc),
    Expr::New(n) => expr(&n.stx.callee) + args(&n.stx.arguments),
    Expr::NewTarget(_) => State::default().observe_new_target(e.loc),
    Expr::TaggedTemplate(n) => expr(&n.stx.function) + template_parts(&n.stx.parts),
    Expr::Unary(n) => match n.stx.operator {
      OperatorName::Await => State::default().observe_await(e.loc) + expr(&n.stx.argument),
      OperatorName::Delete if matches!(*n.stx.argument.stx, Expr::Id(_)) => {
        expr(&n.stx.argument).add_strict_error(e.loc, EarlyErrorKind::DeleteIdentifierStrict)
      }
      op if op.is_update() => update_target(&n.stx.argument),
      _ => expr(&n.stx.argument),
    },
    Expr::UnaryPostfix(n) => update_target(&n.stx.argument),
    Expr::Yield(n) => State::default().observe_yield(e.loc) + opt_expr(n.stx.argument.as_ref()),
    Expr::LitArr(n) => n
      .stx
      .elements
      .iter()
      .map(|el| match el {
        LitArrElem::Single(v) | LitArrElem::Rest(v) => expr(v),
        LitArrElem::Empty => State::default(),
      })
      .sum(),
    Expr::LitObj(n) => object_literal(&n.stx.members),
    Expr::LitTemplate(n) => template_parts(&n.stx.parts),
    Expr::Super(_)
    | Expr::This(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitRegex(_)
    | Expr::LitStr(_) => State::default(),
  }
}

#[inline(never)]
fn object_literal(members: &[Node<ObjMember>]) -> State {
  let mut protos = members.iter().filter(|m| {
    matches!(
      &m.stx.typ,
      ObjMemberType::Valued {
        key: ClassOrObjKey::Direct(k),
        val: ClassOrObjVal::Prop(_),
      } if k.stx.key == "__proto__"
    )
  });
  protos.next();
  let duplicate_protos = protos.map(|m| m.loc).collect::<Vec<_>>();
  let s: State = members
    .iter()
    .map(|m| match &m.stx.typ {
      ObjMemberType::Shorthand { id } => id_expr(&id.stx.name, id.loc),
      ObjMemberType::Valued { key: k, val } => key(k) + class_or_obj_val(val, false),
    })
    .sum();
  s.add_errors(&duplicate_protos, EarlyErrorKind::DuplicateProto)
}

fn class_or_obj_val(val: &ClassOrObjVal, constructor: bool) -> State {
  match val {
    ClassOrObjVal::Getter(g) => func(&g.stx.func, None, FuncKind::Getter),
    ClassOrObjVal::Setter(s) => func(&s.stx.func, None, FuncKind::Setter),
    ClassOrObjVal::Method(m) => func(&m.stx.func, None, FuncKind::Method { constructor }),
    ClassOrObjVal::Prop(e) => expr(e),
  }
}

// Functions and classes.

fn parameter_list(parameters: &[Node<ParamDecl>]) -> State {
  parameters
    .iter()
    .map(|p| pat_decl(&p.stx.pattern) + opt_expr(p.stx.default_value.as_ref()))
    .sum()
}

#[inline(never)]
fn func(f: &Node<Func>, name: Option<&Node<ClassOrFuncName>>, kind: FuncKind) -> State {
  let function = &*f.stx;
  let name = name
    .map(|n| binding_id(&n.stx.name, n.loc))
    .unwrap_or_default();

  let simple = function.has_simple_parameters();
  let mut params = parameter_list(&function.parameters).observe_lexical_declaration();
  params = match kind {
    FuncKind::Decl | FuncKind::Expr => {
      params.enforce_duplicate_parameters(simple && !function.generator)
    }
    _ => params.enforce_duplicate_parameters(false),
  };

  let mut body = match &function.body {
    FuncBody::Block(stmts) => {
      let body: State = stmts.iter().map(stmt).sum();
      let mut declared = body.var.clone();
      declared.append(body.function_names.clone());
      body
        .enforce_duplicate_lexically_declared_names()
        .enforce_conflicting_lexically_declared_names(&declared)
        .enforce_conflicting_lexically_declared_names(&params.lexical)
        .enforce_free_break_and_continue()
        .clear_used_label_names()
    }
    FuncBody::Expression(e) => {
      let body = expr(e);
      let yields = body.yields.clone();
      body.add_errors(&yields, EarlyErrorKind::YieldInArrowBody)
    }
  };

  match kind {
    FuncKind::Decl | FuncKind::Expr => {
      params = params.enforce_super_calls().enforce_super_properties();
      body = body.enforce_super_calls().enforce_super_properties();
    }
    FuncKind::Arrow => {}
    FuncKind::Method { constructor: true } => {
      params = params.observe_constructor_method().clear_super_properties();
      body = body.observe_constructor_method().clear_super_properties();
    }
    FuncKind::Method { constructor: false } | FuncKind::Getter | FuncKind::Setter => {
      params = params.enforce_super_calls().clear_super_properties();
      body = body.enforce_super_calls().clear_super_properties();
    }
  };

  if function.generator {
    let yields = params.yields.clone();
    params = params.add_errors(&yields, EarlyErrorKind::YieldInGeneratorParameters);
  };
  if kind == FuncKind::Arrow {
    let yields = params.yields.clone();
    let awaits = params.awaits.clone();
    params = params
      .add_errors(&yields, EarlyErrorKind::YieldInArrowParameters)
      .add_errors(&awaits, EarlyErrorKind::AwaitInArrowParameters);
  } else if function.async_ {
    let awaits = params.awaits.clone();
    params = params.add_errors(&awaits, EarlyErrorKind::AwaitInAsyncParameters);
  };

  if kind != FuncKind::Arrow {
    params = params.clear_new_target();
    body = body.clear_new_target();
  };

  let mut s = if function.has_use_strict() {
    let s = name.enforce_strict() + params.enforce_strict() + body.enforce_strict();
    if simple {
      s
    } else {
      s.add_error(f.loc, EarlyErrorKind::UseStrictWithNonSimpleParameters)
    }
  } else {
    name + params + body
  };
  s = s.clear_yields().clear_awaits();

  match kind {
    FuncKind::Decl => s.observe_function_declaration(),
    FuncKind::Expr => s.clear_bound_names().observe_var_boundary(),
    _ => s.observe_var_boundary(),
  }
}

fn is_constructor(m: &ClassMember) -> bool {
  !m.static_ && m.key.static_name() == Some("constructor")
}

#[inline(never)]
fn class(
  name: Option<&Node<ClassOrFuncName>>,
  extends: Option<&Node<Expr>>,
  members: &[Node<ClassMember>],
  declaration: bool,
) -> State {
  let name = name
    .map(|n| binding_id(&n.stx.name, n.loc))
    .unwrap_or_default();
  let heritage = opt_expr(extends);

  let mut constructors = 0;
  let mut elements = State::default();
  for m in members {
    let mut el = key(&m.stx.key);
    let plain_constructor = is_constructor(&m.stx)
      && matches!(&m.stx.val, ClassOrObjVal::Method(f) if !f.stx.func.stx.generator && !f.stx.func.stx.async_);
    el = el + class_or_obj_val(&m.stx.val, plain_constructor);
    if plain_constructor {
      constructors += 1;
      if constructors > 1 {
        el = el.add_error(m.loc, EarlyErrorKind::DuplicateConstructor);
      };
    } else if is_constructor(&m.stx) {
      el = el.add_error(m.loc, EarlyErrorKind::SpecialConstructor);
    };
    if m.stx.static_ && m.stx.key.static_name() == Some("prototype") {
      el = el.add_error(m.loc, EarlyErrorKind::StaticPrototypeMethod);
    };
    elements = elements + el;
  }
  elements = if extends.is_some() {
    elements.clear_super_calls_in_constructor()
  } else {
    elements.enforce_super_calls_in_constructor()
  };

  let s = (name + heritage + elements).enforce_strict();
  if declaration {
    s.observe_lexical_declaration()
  } else {
    s.clear_bound_names()
  }
}

// Statements.

fn stmts(body: &[Node<Stmt>]) -> State {
  body.iter().map(stmt).sum()
}

/// Blocks and switch case lists form a lexical scope.
fn lexical_scope(s: State) -> State {
  let s = s.function_names_are_lexical();
  let var = s.var.clone();
  s.enforce_duplicate_lexically_declared_names()
    .enforce_conflicting_lexically_declared_names(&var)
    .observe_lexical_boundary()
}

fn block(b: &Node<BlockStmt>) -> State {
  lexical_scope(stmts(&b.stx.body))
}

fn var_decl(decl: &Node<VarDecl>, statement: bool) -> State {
  let mode = decl.stx.mode;
  let mut s = State::default();
  for d in &decl.stx.declarators {
    s = s + pat_decl(&d.pattern) + opt_expr(d.initializer.as_ref());
    if statement && mode == VarDeclMode::Const && d.initializer.is_none() {
      s = s.add_error(d.pattern.loc, EarlyErrorKind::ConstWithoutInitializer);
    };
  }
  match mode {
    VarDeclMode::Let | VarDeclMode::Const => {
      let lets = s
        .bound
        .iter()
        .filter(|(n, _)| *n == "let")
        .map(|(_, l)| l)
        .collect::<Vec<_>>();
      s.add_errors(&lets, EarlyErrorKind::LexicalLetBinding)
        .observe_lexical_declaration()
    }
    VarDeclMode::Var => s.observe_var_declaration(),
  }
}

fn labelled_function_body(body: &Node<Stmt>, parent: LabelledFunctionParent) -> State {
  let s = stmt(body);
  if body.stx.is_labelled_function() {
    s.add_error(body.loc, EarlyErrorKind::LabelledFunctionBody(parent))
  } else {
    s
  }
}

fn is_iteration_through_labels(s: &Stmt) -> bool {
  match s {
    Stmt::Label(l) => is_iteration_through_labels(&l.stx.statement.stx),
    s => s.is_iteration(),
  }
}

/// A loop with the declarations of its head; the head is its own lexical scope.
fn iteration(head: State, rest: State, body: State) -> State {
  let body = body.clear_free_break().clear_free_continue();
  let head = head
    .enforce_duplicate_lexically_declared_names()
    .enforce_conflicting_lexically_declared_names(&body.var);
  (head + rest + body).observe_lexical_boundary()
}

fn for_in_of_head(lhs: &ForInOfLhs, of: bool) -> State {
  match lhs {
    ForInOfLhs::Assign(p) => pat(p, false),
    ForInOfLhs::Decl(d) => {
      let s = var_decl(d, false);
      if of && d.stx.mode == VarDeclMode::Var {
        s.record_for_of_vars()
      } else {
        s
      }
    }
  }
}

/// The branch of an `if`. A function declaration here behaves as if wrapped in a block.
fn if_branch(branch: &Node<Stmt>, parent: LabelledFunctionParent) -> State {
  match &*branch.stx {
    Stmt::FunctionDecl(_) => lexical_scope(stmt(branch))
      .add_strict_error(branch.loc, EarlyErrorKind::FunctionDeclarationInIfStrict),
    _ => labelled_function_body(branch, parent),
  }
}

fn stmt(st: &Node<Stmt>) -> State {
  match &*st.stx {
    Stmt::Block(b) => block(b),
    Stmt::Break(b) => match &b.stx.label {
      Some(label) => State::default().add_free_labelled_break(label, st.loc),
      None => State::default().add_free_break(st.loc),
    },
    Stmt::Continue(c) => match &c.stx.label {
      Some(label) => State::default().add_free_labelled_continue(label, st.loc),
      None => State::default().add_free_continue(st.loc),
    },
    Stmt::Debugger(_) | Stmt::Empty(_) => State::default(),
    Stmt::DoWhile(n) => {
      let body = labelled_function_body(&n.stx.body, LabelledFunctionParent::DoWhile);
      iteration(State::default(), expr(&n.stx.condition), body)
    }
    Stmt::ExportDefaultExpr(n) => expr(&n.stx.expression).export_name("default", st.loc),
    Stmt::ExportList(n) => match &n.stx.names {
      ExportNames::All => State::default(),
      ExportNames::Specific(names) => names.iter().fold(State::default(), |s, name| {
        let s = s.export_name(name.stx.exported(), name.loc);
        if n.stx.from.is_some() {
          s
        } else if is_module_reserved(&name.stx.exportable) {
          s.add_error(
            name.loc,
            EarlyErrorKind::ReservedWordExport(name.stx.exportable.clone()),
          )
        } else {
          s.export_binding(&name.stx.exportable, name.loc)
            + id_expr(&name.stx.exportable, name.loc)
        }
      }),
    },
    Stmt::Expr(n) => expr(&n.stx.expr),
    Stmt::ForIn(n) => {
      let body = labelled_function_body(&n.stx.body, LabelledFunctionParent::ForIn);
      iteration(for_in_of_head(&n.stx.lhs, false), expr(&n.stx.rhs), body)
    }
    Stmt::ForOf(n) => {
      let body = labelled_function_body(&n.stx.body, LabelledFunctionParent::ForOf);
      iteration(for_in_of_head(&n.stx.lhs, true), expr(&n.stx.rhs), body)
    }
    Stmt::ForTriple(n) => {
      let head = match &n.stx.init {
        ForTripleStmtInit::None => State::default(),
        ForTripleStmtInit::Expr(e) => expr(e),
        ForTripleStmtInit::Decl(d) => var_decl(d, true),
      };
      let rest = opt_expr(n.stx.cond.as_ref()) + opt_expr(n.stx.post.as_ref());
      let body = labelled_function_body(&n.stx.body, LabelledFunctionParent::For);
      iteration(head, rest, body)
    }
    Stmt::If(n) => {
      let consequent = if_branch(&n.stx.consequent, LabelledFunctionParent::IfConsequent);
      let alternate = n
        .stx
        .alternate
        .as_ref()
        .map(|a| if_branch(a, LabelledFunctionParent::IfAlternate))
        .unwrap_or_default();
      expr(&n.stx.test) + consequent + alternate
    }
    Stmt::Import(n) => {
      let default = n.stx.default.as_ref().map(pat_decl).unwrap_or_default();
      let names = match &n.stx.names {
        None => State::default(),
        Some(ImportNames::All(alias)) => pat_decl(alias),
        Some(ImportNames::Specific(names)) => names.iter().map(|i| pat_decl(&i.stx.alias)).sum(),
      };
      (default + names).observe_lexical_declaration()
    }
    Stmt::Label(n) => {
      let label = &n.stx.name;
      let mut s = stmt(&n.stx.statement);
      if label == "yield" {
        s = s.add_strict_error(st.loc, EarlyErrorKind::YieldLabelStrict);
      };
      if s.used_label_names.iter().any(|l| l == label) {
        s = s.add_error(st.loc, EarlyErrorKind::DuplicateLabel(label.clone()));
      };
      if matches!(&*n.stx.statement.stx, Stmt::FunctionDecl(_)) {
        s = s.add_strict_error(n.stx.statement.loc, EarlyErrorKind::LabelledFunctionStrict);
      };
      s.observe_label(label, is_iteration_through_labels(&n.stx.statement.stx))
    }
    Stmt::Return(n) => opt_expr(n.stx.value.as_ref()),
    Stmt::Switch(n) => {
      let cases: State = n
        .stx
        .branches
        .iter()
        .map(|b| opt_expr(b.stx.case.as_ref()) + stmts(&b.stx.body))
        .sum();
      expr(&n.stx.test) + lexical_scope(cases).clear_free_break()
    }
    Stmt::Throw(n) => expr(&n.stx.value),
    Stmt::Try(n) => {
      let catch = n
        .stx
        .catch
        .as_ref()
        .map(|c| {
          let body = block(&c.stx.body);
          let param = pat_decl(&c.stx.parameter)
            .observe_lexical_declaration()
            .enforce_duplicate_lexically_declared_names()
            .enforce_conflicting_lexically_declared_names(&body.previous_lexical);
          // A plain identifier parameter may be redeclared by `var`, except in a for-of head. Pattern parameters may not.
          let redeclared = match &*c.stx.parameter.stx.pat.stx {
            Pat::Id(_) => &body.for_of_var,
            _ => &body.var,
          };
          let conflicts = redeclared
            .iter()
            .filter(|(name, _)| param.lexical.contains(name))
            .map(|(name, loc)| (name.to_string(), loc))
            .collect::<Vec<_>>();
          let param = conflicts.into_iter().fold(param, |s, (name, loc)| {
            s.add_error(loc, EarlyErrorKind::DuplicateBinding(name))
          });
          (param + body).observe_lexical_boundary()
        })
        .unwrap_or_default();
      let finally = n.stx.finally.as_ref().map(block).unwrap_or_default();
      block(&n.stx.wrapped) + catch + finally
    }
    Stmt::While(n) => {
      let body = labelled_function_body(&n.stx.body, LabelledFunctionParent::While);
      iteration(State::default(), expr(&n.stx.condition), body)
    }
    Stmt::With(n) => {
      let body = labelled_function_body(&n.stx.body, LabelledFunctionParent::With);
      (expr(&n.stx.object) + body).add_strict_error(st.loc, EarlyErrorKind::WithStrict)
    }
    Stmt::ClassDecl(n) => {
      let s = class(
        Some(&n.stx.name),
        n.stx.extends.as_ref(),
        &n.stx.members,
        true,
      );
      if n.stx.export_default {
        s.export_name("default", st.loc)
      } else if n.stx.export {
        s.export_name(&n.stx.name.stx.name, n.stx.name.loc)
      } else {
        s
      }
    }
    Stmt::FunctionDecl(n) => {
      let s = func(&n.stx.function, Some(&n.stx.name), FuncKind::Decl);
      if n.stx.export_default {
        s.export_name("default", st.loc)
      } else if n.stx.export {
        s.export_name(&n.stx.name.stx.name, n.stx.name.loc)
      } else {
        s
      }
    }
    Stmt::VarDecl(n) => {
      let s = var_decl(n, true);
      if n.stx.export {
        s.export_declared_names()
      } else {
        s
      }
    }
  }
}
