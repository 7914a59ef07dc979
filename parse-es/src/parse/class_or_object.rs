use super::cover::CoverExpr;
use super::expr::pat::is_valid_pattern_identifier;
use super::expr::pat::ParsePatternRules;
use super::ParseCtx;
use super::Parser;
use super::ParserCheckpoint;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjGetter;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjMethod;
use crate::ast::class_or_object::ClassOrObjSetter;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::DEFAULT_EXPORT_BINDING;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

/// What a class or object member turned out to be after its key.
pub enum MethodOrKey {
  // A plain key; the caller parses what follows (`: value`, a shorthand, or an error in classes).
  Key(ClassOrObjKey),
  Method(ClassOrObjKey, ClassOrObjVal),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Accessor {
  Getter,
  Setter,
}

fn is_property_name_start(typ: TT) -> bool {
  matches!(
    typ,
    TT::LiteralString | TT::LiteralNumber | TT::BracketOpen
  ) || typ.is_identifier_name()
}

impl<'a> Parser<'a> {
  /// Parses a class or object key like `a`, `'a'`, `1`, `[expr]`.
  pub fn class_or_obj_key(&mut self, ctx: ParseCtx) -> SyntaxResult<ClassOrObjKey> {
    let t = self.peek()?;
    if t.typ == TT::BracketOpen {
      self.consume()?;
      let key = self.assignment_expr(ctx.with_in_allowed(true))?;
      self.require(TT::BracketClose)?;
      return Ok(ClassOrObjKey::Computed(key));
    };
    let key = match t.typ {
      TT::LiteralString => self.string_value(ctx, t)?,
      TT::LiteralNumber => self.number_value(ctx, t)?.to_string(),
      typ if typ.is_identifier_name() => self.identifier_name(t)?,
      _ => return Err(self.unexpected(t)),
    };
    self.consume()?;
    Ok(ClassOrObjKey::Direct(self.node(
      t.loc,
      ClassOrObjMemberDirectKey { key, tt: t.typ },
    )))
  }

  /// Parameters and body of a method, getter or setter.
  fn method_func(
    &mut self,
    ctx: ParseCtx,
    start: &ParserCheckpoint,
    async_: bool,
    generator: bool,
    accessor: Option<Accessor>,
  ) -> SyntaxResult<Node<Func>> {
    let fn_ctx = ctx.with_rules(ParsePatternRules {
      await_expr_allowed: async_,
      yield_expr_allowed: generator,
    });
    let outer_await = self.await_ident_loc.take();
    let parameters = match accessor {
      Some(Accessor::Getter) => {
        self.require(TT::ParenthesisOpen)?;
        self.require(TT::ParenthesisClose)?;
        Vec::new()
      }
      Some(Accessor::Setter) => {
        self.require(TT::ParenthesisOpen)?;
        let param = self.param_decl(fn_ctx, false)?;
        self.require(TT::ParenthesisClose)?;
        vec![param]
      }
      None => self.func_params(fn_ctx)?,
    };
    let (directives, body) = self.func_body(fn_ctx)?;
    self.await_ident_loc = outer_await;
    Ok(self.finish(start, Func {
      arrow: false,
      async_,
      generator,
      parameters,
      directives,
      body: FuncBody::Block(body),
    }))
  }

  // It's strictly one of these:
  // - '*' <key> '(' ...
  // - [ get | set ] <key> '(' ...
  // - async <key> '(' ...
  // - <key> '(' ...
  // - <key>
  // where <key> = <ident> | <keyword> | <str> | <num> | '[' <expr> ']'
  pub fn method_or_key(&mut self, ctx: ParseCtx) -> SyntaxResult<MethodOrKey> {
    let start = self.checkpoint();
    let t = self.peek()?;
    let generator = self.consume_if(TT::Asterisk)?.is_match();
    let key = self.class_or_obj_key(ctx)?;
    if !generator {
      let next = self.peek()?;
      if is_property_name_start(next.typ) {
        match t.typ {
          TT::KeywordGet => {
            let key = self.class_or_obj_key(ctx)?;
            let func = self.method_func(ctx, &start, false, false, Some(Accessor::Getter))?;
            let val = self.finish(&start, ClassOrObjGetter { func });
            return Ok(MethodOrKey::Method(key, ClassOrObjVal::Getter(val)));
          }
          TT::KeywordSet => {
            let key = self.class_or_obj_key(ctx)?;
            let func = self.method_func(ctx, &start, false, false, Some(Accessor::Setter))?;
            let val = self.finish(&start, ClassOrObjSetter { func });
            return Ok(MethodOrKey::Method(key, ClassOrObjVal::Setter(val)));
          }
          TT::KeywordAsync if !next.preceded_by_line_terminator => {
            let key = self.class_or_obj_key(ctx)?;
            let func = self.method_func(ctx, &start, true, false, None)?;
            let val = self.finish(&start, ClassOrObjMethod { func });
            return Ok(MethodOrKey::Method(key, ClassOrObjVal::Method(val)));
          }
          _ => {}
        };
      };
    };
    let next = self.peek()?;
    if next.typ == TT::ParenthesisOpen {
      let func = self.method_func(ctx, &start, false, generator, None)?;
      let val = self.finish(&start, ClassOrObjMethod { func });
      return Ok(MethodOrKey::Method(key, ClassOrObjVal::Method(val)));
    };
    if generator {
      return Err(self.unexpected(next));
    };
    Ok(MethodOrKey::Key(key))
  }

  /// The `extends` clause and body of a class. Both are strict mode code.
  pub fn class_tail(
    &mut self,
    ctx: ParseCtx,
  ) -> SyntaxResult<(Option<Node<Expr>>, Vec<Node<ClassMember>>)> {
    let ctx = ctx.with_strict(true);
    let extends = if self.consume_if(TT::KeywordExtends)?.is_match() {
      let cover = self.isolate(|p, cg| p.lhs_expr(ctx, cg, true))?;
      Some(match cover {
        CoverExpr::Expr(e) => e,
        CoverExpr::ArrowHead(h) => {
          return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None))
        }
        CoverExpr::Target(t) => return Err(t.error(SyntaxErrorType::UnexpectedObjectBinding)),
      })
    } else {
      None
    };
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      if self.consume_if(TT::BraceClose)?.is_match() {
        break;
      };
      if self.consume_if(TT::Semicolon)?.is_match() {
        continue;
      };
      let start = self.checkpoint();
      let t = self.peek()?;
      let mut member = self.method_or_key(ctx)?;
      let mut static_ = false;
      if t.typ == TT::KeywordStatic && matches!(&member, MethodOrKey::Key(_)) {
        static_ = true;
        member = self.method_or_key(ctx)?;
      };
      match member {
        MethodOrKey::Method(key, val) => members.push(self.finish(&start, ClassMember {
          key,
          static_,
          val,
        })),
        MethodOrKey::Key(_) => {
          return Err(
            self
              .since_checkpoint(&start)
              .error(SyntaxErrorType::OnlyMethodsInClasses, None),
          )
        }
      };
    }
    Ok((extends, members))
  }

  pub fn class_decl(&mut self, ctx: ParseCtx, export_default: bool) -> SyntaxResult<Node<ClassDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name_ctx = ctx.with_strict(true);
      let t = p.peek()?;
      let name = if is_valid_pattern_identifier(t.typ, name_ctx) {
        p.class_or_func_name(name_ctx)?
      } else if export_default {
        p.node(Loc(t.loc.0, t.loc.0), ClassOrFuncName {
          name: DEFAULT_EXPORT_BINDING.to_string(),
        })
      } else {
        return Err(p.unexpected(t));
      };
      let (extends, members) = p.class_tail(ctx)?;
      Ok(ClassDecl {
        export: false,
        export_default,
        name,
        extends,
        members,
      })
    })
  }

  pub fn class_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordClass)?;
        let name_ctx = ctx.with_strict(true);
        let name = if is_valid_pattern_identifier(p.peek()?.typ, name_ctx) {
          Some(p.class_or_func_name(name_ctx)?)
        } else {
          None
        };
        let (extends, members) = p.class_tail(ctx)?;
        Ok(ClassExpr {
          name,
          extends,
          members,
        })
      })
      .map(|n| n.wrap(Expr::Class))
  }
}
