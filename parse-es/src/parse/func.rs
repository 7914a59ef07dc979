use super::expr::pat::is_valid_pattern_identifier;
use super::expr::pat::ParsePatternRules;
use super::ParseCtx;
use super::Parser;
use super::ParserCheckpoint;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::Stmt;
use crate::ast::stx::Directive;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::cook;
use crate::lex::LexMode;
use crate::token::TT;

/// Whether a parsed statement is a lone string literal, i.e. could be a directive.
fn is_string_stmt(stmt: &Node<Stmt>) -> bool {
  match &*stmt.stx {
    Stmt::Expr(e) => matches!(&*e.stx.expr.stx, Expr::LitStr(_)),
    _ => false,
  }
}

impl<'a> Parser<'a> {
  /// Parses `(a, b = 1, ...c)`. A rest parameter must come last, and there's no trailing comma.
  pub fn func_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    let ctx = ctx.with_in_allowed(true);
    self.require(TT::ParenthesisOpen)?;
    let mut parameters = Vec::new();
    if self.peek()?.typ != TT::ParenthesisClose {
      loop {
        if self.peek()?.typ == TT::DotDotDot {
          parameters.push(self.param_decl(ctx, true)?);
          break;
        };
        parameters.push(self.param_decl(ctx, false)?);
        if !self.consume_if(TT::Comma)?.is_match() {
          break;
        };
      }
    };
    self.require(TT::ParenthesisClose)?;
    Ok(parameters)
  }

  /// Statements up to a `}` or the end, which isn't consumed. Leading string literal statements form the directive prologue; a `"use strict"` directive makes the rest strict, including earlier directives with legacy octal escapes.
  pub fn body(
    &mut self,
    ctx: ParseCtx,
    module_items: bool,
  ) -> SyntaxResult<(Vec<Node<Directive>>, Vec<Node<Stmt>>)> {
    let mut ctx = ctx;
    let mut directives = Vec::new();
    let mut statements = Vec::new();
    let mut in_prologue = true;
    let mut octal: Option<SyntaxError> = None;
    loop {
      let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
      if t.typ == TT::EOF || t.typ == TT::BraceClose {
        break;
      };
      let stmt = if module_items {
        self.module_item(ctx)?
      } else {
        self.stmt_list_item(ctx)?
      };
      if in_prologue && t.typ == TT::LiteralString && is_string_stmt(&stmt) {
        let raw = self.str(t.loc);
        let raw = &raw[1..raw.len() - 1];
        if octal.is_none() {
          if let Some(loc) = cook(raw, t.loc.0 + 1, false)?.octal {
            octal = Some(loc.error(SyntaxErrorType::StrictOctalEscape, Some(t.typ)));
          };
        };
        if raw == "use strict" {
          ctx = ctx.with_strict(true);
        };
        directives.push(self.node(stmt.loc, Directive {
          raw: raw.to_string(),
        }));
        continue;
      };
      if in_prologue {
        in_prologue = false;
        if ctx.strict {
          if let Some(err) = octal.take() {
            return Err(err);
          };
        };
      };
      statements.push(stmt);
    }
    if ctx.strict {
      if let Some(err) = octal {
        return Err(err);
      };
    };
    Ok((directives, statements))
  }

  /// `{ ... }` of a function. `return` is allowed inside; strictness from a directive stays inside.
  pub fn func_body(
    &mut self,
    ctx: ParseCtx,
  ) -> SyntaxResult<(Vec<Node<Directive>>, Vec<Node<Stmt>>)> {
    let ctx = ctx.with_return_allowed(true).with_in_allowed(true);
    self.require(TT::BraceOpen)?;
    let res = self.body(ctx, false)?;
    self.require(TT::BraceClose)?;
    Ok(res)
  }

  /// Parameters and body of a function or generator, starting at `(`. `start` should precede the `function` keyword.
  pub fn func(
    &mut self,
    ctx: ParseCtx,
    start: &ParserCheckpoint,
    async_: bool,
    generator: bool,
  ) -> SyntaxResult<Node<Func>> {
    let fn_ctx = ctx.with_rules(ParsePatternRules {
      await_expr_allowed: async_,
      yield_expr_allowed: generator,
    });
    let outer_await = self.await_ident_loc.take();
    let parameters = self.func_params(fn_ctx)?;
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

  /// `function` or `async function` in an expression. Unlike a declaration's, the name is bound inside the function, so it follows the function's own `yield` and `await` rules.
  pub fn func_expr(&mut self, ctx: ParseCtx, async_: bool) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    if async_ {
      self.require(TT::KeywordAsync)?;
    };
    self.require(TT::KeywordFunction)?;
    let generator = !async_ && self.consume_if(TT::Asterisk)?.is_match();
    let name_ctx = ctx.with_rules(ParsePatternRules {
      await_expr_allowed: async_,
      yield_expr_allowed: generator,
    });
    let outer_await = self.await_ident_loc.take();
    let name = if is_valid_pattern_identifier(self.peek()?.typ, name_ctx) {
      Some(self.class_or_func_name(name_ctx)?)
    } else {
      None
    };
    self.await_ident_loc = outer_await;
    let func = self.func(ctx, &start, async_, generator)?;
    Ok(self.finish(&start, FuncExpr { name, func }).wrap(Expr::Func))
  }
}
