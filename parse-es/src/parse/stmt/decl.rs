use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::Pat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::decl::DEFAULT_EXPORT_BINDING;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::parse::expr::pat::is_valid_pattern_identifier;
use crate::token::Token;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;

/// Whether `let` or `const` followed by `next` starts a lexical declaration rather than an expression (`let` is also an identifier).
pub fn starts_lexical_decl(t: Token, next: Token) -> bool {
  match t.typ {
    TT::KeywordConst => true,
    TT::KeywordLet => {
      matches!(next.typ, TT::BraceOpen | TT::BracketOpen | TT::Identifier)
        || UNRESERVED_KEYWORDS.contains(&next.typ)
    }
    _ => false,
  }
}

impl<'a> Parser<'a> {
  pub fn var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume()?;
    Ok(match t.typ {
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(self.unexpected(t)),
    })
  }

  /// Parses a variable declaration, which contains one or more declarators, each with an optional initializer. Examples of variable declarations:
  /// - `const a = 1`
  /// - `let a, b = 2, c`
  /// - `var [a, b] = c`
  ///
  /// With `patterns_need_init`, a destructuring declarator must be initialised. That's the case everywhere except `for` heads, where `in` or `of` may follow. Doesn't consume a trailing semicolon.
  pub fn var_decl(
    &mut self,
    ctx: ParseCtx,
    patterns_need_init: bool,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let mode = p.var_decl_mode()?;
      let mut declarators = Vec::new();
      loop {
        let pattern = p.pat_decl(ctx)?;
        let next = p.peek()?;
        if patterns_need_init
          && !matches!(*pattern.stx.pat.stx, Pat::Id(_))
          && next.typ != TT::Equals
        {
          return Err(p.unexpected(next));
        };
        let initializer = p
          .consume_if(TT::Equals)?
          .and_then(|| p.assignment_expr(ctx))?;
        declarators.push(VarDeclarator {
          pattern,
          initializer,
        });
        if !p.consume_if(TT::Comma)?.is_match() {
          break;
        };
      }
      Ok(VarDecl {
        export: false,
        mode,
        declarators,
      })
    })
  }

  /// A `var`, `let` or `const` statement.
  pub fn var_decl_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<VarDecl>> {
    let decl = self.var_decl(ctx.with_in_allowed(true), true)?;
    self.consume_semicolon()?;
    Ok(decl)
  }

  /// Parses `function name(...) {...}`, a generator (if allowed), or an `async function`. The name can only be omitted in default exports, where it binds `*default*`.
  pub fn func_decl(
    &mut self,
    ctx: ParseCtx,
    export_default: bool,
    allow_generator: bool,
    async_: bool,
  ) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      let start = p.checkpoint();
      if async_ {
        p.require(TT::KeywordAsync)?;
      };
      p.require(TT::KeywordFunction)?;
      let generator = allow_generator && p.consume_if(TT::Asterisk)?.is_match();
      let t = p.peek()?;
      // The name is bound in the enclosing scope, so the enclosing `yield` and `await` rules apply.
      let name = if is_valid_pattern_identifier(t.typ, ctx) {
        p.class_or_func_name(ctx)?
      } else if export_default && t.typ == TT::ParenthesisOpen {
        p.node(Loc(t.loc.0, t.loc.0), ClassOrFuncName {
          name: DEFAULT_EXPORT_BINDING.to_string(),
        })
      } else {
        return Err(p.unexpected(t));
      };
      let function = p.func(ctx, &start, async_, generator)?;
      Ok(FuncDecl {
        export: false,
        export_default,
        name,
        function,
      })
    })
  }
}
