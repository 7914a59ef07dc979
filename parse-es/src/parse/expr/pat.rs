use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::cook_identifier;
use crate::lex::KEYWORD_STRS;
use crate::token::Token;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;

#[derive(Clone, Copy, Debug)]
pub struct ParsePatternRules {
  // Whether `await` can start an `AwaitExpression` in the current context. `await` can't be an identifier where it can.
  pub await_expr_allowed: bool,
  // Whether `yield` can start a `YieldExpression` in the current context. `yield` can't be an identifier where it can.
  pub yield_expr_allowed: bool,
}

/// Whether the token could be an IdentifierReference or BindingIdentifier. Context-specific restrictions are checked when it's consumed.
pub fn is_valid_pattern_identifier(typ: TT, ctx: ParseCtx) -> bool {
  match typ {
    TT::Identifier => true,
    TT::KeywordAwait => !ctx.module,
    t => UNRESERVED_KEYWORDS.contains(&t),
  }
}

impl<'a> Parser<'a> {
  /// The name of an identifier token with escapes decoded.
  pub fn identifier_name(&self, t: Token) -> SyntaxResult<String> {
    let raw = self.str(t.loc);
    if raw.contains('\\') {
      cook_identifier(raw, t.loc.0)
    } else {
      Ok(raw.to_string())
    }
  }

  /// Validates an already consumed identifier token for use as a reference or binding in this context, and returns its name.
  /// Strict-mode reserved words are reported by the validator.
  pub fn check_identifier(&mut self, ctx: ParseCtx, t: Token) -> SyntaxResult<String> {
    if (t.typ == TT::KeywordYield && ctx.rules.yield_expr_allowed)
      || (t.typ == TT::KeywordAwait && (ctx.rules.await_expr_allowed || ctx.module))
    {
      return Err(t.error(SyntaxErrorType::InvalidTokenContext));
    };
    let raw = self.str(t.loc);
    let name = self.identifier_name(t)?;
    if t.typ == TT::Identifier && raw.contains('\\') {
      // Escapes don't turn a reserved word into an identifier.
      match KEYWORD_STRS.get(name.as_str()).copied() {
        Some(TT::KeywordYield) if ctx.rules.yield_expr_allowed => {
          return Err(t.error(SyntaxErrorType::InvalidTokenContext));
        }
        Some(TT::KeywordAwait) if ctx.rules.await_expr_allowed || ctx.module => {
          return Err(t.error(SyntaxErrorType::InvalidTokenContext));
        }
        Some(kw) if kw.is_reserved() => return Err(t.error(SyntaxErrorType::UnexpectedToken)),
        _ => {}
      };
    };
    if t.typ == TT::KeywordAwait {
      self.await_ident_loc.get_or_insert(t.loc);
    };
    Ok(name)
  }

  /// Parses an IdentifierReference or BindingIdentifier, returning its token and name.
  pub fn identifier(&mut self, ctx: ParseCtx) -> SyntaxResult<(Token, String)> {
    let t = self.peek()?;
    if !is_valid_pattern_identifier(t.typ, ctx) {
      return Err(self.unexpected(t));
    };
    self.consume()?;
    let name = self.check_identifier(ctx, t)?;
    Ok((t, name))
  }

  /// Parses an identifier pattern.
  pub fn id_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IdPat>> {
    let (t, name) = self.identifier(ctx)?;
    Ok(self.node(t.loc, IdPat { name }))
  }

  pub fn class_or_func_name(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassOrFuncName>> {
    let (t, name) = self.identifier(ctx)?;
    Ok(self.node(t.loc, ClassOrFuncName { name }))
  }

  /// Parses a binding identifier, an object pattern, or an array pattern.
  pub fn pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Pat>> {
    let ctx = ctx.with_in_allowed(true);
    let t = self.peek()?;
    Ok(match t.typ {
      TT::BracketOpen => self.arr_pat(ctx)?.wrap(Pat::Arr),
      TT::BraceOpen => self.obj_pat(ctx)?.wrap(Pat::Obj),
      t if is_valid_pattern_identifier(t, ctx) => self.id_pat(ctx)?.wrap(Pat::Id),
      _ => return Err(self.unexpected(t)),
    })
  }

  pub fn pat_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<PatDecl>> {
    let pat = self.pat(ctx)?;
    Ok(self.node(pat.loc, PatDecl { pat }))
  }

  /// A pattern with an optional `= default`.
  pub fn pat_with_default(&mut self, ctx: ParseCtx) -> SyntaxResult<(Node<Pat>, Option<Node<Expr>>)> {
    let target = self.pat(ctx)?;
    let default_value = if self.consume_if(TT::Equals)?.is_match() {
      Some(self.assignment_expr(ctx)?)
    } else {
      None
    };
    Ok((target, default_value))
  }

  /// Parses a parameter, which is a pattern with an optional default, or a rest element.
  pub fn param_decl(&mut self, ctx: ParseCtx, rest: bool) -> SyntaxResult<Node<ParamDecl>> {
    self.with_loc(|p| {
      if rest {
        p.require(TT::DotDotDot)?;
        let pattern = p.pat_decl(ctx)?;
        return Ok(ParamDecl {
          rest,
          pattern,
          default_value: None,
        });
      };
      let (pat, default_value) = p.pat_with_default(ctx)?;
      Ok(ParamDecl {
        rest,
        pattern: p.node(pat.loc, PatDecl { pat }),
        default_value,
      })
    })
  }

  /// Parses an object pattern like `{ x, y: z = 1, [computed]: value }`.
  pub fn obj_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      while p.peek()?.typ != TT::BraceClose {
        let prop = p.with_loc(|p| {
          let (t, next) = p.peek_2()?;
          if is_valid_pattern_identifier(t.typ, ctx) && next.typ != TT::Colon {
            // Shorthand, so the key is also the binding.
            let id = p.id_pat(ctx)?;
            let default_value = if p.consume_if(TT::Equals)?.is_match() {
              Some(p.assignment_expr(ctx)?)
            } else {
              None
            };
            return Ok(ObjPatProp {
              key: ClassOrObjKey::Direct(id.derive_stx(|id| ClassOrObjMemberDirectKey {
                key: id.name.clone(),
                tt: t.typ,
              })),
              target: id.wrap(Pat::Id),
              shorthand: true,
              default_value,
            });
          };
          let key = p.class_or_obj_key(ctx)?;
          p.require(TT::Colon)?;
          let (target, default_value) = p.pat_with_default(ctx)?;
          Ok(ObjPatProp {
            key,
            target,
            shorthand: false,
            default_value,
          })
        })?;
        properties.push(prop);
        if p.peek()?.typ != TT::BraceClose {
          p.require(TT::Comma)?;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(ObjPat { properties })
    })
  }

  /// Parses an array pattern like `[a, , b = 1, ...rest]`. The rest element must come last, without a trailing comma.
  pub fn arr_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<Option<ArrPatElem>>::new();
      let mut rest = None;
      loop {
        if p.peek()?.typ == TT::BracketClose {
          break;
        };
        if p.consume_if(TT::Comma)?.is_match() {
          elements.push(None);
          continue;
        };
        if p.consume_if(TT::DotDotDot)?.is_match() {
          rest = Some(p.pat(ctx)?);
          break;
        };
        let (target, default_value) = p.pat_with_default(ctx)?;
        elements.push(Some(ArrPatElem {
          target,
          default_value,
        }));
        if p.peek()?.typ != TT::BracketClose {
          p.require(TT::Comma)?;
        };
      }
      p.require(TT::BracketClose)?;
      Ok(ArrPat { elements, rest })
    })
  }
}
