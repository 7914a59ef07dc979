use super::pat::is_valid_pattern_identifier;
use super::util::lit_to_pat;
use super::util::lit_to_pat_with_default;
use super::util::obj_member_to_pat_prop;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::cook;
use crate::lex::LexMode;
use crate::num::JsNumber;
use crate::num::NumericLiteralKind;
use crate::parse::class_or_object::MethodOrKey;
use crate::parse::cover::CoverExpr;
use crate::parse::cover::CoverGrammar;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use crate::regex::is_valid_pattern;
use crate::token::Token;
use crate::token::TT;

const REGEX_FLAGS: &str = "gimuy";

/// Once an array literal turns out to be a pattern, the elements parsed so far are converted.
fn arr_elems_to_pat(elements: Vec<LitArrElem>) -> SyntaxResult<Vec<Option<ArrPatElem>>> {
  elements
    .into_iter()
    .map(|e| match e {
      LitArrElem::Single(e) => lit_to_pat_with_default(e).map(Some),
      LitArrElem::Empty => Ok(None),
      LitArrElem::Rest(e) => Err(e.error(SyntaxErrorType::InvalidRest)),
    })
    .collect()
}

// An object literal member, or a property that can only appear in a pattern.
enum ObjProp {
  Member(Node<ObjMember>),
  Target(Node<ObjPatProp>),
}

impl<'a> Parser<'a> {
  /// The numeric value of a number token, rejecting legacy forms in strict code.
  pub fn number_value(&self, ctx: ParseCtx, t: Token) -> SyntaxResult<JsNumber> {
    let raw = self.str(t.loc);
    if ctx.strict {
      match NumericLiteralKind::of(raw) {
        NumericLiteralKind::LegacyOctal => {
          return Err(t.error(SyntaxErrorType::StrictOctalLiteral))
        }
        NumericLiteralKind::Noctal => return Err(t.error(SyntaxErrorType::StrictNoctalLiteral)),
        _ => {}
      };
    };
    JsNumber::from_literal(raw).ok_or_else(|| t.error(SyntaxErrorType::UnexpectedNumber))
  }

  /// The cooked value of a string token. A legacy octal escape is an error in strict code.
  pub fn string_value(&self, ctx: ParseCtx, t: Token) -> SyntaxResult<String> {
    let raw = self.str(t.loc);
    let cooked = cook(&raw[1..raw.len() - 1], t.loc.0 + 1, false)?;
    if ctx.strict {
      if let Some(loc) = cooked.octal {
        return Err(loc.error(SyntaxErrorType::StrictOctalEscape, Some(t.typ)));
      };
    };
    Ok(cooked.value)
  }

  pub fn lit_num(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitNumExpr>> {
    let t = self.require(TT::LiteralNumber)?;
    let value = self.number_value(ctx, t)?;
    Ok(self.node(t.loc, LitNumExpr { value }))
  }

  pub fn lit_str(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitStrExpr>> {
    let t = self.require(TT::LiteralString)?;
    let value = self.string_value(ctx, t)?;
    Ok(self.node(t.loc, LitStrExpr { value }))
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<Node<LitRegexExpr>> {
    let t = self.require_with_mode(TT::LiteralRegex, LexMode::SlashIsRegex)?;
    let raw = self.str(t.loc);
    let end = raw
      .rfind('/')
      .filter(|&i| i > 0)
      .ok_or_else(|| t.error(SyntaxErrorType::UnterminatedRegex))?;
    let pattern = &raw[1..end];
    let flags = &raw[end + 1..];
    for (i, c) in flags.char_indices() {
      if !REGEX_FLAGS.contains(c) || flags[..i].contains(c) {
        return Err(t.error(SyntaxErrorType::InvalidRegexFlags));
      };
    }
    if !is_valid_pattern(pattern, flags.contains('u')) {
      return Err(t.error(SyntaxErrorType::InvalidRegex));
    };
    Ok(self.node(t.loc, LitRegexExpr {
      pattern: pattern.to_string(),
      flags: flags.to_string(),
    }))
  }

  /// The strings and substitutions of a template, starting at its first part. Raw text is kept as written.
  pub fn template_parts(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<LitTemplatePart>> {
    let mut t = self.consume()?;
    // The head includes the opening backtick; continuations start right after `}`.
    let mut skip = 1;
    let mut parts = Vec::new();
    loop {
      let raw = self.str(t.loc);
      let end = raw.len()
        - match t.typ {
          TT::LiteralTemplatePartStringEnd => 1,
          _ => 2,
        };
      parts.push(LitTemplatePart::String(raw[skip..end].to_string()));
      if t.typ == TT::LiteralTemplatePartStringEnd {
        break;
      };
      let substitution = self.expr(ctx.with_in_allowed(true))?;
      parts.push(LitTemplatePart::Substitution(substitution));
      self.require(TT::BraceClose)?;
      t = self.consume_with_mode(LexMode::TemplateStrContinue)?;
      skip = 0;
    }
    Ok(parts)
  }

  pub fn lit_template(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitTemplateExpr>> {
    self.with_loc(|p| {
      let parts = p.template_parts(ctx)?;
      Ok(LitTemplateExpr { parts })
    })
  }

  pub fn primary_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
    match t.typ {
      TT::ParenthesisOpen => return self.group_expr(ctx, cg),
      TT::BracketOpen => return self.arr_expr(ctx, cg),
      TT::BraceOpen => return self.obj_expr(ctx, cg),
      TT::KeywordAsync => {
        let (_, next) = self.peek_2()?;
        if next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator {
          cg.clear();
          return Ok(CoverExpr::Expr(self.func_expr(ctx, true)?));
        };
      }
      _ => {}
    };
    if is_valid_pattern_identifier(t.typ, ctx) {
      let (t, name) = self.identifier(ctx)?;
      return Ok(CoverExpr::Expr(
        self.node(t.loc, IdExpr { name }).wrap(Expr::Id),
      ));
    };
    let expr = match t.typ {
      TT::LiteralTrue | TT::LiteralFalse => {
        self.consume()?;
        self
          .node(t.loc, LitBoolExpr {
            value: t.typ == TT::LiteralTrue,
          })
          .wrap(Expr::LitBool)
      }
      TT::LiteralNull => {
        self.consume()?;
        self.node(t.loc, LitNullExpr {}).wrap(Expr::LitNull)
      }
      TT::KeywordThis => {
        self.consume()?;
        self.node(t.loc, ThisExpr {}).wrap(Expr::This)
      }
      TT::KeywordFunction => self.func_expr(ctx, false)?,
      TT::KeywordClass => self.class_expr(ctx)?,
      TT::LiteralNumber => self.lit_num(ctx)?.wrap(Expr::LitNum),
      TT::LiteralString => self.lit_str(ctx)?.wrap(Expr::LitStr),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.lit_template(ctx)?.wrap(Expr::LitTemplate)
      }
      TT::LiteralRegex => self.lit_regex()?.wrap(Expr::LitRegex),
      _ => return Err(self.unexpected(t)),
    };
    cg.clear();
    Ok(CoverExpr::Expr(expr))
  }

  /// An array literal, or an array pattern if an element can only be a pattern.
  pub fn arr_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let ctx = ctx.with_in_allowed(true);
    let start = self.checkpoint();
    self.require(TT::BracketOpen)?;
    let mut elements = Vec::<LitArrElem>::new();
    // Set once the literal can only be a pattern.
    let mut pat: Option<Vec<Option<ArrPatElem>>> = None;
    let mut rest = None;
    loop {
      let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
      if t.typ == TT::BracketClose {
        break;
      };
      if t.typ == TT::Comma {
        self.consume()?;
        match &mut pat {
          Some(pat) => pat.push(None),
          None => elements.push(LitArrElem::Empty),
        };
        continue;
      };
      let spread = self.consume_if(TT::DotDotDot)?.is_match();
      let item = self.inherit(cg, |p, cg| p.assignment_expr_or_target(ctx, cg))?;
      if !cg.is_assignment_target {
        if let Some(err) = cg.first_error.take() {
          return Err(err);
        };
      };
      match item {
        CoverExpr::ArrowHead(h) => {
          return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None))
        }
        CoverExpr::Expr(e) if spread && pat.is_none() => elements.push(LitArrElem::Rest(e)),
        CoverExpr::Expr(e) if !spread => match &mut pat {
          Some(pat) => pat.push(Some(lit_to_pat_with_default(e)?)),
          None => elements.push(LitArrElem::Single(e)),
        },
        item => {
          let target = match item {
            CoverExpr::Expr(e) => lit_to_pat(e)?,
            CoverExpr::Target(t) => t,
            CoverExpr::ArrowHead(h) => {
              return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None))
            }
          };
          let mut converted = match pat.take() {
            Some(pat) => pat,
            None => arr_elems_to_pat(std::mem::take(&mut elements))?,
          };
          if spread {
            // A rest element ends the pattern.
            pat = Some(converted);
            rest = Some(target);
            break;
          };
          converted.push(Some(ArrPatElem {
            target,
            default_value: None,
          }));
          pat = Some(converted);
        }
      };
      if self.peek()?.typ != TT::BracketClose {
        if spread {
          cg.clear();
        };
        self.require(TT::Comma)?;
      };
    }
    self.require(TT::BracketClose)?;
    Ok(match pat {
      Some(elements) => CoverExpr::Target(
        self
          .finish(&start, ArrPat { elements, rest })
          .wrap(Pat::Arr),
      ),
      None => CoverExpr::Expr(
        self
          .finish(&start, LitArrExpr { elements })
          .wrap(Expr::LitArr),
      ),
    })
  }

  /// An object literal, or an object pattern if a property can only be a pattern (e.g. `{a = 1}`).
  pub fn obj_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let ctx = ctx.with_in_allowed(true);
    let start = self.checkpoint();
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    let mut properties: Option<Vec<Node<ObjPatProp>>> = None;
    while self.peek()?.typ != TT::BraceClose {
      match self.obj_prop(ctx, cg)? {
        ObjProp::Member(m) => match &mut properties {
          Some(props) => props.push(obj_member_to_pat_prop(m)?),
          None => members.push(m),
        },
        ObjProp::Target(prop) => {
          let mut props = match properties.take() {
            Some(props) => props,
            None => std::mem::take(&mut members)
              .into_iter()
              .map(obj_member_to_pat_prop)
              .collect::<SyntaxResult<Vec<_>>>()?,
          };
          props.push(prop);
          properties = Some(props);
        }
      };
      if self.peek()?.typ != TT::BraceClose {
        self.require(TT::Comma)?;
      };
    }
    self.require(TT::BraceClose)?;
    Ok(match properties {
      Some(properties) => CoverExpr::Target(
        self
          .finish(&start, ObjPat { properties })
          .wrap(Pat::Obj),
      ),
      None => CoverExpr::Expr(
        self
          .finish(&start, LitObjExpr { members })
          .wrap(Expr::LitObj),
      ),
    })
  }

  fn obj_prop(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<ObjProp> {
    let start = self.checkpoint();
    let t = self.peek()?;
    let key = match self.method_or_key(ctx)? {
      MethodOrKey::Method(key, val) => {
        cg.clear();
        return Ok(ObjProp::Member(self.finish(&start, ObjMember {
          typ: ObjMemberType::Valued { key, val },
        })));
      }
      MethodOrKey::Key(key) => key,
    };

    let next = self.peek()?;
    if matches!(key, ClassOrObjKey::Direct(_)) && next.typ != TT::Colon {
      // Shorthand, so the key must be a valid identifier reference.
      if !is_valid_pattern_identifier(t.typ, ctx) {
        return Err(self.unexpected(t));
      };
      let name = self.check_identifier(ctx, t)?;
      if self.consume_if(TT::Equals)?.is_match() {
        let default_value = self.assignment_expr(ctx)?;
        // Only valid if this object is reinterpreted as a pattern.
        cg.defer(t.error(SyntaxErrorType::IllegalPropertyInitializer));
        let target = self.node(t.loc, IdPat { name }).wrap(Pat::Id);
        return Ok(ObjProp::Target(self.finish(&start, ObjPatProp {
          key,
          target,
          shorthand: true,
          default_value: Some(default_value),
        })));
      };
      let id = self.node(t.loc, IdExpr { name });
      return Ok(ObjProp::Member(self.finish(&start, ObjMember {
        typ: ObjMemberType::Shorthand { id },
      })));
    };

    self.require(TT::Colon)?;
    let value = self.inherit(cg, |p, cg| p.assignment_expr_or_target(ctx, cg))?;
    Ok(match value {
      CoverExpr::Expr(e) => ObjProp::Member(self.finish(&start, ObjMember {
        typ: ObjMemberType::Valued {
          key,
          val: ClassOrObjVal::Prop(e),
        },
      })),
      CoverExpr::Target(target) => ObjProp::Target(self.finish(&start, ObjPatProp {
        key,
        target,
        shorthand: false,
        default_value: None,
      })),
      CoverExpr::ArrowHead(h) => {
        return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None))
      }
    })
  }
}
