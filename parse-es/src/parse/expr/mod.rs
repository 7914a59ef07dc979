pub mod lit;
pub mod pat;
pub mod util;

use super::cover::ArrowHead;
use super::cover::CoverExpr;
use super::cover::CoverGrammar;
use super::operator::ASSIGNMENT_OPERATOR_MAPPING;
use super::operator::BINARY_OPERATOR_MAPPING;
use super::operator::PREFIX_OPERATOR_MAPPING;
use super::ParseCtx;
use super::Parser;
use super::ParserCheckpoint;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::NewTargetExpr;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::expr::YieldExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::TT;
use pat::is_valid_pattern_identifier;
use pat::ParsePatternRules;
use util::binding_violation;
use util::lit_to_pat;
use util::lit_to_pat_with_default;

/// Whether a token can begin an AssignmentExpression. Used to tell a bare `yield` apart from one with an operand.
fn starts_assignment_expr(typ: TT) -> bool {
  matches!(
    typ,
    TT::Identifier
      | TT::BraceOpen
      | TT::BracketOpen
      | TT::Exclamation
      | TT::Hyphen
      | TT::HyphenHyphen
      | TT::KeywordAs
      | TT::KeywordAsync
      | TT::KeywordAwait
      | TT::KeywordClass
      | TT::KeywordDelete
      | TT::KeywordFrom
      | TT::KeywordFunction
      | TT::KeywordGet
      | TT::KeywordLet
      | TT::KeywordNew
      | TT::KeywordOf
      | TT::KeywordSet
      | TT::KeywordStatic
      | TT::KeywordSuper
      | TT::KeywordTarget
      | TT::KeywordThis
      | TT::KeywordTypeof
      | TT::KeywordVoid
      | TT::KeywordYield
      | TT::LiteralFalse
      | TT::LiteralNull
      | TT::LiteralNumber
      | TT::LiteralRegex
      | TT::LiteralString
      | TT::LiteralTemplatePartString
      | TT::LiteralTemplatePartStringEnd
      | TT::LiteralTrue
      | TT::ParenthesisOpen
      | TT::Plus
      | TT::PlusPlus
      | TT::Slash
      | TT::SlashEquals
      | TT::Tilde
  )
}

impl<'a> Parser<'a> {
  fn binary(&self, operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
    let loc = left.loc + right.loc;
    self
      .node(loc, BinaryExpr {
        operator,
        left,
        right,
      })
      .wrap(Expr::Binary)
  }

  /// Expression, including comma sequences.
  pub fn expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let mut left = self.assignment_expr(ctx)?;
    while self.consume_if(TT::Comma)?.is_match() {
      let right = self.assignment_expr(ctx)?;
      left = self.binary(OperatorName::Comma, left, right);
    }
    Ok(left)
  }

  pub fn assignment_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let cover = self.isolate(|p, cg| p.assignment_expr_or_target(ctx, cg))?;
    match cover {
      CoverExpr::Expr(e) => Ok(e),
      CoverExpr::Target(t) => Err(t.error(SyntaxErrorType::UnexpectedObjectBinding)),
      CoverExpr::ArrowHead(h) => Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None)),
    }
  }

  /// An AssignmentExpression that may still turn out to be a pattern, e.g. an element of an array literal that is itself being destructured into.
  pub fn assignment_expr_or_target(
    &mut self,
    ctx: ParseCtx,
    cg: &mut CoverGrammar,
  ) -> SyntaxResult<CoverExpr> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
    if t.typ == TT::KeywordYield && ctx.rules.yield_expr_allowed {
      cg.clear();
      return Ok(CoverExpr::Expr(self.yield_expr(ctx)?));
    };
    let start = self.checkpoint();
    let cond = self.conditional_expr(ctx, cg)?;

    let next = self.peek()?;
    if next.typ == TT::EqualsChevronRight {
      if next.preceded_by_line_terminator {
        return Err(next.error(SyntaxErrorType::LineTerminatorAfterArrowParameters));
      };
      cg.clear();
      cg.first_error = None;
      let head = match cond {
        CoverExpr::ArrowHead(head) => head,
        CoverExpr::Expr(e) if matches!(*e.stx, Expr::Id(_)) => {
          let pattern = self.node(e.loc, PatDecl {
            pat: lit_to_pat(e)?,
          });
          let loc = pattern.loc;
          ArrowHead {
            loc,
            parameters: vec![self.node(loc, ParamDecl {
              rest: false,
              pattern,
              default_value: None,
            })],
            async_: false,
          }
        }
        _ => return Err(self.unexpected(next)),
      };
      return Ok(CoverExpr::Expr(self.arrow_func(ctx, head, &start)?));
    };
    if let CoverExpr::ArrowHead(_) = cond {
      return Err(self.unexpected(next));
    };

    let Some(operator) = ASSIGNMENT_OPERATOR_MAPPING.get(&next.typ).copied() else {
      return Ok(cond);
    };
    let target = if operator == OperatorName::Assignment {
      match cond {
        CoverExpr::Target(target) => target,
        CoverExpr::Expr(e) => {
          if !cg.is_assignment_target {
            return Err(e.error(SyntaxErrorType::InvalidAssignmentTarget));
          };
          lit_to_pat(e)?
        }
        CoverExpr::ArrowHead(h) => return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None)),
      }
    } else {
      match cond {
        CoverExpr::Expr(e) if cg.is_assignment_target && e.stx.is_simple_target() => lit_to_pat(e)?,
        CoverExpr::Expr(e) => return Err(e.error(SyntaxErrorType::InvalidAssignmentTarget)),
        CoverExpr::Target(t) => return Err(t.error(SyntaxErrorType::InvalidAssignmentTarget)),
        CoverExpr::ArrowHead(h) => return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None)),
      }
    };
    self.consume()?;
    let value = self.assignment_expr(ctx)?;
    cg.first_error = None;
    if operator != OperatorName::Assignment {
      cg.clear();
    };
    Ok(CoverExpr::Expr(
      self
        .finish(&start, AssignExpr {
          operator,
          target,
          value,
        })
        .wrap(Expr::Assign),
    ))
  }

  fn yield_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordYield)?;
        let t = p.peek_with_mode(LexMode::SlashIsRegex)?;
        if t.preceded_by_line_terminator {
          return Ok(YieldExpr {
            delegate: false,
            argument: None,
          });
        };
        let delegate = p.consume_if(TT::Asterisk)?.is_match();
        let argument = if delegate || starts_assignment_expr(t.typ) {
          Some(p.assignment_expr(ctx)?)
        } else {
          None
        };
        Ok(YieldExpr { delegate, argument })
      })
      .map(|n| n.wrap(Expr::Yield))
  }

  fn conditional_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let start = self.checkpoint();
    let test = self.binary_expr(ctx, cg)?;
    if cg.first_error.is_some() || self.peek()?.typ != TT::Question {
      return Ok(test);
    };
    let test = match test {
      CoverExpr::Expr(e) => e,
      CoverExpr::ArrowHead(h) => return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None)),
      CoverExpr::Target(t) => return Err(t.error(SyntaxErrorType::UnexpectedObjectBinding)),
    };
    self.consume()?;
    cg.clear();
    let consequent = self.assignment_expr(ctx.with_in_allowed(true))?;
    self.require(TT::Colon)?;
    let alternate = self.assignment_expr(ctx)?;
    Ok(CoverExpr::Expr(
      self
        .finish(&start, CondExpr {
          test,
          consequent,
          alternate,
        })
        .wrap(Expr::Cond),
    ))
  }

  fn binary_operator(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<OperatorName>> {
    let t = self.peek()?;
    Ok(match BINARY_OPERATOR_MAPPING.get(&t.typ) {
      Some(OperatorName::In) if !ctx.in_allowed => None,
      op => op.copied(),
    })
  }

  /// Binary operators up to (but excluding) exponentiation, resolved with an operator stack.
  fn binary_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let left = self.exponent_expr(ctx, cg)?;
    if cg.first_error.is_some() {
      return Ok(left);
    };
    let Some(mut operator) = self.binary_operator(ctx)? else {
      return Ok(left);
    };
    cg.clear();
    let mut right = self.cover_to_expr(left)?;
    let mut stack = Vec::<(Node<Expr>, OperatorName)>::new();
    loop {
      self.consume()?;
      let precedence = OPERATORS[&operator].precedence;
      while stack
        .last()
        .is_some_and(|(_, top)| precedence <= OPERATORS[top].precedence)
      {
        let Some((left, top)) = stack.pop() else {
          break;
        };
        right = self.binary(top, left, right);
      }
      stack.push((right, operator));
      let operand = self.isolate(|p, cg| p.exponent_expr(ctx, cg))?;
      right = self.cover_to_expr(operand)?;
      match self.binary_operator(ctx)? {
        Some(next) => operator = next,
        None => break,
      };
    }
    while let Some((left, top)) = stack.pop() {
      right = self.binary(top, left, right);
    }
    Ok(CoverExpr::Expr(right))
  }

  /// `**` is right associative and binds tighter than every other binary operator.
  fn exponent_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let left = self.unary_expr(ctx, cg)?;
    if self.peek()?.typ != TT::AsteriskAsterisk {
      return Ok(left);
    };
    let left = self.cover_to_expr(left)?;
    self.consume()?;
    cg.clear();
    let right = self.isolate(|p, cg| p.exponent_expr(ctx, cg))?;
    let right = self.cover_to_expr(right)?;
    Ok(CoverExpr::Expr(self.binary(
      OperatorName::Exponentiation,
      left,
      right,
    )))
  }

  fn unary_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let start = self.checkpoint();
    let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
    let operator = if t.typ == TT::KeywordAwait && ctx.rules.await_expr_allowed {
      OperatorName::Await
    } else if let Some(op) = PREFIX_OPERATOR_MAPPING.get(&t.typ) {
      *op
    } else {
      return self.update_expr(ctx, cg);
    };
    self.consume_with_mode(LexMode::SlashIsRegex)?;
    cg.clear();
    let argument = self.isolate(|p, cg| p.unary_expr(ctx, cg))?;
    let argument = match argument {
      CoverExpr::Expr(e) => e,
      CoverExpr::ArrowHead(h) => return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None)),
      CoverExpr::Target(t) => return Err(t.error(SyntaxErrorType::UnexpectedObjectBinding)),
    };
    match operator {
      OperatorName::PrefixIncrement | OperatorName::PrefixDecrement => {
        if !argument.stx.is_simple_target() {
          return Err(argument.error(SyntaxErrorType::InvalidUpdateTarget));
        };
      }
      // `-a ** b` is ambiguous and must be parenthesised.
      OperatorName::Await => {}
      _ => {
        let next = self.peek()?;
        if next.typ == TT::AsteriskAsterisk {
          return Err(self.unexpected(next));
        };
      }
    };
    Ok(CoverExpr::Expr(
      self
        .finish(&start, UnaryExpr { operator, argument })
        .wrap(Expr::Unary),
    ))
  }

  fn update_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let start = self.checkpoint();
    let operand = self.lhs_expr(ctx, cg, true)?;
    if cg.first_error.is_some() {
      return Ok(operand);
    };
    let t = self.peek()?;
    if t.preceded_by_line_terminator {
      return Ok(operand);
    };
    let operator = match t.typ {
      TT::PlusPlus => OperatorName::PostfixIncrement,
      TT::HyphenHyphen => OperatorName::PostfixDecrement,
      _ => return Ok(operand),
    };
    let argument = match operand {
      CoverExpr::Expr(e) if e.stx.is_simple_target() => e,
      CoverExpr::Expr(e) => return Err(e.error(SyntaxErrorType::InvalidUpdateTarget)),
      _ => return Err(self.unexpected(t)),
    };
    self.consume()?;
    cg.clear();
    Ok(CoverExpr::Expr(
      self
        .finish(&start, UnaryPostfixExpr { operator, argument })
        .wrap(Expr::UnaryPostfix),
    ))
  }

  /// `obj[member]` or `obj.member`, with `obj` already parsed.
  fn member_access(
    &mut self,
    ctx: ParseCtx,
    start: &ParserCheckpoint,
    object: Node<Expr>,
  ) -> SyntaxResult<Node<Expr>> {
    if self.consume_if(TT::BracketOpen)?.is_match() {
      let member = self.expr(ctx)?;
      self.require(TT::BracketClose)?;
      return Ok(
        self
          .finish(start, ComputedMemberExpr { object, member })
          .wrap(Expr::ComputedMember),
      );
    };
    self.require(TT::Dot)?;
    let t = self.consume()?;
    if !t.typ.is_identifier_name() {
      return Err(self.unexpected(t));
    };
    let right = self.identifier_name(t)?;
    Ok(
      self
        .finish(start, MemberExpr {
          left: object,
          right,
        })
        .wrap(Expr::Member),
    )
  }

  /// LeftHandSideExpression: member accesses, calls, `new`, `super` and tagged templates. Calls are excluded for the callee of `new`.
  pub fn lhs_expr(
    &mut self,
    ctx: ParseCtx,
    cg: &mut CoverGrammar,
    allow_call: bool,
  ) -> SyntaxResult<CoverExpr> {
    let ctx = ctx.with_in_allowed(true);
    let start = self.checkpoint();
    let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
    let mut expr = match t.typ {
      TT::KeywordSuper => {
        self.consume()?;
        cg.clear();
        let sup = self.node(t.loc, SuperExpr {}).wrap(Expr::Super);
        match self.peek()?.typ {
          TT::ParenthesisOpen if allow_call => {
            let (arguments, _) = self.call_args(ctx, cg)?;
            self
              .finish(&start, CallExpr {
                callee: sup,
                arguments,
              })
              .wrap(Expr::Call)
          }
          TT::BracketOpen | TT::Dot => {
            cg.is_assignment_target = true;
            self.member_access(ctx, &start, sup)?
          }
          _ => return Err(self.unexpected(t)),
        }
      }
      TT::KeywordNew => {
        cg.clear();
        self.new_expr(ctx, cg)?
      }
      TT::KeywordAsync => match self.async_call_or_arrow(ctx, cg, allow_call, &start)? {
        CoverExpr::Expr(e) => e,
        other => return Ok(other),
      },
      _ => {
        let primary = self.primary_expr(ctx, cg)?;
        if cg.first_error.is_some() {
          return Ok(primary);
        };
        match primary {
          CoverExpr::Expr(e) => e,
          other => return Ok(other),
        }
      }
    };

    loop {
      let t = self.peek()?;
      expr = match t.typ {
        TT::ParenthesisOpen if allow_call => {
          cg.clear();
          let (arguments, _) = self.call_args(ctx, cg)?;
          self
            .finish(&start, CallExpr {
              callee: expr,
              arguments,
            })
            .wrap(Expr::Call)
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          cg.clear();
          let parts = self.template_parts(ctx)?;
          self
            .finish(&start, TaggedTemplateExpr {
              function: expr,
              parts,
            })
            .wrap(Expr::TaggedTemplate)
        }
        TT::BracketOpen | TT::Dot => {
          cg.is_binding_element = false;
          cg.is_assignment_target = true;
          self.member_access(ctx, &start, expr)?
        }
        _ => break,
      };
    }
    Ok(CoverExpr::Expr(expr))
  }

  /// `async` followed by an identifier or parenthesised list is either the head of an async arrow function or a call to something named `async`.
  fn async_call_or_arrow(
    &mut self,
    ctx: ParseCtx,
    cg: &mut CoverGrammar,
    allow_call: bool,
    start: &ParserCheckpoint,
  ) -> SyntaxResult<CoverExpr> {
    let primary = self.primary_expr(ctx, cg)?;
    let CoverExpr::Expr(callee) = primary else {
      return Ok(primary);
    };
    if !allow_call || !matches!(*callee.stx, Expr::Id(_)) {
      return Ok(CoverExpr::Expr(callee));
    };
    let t = self.peek()?;
    if t.preceded_by_line_terminator {
      return Ok(CoverExpr::Expr(callee));
    };
    if is_valid_pattern_identifier(t.typ, ctx) {
      let param_ctx = ctx.with_rules(ParsePatternRules {
        await_expr_allowed: true,
        ..ctx.rules
      });
      let id = self.id_pat(param_ctx)?;
      let loc = id.loc;
      let pattern = self.node(loc, PatDecl {
        pat: id.wrap(Pat::Id),
      });
      return Ok(CoverExpr::ArrowHead(ArrowHead {
        loc: self.since_checkpoint(start),
        parameters: vec![self.node(loc, ParamDecl {
          rest: false,
          pattern,
          default_value: None,
        })],
        async_: true,
      }));
    };
    if t.typ != TT::ParenthesisOpen {
      return Ok(CoverExpr::Expr(callee));
    };

    let outer_await = self.await_ident_loc.take();
    let (arguments, after_spread) = self.call_args(ctx, cg)?;
    let arrow = self.peek()?;
    if cg.is_binding_element
      && !arrow.preceded_by_line_terminator
      && arrow.typ == TT::EqualsChevronRight
    {
      if let Some(loc) = after_spread {
        return Err(loc.error(SyntaxErrorType::UnexpectedToken, None));
      };
      if let Some(loc) = self.await_ident_loc {
        return Err(loc.error(SyntaxErrorType::AwaitInAsyncArrowParameters, None));
      };
      self.await_ident_loc = outer_await;
      let mut parameters = Vec::new();
      for arg in arguments {
        let loc = arg.loc;
        let CallArg { spread, value } = *arg.stx;
        if spread {
          let pat = lit_to_pat(value)?;
          self.check_binding(&pat)?;
          let pattern = self.node(pat.loc, PatDecl { pat });
          parameters.push(self.node(loc, ParamDecl {
            rest: true,
            pattern,
            default_value: None,
          }));
        } else {
          parameters.push(self.cover_to_param(CoverExpr::Expr(value))?);
        };
      }
      return Ok(CoverExpr::ArrowHead(ArrowHead {
        loc: self.since_checkpoint(start),
        parameters,
        async_: true,
      }));
    };
    self.await_ident_loc = outer_await.or(self.await_ident_loc);
    cg.clear();
    Ok(CoverExpr::Expr(
      self
        .finish(start, CallExpr { callee, arguments })
        .wrap(Expr::Call),
    ))
  }

  fn new_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    self.require(TT::KeywordNew)?;
    if self.consume_if(TT::Dot)?.is_match() {
      let t = self.peek()?;
      if t.typ != TT::KeywordTarget {
        return Err(self.unexpected(t));
      };
      self.consume()?;
      return Ok(self.finish(&start, NewTargetExpr {}).wrap(Expr::NewTarget));
    };
    let callee = self.isolate(|p, cg| p.lhs_expr(ctx, cg, false))?;
    let callee = self.cover_to_expr(callee)?;
    let arguments = if self.peek()?.typ == TT::ParenthesisOpen {
      self.call_args(ctx, cg)?.0
    } else {
      Vec::new()
    };
    Ok(self.finish(&start, NewExpr { callee, arguments }).wrap(Expr::New))
  }

  /// Parses `(arg, ...spread)`. Also returns the location of the first token after a spread argument that wasn't last, which rules out an async arrow head.
  pub fn call_args(
    &mut self,
    ctx: ParseCtx,
    cg: &mut CoverGrammar,
  ) -> SyntaxResult<(Vec<Node<CallArg>>, Option<crate::loc::Loc>)> {
    let ctx = ctx.with_in_allowed(true);
    self.require(TT::ParenthesisOpen)?;
    let mut arguments = Vec::new();
    let mut after_spread = None;
    while self.peek()?.typ != TT::ParenthesisClose {
      let start = self.checkpoint();
      let arg = if self.consume_if(TT::DotDotDot)?.is_match() {
        let value = self.assignment_expr(ctx)?;
        let next = self.peek()?;
        if next.typ != TT::ParenthesisClose {
          after_spread.get_or_insert(next.loc);
        };
        CallArg {
          spread: true,
          value,
        }
      } else {
        let value = self.inherit(cg, |p, cg| p.assignment_expr_or_target(ctx, cg))?;
        CallArg {
          spread: false,
          value: self.cover_to_expr(value)?,
        }
      };
      arguments.push(self.finish(&start, arg));
      if self.peek()?.typ != TT::ParenthesisClose {
        self.require(TT::Comma)?;
      };
    }
    self.require(TT::ParenthesisClose)?;
    Ok((arguments, after_spread))
  }

  fn check_binding(&mut self, pat: &Node<Pat>) -> SyntaxResult<()> {
    let Some(loc) = binding_violation(pat) else {
      return Ok(());
    };
    let typ = if self.peek()?.typ == TT::Equals {
      SyntaxErrorType::InvalidAssignmentTarget
    } else {
      SyntaxErrorType::IllegalArrowFunctionParameters
    };
    Err(loc.error(typ, None))
  }

  /// Reinterprets a parenthesised item as an arrow function parameter.
  fn cover_to_param(&mut self, cover: CoverExpr) -> SyntaxResult<Node<ParamDecl>> {
    let (target, default_value) = match cover {
      CoverExpr::Expr(e) => {
        let elem = lit_to_pat_with_default(e)?;
        (elem.target, elem.default_value)
      }
      CoverExpr::Target(t) => (t, None),
      CoverExpr::ArrowHead(h) => {
        return Err(h.loc.error(SyntaxErrorType::IllegalArrowFunctionParameters, None))
      }
    };
    self.check_binding(&target)?;
    let loc = target
      .loc
      .add_option(default_value.as_ref().map(|d| d.loc));
    let pattern = self.node(target.loc, PatDecl { pat: target });
    Ok(self.node(loc, ParamDecl {
      rest: false,
      pattern,
      default_value,
    }))
  }

  fn group_to_params(
    &mut self,
    items: Vec<CoverExpr>,
    tail: Vec<Node<ParamDecl>>,
  ) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    let mut parameters = Vec::with_capacity(items.len() + tail.len());
    for item in items {
      parameters.push(self.cover_to_param(item)?);
    }
    parameters.extend(tail);
    Ok(parameters)
  }

  /// A parenthesised expression, or the parameter list of an arrow function.
  pub fn group_expr(&mut self, ctx: ParseCtx, cg: &mut CoverGrammar) -> SyntaxResult<CoverExpr> {
    let ctx = ctx.with_in_allowed(true);
    let start = self.checkpoint();
    let open = self.require(TT::ParenthesisOpen)?;
    let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
    if t.typ == TT::ParenthesisClose {
      self.consume()?;
      cg.clear();
      return Ok(CoverExpr::ArrowHead(ArrowHead {
        loc: self.since_checkpoint(&start),
        parameters: Vec::new(),
        async_: false,
      }));
    };
    if t.typ == TT::DotDotDot {
      let rest = self.param_decl(ctx, true)?;
      self.require(TT::ParenthesisClose)?;
      cg.clear();
      return Ok(CoverExpr::ArrowHead(ArrowHead {
        loc: self.since_checkpoint(&start),
        parameters: vec![rest],
        async_: false,
      }));
    };

    let mut items = vec![self.inherit(cg, |p, cg| p.assignment_expr_or_target(ctx, cg))?];
    // Parameters after an item that can only be a pattern, e.g. `({a = 1}, b) => {}`.
    let mut tail = Vec::new();
    let mut must_be_arrow = false;
    while self.consume_if(TT::Comma)?.is_match() {
      cg.is_assignment_target = false;
      let t = self.peek()?;
      if t.typ == TT::DotDotDot {
        if !cg.is_binding_element {
          return Err(self.unexpected(t));
        };
        tail.push(self.param_decl(ctx, true)?);
        self.require(TT::ParenthesisClose)?;
        let parameters = self.group_to_params(items, tail)?;
        return Ok(CoverExpr::ArrowHead(ArrowHead {
          loc: self.since_checkpoint(&start),
          parameters,
          async_: false,
        }));
      };
      if must_be_arrow {
        tail.push(self.param_decl(ctx, false)?);
      } else {
        items.push(self.inherit(cg, |p, cg| p.assignment_expr_or_target(ctx, cg))?);
        must_be_arrow = cg.first_error.is_some();
      };
    }
    self.require(TT::ParenthesisClose)?;

    let next = self.peek()?;
    if must_be_arrow || (!next.preceded_by_line_terminator && next.typ == TT::EqualsChevronRight) {
      if !cg.is_binding_element {
        let typ = if next.typ == TT::Equals {
          SyntaxErrorType::InvalidAssignmentTarget
        } else {
          SyntaxErrorType::IllegalArrowFunctionParameters
        };
        return Err(open.loc.error(typ, None));
      };
      cg.is_binding_element = false;
      let parameters = self.group_to_params(items, tail)?;
      return Ok(CoverExpr::ArrowHead(ArrowHead {
        loc: self.since_checkpoint(&start),
        parameters,
        async_: false,
      }));
    };

    cg.is_binding_element = false;
    if items.len() == 1 {
      let item = items.remove(0);
      if !matches!(&item, CoverExpr::Expr(e) if e.stx.is_simple_target()) {
        cg.is_assignment_target = false;
      };
      return Ok(item);
    };
    cg.is_assignment_target = false;
    let mut seq: Option<Node<Expr>> = None;
    for item in items {
      let right = self.cover_to_expr(item)?;
      seq = Some(match seq {
        Some(left) => self.binary(OperatorName::Comma, left, right),
        None => right,
      });
    }
    match seq {
      Some(seq) => Ok(CoverExpr::Expr(seq)),
      None => Err(self.unexpected(next)),
    }
  }

  /// The `=> body` of an arrow function whose parameters have been parsed.
  pub fn arrow_func(
    &mut self,
    ctx: ParseCtx,
    head: ArrowHead,
    start: &ParserCheckpoint,
  ) -> SyntaxResult<Node<Expr>> {
    let ArrowHead {
      parameters, async_, ..
    } = head;
    self.require(TT::EqualsChevronRight)?;
    let fn_ctx = ctx.with_rules(ParsePatternRules {
      await_expr_allowed: async_,
      yield_expr_allowed: false,
    });
    let outer_await = self.await_ident_loc.take();
    let (directives, body) = if self.peek()?.typ == TT::BraceOpen {
      let (directives, body) = self.func_body(fn_ctx)?;
      (directives, FuncBody::Block(body))
    } else {
      (Vec::new(), FuncBody::Expression(self.assignment_expr(fn_ctx)?))
    };
    self.await_ident_loc = outer_await;
    let func = self.finish(start, Func {
      arrow: true,
      async_,
      generator: false,
      parameters,
      directives,
      body,
    });
    Ok(self.finish(start, ArrowFuncExpr { func }).wrap(Expr::ArrowFunc))
  }

  /// An identifier reference.
  pub fn id_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let (t, name) = self.identifier(ctx)?;
    Ok(self.node(t.loc, IdExpr { name }).wrap(Expr::Id))
  }
}
