pub mod decl;

use super::cover::CoverExpr;
use super::cover::CoverGrammar;
use super::expr::pat::is_valid_pattern_identifier;
use super::expr::util::lit_to_pat;
use super::ParseCtx;
use super::Parser;
use super::ParserCheckpoint;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::operator::OperatorName;
use crate::token::TT;
use decl::starts_lexical_decl;

impl<'a> Parser<'a> {
  /// A StatementListItem: a statement, or a declaration that's only allowed directly in blocks and bodies.
  pub fn stmt_list_item(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t.typ {
      TT::KeywordFunction => self.func_decl(ctx, false, true, false)?.into_wrapped(),
      TT::KeywordClass => self.class_decl(ctx, false)?.into_wrapped(),
      TT::KeywordAsync => {
        let (_, next) = self.peek_2()?;
        if next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator {
          self.func_decl(ctx, false, false, true)?.into_wrapped()
        } else {
          self.stmt(ctx)?
        }
      }
      TT::KeywordLet | TT::KeywordConst => {
        let (t, next) = self.peek_2()?;
        if starts_lexical_decl(t, next) {
          self.var_decl_stmt(ctx)?.into_wrapped()
        } else {
          self.stmt(ctx)?
        }
      }
      _ => self.stmt(ctx)?,
    };
    Ok(stmt)
  }

  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex)?;
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t.typ {
      TT::EOF => return Err(self.unexpected(t)),
      TT::Semicolon => self.empty_stmt()?.into_wrapped(),
      TT::BraceOpen => self.block_stmt(ctx)?.into_wrapped(),
      TT::KeywordBreak => self.break_stmt(ctx)?.into_wrapped(),
      TT::KeywordContinue => self.continue_stmt(ctx)?.into_wrapped(),
      TT::KeywordDebugger => self.debugger_stmt()?.into_wrapped(),
      TT::KeywordDo => self.do_while_stmt(ctx)?.into_wrapped(),
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordIf => self.if_stmt(ctx)?.into_wrapped(),
      TT::KeywordReturn => self.return_stmt(ctx)?.into_wrapped(),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.into_wrapped(),
      TT::KeywordThrow => self.throw_stmt(ctx)?.into_wrapped(),
      TT::KeywordTry => self.try_stmt(ctx)?.into_wrapped(),
      TT::KeywordVar => self.var_decl_stmt(ctx)?.into_wrapped(),
      TT::KeywordWhile => self.while_stmt(ctx)?.into_wrapped(),
      TT::KeywordWith => self.with_stmt(ctx)?.into_wrapped(),
      // Declarations aren't statements.
      TT::KeywordFunction | TT::KeywordClass => return Err(self.unexpected(t)),
      _ => self.expr_or_label_stmt(ctx)?,
    };
    Ok(stmt)
  }

  /// Body of an `if` branch. Function declarations are allowed here outside strict mode; the validator reports them in strict code.
  fn if_branch(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    if self.peek()?.typ == TT::KeywordFunction {
      return Ok(self.func_decl(ctx, false, false, false)?.into_wrapped());
    };
    self.stmt(ctx)
  }

  /// An expression statement, or a labelled statement if the expression is a lone identifier followed by `:`.
  fn expr_or_label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    // Looking past a leading slash would lex it as division.
    if !is_valid_pattern_identifier(self.peek_with_mode(LexMode::SlashIsRegex)?.typ, ctx) {
      return Ok(self.expr_stmt(ctx)?.into_wrapped());
    };
    let (t, next) = self.peek_2()?;
    match t.typ {
      // `let [` always starts a declaration, which isn't allowed as a plain statement.
      TT::KeywordLet if next.typ == TT::BracketOpen => return Err(self.unexpected(t)),
      TT::KeywordAsync if next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator => {
        return Err(self.unexpected(next))
      }
      typ if is_valid_pattern_identifier(typ, ctx) && next.typ == TT::Colon => {
        return Ok(self.label_stmt(ctx)?.into_wrapped())
      }
      _ => {}
    };
    Ok(self.expr_stmt(ctx)?.into_wrapped())
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LabelStmt>> {
    self.with_loc(|p| {
      let (_, name) = p.identifier(ctx)?;
      p.require(TT::Colon)?;
      let statement = if p.peek()?.typ == TT::KeywordFunction {
        p.func_decl(ctx, false, false, false)?.into_wrapped()
      } else {
        p.stmt(ctx)?
      };
      Ok(LabelStmt { name, statement })
    })
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| p.require(TT::Semicolon).map(|_| EmptyStmt {}))
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.repeat_until_tt(TT::BraceClose, |p| p.stmt_list_item(ctx))?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  /// The optional label after `break` or `continue`, and the statement end.
  fn break_or_continue_label(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<String>> {
    if self.consume_if(TT::Semicolon)?.is_match() {
      return Ok(None);
    };
    let t = self.peek()?;
    if t.preceded_by_line_terminator {
      return Ok(None);
    };
    let label = if is_valid_pattern_identifier(t.typ, ctx) {
      Some(self.identifier(ctx)?.1)
    } else {
      None
    };
    self.consume_semicolon()?;
    Ok(label)
  }

  pub fn break_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BreakStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordBreak)?;
      let label = p.break_or_continue_label(ctx)?;
      Ok(BreakStmt { label })
    })
  }

  pub fn continue_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ContinueStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordContinue)?;
      let label = p.break_or_continue_label(ctx)?;
      Ok(ContinueStmt { label })
    })
  }

  pub fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDebugger)?;
      p.consume_semicolon()?;
      Ok(DebuggerStmt {})
    })
  }

  pub fn expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExprStmt>> {
    self.with_loc(|p| {
      let expr = p.expr(ctx.with_in_allowed(true))?;
      p.consume_semicolon()?;
      Ok(ExprStmt { expr })
    })
  }

  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      let test = p.paren_expr(ctx)?;
      let consequent = p.if_branch(ctx)?;
      let alternate = p
        .consume_if(TT::KeywordElse)?
        .and_then(|| p.if_branch(ctx))?;
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  /// `( expr )` after `if`, `while`, `with` and `switch`.
  fn paren_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr(ctx.with_in_allowed(true))?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      let t = p.require(TT::KeywordReturn)?;
      if !ctx.return_allowed {
        return Err(t.error(SyntaxErrorType::IllegalReturn));
      };
      if p.consume_if(TT::Semicolon)?.is_match() {
        return Ok(ReturnStmt { value: None });
      };
      let next = p.peek_with_mode(LexMode::SlashIsRegex)?;
      if next.preceded_by_line_terminator {
        // Automatic Semicolon Insertion.
        return Ok(ReturnStmt { value: None });
      };
      let value = if matches!(next.typ, TT::BraceClose | TT::EOF) {
        None
      } else {
        Some(p.expr(ctx.with_in_allowed(true))?)
      };
      p.consume_semicolon()?;
      Ok(ReturnStmt { value })
    })
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordThrow)?;
      let next = p.peek_with_mode(LexMode::SlashIsRegex)?;
      if next.preceded_by_line_terminator {
        // Illegal under Automatic Semicolon Insertion rules.
        return Err(next.error(SyntaxErrorType::LineTerminatorAfterThrow));
      };
      let value = p.expr(ctx.with_in_allowed(true))?;
      p.consume_semicolon()?;
      Ok(ThrowStmt { value })
    })
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordTry)?;
      let wrapped = p.block_stmt(ctx)?;
      let catch = if p.peek()?.typ == TT::KeywordCatch {
        Some(p.with_loc(|p| {
          p.require(TT::KeywordCatch)?;
          p.require(TT::ParenthesisOpen)?;
          let parameter = p.pat_decl(ctx)?;
          p.require(TT::ParenthesisClose)?;
          let body = p.block_stmt(ctx)?;
          Ok(CatchBlock { parameter, body })
        })?)
      } else {
        None
      };
      let finally = p
        .consume_if(TT::KeywordFinally)?
        .and_then(|| p.block_stmt(ctx))?;
      if catch.is_none() && finally.is_none() {
        let t = p.peek()?;
        return Err(t.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      };
      Ok(TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      let condition = p.paren_expr(ctx)?;
      let body = p.stmt(ctx)?;
      Ok(WhileStmt { condition, body })
    })
  }

  pub fn with_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWith)?;
      let object = p.paren_expr(ctx)?;
      let body = p.stmt(ctx)?;
      Ok(WithStmt { object, body })
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.stmt(ctx)?;
      p.require(TT::KeywordWhile)?;
      let condition = p.paren_expr(ctx)?;
      // The semicolon is optional even without a line terminator.
      let _ = p.consume_if(TT::Semicolon)?;
      Ok(DoWhileStmt { condition, body })
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      let test = p.paren_expr(ctx)?;
      p.require(TT::BraceOpen)?;
      let mut branches = Vec::new();
      let mut seen_default = false;
      loop {
        let t = p.peek()?;
        if t.typ == TT::BraceClose {
          break;
        };
        if t.typ == TT::KeywordDefault {
          if seen_default {
            return Err(t.error(SyntaxErrorType::MultipleDefaultsInSwitch));
          };
          seen_default = true;
        };
        branches.push(p.with_loc(|p| {
          let case = if p.consume_if(TT::KeywordCase)?.is_match() {
            Some(p.expr(ctx.with_in_allowed(true))?)
          } else {
            p.require(TT::KeywordDefault)?;
            None
          };
          p.require(TT::Colon)?;
          let body = p.repeat_while(
            |p| {
              Ok(!matches!(
                p.peek_with_mode(LexMode::SlashIsRegex)?.typ,
                TT::KeywordCase | TT::KeywordDefault | TT::BraceClose | TT::EOF
              ))
            },
            |p| p.stmt_list_item(ctx),
          )?;
          Ok(SwitchBranch { case, body })
        })?);
      }
      p.require(TT::BraceClose)?;
      Ok(SwitchStmt { test, branches })
    })
  }

  /// Everything after `for (init;` of a triple `for`.
  fn for_triple_rest(
    &mut self,
    ctx: ParseCtx,
    start: &ParserCheckpoint,
    init: ForTripleStmtInit,
  ) -> SyntaxResult<Node<Stmt>> {
    let ctx = ctx.with_in_allowed(true);
    let cond = if self.peek_with_mode(LexMode::SlashIsRegex)?.typ == TT::Semicolon {
      None
    } else {
      Some(self.expr(ctx)?)
    };
    self.require(TT::Semicolon)?;
    let post = if self.peek_with_mode(LexMode::SlashIsRegex)?.typ == TT::ParenthesisClose {
      None
    } else {
      Some(self.expr(ctx)?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    Ok(
      self
        .finish(start, ForTripleStmt {
          init,
          cond,
          post,
          body,
        })
        .into_wrapped(),
    )
  }

  /// Everything after the left-hand side of a `for`-`in` or `for`-`of`. The next token must be `in` or `of`.
  fn for_in_of_rest(
    &mut self,
    ctx: ParseCtx,
    start: &ParserCheckpoint,
    lhs: ForInOfLhs,
  ) -> SyntaxResult<Node<Stmt>> {
    let ctx = ctx.with_in_allowed(true);
    let t = self.consume()?;
    if t.typ == TT::KeywordIn {
      let rhs = self.expr(ctx)?;
      self.require(TT::ParenthesisClose)?;
      let body = self.stmt(ctx)?;
      return Ok(self.finish(start, ForInStmt { lhs, rhs, body }).into_wrapped());
    };
    let rhs = self.assignment_expr(ctx)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    Ok(self.finish(start, ForOfStmt { lhs, rhs, body }).into_wrapped())
  }

  /// One of:
  /// - for ( [<expr> | <var decls> ]? ; <expr>? ; <expr>? )
  /// - for ( [<pat> | <var decl>] in <expr> )
  /// - for ( [<pat> | <var decl>] of <expr> )
  ///
  /// The head is parsed once; what follows the first part decides which kind it is.
  pub fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let start = self.checkpoint();
    self.require(TT::KeywordFor)?;
    self.require(TT::ParenthesisOpen)?;
    let head_ctx = ctx.with_in_allowed(false);
    if self.consume_if(TT::Semicolon)?.is_match() {
      return self.for_triple_rest(ctx, &start, ForTripleStmtInit::None);
    };

    let (t, next) = self.peek_2()?;
    let starts_with_let = t.typ == TT::KeywordLet;
    if t.typ == TT::KeywordVar || starts_lexical_decl(t, next) {
      let decl = self.var_decl(head_ctx, false)?;
      let next = self.peek()?;
      if decl.stx.declarators.len() == 1 && matches!(next.typ, TT::KeywordIn | TT::KeywordOf) {
        if decl.stx.declarators[0].initializer.is_some() {
          let typ = if next.typ == TT::KeywordIn {
            SyntaxErrorType::InvalidForInInitializer
          } else {
            SyntaxErrorType::InvalidForOfInitializer
          };
          return Err(next.error(typ));
        };
        return self.for_in_of_rest(ctx, &start, ForInOfLhs::Decl(decl));
      };
      self.require(TT::Semicolon)?;
      if decl
        .stx
        .declarators
        .iter()
        .any(|d| !matches!(*d.pattern.stx.pat.stx, Pat::Id(_)) && d.initializer.is_none())
      {
        return Err(decl.error(SyntaxErrorType::UninitializedBindingPatternInForInit));
      };
      return self.for_triple_rest(ctx, &start, ForTripleStmtInit::Decl(decl));
    };

    let init_start = self.checkpoint();
    let mut cg = CoverGrammar::new();
    let cover = self.assignment_expr_or_target(head_ctx, &mut cg)?;
    let next = self.peek()?;
    let is_assign = matches!(&cover, CoverExpr::Expr(e) if matches!(*e.stx, Expr::Assign(_)));
    if cg.is_assignment_target
      && !is_assign
      && matches!(next.typ, TT::KeywordIn | TT::KeywordOf)
    {
      let target = match cover {
        CoverExpr::Expr(e) => lit_to_pat(e)?,
        CoverExpr::Target(t) => t,
        CoverExpr::ArrowHead(h) => {
          return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None))
        }
      };
      if starts_with_let && next.typ == TT::KeywordOf {
        return Err(next.error(SyntaxErrorType::InvalidForOfTarget));
      };
      return self.for_in_of_rest(ctx, &start, ForInOfLhs::Assign(target));
    };

    let mut expr = match cover {
      CoverExpr::Expr(e) => e,
      CoverExpr::Target(t) => return Err(t.error(SyntaxErrorType::IllegalPropertyInitializer)),
      CoverExpr::ArrowHead(h) => return Err(h.loc.error(SyntaxErrorType::UnexpectedArrow, None)),
    };
    if let Some(err) = cg.first_error {
      return Err(err);
    };
    while self.consume_if(TT::Comma)?.is_match() {
      let right = self.assignment_expr(head_ctx)?;
      expr = self
        .finish(&init_start, BinaryExpr {
          operator: OperatorName::Comma,
          left: expr,
          right,
        })
        .wrap(Expr::Binary);
    }
    let next = self.peek()?;
    match next.typ {
      TT::KeywordIn => return Err(next.error(SyntaxErrorType::InvalidForInTarget)),
      TT::KeywordOf => return Err(next.error(SyntaxErrorType::InvalidForOfTarget)),
      _ => {}
    };
    self.require(TT::Semicolon)?;
    self.for_triple_rest(ctx, &start, ForTripleStmtInit::Expr(expr))
  }
}
