use crate::ast::node::Node;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use crate::SourceType;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use expr::pat::ParsePatternRules;
use tracing::trace;

pub mod class_or_object;
pub mod cover;
pub mod drive;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

// Almost every parse_* function takes these field values as parameters. Instead of having to enumerate them as parameters on every function and ordered unnamed arguments on every call, we simply pass this struct around. Fields are public to allow destructuring, but the value should be immutable; the with_* methods can be used to create an altered copy for passing into other functions, which is useful as most calls simply pass through the values unchanged. This struct should be received as a value, not a reference (i.e. `ctx: ParseCtx` not `ctx: &ParseCtx`) as the latter will require a separate lifetime.
// All fields can change between calls, so we don't simply put them in Parser, as otherwise we'd have to "unwind" (i.e. reset) those values after each call returns.
#[derive(Clone, Copy, Debug)]
pub struct ParseCtx {
  pub rules: ParsePatternRules, // For simplicity, this is a copy, not a non-mutable reference, to avoid having a separate lifetime for it. The value is only two booleans, so a reference is probably slower, and it's supposed to be immutable (i.e. changes come from altered copying, not mutating the original single instance), so there shouldn't be any difference between a reference and a copy.
  // The goal symbol is Module: `await` is reserved everywhere.
  pub module: bool,
  pub strict: bool,
  // False in the head of a `for` statement, where `in` would be ambiguous.
  pub in_allowed: bool,
  // Inside a function body, so `return` is allowed.
  pub return_allowed: bool,
}

impl ParseCtx {
  pub fn new(source_type: SourceType) -> ParseCtx {
    let module = source_type == SourceType::Module;
    ParseCtx {
      rules: ParsePatternRules {
        await_expr_allowed: false,
        yield_expr_allowed: false,
      },
      module,
      strict: module,
      in_allowed: true,
      return_allowed: false,
    }
  }

  pub fn with_rules(&self, rules: ParsePatternRules) -> ParseCtx {
    ParseCtx { rules, ..*self }
  }

  pub fn with_strict(&self, strict: bool) -> ParseCtx {
    ParseCtx { strict, ..*self }
  }

  pub fn with_in_allowed(&self, in_allowed: bool) -> ParseCtx {
    ParseCtx { in_allowed, ..*self }
  }

  pub fn with_return_allowed(&self, return_allowed: bool) -> ParseCtx {
    ParseCtx {
      return_allowed,
      ..*self
    }
  }
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }

  pub fn map<R, F: FnOnce(Self) -> R>(self, f: F) -> Option<R> {
    if self.matched {
      Some(f(self))
    } else {
      None
    }
  }

  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    Ok(if self.matched { Some(f()?) } else { None })
  }
}

#[derive(Clone, Copy, Debug)]
pub struct ParserCheckpoint {
  next_tok_i: usize,
}

/// To get the lexer's `next` after this token was lexed, use `token.loc.1`.
struct BufferedToken {
  token: Token,
  lex_mode: LexMode,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<BufferedToken>,
  next_tok_i: usize,
  // Only built when spans were requested.
  lines: Option<LineIndex<'a>>,
  // The first `await` used as an identifier since the enclosing function started. Async arrow parameters may not contain one.
  await_ident_loc: Option<Loc>,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, for several reasons:
// - Avoid needing to redeclare `<'a>` on every function.
// - More lifetime elision is available for `self` than if it was just another reference parameter.
// - `self` is shorter than `parser` but makes more sense than `p`.
// - Don't need to import each function.
// - Autocomplete is more specific since `self.*` narrows down the options instead of just listing all visible functions.
// - For general consistency; if there's no reason why it should be a free function (e.g. more than one ambiguous base type), it should be a method.
// - Makes free functions truly separate independent utility functions.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
      lines: None,
      await_ident_loc: None,
    }
  }

  /// Record a resolved source span on every node.
  pub fn with_spans(mut self) -> Parser<'a> {
    self.lines = Some(LineIndex::new(self.lexer.source()));
    self
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    &self.lexer.source()[loc.0..loc.1]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  /// Creates a node, attaching its span if spans were requested.
  pub fn node<S: Drive + DriveMut>(&self, loc: Loc, stx: S) -> Node<S> {
    let mut node = Node::new(loc, stx);
    if let Some(lines) = &self.lines {
      node.assoc.set(lines.span(loc));
    };
    node
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  /// The range from the first token consumed after the checkpoint to the end of the last consumed token. Empty if nothing was consumed.
  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let start = match self.buf.get(checkpoint.next_tok_i) {
      Some(t) => t.token.loc.0,
      None => self.lexer.next(),
    };
    if self.next_tok_i <= checkpoint.next_tok_i {
      return Loc(start, start);
    };
    Loc(start, self.buf[self.next_tok_i - 1].token.loc.1)
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    if checkpoint.next_tok_i < self.next_tok_i {
      trace!(
        from = self.next_tok_i,
        to = checkpoint.next_tok_i,
        "rewinding speculative parse"
      );
    };
    self.next_tok_i = checkpoint.next_tok_i;
  }

  fn reset_to(&mut self, n: usize) {
    self.next_tok_i = n;
    self.buf.truncate(n);
    match self.buf.last() {
      Some(t) => self.lexer.set_next(t.token.loc.1),
      None => self.lexer.set_next(0),
    };
  }

  fn forward<K: FnOnce(&Token) -> bool>(
    &mut self,
    mode: LexMode,
    keep: K,
  ) -> SyntaxResult<(bool, Token)> {
    // Only a leading slash or a template continuation lexes differently between modes.
    let stale = self.buf.get(self.next_tok_i).is_some_and(|t| {
      t.lex_mode != mode
        && (mode == LexMode::TemplateStrContinue
          || t.lex_mode == LexMode::TemplateStrContinue
          || matches!(t.token.typ, TT::Slash | TT::SlashEquals | TT::LiteralRegex))
    });
    if stale {
      self.reset_to(self.next_tok_i);
    };
    if self.buf.len() == self.next_tok_i {
      let cp = self.lexer.checkpoint();
      let token = match lex_next(&mut self.lexer, mode) {
        Ok(t) => t,
        Err(err) => {
          self.lexer.apply_checkpoint(cp);
          return Err(err);
        }
      };
      self.buf.push(BufferedToken {
        token,
        lex_mode: mode,
      });
    };
    let t = self.buf[self.next_tok_i].token;
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    Ok((k, t))
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> SyntaxResult<Token> {
    Ok(self.forward(mode, |_| true)?.1)
  }

  pub fn consume(&mut self) -> SyntaxResult<Token> {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> SyntaxResult<Token> {
    Ok(self.forward(mode, |_| false)?.1)
  }

  pub fn peek(&mut self) -> SyntaxResult<Token> {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_2(&mut self) -> SyntaxResult<(Token, Token)> {
    let cp = self.checkpoint();
    let a = self.forward(LexMode::Standard, |_| true);
    let b = self.forward(LexMode::Standard, |_| true);
    self.restore_checkpoint(cp);
    Ok((a?.1, b?.1))
  }

  pub fn maybe_consume_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<MaybeToken> {
    let (matched, t) = self.forward(mode, |t| t.typ == typ)?;
    Ok(MaybeToken {
      typ,
      matched,
      loc: t.loc,
    })
  }

  pub fn consume_if(&mut self, typ: TT) -> SyntaxResult<MaybeToken> {
    self.maybe_consume_with_mode(typ, LexMode::Standard)
  }

  pub fn consume_if_pred<F: FnOnce(&Token) -> bool>(&mut self, pred: F) -> SyntaxResult<MaybeToken> {
    let (matched, t) = self.forward(LexMode::Standard, pred)?;
    Ok(MaybeToken {
      typ: t.typ,
      matched,
      loc: t.loc,
    })
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.peek_with_mode(mode)?;
    if t.typ != typ {
      return Err(self.unexpected(t));
    };
    self.consume_with_mode(mode)
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  /// Classifies an unexpected token the way error messages need it.
  pub fn unexpected(&self, t: Token) -> SyntaxError {
    let typ = match t.typ {
      TT::EOF => SyntaxErrorType::UnexpectedEnd,
      TT::Identifier
      | TT::KeywordAs
      | TT::KeywordFrom
      | TT::KeywordGet
      | TT::KeywordOf
      | TT::KeywordSet
      | TT::KeywordStatic
      | TT::KeywordTarget => SyntaxErrorType::UnexpectedIdentifier,
      TT::KeywordEnum => SyntaxErrorType::UnexpectedReservedWord,
      TT::LiteralNumber => SyntaxErrorType::UnexpectedNumber,
      TT::LiteralString => SyntaxErrorType::UnexpectedString,
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        SyntaxErrorType::UnexpectedTemplate
      }
      _ => SyntaxErrorType::UnexpectedToken,
    };
    t.error(typ)
  }

  /// Automatic semicolon insertion: a missing `;` is fine before a line terminator, a `}`, or the end.
  pub fn consume_semicolon(&mut self) -> SyntaxResult<()> {
    if self.consume_if(TT::Semicolon)?.is_match() {
      return Ok(());
    };
    let t = self.peek()?;
    if t.preceded_by_line_terminator || t.typ == TT::BraceClose || t.typ == TT::EOF {
      Ok(())
    } else {
      Err(self.unexpected(t))
    }
  }
}
