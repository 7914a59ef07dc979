use super::lex_next;
use super::LexMode;
use super::Lexer;
use super::LexerCheckpoint;
use crate::error::SyntaxResult;
use crate::token::Token;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;
use crate::SourceType;
use tracing::trace;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Brace {
  Block,
  Object,
  // A `${` substitution; its `}` resumes the template.
  Template,
}

/// Saved tokenizer state. Restoring it is lossless.
#[derive(Clone, Debug)]
pub struct TokenizerSnapshot {
  lexer: LexerCheckpoint,
  prev: Option<Token>,
  parens: Vec<bool>,
  braces: Vec<Brace>,
  regex_allowed: bool,
  template_continue: bool,
}

/// A scanner that runs without a parser. Whether `/` starts a regular expression is decided from the previously emitted token.
///
/// If the regular expression scan fails, the `/` is rescanned as a division operator.
pub struct Tokenizer<'a> {
  lexer: Lexer<'a>,
  prev: Option<Token>,
  // For each open `(`, whether it follows `if`, `while`, `for` or `with`.
  parens: Vec<bool>,
  braces: Vec<Brace>,
  regex_allowed: bool,
  template_continue: bool,
  failed: bool,
}

impl<'a> Tokenizer<'a> {
  pub fn new(source: &'a str, source_type: SourceType) -> Tokenizer<'a> {
    Tokenizer {
      lexer: Lexer::new(source).with_html_comments(source_type == SourceType::Script),
      prev: None,
      parens: Vec::new(),
      braces: Vec::new(),
      regex_allowed: true,
      template_continue: false,
      failed: false,
    }
  }

  pub fn at_end(&self) -> bool {
    self.prev.is_some_and(|t| t.typ == TT::EOF)
  }

  pub fn snapshot(&self) -> TokenizerSnapshot {
    TokenizerSnapshot {
      lexer: self.lexer.checkpoint(),
      prev: self.prev,
      parens: self.parens.clone(),
      braces: self.braces.clone(),
      regex_allowed: self.regex_allowed,
      template_continue: self.template_continue,
    }
  }

  pub fn restore(&mut self, snapshot: TokenizerSnapshot) {
    self.lexer.apply_checkpoint(snapshot.lexer);
    self.prev = snapshot.prev;
    self.parens = snapshot.parens;
    self.braces = snapshot.braces;
    self.regex_allowed = snapshot.regex_allowed;
    self.template_continue = snapshot.template_continue;
  }

  /// Returns the next token without consuming it.
  pub fn peek(&mut self) -> SyntaxResult<Token> {
    let snapshot = self.snapshot();
    let token = self.advance();
    self.restore(snapshot);
    token
  }

  /// Scans and consumes the next token. After the end of input, keeps returning EOF.
  pub fn advance(&mut self) -> SyntaxResult<Token> {
    let token = if self.template_continue {
      lex_next(&mut self.lexer, LexMode::TemplateStrContinue)?
    } else if self.regex_allowed {
      let cp = self.lexer.checkpoint();
      match lex_next(&mut self.lexer, LexMode::SlashIsRegex) {
        Ok(t) => t,
        Err(err) => {
          self.lexer.apply_checkpoint(cp);
          let t = lex_next(&mut self.lexer, LexMode::Standard)?;
          trace!(offset = t.loc.0, code = err.typ.code(), "regex scan failed, rescanning as division");
          t
        }
      }
    } else {
      lex_next(&mut self.lexer, LexMode::Standard)?
    };
    self.observe(&token);
    Ok(token)
  }

  fn prev_is_control_keyword(&self) -> bool {
    matches!(
      self.prev.map(|t| t.typ),
      Some(TT::KeywordIf | TT::KeywordWhile | TT::KeywordFor | TT::KeywordWith)
    )
  }

  fn brace_starts_block(&self, brace: &Token) -> bool {
    let Some(prev) = self.prev else {
      return true;
    };
    match prev.typ {
      TT::Semicolon
      | TT::BraceOpen
      | TT::BraceClose
      | TT::ParenthesisClose
      | TT::EqualsChevronRight
      | TT::KeywordElse
      | TT::KeywordDo
      | TT::KeywordTry
      | TT::KeywordFinally => true,
      // A label or `case`, unless we're inside an object literal.
      TT::Colon => matches!(self.braces.last(), None | Some(Brace::Block)),
      TT::KeywordReturn | TT::KeywordYield => brace.preceded_by_line_terminator,
      _ => false,
    }
  }

  fn observe(&mut self, token: &Token) {
    self.template_continue = false;
    self.regex_allowed = match token.typ {
      TT::ParenthesisOpen => {
        self.parens.push(self.prev_is_control_keyword());
        true
      }
      TT::ParenthesisClose => self.parens.pop().unwrap_or(false),
      TT::BraceOpen => {
        let brace = if self.brace_starts_block(token) {
          Brace::Block
        } else {
          Brace::Object
        };
        self.braces.push(brace);
        true
      }
      TT::LiteralTemplatePartString => {
        self.braces.push(Brace::Template);
        true
      }
      TT::BraceClose => match self.braces.pop() {
        Some(Brace::Template) => {
          self.template_continue = true;
          false
        }
        Some(Brace::Block) => true,
        _ => false,
      },
      TT::BracketClose
      | TT::HyphenHyphen
      | TT::Identifier
      | TT::KeywordSuper
      | TT::KeywordThis
      | TT::LiteralFalse
      | TT::LiteralNull
      | TT::LiteralNumber
      | TT::LiteralRegex
      | TT::LiteralString
      | TT::LiteralTemplatePartStringEnd
      | TT::LiteralTrue
      | TT::PlusPlus => false,
      TT::KeywordAwait | TT::KeywordYield => true,
      // Contextual keywords are usually identifiers.
      t if UNRESERVED_KEYWORDS.contains(&t) => false,
      _ => true,
    };
    self.prev = Some(*token);
  }
}

impl<'a> Iterator for Tokenizer<'a> {
  type Item = SyntaxResult<Token>;

  /// Yields every token including the final EOF, then stops. Stops after the first error.
  fn next(&mut self) -> Option<Self::Item> {
    if self.at_end() || self.failed {
      return None;
    };
    let res = self.advance();
    self.failed = res.is_err();
    Some(res)
  }
}
