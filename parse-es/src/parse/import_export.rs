use super::expr::pat::is_valid_pattern_identifier;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportName;
use crate::ast::import_export::ImportNames;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::ExportDefaultExprStmt;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// A ModuleItem: an import, an export, or anything allowed in a statement list.
  pub fn module_item(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    match self.peek_with_mode(LexMode::SlashIsRegex)?.typ {
      TT::KeywordImport => Ok(self.import_stmt(ctx)?.into_wrapped()),
      TT::KeywordExport => self.export_stmt(ctx),
      _ => self.stmt_list_item(ctx),
    }
  }

  fn module_specifier(&mut self, ctx: ParseCtx) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    self.string_value(ctx, t)
  }

  /// `from "module"`.
  fn from_clause(&mut self, ctx: ParseCtx) -> SyntaxResult<String> {
    self.require(TT::KeywordFrom)?;
    self.module_specifier(ctx)
  }

  /// An IdentifierName, which includes reserved words, e.g. `default` in `export {a as default}`.
  fn module_export_name(&mut self) -> SyntaxResult<String> {
    let t = self.consume()?;
    if !t.typ.is_identifier_name() {
      return Err(self.unexpected(t));
    };
    self.identifier_name(t)
  }

  fn binding_pat_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<PatDecl>> {
    let id = self.id_pat(ctx)?;
    let loc = id.loc;
    Ok(self.node(loc, PatDecl {
      pat: id.wrap(Pat::Id),
    }))
  }

  /// Parses `a`, `a as b` or `if as b` inside `import { ... }`. A reserved word must be renamed.
  fn import_name(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ImportName>> {
    self.with_loc(|p| {
      let t = p.peek()?;
      if is_valid_pattern_identifier(t.typ, ctx) {
        let (_, next) = p.peek_2()?;
        if next.typ != TT::KeywordAs {
          let alias = p.binding_pat_decl(ctx)?;
          let importable = match &*alias.stx.pat.stx {
            Pat::Id(id) => id.stx.name.clone(),
            _ => return Err(p.unexpected(t)),
          };
          return Ok(ImportName { importable, alias });
        };
      };
      let importable = p.module_export_name()?;
      p.require(TT::KeywordAs)?;
      let alias = p.binding_pat_decl(ctx)?;
      Ok(ImportName { importable, alias })
    })
  }

  /// One of:
  /// - `import "module";`
  /// - `import a from "module";`
  /// - `import a, * as b from "module";`
  /// - `import a, { b, c as d } from "module";`
  /// - `import * as b from "module";`
  /// - `import { b, c as d } from "module";`
  pub fn import_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ImportStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      if p.peek()?.typ == TT::LiteralString {
        let module = p.module_specifier(ctx)?;
        p.consume_semicolon()?;
        return Ok(ImportStmt {
          default: None,
          names: None,
          module,
        });
      };
      let default = if is_valid_pattern_identifier(p.peek()?.typ, ctx) {
        let default = p.binding_pat_decl(ctx)?;
        if p.peek()?.typ != TT::Comma {
          let module = p.from_clause(ctx)?;
          p.consume_semicolon()?;
          return Ok(ImportStmt {
            default: Some(default),
            names: None,
            module,
          });
        };
        p.require(TT::Comma)?;
        Some(default)
      } else {
        None
      };
      let t = p.peek()?;
      let names = match t.typ {
        TT::Asterisk => {
          p.consume()?;
          p.require(TT::KeywordAs)?;
          ImportNames::All(p.binding_pat_decl(ctx)?)
        }
        TT::BraceOpen => {
          p.consume()?;
          let mut names = Vec::new();
          while !p.consume_if(TT::BraceClose)?.is_match() {
            names.push(p.import_name(ctx)?);
            if !p.consume_if(TT::Comma)?.is_match() {
              p.require(TT::BraceClose)?;
              break;
            };
          }
          ImportNames::Specific(names)
        }
        _ => return Err(p.unexpected(t)),
      };
      let module = p.from_clause(ctx)?;
      p.consume_semicolon()?;
      Ok(ImportStmt {
        default,
        names: Some(names),
        module,
      })
    })
  }

  /// `export * from "module"`, `export { a, b as c }` or `export { a, b as c } from "module"`.
  pub fn export_list_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExportListStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      if p.consume_if(TT::Asterisk)?.is_match() {
        let from = p.from_clause(ctx)?;
        p.consume_semicolon()?;
        return Ok(ExportListStmt {
          names: ExportNames::All,
          from: Some(from),
        });
      };
      p.require(TT::BraceOpen)?;
      let mut names = Vec::new();
      while !p.consume_if(TT::BraceClose)?.is_match() {
        names.push(p.with_loc(|p| {
          let exportable = p.module_export_name()?;
          let alias = p
            .consume_if(TT::KeywordAs)?
            .and_then(|| p.module_export_name())?;
          Ok(ExportName { exportable, alias })
        })?);
        if !p.consume_if(TT::Comma)?.is_match() {
          p.require(TT::BraceClose)?;
          break;
        };
      }
      let from = if p.peek()?.typ == TT::KeywordFrom {
        Some(p.from_clause(ctx)?)
      } else {
        None
      };
      p.consume_semicolon()?;
      Ok(ExportListStmt {
        names: ExportNames::Specific(names),
        from,
      })
    })
  }

  /// `export default` followed by a function, class, async function, or an AssignmentExpression. Anonymous functions and classes bind `*default*`.
  fn export_default(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let start = self.checkpoint();
    self.require(TT::KeywordExport)?;
    self.require(TT::KeywordDefault)?;
    let (t, next) = self.peek_2()?;
    let is_async_func = t.typ == TT::KeywordAsync
      && next.typ == TT::KeywordFunction
      && !next.preceded_by_line_terminator;
    if t.typ == TT::KeywordFunction || is_async_func {
      let mut decl = *self.func_decl(ctx, true, !is_async_func, is_async_func)?.stx;
      decl.export = true;
      return Ok(self.finish(&start, decl).into_wrapped());
    };
    if t.typ == TT::KeywordClass {
      let mut decl = *self.class_decl(ctx, true)?.stx;
      decl.export = true;
      return Ok(self.finish(&start, decl).into_wrapped());
    };
    let expression = self.assignment_expr(ctx.with_in_allowed(true))?;
    self.consume_semicolon()?;
    Ok(
      self
        .finish(&start, ExportDefaultExprStmt { expression })
        .into_wrapped(),
    )
  }

  // https://tc39.es/ecma262/#sec-exports
  pub fn export_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let start = self.checkpoint();
    let (_, t) = self.peek_2()?;
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t.typ {
      TT::KeywordDefault => return self.export_default(ctx),
      TT::Asterisk | TT::BraceOpen => return Ok(self.export_list_stmt(ctx)?.into_wrapped()),
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => {
        self.require(TT::KeywordExport)?;
        let mut decl = *self.var_decl(ctx.with_in_allowed(true), true)?.stx;
        self.consume_semicolon()?;
        decl.export = true;
        self.finish(&start, decl).into_wrapped()
      }
      TT::KeywordFunction => {
        self.require(TT::KeywordExport)?;
        let mut decl = *self.func_decl(ctx, false, true, false)?.stx;
        decl.export = true;
        self.finish(&start, decl).into_wrapped()
      }
      TT::KeywordAsync => {
        self.require(TT::KeywordExport)?;
        let mut decl = *self.func_decl(ctx, false, false, true)?.stx;
        decl.export = true;
        self.finish(&start, decl).into_wrapped()
      }
      TT::KeywordClass => {
        self.require(TT::KeywordExport)?;
        let mut decl = *self.class_decl(ctx, false)?.stx;
        decl.export = true;
        self.finish(&start, decl).into_wrapped()
      }
      _ => return Err(self.unexpected(t)),
    };
    Ok(stmt)
  }
}
