//! `use` import and `namespace` extraction.
//!
//! Builds the alias-to-fqn map from simple (`use A\B;`), aliased
//! (`use A\B as C;`), comma-separated and grouped (`use A\{B, C as D};`)
//! imports. `use function` and `use const` imports never name classes and
//! are skipped.

use crate::lexer::{Keyword, Token, TokenKind, TokenStream};
use crate::util::{short_name, trim_leading_backslash};

use super::SymbolTable;

/// Record the namespace in effect from a `namespace Foo\Bar;` statement.
/// A later declaration replaces an earlier one.
pub(super) fn read_namespace(table: &mut SymbolTable, stream: &TokenStream, i: usize) -> usize {
    let tokens = stream.tokens();
    if let Some(tok) = tokens.get(i + 1)
        && tok.kind == TokenKind::Ident
    {
        table.namespace = Some(trim_leading_backslash(stream.text(tok)).to_string());
        return i + 2;
    }
    i + 1
}

/// Parse a namespace-level `use` statement starting at the `use` keyword.
/// Returns the index just past the statement.
pub(super) fn read_use(table: &mut SymbolTable, stream: &TokenStream, i: usize) -> usize {
    let tokens = stream.tokens();
    let mut j = i + 1;

    // `use function f;` / `use const C;` import nothing we care about.
    match tokens.get(j) {
        Some(tok) if tok.kind == TokenKind::Keyword(Keyword::Function) => {
            return skip_statement(tokens, j);
        }
        Some(tok)
            if tok.kind == TokenKind::Ident
                && stream.text(tok).eq_ignore_ascii_case("const")
                && tokens.get(j + 1).map(|t| t.kind) == Some(TokenKind::Ident) =>
        {
            return skip_statement(tokens, j);
        }
        _ => {}
    }

    loop {
        let Some(tok) = tokens.get(j) else {
            return j;
        };
        if tok.kind != TokenKind::Ident {
            return skip_statement(tokens, j);
        }
        let path = trim_leading_backslash(stream.text(tok)).to_string();
        j += 1;

        if tokens.get(j).map(|t| t.kind) == Some(TokenKind::Keyword(Keyword::As)) {
            let Some(alias) = tokens.get(j + 1).filter(|t| t.kind == TokenKind::Ident) else {
                // truncated mid-alias
                return j + 1;
            };
            table.uses.insert(stream.text(alias).to_string(), path);
            j += 2;
        } else if tokens
            .get(j)
            .is_some_and(|t| t.kind == TokenKind::Other && stream.text(t) == "\\")
            && tokens.get(j + 1).map(|t| t.kind) == Some(TokenKind::OpenBrace)
        {
            // grouped import: `use App\{User, Post as P};`
            return read_group(table, stream, &path, j + 2);
        } else {
            // alias defaults to the last path segment
            table.uses.insert(short_name(&path).to_string(), path);
        }

        match tokens.get(j).map(|t| t.kind) {
            Some(TokenKind::Comma) => j += 1,
            Some(TokenKind::Semicolon) => return j + 1,
            _ => return skip_statement(tokens, j),
        }
    }
}

/// Parse the items of a grouped import, `j` pointing just past the `{`.
fn read_group(table: &mut SymbolTable, stream: &TokenStream, prefix: &str, mut j: usize) -> usize {
    let tokens = stream.tokens();
    while j < tokens.len() {
        match tokens[j].kind {
            TokenKind::CloseBrace => return skip_statement(tokens, j + 1),
            // `function` / `const` entries inside the group import nothing.
            TokenKind::Keyword(Keyword::Function) => j = skip_group_entry(tokens, j + 1),
            TokenKind::Ident
                if stream.text(&tokens[j]).eq_ignore_ascii_case("const")
                    && tokens.get(j + 1).map(|t| t.kind) == Some(TokenKind::Ident) =>
            {
                j = skip_group_entry(tokens, j + 1);
            }
            TokenKind::Ident => {
                let fqn = format!("{}\\{}", prefix, stream.text(&tokens[j]));
                j += 1;
                if tokens.get(j).map(|t| t.kind) == Some(TokenKind::Keyword(Keyword::As))
                    && let Some(alias) = tokens.get(j + 1).filter(|t| t.kind == TokenKind::Ident)
                {
                    table.uses.insert(stream.text(alias).to_string(), fqn);
                    j += 2;
                } else {
                    table.uses.insert(short_name(&fqn).to_string(), fqn);
                }
            }
            _ => j += 1,
        }
    }
    j
}

/// Advance to the token just past the next `;` (or end-of-buffer).
fn skip_statement(tokens: &[Token], mut j: usize) -> usize {
    while j < tokens.len() {
        if tokens[j].kind == TokenKind::Semicolon {
            return j + 1;
        }
        j += 1;
    }
    j
}

/// Advance to the next `,` or `}` at group level.
fn skip_group_entry(tokens: &[Token], mut j: usize) -> usize {
    while j < tokens.len() {
        if matches!(tokens[j].kind, TokenKind::Comma | TokenKind::CloseBrace) {
            return j;
        }
        j += 1;
    }
    j
}
