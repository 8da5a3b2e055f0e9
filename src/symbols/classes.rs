//! Class header parsing and typed property declarations.

use crate::lexer::{Keyword, Token, TokenKind, TokenStream};
use crate::util::is_scalar_hint;

use super::{BraceKind, ClassContext, SymbolTable};

/// Modifiers that may precede a property's type hint.
const MEMBER_MODIFIERS: &[&str] = &["public", "protected", "private", "static", "readonly", "var"];

/// Parse a class header starting just past the `class` keyword (or, for
/// `new class`, just past both keywords). On reaching the body's `{` the
/// class is pushed onto the open-class stack; a header truncated by the
/// cursor pushes nothing, since no body encloses the cursor yet.
///
/// `extends` and `implements` clauses are accepted in either source order.
pub(super) fn read_class_header(
    table: &mut SymbolTable,
    braces: &mut Vec<BraceKind>,
    stream: &TokenStream,
    mut i: usize,
    anonymous: bool,
) -> usize {
    let tokens = stream.tokens();
    let mut class = ClassContext {
        namespace: table.namespace.clone(),
        ..ClassContext::default()
    };

    if !anonymous
        && let Some(tok) = tokens.get(i)
        && tok.kind == TokenKind::Ident
    {
        class.name = Some(stream.text(tok).to_string());
        i += 1;
    }

    // Anonymous classes may take constructor arguments: `new class($dep) ...`
    if anonymous && tokens.get(i).map(|t| t.kind) == Some(TokenKind::OpenParen) {
        i = skip_balanced_parens(tokens, i);
    }

    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::Keyword(Keyword::Extends) => {
                i += 1;
                while let Some(tok) = tokens.get(i).filter(|t| t.kind == TokenKind::Ident) {
                    let resolved = table.resolve_class_name(stream.text(tok));
                    if class.extends.is_none() {
                        class.extends = Some(resolved);
                    }
                    i += 1;
                    if tokens.get(i).map(|t| t.kind) == Some(TokenKind::Comma) {
                        i += 1;
                    } else {
                        break;
                    }
                }
            }
            TokenKind::Keyword(Keyword::Implements) => {
                i += 1;
                while let Some(tok) = tokens.get(i).filter(|t| t.kind == TokenKind::Ident) {
                    let resolved = table.resolve_class_name(stream.text(tok));
                    class.implements.push(resolved);
                    i += 1;
                    if tokens.get(i).map(|t| t.kind) == Some(TokenKind::Comma) {
                        i += 1;
                    } else {
                        break;
                    }
                }
            }
            TokenKind::OpenBrace => {
                table.classes.push(class);
                braces.push(BraceKind::Class);
                return i + 1;
            }
            // `Route::class;` style usage that slipped past the caller's
            // guard, or a stray keyword: not a declaration after all.
            TokenKind::Semicolon => return i + 1,
            _ => i += 1,
        }
    }
    i
}

/// Record a typed property declaration. `i` points at the `$name` token,
/// already known to sit directly in a class body.
///
/// `protected ?User $user;` seeds a binding for later `$this->user`
/// receivers. Union and intersection hints bind nothing.
pub(super) fn read_property(table: &mut SymbolTable, stream: &TokenStream, i: usize) {
    let tokens = stream.tokens();
    let mut j = i;
    // nullable marker: `?User $user`
    if j > 0 && tokens[j - 1].kind == TokenKind::Other && stream.text(&tokens[j - 1]) == "?" {
        j -= 1;
    }
    if j == 0 || tokens[j - 1].kind != TokenKind::Ident {
        return;
    }
    let hint = stream.text(&tokens[j - 1]);
    if MEMBER_MODIFIERS.contains(&hint) || is_scalar_hint(hint) {
        return;
    }
    if j >= 2
        && tokens[j - 2].kind == TokenKind::Other
        && matches!(stream.text(&tokens[j - 2]), "|" | "&")
    {
        return;
    }
    let fqn = table.resolve_class_name(hint);
    let name = stream.text(&tokens[i]).trim_start_matches('$').to_string();
    if let Some(class) = table.classes.last_mut() {
        class.properties.insert(name, fqn);
    }
}

/// Skip a balanced `( ... )` group forward, `i` pointing at the opener.
/// Returns the index just past the matching closer, or end-of-buffer.
fn skip_balanced_parens(tokens: &[Token], i: usize) -> usize {
    let mut depth = 0usize;
    let mut j = i;
    while j < tokens.len() {
        match tokens[j].kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
        j += 1;
    }
    j
}
