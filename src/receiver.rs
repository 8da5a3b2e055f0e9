//! Receiver resolution for the enclosing call.
//!
//! Given the call's head token (the token immediately before its `(`),
//! these helpers work out what is being invoked and on what. All walking
//! is over the elided token stream, so whitespace and comments between the
//! receiver, the operator, and the name are already gone.
//!
//! Recognized head shapes:
//!
//! | Source                      | function      | receiver                |
//! |-----------------------------|---------------|-------------------------|
//! | `config(`                   | `config`      | none                    |
//! | `Route::get(`               | `get`         | `Route`                 |
//! | `$user->find(`              | `find`        | `$user` binding         |
//! | `$this->where(`             | `where`       | enclosing class         |
//! | `$this->user->where(`       | `where`       | typed property `user`   |
//! | `self::make(`               | `make`        | enclosing class         |
//! | `parent::boot(`             | `boot`        | enclosing `extends`     |
//! | `new User(`                 | `__construct` | `User`                  |
//! | `X::y()->z(`                | `z`           | `X` (factory heuristic) |
//! | `(new Foo())->save(`        | `save`        | `Foo`                   |

use crate::lexer::{Keyword, Token, TokenKind, TokenStream};
use crate::symbols::SymbolTable;
use crate::util::short_name;

/// What the cursor's enclosing call invokes.
pub(crate) struct Callee {
    /// Receiver class name as written, for static and `new` receivers.
    pub class: Option<String>,
    /// Resolved fully-qualified receiver type.
    pub fqn: Option<String>,
    pub function: String,
}

/// Resolve the callee of the call whose head token index is `head`.
///
/// Returns `None` when no function name can be identified (for example an
/// immediately-invoked expression, `foo()(`), in which case there is
/// nothing to complete.
pub(crate) fn resolve_callee(
    stream: &TokenStream,
    table: &SymbolTable,
    head: usize,
) -> Option<Callee> {
    let tokens = stream.tokens();
    let head_tok = tokens.get(head)?;
    if head_tok.kind != TokenKind::Ident {
        return None;
    }
    let name = stream.text(head_tok);

    match head.checked_sub(1).map(|p| tokens[p].kind) {
        Some(TokenKind::Keyword(Keyword::New)) => Some(Callee {
            class: Some(name.to_string()),
            fqn: Some(table.resolve_class_name(name)),
            function: "__construct".to_string(),
        }),
        Some(
            TokenKind::DoubleColon | TokenKind::Arrow | TokenKind::NullsafeArrow,
        ) => {
            let (class, fqn) = resolve_receiver(stream, table, head - 1);
            Some(Callee {
                class,
                fqn,
                function: name.to_string(),
            })
        }
        // A bare (possibly namespaced) function call: `config(`, `\app(`.
        _ => Some(Callee {
            class: None,
            fqn: None,
            function: short_name(name).to_string(),
        }),
    }
}

/// Resolve the receiver expression ending at the access operator at token
/// index `op`. Unresolvable receivers degrade to `(None, None)`.
fn resolve_receiver(
    stream: &TokenStream,
    table: &SymbolTable,
    op: usize,
) -> (Option<String>, Option<String>) {
    let tokens = stream.tokens();
    let Some(r) = op.checked_sub(1) else {
        return (None, None);
    };
    match tokens[r].kind {
        TokenKind::Ident => {
            // One property hop: `$this->user->where(`.
            if r >= 2
                && matches!(tokens[r - 1].kind, TokenKind::Arrow | TokenKind::NullsafeArrow)
                && tokens[r - 2].kind == TokenKind::Variable
            {
                if stream.text(&tokens[r - 2]) == "$this" {
                    return (None, table.property_type(stream.text(&tokens[r])));
                }
                return (None, None);
            }
            let name = stream.text(&tokens[r]);
            match name {
                "self" | "static" => (None, table.enclosing_class_fqn()),
                "parent" => (
                    None,
                    table.enclosing_class().and_then(|c| c.extends.clone()),
                ),
                _ => (
                    Some(name.to_string()),
                    Some(table.resolve_class_name(name)),
                ),
            }
        }
        TokenKind::Variable => {
            let var = stream.text(&tokens[r]);
            if var == "$this" {
                (None, table.enclosing_class_fqn())
            } else {
                (None, table.lookup_variable(var))
            }
        }
        // Chained call: the receiver is the result of the preceding call.
        TokenKind::CloseParen => (None, resolve_chain_origin(stream, table, r)),
        _ => (None, None),
    }
}

/// Resolve the static type of a call chain by walking back to its origin.
///
/// `close` is the token index of the `)` ending the link nearest the
/// cursor. The origin's type propagates through the chain under the
/// static-factory heuristic: `X::y()->z(` treats `X::y()` as returning
/// `X`'s own type. Origins that are bare function calls, index
/// expressions, or dynamic values stay unresolved.
fn resolve_chain_origin(
    stream: &TokenStream,
    table: &SymbolTable,
    mut close: usize,
) -> Option<String> {
    let tokens = stream.tokens();
    loop {
        let open = matching_open_paren(tokens, close)?;

        // Parenthesized instantiation: `(new Foo(...))->`.
        if tokens.get(open + 1).map(|t| t.kind) == Some(TokenKind::Keyword(Keyword::New))
            && let Some(name) = tokens.get(open + 2).filter(|t| t.kind == TokenKind::Ident)
        {
            return Some(table.resolve_class_name(stream.text(name)));
        }

        let h = open.checked_sub(1)?;
        if tokens[h].kind != TokenKind::Ident {
            return None;
        }

        let Some(p) = h.checked_sub(1) else {
            // Origin is a bare function call: statically unresolvable.
            return None;
        };
        match tokens[p].kind {
            // `new Foo()->` (PHP 8.4 instantiation access).
            TokenKind::Keyword(Keyword::New) => {
                return Some(table.resolve_class_name(stream.text(&tokens[h])));
            }
            // `Cls::factory()->`: the static-factory heuristic.
            TokenKind::DoubleColon => {
                let c = p.checked_sub(1)?;
                if tokens[c].kind != TokenKind::Ident {
                    return None;
                }
                return match stream.text(&tokens[c]) {
                    "self" | "static" => table.enclosing_class_fqn(),
                    "parent" => table.enclosing_class().and_then(|cl| cl.extends.clone()),
                    name => Some(table.resolve_class_name(name)),
                };
            }
            TokenKind::Arrow | TokenKind::NullsafeArrow => {
                let c = p.checked_sub(1)?;
                match tokens[c].kind {
                    // `$user->where()->`: propagate the variable's binding.
                    TokenKind::Variable => return table.lookup_variable(stream.text(&tokens[c])),
                    // `$this->user->where()->`: one property hop.
                    TokenKind::Ident => {
                        if c >= 2
                            && matches!(
                                tokens[c - 1].kind,
                                TokenKind::Arrow | TokenKind::NullsafeArrow
                            )
                            && tokens[c - 2].kind == TokenKind::Variable
                            && stream.text(&tokens[c - 2]) == "$this"
                        {
                            return table.property_type(stream.text(&tokens[c]));
                        }
                        return None;
                    }
                    // A longer chain: `a()->b()->c(` walks one link back.
                    TokenKind::CloseParen => {
                        close = c;
                    }
                    _ => return None,
                }
            }
            _ => return None,
        }
    }
}

/// Walk back from the `)` at `close` to its matching `(`, counting paren
/// tokens only. Returns `None` when the buffer never balances.
fn matching_open_paren(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = close + 1;
    while j > 0 {
        j -= 1;
        match tokens[j].kind {
            TokenKind::CloseParen => depth += 1,
            TokenKind::OpenParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }
    None
}
