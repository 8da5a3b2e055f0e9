//! Function and closure headers, parameter bindings, and assignments.

use std::collections::HashMap;

use crate::lexer::{Keyword, TokenKind, TokenStream};
use crate::util::is_scalar_hint;

use super::{BraceKind, Scope, SymbolTable};

/// Visibility modifiers that promote a constructor parameter to a property.
const PROMOTION_MODIFIERS: &[&str] = &["public", "protected", "private", "readonly"];

/// The outcome of scanning a parameter list.
pub(super) struct ParamList {
    /// `$name` to resolved fqn, from typed parameters.
    bindings: HashMap<String, Option<String>>,
    /// Promoted constructor properties (name without `$`, resolved fqn).
    promoted: Vec<(String, String)>,
    /// Index just past the closing `)`, or end-of-buffer.
    end: usize,
}

/// Parse a function-like declaration starting at the `function` keyword:
/// a named function or method (opens a named scope), or an anonymous
/// closure (opens an unnamed scope, optionally seeded by a `use (...)`
/// capture clause). A header truncated by the cursor opens no scope.
pub(super) fn read_function(
    table: &mut SymbolTable,
    braces: &mut Vec<BraceKind>,
    stream: &TokenStream,
    i: usize,
) -> usize {
    let tokens = stream.tokens();
    let mut j = i + 1;

    // by-reference return: `function &name()`
    if tokens
        .get(j)
        .is_some_and(|t| t.kind == TokenKind::Other && stream.text(t) == "&")
    {
        j += 1;
    }

    match tokens.get(j).map(|t| t.kind) {
        Some(TokenKind::Ident) => {
            let name = stream.text(&tokens[j]).to_string();
            j += 1;
            if tokens.get(j).map(|t| t.kind) != Some(TokenKind::OpenParen) {
                return j;
            }
            let params = read_param_list(table, stream, j);
            j = params.end;
            // Skip return-type tokens until the body opens; an abstract or
            // interface signature ends at `;` and opens no scope.
            while j < tokens.len() {
                match tokens[j].kind {
                    TokenKind::OpenBrace => {
                        if name.eq_ignore_ascii_case("__construct")
                            && let Some(class) = table.classes.last_mut()
                        {
                            for (prop, fqn) in &params.promoted {
                                class.properties.insert(prop.clone(), fqn.clone());
                            }
                        }
                        table.scopes.push(Scope {
                            name: Some(name),
                            vars: params.bindings,
                        });
                        braces.push(BraceKind::Function);
                        return j + 1;
                    }
                    TokenKind::Semicolon => return j + 1,
                    _ => j += 1,
                }
            }
            j
        }
        Some(TokenKind::OpenParen) => {
            let params = read_param_list(table, stream, j);
            j = params.end;
            let mut vars = params.bindings;

            // `use ($a, &$b)` copies the captured variables' bindings from
            // the defining scope; without it nothing propagates.
            if tokens.get(j).map(|t| t.kind) == Some(TokenKind::Keyword(Keyword::Use))
                && tokens.get(j + 1).map(|t| t.kind) == Some(TokenKind::OpenParen)
            {
                j += 2;
                while j < tokens.len() {
                    match tokens[j].kind {
                        TokenKind::Variable => {
                            let var = stream.text(&tokens[j]);
                            if let Some(bound) = table.lookup_variable(var) {
                                vars.insert(var.to_string(), Some(bound));
                            }
                            j += 1;
                        }
                        TokenKind::CloseParen => {
                            j += 1;
                            break;
                        }
                        _ => j += 1,
                    }
                }
            }

            while j < tokens.len() {
                match tokens[j].kind {
                    TokenKind::OpenBrace => {
                        table.scopes.push(Scope { name: None, vars });
                        braces.push(BraceKind::Function);
                        return j + 1;
                    }
                    TokenKind::Semicolon => return j + 1,
                    _ => j += 1,
                }
            }
            j
        }
        _ => i + 1,
    }
}

/// Parse an arrow function header starting at the `fn` keyword.
///
/// Arrow functions have expression bodies and no brace-delimited scope;
/// their typed parameters bind into the enclosing scope.
pub(super) fn read_arrow_fn(table: &mut SymbolTable, stream: &TokenStream, i: usize) -> usize {
    let tokens = stream.tokens();
    if tokens.get(i + 1).map(|t| t.kind) != Some(TokenKind::OpenParen) {
        return i + 1;
    }
    let params = read_param_list(table, stream, i + 1);
    if let Some(scope) = table.scopes.last_mut() {
        scope.vars.extend(params.bindings);
    }
    params.end
}

/// Record a `$var = ...` assignment. `i` points at the variable.
///
/// `new Fqn(...)` and static-factory `Fqn::method(...)` right-hand sides
/// bind the variable's type; any other right-hand side overwrites the
/// binding with unknown. The most recent assignment wins.
pub(super) fn read_assignment(table: &mut SymbolTable, stream: &TokenStream, i: usize) -> usize {
    let tokens = stream.tokens();
    let name = stream.text(&tokens[i]).to_string();
    let k = i + 2;

    let binding = match tokens.get(k).map(|t| t.kind) {
        Some(TokenKind::Keyword(Keyword::New)) => tokens
            .get(k + 1)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| table.resolve_class_name(stream.text(t))),
        Some(TokenKind::Ident)
            if tokens.get(k + 1).map(|t| t.kind) == Some(TokenKind::DoubleColon)
                && tokens.get(k + 2).map(|t| t.kind) == Some(TokenKind::Ident)
                && tokens.get(k + 3).map(|t| t.kind) == Some(TokenKind::OpenParen) =>
        {
            Some(table.resolve_class_name(stream.text(&tokens[k])))
        }
        _ => None,
    };

    if let Some(scope) = table.scopes.last_mut() {
        scope.vars.insert(name, binding);
    }
    i + 2
}

/// Scan a parameter list, `open` pointing at the `(`.
///
/// A binding is recorded for each parameter whose nearest preceding hint
/// is a single class-like identifier (`User $user`, `?User $user`). Union
/// and intersection hints (`A|B`, `A&B`) bind nothing; `&$x` is a
/// by-reference marker, not an intersection.
fn read_param_list(table: &SymbolTable, stream: &TokenStream, open: usize) -> ParamList {
    let tokens = stream.tokens();
    let mut bindings = HashMap::new();
    let mut promoted = Vec::new();
    let mut depth = 1usize;
    let mut hint: Option<&str> = None;
    let mut poisoned = false;
    let mut promote = false;

    let mut j = open + 1;
    while j < tokens.len() {
        let tok = &tokens[j];
        match tok.kind {
            TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return ParamList {
                        bindings,
                        promoted,
                        end: j + 1,
                    };
                }
            }
            TokenKind::Comma if depth == 1 => {
                hint = None;
                poisoned = false;
                promote = false;
            }
            TokenKind::Ident if depth == 1 => {
                let text = stream.text(tok);
                if PROMOTION_MODIFIERS.contains(&text) {
                    promote = true;
                } else {
                    hint = Some(text);
                }
            }
            TokenKind::Other if depth == 1 => match stream.text(tok) {
                "|" => poisoned = true,
                "&" if tokens.get(j + 1).map(|t| t.kind) == Some(TokenKind::Ident) => {
                    poisoned = true
                }
                _ => {}
            },
            TokenKind::Variable if depth == 1 => {
                if let Some(h) = hint
                    && !poisoned
                    && !is_scalar_hint(h)
                {
                    let fqn = table.resolve_class_name(h);
                    if promote {
                        promoted.push((
                            stream.text(tok).trim_start_matches('$').to_string(),
                            fqn.clone(),
                        ));
                    }
                    bindings.insert(stream.text(tok).to_string(), Some(fqn));
                }
                hint = None;
            }
            _ => {}
        }
        j += 1;
    }

    ParamList {
        bindings,
        promoted,
        end: j,
    }
}
