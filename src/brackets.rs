//! Bracket and delimiter tracking.
//!
//! A single forward pass over the token stream maintains an explicit stack
//! of unclosed frames. Because the buffer is truncated at the cursor, the
//! frames still open at end-of-buffer are exactly the frames enclosing the
//! cursor, innermost last. Unmatched closers are ignored; unmatched openers
//! are expected and are the primary signal the resolver works from.

use crate::lexer::{Keyword, Token, TokenKind, TokenStream};

/// What a `(` frame represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParenKind {
    /// A function or method invocation. `head` is the index of the token
    /// immediately before the `(`: the callee identifier, or the `)` / `]`
    /// of a chained or indexed callee.
    Call { head: usize },
    /// Grouping parentheses, `array(...)`, control-structure conditions.
    Group,
    /// A function / closure / arrow-fn parameter list, or a closure
    /// `use (...)` capture clause.
    Params,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Paren(ParenKind),
    Bracket,
    Brace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub kind: FrameKind,
    /// Token index of the opener.
    pub open: usize,
}

/// Control-structure and construct heads whose `(` is not a call the user
/// could be completing arguments for.
const NON_CALL_HEADS: &[&str] = &[
    "if", "elseif", "while", "for", "foreach", "switch", "match", "catch",
    "declare", "array", "list", "isset", "unset", "empty",
];

/// Classify a `(` at token index `at` by looking back one or two tokens.
fn classify_paren(stream: &TokenStream, tokens: &[Token], at: usize) -> ParenKind {
    if at == 0 {
        return ParenKind::Group;
    }
    let prev = &tokens[at - 1];
    match prev.kind {
        TokenKind::Ident => {
            // `function name(` is a declaration header, not a call; so is
            // the by-reference form `function &name(`.
            let mut decl = at.saturating_sub(2);
            if decl > 0
                && tokens[decl].kind == TokenKind::Other
                && stream.text(&tokens[decl]) == "&"
            {
                decl -= 1;
            }
            if decl < at - 1 && tokens[decl].kind == TokenKind::Keyword(Keyword::Function) {
                return ParenKind::Params;
            }
            let head = stream.text(prev);
            if NON_CALL_HEADS.iter().any(|h| head.eq_ignore_ascii_case(h)) {
                return ParenKind::Group;
            }
            ParenKind::Call { head: at - 1 }
        }
        TokenKind::Keyword(Keyword::Function) | TokenKind::Keyword(Keyword::Fn) => {
            ParenKind::Params
        }
        // Closure capture clause: `function () use ($x) {`.
        TokenKind::Keyword(Keyword::Use) => ParenKind::Params,
        // Chained or indexed callee: `X::y()->z(` reaches here via the
        // identifier rule; `foo()(` and `$handlers[0](` land here.
        TokenKind::CloseParen | TokenKind::CloseBracket => ParenKind::Call { head: at - 1 },
        _ => ParenKind::Group,
    }
}

/// Compute the stack of frames still open at the end of the buffer.
pub(crate) fn track(stream: &TokenStream) -> Vec<Frame> {
    let tokens = stream.tokens();
    let mut stack: Vec<Frame> = Vec::new();

    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::OpenParen => stack.push(Frame {
                kind: FrameKind::Paren(classify_paren(stream, tokens, i)),
                open: i,
            }),
            TokenKind::OpenBracket => stack.push(Frame {
                kind: FrameKind::Bracket,
                open: i,
            }),
            TokenKind::OpenBrace => stack.push(Frame {
                kind: FrameKind::Brace,
                open: i,
            }),
            TokenKind::CloseParen => {
                if matches!(
                    stack.last(),
                    Some(Frame {
                        kind: FrameKind::Paren(_),
                        ..
                    })
                ) {
                    stack.pop();
                }
            }
            TokenKind::CloseBracket => {
                if matches!(
                    stack.last(),
                    Some(Frame {
                        kind: FrameKind::Bracket,
                        ..
                    })
                ) {
                    stack.pop();
                }
            }
            TokenKind::CloseBrace => {
                if matches!(
                    stack.last(),
                    Some(Frame {
                        kind: FrameKind::Brace,
                        ..
                    })
                ) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(src: &str) -> Vec<Frame> {
        let stream = TokenStream::scan(src);
        track(&stream)
    }

    #[test]
    fn test_open_call_stays_on_stack() {
        let got = frames("<?php config('app.");
        assert_eq!(got.len(), 1);
        assert!(matches!(
            got[0].kind,
            FrameKind::Paren(ParenKind::Call { .. })
        ));
    }

    #[test]
    fn test_closed_call_is_popped() {
        assert!(frames("<?php config('app.name')").is_empty());
    }

    #[test]
    fn test_closure_body_frames() {
        let got = frames("<?php Route::get('/', function () { config('");
        let kinds: Vec<_> = got.iter().map(|f| f.kind).collect();
        assert!(matches!(kinds[0], FrameKind::Paren(ParenKind::Call { .. })));
        assert_eq!(kinds[1], FrameKind::Brace);
        assert!(matches!(kinds[2], FrameKind::Paren(ParenKind::Call { .. })));
    }

    #[test]
    fn test_declaration_paren_is_params() {
        let got = frames("<?php function handle(User ");
        assert_eq!(got[0].kind, FrameKind::Paren(ParenKind::Params));

        let got = frames("<?php $f = function ($x, ");
        assert_eq!(got[0].kind, FrameKind::Paren(ParenKind::Params));

        let got = frames("<?php $f = fn($x, ");
        assert_eq!(got[0].kind, FrameKind::Paren(ParenKind::Params));
    }

    #[test]
    fn test_by_reference_declaration_paren_is_params() {
        let got = frames("<?php function &gen(User ");
        assert_eq!(got[0].kind, FrameKind::Paren(ParenKind::Params));

        // `&` between two operands is an expression, not a declaration.
        let got = frames("<?php $m = $flags & mask(");
        assert!(matches!(
            got[0].kind,
            FrameKind::Paren(ParenKind::Call { .. })
        ));
    }

    #[test]
    fn test_control_structure_paren_is_group() {
        let got = frames("<?php if ($x ");
        assert_eq!(got[0].kind, FrameKind::Paren(ParenKind::Group));
    }

    #[test]
    fn test_unmatched_closer_is_ignored() {
        let got = frames("<?php ) ] } config('");
        assert_eq!(got.len(), 1);
        assert!(matches!(
            got[0].kind,
            FrameKind::Paren(ParenKind::Call { .. })
        ));
    }

    #[test]
    fn test_mismatched_closer_does_not_pop() {
        // `]` must not close the open call paren.
        let got = frames("<?php config(]");
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn test_deeply_nested_input_uses_explicit_stack() {
        let mut src = String::from("<?php ");
        for _ in 0..10_000 {
            src.push_str("f(");
        }
        assert_eq!(frames(&src).len(), 10_000);
    }
}
