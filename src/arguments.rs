//! Argument list analysis for the enclosing call.
//!
//! Re-scans the tokens between a call's `(` and the cursor, splitting the
//! already-typed arguments on top-level commas only: commas inside nested
//! parens, brackets, braces, closures, or arrow-function bodies never
//! split. Also determines the cursor's array key/value position when the
//! current argument is an array literal.

use crate::brackets::{Frame, FrameKind};
use crate::lexer::{TokenKind, TokenStream};
use crate::types::ParamContext;

pub(crate) struct ArgumentAnalysis {
    /// Already-typed arguments as normalized source strings. The argument
    /// currently being typed is not included.
    pub parameters: Vec<String>,
    pub param: ParamContext,
}

/// Analyze the argument list of the call whose `(` sits at token index
/// `call_open`. `frames_above` are the frames still open above the call
/// frame at the cursor (innermost last); any unclosed `[` among them
/// belongs to the argument currently being typed.
pub(crate) fn analyze(
    stream: &TokenStream,
    call_open: usize,
    frames_above: &[Frame],
) -> ArgumentAnalysis {
    let tokens = stream.tokens();

    let mut parameters = Vec::new();
    let mut depth = 0usize;
    let mut seg_start = call_open + 1;
    for (i, tok) in tokens.iter().enumerate().skip(call_open + 1) {
        match tok.kind {
            TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                depth = depth.saturating_sub(1);
            }
            TokenKind::Comma if depth == 0 => {
                parameters.push(render_segment(stream, seg_start, i));
                seg_start = i + 1;
            }
            _ => {}
        }
    }

    let mut param = ParamContext {
        index: parameters.len(),
        ..ParamContext::default()
    };

    // The key/value position is evaluated against the outermost unclosed
    // `[` above the call; deeper frames put the cursor in value position.
    // Subscript brackets (`$data[`, `foo()[`) are not array literals and
    // carry no key/value state.
    if let Some(array) = frames_above
        .iter()
        .find(|f| f.kind == FrameKind::Bracket && is_literal_bracket(stream, f.open))
    {
        param.is_array = true;
        let at_top_level = frames_above.last().map(|f| f.open) == Some(array.open);

        let mut entry_start = array.open + 1;
        let mut depth = 0usize;
        for (i, tok) in tokens.iter().enumerate().skip(array.open + 1) {
            match tok.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Comma if depth == 0 => {
                    // A completed entry contributes its leading string
                    // literal, keyed or not, to `keys`.
                    if let Some(first) = tokens.get(entry_start).filter(|t| t.kind == TokenKind::Str)
                    {
                        param.keys.push(stream.string_contents(first));
                    }
                    entry_start = i + 1;
                }
                _ => {}
            }
        }

        // The current entry: a top-level `=>` already typed puts the cursor
        // in value position and names the key; otherwise a new key is being
        // typed, unless the cursor is nested inside a deeper frame.
        let mut depth = 0usize;
        let mut has_arrow = false;
        for tok in &tokens[entry_start..] {
            match tok.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::DoubleArrow if depth == 0 => has_arrow = true,
                _ => {}
            }
        }
        if has_arrow {
            param.key = tokens
                .get(entry_start)
                .filter(|t| t.kind == TokenKind::Str)
                .map(|t| stream.string_contents(t));
        } else {
            param.is_key = at_top_level;
        }
    }

    ArgumentAnalysis { parameters, param }
}

/// Whether the `[` at token index `open` starts an array literal. A `[`
/// directly after a variable, an identifier, or a closed group is a
/// subscript on that expression instead.
fn is_literal_bracket(stream: &TokenStream, open: usize) -> bool {
    let tokens = stream.tokens();
    let Some(p) = open.checked_sub(1) else {
        return true;
    };
    !matches!(
        tokens[p].kind,
        TokenKind::Variable
            | TokenKind::Ident
            | TokenKind::Str
            | TokenKind::CloseParen
            | TokenKind::CloseBracket
    )
}

/// Render the tokens of one argument as normalized source text.
///
/// Tokens are re-joined with no whitespace except a single space between
/// two word-like tokens, so a multi-line closure renders as
/// `function($thing){return $thing;}`. An argument that is exactly one
/// string literal renders as its unquoted contents.
fn render_segment(stream: &TokenStream, start: usize, end: usize) -> String {
    let tokens = &stream.tokens()[start..end];
    if let [only] = tokens
        && only.kind == TokenKind::Str
    {
        return stream.string_contents(only);
    }
    let mut out = String::new();
    let mut prev_wordlike = false;
    for tok in tokens {
        let wordlike = matches!(
            tok.kind,
            TokenKind::Ident | TokenKind::Keyword(_) | TokenKind::Variable | TokenKind::Number
        );
        if prev_wordlike && wordlike {
            out.push(' ');
        }
        out.push_str(stream.text(tok));
        prev_wordlike = wordlike;
    }
    out
}
