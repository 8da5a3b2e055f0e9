//! The context resolver: ties the lexer, bracket tracker, symbol table,
//! receiver resolution, and argument analysis together.

use tracing::{debug, trace};

use crate::arguments;
use crate::brackets::{self, FrameKind, ParenKind};
use crate::lexer::TokenStream;
use crate::receiver;
use crate::symbols::SymbolTable;
use crate::types::CompletionContext;

/// Resolve the completion context of a buffer truncated at the cursor.
///
/// Returns `None` when there is nothing to complete: no unclosed call
/// encloses the cursor, or the nearest enclosing frame is a statement body
/// or a parameter list rather than an argument list.
pub fn parse(buffer: &str) -> Option<CompletionContext> {
    let stream = TokenStream::scan(buffer);
    let frames = brackets::track(&stream);
    let table = SymbolTable::build(&stream);

    // Walk the open frames from the innermost outwards. Brackets and
    // grouping parens are looked through; a brace means the cursor is in
    // statement context (e.g. a closure body whose enclosing call is still
    // open), and a params frame means a declaration header is being typed.
    let mut call = None;
    for (pos, frame) in frames.iter().enumerate().rev() {
        match frame.kind {
            FrameKind::Brace => {
                trace!("cursor in statement context, nothing to complete");
                return None;
            }
            FrameKind::Paren(ParenKind::Params) => {
                trace!("cursor in a parameter list, nothing to complete");
                return None;
            }
            FrameKind::Paren(ParenKind::Group) | FrameKind::Bracket => continue,
            FrameKind::Paren(ParenKind::Call { head }) => {
                call = Some((pos, head));
                break;
            }
        }
    }
    let (pos, head) = call?;

    let callee = receiver::resolve_callee(&stream, &table, head)?;
    let analysis = arguments::analyze(&stream, frames[pos].open, &frames[pos + 1..]);

    let class = table.enclosing_class();
    let context = CompletionContext {
        class: callee.class,
        fqn: callee.fqn,
        function: callee.function,
        class_definition: class.and_then(|c| c.definition_name()),
        class_extends: class.and_then(|c| c.extends.clone()),
        class_implements: class.map(|c| c.implements.clone()).unwrap_or_default(),
        function_definition: table.enclosing_function_name().map(str::to_string),
        additional_info: None,
        param: analysis.param,
        parameters: analysis.parameters,
    };
    debug!(
        function = %context.function,
        fqn = context.fqn.as_deref().unwrap_or("-"),
        index = context.param.index,
        "resolved completion context"
    );
    Some(context)
}
