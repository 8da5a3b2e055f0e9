//! The data model produced by [`crate::parse`].
//!
//! These structs serialize to the camelCase JSON shape completion-item
//! providers consume: `null` fields mean "statically unresolvable", never
//! an error.

use serde::Serialize;

/// Where the cursor sits inside the current argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamContext {
    /// Zero-based index of the argument currently being typed. Always equal
    /// to `parameters.len()` of the enclosing [`CompletionContext`].
    pub index: usize,
    /// Whether the cursor is inside an array literal within the current
    /// argument.
    pub is_array: bool,
    /// Whether the cursor is at a position where a new array key is being
    /// typed (after `[` or a comma, before any `=>` for the current entry).
    pub is_key: bool,
    /// The key of the current entry when the cursor is in value position
    /// (`['name' => |`).
    pub key: Option<String>,
    /// Keys of the already-typed entries of the array, in source order.
    pub keys: Vec<String>,
}

/// The resolved completion context at the cursor.
///
/// Returned only when an enclosing unclosed call was identified; `function`
/// is therefore always present. Receiver information degrades gracefully:
/// a call on an unresolvable receiver still yields a context, with `fqn`
/// left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionContext {
    /// The receiver class name as written at the call site (an alias or a
    /// bare name), when the receiver is a static class reference or a `new`
    /// expression.
    pub class: Option<String>,
    /// The receiver's fully-qualified name, resolved through the buffer's
    /// `use` imports and variable bindings.
    pub fqn: Option<String>,
    /// The function or method being invoked.
    pub function: String,
    /// Fully-qualified name of the class whose body contains the cursor.
    pub class_definition: Option<String>,
    /// Resolved `extends` clause of that class.
    pub class_extends: Option<String>,
    /// Resolved `implements` clauses of that class, in source order.
    pub class_implements: Vec<String>,
    /// Name of the innermost named function or method whose body contains
    /// the cursor. Anonymous closures do not count.
    pub function_definition: Option<String>,
    /// Reserved extension point.
    pub additional_info: Option<String>,
    /// Position of the cursor within the argument list.
    pub param: ParamContext,
    /// Source text of the already-typed arguments, whitespace-normalized.
    /// An argument that is a single string literal is unquoted.
    pub parameters: Vec<String>,
}
