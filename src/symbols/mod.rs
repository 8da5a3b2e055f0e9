//! Scope and symbol table construction.
//!
//! A single forward walk over the token stream collects everything the
//! resolver needs to know about the cursor's surroundings: the `use` import
//! map, the stack of class bodies and function scopes still open at the
//! cursor, and the variable-to-type bindings visible there. Because the
//! buffer is truncated at the cursor, the walker's state at end-of-buffer
//! *is* the state at the cursor; no backward scanning is needed.
//!
//! Sub-modules:
//! - [`use_statements`]: `use` import and `namespace` extraction
//! - [`classes`]: class headers and typed property declarations
//! - [`functions`]: function/closure headers, parameter bindings, assignments

mod classes;
mod functions;
mod use_statements;

use std::collections::HashMap;

use crate::lexer::{Keyword, TokenKind, TokenStream};
use crate::util::trim_leading_backslash;

/// Metadata of a `class ... { ... }` body enclosing the cursor.
#[derive(Debug, Default)]
pub(crate) struct ClassContext {
    /// `None` for anonymous classes.
    pub name: Option<String>,
    /// Namespace in effect when the class was declared.
    pub namespace: Option<String>,
    /// Resolved parent class.
    pub extends: Option<String>,
    /// Resolved interfaces, in source order.
    pub implements: Vec<String>,
    /// Typed property name (without `$`) to resolved fqn.
    pub properties: HashMap<String, String>,
}

impl ClassContext {
    /// The class's own fully-qualified name, or `None` when anonymous.
    pub(crate) fn definition_name(&self) -> Option<String> {
        let name = self.name.as_ref()?;
        Some(match &self.namespace {
            Some(ns) => format!("{}\\{}", ns, name),
            None => name.clone(),
        })
    }
}

/// A function-like scope. Variable bindings record `None` when an
/// assignment made the type unknown, shadowing any earlier binding.
#[derive(Debug, Default)]
pub(crate) struct Scope {
    /// `None` for closures and for the implicit top-level scope.
    pub name: Option<String>,
    pub vars: HashMap<String, Option<String>>,
}

/// What an open `{` belongs to, so the matching `}` pops the right stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BraceKind {
    Class,
    Function,
    Other,
}

pub(crate) struct SymbolTable {
    /// Import alias to fully-qualified name; last declaration wins.
    pub(crate) uses: HashMap<String, String>,
    pub(crate) namespace: Option<String>,
    pub(super) classes: Vec<ClassContext>,
    pub(super) scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Walk the whole token stream once and return the state at the cursor.
    pub(crate) fn build(stream: &TokenStream) -> SymbolTable {
        let mut table = SymbolTable {
            uses: HashMap::new(),
            namespace: None,
            classes: Vec::new(),
            scopes: vec![Scope::default()],
        };
        let mut braces: Vec<BraceKind> = Vec::new();
        let tokens = stream.tokens();

        let mut i = 0;
        while i < tokens.len() {
            match tokens[i].kind {
                TokenKind::Keyword(Keyword::Namespace) => {
                    i = use_statements::read_namespace(&mut table, stream, i);
                }
                TokenKind::Keyword(Keyword::Use) => {
                    // Only namespace-level `use` statements import names;
                    // trait `use` inside a class body does not.
                    if braces.iter().all(|b| *b == BraceKind::Other) {
                        i = use_statements::read_use(&mut table, stream, i);
                    } else {
                        i += 1;
                    }
                }
                TokenKind::Keyword(Keyword::Class) => {
                    // `Foo::class` is a constant, not a declaration.
                    if i > 0 && tokens[i - 1].kind == TokenKind::DoubleColon {
                        i += 1;
                    } else {
                        i = classes::read_class_header(
                            &mut table, &mut braces, stream, i + 1, false,
                        );
                    }
                }
                TokenKind::Keyword(Keyword::New)
                    if tokens.get(i + 1).map(|t| t.kind)
                        == Some(TokenKind::Keyword(Keyword::Class)) =>
                {
                    i = classes::read_class_header(&mut table, &mut braces, stream, i + 2, true);
                }
                TokenKind::Keyword(Keyword::Function) => {
                    i = functions::read_function(&mut table, &mut braces, stream, i);
                }
                TokenKind::Keyword(Keyword::Fn) => {
                    i = functions::read_arrow_fn(&mut table, stream, i);
                }
                TokenKind::Variable => {
                    if braces.last() == Some(&BraceKind::Class) {
                        // `protected User $user;` at class-body level
                        classes::read_property(&mut table, stream, i);
                        i += 1;
                    } else if tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::Assign) {
                        i = functions::read_assignment(&mut table, stream, i);
                    } else {
                        i += 1;
                    }
                }
                TokenKind::OpenBrace => {
                    braces.push(BraceKind::Other);
                    i += 1;
                }
                TokenKind::CloseBrace => {
                    match braces.pop() {
                        Some(BraceKind::Class) => {
                            table.classes.pop();
                        }
                        Some(BraceKind::Function) => {
                            if table.scopes.len() > 1 {
                                table.scopes.pop();
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }

        table
    }

    /// Resolve a class name as written against the import map.
    ///
    /// A leading `\` is stripped; an exact alias match wins; otherwise a
    /// qualified name whose first segment matches an alias is expanded
    /// (`use App\Models as M;` makes `M\User` resolve to `App\Models\User`).
    /// An unmatched name is returned as written, treated as already
    /// qualified.
    pub(crate) fn resolve_class_name(&self, name: &str) -> String {
        let name = trim_leading_backslash(name);
        if let Some(fqn) = self.uses.get(name) {
            return fqn.clone();
        }
        if let Some((first, rest)) = name.split_once('\\')
            && let Some(prefix) = self.uses.get(first)
        {
            return format!("{}\\{}", prefix, rest);
        }
        name.to_string()
    }

    /// The innermost class whose body contains the cursor.
    pub(crate) fn enclosing_class(&self) -> Option<&ClassContext> {
        self.classes.last()
    }

    /// The enclosing class's own fully-qualified name.
    pub(crate) fn enclosing_class_fqn(&self) -> Option<String> {
        self.enclosing_class().and_then(|c| c.definition_name())
    }

    /// The innermost *named* function or method containing the cursor.
    pub(crate) fn enclosing_function_name(&self) -> Option<&str> {
        self.scopes.iter().rev().find_map(|s| s.name.as_deref())
    }

    /// Look up a variable's resolved type. Only the innermost scope is
    /// consulted: bindings from an outer function are not visible inside a
    /// nested closure, and closure bindings do not leak back out.
    pub(crate) fn lookup_variable(&self, var: &str) -> Option<String> {
        self.scopes
            .last()
            .and_then(|scope| scope.vars.get(var))
            .cloned()
            .flatten()
    }

    /// The resolved type of a typed property of the enclosing class, for
    /// `$this->prop` receivers.
    pub(crate) fn property_type(&self, prop: &str) -> Option<String> {
        self.enclosing_class()
            .and_then(|class| class.properties.get(prop))
            .cloned()
    }
}
