//! Small name helpers shared across the crate.

/// The last segment of a namespaced name (`App\Models\User` -> `User`).
/// A name without separators is returned unchanged.
pub(crate) fn short_name(fqn: &str) -> &str {
    fqn.rsplit('\\').next().unwrap_or(fqn)
}

/// Strip the leading `\` of a fully-qualified reference, if present.
pub(crate) fn trim_leading_backslash(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Scalar / pseudo type hints that never name a class. These are skipped
/// when seeding variable bindings from parameter and property hints.
pub(crate) fn is_scalar_hint(hint: &str) -> bool {
    matches!(
        hint,
        "string" | "int" | "float" | "bool" | "array" | "callable" | "iterable"
            | "object" | "mixed" | "void" | "never" | "null" | "true" | "false"
            | "self" | "static" | "parent"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("App\\Models\\User"), "User");
        assert_eq!(short_name("User"), "User");
    }

    #[test]
    fn test_trim_leading_backslash() {
        assert_eq!(trim_leading_backslash("\\App\\User"), "App\\User");
        assert_eq!(trim_leading_backslash("App\\User"), "App\\User");
    }

    #[test]
    fn test_scalar_hints() {
        assert!(is_scalar_hint("string"));
        assert!(!is_scalar_hint("User"));
    }
}
