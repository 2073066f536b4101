//! Environment lookups with the launcher's override semantics.
//!
//! Every setting resolves through the same two-step chain: the override
//! variable when set and non-empty, else the built-in default. Keeping the
//! chain in one place keeps the precedence rules auditable.

/// Value of `name`, treating an empty value as unset.
pub(crate) fn var_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Override chain: `name` when set and non-empty, else `default`.
pub(crate) fn var_or(name: &str, default: &str) -> String {
    var_nonempty(name).unwrap_or_else(|| default.to_string())
}
