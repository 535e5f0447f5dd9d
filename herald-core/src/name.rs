//! Event names and namespace prefixing.
//!
//! A dispatcher may be configured with a namespace prefix. Whether a given
//! name is looked up with the prefix applied depends on the dispatcher's
//! `auto_prefix` default and on the [`Scope`] the caller attached to the
//! name.

use std::borrow::Cow;

/// Separator placed between the namespace prefix and the raw name.
pub const PREFIX_SEPARATOR: char = ':';

/// Whether a name should be resolved with the namespace prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Follow the dispatcher's `auto_prefix` setting.
    #[default]
    Auto,
    /// Apply the prefix regardless of `auto_prefix`.
    Prefixed,
    /// Never apply the prefix.
    Unprefixed,
}

impl Scope {
    /// Decide whether the prefix applies, given the dispatcher default.
    pub fn use_prefix(self, auto_prefix: bool) -> bool {
        match self {
            Scope::Auto => auto_prefix,
            Scope::Prefixed => true,
            Scope::Unprefixed => false,
        }
    }
}

/// A raw event name together with its prefixing [`Scope`].
///
/// Plain strings convert into a name with [`Scope::Auto`]:
///
/// ```rust
/// use herald_core::{EventName, Scope};
///
/// let name: EventName<'_> = "saved".into();
/// assert_eq!(name.scope(), Scope::Auto);
/// assert_eq!(name.resolve("doc", true), "doc:saved");
/// assert_eq!(EventName::unprefixed("saved").resolve("doc", true), "saved");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName<'a> {
    raw: Cow<'a, str>,
    scope: Scope,
}

impl<'a> EventName<'a> {
    /// Create a name with an explicit scope.
    pub fn new(raw: impl Into<Cow<'a, str>>, scope: Scope) -> Self {
        Self {
            raw: raw.into(),
            scope,
        }
    }

    /// A name that always resolves with the prefix.
    pub fn prefixed(raw: impl Into<Cow<'a, str>>) -> Self {
        Self::new(raw, Scope::Prefixed)
    }

    /// A name that never resolves with the prefix.
    pub fn unprefixed(raw: impl Into<Cow<'a, str>>) -> Self {
        Self::new(raw, Scope::Unprefixed)
    }

    /// The name as supplied by the caller.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The prefixing scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Resolve against a dispatcher's prefix and `auto_prefix` default.
    pub fn resolve(&self, prefix: &str, auto_prefix: bool) -> Cow<'_, str> {
        resolve_name(&self.raw, prefix, self.scope.use_prefix(auto_prefix))
    }
}

impl<'a> From<&'a str> for EventName<'a> {
    fn from(raw: &'a str) -> Self {
        Self::new(raw, Scope::Auto)
    }
}

impl<'a> From<&'a String> for EventName<'a> {
    fn from(raw: &'a String) -> Self {
        Self::new(raw.as_str(), Scope::Auto)
    }
}

impl From<String> for EventName<'static> {
    fn from(raw: String) -> Self {
        Self::new(raw, Scope::Auto)
    }
}

/// Resolve a raw name.
///
/// The result is `"{prefix}:{raw}"` when `prefix` is non-empty and
/// `use_prefix` is set, and `raw` unchanged otherwise.
pub fn resolve_name<'a>(raw: &'a str, prefix: &str, use_prefix: bool) -> Cow<'a, str> {
    if use_prefix && !prefix.is_empty() {
        Cow::Owned(format!("{prefix}{PREFIX_SEPARATOR}{raw}"))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_applied_when_requested() {
        assert_eq!(resolve_name("x", "ns", true), "ns:x");
    }

    #[test]
    fn prefix_skipped_when_not_requested() {
        assert_eq!(resolve_name("x", "ns", false), "x");
    }

    #[test]
    fn empty_prefix_never_applies() {
        assert_eq!(resolve_name("x", "", true), "x");
        assert!(matches!(resolve_name("x", "", true), Cow::Borrowed(_)));
    }

    #[test]
    fn scope_overrides_auto_prefix() {
        assert!(Scope::Auto.use_prefix(true));
        assert!(!Scope::Auto.use_prefix(false));
        assert!(Scope::Prefixed.use_prefix(false));
        assert!(!Scope::Unprefixed.use_prefix(true));
    }

    #[test]
    fn event_name_resolution() {
        assert_eq!(EventName::from("x").resolve("ns", false), "x");
        assert_eq!(EventName::prefixed("x").resolve("ns", false), "ns:x");
        assert_eq!(
            EventName::from(String::from("x")).resolve("ns", true),
            "ns:x"
        );
    }

    #[test]
    fn raw_name_is_preserved() {
        let name = EventName::prefixed("job.done");
        assert_eq!(name.raw(), "job.done");
        assert_eq!(name.scope(), Scope::Prefixed);
    }
}
