//! Dispatcher construction settings.

/// Settings fixed when a [`Dispatcher`](crate::Dispatcher) is built.
///
/// # Example
/// ```
/// use herald_std::DispatcherConfig;
///
/// let config = DispatcherConfig::new()
///     .with_name_prefix("billing")
///     .with_auto_prefix(true);
/// assert_eq!(config.name_prefix, "billing");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Namespace prefix for scoped names. Empty disables prefixing.
    pub name_prefix: String,
    /// Whether registration and removal apply the prefix by default.
    pub auto_prefix: bool,
}

impl DispatcherConfig {
    /// Create default settings: no prefix, `auto_prefix` off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace prefix.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Set the registration default for prefixing.
    pub fn with_auto_prefix(mut self, auto_prefix: bool) -> Self {
        self.auto_prefix = auto_prefix;
        self
    }
}
