//! Configuration for the layout resolver

/// Default maximum depth of inheritance/composition chains
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration options for layout resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Cache resolved layouts between calls
    pub cache_enabled: bool,

    /// Maximum nesting of `extends`/`compose_from` before resolution gives up
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the result cache
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Set the maximum inheritance depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert!(config.cache_enabled);
        assert_eq!(config.max_depth, 32);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ResolverConfig::new().with_cache(false).with_max_depth(4);
        assert!(!config.cache_enabled);
        assert_eq!(config.max_depth, 4);
    }
}
