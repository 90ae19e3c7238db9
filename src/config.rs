use std::sync::Arc;

use crate::message::{standard_registry, ExtensionRegistry, MAX_FRAGMENT_LEN};
use crate::Error;

/// Decoder configuration
#[derive(Debug, Clone)]
pub struct Config {
    max_fragment_len: usize,
    registry: Option<Arc<ExtensionRegistry>>,
}

impl Config {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            max_fragment_len: MAX_FRAGMENT_LEN,
            registry: None,
        }
    }

    /// Largest record fragment accepted when parsing.
    #[inline(always)]
    pub fn max_fragment_len(&self) -> usize {
        self.max_fragment_len
    }

    /// Registry used to decode ClientHello extensions.
    #[inline(always)]
    pub fn registry(&self) -> &ExtensionRegistry {
        match &self.registry {
            Some(r) => r.as_ref(),
            None => standard_registry(),
        }
    }
}

/// Builder for decoder configuration.
pub struct ConfigBuilder {
    max_fragment_len: usize,
    registry: Option<Arc<ExtensionRegistry>>,
}

impl ConfigBuilder {
    /// Set the largest record fragment accepted when parsing.
    ///
    /// Must be between 1 and 16384 (2^14).
    /// Defaults to 16384.
    pub fn max_fragment_len(mut self, len: usize) -> Self {
        self.max_fragment_len = len;
        self
    }

    /// Set the extension registry.
    ///
    /// Defaults to the standard registry.
    pub fn registry(mut self, registry: ExtensionRegistry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    /// Build the configuration.
    ///
    /// Returns `Error::ConfigError` if the fragment limit is out of range.
    pub fn build(self) -> Result<Config, Error> {
        if self.max_fragment_len == 0 || self.max_fragment_len > MAX_FRAGMENT_LEN {
            return Err(Error::ConfigError(format!(
                "max_fragment_len must be in 1..={}, got {}",
                MAX_FRAGMENT_LEN, self.max_fragment_len
            )));
        }

        Ok(Config {
            max_fragment_len: self.max_fragment_len,
            registry: self.registry,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_fragment_len: MAX_FRAGMENT_LEN,
            registry: None,
        }
    }
}
