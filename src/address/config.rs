use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::compiler::DEFAULT_SIZE_LIMIT;

/// Default cap on input length, in characters.
pub const DEFAULT_MAX_INPUT_LEN: usize = 1024;

/// Runtime options of an [`AddressParser`](super::AddressParser).
///
/// Deserializes from partial documents; missing keys take their defaults.
///
/// ```
/// use streetwise::address::ParserConfigBuilder;
///
/// let config = ParserConfigBuilder::default()
///     .max_input_len(256)
///     .build()
///     .unwrap();
/// assert!(config.uppercase_input);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct ParserConfig {
    /// Longer inputs are rejected without matching.
    pub max_input_len: usize,
    /// Upper-case input before matching so unmapped values come out
    /// upper-cased too.
    pub uppercase_input: bool,
    /// Compiled size limit for each grammar, in bytes.
    pub size_limit: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            uppercase_input: true,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}
