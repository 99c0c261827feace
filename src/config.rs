/// Tokenizer configuration.
///
/// Constructed with [`Config::default`] and adjusted with the `with_*` setters, mirroring the
/// builder style used throughout this crate for multi-field construction.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Config {
    pub(crate) decode_character_references: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            decode_character_references: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `&name;`-style character references in character data and RCDATA content should be
    /// decoded into their replacement text.
    ///
    /// Character references inside attribute values are always decoded regardless of this
    /// setting, since the WHATWG tokenization algorithm itself never makes that conditional.
    ///
    /// Defaults to `true`.
    #[must_use]
    pub fn with_decode_character_references(mut self, value: bool) -> Self {
        self.decode_character_references = value;
        self
    }
}
