/// Default bound on container nesting for both encoding and decoding.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Settings shared by the encoder and decoder.
///
/// The same `max_depth` governs both directions, so any tree that encodes
/// under a set of options also decodes under them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of nested containers (arrays and dicts).
    pub max_depth: usize,
    /// Indent the output with tabs, one element per line.
    pub pretty: bool,
}

impl Options {
    /// Unindented output on a single line after the prolog.
    pub const fn compact() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: true,
        }
    }
}
