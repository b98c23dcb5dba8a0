/// A single token of a debug specification (e.g. "server:*" or "-server:http")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecToken<'a> {
    /// The glob pattern, with any exclusion prefix removed
    pub pattern: &'a str,
    /// Whether this is an exclusion pattern (prefixed with -)
    pub exclude: bool,
}

impl<'a> SpecToken<'a> {
    /// Parse a single token, trimming surrounding whitespace
    pub fn parse(s: &'a str) -> Self {
        let s = s.trim();
        match s.strip_prefix('-') {
            Some(stripped) => SpecToken {
                pattern: stripped,
                exclude: true,
            },
            None => SpecToken {
                pattern: s,
                exclude: false,
            },
        }
    }
}

/// Split a debug specification into tokens, in input order
///
/// Empty tokens are kept: they compile to patterns matching only the empty name,
/// so an empty specification enables nothing.
pub fn tokenize(spec: &str) -> Vec<SpecToken<'_>> {
    spec.split(',').map(SpecToken::parse).collect()
}
