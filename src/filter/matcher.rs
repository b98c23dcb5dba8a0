use super::error::FilterParseError;
use regex::{Regex, RegexBuilder};

/// A single compiled glob pattern
///
/// The glob is translated to an anchored regular expression: literal text is
/// escaped and every `*` becomes `.*`.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    glob: String,
    regex: Regex,
}

impl NameMatcher {
    /// Compile a glob pattern into a matcher
    pub fn new(glob: &str) -> Result<Self, FilterParseError> {
        let source = glob_to_regex(glob);
        let regex = RegexBuilder::new(&source)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| FilterParseError::InvalidPattern {
                pattern: glob.to_string(),
                source,
            })?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// Whether the whole of `name` matches this pattern
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The glob this matcher was compiled from
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// The anchored regular expression backing this matcher
    pub fn regex_source(&self) -> &str {
        self.regex.as_str()
    }
}

/// Translate a glob into an anchored regular expression source
fn glob_to_regex(glob: &str) -> String {
    let escaped = regex::escape(glob).replace(r"\*", ".*");
    format!("^{escaped}$")
}
