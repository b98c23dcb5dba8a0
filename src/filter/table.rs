use super::error::FilterParseError;
use super::matcher::NameMatcher;
use super::parser::tokenize;
use serde::Serialize;

/// The compiled form of a debug specification
///
/// Built once and never mutated; a new specification produces a new table.
#[derive(Debug, Clone)]
pub struct FilterTable {
    source: String,
    includes: Vec<NameMatcher>,
    excludes: Vec<NameMatcher>,
}

/// Outcome of resolving a name, with the patterns that decided it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub name: String,
    pub enabled: bool,
    /// First include pattern that matched, if any
    pub include: Option<String>,
    /// First exclude pattern that matched; only consulted after an include hit
    pub exclude: Option<String>,
}

impl FilterTable {
    /// Compile a debug specification
    ///
    /// Fails on the first pattern that cannot be compiled rather than falling back
    /// to enabling or disabling everything.
    pub fn parse(spec: &str) -> Result<Self, FilterParseError> {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();

        for token in tokenize(spec) {
            let matcher = NameMatcher::new(token.pattern)?;
            if token.exclude {
                excludes.push(matcher);
            } else {
                includes.push(matcher);
            }
        }

        Ok(FilterTable {
            source: spec.to_string(),
            includes,
            excludes,
        })
    }

    /// Whether a logger with this name is enabled
    pub fn resolve(&self, name: &str) -> bool {
        if !self.includes.iter().any(|m| m.matches(name)) {
            return false;
        }
        !self.excludes.iter().any(|m| m.matches(name))
    }

    /// Resolve a name and report which patterns decided the outcome
    pub fn explain(&self, name: &str) -> Verdict {
        let include = self
            .includes
            .iter()
            .find(|m| m.matches(name))
            .map(|m| m.glob().to_string());

        let exclude = if include.is_some() {
            self.excludes
                .iter()
                .find(|m| m.matches(name))
                .map(|m| m.glob().to_string())
        } else {
            None
        };

        Verdict {
            name: name.to_string(),
            enabled: include.is_some() && exclude.is_none(),
            include,
            exclude,
        }
    }

    pub fn includes(&self) -> &[NameMatcher] {
        &self.includes
    }

    pub fn excludes(&self) -> &[NameMatcher] {
        &self.excludes
    }

    /// The specification text this table was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }
}
