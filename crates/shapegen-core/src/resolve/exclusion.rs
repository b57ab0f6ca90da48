//! Excluded types resolve to `any` and are never parsed.

use super::chain::{Resolution, Resolved, Resolver};
use crate::error::ConfigError;
use crate::model::TargetType;
use crate::settings::Settings;
use crate::universe::TypeId;
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    ids: HashSet<String>,
    patterns: Vec<Regex>,
}

impl ExclusionFilter {
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let patterns = settings
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Regex::new(&glob_to_regex(pattern)).map_err(|source| {
                    ConfigError::InvalidExcludePattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            ids: settings.exclude.iter().cloned().collect(),
            patterns,
        })
    }

    pub fn is_excluded(&self, id: &TypeId) -> bool {
        self.ids.contains(id.as_str()) || self.patterns.iter().any(|re| re.is_match(id.as_str()))
    }
}

/// `com.acme.**` matches any depth below `com.acme`; `*` stays within one
/// `.`/`$` segment.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            '*' => out.push_str(r"[^.$]*"),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    out
}

pub fn resolver(filter: ExclusionFilter) -> Resolver {
    Resolver::new("exclusion", move |raw, _ctx| match raw.class_id() {
        Some(id) if filter.is_excluded(id) => Ok(Resolved::Type(Resolution::new(TargetType::any()))),
        _ => Ok(Resolved::Pass),
    })
}
