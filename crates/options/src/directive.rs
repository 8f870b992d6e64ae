//! Operator directive sets (exclude / upsert / inject)

use crate::option::JvmOption;
use indexmap::IndexMap;
use tracing::warn;

/// Delimiter between fragments of an exclude or upsert directive
pub const DIRECTIVE_DELIMITER: char = ',';

/// An ordered set of options keyed by name.
///
/// Lookups ignore value and commented state, so an exclude entry of
/// `-XX:NumberOfGCLogFiles` matches `-XX:NumberOfGCLogFiles=10`.
#[derive(Debug, Clone, Default)]
pub struct DirectiveSet {
    entries: IndexMap<String, JvmOption>,
}

impl DirectiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated directive string.
    ///
    /// Blank and unparseable fragments are skipped. When a name is given twice
    /// the later value wins and the entry keeps its first position.
    pub fn parse(directive: Option<&str>) -> Self {
        let mut set = Self::new();
        let Some(directive) = directive else {
            return set;
        };

        for fragment in directive.split(DIRECTIVE_DELIMITER) {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            match JvmOption::parse(fragment) {
                Some(option) => set.insert(option),
                None => warn!("Skipping unparseable JVM directive fragment: {:?}", fragment),
            }
        }

        set
    }

    pub fn insert(&mut self, option: JvmOption) {
        self.entries.insert(option.name().to_string(), option);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&JvmOption> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in directive order
    pub fn iter(&self) -> impl Iterator<Item = &JvmOption> {
        self.entries.values()
    }
}

/// Split an inject directive into raw lines.
///
/// Inject text bypasses the option grammar entirely, so commas are kept and
/// only line breaks separate entries.
pub fn inject_lines(inject: Option<&str>) -> Vec<String> {
    inject
        .map(|text| {
            text.lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.to_string())
                .collect()
        })
        .unwrap_or_default()
}
