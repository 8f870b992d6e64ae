//! Garbage collector families and option classification

use crate::error::TuneError;
use jvm_options::JvmOption;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Garbage collector family selected for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GcType {
    #[serde(rename = "CMS")]
    Cms,

    #[serde(rename = "G1GC")]
    G1gc,
}

impl GcType {
    /// Resolve a configured collector name, ignoring case
    pub fn lookup(value: &str) -> Result<Self, TuneError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CMS" => Ok(GcType::Cms),
            "G1GC" | "G1" => Ok(GcType::G1gc),
            _ => Err(TuneError::UnsupportedGcType(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GcType::Cms => "CMS",
            GcType::G1gc => "G1GC",
        }
    }

    /// Whether the young generation must be sized by hand (`-Xmn`).
    ///
    /// G1 sizes the young generation itself to meet its pause goals.
    pub fn tunes_young_gen(&self) -> bool {
        match self {
            GcType::Cms => true,
            GcType::G1gc => false,
        }
    }
}

impl fmt::Display for GcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for GcType {
    type Err = TuneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

/// Collector affinity of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcAffinity {
    /// Eligible under every collector
    Universal,

    /// Only meaningful under the given collector
    Collector(GcType),
}

impl fmt::Display for GcAffinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcAffinity::Universal => f.pad("universal"),
            GcAffinity::Collector(gc) => f.pad(gc.as_str()),
        }
    }
}

const CMS_OPTIONS: &[&str] = &[
    "-XX:+UseConcMarkSweepGC",
    "-XX:+UseParNewGC",
    "-XX:+CMSParallelRemarkEnabled",
    "-XX:SurvivorRatio",
    "-XX:MaxTenuringThreshold",
    "-XX:CMSInitiatingOccupancyFraction",
    "-XX:+UseCMSInitiatingOccupancyOnly",
    "-XX:CMSWaitDuration",
    "-XX:+CMSParallelInitialMarkEnabled",
    "-XX:+CMSEdenChunksRecordAlways",
    "-XX:+CMSClassUnloadingEnabled",
];

const G1GC_OPTIONS: &[&str] = &[
    "-XX:+UseG1GC",
    "-XX:G1RSetUpdatingPauseTimePercent",
    "-XX:MaxGCPauseMillis",
    "-XX:InitiatingHeapOccupancyPercent",
    "-XX:ParallelGCThreads",
    "-XX:ConcGCThreads",
];

/// Read-only table mapping option names to the collector they belong to.
///
/// Names not in the table are universal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcRules {
    options: HashMap<String, GcType>,
}

impl Default for GcRules {
    fn default() -> Self {
        let mut rules = Self::empty();
        rules.extend(GcType::Cms, CMS_OPTIONS.iter().copied());
        rules.extend(GcType::G1gc, G1GC_OPTIONS.iter().copied());
        rules
    }
}

impl GcRules {
    /// A table that classifies everything as universal
    pub fn empty() -> Self {
        Self {
            options: HashMap::new(),
        }
    }

    /// Tag an option name with a collector. A later tag replaces an earlier one.
    pub fn with_option(mut self, gc: GcType, name: impl Into<String>) -> Self {
        self.options.insert(name.into(), gc);
        self
    }

    pub fn extend<I, S>(&mut self, gc: GcType, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.options.insert(name.into(), gc);
        }
    }

    pub fn classify(&self, option: &JvmOption) -> GcAffinity {
        self.classify_name(option.name())
    }

    pub fn classify_name(&self, name: &str) -> GcAffinity {
        match self.options.get(name) {
            Some(gc) => GcAffinity::Collector(*gc),
            None => GcAffinity::Universal,
        }
    }

    /// Option names tagged with `gc`, sorted
    pub fn options_for(&self, gc: GcType) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .options
            .iter()
            .filter(|(_, tagged)| **tagged == gc)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
