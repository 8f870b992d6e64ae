//! A single JVM option line and its text grammar

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

/// Prefix that disables an option line
pub const COMMENT_MARKER: char = '#';

/// Heap flags are written with the size attached (`-Xmx12G`), never with `=`.
/// Any value is accepted so that whatever is rendered parses back.
static HEAP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#+)?(-Xm[xsn])(?:=?([^=\s]+))?$").expect("valid heap pattern")
});

static OPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#+)?(-[^=\s]+)(?:=(.*)|\s+(.+))?$").expect("valid option pattern")
});

const HEAP_FLAGS: [&str; 3] = ["-Xmx", "-Xms", "-Xmn"];

/// How a value is joined to the option name when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    /// `-Dname=value`
    Equals,

    /// `-Xmx12G`
    Attached,

    /// `-flag value`
    Space,
}

/// A tunable JVM option.
///
/// Two options are equal when their names match; value, commented state and
/// separator are ignored so that set membership checks work by name.
#[derive(Debug, Clone)]
pub struct JvmOption {
    name: String,
    value: Option<String>,
    commented: bool,
    managed: bool,
    separator: Separator,
}

impl JvmOption {
    /// Create an active, value-less option.
    ///
    /// Heap flags (`-Xmx`, `-Xms`, `-Xmn`) are marked as managed.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let managed = is_heap_flag(&name);
        Self {
            name,
            value: None,
            commented: false,
            managed,
            separator: if managed {
                Separator::Attached
            } else {
                Separator::Equals
            },
        }
    }

    /// Builder-style value setter
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    /// Builder-style commented setter
    pub fn with_commented(mut self, commented: bool) -> Self {
        self.commented = commented;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_commented(&self) -> bool {
        self.commented
    }

    pub fn is_active(&self) -> bool {
        !self.commented
    }

    /// Whether this option is a heap size flag governed by the tuner
    pub fn is_managed(&self) -> bool {
        self.managed
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// Replace the value. Empty strings are treated as no value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value.filter(|v| !v.is_empty());
    }

    pub fn set_commented(&mut self, commented: bool) {
        self.commented = commented;
    }

    /// Parse a single option line.
    ///
    /// Returns `None` for anything that is not an option: blank lines, prose
    /// comments and banners. A marker must be directly followed by the flag.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if let Some(caps) = HEAP_PATTERN.captures(line) {
            let mut option = Self::new(&caps[2]).with_commented(caps.get(1).is_some());
            option.set_value(caps.get(3).map(|m| m.as_str().to_string()));
            return Some(option);
        }

        let caps = OPTION_PATTERN.captures(line)?;
        let mut option = Self::new(&caps[2]).with_commented(caps.get(1).is_some());
        if let Some(value) = caps.get(3) {
            option.set_value(Some(value.as_str().trim().to_string()));
        } else if let Some(value) = caps.get(4) {
            option.separator = Separator::Space;
            option.set_value(Some(value.as_str().trim().to_string()));
        }
        Some(option)
    }

    /// Render the option back to a line
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for JvmOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.commented {
            write!(f, "{COMMENT_MARKER}")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(value) = &self.value {
            match self.separator {
                Separator::Equals => write!(f, "={value}")?,
                Separator::Attached => write!(f, "{value}")?,
                Separator::Space => write!(f, " {value}")?,
            }
        }
        Ok(())
    }
}

impl PartialEq for JvmOption {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for JvmOption {}

impl Hash for JvmOption {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

fn is_heap_flag(name: &str) -> bool {
    HEAP_FLAGS.contains(&name)
}
