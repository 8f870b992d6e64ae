//! Result of a tuning run

use jvm_options::JvmOption;
use serde::{Deserialize, Serialize};

/// Which lines a consumer wants back when re-parsing the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Every parseable line, commented or not
    All,

    /// Only lines that will be passed to the JVM
    ActiveOnly,
}

/// The two ordered option buckets produced by the tuner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunedOptions {
    /// General options, upserts, heap flags and injected lines
    #[serde(rename = "configuredJVMOptions")]
    pub jvm_options: Vec<String>,

    /// Options from the version specific template, including GC selection
    #[serde(rename = "configuredJVMVersionOptions")]
    pub jvm_version_options: Vec<String>,

    /// Number of injected lines at the end of `jvm_options`
    #[serde(skip)]
    pub injected_lines: usize,
}

impl TunedOptions {
    /// Re-parse the general bucket
    pub fn options(&self, filter: Filter) -> Vec<JvmOption> {
        parse_lines(&self.jvm_options, filter)
    }

    /// Re-parse the version specific bucket
    pub fn version_options(&self, filter: Filter) -> Vec<JvmOption> {
        parse_lines(&self.jvm_version_options, filter)
    }

    /// Lines of the general bucket, dropping commented ones when asked to.
    ///
    /// Unlike [`TunedOptions::options`] this keeps injected text that is not
    /// a single option. Injected lines are never filtered.
    pub fn option_lines(&self, filter: Filter) -> Vec<&str> {
        let split = self.jvm_options.len().saturating_sub(self.injected_lines);
        let (tuned, injected) = self.jvm_options.split_at(split);
        let mut lines = filter_lines(tuned, filter);
        lines.extend(injected.iter().map(String::as_str));
        lines
    }

    /// Lines of the version specific bucket, dropping commented ones when asked to
    pub fn version_option_lines(&self, filter: Filter) -> Vec<&str> {
        filter_lines(&self.jvm_version_options, filter)
    }
}

fn filter_lines(lines: &[String], filter: Filter) -> Vec<&str> {
    lines
        .iter()
        .map(String::as_str)
        .filter(|line| match filter {
            Filter::All => true,
            Filter::ActiveOnly => JvmOption::parse(line).map_or(true, |o| o.is_active()),
        })
        .collect()
}

fn parse_lines(lines: &[String], filter: Filter) -> Vec<JvmOption> {
    lines
        .iter()
        .filter_map(|line| JvmOption::parse(line))
        .filter(|option| filter == Filter::All || option.is_active())
        .collect()
}
