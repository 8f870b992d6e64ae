//! Merge engine resolving templates against operator directives

use crate::error::TuneResult;
use crate::gc::{GcAffinity, GcRules, GcType};
use crate::heap::{HeapFlag, HeapPolicy, HeapSizes};
use crate::result::TunedOptions;
use jvm_options::{inject_lines, DirectiveSet, JvmOption};
use std::collections::HashSet;
use tracing::{debug, info};

/// Baseline option files
#[derive(Debug, Clone, Default)]
pub struct Templates {
    /// General options (`jvm-server.options`)
    pub options: String,

    /// Version specific options (`jvm11-server.options`), holds the GC settings
    pub version_options: String,
}

impl Templates {
    pub fn new(options: impl Into<String>, version_options: impl Into<String>) -> Self {
        Self {
            options: options.into(),
            version_options: version_options.into(),
        }
    }
}

/// Operator input for one tuning run, as plain configuration strings
#[derive(Debug, Clone, Default)]
pub struct Directives {
    pub gc_type: String,
    pub exclude: Option<String>,
    pub upsert: Option<String>,
    pub inject: Option<String>,
    pub heap_new_size: Option<String>,
    pub heap_size: Option<String>,
}

impl Directives {
    pub fn new(gc_type: impl Into<String>) -> Self {
        Self {
            gc_type: gc_type.into(),
            ..Self::default()
        }
    }

    pub fn exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn upsert(mut self, upsert: impl Into<String>) -> Self {
        self.upsert = Some(upsert.into());
        self
    }

    pub fn inject(mut self, inject: impl Into<String>) -> Self {
        self.inject = Some(inject.into());
        self
    }

    pub fn heap_new_size(mut self, size: impl Into<String>) -> Self {
        self.heap_new_size = Some(size.into());
        self
    }

    pub fn heap_size(mut self, size: impl Into<String>) -> Self {
        self.heap_size = Some(size.into());
        self
    }
}

/// Stateless JVM options tuner.
///
/// Holds only the read-only classification table, so one instance can serve
/// any number of concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct Tuner {
    rules: GcRules,
}

impl Tuner {
    pub fn new(rules: GcRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &GcRules {
        &self.rules
    }

    /// Resolve both templates into the final option buckets.
    ///
    /// Per template line: heap policy, then collector selection, then upsert,
    /// then exclude. Exclusion runs last and always wins, including over an
    /// upsert of the same option.
    pub fn tune(&self, templates: &Templates, directives: &Directives) -> TuneResult<TunedOptions> {
        let gc = GcType::lookup(&directives.gc_type)?;
        let sizes = HeapSizes::new(
            directives.heap_new_size.as_deref(),
            directives.heap_size.as_deref(),
        );

        let mut run = MergeRun {
            gc,
            rules: &self.rules,
            heap: HeapPolicy::new(gc, &sizes),
            exclude: DirectiveSet::parse(directives.exclude.as_deref()),
            upsert: DirectiveSet::parse(directives.upsert.as_deref()),
            upserted: HashSet::new(),
            seen_heap: Vec::new(),
        };

        let mut jvm_options = run.resolve_template(&templates.options);
        let jvm_version_options = run.resolve_template(&templates.version_options);

        for mut option in run.heap.missing_options(&run.seen_heap) {
            debug!("Adding {} missing from templates", option.name());
            run.apply_directives(&mut option);
            jvm_options.push(option.to_line());
        }

        for option in run.remaining_upserts() {
            jvm_options.push(option.to_line());
        }

        let injected = inject_lines(directives.inject.as_deref());
        let injected_lines = injected.len();
        jvm_options.extend(injected);

        let tuned = TunedOptions {
            jvm_options,
            jvm_version_options,
            injected_lines,
        };

        info!(
            "Tuned JVM options for {}: {} general lines, {} version specific lines",
            gc,
            tuned.jvm_options.len(),
            tuned.jvm_version_options.len()
        );

        Ok(tuned)
    }
}

/// Working state of a single tuning run
struct MergeRun<'a> {
    gc: GcType,
    rules: &'a GcRules,
    heap: HeapPolicy<'a>,
    exclude: DirectiveSet,
    upsert: DirectiveSet,
    upserted: HashSet<String>,
    seen_heap: Vec<HeapFlag>,
}

impl MergeRun<'_> {
    fn resolve_template(&mut self, template: &str) -> Vec<String> {
        template
            .lines()
            .filter_map(JvmOption::parse)
            .map(|mut option| {
                self.resolve_option(&mut option);
                option.to_line()
            })
            .collect()
    }

    fn resolve_option(&mut self, option: &mut JvmOption) {
        if let Some(flag) = self.heap.apply(option) {
            if !self.seen_heap.contains(&flag) {
                self.seen_heap.push(flag);
            }
        }

        if let GcAffinity::Collector(gc) = self.rules.classify(option) {
            let selected = gc == self.gc;
            debug!(
                "{} belongs to {}, {}",
                option.name(),
                gc,
                if selected { "enabling" } else { "disabling" }
            );
            option.set_commented(!selected);
        }

        self.apply_directives(option);
    }

    fn apply_directives(&mut self, option: &mut JvmOption) {
        if let Some(upsert) = self.upsert.get(option.name()) {
            debug!("Upserting {}", upsert.name());
            // A bare heap flag upsert only activates the flag, keeping its size
            if !(option.is_managed() && upsert.value().is_none()) {
                option.set_value(upsert.value().map(str::to_string));
            }
            option.set_commented(false);
            self.upserted.insert(upsert.name().to_string());
        }

        if self.exclude.contains(option.name()) {
            debug!("Excluding {}", option.name());
            option.set_commented(true);
        }
    }

    /// Upserts that matched nothing in the templates, to be appended
    fn remaining_upserts(&self) -> Vec<JvmOption> {
        self.upsert
            .iter()
            .filter(|option| !self.upserted.contains(option.name()))
            .map(|option| {
                let excluded = self.exclude.contains(option.name());
                if excluded {
                    debug!("Upsert {} is also excluded, adding it disabled", option.name());
                }
                option.clone().with_commented(excluded)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TuneError;
    use crate::result::Filter;

    const OPTIONS: &str = "\
# General options
-ea
-Dcassandra.ring_delay_ms=30000
#-Xms4G
#-Xmx4G
#-Xmn800M

-XX:+HeapDumpOnOutOfMemoryError
";

    const VERSION_OPTIONS: &str = "\
### CMS Settings
-XX:+UseConcMarkSweepGC
-XX:+UseParNewGC
-XX:SurvivorRatio=8
### G1 Settings
#-XX:+UseG1GC
#-XX:MaxGCPauseMillis=500
### GC logging
#-XX:NumberOfGCLogFiles=10
";

    fn templates() -> Templates {
        Templates::new(OPTIONS, VERSION_OPTIONS)
    }

    fn active(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .filter(|line| !line.starts_with('#'))
            .cloned()
            .collect()
    }

    #[test]
    fn test_unparseable_lines_are_dropped() {
        let tuned = Tuner::default()
            .tune(&templates(), &Directives::new("CMS"))
            .unwrap();
        assert!(tuned.jvm_options.iter().all(|l| JvmOption::parse(l).is_some()));
        assert_eq!(tuned.jvm_version_options.len(), 6);
    }

    #[test]
    fn test_selected_collector_enabled() {
        let tuned = Tuner::default()
            .tune(&templates(), &Directives::new("G1GC"))
            .unwrap();
        assert_eq!(
            active(&tuned.jvm_version_options),
            vec!["-XX:+UseG1GC", "-XX:MaxGCPauseMillis=500"]
        );

        let tuned = Tuner::default()
            .tune(&templates(), &Directives::new("CMS"))
            .unwrap();
        assert_eq!(
            active(&tuned.jvm_version_options),
            vec!["-XX:+UseConcMarkSweepGC", "-XX:+UseParNewGC", "-XX:SurvivorRatio=8"]
        );
    }

    #[test]
    fn test_universal_options_keep_authored_state() {
        let tuned = Tuner::default()
            .tune(&templates(), &Directives::new("G1GC"))
            .unwrap();
        assert!(tuned
            .jvm_version_options
            .contains(&"#-XX:NumberOfGCLogFiles=10".to_string()));
        assert!(tuned.jvm_options.contains(&"-ea".to_string()));
    }

    #[test]
    fn test_heap_sizes_under_cms() {
        let directives = Directives::new("CMS").heap_new_size("3G").heap_size("12G");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        let general = active(&tuned.jvm_options);
        for expected in ["-Xms12G", "-Xmx12G", "-Xmn3G"] {
            assert!(general.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_heap_sizes_under_g1gc() {
        let directives = Directives::new("G1GC").heap_new_size("3G").heap_size("12G");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        assert!(tuned.jvm_options.contains(&"#-Xmn3G".to_string()));
        assert!(tuned.jvm_options.contains(&"-Xmx12G".to_string()));
    }

    #[test]
    fn test_upsert_young_gen_overrides_g1gc_suppression() {
        let directives = Directives::new("G1GC").heap_new_size("3G").upsert("-Xmn2G");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        assert!(tuned.jvm_options.contains(&"-Xmn2G".to_string()));
    }

    #[test]
    fn test_bare_young_gen_upsert_keeps_supplied_size() {
        let templates = Templates::new("#-Xmn800M\n-Xmx4G\n", "");
        let directives = Directives::new("G1GC")
            .heap_new_size("3G")
            .heap_size("12G")
            .upsert("-Xmn");
        let tuned = Tuner::default().tune(&templates, &directives).unwrap();
        assert_eq!(tuned.jvm_options, vec!["-Xmn3G", "-Xmx12G", "-Xms12G"]);
    }

    #[test]
    fn test_bare_heap_upsert_keeps_template_size() {
        let templates = Templates::new("#-Xmx4G\n", "");
        let directives = Directives::new("CMS").upsert("-Xmx");
        let tuned = Tuner::default().tune(&templates, &directives).unwrap();
        assert_eq!(tuned.jvm_options, vec!["-Xmx4G"]);
    }

    #[test]
    fn test_upsert_replaces_and_appends() {
        let directives = Directives::new("CMS").upsert("-XX:NumberOfGCLogFiles=20,-Dsample,-Dsample2=10");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        assert!(tuned
            .jvm_version_options
            .contains(&"-XX:NumberOfGCLogFiles=20".to_string()));
        let tail: Vec<&str> = tuned.jvm_options.iter().rev().take(2).map(String::as_str).collect();
        assert_eq!(tail, vec!["-Dsample2=10", "-Dsample"]);
    }

    #[test]
    fn test_upsert_can_enable_other_collector_option() {
        let directives = Directives::new("CMS").upsert("-XX:MaxGCPauseMillis=200");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        assert!(tuned
            .jvm_version_options
            .contains(&"-XX:MaxGCPauseMillis=200".to_string()));
    }

    #[test]
    fn test_exclude_wins_over_upsert() {
        let directives = Directives::new("G1GC")
            .upsert("-XX:NumberOfGCLogFiles=20,-Dsample=1")
            .exclude("-XX:NumberOfGCLogFiles,-Dsample,-XX:+UseG1GC");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();

        for option in tuned
            .options(Filter::ActiveOnly)
            .iter()
            .chain(tuned.version_options(Filter::ActiveOnly).iter())
        {
            assert!(
                !["-XX:NumberOfGCLogFiles", "-Dsample", "-XX:+UseG1GC"].contains(&option.name()),
                "{} should be excluded",
                option.name()
            );
        }
        assert!(tuned.jvm_options.contains(&"#-Dsample=1".to_string()));
        assert!(tuned
            .jvm_version_options
            .contains(&"#-XX:NumberOfGCLogFiles=20".to_string()));
    }

    #[test]
    fn test_inject_appended_verbatim() {
        let inject = "-Dcassandra.schema_delay_ms=60000 -Dcassandra.skip_schema_check_for_versions=ver1,ver2";
        let directives = Directives::new("G1GC").exclude("").inject(inject);
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        assert_eq!(tuned.jvm_options.last().map(String::as_str), Some(inject));
        assert_eq!(tuned.injected_lines, 1);
    }

    #[test]
    fn test_commented_inject_survives_active_view() {
        let directives = Directives::new("CMS").inject("#-Dfoo=1\n-Dbar=2");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        let active = tuned.option_lines(Filter::ActiveOnly);
        assert_eq!(active[active.len() - 2..], ["#-Dfoo=1", "-Dbar=2"]);
        assert!(!active.contains(&"#-Xmx4G"));
    }

    #[test]
    fn test_missing_heap_flags_are_added_once() {
        let templates = Templates::new("-ea\n-Xmx4G\n", VERSION_OPTIONS);
        let directives = Directives::new("CMS")
            .heap_size("8G")
            .heap_new_size("2G")
            .upsert("-Xms6G");
        let tuned = Tuner::default().tune(&templates, &directives).unwrap();
        assert_eq!(tuned.jvm_options, vec!["-ea", "-Xmx8G", "-Xms6G", "-Xmn2G"]);
    }

    #[test]
    fn test_unsupported_gc_type() {
        let err = Tuner::default()
            .tune(&templates(), &Directives::new("ZGC"))
            .unwrap_err();
        assert_eq!(err, TuneError::UnsupportedGcType("ZGC".to_string()));
    }

    #[test]
    fn test_malformed_directives_are_skipped() {
        let directives = Directives::new("CMS").upsert("garbage,-Dkept=1,#");
        let tuned = Tuner::default().tune(&templates(), &directives).unwrap();
        assert_eq!(tuned.jvm_options.last().map(String::as_str), Some("-Dkept=1"));
    }

    #[test]
    fn test_custom_rules() {
        let rules = GcRules::default().with_option(GcType::G1gc, "-XX:NumberOfGCLogFiles");
        let tuned = Tuner::new(rules)
            .tune(&templates(), &Directives::new("G1GC"))
            .unwrap();
        assert!(tuned
            .jvm_version_options
            .contains(&"-XX:NumberOfGCLogFiles=10".to_string()));
    }

    #[test]
    fn test_deterministic() {
        let directives = Directives::new("G1GC")
            .upsert("-Da=1,-Db=2,-Dc=3")
            .exclude("-Dd")
            .heap_size("12G");
        let tuner = Tuner::default();
        let first = tuner.tune(&templates(), &directives).unwrap();
        let second = tuner.tune(&templates(), &directives).unwrap();
        assert_eq!(first, second);
    }
}
