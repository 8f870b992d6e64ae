//! Heap size policy for the managed `-Xmx` / `-Xms` / `-Xmn` flags

use crate::gc::GcType;
use jvm_options::JvmOption;
use tracing::debug;

/// The heap flags the tuner governs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapFlag {
    /// `-Xmn`
    YoungGen,

    /// `-Xmx`
    MaxHeap,

    /// `-Xms`
    InitialHeap,
}

impl HeapFlag {
    pub const ALL: [HeapFlag; 3] = [HeapFlag::MaxHeap, HeapFlag::InitialHeap, HeapFlag::YoungGen];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "-Xmn" => Some(HeapFlag::YoungGen),
            "-Xmx" => Some(HeapFlag::MaxHeap),
            "-Xms" => Some(HeapFlag::InitialHeap),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeapFlag::YoungGen => "-Xmn",
            HeapFlag::MaxHeap => "-Xmx",
            HeapFlag::InitialHeap => "-Xms",
        }
    }
}

/// Operator supplied heap sizes. Blank strings count as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeapSizes {
    pub new_size: Option<String>,
    pub heap_size: Option<String>,
}

impl HeapSizes {
    pub fn new(new_size: Option<&str>, heap_size: Option<&str>) -> Self {
        Self {
            new_size: new_size.map(str::to_string),
            heap_size: heap_size.map(str::to_string),
        }
    }

    /// Size for a flag; max and initial heap share the same value
    pub fn for_flag(&self, flag: HeapFlag) -> Option<&str> {
        let size = match flag {
            HeapFlag::YoungGen => self.new_size.as_deref(),
            HeapFlag::MaxHeap | HeapFlag::InitialHeap => self.heap_size.as_deref(),
        };
        size.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Decides activation and value of heap flags for one collector
#[derive(Debug, Clone)]
pub struct HeapPolicy<'a> {
    gc: GcType,
    sizes: &'a HeapSizes,
}

impl<'a> HeapPolicy<'a> {
    pub fn new(gc: GcType, sizes: &'a HeapSizes) -> Self {
        Self { gc, sizes }
    }

    /// Apply the policy to a template option.
    ///
    /// Returns the flag when the option is a managed heap flag, `None` for
    /// everything else (left untouched).
    pub fn apply(&self, option: &mut JvmOption) -> Option<HeapFlag> {
        let flag = HeapFlag::from_name(option.name())?;

        match self.sizes.for_flag(flag) {
            Some(size) => {
                option.set_value(Some(size.to_string()));
                option.set_commented(false);
            }
            None => option.set_commented(true),
        }

        if self.suppresses(flag) {
            debug!("{} left to the {} collector, commenting out", flag.name(), self.gc);
            option.set_commented(true);
        }

        Some(flag)
    }

    /// Whether `flag` is kept inactive under the selected collector
    pub fn suppresses(&self, flag: HeapFlag) -> bool {
        flag == HeapFlag::YoungGen && !self.gc.tunes_young_gen()
    }

    /// Heap flags with a supplied size that the template never mentioned
    pub fn missing_options(&self, seen: &[HeapFlag]) -> Vec<JvmOption> {
        HeapFlag::ALL
            .iter()
            .filter(|flag| !seen.contains(*flag))
            .filter_map(|flag| {
                let size = self.sizes.for_flag(*flag)?;
                Some(
                    JvmOption::new(flag.name())
                        .with_value(size)
                        .with_commented(self.suppresses(*flag)),
                )
            })
            .collect()
    }
}
