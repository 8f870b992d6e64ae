//! JVM option line model and operator directive parsing

pub mod directive;
pub mod option;

pub use directive::{inject_lines, DirectiveSet};
pub use option::{JvmOption, Separator, COMMENT_MARKER};
