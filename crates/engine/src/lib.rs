//! JVM options merge engine
//!
//! Resolves a baseline options template against a selected garbage
//! collector, heap sizes and operator directives.

pub mod error;
pub mod gc;
pub mod heap;
pub mod result;
pub mod tuner;

pub use error::{TuneError, TuneResult};
pub use gc::{GcAffinity, GcRules, GcType};
pub use heap::{HeapFlag, HeapPolicy, HeapSizes};
pub use result::{Filter, TunedOptions};
pub use tuner::{Directives, Templates, Tuner};
