//! Line diffs between file versions.

pub mod engine;
pub mod unified;

pub use engine::DiffEngine;
pub use unified::{split_lines, unified_diff};
