mod expander;

pub use expander::{ExpandError, PathExpander};
