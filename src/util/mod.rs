//! Utility modules

pub mod paths;

pub use paths::{root_for_exe, root_from_exe};
