pub use crate::app::App;
pub use statgate_types::prelude::*;

// vim: ts=4
