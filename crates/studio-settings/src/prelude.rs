pub use studio_types::prelude::*;

// vim: ts=4
