pub use crate::error::{Error, StResult};
pub use crate::source::Source;

pub use tracing::{debug, error, info, warn};

// vim: ts=4
