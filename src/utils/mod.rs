//! Utility module: errors and logging.

pub mod errors;
pub mod logging;

pub use errors::{LedgerError, Result};
pub use logging::init_logging;
