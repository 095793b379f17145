//! Infrastructure layer
//!
//! Adapters around the outside world: logging setup and the default
//! process-backed toolchain.

mod logging;
mod toolchain;

pub use logging::init_logging;
pub use toolchain::ProcessToolchain;
