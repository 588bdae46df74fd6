//! A wrapper module to export logging functionality from
//! [`log`] or [`tracing`] depending on the `tracing` feature.
//!
//! Validation only ever reports at `debug` (rejections, ignored properties)
//! and `warn` (insecure settings that were nevertheless accepted).
//!
//! [`log`]: https://docs.rs/log
//! [`tracing`]: https://docs.rs/tracing

#[cfg(not(feature = "tracing"))]
pub use log::{debug, warn};

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};
