mod dates;
#[cfg(feature = "tracing")]
mod logging;
pub(crate) mod utils;
