//! Lazy, zero-copy JSON scalar values.
//!
//! A tokenizer hands out a [`LazyValue`] per scalar token: a type tag and a
//! range over its scan buffer. Conversion to integers, floats, strings,
//! dates, booleans or enums happens only when asked for, and the generic
//! conversion is memoized.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

/// Trace-level logging macro that forwards to `tracing::trace!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

/// Trace-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Debug-level logging macro that forwards to `tracing::debug!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Debug-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

mod backend;
mod backing;
mod enums;
mod error;
mod lazy_value;
mod options;
mod value;

#[cfg(test)]
mod tests;

pub use backend::{DefaultCtx, ValueCtx};
pub use enums::JsonEnum;
pub use error::{ConstructionError, ConversionError, FormatError, ValueError};
pub use lazy_value::LazyValue;
pub use options::{StringOptions, TokenType, ValueKind};
pub use value::Value;

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
