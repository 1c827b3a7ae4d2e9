//! Tools that we could imagine being in the Rust standard library, but aren't.

mod custom_format;
pub use custom_format::*;
