// src/lib.rs
//! Diagnostics core of the vellum data-language toolchain.
//!
//! Everything that can go wrong while loading `.vlm` files is reported
//! through one [`Error`] type: a closed [`ErrorKind`], a message, a
//! captured [`Backtrace`] and an optional cause chain. Reports render
//! in Python's traceback style via [`render_to_string`].
//!
//! ```
//! use vellum_diag::{Error, Location};
//!
//! let err = Error::tokenize(Location::new("unit.vlm", 3, 7), "unexpected indent");
//! assert_eq!(err.to_string(), "unit.vlm:3:7: unexpected indent");
//! ```

pub mod backtrace;
pub mod error;
pub mod ident;
pub mod location;
pub mod render;
mod walker;

pub use backtrace::{Backtrace, FrameSymbol};
pub use error::{enable_break, Error, ErrorKind, FileDetail, Result};
pub use ident::{Fqon, MemberId};
pub use location::Location;
pub use render::{render_to_stderr, render_to_string, render_to_writer};
