#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod error;
mod key;
mod parse;
mod segment;
mod version;

pub use error::*;
pub use parse::{Mode, parse_segments};
pub use segment::*;
pub use version::*;
