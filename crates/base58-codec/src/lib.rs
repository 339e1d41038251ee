//! Base58 encoding.
//!
//! Bytes are treated as a big-endian base-256 number and converted to
//! base 58 by repeated long division over the byte array, so no
//! arbitrary-precision integer type is involved. Each leading zero byte
//! is written as one leading zero symbol (`'1'` in the Bitcoin
//! alphabet) and vice versa, so the encoding preserves input length.
//!
//! ```
//! use base58_codec::Codec;
//!
//! let codec = Codec::bitcoin();
//! assert_eq!(codec.encode(b"sure"), "3xB2TW");
//! assert_eq!(codec.decode("3xB2TW").unwrap(), b"sure");
//! ```
//!
//! # Features
//!
//! - `std` (default): enables the [`io`] stream wrappers. Without it
//!   the crate is `no_std` and only needs `alloc`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

mod alphabet;
mod arith;
mod codec;
mod error;
#[cfg(feature = "std")]
pub mod io;

pub use crate::{alphabet::*, codec::*, error::*};
