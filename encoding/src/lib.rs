//! DICOM encoding and decoding primitives for the dcmio stream decoder.
//!
//! - [`swap`] classifies the byte order of a stream,
//!   including the swapped orders left by broken encoders.
//! - [`decode`] and [`encode`] read and write element headers
//!   in either syntax and any byte order.
//! - [`transfer_syntax`] describes transfer syntaxes
//!   and the negotiated syntax of a session.
//! - [`text`] handles the default character repertoire.
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]

pub mod decode;
pub mod encode;
pub mod swap;
pub mod text;
pub mod transfer_syntax;

pub use byteordered;
pub use crate::decode::Decode;
pub use crate::encode::Encode;
pub use crate::swap::SwapCode;
pub use crate::transfer_syntax::{NegotiatedSyntax, TransferSyntax, TransferSyntaxIndex};
