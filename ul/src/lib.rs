//! This crate contains the part of the DICOM upper layer protocol
//! which names transfer syntaxes during presentation context negotiation:
//! the transfer syntax sub-item (item type 40H),
//! with its [reader](pdu::reader) and [writer](pdu::writer).
//!
//! Transfer syntax names are validated against
//! the registry of `dcmio-transfer-syntax-registry`.
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]

pub mod pdu;

pub use pdu::reader::read_transfer_syntax_sub_item;
pub use pdu::writer::write_transfer_syntax_sub_item;
pub use pdu::TransferSyntaxSubItem;
