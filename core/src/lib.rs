#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of dcmio containing the concepts and
//! data structures shared by the stream decoder crates.
//!
//! - [`header`] comprises the data types of DICOM element headers,
//!   including tags, lengths and value representations
//!   with their classification.
//! - [`dictionary`] describes the attribute dictionary interface,
//!   used to resolve value representations in implicit VR data sets.
//! - [`value`] holds element values: raw bytes, item sequences
//!   and encapsulated pixel data fragments.
//! - [`dataset`] holds the data set tree.
//!
//! [`dictionary`]: ./dictionary/index.html
//! [`dataset`]: ./dataset/index.html
//! [`header`]: ./header/index.html
//! [`value`]: ./value/index.html

pub mod dataset;
pub mod dictionary;
pub mod header;
pub mod value;

pub use dataset::{DataElement, DataSet};
pub use dictionary::DataDictionary;
pub use header::{DataElementHeader, HasLength, Header, Length, Tag, VR};
pub use value::{DataSetSequence, Item, PixelFragmentSequence, Value};

// re-export crates that are part of the public API
pub use smallvec;
