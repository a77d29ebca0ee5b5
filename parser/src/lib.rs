//! A streaming decoder of DICOM data sets.
//!
//! The decoder makes no assumption about its input:
//! the syntax and byte order of a stream are negotiated from its first bytes,
//! the file meta group (if any) may refine them,
//! and the data set is then read into a tree of elements,
//! sequences and items.
//!
//! Streams from broken encoders are read as far as possible.
//! Known encoder bugs are corrected through [workarounds](workaround),
//! and tolerated irregularities are reported as [`Defect`]s
//! next to the decoded data.
//! Anything else ends the decoding with an [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use dcmio_parser::{read_dicom, ReadOptions};
//! use std::fs::File;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("image.dcm")?;
//! let object = read_dicom(file, ReadOptions::default())?;
//! for defect in &object.defects {
//!     println!("{}", defect);
//! }
//! println!("{} elements", object.dataset.len());
//! # Ok(())
//! # }
//! ```
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]

pub mod dataset;
pub mod defect;
pub mod error;
mod meta;
pub mod negotiate;
pub mod options;
pub mod session;
pub mod stateful;
pub mod swap;
pub mod workaround;

pub use crate::dataset::{DataSetWriter, DicomStreamReader};
pub use crate::defect::{Defect, DefectKind};
pub use crate::error::{Error, ErrorCategory, Result};
pub use crate::negotiate::{negotiate, Negotiation};
pub use crate::options::{ReadOptions, WorkaroundSet};
pub use crate::session::DecodeSession;
pub use crate::swap::ByteSwapFilter;

use dcmio_core::dictionary::stub::StubDataDictionary;
use dcmio_core::dictionary::DataDictionary;
use dcmio_core::DataSet;
use dcmio_encoding::SwapCode;
use snafu::ResultExt;
use std::io::{Read, Seek};

/// The outcome of decoding a whole stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedObject {
    /// the file meta group, empty if the stream has none
    pub meta: DataSet,
    /// the data set after the file meta group
    pub dataset: DataSet,
    /// the syntax and byte order of the data set
    pub session: DecodeSession,
    /// tolerated defects, in stream order
    pub defects: Vec<Defect>,
}

/// Decode a whole stream.
///
/// With [`swap_to_host`](ReadOptions::swap_to_host) set,
/// integer values are converted to the byte order of the running machine.
pub fn read_dicom<S>(source: S, options: ReadOptions) -> Result<DecodedObject>
where
    S: Read + Seek,
{
    read_dicom_with_dictionary(source, StubDataDictionary, options)
}

/// Decode a whole stream,
/// looking up the VR of implicit VR elements in the given dictionary.
pub fn read_dicom_with_dictionary<S, D>(
    source: S,
    dictionary: D,
    options: ReadOptions,
) -> Result<DecodedObject>
where
    S: Read + Seek,
    D: DataDictionary,
{
    let swap_to_host = options.swap_to_host;
    let mut reader = DicomStreamReader::new_with_dictionary(source, &dictionary, options)?;
    let mut dataset = reader.read_dataset()?;
    let (mut meta, session, defects) = reader.into_parts();

    if swap_to_host {
        ByteSwapFilter::with_dictionary(SwapCode::LittleEndian, &dictionary)
            .apply(&mut meta)
            .context(error::SwapValuesSnafu)?;
        ByteSwapFilter::with_dictionary(session.swap_code, &dictionary)
            .apply(&mut dataset)
            .context(error::SwapValuesSnafu)?;
    }

    Ok(DecodedObject {
        meta,
        dataset,
        session,
        defects,
    })
}
