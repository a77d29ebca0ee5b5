//! Reading and writing of whole data sets.
//!
//! [`DicomStreamReader`] decodes a stream into a tree of elements,
//! and [`DataSetWriter`] writes such a tree back in the same syntax.

pub mod read;
pub mod write;

pub use self::read::DicomStreamReader;
pub use self::write::DataSetWriter;
