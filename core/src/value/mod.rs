//! Values of DICOM data elements as kept by the stream decoder.
//!
//! Primitive values are kept as raw bytes in the byte order of the
//! source (until a byte swap is applied), which makes it possible to
//! write them back exactly as they were read.

use crate::dataset::DataSet;
use crate::header::{HasLength, Length};
use smallvec::SmallVec;

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// The value of a data element.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value (zero length, or skipped in structure-only reading).
    Empty,
    /// A flat byte buffer.
    Bytes(Vec<u8>),
    /// A sequence of items, each containing a nested data set.
    Sequence(DataSetSequence),
    /// An encapsulated pixel data fragment sequence.
    PixelSequence(PixelFragmentSequence),
}

impl Value {
    /// Retrieve the raw bytes of a primitive value, if applicable.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_slice()),
            Value::Empty => Some(&[][..]),
            _ => None,
        }
    }

    /// Retrieve a mutable reference to the raw bytes of a primitive value.
    pub fn bytes_mut(&mut self) -> Option<&mut Vec<u8>> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Retrieve the items of a sequence value.
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            Value::Sequence(seq) => Some(seq.items()),
            _ => None,
        }
    }

    /// Retrieve the fragment sequence of an encapsulated pixel data value.
    pub fn fragments(&self) -> Option<&PixelFragmentSequence> {
        match self {
            Value::PixelSequence(seq) => Some(seq),
            _ => None,
        }
    }
}

/// An item of a sequence, wrapping a nested data set.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// the declared item length, possibly undefined
    len: Length,
    dataset: DataSet,
}

impl Item {
    /// Create an item from its declared length and nested data set.
    pub fn new(len: Length, dataset: DataSet) -> Self {
        Item { len, dataset }
    }

    /// The nested data set.
    #[inline]
    pub fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    /// Mutable access to the nested data set.
    #[inline]
    pub fn dataset_mut(&mut self) -> &mut DataSet {
        &mut self.dataset
    }

    /// Discard the item header and take the nested data set.
    #[inline]
    pub fn into_dataset(self) -> DataSet {
        self.dataset
    }
}

impl HasLength for Item {
    #[inline]
    fn length(&self) -> Length {
        self.len
    }
}

/// A sequence of items.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSetSequence {
    /// The item sequence.
    items: C<Item>,
    /// The sequence length in bytes.
    ///
    /// The value may be [`UNDEFINED`](Length::UNDEFINED)
    /// if the sequence is terminated by a sequence delimiter,
    /// otherwise it should match the full byte length of all items.
    length: Length,
}

impl DataSetSequence {
    /// Construct a data set sequence
    /// using a sequence of items and a length.
    ///
    /// **Note:** This function does not validate the `length`
    /// against the items.
    #[inline]
    pub fn new(items: impl Into<C<Item>>, length: Length) -> Self {
        DataSetSequence {
            items: items.into(),
            length,
        }
    }

    /// Construct an empty sequence of zero length.
    #[inline]
    pub fn empty() -> Self {
        DataSetSequence {
            items: Default::default(),
            length: Length(0),
        }
    }

    /// Gets a reference to the items of a sequence.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Gets a mutable reference to the items of a sequence.
    #[inline]
    pub fn items_mut(&mut self) -> &mut C<Item> {
        &mut self.items
    }

    /// Obtain the items of the sequence, discarding the length.
    #[inline]
    pub fn into_items(self) -> C<Item> {
        self.items
    }
}

impl HasLength for DataSetSequence {
    #[inline]
    fn length(&self) -> Length {
        self.length
    }
}

/// A sequence of pixel data fragments.
///
/// The first item in the stream is the basic offset table,
/// which is kept apart from the fragments.
/// Fragments are raw byte streams and are never byte swapped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PixelFragmentSequence {
    /// The raw bytes of the basic offset table.
    offset_table: Vec<u8>,
    /// The sequence of pixel data fragments.
    fragments: C<Vec<u8>>,
}

impl PixelFragmentSequence {
    /// Construct a pixel fragment sequence
    /// from a basic offset table and a list of fragments.
    #[inline]
    pub fn new(offset_table: Vec<u8>, fragments: impl Into<C<Vec<u8>>>) -> Self {
        PixelFragmentSequence {
            offset_table,
            fragments: fragments.into(),
        }
    }

    /// The raw bytes of the basic offset table.
    #[inline]
    pub fn offset_table(&self) -> &[u8] {
        &self.offset_table
    }

    /// Gets a reference to the pixel data fragments,
    /// not including the offset table.
    #[inline]
    pub fn fragments(&self) -> &[Vec<u8>] {
        &self.fragments
    }

    /// Gets a mutable reference to the pixel data fragments.
    #[inline]
    pub fn fragments_mut(&mut self) -> &mut C<Vec<u8>> {
        &mut self.fragments
    }
}
