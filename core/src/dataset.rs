//! The in-memory data set tree filled by the decoder.

use crate::header::{DataElementHeader, HasLength, Header, Length, Tag, VR};
use crate::value::Value;

/// A data element: a header and its value.
///
/// The header is kept as it was decoded
/// (after any encoder workaround corrections),
/// so that the element can be written back.
#[derive(Debug, Clone, PartialEq)]
pub struct DataElement {
    header: DataElementHeader,
    value: Value,
}

impl DataElement {
    /// Create a data element from a header and a value.
    ///
    /// **Note:** the header's length is not validated against the value.
    pub fn new(header: DataElementHeader, value: Value) -> Self {
        DataElement { header, value }
    }

    /// Convenience constructor for an explicit VR primitive element
    /// whose length is derived from the given bytes.
    pub fn from_bytes<T: Into<Tag>>(tag: T, vr: Option<VR>, bytes: Vec<u8>) -> Self {
        let len = Length(bytes.len() as u32);
        let value = if bytes.is_empty() {
            Value::Empty
        } else {
            Value::Bytes(bytes)
        };
        DataElement {
            header: DataElementHeader {
                tag: tag.into(),
                vr,
                len,
            },
            value,
        }
    }

    /// The element header.
    #[inline]
    pub fn header(&self) -> &DataElementHeader {
        &self.header
    }

    /// The element's value representation, if known.
    #[inline]
    pub fn vr(&self) -> Option<VR> {
        self.header.vr
    }

    /// The element value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Mutable access to the element value.
    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Split the element into header and value.
    #[inline]
    pub fn into_parts(self) -> (DataElementHeader, Value) {
        (self.header, self.value)
    }
}

impl HasLength for DataElement {
    #[inline]
    fn length(&self) -> Length {
        self.header.len
    }
}

impl Header for DataElement {
    #[inline]
    fn tag(&self) -> Tag {
        self.header.tag
    }
}

/// An ordered collection of data elements.
///
/// Elements are kept in the order in which they were inserted.
/// Tags are expected to be strictly increasing in a well-formed stream,
/// but this is not enforced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    elements: Vec<DataElement>,
}

impl DataSet {
    /// Create an empty data set.
    pub fn new() -> Self {
        DataSet::default()
    }

    /// Append an element to the end of the data set.
    #[inline]
    pub fn push(&mut self, element: DataElement) {
        self.elements.push(element);
    }

    /// Fetch the first element with the given tag.
    pub fn get<T: Into<Tag>>(&self, tag: T) -> Option<&DataElement> {
        let tag = tag.into();
        self.elements.iter().find(|e| e.tag() == tag)
    }

    /// Fetch the first element with the given tag, for modification.
    pub fn get_mut<T: Into<Tag>>(&mut self, tag: T) -> Option<&mut DataElement> {
        let tag = tag.into();
        self.elements.iter_mut().find(|e| e.tag() == tag)
    }

    /// Iterate over the elements in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, DataElement> {
        self.elements.iter()
    }

    /// Iterate mutably over the elements in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, DataElement> {
        self.elements.iter_mut()
    }

    /// The number of elements at this level.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether there are no elements at this level.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Extend<DataElement> for DataSet {
    fn extend<I: IntoIterator<Item = DataElement>>(&mut self, iter: I) {
        self.elements.extend(iter)
    }
}

impl std::iter::FromIterator<DataElement> for DataSet {
    fn from_iter<I: IntoIterator<Item = DataElement>>(iter: I) -> Self {
        DataSet {
            elements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DataSet {
    type Item = DataElement;
    type IntoIter = std::vec::IntoIter<DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a DataElement;
    type IntoIter = std::slice::Iter<'a, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{DataSetSequence, Item};

    #[test]
    fn dataset_keeps_insertion_order() {
        let mut dset = DataSet::new();
        dset.push(DataElement::from_bytes((0x0010, 0x0020), Some(VR::LO), b"ID01".to_vec()));
        dset.push(DataElement::from_bytes((0x0008, 0x0060), Some(VR::CS), b"MR".to_vec()));

        let tags: Vec<_> = dset.iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec![Tag(0x0010, 0x0020), Tag(0x0008, 0x0060)]);
        assert_eq!(dset.get((0x0008, 0x0060)).and_then(|e| e.value().bytes()), Some(&b"MR"[..]));
        assert!(dset.get((0x0008, 0x0016)).is_none());
    }

    #[test]
    fn nested_items() {
        let mut inner = DataSet::new();
        inner.push(DataElement::from_bytes((0x0018, 0x6012), Some(VR::US), vec![1, 0]));
        let seq = DataSetSequence::new(vec![Item::new(Length::UNDEFINED, inner)], Length::UNDEFINED);
        let e = DataElement::new(
            DataElementHeader::new((0x0018, 0x6011), VR::SQ, Length::UNDEFINED),
            Value::Sequence(seq),
        );
        let items = e.value().items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].dataset().len(), 1);
        assert!(items[0].length().is_undefined());

        let empty = DataElement::from_bytes((0x0008, 0x0050), Some(VR::SH), vec![]);
        assert_eq!(empty.value(), &Value::Empty);
        assert_eq!(empty.length(), Length(0));
    }
}
