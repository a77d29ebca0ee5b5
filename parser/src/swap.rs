//! Conversion of binary values between the byte order of a stream
//! and that of the running machine.
//!
//! Only values of the VRs SS, US, SL and UL are converted,
//! see [`VR::swap_width`].
//! Elements of implicit VR data sets get their VR from the dictionary,
//! and are left as they are when the dictionary does not know them.

use dcmio_core::dictionary::stub::StubDataDictionary;
use dcmio_core::dictionary::DataDictionary;
use dcmio_core::{DataElement, DataSet, Tag, Value, VR};
use dcmio_encoding::SwapCode;
use snafu::{Backtrace, Snafu};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Fragments of encapsulated pixel data have no byte order to convert.
    #[snafu(display("Cannot swap encapsulated pixel data in element {}", tag))]
    UnexpectedPixelSequence { tag: Tag, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A pass over a data set which converts its values
/// from one byte order to another.
#[derive(Debug, Clone)]
pub struct ByteSwapFilter<D = StubDataDictionary> {
    swap_code: SwapCode,
    dictionary: D,
}

impl ByteSwapFilter {
    /// Create a filter for values in the given byte order.
    pub fn new(swap_code: SwapCode) -> Self {
        Self::with_dictionary(swap_code, StubDataDictionary)
    }
}

impl<D> ByteSwapFilter<D>
where
    D: DataDictionary,
{
    /// Create a filter which looks up the VR of implicit VR elements
    /// in the given dictionary.
    pub fn with_dictionary(swap_code: SwapCode, dictionary: D) -> Self {
        ByteSwapFilter {
            swap_code,
            dictionary,
        }
    }

    /// The byte order of the values outside of the host.
    pub fn swap_code(&self) -> SwapCode {
        self.swap_code
    }

    /// Convert all values in the data set
    /// from the byte order of this filter to that of the host,
    /// descending into sequence items.
    ///
    /// Nothing is done if the byte order is already the host's.
    pub fn apply(&self, dataset: &mut DataSet) -> Result<()> {
        if self.swap_code.is_native() {
            return Ok(());
        }
        self.walk(dataset, &|code, data, width| code.to_host(data, width))
    }

    /// Convert all values in the data set
    /// from the byte order of the host to that of this filter.
    ///
    /// This undoes [`apply`](ByteSwapFilter::apply).
    pub fn encode(&self, dataset: &mut DataSet) -> Result<()> {
        if self.swap_code.is_native() {
            return Ok(());
        }
        self.walk(dataset, &|code, data, width| code.from_host(data, width))
    }

    fn walk(&self, dataset: &mut DataSet, swap: &dyn Fn(SwapCode, &mut [u8], u8)) -> Result<()> {
        for element in dataset.iter_mut() {
            self.swap_element(element, swap)?;
        }
        Ok(())
    }

    fn swap_element(
        &self,
        element: &mut DataElement,
        swap: &dyn Fn(SwapCode, &mut [u8], u8),
    ) -> Result<()> {
        let tag = element.header().tag;
        let vr = element.vr().or_else(|| self.dictionary.vr_of(tag));
        match element.value_mut() {
            Value::Empty => Ok(()),
            Value::Bytes(bytes) => {
                if let Some(width) = vr.and_then(VR::swap_width) {
                    swap(self.swap_code, bytes, width);
                }
                Ok(())
            }
            Value::Sequence(seq) => {
                for item in seq.items_mut() {
                    self.walk(item.dataset_mut(), swap)?;
                }
                Ok(())
            }
            Value::PixelSequence(_) => UnexpectedPixelSequenceSnafu { tag }.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmio_core::dictionary::{DictionaryEntryRef, SliceDataDictionary};
    use dcmio_core::value::{DataSetSequence, Item};
    use dcmio_core::Length;
    use matches::assert_matches;

    /// The byte order which is not the host's.
    fn foreign() -> SwapCode {
        if cfg!(target_endian = "little") {
            SwapCode::BigEndian
        } else {
            SwapCode::LittleEndian
        }
    }

    #[test]
    fn swaps_integers_but_not_floats() {
        let mut dataset = DataSet::new();
        dataset.push(DataElement::from_bytes((0x0028, 0x0010), Some(VR::US), vec![0x01, 0x02]));
        dataset.push(DataElement::from_bytes((0x0018, 0x1310), Some(VR::UL), vec![1, 2, 3, 4]));
        dataset.push(DataElement::from_bytes((0x0018, 0x0088), Some(VR::FL), vec![1, 2, 3, 4]));
        dataset.push(DataElement::from_bytes((0x0008, 0x0060), Some(VR::CS), b"MR".to_vec()));

        ByteSwapFilter::new(foreign()).apply(&mut dataset).unwrap();

        let values: Vec<_> = dataset.iter().map(|e| e.value().bytes().unwrap().to_vec()).collect();
        assert_eq!(values[0], vec![0x02, 0x01]);
        assert_eq!(values[1], vec![4, 3, 2, 1]);
        // FL keeps its bytes
        assert_eq!(values[2], vec![1, 2, 3, 4]);
        assert_eq!(values[3], b"MR".to_vec());
    }

    #[test]
    fn swapping_twice_restores_values() {
        let mut item = DataSet::new();
        item.push(DataElement::from_bytes((0x0028, 0x0011), Some(VR::US), vec![0x00, 0x02]));
        let seq = DataSetSequence::new(vec![Item::new(Length::UNDEFINED, item)], Length::UNDEFINED);
        let mut dataset = DataSet::new();
        dataset.push(DataElement::new(
            dcmio_core::DataElementHeader::new((0x0040, 0x0275), VR::SQ, Length::UNDEFINED),
            Value::Sequence(seq),
        ));
        let original = dataset.clone();

        let filter = ByteSwapFilter::new(foreign());
        filter.apply(&mut dataset).unwrap();
        let inner = dataset.get((0x0040, 0x0275)).unwrap().value().items().unwrap()[0]
            .dataset()
            .get((0x0028, 0x0011))
            .unwrap()
            .value()
            .bytes()
            .unwrap()
            .to_vec();
        assert_eq!(inner, vec![0x02, 0x00]);

        filter.encode(&mut dataset).unwrap();
        assert_eq!(dataset, original);
    }

    #[test]
    fn native_order_is_untouched() {
        let mut dataset = DataSet::new();
        dataset.push(DataElement::from_bytes((0x0028, 0x0010), Some(VR::US), vec![0x01, 0x02]));
        ByteSwapFilter::new(SwapCode::host()).apply(&mut dataset).unwrap();
        assert_eq!(dataset.iter().next().unwrap().value().bytes(), Some(&[0x01, 0x02][..]));
    }

    #[test]
    fn implicit_vr_from_dictionary() {
        static ENTRIES: &[DictionaryEntryRef<'static>] = &[DictionaryEntryRef {
            tag: Tag(0x0028, 0x0010),
            alias: "Rows",
            vr: VR::US,
        }];
        let dict = SliceDataDictionary::new(ENTRIES);

        let mut dataset = DataSet::new();
        dataset.push(DataElement::from_bytes((0x0028, 0x0010), None, vec![0x01, 0x02]));
        dataset.push(DataElement::from_bytes((0x0028, 0x0011), None, vec![0x01, 0x02]));
        ByteSwapFilter::with_dictionary(foreign(), dict)
            .apply(&mut dataset)
            .unwrap();

        let values: Vec<_> = dataset.iter().map(|e| e.value().bytes().unwrap().to_vec()).collect();
        assert_eq!(values[0], vec![0x02, 0x01]);
        // unknown to the dictionary
        assert_eq!(values[1], vec![0x01, 0x02]);
    }

    #[test]
    fn pixel_sequence_is_an_error() {
        let mut dataset = DataSet::new();
        dataset.push(DataElement::new(
            dcmio_core::DataElementHeader::new(Tag::PIXEL_DATA, VR::OB, Length::UNDEFINED),
            Value::PixelSequence(dcmio_core::PixelFragmentSequence::new(vec![], vec![vec![1, 2]])),
        ));
        let err = ByteSwapFilter::new(foreign()).apply(&mut dataset).unwrap_err();
        assert_matches!(err, Error::UnexpectedPixelSequence { tag: Tag(0x7FE0, 0x0010), .. });
    }
}
