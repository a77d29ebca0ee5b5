//! Writing of decoded data sets back to bytes,
//! in the syntax and byte order of a decoding session.
//!
//! Values are written as they are held,
//! so they must already be in the byte order of the session.
use crate::session::DecodeSession;
use dcmio_core::value::{DataSetSequence, PixelFragmentSequence};
use dcmio_core::{DataElement, DataElementHeader, DataSet, HasLength, Length, Tag, Value, VR};
use dcmio_encoding::encode::{ElementEncoder, Encode, Error as EncodeError};
use snafu::{Backtrace, ResultExt, Snafu};
use std::io::{self, Write};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not write header of element {}", tag))]
    WriteHeader {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncodeError,
    },
    #[snafu(display("Could not write item header"))]
    WriteItemHeader {
        #[snafu(backtrace)]
        source: EncodeError,
    },
    #[snafu(display("Could not write value of element {}", tag))]
    WriteValue {
        tag: Tag,
        source: io::Error,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A writer of data sets in the syntax of a session.
///
/// Sequences and items keep the lengths they were read with:
/// delimiters are written after those of undefined length only.
#[derive(Debug)]
pub struct DataSetWriter<W> {
    to: W,
    encoder: ElementEncoder,
}

impl<W> DataSetWriter<W>
where
    W: Write,
{
    pub fn new(to: W, session: &DecodeSession) -> Self {
        DataSetWriter {
            to,
            encoder: session.encoder(),
        }
    }

    /// Write all elements of the data set in order.
    pub fn write_dataset(&mut self, dataset: &DataSet) -> Result<()> {
        for element in dataset {
            self.write_element(element)?;
        }
        Ok(())
    }

    /// Write one element, including its sequences and items.
    pub fn write_element(&mut self, element: &DataElement) -> Result<()> {
        let header = *element.header();
        match element.value() {
            Value::Empty => self.write_header(DataElementHeader { len: Length(0), ..header }),
            Value::Bytes(bytes) => {
                self.write_header(DataElementHeader {
                    len: Length(bytes.len() as u32),
                    ..header
                })?;
                self.to
                    .write_all(bytes)
                    .context(WriteValueSnafu { tag: header.tag })
            }
            Value::Sequence(seq) => self.write_sequence(header, seq),
            Value::PixelSequence(seq) => self.write_fragments(header, seq),
        }
    }

    /// Retrieve the underlying writer.
    pub fn into_inner(self) -> W {
        self.to
    }

    fn write_sequence(&mut self, header: DataElementHeader, seq: &DataSetSequence) -> Result<()> {
        self.write_header(DataElementHeader {
            vr: header.vr.or(Some(VR::SQ)),
            ..header
        })?;
        for item in seq.items() {
            let len = item.length();
            self.write_item_header(Tag::ITEM, len)?;
            self.write_dataset(item.dataset())?;
            if len.is_undefined() {
                self.write_item_header(Tag::ITEM_DELIMITER, Length(0))?;
            }
        }
        if header.len.is_undefined() {
            self.write_item_header(Tag::SEQUENCE_DELIMITER, Length(0))?;
        }
        Ok(())
    }

    fn write_fragments(&mut self, header: DataElementHeader, seq: &PixelFragmentSequence) -> Result<()> {
        self.write_header(DataElementHeader {
            len: Length::UNDEFINED,
            ..header
        })?;
        let tables = std::iter::once(seq.offset_table()).chain(seq.fragments().iter().map(Vec::as_slice));
        for fragment in tables {
            self.write_item_header(Tag::ITEM, Length(fragment.len() as u32))?;
            self.to
                .write_all(fragment)
                .context(WriteValueSnafu { tag: header.tag })?;
        }
        self.write_item_header(Tag::SEQUENCE_DELIMITER, Length(0))
    }

    fn write_header(&mut self, header: DataElementHeader) -> Result<()> {
        self.encoder
            .encode_element_header(&mut self.to, header)
            .context(WriteHeaderSnafu { tag: header.tag })?;
        Ok(())
    }

    fn write_item_header(&mut self, tag: Tag, len: Length) -> Result<()> {
        self.encoder
            .encode_item_header(&mut self.to, tag, len)
            .context(WriteItemHeaderSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::DataSetWriter;
    use crate::session::DecodeSession;
    use dcmio_core::value::{DataSetSequence, Item};
    use dcmio_core::{DataElement, DataElementHeader, DataSet, Length, Value, VR};
    use dcmio_encoding::{NegotiatedSyntax, SwapCode};

    #[test]
    fn write_undefined_length_sequence() {
        let mut item = DataSet::new();
        item.push(DataElement::from_bytes((0x0008, 0x1150), Some(VR::UI), b"1.2\0".to_vec()));
        let seq = DataSetSequence::new(vec![Item::new(Length::UNDEFINED, item)], Length::UNDEFINED);
        let mut dataset = DataSet::new();
        dataset.push(DataElement::new(
            DataElementHeader::new((0x0008, 0x1140), VR::SQ, Length::UNDEFINED),
            Value::Sequence(seq),
        ));

        let session = DecodeSession::new(NegotiatedSyntax::Explicit, SwapCode::LittleEndian);
        let mut writer = DataSetWriter::new(Vec::new(), &session);
        writer.write_dataset(&dataset).unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
            0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff,
            0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00, b'1', b'.', b'2', 0x00,
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00,
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(writer.into_inner(), expected);
    }

    #[test]
    fn write_implicit_big_endian() {
        let mut dataset = DataSet::new();
        dataset.push(DataElement::from_bytes((0x0028, 0x0010), None, vec![0x02, 0x00]));

        let session = DecodeSession::new(NegotiatedSyntax::Implicit, SwapCode::BigEndian);
        let mut writer = DataSetWriter::new(Vec::new(), &session);
        writer.write_dataset(&dataset).unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x00, 0x28, 0x00, 0x10, 0x00, 0x00, 0x00, 0x02, 0x02, 0x00,
        ];
        assert_eq!(writer.into_inner(), expected);
    }
}
