use crate::pdu::{TransferSyntaxSubItem, TRANSFER_SYNTAX_ITEM_TYPE};
use byteordered::byteorder::{BigEndian, WriteBytesExt};
use dcmio_encoding::text::{DefaultCharacterSetCodec, TextCodec};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::convert::TryFrom;
use std::io::Write;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not write field `{}`: {}", field, source))]
    WriteField {
        field: &'static str,
        backtrace: Backtrace,
        source: std::io::Error,
    },

    #[snafu(display("Could not write {} reserved bytes: {}", bytes, source))]
    WriteReserved {
        bytes: u32,
        backtrace: Backtrace,
        source: std::io::Error,
    },

    #[snafu(display("Could not encode field `{}`", field))]
    EncodeField {
        field: &'static str,
        #[snafu(backtrace)]
        source: dcmio_encoding::text::EncodeTextError,
    },

    #[snafu(display("Field `{}` is too long: {} bytes", field, length))]
    FieldTooLong {
        field: &'static str,
        length: usize,
        backtrace: Backtrace,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Write one transfer syntax sub-item.
pub fn write_transfer_syntax_sub_item<W>(writer: &mut W, item: &TransferSyntaxSubItem) -> Result<()>
where
    W: ?Sized + Write,
{
    let name = DefaultCharacterSetCodec
        .encode(item.name())
        .context(EncodeFieldSnafu {
            field: "Transfer-syntax-name",
        })?;
    let item_length = u16::try_from(name.len()).ok().context(FieldTooLongSnafu {
        field: "Transfer-syntax-name",
        length: name.len(),
    })?;

    // 1 - Item-type - 40H
    writer
        .write_u8(TRANSFER_SYNTAX_ITEM_TYPE)
        .context(WriteFieldSnafu { field: "Item-type" })?;

    // 2 - Reserved - This reserved field shall be sent with a value 00H
    writer
        .write_u8(0x00)
        .context(WriteReservedSnafu { bytes: 1_u32 })?;

    // 3-4 - Item-length
    writer
        .write_u16::<BigEndian>(item_length)
        .context(WriteFieldSnafu {
            field: "Item-length",
        })?;

    // 5-xxx - Transfer-syntax-name
    writer.write_all(&name).context(WriteFieldSnafu {
        field: "Transfer-syntax-name",
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    #[test]
    fn write_sub_item() {
        let item = TransferSyntaxSubItem::from_uid("1.2.840.10008.1.2.1").unwrap();
        let mut out = Vec::new();
        write_transfer_syntax_sub_item(&mut out, &item).unwrap();

        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x40, 0x00, 0x00, 0x13,
            b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0',
            b'0', b'0', b'8', b'.', b'1', b'.', b'2', b'.', b'1',
        ];
        assert_eq!(out, expected);
        assert_eq!(out.len(), item.size());
    }

    #[test]
    fn name_too_long() {
        let item = TransferSyntaxSubItem::new("1".repeat(70_000));
        let mut out = Vec::new();
        assert_matches!(
            write_transfer_syntax_sub_item(&mut out, &item),
            Err(Error::FieldTooLong { length: 70_000, .. })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn non_ascii_name() {
        let item = TransferSyntaxSubItem::new("1.2.é");
        let mut out = Vec::new();
        assert_matches!(
            write_transfer_syntax_sub_item(&mut out, &item),
            Err(Error::EncodeField { .. })
        );
    }
}
