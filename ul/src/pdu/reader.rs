/// PDU item reader module
use crate::pdu::{TransferSyntaxSubItem, TRANSFER_SYNTAX_ITEM_TYPE};
use byteordered::byteorder::{BigEndian, ReadBytesExt};
use dcmio_encoding::text::{trim_uid, DefaultCharacterSetCodec, TextCodec};
use snafu::{ensure, Backtrace, ResultExt, Snafu};
use std::io::Read;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not read PDU field `{}`", field))]
    ReadPduField {
        field: &'static str,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not read {} reserved bytes", bytes))]
    ReadReserved {
        bytes: u32,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Unexpected item type {:#04x}, expected {:#04x}",
        item_type,
        TRANSFER_SYNTAX_ITEM_TYPE
    ))]
    UnexpectedItemType { item_type: u8, backtrace: Backtrace },

    #[snafu(display("Could not decode text field `{}`", field))]
    DecodeText {
        field: &'static str,
        #[snafu(backtrace)]
        source: dcmio_encoding::text::DecodeTextError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read one transfer syntax sub-item.
pub fn read_transfer_syntax_sub_item<R>(reader: &mut R) -> Result<TransferSyntaxSubItem>
where
    R: ?Sized + Read,
{
    // 1 - Item-type - 40H
    let item_type = reader
        .read_u8()
        .context(ReadPduFieldSnafu { field: "Item-type" })?;
    ensure!(
        item_type == TRANSFER_SYNTAX_ITEM_TYPE,
        UnexpectedItemTypeSnafu { item_type }
    );

    // 2 - Reserved - This reserved field shall be sent with a value 00H but not
    // tested to this value when received.
    reader
        .read_u8()
        .context(ReadReservedSnafu { bytes: 1_u32 })?;

    // 3-4 - Item-length
    let item_length = reader
        .read_u16::<BigEndian>()
        .context(ReadPduFieldSnafu {
            field: "Item-length",
        })?;

    // 5-xxx - Transfer-syntax-name
    let bytes = read_n(reader, item_length as usize).context(ReadPduFieldSnafu {
        field: "Transfer-syntax-name",
    })?;
    let name = DefaultCharacterSetCodec
        .decode(&bytes)
        .context(DecodeTextSnafu {
            field: "Transfer-syntax-name",
        })?;
    let trimmed = trim_uid(&name);
    if trimmed.len() != name.len() {
        tracing::debug!("Trimmed padding from transfer syntax name {}", trimmed);
    }

    Ok(TransferSyntaxSubItem::new(trimmed))
}

fn read_n<R>(reader: &mut R, bytes_to_read: usize) -> std::io::Result<Vec<u8>>
where
    R: ?Sized + Read,
{
    let mut result = Vec::new();
    (&mut *reader)
        .take(bytes_to_read as u64)
        .read_to_end(&mut result)?;
    if result.len() < bytes_to_read {
        return Err(std::io::ErrorKind::UnexpectedEof.into());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    #[test]
    fn read_sub_item() {
        #[rustfmt::skip]
        let data: &[u8] = &[
            0x40, 0x00, 0x00, 0x11,
            b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1',
            b'0', b'0', b'0', b'8', b'.', b'1', b'.', b'2',
        ];
        let item = read_transfer_syntax_sub_item(&mut &data[..]).unwrap();
        assert_eq!(item.name(), "1.2.840.10008.1.2");
        assert_eq!(item.size(), data.len());
    }

    #[test]
    fn reserved_byte_is_not_tested() {
        let data: &[u8] = &[0x40, 0xff, 0x00, 0x03, b'1', b'.', b'2'];
        let item = read_transfer_syntax_sub_item(&mut &data[..]).unwrap();
        assert_eq!(item.name(), "1.2");
    }

    #[test]
    fn trailing_padding_is_trimmed() {
        let data: &[u8] = &[0x40, 0x00, 0x00, 0x04, b'1', b'.', b'2', 0x00];
        let item = read_transfer_syntax_sub_item(&mut &data[..]).unwrap();
        assert_eq!(item.name(), "1.2");
    }

    #[test]
    fn wrong_item_type() {
        let data: &[u8] = &[0x30, 0x00, 0x00, 0x03, b'1', b'.', b'2'];
        assert_matches!(
            read_transfer_syntax_sub_item(&mut &data[..]),
            Err(Error::UnexpectedItemType { item_type: 0x30, .. })
        );
    }

    #[test]
    fn truncated_name() {
        let data: &[u8] = &[0x40, 0x00, 0x00, 0x08, b'1', b'.', b'2'];
        assert_matches!(
            read_transfer_syntax_sub_item(&mut &data[..]),
            Err(Error::ReadPduField {
                field: "Transfer-syntax-name",
                ..
            })
        );
    }
}
