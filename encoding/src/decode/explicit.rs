//! Explicit VR element header decoding, in any byte order.

use crate::decode::basic::BasicDecoder;
use crate::decode::{
    Decode, RawHeader, ReadHeaderTagSnafu, ReadItemHeaderSnafu, ReadItemLengthSnafu, ReadLengthSnafu,
    ReadReservedSnafu, ReadTagSnafu, ReadVrSnafu, Result, UndefinedTextLengthSnafu,
};
use crate::swap::SwapCode;
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::{Tag, VR};
use snafu::{ensure, ResultExt};
use std::io::Read;

/// A data element header decoder for the explicit VR syntax.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ExplicitVRDecoder {
    basic: BasicDecoder,
}

impl ExplicitVRDecoder {
    /// Create a decoder for the given byte order.
    pub fn new(swap: SwapCode) -> Self {
        ExplicitVRDecoder {
            basic: BasicDecoder::new(swap),
        }
    }
}

impl Decode for ExplicitVRDecoder {
    fn swap_code(&self) -> SwapCode {
        self.basic.swap_code()
    }

    fn decode_raw_header<S>(&self, mut source: &mut S) -> Result<RawHeader>
    where
        S: ?Sized + Read,
    {
        // retrieve tag
        let tag = self
            .basic
            .decode_tag(&mut source)
            .context(ReadHeaderTagSnafu)?;

        if tag.is_sentinel() {
            // item delimiters do not have VR or reserved field
            let len = self
                .basic
                .decode_ul(&mut source)
                .context(ReadItemLengthSnafu)?;
            return Ok(RawHeader {
                header: DataElementHeader::implicit(tag, Length(len)),
                bytes_read: 8,
                reserved: None,
            });
        }

        // retrieve explicit VR
        let mut buf = [0u8; 2];
        source.read_exact(&mut buf).context(ReadVrSnafu)?;
        let vr = VR::from_binary(buf).unwrap_or_else(|| {
            tracing::warn!("Unknown VR code {:?} in element {}, assuming UN", buf, tag);
            VR::UN
        });

        // retrieve data length
        if vr.has_extended_length() {
            // 2 reserved bytes, then 4 bytes for data length
            let mut reserved = [0u8; 2];
            source.read_exact(&mut reserved).context(ReadReservedSnafu)?;
            let len = self
                .basic
                .decode_ul(&mut source)
                .context(ReadLengthSnafu)?;
            ensure!(
                vr != VR::UT || len != Length::UNDEFINED.0,
                UndefinedTextLengthSnafu { tag }
            );
            Ok(RawHeader {
                header: DataElementHeader::new(tag, vr, Length(len)),
                bytes_read: 12,
                reserved: Some(reserved),
            })
        } else {
            let len = self
                .basic
                .decode_us(&mut source)
                .context(ReadLengthSnafu)?;
            Ok(RawHeader {
                header: DataElementHeader::new(tag, vr, Length(u32::from(len))),
                bytes_read: 8,
                reserved: None,
            })
        }
    }

    fn decode_item_header<S>(&self, mut source: &mut S) -> Result<(Tag, Length)>
    where
        S: ?Sized + Read,
    {
        let tag = self
            .basic
            .decode_tag(&mut source)
            .context(ReadItemHeaderSnafu)?;
        let len = self
            .basic
            .decode_ul(&mut source)
            .context(ReadItemHeaderSnafu)?;
        Ok((tag, Length(len)))
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        self.basic.decode_tag(source).context(ReadTagSnafu)
    }
}
