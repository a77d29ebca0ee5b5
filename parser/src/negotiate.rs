//! Negotiation of the syntax and byte order of a stream.
//!
//! Nothing is known about a stream before it is read.
//! The first element tells whether the VR is in the stream,
//! and a leading group length element tells the byte order,
//! since its value length is always 4.

use crate::defect::{record, Defect, DefectKind};
use crate::error::{ReadFirstElementSnafu, ReadPreambleSnafu, Result, SeekSnafu, UnknownByteOrderSnafu};
use dcmio_core::{Tag, VR};
use dcmio_encoding::{NegotiatedSyntax, SwapCode};
use snafu::{OptionExt, ResultExt};
use std::io::{Read, Seek, SeekFrom};

/// The length of the file preamble.
pub const PREAMBLE_LEN: usize = 128;

/// The magic code after the file preamble.
pub const MAGIC_CODE: &[u8; 4] = b"DICM";

/// Application signatures which may legitimately fill the preamble.
static PREAMBLE_SIGNATURES: &[&[u8]] = &[
    // TIFF, little and big endian
    b"II*\0",
    b"MM\0*",
];

/// The outcome of negotiating a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiation {
    /// whether the VR of each element is in the stream
    pub syntax: NegotiatedSyntax,
    /// the byte order of the stream
    pub swap_code: SwapCode,
    /// the position of the first data element,
    /// after the preamble and magic code if present
    pub start: u64,
    /// tolerated defects found while negotiating
    pub defects: Vec<Defect>,
}

/// Determine the syntax and byte order of the stream.
///
/// The source is read from the beginning,
/// and is left at the first data element.
/// Without evidence of another byte order,
/// the stream is taken to be little endian.
pub fn negotiate<S>(source: &mut S) -> Result<Negotiation>
where
    S: ?Sized + Read + Seek,
{
    let mut defects = Vec::new();

    let start = match read_preamble(source)? {
        Some(preamble) => {
            if !is_clean_preamble(&preamble) {
                record(
                    &mut defects,
                    Defect::new(
                        DefectKind::PreambleGarbage,
                        None,
                        0,
                        "the file preamble contains unrecognized data",
                    ),
                );
            }
            (PREAMBLE_LEN + MAGIC_CODE.len()) as u64
        }
        None => 0,
    };

    // tag and VR candidate, both read as little endian
    let mut buf = [0u8; 6];
    source.read_exact(&mut buf).context(ReadFirstElementSnafu)?;
    let tag = Tag(
        SwapCode::LittleEndian.read_u16(&buf[0..2]),
        SwapCode::LittleEndian.read_u16(&buf[2..4]),
    );
    let vr = VR::from_binary([buf[4], buf[5]]);

    let syntax = if vr.is_some() {
        NegotiatedSyntax::Explicit
    } else {
        NegotiatedSyntax::Implicit
    };
    let mut swap_code = SwapCode::LittleEndian;

    if tag.is_private() {
        record(
            &mut defects,
            Defect::new(
                DefectKind::PrivateLeadingElement,
                Some(tag),
                start,
                "the stream starts with a private element",
            ),
        );
    } else if vr.is_none() && tag.is_group_length() {
        // group length: the 32-bit length field follows the tag
        let mut rest = [0u8; 2];
        source.read_exact(&mut rest).context(ReadFirstElementSnafu)?;
        let raw = SwapCode::LittleEndian.read_u32(&[buf[4], buf[5], rest[0], rest[1]]);
        swap_code = SwapCode::from_group_length_probe(raw).context(UnknownByteOrderSnafu { raw })?;
    }

    source.seek(SeekFrom::Start(start)).context(SeekSnafu)?;

    tracing::debug!(
        "Negotiated {:?} VR syntax in {} byte order, data starts at {}",
        syntax,
        swap_code,
        start
    );

    Ok(Negotiation {
        syntax,
        swap_code,
        start,
        defects,
    })
}

/// Read the preamble and magic code at the start of the source.
///
/// If the magic code is there, the source is left right after it
/// and the preamble is returned.
/// Otherwise the source is rewound to the start.
fn read_preamble<S>(source: &mut S) -> Result<Option<Vec<u8>>>
where
    S: ?Sized + Read + Seek,
{
    source.seek(SeekFrom::Start(0)).context(SeekSnafu)?;
    let mut buf = Vec::with_capacity(PREAMBLE_LEN + MAGIC_CODE.len());
    (&mut *source)
        .take((PREAMBLE_LEN + MAGIC_CODE.len()) as u64)
        .read_to_end(&mut buf)
        .context(ReadPreambleSnafu)?;

    if buf.len() == PREAMBLE_LEN + MAGIC_CODE.len() && &buf[PREAMBLE_LEN..] == MAGIC_CODE {
        buf.truncate(PREAMBLE_LEN);
        Ok(Some(buf))
    } else {
        source.seek(SeekFrom::Start(0)).context(SeekSnafu)?;
        Ok(None)
    }
}

fn is_clean_preamble(preamble: &[u8]) -> bool {
    preamble.iter().all(|b| *b == 0)
        || PREAMBLE_SIGNATURES
            .iter()
            .any(|signature| preamble.starts_with(signature))
}
