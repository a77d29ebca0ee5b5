//! Scanning of the file meta group.
//!
//! The file meta group is always in explicit VR little endian,
//! whatever the syntax of the data set after it.
//! Its transfer syntax UID, when known,
//! replaces the syntax and byte order guessed by negotiation.

use crate::defect::{record, Defect, DefectKind};
use crate::error::{
    DecodeHeaderSnafu, ReadValueSnafu, Result, SeekSnafu, UndefinedMetaLengthSnafu,
    UnsupportedTransferSyntaxSnafu,
};
use crate::options::WorkaroundSet;
use crate::session::DecodeSession;
use crate::stateful::StatefulSource;
use crate::workaround;
use dcmio_core::{DataElement, DataSet, Tag, Value};
use dcmio_encoding::decode::{file_header_decoder, ElementDecoder};
use dcmio_encoding::text::decode_uid;
use dcmio_encoding::{NegotiatedSyntax, TransferSyntaxIndex};
use snafu::{OptionExt, ResultExt};
use std::io::{Read, Seek};

/// The last group of the file meta information.
const META_GROUP: u16 = 0x0002;

/// Whether the group can start a data set.
///
/// Besides the low groups, this accepts 0x0800,
/// which is group 0x0008 read in the wrong byte order.
fn is_dataset_start_group(group: u16) -> bool {
    group <= 0x0010 || group == 0x0800
}

/// Read the elements of the file meta group,
/// updating the session from the transfer syntax found there.
///
/// The source is left at the first element after the group.
pub(crate) fn scan_meta_group<S, I>(
    source: &mut StatefulSource<S>,
    session: &mut DecodeSession,
    registry: &I,
    workarounds: &WorkaroundSet,
    defects: &mut Vec<Defect>,
) -> Result<DataSet>
where
    S: Read + Seek,
    I: TransferSyntaxIndex,
{
    let decoder = ElementDecoder::Explicit(file_header_decoder());
    let mut meta = DataSet::new();

    loop {
        let position = source.position();
        let tag = match source.decode_tag(&decoder) {
            Ok(tag) => tag,
            // nothing after the meta group
            Err(e) if e.is_unexpected_eof() => break,
            Err(e) => return Err(e).context(DecodeHeaderSnafu { position }),
        };
        source.rewind(4).context(SeekSnafu)?;

        if tag.group() > META_GROUP {
            if !is_dataset_start_group(tag.group()) {
                record(
                    defects,
                    Defect::new(
                        DefectKind::UnexpectedDatasetGroup,
                        Some(tag),
                        position,
                        format!("data set starts with group {:04X}", tag.group()),
                    ),
                );
            }
            break;
        }

        let raw = source
            .decode_header(&decoder)
            .context(DecodeHeaderSnafu { position })?;
        let mut header = raw.header;
        if let Some(w) = workaround::find(workarounds, NegotiatedSyntax::Explicit, &header) {
            record(
                defects,
                Defect::new(
                    DefectKind::EncoderWorkaround,
                    Some(header.tag),
                    position,
                    format!("{}: length {} read as {}", w.id.name(), w.declared, w.corrected),
                ),
            );
            header = w.apply(header);
        }
        let len = header
            .len
            .get()
            .context(UndefinedMetaLengthSnafu { tag: header.tag })?;
        let bytes = source
            .read_bytes(len)
            .context(ReadValueSnafu { tag: header.tag, len })?;

        if header.tag == Tag::TRANSFER_SYNTAX {
            resolve_transfer_syntax(source, session, registry, &bytes, position, defects)?;
        }

        let value = if bytes.is_empty() {
            Value::Empty
        } else {
            Value::Bytes(bytes)
        };
        meta.push(DataElement::new(header, value));
    }

    Ok(meta)
}

fn resolve_transfer_syntax<S, I>(
    source: &mut StatefulSource<S>,
    session: &mut DecodeSession,
    registry: &I,
    value: &[u8],
    position: u64,
    defects: &mut Vec<Defect>,
) -> Result<()>
where
    S: Read + Seek,
    I: TransferSyntaxIndex,
{
    let uid = match decode_uid(value) {
        Ok(uid) => uid,
        Err(e) => {
            record(
                defects,
                Defect::new(
                    DefectKind::UnknownTransferSyntax,
                    Some(Tag::TRANSFER_SYNTAX),
                    position,
                    e.to_string(),
                ),
            );
            return Ok(());
        }
    };

    match registry.get(&uid) {
        Some(ts) if ts.is_dataset_encoded() => {
            source.seek_to_end().context(SeekSnafu)?;
            UnsupportedTransferSyntaxSnafu { uid }.fail()
        }
        Some(ts) => {
            tracing::debug!("Transfer syntax: {} ({})", ts.uid(), ts.name());
            session.apply_transfer_syntax(ts);
            Ok(())
        }
        None => {
            record(
                defects,
                Defect::new(
                    DefectKind::UnknownTransferSyntax,
                    Some(Tag::TRANSFER_SYNTAX),
                    position,
                    format!("transfer syntax {} is not registered", uid),
                ),
            );
            Ok(())
        }
    }
}
