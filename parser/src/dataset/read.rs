//! This module contains the stream reader,
//! which turns a byte source into a tree of data elements.
//!
//! Sequences and items are tracked in an explicit stack of frames,
//! so nesting in the stream does not grow the call stack.
//! Each frame remembers where its value started,
//! so that defined lengths can be checked against the bytes read.
use crate::defect::{record, Defect, DefectKind};
use crate::error::{
    DecodeHeaderSnafu, DecodeItemHeaderSnafu, DepthLimitExceededSnafu, Error,
    InconsistentSequenceEndSnafu, MixedItemTerminationSnafu, PrematureEndSnafu,
    ReadFragmentSnafu, ReadValueSnafu, Result, SeekSnafu, UndefinedFragmentLengthSnafu,
    UnexpectedFragmentTagSnafu,
};
use crate::meta::scan_meta_group;
use crate::negotiate::negotiate;
use crate::options::ReadOptions;
use crate::session::DecodeSession;
use crate::stateful::StatefulSource;
use crate::workaround;
use dcmio_core::dictionary::stub::StubDataDictionary;
use dcmio_core::dictionary::DataDictionary;
use dcmio_core::value::{DataSetSequence, Item, PixelFragmentSequence, C};
use dcmio_core::{DataElement, DataElementHeader, DataSet, Length, Tag, Value, VR};
use dcmio_encoding::decode::{ElementDecoder, Error as DecodeError, RawHeader};
use dcmio_transfer_syntax_registry::get_registry;
use snafu::{IntoError, OptionExt, ResultExt};
use std::cmp::Ordering;
use std::io::{Read, Seek};

/// A sequence or item whose contents are being read.
#[derive(Debug)]
enum Frame {
    /// A sequence of items,
    /// expecting an item header or a sequence delimiter next.
    Sequence {
        header: DataElementHeader,
        items: C<Item>,
        /// the position of the first item
        base: u64,
    },
    /// An item, expecting an element header or an item delimiter next.
    Item {
        len: Length,
        dataset: DataSet,
        /// the position of the first element
        base: u64,
    },
}

/// The outcome of reading one element header at the root or in an item.
enum Step {
    /// A complete element.
    Element(DataElement),
    /// A sequence was opened, its items follow.
    Opened,
    /// Nothing to keep.
    Skipped,
}

/// A reader of DICOM streams in any syntax and byte order.
///
/// Creating the reader negotiates the syntax of the stream and
/// reads the file meta group, if there is one.
/// The data set is then read one root element at a time,
/// each with all of its nested sequences and items.
///
/// Values are kept as they are in the stream.
/// See [`ByteSwapFilter`](crate::swap::ByteSwapFilter)
/// for converting them to the byte order of the running machine.
#[derive(Debug)]
pub struct DicomStreamReader<S, D = StubDataDictionary> {
    source: StatefulSource<S>,
    session: DecodeSession,
    decoder: ElementDecoder,
    options: ReadOptions,
    dictionary: D,
    meta: DataSet,
    defects: Vec<Defect>,
    /// fuse the reading process if true
    hard_break: bool,
}

impl<S> DicomStreamReader<S>
where
    S: Read + Seek,
{
    /// Create a reader over the given source with the default options.
    ///
    /// The source is read from its beginning.
    pub fn new(source: S) -> Result<Self> {
        Self::new_with_options(source, ReadOptions::default())
    }

    /// Create a reader over the given source with the given options.
    pub fn new_with_options(source: S, options: ReadOptions) -> Result<Self> {
        Self::new_with_dictionary(source, StubDataDictionary, options)
    }
}

impl<S, D> DicomStreamReader<S, D>
where
    S: Read + Seek,
    D: DataDictionary,
{
    /// Create a reader which uses the given dictionary
    /// to recognize sequences in the implicit VR syntax.
    pub fn new_with_dictionary(mut source: S, dictionary: D, options: ReadOptions) -> Result<Self> {
        let negotiation = negotiate(&mut source)?;
        let mut defects = negotiation.defects;
        let mut session = DecodeSession::new(negotiation.syntax, negotiation.swap_code);
        let mut source = StatefulSource::new(source, negotiation.start);

        let meta = if session.is_explicit() {
            scan_meta_group(
                &mut source,
                &mut session,
                get_registry(),
                &options.workarounds,
                &mut defects,
            )?
        } else {
            DataSet::new()
        };

        Ok(DicomStreamReader {
            source,
            decoder: session.decoder(),
            session,
            options,
            dictionary,
            meta,
            defects,
            hard_break: false,
        })
    }

    /// The syntax and byte order of the stream.
    pub fn session(&self) -> &DecodeSession {
        &self.session
    }

    /// The elements of the file meta group.
    pub fn meta(&self) -> &DataSet {
        &self.meta
    }

    /// The tolerated defects found so far.
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// The dictionary used by this reader.
    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// The current position in the stream.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// Take the file meta group and the defects found so far,
    /// discarding the reader.
    pub fn into_parts(self) -> (DataSet, DecodeSession, Vec<Defect>) {
        (self.meta, self.session, self.defects)
    }

    /// Retrieve the underlying source.
    pub fn into_inner(self) -> S {
        self.source.into_inner()
    }

    /// Read all remaining elements of the data set.
    pub fn read_dataset(&mut self) -> Result<DataSet> {
        let mut dataset = DataSet::new();
        while let Some(element) = self.read_element()? {
            dataset.push(element);
        }
        Ok(dataset)
    }

    /// Read the elements of the next group.
    ///
    /// Reading stops before the first element of another group,
    /// which is left for the next read.
    /// Returns `None` at the end of the data set.
    pub fn read_group(&mut self) -> Result<Option<DataSet>> {
        let mut group = None;
        let mut dataset = DataSet::new();
        loop {
            if self.hard_break {
                break;
            }
            let position = self.source.position();
            let tag = match self.source.decode_tag(&self.decoder) {
                Ok(tag) => tag,
                Err(e) if e.is_unexpected_eof() => {
                    self.hard_break = true;
                    break;
                }
                Err(e) => {
                    self.hard_break = true;
                    return Err(e).context(DecodeHeaderSnafu { position });
                }
            };
            self.source.rewind(4).context(SeekSnafu)?;
            match group {
                None => group = Some(tag.group()),
                Some(g) if g != tag.group() => break,
                Some(_) => {}
            }
            match self.read_element()? {
                Some(element) => dataset.push(element),
                None => break,
            }
        }
        Ok(group.map(|_| dataset))
    }

    /// Read the next element at the root of the data set,
    /// including all of its sequences and items.
    ///
    /// Returns `None` at the end of the data set.
    /// After an error, nothing else is read.
    pub fn read_element(&mut self) -> Result<Option<DataElement>> {
        if self.hard_break {
            return Ok(None);
        }
        match self.read_root_element() {
            Ok(Some(element)) => Ok(Some(element)),
            Ok(None) => {
                self.hard_break = true;
                Ok(None)
            }
            Err(e) => {
                self.hard_break = true;
                Err(e)
            }
        }
    }

    fn read_root_element(&mut self) -> Result<Option<DataElement>> {
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let step = match stack.last() {
                None => {
                    let position = self.source.position();
                    let raw = match self.source.decode_header(&self.decoder) {
                        Ok(raw) => raw,
                        // Note: if `UnexpectedEof` was reached while trying to read
                        // an element tag at the root, then we assume that
                        // the end of a DICOM object was reached gracefully.
                        Err(e) if e.is_eof_at_tag() => return Ok(None),
                        Err(e) => return Err(e).context(DecodeHeaderSnafu { position }),
                    };
                    if raw.header.tag == Tag::ITEM_DELIMITER {
                        // ignore delimiter, we are not in a sequence
                        self.defect(
                            DefectKind::StrayItemDelimiter,
                            None,
                            position,
                            "item delimiter outside of a sequence",
                        );
                        continue;
                    }
                    self.read_element_value(raw, position, &mut stack)?
                }
                Some(Frame::Sequence { header, base, .. }) => {
                    let (seq_len, base) = (header.len, *base);
                    if let Some(len) = seq_len.get() {
                        if self.check_end(base, len)? {
                            self.close_sequence(&mut stack)
                        } else {
                            self.read_item_header(seq_len, &mut stack)?
                        }
                    } else {
                        self.read_item_header(seq_len, &mut stack)?
                    }
                }
                Some(Frame::Item { len, base, .. }) => {
                    let (item_len, base) = (*len, *base);
                    if let Some(len) = item_len.get() {
                        if self.check_end(base, len)? {
                            self.close_item(&mut stack);
                            continue;
                        }
                    }
                    let position = self.source.position();
                    let raw = match self.source.decode_header(&self.decoder) {
                        Ok(raw) => raw,
                        Err(e) => return Err(self.nested_error(e, position, stack.len())),
                    };
                    if raw.header.tag == Tag::ITEM_DELIMITER {
                        snafu::ensure!(
                            item_len.is_undefined(),
                            MixedItemTerminationSnafu {
                                position,
                                len: item_len,
                            }
                        );
                        self.check_delimiter_length(&raw.header, position);
                        self.close_item(&mut stack);
                        continue;
                    }
                    self.read_element_value(raw, position, &mut stack)?
                }
            };

            if let Step::Element(element) = step {
                // elements are only read at the root or inside items
                match stack.last_mut() {
                    Some(Frame::Item { dataset, .. }) => dataset.push(element),
                    _ => return Ok(Some(element)),
                }
            }
        }
    }

    /// Check the position against the end of a frame of defined length.
    /// Returns whether the end was reached.
    fn check_end(&self, base: u64, len: u32) -> Result<bool> {
        let end_of_sequence = base + u64::from(len);
        let bytes_read = self.source.position();
        match end_of_sequence.cmp(&bytes_read) {
            Ordering::Equal => Ok(true),
            Ordering::Less => InconsistentSequenceEndSnafu {
                end_of_sequence,
                bytes_read,
            }
            .fail(),
            Ordering::Greater => Ok(false),
        }
    }

    /// Read the next item header of the sequence on top of the stack.
    fn read_item_header(&mut self, seq_len: Length, stack: &mut Vec<Frame>) -> Result<Step> {
        let position = self.source.position();
        let (tag, len) = match self.source.decode_item_header(&self.decoder) {
            Ok(header) => header,
            Err(e) => return Err(self.nested_item_error(e, position, stack.len())),
        };

        match tag {
            Tag::ITEM => {
                stack.push(Frame::Item {
                    len,
                    dataset: DataSet::new(),
                    base: self.source.position(),
                });
                Ok(Step::Skipped)
            }
            Tag::SEQUENCE_DELIMITER => {
                if seq_len.is_defined() {
                    self.defect(
                        DefectKind::UnexpectedSequenceDelimiter,
                        Some(tag),
                        position,
                        format!("sequence delimiter in a sequence of length {}", seq_len),
                    );
                }
                let header = DataElementHeader::implicit(tag, len);
                self.check_delimiter_length(&header, position);
                Ok(self.close_sequence(stack))
            }
            _ => {
                // taken as the end of the sequence
                self.defect(
                    DefectKind::UnexpectedItemTag,
                    Some(tag),
                    position,
                    "expected an item, the sequence is closed here",
                );
                Ok(self.close_sequence(stack))
            }
        }
    }

    /// Pop the sequence on top of the stack and make it an element.
    fn close_sequence(&mut self, stack: &mut Vec<Frame>) -> Step {
        match stack.pop() {
            Some(Frame::Sequence { header, items, .. }) => {
                let value = Value::Sequence(DataSetSequence::new(items, header.len));
                Step::Element(DataElement::new(header, value))
            }
            Some(frame) => {
                // not a sequence, put it back
                stack.push(frame);
                Step::Skipped
            }
            None => Step::Skipped,
        }
    }

    /// Pop the item on top of the stack into its sequence.
    fn close_item(&mut self, stack: &mut Vec<Frame>) {
        if let Some(Frame::Item { len, dataset, .. }) = stack.pop() {
            if let Some(Frame::Sequence { items, .. }) = stack.last_mut() {
                items.push(Item::new(len, dataset));
            }
        }
    }

    /// Handle a decoded element header:
    /// open a sequence or read the value that follows.
    fn read_element_value(
        &mut self,
        raw: RawHeader,
        position: u64,
        stack: &mut Vec<Frame>,
    ) -> Result<Step> {
        let RawHeader {
            mut header,
            reserved,
            ..
        } = raw;

        if let Some(reserved) = reserved.filter(|r| *r != [0, 0]) {
            self.defect(
                DefectKind::NonZeroReserved,
                Some(header.tag),
                position,
                format!("reserved bytes {:02X?}", reserved),
            );
        }

        if header.tag.is_sentinel() {
            self.defect(
                DefectKind::UnexpectedItemTag,
                Some(header.tag),
                position,
                "delimiter in place of a data element",
            );
            return Ok(Step::Skipped);
        }

        if let Some(w) = workaround::find(&self.options.workarounds, self.session.syntax, &header) {
            self.defect(
                DefectKind::EncoderWorkaround,
                Some(header.tag),
                position,
                format!("{}: length {} read as {}", w.id.name(), w.declared, w.corrected),
            );
            header = w.apply(header);
        }

        if header.is_encapsulated_pixeldata() {
            return self.read_fragments(header, stack.len()).map(Step::Element);
        }

        let implicit_sq = header.vr.is_none() && self.dictionary.vr_of(header.tag) == Some(VR::SQ);
        if header.is_sequence() || implicit_sq {
            let depth = stack
                .iter()
                .filter(|frame| matches!(frame, Frame::Sequence { .. }))
                .count();
            snafu::ensure!(
                depth < self.options.max_depth,
                DepthLimitExceededSnafu {
                    position,
                    max_depth: self.options.max_depth,
                }
            );
            stack.push(Frame::Sequence {
                header,
                items: C::new(),
                base: self.source.position(),
            });
            return Ok(Step::Opened);
        }

        let len = header.len.0;
        let value = if self.should_skip(&header) {
            self.source.skip(len).context(SeekSnafu)?;
            Value::Empty
        } else if len == 0 {
            Value::Empty
        } else {
            if len % 2 == 1 && self.session.is_explicit() {
                self.defect(
                    DefectKind::OddLength,
                    Some(header.tag),
                    position,
                    format!("value length {} is odd", len),
                );
            }
            let bytes = self
                .source
                .read_bytes(len)
                .context(ReadValueSnafu { tag: header.tag, len })?;
            Value::Bytes(bytes)
        };

        Ok(Step::Element(DataElement::new(header, value)))
    }

    /// Whether the value of the element is skipped in structure-only mode.
    fn should_skip(&self, header: &DataElementHeader) -> bool {
        if !self.options.structure_only {
            return false;
        }
        header.len.0 >= self.options.skip_threshold
            || (self.session.is_explicit() && matches!(header.vr, Some(VR::OB) | Some(VR::OW)))
    }

    /// Read the fragments of encapsulated pixel data,
    /// up to and including the sequence delimiter.
    fn read_fragments(&mut self, header: DataElementHeader, depth: usize) -> Result<DataElement> {
        let mut offset_table = None;
        let mut fragments: C<Vec<u8>> = C::new();

        loop {
            let position = self.source.position();
            let (tag, len) = match self.source.decode_item_header(&self.decoder) {
                Ok(header) => header,
                Err(e) => return Err(self.nested_item_error(e, position, depth + 1)),
            };
            match tag {
                Tag::ITEM => {
                    let len = len
                        .get()
                        .context(UndefinedFragmentLengthSnafu { position })?;
                    let bytes = self
                        .source
                        .read_bytes(len)
                        .context(ReadFragmentSnafu { len })?;
                    // the first item is the basic offset table
                    if offset_table.is_none() {
                        offset_table = Some(bytes);
                    } else {
                        fragments.push(bytes);
                    }
                }
                Tag::SEQUENCE_DELIMITER => {
                    let delimiter = DataElementHeader::implicit(tag, len);
                    self.check_delimiter_length(&delimiter, position);
                    break;
                }
                _ => return UnexpectedFragmentTagSnafu { tag, position }.fail(),
            }
        }

        let value = PixelFragmentSequence::new(offset_table.unwrap_or_default(), fragments);
        Ok(DataElement::new(header, Value::PixelSequence(value)))
    }

    fn check_delimiter_length(&mut self, header: &DataElementHeader, position: u64) {
        if header.len.0 != 0 {
            self.defect(
                DefectKind::NonZeroDelimiterLength,
                Some(header.tag),
                position,
                format!("delimiter length is {}", header.len),
            );
        }
    }

    fn defect(&mut self, kind: DefectKind, tag: Option<Tag>, position: u64, detail: impl Into<String>) {
        record(&mut self.defects, Defect::new(kind, tag, position, detail));
    }

    /// Map an element header error inside a sequence or item.
    fn nested_error(&self, e: DecodeError, position: u64, depth: usize) -> Error {
        if e.is_unexpected_eof() {
            PrematureEndSnafu {
                position: self.source.position(),
                depth,
            }
            .build()
        } else {
            DecodeHeaderSnafu { position }.into_error(e)
        }
    }

    /// Map an item header error inside a sequence.
    fn nested_item_error(&self, e: DecodeError, position: u64, depth: usize) -> Error {
        if e.is_unexpected_eof() {
            PrematureEndSnafu {
                position: self.source.position(),
                depth,
            }
            .build()
        } else {
            DecodeItemHeaderSnafu { position }.into_error(e)
        }
    }
}

impl<S, D> Iterator for DicomStreamReader<S, D>
where
    S: Read + Seek,
    D: DataDictionary,
{
    type Item = Result<DataElement>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_element().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::DicomStreamReader;
    use crate::defect::DefectKind;
    use crate::error::Error;
    use crate::options::ReadOptions;
    use dcmio_core::{HasLength, Length, Tag, Value, VR};
    use matches::assert_matches;
    use std::io::Cursor;

    #[rustfmt::skip]
    static CHARSET: &[u8] = &[
        // (0008,0005) CS 2 "AB"
        0x08, 0x00, 0x05, 0x00, b'C', b'S', 0x02, 0x00, b'A', b'B',
    ];

    #[rustfmt::skip]
    static PATIENT_NAME: &[u8] = &[
        // (0010,0010) PN 4 "Doe^"
        0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00, b'D', b'o', b'e', b'^',
    ];

    #[rustfmt::skip]
    static REFERENCED_UID: &[u8] = &[
        // (0008,1150) UI 4 "1.2"
        0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00, b'1', b'.', b'2', 0x00,
    ];

    fn stream(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn undefined_length_sequence() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            // (0008,1140) SQ, undefined length
            &[0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff],
            // item, undefined length
            &[0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff],
            REFERENCED_UID,
            // item delimiter
            &[0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00],
            // sequence delimiter
            &[0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00],
            PATIENT_NAME,
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        let dataset = reader.read_dataset().unwrap();
        assert_eq!(dataset.len(), 3);

        let seq = dataset.get((0x0008, 0x1140)).unwrap();
        assert_eq!(seq.vr(), Some(VR::SQ));
        assert!(seq.header().len.is_undefined());
        let items = seq.value().items().unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].length().is_undefined());
        let uid = items[0].dataset().get((0x0008, 0x1150)).unwrap();
        assert_eq!(uid.value().bytes(), Some(&b"1.2\0"[..]));

        let name = dataset.get((0x0010, 0x0010)).unwrap();
        assert_eq!(name.value().bytes(), Some(&b"Doe^"[..]));
        assert!(reader.defects().is_empty());
        assert_eq!(reader.position(), data.len() as u64);
    }

    #[test]
    fn defined_length_sequence() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            // (0008,1140) SQ 20
            &[0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0x14, 0x00, 0x00, 0x00],
            // item 12
            &[0xfe, 0xff, 0x00, 0xe0, 0x0c, 0x00, 0x00, 0x00],
            REFERENCED_UID,
            PATIENT_NAME,
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        let dataset = reader.read_dataset().unwrap();
        assert_eq!(dataset.len(), 3);
        let seq = dataset.get((0x0008, 0x1140)).unwrap();
        assert_eq!(seq.header().len, Length(20));
        let items = seq.value().items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].length(), Length(12));
        assert_eq!(items[0].dataset().len(), 1);
        assert!(reader.defects().is_empty());
    }

    #[test]
    fn sequence_overrun_is_an_error() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            // (0008,1140) SQ 18, but its item takes 20 bytes
            &[0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0x12, 0x00, 0x00, 0x00],
            &[0xfe, 0xff, 0x00, 0xe0, 0x0c, 0x00, 0x00, 0x00],
            REFERENCED_UID,
            PATIENT_NAME,
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        assert!(reader.read_element().unwrap().is_some());
        let err = reader.read_element().unwrap_err();
        assert_matches!(
            err,
            Error::InconsistentSequenceEnd {
                end_of_sequence: 40,
                bytes_read: 42,
                ..
            }
        );
        // fused after the error
        assert!(reader.read_element().unwrap().is_none());
    }

    #[test]
    fn item_delimiter_in_defined_length_item() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            &[0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff],
            // item 20, ended early by a delimiter
            &[0xfe, 0xff, 0x00, 0xe0, 0x14, 0x00, 0x00, 0x00],
            REFERENCED_UID,
            &[0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00],
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        reader.read_element().unwrap();
        assert_matches!(
            reader.read_element(),
            Err(Error::MixedItemTermination { position: 42, .. })
        );
    }

    #[test]
    fn stray_item_delimiter_at_root() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            &[0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00],
            PATIENT_NAME,
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        let dataset = reader.read_dataset().unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(reader.defects().len(), 1);
        assert_eq!(reader.defects()[0].kind, DefectKind::StrayItemDelimiter);
        assert_eq!(reader.defects()[0].position, 10);
    }

    #[test]
    fn truncated_sequence() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            &[0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff],
            &[0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff],
            REFERENCED_UID,
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        reader.read_element().unwrap();
        let err = reader.read_element().unwrap_err();
        assert_matches!(err, Error::PrematureEnd { depth: 2, .. });
        assert_eq!(err.category(), crate::error::ErrorCategory::Io);
    }

    #[test]
    fn encapsulated_pixel_data() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            // (7FE0,0010) OB, undefined length
            &[0xe0, 0x7f, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff],
            // empty offset table
            &[0xfe, 0xff, 0x00, 0xe0, 0x00, 0x00, 0x00, 0x00],
            // two fragments
            &[0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04],
            &[0xfe, 0xff, 0x00, 0xe0, 0x02, 0x00, 0x00, 0x00, 0x05, 0x06],
            &[0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00],
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        let dataset = reader.read_dataset().unwrap();
        let pixel_data = dataset.get(Tag::PIXEL_DATA).unwrap();
        match pixel_data.value() {
            Value::PixelSequence(seq) => {
                assert!(seq.offset_table().is_empty());
                assert_eq!(seq.fragments(), &[vec![1, 2, 3, 4], vec![5, 6]][..]);
            }
            value => panic!("expected pixel sequence, got {:?}", value),
        }
    }

    #[test]
    fn depth_limit() {
        let open_seq: &[u8] = &[0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff];
        let open_item: &[u8] = &[0xfe, 0xff, 0x00, 0xe0, 0xff, 0xff, 0xff, 0xff];
        let data = stream(&[CHARSET, open_seq, open_item, open_seq, open_item, open_seq]);

        let options = ReadOptions::default().max_depth(2);
        let mut reader = DicomStreamReader::new_with_options(Cursor::new(&data[..]), options).unwrap();
        reader.read_element().unwrap();
        let err = reader.read_element().unwrap_err();
        assert_matches!(err, Error::DepthLimitExceeded { max_depth: 2, position: 50, .. });
    }

    #[test]
    fn structure_only_skips_large_values() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            // (0029,1010) OB 4
            &[0x29, 0x00, 0x10, 0x10, b'O', b'B', 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 1, 2, 3, 4],
            PATIENT_NAME,
        ]);

        let options = ReadOptions::default().structure_only(true);
        let mut reader = DicomStreamReader::new_with_options(Cursor::new(&data[..]), options).unwrap();
        let dataset = reader.read_dataset().unwrap();
        let blob = dataset.get((0x0029, 0x1010)).unwrap();
        assert_eq!(blob.header().len, Length(4));
        assert_eq!(blob.value(), &Value::Empty);
        // small values are still read
        let name = dataset.get((0x0010, 0x0010)).unwrap();
        assert_eq!(name.value().bytes(), Some(&b"Doe^"[..]));
    }

    #[test]
    fn skipped_odd_length_value_is_not_a_defect() {
        #[rustfmt::skip]
        let data = stream(&[
            CHARSET,
            // (0029,1011) OB 3
            &[0x29, 0x00, 0x11, 0x10, b'O', b'B', 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 1, 2, 3],
            PATIENT_NAME,
        ]);

        let options = ReadOptions::default().structure_only(true);
        let mut reader = DicomStreamReader::new_with_options(Cursor::new(&data[..]), options).unwrap();
        let dataset = reader.read_dataset().unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get((0x0029, 0x1011)).unwrap().value(), &Value::Empty);
        assert!(reader.defects().is_empty());

        // the same value read in full is flagged
        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        reader.read_dataset().unwrap();
        let kinds: Vec<_> = reader.defects().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DefectKind::OddLength]);
    }

    #[test]
    fn odd_length_and_reserved_bytes() {
        #[rustfmt::skip]
        let data = stream(&[
            // (0008,0005) CS 3
            &[0x08, 0x00, 0x05, 0x00, b'C', b'S', 0x03, 0x00, b'A', b'B', b'C'],
            // (0009,1000) UN 2, reserved 01 00
            &[0x09, 0x00, 0x00, 0x10, b'U', b'N', 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0xaa, 0xbb],
        ]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        let dataset = reader.read_dataset().unwrap();
        assert_eq!(dataset.len(), 2);
        let kinds: Vec<_> = reader.defects().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DefectKind::OddLength, DefectKind::NonZeroReserved]);
    }

    #[test]
    fn read_by_group() {
        let data = stream(&[CHARSET, REFERENCED_UID, PATIENT_NAME]);

        let mut reader = DicomStreamReader::new(Cursor::new(&data[..])).unwrap();
        let group = reader.read_group().unwrap().unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.iter().all(|e| e.header().tag.group() == 0x0008));
        let group = reader.read_group().unwrap().unwrap();
        assert_eq!(group.len(), 1);
        assert!(reader.read_group().unwrap().is_none());
    }
}
