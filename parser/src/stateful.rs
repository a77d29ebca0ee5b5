//! A byte source which keeps track of its position,
//! binding a seekable reader to the header decoder of a session.

use dcmio_encoding::decode::{Decode, ElementDecoder, RawHeader, Result as DecodeResult};
use dcmio_core::{Length, Tag};
use std::io::{self, Read, Seek, SeekFrom};

/// A seekable source with a position counter.
///
/// The counter is updated on every read and seek made through this type,
/// so that lengths can be checked without querying the source.
#[derive(Debug)]
pub struct StatefulSource<S> {
    from: S,
    position: u64,
}

impl<S> StatefulSource<S>
where
    S: Read + Seek,
{
    /// Wrap a source whose current position is `position`.
    pub fn new(from: S, position: u64) -> Self {
        StatefulSource { from, position }
    }

    /// The number of bytes from the start of the stream.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Same as `Decode::decode_raw_header` over the bound source.
    pub fn decode_header(&mut self, decoder: &ElementDecoder) -> DecodeResult<RawHeader> {
        let raw = decoder.decode_raw_header(&mut self.from)?;
        self.position += raw.bytes_read as u64;
        Ok(raw)
    }

    /// Same as `Decode::decode_item_header` over the bound source.
    pub fn decode_item_header(&mut self, decoder: &ElementDecoder) -> DecodeResult<(Tag, Length)> {
        let header = decoder.decode_item_header(&mut self.from)?;
        self.position += 8;
        Ok(header)
    }

    /// Same as `Decode::decode_tag` over the bound source.
    pub fn decode_tag(&mut self, decoder: &ElementDecoder) -> DecodeResult<Tag> {
        let tag = decoder.decode_tag(&mut self.from)?;
        self.position += 4;
        Ok(tag)
    }

    /// Fill the whole buffer from the source.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.from.read_exact(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Read exactly `len` bytes into a new vector.
    ///
    /// The buffer grows with the data actually read,
    /// so a bogus length does not allocate up front.
    pub fn read_bytes(&mut self, len: u32) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let n = self
            .from
            .by_ref()
            .take(u64::from(len))
            .read_to_end(&mut buf)?;
        self.position += n as u64;
        if n < len as usize {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {} bytes, found {}", len, n),
            ));
        }
        Ok(buf)
    }

    /// Move forward by `len` bytes without reading them.
    pub fn skip(&mut self, len: u32) -> io::Result<()> {
        self.position = self.from.seek(SeekFrom::Current(i64::from(len)))?;
        Ok(())
    }

    /// Move back by `len` bytes, to read them again.
    pub fn rewind(&mut self, len: u32) -> io::Result<()> {
        self.position = self.from.seek(SeekFrom::Current(-i64::from(len)))?;
        Ok(())
    }

    /// Move to the end of the source.
    pub fn seek_to_end(&mut self) -> io::Result<()> {
        self.position = self.from.seek(SeekFrom::End(0))?;
        Ok(())
    }

    /// Retrieve the underlying source.
    pub fn into_inner(self) -> S {
        self.from
    }
}
