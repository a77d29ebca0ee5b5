//! The state of one decoding session.

use dcmio_encoding::decode::ElementDecoder;
use dcmio_encoding::encode::ElementEncoder;
use dcmio_encoding::{NegotiatedSyntax, SwapCode, TransferSyntax};

/// The syntax and byte order in which a stream is decoded.
///
/// A session starts from the outcome of negotiation,
/// and the transfer syntax of the file meta group may override it.
/// Every read in the session goes through this object,
/// so independent streams can be decoded side by side.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DecodeSession {
    /// whether the VR of each element is in the stream
    pub syntax: NegotiatedSyntax,
    /// the byte order of the stream
    pub swap_code: SwapCode,
    /// the transfer syntax declared in the file meta group, if any
    pub transfer_syntax: Option<TransferSyntax>,
}

impl DecodeSession {
    pub fn new(syntax: NegotiatedSyntax, swap_code: SwapCode) -> Self {
        DecodeSession {
            syntax,
            swap_code,
            transfer_syntax: None,
        }
    }

    /// Whether headers are decoded in the explicit VR syntax.
    pub fn is_explicit(&self) -> bool {
        self.syntax == NegotiatedSyntax::Explicit
    }

    /// An element header decoder for this session.
    pub fn decoder(&self) -> ElementDecoder {
        ElementDecoder::new(self.syntax, self.swap_code)
    }

    /// An element header encoder for this session.
    pub fn encoder(&self) -> ElementEncoder {
        ElementEncoder::new(self.syntax, self.swap_code)
    }

    /// Take the syntax and byte order from the given transfer syntax.
    pub fn apply_transfer_syntax(&mut self, ts: &TransferSyntax) {
        self.syntax = ts.syntax();
        self.swap_code = ts.swap_code();
        self.transfer_syntax = Some(*ts);
    }
}
