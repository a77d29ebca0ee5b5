//! Module containing the transfer syntax descriptor and the
//! negotiated syntax of a decoding session.
//!
//! This crate does not host specific transfer syntaxes. They are listed
//! in the `dcmio-transfer-syntax-registry` crate,
//! which implements [`TransferSyntaxIndex`].

use crate::swap::SwapCode;

pub use byteordered::Endianness;

/// Whether the value representation of each element is
/// present in the stream.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum NegotiatedSyntax {
    /// Not determined yet.
    Unknown,
    /// The VR is omitted and looked up in a dictionary by tag.
    Implicit,
    /// The VR is written in each element header.
    Explicit,
}

impl Default for NegotiatedSyntax {
    fn default() -> Self {
        NegotiatedSyntax::Unknown
    }
}

/// The codec requirements of a transfer syntax,
/// beyond the plain element encoding.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum Codec {
    /// No additional transformation.
    None,
    /// The pixel data is encapsulated in fragments,
    /// which this library keeps as raw bytes.
    EncapsulatedPixelData,
    /// The whole data set is transformed (e.g. deflated)
    /// after the file meta group. Not supported by the decoder.
    Dataset,
}

/// A transfer syntax specifier.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// The transfer syntax' requirements.
    codec: Codec,
}

/// Trait for containers of transfer syntax specifiers.
pub trait TransferSyntaxIndex {
    /// Obtain a transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of trailing null characters (`\0`) or spaces in `uid`.
    fn get(&self, uid: &str) -> Option<&TransferSyntax>;
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        (**self).get(uid)
    }
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        codec: Codec,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            codec,
        }
    }

    /// Create a new descriptor for an explicit VR little endian
    /// transfer syntax.
    pub const fn new_ele(uid: &'static str, name: &'static str, codec: Codec) -> Self {
        TransferSyntax::new(uid, name, Endianness::Little, true, codec)
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Obtain this transfer syntax' codec specification.
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Check whether this transfer syntax specifier uses explicit VR.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Check whether the data set is transformed as a whole,
    /// which the decoder does not support.
    pub fn is_dataset_encoded(&self) -> bool {
        self.codec == Codec::Dataset
    }

    /// Check whether pixel data is encapsulated.
    pub fn is_encapsulated_pixel_data(&self) -> bool {
        self.codec == Codec::EncapsulatedPixelData
    }

    /// The negotiated syntax implied by this transfer syntax.
    pub fn syntax(&self) -> NegotiatedSyntax {
        if self.explicit_vr {
            NegotiatedSyntax::Explicit
        } else {
            NegotiatedSyntax::Implicit
        }
    }

    /// The swap code implied by this transfer syntax.
    pub fn swap_code(&self) -> SwapCode {
        SwapCode::from(self.byte_order)
    }
}
