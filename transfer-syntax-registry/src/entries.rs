//! A list of known transfer syntax specifiers.
//!
//! - The three base transfer syntaxes (and the GE private one)
//!   are fully decoded.
//! - Transfer syntaxes with encapsulated pixel data are decoded,
//!   keeping the pixel data fragments as raw bytes.
//! - Deflated transfer syntaxes are listed so that they can be
//!   recognized and rejected.

use byteordered::Endianness;
use dcmio_encoding::transfer_syntax::{Codec, TransferSyntax as Ts};

// -- the three base transfer syntaxes, fully supported --

/// Implicit VR Little Endian: Default Transfer Syntax for DICOM
pub const IMPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    "1.2.840.10008.1.2",
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
    Codec::None,
);

/// Explicit VR Little Endian
pub const EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.1",
    "Explicit VR Little Endian",
    Codec::None,
);

/// Explicit VR Big Endian (retired)
pub const EXPLICIT_VR_BIG_ENDIAN: Ts = Ts::new(
    "1.2.840.10008.1.2.2",
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
    Codec::None,
);

/// Implicit VR Big Endian, a private transfer syntax by GE
pub const IMPLICIT_VR_BIG_ENDIAN_PRIVATE_GE: Ts = Ts::new(
    "1.2.840.113619.5.2",
    "Implicit VR Big Endian (GE private)",
    Endianness::Big,
    false,
    Codec::None,
);

// -- dataset level compression, recognized but not supported --

/// Deflated Explicit VR Little Endian
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.1.99",
    "Deflated Explicit VR Little Endian",
    Codec::Dataset,
);

/// JPIP Referenced Deflate
pub const JPIP_REFERENCED_DEFLATE: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.95",
    "JPIP Referenced Deflate",
    Codec::Dataset,
);

// -- encapsulated pixel data --

/// Encapsulated Uncompressed Explicit VR Little Endian
pub const ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.1.98",
    "Encapsulated Uncompressed Explicit VR Little Endian",
    Codec::EncapsulatedPixelData,
);

/// JPEG Baseline (Process 1): Default Transfer Syntax for Lossy JPEG 8-bit Image Compression
pub const JPEG_BASELINE: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.50",
    "JPEG Baseline (Process 1)",
    Codec::EncapsulatedPixelData,
);

/// JPEG Extended (Process 2 & 4): Default Transfer Syntax for Lossy JPEG 12-bit Image Compression (Process 4 only)
pub const JPEG_EXTENDED: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.51",
    "JPEG Extended (Process 2 & 4)",
    Codec::EncapsulatedPixelData,
);

/// JPEG Lossless, Non-Hierarchical (Process 14)
pub const JPEG_LOSSLESS_NON_HIERARCHICAL: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.57",
    "JPEG Lossless, Non-Hierarchical (Process 14)",
    Codec::EncapsulatedPixelData,
);

/// JPEG Lossless, Non-Hierarchical, First-Order Prediction
/// (Process 14 [Selection Value 1]):
/// Default Transfer Syntax for Lossless JPEG Image Compression
pub const JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.70",
    "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
    Codec::EncapsulatedPixelData,
);

/// JPEG-LS Lossless Image Compression
pub const JPEG_LS_LOSSLESS_IMAGE_COMPRESSION: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.80",
    "JPEG-LS Lossless Image Compression",
    Codec::EncapsulatedPixelData,
);

/// JPEG-LS Lossy (Near-Lossless) Image Compression
pub const JPEG_LS_LOSSY_IMAGE_COMPRESSION: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.81",
    "JPEG-LS Lossy (Near-Lossless) Image Compression",
    Codec::EncapsulatedPixelData,
);

/// JPEG 2000 Image Compression (Lossless Only)
pub const JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.90",
    "JPEG 2000 Image Compression (Lossless Only)",
    Codec::EncapsulatedPixelData,
);

/// JPEG 2000 Image Compression
pub const JPEG_2000_IMAGE_COMPRESSION: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.91",
    "JPEG 2000 Image Compression",
    Codec::EncapsulatedPixelData,
);

/// MPEG2 Main Profile / Main Level
pub const MPEG2_MAIN_PROFILE_MAIN_LEVEL: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.100",
    "MPEG2 Main Profile / Main Level",
    Codec::EncapsulatedPixelData,
);

/// MPEG-4 AVC/H.264 High Profile / Level 4.1
pub const MPEG4_AVC_H264_HIGH_PROFILE: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.4.102",
    "MPEG-4 AVC/H.264 High Profile / Level 4.1",
    Codec::EncapsulatedPixelData,
);

/// RLE Lossless
pub const RLE_LOSSLESS: Ts = Ts::new_ele(
    "1.2.840.10008.1.2.5",
    "RLE Lossless",
    Codec::EncapsulatedPixelData,
);
