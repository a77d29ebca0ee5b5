//! This crate contains the DICOM transfer syntax registry.
//! The transfer syntax registry maps a DICOM UID of a transfer syntax into the
//! respective transfer syntax specifier.
//!
//! The decoder looks up the UID found in the file meta group here,
//! to learn the real syntax and byte order of the main data set.

pub mod entries;

use dcmio_encoding::text::trim_uid;
use dcmio_encoding::transfer_syntax::{Codec, TransferSyntax, TransferSyntaxIndex};
use lazy_static::lazy_static;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Data type for a registry of DICOM transfer syntaxes.
pub struct TransferSyntaxRegistry {
    m: HashMap<&'static str, TransferSyntax>,
}

impl fmt::Debug for TransferSyntaxRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: HashMap<&str, &str> = self.m.iter().map(|(uid, ts)| (*uid, ts.name())).collect();
        f.debug_struct("TransferSyntaxRegistry")
            .field("m", &entries)
            .finish()
    }
}

impl TransferSyntaxRegistry {
    /// Obtain a transfer syntax by its UID.
    /// Trailing padding (null characters or spaces) is ignored.
    pub fn get<U: AsRef<str>>(&self, uid: U) -> Option<&TransferSyntax> {
        self.m.get(trim_uid(uid.as_ref()))
    }

    /// Whether the given UID names a known transfer syntax.
    pub fn contains<U: AsRef<str>>(&self, uid: U) -> bool {
        self.get(uid).is_some()
    }

    /// Iterate over all registered transfer syntaxes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        self.m.values()
    }

    /// Register the given transfer syntax.
    /// A previously registered specifier with the same UID is only replaced
    /// when the new one declares a codec where the old one had none.
    /// Returns whether the registry was changed.
    fn register(&mut self, ts: TransferSyntax) -> bool {
        match self.m.entry(ts.uid()) {
            Entry::Occupied(mut e) => {
                let replace = matches!(
                    (e.get().codec(), ts.codec()),
                    (Codec::None, Codec::EncapsulatedPixelData) | (Codec::None, Codec::Dataset)
                );
                if replace {
                    e.insert(ts);
                } else {
                    tracing::warn!("Transfer syntax {} is already registered", ts.uid());
                }
                replace
            }
            Entry::Vacant(e) => {
                e.insert(ts);
                true
            }
        }
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    #[inline]
    fn get(&self, uid: &str) -> Option<&TransferSyntax> {
        TransferSyntaxRegistry::get(self, uid)
    }
}

lazy_static! {
    static ref REGISTRY: TransferSyntaxRegistry = {
        let mut registry = TransferSyntaxRegistry { m: HashMap::new() };
        initialize_codecs(&mut registry);
        registry
    };
}

/// Retrieve the default transfer syntax.
pub fn default() -> TransferSyntax {
    entries::IMPLICIT_VR_LITTLE_ENDIAN
}

/// Retrieve the global transfer syntax registry.
pub fn get_registry() -> &'static TransferSyntaxRegistry {
    &REGISTRY
}

fn initialize_codecs(registry: &mut TransferSyntaxRegistry) {
    use crate::entries::*;

    for ts in [
        // the base transfer syntaxes, fully supported
        IMPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_BIG_ENDIAN,
        IMPLICIT_VR_BIG_ENDIAN_PRIVATE_GE,
        // recognized, but the data set cannot be decoded
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
        JPIP_REFERENCED_DEFLATE,
        // pixel data kept as encapsulated fragments
        ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN,
        JPEG_BASELINE,
        JPEG_EXTENDED,
        JPEG_LOSSLESS_NON_HIERARCHICAL,
        JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
        JPEG_LS_LOSSLESS_IMAGE_COMPRESSION,
        JPEG_LS_LOSSY_IMAGE_COMPRESSION,
        JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
        JPEG_2000_IMAGE_COMPRESSION,
        MPEG2_MAIN_PROFILE_MAIN_LEVEL,
        MPEG4_AVC_H264_HIGH_PROFILE,
        RLE_LOSSLESS,
    ]
    .iter()
    {
        registry.register(*ts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteordered::Endianness;
    use dcmio_encoding::{NegotiatedSyntax, SwapCode};

    #[test]
    fn lookup_base_transfer_syntaxes() {
        let registry = get_registry();

        let ts = registry.get("1.2.840.10008.1.2").expect("implicit VR LE");
        assert_eq!(ts.syntax(), NegotiatedSyntax::Implicit);
        assert_eq!(ts.swap_code(), SwapCode::LittleEndian);

        let ts = registry.get("1.2.840.10008.1.2.2").expect("explicit VR BE");
        assert_eq!(ts.syntax(), NegotiatedSyntax::Explicit);
        assert_eq!(ts.endianness(), Endianness::Big);
        assert_eq!(ts.swap_code(), SwapCode::BigEndian);
    }

    #[test]
    fn lookup_ignores_padding() {
        let registry = get_registry();
        assert_eq!(
            registry.get("1.2.840.10008.1.2.1\0").map(|ts| ts.uid()),
            Some("1.2.840.10008.1.2.1"),
        );
        assert!(registry.contains("1.2.840.10008.1.2.4.50 "));
        assert!(!registry.contains("1.2.3.4"));
    }

    #[test]
    fn deflate_is_dataset_encoded() {
        let ts = get_registry().get("1.2.840.10008.1.2.1.99").unwrap();
        assert!(ts.is_dataset_encoded());
        assert!(!entries::EXPLICIT_VR_LITTLE_ENDIAN.is_dataset_encoded());
        assert!(entries::RLE_LOSSLESS.is_encapsulated_pixel_data());
    }

    #[test]
    fn registry_as_index() {
        fn lookup<I: TransferSyntaxIndex>(index: I, uid: &str) -> Option<&'static str> {
            index.get(uid).map(|ts| ts.name())
        }
        assert_eq!(lookup(get_registry(), "1.2.840.10008.1.2"), Some("Implicit VR Little Endian"));
    }
}
