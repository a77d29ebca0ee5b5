//! This module contains the concept of a DICOM data dictionary.
//!
//! The decoder only needs a dictionary to know the value representation
//! of elements in implicit VR data sets: for telling sequences apart from
//! plain values and for deciding which values need byte swapping.
//! No standard dictionary content is bundled.

pub mod stub;

pub use self::stub::StubDataDictionary;

use crate::header::{Tag, VR};
use std::fmt::Debug;

/** Type trait for a dictionary of DICOM attributes. Attribute dictionaries provide the
 * means to convert a tag to an alias and vice versa, as well as a form of retrieving
 * additional information about the attribute.
 */
pub trait DataDictionary: Debug {
    /// The type of the dictionary entry.
    type Entry: DictionaryEntry;

    /// Fetch an entry by its usual alias (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases are usually case sensitive and not separated by spaces.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch an entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Fetch the typical value representation of the attribute with the given tag.
    fn vr_of(&self, tag: Tag) -> Option<VR> {
        self.by_tag(tag).map(|e| e.vr())
    }
}

impl<'a, D> DataDictionary for &'a D
where
    D: DataDictionary,
{
    type Entry = D::Entry;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }
}

/// The dictionary entry data type, representing a DICOM attribute.
pub trait DictionaryEntry {
    /// The attribute tag.
    fn tag(&self) -> Tag;
    /// The alias of the attribute, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;
    /// The _typical_  value representation of the attribute.
    fn vr(&self) -> VR;
}

/// A data type for a dictionary entry with a string slice for its alias.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DictionaryEntryRef<'a> {
    /// The attribute tag
    pub tag: Tag,
    /// The alias of the attribute, with no spaces, usually InCapitalizedCamelCase
    pub alias: &'a str,
    /// The _typical_  value representation of the attribute
    pub vr: VR,
}

impl<'a> DictionaryEntry for DictionaryEntryRef<'a> {
    fn tag(&self) -> Tag {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VR {
        self.vr
    }
}

/// A dictionary backed by a static slice of entries,
/// searched linearly.
///
/// Suitable for small, purpose-specific attribute tables.
#[derive(Debug, Clone, Copy)]
pub struct SliceDataDictionary {
    entries: &'static [DictionaryEntryRef<'static>],
}

impl SliceDataDictionary {
    /// Create a dictionary over the given entries.
    pub const fn new(entries: &'static [DictionaryEntryRef<'static>]) -> Self {
        SliceDataDictionary { entries }
    }
}

impl DataDictionary for SliceDataDictionary {
    type Entry = DictionaryEntryRef<'static>;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        self.entries.iter().find(|e| e.alias == name)
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        self.entries.iter().find(|e| e.tag == tag)
    }
}
