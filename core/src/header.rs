//! This module contains an assortment of types required for interpreting
//! the headers of DICOM data elements:
//! the attribute tag, the value length
//! and the value representation.

use std::cmp::Ordering;
use std::fmt;
use std::str::{from_utf8, FromStr};

/// Trait for any DICOM entity (element or item) which may have a length.
pub trait HasLength {
    /// Retrieve the value data's length as specified by the data element or
    /// item, in bytes.
    ///
    /// According to the standard, the concrete value size may be undefined,
    /// which can be the case for sequence elements or specific primitive
    /// values.
    fn length(&self) -> Length;

    /// Check whether the value is empty (0 length).
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// A trait for a data type containing a DICOM header.
pub trait Header: HasLength {
    /// Retrieve the element's tag.
    fn tag(&self) -> Tag;

    /// Check whether this is the header of an item.
    fn is_item(&self) -> bool {
        self.tag() == Tag::ITEM
    }

    /// Check whether this is the header of an item delimiter.
    fn is_item_delimiter(&self) -> bool {
        self.tag() == Tag::ITEM_DELIMITER
    }

    /// Check whether this is the header of a sequence delimiter.
    fn is_sequence_delimiter(&self) -> bool {
        self.tag() == Tag::SEQUENCE_DELIMITER
    }
}

/// The header of a data element, as read from the stream.
///
/// In the implicit VR syntax the value representation is not
/// in the stream, in which case `vr` is `None`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DataElementHeader {
    /// DICOM tag
    pub tag: Tag,
    /// Value Representation, absent in implicit VR
    pub vr: Option<VR>,
    /// Element length
    pub len: Length,
}

impl HasLength for DataElementHeader {
    #[inline]
    fn length(&self) -> Length {
        self.len
    }
}

impl Header for DataElementHeader {
    #[inline]
    fn tag(&self) -> Tag {
        self.tag
    }
}

impl DataElementHeader {
    /// Create a new data element header with the given properties.
    #[inline]
    pub fn new<T: Into<Tag>>(tag: T, vr: VR, len: Length) -> DataElementHeader {
        DataElementHeader {
            tag: tag.into(),
            vr: Some(vr),
            len,
        }
    }

    /// Create a new data element header without a value representation,
    /// as found in the implicit VR syntax.
    #[inline]
    pub fn implicit<T: Into<Tag>>(tag: T, len: Length) -> DataElementHeader {
        DataElementHeader {
            tag: tag.into(),
            vr: None,
            len,
        }
    }

    /// Retrieve the element's value representation, if known.
    #[inline]
    pub fn vr(&self) -> Option<VR> {
        self.vr
    }

    /// Check whether this is the header of an encapsulated pixel data
    /// element: Pixel Data of undefined length, either OB/OW
    /// or without a VR as in the implicit syntax.
    pub fn is_encapsulated_pixeldata(&self) -> bool {
        self.tag == Tag::PIXEL_DATA
            && self.len.is_undefined()
            && matches!(self.vr, None | Some(VR::OB) | Some(VR::OW))
    }

    /// Check whether the value of this element is a sequence of items,
    /// either because of its VR or because of an undefined length
    /// outside of encapsulated pixel data.
    pub fn is_sequence(&self) -> bool {
        self.vr == Some(VR::SQ) || (self.len.is_undefined() && !self.is_encapsulated_pixeldata())
    }
}

/// An enum type for a DICOM value representation.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Single
    FL,
    /// Floating Point Double
    FD,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Double
    OD,
    /// Other Float
    OF,
    /// Other Long
    OL,
    /// Other Very Long
    OV,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Signed Very Long
    SV,
    /// Time
    TM,
    /// Unlimited Characters
    UC,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Universal Resource Identifier or Universal Resource Locator (URI/URL)
    UR,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
    /// Unsigned Very Long
    UV,
}

impl VR {
    /// Obtain the value representation corresponding to the given two bytes.
    /// Each byte should represent an alphabetic character in upper case.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        from_utf8(chars.as_ref())
            .ok()
            .and_then(|s| VR::from_str(s).ok())
    }

    /// Retrieve a string representation of this VR.
    pub fn to_string(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE",
            AS => "AS",
            AT => "AT",
            CS => "CS",
            DA => "DA",
            DS => "DS",
            DT => "DT",
            FL => "FL",
            FD => "FD",
            IS => "IS",
            LO => "LO",
            LT => "LT",
            OB => "OB",
            OD => "OD",
            OF => "OF",
            OL => "OL",
            OV => "OV",
            OW => "OW",
            PN => "PN",
            SH => "SH",
            SL => "SL",
            SQ => "SQ",
            SS => "SS",
            ST => "ST",
            SV => "SV",
            TM => "TM",
            UC => "UC",
            UI => "UI",
            UL => "UL",
            UN => "UN",
            UR => "UR",
            US => "US",
            UT => "UT",
            UV => "UV",
        }
    }

    /// Retrieve a copy of this VR's byte representation.
    /// The function returns two alphabetic characters in upper case.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.to_string().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// Whether values of this representation are binary,
    /// as opposed to character strings.
    ///
    /// UT is classified as binary, and so is SQ.
    pub fn is_binary(self) -> bool {
        use VR::*;
        matches!(
            self,
            AT | FL | FD | OB | OD | OF | OL | OV | OW | SL | SQ | SS | SV | UL | UN | US | UT | UV
        )
    }

    /// Whether values of this representation are ASCII-like text.
    #[inline]
    pub fn is_ascii(self) -> bool {
        !self.is_binary()
    }

    /// The width of each slot to reverse when normalizing
    /// the byte order of a value of this representation,
    /// or `None` if values of this representation are never swapped.
    ///
    /// Only SS and US (2 bytes) and SL and UL (4 bytes) are swapped.
    /// FL is not swapped even though it is a 4-byte binary value.
    pub fn swap_width(self) -> Option<u8> {
        match self {
            VR::SS | VR::US => Some(2),
            VR::SL | VR::UL => Some(4),
            _ => None,
        }
    }

    /// Whether the explicit VR header of this representation
    /// carries 2 reserved bytes and a 32-bit length
    /// instead of a 16-bit length.
    pub fn has_extended_length(self) -> bool {
        use VR::*;
        matches!(
            self,
            OB | OD | OF | OL | OV | OW | SQ | SV | UC | UN | UR | UT | UV
        )
    }
}

/// Obtain the value representation corresponding to the given string.
/// The string should hold exactly two UTF-8 encoded alphabetic characters
/// in upper case, otherwise no match is made.
impl FromStr for VR {
    type Err = &'static str;

    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        use VR::*;
        match string {
            "AE" => Ok(AE),
            "AS" => Ok(AS),
            "AT" => Ok(AT),
            "CS" => Ok(CS),
            "DA" => Ok(DA),
            "DS" => Ok(DS),
            "DT" => Ok(DT),
            "FL" => Ok(FL),
            "FD" => Ok(FD),
            "IS" => Ok(IS),
            "LO" => Ok(LO),
            "LT" => Ok(LT),
            "OB" => Ok(OB),
            "OD" => Ok(OD),
            "OF" => Ok(OF),
            "OL" => Ok(OL),
            "OV" => Ok(OV),
            "OW" => Ok(OW),
            "PN" => Ok(PN),
            "SH" => Ok(SH),
            "SL" => Ok(SL),
            "SQ" => Ok(SQ),
            "SS" => Ok(SS),
            "ST" => Ok(ST),
            "SV" => Ok(SV),
            "TM" => Ok(TM),
            "UC" => Ok(UC),
            "UI" => Ok(UI),
            "UL" => Ok(UL),
            "UN" => Ok(UN),
            "UR" => Ok(UR),
            "US" => Ok(US),
            "UT" => Ok(UT),
            "UV" => Ok(UV),
            _ => Err("no such value representation"),
        }
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(VR::to_string(*self))
    }
}

/// Idiomatic alias for a tag's group number.
pub type GroupNumber = u16;
/// Idiomatic alias for a tag's element number.
pub type ElementNumber = u16;

/// The data type for DICOM data element tags.
///
/// Both `(u16, u16)` and `[u16; 2]` can be
/// efficiently converted to this type as well.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// Item start sentinel.
    pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
    /// Item delimitation sentinel.
    pub const ITEM_DELIMITER: Tag = Tag(0xFFFE, 0xE00D);
    /// Sequence delimitation sentinel.
    pub const SEQUENCE_DELIMITER: Tag = Tag(0xFFFE, 0xE0DD);
    /// Pixel Data (7FE0,0010)
    pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
    /// Transfer Syntax UID (0002,0010), in the file meta group
    pub const TRANSFER_SYNTAX: Tag = Tag(0x0002, 0x0010);

    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }

    /// Whether this is one of the three item/sequence delimitation
    /// sentinels, which never hold domain data.
    #[inline]
    pub fn is_sentinel(self) -> bool {
        self.0 == 0xFFFE
    }

    /// Whether this is a group length element (element number 0).
    #[inline]
    pub fn is_group_length(self) -> bool {
        self.1 == 0
    }

    /// Whether the group number is odd, as in private attributes.
    #[inline]
    pub fn is_private(self) -> bool {
        self.0 & 1 == 1
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<[u16; 2]> for Tag {
    #[inline]
    fn from(value: [u16; 2]) -> Tag {
        Tag(value[0], value[1])
    }
}

/// A type for representing data set content length, in bytes.
/// An internal value of `0xFFFF_FFFF` represents an undefined
/// (unspecified) length, which would have to be determined
/// with a traversal based on the content's encoding.
///
/// Two lengths of undefined length are not equal.
///
/// ```
/// # use dcmio_core::Length;
/// assert_ne!(Length::UNDEFINED, Length::UNDEFINED);
/// assert!(Length::UNDEFINED.inner_eq(Length::UNDEFINED));
/// ```
///
/// Comparing between at least one undefined length is always `false`.
///
/// ```
/// # use dcmio_core::Length;
/// assert!(Length::defined(16) < Length::defined(64));
/// assert!(!(Length::UNDEFINED < Length::defined(64)));
/// assert!(!(Length::UNDEFINED > Length::defined(64)));
/// ```
#[derive(Clone, Copy)]
pub struct Length(pub u32);

const UNDEFINED_LEN: u32 = 0xFFFF_FFFF;

impl Length {
    /// A length that is undefined.
    pub const UNDEFINED: Self = Length(UNDEFINED_LEN);

    /// Create a new length value from its internal representation.
    /// This is equivalent to `Length(len)`.
    #[inline]
    pub fn new(len: u32) -> Self {
        Length(len)
    }

    /// Create a new length value with the given number of bytes.
    ///
    /// # Panic
    ///
    /// This function will panic if `len` represents an undefined length.
    #[inline]
    pub fn defined(len: u32) -> Self {
        assert_ne!(len, UNDEFINED_LEN);
        Length(len)
    }

    /// Check whether this length is undefined (unknown).
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED_LEN
    }

    /// Check whether this length is well defined (not undefined).
    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// Fetch the concrete length value, if available.
    /// Returns `None` if it represents an undefined length.
    #[inline]
    pub fn get(self) -> Option<u32> {
        match self.0 {
            UNDEFINED_LEN => None,
            v => Some(v),
        }
    }

    /// Check whether the length is equally specified as another length.
    /// Unlike the implemented `PartialEq`, two undefined lengths are
    /// considered equivalent by this method.
    #[inline]
    pub fn inner_eq(self, other: Length) -> bool {
        self.0 == other.0
    }
}

impl From<u32> for Length {
    #[inline]
    fn from(o: u32) -> Self {
        Length(o)
    }
}

impl PartialEq<Length> for Length {
    fn eq(&self, rhs: &Length) -> bool {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => false,
            (l1, l2) => l1 == l2,
        }
    }
}

impl PartialOrd<Length> for Length {
    fn partial_cmp(&self, rhs: &Length) -> Option<Ordering> {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => None,
            (l1, l2) => Some(l1.cmp(&l2)),
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("Length(Undefined)"),
            l => f.debug_tuple("Length").field(&l).finish(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("U/L"),
            l => write!(f, "{}", &l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_from_u16_pair() {
        let t = Tag::from((0x0010u16, 0x0020u16));
        assert_eq!(0x0010u16, t.group());
        assert_eq!(0x0020u16, t.element());
    }

    #[test]
    fn tag_display() {
        assert_eq!(Tag(0x0008, 0x0018).to_string(), "(0008,0018)");
        assert_eq!(Tag::ITEM_DELIMITER.to_string(), "(FFFE,E00D)");
        assert!(Tag::SEQUENCE_DELIMITER.is_sentinel());
        assert!(!Tag(0x0008, 0x0018).is_sentinel());
        assert!(Tag(0x0008, 0x0000).is_group_length());
        assert!(!Tag(0x0008, 0x0060).is_group_length());
    }

    #[test]
    fn vr_classification() {
        // binary kinds
        for vr in &[VR::AT, VR::FL, VR::FD, VR::OB, VR::OW, VR::SL, VR::SQ, VR::SS, VR::UL, VR::US, VR::UN, VR::UT] {
            assert!(vr.is_binary(), "{} should be binary", vr);
        }
        for vr in &[VR::AE, VR::CS, VR::DA, VR::LO, VR::PN, VR::UI] {
            assert!(vr.is_ascii(), "{} should be text", vr);
            assert_eq!(vr.swap_width(), None);
        }

        assert_eq!(VR::US.swap_width(), Some(2));
        assert_eq!(VR::SS.swap_width(), Some(2));
        assert_eq!(VR::UL.swap_width(), Some(4));
        assert_eq!(VR::SL.swap_width(), Some(4));
        // never swapped as raw arrays
        for vr in &[VR::AT, VR::FD, VR::OF, VR::OW, VR::SQ, VR::UN, VR::UT, VR::OB] {
            assert_eq!(vr.swap_width(), None, "{} should not be swapped", vr);
        }
        // known quirk: 4-byte float values are left as they are
        assert_eq!(VR::FL.swap_width(), None);
    }

    #[test]
    fn vr_extended_length() {
        for vr in &[VR::OB, VR::OW, VR::OF, VR::SQ, VR::UN, VR::UT] {
            assert!(vr.has_extended_length());
        }
        for vr in &[VR::UL, VR::US, VR::CS, VR::FL, VR::AT] {
            assert!(!vr.has_extended_length());
        }
    }

    #[test]
    fn vr_from_binary() {
        assert_eq!(VR::from_binary(*b"UL"), Some(VR::UL));
        assert_eq!(VR::from_binary([0x04, 0x00]), None);
        assert_eq!(VR::SQ.to_bytes(), *b"SQ");
    }

    #[test]
    fn element_header_kinds() {
        let h = DataElementHeader::new(Tag::PIXEL_DATA, VR::OB, Length::UNDEFINED);
        assert!(h.is_encapsulated_pixeldata());
        assert!(!h.is_sequence());

        let h = DataElementHeader::implicit(Tag::PIXEL_DATA, Length::UNDEFINED);
        assert!(h.is_encapsulated_pixeldata());
        assert!(!h.is_sequence());

        let h = DataElementHeader::new(Tag::PIXEL_DATA, VR::OW, Length(4));
        assert!(!h.is_encapsulated_pixeldata());

        let h = DataElementHeader::implicit((0x0040, 0x0275), Length::UNDEFINED);
        assert!(h.is_sequence());

        let h = DataElementHeader::new((0x0040, 0x0275), VR::SQ, Length(0));
        assert!(h.is_sequence());
        assert!(h.is_empty());
    }
}
