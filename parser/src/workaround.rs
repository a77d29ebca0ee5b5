//! Corrections for known broken encoders.
//!
//! Each entry of [`WORKAROUNDS`] names a header pattern left behind by a
//! historical encoder bug and the length that should have been written.
//! The reader consults the table once per element header,
//! and only for the entries enabled in its [`WorkaroundSet`].

use crate::options::WorkaroundSet;
use dcmio_core::{DataElementHeader, Length, Tag, VR};
use dcmio_encoding::NegotiatedSyntax;

/// Identifier of a workaround.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum WorkaroundId {
    /// Implicit VR elements declared with length 13
    /// instead of 10 (GE workstations).
    GeLength13,
    /// Explicit VR UL elements declared with length 6 instead of 4.
    UlLength6,
}

impl WorkaroundId {
    /// The name by which the workaround is toggled and reported.
    pub fn name(self) -> &'static str {
        match self {
            WorkaroundId::GeLength13 => "ge_length_13",
            WorkaroundId::UlLength6 => "ul_length_6",
        }
    }

    /// Look up a workaround by name.
    pub fn from_name(name: &str) -> Option<Self> {
        WORKAROUNDS.iter().map(|w| w.id).find(|id| id.name() == name)
    }
}

/// A table entry:
/// the trigger condition and the corrected length.
#[derive(Debug, Clone, PartialEq)]
pub struct Workaround {
    pub id: WorkaroundId,
    /// the syntax the header must be decoded in
    pub syntax: NegotiatedSyntax,
    /// the VR the header must declare, if any
    pub vr: Option<VR>,
    /// the declared length which triggers the correction
    pub declared: u32,
    /// the length to use instead
    pub corrected: u32,
    /// tags known to legitimately carry the declared length
    pub exempt: &'static [Tag],
}

/// All known workarounds.
pub static WORKAROUNDS: &[Workaround] = &[
    Workaround {
        id: WorkaroundId::GeLength13,
        syntax: NegotiatedSyntax::Implicit,
        vr: None,
        declared: 13,
        corrected: 10,
        // Manufacturer and Institution Name,
        // written with odd lengths by some older toolkits
        exempt: &[Tag(0x0008, 0x0070), Tag(0x0008, 0x0080)],
    },
    Workaround {
        id: WorkaroundId::UlLength6,
        syntax: NegotiatedSyntax::Explicit,
        vr: Some(VR::UL),
        declared: 6,
        corrected: 4,
        exempt: &[],
    },
];

impl Workaround {
    /// Whether this workaround applies to the given header.
    pub fn matches(&self, syntax: NegotiatedSyntax, header: &DataElementHeader) -> bool {
        self.syntax == syntax
            && header.len.inner_eq(Length(self.declared))
            && (self.vr.is_none() || header.vr == self.vr)
            && !self.exempt.contains(&header.tag)
    }

    /// The header with its length corrected.
    pub fn apply(&self, header: DataElementHeader) -> DataElementHeader {
        DataElementHeader {
            len: Length(self.corrected),
            ..header
        }
    }
}

/// Find the first enabled workaround which applies to the given header.
pub fn find(
    enabled: &WorkaroundSet,
    syntax: NegotiatedSyntax,
    header: &DataElementHeader,
) -> Option<&'static Workaround> {
    WORKAROUNDS
        .iter()
        .find(|w| enabled.is_enabled(w.id) && w.matches(syntax, header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ge_length_13() {
        let header = DataElementHeader::implicit((0x0008, 0x0018), Length(13));
        let w = find(&WorkaroundSet::default(), NegotiatedSyntax::Implicit, &header)
            .expect("workaround should apply");
        assert_eq!(w.id, WorkaroundId::GeLength13);
        assert_eq!(w.apply(header).len, Length(10));

        // exempt tags keep their length
        let header = DataElementHeader::implicit((0x0008, 0x0070), Length(13));
        assert!(find(&WorkaroundSet::default(), NegotiatedSyntax::Implicit, &header).is_none());
        // not in explicit VR
        let header = DataElementHeader::new((0x0008, 0x0018), VR::UI, Length(13));
        assert!(find(&WorkaroundSet::default(), NegotiatedSyntax::Explicit, &header).is_none());
    }

    #[test]
    fn ul_length_6() {
        let header = DataElementHeader::new((0x0028, 0x0008), VR::UL, Length(6));
        let w = find(&WorkaroundSet::default(), NegotiatedSyntax::Explicit, &header).unwrap();
        assert_eq!(w.apply(header).len, Length(4));

        let header = DataElementHeader::new((0x0028, 0x0008), VR::US, Length(6));
        assert!(find(&WorkaroundSet::default(), NegotiatedSyntax::Explicit, &header).is_none());
    }

    #[test]
    fn disabled_workarounds_do_not_apply() {
        let header = DataElementHeader::new((0x0028, 0x0008), VR::UL, Length(6));
        let set = WorkaroundSet::default().ul_length_6(false);
        assert!(find(&set, NegotiatedSyntax::Explicit, &header).is_none());
        assert!(find(&WorkaroundSet::none(), NegotiatedSyntax::Explicit, &header).is_none());
    }

    #[test]
    fn names() {
        assert_eq!(WorkaroundId::from_name("ge_length_13"), Some(WorkaroundId::GeLength13));
        assert_eq!(WorkaroundId::from_name("ul_length_6"), Some(WorkaroundId::UlLength6));
        assert_eq!(WorkaroundId::from_name("nope"), None);
    }
}
