//! Records of tolerated defects.
//!
//! Decoding does not stop at these.
//! Each one is logged when it is found
//! and kept by the reader for later inspection.

use dcmio_core::Tag;
use std::fmt;

/// The kind of a tolerated defect.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum DefectKind {
    /// The 128 bytes before the "DICM" magic code are neither zero
    /// nor a known application signature.
    PreambleGarbage,
    /// The stream starts with an element of an odd group.
    PrivateLeadingElement,
    /// The first element after the file meta group
    /// is in a group that a data set does not start with.
    UnexpectedDatasetGroup,
    /// The transfer syntax UID in the file meta group is not registered.
    UnknownTransferSyntax,
    /// An item or sequence delimiter has a nonzero length.
    NonZeroDelimiterLength,
    /// The reserved bytes of an explicit VR header are not zero.
    NonZeroReserved,
    /// A value has an odd length.
    OddLength,
    /// A sequence contains something other than an item
    /// where an item was expected.
    UnexpectedItemTag,
    /// An item delimiter was found outside of any item.
    StrayItemDelimiter,
    /// A sequence delimiter was found in a sequence of defined length.
    UnexpectedSequenceDelimiter,
    /// A length was corrected for a known encoder bug.
    EncoderWorkaround,
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefectKind::PreambleGarbage => "preamble garbage",
            DefectKind::PrivateLeadingElement => "private leading element",
            DefectKind::UnexpectedDatasetGroup => "unexpected data set group",
            DefectKind::UnknownTransferSyntax => "unknown transfer syntax",
            DefectKind::NonZeroDelimiterLength => "nonzero delimiter length",
            DefectKind::NonZeroReserved => "nonzero reserved bytes",
            DefectKind::OddLength => "odd value length",
            DefectKind::UnexpectedItemTag => "unexpected item tag",
            DefectKind::StrayItemDelimiter => "stray item delimiter",
            DefectKind::UnexpectedSequenceDelimiter => "unexpected sequence delimiter",
            DefectKind::EncoderWorkaround => "encoder workaround",
        };
        f.write_str(name)
    }
}

/// A tolerated defect found in the stream.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Defect {
    /// what was found
    pub kind: DefectKind,
    /// the tag of the element concerned, if any
    pub tag: Option<Tag>,
    /// the position in the stream where it was found
    pub position: u64,
    /// a human readable description
    pub detail: String,
}

impl Defect {
    pub fn new(kind: DefectKind, tag: Option<Tag>, position: u64, detail: impl Into<String>) -> Self {
        Defect {
            kind,
            tag,
            position,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.position)?;
        if let Some(tag) = self.tag {
            write!(f, " in {}", tag)?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Log the defect and append it to the list.
pub(crate) fn record(defects: &mut Vec<Defect>, defect: Defect) {
    if defect.kind == DefectKind::PreambleGarbage {
        tracing::debug!("{}", defect);
    } else {
        tracing::warn!("{}", defect);
    }
    defects.push(defect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_defect() {
        let defect = Defect::new(
            DefectKind::OddLength,
            Some(Tag(0x0010, 0x0010)),
            132,
            "length 5",
        );
        assert_eq!(
            defect.to_string(),
            "odd value length at position 132 in (0010,0010): length 5"
        );

        let mut defects = Vec::new();
        record(
            &mut defects,
            Defect::new(DefectKind::PreambleGarbage, None, 0, "nonzero bytes"),
        );
        assert_eq!(defects.len(), 1);
        assert_eq!(
            defects[0].to_string(),
            "preamble garbage at position 0: nonzero bytes"
        );
    }
}
