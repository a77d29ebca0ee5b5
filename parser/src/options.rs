//! Configuration of the stream reader.

use crate::workaround::WorkaroundId;

/// The default maximum nesting depth of sequences and items.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// The default value length from which values are skipped
/// in structure-only mode.
pub const DEFAULT_SKIP_THRESHOLD: u32 = 0xfff;

/// The set of encoder workarounds enabled in a reader.
///
/// All workarounds are enabled by default.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct WorkaroundSet {
    /// Correct implicit VR lengths of 13 to 10.
    pub ge_length_13: bool,
    /// Correct explicit VR UL lengths of 6 to 4.
    pub ul_length_6: bool,
}

impl Default for WorkaroundSet {
    fn default() -> Self {
        WorkaroundSet {
            ge_length_13: true,
            ul_length_6: true,
        }
    }
}

impl WorkaroundSet {
    /// A set with no workarounds enabled.
    pub fn none() -> Self {
        WorkaroundSet {
            ge_length_13: false,
            ul_length_6: false,
        }
    }

    /// Whether the given workaround is enabled.
    pub fn is_enabled(&self, id: WorkaroundId) -> bool {
        match id {
            WorkaroundId::GeLength13 => self.ge_length_13,
            WorkaroundId::UlLength6 => self.ul_length_6,
        }
    }

    /// Enable or disable the given workaround.
    pub fn set(mut self, id: WorkaroundId, enabled: bool) -> Self {
        match id {
            WorkaroundId::GeLength13 => self.ge_length_13 = enabled,
            WorkaroundId::UlLength6 => self.ul_length_6 = enabled,
        }
        self
    }

    /// Enable or disable a workaround by its name.
    /// Returns `None` if no workaround has that name.
    pub fn set_by_name(self, name: &str, enabled: bool) -> Option<Self> {
        WorkaroundId::from_name(name).map(|id| self.set(id, enabled))
    }

    /// Enable or disable the correction of implicit VR lengths of 13.
    pub fn ge_length_13(self, enabled: bool) -> Self {
        self.set(WorkaroundId::GeLength13, enabled)
    }

    /// Enable or disable the correction of UL lengths of 6.
    pub fn ul_length_6(self, enabled: bool) -> Self {
        self.set(WorkaroundId::UlLength6, enabled)
    }
}

/// The set of options for the stream reader.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct ReadOptions {
    /// the maximum nesting depth of sequences and items
    pub max_depth: usize,
    /// whether to skip over large values instead of reading them
    pub structure_only: bool,
    /// the value length from which values are skipped
    /// in structure-only mode
    pub skip_threshold: u32,
    /// the encoder workarounds to apply
    pub workarounds: WorkaroundSet,
    /// whether [`read_dicom`](crate::read_dicom) converts
    /// binary values to the byte order of the running machine
    pub swap_to_host: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            structure_only: false,
            skip_threshold: DEFAULT_SKIP_THRESHOLD,
            workarounds: WorkaroundSet::default(),
            swap_to_host: true,
        }
    }
}

impl ReadOptions {
    /// Replace the maximum nesting depth of the options.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the structure-only flag of the options.
    pub fn structure_only(mut self, structure_only: bool) -> Self {
        self.structure_only = structure_only;
        self
    }

    /// Replace the skip threshold of the options.
    pub fn skip_threshold(mut self, skip_threshold: u32) -> Self {
        self.skip_threshold = skip_threshold;
        self
    }

    /// Replace the set of workarounds of the options.
    pub fn workarounds(mut self, workarounds: WorkaroundSet) -> Self {
        self.workarounds = workarounds;
        self
    }

    /// Replace the host byte order conversion flag of the options.
    pub fn swap_to_host(mut self, swap_to_host: bool) -> Self {
        self.swap_to_host = swap_to_host;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_by_name() {
        let set = WorkaroundSet::default()
            .set_by_name("ge_length_13", false)
            .unwrap();
        assert!(!set.ge_length_13);
        assert!(set.ul_length_6);
        assert!(WorkaroundSet::default().set_by_name("bogus", true).is_none());
    }

    #[test]
    fn builder() {
        let options = ReadOptions::default().max_depth(3).structure_only(true);
        assert_eq!(options.max_depth, 3);
        assert!(options.structure_only);
        assert_eq!(options.skip_threshold, 0xfff);
        assert!(options.swap_to_host);
    }
}
