#[doc = r#"
What the reader does when the data runs out before the file says it should.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndOfFilePolicy {
    /// Running out of data is always an error
    Disallow,
    /// Stop quietly if the data ends between two events
    AllowClean,
    /// Keep whatever was decoded, even if the data ends mid-event.
    ///
    /// The track being read is closed and no further tracks are read.
    #[default]
    AllowDirty,
}

impl EndOfFilePolicy {
    /// True if an end of data at an event or chunk boundary is accepted
    pub const fn allows_clean(&self) -> bool {
        matches!(self, Self::AllowClean | Self::AllowDirty)
    }

    /// True if an end of data inside an event is accepted
    pub const fn allows_dirty(&self) -> bool {
        matches!(self, Self::AllowDirty)
    }
}

#[doc = r#"
Recovery switches for reading non-conformant files.

Every flag can be set on its own. [`ReaderPolicies::lenient`] and
[`ReaderPolicies::strict`] are named starting points, and the `with_*`
methods override single fields.

# Example
```rust
# use smfseq::prelude::*;
let policies = ReaderPolicies::strict()
    .with_end_of_file(EndOfFilePolicy::AllowClean)
    .with_ignore_bad_key_signatures(true);

assert!(!policies.coerce_velocity_to_range);
assert!(policies.ignore_bad_key_signatures);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderPolicies {
    /// Handling of truncated data
    pub end_of_file: EndOfFilePolicy,
    /// Drop fixed-size meta events whose declared length is too short
    pub ignore_incomplete_meta_events: bool,
    /// Drop key signatures with an out-of-range key or scale
    pub ignore_bad_key_signatures: bool,
    /// Drop channel prefixes above 15
    pub ignore_bad_channel_prefixes: bool,
    /// Drop SMPTE offsets with out-of-range fields
    pub ignore_bad_smpte_offsets: bool,
    /// Clamp note on velocities above 127 instead of failing
    pub coerce_velocity_to_range: bool,
    /// Keep the channel running status through meta and sysex events
    pub allow_running_status_across_non_midi_events: bool,
    /// Pad with empty tracks when fewer tracks are read than declared
    pub allow_track_count_discrepancy: bool,
}

impl ReaderPolicies {
    /// Accept as much of a damaged or non-conformant file as possible
    pub const fn lenient() -> Self {
        Self {
            end_of_file: EndOfFilePolicy::AllowDirty,
            ignore_incomplete_meta_events: true,
            ignore_bad_key_signatures: true,
            ignore_bad_channel_prefixes: true,
            ignore_bad_smpte_offsets: true,
            coerce_velocity_to_range: true,
            allow_running_status_across_non_midi_events: true,
            allow_track_count_discrepancy: true,
        }
    }

    /// Accept only what the Standard MIDI File 1.0 document allows
    pub const fn strict() -> Self {
        Self {
            end_of_file: EndOfFilePolicy::Disallow,
            ignore_incomplete_meta_events: false,
            ignore_bad_key_signatures: false,
            ignore_bad_channel_prefixes: false,
            ignore_bad_smpte_offsets: false,
            coerce_velocity_to_range: false,
            allow_running_status_across_non_midi_events: false,
            allow_track_count_discrepancy: false,
        }
    }

    /// Set [`ReaderPolicies::end_of_file`]
    pub const fn with_end_of_file(mut self, policy: EndOfFilePolicy) -> Self {
        self.end_of_file = policy;
        self
    }
    /// Set [`ReaderPolicies::ignore_incomplete_meta_events`]
    pub const fn with_ignore_incomplete_meta_events(mut self, value: bool) -> Self {
        self.ignore_incomplete_meta_events = value;
        self
    }
    /// Set [`ReaderPolicies::ignore_bad_key_signatures`]
    pub const fn with_ignore_bad_key_signatures(mut self, value: bool) -> Self {
        self.ignore_bad_key_signatures = value;
        self
    }
    /// Set [`ReaderPolicies::ignore_bad_channel_prefixes`]
    pub const fn with_ignore_bad_channel_prefixes(mut self, value: bool) -> Self {
        self.ignore_bad_channel_prefixes = value;
        self
    }
    /// Set [`ReaderPolicies::ignore_bad_smpte_offsets`]
    pub const fn with_ignore_bad_smpte_offsets(mut self, value: bool) -> Self {
        self.ignore_bad_smpte_offsets = value;
        self
    }
    /// Set [`ReaderPolicies::coerce_velocity_to_range`]
    pub const fn with_coerce_velocity_to_range(mut self, value: bool) -> Self {
        self.coerce_velocity_to_range = value;
        self
    }
    /// Set [`ReaderPolicies::allow_running_status_across_non_midi_events`]
    pub const fn with_allow_running_status_across_non_midi_events(mut self, value: bool) -> Self {
        self.allow_running_status_across_non_midi_events = value;
        self
    }
    /// Set [`ReaderPolicies::allow_track_count_discrepancy`]
    pub const fn with_allow_track_count_discrepancy(mut self, value: bool) -> Self {
        self.allow_track_count_discrepancy = value;
        self
    }
}

impl Default for ReaderPolicies {
    fn default() -> Self {
        Self::lenient()
    }
}

#[test]
fn presets_differ_in_every_flag() {
    let lenient = ReaderPolicies::lenient();
    let strict = ReaderPolicies::strict();
    assert!(lenient.end_of_file.allows_dirty());
    assert!(!strict.end_of_file.allows_clean());
    assert_ne!(
        lenient.ignore_incomplete_meta_events,
        strict.ignore_incomplete_meta_events
    );
    assert_ne!(
        lenient.allow_track_count_discrepancy,
        strict.allow_track_count_discrepancy
    );
    assert_eq!(ReaderPolicies::default(), lenient);
}

#[test]
fn allow_dirty_implies_allow_clean() {
    assert!(EndOfFilePolicy::AllowDirty.allows_clean());
    assert!(EndOfFilePolicy::AllowClean.allows_clean());
    assert!(!EndOfFilePolicy::AllowClean.allows_dirty());
}
