#![doc = r#"
Standard MIDI File reading, writing and timing analysis.

`smfseq` decodes a Standard MIDI File into a strongly typed event model,
encodes that model back into bytes, and derives wall-clock timing from the
tick-domain events by integrating the file's tempo map.

# Reading

```rust
use smfseq::prelude::*;

let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x00, 0x00, 0x01, 0x00, 0x60,             // format 0, 1 track, 96 tpqn
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0C, // MTrk, length 12
    0x00, 0x90, 0x3C, 0x40,                         // note on
    0x60, 0x3C, 0x00,                               // running status, velocity 0
    0x00, 0xFF, 0x2F, 0x00,                         // end of track
    0x00,                                           // tolerated trailing pad
];

let file = MidiFile::parse_with(&bytes, ReaderPolicies::strict()).unwrap();
let sequence = TimeBasedSequence::new(file);

assert_eq!(sequence.time_at_tick(96), 0.5);
```

# Policies

Real-world files are frequently non-conformant. [`ReaderPolicies`](crate::reader::ReaderPolicies)
bundles every recovery switch the reader knows about; [`ReaderPolicies::lenient`](crate::reader::ReaderPolicies::lenient)
and [`ReaderPolicies::strict`](crate::reader::ReaderPolicies::strict) are the two presets.
"#]
#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod analysis;
mod byte;
pub use byte::*;
pub mod derived;
mod error;
pub use error::*;
pub mod file;
pub mod message;
pub mod reader;
pub mod sequence;
pub mod writer;

#[doc = r#"
Common re-exports for working with MIDI files
"#]
pub mod prelude {
    pub use crate::{
        analysis::Polyphony,
        byte::*,
        derived::{
            CompositePitchBend, ParameterNumber, ParameterNumberChange, RegisteredParameter,
            VirtualEvent, composite_pitch_bends, parameter_number_changes,
        },
        error::*,
        file::*,
        message::*,
        reader::{EndOfFilePolicy, ReadResult, Reader, ReaderError, ReaderErrorKind, ReaderPolicies},
        sequence::{EventRef, NoteArc, TempoChange, TempoMap, TimeBasedSequence, TimedNoteArc},
    };
}
