use alloc::vec::Vec;

use crate::sequence::{NoteArc, TimedNoteArc};

#[doc = r#"
How many notes sound at once.

`max` is the largest number of notes sounding together. `average` is the
number of sounding notes averaged over the span from the first note on
to the last note off. A note that ends where another starts does not
overlap it. Notes of zero length never sound.

# Example
```rust
# use smfseq::prelude::*;
let polyphony = Polyphony::from_spans([(0., 2.), (1., 3.)]);
assert_eq!(polyphony.max, 2);
assert!((polyphony.average - 4. / 3.).abs() < 1e-12);
assert_eq!(Polyphony::from_spans([]), Polyphony::default());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyphony {
    /// Most notes sounding at once
    pub max: usize,
    /// Time-weighted mean of sounding notes
    pub average: f64,
}

impl Polyphony {
    /// Measure arcs in ticks
    pub fn from_arcs(arcs: &[NoteArc]) -> Self {
        Self::from_spans(
            arcs.iter()
                .map(|arc| (arc.start_tick as f64, arc.end_tick as f64)),
        )
    }

    /// Measure arcs in seconds
    pub fn from_timed_arcs(arcs: &[TimedNoteArc]) -> Self {
        Self::from_spans(arcs.iter().map(|arc| (arc.start, arc.end)))
    }

    /// Measure `(start, end)` spans
    pub fn from_spans(spans: impl IntoIterator<Item = (f64, f64)>) -> Self {
        // (position, +1 for a start, -1 for an end)
        let mut edges: Vec<(f64, i64)> = Vec::new();
        for (start, end) in spans {
            if end > start {
                edges.push((start, 1));
                edges.push((end, -1));
            }
        }
        let (Some(first), Some(last)) = (
            edges.iter().map(|e| e.0).reduce(f64::min),
            edges.iter().map(|e| e.0).reduce(f64::max),
        ) else {
            return Self::default();
        };
        // ends sort before starts at the same position
        edges.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut sounding: i64 = 0;
        let mut max = 0;
        let mut weighted = 0.;
        let mut previous = first;
        for (position, delta) in edges {
            weighted += sounding as f64 * (position - previous);
            previous = position;
            sounding += delta;
            max = max.max(sounding);
        }

        Self {
            max: max as usize,
            average: weighted / (last - first),
        }
    }
}
