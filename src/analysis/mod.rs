#![doc = r#"
Aggregate measurements over the notes of a file
"#]

mod polyphony;
pub use polyphony::*;
