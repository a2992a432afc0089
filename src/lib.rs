// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # linear-b
//!
//! Rule-based analysis of Linear B texts and Mycenaean Greek words.
//!
//! ## Architecture
//!
//! - **Script** (`script`): code-point classification, word segmentation,
//!   sign lookup and transliteration
//! - **Morphology** (`morphology`): stem/ending segmentation ranked by confidence
//! - **Paradigms** (`paradigm`): full inflectional paradigms through the
//!   script's spelling rules, attested vs. reconstructed
//! - **Phonology** (`phonology`): ordered sound changes from Mycenaean to
//!   Classical Greek
//! - **Tables** (`tables`): the data every engine reads, loaded once and
//!   validated as a whole
//!
//! ## Library usage
//!
//! ```no_run
//! use linear_b::engine::Analyzer;
//!
//! let analyzer = Analyzer::bundled().unwrap();
//! let words = analyzer.transcribe("\u{10037}\u{10019}\u{1000F}");
//! assert_eq!(words[0].transliteration, "wa-na-ka");
//!
//! let best = &analyzer.analyze("wa-na-ka-te")[0];
//! println!("{} + {} ({:?})", best.stem, best.ending, best.case);
//!
//! let path = analyzer.diachronic("wanaks", "anax");
//! for stage in &path.stages {
//!     println!("{} [{}]", stage.form, stage.label);
//! }
//! ```

pub mod categories;
pub mod engine;
pub mod error;
pub mod morphology;
pub mod paradigm;
pub mod phonology;
pub mod script;
pub mod tables;
