//! pairbench - batch harness for benchmarking the edlib alignment engine
//!
//! Streams query/target sequence pairs from line-paired or FASTA input,
//! drives repeated engine invocations per pair for timing, and renders the
//! resulting edit path as visual alignment blocks or cigar notation.

pub mod engine;
pub mod fasta;
pub mod pairs;
pub mod render;
pub mod types;

// Re-export the main types and functions
pub use engine::{align_pair, AlignOutcome, EngineParams};
pub use fasta::read_fasta;
pub use pairs::{PairReader, SequencePair};
pub use render::{cigar_string, write_alignment};
pub use types::{AlignMode, EditOp, ReportFormat, Sequence, TaskLevel};
