//! Streaming reader for line-paired query/target input.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// One query/target pair pulled from the input stream.
///
/// Both buffers are owned by the caller and live for exactly one driver
/// iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub query: Vec<u8>,
    pub target: Vec<u8>,
}

/// Reads consecutive line pairs from a seq-pair file.
///
/// Each pair occupies two lines, query first. The first byte of every line
/// is a marker (`>` / `<` in the benchmark corpus format) and is not part of
/// the sequence. A trailing odd line at end of input is dropped without
/// error.
pub struct PairReader<R> {
    inner: R,
}

impl PairReader<Box<dyn BufRead>> {
    /// Open a pair file, transparently decompressing `.gz` input.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open input file {}", path.display()))?;
        let inner: Box<dyn BufRead> = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(PairReader { inner })
    }
}

impl<R: BufRead> PairReader<R> {
    pub fn new(inner: R) -> Self {
        PairReader { inner }
    }

    /// Pull the next pair, or `None` once no full pair is left.
    pub fn next_pair(&mut self) -> Result<Option<SequencePair>> {
        let Some(query) = self.read_sequence()? else {
            return Ok(None);
        };
        let Some(target) = self.read_sequence()? else {
            return Ok(None);
        };
        Ok(Some(SequencePair { query, target }))
    }

    fn read_sequence(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let n = self
            .inner
            .read_until(b'\n', &mut line)
            .context("failed reading input line")?;
        if n == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        // Drop the leading marker byte; it is metadata, not sequence.
        if !line.is_empty() {
            line.remove(0);
        }
        Ok(Some(line))
    }
}
