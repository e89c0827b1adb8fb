//! FASTA input, the alternate path for query-set vs single-target runs.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;
use flate2::read::GzDecoder;

use crate::types::Sequence;

/// Read every record of a FASTA file, transparently handling `.gz`.
pub fn read_fasta(path: &Path) -> Result<Vec<Sequence>> {
    let file =
        File::open(path).with_context(|| format!("cannot open FASTA file {}", path.display()))?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        collect_records(fasta::Reader::new(GzDecoder::new(file)), path)
    } else {
        collect_records(fasta::Reader::new(file), path)
    }
}

fn collect_records<R: Read>(
    reader: fasta::Reader<BufReader<R>>,
    path: &Path,
) -> Result<Vec<Sequence>> {
    let mut sequences = Vec::new();
    for result in reader.records() {
        let record = result
            .with_context(|| format!("malformed FASTA record in {}", path.display()))?;
        sequences.push(Sequence {
            id: record.id().to_string(),
            seq: record.seq().to_vec(),
        });
    }
    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_records_with_wrapped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqs.fa");
        std::fs::write(&path, ">one desc\nACGT\nACGT\n>two\nTTTT\n").unwrap();

        let sequences = read_fasta(&path).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].id, "one");
        assert_eq!(sequences[0].seq, b"ACGTACGT");
        assert_eq!(sequences[1].id, "two");
        assert_eq!(sequences[1].seq, b"TTTT");
    }

    #[test]
    fn test_reads_gzipped_fasta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqs.fa.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b">only\nACGTAC\n").unwrap();
        encoder.finish().unwrap();

        let sequences = read_fasta(&path).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].seq, b"ACGTAC");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_fasta(Path::new("/nonexistent/seqs.fa")).is_err());
    }
}
