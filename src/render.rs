//! Rendering of alignment paths: visual blocks and cigar notation.

use std::io::Write;

use anyhow::{bail, Result};

use crate::types::{AlignMode, EditOp, ReportFormat};

/// Width of one visual alignment block.
const BLOCK_WIDTH: usize = 50;

/// Render the alignment path of one pair into `out`.
///
/// `target_end` is the 0-based index into the target at which the alignment
/// ends, as reported by the engine. The path is checked against both
/// sequence lengths before anything is written; an inconsistent path is a
/// contract breach with the engine and renders nothing.
pub fn write_alignment(
    out: &mut dyn Write,
    query: &[u8],
    target: &[u8],
    trace: &[EditOp],
    mode: AlignMode,
    target_end: i32,
    format: ReportFormat,
) -> Result<()> {
    check_trace(query.len(), target.len(), trace, mode, target_end)?;
    match format {
        ReportFormat::Nice => write_blocks(out, query, target, trace, mode, target_end),
        ReportFormat::CigarStandard => {
            writeln!(out, "{}", cigar_string(trace, false))?;
            Ok(())
        }
        ReportFormat::CigarExtended => {
            writeln!(out, "{}", cigar_string(trace, true))?;
            Ok(())
        }
    }
}

/// Verify that the path's consumption counts agree with the sequence
/// lengths and the declared end position under the given mode.
fn check_trace(
    query_len: usize,
    target_len: usize,
    trace: &[EditOp],
    mode: AlignMode,
    target_end: i32,
) -> Result<()> {
    let consumed_query = trace.iter().filter(|op| op.consumes_query()).count() as i64;
    let consumed_target = trace.iter().filter(|op| op.consumes_target()).count() as i64;
    let query_len = query_len as i64;
    let target_len = target_len as i64;
    let end = i64::from(target_end);

    if consumed_query != query_len {
        bail!("alignment path consumes {consumed_query} query characters, query has {query_len}");
    }
    if end >= target_len {
        bail!("alignment end {end} lies beyond the target (length {target_len})");
    }
    match mode {
        AlignMode::Nw => {
            if consumed_target != target_len {
                bail!(
                    "global alignment path consumes {consumed_target} target characters, target has {target_len}"
                );
            }
            if end != target_len - 1 {
                bail!("global alignment must end at the last target position, got {end}");
            }
        }
        AlignMode::Shw => {
            if consumed_target != end + 1 {
                bail!(
                    "prefix alignment path consumes {consumed_target} target characters but ends at {end}"
                );
            }
        }
        AlignMode::Hw => {
            if end + 1 - consumed_target < 0 {
                bail!(
                    "infix alignment path consumes {consumed_target} target characters but ends at {end}"
                );
            }
        }
    }
    Ok(())
}

/// Visual block report: 50-column tiles of target row, match indicator row
/// and query row, each annotated with the coordinate range it consumed.
fn write_blocks(
    out: &mut dyn Write,
    query: &[u8],
    target: &[u8],
    trace: &[EditOp],
    mode: AlignMode,
    target_end: i32,
) -> Result<()> {
    let mut tidx: i64 = -1;
    let mut qidx: i64 = -1;
    // Infix alignments do not start at target position 0: walk the cursor
    // back from the reported end over every target-consuming operation.
    if mode == AlignMode::Hw {
        tidx = i64::from(target_end);
        for op in trace {
            if op.consumes_target() {
                tidx -= 1;
            }
        }
    }

    let mut row = Vec::with_capacity(BLOCK_WIDTH);
    for block in trace.chunks(BLOCK_WIDTH) {
        // Target row.
        row.clear();
        let mut block_start = tidx;
        for (i, op) in block.iter().enumerate() {
            if op.consumes_target() {
                tidx += 1;
                row.push(target[tidx as usize]);
            } else {
                row.push(b'-');
            }
            if i == 0 {
                block_start = tidx;
            }
        }
        out.write_all(b"T: ")?;
        out.write_all(&row)?;
        writeln!(out, " ({} - {})", block_start.max(0), tidx)?;

        // Match indicator row.
        row.clear();
        for op in block {
            row.push(if *op == EditOp::Match { b'|' } else { b' ' });
        }
        out.write_all(b"   ")?;
        out.write_all(&row)?;
        writeln!(out)?;

        // Query row.
        row.clear();
        let mut block_start = qidx;
        for (i, op) in block.iter().enumerate() {
            if op.consumes_query() {
                qidx += 1;
                row.push(query[qidx as usize]);
            } else {
                row.push(b'-');
            }
            if i == 0 {
                block_start = qidx;
            }
        }
        out.write_all(b"Q: ")?;
        out.write_all(&row)?;
        writeln!(out, " ({} - {})", block_start.max(0), qidx)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Run-length encode a path into cigar notation.
///
/// Standard notation writes `M` for matches and mismatches alike; extended
/// notation distinguishes `=` from `X`. An empty path encodes as an empty
/// string.
pub fn cigar_string(trace: &[EditOp], extended: bool) -> String {
    let mut cigar = String::new();
    let mut i = 0;
    while i < trace.len() {
        let glyph = cigar_glyph(trace[i], extended);
        let mut j = i + 1;
        while j < trace.len() && cigar_glyph(trace[j], extended) == glyph {
            j += 1;
        }
        cigar.push_str(&format!("{}{glyph}", j - i));
        i = j;
    }
    cigar
}

fn cigar_glyph(op: EditOp, extended: bool) -> char {
    match op {
        EditOp::Match => {
            if extended {
                '='
            } else {
                'M'
            }
        }
        EditOp::Mismatch => {
            if extended {
                'X'
            } else {
                'M'
            }
        }
        EditOp::Insert => 'I',
        EditOp::Delete => 'D',
    }
}
