//! Core types shared across the harness.

use std::fmt;
use std::str::FromStr;

/// A named sequence read from FASTA input.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub id: String,
    pub seq: Vec<u8>,
}

/// Alignment mode, using the engine's NW/HW/SHW vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMode {
    /// Global alignment: the whole query against the whole target.
    #[default]
    Nw,
    /// Infix alignment: gaps before and after the query in the target are
    /// free. The query aligns somewhere inside the target.
    Hw,
    /// Prefix alignment: gaps after the query in the target are free. The
    /// query aligns against a prefix of the target.
    Shw,
}

impl AlignMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignMode::Nw => "NW",
            AlignMode::Hw => "HW",
            AlignMode::Shw => "SHW",
        }
    }
}

impl fmt::Display for AlignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NW" => Ok(AlignMode::Nw),
            "HW" => Ok(AlignMode::Hw),
            "SHW" => Ok(AlignMode::Shw),
            other => Err(format!("invalid alignment mode {other:?}: expected HW, NW or SHW")),
        }
    }
}

/// How much work the engine is asked for.
///
/// Levels are ordered: each one includes everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TaskLevel {
    /// Edit distance only.
    #[default]
    Distance,
    /// Distance plus end and start locations.
    Locations,
    /// Distance, locations and the full alignment path.
    Path,
}

/// Output representation for an alignment path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Visual 50-column blocks with coordinate annotations.
    #[default]
    Nice,
    /// Cigar notation with matches and mismatches collapsed into `M`.
    CigarStandard,
    /// Cigar notation distinguishing `=` (match) from `X` (mismatch).
    CigarExtended,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NICE" => Ok(ReportFormat::Nice),
            "CIG_STD" => Ok(ReportFormat::CigarStandard),
            "CIG_EXT" => Ok(ReportFormat::CigarExtended),
            other => Err(format!(
                "invalid alignment path format {other:?}: expected NICE, CIG_STD or CIG_EXT"
            )),
        }
    }
}

/// One step of an alignment path, in the engine's encoding.
///
/// The engine emits the path as a left-to-right walk from query start to
/// query end; it is consumed in that order, never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// One matching character consumed from both sequences.
    Match,
    /// A query character with no counterpart in the target (gap in target).
    Insert,
    /// A target character with no counterpart in the query (gap in query).
    Delete,
    /// One differing character consumed from both sequences.
    Mismatch,
}

impl EditOp {
    /// Decode one raw trace byte (0 = match, 1 = insert, 2 = delete,
    /// 3 = mismatch).
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(EditOp::Match),
            1 => Some(EditOp::Insert),
            2 => Some(EditOp::Delete),
            3 => Some(EditOp::Mismatch),
            _ => None,
        }
    }

    /// Does this operation consume a target character?
    pub fn consumes_target(&self) -> bool {
        !matches!(self, EditOp::Insert)
    }

    /// Does this operation consume a query character?
    pub fn consumes_query(&self) -> bool {
        !matches!(self, EditOp::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("NW".parse::<AlignMode>().unwrap(), AlignMode::Nw);
        assert_eq!("HW".parse::<AlignMode>().unwrap(), AlignMode::Hw);
        assert_eq!("SHW".parse::<AlignMode>().unwrap(), AlignMode::Shw);
        assert!("nw".parse::<AlignMode>().is_err());
        assert!("SW".parse::<AlignMode>().is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("NICE".parse::<ReportFormat>().unwrap(), ReportFormat::Nice);
        assert_eq!("CIG_STD".parse::<ReportFormat>().unwrap(), ReportFormat::CigarStandard);
        assert_eq!("CIG_EXT".parse::<ReportFormat>().unwrap(), ReportFormat::CigarExtended);
        assert!("CIGAR".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_task_levels_are_ordered() {
        assert!(TaskLevel::Distance < TaskLevel::Locations);
        assert!(TaskLevel::Locations < TaskLevel::Path);
    }

    #[test]
    fn test_edit_op_decoding() {
        assert_eq!(EditOp::from_raw(0), Some(EditOp::Match));
        assert_eq!(EditOp::from_raw(1), Some(EditOp::Insert));
        assert_eq!(EditOp::from_raw(2), Some(EditOp::Delete));
        assert_eq!(EditOp::from_raw(3), Some(EditOp::Mismatch));
        assert_eq!(EditOp::from_raw(4), None);
    }

    #[test]
    fn test_edit_op_consumption() {
        assert!(EditOp::Match.consumes_target() && EditOp::Match.consumes_query());
        assert!(!EditOp::Insert.consumes_target() && EditOp::Insert.consumes_query());
        assert!(EditOp::Delete.consumes_target() && !EditOp::Delete.consumes_query());
        assert!(EditOp::Mismatch.consumes_target() && EditOp::Mismatch.consumes_query());
    }
}
