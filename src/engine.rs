//! Thin adapter over the external edlib alignment engine.

use anyhow::{bail, Result};
use edlib_rs::edlibrs::*;

use crate::types::{AlignMode, EditOp, TaskLevel};

/// Engine configuration, fixed for the whole run.
#[derive(Debug, Clone, Copy)]
pub struct EngineParams {
    /// Edit distance ceiling; `-1` leaves the search unbounded.
    pub k: i32,
    pub mode: AlignMode,
    pub task: TaskLevel,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            k: -1,
            mode: AlignMode::default(),
            task: TaskLevel::default(),
        }
    }
}

/// What the engine reported for one pair.
#[derive(Debug, Clone, Default)]
pub struct AlignOutcome {
    /// `None` when a bounded search (`k >= 0`) found nothing within `k`.
    pub distance: Option<u32>,
    /// 0-based indices into the target where optimal alignments end.
    pub end_locations: Option<Vec<i32>>,
    /// 0-based indices into the target where optimal alignments start;
    /// mirrors `end_locations`.
    pub start_locations: Option<Vec<i32>>,
    /// Alignment path for the first start/end location pair.
    pub trace: Option<Vec<EditOp>>,
}

fn engine_mode(mode: AlignMode) -> EdlibAlignModeRs {
    match mode {
        AlignMode::Nw => EdlibAlignModeRs::EDLIB_MODE_NW,
        AlignMode::Hw => EdlibAlignModeRs::EDLIB_MODE_HW,
        AlignMode::Shw => EdlibAlignModeRs::EDLIB_MODE_SHW,
    }
}

fn engine_task(task: TaskLevel) -> EdlibAlignTaskRs {
    match task {
        TaskLevel::Distance => EdlibAlignTaskRs::EDLIB_TASK_DISTANCE,
        TaskLevel::Locations => EdlibAlignTaskRs::EDLIB_TASK_LOC,
        TaskLevel::Path => EdlibAlignTaskRs::EDLIB_TASK_PATH,
    }
}

/// Run one engine invocation over a query/target pair.
///
/// Fields the task level promises must come back whenever a distance was
/// found; anything else is a contract breach and fails the run.
pub fn align_pair(query: &[u8], target: &[u8], params: &EngineParams) -> Result<AlignOutcome> {
    let config = EdlibAlignConfigRs {
        k: params.k,
        mode: engine_mode(params.mode),
        task: engine_task(params.task),
        additionalequalities: &[],
    };
    let result = edlibAlignRs(query, target, &config);

    // The engine reports -1 when a bounded search exceeded k.
    let distance = u32::try_from(result.editDistance).ok();
    let trace = match result.alignment.as_deref() {
        Some(raw) => Some(decode_trace(raw)?),
        None => None,
    };
    let end_locations = result.endLocations.clone();
    let start_locations = result.startLocations.clone();

    if distance.is_some() {
        if params.task >= TaskLevel::Locations && end_locations.is_none() {
            bail!("engine returned no end locations for a {:?} task", params.task);
        }
        if params.task == TaskLevel::Path && trace.is_none() {
            bail!("engine returned no alignment path for a Path task");
        }
    }

    Ok(AlignOutcome {
        distance,
        end_locations,
        start_locations,
        trace,
    })
}

fn decode_trace(raw: &[u8]) -> Result<Vec<EditOp>> {
    raw.iter()
        .map(|&b| match EditOp::from_raw(b) {
            Some(op) => Ok(op),
            None => bail!("unknown edit operation {b} in engine trace"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_have_distance_zero() {
        let outcome = align_pair(b"ACGT", b"ACGT", &EngineParams::default()).unwrap();
        assert_eq!(outcome.distance, Some(0));
    }

    #[test]
    fn test_single_substitution() {
        let outcome = align_pair(b"AAAA", b"AATA", &EngineParams::default()).unwrap();
        assert_eq!(outcome.distance, Some(1));
    }

    #[test]
    fn test_threshold_exceeded_reports_none() {
        let params = EngineParams {
            k: 1,
            ..EngineParams::default()
        };
        let outcome = align_pair(b"AAAA", b"TTTT", &params).unwrap();
        assert_eq!(outcome.distance, None);
    }

    #[test]
    fn test_hw_finds_infix_for_free() {
        let params = EngineParams {
            mode: AlignMode::Hw,
            task: TaskLevel::Locations,
            ..EngineParams::default()
        };
        let outcome = align_pair(b"ACG", b"TTACGTT", &params).unwrap();
        assert_eq!(outcome.distance, Some(0));
        assert_eq!(outcome.end_locations.as_deref().map(|e| e[0]), Some(4));
    }

    #[test]
    fn test_shw_ignores_target_suffix() {
        let params = EngineParams {
            mode: AlignMode::Shw,
            ..EngineParams::default()
        };
        let outcome = align_pair(b"AACT", b"AACTGGC", &params).unwrap();
        assert_eq!(outcome.distance, Some(0));
    }

    #[test]
    fn test_path_task_yields_a_trace() {
        let params = EngineParams {
            task: TaskLevel::Path,
            ..EngineParams::default()
        };
        let outcome = align_pair(b"ACGT", b"AGT", &params).unwrap();
        assert_eq!(outcome.distance, Some(1));
        let trace = outcome.trace.unwrap();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.iter().filter(|op| op.consumes_query()).count(), 4);
        assert_eq!(trace.iter().filter(|op| op.consumes_target()).count(), 3);
    }
}
