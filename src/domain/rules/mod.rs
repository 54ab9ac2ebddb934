// Domain rules - Clip plan validation

use std::collections::HashMap;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::path::PathUtils;
use crate::utils::time::TimeParser;

/// Turns raw clip rows into a validated [`ClipPlan`].
///
/// Validation is pure: it touches neither the filesystem nor any process,
/// and the whole batch is checked before anything runs.
pub struct ClipPlanValidator;

impl ClipPlanValidator {
    /// Validate `requests` in row order.
    ///
    /// Per-row checks (times, then name) run first for every row; duplicate
    /// names are checked across the batch afterwards.
    pub fn validate(requests: &[ClipRequest]) -> ClipperResult<ClipPlan> {
        if requests.is_empty() {
            return Err(ClipperError::EmptyPlan);
        }

        let entries = requests
            .iter()
            .enumerate()
            .map(|(index, request)| Self::validate_row(index + 1, request))
            .collect::<ClipperResult<Vec<_>>>()?;

        Self::check_unique_names(&entries)?;

        Ok(ClipPlan::new(entries))
    }

    fn validate_row(row: usize, request: &ClipRequest) -> ClipperResult<ClipPlanEntry> {
        let start = TimeParser::parse_clip_time(&request.start).map_err(|message| {
            ClipperError::InvalidTime {
                row,
                message: format!("start {}", message),
            }
        })?;
        let end = TimeParser::parse_clip_time(&request.end).map_err(|message| {
            ClipperError::InvalidTime {
                row,
                message: format!("end {}", message),
            }
        })?;
        if end <= start {
            return Err(ClipperError::InvalidTime {
                row,
                message: format!(
                    "end ({}) must be after start ({})",
                    request.end.trim(),
                    request.start.trim()
                ),
            });
        }

        let name = Self::normalize_name(row, &request.name);
        PathUtils::validate_component(&name).map_err(|message| ClipperError::InvalidName {
            row,
            name: name.clone(),
            message,
        })?;

        Ok(ClipPlanEntry::new(row, start, end, name))
    }

    /// Trim the name, defaulting a blank one to `clip_<row>`
    pub fn normalize_name(row: usize, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            format!("clip_{}", row)
        } else {
            trimmed.to_string()
        }
    }

    fn check_unique_names(entries: &[ClipPlanEntry]) -> ClipperResult<()> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for entry in entries {
            if let Some(&first_row) = seen.get(entry.name()) {
                return Err(ClipperError::DuplicateName {
                    name: entry.name().to_string(),
                    first_row,
                    repeat_row: entry.row(),
                });
            }
            seen.insert(entry.name(), entry.row());
        }
        Ok(())
    }
}
