//! Ordering helpers
//!
//! Pure functions that turn "what the user did" into the full list of
//! `(track, position)` assignments a reorder batch consumes. A drag gesture
//! in the UI ends in exactly one call to [`move_entry`] and one reorder.

use crate::error::{Result, TempoError};
use crate::types::{PositionAssignment, TrackId};
use std::collections::HashSet;

/// Largest position a reorder may assign. Leaves room for appends after it.
pub const MAX_POSITION: i64 = i64::MAX / 2;

/// Dense positions `1..=n` for the given order
pub fn assign_sequential(order: &[TrackId]) -> Vec<PositionAssignment> {
    order
        .iter()
        .zip(1_i64..)
        .map(|(track_id, position)| PositionAssignment::new(track_id.clone(), position))
        .collect()
}

/// Move the entry at index `from` to index `to`.
///
/// `current` is the collection in read order. The result re-uses the exact
/// set of positions already in `current` (gaps included), so it is always a
/// permutation of what the store holds and never collides with it.
pub fn move_entry(
    current: &[PositionAssignment],
    from: usize,
    to: usize,
) -> Result<Vec<PositionAssignment>> {
    let len = current.len();
    if from >= len || to >= len {
        return Err(TempoError::invalid_input(format!(
            "cannot move index {} to {} in a collection of {} items",
            from, to, len
        )));
    }

    let mut positions: Vec<i64> = current.iter().map(|a| a.position).collect();
    positions.sort_unstable();

    let mut order: Vec<TrackId> = current.iter().map(|a| a.track_id.clone()).collect();
    let moved = order.remove(from);
    order.insert(to, moved);

    Ok(order
        .into_iter()
        .zip(positions)
        .map(|(track_id, position)| PositionAssignment::new(track_id, position))
        .collect())
}

/// Reject batches that could never apply cleanly: positions outside
/// `1..=MAX_POSITION`, a track listed twice, or two tracks sent to the same
/// position.
pub fn validate_assignments(assignments: &[PositionAssignment]) -> Result<()> {
    let mut tracks = HashSet::with_capacity(assignments.len());
    let mut positions = HashSet::with_capacity(assignments.len());

    for assignment in assignments {
        if assignment.position < 1 {
            return Err(TempoError::reorder_failed(format!(
                "position {} for track {} is not positive",
                assignment.position, assignment.track_id
            )));
        }
        if assignment.position > MAX_POSITION {
            return Err(TempoError::reorder_failed(format!(
                "position {} for track {} is above {}",
                assignment.position, assignment.track_id, MAX_POSITION
            )));
        }
        if !tracks.insert(&assignment.track_id) {
            return Err(TempoError::reorder_failed(format!(
                "track {} appears more than once",
                assignment.track_id
            )));
        }
        if !positions.insert(assignment.position) {
            return Err(TempoError::reorder_failed(format!(
                "position {} is assigned more than once",
                assignment.position
            )));
        }
    }

    Ok(())
}
