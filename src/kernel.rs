//! The uniform sampling kernel: many lanes filling one flat buffer.
//!
//! Element `i` of the buffer is produced by lane `i % lanes` as its
//! `i / lanes`-th draw. That round-robin scatter makes the filled buffer,
//! read as `samples_per_lane` rows of `lanes` columns and transposed, equal
//! to generating each lane's draws back to back serially - so serial and
//! parallel execution reconcile exactly, and the layout is pinned by the
//! reference-sequence tests.
//!
//! Lanes own disjoint state slots and disjoint buffer positions, so the
//! kernel is free to run them in any order; output depends only on the
//! incoming states. Below a lane-count threshold the fork/join overhead
//! outweighs the work and the kernel stays on the calling thread.

use rayon::prelude::*;
use tracing::debug;

use crate::element::UniformElement;
use crate::error::Result;
use crate::shape::plan_launch;
use crate::state::MrgState;
use crate::stream::LaneStates;

/// Lane counts below this run sequentially.
const PARALLEL_LANE_THRESHOLD: usize = 64;

/// Fill a flat buffer of `shape`'s element count with uniform draws,
/// advancing every lane state in place.
///
/// Each lane advances exactly once per element it owns; for totals that are
/// not a multiple of the lane count, trailing lanes simply own one element
/// fewer, so the buffer is always completely filled and never over-run.
/// After the call every consumed state holds its post-advance value, making
/// repeated calls resume the per-lane sequences seamlessly.
///
/// The capacity guard runs first: on rejection, neither the states nor any
/// buffer are touched.
pub fn fill_uniform<T, D>(states: &mut [MrgState], shape: &[D]) -> Result<Vec<T>>
where
    T: UniformElement,
    D: Copy + Into<i64>,
{
    let plan = plan_launch(shape, states.len())?;
    debug!(
        "uniform fill: {} elements over {} lanes ({} samples/lane, dtype={})",
        plan.total,
        plan.lanes,
        plan.samples_per_lane,
        T::NAME
    );

    let total = plan.total as usize;
    let mut buffer = vec![T::zeroed(); total];
    if states.len() >= PARALLEL_LANE_THRESHOLD {
        fill_parallel(states, &mut buffer);
    } else {
        fill_serial(states, &mut buffer);
    }
    Ok(buffer)
}

/// Paired-return form: derive the successor arena and the filled buffer
/// without mutating the input.
pub fn generate<T, D>(states: &LaneStates, shape: &[D]) -> Result<(LaneStates, Vec<T>)>
where
    T: UniformElement,
    D: Copy + Into<i64>,
{
    let mut next = states.clone();
    let buffer = fill_uniform(next.as_mut_slice(), shape)?;
    Ok((next, buffer))
}

/// Number of buffer elements owned by `lane` out of `total`.
#[inline]
fn owned_elements(total: usize, lanes: usize, lane: usize) -> usize {
    if lane < total {
        (total - lane - 1) / lanes + 1
    } else {
        0
    }
}

fn fill_serial<T: UniformElement>(states: &mut [MrgState], buffer: &mut [T]) {
    let lanes = states.len();
    for (lane, state) in states.iter_mut().enumerate() {
        let mut i = lane;
        while i < buffer.len() {
            buffer[i] = T::from_raw(state.next_raw());
            i += lanes;
        }
    }
}

fn fill_parallel<T: UniformElement>(states: &mut [MrgState], buffer: &mut [T]) {
    let lanes = states.len();
    let total = buffer.len();

    let columns: Vec<Vec<T>> = states
        .par_iter_mut()
        .enumerate()
        .map(|(lane, state)| {
            (0..owned_elements(total, lanes, lane))
                .map(|_| T::from_raw(state.next_raw()))
                .collect()
        })
        .collect();

    for (lane, column) in columns.into_iter().enumerate() {
        for (row, value) in column.into_iter().enumerate() {
            buffer[row * lanes + lane] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MrgError;

    #[test]
    fn test_owned_elements_partition() {
        for (total, lanes) in [(10usize, 4usize), (12, 4), (1, 4), (0, 4), (7, 7), (6, 7)] {
            let sum: usize = (0..lanes).map(|l| owned_elements(total, lanes, l)).sum();
            assert_eq!(sum, total, "total={total} lanes={lanes}");
        }
        assert_eq!(owned_elements(10, 4, 0), 3);
        assert_eq!(owned_elements(10, 4, 1), 3);
        assert_eq!(owned_elements(10, 4, 2), 2);
        assert_eq!(owned_elements(10, 4, 3), 2);
    }

    #[test]
    fn test_parallel_path_matches_serial_path() {
        let arena = LaneStates::from_seed(20_000, 96).unwrap();

        let mut serial_states = arena.clone().into_inner();
        let mut serial_buf = vec![0.0f64; 1000];
        fill_serial(&mut serial_states, &mut serial_buf);

        let mut parallel_states = arena.into_inner();
        let mut parallel_buf = vec![0.0f64; 1000];
        fill_parallel(&mut parallel_states, &mut parallel_buf);

        assert_eq!(serial_buf, parallel_buf);
        assert_eq!(serial_states, parallel_states);
    }

    #[test]
    fn test_non_divisible_total_fills_every_element() {
        // 10 elements over 4 lanes; element i must equal draw i/4 of lane i%4.
        let arena = LaneStates::from_seed(999, 4).unwrap();
        let reference: Vec<Vec<f64>> = arena
            .as_slice()
            .iter()
            .map(|s| {
                let mut s = *s;
                (0..3).map(|_| s.next_f64()).collect()
            })
            .collect();

        let mut states = arena.into_inner();
        let buffer: Vec<f64> = fill_uniform(&mut states, &[10i64]).unwrap();
        assert_eq!(buffer.len(), 10);
        for (i, &v) in buffer.iter().enumerate() {
            assert_eq!(v, reference[i % 4][i / 4], "element {i}");
        }
    }

    #[test]
    fn test_states_advance_by_owned_count() {
        let arena = LaneStates::from_seed(4242, 4).unwrap();
        let before = arena.clone();
        let mut states = arena.into_inner();
        let _: Vec<f32> = fill_uniform(&mut states, &[10i64]).unwrap();

        for (lane, (old, new)) in before.as_slice().iter().zip(states.iter()).enumerate() {
            let mut expect = *old;
            for _ in 0..owned_elements(10, 4, lane) {
                expect.next_raw();
            }
            assert_eq!(*new, expect, "lane {lane}");
        }
    }

    #[test]
    fn test_chained_calls_equal_one_double_call() {
        let arena = LaneStates::from_seed(31_337, 8).unwrap();

        let (mid, first) = generate::<f64, i64>(&arena, &[64]).unwrap();
        let (end, second) = generate::<f64, i64>(&mid, &[64]).unwrap();

        let (end_once, both) = generate::<f64, i64>(&arena, &[128]).unwrap();

        let chained: Vec<f64> = first.into_iter().chain(second).collect();
        assert_eq!(chained, both);
        assert_eq!(end, end_once);
    }

    #[test]
    fn test_generate_leaves_input_untouched() {
        let arena = LaneStates::from_seed(55, 3).unwrap();
        let snapshot = arena.clone();
        let (next, buffer) = generate::<f32, i64>(&arena, &[9]).unwrap();
        assert_eq!(arena, snapshot);
        assert_ne!(next, arena);
        assert_eq!(buffer.len(), 9);
    }

    #[test]
    fn test_guard_rejects_before_any_mutation() {
        let arena = LaneStates::from_seed(808, 4).unwrap();
        let snapshot = arena.clone();
        let mut states = arena.into_inner();
        let err = fill_uniform::<f32, i64>(&mut states, &[1i64 << 31]).unwrap_err();
        assert!(matches!(err, MrgError::CapacityOverflow(_)));
        assert_eq!(states, snapshot.into_inner());
    }

    #[test]
    fn test_empty_lane_array_is_rejected() {
        let mut states: Vec<MrgState> = Vec::new();
        assert!(fill_uniform::<f32, i64>(&mut states, &[4]).is_err());
    }
}
