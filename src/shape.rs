//! Output-shape validation and launch planning.
//!
//! The sampling kernel indexes its buffer and lanes with 32-bit signed
//! arithmetic, so every launch is planned and bounds-checked here first.
//! Planning is pure: a rejected shape leaves no partial effects anywhere.

use crate::error::{MrgError, Result};

/// Largest element count the kernel can address.
pub const MAX_ELEMENTS: u64 = i32::MAX as u64;

/// A validated kernel launch: flat element count and per-lane draw count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Total number of output elements (product of the shape dimensions).
    pub total: u32,
    /// Number of lanes consuming state vectors.
    pub lanes: u32,
    /// `ceil(total / lanes)`: draws taken by the busiest lane.
    pub samples_per_lane: u32,
}

/// Validate a requested output shape against the kernel's indexing limits.
///
/// Dimensions are accepted as any integer type that widens losslessly to
/// `i64`, so 32-bit sizes of either signedness never trip a spurious
/// overflow. An empty shape is a scalar request (one element). Fails with
/// [`MrgError::InvalidShape`] for non-positive dimensions or a zero lane
/// count, and [`MrgError::CapacityOverflow`] when the element count (or any
/// dimension-product prefix) leaves the 32-bit signed range.
pub fn plan_launch<D>(shape: &[D], lanes: usize) -> Result<LaunchPlan>
where
    D: Copy + Into<i64>,
{
    if lanes == 0 {
        return Err(MrgError::invalid_shape("lane count must be positive"));
    }
    if lanes as u64 > MAX_ELEMENTS {
        return Err(MrgError::capacity(format!(
            "lane count {lanes} exceeds the addressable range {MAX_ELEMENTS}"
        )));
    }

    let mut total: u64 = 1;
    for (axis, &dim) in shape.iter().enumerate() {
        let dim: i64 = dim.into();
        if dim <= 0 {
            return Err(MrgError::invalid_shape(format!(
                "dimension {axis} must be positive, got {dim}"
            )));
        }
        total = total
            .checked_mul(dim as u64)
            .filter(|&t| t <= MAX_ELEMENTS)
            .ok_or_else(|| {
                MrgError::capacity(format!(
                    "element count through dimension {axis} exceeds {MAX_ELEMENTS}"
                ))
            })?;
    }

    let lanes = lanes as u64;
    let samples_per_lane = (total + lanes - 1) / lanes;
    Ok(LaunchPlan {
        total: total as u32,
        lanes: lanes as u32,
        samples_per_lane: samples_per_lane as u32,
    })
}
