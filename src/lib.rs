//! # mrgkernel
//!
//! Reproducible parallel uniform random streams built on the MRG31k3p
//! combined multiple recursive generator (L'Ecuyer & Touzin 2000).
//!
//! The crate splits one generator of period ~2^185 into a two-level
//! hierarchy - streams 2^134 draws apart, substreams 2^72 apart - using
//! precomputed jump-ahead matrices, and fills large output buffers across
//! many lanes (one substream per lane) with a scatter layout that makes
//! parallel execution bit-identical to serial generation and to the
//! published reference sequence for seed 12345.
//!
//! ## Core pieces
//!
//! - [`MrgState`] - six-word POD state vector and the recurrence step
//! - [`JumpDistance`] / [`MrgState::jump`] - O(1) leaps of 2^67, 2^72, 2^134 steps
//! - [`LaneStates`] - per-lane state arena derived from a seed
//! - [`fill_uniform`] / [`generate`] - the lane-parallel sampling kernel
//! - [`MrgStreams`] - owning session that rotates to a fresh stream per call
//!
//! ## Example
//!
//! ```
//! use mrgkernel::prelude::*;
//!
//! let mut session = MrgStreams::new(12345)?;
//! let buffer: Vec<f32> = session.uniform(&[2i64, 3], 4)?;
//! assert_eq!(buffer.len(), 6);
//! assert!(buffer.iter().all(|&u| u > 0.0 && u < 1.0));
//! # Ok::<(), mrgkernel::MrgError>(())
//! ```
//!
//! Output precision is selected through the [`UniformElement`] trait
//! (`f64`, `f32`, or half precision via [`F16`]); every precision keeps
//! draws strictly inside the open unit interval.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arith;
pub mod element;
pub mod error;
pub mod jump;
pub mod kernel;
pub mod shape;
pub mod state;
pub mod stream;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::element::{UniformElement, F16};
    pub use crate::error::{MrgError, Result};
    pub use crate::jump::JumpDistance;
    pub use crate::kernel::{fill_uniform, generate};
    pub use crate::shape::{plan_launch, LaunchPlan};
    pub use crate::state::MrgState;
    pub use crate::stream::{LaneStates, MrgStreams};
}

pub use element::{UniformElement, F16};
pub use error::{MrgError, Result};
pub use jump::JumpDistance;
pub use kernel::{fill_uniform, generate};
pub use shape::{plan_launch, LaunchPlan};
pub use state::MrgState;
pub use stream::{LaneStates, MrgStreams};
