//! Stream/substream layout: deriving per-lane states from one seed.
//!
//! Lanes are substreams of a stream, spaced 2^72 draws apart; consecutive
//! kernel invocations of a session occupy streams spaced 2^134 apart. Both
//! spacings guarantee non-overlap for any run shorter than 2^67 draws per
//! substream. Derivation is purely sequential and bit-reproducible, so it
//! does not matter how the kernel later schedules the lanes.

use tracing::info;

use crate::element::UniformElement;
use crate::error::Result;
use crate::jump::JumpDistance;
use crate::kernel;
use crate::state::MrgState;

/// An arena of per-lane state vectors, indexed solely by lane.
///
/// The arena is the unit of ownership: one logical session may consume it at
/// a time, and during a kernel invocation each lane writes only its own
/// slot. Concurrent invocations over overlapping arenas are the caller's
/// responsibility to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneStates {
    states: Vec<MrgState>,
}

impl LaneStates {
    /// Derive `lanes` substream states from a scalar seed: lane `j` sits
    /// `j * 2^72` draws past the seed state.
    pub fn from_seed(seed: u32, lanes: usize) -> Result<Self> {
        Ok(Self::substreams_of(MrgState::from_seed(seed)?, lanes))
    }

    /// Derive `lanes` substream states from an explicit root state.
    pub fn substreams_of(root: MrgState, lanes: usize) -> Self {
        let mut states = Vec::with_capacity(lanes);
        let mut state = root;
        for _ in 0..lanes {
            states.push(state);
            state = state.jump(JumpDistance::TwoPow72);
        }
        Self { states }
    }

    /// Adopt caller-provided state vectors, validating each one.
    pub fn from_states(states: Vec<MrgState>) -> Result<Self> {
        for state in &states {
            state.validate()?;
        }
        Ok(Self { states })
    }

    /// Number of lanes.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the arena holds no lanes.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The state of one lane, if it exists.
    pub fn get(&self, lane: usize) -> Option<&MrgState> {
        self.states.get(lane)
    }

    /// All lane states, in lane order.
    pub fn as_slice(&self) -> &[MrgState] {
        &self.states
    }

    /// Mutable view over all lane states (the kernel's update target).
    pub fn as_mut_slice(&mut self) -> &mut [MrgState] {
        &mut self.states
    }

    /// Consume the arena, yielding the raw state vector array.
    pub fn into_inner(self) -> Vec<MrgState> {
        self.states
    }
}

/// An owning generator session over the stream hierarchy.
///
/// Holds the root state of the next unused stream. Every [`uniform`] call
/// fans the current root out into substream lanes, runs the sampling
/// kernel, and advances the root by 2^134 draws, so repeated calls draw
/// from pairwise non-overlapping streams.
///
/// [`uniform`]: MrgStreams::uniform
#[derive(Debug, Clone)]
pub struct MrgStreams {
    root: MrgState,
}

impl MrgStreams {
    /// Create a session from a scalar seed.
    pub fn new(seed: u32) -> Result<Self> {
        let root = MrgState::from_seed(seed)?;
        info!("initialized MRG31k3p stream session (seed={seed})");
        Ok(Self { root })
    }

    /// Create a session from an explicit, validated root state.
    pub fn from_state(root: MrgState) -> Result<Self> {
        root.validate()?;
        Ok(Self { root })
    }

    /// The root state the next `uniform` call will fan out from.
    pub fn root(&self) -> &MrgState {
        &self.root
    }

    /// Fill a buffer of `shape` with uniform draws in (0, 1), spreading the
    /// work over `lanes` substreams of the current stream, then advance the
    /// session to the next stream.
    ///
    /// On error (shape rejected by the capacity guard) the session is left
    /// untouched.
    pub fn uniform<T, D>(&mut self, shape: &[D], lanes: usize) -> Result<Vec<T>>
    where
        T: UniformElement,
        D: Copy + Into<i64>,
    {
        let mut arena = LaneStates::substreams_of(self.root, lanes);
        let buffer = kernel::fill_uniform(arena.as_mut_slice(), shape)?;
        self.root = self.root.jump(JumpDistance::TwoPow134);
        Ok(buffer)
    }
}
