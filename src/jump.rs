//! Jump-ahead: leaping a state vector forward 2^k steps in O(1).
//!
//! Advancing an order-3 recurrence n steps is one multiplication by the n-th
//! power of its companion matrix. The three distances used by the stream
//! layout (2^67, 2^72, 2^134) have their matrix powers embedded as constant
//! tables; they are reproducible from the one-step matrices via
//! [`mat_pow2`], and the unit tests assert exactly that.

use crate::arith::{mat_pow2, mat_vec, Matrix3, M1, M2};
use crate::state::MrgState;

/// One-step companion matrix of the first component (mod [`M1`]).
pub(crate) const A1: Matrix3 = [[0, 4_194_304, 129], [1, 0, 0], [0, 1, 0]];

/// One-step companion matrix of the second component (mod [`M2`]).
pub(crate) const A2: Matrix3 = [[32_768, 0, 32_769], [1, 0, 0], [0, 1, 0]];

// A1^(2^k) mod M1 and A2^(2^k) mod M2 for the three layout distances.

pub(crate) const A1_P67: Matrix3 = [
    [1_952_654_372, 1_431_165_552, 385_650_010],
    [935_230_498, 1_952_654_372, 1_286_732_594],
    [2_074_222_518, 935_230_498, 111_498_005],
];

pub(crate) const A2_P67: Matrix3 = [
    [913_512_581, 899_832_830, 1_760_713_785],
    [774_461_412, 2_074_722_787, 899_832_830],
    [1_936_472_629, 1_811_101_211, 2_074_722_787],
];

pub(crate) const A1_P72: Matrix3 = [
    [1_516_919_229, 758_510_237, 499_121_365],
    [1_884_998_244, 1_516_919_229, 335_398_200],
    [601_897_748, 1_884_998_244, 358_115_744],
];

pub(crate) const A2_P72: Matrix3 = [
    [1_228_857_673, 1_496_414_766, 954_677_935],
    [1_133_297_478, 1_407_477_216, 1_496_414_766],
    [2_002_613_992, 1_639_496_704, 1_407_477_216],
];

pub(crate) const A1_P134: Matrix3 = [
    [1_702_500_920, 1_849_582_496, 1_656_874_625],
    [828_554_832, 1_702_500_920, 1_512_419_905],
    [1_143_731_069, 828_554_832, 102_237_247],
];

pub(crate) const A2_P134: Matrix3 = [
    [796_789_021, 1_464_208_080, 607_337_906],
    [1_241_679_051, 1_431_130_166, 1_464_208_080],
    [1_401_213_391, 1_178_684_362, 1_431_130_166],
];

/// Jump distance selector for the stream/substream layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpDistance {
    /// 2^67 steps: half the substream spacing, the safety margin that bounds
    /// how far one substream may be consumed without overlapping the next.
    TwoPow67,
    /// 2^72 steps: the next substream.
    TwoPow72,
    /// 2^134 steps: the next stream.
    TwoPow134,
}

impl JumpDistance {
    /// log2 of the number of steps covered by this jump.
    pub fn log2_steps(self) -> u32 {
        match self {
            JumpDistance::TwoPow67 => 67,
            JumpDistance::TwoPow72 => 72,
            JumpDistance::TwoPow134 => 134,
        }
    }

    fn tables(self) -> (&'static Matrix3, &'static Matrix3) {
        match self {
            JumpDistance::TwoPow67 => (&A1_P67, &A2_P67),
            JumpDistance::TwoPow72 => (&A1_P72, &A2_P72),
            JumpDistance::TwoPow134 => (&A1_P134, &A2_P134),
        }
    }
}

impl MrgState {
    /// The state this lane would reach after 2^k sequential steps, for the
    /// given layout distance. One matrix-vector product per component;
    /// exact, and total for every valid state.
    #[must_use]
    pub fn jump(&self, distance: JumpDistance) -> MrgState {
        let (a1, a2) = distance.tables();
        MrgState {
            comp1: mat_vec(a1, &self.comp1, M1),
            comp2: mat_vec(a2, &self.comp2, M2),
        }
    }

    /// Generalized jump: the state after 2^k sequential steps for any `k`,
    /// with the matrix power computed on the fly. Used where the fixed
    /// layout distances do not apply (small surrogate jumps in tests,
    /// custom spacings).
    #[must_use]
    pub fn advance_pow2(&self, k: u32) -> MrgState {
        let a1 = mat_pow2(&A1, k, M1);
        let a2 = mat_pow2(&A2, k, M2);
        MrgState {
            comp1: mat_vec(&a1, &self.comp1, M1),
            comp2: mat_vec(&a2, &self.comp2, M2),
        }
    }
}
