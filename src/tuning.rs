//! Tuning Core
//!
//! Converts drained encoder detents into frequency changes. Pure logic,
//! driven by the control loop with monotonic millisecond timestamps.

pub mod ballistic;
pub mod digit;
pub mod frequency;
pub mod ladder;
pub mod status;
pub mod velocity;
pub mod vfo;

pub use ballistic::{BallisticStepController, StepOutcome};
pub use digit::{DigitCursor, TuningMode};
pub use frequency::FrequencyState;
pub use ladder::{Rung, RungSpec, StepLadder};
pub use status::StatusLine;
pub use velocity::{IntervalEma, VelocitySmoother};
pub use vfo::{Vfo, VfoUpdate};
