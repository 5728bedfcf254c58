//! Per-core cooperative scheduling and the cross-core handshake.
//!
//! Each core runs two execution contexts:
//!
//! - a preemptive timer interrupt at the DDS rate, which only ever calls
//!   [`ToneVoice::tick`](crate::synth::ToneVoice::tick) on that core's own
//!   state;
//! - a cooperative scheduler polling its tasks round-robin. Tasks suspend
//!   only by returning [`Poll::Pending`] from a poll; there is no
//!   preemption between tasks, so a task that spins starves its core.
//!
//! The two cores synchronize once per handshake interval through a pair of
//! binary semaphores consumed by the [`Heartbeat`] tasks: strict
//! alternation of the heartbeat bodies gives mutual exclusion over the
//! ping-pong counter without a general-purpose lock.

mod blink;
mod clock;
mod heartbeat;
mod scheduler;
mod semaphore;
mod task;

pub use blink::{BlinkTask, Led};
pub use clock::Clock;
pub use heartbeat::{Heartbeat, HeartbeatPhase};
pub use scheduler::CoreScheduler;
pub use semaphore::Semaphore;
pub use task::{Poll, Task};
