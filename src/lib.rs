#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Explosion-inspired population metaheuristics for bound-constrained
//! black-box minimization. Three engines ship in single- and
//! multi-objective form: Big Bang–Big Crunch, the Fireworks algorithm and
//! the Grenade Explosion Method.
//!
//! # Getting Started
//!
//! Describe the problem as bounds plus an objective, pick an engine and
//! run it:
//!
//! ```
//! use blastopt::prelude::*;
//!
//! let problem = Problem::new(vec![-10.0; 3], vec![10.0; 3], |x: &[f64]| {
//!     x.iter().map(|v| (v - 1.0).powi(2)).sum::<f64>()
//! })
//! .unwrap();
//!
//! let params = FireworksParams::builder().max_iterations(100).seed(42).build().unwrap();
//! let mut engine = Fireworks::with_params(params).unwrap();
//! let best = engine.minimize(&problem).unwrap();
//! assert!(best.value() < 1.0);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Problem`] | Box [`Bounds`] plus an [`Objective`] with one or more outputs. |
//! | [`Agent`] | A candidate: a decision [`Point`] and its objective values. |
//! | [`Optimizer`] | The lifecycle every engine shares: parameters, run, result. |
//! | [`RunControl`] | Progress reporting and cooperative cancellation for a run. |
//!
//! # Engines
//!
//! | Engine | Multi-objective | Parameters | First iteration |
//! |--------|-----------------|------------|-----------------|
//! | [`Bbbc`] | [`MultiBbbc`] | [`BbbcParams`] | 1 |
//! | [`Fireworks`] | [`MultiFireworks`] | [`FireworksParams`] | 1 |
//! | [`Gem`] | [`MultiGem`] | [`GemParams`] | 0 |
//!
//! Single-objective engines return the best [`Agent`] found; the
//! multi-objective ones return the non-dominated agents of their final
//! population. Every engine is seeded through its parameters, so two runs
//! with the same seed on the same problem are identical.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on points, agents, bounds and parameter types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at run start, end and incumbent changes | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod agent;
pub mod bbbc;
mod error;
pub mod fireworks;
pub mod gem;
pub mod matrix;
pub mod objective;
pub mod optimizer;
pub mod pareto;
pub mod point;
pub mod problem;
pub mod random;
pub mod ranking;
mod selection;
pub mod summation;

pub use agent::{Agent, AgentPool};
pub use bbbc::{Bbbc, BbbcParams, MultiBbbc};
pub use error::{Error, Result};
pub use fireworks::{Fireworks, FireworksParams, MultiFireworks};
pub use gem::{Gem, GemParams, MultiGem};
pub use matrix::SymmetricMatrix;
pub use objective::{Objective, ObjectiveSet, VectorObjective};
pub use optimizer::{CancellationToken, Optimizer, Progress, RunControl, RunState};
pub use point::Point;
pub use problem::{Bounds, Problem};
pub use summation::CompensatedSum;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use blastopt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::agent::Agent;
    pub use crate::bbbc::{Bbbc, BbbcParams, MultiBbbc};
    pub use crate::error::{Error, Result};
    pub use crate::fireworks::{Fireworks, FireworksParams, MultiFireworks};
    pub use crate::gem::{Gem, GemParams, MultiGem};
    pub use crate::objective::{Objective, ObjectiveSet, VectorObjective};
    pub use crate::optimizer::{CancellationToken, Optimizer, RunControl, RunState};
    pub use crate::point::Point;
    pub use crate::problem::{Bounds, Problem};
}
