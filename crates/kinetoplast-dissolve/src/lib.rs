//! Kinetoplast Dissolve
//!
//! Removes nodes from a compiled [`kinetoplast_graph::NetworkTemplate`]
//! batch by batch and records how the network falls apart.
//!
//! # Runs
//!
//! A [`Dissolution`] borrows the template and keeps its own live overlay,
//! so any number of runs can share one template. Each step partitions the
//! live nodes into components, emits a [`DissolutionStep`], then either
//! stops (largest component within the threshold) or removes the next
//! batch. Removal is uniform by default; [`RemovalPolicy`] lets callers
//! script the order.
//!
//! # Boundary Tracking
//!
//! With `track_boundary` set, the run counts surviving members of every
//! boundary stack and tags the step after the first emptied stack with
//! [`BoundaryEvent::FirstBreak`] and the step after the next one with
//! [`BoundaryEvent::SecondBreak`].
//!
//! # Aggregation
//!
//! [`average_runs`] folds many runs into a single series of mean component
//! sizes by rank.

mod aggregate;
mod components;
mod dissolution;
mod error;
mod events;
mod policy;
mod registry;

pub use aggregate::{average_runs, AveragedStep};
pub use dissolution::{Dissolution, DissolutionConfig};
pub use error::{Error, Result};
pub use events::{BoundaryEvent, ComponentSnapshot, DissolutionStep};
pub use policy::{RemovalPolicy, ScriptedRemoval, UniformRemoval};
pub use registry::BoundaryRegistry;
