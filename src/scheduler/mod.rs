//! Auto-scheduler, placement scoring and KPI evaluation.
//!
//! # Algorithm
//!
//! [`AutoScheduler`] is a single-pass, vote-priority greedy heuristic: each
//! session in turn takes its best-scoring free slot. It is not optimal, but
//! it is deterministic, fast, and explains every placement through a score
//! breakdown and warnings.
//!
//! # KPI
//!
//! [`ScheduleKpi`] reports assignment rate, preference hit rate, warning
//! counts and per-venue slot utilization.

mod auto;
mod kpi;
mod scoring;

pub use auto::{auto_schedule, AutoScheduler};
pub use kpi::ScheduleKpi;
pub use scoring::{score_slot, PlacementState, SlotScore};
