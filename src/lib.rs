// #![warn(missing_docs)]

//! Squad-level combat decisions for StarCraft II bots.
//!
//! Every game step the host builds a [`GameState`](host::GameState) snapshot, wraps it
//! together with its spatial query, pathing and engagement oracle services into a
//! [`Mediator`](host::Mediator) and calls [`Hub::step`]. Registered [`Manager`]s then decide
//! what each friendly unit does and the resulting [`Maneuver`](maneuver::Maneuver)s and
//! direct commands are flushed into the host's [`BehaviorSink`](action::BehaviorSink).

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
pub extern crate sc2_macro;
#[macro_use]
extern crate maplit;
#[macro_use]
extern crate log;

/// The most frequent used items and various traits here.
/// Prefered usage: `use sc2_combat::prelude::*;`.
pub mod prelude {
	pub use crate::{
		action::{BehaviorSink, Commander, Target},
		behaviors::CombatBehavior,
		config::CombatConfig,
		distance::*,
		engagement::{EngagementOracle, EngagementOutcome, EngagementThresholds},
		geometry::Point2,
		host::{GameState, Mediator, Pathing, QueryTree, SpatialQuery, UnitRole},
		ids::*,
		maneuver::{CombatStep, Maneuver},
		pixel_map::GridKind,
		squad::{Squad, SquadId},
		unit::Unit,
		units::{Units, UnitsIterator},
		CombatResult, Hub, Manager,
	};
}

pub mod action;
pub mod behaviors;
pub mod config;
pub mod constants;
pub mod distance;
pub mod engagement;
pub mod geometry;
pub mod host;
pub mod ids;
pub mod maneuver;
pub mod managers;
pub mod pixel_map;
pub mod squad;
pub mod targeting;
pub mod tracker;
pub mod unit;
pub mod units;
pub mod utils;
pub mod waypoints;

use action::{BehaviorSink, Commander};
use host::Mediator;
use std::error::Error;

/// Result returned by host-facing entry points.
pub type CombatResult<T> = Result<T, Box<dyn Error>>;

/// Trait that every decision layer registered in [`Hub`] implements.
pub trait Manager {
	/// Called on every game step with fresh snapshot.
	/// Decisions are written into `out` and flushed after all managers ran.
	fn update(&mut self, mediator: &Mediator, out: &mut Commander) -> CombatResult<()>;

	/// Name used in log messages.
	fn name(&self) -> &'static str {
		"Manager"
	}
}

/// Drives registered managers in fixed order once per game step.
#[derive(Default)]
pub struct Hub {
	managers: Vec<Box<dyn Manager>>,
	iteration: usize,
}
impl Hub {
	pub fn new() -> Self {
		Default::default()
	}
	/// Managers are updated in order of registration.
	pub fn register<M: Manager + 'static>(&mut self, manager: M) -> &mut Self {
		self.managers.push(Box::new(manager));
		self
	}
	pub fn len(&self) -> usize {
		self.managers.len()
	}
	pub fn is_empty(&self) -> bool {
		self.managers.is_empty()
	}
	/// Number of steps done so far.
	pub fn iteration(&self) -> usize {
		self.iteration
	}
	/// Runs one game step: every manager decides on the same snapshot,
	/// then collected decisions are handed to the host.
	pub fn step(&mut self, mediator: &Mediator, sink: &mut dyn BehaviorSink) -> CombatResult<()> {
		let mut commander = Commander::default();
		for manager in &mut self.managers {
			manager.update(mediator, &mut commander)?;
		}
		trace!(
			"Step {}: {} maneuvers, {} commands",
			self.iteration,
			commander.maneuvers().len(),
			commander.commands_count()
		);
		self.iteration += 1;
		commander.flush(sink)
	}
}
