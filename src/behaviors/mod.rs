//! Per-step combat policies.
//!
//! Every behavior takes units it controls together with snapshot of enemies computed once by
//! the owning manager, and writes either a [`Maneuver`](crate::maneuver::Maneuver) or direct
//! commands for each unit into [`Commander`]. Behaviors are stateless, everything that must
//! survive between steps is kept by managers.

use crate::{
	action::Commander,
	geometry::Point2,
	host::{Mediator, QueryTree},
	units::Units,
};
use rustc_hash::FxHashMap;

mod adept_harass;
mod flying_squad_combat;
mod map_control;
mod phoenix_harass;
mod squad_combat;
mod voidrays;
mod worker_defenders;

pub use adept_harass::{AdeptHarass, AdeptShadeHarass};
pub use flying_squad_combat::FlyingSquadCombat;
pub use map_control::{MapControlAdepts, MapControlShades, ObserverBaseDefence};
pub use phoenix_harass::PhoenixHarass;
pub use squad_combat::SquadCombat;
pub use voidrays::{VoidrayMode, Voidrays};
pub use worker_defenders::WorkerDefenders;

/// Shared contract of all combat behaviors.
pub trait CombatBehavior {
	/// Decides what given units do on current step.
	fn execute(&self, units: &Units, mediator: &Mediator, out: &mut Commander);
}

/// Enemies near each unit, keyed by unit tag.
pub type EnemySnapshot = FxHashMap<u64, Units>;

/// Queries enemies near every unit in one batch.
pub fn enemy_snapshot(mediator: &Mediator, units: &Units, distance: f32, tree: QueryTree) -> EnemySnapshot {
	let points = units.iter().map(|u| u.position).collect::<Vec<Point2>>();
	units
		.tags()
		.copied()
		.zip(mediator.units_in_range(&points, distance, tree))
		.collect()
}

/// Enemies of unit in snapshot, empty when unit is missing.
pub(crate) fn enemies_near(snapshot: &EnemySnapshot, tag: u64) -> Units {
	snapshot.get(&tag).cloned().unwrap_or_default()
}

/// Unit alone as firing group.
pub(crate) fn solo(unit: &crate::unit::Unit) -> Units {
	std::iter::once(unit.clone()).collect()
}
