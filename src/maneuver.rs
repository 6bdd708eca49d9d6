//! Ordered list of fallback combat steps for one unit on one step.
//!
//! Host executes steps in insertion order and stops at the first one that issues a command.
//! Steps whose precondition doesn't hold are skipped. Overlays are passive safety steps
//! host may run alongside the active one.

use crate::{
	action::Target,
	distance::Distance,
	geometry::Point2,
	ids::AbilityId,
	pixel_map::{is_position_safe, GridKind, Grids},
	unit::Unit,
	units::Units,
};

/// Primitive combat action.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatStep {
	/// Shoots first of `targets` that is in range, if weapon is ready.
	ShootTargetInRange { targets: Vec<u64>, extra_range: f32 },
	/// Attacks given unit.
	AttackTarget { target: u64 },
	/// Attack-moves to position.
	AMove { target: Point2 },
	/// Moves to closest safe spot on grid if current position is dangerous.
	KeepUnitSafe { grid: GridKind },
	/// Paths towards position over grid until close enough.
	PathUnitToTarget {
		grid: GridKind,
		target: Point2,
		success_at_distance: f32,
	},
	/// Shoots target when weapon is ready, steps back while it cools down.
	StutterUnitBack { target: u64, grid: GridKind },
	/// Uses ability if it's available.
	UseAbility { ability: AbilityId, target: Target },
	/// Worker version of stutter step: hits target, then runs back to minerals.
	WorkerKiteBack { target: u64 },
	/// Plain move.
	Move { target: Point2 },
}
impl CombatStep {
	/// Step moves unit away from danger rather than fights.
	pub fn is_retreat(&self) -> bool {
		matches!(self, CombatStep::KeepUnitSafe { .. })
	}
	/// Step advances on enemy and fires.
	pub fn is_attack(&self) -> bool {
		matches!(
			self,
			CombatStep::ShootTargetInRange { .. }
				| CombatStep::AttackTarget { .. }
				| CombatStep::AMove { .. }
				| CombatStep::StutterUnitBack { .. }
				| CombatStep::WorkerKiteBack { .. }
		)
	}

	/// Checks if step would issue a command for given unit.
	///
	/// `units` are used to resolve target tags, unresolved targets make the step no-op.
	pub fn is_actionable(&self, unit: &Unit, units: &Units, grids: &Grids) -> bool {
		match self {
			CombatStep::ShootTargetInRange { targets, extra_range } => {
				!unit.on_cooldown()
					&& targets.iter().filter_map(|t| units.get(*t)).any(|t| {
						unit.can_attack_unit(t) && t.can_be_attacked() && unit.in_range(t, *extra_range)
					})
			}
			CombatStep::AttackTarget { target }
			| CombatStep::StutterUnitBack { target, .. }
			| CombatStep::WorkerKiteBack { target } => units.contains_tag(*target),
			CombatStep::AMove { .. } | CombatStep::Move { .. } => true,
			CombatStep::KeepUnitSafe { grid } => !is_position_safe(grids.get(*grid), unit.position),
			CombatStep::PathUnitToTarget {
				target,
				success_at_distance,
				..
			} => unit.is_further(*success_at_distance, *target),
			CombatStep::UseAbility { ability, .. } => unit.has_ability(*ability),
		}
	}
}

/// Steps built for one unit on one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Maneuver {
	tag: u64,
	steps: Vec<CombatStep>,
	overlays: Vec<CombatStep>,
}
impl Maneuver {
	/// Creates empty maneuver for unit with given tag.
	pub fn new(tag: u64) -> Self {
		Self {
			tag,
			steps: Vec::new(),
			overlays: Vec::new(),
		}
	}
	/// Appends step as the lowest priority fallback.
	pub fn add(&mut self, step: CombatStep) -> &mut Self {
		self.steps.push(step);
		self
	}
	/// Adds passive step that may run together with active one.
	pub fn add_overlay(&mut self, step: CombatStep) -> &mut Self {
		self.overlays.push(step);
		self
	}
	pub fn tag(&self) -> u64 {
		self.tag
	}
	pub fn steps(&self) -> &[CombatStep] {
		&self.steps
	}
	pub fn overlays(&self) -> &[CombatStep] {
		&self.overlays
	}
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty() && self.overlays.is_empty()
	}
	pub fn len(&self) -> usize {
		self.steps.len()
	}
	/// Returns step host would execute for given unit.
	pub fn first_actionable(&self, unit: &Unit, units: &Units, grids: &Grids) -> Option<&CombatStep> {
		self.steps.iter().find(|s| s.is_actionable(unit, units, grids))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		ids::UnitTypeId,
		unit::{Alliance, TargetType},
	};

	fn setup() -> (Unit, Units, Grids) {
		let stalker = Unit::new(1, UnitTypeId::Stalker, Alliance::Own, Point2::new(5.5, 5.5))
			.with_weapon(TargetType::Any, 6.0);
		let zealot = Unit::new(2, UnitTypeId::Zealot, Alliance::Enemy, Point2::new(8.5, 5.5));
		let units = vec![stalker.clone(), zealot].into_iter().collect::<Units>();
		(stalker, units, Grids::safe(20, 20))
	}

	#[test]
	fn shoot_falls_through_on_cooldown() {
		let (mut stalker, units, grids) = setup();
		let mut maneuver = Maneuver::new(1);
		maneuver
			.add(CombatStep::ShootTargetInRange {
				targets: vec![2],
				extra_range: 0.0,
			})
			.add(CombatStep::AMove {
				target: Point2::new(10.0, 10.0),
			});

		assert!(matches!(
			maneuver.first_actionable(&stalker, &units, &grids),
			Some(CombatStep::ShootTargetInRange { .. })
		));

		stalker.weapon_cooldown = Some(5.0);
		assert!(matches!(
			maneuver.first_actionable(&stalker, &units, &grids),
			Some(CombatStep::AMove { .. })
		));
	}

	#[test]
	fn keep_safe_only_acts_in_danger() {
		let (stalker, units, mut grids) = setup();
		let mut maneuver = Maneuver::new(1);
		maneuver.add(CombatStep::KeepUnitSafe { grid: GridKind::Ground });
		assert_eq!(maneuver.first_actionable(&stalker, &units, &grids), None);

		grids.ground[(5, 5)] = 25.0;
		assert!(maneuver
			.first_actionable(&stalker, &units, &grids)
			.map_or(false, |s| s.is_retreat()));
	}

	#[test]
	fn missing_target_is_skipped() {
		let (stalker, units, grids) = setup();
		let mut maneuver = Maneuver::new(1);
		maneuver
			.add(CombatStep::AttackTarget { target: 404 })
			.add(CombatStep::Move {
				target: Point2::new(1.0, 1.0),
			});
		assert!(matches!(
			maneuver.first_actionable(&stalker, &units, &grids),
			Some(CombatStep::Move { .. })
		));
	}
}
