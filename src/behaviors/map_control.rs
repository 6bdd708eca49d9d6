use super::{enemies_near, solo, CombatBehavior, EnemySnapshot};
use crate::{
	action::{Commander, Target},
	config::CombatConfig,
	distance::*,
	geometry::Point2,
	host::Mediator,
	ids::AbilityId,
	maneuver::{CombatStep, Maneuver},
	pixel_map::GridKind,
	targeting::{in_attack_range, shooting_order, valid_targets},
	units::Units,
};

/// Adepts scouting enemy bases with their shades.
pub struct MapControlAdepts<'a> {
	/// Enemy ground units near each adept.
	pub enemies: &'a EnemySnapshot,
	/// Where shades are sent.
	pub shade_target: Point2,
	/// Where adepts themselves hang around.
	pub rally: Point2,
}

impl CombatBehavior for MapControlAdepts<'_> {
	fn execute(&self, units: &Units, _mediator: &Mediator, out: &mut Commander) {
		for adept in units {
			let close = valid_targets(&enemies_near(self.enemies, adept.tag), false);
			let in_range = in_attack_range(adept, &close, 0.0);

			let mut maneuver = Maneuver::new(adept.tag);
			maneuver.add(CombatStep::UseAbility {
				ability: AbilityId::AdeptPhaseShift,
				target: Target::Pos(self.shade_target),
			});
			if !in_range.is_empty() {
				maneuver.add(CombatStep::ShootTargetInRange {
					targets: shooting_order(&solo(adept), &in_range, adept.position),
					extra_range: 0.0,
				});
			}
			maneuver
				.add(CombatStep::KeepUnitSafe { grid: GridKind::Ground })
				.add(CombatStep::AMove { target: self.rally });
			out.register(maneuver);
		}
	}
}

/// Cancels scouting shades once they've arrived.
///
/// Shade is left alone while it's buff lasts long enough, while it's moving,
/// or while it's order target is still far away.
pub struct MapControlShades<'a> {
	pub config: &'a CombatConfig,
}

impl CombatBehavior for MapControlShades<'_> {
	fn execute(&self, units: &Units, _mediator: &Mediator, out: &mut Commander) {
		for shade in units {
			let long_buff = shade
				.buff_duration_remain
				.map_or(false, |remain| remain > self.config.shade_cancel_buff);
			let travelling = shade
				.target_pos()
				.map_or(false, |pos| pos.distance_squared(shade.position) > self.config.shade_travel_sq);
			if long_buff || shade.is_moving() || travelling {
				continue;
			}
			out.use_ability(shade.tag, AbilityId::CancelAdeptShadePhaseShift, false);
		}
	}
}

/// Observers watching over own bases and spotting cloaked enemies.
pub struct ObserverBaseDefence<'a> {
	pub config: &'a CombatConfig,
	/// Cloaked enemy units.
	pub cloaked: &'a Units,
	/// Where observers stay when there's nothing to spot.
	pub target: Point2,
}

impl CombatBehavior for ObserverBaseDefence<'_> {
	fn execute(&self, units: &Units, _mediator: &Mediator, out: &mut Commander) {
		for observer in units {
			let spot = self
				.cloaked
				.iter()
				.filter(|u| u.distance_squared(observer) < self.config.observer_hunt_sq)
				.closest(observer)
				.map_or(self.target, |u| u.position);

			let mut maneuver = Maneuver::new(observer.tag);
			maneuver
				.add(CombatStep::KeepUnitSafe {
					grid: GridKind::AirAvoidance,
				})
				.add(CombatStep::KeepUnitSafe { grid: GridKind::Air })
				.add(CombatStep::Move { target: spot });
			out.register(maneuver);
		}
	}
}
