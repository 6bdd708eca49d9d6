use super::{solo, CombatBehavior};
use crate::{
	action::Commander,
	config::CombatConfig,
	geometry::Point2,
	host::Mediator,
	ids::UnitTypeId,
	maneuver::{CombatStep, Maneuver},
	pixel_map::GridKind,
	targeting::{attackable_by, in_attack_range, shooting_order, valid_targets},
	units::Units,
};

/// Behavior of squads made of flying units only.
pub struct FlyingSquadCombat<'a> {
	pub config: &'a CombatConfig,
	pub enemies: &'a Units,
	pub can_engage: bool,
	pub target: Point2,
	/// It's the largest squad, others follow it.
	pub main: bool,
}

impl CombatBehavior for FlyingSquadCombat<'_> {
	fn execute(&self, units: &Units, _mediator: &Mediator, out: &mut Commander) {
		let config = self.config;
		let grid = GridKind::Air;
		let valid = valid_targets(self.enemies, false);

		for unit in units {
			let mut maneuver = Maneuver::new(unit.tag);
			let targets = attackable_by(unit, &valid);

			if targets.is_empty() {
				if !valid.is_empty() && !self.can_engage {
					if self.main {
						maneuver.add(CombatStep::KeepUnitSafe { grid });
					} else {
						maneuver.add(CombatStep::PathUnitToTarget {
							grid,
							target: self.target,
							success_at_distance: config.path_success_distance,
						});
					}
				} else {
					maneuver
						.add(CombatStep::PathUnitToTarget {
							grid,
							target: self.target,
							success_at_distance: config.path_success_distance,
						})
						.add(CombatStep::AMove { target: self.target });
				}
				out.register(maneuver);
				continue;
			}

			let healthy = unit
				.hits_percentage()
				.map_or(true, |hits| hits >= config.flying_health_gate);
			if !healthy {
				maneuver.add(CombatStep::KeepUnitSafe { grid });
			}

			let group = solo(unit);
			let danger = if unit.can_attack_ground() {
				targets.filter(|e| {
					(e.can_attack_air() || e.type_id == UnitTypeId::VoidRay) && unit.in_range(e, 0.0)
				})
			} else {
				Units::new()
			};
			let fighters = in_attack_range(unit, &targets.not_structures(), 0.0);
			let shoot = [danger, fighters, in_attack_range(unit, &targets, 0.0)]
				.into_iter()
				.find(|set| !set.is_empty());
			if let Some(shoot) = shoot {
				maneuver.add(CombatStep::ShootTargetInRange {
					targets: shooting_order(&group, &shoot, unit.position),
					extra_range: 0.0,
				});
			}

			match targets.closest(unit) {
				Some(enemy) if self.can_engage && healthy => {
					if unit.range_vs(enemy) < config.stutter_min_range {
						maneuver.add(CombatStep::AMove {
							target: enemy.position,
						});
					} else {
						maneuver.add(CombatStep::StutterUnitBack { target: enemy.tag, grid });
					}
				}
				_ if healthy => {
					maneuver.add(CombatStep::KeepUnitSafe { grid });
				}
				_ => (),
			}
			out.register(maneuver);
		}
	}
}
