use super::{solo, CombatBehavior};
use crate::{
	action::Commander,
	config::CombatConfig,
	geometry::Point2,
	host::Mediator,
	ids::{BuffId, UnitTypeId},
	maneuver::{CombatStep, Maneuver},
	targeting::{attackable_by, danger_to_air, in_attack_range, pick_enemy_target, shooting_order, valid_targets},
	units::Units,
};

/// General behavior of ground (and mixed) army squads.
pub struct SquadCombat<'a> {
	pub config: &'a CombatConfig,
	/// Enemies near the squad.
	pub enemies: &'a Units,
	/// Squad is committed to the fight.
	pub can_engage: bool,
	pub target: Point2,
	/// Fight anything near even when there are only structures around.
	pub always_fight: bool,
}

impl CombatBehavior for SquadCombat<'_> {
	fn execute(&self, units: &Units, mediator: &Mediator, out: &mut Commander) {
		let config = self.config;
		let valid = valid_targets(self.enemies, false);

		for unit in units {
			let grid = mediator.grid_for(unit.is_flying);
			let mut maneuver = Maneuver::new(unit.tag);

			if unit.type_id == UnitTypeId::Observer {
				maneuver
					.add(CombatStep::KeepUnitSafe { grid })
					.add(CombatStep::PathUnitToTarget {
						grid,
						target: self.target,
						success_at_distance: config.path_success_distance,
					});
				out.register(maneuver);
				continue;
			}

			let targets = attackable_by(unit, &valid);
			if targets.is_empty() {
				maneuver.add(CombatStep::PathUnitToTarget {
					grid,
					target: self.target,
					success_at_distance: config.path_success_distance,
				});
				if unit.is_idle() {
					maneuver.add(CombatStep::AMove { target: self.target });
				}
				out.register(maneuver);
				continue;
			}

			let group = solo(unit);
			let fighters = targets.not_structures();
			let in_range = in_attack_range(unit, &fighters, 0.0);
			let shoot = if in_range.is_empty() {
				in_attack_range(unit, &targets, 0.0)
			} else {
				in_range
			};

			if unit.hits_percentage().map_or(false, |hits| hits < config.ground_health_gate) {
				maneuver.add(CombatStep::KeepUnitSafe { grid });
				if !shoot.is_empty() {
					maneuver.add(CombatStep::ShootTargetInRange {
						targets: shooting_order(&group, &shoot, unit.position),
						extra_range: 0.0,
					});
				}
				out.register(maneuver);
				continue;
			}

			if unit.is_flying && unit.can_attack_both() {
				let danger = danger_to_air(unit, &targets);
				let flying = danger.flying();
				let danger = if flying.is_empty() { danger } else { flying };
				if let Some(threat) = pick_enemy_target(&danger) {
					if unit.is_attack_ready(threat) {
						maneuver.add(CombatStep::AttackTarget { target: threat.tag });
					}
				}
			}

			if !shoot.is_empty() {
				maneuver.add(CombatStep::ShootTargetInRange {
					targets: shooting_order(&group, &shoot, unit.position),
					extra_range: 0.0,
				});
			}

			if !fighters.ground().is_empty() || self.always_fight {
				if unit.has_buff(BuffId::LockOn) {
					maneuver.add(CombatStep::Move {
						target: mediator.map().start_location,
					});
				} else if self.can_engage {
					if let Some(enemy) = targets.closest(unit) {
						if unit.range_vs(enemy) < config.stutter_min_range {
							maneuver.add(CombatStep::AMove {
								target: enemy.position,
							});
						} else {
							maneuver.add(CombatStep::StutterUnitBack { target: enemy.tag, grid });
						}
					}
				} else {
					maneuver
						.add(CombatStep::KeepUnitSafe { grid })
						.add(CombatStep::PathUnitToTarget {
							grid,
							target: self.target,
							success_at_distance: config.retreat_path_success_distance,
						});
				}
			} else {
				maneuver
					.add(CombatStep::KeepUnitSafe { grid })
					.add(CombatStep::PathUnitToTarget {
						grid,
						target: self.target,
						success_at_distance: config.retreat_path_success_distance,
					})
					.add(CombatStep::AMove { target: self.target });
			}
			out.register(maneuver);
		}
	}
}
