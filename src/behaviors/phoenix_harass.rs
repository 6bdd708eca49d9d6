use super::{enemies_near, solo, CombatBehavior, EnemySnapshot};
use crate::{
	action::{Commander, Target},
	config::CombatConfig,
	geometry::Point2,
	host::Mediator,
	ids::{AbilityId, BuffId},
	maneuver::{CombatStep, Maneuver},
	pixel_map::GridKind,
	targeting::{in_attack_range, lift_target, liftable, shooting_order},
	units::Units,
};

/// Phoenixes hunting air units and lifting ground ones.
pub struct PhoenixHarass<'a> {
	pub config: &'a CombatConfig,
	/// Enemy units and anti-air structures near each phoenix.
	pub enemies: &'a EnemySnapshot,
	pub can_engage: bool,
	pub target: Point2,
	pub main: bool,
	pub main_position: Point2,
	/// Own units around the squad that can shoot lifted units.
	pub anti_air_support: usize,
}

impl CombatBehavior for PhoenixHarass<'_> {
	fn execute(&self, units: &Units, _mediator: &Mediator, out: &mut Commander) {
		let config = self.config;
		for phoenix in units {
			let mut maneuver = Maneuver::new(phoenix.tag);
			maneuver.add_overlay(CombatStep::KeepUnitSafe {
				grid: GridKind::AirAvoidance,
			});

			let close = enemies_near(self.enemies, phoenix.tag);
			if close.is_empty() {
				maneuver.add(CombatStep::PathUnitToTarget {
					grid: GridKind::Air,
					target: if self.main { self.target } else { self.main_position },
					success_at_distance: config.path_success_distance,
				});
				out.register(maneuver);
				continue;
			}

			let lifted = close.filter(|u| u.has_buff(BuffId::GravitonBeam));
			let air = close.filter(|u| u.is_flying || u.has_buff(BuffId::GravitonBeam));
			let shield = phoenix.shield_percentage().unwrap_or(0.0);
			maneuver.add(CombatStep::ShootTargetInRange {
				targets: shooting_order(&solo(phoenix), &air, phoenix.position),
				extra_range: 0.0,
			});

			if !self.can_engage {
				if !self.main {
					maneuver.add(CombatStep::PathUnitToTarget {
						grid: GridKind::Air,
						target: self.main_position,
						success_at_distance: config.phoenix_regroup_distance,
					});
				}
				maneuver.add(CombatStep::KeepUnitSafe { grid: GridKind::Air });
				out.register(maneuver);
				continue;
			}

			let lift_candidates = liftable(&close);
			let lift_ready = shield > config.phoenix_shield_gate
				&& phoenix.has_ability(AbilityId::GravitonBeamGravitonBeam)
				&& self.anti_air_support >= config.lift_support;

			if shield < config.phoenix_shield_gate {
				maneuver.add(CombatStep::KeepUnitSafe { grid: GridKind::Air });
			} else if !air.is_empty() {
				if let Some(lifted) = lifted.closest(phoenix) {
					maneuver.add(CombatStep::AttackTarget { target: lifted.tag });
				}
				maneuver.add(CombatStep::KeepUnitSafe {
					grid: GridKind::GroundToAir,
				});
				match air.closest(phoenix) {
					Some(closest) if in_attack_range(phoenix, &air, 0.0).is_empty() => {
						maneuver.add(CombatStep::AMove {
							target: closest.position,
						});
					}
					_ => {
						maneuver.add(CombatStep::KeepUnitSafe { grid: GridKind::Air });
					}
				}
			} else if let Some(lift) = lift_target(phoenix, &lift_candidates).filter(|_| lift_ready) {
				maneuver.add(CombatStep::UseAbility {
					ability: AbilityId::GravitonBeamGravitonBeam,
					target: Target::Tag(lift.tag),
				});
			} else {
				maneuver
					.add(CombatStep::KeepUnitSafe { grid: GridKind::Air })
					.add(CombatStep::Move {
						target: self.main_position,
					});
			}
			out.register(maneuver);
		}
	}
}
