use super::{enemies_near, CombatBehavior, EnemySnapshot};
use crate::{
	action::{Commander, Target},
	config::CombatConfig,
	distance::Distance,
	geometry::Point2,
	host::Mediator,
	ids::AbilityId,
	maneuver::{CombatStep, Maneuver},
	pixel_map::{is_position_safe, GridKind},
	targeting::{pick_enemy_target, valid_targets},
	unit::Unit,
	units::Units,
};

/// What voidrays are used for.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VoidrayMode {
	/// Roaming between vantage points and pushing into enemy main later on.
	MapControl,
	/// Guarding own bases.
	Defensive,
}

/// Voidrays acting on their own, away from main army.
pub struct Voidrays<'a> {
	pub config: &'a CombatConfig,
	pub mode: VoidrayMode,
	/// Everything enemy near each voidray.
	pub enemies: &'a EnemySnapshot,
	/// Vantage point voidrays hold when nothing else is going on.
	pub vantage: Point2,
}
impl Voidrays<'_> {
	fn in_range(&self, voidray: &Unit, enemy: &Unit) -> bool {
		enemy.is_closer(self.config.voidray_range + voidray.radius + enemy.radius, voidray)
	}

	fn attack(&self, voidray: &Unit, close: &Units, maneuver: &mut Maneuver) {
		let in_range = close.filter(|e| self.in_range(voidray, e));
		if in_range.is_empty() {
			if let Some(target) = pick_enemy_target(close) {
				maneuver.add(CombatStep::AttackTarget { target: target.tag });
			}
			return;
		}
		let armored = in_range.filter(|e| e.is_armored());
		if armored.is_empty() {
			if let Some(target) = pick_enemy_target(&in_range) {
				maneuver.add(CombatStep::AttackTarget { target: target.tag });
			}
		} else if let Some(target) = pick_enemy_target(&armored) {
			maneuver
				.add(CombatStep::UseAbility {
					ability: AbilityId::EffectVoidRayPrismaticAlignment,
					target: Target::None,
				})
				.add(CombatStep::AttackTarget { target: target.tag });
		}
	}
}

impl CombatBehavior for Voidrays<'_> {
	fn execute(&self, units: &Units, mediator: &Mediator, out: &mut Commander) {
		let config = self.config;
		let ground_threats = mediator.threats_near_townhalls(false, config.townhall_threat_range);
		let air_threats = mediator.threats_near_townhalls(true, config.townhall_threat_range);
		let map = mediator.map();
		let near_spawn = mediator
			.units()
			.enemy
			.units
			.filter(|u| u.distance_squared(map.start_location) < config.enemy_near_spawn_sq);
		let avoidance = mediator.grid(GridKind::AirAvoidance);

		for voidray in units {
			let mut maneuver = Maneuver::new(voidray.tag);
			let close = valid_targets(&enemies_near(self.enemies, voidray.tag), false);

			match self.mode {
				VoidrayMode::MapControl => {
					if !close.is_empty() {
						let flying_in_range = close.filter(|e| e.is_flying && self.in_range(voidray, e));
						if !is_position_safe(avoidance, voidray.position) {
							// hazard under us, dive into enemy rather than back off
							if let Some(target) = pick_enemy_target(&close) {
								maneuver.add(CombatStep::Move {
									target: target.position,
								});
							}
						} else if let Some(target) = pick_enemy_target(&flying_in_range) {
							maneuver.add(CombatStep::AttackTarget { target: target.tag });
						} else {
							self.attack(voidray, &close, &mut maneuver);
						}
					}
				}
				VoidrayMode::Defensive => {
					maneuver.add(CombatStep::KeepUnitSafe {
						grid: GridKind::AirAvoidance,
					});
					if !close.is_empty() {
						self.attack(voidray, &close, &mut maneuver);
					}
				}
			}

			let move_to = if self.mode.is_map_control() && mediator.time() > config.voidray_push_time {
				Some(map.enemy_start)
			} else if self.mode.is_map_control() && !near_spawn.is_empty() {
				near_spawn.closest(voidray).map(|u| u.position)
			} else {
				ground_threats
					.closest(voidray)
					.or_else(|| air_threats.closest(voidray))
					.map(|u| u.position)
			};
			maneuver.add(CombatStep::AMove {
				target: move_to.unwrap_or(self.vantage),
			});
			out.register(maneuver);
		}
	}
}

