use super::{enemies_near, CombatBehavior, EnemySnapshot};
use crate::{
	action::{Commander, Target},
	config::CombatConfig,
	geometry::Point2,
	host::{Mediator, QueryTree},
	ids::AbilityId,
	maneuver::{CombatStep, Maneuver},
	pixel_map::GridKind,
	targeting::{in_attack_range, shooting_order, valid_targets},
	unit::Unit,
	units::Units,
};
use rustc_hash::FxHashMap;

/// Adepts raiding enemy mineral lines.
pub struct AdeptHarass<'a> {
	pub config: &'a CombatConfig,
	/// Enemy ground units near each adept.
	pub enemies: &'a EnemySnapshot,
	/// Destination of each adept.
	pub targets: &'a FxHashMap<u64, Point2>,
	/// Destination of adepts missing from `targets`.
	pub default: Point2,
}
impl AdeptHarass<'_> {
	/// Oracle thinks nearby own units win decisively and no static defence is around.
	///
	/// Static defence is underrated by oracle, so it always makes fight not worth taking.
	pub fn can_take_fight(&self, adept: &Unit, enemies: &Units, mediator: &Mediator) -> bool {
		if enemies.iter().any(|e| e.is_static_defence()) {
			return false;
		}
		let own = mediator.units_near(adept.position, self.config.adept_fight_radius, QueryTree::AllOwn);
		mediator.can_win_fight_ignoring_workers(&own, enemies) >= self.config.adept_fight_threshold
	}
}

impl CombatBehavior for AdeptHarass<'_> {
	fn execute(&self, units: &Units, mediator: &Mediator, out: &mut Commander) {
		let grid = GridKind::Ground;
		for adept in units {
			let target = self.targets.get(&adept.tag).copied().unwrap_or(self.default);
			let mut maneuver = Maneuver::new(adept.tag);

			if adept.has_ability(AbilityId::AdeptPhaseShift) {
				maneuver.add(CombatStep::UseAbility {
					ability: AbilityId::AdeptPhaseShift,
					target: Target::Pos(target),
				});
				out.register(maneuver);
				continue;
			}

			let close = valid_targets(&enemies_near(self.enemies, adept.tag), false);
			if close.is_empty() {
				maneuver.add(CombatStep::Move { target });
				out.register(maneuver);
				continue;
			}

			// adepts nearby focus the same targets
			let group = units.closer(self.config.adept_fight_radius, adept);
			let fighters = close.not_structures();
			let workers = in_attack_range(adept, &close.workers(), 0.0);
			let in_range = in_attack_range(adept, &fighters, 0.0);
			if !workers.is_empty() {
				maneuver.add(CombatStep::ShootTargetInRange {
					targets: shooting_order(&group, &workers, adept.position),
					extra_range: 0.0,
				});
			} else if !in_range.is_empty() {
				maneuver.add(CombatStep::ShootTargetInRange {
					targets: shooting_order(&group, &in_range, adept.position),
					extra_range: 0.0,
				});
			}
			if fighters.is_empty() {
				let structures = in_attack_range(adept, &close, 0.0);
				if !structures.is_empty() {
					maneuver.add(CombatStep::ShootTargetInRange {
						targets: shooting_order(&group, &structures, adept.position),
						extra_range: 0.0,
					});
				}
			}

			if self.can_take_fight(adept, &close, mediator) {
				match fighters.closest(adept) {
					Some(enemy) => maneuver.add(CombatStep::StutterUnitBack { target: enemy.tag, grid }),
					None => maneuver.add(CombatStep::Move { target }),
				};
			} else {
				maneuver.add(CombatStep::KeepUnitSafe { grid });
			}
			out.register(maneuver);
		}
	}
}

/// Shades going ahead of their adepts.
///
/// Shade is cancelled when the manager decided so and cancel is possible, otherwise it keeps moving.
pub struct AdeptShadeHarass<'a> {
	pub cancel: &'a FxHashMap<u64, bool>,
	pub targets: &'a FxHashMap<u64, Point2>,
	pub default: Point2,
}

impl CombatBehavior for AdeptShadeHarass<'_> {
	fn execute(&self, units: &Units, _mediator: &Mediator, out: &mut Commander) {
		for shade in units {
			let cancel = self.cancel.get(&shade.tag).copied().unwrap_or(false);
			if cancel && shade.has_ability(AbilityId::CancelAdeptShadePhaseShift) {
				out.use_ability(shade.tag, AbilityId::CancelAdeptShadePhaseShift, false);
			} else {
				let target = self.targets.get(&shade.tag).copied().unwrap_or(self.default);
				out.move_to(shade.tag, Target::Pos(target), false);
			}
		}
	}
}
