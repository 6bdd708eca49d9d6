use crate::{
	action::Commander,
	behaviors::{CombatBehavior, FlyingSquadCombat, SquadCombat},
	config::CombatConfig,
	constants::COMMON_UNIT_IGNORE_TYPES,
	distance::*,
	engagement::{EngagementThresholds, ThresholdError},
	geometry::Point2,
	host::{Mediator, QueryTree, UnitRole},
	ids::UnitTypeId,
	squad::{form_squads, main_squad_position, SquadId},
	targeting::{valid_targets, AttackPointSelector, SquadTargetInput, SquadTargetTable},
	tracker::{fight_relevant, EngagementInput, EngagementTracker},
	units::Units,
	utils::center_mass,
	CombatResult, Manager,
};

/// Main army: aggression, squads, engagement and squad targets.
pub struct CombatManager {
	config: CombatConfig,
	tracker: EngagementTracker,
	aggression: EngagementThresholds,
	aggressive: bool,
	targets: SquadTargetTable,
	attack_point: AttackPointSelector,
}
impl CombatManager {
	pub fn new(config: CombatConfig) -> Result<Self, ThresholdError> {
		Ok(Self {
			tracker: EngagementTracker::new(config.squad_thresholds()?),
			aggression: config.aggression_thresholds()?,
			config,
			aggressive: false,
			targets: SquadTargetTable::new(),
			attack_point: AttackPointSelector::default(),
		})
	}
	/// Army is on offense.
	pub fn is_aggressive(&self) -> bool {
		self.aggressive
	}
	pub fn tracker(&self) -> &EngagementTracker {
		&self.tracker
	}
	pub fn targets(&self) -> &SquadTargetTable {
		&self.targets
	}

	fn update_aggression(&mut self, mediator: &Mediator, army: &Units) {
		let enemy = &mediator.units().enemy;
		if mediator.intel().enemy_race.is_zerg() && enemy.units.of_type(UnitTypeId::Mutalisk).is_empty() {
			self.aggressive = true;
			return;
		}

		let own_near = match center_mass(army, self.config.army_mass_radius) {
			Some((mass, _)) => army.filter(|u| u.distance_squared(mass) < self.config.army_near_mass_sq),
			None => Units::new(),
		};
		let mut enemy_army = enemy.units.filter(|u| {
			!u.is_worker() && !u.is_structure() && !COMMON_UNIT_IGNORE_TYPES.contains(&u.type_id)
		});
		enemy_army.extend(enemy.structures.of_type(UnitTypeId::PlanetaryFortress));

		let outcome = mediator.can_win_fight(&own_near, &enemy_army);
		let aggressive = self.aggression.next(self.aggressive, outcome);
		if aggressive != self.aggressive {
			info!(
				"{} - Turned aggression {}",
				mediator.time_formatted(),
				if aggressive { "on" } else { "off" }
			);
		}
		self.aggressive = aggressive;
	}
}

impl Manager for CombatManager {
	fn update(&mut self, mediator: &Mediator, out: &mut Commander) -> CombatResult<()> {
		let army = mediator.units_with_role(UnitRole::Attacking);
		if self.attack_point.bases().is_empty() {
			self.attack_point = AttackPointSelector::new(mediator.map());
		}
		self.update_aggression(mediator, &army);

		let config = &self.config;
		let squads = form_squads(&army, UnitRole::Attacking, config.squad_radius);
		if squads.is_empty() {
			self.tracker.prune(&Vec::<SquadId>::new());
			self.targets.prune(&Vec::<SquadId>::new());
			return Ok(());
		}

		let map = mediator.map();
		let attack_point = self.attack_point.select(mediator, &army, config);
		trace!("Attack point: {:?}", attack_point);
		let main_target = if self.aggressive {
			attack_point
		} else {
			map.main_ramp_top
		};
		let main_position = main_squad_position(&squads).unwrap_or(main_target);
		let defence_point = if self.aggressive {
			None
		} else {
			mediator
				.threats_near_townhalls(false, config.townhall_threat_range)
				.center()
				.or_else(|| mediator.threats_near_townhalls(true, config.townhall_threat_range).center())
		};
		let force_engage = mediator.intel().is_rushed && mediator.time() < config.rush_engage_time;

		let positions = squads.iter().map(|s| s.position).collect::<Vec<Point2>>();
		let snapshots = mediator.units_in_range(&positions, config.squad_enemy_range, QueryTree::AllEnemy);
		for (squad, close) in squads.iter().zip(snapshots) {
			let enemies = valid_targets(&close, true);
			let default = defence_point.unwrap_or(if squad.main || !self.aggressive {
				main_target
			} else {
				main_position
			});

			let own_near = match fight_relevant(&enemies).center() {
				Some(enemy_center) => {
					army.filter(|u| u.distance_squared(enemy_center) < config.own_near_enemy_sq)
				}
				None => Units::new(),
			};
			let can_engage = self.tracker.update(
				squad.id,
				EngagementInput {
					enemy: &enemies,
					own_near: &own_near,
					defensive: !self.aggressive,
					force_engage,
				},
				mediator.oracle,
			);
			let target = self.targets.update(
				SquadTargetInput {
					squad,
					default,
					can_engage,
					enemy_close: !enemies.is_empty(),
				},
				mediator,
				config,
			);

			if squad.units.iter().all(|u| u.is_flying) {
				FlyingSquadCombat {
					config,
					enemies: &enemies,
					can_engage,
					target,
					main: squad.main,
				}
				.execute(&squad.units, mediator, out);
			} else {
				SquadCombat {
					config,
					enemies: &enemies,
					can_engage,
					target,
					always_fight: !self.aggressive
						&& squad.position.distance_squared(attack_point) > config.always_fight_sq,
				}
				.execute(&squad.units, mediator, out);
			}
		}

		let observed = squads.iter().map(|s| s.id).collect::<Vec<SquadId>>();
		self.tracker.prune(&observed);
		self.targets.prune(&observed);
		Ok(())
	}

	fn name(&self) -> &'static str {
		"CombatManager"
	}
}
