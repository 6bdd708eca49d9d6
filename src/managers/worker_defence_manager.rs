use crate::{
	action::Commander,
	behaviors::{enemy_snapshot, CombatBehavior, WorkerDefenders},
	config::CombatConfig,
	constants::{WORKERS_PER_ENEMY, WORKERS_PER_PROXY},
	distance::*,
	host::{Mediator, QueryTree, UnitRole},
	ids::UnitTypeId,
	units::Units,
	CombatResult, Manager,
};

/// Pulls workers to fight early aggression and sends them back to mining afterwards.
pub struct WorkerDefenceManager {
	config: CombatConfig,
	stacking: bool,
}
impl WorkerDefenceManager {
	pub fn new(config: CombatConfig) -> Self {
		Self {
			config,
			stacking: false,
		}
	}

	/// Workers are only pulled while there's barely any army and no marines are coming.
	pub fn is_enabled(&self, mediator: &Mediator) -> bool {
		mediator.state.supply_army < self.config.worker_defence_max_army && !mediator.intel().is_marine_rushed
	}

	/// Enemy structures worth killing with workers near own start location.
	pub fn proxies(&self, mediator: &Mediator) -> Units {
		let start = mediator.map().start_location;
		mediator.units().enemy.structures.filter(|s| {
			WORKERS_PER_PROXY.contains_key(&s.type_id) && s.distance_squared(start) < self.config.proxy_sq
		})
	}

	/// Number of workers needed to deal with proxies or enemies near own bases.
	///
	/// Ready bunkers on either side make fighting with workers pointless,
	/// so does a single enemy worker or any marine.
	pub fn required_defenders(&self, mediator: &Mediator, proxies: &Units) -> usize {
		let units = mediator.units();
		let own_bunkers = units.my.structures.of_type(UnitTypeId::Bunker).ready();
		let fortified = proxies
			.iter()
			.any(|p| p.is_ready() && matches!(p.type_id, UnitTypeId::Bunker | UnitTypeId::PhotonCannon));
		if !own_bunkers.is_empty() || fortified {
			return 0;
		}

		let mut required = 0;
		if !mediator.intel().is_proxy_zealot && !proxies.is_empty() {
			if units.enemy.units.of_type(UnitTypeId::Marauder).len() >= 2 {
				return 0;
			}
			required = proxies.sum(|p| WORKERS_PER_PROXY.get(&p.type_id).copied().unwrap_or(0));
		}
		if required == 0 {
			let enemies = mediator.threats_near_townhalls(false, self.config.townhall_threat_range);
			for enemy in &enemies {
				match WORKERS_PER_ENEMY.get(&enemy.type_id) {
					Some(0) => {
						required = 0;
						break;
					}
					Some(count) => required += count,
					None => {}
				}
			}
		}

		if required <= 1 {
			0
		} else {
			required.min(self.config.max_defenders)
		}
	}

	/// Mineral field in main base defenders gather together from before enemy workers arrive.
	///
	/// Only while worker rushed, with enemy workers on the way but not yet on top of defenders.
	pub fn stack_mineral(&self, mediator: &Mediator, defenders: &Units) -> Option<u64> {
		let config = &self.config;
		if !mediator.intel().is_worker_rushed || defenders.is_empty() {
			return None;
		}
		let start = mediator.map().start_location;
		let enemy_workers = mediator
			.units()
			.enemy
			.workers
			.filter(|u| u.is_closer(config.stack_trigger_range, start));
		let engaged = enemy_workers
			.iter()
			.any(|e| defenders.iter().any(|d| d.is_closer(config.stack_engage_range, e)));
		if engaged {
			return None;
		}
		let approach = enemy_workers.center()?;
		mediator
			.units()
			.mineral_fields
			.filter(|m| m.is_closer(config.main_mineral_range, start))
			.furthest(approach)
			.map(|m| m.tag)
	}

	fn assign_defenders(&self, mediator: &Mediator, defenders: &Units, required: usize, out: &mut Commander) {
		let missing = required.saturating_sub(defenders.len());
		if missing == 0 {
			return;
		}
		let start = mediator.map().start_location;
		let candidates = mediator
			.units()
			.my
			.workers
			.filter(|u| {
				mediator.state.role(u.tag).map_or(true, |r| r.is_gathering())
					&& u.hits_percentage().map_or(false, |hp| hp >= self.config.defender_min_health)
			})
			.partial_sort(|u| u.distance_squared(start));
		for worker in candidates.iter().take(missing) {
			out.assign_role(worker.tag, UnitRole::WorkerDefence);
		}
		debug!(
			"{} - Pulled {} workers to defend",
			mediator.time_formatted(),
			missing.min(candidates.len())
		);
	}

	/// Sends defenders back to mining, returns the ones that keep fighting.
	fn release_defenders(&self, mediator: &Mediator, defenders: &Units, proxies: &Units, out: &mut Commander) -> Units {
		let config = &self.config;
		let start = mediator.map().start_location;
		let threats = mediator.threats_near_townhalls(false, config.townhall_threat_range);
		let worker_fight = defenders.center().map_or(false, |center| {
			mediator
				.units_near(center, config.defender_enemy_range, QueryTree::EnemyGround)
				.workers()
				.len() >= config.worker_fight_size
		});

		let (released, kept) = defenders.partition(|u| {
			let damaged = u
				.shield_percentage()
				.or_else(|| u.health_percentage())
				.map_or(false, |p| p <= 0.99);
			(threats.is_empty() && proxies.is_empty() && !worker_fight)
				|| (damaged && !worker_fight)
				|| u.distance_squared(start) > config.defender_release_sq
		});
		for worker in &released {
			out.assign_role(worker.tag, UnitRole::Gathering);
		}
		if !released.is_empty() {
			debug!(
				"{} - Released {} defending workers",
				mediator.time_formatted(),
				released.len()
			);
		}
		kept
	}
}

impl Manager for WorkerDefenceManager {
	fn update(&mut self, mediator: &Mediator, out: &mut Commander) -> CombatResult<()> {
		let defenders = mediator.units_with_role(UnitRole::WorkerDefence);
		let proxies = self.proxies(mediator);
		if self.is_enabled(mediator) {
			let required = self.required_defenders(mediator, &proxies);
			self.assign_defenders(mediator, &defenders, required, out);
		}
		if defenders.is_empty() {
			self.stacking = false;
			return Ok(());
		}

		let defenders = self.release_defenders(mediator, &defenders, &proxies, out);
		let stack_on = self.stack_mineral(mediator, &defenders);
		if stack_on.is_some() != self.stacking {
			self.stacking = stack_on.is_some();
			debug!(
				"{} - Defenders {} on far mineral",
				mediator.time_formatted(),
				if self.stacking { "stack up" } else { "stop stacking" }
			);
		}

		let config = &self.config;
		let enemies = enemy_snapshot(mediator, &defenders, config.defender_enemy_range, QueryTree::EnemyGround);
		WorkerDefenders {
			config,
			enemies: &enemies,
			proxies: &proxies,
			stack_on,
		}
		.execute(&defenders, mediator, out);
		Ok(())
	}

	fn name(&self) -> &'static str {
		"WorkerDefenceManager"
	}
}
