use super::{enemies_near, CombatBehavior, EnemySnapshot};
use crate::{
	action::{Commander, Target},
	config::CombatConfig,
	host::Mediator,
	maneuver::{CombatStep, Maneuver},
	targeting::{in_attack_range, pick_enemy_target, valid_targets},
	units::Units,
};

/// Workers pulled from mining to fight off early aggression.
pub struct WorkerDefenders<'a> {
	pub config: &'a CombatConfig,
	/// Enemy ground units near each defender.
	pub enemies: &'a EnemySnapshot,
	/// Enemy structures built close to own base.
	pub proxies: &'a Units,
	/// Mineral field every defender gathers from to stack up before fight.
	pub stack_on: Option<u64>,
}

impl CombatBehavior for WorkerDefenders<'_> {
	fn execute(&self, units: &Units, mediator: &Mediator, out: &mut Commander) {
		let townhalls = &mediator.units().my.townhalls;
		let minerals = &mediator.units().mineral_fields;
		let threats = mediator.threats_near_townhalls(false, self.config.townhall_threat_range);

		for worker in units {
			let tag = worker.tag;
			if let Some(mineral) = self.stack_on {
				out.gather(tag, mineral, false);
				continue;
			}
			if worker.is_carrying_resource() && !townhalls.is_empty() {
				out.return_resource(tag, false);
				continue;
			}

			let near_ground = valid_targets(&enemies_near(self.enemies, tag), false);
			// hit enemy workers in range, but don't chase them
			let worker_target = pick_enemy_target(&in_attack_range(worker, &near_ground.workers(), 0.0))
				.filter(|target| worker.is_attack_ready(target))
				.map(|target| target.tag);
			let fighters = near_ground.filter(|u| !u.is_worker() && !u.is_structure());

			if let Some(target) = worker_target {
				out.attack(tag, Target::Tag(target), false);
			} else if let Some(proxy) = self.proxies.closest(worker) {
				out.attack(tag, Target::Tag(proxy.tag), false);
			} else if let Some(threat) = fighters.closest(worker) {
				let mut maneuver = Maneuver::new(tag);
				maneuver.add(CombatStep::WorkerKiteBack { target: threat.tag });
				out.register(maneuver);
			} else if let Some(target) = near_ground.closest(worker) {
				if target.is_structure() {
					out.attack(tag, Target::Tag(target.tag), false);
				} else {
					let mut maneuver = Maneuver::new(tag);
					maneuver.add(CombatStep::WorkerKiteBack { target: target.tag });
					out.register(maneuver);
				}
			} else if let Some(center) = threats.center() {
				out.attack(tag, Target::Pos(center), false);
			} else if let Some(mineral) = minerals.closest(worker) {
				out.gather(tag, mineral.tag, false);
			}
		}
	}
}
