//! Target and position selection shared by combat behaviors and managers.

use crate::{
	config::CombatConfig,
	constants::{AIR_HARASS_UNITS, ATTACK_TARGET_IGNORE, COMMON_UNIT_IGNORE_TYPES, DANGER_TO_AIR, LIFT_IGNORE},
	distance::*,
	engagement::EngagementOutcome,
	geometry::Point2,
	host::{MapInfo, Mediator, QueryTree},
	ids::{BuffId, UnitTypeId},
	pixel_map::GridKind,
	squad::{Squad, SquadId},
	unit::{Attribute, Unit},
	units::{Container, Units, UnitsIterator},
	utils::center_mass,
	waypoints::WaypointCycle,
};
use rustc_hash::FxHashMap;

/// Enemies that can be targeted right now.
///
/// Cloaked units are dropped unless detected, burrowed ones unless visible,
/// remembered units unless `allow_memory` is set. Ignored types never pass.
pub fn valid_targets(enemies: &Units, allow_memory: bool) -> Units {
	enemies.filter(|u| {
		(allow_memory || !u.is_remembered())
			&& (!u.is_cloaked() || u.is_revealed())
			&& (!u.is_burrowed || u.is_visible())
			&& !COMMON_UNIT_IGNORE_TYPES.contains(&u.type_id)
	})
}

/// Splits targets into `(structures, units)`.
pub fn split_structures(targets: &Units) -> (Units, Units) {
	targets.partition(|u| u.is_structure())
}

/// Targets given unit has weapon against.
pub fn attackable_by(unit: &Unit, targets: &Units) -> Units {
	targets.filter(|t| unit.can_attack_unit(t))
}

/// Targets within weapon range of unit, extended by `gap`.
pub fn in_attack_range(unit: &Unit, targets: &Units, gap: f32) -> Units {
	targets.in_range_of(unit, gap)
}

/// Targets every unit of `group` can shoot on this step.
///
/// Empty group has no ready targets.
pub fn weapon_ready_targets(group: &Units, targets: &Units) -> Units {
	if group.is_empty() {
		return Units::new();
	}
	targets.filter(|t| group.iter().all(|u| u.is_attack_ready(t)))
}

/// Picks direct-fire target for group: light targets go first among weapon-ready ones,
/// then the closest to `from` is taken.
pub fn pick_target<'a>(group: &Units, targets: &'a Units, from: Point2) -> Option<&'a Unit> {
	if group.is_empty() {
		return None;
	}
	let ready = targets
		.iter()
		.filter(|t| group.iter().all(|u| u.is_attack_ready(t)))
		.collect::<Vec<&Unit>>();
	if ready.iter().any(|t| t.is_light()) {
		ready.into_iter().filter(|t| t.is_light()).closest(from)
	} else {
		ready.into_iter().closest(from)
	}
}

/// Tags of targets in order unit should try them: picked target first, rest by distance.
pub fn shooting_order(group: &Units, targets: &Units, from: Point2) -> Vec<u64> {
	let first = pick_target(group, targets, from).map(|t| t.tag);
	first
		.into_iter()
		.chain(
			targets
				.iter()
				.sort_by_distance(from)
				.map(|t| t.tag)
				.filter(|tag| Some(*tag) != first),
		)
		.collect()
}

/// Target with the lowest summed health and shield, the first one on equal values.
pub fn pick_enemy_target(targets: &Units) -> Option<&Unit> {
	targets.partial_min(|u| u.hits().unwrap_or(u32::MAX))
}

/// Enemies that threaten flying unit and are close enough to shoot it or be shot by it.
pub fn danger_to_air(unit: &Unit, enemies: &Units) -> Units {
	enemies.filter(|e| {
		(e.can_attack_air() || DANGER_TO_AIR.contains(&e.type_id)) && (unit.in_range(e, 0.0) || e.in_range(unit, 0.0))
	})
}

/// Ground units graviton beam can lift.
pub fn liftable(enemies: &Units) -> Units {
	enemies.filter(|u| {
		!u.is_flying
			&& !u.is_structure()
			&& !u.has_attribute(Attribute::Massive)
			&& !u.has_buff(BuffId::GravitonBeam)
			&& !LIFT_IGNORE.contains(&u.type_id)
	})
}

/// What phoenix lifts: closest unit shooting air, else closest siege tank, else just closest.
pub fn lift_target<'a>(phoenix: &Unit, candidates: &'a Units) -> Option<&'a Unit> {
	let pos = phoenix.position;
	candidates
		.iter()
		.anti_air()
		.closest(pos)
		.or_else(|| {
			candidates
				.iter()
				.filter(|u| matches!(u.type_id, UnitTypeId::SiegeTank | UnitTypeId::SiegeTankSieged))
				.closest(pos)
		})
		.or_else(|| candidates.closest(pos))
}

/// Result of least defended enemy base search.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSearch {
	/// Every location evaluated, in order of evaluation.
	pub candidates: Vec<Point2>,
	pub least_defended: Point2,
	/// Attackers' outcome at the least defended location.
	pub outcome: EngagementOutcome,
}

/// Evaluates enemy townhalls and enemy start location against `attackers`.
///
/// Candidate becomes the best only when it's strictly better, so on equal outcomes
/// the earlier one stays. Enemy workers are considered harmless.
pub fn least_defended_base(mediator: &Mediator, attackers: &Units, radius: f32) -> BaseSearch {
	let map = mediator.map();
	let mut candidates = mediator
		.units()
		.enemy
		.townhalls
		.iter()
		.filter(|th| !th.is_flying && th.build_progress > 0.95)
		.map(|th| th.position)
		.collect::<Vec<Point2>>();
	candidates.push(map.enemy_start);

	let mut least_defended = map.enemy_start;
	let mut outcome = EngagementOutcome::LossEmphatic;
	for (candidate, defenders) in candidates
		.iter()
		.zip(mediator.units_in_range(&candidates, radius, QueryTree::AllEnemy))
	{
		let result = mediator.can_win_fight_ignoring_workers(attackers, &defenders);
		if result > outcome {
			outcome = result;
			least_defended = *candidate;
		}
	}
	BaseSearch {
		candidates,
		least_defended,
		outcome,
	}
}

/// Candidate reachable by the shortest path from `from`, other than `from` itself.
///
/// Returns `from` when there is no such candidate.
pub fn secondary_base(mediator: &Mediator, from: Point2, candidates: &[Point2], grid: GridKind) -> Point2 {
	candidates
		.iter()
		.copied()
		.filter(|c| *c != from)
		.filter_map(|c| mediator.path_length(from, c, grid).map(|length| (c, length)))
		.min_by(|(_, a), (_, b)| crate::distance::cmp(a, b))
		.map_or(from, |(c, _)| c)
}

/// Where phoenixes should go: enemy air harass unit closest to own start first,
/// then townhall phoenixes do best against (later one wins ties), then enemy start.
pub fn phoenix_harass_target(mediator: &Mediator, phoenixes: &Units, radius: f32) -> Point2 {
	let map = mediator.map();
	let enemy = &mediator.units().enemy;
	if let Some(harasser) = enemy
		.units
		.iter()
		.of_types(&AIR_HARASS_UNITS)
		.closest(map.start_location)
	{
		return harasser.position;
	}

	let townhalls = enemy.townhalls.filter(|th| !th.is_flying);
	let positions = townhalls.iter().map(|th| th.position).collect::<Vec<Point2>>();
	let mut target = map.enemy_start;
	let mut best = EngagementOutcome::LossEmphatic;
	for (pos, defenders) in positions
		.iter()
		.zip(mediator.units_in_range(&positions, radius, QueryTree::AllEnemy))
	{
		let outcome = mediator.can_win_fight(phoenixes, &defenders);
		if outcome >= best {
			best = outcome;
			target = *pos;
		}
	}
	target
}

/// Chooses where main army attacks.
#[derive(Debug, Clone, Default)]
pub struct AttackPointSelector {
	bases: WaypointCycle,
}
impl AttackPointSelector {
	pub fn new(map: &MapInfo) -> Self {
		Self {
			bases: Self::base_cycle(map),
		}
	}
	fn base_cycle(map: &MapInfo) -> WaypointCycle {
		let mut points = vec![map.enemy_start];
		points.extend(map.expansion_locations.iter().copied().filter(|p| *p != map.enemy_start));
		WaypointCycle::new(points)
	}
	/// Expansion cycle used when nothing better is known.
	pub fn bases(&self) -> &WaypointCycle {
		&self.bases
	}

	/// First match wins: home ramp during early rush, enemy army when both armies are close,
	/// enemy structure nearest to enemy natural, then known expansions one by one.
	pub fn select(&mut self, mediator: &Mediator, army: &Units, config: &CombatConfig) -> Point2 {
		let map = mediator.map();
		let intel = mediator.intel();
		if intel.is_rushed && mediator.time() < config.rush_rally_time && !intel.is_worker_rushed {
			return map.main_ramp_top;
		}

		let enemy_army = mediator.units().enemy.units.filter(|u| {
			!u.is_flying && !u.is_worker() && !u.is_structure() && !COMMON_UNIT_IGNORE_TYPES.contains(&u.type_id)
		});
		if let (Some((own_mass, _)), Some((enemy_mass, _))) = (
			center_mass(army, config.center_mass_distance),
			center_mass(&enemy_army, config.center_mass_distance),
		) {
			if own_mass.distance_squared(enemy_mass) < config.mass_near_sq
				&& mediator
					.units_near(enemy_mass, config.enemy_mass_range, QueryTree::EnemyGround)
					.supply() >= config.enemy_mass_supply
			{
				return enemy_mass;
			}
		}

		if let Some(structure) = mediator
			.units()
			.enemy
			.structures
			.iter()
			.exclude_types(&ATTACK_TARGET_IGNORE)
			.closest(map.enemy_natural)
		{
			return structure.position;
		}

		if self.bases.is_empty() {
			self.bases = Self::base_cycle(map);
		}
		self.bases
			.update_with(|p| mediator.is_visible(p))
			.unwrap_or(map.enemy_start)
	}
}

/// Inputs of one squad's target update.
pub struct SquadTargetInput<'a> {
	pub squad: &'a Squad,
	/// Where squad goes unless it has a reason to go elsewhere.
	pub default: Point2,
	pub can_engage: bool,
	/// There are enemies near the squad.
	pub enemy_close: bool,
}

/// Current destination of every squad, changed only by explicit rules.
#[derive(Debug, Clone, Default)]
pub struct SquadTargetTable {
	targets: FxHashMap<SquadId, Point2>,
}
impl SquadTargetTable {
	pub fn new() -> Self {
		Default::default()
	}
	pub fn get(&self, id: SquadId) -> Option<Point2> {
		self.targets.get(&id).copied()
	}
	pub fn len(&self) -> usize {
		self.targets.len()
	}
	pub fn is_empty(&self) -> bool {
		self.targets.is_empty()
	}

	/// Updates target of squad and returns it.
	///
	/// Squads seen for the first time go to default target.
	/// Squad that can't fight enemies around it while on default target diverts
	/// to the furthest enemy townhall away from enemy main and natural.
	/// Diverted squad returns to default once it reached alternative without being able to fight,
	/// or when no enemies are left around alternative.
	pub fn update(&mut self, input: SquadTargetInput, mediator: &Mediator, config: &CombatConfig) -> Point2 {
		let SquadTargetInput {
			squad,
			default,
			can_engage,
			enemy_close,
		} = input;
		let mut target = match self.targets.get(&squad.id) {
			Some(target) => *target,
			None => {
				self.targets.insert(squad.id, default);
				return default;
			}
		};

		if target != default {
			let reached = !can_engage && squad.position.distance_squared(target) < config.revert_near_sq;
			let abandoned = mediator
				.units_near(target, config.alternative_empty_sq.sqrt(), QueryTree::AllEnemy)
				.is_empty();
			if reached || abandoned {
				target = default;
			}
		} else if !can_engage && enemy_close {
			let map = mediator.map();
			let alternative = mediator
				.units()
				.enemy
				.townhalls
				.iter()
				.filter(|th| {
					th.is_further(6.0, map.enemy_start)
						&& th.is_further(6.0, map.enemy_natural)
						&& th.distance_squared(squad.position) > config.switch_min_sq
				})
				.furthest(squad.position);
			if let Some(th) = alternative {
				debug!("{} diverts to enemy base at {:?}", squad.id, th.position);
				target = th.position;
			}
		}

		self.targets.insert(squad.id, target);
		target
	}

	/// Forgets squads that weren't observed on current step.
	pub fn prune<T: Container<SquadId>>(&mut self, observed: &T) {
		self.targets.retain(|id, _| observed.contains(id));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::unit::{Alliance, CloakState, TargetType};

	fn enemy(tag: u64, type_id: UnitTypeId, x: f32) -> Unit {
		Unit::new(tag, type_id, Alliance::Enemy, Point2::new(x, 0.0))
	}
	fn stalker(tag: u64) -> Unit {
		Unit::new(tag, UnitTypeId::Stalker, Alliance::Own, Point2::new(0.0, 0.0)).with_weapon(TargetType::Any, 6.0)
	}

	#[test]
	fn invalid_targets_dropped() {
		let mut cloaked = enemy(1, UnitTypeId::DarkTemplar, 1.0);
		cloaked.cloak = CloakState::Cloaked;
		let mut detected = enemy(2, UnitTypeId::DarkTemplar, 2.0);
		detected.cloak = CloakState::CloakedDetected;
		let mut remembered = enemy(3, UnitTypeId::Zealot, 3.0);
		remembered.is_memory = true;
		let larva = enemy(4, UnitTypeId::Larva, 4.0);
		let zealot = enemy(5, UnitTypeId::Zealot, 5.0);
		let enemies = vec![cloaked, detected, remembered, larva, zealot]
			.into_iter()
			.collect::<Units>();

		let valid = valid_targets(&enemies, false);
		assert_eq!(valid.tags().copied().collect::<Vec<u64>>(), vec![2, 5]);
		assert!(valid_targets(&enemies, true).contains_tag(3));
	}

	#[test]
	fn weapon_ready_requires_whole_group() {
		let mut cooling = stalker(2);
		cooling.weapon_cooldown = Some(5.0);
		let group = vec![stalker(1), cooling].into_iter().collect::<Units>();
		let targets = vec![enemy(10, UnitTypeId::Zealot, 3.0)].into_iter().collect::<Units>();
		assert!(weapon_ready_targets(&group, &targets).is_empty());

		let ready = vec![stalker(1)].into_iter().collect::<Units>();
		assert!(weapon_ready_targets(&ready, &targets).contains_tag(10));
		assert!(weapon_ready_targets(&Units::new(), &targets).is_empty());
	}

	#[test]
	fn light_targets_first() {
		let group = vec![stalker(1)].into_iter().collect::<Units>();
		let targets = vec![
			enemy(10, UnitTypeId::Stalker, 2.0).with_attributes(&[Attribute::Armored]),
			enemy(11, UnitTypeId::Zergling, 5.0).with_attributes(&[Attribute::Light]),
			enemy(12, UnitTypeId::Zergling, 30.0).with_attributes(&[Attribute::Light]),
		]
		.into_iter()
		.collect::<Units>();
		let origin = Point2::new(0.0, 0.0);
		assert_eq!(pick_target(&group, &targets, origin).map(|t| t.tag), Some(11));
		assert_eq!(shooting_order(&group, &targets, origin), vec![11, 10, 12]);

		let armored = targets.filter(|t| t.is_armored());
		assert_eq!(pick_target(&group, &armored, origin).map(|t| t.tag), Some(10));
	}

	#[test]
	fn weakest_target() {
		let targets = vec![
			enemy(1, UnitTypeId::Zealot, 1.0).with_health(50, 100),
			enemy(2, UnitTypeId::Zealot, 2.0).with_health(20, 100),
			enemy(3, UnitTypeId::Zealot, 3.0).with_health(20, 100),
		]
		.into_iter()
		.collect::<Units>();
		assert_eq!(pick_enemy_target(&targets).map(|t| t.tag), Some(2));
	}

	#[test]
	fn lift_priority() {
		let phoenix = Unit::new(1, UnitTypeId::Phoenix, Alliance::Own, Point2::new(0.0, 0.0)).flying();
		let mut candidates = vec![
			enemy(10, UnitTypeId::Zealot, 1.0),
			enemy(11, UnitTypeId::SiegeTank, 4.0),
			enemy(12, UnitTypeId::Zergling, 0.5),
			enemy(13, UnitTypeId::Thor, 0.5).with_attributes(&[Attribute::Massive]),
		]
		.into_iter()
		.collect::<Units>();
		let liftable_units = liftable(&candidates);
		assert_eq!(liftable_units.len(), 2);
		assert_eq!(lift_target(&phoenix, &liftable_units).map(|u| u.tag), Some(11));

		candidates.push(enemy(14, UnitTypeId::Marine, 6.0).with_weapon(TargetType::Any, 5.0));
		let liftable_units = liftable(&candidates);
		assert_eq!(lift_target(&phoenix, &liftable_units).map(|u| u.tag), Some(14));
	}

	#[test]
	fn air_danger() {
		let voidray = Unit::new(1, UnitTypeId::VoidRay, Alliance::Own, Point2::new(0.0, 0.0))
			.flying()
			.with_weapon(TargetType::Any, 6.0);
		let enemies = vec![
			enemy(10, UnitTypeId::Marine, 4.0).with_weapon(TargetType::Any, 5.0),
			enemy(11, UnitTypeId::Zealot, 3.0).with_weapon(TargetType::Ground, 0.1),
			enemy(12, UnitTypeId::PhotonCannon, 6.0),
			enemy(13, UnitTypeId::Marine, 40.0).with_weapon(TargetType::Any, 5.0),
		]
		.into_iter()
		.collect::<Units>();
		let danger = danger_to_air(&voidray, &enemies);
		assert_eq!(danger.tags().copied().collect::<Vec<u64>>(), vec![10, 12]);
	}
}
