//! Everything combat layer consumes from host: per-step snapshot and services.

use crate::{
	distance::Distance,
	engagement::{EngagementOracle, EngagementOutcome},
	geometry::Point2,
	pixel_map::{is_visible, CostGrid, GridKind, Grids, VisibilityMap},
	units::{AllUnits, FxIndexMap, Units},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which units spatial query searches among.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum QueryTree {
	AllEnemy,
	EnemyGround,
	EnemyFlying,
	AllOwn,
}

/// Range queries supplied by host.
pub trait SpatialQuery {
	/// For each of `points` returns units of `tree` within `distance` of it.
	fn units_in_range(&self, points: &[Point2], distance: f32, tree: QueryTree) -> Vec<Units>;
	/// Units of `tree` within `distance` of single point.
	fn units_near(&self, point: Point2, distance: f32, tree: QueryTree) -> Units {
		self.units_in_range(&[point], distance, tree)
			.pop()
			.unwrap_or_default()
	}
}

/// Checks every unit against every point.
///
/// Good enough for tests and small maps, hosts normally supply KD-tree backed queries.
pub struct BruteForceQuery<'a> {
	units: &'a AllUnits,
}
impl<'a> BruteForceQuery<'a> {
	pub fn new(units: &'a AllUnits) -> Self {
		Self { units }
	}
}
impl SpatialQuery for BruteForceQuery<'_> {
	fn units_in_range(&self, points: &[Point2], distance: f32, tree: QueryTree) -> Vec<Units> {
		let source = match tree {
			QueryTree::AllOwn => &self.units.my.all,
			_ => &self.units.enemy.all,
		};
		let distance_squared = distance * distance;
		points
			.iter()
			.map(|p| {
				source.filter(|u| {
					let flying_ok = match tree {
						QueryTree::EnemyGround => !u.is_flying,
						QueryTree::EnemyFlying => u.is_flying,
						_ => true,
					};
					flying_ok && u.distance_squared(*p) <= distance_squared
				})
			})
			.collect()
	}
}

/// Pathfinding supplied by host.
pub trait Pathing {
	/// Finds path over given grid, `None` if target is unreachable.
	fn find_path(&self, from: Point2, to: Point2, grid: GridKind) -> Option<Vec<Point2>>;

	/// Length of path between points.
	fn path_length(&self, from: Point2, to: Point2, grid: GridKind) -> Option<f32> {
		let path = self.find_path(from, to, grid)?;
		let mut length = 0.0;
		let mut last = from;
		for p in path {
			length += last.distance(p);
			last = p;
		}
		Some(length)
	}
}

/// Job unit is assigned to. Combat managers pick their units by role.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitRole {
	Gathering,
	Attacking,
	Defending,
	AdeptHarass,
	ShadeHarass,
	PhoenixHarass,
	MapControl,
	BaseDefence,
	WorkerDefence,
}

#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Race {
	Terran,
	Zerg,
	Protoss,
	Random,
}
impl Default for Race {
	fn default() -> Self {
		Race::Random
	}
}

/// Static map analysis done by host once per game.
#[derive(Debug, Clone, Default)]
pub struct MapInfo {
	pub start_location: Point2,
	pub enemy_start: Point2,
	pub enemy_natural: Point2,
	/// Top of own main base ramp, used as rally point when defending.
	pub main_ramp_top: Point2,
	pub map_center: Point2,
	/// All expansion locations, ordered by distance from own start location.
	pub expansion_locations: Vec<Point2>,
	/// Enemy expansions, ordered by distance from enemy start location.
	pub enemy_expansions: Vec<Point2>,
	/// High ground spots usable for map control.
	pub vantage_points: Vec<Point2>,
	/// Base location and spot behind it's mineral line.
	pub behind_mineral: Vec<(Point2, Point2)>,
}
impl MapInfo {
	/// Returns spot behind mineral line of base closest to `base`, or `base` itself when unknown.
	pub fn behind_mineral_position(&self, base: Point2) -> Point2 {
		self.behind_mineral
			.iter()
			.min_by(|(a, _), (b, _)| crate::distance::cmp(&a.distance_squared(base), &b.distance_squared(base)))
			.map_or(base, |(_, behind)| *behind)
	}
}

/// What host found out about opponent's strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intel {
	pub enemy_race: Race,
	/// Opponent is doing early aggression.
	pub is_rushed: bool,
	pub is_worker_rushed: bool,
	pub is_marine_rushed: bool,
	/// Opponent builds gateways close to own base.
	pub is_proxy_zealot: bool,
}

/// Read-only snapshot of the game on current step.
#[derive(Debug, Clone, Default)]
pub struct GameState {
	/// In-game time in seconds.
	pub time: f32,
	pub units: AllUnits,
	/// Current role of every own unit that has one.
	pub roles: FxIndexMap<u64, UnitRole>,
	pub visibility: VisibilityMap,
	pub grids: Grids,
	pub map: MapInfo,
	pub intel: Intel,
	/// Supply used by own army (i.e. not workers).
	pub supply_army: f32,
}
impl GameState {
	/// Role of unit, `None` if it has no role yet.
	pub fn role(&self, tag: u64) -> Option<UnitRole> {
		self.roles.get(&tag).copied()
	}
}

/// Facade bundling snapshot together with host services.
///
/// Built by host every step and passed to managers.
#[derive(Clone, Copy)]
pub struct Mediator<'a> {
	pub state: &'a GameState,
	pub query: &'a dyn SpatialQuery,
	pub oracle: &'a dyn EngagementOracle,
	pub pathing: &'a dyn Pathing,
}
impl<'a> Mediator<'a> {
	pub fn new(
		state: &'a GameState,
		query: &'a dyn SpatialQuery,
		oracle: &'a dyn EngagementOracle,
		pathing: &'a dyn Pathing,
	) -> Self {
		Self {
			state,
			query,
			oracle,
			pathing,
		}
	}

	/// In-game time in seconds.
	pub fn time(&self) -> f32 {
		self.state.time
	}
	/// In-game time in `mm:ss` format.
	pub fn time_formatted(&self) -> String {
		let t = self.state.time.max(0.0) as u32;
		format!("{:02}:{:02}", t / 60, t % 60)
	}
	pub fn map(&self) -> &'a MapInfo {
		&self.state.map
	}
	pub fn intel(&self) -> Intel {
		self.state.intel
	}
	pub fn units(&self) -> &'a AllUnits {
		&self.state.units
	}

	/// Own units currently assigned to given role.
	pub fn units_with_role(&self, role: UnitRole) -> Units {
		self.state
			.units
			.my
			.units
			.filter(|u| self.state.role(u.tag) == Some(role))
	}
	/// Own units assigned to any of given roles.
	pub fn units_with_roles(&self, roles: &[UnitRole]) -> Units {
		self.state
			.units
			.my
			.units
			.filter(|u| self.state.role(u.tag).map_or(false, |r| roles.contains(&r)))
	}

	/// Units of `tree` within `distance` of `point`.
	pub fn units_near(&self, point: Point2, distance: f32, tree: QueryTree) -> Units {
		self.query.units_near(point, distance, tree)
	}
	/// Batch version of [`units_near`](Self::units_near).
	pub fn units_in_range(&self, points: &[Point2], distance: f32, tree: QueryTree) -> Vec<Units> {
		self.query.units_in_range(points, distance, tree)
	}

	/// Asks oracle how `own` would do against `enemy`.
	pub fn can_win_fight(&self, own: &Units, enemy: &Units) -> EngagementOutcome {
		self.oracle.can_win_fight(own, enemy, false)
	}
	/// Same as [`can_win_fight`](Self::can_win_fight), with enemy workers considered harmless.
	pub fn can_win_fight_ignoring_workers(&self, own: &Units, enemy: &Units) -> EngagementOutcome {
		self.oracle.can_win_fight(own, enemy, true)
	}

	pub fn grid(&self, kind: GridKind) -> &'a CostGrid {
		self.state.grids.get(kind)
	}
	/// Grid unit should path on: air grid for flying units, ground otherwise.
	pub fn grid_for(&self, is_flying: bool) -> GridKind {
		if is_flying {
			GridKind::Air
		} else {
			GridKind::Ground
		}
	}
	pub fn is_visible(&self, pos: Point2) -> bool {
		is_visible(&self.state.visibility, pos)
	}
	pub fn path_length(&self, from: Point2, to: Point2, grid: GridKind) -> Option<f32> {
		self.pathing.path_length(from, to, grid)
	}

	/// Enemy units near own townhalls. Structures and ignored types aren't counted.
	pub fn threats_near_townhalls(&self, flying: bool, distance: f32) -> Units {
		let townhalls = &self.state.units.my.townhalls;
		self.state.units.enemy.units.filter(|u| {
			u.is_flying == flying
				&& !crate::constants::COMMON_UNIT_IGNORE_TYPES.contains(&u.type_id)
				&& townhalls.iter().any(|th| th.is_closer(distance, *u))
		})
	}
}
