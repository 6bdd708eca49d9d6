#![allow(dead_code)]

use sc2_combat::{
	action::{BehaviorSink, Commander, Target},
	engagement::{EngagementOracle, EngagementOutcome},
	geometry::Point2,
	host::{BruteForceQuery, GameState, Mediator, Pathing, UnitRole},
	ids::{AbilityId, UnitTypeId},
	maneuver::Maneuver,
	pixel_map::{GridKind, Grids, Visibility, VisibilityMap},
	unit::{Alliance, Attribute, TargetType, Unit},
	units::{AllUnits, Units},
	CombatResult, Manager,
};
use std::cell::Cell;

pub const MAP_SIZE: usize = 160;

/// Oracle answering whatever test told it to.
pub struct ScriptedOracle {
	outcome: Cell<EngagementOutcome>,
	calls: Cell<usize>,
}
impl ScriptedOracle {
	pub fn new(outcome: EngagementOutcome) -> Self {
		Self {
			outcome: Cell::new(outcome),
			calls: Cell::new(0),
		}
	}
	pub fn set(&self, outcome: EngagementOutcome) {
		self.outcome.set(outcome);
	}
	pub fn calls(&self) -> usize {
		self.calls.get()
	}
}
impl EngagementOracle for ScriptedOracle {
	fn can_win_fight(&self, _own: &Units, _enemy: &Units, _workers_do_no_damage: bool) -> EngagementOutcome {
		self.calls.set(self.calls.get() + 1);
		self.outcome.get()
	}
}

/// Every target is reachable in a straight line.
pub struct StraightPathing;
impl Pathing for StraightPathing {
	fn find_path(&self, _from: Point2, to: Point2, _grid: GridKind) -> Option<Vec<Point2>> {
		Some(vec![to])
	}
}

/// Sink that keeps everything it was given.
#[derive(Default)]
pub struct RecordingSink {
	pub maneuvers: Vec<Maneuver>,
	pub commands: Vec<(Vec<u64>, AbilityId, Target, bool)>,
	pub roles: Vec<(u64, UnitRole)>,
}
impl BehaviorSink for RecordingSink {
	fn register_maneuver(&mut self, maneuver: Maneuver) -> CombatResult<()> {
		self.maneuvers.push(maneuver);
		Ok(())
	}
	fn issue_command(&mut self, units: &[u64], ability: AbilityId, target: Target, queue: bool) -> CombatResult<()> {
		self.commands.push((units.to_vec(), ability, target, queue));
		Ok(())
	}
	fn assign_role(&mut self, tag: u64, role: UnitRole) -> CombatResult<()> {
		self.roles.push((tag, role));
		Ok(())
	}
}

/// Game state together with fake host services.
pub struct World {
	pub state: GameState,
	pub oracle: ScriptedOracle,
	pub pathing: StraightPathing,
}
impl World {
	pub fn new(units: Vec<Unit>) -> Self {
		let mut state = GameState {
			units: AllUnits::new(units),
			grids: Grids::safe(MAP_SIZE, MAP_SIZE),
			visibility: VisibilityMap::from_elem((MAP_SIZE, MAP_SIZE), Visibility::Fogged),
			..Default::default()
		};
		state.map.start_location = Point2::new(10.5, 10.5);
		state.map.main_ramp_top = Point2::new(20.5, 20.5);
		state.map.map_center = Point2::new(80.5, 80.5);
		state.map.enemy_start = Point2::new(150.5, 150.5);
		state.map.enemy_natural = Point2::new(130.5, 145.5);
		Self {
			state,
			oracle: ScriptedOracle::new(EngagementOutcome::Tie),
			pathing: StraightPathing,
		}
	}
	pub fn with_role(mut self, tags: &[u64], role: UnitRole) -> Self {
		for tag in tags {
			self.state.roles.insert(*tag, role);
		}
		self
	}
	/// Replaces units, keeping everything else.
	pub fn set_units(&mut self, units: Vec<Unit>) {
		self.state.units = AllUnits::new(units);
	}
	pub fn all_units(&self) -> Units {
		let units = &self.state.units;
		units
			.my
			.all
			.iter()
			.chain(units.enemy.all.iter())
			.cloned()
			.collect()
	}

	pub fn with_mediator<R, F: FnOnce(&Mediator) -> R>(&self, f: F) -> R {
		let query = BruteForceQuery::new(&self.state.units);
		let mediator = Mediator::new(&self.state, &query, &self.oracle, &self.pathing);
		f(&mediator)
	}
	/// Runs one step of manager and returns decisions it made.
	pub fn step<M: Manager>(&self, manager: &mut M) -> Commander {
		self.with_mediator(|mediator| {
			let mut out = Commander::new();
			manager.update(mediator, &mut out).expect("manager step failed");
			out
		})
	}
}

pub fn stalker(tag: u64, x: f32, y: f32) -> Unit {
	Unit::new(tag, UnitTypeId::Stalker, Alliance::Own, Point2::new(x, y))
		.with_weapon(TargetType::Any, 6.0)
		.with_attributes(&[Attribute::Armored, Attribute::Mechanical])
		.with_shield(80, 80)
		.with_supply(2.0)
}

pub fn zergling(tag: u64, x: f32, y: f32) -> Unit {
	Unit::new(tag, UnitTypeId::Zergling, Alliance::Enemy, Point2::new(x, y))
		.with_weapon(TargetType::Ground, 0.1)
		.with_attributes(&[Attribute::Light, Attribute::Biological])
		.with_supply(0.5)
}

pub fn probe(tag: u64, alliance: Alliance, x: f32, y: f32) -> Unit {
	Unit::new(tag, UnitTypeId::Probe, alliance, Point2::new(x, y))
		.with_weapon(TargetType::Ground, 0.1)
		.with_attributes(&[Attribute::Light, Attribute::Mechanical])
		.with_shield(20, 20)
		.with_supply(1.0)
}
