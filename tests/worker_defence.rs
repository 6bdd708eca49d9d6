mod common;

use common::*;
use sc2_combat::{
	behaviors::{enemy_snapshot, WorkerDefenders},
	host::{QueryTree, UnitRole},
	managers::WorkerDefenceManager,
	prelude::*,
	unit::{Alliance, Attribute},
};

fn nexus() -> Unit {
	Unit::new(50, UnitTypeId::Nexus, Alliance::Own, Point2::new(10.5, 10.5)).with_attributes(&[Attribute::Structure])
}

fn mineral(tag: u64, x: f32, y: f32) -> Unit {
	Unit::new(tag, UnitTypeId::MineralField, Alliance::Neutral, Point2::new(x, y))
}

fn enemy(tag: u64, type_id: UnitTypeId, x: f32, y: f32) -> Unit {
	Unit::new(tag, type_id, Alliance::Enemy, Point2::new(x, y))
}

fn required(world: &World) -> usize {
	let manager = WorkerDefenceManager::new(CombatConfig::default());
	world.with_mediator(|mediator| {
		let proxies = manager.proxies(mediator);
		manager.required_defenders(mediator, &proxies)
	})
}

#[test]
fn defenders_needed_per_enemy() {
	let mut world = World::new(vec![nexus(), zergling(10, 14.0, 10.0), zergling(11, 15.0, 10.0)]);
	assert_eq!(required(&world), 4);

	// one worker isn't worth pulling for
	world.set_units(vec![nexus(), probe(10, Alliance::Enemy, 14.0, 10.0)]);
	assert_eq!(required(&world), 0);

	let mut units = vec![nexus()];
	units.extend((0..10).map(|i| zergling(10 + i, 14.0, 8.0 + i as f32)));
	world.set_units(units.clone());
	assert_eq!(required(&world), 16);

	units.push(enemy(30, UnitTypeId::Marine, 16.0, 10.0));
	world.set_units(units);
	assert_eq!(required(&world), 0);
}

#[test]
fn bunkers_make_workers_useless() {
	let bunker = Unit::new(51, UnitTypeId::Bunker, Alliance::Own, Point2::new(14.5, 14.5))
		.with_attributes(&[Attribute::Structure]);
	let world = World::new(vec![nexus(), bunker, zergling(10, 14.0, 10.0), zergling(11, 15.0, 10.0)]);
	assert_eq!(required(&world), 0);
}

#[test]
fn proxies_are_counted_first() {
	let pylon = enemy(20, UnitTypeId::Pylon, 30.5, 10.5).with_attributes(&[Attribute::Structure]);
	let far_pylon = enemy(21, UnitTypeId::Pylon, 90.5, 90.5).with_attributes(&[Attribute::Structure]);
	let mut world = World::new(vec![nexus(), pylon.clone(), far_pylon]);
	assert_eq!(required(&world), 4);
	let proxies = world.with_mediator(|mediator| WorkerDefenceManager::new(CombatConfig::default()).proxies(mediator));
	assert_eq!(proxies.tags().copied().collect::<Vec<u64>>(), vec![20]);

	// proxy gateways are for the army
	world.state.intel.is_proxy_zealot = true;
	assert_eq!(required(&world), 0);
	world.state.intel.is_proxy_zealot = false;

	let mut cannon = enemy(22, UnitTypeId::PhotonCannon, 32.5, 12.5).with_attributes(&[Attribute::Structure]);
	world.set_units(vec![nexus(), pylon.clone(), cannon.clone()]);
	assert_eq!(required(&world), 0);
	cannon.build_progress = 0.5;
	world.set_units(vec![nexus(), pylon.clone(), cannon]);
	assert_eq!(required(&world), 7);

	world.set_units(vec![
		nexus(),
		pylon,
		enemy(30, UnitTypeId::Marauder, 40.0, 40.0),
		enemy(31, UnitTypeId::Marauder, 41.0, 40.0),
	]);
	assert_eq!(required(&world), 0);
}

#[test]
fn damaged_and_far_defenders_go_back_to_mining() {
	let world = World::new(vec![
		nexus(),
		probe(1, Alliance::Own, 12.0, 12.0),
		probe(2, Alliance::Own, 12.0, 13.0).with_shield(10, 20),
		probe(3, Alliance::Own, 70.0, 70.0),
		probe(4, Alliance::Own, 11.0, 11.0),
		probe(5, Alliance::Own, 11.5, 11.0),
		zergling(10, 14.0, 10.0),
		zergling(11, 15.0, 10.0),
	])
	.with_role(&[1, 2, 3], UnitRole::WorkerDefence)
	.with_role(&[4, 5], UnitRole::Gathering);
	let mut manager = WorkerDefenceManager::new(CombatConfig::default());

	let out = world.step(&mut manager);
	assert_eq!(out.role_change(1), None);
	assert_eq!(out.role_change(2), Some(UnitRole::Gathering));
	assert_eq!(out.role_change(3), Some(UnitRole::Gathering));
	// one more is needed for two zerglings
	assert_eq!(out.role_change(4), Some(UnitRole::WorkerDefence));
	assert_eq!(out.role_change(5), None);
	assert_eq!(
		out.maneuver(1).unwrap().steps(),
		&[CombatStep::WorkerKiteBack { target: 10 }]
	);
}

#[test]
fn defenders_released_when_quiet() {
	let world = World::new(vec![
		nexus(),
		probe(1, Alliance::Own, 12.0, 12.0),
		probe(2, Alliance::Own, 12.0, 13.0),
	])
	.with_role(&[1, 2], UnitRole::WorkerDefence);
	let mut manager = WorkerDefenceManager::new(CombatConfig::default());

	let out = world.step(&mut manager);
	assert_eq!(out.role_change(1), Some(UnitRole::Gathering));
	assert_eq!(out.role_change(2), Some(UnitRole::Gathering));
}

#[test]
fn damaged_defenders_stay_in_worker_fight() {
	let mut units = vec![
		nexus(),
		probe(1, Alliance::Own, 12.0, 12.0),
		probe(2, Alliance::Own, 12.0, 13.0).with_shield(10, 20),
	];
	units.extend((0..6).map(|i| probe(30 + i, Alliance::Enemy, 14.0 + i as f32 * 0.5, 12.0)));
	let world = World::new(units).with_role(&[1, 2], UnitRole::WorkerDefence);
	let mut manager = WorkerDefenceManager::new(CombatConfig::default());

	let out = world.step(&mut manager);
	assert_eq!(out.role_change(1), None);
	assert_eq!(out.role_change(2), None);
}

#[test]
fn defenders_stack_on_far_mineral() {
	let mut world = World::new(vec![
		nexus(),
		probe(1, Alliance::Own, 12.0, 12.0),
		probe(30, Alliance::Enemy, 40.0, 10.0),
		probe(31, Alliance::Enemy, 41.0, 10.0),
		mineral(60, 5.5, 10.5),
		mineral(61, 15.5, 10.5),
		mineral(62, 60.0, 60.0),
	]);
	let manager = WorkerDefenceManager::new(CombatConfig::default());
	let defenders = vec![probe(1, Alliance::Own, 12.0, 12.0)].into_iter().collect::<Units>();
	let stack = |world: &World| world.with_mediator(|mediator| manager.stack_mineral(mediator, &defenders));

	assert_eq!(stack(&world), None);
	world.state.intel.is_worker_rushed = true;
	assert_eq!(stack(&world), Some(60));

	// enemy workers reached defenders, time to fight
	let mut units = world.all_units().iter().cloned().collect::<Vec<Unit>>();
	units.push(mineral(60, 5.5, 10.5));
	units.push(mineral(61, 15.5, 10.5));
	for u in units.iter_mut().filter(|u| u.tag == 31) {
		u.position = Point2::new(14.0, 12.0);
	}
	world.set_units(units);
	assert_eq!(stack(&world), None);
}

#[test]
fn defenders_ignore_larvae() {
	let world = World::new(vec![
		probe(1, Alliance::Own, 12.0, 12.0),
		enemy(10, UnitTypeId::Larva, 13.0, 12.0).with_health(25, 25),
		mineral(60, 5.5, 10.5),
	]);
	let config = CombatConfig::default();
	let defenders = world.state.units.my.workers.clone();

	let out = world.with_mediator(|mediator| {
		let enemies = enemy_snapshot(mediator, &defenders, config.defender_enemy_range, QueryTree::EnemyGround);
		let mut out = Commander::new();
		WorkerDefenders {
			config: &config,
			enemies: &enemies,
			proxies: &Units::new(),
			stack_on: None,
		}
		.execute(&defenders, mediator, &mut out);
		out
	});
	assert!(out.maneuver(1).is_none());
	assert_eq!(
		out.commands_for(1),
		vec![(AbilityId::HarvestGather, Target::Tag(60), false)]
	);
}
