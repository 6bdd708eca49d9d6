mod common;

use common::*;
use rustc_hash::FxHashMap;
use sc2_combat::{
	behaviors::{enemy_snapshot, AdeptHarass, EnemySnapshot, PhoenixHarass},
	engagement::{EngagementOracle, EngagementOutcome},
	host::{BruteForceQuery, QueryTree, UnitRole},
	ids::UnitTypeId,
	managers::AdeptManager,
	prelude::*,
	unit::{Alliance, Attribute, TargetType},
};

fn adept(tag: u64, x: f32, y: f32) -> Unit {
	Unit::new(tag, UnitTypeId::Adept, Alliance::Own, Point2::new(x, y))
		.with_weapon(TargetType::Ground, 4.0)
		.with_attributes(&[Attribute::Light, Attribute::Biological])
		.with_shield(70, 70)
}

fn shade(tag: u64, x: f32, y: f32, buff_remain: u32) -> Unit {
	let mut shade = Unit::new(tag, UnitTypeId::AdeptPhaseShift, Alliance::Own, Point2::new(x, y));
	shade.buff_duration_remain = Some(buff_remain);
	shade
}

/// Own units always lose near zerglings and win anywhere else.
struct ZerglingsWin;
impl EngagementOracle for ZerglingsWin {
	fn can_win_fight(&self, _own: &Units, enemy: &Units, _workers_do_no_damage: bool) -> EngagementOutcome {
		if enemy.iter().any(|u| u.type_id == UnitTypeId::Zergling) {
			EngagementOutcome::LossDecisive
		} else {
			EngagementOutcome::VictoryDecisive
		}
	}
}

#[test]
fn shade_link_is_permanent() {
	let mut manager = AdeptManager::new(CombatConfig::default());
	let adepts = vec![adept(1, 10.0, 10.0), adept(2, 60.0, 60.0)]
		.into_iter()
		.collect::<Units>();
	manager.link_shades(&adepts, &vec![shade(100, 12.0, 10.0, 40)].into_iter().collect());
	assert_eq!(manager.adept_of(100), Some(1));

	// shade travelled next to the other adept
	let shades = vec![shade(100, 59.0, 60.0, 30)].into_iter().collect::<Units>();
	manager.link_shades(&adepts, &shades);
	assert_eq!(manager.adept_of(100), Some(1));
	assert_eq!(manager.shade_of(1), Some(100));
	assert_eq!(manager.shade_of(2), None);

	manager.prune(&Units::new());
	assert_eq!(manager.adept_of(100), None);
}

#[test]
fn new_shade_prefers_adept_without_one() {
	let mut manager = AdeptManager::new(CombatConfig::default());
	let adepts = vec![adept(1, 0.0, 0.0), adept(2, 10.0, 0.0)]
		.into_iter()
		.collect::<Units>();
	manager.link_shades(&adepts, &vec![shade(100, 1.0, 0.0, 40)].into_iter().collect());
	assert_eq!(manager.adept_of(100), Some(1));

	let shades = vec![shade(100, 1.0, 0.0, 30), shade(101, 2.0, 0.0, 40)]
		.into_iter()
		.collect::<Units>();
	manager.link_shades(&adepts, &shades);
	assert_eq!(manager.adept_of(101), Some(2));
	assert_eq!(manager.shade_of(2), Some(101));

	// every adept has a shade already
	let shades = vec![
		shade(100, 1.0, 0.0, 20),
		shade(101, 2.0, 0.0, 30),
		shade(102, 1.0, 1.0, 40),
	]
	.into_iter()
	.collect::<Units>();
	manager.link_shades(&adepts, &shades);
	assert_eq!(manager.adept_of(102), Some(1));

	// shade of adept 1 is gone, so it's free again
	manager.prune(&vec![shade(101, 2.0, 0.0, 20)].into_iter().collect());
	let shades = vec![shade(101, 2.0, 0.0, 20), shade(103, 9.0, 0.0, 40)]
		.into_iter()
		.collect::<Units>();
	manager.link_shades(&adepts, &shades);
	assert_eq!(manager.adept_of(103), Some(1));
}

#[test]
fn long_cast_is_never_cancelled() {
	let mut units = vec![adept(1, 40.0, 40.0), shade(100, 80.0, 80.0, 15)];
	// adept sits in enemy mineral line, shade runs into zerglings
	units.extend((0..6).map(|i| probe(200 + i, Alliance::Enemy, 41.0 + i as f32 * 0.5, 42.0)));
	units.extend((0..4).map(|i| zergling(300 + i, 80.0 + i as f32, 82.0)));
	let world = World::new(units);
	let manager = AdeptManager::new(CombatConfig::default());
	let all = world.all_units();

	let query = BruteForceQuery::new(&world.state.units);
	let mediator = Mediator::new(&world.state, &query, &ZerglingsWin, &world.pathing);
	assert!(!manager.should_cancel(&all[1], &all[100], &mediator));

	let mut short = all[100].clone();
	short.buff_duration_remain = Some(3);
	assert!(manager.should_cancel(&all[1], &short, &mediator));
}

#[test]
fn nothing_threatening_near_shade_lets_it_finish() {
	let world = World::new(vec![
		adept(1, 40.0, 40.0),
		shade(100, 80.0, 80.0, 3),
		zergling(300, 41.0, 43.0),
		probe(200, Alliance::Enemy, 81.0, 80.0),
	]);
	let manager = AdeptManager::new(CombatConfig::default());
	let all = world.all_units();

	let query = BruteForceQuery::new(&world.state.units);
	let mediator = Mediator::new(&world.state, &query, &ZerglingsWin, &world.pathing);
	assert!(!manager.should_cancel(&all[1], &all[100], &mediator));
}

#[test]
fn oracle_decides_between_locations() {
	let world = World::new(vec![
		adept(1, 40.0, 40.0),
		shade(100, 80.0, 80.0, 3),
		zergling(300, 81.0, 82.0),
	]);
	let manager = AdeptManager::new(CombatConfig::default());
	let all = world.all_units();

	let query = BruteForceQuery::new(&world.state.units);
	let mediator = Mediator::new(&world.state, &query, &ZerglingsWin, &world.pathing);
	// adept is safe where it is, shade would land next to zerglings
	assert!(manager.should_cancel(&all[1], &all[100], &mediator));
}

#[test]
fn adepts_hold_ramp_early() {
	let mut world = World::new(vec![adept(1, 30.0, 30.0)]).with_role(&[1], UnitRole::AdeptHarass);
	world.state.time = 100.0;
	let mut manager = AdeptManager::new(CombatConfig::default());

	let out = world.step(&mut manager);
	let ramp = world.state.map.main_ramp_top;
	let maneuver = out.maneuver(1).unwrap();
	assert_eq!(maneuver.steps(), &[CombatStep::Move { target: ramp }]);
}

#[test]
fn lone_base_keeps_shade_home_until_fight_is_good() {
	let mut world = World::new(vec![adept(1, 145.5, 150.5), shade(100, 146.5, 150.5, 40)])
		.with_role(&[1], UnitRole::AdeptHarass)
		.with_role(&[100], UnitRole::ShadeHarass);
	world.state.time = 300.0;
	let mut manager = AdeptManager::new(CombatConfig::default());
	let home = world.state.map.start_location;
	let enemy_start = world.state.map.enemy_start;

	let out = world.step(&mut manager);
	assert_eq!(manager.adept_of(100), Some(1));
	assert_eq!(
		out.maneuver(1).unwrap().steps(),
		&[CombatStep::Move { target: enemy_start }]
	);
	assert_eq!(
		out.commands_for(100),
		vec![(AbilityId::MoveMove, Target::Pos(home), false)]
	);

	world.oracle.set(EngagementOutcome::VictoryClose);
	let out = world.step(&mut manager);
	assert_eq!(
		out.commands_for(100),
		vec![(AbilityId::MoveMove, Target::Pos(enemy_start), false)]
	);
}

#[test]
fn far_adept_sends_shade_ahead() {
	let mut world = World::new(vec![adept(1, 100.5, 100.5), shade(100, 101.5, 100.5, 40)])
		.with_role(&[1], UnitRole::AdeptHarass)
		.with_role(&[100], UnitRole::ShadeHarass);
	world.state.time = 300.0;
	let mut manager = AdeptManager::new(CombatConfig::default());

	let out = world.step(&mut manager);
	assert_eq!(
		out.commands_for(100),
		vec![(AbilityId::MoveMove, Target::Pos(world.state.map.enemy_start), false)]
	);
}

fn cannon(tag: u64, x: f32, y: f32) -> Unit {
	Unit::new(tag, UnitTypeId::PhotonCannon, Alliance::Enemy, Point2::new(x, y))
		.with_weapon(TargetType::Any, 7.0)
		.with_attributes(&[Attribute::Structure])
}

#[test]
fn static_defence_is_never_worth_fighting() {
	let world = World::new(vec![adept(1, 40.5, 40.5), zergling(10, 43.5, 40.5), cannon(20, 46.5, 40.5)]);
	world.oracle.set(EngagementOutcome::VictoryEmphatic);
	let config = CombatConfig::default();
	let targets = FxHashMap::default();
	let all = world.all_units();
	let adepts = world.state.units.my.units.clone();
	let zerglings = all.filter(|u| u.tag == 10);
	let with_cannon = all.filter(|u| u.is_enemy());

	let out = world.with_mediator(|mediator| {
		let enemies = enemy_snapshot(mediator, &adepts, config.adept_enemy_range, QueryTree::EnemyGround);
		let harass = AdeptHarass {
			config: &config,
			enemies: &enemies,
			targets: &targets,
			default: Point2::new(150.5, 150.5),
		};
		assert!(harass.can_take_fight(&all[1], &zerglings, mediator));
		assert!(!harass.can_take_fight(&all[1], &with_cannon, mediator));

		let mut out = Commander::new();
		harass.execute(&adepts, mediator, &mut out);
		out
	});
	let steps = out.maneuver(1).unwrap().steps();
	assert!(matches!(steps[0], CombatStep::ShootTargetInRange { .. }));
	assert_eq!(steps.last(), Some(&CombatStep::KeepUnitSafe { grid: GridKind::Ground }));

	// oracle isn't confident enough
	world.oracle.set(EngagementOutcome::VictoryClose);
	world.with_mediator(|mediator| {
		let enemies = EnemySnapshot::default();
		let harass = AdeptHarass {
			config: &config,
			enemies: &enemies,
			targets: &targets,
			default: Point2::new(150.5, 150.5),
		};
		assert!(!harass.can_take_fight(&all[1], &zerglings, mediator));
	});
}

fn phoenix(shield: u32) -> Unit {
	let mut phoenix = Unit::new(1, UnitTypeId::Phoenix, Alliance::Own, Point2::new(50.5, 50.5))
		.flying()
		.with_weapon(TargetType::Air, 5.0)
		.with_attributes(&[Attribute::Light, Attribute::Mechanical])
		.with_shield(shield, 60);
	phoenix.abilities.insert(AbilityId::GravitonBeamGravitonBeam);
	phoenix
}

fn phoenix_steps(phoenix: Unit, anti_air_support: usize) -> Vec<CombatStep> {
	let marine = Unit::new(10, UnitTypeId::Marine, Alliance::Enemy, Point2::new(53.5, 50.5))
		.with_weapon(TargetType::Any, 5.0)
		.with_attributes(&[Attribute::Light, Attribute::Biological]);
	let world = World::new(vec![phoenix, marine]);
	let config = CombatConfig::default();
	let phoenixes = world.state.units.my.units.clone();
	let enemies = vec![(1, world.state.units.enemy.units.clone())]
		.into_iter()
		.collect::<EnemySnapshot>();

	let out = world.with_mediator(|mediator| {
		let mut out = Commander::new();
		PhoenixHarass {
			config: &config,
			enemies: &enemies,
			can_engage: true,
			target: Point2::new(100.5, 100.5),
			main: true,
			main_position: Point2::new(45.5, 45.5),
			anti_air_support,
		}
		.execute(&phoenixes, mediator, &mut out);
		out
	});
	let maneuver = out.maneuver(1).unwrap();
	assert_eq!(
		maneuver.overlays(),
		&[CombatStep::KeepUnitSafe {
			grid: GridKind::AirAvoidance
		}]
	);
	maneuver.steps().to_vec()
}

#[test]
fn phoenix_lifts_only_with_support() {
	let lift = CombatStep::UseAbility {
		ability: AbilityId::GravitonBeamGravitonBeam,
		target: Target::Tag(10),
	};
	assert!(phoenix_steps(phoenix(60), 3).contains(&lift));

	let steps = phoenix_steps(phoenix(60), 2);
	assert!(!steps.contains(&lift));
	assert_eq!(
		&steps[steps.len() - 2..],
		&[
			CombatStep::KeepUnitSafe { grid: GridKind::Air },
			CombatStep::Move {
				target: Point2::new(45.5, 45.5)
			}
		]
	);
}

#[test]
fn phoenix_low_on_shield_backs_off() {
	let steps = phoenix_steps(phoenix(5), 5);
	assert!(!steps.iter().any(|s| matches!(s, CombatStep::UseAbility { .. })));
	assert_eq!(steps.last(), Some(&CombatStep::KeepUnitSafe { grid: GridKind::Air }));
}
