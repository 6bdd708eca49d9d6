//! Unit type sets and tables used by combat decisions.

use crate::ids::UnitTypeId;
use std::collections::HashMap;

pub const WORKER_IDS: [UnitTypeId; 3] = [UnitTypeId::SCV, UnitTypeId::Drone, UnitTypeId::Probe];
pub const TOWNHALL_IDS: [UnitTypeId; 9] = [
	UnitTypeId::CommandCenter,
	UnitTypeId::OrbitalCommand,
	UnitTypeId::PlanetaryFortress,
	UnitTypeId::CommandCenterFlying,
	UnitTypeId::OrbitalCommandFlying,
	UnitTypeId::Hatchery,
	UnitTypeId::Lair,
	UnitTypeId::Hive,
	UnitTypeId::Nexus,
];

/// Non-combat nuisances never worth shooting or counting in fights.
pub const COMMON_UNIT_IGNORE_TYPES: [UnitTypeId; 7] = [
	UnitTypeId::Egg,
	UnitTypeId::Larva,
	UnitTypeId::Broodling,
	UnitTypeId::CreepTumor,
	UnitTypeId::CreepTumorBurrowed,
	UnitTypeId::CreepTumorQueen,
	UnitTypeId::MULE,
];
/// Structures counted as fighters in engagement estimates.
pub const STATIC_DEFENCE: [UnitTypeId; 6] = [
	UnitTypeId::SpineCrawler,
	UnitTypeId::SporeCrawler,
	UnitTypeId::PhotonCannon,
	UnitTypeId::MissileTurret,
	UnitTypeId::PlanetaryFortress,
	UnitTypeId::Bunker,
];
/// Threats flying units that can also shoot ground should answer first.
pub const DANGER_TO_AIR: [UnitTypeId; 5] = [
	UnitTypeId::VoidRay,
	UnitTypeId::PhotonCannon,
	UnitTypeId::MissileTurret,
	UnitTypeId::SporeCrawler,
	UnitTypeId::Bunker,
];
/// Incidental structures that shouldn't become army attack point.
pub const ATTACK_TARGET_IGNORE: [UnitTypeId; 4] = [
	UnitTypeId::CreepTumor,
	UnitTypeId::CreepTumorQueen,
	UnitTypeId::CreepTumorBurrowed,
	UnitTypeId::NydusCanal,
];
/// Not worth a graviton beam.
pub const LIFT_IGNORE: [UnitTypeId; 5] = [
	UnitTypeId::Broodling,
	UnitTypeId::Egg,
	UnitTypeId::Larva,
	UnitTypeId::Zergling,
	UnitTypeId::MULE,
];
/// Structures phoenixes have to respect around harass targets.
pub const ANTI_AIR_STRUCTURES: [UnitTypeId; 4] = [
	UnitTypeId::PhotonCannon,
	UnitTypeId::Bunker,
	UnitTypeId::MissileTurret,
	UnitTypeId::SporeCrawler,
];
/// Enemy air harass phoenixes hunt before going for bases.
pub const AIR_HARASS_UNITS: [UnitTypeId; 2] = [UnitTypeId::Banshee, UnitTypeId::Mutalisk];

lazy_static! {
	/// How many workers it takes to fight off one enemy unit of given type.
	/// Types with `0` mean workers can't deal with them at all.
	pub static ref WORKERS_PER_ENEMY: HashMap<UnitTypeId, usize> = hashmap! {
		UnitTypeId::Drone => 1,
		UnitTypeId::Probe => 1,
		UnitTypeId::SCV => 1,
		UnitTypeId::Zergling => 2,
		UnitTypeId::Marine => 0,
	};
	/// How many workers should be pulled to kill proxy structure of given type.
	pub static ref WORKERS_PER_PROXY: HashMap<UnitTypeId, usize> = hashmap! {
		UnitTypeId::Pylon => 4,
		UnitTypeId::Hatchery => 12,
		UnitTypeId::PhotonCannon => 3,
		UnitTypeId::CommandCenter => 12,
		UnitTypeId::Bunker => 6,
	};
}
