#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, FromPrimitive, ToPrimitive, FromStr, Copy, Clone, PartialEq, Eq, Hash)]
#[enum_from_str(use_primitives)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitTypeId {
	NotAUnit = 0,
	Colossus = 4,
	Baneling = 9,
	Mothership = 10,
	CommandCenter = 18,
	SupplyDepot = 19,
	Refinery = 20,
	Barracks = 21,
	EngineeringBay = 22,
	MissileTurret = 23,
	Bunker = 24,
	Factory = 27,
	Starport = 28,
	SiegeTankSieged = 32,
	SiegeTank = 33,
	VikingFighter = 35,
	CommandCenterFlying = 36,
	SCV = 45,
	Marine = 48,
	Reaper = 49,
	Ghost = 50,
	Marauder = 51,
	Thor = 52,
	Hellion = 53,
	Medivac = 54,
	Banshee = 55,
	Raven = 56,
	Battlecruiser = 57,
	Nexus = 59,
	Pylon = 60,
	Assimilator = 61,
	Gateway = 62,
	Forge = 63,
	PhotonCannon = 66,
	Stargate = 67,
	CyberneticsCore = 72,
	Zealot = 73,
	Stalker = 74,
	HighTemplar = 75,
	DarkTemplar = 76,
	Sentry = 77,
	Phoenix = 78,
	Carrier = 79,
	VoidRay = 80,
	WarpPrism = 81,
	Observer = 82,
	Immortal = 83,
	Probe = 84,
	Hatchery = 86,
	CreepTumor = 87,
	Extractor = 88,
	SpawningPool = 89,
	NydusNetwork = 95,
	SpineCrawler = 98,
	SporeCrawler = 99,
	Lair = 100,
	Hive = 101,
	Egg = 103,
	Drone = 104,
	Zergling = 105,
	Overlord = 106,
	Hydralisk = 107,
	Mutalisk = 108,
	Ultralisk = 109,
	Roach = 110,
	Infestor = 111,
	Corruptor = 112,
	BroodLord = 114,
	Queen = 126,
	Overseer = 129,
	PlanetaryFortress = 130,
	OrbitalCommand = 132,
	OrbitalCommandFlying = 134,
	CreepTumorBurrowed = 137,
	CreepTumorQueen = 138,
	Archon = 141,
	NydusCanal = 142,
	Larva = 151,
	MULE = 268,
	Broodling = 289,
	Adept = 311,
	MineralField = 341,
	VespeneGeyser = 342,
	MineralField750 = 483,
	Oracle = 495,
	Tempest = 496,
	WidowMine = 498,
	LurkerMP = 502,
	Ravager = 688,
	Liberator = 689,
	Cyclone = 692,
	Disruptor = 694,
	AdeptPhaseShift = 801,
	ShieldBattery = 1910,
}
