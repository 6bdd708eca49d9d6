use super::UnitTypeId;

impl UnitTypeId {
	#[inline]
	pub fn is_worker(self) -> bool {
		matches!(self, UnitTypeId::SCV | UnitTypeId::Drone | UnitTypeId::Probe)
	}
	#[rustfmt::skip::macros(matches)]
	#[inline]
	pub fn is_townhall(self) -> bool {
		matches!(
			self,
			UnitTypeId::CommandCenter
			| UnitTypeId::OrbitalCommand
			| UnitTypeId::PlanetaryFortress
			| UnitTypeId::CommandCenterFlying
			| UnitTypeId::OrbitalCommandFlying
			| UnitTypeId::Hatchery
			| UnitTypeId::Lair
			| UnitTypeId::Hive
			| UnitTypeId::Nexus
		)
	}
	#[inline]
	pub fn is_mineral(self) -> bool {
		matches!(self, UnitTypeId::MineralField | UnitTypeId::MineralField750)
	}
	/// Structures that shoot back and are dangerous enough to be taken into fight estimates.
	#[rustfmt::skip::macros(matches)]
	#[inline]
	pub fn is_static_defence(self) -> bool {
		matches!(
			self,
			UnitTypeId::SpineCrawler
			| UnitTypeId::SporeCrawler
			| UnitTypeId::PhotonCannon
			| UnitTypeId::MissileTurret
			| UnitTypeId::PlanetaryFortress
			| UnitTypeId::Bunker
		)
	}
}
