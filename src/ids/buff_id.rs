#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, FromPrimitive, ToPrimitive, FromStr, Copy, Clone, PartialEq, Eq, Hash)]
#[enum_from_str(use_primitives)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BuffId {
	Null = 0,
	GravitonBeam = 6,
	LockOn = 116,
	VoidRaySwarmDamageBoost = 122,
	CarryMineralFieldMinerals = 271,
	CarryHighYieldMineralFieldMinerals = 272,
	CarryHarvestableVespeneGeyserGas = 273,
	CarryHarvestableVespeneGeyserGasProtoss = 274,
	CarryHarvestableVespeneGeyserGasZerg = 275,
	AdeptPhaseShift = 249,
}
