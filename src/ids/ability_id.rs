#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, FromPrimitive, ToPrimitive, FromStr, Copy, Clone, PartialEq, Eq, Hash)]
#[enum_from_str(use_primitives)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AbilityId {
	Invalid = 0,
	Smart = 1,
	MoveMove = 16,
	AttackAttack = 23,
	GravitonBeamGravitonBeam = 173,
	EffectVoidRayPrismaticAlignment = 2393,
	AdeptPhaseShift = 2544,
	CancelAdeptShadePhaseShift = 2596,
	Stop = 3665,
	HarvestGather = 3666,
	HarvestReturn = 3667,
	Attack = 3674,
	Move = 3794,
	HoldPosition = 3793,
}
