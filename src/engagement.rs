//! Engagement outcome estimates and hysteresis thresholds built on them.

use crate::units::Units;
use std::{error::Error, fmt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Estimated result of fight between two groups of units, ordered from the worst to the best
/// for the first group.
///
/// Can be parsed from variant name, it's snake case form or ordinal:
/// ```
/// use sc2_combat::engagement::EngagementOutcome;
///
/// assert_eq!("VictoryMarginal".parse::<EngagementOutcome>(), Ok(EngagementOutcome::VictoryMarginal));
/// assert_eq!("loss_emphatic".parse::<EngagementOutcome>(), Ok(EngagementOutcome::LossEmphatic));
/// assert_eq!("5".parse::<EngagementOutcome>(), Ok(EngagementOutcome::Tie));
/// ```
#[variant_checkers]
#[derive(
	Debug, FromPrimitive, ToPrimitive, FromStr, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[enum_from_str(use_primitives)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EngagementOutcome {
	LossEmphatic = 0,
	LossOverwhelming = 1,
	LossDecisive = 2,
	LossClose = 3,
	LossMarginal = 4,
	Tie = 5,
	VictoryMarginal = 6,
	VictoryClose = 7,
	VictoryDecisive = 8,
	VictoryOverwhelming = 9,
	VictoryEmphatic = 10,
}
impl EngagementOutcome {
	/// First group is expected to win.
	pub fn is_victory(self) -> bool {
		self > EngagementOutcome::Tie
	}
	/// First group is expected to lose.
	pub fn is_loss(self) -> bool {
		self < EngagementOutcome::Tie
	}
}

/// Black-box fight estimator supplied by host.
pub trait EngagementOracle {
	/// Estimates result of `own` units fighting `enemy` units.
	/// When `workers_do_no_damage` is set enemy workers are counted as harmless.
	fn can_win_fight(&self, own: &Units, enemy: &Units, workers_do_no_damage: bool) -> EngagementOutcome;
}

/// Error returned when engage threshold isn't strictly above disengage threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdError {
	pub engage: EngagementOutcome,
	pub disengage: EngagementOutcome,
}
impl fmt::Display for ThresholdError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"engage threshold {:?} must be above disengage threshold {:?}",
			self.engage, self.disengage
		)
	}
}
impl Error for ThresholdError {}

/// Pair of thresholds forming hysteresis band.
///
/// Disengaged side starts fighting at `engage` or better,
/// engaged side stops only at `disengage` or worse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngagementThresholds {
	engage: EngagementOutcome,
	disengage: EngagementOutcome,
}
impl EngagementThresholds {
	pub fn new(engage: EngagementOutcome, disengage: EngagementOutcome) -> Result<Self, ThresholdError> {
		if engage > disengage {
			Ok(Self { engage, disengage })
		} else {
			Err(ThresholdError { engage, disengage })
		}
	}
	pub fn engage(self) -> EngagementOutcome {
		self.engage
	}
	pub fn disengage(self) -> EngagementOutcome {
		self.disengage
	}
	pub fn should_engage(self, outcome: EngagementOutcome) -> bool {
		outcome >= self.engage
	}
	pub fn should_disengage(self, outcome: EngagementOutcome) -> bool {
		outcome <= self.disengage
	}
	/// Returns new state given current one and fresh estimate.
	/// Outcomes inside the band keep current state.
	pub fn next(self, engaged: bool, outcome: EngagementOutcome) -> bool {
		if engaged {
			!self.should_disengage(outcome)
		} else {
			self.should_engage(outcome)
		}
	}
}
