//! Per-squad engagement commitment kept across steps.

use crate::{
	constants::COMMON_UNIT_IGNORE_TYPES,
	engagement::{EngagementOracle, EngagementThresholds},
	squad::SquadId,
	units::{Container, Units},
};
use rustc_hash::FxHashMap;

/// Enemies that matter for fight estimate: ignored types and harmless structures are dropped.
pub fn fight_relevant(enemy: &Units) -> Units {
	enemy.filter(|u| {
		!COMMON_UNIT_IGNORE_TYPES.contains(&u.type_id) && (!u.is_structure() || u.is_static_defence())
	})
}

/// Inputs of one squad's engagement update.
pub struct EngagementInput<'a> {
	/// Enemies near the squad.
	pub enemy: &'a Units,
	/// Own units near the fight, not necessarily all squad members.
	pub own_near: &'a Units,
	/// Army isn't on offense, squads fight where they stand.
	pub defensive: bool,
	/// Early rush is going on, hesitating costs more than losing a fight.
	pub force_engage: bool,
}

/// Hysteresis state machine for every squad.
///
/// Squads seen for the first time start disengaged.
#[derive(Debug, Clone)]
pub struct EngagementTracker {
	thresholds: EngagementThresholds,
	engaged: FxHashMap<SquadId, bool>,
}
impl EngagementTracker {
	pub fn new(thresholds: EngagementThresholds) -> Self {
		Self {
			thresholds,
			engaged: Default::default(),
		}
	}
	pub fn thresholds(&self) -> EngagementThresholds {
		self.thresholds
	}

	/// Updates state of squad and returns whether it should fight this step.
	///
	/// Squad without relevant enemies nearby is always disengaged, overrides apply only to real fights.
	pub fn update(&mut self, id: SquadId, input: EngagementInput, oracle: &dyn EngagementOracle) -> bool {
		let enemy = fight_relevant(input.enemy);
		if enemy.is_empty() {
			self.engaged.insert(id, false);
			return false;
		}

		let previous = self.is_engaged(id);
		let engaged = if input.defensive {
			true
		} else {
			let outcome = oracle.can_win_fight(input.own_near, &enemy, false);
			let next = self.thresholds.next(previous, outcome);
			if next != previous {
				debug!(
					"{} {} with outcome {:?}",
					id,
					if next { "engages" } else { "disengages" },
					outcome
				);
			}
			next
		};
		self.engaged.insert(id, engaged);
		engaged || input.force_engage
	}

	/// Current commitment of squad, `false` for unknown squads.
	pub fn is_engaged(&self, id: SquadId) -> bool {
		self.engaged.get(&id).copied().unwrap_or(false)
	}
	pub fn len(&self) -> usize {
		self.engaged.len()
	}
	pub fn is_empty(&self) -> bool {
		self.engaged.is_empty()
	}
	/// Forgets squads that weren't observed on current step.
	pub fn prune<T: Container<SquadId>>(&mut self, observed: &T) {
		self.engaged.retain(|id, _| observed.contains(id));
	}
}
