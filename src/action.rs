//! Outbound side of combat layer: direct commands, maneuvers and role changes.

use crate::{
	geometry::Point2,
	host::UnitRole,
	ids::AbilityId,
	maneuver::Maneuver,
	units::FxIndexMap,
	CombatResult,
};

/// Target of ability used by unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Target {
	/// Ability target is position (move, build, ...).
	Pos(Point2),
	/// Ability target is unit (attack, repair, heal, ...).
	Tag(u64),
	/// Ability don't require target (train, morph, research, ...).
	None,
}

/// Receiver of decisions, implemented by host.
pub trait BehaviorSink {
	/// Registers maneuver host should execute for one unit this step.
	fn register_maneuver(&mut self, maneuver: Maneuver) -> CombatResult<()>;
	/// Issues one command for group of units.
	fn issue_command(&mut self, units: &[u64], ability: AbilityId, target: Target, queue: bool) -> CombatResult<()>;
	/// Moves unit to other role. Takes effect on the next step.
	fn assign_role(&mut self, tag: u64, role: UnitRole) -> CombatResult<()>;
}

/// Buffer of decisions made during one step.
///
/// Same commands for different units are batched together,
/// only the latest maneuver registered for a unit is kept.
#[derive(Default, Clone, Debug)]
pub struct Commander {
	commands: FxIndexMap<(AbilityId, Target, bool), Vec<u64>>,
	maneuvers: FxIndexMap<u64, Maneuver>,
	roles: FxIndexMap<u64, UnitRole>,
}
impl Commander {
	pub fn new() -> Self {
		Default::default()
	}

	/// Orders unit to use ability on target.
	pub fn command(&mut self, tag: u64, ability: AbilityId, target: Target, queue: bool) {
		// Unit gets only one non-queued order per step
		if !queue {
			for units in self.commands.values_mut() {
				units.retain(|u| *u != tag);
			}
			self.commands.retain(|_, units| !units.is_empty());
			self.maneuvers.shift_remove(&tag);
		}
		self.commands
			.entry((ability, target, queue))
			.or_default()
			.push(tag);
	}
	pub fn attack(&mut self, tag: u64, target: Target, queue: bool) {
		self.command(tag, AbilityId::Attack, target, queue)
	}
	pub fn move_to(&mut self, tag: u64, target: Target, queue: bool) {
		self.command(tag, AbilityId::MoveMove, target, queue)
	}
	pub fn gather(&mut self, tag: u64, target: u64, queue: bool) {
		self.command(tag, AbilityId::HarvestGather, Target::Tag(target), queue)
	}
	pub fn return_resource(&mut self, tag: u64, queue: bool) {
		self.command(tag, AbilityId::HarvestReturn, Target::None, queue)
	}
	pub fn use_ability(&mut self, tag: u64, ability: AbilityId, queue: bool) {
		self.command(tag, ability, Target::None, queue)
	}

	/// Registers maneuver for it's unit, replacing direct commands given to the unit earlier this step.
	pub fn register(&mut self, maneuver: Maneuver) {
		let tag = maneuver.tag();
		for units in self.commands.values_mut() {
			units.retain(|u| *u != tag);
		}
		self.commands.retain(|_, units| !units.is_empty());
		self.maneuvers.insert(tag, maneuver);
	}
	/// Moves unit to given role starting next step.
	pub fn assign_role(&mut self, tag: u64, role: UnitRole) {
		self.roles.insert(tag, role);
	}

	pub fn maneuvers(&self) -> Vec<&Maneuver> {
		self.maneuvers.values().collect()
	}
	pub fn maneuver(&self, tag: u64) -> Option<&Maneuver> {
		self.maneuvers.get(&tag)
	}
	/// Commands given to unit, in order they were issued.
	pub fn commands_for(&self, tag: u64) -> Vec<(AbilityId, Target, bool)> {
		self.commands
			.iter()
			.filter(|(_, units)| units.contains(&tag))
			.map(|(command, _)| *command)
			.collect()
	}
	pub fn commands_count(&self) -> usize {
		self.commands.values().map(|units| units.len()).sum()
	}
	pub fn role_change(&self, tag: u64) -> Option<UnitRole> {
		self.roles.get(&tag).copied()
	}
	pub fn role_changes(&self) -> impl Iterator<Item = (u64, UnitRole)> + '_ {
		self.roles.iter().map(|(tag, role)| (*tag, *role))
	}
	pub fn is_empty(&self) -> bool {
		self.commands.is_empty() && self.maneuvers.is_empty() && self.roles.is_empty()
	}

	/// Hands everything collected to the host, leaving buffer empty.
	pub fn flush(&mut self, sink: &mut dyn BehaviorSink) -> CombatResult<()> {
		for ((ability, target, queue), units) in self.commands.drain(..) {
			sink.issue_command(&units, ability, target, queue)?;
		}
		for (_, maneuver) in self.maneuvers.drain(..) {
			sink.register_maneuver(maneuver)?;
		}
		for (tag, role) in self.roles.drain(..) {
			sink.assign_role(tag, role)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::maneuver::CombatStep;

	#[test]
	fn batches_same_commands() {
		let mut commander = Commander::new();
		let target = Target::Pos(Point2::new(5.0, 5.0));
		commander.attack(1, target, false);
		commander.attack(2, target, false);
		assert_eq!(commander.commands_count(), 2);
		assert_eq!(commander.commands_for(2), vec![(AbilityId::Attack, target, false)]);
	}

	#[test]
	fn later_order_replaces_earlier() {
		let mut commander = Commander::new();
		commander.attack(1, Target::Tag(9), false);
		commander.move_to(1, Target::Pos(Point2::new(1.0, 1.0)), false);
		assert_eq!(commander.commands_for(1).len(), 1);

		let mut maneuver = Maneuver::new(1);
		maneuver.add(CombatStep::AMove {
			target: Point2::new(3.0, 3.0),
		});
		commander.register(maneuver);
		assert!(commander.commands_for(1).is_empty());
		assert!(commander.maneuver(1).is_some());
	}
}
