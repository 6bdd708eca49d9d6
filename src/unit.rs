//! Read-only snapshot of a unit as seen on current game step.
#![allow(missing_docs)]

use crate::{
	action::Target,
	distance::Distance,
	geometry::Point2,
	ids::{AbilityId, BuffId, UnitTypeId},
};
use rustc_hash::FxHashSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit structure contains raw data filled by host and helper methods for it's analysis.
///
/// The combat layer never mutates units, it reads them and emits intents.
#[derive(Debug, Clone)]
pub struct Unit {
	/// How unit is displayed (i.e. visibility of unit).
	pub display_type: DisplayType,
	/// Unit is owned, enemy or just neutral.
	pub alliance: Alliance,
	/// Unique and constant for each unit tag. Used to find exactly the same unit in bunch of [`Units`].
	///
	/// [`Units`]: crate::units::Units
	pub tag: u64,
	/// The type of unit.
	pub type_id: UnitTypeId,
	/// Position on 2D grid.
	pub position: Point2,
	/// Radius of the unit.
	pub radius: f32,
	/// The progress of building construction. Value from `0` to `1`.
	pub build_progress: f32,
	/// Cloak state of unit. Used in [`is_cloaked`], [`is_revealed`], [`can_be_attacked`].
	///
	/// [`is_cloaked`]: Self::is_cloaked
	/// [`is_revealed`]: Self::is_revealed
	/// [`can_be_attacked`]: Self::can_be_attacked
	pub cloak: CloakState,
	/// Set of buffs unit has.
	pub buffs: FxHashSet<BuffId>,
	/// Abilities available for unit to use on this step.
	///
	/// Ability won't be avaliable if it's on cooldown or unit is out of energy.
	pub abilities: FxHashSet<AbilityId>,
	/// Armor and other attributes of unit's type.
	pub attributes: Vec<Attribute>,
	/// Weapons of unit's type.
	pub weapons: Vec<Weapon>,
	/// Supply unit's type costs.
	pub supply_cost: f32,
	/// Unit isn't seen on this step, host keeps it's last known state.
	pub is_memory: bool,
	/// Current health of unit.
	///
	/// Note: Not populated for snapshots.
	pub health: Option<u32>,
	/// Maximum health of unit.
	pub health_max: Option<u32>,
	/// Current shield of protoss unit.
	pub shield: Option<u32>,
	/// Maximum shield of protoss unit.
	pub shield_max: Option<u32>,
	/// Unit is flying.
	pub is_flying: bool,
	/// Zerg unit is burrowed.
	pub is_burrowed: bool,
	/// Current orders of unit.
	///
	/// Note: Not populated for enemies and snapshots.
	pub orders: Vec<UnitOrder>,
	/// Weapon cooldown in frames.
	pub weapon_cooldown: Option<f32>,
	/// How long a buff or unit is still around (in game loops).
	pub buff_duration_remain: Option<u32>,
}

impl Unit {
	/// Creates visible ready unit with full health and no weapons.
	pub fn new(tag: u64, type_id: UnitTypeId, alliance: Alliance, position: Point2) -> Self {
		Self {
			display_type: DisplayType::Visible,
			alliance,
			tag,
			type_id,
			position,
			radius: 0.5,
			build_progress: 1.0,
			cloak: CloakState::NotCloaked,
			buffs: Default::default(),
			abilities: Default::default(),
			attributes: Vec::new(),
			weapons: Vec::new(),
			supply_cost: 0.0,
			is_memory: false,
			health: Some(100),
			health_max: Some(100),
			shield: None,
			shield_max: None,
			is_flying: false,
			is_burrowed: false,
			orders: Vec::new(),
			weapon_cooldown: Some(0.0),
			buff_duration_remain: None,
		}
	}
	pub fn with_weapon(mut self, target: TargetType, range: f32) -> Self {
		self.weapons.push(Weapon {
			target,
			damage: 10,
			attacks: 1,
			range,
			speed: 1.0,
		});
		self
	}
	pub fn with_attributes(mut self, attributes: &[Attribute]) -> Self {
		self.attributes = attributes.to_vec();
		self
	}
	pub fn with_health(mut self, health: u32, health_max: u32) -> Self {
		self.health = Some(health);
		self.health_max = Some(health_max);
		self
	}
	pub fn with_shield(mut self, shield: u32, shield_max: u32) -> Self {
		self.shield = Some(shield);
		self.shield_max = Some(shield_max);
		self
	}
	pub fn with_supply(mut self, supply: f32) -> Self {
		self.supply_cost = supply;
		self
	}
	pub fn flying(mut self) -> Self {
		self.is_flying = true;
		self
	}

	/// Checks if it's worker.
	pub fn is_worker(&self) -> bool {
		self.type_id.is_worker()
	}
	/// Checks if it's townhall.
	pub fn is_townhall(&self) -> bool {
		self.type_id.is_townhall()
	}
	/// Checks if it's static defence structure.
	pub fn is_static_defence(&self) -> bool {
		self.type_id.is_static_defence()
	}
	/// Building construction complete.
	pub fn is_ready(&self) -> bool {
		(self.build_progress - 1.0).abs() < f32::EPSILON
	}

	pub fn is_visible(&self) -> bool {
		self.display_type.is_visible() && !self.is_memory
	}
	pub fn is_snapshot(&self) -> bool {
		self.display_type.is_snapshot()
	}
	/// Unit is remembered rather than seen right now.
	pub fn is_remembered(&self) -> bool {
		self.is_memory || !self.display_type.is_visible()
	}
	pub fn is_mine(&self) -> bool {
		self.alliance.is_own()
	}
	pub fn is_enemy(&self) -> bool {
		self.alliance.is_enemy()
	}
	pub fn is_neutral(&self) -> bool {
		self.alliance.is_neutral()
	}
	/// Unit is cloaked.
	pub fn is_cloaked(&self) -> bool {
		matches!(
			self.cloak,
			CloakState::Cloaked | CloakState::CloakedDetected | CloakState::CloakedAllied
		)
	}
	/// Unit is cloaked, but detected.
	pub fn is_revealed(&self) -> bool {
		matches!(self.cloak, CloakState::CloakedDetected)
	}
	/// Unit is visible or detected, so it can be targeted by attacks.
	pub fn can_be_attacked(&self) -> bool {
		matches!(self.cloak, CloakState::NotCloaked | CloakState::CloakedDetected)
	}

	/// Returns health percentage (current health divided by max health).
	/// Value in range from `0` to `1`.
	pub fn health_percentage(&self) -> Option<f32> {
		let current = self.health?;
		let max = self.health_max?;
		if max == 0 {
			return None;
		}
		Some(current as f32 / max as f32)
	}
	/// Returns shield percentage (current shield divided by max shield).
	/// Value in range from `0` to `1`.
	pub fn shield_percentage(&self) -> Option<f32> {
		let current = self.shield?;
		let max = self.shield_max?;
		if max == 0 {
			return None;
		}
		Some(current as f32 / max as f32)
	}
	/// Returns summed health and shield.
	pub fn hits(&self) -> Option<u32> {
		match (self.health, self.shield) {
			(Some(health), Some(shield)) => Some(health + shield),
			(Some(health), None) => Some(health),
			(None, Some(shield)) => Some(shield),
			(None, None) => None,
		}
	}
	/// Returns summed max health and max shield.
	pub fn hits_max(&self) -> Option<u32> {
		match (self.health_max, self.shield_max) {
			(Some(health), Some(shield)) => Some(health + shield),
			(Some(health), None) => Some(health),
			(None, Some(shield)) => Some(shield),
			(None, None) => None,
		}
	}
	/// Returns percentage of summed health and shield (current hits divided by max hits).
	/// Value in range from `0` to `1`.
	pub fn hits_percentage(&self) -> Option<f32> {
		let current = self.hits()?;
		let max = self.hits_max()?;
		if max == 0 {
			return None;
		}
		Some(current as f32 / max as f32)
	}

	pub fn has_attribute(&self, attribute: Attribute) -> bool {
		self.attributes.contains(&attribute)
	}
	pub fn is_light(&self) -> bool {
		self.has_attribute(Attribute::Light)
	}
	pub fn is_armored(&self) -> bool {
		self.has_attribute(Attribute::Armored)
	}
	pub fn is_structure(&self) -> bool {
		self.has_attribute(Attribute::Structure)
	}

	/// Checks if unit has given buff.
	pub fn has_buff(&self, buff: BuffId) -> bool {
		self.buffs.contains(&buff)
	}
	/// Checks if ability is available for unit.
	pub fn has_ability(&self, ability: AbilityId) -> bool {
		self.abilities.contains(&ability)
	}
	/// Worker is carrying minerals or vespene gas.
	pub fn is_carrying_resource(&self) -> bool {
		self.buffs.iter().any(|b| {
			matches!(
				b,
				BuffId::CarryMineralFieldMinerals
					| BuffId::CarryHighYieldMineralFieldMinerals
					| BuffId::CarryHarvestableVespeneGeyserGas
					| BuffId::CarryHarvestableVespeneGeyserGasProtoss
					| BuffId::CarryHarvestableVespeneGeyserGasZerg
			)
		})
	}

	/// Checks if unit can attack at all (i.e. has weapons).
	pub fn can_attack(&self) -> bool {
		!self.weapons.is_empty()
	}
	/// Checks if unit can attack both air and ground targets.
	pub fn can_attack_both(&self) -> bool {
		self.can_attack_ground() && self.can_attack_air()
	}
	/// Checks if unit can attack ground targets.
	pub fn can_attack_ground(&self) -> bool {
		self.weapons.iter().any(|w| !w.target.is_air())
	}
	/// Checks if unit can attack air targets.
	pub fn can_attack_air(&self) -> bool {
		self.weapons.iter().any(|w| !w.target.is_ground())
	}
	/// Checks if unit can attack given target.
	pub fn can_attack_unit(&self, target: &Unit) -> bool {
		if target.type_id == UnitTypeId::Colossus {
			return self.can_attack();
		}
		if target.is_flying {
			self.can_attack_air()
		} else {
			self.can_attack_ground()
		}
	}
	/// Checks if unit's weapon is on cooldown.
	pub fn on_cooldown(&self) -> bool {
		self.weapon_cooldown.map_or(false, |cool| cool > f32::EPSILON)
	}
	/// Returns ground range of unit's weapon.
	pub fn ground_range(&self) -> f32 {
		self.weapons
			.iter()
			.find(|w| !w.target.is_air())
			.map_or(0.0, |w| w.range)
	}
	/// Returns air range of unit's weapon.
	pub fn air_range(&self) -> f32 {
		self.weapons
			.iter()
			.find(|w| !w.target.is_ground())
			.map_or(0.0, |w| w.range)
	}
	/// Returns range of unit's weapon vs given target if unit can attack it, otherwise returns `0`.
	pub fn range_vs(&self, target: &Unit) -> f32 {
		if target.type_id == UnitTypeId::Colossus {
			self.weapons
				.iter()
				.map(|w| w.range)
				.fold(0.0, f32::max)
		} else if target.is_flying {
			self.air_range()
		} else {
			self.ground_range()
		}
	}
	/// Checks if unit is close enough to attack given target.
	pub fn in_range(&self, target: &Unit, gap: f32) -> bool {
		let range = self.range_vs(target);
		if range < f32::EPSILON {
			return false;
		}
		let total_range = self.radius + target.radius + range + gap;
		let distance = self.distance_squared(target);

		// Takes into account that Sieged Tank has a minimum range of 2
		(self.type_id != UnitTypeId::SiegeTankSieged || distance > 4.0)
			&& distance <= total_range * total_range
	}
	/// Checks if unit is close enough to be attacked by given threat.
	/// This `unit.in_range_of(threat, gap)` is equivalent to `threat.in_range(unit, gap)`.
	pub fn in_range_of(&self, threat: &Unit, gap: f32) -> bool {
		threat.in_range(self, gap)
	}
	/// Unit can shoot given target right now: it's in range and weapon is ready.
	pub fn is_attack_ready(&self, target: &Unit) -> bool {
		!self.on_cooldown() && self.can_attack_unit(target) && self.in_range(target, 0.0)
	}

	/// Returns target of first unit's order.
	pub fn target(&self) -> Target {
		self.orders.first().map_or(Target::None, |order| order.target)
	}
	/// Returns target point of unit's order if any.
	pub fn target_pos(&self) -> Option<Point2> {
		match self.target() {
			Target::Pos(pos) => Some(pos),
			_ => None,
		}
	}
	/// Returns ability of first unit's order.
	pub fn ordered_ability(&self) -> Option<AbilityId> {
		self.orders.first().map(|order| order.ability)
	}
	/// Checks if unit don't have any orders currently.
	pub fn is_idle(&self) -> bool {
		self.orders.is_empty()
	}
	/// Checks if unit is currently moving.
	pub fn is_moving(&self) -> bool {
		matches!(self.ordered_ability(), Some(AbilityId::MoveMove) | Some(AbilityId::Move))
	}
}
impl From<Unit> for Point2 {
	#[inline]
	fn from(u: Unit) -> Self {
		u.position
	}
}
impl From<&Unit> for Point2 {
	#[inline]
	fn from(u: &Unit) -> Self {
		u.position
	}
}

/// Alliance of [`Unit`] relative to the bot.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alliance {
	/// Your own unit.
	Own,
	/// Unit of your ally.
	Ally,
	/// Neutral unit (minerals, rocks, ...).
	Neutral,
	/// Opponent's unit.
	Enemy,
}

/// The display type of [`Unit`]. Can be accessed through [`display_type`](Unit::display_type) field.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayType {
	/// Fully visible.
	Visible,
	/// Dimmed version of unit left behind after entering fog of war.
	Snapshot,
	/// Fully hidden.
	Hidden,
	/// Building that hasn't started construction.
	Placeholder,
}

/// Cloak state of [`Unit`]. Can be accessed through [`cloak`](Unit::cloak) field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CloakState {
	/// Under the fog, so unknown whether it's cloaked or not.
	CloakedUnknown,
	/// Is cloaked (i.e. invisible).
	Cloaked,
	/// Is cloaked, but visible because is detected (i.e. in range of detector, or orbital scan).
	CloakedDetected,
	/// Unit is not cloaked.
	NotCloaked,
	/// Is cloaked, but visible because it's owned or allied unit.
	CloakedAllied,
}

/// Unit type's attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Attribute {
	Light,
	Armored,
	Biological,
	Mechanical,
	Robotic,
	Psionic,
	Massive,
	Structure,
	Hover,
	Heroic,
	Summoned,
}

/// Possible target of unit's weapon.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TargetType {
	Ground,
	Air,
	Any,
}

/// Weapon's characteristic.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Weapon {
	/// Possible targets.
	pub target: TargetType,
	/// Usual damage.
	pub damage: u32,
	/// Number of attacks per use.
	pub attacks: u32,
	/// Maximum range.
	pub range: f32,
	/// Cooldown (in seconds * game speed).
	pub speed: f32,
}

/// Order given to unit. All current orders of unit stored in [`orders`](Unit::orders) field.
#[derive(Debug, Clone)]
pub struct UnitOrder {
	/// Ability unit is using.
	pub ability: AbilityId,
	/// Target of unit's ability.
	pub target: Target,
	/// Progress of train abilities. Value in range from `0` to `1`.
	pub progress: f32,
}
