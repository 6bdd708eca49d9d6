//! Data structures for storing units, fast filtering and finding ones that needed.

use crate::{distance::Distance, geometry::Point2, ids::UnitTypeId, unit::Unit};
use indexmap::{
	map::{Keys, Values},
	IndexMap, IndexSet,
};
use itertools::Itertools;
use rustc_hash::FxHasher;
use std::{
	collections::{HashMap, HashSet},
	hash::{BuildHasherDefault, Hash},
	iter::{FromIterator, Sum},
	ops::Index,
};

pub mod iter;

pub use iter::UnitsIterator;
use iter::IntoUnits;

pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Anything that can answer "is this item there".
pub trait Container<T> {
	fn contains(&self, item: &T) -> bool;
}
impl<T: PartialEq> Container<T> for [T] {
	fn contains(&self, item: &T) -> bool {
		<[T]>::contains(self, item)
	}
}
impl<T: PartialEq, const N: usize> Container<T> for [T; N] {
	fn contains(&self, item: &T) -> bool {
		self.as_slice().contains(item)
	}
}
impl<T: PartialEq> Container<T> for Vec<T> {
	fn contains(&self, item: &T) -> bool {
		self.as_slice().contains(item)
	}
}
impl<T: Eq + Hash, S: std::hash::BuildHasher> Container<T> for HashSet<T, S> {
	fn contains(&self, item: &T) -> bool {
		HashSet::contains(self, item)
	}
}
impl<T: Eq + Hash, V, S: std::hash::BuildHasher> Container<T> for HashMap<T, V, S> {
	fn contains(&self, item: &T) -> bool {
		self.contains_key(item)
	}
}
impl<T: Eq + Hash, S: std::hash::BuildHasher> Container<T> for IndexSet<T, S> {
	fn contains(&self, item: &T) -> bool {
		IndexSet::contains(self, item)
	}
}

/// All units on the map, split by owner and category.
#[derive(Default, Clone, Debug)]
pub struct AllUnits {
	/// Everything owned by the bot.
	pub my: PlayerUnits,
	/// Everything owned by opponent.
	pub enemy: PlayerUnits,
	pub mineral_fields: Units,
}
impl AllUnits {
	/// Sorts given units into groups.
	pub fn new<I: IntoIterator<Item = Unit>>(units: I) -> Self {
		let mut all = Self::default();
		for u in units {
			if u.is_mine() {
				all.my.push(u);
			} else if u.is_enemy() {
				all.enemy.push(u);
			} else if u.type_id.is_mineral() {
				all.mineral_fields.push(u);
			}
		}
		all
	}
}

/// Units of one player split by category.
#[derive(Default, Clone, Debug)]
pub struct PlayerUnits {
	pub all: Units,
	pub units: Units,
	pub structures: Units,
	pub townhalls: Units,
	pub workers: Units,
}
impl PlayerUnits {
	pub fn push(&mut self, u: Unit) {
		if u.is_structure() {
			if u.is_townhall() {
				self.townhalls.push(u.clone());
			}
			self.structures.push(u.clone());
		} else {
			if u.is_worker() {
				self.workers.push(u.clone());
			}
			self.units.push(u.clone());
		}
		self.all.push(u);
	}
}

/// Ordered collection of units keyed by tag.
#[derive(Default, Clone, Debug)]
pub struct Units(FxIndexMap<u64, Unit>);
impl Units {
	// HashMap methods
	#[inline]
	pub fn new() -> Self {
		Units(FxIndexMap::default())
	}

	#[inline]
	pub fn first(&self) -> Option<&Unit> {
		self.0.values().next()
	}

	#[inline]
	pub fn push(&mut self, u: Unit) -> Option<Unit> {
		self.0.insert(u.tag, u)
	}

	#[inline]
	pub fn remove(&mut self, u: u64) -> Option<Unit> {
		self.0.shift_remove(&u)
	}

	#[inline]
	pub fn iter(&self) -> Values<u64, Unit> {
		self.0.values()
	}

	#[inline]
	pub fn tags(&self) -> Keys<u64, Unit> {
		self.0.keys()
	}

	#[inline]
	pub fn contains_tag(&self, tag: u64) -> bool {
		self.0.contains_key(&tag)
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	// Units methods
	pub fn get(&self, tag: u64) -> Option<&Unit> {
		self.0.get(&tag)
	}
	pub fn find_tags<T: Container<u64>>(&self, tags: &T) -> Self {
		self.filter(|u| tags.contains(&u.tag))
	}
	pub fn of_type(&self, u_type: UnitTypeId) -> Self {
		self.filter(|u| u.type_id == u_type)
	}
	pub fn of_types<T: Container<UnitTypeId> + ?Sized>(&self, types: &T) -> Self {
		self.filter(|u| types.contains(&u.type_id))
	}
	pub fn exclude_types<T: Container<UnitTypeId> + ?Sized>(&self, types: &T) -> Self {
		self.filter(|u| !types.contains(&u.type_id))
	}
	pub fn center(&self) -> Option<Point2> {
		if self.is_empty() {
			None
		} else {
			Some(self.sum(|u| u.position) / self.len() as f32)
		}
	}
	// Get closest | furthest
	pub fn closest<P: Into<Point2> + Copy>(&self, target: P) -> Option<&Unit> {
		self.partial_min(|u| u.distance_squared(target))
	}
	pub fn furthest<P: Into<Point2> + Copy>(&self, target: P) -> Option<&Unit> {
		self.partial_max(|u| u.distance_squared(target))
	}
	// Filter closer than distance
	pub fn closer<P: Into<Point2> + Copy>(&self, distance: f32, target: P) -> Units {
		self.filter(|u| u.is_closer(distance, target))
	}

	pub fn filter<F>(&self, f: F) -> Self
	where
		F: Fn(&&Unit) -> bool,
	{
		Self(self.iter().filter(f).map(|u| (u.tag, u.clone())).collect())
	}
	/// Splits units into those that satisfy predicate and the rest.
	pub fn partition<F>(&self, f: F) -> (Self, Self)
	where
		F: Fn(&Unit) -> bool,
	{
		let mut yes = Units::new();
		let mut no = Units::new();
		for u in self.iter() {
			if f(u) {
				yes.push(u.clone());
			} else {
				no.push(u.clone());
			}
		}
		(yes, no)
	}
	pub fn ground(&self) -> Self {
		self.filter(|u| !u.is_flying)
	}
	pub fn flying(&self) -> Self {
		self.filter(|u| u.is_flying)
	}
	pub fn ready(&self) -> Self {
		self.filter(|u| u.is_ready())
	}
	pub fn structures(&self) -> Self {
		self.filter(|u| u.is_structure())
	}
	pub fn not_structures(&self) -> Self {
		self.filter(|u| !u.is_structure())
	}
	pub fn workers(&self) -> Self {
		self.filter(|u| u.is_worker())
	}
	/// Units that are in attack range of given unit.
	pub fn in_range_of(&self, unit: &Unit, gap: f32) -> Self {
		self.filter(|u| unit.in_range(u, gap))
	}
	/// Units that are close enough to attack given unit.
	pub fn in_range(&self, unit: &Unit, gap: f32) -> Self {
		self.filter(|u| u.in_range(unit, gap))
	}
	pub fn visible(&self) -> Self {
		self.filter(|u| u.is_visible())
	}
	/// Summed supply cost of units.
	pub fn supply(&self) -> f32 {
		self.sum(|u| u.supply_cost)
	}
	pub fn sum<T, F>(&self, f: F) -> T
	where
		T: Sum,
		F: Fn(&Unit) -> T,
	{
		self.iter().map(f).sum::<T>()
	}
	pub fn partial_min<T, F>(&self, f: F) -> Option<&Unit>
	where
		T: PartialOrd,
		F: Fn(&Unit) -> T,
	{
		self.iter()
			.min_by(|u1, u2| crate::distance::cmp(&f(u1), &f(u2)))
	}
	pub fn partial_max<T, F>(&self, f: F) -> Option<&Unit>
	where
		T: PartialOrd,
		F: Fn(&Unit) -> T,
	{
		self.iter()
			.max_by(|u1, u2| crate::distance::cmp(&f(u1), &f(u2)))
	}
	pub fn partial_sort<T, F>(&self, f: F) -> Self
	where
		T: PartialOrd,
		F: Fn(&Unit) -> T,
	{
		self.iter()
			.sorted_by(|u1, u2| crate::distance::cmp(&f(u1), &f(u2)))
			.cloned()
			.collect()
	}
}
impl FromIterator<Unit> for Units {
	#[inline]
	fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
		Self(iter.into_iter().map(|u| (u.tag, u)).collect())
	}
}
impl<'a> FromIterator<&'a Unit> for Units {
	#[inline]
	fn from_iter<I: IntoIterator<Item = &'a Unit>>(iter: I) -> Self {
		Self(iter.into_iter().map(|u| (u.tag, u.clone())).collect())
	}
}
impl IntoIterator for Units {
	type Item = Unit;
	type IntoIter = IntoUnits;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		IntoUnits(self.0.into_iter())
	}
}
impl<'a> IntoIterator for &'a Units {
	type Item = &'a Unit;
	type IntoIter = Values<'a, u64, Unit>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.0.values()
	}
}
impl Index<u64> for Units {
	type Output = Unit;

	#[inline]
	fn index(&self, tag: u64) -> &Self::Output {
		&self.0[&tag]
	}
}
impl Extend<Unit> for Units {
	#[inline]
	fn extend<T: IntoIterator<Item = Unit>>(&mut self, iter: T) {
		self.0.extend(iter.into_iter().map(|u| (u.tag, u)));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::unit::{Alliance, Attribute};

	fn unit(tag: u64, x: f32) -> Unit {
		Unit::new(tag, UnitTypeId::Zealot, Alliance::Own, Point2::new(x, 0.0))
	}

	#[test]
	fn keeps_insertion_order() {
		let units = vec![unit(3, 0.0), unit(1, 1.0), unit(2, 2.0)]
			.into_iter()
			.collect::<Units>();
		assert_eq!(units.tags().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
		assert_eq!(units.first().map(|u| u.tag), Some(3));
	}

	#[test]
	fn closest_and_center() {
		let units = vec![unit(1, 0.0), unit(2, 4.0)].into_iter().collect::<Units>();
		assert_eq!(units.closest(Point2::new(3.0, 0.0)).map(|u| u.tag), Some(2));
		assert_eq!(units.center(), Some(Point2::new(2.0, 0.0)));
		assert_eq!(Units::new().center(), None);
	}

	#[test]
	fn player_units_split_structures() {
		let cannon = Unit::new(7, UnitTypeId::PhotonCannon, Alliance::Enemy, Point2::new(0.0, 0.0))
			.with_attributes(&[Attribute::Structure]);
		let probe = Unit::new(8, UnitTypeId::Probe, Alliance::Enemy, Point2::new(1.0, 0.0));
		let all = AllUnits::new(vec![cannon, probe, unit(1, 0.0)]);
		assert_eq!(all.enemy.structures.len(), 1);
		assert_eq!(all.enemy.workers.len(), 1);
		assert_eq!(all.enemy.units.len(), 1);
		assert_eq!(all.my.all.len(), 1);
	}
}
