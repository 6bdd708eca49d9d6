//! Iterator adaptors for Units.

use super::Container;
use crate::{ids::UnitTypeId, unit::Unit};
use indexmap::map::IntoIter;
use std::borrow::Borrow;

/// Owned iterator over Units.
pub struct IntoUnits(pub(super) IntoIter<u64, Unit>);

impl Iterator for IntoUnits {
	type Item = Unit;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|x| x.1)
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}

	#[inline]
	fn count(self) -> usize {
		self.0.len()
	}
}

impl DoubleEndedIterator for IntoUnits {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.0.next_back().map(|x| x.1)
	}
}

impl ExactSizeIterator for IntoUnits {
	fn len(&self) -> usize {
		self.0.len()
	}
}

// Filtering adaptors share the same iterator body, only predicate differs.

fn filter_fold<T, Acc>(
	mut pred: impl FnMut(&T) -> bool,
	mut fold: impl FnMut(Acc, T) -> Acc,
) -> impl FnMut(Acc, T) -> Acc {
	move |acc, u| if pred(&u) { fold(acc, u) } else { acc }
}

macro_rules! iterator_methods {
	() => {
		#[inline]
		fn next(&mut self) -> Option<Self::Item> {
			let pred = self.predicate();
			self.iter.find(|u| pred(u.borrow()))
		}

		#[inline]
		fn size_hint(&self) -> (usize, Option<usize>) {
			(0, self.iter.size_hint().1)
		}

		#[inline]
		fn count(self) -> usize {
			let pred = self.predicate();
			self.iter.map(|u| pred(u.borrow()) as usize).sum()
		}

		#[inline]
		fn fold<Acc, Fold>(self, init: Acc, fold: Fold) -> Acc
		where
			Fold: FnMut(Acc, Self::Item) -> Acc,
		{
			let pred = self.predicate();
			self.iter
				.fold(init, filter_fold(|u| pred(u.borrow()), fold))
		}
	};
}

macro_rules! impl_simple_iterator {
	($name:ident $(<$a:lifetime>)?) => {
		impl<$($a,)? I> Iterator for $name<$($a,)? I>
		where
			I: Iterator,
			I::Item: Borrow<Unit>,
		{
			type Item = I::Item;

			iterator_methods!();
		}
	};
}

macro_rules! make_simple_iterator {
	($(#[$attr:meta])* $name:ident, $pred:expr) => {
		$(#[$attr])*
		#[derive(Clone)]
		pub struct $name<I> {
			iter: I,
		}

		impl<I> $name<I> {
			pub(super) fn new(iter: I) -> Self {
				Self { iter }
			}

			fn predicate(&self) -> impl Fn(&Unit) -> bool {
				$pred
			}
		}

		impl_simple_iterator!($name);
	};
}

/// Leaves units of given types.
#[derive(Clone)]
pub struct OfTypes<'a, I, T: ?Sized> {
	iter: I,
	types: &'a T,
}
impl<'a, I, T: Container<UnitTypeId> + ?Sized> OfTypes<'a, I, T> {
	pub(super) fn new(iter: I, types: &'a T) -> Self {
		Self { iter, types }
	}

	fn predicate(&self) -> impl Fn(&Unit) -> bool + 'a {
		let types = self.types;
		move |u| types.contains(&u.type_id)
	}
}

impl<'a, I, T> Iterator for OfTypes<'a, I, T>
where
	I: Iterator,
	I::Item: Borrow<Unit>,
	T: Container<UnitTypeId> + ?Sized,
{
	type Item = I::Item;

	iterator_methods!();
}

/// Drops units of given types.
#[derive(Clone)]
pub struct ExcludeTypes<'a, I, T: ?Sized> {
	iter: I,
	types: &'a T,
}
impl<'a, I, T: Container<UnitTypeId> + ?Sized> ExcludeTypes<'a, I, T> {
	pub(super) fn new(iter: I, types: &'a T) -> Self {
		Self { iter, types }
	}

	fn predicate(&self) -> impl Fn(&Unit) -> bool + 'a {
		let types = self.types;
		move |u| !types.contains(&u.type_id)
	}
}

impl<'a, I, T> Iterator for ExcludeTypes<'a, I, T>
where
	I: Iterator,
	I::Item: Borrow<Unit>,
	T: Container<UnitTypeId> + ?Sized,
{
	type Item = I::Item;

	iterator_methods!();
}

make_simple_iterator!(
	/// Leaves units that are able to shoot at all.
	Attackers,
	|u| u.can_attack()
);

make_simple_iterator!(
	/// Leaves units that are able to shoot air.
	AntiAir,
	|u| u.can_attack_air()
);

make_simple_iterator!(
	/// Leaves everything except structures.
	NotStructures,
	|u| !u.is_structure()
);

/// Type and combat filters over iterators of units, without collecting into [`Units`](super::Units).
pub trait UnitsIterator: Iterator + Sized
where
	Self::Item: Borrow<Unit>,
{
	fn of_types<T: Container<UnitTypeId> + ?Sized>(self, types: &T) -> OfTypes<Self, T> {
		OfTypes::new(self, types)
	}
	fn exclude_types<T: Container<UnitTypeId> + ?Sized>(self, types: &T) -> ExcludeTypes<Self, T> {
		ExcludeTypes::new(self, types)
	}
	fn attackers(self) -> Attackers<Self> {
		Attackers::new(self)
	}
	fn anti_air(self) -> AntiAir<Self> {
		AntiAir::new(self)
	}
	fn not_structures(self) -> NotStructures<Self> {
		NotStructures::new(self)
	}
}

impl<I> UnitsIterator for I
where
	I: Iterator + Sized,
	I::Item: Borrow<Unit>,
{
}
