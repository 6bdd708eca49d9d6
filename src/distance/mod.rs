//! Distance comparisons between points and units.
//!
//! Every type convertible into [`Point2`] gets [`Distance`] for free, so units,
//! references to units and plain points mix in the same calls:
//! ```
//! use sc2_combat::prelude::*;
//!
//! let ramp = Point2::new(20.5, 20.5);
//! assert!(ramp.is_closer(5.0, Point2::new(23.5, 20.5)));
//! assert_eq!(ramp.distance_squared(Point2::new(23.5, 24.5)), 25.0);
//! ```

use crate::geometry::Point2;
use std::{cmp::Ordering, vec::IntoIter};

/// Basic trait for comparing distance.
pub trait Distance: Into<Point2> {
	/// Squared euclidean distance from `self` to `other`.
	/// Thresholds given in squared form are compared against this directly.
	fn distance_squared<P: Into<Point2>>(self, other: P) -> f32 {
		let a = self.into();
		let b = other.into();
		let (dx, dy) = (a.x - b.x, a.y - b.y);
		dx * dx + dy * dy
	}
	#[inline]
	fn distance<P: Into<Point2>>(self, other: P) -> f32 {
		self.distance_squared(other).sqrt()
	}
	/// Checks if `other` is strictly within `distance` of `self`.
	#[inline]
	fn is_closer<P: Into<Point2>>(self, distance: f32, other: P) -> bool {
		self.distance_squared(other) < distance * distance
	}
	/// Checks if `other` is strictly beyond `distance` of `self`.
	#[inline]
	fn is_further<P: Into<Point2>>(self, distance: f32, other: P) -> bool {
		self.distance_squared(other) > distance * distance
	}
}

impl<T: Into<Point2>> Distance for T {}

/// Total order over partially ordered values, incomparable ones (NaN) count as equal.
#[inline]
pub(crate) fn cmp<T: PartialOrd>(a: &T, b: &T) -> Ordering {
	a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

#[inline]
fn dist_to<T, P>(target: P) -> impl Fn(&T, &T) -> Ordering
where
	T: Distance + Copy,
	P: Into<Point2> + Copy,
{
	let f = move |u: &T| u.distance_squared(target);
	move |a, b| cmp(&f(a), &f(b))
}

/// Helper trait for iterators of items implementing [`Distance`].
pub trait DistanceIterator: Iterator + Sized
where
	Self::Item: Distance + Copy,
{
	/// Closest to `target` item, first one of equally close.
	fn closest<T: Into<Point2>>(self, target: T) -> Option<Self::Item> {
		self.min_by(dist_to(target.into()))
	}
	/// Furthest from `target` item, last one of equally far.
	fn furthest<T: Into<Point2>>(self, target: T) -> Option<Self::Item> {
		self.max_by(dist_to(target.into()))
	}
	fn closest_distance_squared<T: Into<Point2>>(self, target: T) -> Option<f32> {
		let target = target.into();
		self.map(|u| u.distance_squared(target)).min_by(cmp)
	}
	/// Returns iterator of items sorted by distance to `target`.
	/// Equally distant items keep their order.
	fn sort_by_distance<T: Into<Point2>>(self, target: T) -> IntoIter<Self::Item> {
		let mut v: Vec<_> = self.collect();
		v.sort_by(dist_to(target.into()));
		v.into_iter()
	}
}

impl<I> DistanceIterator for I
where
	I: Iterator + Sized,
	I::Item: Distance + Copy,
{
}

/// Sorting slices of points or units by distance in place.
pub trait DistanceSlice<T> {
	/// Stable sort by distance to `target`.
	fn sort_by_distance<P: Into<Point2>>(&mut self, target: P);
}

impl<T: Distance + Copy> DistanceSlice<T> for [T] {
	fn sort_by_distance<P: Into<Point2>>(&mut self, target: P) {
		self.sort_by(dist_to(target.into()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ties_keep_order() {
		let home = Point2::new(0.0, 0.0);
		let mut spots = vec![Point2::new(0.0, 3.0), Point2::new(1.0, 0.0), Point2::new(3.0, 0.0)];
		spots.sort_by_distance(home);
		assert_eq!(spots, vec![Point2::new(1.0, 0.0), Point2::new(0.0, 3.0), Point2::new(3.0, 0.0)]);
		assert_eq!(spots.iter().copied().closest(home), Some(Point2::new(1.0, 0.0)));
		assert_eq!(spots.iter().copied().furthest(home), Some(Point2::new(3.0, 0.0)));
	}

	#[test]
	fn nan_never_panics() {
		let spots = [Point2::new(f32::NAN, 0.0), Point2::new(2.0, 0.0)];
		assert!(spots.iter().copied().closest(Point2::default()).is_some());
		assert_eq!(
			spots[1..].iter().copied().closest_distance_squared(Point2::default()),
			Some(4.0)
		);
	}

	#[test]
	fn strict_bounds() {
		let p = Point2::new(0.0, 0.0);
		assert!(!p.is_closer(2.0, Point2::new(2.0, 0.0)));
		assert!(!p.is_further(2.0, Point2::new(2.0, 0.0)));
		assert!(p.is_further(1.5, Point2::new(2.0, 0.0)));
	}
}
