//! Cyclic waypoints that advance once the current one is scouted.

use crate::{
	distance::{Distance, DistanceIterator},
	geometry::Point2,
	pixel_map::{is_visible, VisibilityMap},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered list of points with explicit index of the current one.
///
/// Index moves to the next point (wrapping around) when current point becomes visible.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointCycle {
	points: Vec<Point2>,
	index: usize,
}
impl WaypointCycle {
	pub fn new(points: Vec<Point2>) -> Self {
		Self { points, index: 0 }
	}
	pub fn points(&self) -> &[Point2] {
		&self.points
	}
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
	pub fn index(&self) -> usize {
		self.index
	}
	/// Current waypoint, `None` when cycle is empty.
	pub fn current(&self) -> Option<Point2> {
		self.points.get(self.index).copied()
	}
	/// Moves to the next waypoint and returns it.
	pub fn advance(&mut self) -> Option<Point2> {
		if self.points.is_empty() {
			return None;
		}
		self.index = (self.index + 1) % self.points.len();
		self.current()
	}
	/// Advances once if current waypoint is visible, returns waypoint to go to.
	pub fn update(&mut self, visibility: &VisibilityMap) -> Option<Point2> {
		match self.current() {
			Some(p) if is_visible(visibility, p) => self.advance(),
			current => current,
		}
	}
	/// Same as [`update`](Self::update), with visibility check supplied by caller.
	pub fn update_with<F: Fn(Point2) -> bool>(&mut self, is_visible: F) -> Option<Point2> {
		match self.current() {
			Some(p) if is_visible(p) => self.advance(),
			current => current,
		}
	}
}

/// Map control spots far enough from enemy main, the ones closer to own base go first.
///
/// Distance is measured from spot `15` in front of own start location towards map center.
pub fn vantage_points(
	spots: &[Point2],
	start_location: Point2,
	enemy_start: Point2,
	map_center: Point2,
	min_enemy_distance: f32,
) -> Vec<Point2> {
	let origin = start_location.towards(map_center, 15.0);
	spots
		.iter()
		.copied()
		.filter(|p| p.is_further(min_enemy_distance, enemy_start))
		.sort_by_distance(origin)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pixel_map::Visibility;

	#[test]
	fn advances_only_when_visible() {
		let mut map = VisibilityMap::from_elem((10, 10), Visibility::Fogged);
		let mut cycle = WaypointCycle::new(vec![Point2::new(1.5, 1.5), Point2::new(5.5, 5.5)]);
		assert_eq!(cycle.update(&map), Some(Point2::new(1.5, 1.5)));

		map[(1, 1)] = Visibility::Visible;
		assert_eq!(cycle.update(&map), Some(Point2::new(5.5, 5.5)));
		assert_eq!(cycle.update(&map), Some(Point2::new(5.5, 5.5)));

		map[(5, 5)] = Visibility::Visible;
		assert_eq!(cycle.update(&map), Some(Point2::new(1.5, 1.5)));
	}

	#[test]
	fn empty_cycle() {
		let mut cycle = WaypointCycle::default();
		assert_eq!(cycle.advance(), None);
		assert_eq!(cycle.update_with(|_| true), None);
	}

	#[test]
	fn vantage_filter_and_order() {
		let spots = [
			Point2::new(90.0, 90.0),
			Point2::new(40.0, 10.0),
			Point2::new(25.0, 20.0),
		];
		let points = vantage_points(
			&spots,
			Point2::new(10.0, 10.0),
			Point2::new(100.0, 100.0),
			Point2::new(55.0, 55.0),
			70.0,
		);
		assert_eq!(points, vec![Point2::new(25.0, 20.0), Point2::new(40.0, 10.0)]);
	}
}
