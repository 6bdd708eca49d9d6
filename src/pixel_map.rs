//! Grids supplied by host: pathing costs and visibility.

use crate::geometry::Point2;
use ndarray::Array2;

/// Pathing cost of every map cell.
///
/// Pathable cells without danger have cost `1`, danger adds to it,
/// unpathable cells are `f32::INFINITY`.
pub type CostGrid = Array2<f32>;
/// Visibility of every map cell.
pub type VisibilityMap = Array2<Visibility>;

/// Cost of a pathable cell nothing threatens.
pub const BASE_COST: f32 = 1.0;

/// Creates grid of given size where every cell is pathable and safe.
pub fn safe_grid(width: usize, height: usize) -> CostGrid {
	Array2::from_elem((width, height), BASE_COST)
}

/// Which grid maneuver steps should path and check safety on.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GridKind {
	/// Ground pathing with enemy influence.
	Ground,
	/// Ground pathing with only hazardous effects (storms, biles, ...) added.
	GroundAvoidance,
	/// Air pathing with enemy influence.
	Air,
	/// Air pathing with only hazardous effects added.
	AirAvoidance,
	/// Air pathing with influence of enemies that shoot up only.
	GroundToAir,
}

/// Set of cost grids host keeps up to date every step.
#[derive(Debug, Clone, Default)]
pub struct Grids {
	pub ground: CostGrid,
	pub ground_avoidance: CostGrid,
	pub air: CostGrid,
	pub air_avoidance: CostGrid,
	pub ground_to_air: CostGrid,
}
impl Grids {
	/// All grids safe and pathable.
	pub fn safe(width: usize, height: usize) -> Self {
		let grid = safe_grid(width, height);
		Self {
			ground: grid.clone(),
			ground_avoidance: grid.clone(),
			air: grid.clone(),
			air_avoidance: grid.clone(),
			ground_to_air: grid,
		}
	}
	pub fn get(&self, kind: GridKind) -> &CostGrid {
		match kind {
			GridKind::Ground => &self.ground,
			GridKind::GroundAvoidance => &self.ground_avoidance,
			GridKind::Air => &self.air,
			GridKind::AirAvoidance => &self.air_avoidance,
			GridKind::GroundToAir => &self.ground_to_air,
		}
	}
	pub fn get_mut(&mut self, kind: GridKind) -> &mut CostGrid {
		match kind {
			GridKind::Ground => &mut self.ground,
			GridKind::GroundAvoidance => &mut self.ground_avoidance,
			GridKind::Air => &mut self.air,
			GridKind::AirAvoidance => &mut self.air_avoidance,
			GridKind::GroundToAir => &mut self.ground_to_air,
		}
	}
}

/// Returns cost of cell at given position, `None` outside of the grid.
pub fn cost_at(grid: &CostGrid, pos: Point2) -> Option<f32> {
	pos.cell().and_then(|cell| grid.get(cell).copied())
}

/// Position is pathable and no danger reaches it.
pub fn is_position_safe(grid: &CostGrid, pos: Point2) -> bool {
	cost_at(grid, pos).map_or(false, |cost| cost.is_finite() && cost <= BASE_COST)
}

/// Finds closest to `from` cell center that is safe, looking no further than `radius`.
///
/// Ties are broken by scan order.
pub fn find_closest_safe_spot(grid: &CostGrid, from: Point2, radius: f32) -> Option<Point2> {
	let (width, height) = grid.dim();
	let r = radius.max(0.0);
	let x0 = (from.x - r).floor().max(0.0) as usize;
	let y0 = (from.y - r).floor().max(0.0) as usize;
	let x1 = ((from.x + r).ceil().max(0.0) as usize).min(width.saturating_sub(1));
	let y1 = ((from.y + r).ceil().max(0.0) as usize).min(height.saturating_sub(1));
	if width == 0 || height == 0 || x0 > x1 || y0 > y1 {
		return None;
	}

	let mut best: Option<(f32, Point2)> = None;
	for x in x0..=x1 {
		for y in y0..=y1 {
			let cost = grid[(x, y)];
			if !cost.is_finite() || cost > BASE_COST {
				continue;
			}
			let p = Point2::from_cell((x, y));
			let d = {
				let dx = p.x - from.x;
				let dy = p.y - from.y;
				dx * dx + dy * dy
			};
			if d > r * r {
				continue;
			}
			if best.map_or(true, |(best_d, _)| d < best_d) {
				best = Some((d, p));
			}
		}
	}
	best.map(|(_, p)| p)
}

/// Visibility of map cell.
#[variant_checkers]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Visibility {
	/// Never explored.
	Hidden,
	/// Explored, but not visible now.
	Fogged,
	/// Visible now.
	Visible,
	/// Outside of playable area.
	FullHidden,
}
impl Default for Visibility {
	fn default() -> Self {
		Visibility::Hidden
	}
}

/// Position is visible on current step.
pub fn is_visible(map: &VisibilityMap, pos: Point2) -> bool {
	pos.cell()
		.and_then(|cell| map.get(cell))
		.map_or(false, |v| v.is_visible())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn safety_check() {
		let mut grid = safe_grid(10, 10);
		grid[(5, 5)] = 30.0;
		grid[(6, 5)] = f32::INFINITY;
		assert!(is_position_safe(&grid, Point2::new(1.5, 1.5)));
		assert!(!is_position_safe(&grid, Point2::new(5.5, 5.5)));
		assert!(!is_position_safe(&grid, Point2::new(6.5, 5.5)));
		assert!(!is_position_safe(&grid, Point2::new(20.0, 5.0)));
	}

	#[test]
	fn closest_safe_spot_skips_danger() {
		let mut grid = safe_grid(10, 10);
		for x in 3..=6 {
			for y in 3..=6 {
				grid[(x, y)] = 20.0;
			}
		}
		let spot = find_closest_safe_spot(&grid, Point2::new(4.5, 4.5), 5.0);
		let spot = spot.expect("safe spot exists");
		assert!(is_position_safe(&grid, spot));
		assert!((spot.x - 4.5).abs() + (spot.y - 4.5).abs() <= 3.0 + f32::EPSILON);
	}

	#[test]
	fn no_safe_spot_in_radius() {
		let grid = Array2::from_elem((5, 5), 10.0);
		assert_eq!(find_closest_safe_spot(&grid, Point2::new(2.5, 2.5), 3.0), None);
	}

	#[test]
	fn visibility() {
		let mut map = VisibilityMap::from_elem((4, 4), Visibility::Fogged);
		map[(1, 2)] = Visibility::Visible;
		assert!(is_visible(&map, Point2::new(1.2, 2.9)));
		assert!(!is_visible(&map, Point2::new(0.0, 0.0)));
	}
}
