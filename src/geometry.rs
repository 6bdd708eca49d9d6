//! Simple 2D geometry used for positions on the map.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{
	hash::{Hash, Hasher},
	iter::Sum,
	ops::{Add, Div, Mul, Neg, Sub},
};

/// Size of the map grid.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
	pub x: usize,
	pub y: usize,
}
impl Size {
	pub fn new(x: usize, y: usize) -> Self {
		Self { x, y }
	}
}

/// Point on 2D map grid.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2 {
	pub x: f32,
	pub y: f32,
}
impl Point2 {
	pub fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}
	/// Returns point at `offset` distance from `self` in direction of `other`.
	/// Negative offset goes in the opposite direction.
	pub fn towards(self, other: Self, offset: f32) -> Self {
		let d = self.distance_to(other);
		if d < f32::EPSILON {
			return self;
		}
		self + (other - self) / d * offset
	}
	/// Same as [`towards`](Self::towards), but never goes further than `other`.
	pub fn towards_clamped(self, other: Self, offset: f32) -> Self {
		if self.distance_to(other) <= offset {
			other
		} else {
			self.towards(other, offset)
		}
	}
	pub fn offset(self, x: f32, y: f32) -> Self {
		Self {
			x: self.x + x,
			y: self.y + y,
		}
	}
	/// Euclidean length of vector from origin to `self`.
	pub fn len(self) -> f32 {
		(self.x * self.x + self.y * self.y).sqrt()
	}
	/// Grid cell this point lies in, `None` for negative coordinates.
	pub fn cell(self) -> Option<(usize, usize)> {
		if self.x < 0.0 || self.y < 0.0 || !self.x.is_finite() || !self.y.is_finite() {
			None
		} else {
			Some((self.x as usize, self.y as usize))
		}
	}
	/// Center of given grid cell.
	pub fn from_cell(cell: (usize, usize)) -> Self {
		Self::new(cell.0 as f32 + 0.5, cell.1 as f32 + 0.5)
	}

	fn distance_to(self, other: Self) -> f32 {
		(self - other).len()
	}
}
impl PartialEq for Point2 {
	fn eq(&self, other: &Self) -> bool {
		self.x == other.x && self.y == other.y
	}
}
impl Eq for Point2 {}
impl Hash for Point2 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		(self.x as i32).hash(state);
		(self.y as i32).hash(state);
	}
}
impl From<(f32, f32)> for Point2 {
	#[inline]
	fn from((x, y): (f32, f32)) -> Self {
		Self { x, y }
	}
}
impl From<&Point2> for Point2 {
	#[inline]
	fn from(p: &Point2) -> Self {
		*p
	}
}
impl Neg for Point2 {
	type Output = Self;

	fn neg(self) -> Self {
		Self {
			x: -self.x,
			y: -self.y,
		}
	}
}
impl Add for Point2 {
	type Output = Self;

	fn add(self, other: Self) -> Self {
		Self {
			x: self.x + other.x,
			y: self.y + other.y,
		}
	}
}
impl Sub for Point2 {
	type Output = Self;

	fn sub(self, other: Self) -> Self {
		Self {
			x: self.x - other.x,
			y: self.y - other.y,
		}
	}
}
impl Mul<f32> for Point2 {
	type Output = Self;

	fn mul(self, other: f32) -> Self {
		Self {
			x: self.x * other,
			y: self.y * other,
		}
	}
}
impl Div<f32> for Point2 {
	type Output = Self;

	fn div(self, other: f32) -> Self {
		Self {
			x: self.x / other,
			y: self.y / other,
		}
	}
}
impl Sum for Point2 {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Default::default(), Add::add)
	}
}
