//! Clustering and grouping helpers.

use crate::{distance::Distance, geometry::Point2, units::Units};
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Density based clustering.
///
/// Returns clusters in order of their first point in `data` and set of points
/// that don't belong to any cluster.
pub fn dbscan<P, F>(data: &[P], range_query: F, min_points: usize) -> (Vec<Vec<P>>, FxHashSet<P>)
where
	P: Eq + Hash + Clone,
	F: Fn(&P) -> Vec<P>,
{
	let mut clusters = Vec::<Vec<P>>::new();
	let mut noise = FxHashSet::<P>::default();
	let mut solved = FxHashSet::<P>::default();

	for p in data {
		if solved.contains(p) {
			continue;
		}
		let neighbors = range_query(p);
		solved.insert(p.clone());
		if neighbors.len() < min_points {
			noise.insert(p.clone());
			continue;
		}

		let mut cluster = vec![p.clone()];
		let mut seeds = neighbors;
		while let Some(q) = seeds.pop() {
			if noise.remove(&q) {
				cluster.push(q);
			} else if solved.insert(q.clone()) {
				let neighbors = range_query(&q);
				if neighbors.len() >= min_points {
					seeds.extend(neighbors.into_iter().filter(|n| !solved.contains(n)));
				}
				cluster.push(q);
			}
		}
		clusters.push(cluster);
	}
	(clusters, noise)
}

pub fn range_query<'r, P, D: 'r, F: 'r>(data: &'r [P], distance: F, epsilon: D) -> impl Fn(&P) -> Vec<P> + 'r
where
	P: Clone,
	D: PartialOrd,
	F: Fn(&P, &P) -> D,
{
	move |q: &P| {
		data.iter()
			.filter(|p| distance(q, p) <= epsilon)
			.cloned()
			.collect::<Vec<P>>()
	}
}

/// Finds unit with the most other units within `distance` of it.
///
/// Returns it's position and number of units around (itself included).
/// On equal counts the first unit wins.
pub fn center_mass(units: &Units, distance: f32) -> Option<(Point2, usize)> {
	let mut best: Option<(Point2, usize)> = None;
	for u in units {
		let count = units.iter().filter(|other| other.is_closer(distance, u) || other.tag == u.tag).count();
		if best.map_or(true, |(_, c)| count > c) {
			best = Some((u.position, count));
		}
	}
	best
}
