//! Proximity based grouping of units sharing one role.

use crate::{
	distance::Distance,
	geometry::Point2,
	host::UnitRole,
	units::Units,
	utils::{dbscan, range_query},
};
use std::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squad identifier derived from membership: the lowest tag among squad units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SquadId(pub u64);
impl fmt::Display for SquadId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "squad-{}", self.0)
	}
}

/// Group of units recomputed every step.
#[derive(Debug, Clone)]
pub struct Squad {
	pub id: SquadId,
	pub role: UnitRole,
	pub units: Units,
	/// Center of squad units.
	pub position: Point2,
	/// It's the largest squad of it's role.
	pub main: bool,
}

/// Splits units into squads where every unit is within `radius` of some other squad member.
///
/// Main squad is the largest one, on equal sizes the one with lower id wins.
/// Returned squads are sorted by id.
pub fn form_squads(units: &Units, role: UnitRole, radius: f32) -> Vec<Squad> {
	let tags = units.tags().copied().collect::<Vec<u64>>();
	let distance = |a: &u64, b: &u64| match (units.get(*a), units.get(*b)) {
		(Some(a), Some(b)) => a.distance_squared(b),
		_ => f32::INFINITY,
	};
	let (clusters, _) = dbscan(&tags, range_query(&tags, distance, radius * radius), 1);

	let mut squads = clusters
		.into_iter()
		.filter_map(|cluster| {
			let members = units.find_tags(&cluster);
			let id = SquadId(*cluster.iter().min()?);
			let position = members.center()?;
			Some(Squad {
				id,
				role,
				units: members,
				position,
				main: false,
			})
		})
		.collect::<Vec<Squad>>();
	squads.sort_by_key(|s| s.id);

	let main = squads
		.iter()
		.enumerate()
		.max_by(|(_, a), (_, b)| a.units.len().cmp(&b.units.len()).then(b.id.cmp(&a.id)))
		.map(|(i, _)| i);
	if let Some(i) = main {
		squads[i].main = true;
	}
	squads
}

/// Position of main squad, if there are any squads.
pub fn main_squad_position(squads: &[Squad]) -> Option<Point2> {
	squads.iter().find(|s| s.main).map(|s| s.position)
}
