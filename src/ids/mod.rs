//! Ids of units, abilities and buffs the combat layer cares about.
//!
//! Numeric values follow `stableid.json`, so hosts can convert raw ids with
//! [`FromPrimitive`](num_traits::FromPrimitive).
#![allow(missing_docs)]

mod ability_id;
mod buff_id;
mod unit_typeid;

pub use ability_id::AbilityId;
pub use buff_id::BuffId;
pub use unit_typeid::UnitTypeId;

mod impls;
