//! Decision layers registered in [`Hub`](crate::Hub).
//!
//! Managers own everything that has to survive between steps (engagement commitment,
//! squad targets, shade links, waypoint cycles), pick their units by role
//! and hand them to [`behaviors`](crate::behaviors).

mod adept_manager;
mod combat_manager;
mod map_control_manager;
mod phoenix_manager;
mod worker_defence_manager;

pub use adept_manager::AdeptManager;
pub use combat_manager::CombatManager;
pub use map_control_manager::MapControlManager;
pub use phoenix_manager::PhoenixManager;
pub use worker_defence_manager::WorkerDefenceManager;

use crate::{config::CombatConfig, engagement::ThresholdError, Hub};

/// Hub with every manager registered in default order.
pub fn default_hub(config: &CombatConfig) -> Result<Hub, ThresholdError> {
	let mut hub = Hub::new();
	hub.register(WorkerDefenceManager::new(config.clone()))
		.register(AdeptManager::new(config.clone()))
		.register(PhoenixManager::new(config.clone())?)
		.register(MapControlManager::new(config.clone()))
		.register(CombatManager::new(config.clone())?);
	Ok(hub)
}
