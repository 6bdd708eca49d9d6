use crate::{
	action::Commander,
	behaviors::{enemy_snapshot, CombatBehavior, ObserverBaseDefence, VoidrayMode, Voidrays},
	config::CombatConfig,
	host::{Mediator, QueryTree, UnitRole},
	ids::UnitTypeId,
	waypoints::{vantage_points, WaypointCycle},
	CombatResult, Manager,
};

/// Voidrays roaming vantage points or guarding bases, and observers watching over bases.
pub struct MapControlManager {
	config: CombatConfig,
	vantage: WaypointCycle,
}
impl MapControlManager {
	pub fn new(config: CombatConfig) -> Self {
		Self {
			config,
			vantage: Default::default(),
		}
	}
	pub fn vantage(&self) -> &WaypointCycle {
		&self.vantage
	}
}

impl Manager for MapControlManager {
	fn update(&mut self, mediator: &Mediator, out: &mut Commander) -> CombatResult<()> {
		let map = mediator.map();
		if self.vantage.is_empty() {
			self.vantage = WaypointCycle::new(vantage_points(
				&map.vantage_points,
				map.start_location,
				map.enemy_start,
				map.map_center,
				self.config.vantage_min_enemy_distance,
			));
		}

		if mediator.intel().enemy_race.is_zerg() {
			for voidray in mediator
				.units_with_roles(&[UnitRole::Attacking, UnitRole::Defending])
				.of_type(UnitTypeId::VoidRay)
			{
				out.assign_role(voidray.tag, UnitRole::MapControl);
			}
		}
		let vantage = self.vantage.update_with(|p| mediator.is_visible(p)).unwrap_or(map.map_center);

		let config = &self.config;
		let roaming = mediator
			.units_with_role(UnitRole::MapControl)
			.of_type(UnitTypeId::VoidRay);
		let base_defence = mediator.units_with_role(UnitRole::BaseDefence);
		let guarding = base_defence.of_type(UnitTypeId::VoidRay);
		let observers = base_defence.of_type(UnitTypeId::Observer);

		for (mode, voidrays) in [(VoidrayMode::MapControl, roaming), (VoidrayMode::Defensive, guarding)] {
			if voidrays.is_empty() {
				continue;
			}
			let enemies = enemy_snapshot(mediator, &voidrays, config.voidray_enemy_range, QueryTree::AllEnemy);
			Voidrays {
				config,
				mode,
				enemies: &enemies,
				vantage,
			}
			.execute(&voidrays, mediator, out);
		}

		if !observers.is_empty() {
			let cloaked = mediator.units().enemy.units.filter(|u| u.is_cloaked());
			ObserverBaseDefence {
				config,
				cloaked: &cloaked,
				target: map.main_ramp_top,
			}
			.execute(&observers, mediator, out);
		}
		Ok(())
	}

	fn name(&self) -> &'static str {
		"MapControlManager"
	}
}
