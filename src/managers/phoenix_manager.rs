use crate::{
	action::Commander,
	behaviors::{CombatBehavior, EnemySnapshot, PhoenixHarass},
	config::CombatConfig,
	constants::ANTI_AIR_STRUCTURES,
	distance::Distance,
	engagement::ThresholdError,
	geometry::Point2,
	host::{Mediator, QueryTree, UnitRole},
	ids::UnitTypeId,
	squad::{form_squads, main_squad_position, SquadId},
	targeting::{phoenix_harass_target, valid_targets},
	tracker::{EngagementInput, EngagementTracker},
	CombatResult, Manager,
};

/// Phoenix squads hunting enemy air and picking off ground units.
pub struct PhoenixManager {
	config: CombatConfig,
	tracker: EngagementTracker,
	target: Option<Point2>,
}
impl PhoenixManager {
	pub fn new(config: CombatConfig) -> Result<Self, ThresholdError> {
		Ok(Self {
			tracker: EngagementTracker::new(config.phoenix_thresholds()?),
			config,
			target: None,
		})
	}
	/// Current harass target, set once there was a main phoenix squad.
	pub fn target(&self) -> Option<Point2> {
		self.target
	}
	pub fn tracker(&self) -> &EngagementTracker {
		&self.tracker
	}
}

impl Manager for PhoenixManager {
	fn update(&mut self, mediator: &Mediator, out: &mut Commander) -> CombatResult<()> {
		for phoenix in mediator
			.units_with_roles(&[UnitRole::Attacking, UnitRole::Defending])
			.of_type(UnitTypeId::Phoenix)
		{
			out.assign_role(phoenix.tag, UnitRole::PhoenixHarass);
		}

		let config = &self.config;
		let phoenixes = mediator.units_with_role(UnitRole::PhoenixHarass);
		let squads = form_squads(&phoenixes, UnitRole::PhoenixHarass, config.squad_radius);
		let observed = squads.iter().map(|s| s.id).collect::<Vec<SquadId>>();
		self.tracker.prune(&observed);
		let main_position = match main_squad_position(&squads) {
			Some(position) => position,
			None => return Ok(()),
		};

		for squad in &squads {
			if squad.main {
				self.target = Some(phoenix_harass_target(mediator, &squad.units, config.phoenix_target_radius));
			}
			let target = self.target.unwrap_or(mediator.map().enemy_start);

			let own_near = mediator.units_near(squad.position, config.phoenix_own_range, QueryTree::AllOwn);
			let enemies = valid_targets(
				&mediator.units_near(squad.position, config.phoenix_enemy_range, QueryTree::AllEnemy),
				false,
			);
			let enemy_units = enemies.not_structures();
			let can_engage = self.tracker.update(
				squad.id,
				EngagementInput {
					enemy: &enemy_units,
					own_near: &own_near,
					defensive: false,
					force_engage: false,
				},
				mediator.oracle,
			);

			let near = squad
				.units
				.iter()
				.map(|phoenix| {
					let close = enemies.filter(|u| {
						(!u.is_structure() || ANTI_AIR_STRUCTURES.contains(&u.type_id))
							&& u.is_closer(config.phoenix_near_range, phoenix)
					});
					(phoenix.tag, close)
				})
				.collect::<EnemySnapshot>();
			PhoenixHarass {
				config,
				enemies: &near,
				can_engage,
				target,
				main: squad.main,
				main_position,
				anti_air_support: own_near.iter().filter(|u| u.can_attack_air()).count(),
			}
			.execute(&squad.units, mediator, out);
		}
		Ok(())
	}

	fn name(&self) -> &'static str {
		"PhoenixManager"
	}
}
