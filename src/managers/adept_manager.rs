use crate::{
	action::Commander,
	behaviors::{enemy_snapshot, AdeptHarass, AdeptShadeHarass, CombatBehavior, MapControlAdepts, MapControlShades},
	config::CombatConfig,
	distance::*,
	geometry::Point2,
	host::{Mediator, QueryTree, UnitRole},
	ids::UnitTypeId,
	pixel_map::GridKind,
	targeting::{least_defended_base, secondary_base},
	unit::Unit,
	units::{FxIndexMap, Units},
	waypoints::WaypointCycle,
	CombatResult, Manager,
};
use rustc_hash::FxHashMap;

/// Adept harass: shade links, harass targets, shade cancelling and map control adepts.
pub struct AdeptManager {
	config: CombatConfig,
	/// Shade tag to tag of adept that cast it. Never rebound.
	links: FxIndexMap<u64, u64>,
	adept_targets: FxHashMap<u64, Point2>,
	shade_targets: FxHashMap<u64, Point2>,
	assigned_map_control: bool,
	shade_cycle: WaypointCycle,
}
impl AdeptManager {
	pub fn new(config: CombatConfig) -> Self {
		Self {
			config,
			links: Default::default(),
			adept_targets: Default::default(),
			shade_targets: Default::default(),
			assigned_map_control: false,
			shade_cycle: Default::default(),
		}
	}
	/// Adept linked to given shade.
	pub fn adept_of(&self, shade: u64) -> Option<u64> {
		self.links.get(&shade).copied()
	}
	/// Shade linked to given adept, if it's still around.
	pub fn shade_of(&self, adept: u64) -> Option<u64> {
		self.links
			.iter()
			.rev()
			.find(|(_, a)| **a == adept)
			.map(|(shade, _)| *shade)
	}
	pub fn links(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
		self.links.iter().map(|(shade, adept)| (*shade, *adept))
	}

	/// Binds every new shade to the closest adept without a live shade,
	/// or to the closest adept when all of them have one. Existing links are kept as they are.
	pub fn link_shades(&mut self, adepts: &Units, shades: &Units) {
		for shade in shades {
			if self.links.contains_key(&shade.tag) {
				continue;
			}
			let links = &self.links;
			let unlinked = adepts.filter(|a| {
				!links
					.iter()
					.any(|(s, linked)| *linked == a.tag && shades.contains_tag(*s))
			});
			if let Some(adept) = unlinked.closest(shade).or_else(|| adepts.closest(shade)) {
				debug!("Linked shade {} to adept {}", shade.tag, adept.tag);
				self.links.insert(shade.tag, adept.tag);
			}
		}
	}

	/// Forgets links of shades that are gone.
	pub fn prune(&mut self, shades: &Units) {
		self.links.retain(|shade, _| shades.contains_tag(*shade));
		self.shade_targets.retain(|shade, _| shades.contains_tag(*shade));
	}

	/// Decides whether shade should be cancelled so adept stays where it is.
	///
	/// Shades with long cast remaining always finish. Otherwise lots of workers near adept cancel,
	/// nothing threatening or lots of workers near shade finish, and at last oracle picks
	/// the location where own units do at least as well.
	pub fn should_cancel(&self, adept: &Unit, shade: &Unit, mediator: &Mediator) -> bool {
		let config = &self.config;
		if shade
			.buff_duration_remain
			.map_or(false, |remain| remain > config.companion_long_cast)
		{
			return false;
		}

		let positions = [adept.position, shade.position];
		let mut enemy = mediator.units_in_range(&positions, config.companion_radius, QueryTree::EnemyGround);
		let near_shade = enemy.pop().unwrap_or_default();
		let near_adept = enemy.pop().unwrap_or_default();

		let workers_near_adept = near_adept.iter().filter(|u| u.is_worker()).count();
		let workers_near_shade = near_shade.iter().filter(|u| u.is_worker()).count();
		if workers_near_adept >= config.companion_worker_count && workers_near_adept > workers_near_shade {
			return true;
		}
		let threats_near_shade = near_shade.filter(|u| u.can_attack() && !u.is_worker());
		if threats_near_shade.is_empty() || workers_near_shade >= config.companion_worker_count {
			return false;
		}

		let mut own = mediator.units_in_range(&positions, config.companion_radius, QueryTree::AllOwn);
		let own_near_shade = own.pop().unwrap_or_default();
		let own_near_adept = own.pop().unwrap_or_default();
		let at_shade = mediator.can_win_fight_ignoring_workers(&own_near_shade, &near_shade);
		let at_adept = mediator.can_win_fight_ignoring_workers(&own_near_adept, &near_adept);
		at_shade < at_adept
	}

	fn cancel_decisions(&self, mediator: &Mediator) -> FxHashMap<u64, bool> {
		let units = &mediator.units().my.units;
		let mut decisions = FxHashMap::default();
		for (shade, adept) in &self.links {
			if let (Some(adept), Some(shade)) = (units.get(*adept), units.get(*shade)) {
				let cancel = self.should_cancel(adept, shade, mediator);
				if cancel {
					debug!("Cancelling shade {} of adept {}", shade.tag, adept.tag);
				}
				decisions.insert(shade.tag, cancel);
			}
		}
		decisions
	}

	fn assign_roles(&mut self, mediator: &Mediator, adepts: &Units, shades: &Units, out: &mut Commander) {
		let intel = mediator.intel();
		let role = if intel.is_rushed {
			UnitRole::Defending
		} else {
			UnitRole::AdeptHarass
		};
		for adept in adepts.filter(|u| mediator.state.role(u.tag) == Some(UnitRole::Attacking)) {
			out.assign_role(adept.tag, role);
		}

		if intel.enemy_race.is_zerg() && !self.assigned_map_control {
			let harassing = adepts.filter(|u| mediator.state.role(u.tag) == Some(UnitRole::AdeptHarass));
			if let Some(adept) = harassing.first() {
				debug!("Adept {} goes for map control", adept.tag);
				out.assign_role(adept.tag, UnitRole::MapControl);
				self.assigned_map_control = true;
			}
		}

		for shade in shades {
			let adept_role = self.adept_of(shade.tag).and_then(|adept| mediator.state.role(adept));
			let role = match adept_role {
				Some(UnitRole::MapControl) => UnitRole::MapControl,
				_ => UnitRole::ShadeHarass,
			};
			if mediator.state.role(shade.tag) != Some(role) {
				out.assign_role(shade.tag, role);
			}
		}
	}

	/// Where harassing adepts and their shades go.
	fn harass_targets(&mut self, mediator: &Mediator, adepts: &Units) {
		let config = &self.config;
		let map = mediator.map();
		let units = &mediator.units().my.units;

		if mediator.time() < config.adept_hold_time {
			let shade_spot = map.main_ramp_top.towards(map.start_location, 6.0);
			for adept in adepts {
				self.adept_targets.insert(adept.tag, map.main_ramp_top);
				if let Some(shade) = self.shade_of(adept.tag).filter(|s| units.contains_tag(*s)) {
					self.shade_targets.insert(shade, shade_spot);
				}
			}
			return;
		}

		let search = least_defended_base(mediator, adepts, config.base_defenders_radius);
		let secondary = secondary_base(mediator, search.least_defended, &search.candidates, GridKind::Ground);
		let single_target = secondary == search.least_defended;
		let primary = map.behind_mineral_position(search.least_defended);
		let secondary = map.behind_mineral_position(secondary);

		for adept in adepts {
			let shade = self.shade_of(adept.tag).filter(|s| units.contains_tag(*s));
			let (adept_target, shade_target) = if single_target {
				if adept.distance_squared(primary) > config.single_target_sq
					|| search.outcome >= config.shade_commit_threshold
				{
					(primary, primary)
				} else {
					(primary, map.start_location)
				}
			} else if adept.distance_squared(primary) < config.single_target_sq {
				(primary, primary)
			} else if adept.distance_squared(secondary) < config.single_target_sq {
				(secondary, primary)
			} else {
				(primary, primary)
			};
			self.adept_targets.insert(adept.tag, adept_target);
			if let Some(shade) = shade {
				self.shade_targets.insert(shade, shade_target);
			}
		}
	}

	fn map_control(&mut self, mediator: &Mediator, adepts: &Units, shades: &Units, out: &mut Commander) {
		let config = &self.config;
		let map = mediator.map();
		if self.shade_cycle.is_empty() {
			let mut spots = vec![map.enemy_start];
			spots.extend(map.enemy_expansions.iter().skip(1).take(3).copied());
			self.shade_cycle = WaypointCycle::new(spots);
		}
		let shade_target = self
			.shade_cycle
			.update_with(|p| mediator.is_visible(p))
			.unwrap_or(map.enemy_start);

		let enemies = enemy_snapshot(mediator, adepts, config.map_control_enemy_range, QueryTree::EnemyGround);
		MapControlAdepts {
			enemies: &enemies,
			shade_target,
			rally: map.enemy_natural,
		}
		.execute(adepts, mediator, out);
		MapControlShades { config }.execute(shades, mediator, out);
	}
}

impl Manager for AdeptManager {
	fn update(&mut self, mediator: &Mediator, out: &mut Commander) -> CombatResult<()> {
		let own = &mediator.units().my.units;
		let adepts = own.of_type(UnitTypeId::Adept);
		let shades = own.of_type(UnitTypeId::AdeptPhaseShift);
		self.prune(&shades);
		if adepts.is_empty() {
			return Ok(());
		}

		self.link_shades(&adepts, &shades);
		self.assign_roles(mediator, &adepts, &shades, out);
		let cancel = self.cancel_decisions(mediator);

		let with_role = |units: &Units, role: UnitRole| units.filter(|u| mediator.state.role(u.tag) == Some(role));
		let map_control_adepts = with_role(&adepts, UnitRole::MapControl);
		let map_control_shades = with_role(&shades, UnitRole::MapControl);
		if !map_control_adepts.is_empty() || !map_control_shades.is_empty() {
			self.map_control(mediator, &map_control_adepts, &map_control_shades, out);
		}

		let harassing = with_role(&adepts, UnitRole::AdeptHarass);
		let harass_shades = with_role(&shades, UnitRole::ShadeHarass);
		self.adept_targets.retain(|tag, _| harassing.contains_tag(*tag));
		if harassing.is_empty() {
			return Ok(());
		}
		self.harass_targets(mediator, &harassing);

		let config = &self.config;
		let default = mediator.map().enemy_start;
		let enemies = enemy_snapshot(mediator, &harassing, config.adept_enemy_range, QueryTree::EnemyGround);
		AdeptHarass {
			config,
			enemies: &enemies,
			targets: &self.adept_targets,
			default,
		}
		.execute(&harassing, mediator, out);
		AdeptShadeHarass {
			cancel: &cancel,
			targets: &self.shade_targets,
			default,
		}
		.execute(&harass_shades, mediator, out);
		Ok(())
	}

	fn name(&self) -> &'static str {
		"AdeptManager"
	}
}
