//! Tunable constants of combat decisions.
//!
//! Only relative order of hysteresis pairs is load-bearing, the rest are empirically chosen values.
//! Distances ending with `_sq` are squared.

use crate::engagement::{EngagementOutcome, EngagementThresholds, ThresholdError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
	// Main army
	pub squad_engage: EngagementOutcome,
	pub squad_disengage: EngagementOutcome,
	pub aggression_on: EngagementOutcome,
	pub aggression_off: EngagementOutcome,
	pub squad_radius: f32,
	pub squad_enemy_range: f32,
	/// Own units this close to enemy center are counted in squad fight.
	pub own_near_enemy_sq: f32,
	pub army_mass_radius: f32,
	pub army_near_mass_sq: f32,
	/// Shields and health fraction below which ground units retreat.
	pub ground_health_gate: f32,
	pub flying_health_gate: f32,
	/// Units with shorter range a-move instead of stutter stepping.
	pub stutter_min_range: f32,
	pub rush_rally_time: f32,
	pub rush_engage_time: f32,
	/// Defending squads this far from attack point fight anything near.
	pub always_fight_sq: f32,
	pub townhall_threat_range: f32,
	pub path_success_distance: f32,
	pub retreat_path_success_distance: f32,

	// Attack point
	pub center_mass_distance: f32,
	/// Own and enemy army centers this close make enemy army the attack point.
	pub mass_near_sq: f32,
	pub enemy_mass_range: f32,
	pub enemy_mass_supply: f32,

	// Squad target switching
	pub switch_min_sq: f32,
	pub revert_near_sq: f32,
	pub alternative_empty_sq: f32,

	// Adept harass
	pub companion_long_cast: u32,
	pub companion_radius: f32,
	pub companion_worker_count: usize,
	pub adept_enemy_range: f32,
	pub adept_fight_radius: f32,
	pub adept_fight_threshold: EngagementOutcome,
	pub base_defenders_radius: f32,
	pub single_target_sq: f32,
	pub shade_commit_threshold: EngagementOutcome,
	/// Adepts stay at home ramp until this time.
	pub adept_hold_time: f32,

	// Phoenix harass
	pub phoenix_engage: EngagementOutcome,
	pub phoenix_disengage: EngagementOutcome,
	pub phoenix_own_range: f32,
	pub phoenix_enemy_range: f32,
	pub phoenix_near_range: f32,
	pub phoenix_target_radius: f32,
	pub phoenix_shield_gate: f32,
	pub lift_support: usize,
	pub phoenix_regroup_distance: f32,

	// Worker defence
	pub defender_min_health: f32,
	pub max_defenders: usize,
	pub defender_release_sq: f32,
	pub proxy_sq: f32,
	pub worker_defence_max_army: f32,
	pub defender_enemy_range: f32,
	pub worker_fight_size: usize,
	/// Enemy workers this close to start location trigger mineral stacking.
	pub stack_trigger_range: f32,
	/// Stacking stops once enemy workers are this close to defenders.
	pub stack_engage_range: f32,
	/// Mineral fields this close to start location belong to main base.
	pub main_mineral_range: f32,

	// Map control
	pub vantage_min_enemy_distance: f32,
	pub voidray_push_time: f32,
	pub voidray_enemy_range: f32,
	pub voidray_range: f32,
	pub enemy_near_spawn_sq: f32,
	pub shade_cancel_buff: u32,
	pub shade_travel_sq: f32,
	pub map_control_enemy_range: f32,
	pub observer_hunt_sq: f32,
}
impl Default for CombatConfig {
	fn default() -> Self {
		use EngagementOutcome::*;
		Self {
			squad_engage: VictoryMarginal,
			squad_disengage: LossOverwhelming,
			aggression_on: VictoryMarginal,
			aggression_off: LossEmphatic,
			squad_radius: 9.0,
			squad_enemy_range: 18.5,
			own_near_enemy_sq: 240.0,
			army_mass_radius: 12.0,
			army_near_mass_sq: 150.0,
			ground_health_gate: 0.25,
			flying_health_gate: 0.2,
			stutter_min_range: 3.0,
			rush_rally_time: 240.0,
			rush_engage_time: 330.0,
			always_fight_sq: 900.0,
			townhall_threat_range: 18.0,
			path_success_distance: 6.5,
			retreat_path_success_distance: 14.0,

			center_mass_distance: 10.0,
			mass_near_sq: 450.0,
			enemy_mass_range: 11.5,
			enemy_mass_supply: 18.0,

			switch_min_sq: 312.0,
			revert_near_sq: 144.0,
			alternative_empty_sq: 256.0,

			companion_long_cast: 10,
			companion_radius: 11.0,
			companion_worker_count: 4,
			adept_enemy_range: 15.0,
			adept_fight_radius: 11.0,
			adept_fight_threshold: VictoryDecisive,
			base_defenders_radius: 16.0,
			single_target_sq: 400.0,
			shade_commit_threshold: VictoryClose,
			adept_hold_time: 280.0,

			phoenix_engage: VictoryEmphatic,
			phoenix_disengage: LossMarginal,
			phoenix_own_range: 10.5,
			phoenix_enemy_range: 16.5,
			phoenix_near_range: 12.0,
			phoenix_target_radius: 11.0,
			phoenix_shield_gate: 0.1,
			lift_support: 3,
			phoenix_regroup_distance: 8.0,

			defender_min_health: 0.34,
			max_defenders: 16,
			defender_release_sq: 2400.0,
			proxy_sq: 2304.0,
			worker_defence_max_army: 8.0,
			defender_enemy_range: 15.0,
			worker_fight_size: 6,
			stack_trigger_range: 40.0,
			stack_engage_range: 6.0,
			main_mineral_range: 10.0,

			vantage_min_enemy_distance: 70.0,
			voidray_push_time: 295.0,
			voidray_enemy_range: 12.0,
			voidray_range: 6.0,
			enemy_near_spawn_sq: 3600.0,
			shade_cancel_buff: 4,
			shade_travel_sq: 630.0,
			map_control_enemy_range: 12.0,
			observer_hunt_sq: 300.0,
		}
	}
}
impl CombatConfig {
	pub fn squad_thresholds(&self) -> Result<EngagementThresholds, ThresholdError> {
		EngagementThresholds::new(self.squad_engage, self.squad_disengage)
	}
	pub fn aggression_thresholds(&self) -> Result<EngagementThresholds, ThresholdError> {
		EngagementThresholds::new(self.aggression_on, self.aggression_off)
	}
	pub fn phoenix_thresholds(&self) -> Result<EngagementThresholds, ThresholdError> {
		EngagementThresholds::new(self.phoenix_engage, self.phoenix_disengage)
	}
	/// Checks every hysteresis pair has engage threshold strictly above disengage one.
	pub fn validate(&self) -> Result<(), ThresholdError> {
		self.squad_thresholds()?;
		self.aggression_thresholds()?;
		self.phoenix_thresholds()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		assert!(CombatConfig::default().validate().is_ok());
	}

	#[test]
	fn inverted_pair_rejected() {
		let config = CombatConfig {
			phoenix_engage: EngagementOutcome::LossMarginal,
			phoenix_disengage: EngagementOutcome::VictoryEmphatic,
			..Default::default()
		};
		let err = config.validate().unwrap_err();
		assert_eq!(err.engage, EngagementOutcome::LossMarginal);
	}
}
