use sc2_combat::{engagement::EngagementOutcome, ids::BuffId, sc2_macro::ParseEnumError};

#[test]
fn check_outcome_err() {
	assert_eq!("VictoryHuge".parse::<EngagementOutcome>(), Err(ParseEnumError));
	assert!("EngagementOutcome::Tie".parse::<EngagementOutcome>().is_err());
	assert_eq!("11".parse::<EngagementOutcome>(), Err(ParseEnumError));
	assert_eq!("-1".parse::<EngagementOutcome>(), Err(ParseEnumError));
}
#[test]
fn check_outcome_ok() {
	assert_eq!("VictoryMarginal".parse::<EngagementOutcome>(), Ok(EngagementOutcome::VictoryMarginal));
	assert_eq!("loss_emphatic".parse::<EngagementOutcome>(), Ok(EngagementOutcome::LossEmphatic));
	assert_eq!(" Tie ".parse::<EngagementOutcome>(), Ok(EngagementOutcome::Tie));
}
#[test]
fn check_outcome_primitives() {
	assert_eq!("0".parse::<EngagementOutcome>(), Ok(EngagementOutcome::LossEmphatic));
	assert_eq!("5".parse::<EngagementOutcome>(), Ok(EngagementOutcome::Tie));
	assert_eq!("10".parse::<EngagementOutcome>(), Ok(EngagementOutcome::VictoryEmphatic));
}
#[test]
fn outcomes_are_ordered() {
	assert!(EngagementOutcome::LossEmphatic < EngagementOutcome::LossMarginal);
	assert!(EngagementOutcome::Tie < EngagementOutcome::VictoryMarginal);
	assert!(EngagementOutcome::VictoryDecisive.is_victory_decisive());
}
#[test]
fn check_buff_names() {
	assert_eq!("AdeptPhaseShift".parse::<BuffId>(), Ok(BuffId::AdeptPhaseShift));
	assert_eq!("graviton_beam".parse::<BuffId>(), Ok(BuffId::GravitonBeam));
	assert_eq!("249".parse::<BuffId>(), Ok(BuffId::AdeptPhaseShift));
	assert!("NotABuff".parse::<BuffId>().is_err());
}
