// Character state tree
//
// grounded (idle | walking | hiding | running | back*) | jumping | stepping (down | up)
//
// `back` is the history of `grounded`. `running` plays nothing on entry
// and `stepping` has no initial child: every transition into it names
// `down` or `up` explicitly.

use super::animation::MovementAnimation;
use super::movement::MovementEvent;
use crate::engine::hsm::{MachineDefinition, StateNode};

pub const CHARACTER_MACHINE_ID: &str = "character";

pub const START_IDLE: &str = "startIdle";
pub const START_WALKING: &str = "startWalking";
pub const START_HIDING: &str = "startHiding";
pub const START_JUMPING: &str = "startJumping";
pub const STAIRS_DOWN: &str = "stairsDown";
pub const STAIRS_UP: &str = "stairsUp";

/// Entry action name -> animation it plays on the character and its lantern
pub const ENTRY_ANIMATIONS: [(&str, MovementAnimation); 6] = [
    (START_IDLE, MovementAnimation::Idle),
    (START_WALKING, MovementAnimation::Walk),
    (START_HIDING, MovementAnimation::Hide),
    (START_JUMPING, MovementAnimation::Jump),
    (STAIRS_DOWN, MovementAnimation::StairsDown),
    (STAIRS_UP, MovementAnimation::StairsUp),
];

/// The state tree driving a player character
pub fn character_definition() -> MachineDefinition {
    use MovementEvent::*;

    let grounded = StateNode::new("grounded")
        .initial("idle")
        .on(Walk.as_str(), ".walking")
        .on(Run.as_str(), ".running")
        .on(Hide.as_str(), ".hiding")
        .on(Jump.as_str(), "jumping")
        .on(StepDown.as_str(), "stepping.down")
        .on(StepUp.as_str(), "stepping.up")
        .child(StateNode::new("idle").entry(START_IDLE))
        .child(
            StateNode::new("walking")
                .entry(START_WALKING)
                .on(Stop.as_str(), "idle"),
        )
        .child(
            StateNode::new("hiding")
                .entry(START_HIDING)
                .on(Stop.as_str(), "idle"),
        )
        .child(StateNode::new("running"))
        .child(StateNode::history("back"));

    let jumping = StateNode::new("jumping")
        .entry(START_JUMPING)
        .on(Grounded.as_str(), "grounded.back");

    let stepping = StateNode::new("stepping")
        .on(Grounded.as_str(), "grounded")
        .child(
            StateNode::new("down")
                .entry(STAIRS_DOWN)
                .on(StepUp.as_str(), "up"),
        )
        .child(
            StateNode::new("up")
                .entry(STAIRS_UP)
                .on(StepDown.as_str(), "down"),
        );

    MachineDefinition::new(
        CHARACTER_MACHINE_ID,
        StateNode::new(CHARACTER_MACHINE_ID)
            .initial("grounded")
            .child(grounded)
            .child(jumping)
            .child(stepping),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hsm::{Dispatch, StateMachine, StatePath};
    use proptest::prelude::*;

    /// Records the animations entry actions would play
    #[derive(Debug, Default)]
    struct Played(Vec<MovementAnimation>);

    fn start(played: &mut Played) -> StateMachine<Played> {
        let mut builder = StateMachine::builder(character_definition());
        for (action, animation) in ENTRY_ANIMATIONS {
            builder = builder.action(action, move |played: &mut Played, _event: &str| {
                played.0.push(animation)
            });
        }
        builder.start(played).unwrap()
    }

    fn send(machine: &mut StateMachine<Played>, played: &mut Played, event: MovementEvent) -> Dispatch {
        machine.dispatch(played, event.as_str()).unwrap()
    }

    #[test]
    fn test_definition_is_valid() {
        assert!(character_definition().validate().is_ok());
    }

    #[test]
    fn test_starts_idle() {
        let mut played = Played::default();
        let machine = start(&mut played);
        assert_eq!(machine.state(), &StatePath::from("grounded.idle"));
        assert_eq!(played.0, vec![MovementAnimation::Idle]);
    }

    #[test]
    fn test_walk_then_stop() {
        let mut played = Played::default();
        let mut machine = start(&mut played);

        send(&mut machine, &mut played, MovementEvent::Walk);
        assert_eq!(machine.state(), &StatePath::from("grounded.walking"));

        send(&mut machine, &mut played, MovementEvent::Stop);
        assert_eq!(machine.state(), &StatePath::from("grounded.idle"));
        assert_eq!(
            played.0,
            vec![
                MovementAnimation::Idle,
                MovementAnimation::Walk,
                MovementAnimation::Idle
            ]
        );
    }

    #[test]
    fn test_stop_in_idle_is_ignored() {
        let mut played = Played::default();
        let mut machine = start(&mut played);
        assert_eq!(send(&mut machine, &mut played, MovementEvent::Stop), Dispatch::Ignored);
    }

    #[test]
    fn test_repeated_walk_reenters_nothing() {
        let mut played = Played::default();
        let mut machine = start(&mut played);
        send(&mut machine, &mut played, MovementEvent::Walk);
        played.0.clear();

        send(&mut machine, &mut played, MovementEvent::Walk);
        assert_eq!(machine.state(), &StatePath::from("grounded.walking"));
        assert!(played.0.is_empty());
    }

    #[test]
    fn test_running_plays_nothing() {
        let mut played = Played::default();
        let mut machine = start(&mut played);
        played.0.clear();

        send(&mut machine, &mut played, MovementEvent::Run);
        assert_eq!(machine.state(), &StatePath::from("grounded.running"));
        assert!(played.0.is_empty());
    }

    #[test]
    fn test_jump_returns_through_history() {
        let mut played = Played::default();
        let mut machine = start(&mut played);
        send(&mut machine, &mut played, MovementEvent::Hide);
        send(&mut machine, &mut played, MovementEvent::Jump);
        assert_eq!(machine.state(), &StatePath::from("jumping"));
        played.0.clear();

        send(&mut machine, &mut played, MovementEvent::Grounded);
        assert_eq!(machine.state(), &StatePath::from("grounded.hiding"));
        assert_eq!(played.0, vec![MovementAnimation::Hide]);
    }

    #[test]
    fn test_stepping_switches_direction() {
        let mut played = Played::default();
        let mut machine = start(&mut played);

        send(&mut machine, &mut played, MovementEvent::StepDown);
        assert_eq!(machine.state(), &StatePath::from("stepping.down"));
        send(&mut machine, &mut played, MovementEvent::StepUp);
        assert_eq!(machine.state(), &StatePath::from("stepping.up"));
        assert_eq!(
            send(&mut machine, &mut played, MovementEvent::Jump),
            Dispatch::Ignored
        );
    }

    #[test]
    fn test_grounded_from_stepping_uses_initial() {
        let mut played = Played::default();
        let mut machine = start(&mut played);
        send(&mut machine, &mut played, MovementEvent::Walk);
        send(&mut machine, &mut played, MovementEvent::StepUp);

        send(&mut machine, &mut played, MovementEvent::Grounded);
        assert_eq!(machine.state(), &StatePath::from("grounded.idle"));
    }

    proptest! {
        #[test]
        fn prop_unknown_events_change_nothing(
            steps in prop::collection::vec(0usize..8, 0..10),
            event in "[a-z_]{1,12}",
        ) {
            const EVENTS: [MovementEvent; 8] = [
                MovementEvent::Walk,
                MovementEvent::Stop,
                MovementEvent::Run,
                MovementEvent::Hide,
                MovementEvent::Jump,
                MovementEvent::Grounded,
                MovementEvent::StepUp,
                MovementEvent::StepDown,
            ];
            let mut played = Played::default();
            let mut machine = start(&mut played);
            for step in steps {
                send(&mut machine, &mut played, EVENTS[step]);
            }
            let before = machine.runtime().clone();
            played.0.clear();

            // Lowercase names never match the upper-case event names
            let outcome = machine.dispatch(&mut played, &event).unwrap();
            prop_assert_eq!(outcome, Dispatch::Ignored);
            prop_assert_eq!(machine.runtime(), &before);
            prop_assert!(played.0.is_empty());
        }
    }
}
