//! Garage Door
//!
//! A single push button whose behavior depends on where the door is.
//!
//! Key concepts:
//! - State-dependent methods with a fallback
//! - Entry and exit hooks, plus a hook on every transition
//! - Introspection of available events
//!
//! Run with: RUST_LOG=debug cargo run --example garage_door

use fsmate::builder::{simple_transition, MachineBuilder};
use fsmate::core::{Action, State, TransitionInfo};
use fsmate::machine::{MachineInstance, StateMethod};
use fsmate::{event_enum, state_enum};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

state_enum! {
    enum Door {
        Closed,
        Opening,
        Opened,
        Closing,
    }
}

event_enum! {
    enum Motor {
        StartOpening,
        FinishOpening,
        StartClosing,
        FinishClosing,
    }
}

type Garage = MachineInstance<Door, Motor, Vec<String>>;

fn log(line: &'static str) -> Action<Door, Motor, Vec<String>> {
    Action::infallible(move |log: &mut Vec<String>, _: &()| log.push(line.to_string()))
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Garage Door ===\n");

    let definition = Arc::new(
        MachineBuilder::new()
            .states([Door::Closed, Door::Opening, Door::Opened, Door::Closing])
            .initial(Door::Closed)
            .transitions([
                simple_transition(Door::Closed, Motor::StartOpening, Door::Opening),
                simple_transition(Door::Opening, Motor::FinishOpening, Door::Opened),
                simple_transition(Door::Opened, Motor::StartClosing, Door::Closing),
                simple_transition(Door::Closing, Motor::FinishClosing, Door::Closed),
            ])
            .on_enter(Door::Opening, log("light on"))
            .on_exit(Door::Closing, log("light off"))
            .on_transition(Action::with_transition(|log: &mut Vec<String>, _: &(), t: &TransitionInfo<'_, Door, Motor>| {
                log.push(format!("{} -> {}", t.from.name(), t.to.name()));
                Ok(())
            }))
            .build()
            .expect("garage definition is valid"),
    );

    let push_button = StateMethod::builder(|door: &mut Garage, ()| {
        door.context_mut().push("beep".to_string());
    })
    .overload([Door::Closed], |door: &mut Garage, ()| {
        door.fire(&Motor::StartOpening).expect("hooks cannot fail");
    })
    .overload([Door::Opened], |door: &mut Garage, ()| {
        door.fire(&Motor::StartClosing).expect("hooks cannot fail");
    })
    .build(&definition)
    .expect("overloads reference declared states");

    let mut door = MachineInstance::new(definition, Vec::new());

    let script: [(&str, Option<Motor>); 6] = [
        ("press button", None),
        ("press button", None),
        ("sensor: fully open", Some(Motor::FinishOpening)),
        ("press button", None),
        ("sensor: fully closed", Some(Motor::FinishClosing)),
        ("press button", None),
    ];

    for (label, sensor) in script {
        match sensor {
            Some(event) => {
                door.fire(&event).expect("hooks cannot fail");
            }
            None => push_button.call(&mut door, ()),
        }
        println!(
            "{label:<22} -> {:<8} available: {:?}",
            door.current_state().name(),
            door.available_events()
        );
    }

    println!("\nLog: {:?}", door.context());
    println!("Path: {:?}", door.history().get_path());
    println!("\n=== Example Complete ===");
}
