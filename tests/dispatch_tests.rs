//! End-to-end dispatch scenarios.

use fsmate::builder::{MachineBuilder, TransitionBuilder};
use fsmate::checkpoint::{Snapshot, SnapshotError};
use fsmate::core::{Action, ActionError, Event, Guard, State};
use fsmate::machine::{
    ActionPhase, DispatchError, MachineDefinition, MachineInstance, Rejection, StateMethod,
    TransitionOutcome,
};
use fsmate::{event_enum, state_enum};
use std::error::Error;
use std::sync::Arc;

state_enum! {
    enum Job {
        Idle,
        Running,
        Done,
        Cancelled,
    }
    final: [Done, Cancelled]
}

event_enum! {
    enum JobEvent {
        Start,
        Finish,
        Cancel,
        Heartbeat,
    }
}

#[derive(Debug, Default)]
struct Report {
    ok: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Journal {
    entries: Vec<String>,
    heartbeats: u32,
}

fn write(entry: &'static str) -> Action<Job, JobEvent, Journal, Report> {
    Action::named(entry, move |journal: &mut Journal, _: &Report| {
        journal.entries.push(entry.to_string());
        Ok(())
    })
}

fn jobs() -> Arc<MachineDefinition<Job, JobEvent, Journal, Report>> {
    Arc::new(
        MachineBuilder::new()
            .states([Job::Idle, Job::Running, Job::Done, Job::Cancelled])
            .initial(Job::Idle)
            .transition(
                TransitionBuilder::new()
                    .from(Job::Idle)
                    .on(JobEvent::Start)
                    .to(Job::Running)
                    .action(write("started")),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .from(Job::Running)
                    .on(JobEvent::Finish)
                    .to(Job::Done)
                    .guard(Guard::on_payload(|report: &Report| report.ok))
                    .action(write("finished")),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .from_any([Job::Idle, Job::Running])
                    .on(JobEvent::Cancel)
                    .to(Job::Cancelled),
            )
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .from(Job::Running)
                    .on(JobEvent::Heartbeat)
                    .to(Job::Running)
                    .run(|journal: &mut Journal, _| {
                        journal.heartbeats += 1;
                        Ok(())
                    }),
            )
            .unwrap()
            .on_enter(Job::Running, write("enter running"))
            .on_exit(Job::Running, write("exit running"))
            .build()
            .unwrap(),
    )
}

#[test]
fn job_lifecycle() {
    let mut job = MachineInstance::new(jobs(), Journal::default());

    assert_eq!(
        job.dispatch(&JobEvent::Start, &Report::default()).unwrap(),
        TransitionOutcome::Accepted {
            from: Job::Idle,
            to: Job::Running
        }
    );
    assert_eq!(
        job.dispatch(&JobEvent::Finish, &Report { ok: false }).unwrap(),
        TransitionOutcome::Rejected(Rejection::AllGuardsFailed)
    );
    assert_eq!(
        job.dispatch(&JobEvent::Finish, &Report { ok: true }).unwrap(),
        TransitionOutcome::Accepted {
            from: Job::Running,
            to: Job::Done
        }
    );

    assert!(job.is_final());
    assert_eq!(
        job.context().entries,
        vec!["started", "enter running", "exit running", "finished"]
    );
    assert_eq!(
        job.history().get_path(),
        vec![&Job::Idle, &Job::Running, &Job::Done]
    );
}

#[test]
fn final_state_rejects_everything() {
    let mut job = MachineInstance::new(jobs(), Journal::default());
    job.fire(&JobEvent::Cancel).unwrap();

    assert!(job.available_events().is_empty());
    for event in [JobEvent::Start, JobEvent::Finish, JobEvent::Cancel] {
        assert_eq!(
            job.fire(&event).unwrap(),
            TransitionOutcome::Rejected(Rejection::NoMatchingTransition)
        );
    }
    assert_eq!(job.current_state(), &Job::Cancelled);
}

#[test]
fn cancel_fires_from_every_listed_state() {
    let definition = jobs();

    let mut idle = MachineInstance::new(Arc::clone(&definition), Journal::default());
    assert_eq!(
        idle.fire(&JobEvent::Cancel).unwrap().target(),
        Some(&Job::Cancelled)
    );

    let mut running = MachineInstance::new(definition, Journal::default());
    running.fire(&JobEvent::Start).unwrap();
    running.fire(&JobEvent::Cancel).unwrap();
    assert_eq!(running.current_state(), &Job::Cancelled);
    assert_eq!(running.context().entries.last().unwrap(), "exit running");
}

#[test]
fn self_transition_runs_both_hooks() {
    let mut job = MachineInstance::new(jobs(), Journal::default());
    job.fire(&JobEvent::Start).unwrap();

    let outcome = job.fire(&JobEvent::Heartbeat).unwrap();

    assert_eq!(
        outcome,
        TransitionOutcome::Accepted {
            from: Job::Running,
            to: Job::Running
        }
    );
    assert_eq!(job.context().heartbeats, 1);
    assert_eq!(
        job.context().entries,
        vec!["started", "enter running", "exit running", "enter running"]
    );
    assert_eq!(job.history().len(), 2);
}

#[test]
fn available_events_follow_declaration_order() {
    let mut job = MachineInstance::new(jobs(), Journal::default());
    assert_eq!(job.available_events(), vec![&JobEvent::Start, &JobEvent::Cancel]);

    job.fire(&JobEvent::Start).unwrap();
    assert_eq!(
        job.available_events(),
        vec![&JobEvent::Finish, &JobEvent::Cancel, &JobEvent::Heartbeat]
    );
}

#[test]
fn action_error_is_reported_with_context() {
    let definition = MachineBuilder::<Job, JobEvent, Journal>::new()
        .states([Job::Idle, Job::Running])
        .initial(Job::Idle)
        .transition(
            TransitionBuilder::new()
                .from(Job::Idle)
                .on(JobEvent::Start)
                .to(Job::Running)
                .action(Action::named("reserve worker", |_: &mut Journal, _: &()| {
                    let cause = std::io::Error::new(std::io::ErrorKind::Other, "pool exhausted");
                    Err(ActionError::with_source("no worker available", cause))
                })),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut job = MachineInstance::new(Arc::new(definition), Journal::default());

    let error = job.fire(&JobEvent::Start).unwrap_err();

    assert_eq!(error.phase(), ActionPhase::Transition);
    assert_eq!(error.action_index(), 0);
    assert_eq!(
        error.to_string(),
        "transition action #0 failed on 'Idle' --Start--> 'Running': no worker available"
    );
    let DispatchError::ActionFailed { action, source, .. } = &error;
    assert_eq!(action.as_deref(), Some("reserve worker"));
    assert_eq!(source.source().unwrap().to_string(), "pool exhausted");
    assert_eq!(error.source().unwrap().to_string(), "no worker available");

    // The instance is untouched, so a retry hits the same failure.
    assert_eq!(job.current_state(), &Job::Idle);
    assert!(job.fire(&JobEvent::Start).is_err());
}

#[test]
fn machine_wide_hooks_observe_every_transition() {
    let audit: Action<Job, JobEvent, Journal> =
        Action::<Job, JobEvent, Journal>::with_transition(|journal, _, t| {
            journal.entries.push(format!(
                "{} --{}--> {}",
                t.from.name(),
                t.event.name(),
                t.to.name()
            ));
            Ok(())
        })
        .with_name("audit");
    let definition = MachineBuilder::<Job, JobEvent, Journal>::new()
        .states([Job::Idle, Job::Running, Job::Cancelled])
        .initial(Job::Idle)
        .transition(
            TransitionBuilder::new()
                .from(Job::Idle)
                .on(JobEvent::Start)
                .to(Job::Running),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from(Job::Running)
                .on(JobEvent::Heartbeat)
                .to(Job::Running),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from_any([Job::Idle, Job::Running])
                .on(JobEvent::Cancel)
                .to(Job::Cancelled),
        )
        .unwrap()
        .on_transition(audit)
        .on_enter_any(Action::infallible(|journal: &mut Journal, _: &()| {
            journal.heartbeats += 1;
        }))
        .on_exit_any(Action::with_transition(|journal: &mut Journal, _: &(), t| {
            if t.is_self_transition() {
                journal.entries.push("stay".to_string());
            }
            Ok(())
        }))
        .build()
        .unwrap();
    let mut job = MachineInstance::new(Arc::new(definition), Journal::default());

    job.fire(&JobEvent::Start).unwrap();
    job.fire(&JobEvent::Heartbeat).unwrap();
    job.fire(&JobEvent::Cancel).unwrap();
    assert!(job.fire(&JobEvent::Start).unwrap().is_rejected());

    assert_eq!(
        job.context().entries,
        vec![
            "Idle --Start--> Running",
            "stay",
            "Running --Heartbeat--> Running",
            "Running --Cancel--> Cancelled",
        ]
    );
    assert_eq!(job.context().heartbeats, 3);
}

#[test]
fn history_can_be_disabled() {
    let definition = MachineBuilder::<Job, JobEvent, ()>::new()
        .states([Job::Idle, Job::Running])
        .initial(Job::Idle)
        .transition(
            TransitionBuilder::new()
                .from(Job::Idle)
                .on(JobEvent::Start)
                .to(Job::Running),
        )
        .unwrap()
        .without_history()
        .build()
        .unwrap();
    let mut job = MachineInstance::new(Arc::new(definition), ());

    job.fire(&JobEvent::Start).unwrap();

    assert_eq!(job.current_state(), &Job::Running);
    assert!(job.history().is_empty());
}

#[test]
fn snapshot_survives_binary_roundtrip() {
    let definition = jobs();
    let mut job = MachineInstance::new(Arc::clone(&definition), Journal::default());
    job.fire(&JobEvent::Start).unwrap();

    let bytes = job.snapshot().to_binary().unwrap();
    let snapshot = Snapshot::from_binary(&bytes).unwrap();
    let mut restored = MachineInstance::restore(definition, snapshot, job.context().clone()).unwrap();

    assert_eq!(restored.id(), job.id());
    assert_eq!(restored.context(), job.context());
    restored
        .dispatch(&JobEvent::Finish, &Report { ok: true })
        .unwrap();
    assert_eq!(restored.history().get_path(), vec![&Job::Idle, &Job::Running, &Job::Done]);
}

#[test]
fn snapshot_from_foreign_definition_is_refused() {
    let narrow = Arc::new(
        MachineBuilder::<Job, JobEvent, Journal, Report>::new()
            .states([Job::Idle])
            .initial(Job::Idle)
            .build()
            .unwrap(),
    );
    let mut job = MachineInstance::new(jobs(), Journal::default());
    job.fire(&JobEvent::Cancel).unwrap();

    let error = MachineInstance::restore(narrow, job.snapshot(), Journal::default()).unwrap_err();

    assert!(matches!(error, SnapshotError::UnknownState { ref state } if state == "Cancelled"));
}

#[test]
fn state_method_drives_the_machine() {
    let definition = jobs();
    let poke = StateMethod::builder(|_: &mut MachineInstance<Job, JobEvent, Journal, Report>, _: ()| {
        "ignored"
    })
    .overload([Job::Idle], |job, ()| {
        job.fire(&JobEvent::Start).unwrap();
        "started"
    })
    .overload([Job::Running], |job, ()| {
        job.fire(&JobEvent::Heartbeat).unwrap();
        "alive"
    })
    .build(&definition)
    .unwrap();
    let mut job = MachineInstance::new(definition, Journal::default());

    assert_eq!(poke.call(&mut job, ()), "started");
    assert_eq!(poke.call(&mut job, ()), "alive");
    assert_eq!(poke.call(&mut job, ()), "alive");
    job.fire(&JobEvent::Cancel).unwrap();
    assert_eq!(poke.call(&mut job, ()), "ignored");
    assert_eq!(job.context().heartbeats, 2);
}
