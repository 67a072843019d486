//! Job Runner
//!
//! A batch job driven by events carrying payloads.
//!
//! Key concepts:
//! - Guards over the event payload
//! - Transactional dispatch: a failing action rolls everything back
//! - Snapshot to JSON and restore
//!
//! Run with: RUST_LOG=fsmate=debug cargo run --example job_runner

use fsmate::builder::{MachineBuilder, TransitionBuilder};
use fsmate::checkpoint::Snapshot;
use fsmate::core::{Action, ActionError, State};
use fsmate::machine::{MachineInstance, TransitionOutcome};
use fsmate::state_enum;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

state_enum! {
    enum Job {
        Idle,
        Running,
        Done,
        Failed,
    }
    final: [Done, Failed]
    error: [Failed]
}

#[derive(Debug, Default)]
struct Update {
    ok: bool,
    output: Option<String>,
}

#[derive(Clone, Debug, Default)]
struct Workspace {
    attempts: u32,
    results: Vec<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Job Runner ===\n");

    let definition = Arc::new(
        MachineBuilder::<Job, &str, Workspace, Update>::new()
            .states([Job::Idle, Job::Running, Job::Done, Job::Failed])
            .initial(Job::Idle)
            .transition(
                TransitionBuilder::new()
                    .from(Job::Idle)
                    .on("start")
                    .to(Job::Running)
                    .run(|ws: &mut Workspace, _| {
                        ws.attempts += 1;
                        Ok(())
                    }),
            )
            .expect("start transition is complete")
            .transition(
                TransitionBuilder::new()
                    .from(Job::Running)
                    .on("finish")
                    .to(Job::Done)
                    .when(|_, update: &Update| update.ok)
                    .action(Action::named("store output", |ws: &mut Workspace, update: &Update| {
                        let output = update
                            .output
                            .clone()
                            .ok_or_else(|| ActionError::new("finished without output"))?;
                        ws.results.push(output);
                        Ok(())
                    })),
            )
            .expect("finish transition is complete")
            .transition(
                TransitionBuilder::new()
                    .from(Job::Running)
                    .on("finish")
                    .to(Job::Failed),
            )
            .expect("failure transition is complete")
            .build()
            .expect("job definition is valid"),
    );

    let mut job = MachineInstance::new(Arc::clone(&definition), Workspace::default());
    report("start", job.fire(&"start"));

    println!("\nSnapshotting while running...");
    let json = job
        .snapshot()
        .to_json()
        .expect("snapshot serializes");
    println!("  {json}\n");

    let missing_output = Update {
        ok: true,
        output: None,
    };
    report("finish (no output)", job.dispatch(&"finish", &missing_output));
    println!("  still {} after rollback", job.current_state().name());

    let success = Update {
        ok: true,
        output: Some("42 rows".to_string()),
    };
    report("finish (ok)", job.dispatch(&"finish", &success));
    println!(
        "  results: {:?} after {} start(s)",
        job.context().results,
        job.context().attempts
    );

    println!("\nRestoring the snapshot into a fresh workspace...");
    let snapshot = Snapshot::from_json(&json).expect("snapshot deserializes");
    let mut resumed = MachineInstance::restore(definition, snapshot, Workspace::default())
        .expect("snapshot matches definition");
    report(
        "finish (failed)",
        resumed.dispatch(&"finish", &Update::default()),
    );
    println!(
        "  resumed instance {} ended in {:?}",
        resumed.id(),
        resumed.current_state()
    );

    println!("\n=== Example Complete ===");
}

fn report<E: std::fmt::Display>(label: &str, result: Result<TransitionOutcome<Job>, E>) {
    match result {
        Ok(TransitionOutcome::Accepted { from, to }) => {
            println!("{label:<20} accepted {} -> {}", from.name(), to.name())
        }
        Ok(TransitionOutcome::Rejected(rejection)) => println!("{label:<20} rejected: {rejection}"),
        Err(error) => println!("{label:<20} error: {error}"),
    }
}
