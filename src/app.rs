//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or synthesizes experiment requests
//! - runs the fit pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{BatchArgs, Command, DemoArgs, FitArgs};
use crate::error::AppError;
use crate::task::{TaskQueue, TaskStatus};

pub mod pipeline;

/// Entry point for the `labfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
        Command::Batch(args) => handle_batch(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let request = crate::io::read_request_json(&args.request)?;
    let output = pipeline::run_request(&request)?;

    println!("{}", crate::report::format_run_summary(&output));

    pipeline::write_exports(&output, &args.export)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let request = crate::data::demo_request(args.experiment, args.seed);
    if let Some(path) = &args.save_request {
        crate::io::write_request_json(path, &request)?;
    }

    let output = pipeline::run_request(&request)?;

    println!("{}", crate::report::format_run_summary(&output));

    pipeline::write_exports(&output, &args.export)
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let queue = TaskQueue::new();

    // Submit everything up front; the queue fans the work out to worker
    // threads and each submission returns its task id immediately.
    let mut ids = Vec::with_capacity(args.requests.len());
    for path in &args.requests {
        let request = crate::io::read_request_json(path)?;
        ids.push(queue.submit(request));
    }

    // Poll in submission order so the report matches the argument order.
    let mut records = Vec::with_capacity(ids.len());
    for id in &ids {
        if let Some(record) = queue.wait(id) {
            records.push(record);
        }
    }

    println!("{}", crate::report::format_task_summary(&records));

    let failed = records
        .iter()
        .filter(|record| record.status == TaskStatus::Failed)
        .count();
    if failed > 0 {
        return Err(AppError::new(
            3,
            format!("{failed} of {} task(s) failed.", records.len()),
        ));
    }
    Ok(())
}
