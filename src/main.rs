//! buildline - CLI for descriptor-driven build tasks
//!
//! A command-line front end over the buildline library: validate project
//! descriptors, inspect the task plans they produce, check required
//! environment variables and execute individual tasks.
//!
//! ## Commands
//!
//! - `buildline check` - Validate a project descriptor
//! - `buildline tasks` - List the tasks a descriptor produces
//! - `buildline run` - Execute a single task by name
//! - `buildline env` - Report missing required environment variables
//!
//! ## Quick Start
//!
//! ```bash
//! # Validate a descriptor
//! buildline check project.json
//!
//! # See what it resolves to
//! buildline tasks project.json --watch
//!
//! # Run the build
//! buildline run project.json build
//!
//! # Gate a CI step on required variables
//! buildline env project.json
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    // Initialize tracing for debugging
    if std::env::var("BUILDLINE_DEBUG").is_ok() {
        buildline::init_logging("debug");
    }

    // Run the CLI
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if std::env::var("BUILDLINE_VERBOSE").is_ok() {
                eprintln!("{:?}", e);
            }
            ExitCode::FAILURE
        }
    }
}
