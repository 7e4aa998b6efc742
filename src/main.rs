// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod aggregate;
mod api;
mod cli;
mod config;
mod fetch;
mod report;
mod runner;
mod sprint;
mod types;
mod ui;

#[cfg(test)]
mod test_support;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Resolve config file, environment and flags up front
    let settings = match config::load_settings(&args) {
        Ok(s) => s,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    // A failed connection halts the run; nothing useful can happen without it
    ui::status(&format!("Connecting to {}", settings.tracker.url));
    let client = match api::JiraClient::connect(&settings.tracker) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Failed to connect to {}: {}", settings.tracker.url, e));
            std::process::exit(1);
        }
    };

    match runner::run_report(&client, &settings) {
        Ok(summary) => ui::print_summary(&summary),
        Err(e) => {
            ui::print_error(&format!("Report generation failed: {}", e));
            std::process::exit(1);
        }
    }
}
