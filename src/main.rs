//! laws-tui - Ask questions about the laws of Westeros from the terminal
//!
//! This is the main entry point for the laws-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::Cli;
use crate::component::Component;
use crate::config::Config;
use crate::logging::LogConfig;
use crate::services::{QueryClient, QueryRunner};
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .or_else(Config::log_path)
        .unwrap_or_else(|| PathBuf::from("laws-tui.log"));
    logging::init_logging(&LogConfig::from_verbosity(cli.verbose, log_file))
        .context("failed to initialize logging")?;

    let config = cli.apply(Config::load_or_default(cli.config.as_deref()));

    if cli.save_config {
        let path = cli
            .config_target()
            .context("could not determine config path")?;
        config.save_to(&path)?;
        println!("Saved configuration to {}", path.display());
        return Ok(());
    }

    let client = QueryClient::new(&config.endpoint, config.request_timeout())
        .context("invalid endpoint configuration")?;
    info!(endpoint = %client.query_url(), "starting laws-tui");

    // Network requests run here; the UI loop stays on the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let runner = QueryRunner::new(client, runtime.handle().clone());

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    let mut app = App::new(runner);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw error");
            }
        })?;

        // Poll for events
        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Paste(text)) => app.handle_paste(&text),
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            _ => None,
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }

        // Ticks drive the loading animation and collect finished queries
        if last_tick.elapsed() >= tui.tick_rate {
            app.update(Action::Tick)?;
            last_tick = Instant::now();
        }
    }

    Ok(())
}
