mod app;
mod cli;
mod color;
mod query;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use app::SurveyFilterApp;
use clap::Parser;
use cli::{Cli, Command};
use eframe::egui;
use state::AppState;
use survey_filter::config::AppConfig;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::resolve(cli.config.as_deref(), cli.data)?;
    match cli.command.unwrap_or(Command::View) {
        Command::View => run_viewer(config),
        Command::Query(args) => query::run(&config, &args),
    }
}

fn run_viewer(config: AppConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(config.data_path);
    eframe::run_native(
        "Survey Response Filter",
        options,
        Box::new(|_cc| Ok(Box::new(SurveyFilterApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
