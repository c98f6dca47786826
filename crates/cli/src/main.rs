use std::process::ExitCode;

use ac_time_cli::actions::{run_action, Action};
use ac_time_cli::cli_args::Args;
use ac_time_cli::selection;
use ac_time_core::api::ActiveCollab;
use ac_time_core::config::{self, Config, PasswordSource};
use ac_time_core::error::{Error, Result};
use ac_time_core::file_handling;
use clap::Parser;
use itertools::Itertools;
use log::{debug, error, info, warn};

/// Load the config file and resolve the password before anything talks to the API
fn load_config(args: &Args) -> Result<Config> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);

    let mut config_file = file_handling::get_config_file(&config_path)?;
    if let Some(target_weekly_hours) = args.target_weekly_hours {
        config_file.target_weekly_hours = Some(target_weekly_hours);
    }

    let password = match config_file.password_source(args.password_file.as_deref()) {
        PasswordSource::Inline(password) => password,
        PasswordSource::File(path) => {
            debug!("Reading password from `{}`", path);
            file_handling::read_password_file(&path)?
        }
        PasswordSource::Prompt => {
            selection::prompt_password(config_file.user.as_deref().unwrap_or_default())?
        }
    };

    Config::resolve(config_file, password)
}

fn connect(config: &Config) -> Result<ActiveCollab> {
    let mut api = ActiveCollab::new(config.clone())?;
    api.authenticate()?;

    match api.info() {
        Ok(server_info) => debug!("Server info: {server_info}"),
        Err(e) => warn!("Could not read server info: {e}"),
    }

    Ok(api)
}

fn requested_action(args: &Args) -> Result<Option<Action>> {
    let Some(action_name) = &args.action else {
        return Ok(None);
    };

    match Action::from_name(action_name) {
        Some(action) => Ok(Some(action)),
        None => {
            error!(
                "Available actions: {}",
                Action::ALL.iter().map(Action::name).sorted().join(", ")
            );
            Err(Error::UnknownChoice(action_name.clone()))
        }
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let requested = requested_action(&args)?;
    let config = load_config(&args)?;
    debug!("Loaded {config:?}");

    let api = connect(&config)?;

    if let Some(action) = requested {
        return run_action(action, &api, &config);
    }

    let completer = Action::completer();
    loop {
        let Some(action_name) = selection::select_text("Action", &completer)? else {
            info!("Action prompt cancelled, exiting.");
            return Ok(());
        };

        let action = Action::from_name(&action_name)
            .ok_or_else(|| Error::UnknownChoice(action_name.clone()))?;
        run_action(action, &api, &config)?;
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
