use std::{env, fs, path::Path};

use anyhow::{Context, Result};

use super::{
    args::{Arguments, Command, ExtractCommand},
    exit_status::ExitStatus,
    report,
};
use crate::config::{CONFIG_FILE_NAME, default_config_json, load_config};
use crate::stage::ExtractStage;

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => {
            init()?;
            Ok(ExitStatus::Success)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let load = load_config(&env::current_dir()?)?;

    let mut stage = ExtractStage::with_config(&cmd.file, &load.config);
    if let Some(dir) = &cmd.cache_dir {
        stage = stage.cache_dir(dir);
    }

    let result = stage.transform(None)?;

    match &cmd.output {
        Some(path) => fs::write(path, &result.text)
            .with_context(|| format!("Failed to write output file: {:?}", path))?,
        None => print!("{}", result.text),
    }

    report::print_summary(&result, &cmd.file, cmd.verbose);

    Ok(ExitStatus::Success)
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
