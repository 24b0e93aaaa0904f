use anyhow::Context;
use clap::Parser;
use venv_bootstrap::config::DEFAULT_CONFIG_FILE;
use venv_bootstrap::utils::{logger, validation::Validate};
use venv_bootstrap::{
    resolve_settings, BootstrapError, Bootstrapper, CliConfig, ConfigProvider, ProcessRunner,
    TomlConfig,
};

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let project_dir = match &cli.project_dir {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };

    let file_config = match load_file_config(&cli, &project_dir) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let mut layers: Vec<&dyn ConfigProvider> = Vec::new();
    if let Some(config) = &file_config {
        layers.push(config);
    }
    layers.push(&cli);

    let settings = match resolve_settings(&project_dir, &layers) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    if let Err(e) = settings.validate() {
        fail(&e);
    }

    let bootstrapper = Bootstrapper::new(ProcessRunner::new(), settings).with_dry_run(cli.dry_run);

    match bootstrapper.run().await {
        Ok(report) => {
            if report.installed {
                println!("Environment ready.");
                println!("  environment:  {}", report.venv_dir.display());
                println!("  requirements: {}", report.requirements.display());
            } else {
                println!("Dry run complete, nothing was changed.");
            }
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn load_file_config(
    cli: &CliConfig,
    project_dir: &std::path::Path,
) -> venv_bootstrap::Result<Option<TomlConfig>> {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            TomlConfig::from_file(project_dir.join(path)).map(Some)
        }
        None => TomlConfig::from_optional_file(project_dir.join(DEFAULT_CONFIG_FILE)),
    }
}

fn fail(e: &BootstrapError) -> ! {
    tracing::error!("Bootstrap failed: {}", e);
    tracing::debug!("Suggestion: {}", e.recovery_suggestion());
    eprintln!("ERROR: {}", e.user_friendly_message());
    std::process::exit(EXIT_FAILURE);
}
