use clap::Parser;
use fee_engine::cli::{self, Cli, output};
use fee_engine::{load_dotenv, setup_environment};

fn main() -> anyhow::Result<()> {
    // 1. .env first so clap's env fallbacks see it
    load_dotenv();
    let cli = Cli::parse();

    // 2. Configuration and logging
    let config = cli.config();
    setup_environment(&config)?;

    // 3. Run the command
    if let Err(err) = cli::run(&cli, &config) {
        tracing::debug!(code = err.code.code(), "Command failed: {}", err.message);
        output::print_error(&err, cli.json);
        std::process::exit(1);
    }

    Ok(())
}
