use clap::Parser;
use fxwatch::cli::{self, CheckCommand, Cli, Commands, RunArgs, EXIT_ERROR, EXIT_OK};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let code = match cli.command {
        None => cli::run::execute(config_path, &RunArgs::default()).await,
        Some(Commands::Run(args)) => cli::run::execute(config_path, &args).await,
        Some(Commands::Status) => report(cli::status::execute(config_path).await),
        Some(Commands::Check(CheckCommand::Config)) => {
            report(cli::check::execute_config(config_path))
        }
    };

    std::process::exit(code);
}

fn report(result: fxwatch::error::Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}
