use clap::Parser;
use strokewatch::cli::{
    chat, handle_completions, handle_config_init, plan, predict, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Ok(false): the request settled but rendered an error outcome.
    let result = match cli.command {
        Commands::Predict(args) => predict::run_predict(args).await,
        Commands::Chat(args) => chat::run_chat(args).await,
        Commands::Plan(args) => plan::run_plan(args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args).map(|_| true),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
