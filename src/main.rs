use clap::Parser;
use personal_notes::cli::{handle_count, handle_get, handle_list, handle_serve, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    personal_notes::logging::init();

    let result = match cli.command {
        Commands::Serve { bind, in_memory } => handle_serve(&cli.db, bind, in_memory),
        Commands::List { json } => handle_list(&cli.db, json),
        Commands::Get { id, json } => handle_get(&cli.db, id, json),
        Commands::Count => handle_count(&cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
