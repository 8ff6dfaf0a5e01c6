use clap::Parser;
use lockvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    lockvault::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::GenerateKey => lockvault::cli::commands::generate_key::execute(&cli),
        Commands::ChangePassword => lockvault::cli::commands::change_password::execute(&cli),
        Commands::Add { ref kind } => lockvault::cli::commands::add::execute(&cli, kind),
        Commands::Edit { ref id, ref fields } => {
            lockvault::cli::commands::edit::execute(&cli, id, fields)
        }
        Commands::Delete { ref id, force } => {
            lockvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::List => lockvault::cli::commands::list::execute(&cli),
        Commands::Show {
            ref id,
            reveal,
            ref output,
        } => lockvault::cli::commands::show::execute(&cli, id, reveal, output.as_deref()),
        Commands::Register { ref username } => {
            lockvault::cli::commands::register::execute(&cli, username)
        }
        Commands::Login { ref username } => {
            lockvault::cli::commands::login::execute(&cli, username)
        }
        Commands::Sync { ref token } => {
            lockvault::cli::commands::sync::execute(&cli, token.as_deref())
        }
    };

    if let Err(e) = result {
        lockvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
