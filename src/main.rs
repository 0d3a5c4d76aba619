use clap::Parser;
use color_eyre::Result;
use lifeos::{Config, Profile, Store, cli::{Cli, Commands}};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    if !config.store_configured() {
        let path = Config::get_config_path(profile)?;
        return Err(color_eyre::eyre::eyre!(
            "Store credentials missing. Set [store] url and key in {}",
            path.display()
        ));
    }

    // Connect the record store client
    let store = Store::connect(&config.store.url, &config.store.key)?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = lifeos::tui::App::new(config, store)?;
            lifeos::tui::run_event_loop(app)?;
        }
        Commands::Snapshot => {
            lifeos::cli::handle_snapshot(&store)?;
        }
        Commands::AddProject { title } => {
            lifeos::cli::handle_add_project(title, &store)?;
        }
        Commands::AddIdea { title } => {
            lifeos::cli::handle_add_idea(title, &store)?;
        }
        Commands::AddLog { project, content } => {
            lifeos::cli::handle_add_log(project, content, &store)?;
        }
    }

    Ok(())
}
