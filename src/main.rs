use clap::Parser;
use jot::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: could not read current directory: {}", e);
            std::process::exit(1);
        }
    };
    let data_dir = cli.resolve_data_dir(&cwd);

    if let Err(e) = jot::tui::run(&data_dir, cli.no_watch) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
