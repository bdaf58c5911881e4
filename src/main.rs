use std::io;

use tracing::error;
use tracing_subscriber::EnvFilter;

use contactbook::menu::Menu;
use contactbook::settings::Settings;

fn main() {
    // an explicit config file may be given as the only argument
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // logs go to stderr so they never interleave with the prompts
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = settings.store();
    if let Err(e) = store.ensure_initialized() {
        error!(path = %store.path().display(), error = %e, "could not initialize contact file");
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let stdin = io::stdin();
    let mut menu = Menu::new(&store, stdin.lock(), io::stdout());
    if let Err(e) = menu.run() {
        error!(error = %e, "terminal I/O failed");
        std::process::exit(1);
    }
}
