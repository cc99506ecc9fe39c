mod cli;
mod commands;

use cli::{ClassParams, DumpParams, ResaveParams, SearchParams, build_cli, log_level};

fn main() {
    let matches = build_cli().get_matches();

    tracing_subscriber::fmt()
        .with_max_level(log_level(&matches))
        .with_writer(std::io::stderr)
        .init();

    let result = match matches.subcommand() {
        Some(("dump", m)) => commands::dump::run(DumpParams::from_matches(m).into()),
        Some(("search", m)) => commands::search::run(SearchParams::from_matches(m).into()),
        Some(("resave", m)) => commands::resave::run(ResaveParams::from_matches(m).into()),
        Some(("class", m)) => commands::class::run(ClassParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
