use clap::Parser;
use trk::application::ReportService;
use trk::cli::{format_ledger, Cli, OutputLayouts};
use trk::error::TrkError;
use trk::infrastructure::logging::setup_logging;
use trk::infrastructure::Config;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), TrkError> {
    // Defaults, then config file, then flags
    let mut config = Config::discover(cli.config.as_deref())?;
    config.apply(cli.overrides())?;

    let service = ReportService::new(&config)?;
    let lines = service.execute(&cli.filename)?;

    let layouts = OutputLayouts {
        date: config.date_out.clone(),
        time: config.time_out.clone(),
    };
    print!("{}", format_ledger(&lines, config.format, &layouts));
    Ok(())
}
