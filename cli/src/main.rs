mod commands;
mod terminal;

use commands::{CommandLine, Commands, scan, vendors};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    match &commands.command {
        Commands::Scan { capture, .. } => {
            print::header("starting scanner", cfg.quiet);
            scan::scan(capture, &cfg).await
        }
        Commands::Vendors => {
            print::header("vendor table", cfg.quiet);
            vendors::vendors(&cfg)
        }
    }
}
