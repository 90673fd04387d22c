mod commands;
mod terminal;

use commands::{CommandLine, Commands, convert, merge};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging(commands.quiet, commands.verbose);
    print::banner(cfg.no_banner, cfg.quiet);

    match &commands.command {
        Commands::Convert { input, output, .. } => {
            print::header("converting scan report", cfg.quiet);
            convert::convert(input, output, &cfg)
        }
        Commands::Merge {
            count,
            output,
            inputs,
        } => {
            print::header("merging tables", cfg.quiet);
            merge::merge(*count, output, inputs, &cfg)
        }
    }
}
