use clap::Parser;
use search_processors::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    search_processors::tracing::init(cli.verbose);

    tracing::debug!("Running {:?}", cli.command);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(cli.command, &mut stdin.lock(), &mut stdout.lock()).inspect_err(|e| {
        tracing::error!("{:#}", e);
    })
}
