use birdnames::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("birdnames=debug,info")
    } else {
        EnvFilter::new("birdnames=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cache = cli::open_cache(cli.data_dir.as_deref())?;

    match cli.command {
        cli::Commands::Convert(args) => {
            cli::convert::run(args, cli.format, cli.verbose, &cache)?;
        }
        cli::Commands::Guess(args) => {
            cli::guess::run(args, cli.format, cli.verbose, &cache)?;
        }
        cli::Commands::Detect(args) => {
            cli::detect::run(args, cli.format, cli.verbose, &cache)?;
        }
        cli::Commands::List => {
            cli::list::run(cli.format, cli.verbose, &cache)?;
        }
        cli::Commands::Show(args) => {
            cli::show::run(args, cli.format, cli.verbose, &cache)?;
        }
    }

    Ok(())
}
