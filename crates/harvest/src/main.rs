mod cli;
mod spider;

// remote imports
use clap::Parser;
use cli::{Cli, Commands, Pipeline, TraceLevel};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// set the trace level
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        })?;
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    // read cli inputs; pipeline failures are logged, never returned
    match cli.command {
        // `harvest`: run everything
        None => {
            spider::run(
                vec![Pipeline::Companies, Pipeline::Dump],
                spider::companies_config(Default::default()),
                spider::dump_config(Default::default()),
                tui,
            )
            .await
        }

        // `harvest run <Option<Vec<Pipeline>>>`: run the selected pipelines
        Some(Commands::Run { pipelines }) => {
            spider::run(
                pipelines.unwrap_or_else(|| vec![Pipeline::Companies, Pipeline::Dump]),
                spider::companies_config(Default::default()),
                spider::dump_config(Default::default()),
                tui,
            )
            .await
        }

        Some(Commands::Companies(args)) => {
            spider::run_companies(&spider::companies_config(args), tui).await
        }

        Some(Commands::Dump(args)) => spider::run_dump(&spider::dump_config(args), tui).await,

        Some(Commands::Migrate { database }) => spider::run_migrate(database, tui).await,
    }

    Ok(())
}
