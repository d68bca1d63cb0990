use crate::demo::{run_classify, run_demo, run_underwrite, ClassifyArgs, DemoArgs, UnderwriteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use zone_underwriter::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Zone Underwriter",
    about = "Classify suburbs into investment zones and underwrite equity-release loans",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify suburbs from a JSON signal file
    Classify(ClassifyArgs),
    /// Underwrite a preset scenario or an application file against the fund parameters
    Underwrite(UnderwriteArgs),
    /// Run the preset scenarios and a sample suburb classification
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Classify(args) => run_classify(args),
        Command::Underwrite(args) => run_underwrite(args),
        Command::Demo(args) => run_demo(args),
    }
}
