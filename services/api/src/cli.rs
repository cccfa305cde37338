use crate::report::{run_directorio, DirectorioArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use socios::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Registro de Socios",
    about = "Serve and inspect the cooperative partner directory from the command line",
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
    /// Build the partner directory offline from seed files and print it
    Directorio(DirectorioArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Padron CSV used to seed the in-memory store
    #[arg(long)]
    pub(crate) padron_csv: Option<PathBuf>,
    /// Documents JSON (array of socio_documentos rows) used to seed the store
    #[arg(long)]
    pub(crate) documentos_json: Option<PathBuf>,
    /// Income JSON (array of {dni, receipt_number}) used to seed the store
    #[arg(long)]
    pub(crate) ingresos_json: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Directorio(args) => run_directorio(args).await,
    }
}
