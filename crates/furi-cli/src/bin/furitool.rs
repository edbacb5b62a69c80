use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use furi_cli::commands::{
    annotate_ops, batch_ops, config_ops, load_settings, select_ops,
};
use furi_core::Endpoint;

#[derive(Parser)]
#[command(name = "furitool", about = "Furigana annotation through the analysis service")]
struct Cli {
    /// Settings TOML file (embedded defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override service.base_url
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Write JSON trace lines to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate text and print the markup
    Annotate {
        /// Japanese input text
        text: String,
        /// Service endpoint to use
        #[arg(long, value_enum, default_value = "furigana")]
        endpoint: EndpointArg,
        /// Surface to emphasize (repeatable; analyze endpoint only)
        #[arg(long = "highlight")]
        highlights: Vec<String>,
    },

    /// Re-annotate a file of markup fragments, one element per line
    Batch {
        /// Input file
        input_file: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive selection loop reading one selection per stdin line
    Select,

    /// Inspect settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the embedded default settings TOML
    Export,
    /// Validate a settings TOML file
    Validate { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum EndpointArg {
    Furigana,
    Analyze,
}

impl From<EndpointArg> for Endpoint {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::Furigana => Endpoint::Furigana,
            EndpointArg::Analyze => Endpoint::Analyze,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.log_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error creating log dir {}: {e}", dir.display());
            process::exit(1);
        }
    }
    let _guard = furi_cli::trace_init::init_tracing(cli.log_dir.as_deref());

    match cli.command {
        Command::Settings { action } => match action {
            SettingsCommand::Export => config_ops::settings_export(),
            SettingsCommand::Validate { file } => config_ops::settings_validate(&file),
        },
        Command::Annotate {
            text,
            endpoint,
            highlights,
        } => {
            let settings = load_settings(cli.config.as_deref(), cli.base_url.as_deref());
            annotate_ops::annotate_cmd(&settings, &text, endpoint.into(), &highlights);
        }
        Command::Batch { input_file, output } => {
            let settings = load_settings(cli.config.as_deref(), cli.base_url.as_deref());
            batch_ops::batch_cmd(&settings, &input_file, output.as_deref());
        }
        Command::Select => {
            let settings = load_settings(cli.config.as_deref(), cli.base_url.as_deref());
            select_ops::select_cmd(&settings);
        }
    }
}
