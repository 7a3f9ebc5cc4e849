use clap::{Parser, Subcommand};

use bndict_cli::commands::{build_ops, config_ops, dict_ops};
use bndict_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "bndict", about = "English→Bangla dictionary merge tool")]
struct Cli {
    /// Log per-file details
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge all configured sources and export the result
    Build {
        /// Settings TOML (default: embedded settings)
        #[arg(long)]
        config: Option<String>,
        /// Directory the source paths are relative to
        /// (default: `data` next to the install, else `./data`)
        #[arg(long)]
        data_dir: Option<String>,
        /// Output directory (default: output.dir under the data directory)
        #[arg(long)]
        output: Option<String>,
    },
    /// Re-partition an existing dump into an output directory
    Split {
        /// JSON array of entries, or an all.json object
        dump_file: String,
        /// Output directory (cleared first)
        output_dir: String,
    },
    /// Look up a word in an all.json dump
    Lookup {
        /// Dump file
        dump_file: String,
        /// English word
        word: String,
    },
    /// Show word and group counts of an export directory
    Info {
        /// Export directory
        dir: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build {
            config,
            data_dir,
            output,
        } => build_ops::build(config.as_deref(), data_dir.as_deref(), output.as_deref()),
        Command::Split {
            dump_file,
            output_dir,
        } => build_ops::split(&dump_file, &output_dir),
        Command::Lookup { dump_file, word } => dict_ops::lookup(&dump_file, &word),
        Command::Info { dir } => dict_ops::info(&dir),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
