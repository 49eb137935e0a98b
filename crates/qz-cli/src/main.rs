use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "qz")]
#[command(about = "Quiz document editor CLI", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> local -> ...)
    #[arg(long = "config", global = true)]
    config_paths: Vec<PathBuf>,

    /// Fail instead of warn when the config carries keys nothing reads
    #[arg(long, global = true, default_value_t = false)]
    strict_config: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Write an empty quiz document
    Init {
        #[arg(long)]
        out: PathBuf,

        /// Lesson id
        #[arg(long, default_value = "")]
        id: String,

        #[arg(long, default_value = "")]
        summary: String,

        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print a review rendering of a document
    Show {
        #[arg(long)]
        doc: PathBuf,
    },

    /// Report structural problems (ordering permutations, answer bounds, duplicate ids)
    Validate {
        #[arg(long)]
        doc: PathBuf,

        /// Exit non-zero when any finding is reported
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Import a JSON file through the editor's import dialog
    Import {
        /// File to upload
        #[arg(long)]
        from: PathBuf,

        /// Document to write
        #[arg(long)]
        out: PathBuf,
    },

    /// Export a document as pretty JSON under the configured file name
    Export {
        #[arg(long)]
        doc: PathBuf,

        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Replay a JSON array of editor commands against a document
    Apply {
        #[arg(long)]
        doc: PathBuf,

        /// JSON file holding the command array
        #[arg(long)]
        script: PathBuf,

        /// Where to write the result (defaults to --doc)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Report failed commands and continue instead of stopping
        #[arg(long, default_value_t = false)]
        keep_going: bool,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();
    let ctx = commands::Context::load(&cli.config_paths, cli.strict_config)?;

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let loaded = qz_config::load_layered_yaml(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Init {
            out,
            id,
            summary,
            force,
        } => commands::document::init(&ctx, &out, id, summary, force)?,

        Commands::Show { doc } => commands::document::show(&doc)?,

        Commands::Validate { doc, strict } => commands::document::validate(&doc, strict)?,

        Commands::Import { from, out } => commands::edit::import(&ctx, &from, &out)?,

        Commands::Export { doc, out_dir } => commands::document::export(&ctx, &doc, &out_dir)?,

        Commands::Apply {
            doc,
            script,
            out,
            keep_going,
        } => {
            let out = out.unwrap_or_else(|| doc.clone());
            commands::edit::apply(&ctx, &doc, &script, &out, keep_going)?
        }
    }

    Ok(())
}
