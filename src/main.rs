use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use json_style_editor::app::editor::{Editor, EditorSettings};
use json_style_editor::config::Config;
use json_style_editor::core::document::{Document, Mutation};
use json_style_editor::core::value::Value;
use json_style_editor::core::value_path::ValuePath;
use json_style_editor::logging::{LogTarget, setup_logging};
use json_style_editor::runtime::runner::Runtime;
use json_style_editor::terminal::Terminal;
use json_style_editor::widgets::form::Form;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file. Defaults to `json-style-editor.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured indentation.
    #[arg(long, global = true)]
    indent: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Edit a JSON document in an interactive form.
    Edit {
        /// JSON file, or `-` / omitted for stdin.
        input: Option<PathBuf>,
    },
    /// Print the form inferred from a document.
    Outline { input: Option<PathBuf> },
    /// Write values at paths and print the result.
    Set {
        input: Option<PathBuf>,
        /// Path such as `theme.colors[2]`; pairs with the `--value` at the same position.
        #[arg(long = "path", required = true)]
        paths: Vec<String>,
        /// JSON value; anything that does not parse is written as a string.
        #[arg(long = "value", required = true)]
        values: Vec<String>,
    },
    /// Pretty-print a document.
    Format { input: Option<PathBuf> },
}

impl Command {
    fn is_interactive(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("config file `{}` does not exist", path.display());
    }
    let config = Config::load_from(cli.config.as_deref()).context("failed to load config")?;
    let indent = cli.indent.unwrap_or(config.indent);

    let target = match (&config.log_file, cli.command.is_interactive()) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Disabled,
        (None, false) => LogTarget::Stderr,
    };
    setup_logging(&config.log_level, target)?;
    debug!(?config, indent);

    match cli.command {
        Command::Edit { input } => {
            let (title, document) = read_document(input.as_deref())?;
            let settings = EditorSettings {
                export_path: config.export_path.clone(),
                preview: config.preview,
            };
            let editor = Editor::new(title, document.with_indent(indent), settings);
            let terminal = Terminal::new().context("failed to open terminal")?;
            let editor = Runtime::new(editor, terminal)
                .run()
                .context("terminal session failed")?;
            print_document(&editor.into_document())
        }
        Command::Outline { input } => {
            let (_, document) = read_document(input.as_deref())?;
            for line in Form::new(document.value()).outline() {
                println!("{line}");
            }
            Ok(())
        }
        Command::Set {
            input,
            paths,
            values,
        } => {
            if paths.len() != values.len() {
                bail!(
                    "every --path needs a --value ({} paths, {} values)",
                    paths.len(),
                    values.len()
                );
            }
            let (_, mut document) = read_document(input.as_deref())?;
            for (path, value) in paths.iter().zip(&values) {
                let mutation = Mutation::new(ValuePath::parse(path), Value::parse_lenient(value));
                info!(path = %mutation.path, "set");
                document.apply(&mutation);
            }
            print_document(&document.with_indent(indent))
        }
        Command::Format { input } => {
            let (_, document) = read_document(input.as_deref())?;
            print_document(&document.with_indent(indent))
        }
    }
}

/// Load from a file, or from stdin for `-` and no argument.
fn read_document(input: Option<&Path>) -> anyhow::Result<(String, Document)> {
    match input {
        Some(path) if path != Path::new("-") => {
            let document = Document::load(path).inspect_err(|err| {
                error!(path = %path.display(), error = %err, "failed to load input");
            })?;
            Ok((path.display().to_string(), document))
        }
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            let document = Document::parse(source).context("failed to parse stdin")?;
            Ok(("<stdin>".to_string(), document))
        }
    }
}

fn print_document(document: &Document) -> anyhow::Result<()> {
    println!("{}", document.to_pretty_json()?);
    Ok(())
}
