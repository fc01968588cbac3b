//! Command-line interface over the localization core.
//!
//! Every command reads JSON records from disk and writes JSON to the given
//! writer, so the same entry point serves the binary and the tests.

use std::fs;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Args,
    Parser,
    Subcommand,
};
use serde::Serialize;
use serde_json::{
    Map,
    Value,
    json,
};
use thiserror::Error;

use crate::config::{
    self,
    ConfigError,
    I18nSettings,
};
use crate::exchange::{
    self,
    EntityId,
    ExchangeError,
};
use crate::language::Language;
use crate::schema::{
    EntityKind,
    EntityKindError,
};

/// Resolve, audit and exchange multilingual storefront content.
#[derive(Parser, Debug)]
#[command(name = "storefront-i18n", version)]
pub struct Cli {
    /// Directory containing `.storefront-i18n.json` (defaults to the current directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Prints the displayable value of one field.
    Resolve {
        /// Record and language to read.
        #[command(flatten)]
        target: RecordTarget,
        /// Base field name, e.g. `storeName`.
        #[arg(long)]
        field: String,
        /// Do not fall back to the default language.
        #[arg(long)]
        strict: bool,
    },
    /// Reports how many fields are translated and which are missing.
    Progress {
        /// Record and language to audit.
        #[command(flatten)]
        target: RecordTarget,
        /// Fields to count.
        #[command(flatten)]
        fields: FieldSelection,
    },
    /// Prints the payload copying default-language values into a language.
    CopyDefaults {
        /// Record to copy from and the target language.
        #[command(flatten)]
        target: RecordTarget,
        /// Fields to copy.
        #[command(flatten)]
        fields: FieldSelection,
    },
    /// Prints the payload clearing every field of a language.
    Clear {
        /// Entity kind (`product`, `category`, `store_setting`, `theme`).
        #[arg(long)]
        kind: String,
        /// Language whose slots are cleared.
        #[arg(long)]
        language: String,
        /// Fields to clear.
        #[command(flatten)]
        fields: FieldSelection,
    },
    /// Exports a record as translation table rows.
    Export {
        /// Entity kind of the record.
        #[arg(long)]
        kind: String,
        /// Record id written into every row.
        #[arg(long)]
        id: String,
        /// JSON file holding the record object.
        #[arg(long)]
        record: PathBuf,
    },
    /// Converts edited translation table rows into per-entity update payloads.
    Import {
        /// JSON file holding an array of rows.
        #[arg(long)]
        rows: PathBuf,
    },
}

/// A record file read in one language.
#[derive(Args, Debug, Clone)]
pub struct RecordTarget {
    /// Entity kind (`product`, `category`, `store_setting`, `theme`).
    #[arg(long)]
    pub kind: String,
    /// JSON file holding the record object.
    #[arg(long)]
    pub record: PathBuf,
    /// Language code; unsupported codes fall back to the default language.
    #[arg(long)]
    pub language: String,
}

/// Repeatable `--field` arguments.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldSelection {
    /// Base fields to include (repeatable). Defaults to every translatable field of the kind.
    #[arg(long = "field")]
    pub fields: Vec<String>,
}

impl FieldSelection {
    /// Selected fields, or all translatable fields of `kind` when none were given.
    fn resolve(&self, kind: EntityKind) -> Vec<String> {
        if self.fields.is_empty() {
            kind.base_fields().into_iter().map(str::to_string).collect()
        } else {
            self.fields.clone()
        }
    }
}

/// Errors reported by [`run`].
#[derive(Error, Debug)]
pub enum CliError {
    /// Workspace configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Translation table could not be read, written or applied.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// `--kind` is not a known entity kind.
    #[error(transparent)]
    Kind(#[from] EntityKindError),

    /// An input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An input file is not valid JSON.
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// A record file holds something other than a JSON object.
    #[error("'{0}' must contain a JSON object")]
    NotAnObject(PathBuf),

    /// Serializing the result failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    /// Writing the result failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs `cli`, writing results to `stdout` and a failure to `stderr`.
pub fn execute<W: Write, E: Write>(cli: &Cli, stdout: &mut W, stderr: &mut E) -> ExitCode {
    match run(cli, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Loads settings for `cli.root` and executes `cli.command`, writing JSON to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let settings = &config::load_settings(&root)?;

    match &cli.command {
        Command::Resolve { target, field, strict } => {
            let (kind, record, language) = open_target(settings, target)?;
            let localizer = settings.localizer_for(kind);
            let value = if *strict {
                localizer.resolve_strict(Some(&record), field, language)
            } else {
                localizer.resolve(Some(&record), field, language)
            };
            write_json(out, &json!({ "field": field, "language": language, "value": value }))
        }
        Command::Progress { target, fields } => {
            let (kind, record, language) = open_target(settings, target)?;
            let localizer = settings.localizer_for(kind);
            let fields = fields.resolve(kind);
            let progress = localizer.progress(Some(&record), &fields, language);
            let empty_fields = localizer.empty_fields(Some(&record), &fields, language);
            write_json(
                out,
                &json!({ "language": language, "progress": progress, "emptyFields": empty_fields }),
            )
        }
        Command::CopyDefaults { target, fields } => {
            let (kind, record, language) = open_target(settings, target)?;
            let localizer = settings.localizer_for(kind);
            let updates = localizer.copy_defaults(Some(&record), &fields.resolve(kind), language);
            write_json(out, &updates)
        }
        Command::Clear { kind, language, fields } => {
            let kind: EntityKind = kind.parse()?;
            let language = parse_language(settings, language);
            let updates = settings.localizer_for(kind).clear_all(&fields.resolve(kind), language);
            write_json(out, &updates)
        }
        Command::Export { kind, id, record } => {
            let kind: EntityKind = kind.parse()?;
            let record = read_record(record)?;
            let rows = exchange::export_rows(
                kind,
                &EntityId::from(id.as_str()),
                &record,
                &settings.localizer_for(kind),
            );
            exchange::write_rows(out, &rows)?;
            Ok(())
        }
        Command::Import { rows } => {
            let file = fs::File::open(rows)
                .map_err(|source| CliError::Read { path: rows.clone(), source })?;
            let rows = exchange::read_rows(file)?;
            let updates = exchange::import_rows(&rows, |kind| settings.localizer_for(kind))?;
            write_json(out, &updates)
        }
    }
}

/// Parses the kind, reads the record and picks the language of `target`.
fn open_target(
    settings: &I18nSettings,
    target: &RecordTarget,
) -> Result<(EntityKind, Map<String, Value>, Language), CliError> {
    let kind = target.kind.parse()?;
    let record = read_record(&target.record)?;
    Ok((kind, record, parse_language(settings, &target.language)))
}

/// Unsupported or disabled codes degrade to the default language.
fn parse_language(settings: &I18nSettings, code: &str) -> Language {
    match code.parse::<Language>() {
        Ok(language) if settings.languages.contains(&language) => language,
        Ok(language) => {
            tracing::warn!(%language, "language is not enabled, using the default language");
            settings.default_language
        }
        Err(err) => {
            tracing::warn!("{err}, using the default language");
            settings.default_language
        }
    }
}

/// Reads a JSON object from `path`.
fn read_record(path: &Path) -> Result<Map<String, Value>, CliError> {
    let content = fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|source| CliError::Parse { path: path.to_path_buf(), source })?;

    match value {
        Value::Object(record) => Ok(record),
        _ => Err(CliError::NotAnObject(path.to_path_buf())),
    }
}

/// Writes `value` as pretty JSON followed by a newline.
fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn parses_progress_with_repeated_fields() {
        let cli = Cli::try_parse_from([
            "storefront-i18n",
            "progress",
            "--kind",
            "store_setting",
            "--record",
            "settings.json",
            "--language",
            "en",
            "--field",
            "storeName",
            "--field",
            "welcomeTitle",
        ])
        .unwrap();

        let Command::Progress { target, fields } = cli.command else {
            panic!("expected progress command");
        };
        assert_that!(target.language, eq("en"));
        assert_eq!(fields.fields, ["storeName", "welcomeTitle"]);
    }

    #[rstest]
    fn root_is_global() {
        let cli = Cli::try_parse_from([
            "storefront-i18n",
            "import",
            "--rows",
            "rows.json",
            "--root",
            "/srv/shop",
        ])
        .unwrap();

        assert_that!(cli.root, some(eq(&PathBuf::from("/srv/shop"))));
    }

    #[rstest]
    fn field_selection_defaults_to_schema() {
        let fields = FieldSelection::default().resolve(EntityKind::Category);

        assert_eq!(fields, ["name", "description"]);
    }

    #[rstest]
    #[case("he", Language::He)]
    #[case("de", Language::Ru)]
    fn unsupported_language_degrades_to_default(#[case] code: &str, #[case] expected: Language) {
        assert_that!(parse_language(&I18nSettings::default(), code), eq(expected));
    }

    #[rstest]
    fn disabled_language_degrades_to_default() {
        let settings =
            I18nSettings { languages: vec![Language::Ru, Language::En], ..I18nSettings::default() };

        assert_that!(parse_language(&settings, "ar"), eq(Language::Ru));
    }
}
