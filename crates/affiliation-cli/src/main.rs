use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use affiliation_parsing::{AffiliationParser, Gazetteer};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config_file;
mod output;

use config_file::ConfigFile;
use output::{ColorMode, OutputFormat};

/// Affiliation Parser - Extract institutions, departments and locations from
/// academic affiliation strings
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one or more affiliation strings given as arguments
    Parse {
        /// Affiliation strings, one record per argument
        #[arg(required = true)]
        texts: Vec<String>,

        #[command(flatten)]
        options: ParseOptions,
    },

    /// Parse a file with one affiliation per line ("-" reads stdin)
    Batch {
        /// Input file, or "-" for stdin
        input: PathBuf,

        /// Treat each line as several affiliations separated by ";" or "."
        #[arg(long)]
        split: bool,

        #[command(flatten)]
        options: ParseOptions,
    },

    /// Print the first email address found in the text
    Email {
        text: String,
    },

    /// Print the first zip code found in the text
    Zipcode {
        text: String,
    },
}

#[derive(Args, Debug, Default)]
struct ParseOptions {
    /// City table CSV (city, state_id, population); defaults to the bundled table
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Hospital name CSV used to recognize hospital segments
    #[arg(long)]
    hospitals: Option<PathBuf>,

    /// Number of most populous cities matched when no state is found
    #[arg(long)]
    top_cities: Option<usize>,

    /// Indent JSON output
    #[arg(long, conflicts_with = "human")]
    pretty: bool,

    /// Print labelled fields instead of JSON
    #[arg(long)]
    human: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// Effective settings after layering flags, environment and config file.
#[derive(Debug, Default, PartialEq)]
struct Settings {
    cities_path: Option<PathBuf>,
    hospitals_path: Option<PathBuf>,
    top_cities: Option<usize>,
    extra_institutions: Vec<String>,
    extra_departments: Vec<String>,
    extra_exclusions: Vec<String>,
    pretty: bool,
}

impl Settings {
    /// Resolve configuration: CLI flags > env vars > config file > defaults.
    fn resolve(
        options: &ParseOptions,
        env: impl Fn(&str) -> Option<String>,
        config: ConfigFile,
    ) -> Self {
        let gazetteer = config.gazetteer.unwrap_or_default();
        let keywords = config.keywords.unwrap_or_default();
        let output = config.output.unwrap_or_default();

        Settings {
            cities_path: options
                .cities
                .clone()
                .or_else(|| env("AFFILIATION_CITIES_PATH").map(PathBuf::from))
                .or_else(|| gazetteer.cities_path.map(PathBuf::from)),
            hospitals_path: options
                .hospitals
                .clone()
                .or_else(|| env("AFFILIATION_HOSPITALS_PATH").map(PathBuf::from))
                .or_else(|| gazetteer.hospitals_path.map(PathBuf::from)),
            top_cities: options.top_cities.or(gazetteer.top_cities),
            extra_institutions: keywords.extra_institutions.unwrap_or_default(),
            extra_departments: keywords.extra_departments.unwrap_or_default(),
            extra_exclusions: keywords.extra_exclusions.unwrap_or_default(),
            pretty: options.pretty || output.pretty.unwrap_or(false),
        }
    }

    fn build_parser(&self) -> anyhow::Result<AffiliationParser> {
        let mut builder = Gazetteer::builder();
        if let Some(path) = &self.cities_path {
            if !path.exists() {
                anyhow::bail!("City table not found at {}", path.display());
            }
            builder = builder.cities_path(path);
        }
        if let Some(path) = &self.hospitals_path {
            builder = builder.hospitals_path(path);
        }
        if let Some(n) = self.top_cities {
            builder = builder.top_cities(n);
        }
        for keyword in &self.extra_institutions {
            builder = builder.add_institution_keyword(keyword.as_str());
        }
        for keyword in &self.extra_departments {
            builder = builder.add_department_keyword(keyword.as_str());
        }
        for keyword in &self.extra_exclusions {
            builder = builder.add_exclusion_keyword(keyword.as_str());
        }
        let gazetteer = builder.build().context("Failed to load reference data")?;
        Ok(AffiliationParser::new(Arc::new(gazetteer)))
    }

    fn output_format(&self, options: &ParseOptions) -> OutputFormat {
        if options.human {
            OutputFormat::Human(ColorMode(!options.no_color))
        } else if self.pretty {
            OutputFormat::PrettyJson
        } else {
            OutputFormat::Json
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { texts, options } => parse(&texts, &options),
        Command::Batch {
            input,
            split,
            options,
        } => batch(&input, split, &options),
        Command::Email { text } => {
            println!("{}", affiliation_parsing::parse_email(&text));
            Ok(())
        }
        Command::Zipcode { text } => {
            println!("{}", affiliation_parsing::parse_zipcode(&text));
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn settings_for(options: &ParseOptions) -> Settings {
    Settings::resolve(
        options,
        |key| std::env::var(key).ok(),
        config_file::load_config(),
    )
}

fn parse(texts: &[String], options: &ParseOptions) -> anyhow::Result<()> {
    let settings = settings_for(options);
    let parser = settings.build_parser()?;
    let format = settings.output_format(options);

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    for text in texts {
        let record = parser.parse(text);
        output::print_record(&mut writer, &record, format)?;
    }
    writer.flush()?;
    Ok(())
}

fn batch(input: &Path, split: bool, options: &ParseOptions) -> anyhow::Result<()> {
    let settings = settings_for(options);
    let parser = settings.build_parser()?;
    let format = settings.output_format(options);

    let reader: Box<dyn BufRead> = if input == Path::new("-") {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?;
        Box::new(BufReader::new(file))
    };

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    let lines = run_batch(reader, &mut writer, &parser, split, format)
        .with_context(|| format!("Failed to process {}", input.display()))?;
    writer.flush()?;
    tracing::info!(lines, split, "batch finished");
    Ok(())
}

/// Parse every line of `reader`, returning the number of lines seen.
///
/// Lines are read as bytes and decoded lossily, so a stray invalid byte
/// replaces one character instead of ending the run.
fn run_batch(
    mut reader: impl BufRead,
    writer: &mut impl Write,
    parser: &AffiliationParser,
    split: bool,
    format: OutputFormat,
) -> anyhow::Result<usize> {
    let mut buf = Vec::new();
    let mut lines = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if line.contains('\u{FFFD}') {
            tracing::warn!(line = lines + 1, "invalid UTF-8 replaced");
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if split {
            let records = parser.split_multiple(line);
            output::print_records(&mut *writer, &records, format)?;
        } else {
            let record = parser.parse(line);
            output::print_record(&mut *writer, &record, format)?;
        }
        lines += 1;
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_file::{GazetteerConfig, KeywordsConfig, OutputConfig};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn config() -> ConfigFile {
        ConfigFile {
            gazetteer: Some(GazetteerConfig {
                cities_path: Some("/config/cities.csv".to_string()),
                hospitals_path: Some("/config/hospitals.csv".to_string()),
                top_cities: Some(200),
            }),
            keywords: Some(KeywordsConfig {
                extra_institutions: Some(vec!["observatory".to_string()]),
                ..Default::default()
            }),
            output: Some(OutputConfig { pretty: Some(true) }),
        }
    }

    #[test]
    fn config_file_fills_defaults() {
        let settings = Settings::resolve(&ParseOptions::default(), no_env, config());
        assert_eq!(settings.cities_path, Some(PathBuf::from("/config/cities.csv")));
        assert_eq!(settings.top_cities, Some(200));
        assert_eq!(settings.extra_institutions, vec!["observatory"]);
        assert!(settings.pretty);
    }

    #[test]
    fn env_beats_config_file() {
        let env = |key: &str| {
            (key == "AFFILIATION_CITIES_PATH").then(|| "/env/cities.csv".to_string())
        };
        let settings = Settings::resolve(&ParseOptions::default(), env, config());
        assert_eq!(settings.cities_path, Some(PathBuf::from("/env/cities.csv")));
        assert_eq!(
            settings.hospitals_path,
            Some(PathBuf::from("/config/hospitals.csv"))
        );
    }

    #[test]
    fn flags_beat_env() {
        let options = ParseOptions {
            cities: Some(PathBuf::from("/flag/cities.csv")),
            top_cities: Some(10),
            ..Default::default()
        };
        let env = |_: &str| Some("/env/any.csv".to_string());
        let settings = Settings::resolve(&options, env, config());
        assert_eq!(settings.cities_path, Some(PathBuf::from("/flag/cities.csv")));
        assert_eq!(settings.hospitals_path, Some(PathBuf::from("/env/any.csv")));
        assert_eq!(settings.top_cities, Some(10));
    }

    #[test]
    fn defaults_without_any_source() {
        let settings = Settings::resolve(&ParseOptions::default(), no_env, ConfigFile::default());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn output_format_selection() {
        let settings = Settings::default();
        let human = ParseOptions {
            human: true,
            no_color: true,
            ..Default::default()
        };
        assert_eq!(
            settings.output_format(&human),
            OutputFormat::Human(ColorMode(false))
        );
        assert_eq!(settings.output_format(&ParseOptions::default()), OutputFormat::Json);
        let pretty = Settings {
            pretty: true,
            ..Default::default()
        };
        assert_eq!(
            pretty.output_format(&ParseOptions::default()),
            OutputFormat::PrettyJson
        );
    }

    #[test]
    fn missing_city_table_is_an_error() {
        let settings = Settings {
            cities_path: Some(PathBuf::from("/definitely/not/here.csv")),
            ..Default::default()
        };
        assert!(settings.build_parser().is_err());
    }

    #[test]
    fn batch_survives_invalid_utf8() {
        let parser = AffiliationParser::bundled().unwrap();
        let input: &[u8] =
            b"Harvard University, Boston, MA\n\xff\xfe bad\r\nMayo Clinic, Rochester, MN\n";
        let mut out = Vec::new();
        let lines = run_batch(input, &mut out, &parser, false, OutputFormat::Json).unwrap();
        assert_eq!(lines, 3);
        let text = String::from_utf8(out).unwrap();
        let records: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["us_city"], "BOSTON");
        assert_eq!(records[2]["us_state"], "Minnesota");
    }

    #[test]
    fn cli_parses_batch_flags() {
        let cli = Cli::try_parse_from([
            "affiliation-parser",
            "batch",
            "-",
            "--split",
            "--pretty",
        ])
        .unwrap();
        match cli.command {
            Command::Batch {
                input,
                split,
                options,
            } => {
                assert_eq!(input, PathBuf::from("-"));
                assert!(split);
                assert!(options.pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_pretty_with_human() {
        assert!(Cli::try_parse_from(["affiliation-parser", "parse", "x", "--pretty", "--human"]).is_err());
    }
}
