// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use narrasub::app_config::{self, Config};
use narrasub::app_controller::{Controller, RunOptions};
use narrasub::style::StyleDescriptor;
use narrasub::timing::WeightModel;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for StyleDescriptor to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStyle {
    Default,
    #[value(alias = "yellow")]
    Highlighted,
    #[value(alias = "white-box", alias = "white_box")]
    Boxed,
    #[value(alias = "custom")]
    Emphasized,
}

impl From<CliStyle> for StyleDescriptor {
    fn from(cli_style: CliStyle) -> Self {
        match cli_style {
            CliStyle::Default => StyleDescriptor::Default,
            CliStyle::Highlighted => StyleDescriptor::Highlighted,
            CliStyle::Boxed => StyleDescriptor::Boxed,
            CliStyle::Emphasized => StyleDescriptor::Emphasized,
        }
    }
}

/// CLI Wrapper for WeightModel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliWeightModel {
    Characters,
    SpeechRate,
}

impl From<CliWeightModel> for WeightModel {
    fn from(cli_model: CliWeightModel) -> Self {
        match cli_model {
            CliWeightModel::Characters => WeightModel::Characters,
            CliWeightModel::SpeechRate => WeightModel::SpeechRate,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate timed subtitles from narration text (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Validate an existing SRT file
    Check(CheckArgs),

    /// Generate shell completions for narrasub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct GenerateArgs {
    /// Narration text file or directory of page files
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Audio duration in seconds, comma separated for multiple pages
    #[arg(short, long, value_delimiter = ',')]
    duration: Option<Vec<f64>>,

    /// Audio file to measure with ffprobe
    #[arg(short, long, conflicts_with = "duration")]
    audio: Option<PathBuf>,

    /// Recognizer word timestamps (JSON)
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Narration language tag (e.g., 'zh-TW', 'en')
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Subtitle style
    #[arg(short, long, value_enum)]
    style: Option<CliStyle>,

    /// Maximum characters per cue line
    #[arg(short, long)]
    max_line_chars: Option<usize>,

    /// Keep simplified characters as they are
    #[arg(long)]
    no_convert: bool,

    /// How chunk weights are computed for proportional timing
    #[arg(long, value_enum)]
    weight_model: Option<CliWeightModel>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug, Clone)]
struct CheckArgs {
    /// SRT file to validate
    #[arg(value_name = "SRT_PATH")]
    path: PathBuf,

    /// Audio duration the cues should cover
    #[arg(short, long)]
    duration: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// narrasub - narration to subtitle cues
///
/// Splits narration text into readable cues, times them against the audio
/// duration and writes SRT subtitles plus renderer style parameters.
#[derive(Parser, Debug)]
#[command(name = "narrasub")]
#[command(version)]
#[command(about = "Narration to subtitle cue generator")]
#[command(long_about = "narrasub turns narration text and an audio duration into timed SRT subtitles.

EXAMPLES:
    narrasub page.txt -d 12.5                   # Time one page over 12.5 seconds
    narrasub page.txt -a page.wav               # Measure the duration with ffprobe
    narrasub page.txt -a page.wav -w page.json  # Align to recognizer word timestamps
    narrasub pages/ -d 10,8.2,14                # Multi-page document
    narrasub -s highlighted page.txt -d 9       # Yellow subtitles
    narrasub check page.srt -d 12.5             # Validate existing subtitles
    narrasub completions bash > narrasub.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Narration text file or directory of page files
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Audio duration in seconds, comma separated for multiple pages
    #[arg(short, long, value_delimiter = ',')]
    duration: Option<Vec<f64>>,

    /// Audio file to measure with ffprobe
    #[arg(short, long, conflicts_with = "duration")]
    audio: Option<PathBuf>,

    /// Recognizer word timestamps (JSON)
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Narration language tag (e.g., 'zh-TW', 'en')
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Subtitle style
    #[arg(short, long, value_enum)]
    style: Option<CliStyle>,

    /// Maximum characters per cue line
    #[arg(short, long)]
    max_line_chars: Option<usize>,

    /// Keep simplified characters as they are
    #[arg(long)]
    no_convert: bool,

    /// How chunk weights are computed for proportional timing
    #[arg(long, value_enum)]
    weight_model: Option<CliWeightModel>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_colour_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_colour_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Installed at trace so the config can raise or lower the max level later
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "narrasub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        Some(Commands::Check(args)) => run_check(args),
        None => {
            // Default behavior - use top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let args = GenerateArgs {
                input_path,
                duration: cli.duration,
                audio: cli.audio,
                words: cli.words,
                output_dir: cli.output_dir,
                language: cli.language,
                style: cli.style,
                max_line_chars: cli.max_line_chars,
                no_convert: cli.no_convert,
                weight_model: cli.weight_model,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(args).await
        }
    }
}

// Load conf.json, creating it with defaults when missing
fn load_config(config_path: &str, log_level: Option<&CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    match log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_config(&args.config_path, args.log_level.as_ref())?;

    // Override config with CLI options if provided
    if let Some(language) = &args.language {
        config.language = language.clone();
    }
    if let Some(max_line_chars) = args.max_line_chars {
        config.segmentation.max_line_chars = max_line_chars;
        let language = config.language.clone();
        if let Some(profile) = config
            .language_profiles
            .iter_mut()
            .find(|p| narrasub::language_utils::language_codes_match(&p.language, &language))
        {
            profile.max_line_chars = max_line_chars;
        }
    }
    if args.no_convert {
        config.convert_to_traditional = false;
        for profile in &mut config.language_profiles {
            profile.convert_to_traditional = Some(false);
        }
    }
    if let Some(model) = args.weight_model {
        config.timing.weight_model = model.into();
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;

    if !args.input_path.exists() {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }
    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None if args.input_path.is_dir() => args.input_path.clone(),
        None => args
            .input_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf(),
    };

    let options = RunOptions {
        durations: args.duration,
        audio: args.audio,
        words: args.words,
        style: args.style.map(Into::into),
        force_overwrite: args.force_overwrite,
    };

    if let Some(summary) = controller.run(args.input_path, output_dir, &options).await? {
        if summary.degradation_count > 0 {
            warn!(
                "{} degradation(s) while building subtitles, see log above",
                summary.degradation_count
            );
        }
        info!("Success: {}", summary.srt_path.display());
    }

    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level.as_ref())?;
    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let report = controller.check_srt(&args.path, args.duration)?;

    for line in report.issue_lines() {
        warn!("{}", line);
    }
    if report.passed {
        info!("No issues found in {}", args.path.display());
        Ok(())
    } else {
        error!("{} issue(s) found in {}", report.total_issues(), args.path.display());
        Err(anyhow!("Validation failed"))
    }
}
