use anyhow::Context;
use chrono::Local;
use clap::{Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand};
use newscheck::analysis::{AnalysisError, Analyzer};
use newscheck::classifier::CommandClassifier;
use newscheck::config::{CliConfig, ConfigError};
use newscheck::report::Report;
use newscheck::schema::report_schema;
use newscheck::{logging, terminal};
use is_terminal::IsTerminal;
use std::io::{Read, stderr};
use std::path::PathBuf;

const EXIT_ANALYSIS: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_OUTPUT: i32 = 3;

#[derive(Parser)]
#[command(
    name = "newscheck",
    about = "Classify Arabic news text as real, fake or uncertain",
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify news text through the configured classifier
    Analyze(AnalyzeArgs),
    /// Decide from a probability pair directly
    Decide(DecideArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
    /// Print the JSON schema of the report
    Schema,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output JSON (stable schema)
    #[arg(long, conflicts_with = "raw")]
    json: bool,

    /// Plain key = value lines without colors/headers
    #[arg(long)]
    raw: bool,
}

#[derive(Args, Clone)]
struct AnalyzeArgs {
    /// News text; read from --file or stdin when omitted
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Read the news text from a file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Program that runs the model (overrides [classifier].command)
    #[arg(long = "classifier-cmd", value_name = "PROGRAM")]
    classifier_cmd: Option<String>,

    /// Argument for --classifier-cmd; repeat for several
    #[arg(
        long = "classifier-arg",
        value_name = "ARG",
        requires = "classifier_cmd",
        allow_hyphen_values = true
    )]
    classifier_args: Vec<String>,

    /// Confidence threshold in (0, 1]
    #[arg(long, value_name = "T", allow_negative_numbers = true)]
    threshold: Option<f64>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Clone)]
struct DecideArgs {
    /// Probability of the real class
    #[arg(long, value_name = "P", allow_negative_numbers = true)]
    real: f64,

    /// Probability of the fake class
    #[arg(long, value_name = "P", allow_negative_numbers = true)]
    fake: f64,

    /// Confidence threshold in (0, 1]
    #[arg(long, value_name = "T", allow_negative_numbers = true)]
    threshold: Option<f64>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Clone)]
struct ConfigArgs {
    /// Print the default config file location
    #[arg(long)]
    path: bool,
}

fn config_failure(e: ConfigError) -> i32 {
    eprintln!("Error: {}", e);
    EXIT_CONFIG
}

fn load_config(path: Option<&std::path::Path>, threshold: Option<f64>) -> Result<CliConfig, i32> {
    let config = CliConfig::load(path)
        .and_then(CliConfig::apply_env)
        .map_err(config_failure)?
        .with_threshold(threshold);
    // Reject a bad threshold up front, before any classifier work.
    config.threshold().map_err(config_failure)?;
    Ok(config)
}

fn emit(report: &Report, output: &OutputArgs, color: bool) -> Result<(), i32> {
    if output.json {
        match report.render_json() {
            Ok(s) => println!("{}", s),
            Err(_) => return Err(EXIT_OUTPUT),
        }
    } else if output.raw {
        println!("{}", report.render_raw());
    } else {
        println!("{}", report.render_human(color));
    }
    Ok(())
}

fn read_text(args: &AnalyzeArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    Ok(text)
}

fn run_decide(args: DecideArgs, config_path: Option<PathBuf>, color: bool) -> Result<(), i32> {
    let config = load_config(config_path.as_deref(), args.threshold)?;
    let engine = config.engine().map_err(config_failure)?;

    let result = match engine.decide(args.real, args.fake) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(EXIT_ANALYSIS);
        }
    };

    emit(&Report::new(&result, engine.threshold()), &args.output, color)
}

fn run_analyze(args: AnalyzeArgs, config_path: Option<PathBuf>, color: bool) -> Result<(), i32> {
    let config = load_config(config_path.as_deref(), args.threshold)?;
    let engine = config.engine().map_err(config_failure)?;

    let classifier = match &args.classifier_cmd {
        Some(program) => Some(
            CommandClassifier::new(program.clone())
                .args(args.classifier_args.iter().cloned())
                .model(config.classifier.model.clone()),
        ),
        None => config.command_classifier(),
    };
    let Some(classifier) = classifier else {
        let location = config_path
            .or_else(CliConfig::config_file_path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "the config file".to_string());
        eprintln!(
            "Error: no classifier configured; pass --classifier-cmd or set [classifier].command in {}",
            location
        );
        return Err(EXIT_CONFIG);
    };

    let text = match read_text(&args) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Err(EXIT_ANALYSIS);
        }
    };

    let analyzer = Analyzer::new(classifier, engine)
        .labels(config.labels())
        .min_chars(config.input.min_chars);

    let analysis = match analyzer.analyze(&text) {
        Ok(a) => a,
        Err(e @ AnalysisError::Input(_)) => {
            eprintln!("Error: {}", e);
            return Err(EXIT_ANALYSIS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Please try again or contact support if the issue persists.");
            return Err(EXIT_ANALYSIS);
        }
    };

    let report = Report::new(&analysis.decision, engine.threshold())
        .with_chars(analysis.chars)
        .with_completed_at(Local::now());
    emit(&report, &args.output, color)
}

fn run_config(args: ConfigArgs, config_path: Option<PathBuf>) -> Result<(), i32> {
    if args.path {
        return match config_path.or_else(CliConfig::config_file_path) {
            Some(p) => {
                println!("{}", p.display());
                Ok(())
            }
            None => {
                eprintln!("Error: no config directory available on this system");
                Err(EXIT_CONFIG)
            }
        };
    }

    let config = load_config(config_path.as_deref(), None)?;
    match toml::to_string_pretty(&config) {
        Ok(s) => {
            print!("{}", s);
            Ok(())
        }
        Err(_) => Err(EXIT_OUTPUT),
    }
}

fn run_schema() -> Result<(), i32> {
    match serde_json::to_string_pretty(&report_schema()) {
        Ok(s) => {
            println!("{}", s);
            Ok(())
        }
        Err(_) => Err(EXIT_OUTPUT),
    }
}

fn detect_color_choice() -> ColorChoice {
    // Scan args before clap so help/errors honor `--no-color`.
    // Stop at `--`, which terminates flags.
    let mut args = std::env::args_os();
    args.next();
    let mut flag = false;
    for arg in args {
        if arg == "--" {
            break;
        }
        if arg == "--no-color" {
            flag = true;
            break;
        }
    }
    if flag || terminal::no_color_requested() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn main() {
    let color = detect_color_choice();
    let matches = Cli::command().color(color).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let never = matches!(color, ColorChoice::Never);
    logging::init(cli.verbose, !never && stderr().is_terminal());
    let want_color = terminal::stdout_color(never || cli.no_color);

    let result = match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args, cli.config, want_color),
        Some(Commands::Decide(args)) => run_decide(args, cli.config, want_color),
        Some(Commands::Config(args)) => run_config(args, cli.config),
        Some(Commands::Schema) => run_schema(),
        None => Ok(()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
