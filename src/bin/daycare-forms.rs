//! Daycare Forms CLI
//!
//! Command-line interface for validating form shapes against the built-in
//! application forms.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use daycare_forms::config::{Config, Environment};
use daycare_forms::forms::FormKind;
use daycare_forms::messages::{message, Lang};
use daycare_forms::{load_shape, validate, ErrorTag, ValidateError};

#[derive(Parser)]
#[command(name = "daycare-forms")]
#[command(about = "Validate daycare form shapes")]
#[command(version)]
struct Cli {
    /// Deployment environment (selects logging and output defaults)
    #[arg(long, value_enum, global = true, default_value_t = Environment::Local)]
    env: Environment,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a shape document against a built-in form
    Validate {
        /// Shape file to validate
        shape: PathBuf,

        /// Form to validate against
        #[arg(long, short, value_enum)]
        form: FormKind,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,

        /// Language for error messages (default: fi)
        #[arg(long, value_enum)]
        lang: Option<Lang>,
    },

    /// List the built-in forms and their top-level fields
    Forms {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the message table for validation error tags
    Messages {
        /// Language of the table (default: fi)
        #[arg(long, value_enum)]
        lang: Option<Lang>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::for_environment(cli.env);
    init_logging(&config);

    let result = match cli.command {
        Commands::Validate {
            shape,
            form,
            json,
            lang,
        } => run_validate(&config, &shape, form, json, lang.unwrap_or_default()),

        Commands::Forms { json } => run_forms(json),

        Commands::Messages { lang } => run_messages(lang.unwrap_or_default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_validate(
    config: &Config,
    shape_path: &Path,
    form: FormKind,
    json_output: bool,
    lang: Lang,
) -> Result<(), u8> {
    tracing::debug!(
        form = form.name(),
        environment = ?config.environment,
        "validating {}",
        shape_path.display()
    );

    let shape = load_shape(shape_path).map_err(|e| {
        report_error(json_output, &format!("loading shape: {}", e));
        e.exit_code() as u8
    })?;

    match validate(form, &shape) {
        Ok(output) => {
            if json_output {
                let mut report = serde_json::json!({ "valid": true });
                if config.echo_output {
                    report["output"] = output;
                }
                println!("{}", report);
            } else {
                println!("Valid");
                if config.echo_output {
                    println!("{}", to_pretty(&output)?);
                }
            }
            Ok(())
        }
        Err(ValidateError::Invalid { error }) => {
            let issues = error.issues();
            if json_output {
                let messages: Vec<_> = issues
                    .iter()
                    .map(|issue| {
                        serde_json::json!({
                            "path": issue.path,
                            "tag": issue.tag,
                            "message": message(issue.tag, lang),
                        })
                    })
                    .collect();
                let output = serde_json::json!({
                    "valid": false,
                    "errors": error,
                    "issues": messages,
                });
                println!("{}", output);
            } else {
                eprintln!("Validation failed:");
                for issue in issues {
                    eprintln!("  {} ({})", issue, message(issue.tag, lang));
                }
            }
            Err(1)
        }
        Err(e @ ValidateError::Load(_)) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}

fn to_pretty(value: &serde_json::Value) -> Result<String, u8> {
    serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })
}

fn run_forms(json_output: bool) -> Result<(), u8> {
    if json_output {
        let forms: Vec<_> = FormKind::value_variants()
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "name": kind.name(),
                    "description": kind.description(),
                    "fields": kind.fields(),
                })
            })
            .collect();
        println!("{}", to_pretty(&serde_json::Value::Array(forms))?);
    } else {
        for kind in FormKind::value_variants() {
            println!("{:<12} {}", kind.name(), kind.description());
            println!("{:<12} fields: {}", "", kind.fields().join(", "));
        }
    }
    Ok(())
}

fn run_messages(lang: Lang) -> Result<(), u8> {
    for tag in ErrorTag::ALL {
        println!("{:<14} {}", tag.as_str(), message(tag, lang));
    }
    Ok(())
}
