//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging and the settings store
//! - dispatches to the report, analysis and settings handlers
//! - launches the terminal lab

use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use crate::ai::{AnalysisClient, AnalysisRequest, AnalysisService, Provider, validate_api_key};
use crate::cli::{AnalyzeArgs, Command, ConfigCommand, ConfigSetArgs, EvalArgs, ReportArgs, TuiArgs};
use crate::data::{Dataset, INITIAL_PARAMS};
use crate::domain::{FitParameters, Metrics};
use crate::error::AppError;
use crate::logging::{self, LogTarget};
use crate::settings::{AiSettings, JsonFileStore, KeyValueStore, default_settings_path};

pub mod state;

pub use state::RegressionState;

/// Rows shown in the "largest residuals" block of the text report.
const TOP_RESIDUALS: usize = 5;

/// Entry point for the `reglab` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `reglab` and `reglab --slope 1` behave like `reglab tui ...`. Clap needs a
    // subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let target = match cli.command {
        Command::Tui(_) => LogTarget::Quiet,
        _ => LogTarget::Stderr,
    };
    logging::init(target)?;

    let mut store = JsonFileStore::new(cli.settings.unwrap_or_else(default_settings_path));

    match cli.command {
        Command::Tui(args) => handle_tui(args, store),
        Command::Fit(args) => handle_fit(args),
        Command::Eval(args) => handle_eval(args),
        Command::Analyze(args) => {
            let client = AnalysisClient::new()?;
            handle_analyze(args, &client, &mut store)
        }
        Command::Config(cmd) => handle_config(cmd, &mut store),
    }
}

fn handle_tui(args: TuiArgs, store: JsonFileStore) -> Result<(), AppError> {
    let params = FitParameters::new(
        args.slope.unwrap_or(INITIAL_PARAMS.slope),
        args.intercept.unwrap_or(INITIAL_PARAMS.intercept),
    );
    check_finite(params)?;
    crate::tui::run(params, Box::new(store))
}

fn handle_fit(args: ReportArgs) -> Result<(), AppError> {
    let mut state = RegressionState::new(Dataset::galton(), INITIAL_PARAMS);
    state.auto_fit()?;
    print_report(&state, &args, "least-squares fit")
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let params = FitParameters::new(args.slope, args.intercept);
    check_finite(params)?;
    let state = RegressionState::new(Dataset::galton(), params);
    print_report(&state, &args.report, "manual line")
}

#[derive(Debug, Serialize)]
struct JsonReport {
    n: usize,
    params: FitParameters,
    metrics: Metrics,
}

fn print_report(state: &RegressionState, args: &ReportArgs, title: &str) -> Result<(), AppError> {
    let residuals = state.residuals();

    if args.json {
        let report = JsonReport {
            n: state.dataset().len(),
            params: state.parameters(),
            metrics: state.metrics(),
        };
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::runtime(format!("Failed to encode JSON report: {e}")))?;
        println!("{text}");
    } else {
        print!(
            "{}",
            crate::report::format_summary(state.dataset(), state.parameters(), &state.metrics(), title)
        );
        println!("{}", crate::report::format_residual_table(&residuals));
        println!("Largest residuals:");
        print!(
            "{}",
            crate::report::format_residual_table(&crate::report::largest_residuals(&residuals, TOP_RESIDUALS))
        );

        if !args.no_plot {
            println!();
            let plot = crate::plot::render_ascii_plot(state.dataset(), state.parameters(), args.width, args.height);
            println!("{plot}");
        }
    }

    if let Some(path) = &args.export {
        crate::io::export::write_residuals_csv(path, &residuals)?;
    }

    Ok(())
}

/// Run one blocking analysis and print the report.
///
/// Credentials come from the store unless overridden on the command line. A
/// credential-class failure clears the stored settings.
pub fn handle_analyze(
    args: AnalyzeArgs,
    service: &dyn AnalysisService,
    store: &mut dyn KeyValueStore,
) -> Result<(), AppError> {
    let mut state = RegressionState::new(Dataset::galton(), INITIAL_PARAMS);
    if args.auto_fit {
        state.auto_fit()?;
    } else {
        let params = FitParameters::new(
            args.slope.unwrap_or(INITIAL_PARAMS.slope),
            args.intercept.unwrap_or(INITIAL_PARAMS.intercept),
        );
        check_finite(params)?;
        state.set_parameters(params);
    }

    let request = build_request(&args, &state, AiSettings::load(store)?);
    if !request.api_key.is_empty() && !validate_api_key(&request.api_key, request.provider) {
        warn!(
            "API key does not look like a {} key ({})",
            request.provider.display_name(),
            request.provider.key_format_hint()
        );
    }

    match service.analyze(&request) {
        Ok(report) => {
            println!("{report}");
            Ok(())
        }
        Err(err) => {
            if err.is_credential() {
                AiSettings::clear(store)?;
                info!("stored AI settings cleared after a credential failure");
            }
            Err(err.into())
        }
    }
}

fn build_request(args: &AnalyzeArgs, state: &RegressionState, stored: Option<AiSettings>) -> AnalysisRequest {
    let provider = args
        .provider
        .or(stored.as_ref().map(AiSettings::provider))
        .unwrap_or(Provider::Gemini);
    let model = args
        .model
        .or(stored
            .as_ref()
            .map(AiSettings::model)
            .filter(|m| m.provider() == provider))
        .map(|m| provider.resolve_model(m))
        .unwrap_or_else(|| provider.default_model());
    let api_key = args
        .api_key
        .clone()
        .or(stored
            .as_ref()
            .filter(|s| s.provider() == provider)
            .map(|s| s.api_key().to_string()))
        .unwrap_or_default();

    AnalysisRequest {
        params: state.parameters(),
        metrics: state.metrics(),
        dataset: state.dataset().clone(),
        provider,
        model,
        api_key: api_key.trim().to_string(),
    }
}

fn handle_config(cmd: ConfigCommand, store: &mut dyn KeyValueStore) -> Result<(), AppError> {
    match cmd {
        ConfigCommand::Set(ConfigSetArgs { provider, model, api_key }) => {
            let settings = AiSettings::new(&api_key, provider, model)?;
            settings.save(store)?;
            println!(
                "Saved {} / {} (key {})",
                settings.provider().display_name(),
                settings.model().id(),
                settings.masked_key()
            );
        }
        ConfigCommand::Show => match AiSettings::load(store)? {
            Some(settings) => {
                println!("provider: {}", settings.provider().id());
                println!("model:    {}", settings.model().id());
                println!("api key:  {}", settings.masked_key());
            }
            None => println!("AI not configured"),
        },
        ConfigCommand::Clear => {
            AiSettings::clear(store)?;
            println!("AI settings cleared");
        }
    }
    Ok(())
}

fn check_finite(params: FitParameters) -> Result<(), AppError> {
    if params.slope.is_finite() && params.intercept.is_finite() {
        Ok(())
    } else {
        Err(AppError::input("Slope and intercept must be finite numbers."))
    }
}

/// Rewrite argv so `reglab` defaults to `reglab tui`.
///
/// Rules:
/// - `reglab`                     -> `reglab tui`
/// - `reglab --slope 1 ...`       -> `reglab tui --slope 1 ...`
/// - `reglab --help/--version/-h` -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "fit" | "eval" | "analyze" | "config");
    if is_subcommand {
        return argv;
    }

    // A leading flag means "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AnalysisError, ModelId};
    use crate::error::{EXIT_CONFIG, EXIT_RUNTIME};
    use crate::settings::MemoryStore;
    use std::sync::Mutex;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_and_flags_default_to_tui() {
        assert_eq!(rewrite_args(args(&["reglab"])), args(&["reglab", "tui"]));
        assert_eq!(
            rewrite_args(args(&["reglab", "--slope", "1"])),
            args(&["reglab", "tui", "--slope", "1"])
        );
        assert_eq!(rewrite_args(args(&["reglab", "fit"])), args(&["reglab", "fit"]));
        assert_eq!(rewrite_args(args(&["reglab", "--help"])), args(&["reglab", "--help"]));
    }

    /// Records the last request and replies with a fixed outcome.
    struct Scripted {
        reply: Result<String, AnalysisError>,
        seen: Mutex<Option<AnalysisRequest>>,
    }

    impl Scripted {
        fn new(reply: Result<String, AnalysisError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(None),
            }
        }

        fn seen(&self) -> AnalysisRequest {
            self.seen.lock().unwrap().clone().expect("a request was made")
        }
    }

    impl AnalysisService for Scripted {
        fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            self.reply.clone()
        }
    }

    fn analyze_args() -> AnalyzeArgs {
        AnalyzeArgs {
            slope: None,
            intercept: None,
            auto_fit: false,
            provider: None,
            model: None,
            api_key: None,
        }
    }

    fn stored_deepseek(store: &mut MemoryStore) {
        AiSettings::new("sk-abcdefghijklmnopqrstu", Provider::DeepSeek, Some(ModelId::DeepSeekReasoner))
            .unwrap()
            .save(store)
            .unwrap();
    }

    #[test]
    fn analyze_uses_stored_settings() {
        let mut store = MemoryStore::new();
        stored_deepseek(&mut store);
        let service = Scripted::new(Ok("report".into()));

        handle_analyze(analyze_args(), &service, &mut store).unwrap();

        let seen = service.seen();
        assert_eq!(seen.provider, Provider::DeepSeek);
        assert_eq!(seen.model, ModelId::DeepSeekReasoner);
        assert_eq!(seen.api_key, "sk-abcdefghijklmnopqrstu");
        assert_eq!(seen.params, INITIAL_PARAMS);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn analyze_auto_fit_sends_least_squares_line() {
        let mut store = MemoryStore::new();
        stored_deepseek(&mut store);
        let service = Scripted::new(Ok("report".into()));

        let mut a = analyze_args();
        a.auto_fit = true;
        handle_analyze(a, &service, &mut store).unwrap();

        let seen = service.seen();
        assert!((seen.params.slope - 0.884517118037813).abs() < 1e-9);
        assert_eq!(seen.metrics, crate::math::compute(&Dataset::galton(), seen.params));
    }

    #[test]
    fn overriding_provider_drops_other_providers_key_and_model() {
        let mut store = MemoryStore::new();
        stored_deepseek(&mut store);
        let service = Scripted::new(Err(AnalysisError::classify("No API key provided")));

        let mut a = analyze_args();
        a.provider = Some(Provider::Gemini);
        let err = handle_analyze(a, &service, &mut store).unwrap_err();

        let seen = service.seen();
        assert_eq!(seen.model, ModelId::Gemini3Pro);
        assert!(seen.api_key.is_empty());
        assert_eq!(err.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn credential_failure_clears_settings() {
        let mut store = MemoryStore::new();
        stored_deepseek(&mut store);
        let service = Scripted::new(Err(AnalysisError::classify("DeepSeek API error (401): Unauthorized")));

        let err = handle_analyze(analyze_args(), &service, &mut store).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
        assert!(store.is_empty());
    }

    #[test]
    fn other_failures_keep_settings() {
        let mut store = MemoryStore::new();
        stored_deepseek(&mut store);
        let service = Scripted::new(Err(AnalysisError::classify("DeepSeek API error (429): slow down")));

        let err = handle_analyze(analyze_args(), &service, &mut store).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_RUNTIME);
        assert!(err.message().starts_with("API quota exhausted"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn config_set_validates_before_saving() {
        let mut store = MemoryStore::new();
        let bad = ConfigCommand::Set(ConfigSetArgs {
            provider: Provider::Gemini,
            model: None,
            api_key: "short".into(),
        });
        assert_eq!(handle_config(bad, &mut store).unwrap_err().exit_code(), EXIT_CONFIG);
        assert!(store.is_empty());

        let good = ConfigCommand::Set(ConfigSetArgs {
            provider: Provider::Gemini,
            model: Some(ModelId::Gemini3Flash),
            api_key: "AIzaXXXXXXXXXXXXXXXXXXXX".into(),
        });
        handle_config(good, &mut store).unwrap();
        assert_eq!(AiSettings::load(&store).unwrap().unwrap().model(), ModelId::Gemini3Flash);

        handle_config(ConfigCommand::Clear, &mut store).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn non_finite_parameters_are_input_errors() {
        assert!(check_finite(FitParameters::new(f64::NAN, 1.0)).is_err());
        assert!(check_finite(FitParameters::new(1.0, f64::INFINITY)).is_err());
        assert!(check_finite(INITIAL_PARAMS).is_ok());
    }
}
