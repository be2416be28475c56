use std::process::ExitCode;

use command_dispatch_core::{
    CommandRegistry, CommandSchema, DispatchConfig, Dispatcher, HandlerError, HandlerResult,
    ParamSchema, RegistrationError, ResolvedParameters, run_to_exit,
};
use tracing::debug;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming an optional YAML dispatch config.
const CONFIG_ENV: &str = "DISPATCH_CONFIG";

/// Upper bound for `--times` and `--precision`.
const MAX_COUNT: f64 = 1000.0;

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let dispatcher = Dispatcher::with_config(registry, config);
    let argv: Vec<String> = std::env::args().collect();
    run_to_exit(&dispatcher, &argv)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Result<DispatchConfig, command_dispatch_core::ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            debug!(path = ?path, "loading dispatch config");
            DispatchConfig::load(path)
        }
        None => Ok(DispatchConfig::native()),
    }
}

fn build_registry() -> Result<CommandRegistry, RegistrationError> {
    CommandRegistry::new()
        .with_command(
            CommandSchema::new("default")
                .with_description("Show version or the command list")
                .with_param(
                    ParamSchema::boolean("version")
                        .with_shorthand("V")
                        .with_description("Print the version"),
                ),
            run_default,
        )?
        .with_command(
            CommandSchema::new("greet")
                .with_description("Print a greeting")
                .with_param(
                    ParamSchema::string("name")
                        .with_shorthand("n")
                        .with_description("Who to greet"),
                )
                .with_param(ParamSchema::boolean("loud").with_shorthand("l"))
                .with_param(
                    ParamSchema::number("times")
                        .with_default(1)
                        .with_description("How many lines to print"),
                ),
            run_greet,
        )?
        .with_command(
            CommandSchema::new("divide")
                .with_description("Divide two numbers")
                .with_param(ParamSchema::number("dividend"))
                .with_param(ParamSchema::number("divisor"))
                .with_param(
                    ParamSchema::number("precision")
                        .optional()
                        .with_description("Decimal places"),
                ),
            run_divide,
        )?
        .with_command(
            CommandSchema::new("inspect")
                .with_description("Print resolved parameters as JSON")
                .with_param(ParamSchema::string("label").optional())
                .with_param(ParamSchema::number("level").with_default(0))
                .with_param(ParamSchema::boolean("dry-run")),
            run_inspect,
        )
}

fn run_default(params: ResolvedParameters) -> HandlerResult {
    if params.get_bool("version") == Some(true) {
        println!("dispatch-demo {PACKAGE_VERSION}");
    } else {
        println!("dispatch-demo: try `greet --name <name>`, `divide` or `inspect`");
    }
    Ok(())
}

fn run_greet(params: ResolvedParameters) -> HandlerResult {
    let name = params.get_str("name").unwrap_or_default();
    let times = bounded_count("times", params.get_number("times").unwrap_or(1.0))?;

    let line = if params.get_bool("loud") == Some(true) {
        format!("HELLO, {}!", name.to_uppercase())
    } else {
        format!("Hello, {name}.")
    };
    for _ in 0..times {
        println!("{line}");
    }
    Ok(())
}

fn run_divide(params: ResolvedParameters) -> HandlerResult {
    let dividend = params.get_number("dividend").unwrap_or_default();
    let divisor = params.get_number("divisor").unwrap_or_default();
    if divisor == 0.0 {
        return Err("division by zero".into());
    }

    let quotient = dividend / divisor;
    match params.get_number("precision") {
        Some(places) => println!("{:.*}", bounded_count("precision", places)?, quotient),
        None => println!("{quotient}"),
    }
    Ok(())
}

fn bounded_count(name: &str, value: f64) -> Result<usize, HandlerError> {
    if value < 0.0 || value.fract() != 0.0 || value > MAX_COUNT {
        return Err(
            format!("--{name} must be an integer between 0 and {MAX_COUNT}, got {value}").into(),
        );
    }
    Ok(value as usize)
}

fn run_inspect(params: ResolvedParameters) -> HandlerResult {
    println!("{}", serde_json::to_string(&params)?);
    Ok(())
}
