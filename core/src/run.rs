//! Process-level reporting for binaries built on [`Dispatcher`].

use std::fmt::Display;
use std::process::ExitCode;

use tracing::debug;

use crate::dispatch::Dispatcher;

/// Dispatches `argv` and maps the outcome to a process exit code.
///
/// - parse or validation failure: the error and the usage text go to stderr,
///   exit code is failure;
/// - handler failure: the handler's error goes to stderr, exit code is
///   failure;
/// - success: nothing is printed.
///
/// # Examples
///
/// ```no_run
/// use std::process::ExitCode;
/// use command_dispatch_core::*;
///
/// fn main() -> ExitCode {
///     let registry: CommandRegistry = CommandRegistry::new()
///         .with_command(CommandSchema::new("default"), |_| Ok(()))
///         .expect("valid command schema");
///     let dispatcher = Dispatcher::with_config(registry, DispatchConfig::native());
///     let argv: Vec<String> = std::env::args().collect();
///     run_to_exit(&dispatcher, &argv)
/// }
/// ```
pub fn run_to_exit<T, E, S>(dispatcher: &Dispatcher<Result<T, E>>, argv: &[S]) -> ExitCode
where
    E: Display,
    S: AsRef<str>,
{
    let invocation = match dispatcher.resolve(argv) {
        Ok(invocation) => invocation,
        Err(err) => {
            debug!(error = %err, "dispatch failed before invoking a handler");
            eprintln!("error: {err}");
            eprintln!();
            eprint!("{}", dispatcher.usage_for(argv));
            return ExitCode::FAILURE;
        }
    };

    let command = invocation.command().to_string();
    match invocation.invoke() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(%command, error = %err, "handler failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{CommandRegistry, CommandSchema, ParamSchema};

    use super::*;

    fn dispatcher() -> Dispatcher<Result<(), String>> {
        let registry = CommandRegistry::new()
            .with_command(
                CommandSchema::new("check").with_param(ParamSchema::number("limit")),
                |params| match params.get_number("limit") {
                    Some(n) if n > 10.0 => Err(format!("limit {n} too high")),
                    _ => Ok(()),
                },
            )
            .unwrap();
        Dispatcher::new(registry)
    }

    #[test]
    fn test_success_exit_code() {
        let code = run_to_exit(&dispatcher(), &["node", "bin", "check", "--limit=3"]);
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_parse_failure_exit_code() {
        let code = run_to_exit(&dispatcher(), &["node", "bin", "check"]);
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_handler_failure_exit_code() {
        let code = run_to_exit(&dispatcher(), &["node", "bin", "check", "--limit=11"]);
        assert_eq!(code, ExitCode::FAILURE);
    }
}
