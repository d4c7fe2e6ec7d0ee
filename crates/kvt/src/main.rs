use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod logging;
mod output;

use cli::Cli;
use commands::{CommandContext, CommandError};
use dispatch::Dispatch;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);
    Dispatch::from_cli(cli).execute(&ctx)
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::KeyValue(_) => "KEY_VALUE_ERROR",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Config(_) => 5,
        CommandError::KeyValue(_) => 1,
        CommandError::Input(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvtags_rs::error::KeyValueError;

    #[test]
    fn test_error_codes() {
        let cases = [
            (CommandError::Config("x".into()), "CONFIG_ERROR"),
            (CommandError::Input("x".into()), "INPUT_ERROR"),
            (
                CommandError::KeyValue(KeyValueError::invalid_round_mode("x")),
                "KEY_VALUE_ERROR",
            ),
            (
                CommandError::Io(std::io::Error::other("x")),
                "IO_ERROR",
            ),
        ];
        for (error, code) in cases {
            assert_eq!(error_code(&error), code);
        }
    }

    #[test]
    fn test_exit_statuses() {
        assert_eq!(exit_status(&CommandError::Config("x".into())), 5);
        assert_eq!(exit_status(&CommandError::Input("x".into())), 1);
        assert_eq!(
            exit_status(&CommandError::KeyValue(KeyValueError::invalid_operator("%"))),
            1
        );
        assert_eq!(exit_status(&CommandError::Io(std::io::Error::other("x"))), 3);
    }

    #[test]
    fn test_key_value_error_message_is_passed_through() {
        let error = CommandError::from(KeyValueError::unknown_type("prise", Some("price".into())));
        assert_eq!(error.to_string(), "unknown type 'prise'. Did you mean 'price'?");
    }
}
