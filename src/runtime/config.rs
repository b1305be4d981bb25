use crate::runtime::error::{self, ErrorKind, ScriptError};
use std::env::var;

/// Environment variable holding the evaluation depth limit.
pub const MAX_DEPTH_VARIABLE: &str = "KRIEK_MAX_DEPTH";

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// The program to run.
    pub script: String,

    /// Print the global dictionary after the final stack.
    pub dump_dictionary: bool,
}

/// Parse the arguments following the program name: `[--dump] FILE`.
pub fn parse_arguments(arguments: &[String]) -> error::Result<Options> {
    let mut script = None;
    let mut dump_dictionary = false;

    for argument in arguments {
        match argument.as_str() {
            "--dump" => dump_dictionary = true,
            flag if flag.starts_with("--") => {
                return ScriptError::detached(
                    ErrorKind::Configuration,
                    format!("Unknown option {}.  Usage: kriek [--dump] FILE", flag),
                );
            }
            path if script.is_none() => script = Some(path.to_string()),
            _ => {
                return ScriptError::detached(
                    ErrorKind::Configuration,
                    "Usage: kriek [--dump] FILE".to_string(),
                );
            }
        }
    }

    match script {
        Some(script) => Ok(Options {
            script,
            dump_dictionary,
        }),
        None => ScriptError::detached(
            ErrorKind::Configuration,
            "Usage: kriek [--dump] FILE".to_string(),
        ),
    }
}

/// Parse an evaluation depth limit.  It must be a positive integer.
pub fn parse_max_evaluation_depth(text: &str) -> error::Result<usize> {
    match text.trim().parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => ScriptError::detached(
            ErrorKind::Configuration,
            format!(
                "{} must be a positive integer, found '{}'.",
                MAX_DEPTH_VARIABLE, text
            ),
        ),
    }
}

/// Read the evaluation depth limit from the environment, if set.
pub fn max_evaluation_depth_from_env() -> error::Result<Option<usize>> {
    match var(MAX_DEPTH_VARIABLE) {
        Ok(text) => parse_max_evaluation_depth(&text).map(Some),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn strings(arguments: &[&str]) -> Vec<String> {
        arguments.iter().map(|argument| argument.to_string()).collect()
    }

    #[test_case("1", 1 ; "smallest")]
    #[test_case("512", 512 ; "default")]
    #[test_case(" 64\n", 64 ; "surrounding whitespace")]
    fn depth_limits_that_parse(text: &str, expected: usize) {
        assert_eq!(parse_max_evaluation_depth(text).unwrap(), expected);
    }

    #[test_case("0" ; "zero")]
    #[test_case("-3" ; "negative")]
    #[test_case("deep" ; "not a number")]
    #[test_case("2.5" ; "fractional")]
    #[test_case("" ; "empty")]
    fn depth_limits_that_fail(text: &str) {
        let error = parse_max_evaluation_depth(text).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.error().contains(MAX_DEPTH_VARIABLE));
    }

    #[test]
    fn script_alone() {
        let options = parse_arguments(&strings(&["run.kr"])).unwrap();

        assert_eq!(options.script, "run.kr");
        assert!(!options.dump_dictionary);
    }

    #[test_case(&["--dump", "run.kr"] ; "flag first")]
    #[test_case(&["run.kr", "--dump"] ; "flag last")]
    fn dump_flag_in_any_position(arguments: &[&str]) {
        let options = parse_arguments(&strings(arguments)).unwrap();

        assert_eq!(options.script, "run.kr");
        assert!(options.dump_dictionary);
    }

    #[test_case(&[] ; "no script")]
    #[test_case(&["--dump"] ; "flag without script")]
    #[test_case(&["a.kr", "b.kr"] ; "two scripts")]
    #[test_case(&["--verbose", "a.kr"] ; "unknown flag")]
    fn bad_command_lines(arguments: &[&str]) {
        let error = parse_arguments(&strings(arguments)).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.error().contains("kriek [--dump] FILE"));
    }
}
