use kriek::runtime::{
    built_ins::register_primitive_messages,
    config::{max_evaluation_depth_from_env, parse_arguments},
    data_structures::value::Value,
    error::{self, ErrorKind, ScriptError},
    interpreter::{
        CodeManagement, Interpreter, InterpreterStack, ScopeManagement,
        kriek_interpreter::KriekInterpreter,
    },
};
use std::{
    env::{args, current_exe, var},
    path::Path,
};
use tracing::info;

/// The standard lexicon, run before the user's program.
const ESSENTIAL_LEXICON: &str = "essential.kr";

/// Install the log subscriber.  Logging stays off unless KRIEK_LOG or RUST_LOG is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_env("KRIEK_LOG").or_else(|_| EnvFilter::try_from_default_env());

    if let Ok(filter) = filter {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(filter)
            .init();
    }
}

/// Get a directory path for the standard lexicon.  This is either in the directory of the
/// executable or in a directory specified by the environment variable KRIEK_LIB_PATH.
fn std_lib_directory() -> error::Result<String> {
    if let Ok(lib_path) = var("KRIEK_LIB_PATH") {
        return Ok(lib_path);
    }

    match current_exe() {
        Ok(exe_path) => match exe_path.parent().map(|directory| directory.to_str()) {
            Some(Some(directory)) => Ok(directory.to_string()),
            Some(None) => ScriptError::detached(
                ErrorKind::Io,
                "Executable directory path includes invalid characters.".to_string(),
            ),
            None => ScriptError::detached(
                ErrorKind::Io,
                "Could not get the directory of the running executable.".to_string(),
            ),
        },

        Err(err) => ScriptError::detached(
            ErrorKind::Io,
            format!("Could not get the current executable path: {}", err),
        ),
    }
}

fn format_stack(stack: &[Value]) -> String {
    let mut text = String::from("[");

    for value in stack {
        text.push(' ');
        text.push_str(&value.to_string());
    }

    text.push_str(" ]");
    text
}

fn main() -> error::Result<()> {
    init_tracing();

    let arguments: Vec<String> = args().skip(1).collect();
    let options = parse_arguments(&arguments)?;

    let mut interpreter = KriekInterpreter::new();

    if let Some(depth) = max_evaluation_depth_from_env()? {
        interpreter.set_max_evaluation_depth(depth);
    }

    // The lexicon directory of a source checkout is the last resort.
    if Path::new("lexicon").is_dir() {
        interpreter.add_search_path("lexicon")?;
    }

    let lib_directory = std_lib_directory()?;

    if Path::new(&lib_directory).is_dir() {
        interpreter.add_search_path(&lib_directory)?;
    }

    register_primitive_messages(&mut interpreter);

    info!(lexicon = ESSENTIAL_LEXICON, "loading standard lexicon");
    interpreter.process_source_file(ESSENTIAL_LEXICON)?;

    let user_source = interpreter.find_file(&options.script)?;
    interpreter.process_source_file(&user_source)?;

    println!("Stack = {}", format_stack(interpreter.stack()));

    if options.dump_dictionary {
        println!();
        println!("Global Dictionary =");
        print!("{}", interpreter.dictionary());
    }

    Ok(())
}
