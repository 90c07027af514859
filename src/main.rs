use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use xword_dsl::pipeline::{self, Crossword, Rejection};
use xword_dsl::{Dimensions, ParseMode, ParseOptions};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// What to print for a puzzle that parses cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Spec JSON including answers
    Spec,
    /// Spec JSON without answers
    SpecWithoutAnswers,
    /// Regenerated DSL with answer letters
    Dsl,
    /// Regenerated DSL with word sizes only
    DslWithoutAnswers,
    /// Plain-text picture of the filled grid
    Grid,
    /// Spec JSON, or the error list as JSON, always exiting successfully
    Response,
}

/// Crossword DSL / JSON parser and validator
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// DSL or JSON file to read ("-" or nothing for stdin)
    input: Option<PathBuf>,

    /// Fill absent front-matter fields with defaults instead of reporting them
    #[arg(short, long)]
    lenient: bool,

    /// Accepted grid size as RxC; repeat to accept several (replaces the default list)
    #[arg(short, long = "size", value_name = "RxC")]
    sizes: Vec<Dimensions>,

    /// What to print on success
    #[arg(short, long, value_enum, default_value_t = Output::Spec)]
    output: Output,
}

impl Cli {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::default();
        if self.lenient {
            options.mode = ParseMode::Lenient;
        }
        if !self.sizes.is_empty() {
            options = options.with_sizes(self.sizes.iter().copied());
        }
        options
    }

    fn read_input(&self) -> std::io::Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
            _ => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// Entry point of the crossword CLI.
///
/// Delegates to [`try_main`], printing any error it returns before exiting
/// with a failure code.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("XWORD_DEBUG").is_ok();
    xword_dsl::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(rejection) = e.downcast_ref::<Rejection>() {
            for message in &rejection.errors {
                eprintln!("{message}");
            }
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn render(crossword: &Crossword, output: Output) -> Result<String, serde_json::Error> {
    Ok(match output {
        Output::Spec | Output::Response => crossword.spec_json(true)?,
        Output::SpecWithoutAnswers => crossword.spec_json(false)?,
        Output::Dsl => crossword.dsl_with_answers.clone(),
        Output::DslWithoutAnswers => crossword.dsl_without_answers.clone(),
        Output::Grid => crossword.grid_text(),
    })
}

/// Reads the input, parses it and prints the requested output on stdout.
///
/// A rejected puzzle is returned as an error, except with `--output response`
/// where the error list is printed as JSON instead.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = cli.options();
    let text = cli.read_input()?;
    log::debug!("read {} bytes, options {options:?}", text.len());

    let crossword = match pipeline::parse(&text, &options) {
        Ok(crossword) => crossword,
        Err(rejection) if cli.output == Output::Response => {
            println!("{}", rejection.to_json()?);
            return Ok(());
        }
        Err(rejection) => return Err(rejection.into()),
    };

    println!("{}", render(&crossword, cli.output)?);
    Ok(())
}
