//! Command-line surface shared by both chatbot binaries.
//!
//! Stdout carries only the JSON payload (or the interactive conversation);
//! every diagnostic goes to stderr so callers can pipe the output straight
//! into a JSON parser.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::application::dtos::AnswerResponse;
use crate::application::services::ChatBackend;

pub const USAGE: &str = "\
Usage: sahayak [OPTIONS] [QUERY]

  sahayak \"<query>\"                  answer one query as {\"response\": ...}
  sahayak --get-suggested-questions  print starter questions as a JSON array
  sahayak                            interactive prompt on stdin

Options:
  --dataset <path>   override the corpus CSV location
  -h, --help         show this help";

/// What the invocation asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer(String),
    SuggestedQuestions,
    Interactive,
    Help,
}

/// Parsed argument set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub dataset: Option<PathBuf>,
}

pub fn parse_args<I>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut dataset = None;
    let mut command: Option<Command> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--get-suggested-questions" => {
                if command.is_some() {
                    return Err("--get-suggested-questions cannot be combined with a query".into());
                }
                command = Some(Command::SuggestedQuestions);
            }
            "--dataset" => {
                let path = args.next().ok_or("--dataset requires a path")?;
                dataset = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(Invocation {
                command: Command::Help,
                dataset,
            }),
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag: {flag}"));
            }
            query => {
                if command.is_some() {
                    return Err(format!("unexpected extra argument: {query}"));
                }
                command = Some(Command::Answer(query.to_string()));
            }
        }
    }

    Ok(Invocation {
        command: command.unwrap_or(Command::Interactive),
        dataset,
    })
}

/// Execute one command against a backend.
pub fn run(backend: &dyn ChatBackend, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Answer(query) => {
            let payload = AnswerResponse::new(backend.answer(query));
            println!("{}", serde_json::to_string(&payload)?);
        }
        Command::SuggestedQuestions => {
            println!("{}", serde_json::to_string(backend.suggested_questions())?);
        }
        Command::Interactive => run_interactive(backend)?,
        Command::Help => eprintln!("{USAGE}"),
    }
    Ok(())
}

fn run_interactive(backend: &dyn ChatBackend) -> anyhow::Result<()> {
    println!("Pension Grievance Chatbot. Type 'exit' to quit.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Your query: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }

        println!("Bot: {}", backend.answer(input));
    }

    Ok(())
}
