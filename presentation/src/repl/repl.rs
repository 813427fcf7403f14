//! REPL (Read-Eval-Print Loop) for interactive solving
//!
//! Repeatedly reads a line of text, runs a solve on it, and prints the
//! outcome (JSON-serialized by default). Carries no orchestration logic.

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use triad_application::{BehaviorConfig, NoProgress, RunSolveUseCase, SolveInput};
use triad_domain::Question;

/// Interactive solve REPL
pub struct SolveRepl {
    use_case: RunSolveUseCase,
    behavior: BehaviorConfig,
    output: OutputFormat,
    show_progress: bool,
}

impl SolveRepl {
    /// Create a new REPL. Outcomes are printed as JSON unless overridden.
    pub fn new(use_case: RunSolveUseCase, behavior: BehaviorConfig) -> Self {
        Self {
            use_case,
            behavior,
            output: OutputFormat::Json,
            show_progress: true,
        }
    }

    /// Set whether to show progress spinners
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set the output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("triad").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("+---------------------------------------------+");
        println!("|            triad - interactive mode         |");
        println!("+---------------------------------------------+");
        println!();
        println!("Type a question to solve it, /help for commands.");
        println!();
    }

    /// Handle a slash command. Returns `true` to exit the REPL.
    fn handle_command(&self, line: &str) -> bool {
        match line {
            "/exit" | "/quit" => {
                println!("Bye!");
                true
            }
            "/help" => {
                println!("Commands:");
                println!("  /help         Show this help");
                println!("  /exit, /quit  Leave the REPL");
                println!();
                println!("Anything else is solved as a question.");
                false
            }
            other => {
                println!("Unknown command: {} (try /help)", other);
                false
            }
        }
    }

    async fn process_question(&self, line: &str) {
        let question = match Question::try_new(line) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        let input = SolveInput::new(question).with_behavior(self.behavior.clone());

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(input, &progress).await
        } else {
            self.use_case.execute_with_progress(input, &NoProgress).await
        };

        match result {
            Ok(outcome) => {
                let rendered = match self.output {
                    OutputFormat::Full => ConsoleFormatter::format(&outcome),
                    OutputFormat::Answer => ConsoleFormatter::format_answer_only(&outcome),
                    OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
                };
                println!("{}", rendered);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }
}
