mod command;
mod table;

pub use command::{Command, CommandParser};

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{info, warn};

use datagen_generate::{
    ExportFormat, GenerationError, GenerationReport, RecordEngine, Session, UpdateOutcome,
    export_session,
};

use crate::CliError;
use crate::workspace::write_bytes_atomic;
use table::{MAX_PREVIEW_ROWS, render_table};

const PROMPT: &str = "datagen> ";

const HELP: &str = "\
commands:
  generate <n> <entity> [with <field>, <field> and <field>]
  add <fields> [and remove <fields>]
  remove <fields> [and add <fields>]
  save [them] [to] <path.csv|path.json|path.md>
  show
  help
  exit
entities: students, college students, bank customers, employees (anything else gets placeholder values)
";

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-oriented command loop over one session.
pub struct Repl {
    engine: RecordEngine,
    session: Session,
    parser: CommandParser,
}

impl Repl {
    pub fn new(engine: RecordEngine) -> Result<Self, CliError> {
        Ok(Self {
            engine,
            session: Session::new(),
            parser: CommandParser::new()?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), CliError> {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() && self.execute(&line, out)? == Flow::Exit {
                return Ok(());
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Parse and run one line. Only output failures are returned as errors.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, CliError> {
        match self.parser.parse(line) {
            Command::Generate(request) => match self.engine.generate(&mut self.session, &request) {
                Ok(report) => {
                    self.print_batch(out)?;
                    print_report(out, &report)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Update(request) => {
                match self.engine.update(&mut self.session, &request) {
                    UpdateOutcome::Updated(report) => {
                        self.print_batch(out)?;
                        print_report(out, &report)?;
                    }
                    UpdateOutcome::NoSession => {
                        writeln!(out, "warning: nothing to update yet; generate a batch first")?
                    }
                }
            }
            Command::Save { path } => self.save(&path, out)?,
            Command::Show => {
                if self.session.is_empty() {
                    writeln!(out, "no records yet; try `generate 5 students`")?;
                } else {
                    self.print_batch(out)?;
                }
            }
            Command::Help => write!(out, "{HELP}")?,
            Command::Exit => return Ok(Flow::Exit),
            Command::Unknown(text) => {
                writeln!(out, "did not understand '{text}'; type `help` for commands")?
            }
        }
        Ok(Flow::Continue)
    }

    fn save<W: Write>(&self, path: &Path, out: &mut W) -> Result<(), CliError> {
        let exported = ExportFormat::from_path(path)
            .and_then(|format| export_session(&self.session, format));
        let bytes = match exported {
            Ok(bytes) => bytes,
            Err(GenerationError::EmptySession) => {
                warn!(path = %path.display(), "save requested with no batch in session");
                writeln!(out, "warning: nothing to save yet; generate a batch first")?;
                return Ok(());
            }
            Err(err) => {
                writeln!(out, "error: {err}")?;
                return Ok(());
            }
        };

        match write_bytes_atomic(path, &bytes) {
            Ok(()) => {
                info!(path = %path.display(), bytes = bytes.len(), "batch saved");
                writeln!(out, "saved {}", path.display())?;
            }
            Err(err) => writeln!(out, "error: could not write {}: {err}", path.display())?,
        }
        Ok(())
    }

    fn print_batch<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        if let Some(batch) = self.session.batch() {
            write!(out, "{}", render_table(batch, MAX_PREVIEW_ROWS))?;
        }
        Ok(())
    }
}

fn print_report<W: Write>(out: &mut W, report: &GenerationReport) -> Result<(), CliError> {
    writeln!(
        out,
        "{} {} {} record(s)",
        report.operation, report.records, report.entity
    )?;
    if !report.removed_fields.is_empty() {
        let removed: Vec<&str> = report.removed_fields.iter().map(String::as_str).collect();
        writeln!(out, "removed: {}", removed.join(", "))?;
    }
    if !report.placeholder_fields.is_empty() {
        let labels: Vec<&str> = report.placeholder_fields.iter().map(String::as_str).collect();
        writeln!(out, "placeholder values used for: {}", labels.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datagen_generate::GenerateOptions;

    fn repl() -> Repl {
        let mut options = GenerateOptions::default();
        options.seed = Some(1);
        options.today = NaiveDate::from_ymd_opt(2026, 10, 19);
        Repl::new(RecordEngine::new(options)).expect("repl")
    }

    fn run(repl: &mut Repl, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = repl.execute(line, &mut out).expect("execute");
        (flow, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn generate_then_update_prints_tables() {
        let mut repl = repl();
        let (_, output) = run(&mut repl, "generate 3 students with Name, Age, DOB and Grade");
        assert!(output.starts_with("Name"));
        assert!(output.contains("generate 3 student record(s)"));

        let (_, output) = run(&mut repl, "add email and remove grade");
        assert!(output.contains("removed: Grade"));
        let batch = repl.session().batch().expect("batch");
        assert_eq!(batch.columns(), vec!["Name", "Age", "DOB", "Email"]);
    }

    #[test]
    fn update_and_save_without_batch_warn() {
        let mut repl = repl();
        let (_, output) = run(&mut repl, "add age");
        assert!(output.starts_with("warning:"));
        let (_, output) = run(&mut repl, "save to out.csv");
        assert!(output.starts_with("warning:"));
        assert!(repl.session().is_empty());
    }

    #[test]
    fn save_writes_the_batch() {
        let mut repl = repl();
        run(&mut repl, "generate 2 employees with name and salary");
        let dir = std::env::temp_dir().join(format!("datagen-repl-{}", uuid::Uuid::new_v4()));
        let path = dir.join("employees.csv");

        let (_, output) = run(&mut repl, &format!("save them to {}", path.display()));
        assert!(output.starts_with("saved"));
        let written = std::fs::read_to_string(&path).expect("read saved file");
        assert_eq!(written.lines().next(), Some("name,salary"));
        assert_eq!(written.lines().count(), 3);
        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let mut repl = repl();
        run(&mut repl, "generate 1 employee");
        let (_, output) = run(&mut repl, "save as records.xlsx");
        assert!(output.starts_with("error:"));
    }

    #[test]
    fn zero_count_is_an_error_message() {
        let mut repl = repl();
        let (flow, output) = run(&mut repl, "generate 0 students");
        assert_eq!(flow, Flow::Continue);
        assert!(output.starts_with("error:"));
    }

    #[test]
    fn run_stops_at_exit() {
        let mut repl = repl();
        let input = b"generate 2 students\nexit\ngenerate 5 employees\n";
        let mut out = Vec::new();
        repl.run(&input[..], &mut out).expect("run");
        assert_eq!(repl.session().batch().expect("batch").len(), 2);
    }
}
