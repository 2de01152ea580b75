// Interactive Shell - numbered menu loop over one session's store
// Every command error is printed and the loop continues; only Exit, end
// of input or Ctrl-C stops it

use crate::aggregate::Summary;
use crate::charts::{ChartKind, ChartSurface};
use crate::config::AppConfig;
use crate::error::{ExpenseError, Result};
use crate::persistence;
use crate::report;
use crate::store::ExpenseStore;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::PathBuf;

/// Farewell printed when the session is cut short (end of input or Ctrl-C).
pub const INTERRUPTED_FAREWELL: &str = "Program interrupted. Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddExpense,
    Save,
    Load,
    Analyze,
    PieChart,
    BarChart,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::AddExpense,
        MenuChoice::Save,
        MenuChoice::Load,
        MenuChoice::Analyze,
        MenuChoice::PieChart,
        MenuChoice::BarChart,
        MenuChoice::Exit,
    ];

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "1" => Some(MenuChoice::AddExpense),
            "2" => Some(MenuChoice::Save),
            "3" => Some(MenuChoice::Load),
            "4" => Some(MenuChoice::Analyze),
            "5" => Some(MenuChoice::PieChart),
            "6" => Some(MenuChoice::BarChart),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MenuChoice::AddExpense => "Add expense",
            MenuChoice::Save => "Save expenses to JSON",
            MenuChoice::Load => "Load expenses from JSON",
            MenuChoice::Analyze => "Analyze expenses",
            MenuChoice::PieChart => "Visualize expenses - Pie Chart",
            MenuChoice::BarChart => "Visualize expenses - Bar Chart",
            MenuChoice::Exit => "Exit",
        }
    }
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    store: ExpenseStore,
    charts: Box<dyn ChartSurface>,
    config: AppConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, charts: Box<dyn ChartSurface>, config: AppConfig) -> Self {
        Shell {
            input,
            output,
            store: ExpenseStore::new(),
            charts,
            config,
        }
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Run the menu until Exit or end of input.
    ///
    /// Only failures writing to the console come back as errors; command
    /// failures are printed and the loop goes on.
    pub fn run(&mut self) -> io::Result<()> {
        if self.config.load_on_start {
            let path = self.config.data_file.clone();
            let outcome = self.load_file(path);
            self.print_outcome(outcome)?;
        }

        loop {
            self.print_menu()?;

            let answer = match self.prompt("Choose an option: ") {
                Ok(answer) => answer,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => return self.interrupted(),
                Err(e) => return Err(e),
            };

            let Some(choice) = MenuChoice::parse(&answer) else {
                writeln!(self.output, "Invalid choice. Try again.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                writeln!(self.output, "Goodbye!")?;
                tracing::info!(records = self.store.len(), "session ended");
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(outcome) => self.print_outcome(outcome)?,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => return self.interrupted(),
                Err(e) => return Err(e),
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Result<String>> {
        match choice {
            MenuChoice::AddExpense => self.add_expense(),
            MenuChoice::Save => {
                let path = self.prompt_filename("save")?;
                Ok(self.save_file(path))
            }
            MenuChoice::Load => {
                let path = self.prompt_filename("load")?;
                Ok(self.load_file(path))
            }
            MenuChoice::Analyze => Ok(self.analyze()),
            MenuChoice::PieChart => Ok(self.visualize(ChartKind::Pie)),
            MenuChoice::BarChart => Ok(self.visualize(ChartKind::Bar)),
            MenuChoice::Exit => Ok(Ok(String::new())),
        }
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    fn add_expense(&mut self) -> io::Result<Result<String>> {
        let date = self.prompt("Enter date (YYYY-MM-DD): ")?;
        let category = self.prompt("Enter category: ")?;
        let amount = self.prompt("Enter amount: ")?;
        let description = self.prompt("Enter description: ")?;

        Ok(self
            .store
            .add(&date, &category, &amount, &description)
            .map(|_| "Expense added.".to_string()))
    }

    fn save_file(&mut self, path: PathBuf) -> Result<String> {
        persistence::save(&path, self.store.snapshot())?;
        Ok(format!("Data saved to file {}.", path.display()))
    }

    fn load_file(&mut self, path: PathBuf) -> Result<String> {
        persistence::load_into(&mut self.store, &path)?;
        Ok(format!("Data loaded from file {}.", path.display()))
    }

    fn analyze(&self) -> Result<String> {
        let summary = Summary::from_records(self.store.snapshot())?;
        Ok(report::render_text(&summary))
    }

    fn visualize(&mut self, kind: ChartKind) -> Result<String> {
        let summary = Summary::from_records(self.store.snapshot())?;
        self.charts.show(kind, &summary)?;
        Ok(format!("Closed chart: {}.", kind.title()))
    }

    // ========================================================================
    // CONSOLE I/O
    // ========================================================================

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Home Expense Tracker ---")?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice.label())?;
        }
        Ok(())
    }

    fn print_outcome(&mut self, outcome: Result<String>) -> io::Result<()> {
        match outcome {
            Ok(message) => {
                let message = message.trim_end();
                if !message.is_empty() {
                    writeln!(self.output, "{}", message)?;
                }
            }
            Err(e) => {
                report_failure(&e);
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    /// Ask for one line; surrounding whitespace is trimmed and bytes that
    /// are not UTF-8 become U+FFFD. End of input surfaces as `UnexpectedEof`.
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }

    fn prompt_filename(&mut self, action: &str) -> io::Result<PathBuf> {
        let label = format!(
            "Enter the filename to {} (default: {}): ",
            action,
            self.config.data_file.display()
        );
        let answer = self.prompt(&label)?;
        if answer.is_empty() {
            Ok(self.config.data_file.clone())
        } else {
            Ok(PathBuf::from(answer))
        }
    }

    fn interrupted(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", INTERRUPTED_FAREWELL)?;
        tracing::info!(records = self.store.len(), "session interrupted");
        Ok(())
    }
}

fn report_failure(error: &ExpenseError) {
    match error {
        ExpenseError::Unclassified(_) | ExpenseError::IoFailure { .. } => {
            tracing::error!(kind = error.kind(), "{}", error)
        }
        _ => tracing::warn!(kind = error.kind(), "{}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingCharts {
        shown: Rc<RefCell<Vec<(ChartKind, Summary)>>>,
    }

    impl ChartSurface for RecordingCharts {
        fn show(&mut self, kind: ChartKind, summary: &Summary) -> anyhow::Result<()> {
            self.shown.borrow_mut().push((kind, summary.clone()));
            Ok(())
        }
    }

    fn run_script(script: &str) -> (String, ExpenseStore, RecordingCharts) {
        let charts = RecordingCharts::default();
        let mut output = Vec::new();
        let store = {
            let mut shell = Shell::new(
                script.as_bytes(),
                &mut output,
                Box::new(charts.clone()),
                AppConfig::default(),
            );
            shell.run().unwrap();
            shell.store().clone()
        };
        (String::from_utf8(output).unwrap(), store, charts)
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddExpense));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
    }

    #[test]
    fn test_menu_lists_seven_choices() {
        let (out, _, _) = run_script("7\n");
        assert!(out.contains("--- Home Expense Tracker ---"));
        assert!(out.contains("1. Add expense"));
        assert!(out.contains("6. Visualize expenses - Bar Chart"));
        assert!(out.contains("7. Exit"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn test_add_and_analyze() {
        let (out, store, _) = run_script(
            "1\n2024-03-01\nFood\n12.50\nlunch\n\
             1\n 2024-03-02 \n Food \n7,25\nsnack\n\
             4\n7\n",
        );

        assert_eq!(out.matches("Expense added.").count(), 2);
        assert!(out.contains("Total expenses: 19.75"));
        assert!(out.contains("Food    19.75"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[1].category(), "Food");
    }

    #[test]
    fn test_invalid_input_is_reported_and_loop_continues() {
        let (out, store, _) = run_script(
            "9\n\
             1\n2024-13-01\nFood\n1\nx\n\
             1\n2024-03-01\nFood\n-2\nx\n\
             4\n7\n",
        );

        assert!(out.contains("Invalid choice. Try again."));
        assert!(out.contains("Error: Invalid date '2024-13-01'"));
        assert!(out.contains("Error: Invalid amount '-2'"));
        assert!(out.contains("Error: No expenses recorded yet."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_end_of_input_is_an_interrupt() {
        let (out, store, _) = run_script("1\n2024-03-01\nFood\n");
        assert!(out.trim_end().ends_with(INTERRUPTED_FAREWELL));
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_utf8_line_does_not_end_session() {
        let script: &[u8] = b"\xff\xfe\n1\n2024-03-01\nFood\n1\nx\n7\n";
        let mut output = Vec::new();
        let store = {
            let mut shell = Shell::new(
                script,
                &mut output,
                Box::new(RecordingCharts::default()),
                AppConfig::default(),
            );
            shell.run().unwrap();
            shell.store().clone()
        };

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Invalid choice. Try again."));
        assert!(out.contains("Expense added."));
        assert!(out.trim_end().ends_with("Goodbye!"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_non_utf8_field_is_rejected_by_validation() {
        let script: &[u8] = b"1\n2024-03-01\nFood\n1\xff\nx\n7\n";
        let mut output = Vec::new();
        let mut shell = Shell::new(
            script,
            &mut output,
            Box::new(RecordingCharts::default()),
            AppConfig::default(),
        );
        shell.run().unwrap();
        assert!(shell.store().is_empty());
        drop(shell);

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Error: Invalid amount"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn test_charts_receive_summary() {
        let (out, _, charts) = run_script(
            "5\n\
             1\n2024-03-01\nFood\n10\na\n\
             1\n2024-03-01\nRent\n30\nb\n\
             5\n6\n7\n",
        );

        assert!(out.contains("Error: No expenses recorded yet."));
        let shown = charts.shown.borrow();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].0, ChartKind::Pie);
        assert_eq!(shown[1].0, ChartKind::Bar);
        assert_eq!(shown[0].1.total, 40.0);
    }

    #[test]
    fn test_chart_failure_is_unclassified() {
        struct Broken;
        impl ChartSurface for Broken {
            fn show(&mut self, _: ChartKind, _: &Summary) -> anyhow::Result<()> {
                anyhow::bail!("no terminal")
            }
        }

        let mut output = Vec::new();
        let mut shell = Shell::new(
            "1\n2024-03-01\nFood\n1\nx\n6\n7\n".as_bytes(),
            &mut output,
            Box::new(Broken),
            AppConfig::default(),
        );
        shell.run().unwrap();
        drop(shell);

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Error: Unexpected error: no terminal"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }
}
