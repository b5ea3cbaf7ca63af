// Interactive menu driver over a TaskStore

use crate::config::Config;
use crate::error::TaskError;
use crate::export::{CsvExporter, ExportOutcome, export_file_name};
use crate::models::{DATE_FORMAT, Priority, Task, TaskId, parse_due_date};
use crate::store::TaskStore;
use colored::Colorize;
use eyre::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const RULE: &str = "========================================";
const SEPARATOR: &str = "----------------------------------------";

/// Menu entries, in the order they are numbered on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    ViewAll,
    ViewByPriority,
    MarkComplete,
    Delete,
    Search,
    Statistics,
    Export,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 9] = [
        MenuChoice::Add,
        MenuChoice::ViewAll,
        MenuChoice::ViewByPriority,
        MenuChoice::MarkComplete,
        MenuChoice::Delete,
        MenuChoice::Search,
        MenuChoice::Statistics,
        MenuChoice::Export,
        MenuChoice::Exit,
    ];

    fn from_number(n: i64) -> Option<Self> {
        usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }

    fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add New Task",
            MenuChoice::ViewAll => "View All Tasks",
            MenuChoice::ViewByPriority => "View Tasks by Priority",
            MenuChoice::MarkComplete => "Mark Task as Complete",
            MenuChoice::Delete => "Delete Task",
            MenuChoice::Search => "Search Tasks",
            MenuChoice::Statistics => "View Statistics",
            MenuChoice::Export => "Export Tasks to CSV",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Line-oriented console session
///
/// Reads commands from `input`, renders results to `output`. The session ends
/// on the Exit choice or when input runs out.
pub struct Console<R, W> {
    store: TaskStore,
    config: Config,
    style: Style,
    exporter: CsvExporter,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(store: TaskStore, config: Config, input: R, output: W) -> Self {
        let style = Style { color: config.color };
        Self {
            store,
            config,
            style,
            exporter: CsvExporter::new(),
            input,
            output,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Run the menu loop until the user exits or input is exhausted
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "{}", self.style.heading("   TASK MANAGEMENT"))?;
        writeln!(self.output, "{}\n", RULE)?;

        loop {
            self.display_menu()?;
            let Some(number) = self.prompt_int("Enter your choice: ")? else {
                debug!("Input closed, ending session");
                break;
            };

            let Some(choice) = MenuChoice::from_number(number) else {
                writeln!(self.output, "\n{}\n", self.style.warning("Invalid choice. Please try again."))?;
                continue;
            };

            debug!(?choice, "Menu choice");
            let keep_going = match choice {
                MenuChoice::Add => self.add_task()?,
                MenuChoice::ViewAll => {
                    self.view_all_tasks()?;
                    true
                }
                MenuChoice::ViewByPriority => self.view_tasks_by_priority()?,
                MenuChoice::MarkComplete => self.mark_task_complete()?,
                MenuChoice::Delete => self.delete_task()?,
                MenuChoice::Search => self.search_tasks()?,
                MenuChoice::Statistics => {
                    self.view_statistics()?;
                    true
                }
                MenuChoice::Export => {
                    self.export_tasks()?;
                    true
                }
                MenuChoice::Exit => {
                    writeln!(self.output, "\nThank you for using Task Management System!")?;
                    break;
                }
            };

            if !keep_going {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.output, "{}", RULE)?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice.label())?;
        }
        writeln!(self.output, "{}", RULE)?;
        Ok(())
    }

    // ========================================================================
    // Menu actions
    //
    // Actions that prompt return Ok(false) when input ran out mid-way.
    // ========================================================================

    fn add_task(&mut self) -> Result<bool> {
        writeln!(self.output, "\n{}", self.style.heading("--- Add New Task ---"))?;

        let Some(title) = self.prompt("Task Title: ")? else {
            return Ok(false);
        };
        let Some(description) = self.prompt("Task Description: ")? else {
            return Ok(false);
        };
        let Some(due_input) = self.prompt("Due Date (DD-MM-YYYY): ")? else {
            return Ok(false);
        };

        let due = parse_due_date(&due_input, self.store.today());
        if due.is_defaulted() {
            writeln!(self.output, "{}", self.style.warning("Invalid date format. Using today's date."))?;
        }

        let Some(priority) = self.prompt_priority()? else {
            return Ok(false);
        };

        let id = self.store.add(title, description, due.date(), priority);
        info!(%id, "Task added");
        writeln!(self.output, "\n{}\n", self.style.success("Task added successfully!"))?;
        Ok(true)
    }

    fn view_all_tasks(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", self.style.heading("--- All Tasks ---"))?;
        if self.store.is_empty() {
            writeln!(self.output, "No tasks available.\n")?;
            return Ok(());
        }

        for task in self.store.list() {
            write_task(&mut self.output, task)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn view_tasks_by_priority(&mut self) -> Result<bool> {
        writeln!(self.output, "\n{}", self.style.heading("--- Filter by Priority ---"))?;
        let Some(priority) = self.prompt_priority()? else {
            return Ok(false);
        };

        let tasks = self.store.list_by_priority(priority);
        if tasks.is_empty() {
            writeln!(self.output, "No tasks found with {} priority.\n", priority)?;
        }
        for task in tasks {
            write_task(&mut self.output, task)?;
        }
        Ok(true)
    }

    fn mark_task_complete(&mut self) -> Result<bool> {
        self.view_all_tasks()?;
        let Some(id) = self.prompt_id("Enter Task ID to mark complete: ")? else {
            return Ok(false);
        };

        match self.store.mark_complete(id) {
            Ok(()) => writeln!(self.output, "\n{}\n", self.style.success("Task marked as complete!"))?,
            Err(TaskError::NotFound(_)) => writeln!(self.output, "\n{}\n", self.style.warning("Task not found."))?,
            Err(e) => return Err(e.into()),
        }
        Ok(true)
    }

    fn delete_task(&mut self) -> Result<bool> {
        self.view_all_tasks()?;
        let Some(id) = self.prompt_id("Enter Task ID to delete: ")? else {
            return Ok(false);
        };

        match self.store.delete(id) {
            Ok(()) => writeln!(self.output, "\n{}\n", self.style.success("Task deleted successfully!"))?,
            Err(TaskError::NotFound(_)) => writeln!(self.output, "\n{}\n", self.style.warning("Task not found."))?,
            Err(e) => return Err(e.into()),
        }
        Ok(true)
    }

    fn search_tasks(&mut self) -> Result<bool> {
        let Some(keyword) = self.prompt("Enter keyword: ")? else {
            return Ok(false);
        };

        let tasks = self.store.search(&keyword);
        if tasks.is_empty() {
            writeln!(self.output, "No matching tasks found.\n")?;
        }
        for task in tasks {
            write_task(&mut self.output, task)?;
        }
        Ok(true)
    }

    fn view_statistics(&mut self) -> Result<()> {
        let stats = self.store.statistics();

        writeln!(self.output, "\n{}", self.style.heading("--- Statistics ---"))?;
        writeln!(self.output, "Total Tasks: {}", stats.total)?;
        writeln!(self.output, "Completed: {}", stats.completed)?;
        writeln!(self.output, "Pending: {}", stats.pending)?;
        writeln!(self.output, "Overdue: {}", stats.overdue)?;
        writeln!(self.output, "\nBy Priority:")?;
        for (priority, count) in &stats.by_priority {
            writeln!(self.output, "  {}: {}", priority, count)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn export_tasks(&mut self) -> Result<()> {
        let path = self.config.export_dir.join(export_file_name(self.store.today()));

        match self.exporter.export_file(self.store.list(), &path) {
            Ok(ExportOutcome::NothingToExport) => {
                writeln!(self.output, "\nNo tasks to export.\n")?;
            }
            Ok(ExportOutcome::Written { rows, .. }) => {
                let msg = format!("Exported {} task(s) to {}", rows, path.display());
                writeln!(self.output, "\n{}\n", self.style.success(&msg))?;
            }
            Err(e) => {
                warn!(error = %e, "Export failed");
                writeln!(self.output, "\n{}\n", self.style.error(&format!("Export failed: {}", e)))?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Input helpers
    // ========================================================================

    /// Print `msg` and read one line without its line ending. None at end of input.
    fn prompt(&mut self, msg: &str) -> Result<Option<String>> {
        write!(self.output, "{}", msg)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompt until the user enters an integer
    fn prompt_int(&mut self, msg: &str) -> Result<Option<i64>> {
        let mut text = msg.to_string();
        loop {
            let Some(line) = self.prompt(&text)? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => text = format!("Invalid input. {}", msg),
            }
        }
    }

    fn prompt_id(&mut self, msg: &str) -> Result<Option<TaskId>> {
        // Ids outside the u32 range can't exist in the store
        Ok(self
            .prompt_int(msg)?
            .map(|n| TaskId(u32::try_from(n).unwrap_or(u32::MAX))))
    }

    fn prompt_priority(&mut self) -> Result<Option<Priority>> {
        writeln!(self.output, "\nPriority Levels:")?;
        for (i, priority) in Priority::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, priority)?;
        }
        Ok(self.prompt_int("Select Priority: ")?.map(Priority::from_selector))
    }
}

/// Optional coloring of console messages
#[derive(Debug, Clone, Copy)]
struct Style {
    color: bool,
}

impl Style {
    fn heading(&self, text: &str) -> String {
        if self.color { text.bold().cyan().to_string() } else { text.to_string() }
    }

    fn success(&self, text: &str) -> String {
        if self.color { text.green().to_string() } else { text.to_string() }
    }

    fn warning(&self, text: &str) -> String {
        if self.color { text.yellow().to_string() } else { text.to_string() }
    }

    fn error(&self, text: &str) -> String {
        if self.color { text.red().bold().to_string() } else { text.to_string() }
    }
}

fn write_task<W: Write>(output: &mut W, task: &Task) -> Result<()> {
    writeln!(output, "ID: {}", task.id())?;
    writeln!(output, "Title: {}", task.title())?;
    writeln!(output, "Description: {}", task.description())?;
    writeln!(output, "Due: {}", task.due_date().format(DATE_FORMAT))?;
    writeln!(output, "Priority: {}", task.priority())?;
    writeln!(output, "Status: {}", task.status_label())?;
    writeln!(output, "Created: {}", task.created_date().format(DATE_FORMAT))?;
    writeln!(output, "{}", SEPARATOR)?;
    Ok(())
}
