use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for Levant
/// Staff time-clock: clock in/out, audited log edits, monthly hour reports
#[derive(Parser)]
#[command(
    name = "levant",
    version = env!("CARGO_PKG_VERSION"),
    about = "Staff time-clock for a single-terminal venue, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Admin PIN code (required for staff/log management and destructive actions)
    #[arg(global = true, long = "pin")]
    pub pin: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// First-run setup: register the admin identity and choose the PIN
    Setup {
        /// Admin email (used to reset the PIN if forgotten)
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long)]
        password: String,

        /// Admin-gate PIN code (4-6 characters)
        #[arg(long = "pin-code")]
        pin_code: String,
    },

    /// Clock an employee in
    In {
        /// Employee id or name
        employee: String,
    },

    /// Clock an employee out
    Out {
        /// Employee id or name
        employee: String,
    },

    /// Show who is working, who finished today, and who has not started
    Status,

    /// Manage staff (PIN-gated)
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },

    /// Manage time logs (add/edit are PIN-gated)
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Week roster of planned shifts (add/remove are PIN-gated)
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Print the audit trail of administrative edits (PIN-gated)
    Audit,

    /// Export a per-employee monthly hour report
    Report {
        /// Employee id or name
        #[arg(long)]
        employee: String,

        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,

        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        /// Output file (defaults to Levant_Hours_<Name>_<YYYY-MM>.<ext>)
        #[arg(long, value_name = "FILE")]
        out: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Delete all completed logs; active shifts are kept (PIN-gated)
    Purge {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Full reset: delete all logs, employees and settings (PIN-gated)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Change the admin PIN (requires the admin credentials)
    Pin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// New PIN code (4-6 characters)
        #[arg(long = "new")]
        new_pin: String,
    },
}

#[derive(Subcommand)]
pub enum StaffAction {
    /// Add a new employee
    Add {
        #[arg(long)]
        name: String,

        /// Role: server, kitchen, bar or manager
        #[arg(long)]
        role: String,
    },

    /// Change an employee's name or role
    Edit {
        /// Employee id
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        role: String,
    },

    /// Deactivate an employee (history is kept)
    Remove {
        /// Employee id
        id: String,
    },

    /// List employees
    List {
        /// Include deactivated employees
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Plan a shift for an employee
    Add {
        /// Employee id or name
        employee: String,

        /// Roster date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long, default_value = "17:00")]
        start: String,

        #[arg(long, default_value = "23:00")]
        end: String,
    },

    /// Remove a planned shift
    Remove {
        /// Shift id
        id: String,
    },

    /// Show the roster for a seven-day window
    List {
        /// First day of the window (defaults to today)
        #[arg(long)]
        from: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LogAction {
    /// Manually add hours for an employee
    Add {
        /// Employee id or name
        employee: String,

        /// Shift date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Clock-in (HH:MM on the shift date, or RFC3339)
        #[arg(long = "in")]
        start: String,

        /// Clock-out (optional: omit for a still-active shift)
        #[arg(long = "out")]
        end: Option<String>,

        /// Why the hours are entered manually
        #[arg(long)]
        reason: Option<String>,
    },

    /// Edit a log's clock times (a reason is mandatory)
    Edit {
        /// Log id
        id: String,

        #[arg(long = "in")]
        start: String,

        #[arg(long = "out")]
        end: Option<String>,

        #[arg(long)]
        reason: String,
    },

    /// List time logs
    List {
        /// Filter by month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Filter by employee id or name
        #[arg(long)]
        employee: Option<String>,
    },
}
