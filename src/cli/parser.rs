use clap::{Parser, Subcommand};

/// Command-line interface definition for rTodo
/// CLI application to keep short to-do items in SQLite
#[derive(Parser)]
#[command(
    name = "rtodo",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small to-do manager: add, edit and delete short items stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a new item
    Add {
        /// Item title
        title: String,
    },

    /// Show all items
    List {
        #[arg(long = "json", help = "Print items as JSON")]
        json: bool,
    },

    /// Change the title of an item
    Edit {
        /// Item id (as shown by `list`)
        id: String,

        /// New title
        title: String,
    },

    /// Delete an item
    Del {
        /// Item id (as shown by `list`)
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Interactive screen: keep the list on screen while editing it
    Shell,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },
}
