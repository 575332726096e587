use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use taskbot::commands::{cmd_export_json, cmd_run, cmd_table};
use taskbot::config::{config_path, Settings};
use taskbot::logging::init_logging;
use taskbot::repl::run_repl;
use taskbot::storage::{data_dir, FileStore};
use taskbot::tui::run_tui;
use taskbot::Session;

#[derive(Parser)]
#[command(name = "taskbot")]
#[command(about = "Chat-style personal task tracker", long_about = None)]
struct Cli {
    /// Task file to use instead of the one in the data directory
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,
    /// Log level: off, error, warn, info, debug, trace
    #[arg(short, long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the tracker line by line (default)
    Chat,
    /// Open the full-screen chat
    Ui,
    /// Run a single command, e.g. `taskbot run todo buy milk`
    Run {
        /// The command line, as typed in the chat
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Print all tasks as a table
    Table {
        /// Order dated tasks by date, to-dos last
        #[arg(short, long)]
        by_date: bool,
        /// Print JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },
    /// Show the settings in effect
    Config {
        /// Write them to config.json so they can be edited
        #[arg(long)]
        init: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Ignoring unreadable config: {}", e);
            Settings::default()
        }
    };
    let level = cli.log_level.clone().unwrap_or_else(|| settings.log_level.clone());
    if let Err(e) = init_logging(&level, &data_dir()) {
        eprintln!("Logging disabled: {}", e);
    }

    let store = FileStore::new(settings.tasks_path(cli.file));
    log::info!("Using task file {}", store.path().display());

    match cli.command {
        Some(Commands::Chat) | None => {
            let mut session = Session::open(store);
            let stdin = io::stdin();
            if let Err(e) = run_repl(&mut session, &settings.bot_name, stdin.lock(), io::stdout()) {
                eprintln!("Error reading input: {}", e);
            }
        }
        Some(Commands::Ui) => {
            if let Err(e) = run_tui(Session::open(store), &settings.bot_name) {
                eprintln!("Error running TUI: {}", e);
            }
        }
        Some(Commands::Run { words }) => {
            let response = cmd_run(store, &words);
            if response.is_error() {
                eprintln!("{}", response.message);
                std::process::exit(1);
            }
            println!("{}", response.message);
        }
        Some(Commands::Table { by_date, json }) => {
            let mut session = Session::open(store);
            if let Some(err) = session.take_load_error() {
                eprintln!("{}", err);
            }
            if json {
                match cmd_export_json(session.tasks()) {
                    Ok(s) => println!("{}", s),
                    Err(e) => eprintln!("{}", e),
                }
            } else {
                println!("{}", cmd_table(session.tasks(), by_date));
            }
        }
        Some(Commands::Config { init }) => {
            if init {
                if config_path().exists() {
                    eprintln!("{} already exists", config_path().display());
                    std::process::exit(1);
                }
                match settings.save() {
                    Ok(path) => println!("Wrote {}", path.display()),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }
            match serde_json::to_string_pretty(&settings) {
                Ok(s) => println!("{}\n(from {})", s, config_path().display()),
                Err(e) => eprintln!("{}", e),
            }
        }
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskbot", &mut io::stdout());
        }
    }
}
