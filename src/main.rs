use clap::{Parser, Subcommand};
use eyre::Result;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tasklist::render::{self, Style};
use tasklist::shell::Shell;
use tasklist::{Config, Seed, Store, Tab, ViewState, logging};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "TaskList CLI - In-memory to-do list with tabs and search")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: <config dir>/tasklist/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Start with an empty list instead of the demo tasks
    #[arg(long, global = true)]
    no_seed: bool,

    /// Write views and changes as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Disable terminal colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell reading commands from stdin (default)
    Shell,

    /// Print the filtered list and exit
    List {
        /// Tab to show: all, todo or finished
        #[arg(short, long)]
        tab: Option<Tab>,

        /// Only show tasks whose title contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let store = if cli.no_seed || config.seed == Seed::Empty {
        Store::new()
    } else {
        Store::with_demo_tasks()
    };
    let style = Style::from_flags(cli.json, config.color && !cli.no_color);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut shell = Shell::new(store, ViewState::new(config.default_tab), style, config.prompt);
            if interactive && style != Style::Json {
                println!("{}\n", tasklist::shell::HELP);
            }
            shell.run(stdin.lock(), &mut io::stdout().lock(), interactive)?;
        }
        Commands::List { tab, search } => {
            let mut view = ViewState::new(tab.unwrap_or(config.default_tab));
            view.set_search(search);
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", render::view(&view, &view.rows(&store), style)?)?;
        }
    }

    Ok(())
}
