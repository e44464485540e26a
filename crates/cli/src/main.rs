use clap::{Parser, Subcommand};

mod commands;
mod error;
mod messages;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "stelline")]
#[command(about = "Balance ledger for a shared game economy")]
struct Cli {
    /// Settings file (TOML, optional; also read from `STELLINE_SETTINGS`).
    #[arg(long, env = "STELLINE_SETTINGS", default_value = "settings")]
    settings: String,

    /// Message templates file (TOML, optional).
    #[arg(long, env = "STELLINE_MESSAGES", default_value = "messages")]
    messages: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account, seeding it with the starting balance.
    Create {
        name: String,
        /// Stable external id for the account; generated when omitted.
        #[arg(long)]
        id: Option<String>,
    },
    /// Show an account's balance.
    #[command(alias = "bal")]
    Balance { name: String },
    /// Show the highest balances.
    #[command(alias = "baltop")]
    Top {
        /// Number of entries; defaults to the configured top count.
        #[arg(long)]
        count: Option<usize>,
    },
    /// Credit an account.
    Add { name: String, amount: String },
    /// Debit an account.
    #[command(alias = "remove")]
    Take { name: String, amount: String },
    /// Assign an account's balance outright.
    Set { name: String, amount: String },
    /// Print one expansion value: eco, eco_formatted or eco_shorthand.
    Expand { name: String, token: String },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.settings)?;

    // Logs go to stderr; stdout carries only rendered command output.
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "stelline={level},ledger={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let messages = messages::Messages::load(&cli.messages, &settings)?;
    let ledger = ledger::Ledger::open(settings.store.path.clone(), settings.economy());

    let ok = match cli.command {
        Command::Create { name, id } => commands::create(&ledger, &messages, &name, id),
        Command::Balance { name } => commands::balance(&ledger, &messages, &name),
        Command::Top { count } => commands::top(&ledger, &messages, count),
        Command::Add { name, amount } => commands::add(&ledger, &messages, &name, &amount),
        Command::Take { name, amount } => commands::take(&ledger, &messages, &name, &amount),
        Command::Set { name, amount } => commands::set(&ledger, &messages, &name, &amount),
        Command::Expand { name, token } => commands::expand(&ledger, &name, &token),
    };

    // Departure hook: one last full snapshot before the process ends.
    ledger.save();

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
