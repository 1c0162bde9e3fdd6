//! recordsql CLI
//!
//! Command-line tool that turns record schema files into table DDL,
//! additive ALTER statements and row DML.

mod commands;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recordsql_core::{check_table_exist_query, drop_table_query};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use crate::input::{load_dialect, load_tables, LiveSnapshot};

/// Generate SQL for record-backed tables.
#[derive(Parser)]
#[command(name = "recordsql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dialect file (JSON); MySQL when not given.
    #[arg(short, long, env = "RECORDSQL_DIALECT")]
    dialect: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CREATE TABLE for every table in a schema file.
    Create {
        /// Declared schema file.
        #[arg(short, long, env = "RECORDSQL_SCHEMA")]
        schema: PathBuf,
    },

    /// Print DROP TABLE.
    Drop {
        /// Table name.
        #[arg(short, long)]
        table: String,
    },

    /// Print the table existence probe.
    Exists {
        /// Database (schema) name.
        #[arg(short, long, env = "RECORDSQL_DATABASE")]
        database: String,

        /// Table name.
        #[arg(short, long)]
        table: String,
    },

    /// Print the CREATE or ALTER statements that bring a live schema in
    /// line with the declared one.
    Sync {
        /// Declared schema file.
        #[arg(short, long, env = "RECORDSQL_SCHEMA")]
        schema: PathBuf,

        /// Live schema file.
        #[arg(short, long, env = "RECORDSQL_LIVE")]
        live: PathBuf,
    },

    /// Print existence, insert and update statements for every table.
    Dml {
        /// Declared schema file.
        #[arg(short, long, env = "RECORDSQL_SCHEMA")]
        schema: PathBuf,
    },
}

fn print_statements(statements: &[String]) {
    for sql in statements {
        println!("{sql};\n");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = load_dialect(cli.dialect.as_deref())?;
    debug!(?dialect, "using dialect");

    match cli.command {
        Commands::Create { schema } => {
            let tables = load_tables(&schema)?;
            print_statements(&commands::create(&tables, &dialect)?);
        }

        Commands::Drop { table } => {
            println!("{};", drop_table_query(&table));
        }

        Commands::Exists { database, table } => {
            println!("{};", check_table_exist_query(&database, &table, &dialect));
        }

        Commands::Sync { schema, live } => {
            let tables = load_tables(&schema)?;
            let snapshot = LiveSnapshot::load(&live)?;
            print_statements(&commands::sync(&tables, &snapshot, &dialect)?);
        }

        Commands::Dml { schema } => {
            let tables = load_tables(&schema)?;
            print_statements(&commands::dml(&tables, &dialect)?);
        }
    }

    Ok(())
}
