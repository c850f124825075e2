use crate::command::Command;
use crate::error::Result;
use crate::pixel::{GraphColor, GraphType, PixelDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pixela",
    version,
    about = "Habit tracker on Pixela: create a user and graph, then add, update or delete daily pixels",
    after_help = "Reads USERNAME, TOKEN and GRAPH_ID from the environment or a .env file. Use --graph to override GRAPH_ID."
)]
pub struct Cli {
    /// Load variables from this env file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the Pixela user from USERNAME and TOKEN
    CreateUser {
        /// Accept the terms of service and confirm you are not a minor without prompting
        #[arg(short, long)]
        yes: bool,
    },

    /// Create a graph
    CreateGraph {
        #[arg(long, default_value = "Habit Tracker")]
        name: String,
        /// e.g. commit, km, pages
        #[arg(long, default_value = "commit")]
        unit: String,
        #[arg(long = "type", value_enum, default_value_t = GraphType::Int)]
        kind: GraphType,
        #[arg(long, value_enum, default_value_t = GraphColor::Sora)]
        color: GraphColor,
        /// Graph id to create (defaults to GRAPH_ID)
        #[arg(long)]
        graph: Option<String>,
    },

    /// Add a pixel for a date (default: today)
    Add {
        /// Quantity to record
        #[arg(allow_negative_numbers = true)]
        quantity: String,
        /// YYYYMMDD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Graph id to use (defaults to GRAPH_ID)
        #[arg(long)]
        graph: Option<String>,
    },

    /// Update a pixel's quantity for a date
    Update {
        /// YYYYMMDD
        date: String,
        #[arg(allow_negative_numbers = true)]
        quantity: String,
        /// Graph id to use (defaults to GRAPH_ID)
        #[arg(long)]
        graph: Option<String>,
    },

    /// Delete a pixel for a date
    Delete {
        /// YYYYMMDD
        date: String,
        /// Graph id to use (defaults to GRAPH_ID)
        #[arg(long)]
        graph: Option<String>,
    },
}

impl Commands {
    /// Whether the user has already agreed to the create-user terms.
    pub fn terms_accepted(&self) -> bool {
        matches!(self, Commands::CreateUser { yes: true })
    }

    /// Validate raw arguments into a `Command`. Fails before any network use.
    pub fn into_command(self) -> Result<Command> {
        let cmd = match self {
            Commands::CreateUser { .. } => Command::CreateUser,
            Commands::CreateGraph { name, unit, kind, color, graph } => Command::CreateGraph {
                graph,
                name,
                unit,
                kind,
                color,
            },
            Commands::Add { quantity, date, graph } => Command::AddPixel {
                graph,
                date: date.as_deref().map(str::parse::<PixelDate>).transpose()?,
                quantity: quantity.parse()?,
            },
            Commands::Update { date, quantity, graph } => Command::UpdatePixel {
                graph,
                date: date.parse()?,
                quantity: quantity.parse()?,
            },
            Commands::Delete { date, graph } => Command::DeletePixel {
                graph,
                date: date.parse()?,
            },
        };
        Ok(cmd)
    }
}
