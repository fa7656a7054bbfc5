//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Planwright - business-plan interview and synthesis engine
#[derive(Parser)]
#[command(name = "pw", about = "Turn a business idea into a business plan through a short interview", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an interactive interview and print the synthesized plan
    Interview {
        /// The business idea, in a sentence or two
        #[arg(long)]
        idea: String,

        /// Locale for questions and the plan (en, es)
        #[arg(long)]
        locale: Option<String>,

        /// Project name
        #[arg(long)]
        name: Option<String>,

        /// Industry the business operates in
        #[arg(long)]
        industry: Option<String>,

        /// Target audience
        #[arg(long)]
        audience: Option<String>,

        /// Location of the business
        #[arg(long)]
        location: Option<String>,

        /// Pre-fill each answer with an AI-drafted suggestion
        #[arg(long)]
        assist: bool,
    },
}
