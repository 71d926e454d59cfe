// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "dealsign")]
#[command(version)]
#[command(about = "Contract analysis with LLM summaries and deterministic fallbacks", long_about = None)]
pub struct Cli {
    /// Gemini model name
    #[arg(long, global = true, env = "DEALSIGN_GEMINI_MODEL")]
    pub gemini_model: Option<String>,

    /// OpenAI model name
    #[arg(long, global = true, env = "DEALSIGN_OPENAI_MODEL")]
    pub openai_model: Option<String>,

    /// Per-attempt provider timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: summary, clauses, and risks
    Analyze {
        /// Contract text file
        file: PathBuf,
    },
    /// Summarize a contract
    Summarize { file: PathBuf },
    /// Extract classified clauses
    Clauses { file: PathBuf },
    /// Detect risky phrases and compute a risk score
    Risks { file: PathBuf },
    /// Ask a question about a contract
    Ask {
        file: PathBuf,
        /// Question to answer
        question: String,
    },
    /// Extract and normalize document text
    Parse { file: PathBuf },
    /// Start the HTTP service
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Check provider credentials and client setup
    Doctor,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Store a provider API key in the system keychain
    #[cfg(feature = "secure-storage")]
    SetKey {
        /// Provider name (gemini, openai)
        provider: String,
    },
}
