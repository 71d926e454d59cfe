// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::path::Path;
use std::sync::Arc;

use console::style;
use dialoguer::Confirm;
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::{Config, KeyState};
use crate::domain::{Answer, Clause, RiskFinding};
use crate::error::{Error, Result};
use crate::server;
use crate::services::{
    analysis::Analyzer,
    clauses::ClauseExtractor,
    document::{load_document, read_text},
    gateway::ProviderGateway,
    llm::ProviderKind,
    risks::RiskDetector,
};

pub struct App {
    cli: Cli,
    config: Config,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            gemini = %config.gemini_key_state(),
            openai = %config.openai_key_state(),
            timeout_secs = config.timeout_secs,
            "config loaded"
        );
        Ok(Self { cli, config })
    }

    fn analyzer(&self) -> Analyzer {
        Analyzer::new(Arc::new(ProviderGateway::from_config(self.config.clone())))
    }

    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Analyze { file } => self.analyze(file).await,
            Commands::Summarize { file } => self.summarize(file).await,
            Commands::Clauses { file } => self.clauses(file),
            Commands::Risks { file } => self.risks(file),
            Commands::Ask { file, question } => self.ask(file, question).await,
            Commands::Parse { file } => self.parse(file),
            Commands::Serve { host, port } => {
                let host = host.clone().unwrap_or_else(|| self.config.host.clone());
                let port = port.unwrap_or(self.config.port);
                self.print_status(&format!("Serving on http://{host}:{port}"));
                server::serve(self.analyzer(), &host, port).await
            }
            Commands::Init => self.init(),
            Commands::Config => self.show_config(),
            Commands::Doctor => {
                self.run_doctor();
                Ok(())
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "dealsign", &mut std::io::stdout());
                Ok(())
            }
            #[cfg(feature = "secure-storage")]
            Commands::SetKey { provider } => self.set_api_key(provider),
        }
    }

    // ─── Analysis Commands ───

    async fn analyze(&self, file: &Path) -> Result<()> {
        let text = read_text(file)?;
        self.print_status("Analyzing contract...");
        let report = self.analyzer().analyze(&text).await;

        if self.cli.json {
            return self.print_json(&report);
        }

        println!("{}", style("Summary").bold().underlined());
        println!("{}\n", report.summary);
        Self::display_clauses(&report.clauses);
        Self::display_risks(&report.risks, report.risk_score);
        Ok(())
    }

    async fn summarize(&self, file: &Path) -> Result<()> {
        let text = read_text(file)?;
        self.print_status("Summarizing...");
        let summary = self.analyzer().gateway().summarize(&text).await;

        if self.cli.json {
            return self.print_json(&summary);
        }
        println!("{}", summary.summary);
        self.print_info(&format!("method: {}", summary.method));
        Ok(())
    }

    fn clauses(&self, file: &Path) -> Result<()> {
        let clauses = ClauseExtractor::extract(&read_text(file)?);
        if self.cli.json {
            return self.print_json(&clauses);
        }
        Self::display_clauses(&clauses);
        Ok(())
    }

    fn risks(&self, file: &Path) -> Result<()> {
        let text = read_text(file)?;
        let clauses = ClauseExtractor::extract(&text);
        let report = RiskDetector::detect(&text, &clauses);
        if self.cli.json {
            return self.print_json(&report);
        }
        Self::display_risks(&report.risks, report.risk_score);
        Ok(())
    }

    async fn ask(&self, file: &Path, question: &str) -> Result<()> {
        let text = read_text(file)?;
        self.print_status("Answering...");
        let answer = self.analyzer().ask(&text, question).await;
        if self.cli.json {
            return self.print_json(&answer);
        }
        Self::display_answer(&answer);
        Ok(())
    }

    fn parse(&self, file: &Path) -> Result<()> {
        let text = load_document(file)?;
        if self.cli.json {
            return self.print_json(&serde_json::json!({
                "text": text,
                "filename": file.file_name().map(|n| n.to_string_lossy()),
            }));
        }
        println!("{text}");
        Ok(())
    }

    // ─── Config Commands ───

    fn init(&self) -> Result<()> {
        if let Some(path) = Config::config_path() {
            if path.exists() {
                let overwrite = Confirm::new()
                    .with_prompt(format!("{} exists. Overwrite?", path.display()))
                    .default(false)
                    .interact()?;
                if !overwrite {
                    return Err(Error::Cancelled);
                }
            }
        }
        let path = Config::create_default()?;
        println!("Created config: {}", path.display());
        Ok(())
    }

    /// Effective configuration as TOML, credentials replaced by their state.
    fn show_config(&self) -> Result<()> {
        let mut shown = self.config.clone();
        shown.gemini_api_key = shown
            .gemini_api_key
            .map(|_| format!("<{}>", self.config.gemini_key_state()));
        shown.openai_api_key = shown
            .openai_api_key
            .map(|_| format!("<{}>", self.config.openai_key_state()));

        if self.cli.json {
            return self.print_json(&shown);
        }
        let rendered =
            toml::to_string_pretty(&shown).map_err(|e| Error::Config(e.to_string()))?;
        print!("{rendered}");
        Ok(())
    }

    fn run_doctor(&self) {
        eprintln!("{} Running diagnostics...\n", style("→").cyan());

        eprintln!("{}", style("Configuration").bold().underlined());
        if let Some(ref path) = Config::config_path() {
            let status = if path.exists() { "found" } else { "not found" };
            eprintln!("  Config file: {} ({})", path.display(), status);
        }
        eprintln!("  Timeout:     {}s", self.config.timeout_secs);
        eprintln!();

        // Resolution order check; builds clients but makes no network call.
        eprintln!("{}", style("Providers (in resolution order)").bold().underlined());
        let gateway = ProviderGateway::from_config(self.config.clone());
        for kind in ProviderKind::ORDER {
            let key_state = match kind {
                ProviderKind::Gemini => self.config.gemini_key_state(),
                ProviderKind::OpenAi => self.config.openai_key_state(),
            };
            let key_label = match key_state {
                KeyState::Configured => style(key_state.to_string()).green(),
                KeyState::Placeholder => style(key_state.to_string()).yellow().bold(),
                KeyState::Missing => style(key_state.to_string()).red(),
            };
            let client = if gateway.registry().get(kind).is_some() {
                style("ready").green()
            } else {
                style("skipped").dim()
            };
            eprintln!("  {kind:<8} key: {key_label:<12} client: {client}");
        }
        eprintln!("  {:<8} always available", "fallback");
        eprintln!();

        eprintln!("{} Diagnostics complete.", style("✓").green().bold());
    }

    // ─── Keyring Commands ───

    #[cfg(feature = "secure-storage")]
    fn set_api_key(&self, provider: &str) -> Result<()> {
        let provider_lower = provider.to_lowercase();
        if provider_lower != "gemini" && provider_lower != "openai" {
            return Err(Error::Config(format!(
                "Keyring storage is only for providers (gemini, openai), got '{}'",
                provider
            )));
        }

        eprintln!(
            "Enter API key for {} (input will be hidden):",
            style(&provider_lower).bold()
        );

        let key = dialoguer::Password::new()
            .with_prompt("API key")
            .interact()
            .map_err(|e| Error::Dialog(e.to_string()))?;

        if crate::config::is_placeholder_key(&key) {
            return Err(Error::Config(
                "API key cannot be empty or a placeholder".into(),
            ));
        }

        let entry = keyring::Entry::new("dealsign", &provider_lower)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        entry
            .set_password(key.trim())
            .map_err(|e| Error::Keyring(e.to_string()))?;

        eprintln!(
            "{} API key stored for {}",
            style("✓").green().bold(),
            provider_lower
        );
        Ok(())
    }

    // ─── Output Helpers ───

    fn display_clauses(clauses: &[Clause]) {
        println!(
            "{} ({})",
            style("Clauses").bold().underlined(),
            clauses.len()
        );
        for clause in clauses {
            let section = if clause.section.is_empty() {
                String::new()
            } else {
                format!(" §{}", clause.section)
            };
            println!(
                "  [{}]{} risk={}",
                style(clause.category).cyan(),
                section,
                clause.risk_level
            );
            println!("    {}", style(&clause.text).dim());
        }
        println!();
    }

    fn display_risks(risks: &[RiskFinding], score: u32) {
        let score_label = match score {
            0..=24 => style(score.to_string()).green(),
            25..=59 => style(score.to_string()).yellow(),
            _ => style(score.to_string()).red().bold(),
        };
        println!(
            "{} score {}/100",
            style("Risks").bold().underlined(),
            score_label
        );
        for risk in risks {
            println!(
                "  {} {} ({})",
                style(risk.severity).red(),
                risk.description,
                risk.clause_reference
            );
            println!("    → {}", risk.recommendation);
        }
    }

    fn display_answer(answer: &Answer) {
        println!("{}", answer.answer);
        eprintln!(
            "{} method: {}, confidence: {:.2}",
            style("info:").cyan(),
            answer.method,
            answer.confidence
        );
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn print_status(&self, msg: &str) {
        if !self.cli.json {
            eprintln!("{} {}", style("→").cyan(), msg);
        }
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }
}
