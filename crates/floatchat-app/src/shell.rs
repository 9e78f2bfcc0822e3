//! Line-oriented interactive shell.
//!
//! Reads queries from stdin, runs them through the orchestrator, and prints
//! the assistant reply plus whichever dashboard panels are open. Slash
//! commands toggle panels and inspect session state without touching it.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use floatchat_chat::ChatOrchestrator;
use floatchat_client::ChatTransport;
use floatchat_core::MessageRole;
use floatchat_dashboard::panels;
use floatchat_dashboard::{DashboardHub, PanelContent, PanelKind, PanelVisibility};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Free text to submit as a query.
    Query(String),
    /// Toggle a dashboard panel.
    Toggle(PanelKind),
    /// Print the conversation log.
    Log,
    /// Leave the shell.
    Quit,
    /// Unrecognized slash command.
    Unknown(String),
}

/// Parse one input line. Blank lines parse to nothing.
pub fn parse_line(line: &str) -> Option<ShellCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix('/') {
        let name = rest.split_whitespace().next().unwrap_or("");
        let command = match name {
            "chart" => ShellCommand::Toggle(PanelKind::Chart),
            "map" => ShellCommand::Toggle(PanelKind::Map),
            "sql" => ShellCommand::Toggle(PanelKind::Query),
            "log" => ShellCommand::Log,
            "quit" | "exit" => ShellCommand::Quit,
            other => ShellCommand::Unknown(other.to_string()),
        };
        return Some(command);
    }
    Some(ShellCommand::Query(trimmed.to_string()))
}

/// Interactive session over an orchestrator and its dashboard.
pub struct Shell<T: ChatTransport> {
    orchestrator: Arc<ChatOrchestrator<T>>,
    dashboard: Arc<DashboardHub>,
    visibility: PanelVisibility,
}

impl<T: ChatTransport> Shell<T> {
    pub fn new(
        orchestrator: Arc<ChatOrchestrator<T>>,
        dashboard: Arc<DashboardHub>,
        visibility: PanelVisibility,
    ) -> Self {
        Self {
            orchestrator,
            dashboard,
            visibility,
        }
    }

    /// Run the read/submit/print loop until EOF or /quit.
    pub async fn run(&mut self) -> std::io::Result<()> {
        println!("FloatChat. Ask about ARGO float data.");
        println!("Commands: /chart /map /sql /log /quit");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("floatchat> ");
            std::io::stdout().flush()?;

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break,
            };

            match parse_line(&line) {
                None => continue,
                Some(ShellCommand::Quit) => break,
                Some(ShellCommand::Log) => self.print_log(),
                Some(ShellCommand::Toggle(kind)) => self.toggle_panel(kind),
                Some(ShellCommand::Unknown(name)) => {
                    println!(
                        "Unknown command: /{}. Commands: /chart /map /sql /log /quit",
                        name
                    );
                }
                Some(ShellCommand::Query(query)) => self.run_query(&query).await,
            }
        }
        Ok(())
    }

    // -- Private helpers --

    async fn run_query(&self, query: &str) {
        match self.orchestrator.submit(query).await {
            Ok(reply) => {
                println!("{}", reply.text);
                self.print_open_panels();
            }
            Err(err) => println!("{}", err),
        }
    }

    /// Print open panels that currently have real content. Placeholders are
    /// not repeated after every answer; /chart-style toggles show them.
    fn print_open_panels(&self) {
        let snapshot = self.dashboard.snapshot();
        for kind in [PanelKind::Chart, PanelKind::Map, PanelKind::Query] {
            if !self.visibility.is_shown(kind) {
                continue;
            }
            if let PanelContent::Text(text) = panels::panel_content(kind, &snapshot) {
                println!("\n[{}]\n{}", kind, text);
            }
        }
    }

    fn toggle_panel(&mut self, kind: PanelKind) {
        if self.visibility.toggle(kind) {
            let snapshot = self.dashboard.snapshot();
            let content = panels::panel_content(kind, &snapshot);
            println!("[{}]\n{}", kind, content.as_str());
        } else {
            println!("{} panel hidden", kind);
        }
    }

    fn print_log(&self) {
        let log = self.orchestrator.history();
        if log.is_empty() {
            println!("No messages yet.");
            return;
        }
        for message in log {
            let speaker = match message.role {
                MessageRole::User => "you",
                MessageRole::Assistant => "floatchat",
            };
            println!(
                "[{}] {}: {}",
                message.created_at.format("%H:%M:%S"),
                speaker,
                message.text
            );
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
