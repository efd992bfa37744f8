//! Display logic for the brdomain CLI.
//!
//! Renders check results, error messages and the TLD listing in Portuguese
//! with colors, and drives the spinner shown while the lookup is running.
//! Rendering returns lines so it can be tested; the `print_*` functions
//! write them out.

use brdomain_lib::{
    AvailabilityResult, DomainCheckError, DomainParts, HostnameRule, TldRegistry,
};
use console::{style, Term};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Shown when a TLD has no registration restriction.
const EMPTY_PLACEHOLDER: &str = "-";

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a `Carregando <domain>` spinner.
    ///
    /// Returns `None` when stderr is not a terminal.
    pub fn start(domain: &str) -> Option<Self> {
        let term = Term::stderr();
        if !term.is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let message = format!(
            "{}{}",
            style("Carregando ").yellow().for_stderr(),
            style(domain).yellow().bold().for_stderr()
        );

        let handle = tokio::spawn(async move {
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!(
                    "{} {}",
                    style(frame).yellow().for_stderr(),
                    message
                ));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Results ──────────────────────────────────────────────────────────────────

/// Render a lookup result.
///
/// Metadata is looked up by the matched TLD in `parts`. Suggestions are
/// built from the response's `domain`, falling back to the validated
/// hostname when the response leaves it empty.
pub fn render_result(
    result: &AvailabilityResult,
    parts: &DomainParts,
    registry: &TldRegistry,
) -> Vec<String> {
    if result.available {
        render_available(result, parts, registry)
    } else {
        render_unavailable(result, parts, registry)
    }
}

fn render_available(
    result: &AvailabilityResult,
    parts: &DomainParts,
    registry: &TldRegistry,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        style("Domínio").green(),
        style(&result.fqdn).green().bold(),
        style("está disponível").green()
    )];

    let (description, category, restriction) = match registry.get(&parts.tld) {
        Some(info) => (
            info.tld_description.as_str(),
            info.category_name.as_str(),
            non_empty_or_placeholder(&info.restriction),
        ),
        None => (EMPTY_PLACEHOLDER, EMPTY_PLACEHOLDER, EMPTY_PLACEHOLDER),
    };

    lines.push(style(format!("- Descrição TLD: {}", description)).yellow().to_string());
    lines.push(style(format!("- Categoria: {}", category)).yellow().to_string());
    lines.push(style(format!("- Restrição: {}", restriction)).yellow().to_string());
    lines
}

fn render_unavailable(
    result: &AvailabilityResult,
    parts: &DomainParts,
    registry: &TldRegistry,
) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        style("Domínio").red(),
        style(&result.fqdn).red().bold(),
        style("não está disponível").red()
    )];

    if !result.reason.is_empty() {
        lines.push(style(result.decoded_reason()).red().bold().to_string());
    }

    if result.has_suggestions() {
        let domain = if result.domain.is_empty() {
            parts.hostname.as_str()
        } else {
            result.domain.as_str()
        };

        lines.push(style("Sugestões: ").yellow().to_string());
        for tld in &result.suggestions {
            let category = registry.category_of(tld).unwrap_or_else(|| {
                warn!(%tld, "suggested TLD is not in the registry");
                EMPTY_PLACEHOLDER
            });
            lines.push(format!(
                "\t{}",
                style(format!("- {}.{} ({})", domain, tld, category))
                    .yellow()
                    .bold()
            ));
        }
    }

    lines
}

/// Print a lookup result to stdout.
pub fn print_result(result: &AvailabilityResult, parts: &DomainParts, registry: &TldRegistry) {
    for line in render_result(result, parts, registry) {
        println!("{}", line);
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// User-facing message lines for an error.
pub fn error_lines(error: &DomainCheckError) -> Vec<String> {
    match error {
        DomainCheckError::Usage => vec!["Por favor, digite uma url válida.".to_string()],
        DomainCheckError::UnsupportedTld { valid, .. } => vec![format!(
            "A url informada deve possuir uma das seguintes extensões: {}",
            valid.join(", ")
        )],
        DomainCheckError::InvalidHostname { rule, .. } => {
            vec![hostname_rule_message(*rule).to_string()]
        }
        e if e.is_transport() => vec![
            "Alguma coisa de errado não está certo.".to_string(),
            e.to_string(),
        ],
        e @ (DomainCheckError::ConfigError { .. } | DomainCheckError::FileError { .. }) => {
            vec![format!("Erro de configuração: {}", e)]
        }
        e => vec![format!("Erro interno: {}", e)],
    }
}

/// Message shown for each hostname rule.
pub fn hostname_rule_message(rule: HostnameRule) -> &'static str {
    match rule {
        HostnameRule::Length => "O Hostname deve ter no mínimo de 2 e máximo de 26 caracteres.",
        HostnameRule::HyphenEdge => "O Hostname não deve conter hífen no ínicio ou final.",
        HostnameRule::NumericOnly => "O Hostname não deve conter apenas números.",
        HostnameRule::Charset => "O Hostname deve ser a-z, 0-9, hífen e os seguintes caracteres acentuados: à, á, â, ã, é, ê, í, ó, ô, õ, ú, ü, ç.",
    }
}

/// Print an error to stderr in red; transport details are dimmed.
pub fn print_error(error: &DomainCheckError) {
    let mut lines = error_lines(error).into_iter();
    if let Some(headline) = lines.next() {
        eprintln!("{}", style(headline).red().for_stderr());
    }
    for detail in lines {
        eprintln!("{}", style(detail).dim().for_stderr());
    }
}

// ── TLD listing ──────────────────────────────────────────────────────────────

/// One line per registry category: name, count and its TLDs.
pub fn tld_list_lines(registry: &TldRegistry) -> Vec<String> {
    let mut by_category: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (tld, info) in registry.iter() {
        by_category
            .entry(info.category_name.as_str())
            .or_default()
            .push(tld);
    }

    by_category
        .into_iter()
        .map(|(category, tlds)| {
            format!(
                "  {} {}  {}",
                style(format!("{:<24}", category)).green().bold(),
                style(format!("({})", tlds.len())).cyan(),
                tlds.join(", ")
            )
        })
        .collect()
}

/// Print every supported TLD grouped by category.
pub fn print_tlds(registry: &TldRegistry) {
    println!();
    println!("{}", style("Extensões suportadas:").yellow().bold());
    println!();
    for line in tld_list_lines(registry) {
        println!("{}", line);
    }
    println!();
    println!("Uso: brdomain <hostname>.<extensão>");
}

fn non_empty_or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        value
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
