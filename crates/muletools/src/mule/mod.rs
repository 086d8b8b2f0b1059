use crate::prelude::*;
use colored::Colorize;
use muletools_core::matrix::VersionMatrix;
use muletools_core::version::Channel;

pub mod connectors;
pub mod dataweave;
pub mod java;
pub mod runtime;

// Re-export public data functions for the MCP adapter
pub use connectors::connector_versions_data;
pub use dataweave::dataweave_versions_data;
pub use java::java_support_data;
pub use runtime::{latest_versions_data, runtime_versions_data};

#[derive(Debug, clap::Parser)]
#[command(name = "mule")]
#[command(about = "MuleSoft documentation version operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all EDGE and LTS runtime versions from the release cadence page
    #[clap(name = "runtime")]
    Runtime(runtime::RuntimeOptions),

    /// Show only the latest EDGE and LTS runtime versions
    #[clap(name = "latest")]
    Latest(runtime::LatestOptions),

    /// Show the DataWeave / Mule runtime compatibility matrix
    #[clap(name = "dataweave")]
    Dataweave(dataweave::DataweaveOptions),

    /// Show the connector / Mule runtime compatibility matrix
    #[clap(name = "connectors")]
    Connectors(connectors::ConnectorOptions),

    /// Show supported JDK versions per runtime
    #[clap(name = "java")]
    Java(java::JavaOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Runtime(options) => runtime::run(options, global).await,
        Commands::Latest(options) => runtime::run_latest(options, global).await,
        Commands::Dataweave(options) => dataweave::run(options, global).await,
        Commands::Connectors(options) => connectors::run(options, global).await,
        Commands::Java(options) => java::run(options, global).await,
    }
}

/// A compatibility matrix plus the page it came from.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MatrixOutput {
    pub matrix: VersionMatrix,
    pub source_url: String,
}

pub fn channel_label(channel: Channel) -> &'static str {
    match channel {
        Channel::Edge => "EDGE",
        Channel::Lts => "LTS",
        Channel::Unknown => "-",
    }
}

/// Render a matrix as a titled table, one row per subject.
pub(crate) fn format_matrix_text(title: &str, output: &MatrixOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", title.bright_cyan().bold()));
    result.push_str(&format!(
        "{}: {}\n\n",
        "Source".green(),
        output.source_url.cyan().underline()
    ));

    if output.matrix.is_empty() {
        result.push_str(&format!(
            "{}\n",
            "No compatibility rows found on the page.".yellow()
        ));
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["SUBJECT", "COMPATIBLE WITH"]);
    for row in output.matrix.iter() {
        let versions = row
            .compatible_with
            .iter()
            .map(|record| record.raw_text.clone())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(prettytable::row![row.subject_id, versions]);
    }
    result.push_str(&table.to_string());

    result.push_str(&format!(
        "\n{} {}\n",
        output.matrix.len().to_string().bright_cyan().bold(),
        "subjects listed".bright_white()
    ));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use muletools_core::matrix::build_matrix;
    use muletools_core::tables::Table;

    fn sample_output() -> MatrixOutput {
        let tables = vec![Table {
            headers: vec!["Connector".to_string(), "Mule".to_string()],
            rows: vec![
                vec!["HTTP".to_string(), "4.4.0".to_string()],
                vec!["Salesforce".to_string(), "4.3.0".to_string()],
            ],
        }];
        MatrixOutput {
            matrix: build_matrix(&tables),
            source_url: "https://example.com/connectors".to_string(),
        }
    }

    #[test]
    fn test_format_matrix_text_lists_subjects() {
        let formatted = format_matrix_text("CONNECTOR COMPATIBILITY", &sample_output());

        assert!(formatted.contains("CONNECTOR COMPATIBILITY"));
        assert!(formatted.contains("HTTP"));
        assert!(formatted.contains("Salesforce"));
        assert!(formatted.contains("4.4.0"));
        assert!(formatted.contains("2"));
        assert!(formatted.contains("subjects listed"));
    }

    #[test]
    fn test_format_matrix_text_empty_matrix() {
        let output = MatrixOutput {
            matrix: VersionMatrix::default(),
            source_url: "https://example.com".to_string(),
        };

        let formatted = format_matrix_text("TITLE", &output);

        assert!(formatted.contains("No compatibility rows found"));
    }

    #[test]
    fn test_format_matrix_text_includes_source() {
        let formatted = format_matrix_text("TITLE", &sample_output());

        assert!(formatted.contains("https://example.com/connectors"));
    }

    #[test]
    fn test_channel_label() {
        assert_eq!(channel_label(Channel::Edge), "EDGE");
        assert_eq!(channel_label(Channel::Lts), "LTS");
        assert_eq!(channel_label(Channel::Unknown), "-");
    }
}
