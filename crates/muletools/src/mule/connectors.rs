use crate::prelude::{println, *};
use muletools_core::matrix::{build_matrix, CompatibilityRow, VersionMatrix};
use muletools_core::tables::{find_tables, parse_document, Landmark};

use super::{format_matrix_text, MatrixOutput};
use crate::config::DocsConfig;
use crate::fetch::Fetcher;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ConnectorOptions {
    /// Only show connectors whose name contains this text
    #[arg(long)]
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ConnectorOptions, global: crate::Global) -> Result<()> {
    let fetcher = Fetcher::new(DocsConfig::default());

    if global.verbose {
        println!(
            "Fetching connector compatibility from {}...",
            fetcher.config().connector_release_notes_url
        );
    }

    let output = connector_versions_data(&fetcher).await?;

    if let Some(name) = &options.name {
        let matches = filter_rows(&output.matrix, name);
        if options.json {
            println!("{}", serde_json::to_string_pretty(&matches)?);
        } else if matches.is_empty() {
            println!("No connector matching '{name}' found.");
        } else {
            for row in matches {
                let versions = row
                    .compatible_with
                    .iter()
                    .map(|record| record.raw_text.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}: {}", row.subject_id, versions);
            }
        }
        return Ok(());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_matrix_text("CONNECTOR COMPATIBILITY", &output));
    }

    Ok(())
}

/// Fetches the connector release notes page and builds the compatibility
/// matrix, keyed by connector name.
pub async fn connector_versions_data(fetcher: &Fetcher) -> Result<MatrixOutput, Error> {
    let url = fetcher.config().connector_release_notes_url.clone();
    let raw = fetcher.fetch(&url).await?;
    let matrix = extract_connector_matrix(&raw.body)?;

    Ok(MatrixOutput {
        matrix,
        source_url: url,
    })
}

fn connector_landmark() -> Landmark {
    Landmark::header_any(&["connector", "software"]).min_columns(2)
}

fn extract_connector_matrix(body: &str) -> Result<VersionMatrix, Error> {
    let document = parse_document(body)?;
    let tables = find_tables(&document, &connector_landmark());
    Ok(build_matrix(&tables))
}

/// Case-insensitive substring filter over the matrix rows.
fn filter_rows<'a>(matrix: &'a VersionMatrix, name: &str) -> Vec<&'a CompatibilityRow> {
    let needle = name.to_lowercase();
    matrix
        .iter()
        .filter(|row| row.subject_id.to_lowercase().contains(&needle))
        .collect()
}
