use crate::prelude::{println, *};
use muletools_core::matrix::{build_matrix, VersionMatrix};
use muletools_core::tables::{find_tables, parse_document, Landmark};

use super::{format_matrix_text, MatrixOutput};
use crate::config::DocsConfig;
use crate::fetch::Fetcher;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DataweaveOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: DataweaveOptions, global: crate::Global) -> Result<()> {
    let fetcher = Fetcher::new(DocsConfig::default());

    if global.verbose {
        println!(
            "Fetching DataWeave compatibility from {}...",
            fetcher.config().dataweave_url
        );
    }

    let output = dataweave_versions_data(&fetcher).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_matrix_text("DATAWEAVE COMPATIBILITY", &output));
    }

    Ok(())
}

/// Fetches the DataWeave page and builds the runtime-to-DataWeave
/// compatibility matrix, keyed by runtime version.
pub async fn dataweave_versions_data(fetcher: &Fetcher) -> Result<MatrixOutput, Error> {
    let url = fetcher.config().dataweave_url.clone();
    let raw = fetcher.fetch(&url).await?;
    let matrix = extract_dataweave_matrix(&raw.body)?;

    Ok(MatrixOutput {
        matrix,
        source_url: url,
    })
}

fn dataweave_landmark() -> Landmark {
    // The compatibility table is the one mentioning the runtime in its
    // header; the page also carries unrelated layout tables.
    Landmark::header_any(&["mule", "runtime"]).min_columns(2)
}

fn extract_dataweave_matrix(body: &str) -> Result<VersionMatrix, Error> {
    let document = parse_document(body)?;
    let tables = find_tables(&document, &dataweave_landmark());
    Ok(build_matrix(&tables))
}
