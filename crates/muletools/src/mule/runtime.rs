use crate::prelude::{println, *};
use colored::Colorize;
use muletools_core::matrix::collect_versions;
use muletools_core::tables::{find_tables, parse_document, Landmark};
use muletools_core::version::{latest_by_channel, LatestVersions, VersionRecord};

use super::channel_label;
use crate::config::DocsConfig;
use crate::fetch::Fetcher;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct RuntimeOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct LatestOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// All runtime versions scraped from the release cadence page, both
/// channels included.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuntimeOutput {
    pub versions: Vec<VersionRecord>,
    pub source_url: String,
}

/// Latest version per channel. Channels with no classified record are
/// omitted from the serialized output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LatestOutput {
    #[serde(flatten)]
    pub latest: LatestVersions,
    pub source_url: String,
}

pub async fn run(options: RuntimeOptions, global: crate::Global) -> Result<()> {
    let fetcher = Fetcher::new(DocsConfig::default());

    if global.verbose {
        println!(
            "Fetching runtime versions from {}...",
            fetcher.config().lts_edge_release_cadence_url
        );
    }

    let output = runtime_versions_data(&fetcher).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_runtime_text(&output));
    }

    Ok(())
}

pub async fn run_latest(options: LatestOptions, global: crate::Global) -> Result<()> {
    let fetcher = Fetcher::new(DocsConfig::default());

    if global.verbose {
        println!(
            "Fetching latest runtime versions from {}...",
            fetcher.config().lts_edge_release_cadence_url
        );
    }

    let output = latest_versions_data(&fetcher).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_latest_text(&output));
    }

    Ok(())
}

/// Fetches the release cadence page and returns every classifiable version
/// found in the runtime tables, in document order.
pub async fn runtime_versions_data(fetcher: &Fetcher) -> Result<RuntimeOutput, Error> {
    let url = fetcher.config().lts_edge_release_cadence_url.clone();
    let raw = fetcher.fetch(&url).await?;
    let versions = extract_runtime_versions(&raw.body)?;

    Ok(RuntimeOutput {
        versions,
        source_url: url,
    })
}

/// Fetches the release cadence page and selects the newest record per
/// channel.
pub async fn latest_versions_data(fetcher: &Fetcher) -> Result<LatestOutput, Error> {
    let all = runtime_versions_data(fetcher).await?;

    Ok(LatestOutput {
        latest: latest_by_channel(&all.versions),
        source_url: all.source_url,
    })
}

fn runtime_landmark() -> Landmark {
    Landmark::header_any(&["version", "release"])
}

/// Pure assembly step, split from the fetch so fixtures can exercise it.
fn extract_runtime_versions(body: &str) -> Result<Vec<VersionRecord>, Error> {
    let document = parse_document(body)?;
    let tables = find_tables(&document, &runtime_landmark());
    Ok(collect_versions(&tables))
}

fn format_runtime_text(output: &RuntimeOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "MULE RUNTIME VERSIONS".bright_cyan().bold()));
    result.push_str(&format!(
        "{}: {}\n\n",
        "Source".green(),
        output.source_url.cyan().underline()
    ));

    if output.versions.is_empty() {
        result.push_str(&format!("{}\n", "No versions found on the page.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["CHANNEL", "VERSION", "AS PUBLISHED"]);
    for record in &output.versions {
        table.add_row(prettytable::row![
            channel_label(record.channel),
            record.key,
            record.raw_text
        ]);
    }
    result.push_str(&table.to_string());

    result.push_str(&format!(
        "\n{} {}\n",
        output.versions.len().to_string().bright_cyan().bold(),
        "versions listed".bright_white()
    ));

    result
}

fn format_latest_text(output: &LatestOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{}\n",
        "LATEST MULE RUNTIME VERSIONS".bright_cyan().bold()
    ));
    result.push_str(&format!(
        "{}: {}\n\n",
        "Source".green(),
        output.source_url.cyan().underline()
    ));

    let mut any = false;
    if let Some(edge) = &output.latest.edge {
        result.push_str(&format!(
            "{}: {} ({})\n",
            "Edge".green(),
            edge.key.to_string().bright_white().bold(),
            edge.raw_text
        ));
        any = true;
    }
    if let Some(lts) = &output.latest.lts {
        result.push_str(&format!(
            "{}: {} ({})\n",
            "LTS".green(),
            lts.key.to_string().bright_white().bold(),
            lts.raw_text
        ));
        any = true;
    }

    if !any {
        result.push_str(&format!(
            "{}\n",
            "No channel-tagged versions found on the page.".yellow()
        ));
    }

    result
}
