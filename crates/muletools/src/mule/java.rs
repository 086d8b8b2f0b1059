use crate::prelude::{println, *};
use colored::Colorize;
use muletools_core::java::{build_jdk_support, JdkSupport};
use muletools_core::tables::{find_tables, parse_document, Landmark};

use super::channel_label;
use crate::config::DocsConfig;
use crate::fetch::Fetcher;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct JavaOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// The runtime-to-JDK support matrix from the Java support page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JavaOutput {
    pub support: Vec<JdkSupport>,
    pub source_url: String,
}

pub async fn run(options: JavaOptions, global: crate::Global) -> Result<()> {
    let fetcher = Fetcher::new(DocsConfig::default());

    if global.verbose {
        println!(
            "Fetching Java support from {}...",
            fetcher.config().java_support_url
        );
    }

    let output = java_support_data(&fetcher).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_java_text(&output));
    }

    Ok(())
}

/// Fetches the Java support page and pairs each runtime version with its
/// supported JDK majors.
pub async fn java_support_data(fetcher: &Fetcher) -> Result<JavaOutput, Error> {
    let url = fetcher.config().java_support_url.clone();
    let raw = fetcher.fetch(&url).await?;
    let support = extract_jdk_support(&raw.body)?;

    Ok(JavaOutput {
        support,
        source_url: url,
    })
}

fn java_landmark() -> Landmark {
    Landmark::header_any(&["java", "jdk"]).min_columns(2)
}

fn extract_jdk_support(body: &str) -> Result<Vec<JdkSupport>, Error> {
    let document = parse_document(body)?;
    let tables = find_tables(&document, &java_landmark());
    Ok(build_jdk_support(&tables))
}

fn format_java_text(output: &JavaOutput) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "JAVA SUPPORT".bright_cyan().bold()));
    result.push_str(&format!(
        "{}: {}\n\n",
        "Source".green(),
        output.source_url.cyan().underline()
    ));

    if output.support.is_empty() {
        result.push_str(&format!(
            "{}\n",
            "No Java support rows found on the page.".yellow()
        ));
        return result;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["CHANNEL", "RUNTIME", "JDK VERSIONS"]);
    for entry in &output.support {
        let jdks = entry
            .jdk_versions
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(prettytable::row![
            channel_label(entry.runtime.channel),
            entry.runtime.raw_text,
            jdks
        ]);
    }
    result.push_str(&table.to_string());

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use muletools_core::version::VersionKey;

    const JAVA_FIXTURE: &str = r#"
        <html><body>
          <table>
            <tr><th>Mule Version</th><th>Java Support</th></tr>
            <tr><td>4.6.0 Edge</td><td>8, 11, and 17</td></tr>
            <tr><td>4.4.0</td><td>8 and 11</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_extract_jdk_support_pairs_rows() {
        let support = extract_jdk_support(JAVA_FIXTURE).unwrap();

        assert_eq!(support.len(), 2);
        assert_eq!(support[0].runtime.key, VersionKey(4, 6, 0));
        assert_eq!(support[0].jdk_versions, vec![8, 11, 17]);
    }

    #[test]
    fn test_extract_jdk_support_empty_page_is_parse_error() {
        assert!(matches!(
            extract_jdk_support("\n").unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[test]
    fn test_format_java_text_lists_entries() {
        let output = JavaOutput {
            support: extract_jdk_support(JAVA_FIXTURE).unwrap(),
            source_url: "https://example.com/java".to_string(),
        };

        let formatted = format_java_text(&output);

        assert!(formatted.contains("JAVA SUPPORT"));
        assert!(formatted.contains("4.6.0 Edge"));
        assert!(formatted.contains("8, 11, 17"));
    }

    #[test]
    fn test_format_java_text_empty() {
        let output = JavaOutput {
            support: vec![],
            source_url: "https://example.com".to_string(),
        };

        assert!(format_java_text(&output).contains("No Java support rows"));
    }
}
