//! Rendering of resolved locations for the command line.

use crate::config::OutputFormat;
use crate::locator::Location;
use anyhow::Result;
use serde::Serialize;

/// One resolved fix path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedFixPath {
    pub fix_path: String,
    pub document: usize,
    #[serde(flatten)]
    pub location: Location,
}

/// Renders records in the requested format.
///
/// `source` names the manifest in text output; it is not part of the
/// structured formats.
///
/// ```
/// use fixpath_locator::config::OutputFormat;
/// use fixpath_locator::output::{render, LocatedFixPath};
/// use fixpath_locator::Location;
///
/// let records = vec![LocatedFixPath {
///     fix_path: "spec.replicas".to_string(),
///     document: 0,
///     location: Location::new(4, 13),
/// }];
///
/// let text = render(&records, OutputFormat::Text, "deploy.yaml").unwrap();
/// assert_eq!(text, "deploy.yaml:4:13\tspec.replicas\n");
/// ```
pub fn render(records: &[LocatedFixPath], format: OutputFormat, source: &str) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => records
            .iter()
            .map(|record| format!("{}:{}\t{}\n", source, record.location, record.fix_path))
            .collect(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(records)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(records)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<LocatedFixPath> {
        vec![
            LocatedFixPath {
                fix_path: "metadata.namespace=YOUR_NAMESPACE".to_string(),
                document: 1,
                location: Location::new(65, 3),
            },
            LocatedFixPath {
                fix_path: "status".to_string(),
                document: 0,
                location: Location::default(),
            },
        ]
    }

    #[test]
    fn test_render_text() {
        let text = render(&records(), OutputFormat::Text, "-").unwrap();
        assert_eq!(
            text,
            "-:65:3\tmetadata.namespace=YOUR_NAMESPACE\n-:0:0\tstatus\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json = render(&records(), OutputFormat::Json, "ignored").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["fixPath"], "metadata.namespace=YOUR_NAMESPACE");
        assert_eq!(value[0]["document"], 1);
        assert_eq!(value[0]["line"], 65);
        assert_eq!(value[0]["column"], 3);
        assert_eq!(value[1]["line"], 0);
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&records(), OutputFormat::Yaml, "ignored").unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value[0]["line"].as_u64(), Some(65));
        assert_eq!(value[1]["fixPath"].as_str(), Some("status"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], OutputFormat::Text, "x").unwrap(), "");
        assert_eq!(render(&[], OutputFormat::Json, "x").unwrap(), "[]\n");
    }
}
