// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization helpers for printed/exported reports

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json;
use serde_yaml;

/// Human-readable rendering of a report
pub trait Render {
    fn render(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportOutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl ReportOutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportOutputFormat::Text),
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            _ => None,
        }
    }

    pub fn serialize<T: Serialize + Render>(&self, report: &T) -> Result<String> {
        match self {
            ReportOutputFormat::Text => Ok(report.render()),
            ReportOutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }

    /// Machine-readable data only; used where no text rendering exists.
    pub fn serialize_data<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            ReportOutputFormat::Text | ReportOutputFormat::Json => {
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        language: &'static str,
        finished: usize,
    }

    impl Render for Sample {
        fn render(&self) -> String {
            format!("{}: {}", self.language, self.finished)
        }
    }

    #[test]
    fn formats_parse_with_aliases() {
        assert_eq!(ReportOutputFormat::parse("YML"), Some(ReportOutputFormat::Yaml));
        assert_eq!(ReportOutputFormat::parse("txt"), Some(ReportOutputFormat::Text));
        assert_eq!(ReportOutputFormat::parse("xml"), None);
    }

    #[test]
    fn serializes_each_format() {
        let sample = Sample {
            language: "de",
            finished: 3,
        };
        assert_eq!(ReportOutputFormat::Text.serialize(&sample).unwrap(), "de: 3");
        let json: serde_json::Value =
            serde_json::from_str(&ReportOutputFormat::Json.serialize(&sample).unwrap()).unwrap();
        assert_eq!(json["finished"], 3);
        assert!(ReportOutputFormat::Yaml
            .serialize(&sample)
            .unwrap()
            .contains("language: de"));
    }
}
