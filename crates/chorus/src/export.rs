//! Serialization of sequences.

use log::debug;

use chorus_core::Sequence;

use crate::config::ExportConfig;

/// Writes a [`Sequence`] as JSON.
#[derive(Debug, Clone)]
pub(crate) struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            pretty: config.pretty(),
        }
    }

    pub fn export(&self, sequence: &Sequence) -> Result<String, serde_json::Error> {
        let json = if self.pretty {
            serde_json::to_string_pretty(sequence)?
        } else {
            serde_json::to_string(sequence)?
        };
        debug!(bytes = json.len(), pretty = self.pretty; "Exported sequence as JSON");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use chorus_core::Meta;

    use super::*;

    #[test]
    fn test_compact_output() {
        let exporter = JsonExporter::new(&ExportConfig::new(false));
        let json = exporter.export(&Sequence::empty(Meta::default())).unwrap();
        assert_eq!(
            json,
            r#"{"meta":{"title":"","terminators":"none"},"agents":["[","]"],"stages":[]}"#
        );
    }

    #[test]
    fn test_pretty_output() {
        let exporter = JsonExporter::new(&ExportConfig::default());
        let json = exporter.export(&Sequence::empty(Meta::default())).unwrap();
        assert!(json.contains('\n'));
        assert!(json.starts_with("{\n  \"meta\""));
    }
}
