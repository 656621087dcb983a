//! Reads play catalogs and invoices from JSON or CSV files.

mod parser;

use crate::billing::{Catalog, Invoice, Play};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("play '{play_id}' is listed more than once")]
    DuplicatePlay { play_id: String },
    #[error("unsupported input format for {} (expected .json or .csv)", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("a customer name is required for CSV invoices")]
    MissingCustomer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl Catalog {
    /// Reads the `{"<id>": {"name": .., "type": ..}}` layout.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let plays: HashMap<String, Play> = serde_json::from_reader(reader)?;
        debug!(plays = plays.len(), "loaded JSON catalog");
        Ok(Self::from(plays))
    }

    /// Reads a headed `id,name,type` CSV.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut catalog = Self::new();
        for record in parser::parse_play_rows(reader)? {
            if catalog.contains(&record.play_id) {
                return Err(LoadError::DuplicatePlay {
                    play_id: record.play_id,
                });
            }
            catalog.insert(record.play_id, record.play);
        }
        debug!(plays = catalog.len(), "loaded CSV catalog");
        Ok(catalog)
    }
}

impl Invoice {
    /// Reads `{"customer": .., "performances": [{"playID": .., "audience": ..}]}`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let invoice: Invoice = serde_json::from_reader(reader)?;
        debug!(
            customer = %invoice.customer,
            performances = invoice.performances.len(),
            "loaded JSON invoice"
        );
        Ok(invoice)
    }

    /// Reads a headed `playID,audience` CSV for the given customer.
    pub fn from_csv_reader<R: Read>(
        customer: impl Into<String>,
        reader: R,
    ) -> Result<Self, LoadError> {
        let invoice = Invoice::new(customer, parser::parse_performance_rows(reader)?);
        debug!(
            customer = %invoice.customer,
            performances = invoice.performances.len(),
            "loaded CSV invoice"
        );
        Ok(invoice)
    }
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    let file = open(path)?;

    let catalog = match format {
        InputFormat::Json => Catalog::from_json_reader(file)?,
        InputFormat::Csv => Catalog::from_csv_reader(file)?,
    };
    if catalog.is_empty() {
        warn!(path = %path.display(), "play catalog is empty");
    }
    Ok(catalog)
}

/// Loads an invoice; `customer` overrides the name stored in a JSON invoice
/// and is mandatory for CSV.
pub fn load_invoice<P: AsRef<Path>>(
    path: P,
    customer: Option<&str>,
) -> Result<Invoice, LoadError> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;

    match format {
        InputFormat::Json => {
            let mut invoice = Invoice::from_json_reader(open(path)?)?;
            if let Some(customer) = customer {
                invoice.customer = customer.to_string();
            }
            Ok(invoice)
        }
        InputFormat::Csv => {
            let customer = customer.ok_or(LoadError::MissingCustomer)?;
            Invoice::from_csv_reader(customer, open(path)?)
        }
    }
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{PlayCatalog, PlayType};

    #[test]
    fn json_catalog_uses_classic_layout() {
        let json = r#"{
            "hamlet": {"name": "Hamlet", "type": "tragedy"},
            "as-like": {"name": "As You Like It", "type": "comedy"}
        }"#;
        let catalog = Catalog::from_json_reader(json.as_bytes()).expect("catalog parses");

        assert_eq!(catalog.len(), 2);
        let play = catalog.lookup("as-like").expect("as-like present");
        assert_eq!(play.play_type(), Ok(PlayType::Comedy));
    }

    #[test]
    fn json_catalog_keeps_unknown_types_for_pricing_to_reject() {
        let json = r#"{"henry-v": {"name": "Henry V", "type": "history"}}"#;
        let catalog = Catalog::from_json_reader(json.as_bytes()).expect("catalog parses");
        let kind = catalog.lookup("henry-v").map(|play| play.kind.as_str());
        assert_eq!(kind, Some("history"));
    }

    #[test]
    fn csv_catalog_rejects_duplicate_ids() {
        let csv = "id,name,type\nhamlet,Hamlet,tragedy\nhamlet,Hamlet (revival),tragedy\n";
        match Catalog::from_csv_reader(csv.as_bytes()) {
            Err(LoadError::DuplicatePlay { play_id }) => assert_eq!(play_id, "hamlet"),
            other => panic!("expected duplicate play error, got {other:?}"),
        }
    }

    #[test]
    fn json_invoice_rejects_negative_audience() {
        let json = r#"{"customer": "BigCo",
            "performances": [{"playID": "hamlet", "audience": -1}]}"#;
        assert!(matches!(
            Invoice::from_json_reader(json.as_bytes()),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn input_format_follows_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("plays.JSON")).expect("json"),
            InputFormat::Json
        );
        assert_eq!(
            InputFormat::from_path(Path::new("invoice.csv")).expect("csv"),
            InputFormat::Csv
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("plays.yaml")),
            Err(LoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn csv_invoice_requires_customer() {
        assert!(matches!(
            load_invoice("performances.csv", None),
            Err(LoadError::MissingCustomer)
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_catalog("does-not-exist.json").expect_err("file is missing");
        assert!(err.to_string().contains("does-not-exist.json"));
    }
}
