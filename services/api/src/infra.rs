use club_matcher::directory::{ClubCatalogImporter, InMemoryClubDirectory};
use club_matcher::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seeds the in-memory directory from the configured export, or starts empty.
pub(crate) fn load_directory(catalog_csv: Option<&Path>) -> Result<InMemoryClubDirectory, AppError> {
    let Some(path) = catalog_csv else {
        warn!("CLUB_DIRECTORY_CSV not set; serving an empty club directory");
        return Ok(InMemoryClubDirectory::default());
    };

    let directory = InMemoryClubDirectory::new(ClubCatalogImporter::from_path(path)?);
    info!(clubs = directory.len(), path = %path.display(), "club directory loaded");
    Ok(directory)
}

pub(crate) fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;

    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("threshold must be between 0 and 1, got {value}"))
    }
}

pub(crate) fn parse_limit(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("limit must be a positive integer".to_string()),
        Ok(limit) => Ok(limit),
        Err(err) => Err(format!("failed to parse '{raw}' as a limit ({err})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_threshold_enforces_unit_interval() {
        assert_eq!(parse_threshold(" 0.45 "), Ok(0.45));
        assert_eq!(parse_threshold("1"), Ok(1.0));
        assert!(parse_threshold("1.01").is_err());
        assert!(parse_threshold("-0.1").is_err());
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("high").is_err());
    }

    #[test]
    fn parse_limit_requires_a_positive_count() {
        assert_eq!(parse_limit("5"), Ok(5));
        assert!(parse_limit("0").is_err());
        assert!(parse_limit("-1").is_err());
        assert!(parse_limit("many").is_err());
    }

    #[test]
    fn missing_catalog_path_yields_empty_directory() {
        let directory = load_directory(None).expect("empty directory");
        assert!(directory.is_empty());
    }

    #[test]
    fn unreadable_catalog_is_an_import_error() {
        let error = load_directory(Some(Path::new("./does-not-exist.csv")))
            .expect_err("missing file");
        assert!(matches!(error, AppError::Import(_)));
    }
}
