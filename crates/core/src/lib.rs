pub mod config;
pub mod dataset;
pub mod query;
pub mod report;
pub mod session;
pub mod store;
pub mod types;

use std::path::Path;

use crate::{config::Config, types::DetectionRecord};

/// Initial collection for a new dashboard: the file named by `override_path`,
/// else the config's dataset, else the built-in sample.
pub fn load_detections(
    override_path: Option<&Path>,
    config: &Config,
) -> anyhow::Result<Vec<DetectionRecord>> {
    match override_path.or(config.dataset.as_deref()) {
        Some(path) => dataset::load_json(path),
        None => Ok(dataset::sample()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_sample_without_dataset() {
        let records = load_detections(None, &Config::default()).unwrap();
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn missing_dataset_file_is_an_error() {
        let err = load_detections(Some(Path::new("does-not-exist.json")), &Config::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("does-not-exist.json"));
    }
}
