use std::{fmt, sync::Arc};

use labelscan_core::BarcodeScanner;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scanner: Arc<BarcodeScanner>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let scanner = BarcodeScanner::new(config.temp_dir.clone());
        Self {
            config: Arc::new(config),
            scanner: Arc::new(scanner),
        }
    }
}
