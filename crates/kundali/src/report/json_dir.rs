use crate::error::{KundaliError, Result};
use crate::report::source::{ReportSection, ReportSource};
use crate::report::types::ChartsResponse;
use crate::vedic::DashaResponse;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads saved service responses from a directory: `kundali.json`,
/// `charts.json`, `dasha.json` and `ascendant.json`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, section: ReportSection) -> PathBuf {
        self.dir.join(format!("{}.json", section.name()))
    }

    async fn read<T: DeserializeOwned>(&self, section: ReportSection) -> Result<T> {
        let path = self.path_for(section);
        let failed = |message: String| KundaliError::Source {
            section: section.name().to_string(),
            message: format!("{}: {message}", path.display()),
        };
        let bytes = tokio::fs::read(&path).await.map_err(|e| failed(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| failed(e.to_string()))
    }
}

#[async_trait]
impl ReportSource for JsonDirSource {
    async fn kundali(&self) -> Result<Value> {
        self.read(ReportSection::Kundali).await
    }

    async fn charts(&self) -> Result<ChartsResponse> {
        self.read(ReportSection::Charts).await
    }

    async fn dasha(&self) -> Result<DashaResponse> {
        self.read(ReportSection::Dasha).await
    }

    async fn ascendant(&self) -> Result<Value> {
        self.read(ReportSection::Ascendant).await
    }
}
