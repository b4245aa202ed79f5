use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::Mutex;

use crate::{LoadError, RegionIndex, RestaurantRecord, Result, Selection, filter, load_csv};

/// The normalized records together with the index derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<RestaurantRecord>,
    index: RegionIndex,
}

impl Dataset {
    pub fn from_records(records: Vec<RestaurantRecord>) -> Self {
        let index = RegionIndex::build(&records);
        Dataset { records, index }
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    pub fn search(&self, selection: &Selection) -> Vec<&RestaurantRecord> {
        filter(&self.records, selection)
    }
}

#[derive(Default)]
struct CatalogState {
    dataset: Option<Arc<Dataset>>,
}

/// Loads the data set from `source` once and hands out the cached copy
/// afterwards. Only [`Catalog::refresh`] reads the file again.
pub struct Catalog {
    source: PathBuf,
    state: Arc<Mutex<CatalogState>>,
}

impl Catalog {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Catalog {
            source: source.into(),
            state: Arc::new(Mutex::new(CatalogState::default())),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub async fn ensure_loaded(&self) -> Result<Arc<Dataset>> {
        let mut state = self.state.lock().await;
        if let Some(dataset) = &state.dataset {
            debug!("ensure_loaded: using cached data set");
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(self.load().await?);
        state.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Re-reads the source. On failure the previously cached data set stays.
    pub async fn refresh(&self) -> Result<Arc<Dataset>> {
        let mut state = self.state.lock().await;
        let dataset = Arc::new(self.load().await?);
        state.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    async fn load(&self) -> Result<Dataset> {
        debug!("load: reading {}", self.source.display());
        let contents = tokio::fs::read(&self.source)
            .await
            .map_err(|source| LoadError::Read {
                path: self.source.clone(),
                source,
            })?;

        let records = load_csv(contents.as_slice())?;
        let dataset = Dataset::from_records(records);
        info!(
            "Loaded {} restaurants from {}",
            dataset.records.len(),
            self.source.display()
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::Region;

    const HEADER: &str =
        "香港地區,地區,餐廳名稱,菜式,素食種類,地址,座標,經度,Openrice連結,電話,備註\n";
    const ROW_CENTRAL: &str =
        "港島,中環,綠野小館,中菜,全素,士丹利街10號,\"22.2819, 114.1563\",,,28101234,\n";
    const ROW_SHA_TIN: &str =
        "新界,沙田,禪味,日式,全素,沙田正街2號,\"22.3817, 114.1880\",,,,\n";

    fn csv_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            file.write_all(row.as_bytes()).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn rewrite(file: &NamedTempFile, rows: &[&str]) {
        let mut contents = HEADER.to_string();
        contents.extend(rows.iter().copied());
        std::fs::write(file.path(), contents).unwrap();
    }

    #[tokio::test]
    async fn loads_once_and_caches() {
        let file = csv_file(&[ROW_CENTRAL]);
        let catalog = Catalog::new(file.path());

        let first = catalog.ensure_loaded().await.unwrap();
        rewrite(&file, &[ROW_CENTRAL, ROW_SHA_TIN]);
        let second = catalog.ensure_loaded().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.records().len(), 1);
    }

    #[tokio::test]
    async fn refresh_rereads_source() {
        let file = csv_file(&[ROW_CENTRAL]);
        let catalog = Catalog::new(file.path());
        catalog.ensure_loaded().await.unwrap();

        rewrite(&file, &[ROW_CENTRAL, ROW_SHA_TIN]);
        let refreshed = catalog.refresh().await.unwrap();
        assert_eq!(refreshed.records().len(), 2);
        assert_eq!(refreshed.index().districts(Region::NewTerritories), ["沙田"]);

        let cached = catalog.ensure_loaded().await.unwrap();
        assert!(Arc::ptr_eq(&refreshed, &cached));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_cached_data() {
        let file = csv_file(&[ROW_CENTRAL]);
        let catalog = Catalog::new(file.path());
        let loaded = catalog.ensure_loaded().await.unwrap();

        rewrite(&file, &["港島,中環,壞行,中菜,全素,地址,22.28;114.15,,,,\n"]);
        let err = catalog.refresh().await.unwrap_err();
        assert!(matches!(err, LoadError::CoordinateParse { line: 2, .. }));

        let cached = catalog.ensure_loaded().await.unwrap();
        assert!(Arc::ptr_eq(&loaded, &cached));
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(dir.path().join("missing.csv"));
        let err = catalog.ensure_loaded().await.unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn search_uses_loaded_records() {
        let file = csv_file(&[ROW_CENTRAL, ROW_SHA_TIN]);
        let dataset = Catalog::new(file.path()).ensure_loaded().await.unwrap();
        let selection = Selection::new().choose(Region::NewTerritories, ["沙田"]);
        let found = dataset.search(&selection);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "禪味");
    }
}
