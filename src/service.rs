use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};

use crate::classifier::pipeline::{train, TrainedModel};
use crate::config::TreeParams;
use crate::data::loader::load_file;
use crate::data::model::RawListing;
use crate::data::prepare::prepare_dataset;
use crate::data::reference::ReferenceTable;
use crate::error::MissingInputError;
use crate::predict::{predict, Prediction, QueryInput};

// ---------------------------------------------------------------------------
// TrainedBundle – everything prediction needs, built once
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TrainedBundle {
    pub model: TrainedModel,
    pub reference: ReferenceTable,
    /// Training rows per tier, indexed by `Tier::index`.
    pub tier_counts: [usize; 3],
    pub duplicates_dropped: usize,
    pub source: Option<PathBuf>,
}

impl TrainedBundle {
    /// Prepare the raw rows and fit the classifier.
    pub fn build(rows: &[RawListing], params: &TreeParams) -> Result<Self> {
        let prepared = prepare_dataset(rows).context("preparing dataset")?;
        let model =
            train(&prepared.features(), &prepared.labels(), params).context("training model")?;
        Ok(Self {
            model,
            reference: prepared.reference_table(),
            tier_counts: prepared.tier_counts(),
            duplicates_dropped: prepared.duplicates_dropped,
            source: None,
        })
    }

    pub fn predict(&self, query: &QueryInput) -> Result<Prediction, MissingInputError> {
        predict(&self.model, query, &self.reference)
    }

    pub fn training_rows(&self) -> usize {
        self.tier_counts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// ModelService – train on first use, read-only afterwards
// ---------------------------------------------------------------------------

/// Holds at most one trained bundle for the life of the process.
#[derive(Debug, Default)]
pub struct ModelService {
    cell: OnceLock<TrainedBundle>,
}

static GLOBAL: ModelService = ModelService::new();

/// The process-wide service used by the application.
pub fn global() -> &'static ModelService {
    &GLOBAL
}

impl ModelService {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The trained bundle, if training already happened.
    pub fn get(&self) -> Option<&TrainedBundle> {
        self.cell.get()
    }

    /// Return the trained bundle, loading and training from `path` on the
    /// first call. Later calls ignore `path` and `params`.
    pub fn get_or_train(&self, path: &Path, params: &TreeParams) -> Result<&TrainedBundle> {
        if let Some(bundle) = self.cell.get() {
            return Ok(bundle);
        }
        let rows = load_file(path)?;
        let mut bundle = TrainedBundle::build(&rows, params)
            .with_context(|| format!("building model from {}", path.display()))?;
        bundle.source = Some(path.to_path_buf());
        Ok(self.install(bundle))
    }

    /// Store `bundle` unless another caller won the race; returns the
    /// bundle that is in place.
    pub fn install(&self, bundle: TrainedBundle) -> &TrainedBundle {
        let mut fresh = false;
        let installed = self.cell.get_or_init(|| {
            fresh = true;
            bundle
        });
        if !fresh {
            log::warn!("Model already trained; keeping the existing one");
        }
        installed
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::prepare::tests::raw;

    fn rows() -> Vec<RawListing> {
        vec![
            raw("Accenture", "Senior Consultant", "5-8 Years"),
            raw("Oracle", "Analyst", "1-3 Years"),
            raw("Shell", "Engineer", "0-2 Years"),
        ]
    }

    #[test]
    fn trains_once_and_keeps_the_first_bundle() {
        let service = ModelService::new();
        assert!(service.get().is_none());

        let first = TrainedBundle::build(&rows(), &TreeParams::default()).unwrap();
        let installed = service.install(first.clone());
        assert_eq!(installed.training_rows(), 3);

        let mut other = first;
        other.duplicates_dropped = 99;
        assert_eq!(service.install(other).duplicates_dropped, 0);
        assert_eq!(service.get().map(|b| b.tier_counts), Some([1, 1, 1]));
    }

    #[test]
    fn get_or_train_reads_the_file_once() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Company,Location,Ratings,Reviews,Title,Skills,Experience,Job_Post_History,Salary\n\
             Oracle,Pune,4.1,10 Reviews,Lead Engineer,Java,3-6 Years,2 Days Ago,Not disclosed\n\
             Shell,Pune,3.9,20 Reviews,Engineer,C,1-3 Years,1 Month Ago,Not disclosed\n"
        )
        .unwrap();
        let path = file.path().to_path_buf();

        let service = ModelService::new();
        let bundle = service.get_or_train(&path, &TreeParams::default()).unwrap();
        assert_eq!(bundle.training_rows(), 2);
        drop(file);

        // the file is gone, but the cached bundle is returned
        let again = service.get_or_train(&path, &TreeParams::default()).unwrap();
        assert_eq!(again.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn bad_rows_fail_the_whole_build() {
        let mut rows = rows();
        rows[1].reviews = "none".into();
        let err = TrainedBundle::build(&rows, &TreeParams::default()).unwrap_err();
        assert!(format!("{err:#}").contains("row 1"), "{err:#}");
    }
}
