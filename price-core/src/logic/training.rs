//! Training Preparation - dataset to model-ready matrices
//!
//! Covers everything before fitting weights: split, pipeline fit,
//! schema-ordered matrices and the reference network.

use ndarray::Array2;

use crate::constants::DEFAULT_SEED_MODEL;
use crate::logic::dataset::{targets, train_test_split, DatasetError, RawHousingRecord};
use crate::logic::model::DenseNetwork;
use crate::logic::pipeline::{FeaturePipeline, PipelineConfig, PipelineError, RecordSet};

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Split, fitted pipeline and matrices for one training run
#[derive(Debug)]
pub struct TrainingSet {
    pub pipeline: FeaturePipeline,
    pub x_train: Array2<f32>,
    pub y_train: Vec<f32>,
    pub x_test: Array2<f32>,
    pub y_test: Vec<f32>,
}

/// Seeded factory for the pipeline and the network
#[derive(Debug, Clone)]
pub struct HousingDataPipeline {
    seed: u64,
    config: PipelineConfig,
}

impl HousingDataPipeline {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fresh, unfitted pipeline
    pub fn create_pipeline(&self) -> FeaturePipeline {
        FeaturePipeline::from_config(self.config.clone())
    }

    /// Reference architecture, seeded from this factory
    pub fn build_network(&self) -> DenseNetwork {
        DenseNetwork::reference_architecture(self.seed)
    }

    /// Run held-out records through a fresh pipeline
    ///
    /// Only works for stateless configurations; with normalization on the
    /// fresh scaler is unfitted and this returns `NotFitted`. Use the
    /// pipeline in [`TrainingSet`] instead.
    pub fn transform_test_data(&self, records: &[RawHousingRecord]) -> Result<Array2<f32>, PipelineError> {
        self.create_pipeline()
            .transform_to_matrix(&RecordSet::from_records(records))
    }

    /// Split, fit on the training half, transform both halves
    pub fn prepare_training_set(
        &self,
        records: &[RawHousingRecord],
        test_ratio: f64,
    ) -> Result<TrainingSet, TrainingError> {
        let (train, test) = train_test_split(records, test_ratio, self.seed)?;
        log::debug!("Split {} records into {} train / {} test", records.len(), train.len(), test.len());

        let mut pipeline = self.create_pipeline();
        pipeline.fit(&RecordSet::from_records(&train))?;

        let x_train = pipeline.transform_to_matrix(&RecordSet::from_records(&train))?;
        let x_test = pipeline.transform_to_matrix(&RecordSet::from_records(&test))?;

        Ok(TrainingSet {
            pipeline,
            x_train,
            y_train: targets(&train)?,
            x_test,
            y_test: targets(&test)?,
        })
    }
}

impl Default for HousingDataPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_MODEL)
    }
}
