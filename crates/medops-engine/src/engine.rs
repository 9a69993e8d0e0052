//! The analytics engine facade.
//!
//! One [`BaselineStore`] is shared by every engine. Each call takes a single
//! `Arc<BaselineSnapshot>` up front and computes against it; training builds
//! the next snapshot off to the side and publishes it in one swap.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use medops_anomaly::{AnomalyDetector, AnomalyReport};
use medops_baseline::{
    BaselineError, BaselinePersistence, BaselineSnapshot, BaselineStore, InMemoryBaseline,
    JsonFileBaseline,
};
use medops_optimizer::OptimizationReport;
use medops_outbreak::{OutbreakPredictor, OutbreakReport};
use medops_types::{
    AnomalyScope, CaseEntry, FinancialEntry, PatientEntry, ResourceEntry, ResourceScope,
    ResourceSnapshot,
};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::synthetic::SyntheticSource;
use crate::training::{retrain, TrainingData, TrainingStatus};

/// Seed of the synthetic training set used when no data is supplied.
pub const SYNTHETIC_TRAINING_SEED: u64 = 42;

pub struct AnalyticsEngine {
    config: EngineConfig,
    store: Arc<BaselineStore>,
    detector: AnomalyDetector,
    predictor: OutbreakPredictor,
}

impl AnalyticsEngine {
    pub fn new(config: EngineConfig, store: Arc<BaselineStore>) -> Self {
        let detector = AnomalyDetector::new(config.anomaly);
        let predictor = OutbreakPredictor::new(config.outbreak, config.jitter.to_mode());
        Self {
            config,
            store,
            detector,
            predictor,
        }
    }

    /// Open the baseline persisted under `config.model_dir`.
    ///
    /// The directory is expected to exist; see [`medops_baseline::init_model_dir`].
    pub fn open(config: EngineConfig) -> EngineResult<Self> {
        let persistence = JsonFileBaseline::in_dir(&config.model_dir);
        Self::with_persistence(config, persistence)
    }

    /// An engine whose baseline lives only in memory.
    pub fn in_memory(config: EngineConfig) -> EngineResult<Self> {
        Self::with_persistence(config, InMemoryBaseline::new())
    }

    pub fn with_persistence(
        config: EngineConfig,
        persistence: impl BaselinePersistence + 'static,
    ) -> EngineResult<Self> {
        let store = BaselineStore::open(persistence)?;
        Ok(Self::new(config, Arc::new(store)))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<BaselineStore> {
        &self.store
    }

    /// The baseline version currently in effect.
    pub fn baseline(&self) -> Arc<BaselineSnapshot> {
        self.store.snapshot()
    }

    pub fn optimize(
        &self,
        beds: &[ResourceSnapshot],
        staff: &[ResourceSnapshot],
        equipment: &[ResourceSnapshot],
        scope: ResourceScope,
    ) -> OptimizationReport {
        medops_optimizer::optimize(beds, staff, equipment, scope)
    }

    pub fn detect(
        &self,
        resource: &[ResourceEntry],
        patient: &[PatientEntry],
        financial: &[FinancialEntry],
        scope: AnomalyScope,
    ) -> AnomalyReport {
        self.detect_at(resource, patient, financial, scope, Utc::now())
    }

    pub fn detect_at(
        &self,
        resource: &[ResourceEntry],
        patient: &[PatientEntry],
        financial: &[FinancialEntry],
        scope: AnomalyScope,
        as_of: DateTime<Utc>,
    ) -> AnomalyReport {
        let baseline = self.store.snapshot();
        self.detector
            .detect_at(&baseline, resource, patient, financial, scope, as_of)
    }

    /// Forecast every disease `horizon_days` ahead of `as_of`
    /// (the configured default horizon when `None`).
    pub fn predict(
        &self,
        historical: &BTreeMap<String, Vec<CaseEntry>>,
        current: &BTreeMap<String, u64>,
        horizon_days: Option<u32>,
        as_of: DateTime<Utc>,
    ) -> OutbreakReport {
        let baseline = self.store.snapshot();
        let horizon = horizon_days.unwrap_or(self.config.outbreak.default_horizon_days);
        self.predictor
            .predict(&baseline, historical, current, horizon, as_of)
    }

    /// Retrain normal ranges and forecast models, then publish the result.
    pub fn train(&self, data: Option<TrainingData>) -> EngineResult<TrainingStatus> {
        self.train_at(data, Utc::now())
    }

    /// [`train`](Self::train) with synthetic data dated relative to `as_of`.
    pub fn train_at(
        &self,
        data: Option<TrainingData>,
        as_of: DateTime<Utc>,
    ) -> EngineResult<TrainingStatus> {
        let base = self.store.snapshot();

        let (data, synthetic) = match data {
            Some(data) if !data.is_empty() => (data, false),
            _ => {
                info!(seed = SYNTHETIC_TRAINING_SEED, "no training data supplied, using synthetic set");
                let data = SyntheticSource::seeded(SYNTHETIC_TRAINING_SEED, as_of)
                    .labeled_training(&base);
                (data, true)
            }
        };

        let (next, summary) = retrain(&base, &data);

        let (version, persisted) = match self.store.publish(next) {
            Ok(published) => (published.version, true),
            Err(BaselineError::SaveFailed { version, reason }) => {
                warn!(version, reason = %reason, "trained baseline kept in memory only");
                (version, false)
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            version,
            metrics = summary.metrics_retrained,
            diseases = summary.diseases_fitted,
            synthetic,
            persisted,
            "training complete"
        );

        let message = if persisted {
            "Models trained successfully".to_string()
        } else {
            "Models trained; baseline could not be saved".to_string()
        };

        Ok(TrainingStatus {
            status: "success".to_string(),
            message,
            version,
            metrics_retrained: summary.metrics_retrained,
            diseases_fitted: summary.diseases_fitted,
            synthetic_data: synthetic,
            persisted,
        })
    }
}

impl std::fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEngine")
            .field("baseline_version", &self.store.version())
            .field("jitter", &self.predictor.jitter_mode())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use medops_baseline::{category, metric, BaselineResult};

    struct ReadOnly;

    impl BaselinePersistence for ReadOnly {
        fn save(&self, _snapshot: &BaselineSnapshot) -> BaselineResult<()> {
            Err(BaselineError::PersistenceError("read-only".into()))
        }

        fn load(&self) -> BaselineResult<Option<BaselineSnapshot>> {
            Ok(None)
        }
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn train_without_data_uses_synthetic_set() {
        let engine = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        let status = engine.train_at(None, as_of()).unwrap();
        assert_eq!(status.status, "success");
        assert!(status.synthetic_data);
        assert!(status.persisted);
        assert_eq!(status.version, 1);
        assert_eq!(status.metrics_retrained, 9);
        assert_eq!(status.diseases_fitted, 8);
        assert_eq!(engine.baseline().version, 1);
        assert!(engine.baseline().model("Influenza").is_some());
    }

    #[test]
    fn synthetic_training_is_deterministic() {
        let a = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        let b = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        a.train_at(None, as_of()).unwrap();
        b.train_at(None, as_of()).unwrap();
        assert_eq!(a.baseline().normal_ranges, b.baseline().normal_ranges);
        assert_eq!(a.baseline().forecast_models, b.baseline().forecast_models);
    }

    #[test]
    fn synthetic_training_keeps_sigma_close() {
        let engine = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        let before = engine.baseline().range(category::RESOURCE, metric::BED_OCCUPANCY);
        engine.train_at(None, as_of()).unwrap();
        let after = engine.baseline().range(category::RESOURCE, metric::BED_OCCUPANCY);
        assert!((after.mean - before.mean).abs() < 0.5 * before.std);
        assert!((after.std - before.std).abs() < 0.5 * before.std);
    }

    #[test]
    fn failed_save_keeps_published_version() {
        let engine = AnalyticsEngine::with_persistence(EngineConfig::default(), ReadOnly).unwrap();
        let status = engine.train_at(None, as_of()).unwrap();
        assert!(!status.persisted);
        assert_eq!(status.version, 1);
        assert_eq!(engine.baseline().version, 1);
    }

    #[test]
    fn empty_training_data_counts_as_absent() {
        let engine = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        let status = engine
            .train_at(Some(TrainingData::default()), as_of())
            .unwrap();
        assert!(status.synthetic_data);
    }

    #[test]
    fn predict_uses_default_horizon() {
        let engine = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        let a = engine.predict(&BTreeMap::new(), &BTreeMap::new(), None, as_of());
        let b = engine.predict(&BTreeMap::new(), &BTreeMap::new(), Some(30), as_of());
        assert_eq!(a, b);
        let recs = &a.recommendations;
        assert!(recs[0].description.ends_with("in the next 30 days."));
    }
}
