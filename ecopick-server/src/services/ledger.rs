//! Submission ledger
//!
//! Append-only, process-lifetime log of accepted waste submissions. Records
//! are never updated or removed. Appends are serialized by the write lock.

use chrono::{Local, NaiveDate};
use ecopick_common::{price_for, Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Success,
}

/// One accepted submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: Uuid,
    /// Raw material label as submitted
    pub material: String,
    pub weight_kg: f64,
    pub price_per_kg: f64,
    pub total_price: f64,
    pub submitted_at: NaiveDate,
    pub status: SubmissionStatus,
}

/// Aggregates over everything recorded so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub submissions: usize,
    pub total_weight_kg: f64,
    pub total_value: f64,
}

/// Shared handle to the ledger; clones refer to the same log
#[derive(Debug, Clone, Default)]
pub struct SubmissionLedger {
    records: Arc<RwLock<Vec<SubmissionRecord>>>,
}

impl SubmissionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Price and append a submission
    ///
    /// Material must be non-blank and weight a positive finite number.
    /// A weight of exactly 0 is rejected like a missing weight. A weight so
    /// large that its total overflows is rejected as well.
    pub async fn record(&self, material: &str, weight_kg: f64) -> Result<SubmissionRecord> {
        if material.trim().is_empty() || !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(Error::validation("missing material or weight"));
        }

        let price_per_kg = price_for(material);
        let total_price = weight_kg * price_per_kg;
        if !total_price.is_finite() {
            return Err(Error::validation("weight out of range"));
        }

        let record = SubmissionRecord {
            id: Uuid::new_v4(),
            material: material.to_string(),
            weight_kg,
            price_per_kg,
            total_price,
            submitted_at: Local::now().date_naive(),
            status: SubmissionStatus::Success,
        };

        self.records.write().await.push(record.clone());

        info!(
            weight_kg,
            material = %record.material,
            total_price = record.total_price,
            "Waste submitted"
        );
        Ok(record)
    }

    pub async fn stats(&self) -> AggregateStats {
        let records = self.records.read().await;
        records.iter().fold(
            AggregateStats {
                submissions: records.len(),
                ..Default::default()
            },
            |mut acc, r| {
                acc.total_weight_kg += r.weight_kg;
                acc.total_value += r.total_price;
                acc
            },
        )
    }

    /// Copy of all records in append order
    pub async fn snapshot(&self) -> Vec<SubmissionRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_iron() {
        let ledger = SubmissionLedger::new();
        let record = ledger.record("Iron", 2.0).await.unwrap();

        assert_eq!(record.price_per_kg, 50.0);
        assert_eq!(record.total_price, 100.0);
        assert_eq!(record.status, SubmissionStatus::Success);
        assert_eq!(record.submitted_at, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_record_unknown_material_prices_zero() {
        let ledger = SubmissionLedger::new();
        let record = ledger.record("Unknown Material", 5.0).await.unwrap();

        assert_eq!(record.price_per_kg, 0.0);
        assert_eq!(record.total_price, 0.0);
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_total_is_weight_times_price() {
        let ledger = SubmissionLedger::new();
        for (material, weight) in [("Metal", 1.5), ("Glass", 0.25), ("Paper / Cardboard", 3.0)] {
            let record = ledger.record(material, weight).await.unwrap();
            assert_eq!(record.total_price, weight * price_for(material));
        }
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_and_not_recorded() {
        let ledger = SubmissionLedger::new();

        for (material, weight) in [
            ("", 1.0),
            ("   ", 1.0),
            ("Plastic", 0.0),
            ("Plastic", -2.0),
            ("Plastic", f64::NAN),
            ("Plastic", f64::INFINITY),
        ] {
            let err = ledger.record(material, weight).await.unwrap_err();
            assert_eq!(err.to_string(), "missing material or weight");
        }
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn test_overflowing_total_rejected_and_not_recorded() {
        let ledger = SubmissionLedger::new();

        let err = ledger.record("Iron", 1e308).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "weight out of range");
        assert!(ledger.is_empty().await);
        assert!(ledger.stats().await.total_value.is_finite());
    }

    #[tokio::test]
    async fn test_identical_records_are_not_deduplicated() {
        let ledger = SubmissionLedger::new();
        let first = ledger.record("Plastic", 1.0).await.unwrap();
        let second = ledger.record("Plastic", 1.0).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(ledger.len().await, 2);
    }

    #[tokio::test]
    async fn test_stats_aggregate_over_records() {
        let ledger = SubmissionLedger::new();
        assert_eq!(ledger.stats().await, AggregateStats::default());

        ledger.record("Iron", 2.0).await.unwrap();
        ledger.record("Wood", 4.0).await.unwrap();
        ledger.record("Other", 1.0).await.unwrap();

        let stats = ledger.stats().await;
        assert_eq!(stats.submissions, 3);
        assert_eq!(stats.total_weight_kg, 7.0);
        assert_eq!(stats.total_value, 112.0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_land() {
        let ledger = SubmissionLedger::new();
        let mut handles = Vec::new();
        for _ in 0..32 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.record("Glass", 1.0).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(ledger.len().await, 32);
        let snapshot = ledger.snapshot().await;
        assert!(snapshot.iter().all(|r| r.total_price == 5.0));
    }
}
