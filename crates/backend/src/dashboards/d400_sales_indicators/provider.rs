use contracts::dashboards::d400_sales_indicators::IndicadoresData;
use contracts::shared::indicators::IndicadoresFilters;
use std::sync::Arc;

use super::remote::IndicadoresSource;
use super::service::IndicatorsEngine;

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Local,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Remote => "remote",
            DataSource::Local => "local",
        }
    }
}

/// Serves snapshots from the remote API when one is configured, otherwise
/// (or when the remote call fails) from the local ledger.
#[derive(Clone)]
pub struct IndicadoresProvider {
    engine: IndicatorsEngine,
    remote: Option<Arc<dyn IndicadoresSource>>,
}

impl IndicadoresProvider {
    pub fn new(engine: IndicatorsEngine, remote: Option<Arc<dyn IndicadoresSource>>) -> Self {
        Self { engine, remote }
    }

    pub fn local_only(engine: IndicatorsEngine) -> Self {
        Self::new(engine, None)
    }

    pub fn engine(&self) -> &IndicatorsEngine {
        &self.engine
    }

    pub async fn fetch(&self, filters: &IndicadoresFilters) -> IndicadoresData {
        self.fetch_with_source(filters).await.0
    }

    pub async fn fetch_with_source(&self, filters: &IndicadoresFilters) -> (IndicadoresData, DataSource) {
        if let Some(remote) = &self.remote {
            match remote.fetch(filters).await {
                Ok(data) => {
                    tracing::info!(
                        "Indicators: snapshot for {}..{} served by {}",
                        filters.date_range.start,
                        filters.date_range.end,
                        remote.name()
                    );
                    return (data, DataSource::Remote);
                }
                Err(e) => {
                    tracing::warn!(
                        "Indicators: {} source failed, computing locally: {}",
                        remote.name(),
                        e
                    );
                }
            }
        }
        (self.engine.compute(filters), DataSource::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sales_indicators::remote::IndicadoresSourceError;
    use crate::shared::data::sale_store::InMemorySaleStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use contracts::domain::a001_sale_record::SaleRecord;
    use contracts::shared::indicators::DateRange;

    struct FixedSource(IndicadoresData);

    #[async_trait]
    impl IndicadoresSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch(&self, _: &IndicadoresFilters) -> Result<IndicadoresData, IndicadoresSourceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl IndicadoresSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _: &IndicadoresFilters) -> Result<IndicadoresData, IndicadoresSourceError> {
            Err(IndicadoresSourceError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    fn engine() -> IndicatorsEngine {
        let store = InMemorySaleStore::from_records(vec![SaleRecord::emitted(
            "B001-1",
            "2024-05-10T09:00:00",
            "boleta",
            120.0,
        )]);
        IndicatorsEngine::new(Arc::new(store), "PEN")
    }

    fn filters() -> IndicadoresFilters {
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        IndicadoresFilters::new(DateRange::day(day), None)
    }

    #[tokio::test]
    async fn test_local_only_computes_from_ledger() {
        let provider = IndicadoresProvider::local_only(engine());
        let (data, source) = provider.fetch_with_source(&filters()).await;
        assert_eq!(source, DataSource::Local);
        assert_eq!(data.kpis.total_sales, 120.0);
    }

    #[tokio::test]
    async fn test_remote_result_is_preferred() {
        let mut remote = IndicadoresData::empty("PEN");
        remote.kpis.total_sales = 999.0;
        let provider = IndicadoresProvider::new(engine(), Some(Arc::new(FixedSource(remote))));

        let (data, source) = provider.fetch_with_source(&filters()).await;
        assert_eq!(source, DataSource::Remote);
        assert_eq!(data.kpis.total_sales, 999.0);
        assert_eq!(provider.fetch(&filters()).await, data);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let provider = IndicadoresProvider::new(engine(), Some(Arc::new(FailingSource)));
        let (data, source) = provider.fetch_with_source(&filters()).await;
        assert_eq!(source, DataSource::Local);
        assert_eq!(data, provider.engine().compute(&filters()));
    }
}
