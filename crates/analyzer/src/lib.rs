//! # Incrolink Analyzer
//!
//! Wires the calculators together into the report frames a caller asks for:
//! sector metrics, DCF valuation, predictability, the three combined, and a
//! parallel valuation batch over many companies.
//!
//! Sector tables are always handed in. The analyzer never loads or caches data.

use crate::error::AnalyzerError;
use analytics::{MetricsCalculator, PercentileRanker, SectorPercentileLookup, SectorPercentiles};
use configuration::settings::Config;
use core_types::{CompanyRecord, FinancialStatement, Metric, SectorParameters, SectorPercentileRow};
use predictability::{PredictabilityClassifier, PredictabilityResult, PredictabilitySignals};
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use valuation::{DcfEngine, GrowthClassifier};

pub mod batch;
pub mod error;
pub mod report;

pub use batch::{BatchFailure, BatchReport, DealSummary};
pub use report::{CompanyAnalysis, CompanyInput, MetricsReport, SectorTables, ValuationReport};

/// The analysis engine. Built once from the configuration and shared freely;
/// every method takes `&self`.
#[derive(Debug, Clone)]
pub struct Analyzer {
    metrics: MetricsCalculator,
    lookup: SectorPercentileLookup,
    ranker: PercentileRanker,
    dcf: DcfEngine,
    growth: GrowthClassifier,
    predictability: PredictabilityClassifier,
    sequential_batch: bool,
}

impl Analyzer {
    pub fn new(config: &Config) -> Result<Self, AnalyzerError> {
        Ok(Self {
            metrics: MetricsCalculator::new(),
            lookup: SectorPercentileLookup::new(),
            ranker: PercentileRanker::new(),
            dcf: DcfEngine::from_settings(&config.valuation)?,
            growth: GrowthClassifier::new(&config.growth)?,
            predictability: PredictabilityClassifier::new(config.predictability.clone()),
            sequential_batch: config.batch.sequential,
        })
    }

    /// Returns a copy projecting `years` years instead of the configured horizon.
    pub fn with_projection_years(mut self, years: usize) -> Result<Self, AnalyzerError> {
        self.dcf = DcfEngine::new(years)?;
        Ok(self)
    }

    /// The company's ratios, its sector's bands and the band of each ratio.
    ///
    /// `fx` comes from `statements`. When the sector has no percentile row every
    /// ratio is ranked against empty bands.
    pub fn metrics_report(
        &self,
        company: &CompanyRecord,
        statements: &[FinancialStatement],
        percentiles: &[SectorPercentileRow],
    ) -> MetricsReport {
        let metrics = self
            .metrics
            .calculate(company)
            .with_fx(self.metrics.fx_from_statements(statements));

        let sector = company
            .category_code
            .as_ref()
            .and_then(|code| self.lookup.lookup(code, percentiles));

        let empty = SectorPercentiles::default();
        let bands = sector.as_ref().unwrap_or(&empty);
        let positions = Metric::ALL
            .into_iter()
            .map(|metric| (metric, self.ranker.rank(metrics.get(metric), bands.bands(metric))))
            .collect();

        MetricsReport {
            company: company.company.clone(),
            category_code: company.category_code.clone(),
            metrics,
            sector_percentiles: sector,
            positions,
        }
    }

    /// The DCF valuation and, when growth is defined, its deal-quality label.
    pub fn valuation_report(&self, company: &CompanyRecord, params: &[SectorParameters]) -> ValuationReport {
        let valuation = self.dcf.value(company, params);
        let classification = valuation.growth_expected.map(|growth| self.growth.classify(growth));
        ValuationReport {
            company: company.company.clone(),
            valuation,
            classification,
        }
    }

    pub fn predictability(&self, signals: &PredictabilitySignals) -> PredictabilityResult {
        self.predictability.classify(signals)
    }

    /// Runs all three frames for one company, feeding the predictability chain
    /// from the other two.
    pub fn analyze(&self, input: &CompanyInput, tables: &SectorTables) -> CompanyAnalysis {
        let metrics = self.metrics_report(&input.record, &input.statements, &tables.percentiles);
        let valuation = self.valuation_report(&input.record, &tables.parameters);

        let sector = metrics.sector_percentiles.as_ref();
        let signals = PredictabilitySignals {
            ev_growth: valuation.valuation.growth_expected,
            nsellside: sector.and_then(|s| s.nsellside),
            nsellside_p50: sector.and_then(|s| s.nsellside_p50),
            ceo_age: input.ceo_age,
            revenue: input.record.revenue,
            edamargin: metrics.metrics.edamargin,
            edamargin_p75: sector.and_then(|s| s.edamargin.p75),
        };
        let predictability = self.predictability(&signals);

        CompanyAnalysis {
            metrics,
            valuation,
            predictability,
        }
    }

    /// Values and classifies one company, failing when the summary would have
    /// an undefined figure.
    pub fn summarize(
        &self,
        index: usize,
        company: &CompanyRecord,
        params: &[SectorParameters],
    ) -> Result<DealSummary, AnalyzerError> {
        let valuation = self.dcf.value(company, params);
        let undefined = |field| AnalyzerError::Undefined {
            company: company.display_name().to_string(),
            field,
        };
        let ev_dcf = valuation.ev_dcf.ok_or_else(|| undefined("EV_DCF"))?;
        let growth_expected = valuation.growth_expected.ok_or_else(|| undefined("growth_expected"))?;

        Ok(DealSummary {
            index,
            company: company.company.clone(),
            ev_dcf,
            growth_expected,
            classification: self.growth.classify(growth_expected),
        })
    }

    /// Summarises every company, in parallel unless the configuration asks for
    /// a sequential run.
    ///
    /// A company that cannot be summarised is logged and recorded as a failure;
    /// it never stops the others. Results and failures keep the input order.
    pub fn run_batch(&self, companies: &[CompanyRecord], params: &[SectorParameters]) -> BatchReport {
        self.batch(
            companies,
            |index, company| self.summarize(index, company, params),
            |company| company.company.clone(),
        )
    }

    /// Like [`Analyzer::run_batch`], but over undecoded JSON items.
    ///
    /// Each item is decoded on its own, so one that is not a company record
    /// becomes a failure at its index instead of rejecting the whole list.
    pub fn run_batch_values(&self, items: &[Value], params: &[SectorParameters]) -> BatchReport {
        self.batch(
            items,
            |index, item| {
                let company = CompanyRecord::deserialize(item)
                    .map_err(|e| AnalyzerError::Malformed(e.to_string()))?;
                self.summarize(index, &company, params)
            },
            |item| item.get("company").and_then(Value::as_str).map(str::to_string),
        )
    }

    fn batch<T, F, N>(&self, items: &[T], evaluate: F, name_of: N) -> BatchReport
    where
        T: Sync,
        F: Fn(usize, &T) -> Result<DealSummary, AnalyzerError> + Sync,
        N: Fn(&T) -> Option<String>,
    {
        tracing::info!(
            companies = items.len(),
            parallel = !self.sequential_batch,
            "Starting valuation batch."
        );

        let run = |(index, item): (usize, &T)| (index, evaluate(index, item));
        let outcomes: Vec<_> = if self.sequential_batch {
            items.iter().enumerate().map(run).collect()
        } else {
            items.par_iter().enumerate().map(run).collect()
        };

        let mut report = BatchReport::default();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(summary) => report.results.push(summary),
                Err(e) => {
                    let company = name_of(&items[index]);
                    tracing::warn!(
                        index,
                        company = company.as_deref().unwrap_or("<unnamed>"),
                        error = %e,
                        "Skipping company in batch."
                    );
                    report.failures.push(BatchFailure {
                        index,
                        company,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            valued = report.results.len(),
            failed = report.failures.len(),
            "Valuation batch finished."
        );
        report
    }
}
