//! Page-level reports: metrics plus one chart series per dimension.

use crate::charts::ChartData;
use crate::data::{Admission, Dataset};
use crate::stats::calculator::{StatsCalculator, SummaryMetrics};
use crate::stats::grouping::GroupDimension;
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct PageReport {
    pub metrics: SummaryMetrics,
    pub charts: Vec<ChartData>,
}

impl PageReport {
    /// Compute metrics and charts for `rows`.
    ///
    /// Chart series are computed in parallel but returned in the order of
    /// `dimensions`.
    pub fn compute(rows: &[&Admission], dimensions: &[GroupDimension]) -> Self {
        let charts = dimensions
            .par_iter()
            .map(|&dimension| ChartData {
                dimension,
                counts: StatsCalculator::patients_by(rows, dimension),
            })
            .collect();

        Self {
            metrics: StatsCalculator::summarize(rows),
            charts,
        }
    }

    /// The overview page over the whole dataset.
    pub fn overview(dataset: &Dataset) -> Self {
        Self::compute(&dataset.all(), &GroupDimension::OVERVIEW)
    }

    pub fn chart(&self, dimension: GroupDimension) -> Option<&ChartData> {
        self.charts.iter().find(|c| c.dimension == dimension)
    }
}

/// One hospital's report plus the cross-hospital comparison chart.
#[derive(Debug, Clone)]
pub struct HospitalReport {
    pub scoped: PageReport,
    pub comparison: ChartData,
}

impl HospitalReport {
    pub fn compute(dataset: &Dataset, hospital: &str) -> Self {
        let scoped = PageReport::compute(
            &dataset.for_hospital(hospital),
            &GroupDimension::HOSPITAL_SCOPED,
        );
        let comparison = ChartData {
            dimension: GroupDimension::Hospital,
            counts: StatsCalculator::patients_by(&dataset.all(), GroupDimension::Hospital),
        };

        Self { scoped, comparison }
    }
}
