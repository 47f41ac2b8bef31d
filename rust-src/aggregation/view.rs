//! Everything a renderer needs for one state selection.

use serde::Serialize;

use crate::error::Result;
use crate::models::Dataset;

use super::charts::ChartData;
use super::filter::{state_options, StateFilter};
use super::kpi::{compute_kpis, Kpis};


/// KPIs for the selection plus the selection-independent charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    #[serde(serialize_with = "serialize_filter")]
    pub selection: StateFilter,
    pub kpis: Kpis,
    pub charts: ChartData,
}


impl DashboardView {
    /// Pure function from (table, selection) to the rendered values.
    ///
    /// The KPIs see only the filtered rows; the charts see the full table.
    pub fn compute(dataset: &Dataset, selection: &StateFilter) -> Result<Self> {
        selection.validate(dataset)?;

        let filtered = selection.apply(dataset);
        Ok(Self {
            selection: selection.clone(),
            kpis: compute_kpis(&filtered)?,
            charts: ChartData::from_dataset(dataset)?,
        })
    }

    /// Selector options for the same dataset.
    pub fn options(dataset: &Dataset) -> Vec<StateFilter> {
        state_options(dataset)
    }
}


fn serialize_filter<S>(filter: &StateFilter, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(filter.label())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::ComplaintRecord;

    fn data() -> Dataset {
        Dataset::new(vec![ComplaintRecord {
            state: "CA".to_string(),
            company_response: "Closed".to_string(),
            timely: "Yes".to_string(),
            product: "Mortgage".to_string(),
            month_year: "01/05/2023".to_string(),
            count: 3,
            ..Default::default()
        }])
    }

    #[test]
    fn test_compute_all() {
        let view = DashboardView::compute(&data(), &StateFilter::All).unwrap();
        assert_eq!(view.kpis.total, 3);
        assert_eq!(view.charts.by_product.len(), 1);
        assert_eq!(view.charts.by_month.len(), 1);
    }

    #[test]
    fn test_compute_unknown_state() {
        let err = DashboardView::compute(&data(), &StateFilter::State("WA".to_string())).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownState(_)));
    }

    #[test]
    fn test_serializes_selection_label() {
        let view = DashboardView::compute(&data(), &StateFilter::All).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["selection"], "All States");
        assert_eq!(json["kpis"]["total"], 3);
    }

    #[test]
    fn test_options() {
        let options = DashboardView::options(&data());
        assert_eq!(options, vec![StateFilter::All, StateFilter::State("CA".to_string())]);
    }
}
