//! Client-side part of the relocation analysis: tab enablement, tier
//! heuristic and grouping of the returned places.

use serde::{Deserialize, Serialize};

use crate::enums::{PlaceCategory, Tier};
use crate::shared::geo::LatLng;

use super::request::{AnalyzeRelocationRequest, CostInputs};
use super::response::{AnalyzeRelocationResponse, NearbyPoint, PublicPlace};

/// Rows per page in every result list of the wizard.
pub const RESULT_PAGE_SIZE: usize = 5;

/// Heuristic tier from the predicted monthly volume.
pub fn predict_tier(predicted_volume: f64) -> Tier {
    let code = if predicted_volume > 3600.0 {
        1
    } else if predicted_volume > 2000.0 {
        2
    } else if predicted_volume > 1000.0 {
        3
    } else {
        4
    };
    Tier::clamped(code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardTab {
    Location,
    RentCost,
    Branches,
    CompetitorAtms,
    PublicPlaces,
    Result,
}

impl WizardTab {
    pub fn all() -> [WizardTab; 6] {
        [
            WizardTab::Location,
            WizardTab::RentCost,
            WizardTab::Branches,
            WizardTab::CompetitorAtms,
            WizardTab::PublicPlaces,
            WizardTab::Result,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            WizardTab::Location => 0,
            WizardTab::RentCost => 1,
            WizardTab::Branches => 2,
            WizardTab::CompetitorAtms => 3,
            WizardTab::PublicPlaces => 4,
            WizardTab::Result => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardTab::Location => "Location",
            WizardTab::RentCost => "Rent Cost",
            WizardTab::Branches => "KCP/ATM BJB",
            WizardTab::CompetitorAtms => "ATM Bank Lain",
            WizardTab::PublicPlaces => "Lokasi Umum",
            WizardTab::Result => "Hasil Analisa",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            WizardTab::Location => "location",
            WizardTab::RentCost => "rent_cost",
            WizardTab::Branches => "branches",
            WizardTab::CompetitorAtms => "competitor_atms",
            WizardTab::PublicPlaces => "public_places",
            WizardTab::Result => "result",
        }
    }

    /// Tabs that show analysis output.
    pub fn needs_analysis(&self) -> bool {
        self.index() >= WizardTab::Branches.index()
    }
}

/// Places of one category, in the order they arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceGroup {
    pub category: PlaceCategory,
    pub places: Vec<PublicPlace>,
}

/// Groups in display order; empty groups are left out, unmatched places
/// end up in the `Other` group.
pub fn group_public_places(places: &[PublicPlace]) -> Vec<PlaceGroup> {
    let mut groups: Vec<PlaceGroup> = PlaceCategory::groups()
        .into_iter()
        .map(|category| PlaceGroup {
            category,
            places: Vec::new(),
        })
        .collect();

    for place in places {
        let key = place.classify().key();
        if let Some(group) = groups.iter_mut().find(|g| g.category.key() == key) {
            group.places.push(place.clone());
        }
    }

    groups.retain(|g| !g.places.is_empty());
    groups
}

/// Sort by distance from `origin`, unknown distances last.
pub fn sort_by_distance<T: NearbyPoint + Clone>(items: &[T], origin: Option<LatLng>) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| match (a.distance_km(origin), b.distance_km(origin)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted
}

/// Successful analysis together with the inputs it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub request: AnalyzeRelocationRequest,
    pub response: AnalyzeRelocationResponse,
    pub place_groups: Vec<PlaceGroup>,
    pub heuristic_tier: Option<Tier>,
}

impl AnalysisResult {
    pub fn new(request: AnalyzeRelocationRequest, response: AnalyzeRelocationResponse) -> Self {
        let origin = request.location();
        let mut response = response;
        response.nearby_branches = sort_by_distance(&response.nearby_branches, origin);
        response.competitor_atms = sort_by_distance(&response.competitor_atms, origin);
        response.public_places = sort_by_distance(&response.public_places, origin);
        let place_groups = group_public_places(&response.public_places);
        let heuristic_tier = response.predicted_volume.map(predict_tier);
        Self {
            request,
            response,
            place_groups,
            heuristic_tier,
        }
    }

    pub fn origin(&self) -> Option<LatLng> {
        self.request.location()
    }
}

/// Tab enablement of the six-step relocation wizard.
///
/// Location → Rent Cost needs a valid location, everything after that needs
/// an analysis computed for the current location and costs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelocationWizard {
    location: Option<LatLng>,
    address: String,
    costs: CostInputs,
    analysis: Option<AnalysisResult>,
    active: Option<WizardTab>,
}

impl RelocationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<LatLng> {
        self.location
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn costs(&self) -> &CostInputs {
        &self.costs
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn active_tab(&self) -> WizardTab {
        self.active.unwrap_or(WizardTab::Location)
    }

    pub fn has_valid_location(&self) -> bool {
        self.location.is_some()
    }

    pub fn is_enabled(&self, tab: WizardTab) -> bool {
        match tab {
            WizardTab::Location => true,
            WizardTab::RentCost => self.has_valid_location(),
            _ => self.analysis.is_some(),
        }
    }

    pub fn enabled_tabs(&self) -> Vec<WizardTab> {
        WizardTab::all()
            .into_iter()
            .filter(|t| self.is_enabled(*t))
            .collect()
    }

    /// Switch tabs; returns false and stays put when `tab` is locked.
    pub fn select(&mut self, tab: WizardTab) -> bool {
        if !self.is_enabled(tab) {
            return false;
        }
        self.active = Some(tab);
        true
    }

    /// Invalid coordinates count as no location at all.
    pub fn set_location(&mut self, lat: f64, lng: f64, address: &str) {
        let next = LatLng::new(lat, lng);
        if next != self.location {
            self.invalidate_analysis();
        }
        self.location = next;
        self.address = address.trim().to_string();
        self.fix_active_tab();
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.trim().to_string();
    }

    pub fn set_costs(&mut self, costs: CostInputs) {
        if costs != self.costs {
            self.invalidate_analysis();
        }
        self.costs = costs;
        self.fix_active_tab();
    }

    /// Back to the initial state: no location, no costs, no analysis.
    pub fn clear_location(&mut self) {
        *self = Self::default();
    }

    pub fn can_analyze(&self) -> bool {
        self.analysis_request().is_some()
    }

    /// Request for the current inputs, `None` while something is missing.
    pub fn analysis_request(&self) -> Option<AnalyzeRelocationRequest> {
        AnalyzeRelocationRequest::build(self.location, &self.address, &self.costs)
    }

    /// Store a response; ignored when the inputs changed since `request` was built.
    pub fn apply_analysis(
        &mut self,
        request: AnalyzeRelocationRequest,
        response: AnalyzeRelocationResponse,
    ) -> bool {
        if self.analysis_request().as_ref() != Some(&request) {
            return false;
        }
        self.analysis = Some(AnalysisResult::new(request, response));
        self.active = Some(WizardTab::Branches);
        true
    }

    fn invalidate_analysis(&mut self) {
        self.analysis = None;
    }

    fn fix_active_tab(&mut self) {
        if !self.is_enabled(self.active_tab()) {
            self.active = Some(if self.has_valid_location() {
                WizardTab::RentCost
            } else {
                WizardTab::Location
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_relocation_analysis::response::NearbyBranch;

    fn costs() -> CostInputs {
        CostInputs {
            rent_cost: Some(1.0),
            electricity_cost: Some(2.0),
            electronic_cost: Some(3.0),
            replenishment_cost: Some(4.0),
        }
    }

    fn analysed() -> RelocationWizard {
        let mut w = RelocationWizard::new();
        w.set_location(-6.9, 107.6, "Jl. Dago");
        w.set_costs(costs());
        let req = w.analysis_request().unwrap();
        let resp = AnalyzeRelocationResponse {
            predicted_volume: Some(2500.0),
            public_places: vec![
                PublicPlace {
                    name: "Mall".into(),
                    category: "shopping_mall".into(),
                    ..Default::default()
                },
                PublicPlace {
                    name: "Taman".into(),
                    category: "park".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert!(w.apply_analysis(req, resp));
        w
    }

    #[test]
    fn test_predict_tier_thresholds() {
        assert_eq!(predict_tier(5000.0), Tier::new(1).unwrap());
        assert_eq!(predict_tier(3600.0), Tier::new(2).unwrap());
        assert_eq!(predict_tier(2000.5), Tier::new(2).unwrap());
        assert_eq!(predict_tier(2000.0), Tier::new(3).unwrap());
        assert_eq!(predict_tier(1000.0), Tier::new(4).unwrap());
        assert_eq!(predict_tier(0.0), Tier::new(4).unwrap());
    }

    #[test]
    fn test_tabs_locked_until_analysis() {
        let mut w = RelocationWizard::new();
        assert_eq!(w.enabled_tabs(), vec![WizardTab::Location]);

        w.set_location(-6.9, 107.6, "");
        assert!(w.is_enabled(WizardTab::RentCost));
        w.set_costs(costs());
        assert!(w.can_analyze());
        for tab in WizardTab::all().into_iter().filter(|t| t.needs_analysis()) {
            assert!(!w.is_enabled(tab), "{:?}", tab);
            assert!(!w.select(tab));
        }

        let w = analysed();
        assert_eq!(w.enabled_tabs().len(), 6);
        assert_eq!(w.active_tab(), WizardTab::Branches);
    }

    #[test]
    fn test_invalid_location_keeps_rent_cost_locked() {
        let mut w = RelocationWizard::new();
        w.set_location(f64::NAN, 107.6, "");
        assert!(!w.is_enabled(WizardTab::RentCost));
        w.set_location(-91.0, 107.6, "");
        assert!(!w.has_valid_location());
    }

    #[test]
    fn test_clear_location_resets_everything() {
        let mut w = analysed();
        w.clear_location();
        assert_eq!(w, RelocationWizard::default());
        assert!(w.analysis().is_none());
        assert_eq!(w.costs(), &CostInputs::default());
        assert_eq!(w.active_tab(), WizardTab::Location);
    }

    #[test]
    fn test_changing_inputs_relocks_results() {
        let mut w = analysed();
        let mut changed = costs();
        changed.rent_cost = Some(9.0);
        w.set_costs(changed);
        assert!(w.analysis().is_none());
        assert_eq!(w.active_tab(), WizardTab::RentCost);

        let mut w = analysed();
        w.set_location(-6.8, 107.6, "");
        assert!(!w.is_enabled(WizardTab::Result));
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut w = RelocationWizard::new();
        w.set_location(-6.9, 107.6, "");
        w.set_costs(costs());
        let stale = w.analysis_request().unwrap();
        w.set_location(-6.8, 107.5, "");
        assert!(!w.apply_analysis(stale, AnalyzeRelocationResponse::default()));
        assert!(w.analysis().is_none());
    }

    #[test]
    fn test_result_groups_and_tier() {
        let w = analysed();
        let result = w.analysis().unwrap();
        assert_eq!(result.heuristic_tier, Tier::new(2));
        let keys: Vec<_> = result.place_groups.iter().map(|g| g.category.key()).collect();
        assert_eq!(keys, vec!["shopping", "other"]);
    }

    #[test]
    fn test_sort_by_distance_unknown_last() {
        let b = |d: Option<f64>| NearbyBranch {
            distance: d,
            ..Default::default()
        };
        let sorted = sort_by_distance(&[b(None), b(Some(3.0)), b(Some(1.0))], None);
        let ds: Vec<_> = sorted.iter().map(|x| x.distance).collect();
        assert_eq!(ds, vec![Some(1.0), Some(3.0), None]);
    }
}
