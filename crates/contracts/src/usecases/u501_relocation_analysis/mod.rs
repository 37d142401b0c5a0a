pub mod analysis;
pub mod request;
pub mod response;

pub use analysis::{
    group_public_places, predict_tier, sort_by_distance, AnalysisResult, PlaceGroup,
    RelocationWizard, WizardTab, RESULT_PAGE_SIZE,
};
pub use request::{parse_rupiah, AnalyzeRelocationRequest, CostInputs, SaveRelocationRequest};
pub use response::{
    AnalyzeRelocationResponse, CompetitorAtm, NearbyBranch, NearbyPoint, PublicPlace,
    ScoreBreakdown,
};

use crate::usecases::common::UseCaseMetadata;

pub struct RelocationAnalysis;

impl UseCaseMetadata for RelocationAnalysis {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "relocation_analysis"
    }

    fn display_name() -> &'static str {
        "Analisa Relokasi"
    }

    fn description() -> &'static str {
        "Penilaian lokasi kandidat ATM dari data cabang, ATM bank lain dan lokasi umum di sekitarnya"
    }
}
