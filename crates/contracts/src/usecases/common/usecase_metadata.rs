/// Identity of a workflow, used for tab keys and titles.
pub trait UseCaseMetadata {
    /// Index such as "u501".
    fn usecase_index() -> &'static str;

    fn usecase_name() -> &'static str;

    /// Title shown in the UI.
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_relocation_analysis"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_relocation_analysis::RelocationAnalysis;

    #[test]
    fn test_full_name() {
        assert_eq!(RelocationAnalysis::full_name(), "u501_relocation_analysis");
    }
}
