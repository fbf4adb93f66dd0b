//! Per-series enumeration/chronology grammars.
//!
//! One module per known serial. Each grammar declares the identifiers that
//! select it (OCLC allowlist, SuDoc stem prefixes), an ordered
//! most-specific-first pattern list, and whatever pre/postprocessing and
//! range explosion its numbering convention needs. [`Grammars`] constructs
//! every grammar once, loading reference tables eagerly, and dispatches
//! through the closed [`Series`] sum.

mod agricultural_statistics;
mod budget;
mod cancer_institute_journal;
mod census_of_manufactures;
mod climatological_data;
mod code_of_federal_regulations;
mod commerce_business_daily;
mod comptroller_general_decisions;
mod congressional_record;
mod court_of_claims_decisions;
mod economic_report;
mod federal_register;
mod federal_reserve_bulletin;
mod foreign_relations;
mod government_manual;
mod minerals_yearbook;
mod monthly_catalog;
mod monthly_labor_review;
mod public_health_reports;
mod public_papers;
mod reports_of_investigations;
mod serial_set;
mod statistical_abstract;
mod statutes_at_large;
mod survey_of_current_business;
mod treasury_bulletin;
mod united_states_reports;
mod vital_statistics;
mod war_of_the_rebellion;
mod yearbook_of_agriculture;

use serde::{Deserialize, Serialize};

use crate::ec::grammar::{DefaultGrammar, SeriesGrammar};
use crate::error::GrammarBuildError;

pub use agricultural_statistics::AgriculturalStatistics;
pub use budget::BudgetOfTheUnitedStates;
pub use cancer_institute_journal::JournalOfTheNationalCancerInstitute;
pub use census_of_manufactures::CensusOfManufactures;
pub use climatological_data::ClimatologicalData;
pub use code_of_federal_regulations::CodeOfFederalRegulations;
pub use commerce_business_daily::CommerceBusinessDaily;
pub use comptroller_general_decisions::DecisionsOfTheComptrollerGeneral;
pub use congressional_record::CongressionalRecord;
pub use court_of_claims_decisions::DecisionsOfTheCourtOfClaims;
pub use economic_report::EconomicReportOfThePresident;
pub use federal_register::FederalRegister;
pub use federal_reserve_bulletin::FederalReserveBulletin;
pub use foreign_relations::ForeignRelations;
pub use government_manual::UnitedStatesGovernmentManual;
pub use minerals_yearbook::MineralsYearbook;
pub use monthly_catalog::MonthlyCatalog;
pub use monthly_labor_review::MonthlyLaborReview;
pub use public_health_reports::PublicHealthReports;
pub use public_papers::PublicPapersOfThePresidents;
pub use reports_of_investigations::ReportsOfInvestigations;
pub use serial_set::CongressionalSerialSet;
pub use statistical_abstract::StatisticalAbstract;
pub use statutes_at_large::StatutesAtLarge;
pub use survey_of_current_business::SurveyOfCurrentBusiness;
pub use treasury_bulletin::TreasuryBulletin;
pub use united_states_reports::UnitedStatesReports;
pub use vital_statistics::VitalStatistics;
pub use war_of_the_rebellion::WarOfTheRebellion;
pub use yearbook_of_agriculture::YearbookOfAgriculture;

/// The closed set of known serials.
///
/// Order of [`Series::ALL`] is the classifier's fixed evaluation priority:
/// a record whose identifiers satisfy two predicates resolves to the
/// earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    FederalRegister,
    CongressionalRecord,
    StatutesAtLarge,
    UnitedStatesReports,
    CodeOfFederalRegulations,
    AgriculturalStatistics,
    YearbookOfAgriculture,
    StatisticalAbstract,
    EconomicReportOfThePresident,
    PublicPapersOfThePresidents,
    ForeignRelations,
    MonthlyLaborReview,
    SurveyOfCurrentBusiness,
    TreasuryBulletin,
    FederalReserveBulletin,
    PublicHealthReports,
    MonthlyCatalog,
    MineralsYearbook,
    CommerceBusinessDaily,
    BudgetOfTheUnitedStates,
    CongressionalSerialSet,
    JournalOfTheNationalCancerInstitute,
    VitalStatistics,
    CensusOfManufactures,
    ReportsOfInvestigations,
    DecisionsOfTheComptrollerGeneral,
    UnitedStatesGovernmentManual,
    WarOfTheRebellion,
    ClimatologicalData,
    DecisionsOfTheCourtOfClaims,
}

impl Series {
    /// All known serials in classifier priority order.
    pub const ALL: &'static [Series] = &[
        Series::FederalRegister,
        Series::CongressionalRecord,
        Series::StatutesAtLarge,
        Series::UnitedStatesReports,
        Series::CodeOfFederalRegulations,
        Series::AgriculturalStatistics,
        Series::YearbookOfAgriculture,
        Series::StatisticalAbstract,
        Series::EconomicReportOfThePresident,
        Series::PublicPapersOfThePresidents,
        Series::ForeignRelations,
        Series::MonthlyLaborReview,
        Series::SurveyOfCurrentBusiness,
        Series::TreasuryBulletin,
        Series::FederalReserveBulletin,
        Series::PublicHealthReports,
        Series::MonthlyCatalog,
        Series::MineralsYearbook,
        Series::CommerceBusinessDaily,
        Series::BudgetOfTheUnitedStates,
        Series::CongressionalSerialSet,
        Series::JournalOfTheNationalCancerInstitute,
        Series::VitalStatistics,
        Series::CensusOfManufactures,
        Series::ReportsOfInvestigations,
        Series::DecisionsOfTheComptrollerGeneral,
        Series::UnitedStatesGovernmentManual,
        Series::WarOfTheRebellion,
        Series::ClimatologicalData,
        Series::DecisionsOfTheCourtOfClaims,
    ];
}

/// Every grammar, constructed once at process start.
///
/// Reference tables load during construction; the value is immutable
/// afterwards and safe to share read-only across workers.
pub struct Grammars {
    fallback: DefaultGrammar,
    federal_register: FederalRegister,
    congressional_record: CongressionalRecord,
    statutes_at_large: StatutesAtLarge,
    united_states_reports: UnitedStatesReports,
    code_of_federal_regulations: CodeOfFederalRegulations,
    agricultural_statistics: AgriculturalStatistics,
    yearbook_of_agriculture: YearbookOfAgriculture,
    statistical_abstract: StatisticalAbstract,
    economic_report: EconomicReportOfThePresident,
    public_papers: PublicPapersOfThePresidents,
    foreign_relations: ForeignRelations,
    monthly_labor_review: MonthlyLaborReview,
    survey_of_current_business: SurveyOfCurrentBusiness,
    treasury_bulletin: TreasuryBulletin,
    federal_reserve_bulletin: FederalReserveBulletin,
    public_health_reports: PublicHealthReports,
    monthly_catalog: MonthlyCatalog,
    minerals_yearbook: MineralsYearbook,
    commerce_business_daily: CommerceBusinessDaily,
    budget: BudgetOfTheUnitedStates,
    serial_set: CongressionalSerialSet,
    cancer_institute_journal: JournalOfTheNationalCancerInstitute,
    vital_statistics: VitalStatistics,
    census_of_manufactures: CensusOfManufactures,
    reports_of_investigations: ReportsOfInvestigations,
    comptroller_general_decisions: DecisionsOfTheComptrollerGeneral,
    government_manual: UnitedStatesGovernmentManual,
    war_of_the_rebellion: WarOfTheRebellion,
    climatological_data: ClimatologicalData,
    court_of_claims_decisions: DecisionsOfTheCourtOfClaims,
}

impl Grammars {
    pub fn build() -> Result<Self, GrammarBuildError> {
        Ok(Self {
            fallback: DefaultGrammar::build()?,
            federal_register: FederalRegister::build()?,
            congressional_record: CongressionalRecord::build()?,
            statutes_at_large: StatutesAtLarge::build()?,
            united_states_reports: UnitedStatesReports::build()?,
            code_of_federal_regulations: CodeOfFederalRegulations::build()?,
            agricultural_statistics: AgriculturalStatistics::build()?,
            yearbook_of_agriculture: YearbookOfAgriculture::build()?,
            statistical_abstract: StatisticalAbstract::build()?,
            economic_report: EconomicReportOfThePresident::build()?,
            public_papers: PublicPapersOfThePresidents::build()?,
            foreign_relations: ForeignRelations::build()?,
            monthly_labor_review: MonthlyLaborReview::build()?,
            survey_of_current_business: SurveyOfCurrentBusiness::build()?,
            treasury_bulletin: TreasuryBulletin::build()?,
            federal_reserve_bulletin: FederalReserveBulletin::build()?,
            public_health_reports: PublicHealthReports::build()?,
            monthly_catalog: MonthlyCatalog::build()?,
            minerals_yearbook: MineralsYearbook::build()?,
            commerce_business_daily: CommerceBusinessDaily::build()?,
            budget: BudgetOfTheUnitedStates::build()?,
            serial_set: CongressionalSerialSet::build()?,
            cancer_institute_journal: JournalOfTheNationalCancerInstitute::build()?,
            vital_statistics: VitalStatistics::build()?,
            census_of_manufactures: CensusOfManufactures::build()?,
            reports_of_investigations: ReportsOfInvestigations::build()?,
            comptroller_general_decisions: DecisionsOfTheComptrollerGeneral::build()?,
            government_manual: UnitedStatesGovernmentManual::build()?,
            war_of_the_rebellion: WarOfTheRebellion::build()?,
            climatological_data: ClimatologicalData::build()?,
            court_of_claims_decisions: DecisionsOfTheCourtOfClaims::build()?,
        })
    }

    /// The generic fallback grammar.
    pub fn fallback(&self) -> &DefaultGrammar {
        &self.fallback
    }

    pub fn get(&self, series: Series) -> &dyn SeriesGrammar {
        match series {
            Series::FederalRegister => &self.federal_register,
            Series::CongressionalRecord => &self.congressional_record,
            Series::StatutesAtLarge => &self.statutes_at_large,
            Series::UnitedStatesReports => &self.united_states_reports,
            Series::CodeOfFederalRegulations => &self.code_of_federal_regulations,
            Series::AgriculturalStatistics => &self.agricultural_statistics,
            Series::YearbookOfAgriculture => &self.yearbook_of_agriculture,
            Series::StatisticalAbstract => &self.statistical_abstract,
            Series::EconomicReportOfThePresident => &self.economic_report,
            Series::PublicPapersOfThePresidents => &self.public_papers,
            Series::ForeignRelations => &self.foreign_relations,
            Series::MonthlyLaborReview => &self.monthly_labor_review,
            Series::SurveyOfCurrentBusiness => &self.survey_of_current_business,
            Series::TreasuryBulletin => &self.treasury_bulletin,
            Series::FederalReserveBulletin => &self.federal_reserve_bulletin,
            Series::PublicHealthReports => &self.public_health_reports,
            Series::MonthlyCatalog => &self.monthly_catalog,
            Series::MineralsYearbook => &self.minerals_yearbook,
            Series::CommerceBusinessDaily => &self.commerce_business_daily,
            Series::BudgetOfTheUnitedStates => &self.budget,
            Series::CongressionalSerialSet => &self.serial_set,
            Series::JournalOfTheNationalCancerInstitute => &self.cancer_institute_journal,
            Series::VitalStatistics => &self.vital_statistics,
            Series::CensusOfManufactures => &self.census_of_manufactures,
            Series::ReportsOfInvestigations => &self.reports_of_investigations,
            Series::DecisionsOfTheComptrollerGeneral => &self.comptroller_general_decisions,
            Series::UnitedStatesGovernmentManual => &self.government_manual,
            Series::WarOfTheRebellion => &self.war_of_the_rebellion,
            Series::ClimatologicalData => &self.climatological_data,
            Series::DecisionsOfTheCourtOfClaims => &self.court_of_claims_decisions,
        }
    }

    /// Iterate grammars in classifier priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Series, &dyn SeriesGrammar)> {
        Series::ALL.iter().map(move |s| (*s, self.get(*s)))
    }
}

impl Series {
    /// Display title of the serial.
    pub fn title(&self) -> &'static str {
        match self {
            Series::FederalRegister => "Federal Register",
            Series::CongressionalRecord => "Congressional Record",
            Series::StatutesAtLarge => "United States Statutes at Large",
            Series::UnitedStatesReports => "United States Reports",
            Series::CodeOfFederalRegulations => "Code of Federal Regulations",
            Series::AgriculturalStatistics => "Agricultural Statistics",
            Series::YearbookOfAgriculture => "Yearbook of Agriculture",
            Series::StatisticalAbstract => "Statistical Abstract of the United States",
            Series::EconomicReportOfThePresident => "Economic Report of the President",
            Series::PublicPapersOfThePresidents => "Public Papers of the Presidents",
            Series::ForeignRelations => "Foreign Relations of the United States",
            Series::MonthlyLaborReview => "Monthly Labor Review",
            Series::SurveyOfCurrentBusiness => "Survey of Current Business",
            Series::TreasuryBulletin => "Treasury Bulletin",
            Series::FederalReserveBulletin => "Federal Reserve Bulletin",
            Series::PublicHealthReports => "Public Health Reports",
            Series::MonthlyCatalog => "Monthly Catalog of United States Government Publications",
            Series::MineralsYearbook => "Minerals Yearbook",
            Series::CommerceBusinessDaily => "Commerce Business Daily",
            Series::BudgetOfTheUnitedStates => "Budget of the United States Government",
            Series::CongressionalSerialSet => "United States Congressional Serial Set",
            Series::JournalOfTheNationalCancerInstitute => {
                "Journal of the National Cancer Institute"
            }
            Series::VitalStatistics => "Vital Statistics of the United States",
            Series::CensusOfManufactures => "Census of Manufactures",
            Series::ReportsOfInvestigations => "Reports of Investigations",
            Series::DecisionsOfTheComptrollerGeneral => {
                "Decisions of the Comptroller General of the United States"
            }
            Series::UnitedStatesGovernmentManual => "United States Government Manual",
            Series::WarOfTheRebellion => "War of the Rebellion",
            Series::ClimatologicalData => "Climatological Data",
            Series::DecisionsOfTheCourtOfClaims => "Decisions of the Court of Claims",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_series_constructs() {
        let grammars = Grammars::build().unwrap();
        for (series, grammar) in grammars.iter() {
            assert_eq!(grammar.name(), series.title());
            assert!(!grammar.patterns().is_empty(), "{:?} has no patterns", series);
        }
    }

    #[test]
    fn every_series_declares_an_identification_signal() {
        let grammars = Grammars::build().unwrap();
        for (series, grammar) in grammars.iter() {
            assert!(
                !grammar.oclc_allowlist().is_empty() || !grammar.sudoc_prefixes().is_empty(),
                "{:?} is unidentifiable",
                series
            );
        }
    }

    #[test]
    fn oclc_allowlists_are_disjoint() {
        let grammars = Grammars::build().unwrap();
        let mut seen = std::collections::HashMap::new();
        for (series, grammar) in grammars.iter() {
            for n in grammar.oclc_allowlist() {
                if let Some(prior) = seen.insert(*n, series) {
                    panic!("OCLC {n} claimed by {prior:?} and {series:?}");
                }
            }
        }
    }
}
