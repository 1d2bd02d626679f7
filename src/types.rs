use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The six pharmacogenes covered by the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gene {
    #[serde(rename = "CYP2D6")]
    Cyp2d6,
    #[serde(rename = "CYP2C19")]
    Cyp2c19,
    #[serde(rename = "CYP2C9")]
    Cyp2c9,
    #[serde(rename = "SLCO1B1")]
    Slco1b1,
    #[serde(rename = "TPMT")]
    Tpmt,
    #[serde(rename = "DPYD")]
    Dpyd,
}

impl Gene {
    pub const ALL: [Gene; 6] = [
        Gene::Cyp2d6,
        Gene::Cyp2c19,
        Gene::Cyp2c9,
        Gene::Slco1b1,
        Gene::Tpmt,
        Gene::Dpyd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gene::Cyp2d6 => "CYP2D6",
            Gene::Cyp2c19 => "CYP2C19",
            Gene::Cyp2c9 => "CYP2C9",
            Gene::Slco1b1 => "SLCO1B1",
            Gene::Tpmt => "TPMT",
            Gene::Dpyd => "DPYD",
        }
    }

    /// Match a gene symbol case-insensitively against the target gene list
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_uppercase().as_str() {
            "CYP2D6" => Some(Gene::Cyp2d6),
            "CYP2C19" => Some(Gene::Cyp2c19),
            "CYP2C9" => Some(Gene::Cyp2c9),
            "SLCO1B1" => Some(Gene::Slco1b1),
            "TPMT" => Some(Gene::Tpmt),
            "DPYD" => Some(Gene::Dpyd),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six drugs with curated gene interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Drug {
    Codeine,
    Clopidogrel,
    Warfarin,
    Simvastatin,
    Azathioprine,
    Fluorouracil,
}

impl Drug {
    pub const ALL: [Drug; 6] = [
        Drug::Codeine,
        Drug::Clopidogrel,
        Drug::Warfarin,
        Drug::Simvastatin,
        Drug::Azathioprine,
        Drug::Fluorouracil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Drug::Codeine => "CODEINE",
            Drug::Clopidogrel => "CLOPIDOGREL",
            Drug::Warfarin => "WARFARIN",
            Drug::Simvastatin => "SIMVASTATIN",
            Drug::Azathioprine => "AZATHIOPRINE",
            Drug::Fluorouracil => "FLUOROURACIL",
        }
    }

    /// Look up a drug by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "CODEINE" => Some(Drug::Codeine),
            "CLOPIDOGREL" => Some(Drug::Clopidogrel),
            "WARFARIN" => Some(Drug::Warfarin),
            "SIMVASTATIN" => Some(Drug::Simvastatin),
            "AZATHIOPRINE" => Some(Drug::Azathioprine),
            "FLUOROURACIL" => Some(Drug::Fluorouracil),
            _ => None,
        }
    }
}

impl std::fmt::Display for Drug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zygosity inferred from a VCF genotype string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zygosity {
    HomozygousReference,
    HomozygousVariant,
    Heterozygous,
    Unknown,
}

impl Zygosity {
    /// Derive zygosity from a raw genotype string ("0/1", "1|1", ...).
    /// Exactly two tokens are required; anything else (missing call,
    /// haploid, malformed) is Unknown.
    pub fn from_genotype(genotype: Option<&str>) -> Self {
        let Some(gt) = genotype else {
            return Zygosity::Unknown;
        };
        let alleles: Vec<&str> = gt.split(['/', '|']).collect();
        if alleles.len() != 2 {
            return Zygosity::Unknown;
        }
        if alleles[0] == alleles[1] {
            if alleles[0] == "0" {
                Zygosity::HomozygousReference
            } else {
                Zygosity::HomozygousVariant
            }
        } else {
            Zygosity::Heterozygous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zygosity::HomozygousReference => "homozygous_reference",
            Zygosity::HomozygousVariant => "homozygous_variant",
            Zygosity::Heterozygous => "heterozygous",
            Zygosity::Unknown => "unknown",
        }
    }
}

/// Metabolizer phenotype codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phenotype {
    #[serde(rename = "PM")]
    Pm,
    #[serde(rename = "IM")]
    Im,
    #[serde(rename = "NM")]
    Nm,
    #[serde(rename = "RM")]
    Rm,
    #[serde(rename = "URM")]
    Urm,
    Unknown,
}

impl Phenotype {
    pub fn code(&self) -> &'static str {
        match self {
            Phenotype::Pm => "PM",
            Phenotype::Im => "IM",
            Phenotype::Nm => "NM",
            Phenotype::Rm => "RM",
            Phenotype::Urm => "URM",
            Phenotype::Unknown => "Unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phenotype::Pm => "Poor Metabolizer",
            Phenotype::Im => "Intermediate Metabolizer",
            Phenotype::Nm => "Normal Metabolizer",
            Phenotype::Rm => "Rapid Metabolizer",
            Phenotype::Urm => "Ultra-Rapid Metabolizer",
            Phenotype::Unknown => "Unknown/Indeterminate",
        }
    }

    /// Normal and rapid metabolizers need no drug substitution
    pub fn needs_alternatives(&self) -> bool {
        !matches!(self, Phenotype::Nm | Phenotype::Rm)
    }
}

impl std::fmt::Display for Phenotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Clinical risk verdict for a drug/phenotype pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Safe,
    #[serde(rename = "Adjust Dosage")]
    AdjustDosage,
    Toxic,
    Ineffective,
    Unknown,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Toxic => "Toxic",
            RiskLabel::Ineffective => "Ineffective",
            RiskLabel::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// How the diplotype was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiplotypeMethod {
    VariantBased,
    DefaultWildtype,
    NoStarAllelesFound,
    None,
}

impl DiplotypeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiplotypeMethod::VariantBased => "variant_based",
            DiplotypeMethod::DefaultWildtype => "default_wildtype",
            DiplotypeMethod::NoStarAllelesFound => "no_star_alleles_found",
            DiplotypeMethod::None => "none",
        }
    }
}

/// A single parsed variant data line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRecord {
    pub chromosome: String,
    pub position: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub quality: Option<f64>,
    pub filter: String,
    /// INFO key/value pairs in file order; bare flags map to "true"
    pub info: IndexMap<String, String>,
    pub genotype: Option<String>,
    pub rsid: Option<String>,
    pub gene: Option<String>,
    pub star_allele: Option<String>,
    pub clinical_significance: Option<String>,
    pub frequency: Option<f64>,
}

/// A variant restricted to one of the six target genes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmacogenomicVariant {
    pub rsid: String,
    pub gene: Gene,
    pub chromosome: String,
    pub position: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub star_allele: Option<String>,
    pub genotype: Option<String>,
    pub quality: Option<f64>,
    pub filter: String,
    pub zygosity: Zygosity,
    pub clinical_significance: String,
    pub frequency: Option<f64>,
}

/// A gene-specific variant enriched with knowledge-base annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedVariant {
    pub rsid: String,
    pub gene: Gene,
    pub chromosome: String,
    pub position: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub zygosity: Zygosity,
    pub star_allele: String,
    pub functional_effect: String,
    pub clinical_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: String,
    pub diplotype: String,
    pub phenotype: String,
    pub detected_variants: Vec<DetectedVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub recommendation: String,
    pub dosing_guideline: String,
    pub cpic_guideline_level: String,
    pub monitoring_recommendations: String,
    pub alternative_drugs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub total_variants_parsed: usize,
    pub pharmacogenomic_variants_found: usize,
    pub gene_specific_variants: usize,
    pub diplotype_determination_method: DiplotypeMethod,
    pub analysis_version: String,
}

/// Complete risk assessment for one (file, drug) evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    pub patient_id: String,
    pub drug: String,
    pub timestamp: String,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub quality_metrics: QualityMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zygosity_from_genotype() {
        assert_eq!(
            Zygosity::from_genotype(Some("0/0")),
            Zygosity::HomozygousReference
        );
        assert_eq!(
            Zygosity::from_genotype(Some("1/1")),
            Zygosity::HomozygousVariant
        );
        assert_eq!(Zygosity::from_genotype(Some("0/1")), Zygosity::Heterozygous);
        assert_eq!(Zygosity::from_genotype(Some("1/0")), Zygosity::Heterozygous);
        assert_eq!(Zygosity::from_genotype(Some("0|1")), Zygosity::Heterozygous);
        assert_eq!(
            Zygosity::from_genotype(Some("2/2")),
            Zygosity::HomozygousVariant
        );
        assert_eq!(Zygosity::from_genotype(Some("1/2")), Zygosity::Heterozygous);
        assert_eq!(Zygosity::from_genotype(Some(".")), Zygosity::Unknown);
        assert_eq!(Zygosity::from_genotype(Some("0/1/1")), Zygosity::Unknown);
        assert_eq!(Zygosity::from_genotype(None), Zygosity::Unknown);
    }

    #[test]
    fn test_gene_from_symbol() {
        assert_eq!(Gene::from_symbol("cyp2d6"), Some(Gene::Cyp2d6));
        assert_eq!(Gene::from_symbol("DPYD"), Some(Gene::Dpyd));
        assert_eq!(Gene::from_symbol("BRCA1"), None);
    }

    #[test]
    fn test_drug_from_name_case_insensitive() {
        for drug in Drug::ALL {
            assert_eq!(Drug::from_name(drug.as_str()), Some(drug));
            assert_eq!(Drug::from_name(&drug.as_str().to_lowercase()), Some(drug));
        }
        assert_eq!(Drug::from_name("ASPIRIN"), None);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&RiskLabel::AdjustDosage).unwrap(),
            "\"Adjust Dosage\""
        );
        assert_eq!(
            serde_json::to_string(&Zygosity::HomozygousReference).unwrap(),
            "\"homozygous_reference\""
        );
        assert_eq!(
            serde_json::to_string(&DiplotypeMethod::DefaultWildtype).unwrap(),
            "\"default_wildtype\""
        );
        assert_eq!(serde_json::to_string(&Gene::Cyp2d6).unwrap(), "\"CYP2D6\"");
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
    }
}
