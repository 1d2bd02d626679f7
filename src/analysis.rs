//! Risk evaluation orchestrator.
//!
//! Combines the parsed variant file, the diplotype resolver and the
//! knowledge base into one schema-complete risk assessment per drug.
//! Nothing here returns an error for data-quality problems: unsupported
//! drugs, unknown phenotypes and failed parses all degrade to
//! well-formed results whose quality metrics record what happened.

use chrono::Utc;
use rayon::prelude::*;
use tracing::debug;

use crate::diplotype::build_diplotype;
use crate::kb;
use crate::parsers::ParsedVcf;
use crate::types::*;

const ANALYSIS_VERSION: &str = "1.0.0";
const DEFAULT_PATIENT_ID: &str = "PATIENT_UNKNOWN";

pub struct RiskEvaluator;

impl RiskEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Assess one drug against a parsed variant file
    pub fn predict_risk(&self, parsed: &ParsedVcf, drug_name: &str) -> RiskAssessmentResult {
        let drug_uc = drug_name.to_uppercase();
        let Some(drug) = Drug::from_name(&drug_uc) else {
            return self.unknown_drug_result(
                parsed,
                &drug_uc,
                format!("Drug \"{drug_uc}\" is not in the supported drug database."),
            );
        };

        let primary_gene = kb::primary_gene(drug);
        let gene_variants: Vec<&PharmacogenomicVariant> = parsed
            .pharmacogenomic_variants
            .iter()
            .filter(|v| v.gene == primary_gene)
            .collect();

        let call = build_diplotype(&parsed.pharmacogenomic_variants, primary_gene);
        let phenotype = kb::phenotype_for(primary_gene, &call.diplotype);
        let interaction = kb::interaction_for(drug, phenotype);
        let confidence = confidence_score(gene_variants.len(), call.method, phenotype);

        debug!(
            drug = %drug,
            gene = %primary_gene,
            diplotype = %call.diplotype,
            phenotype = %phenotype,
            confidence,
            "risk assessed"
        );

        let detected_variants = gene_variants.iter().map(|&v| enrich_variant(v)).collect();

        RiskAssessmentResult {
            patient_id: patient_id(parsed),
            drug: drug_uc,
            timestamp: Utc::now().to_rfc3339(),
            risk_assessment: RiskAssessment {
                risk_label: interaction.risk_label,
                confidence_score: confidence,
                severity: interaction.severity,
            },
            pharmacogenomic_profile: PharmacogenomicProfile {
                primary_gene: primary_gene.as_str().to_string(),
                diplotype: call.diplotype,
                phenotype: phenotype.code().to_string(),
                detected_variants,
            },
            clinical_recommendation: ClinicalRecommendation {
                recommendation: interaction.recommendation,
                dosing_guideline: interaction.dosing_guideline,
                cpic_guideline_level: interaction.cpic_level,
                monitoring_recommendations: kb::monitoring_for(drug, phenotype).to_string(),
                alternative_drugs: kb::alternative_drugs(drug, phenotype),
            },
            quality_metrics: QualityMetrics {
                vcf_parsing_success: parsed.parsing_success,
                total_variants_parsed: parsed.variants.len(),
                pharmacogenomic_variants_found: parsed.pharmacogenomic_variants.len(),
                gene_specific_variants: gene_variants.len(),
                diplotype_determination_method: call.method,
                analysis_version: ANALYSIS_VERSION.to_string(),
            },
        }
    }

    /// Assess several drugs against one file. Evaluations are
    /// independent, so they run in parallel; results come back in the
    /// caller's drug order.
    pub fn predict_all(&self, parsed: &ParsedVcf, drugs: &[Drug]) -> Vec<RiskAssessmentResult> {
        drugs
            .par_iter()
            .map(|drug| self.predict_risk(parsed, drug.as_str()))
            .collect()
    }

    fn unknown_drug_result(
        &self,
        parsed: &ParsedVcf,
        drug: &str,
        reason: String,
    ) -> RiskAssessmentResult {
        RiskAssessmentResult {
            patient_id: patient_id(parsed),
            drug: drug.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            risk_assessment: RiskAssessment {
                risk_label: RiskLabel::Unknown,
                confidence_score: 0.0,
                severity: Severity::Low,
            },
            pharmacogenomic_profile: PharmacogenomicProfile {
                primary_gene: "Unknown".to_string(),
                diplotype: "Unknown".to_string(),
                phenotype: "Unknown".to_string(),
                detected_variants: Vec::new(),
            },
            clinical_recommendation: ClinicalRecommendation {
                recommendation: reason,
                dosing_guideline: "Use standard dosing per clinical guidelines.".to_string(),
                cpic_guideline_level: "No recommendation".to_string(),
                monitoring_recommendations: "Standard clinical monitoring.".to_string(),
                alternative_drugs: Vec::new(),
            },
            quality_metrics: QualityMetrics {
                vcf_parsing_success: parsed.parsing_success,
                total_variants_parsed: parsed.variants.len(),
                pharmacogenomic_variants_found: parsed.pharmacogenomic_variants.len(),
                gene_specific_variants: 0,
                diplotype_determination_method: DiplotypeMethod::None,
                analysis_version: ANALYSIS_VERSION.to_string(),
            },
        }
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn patient_id(parsed: &ParsedVcf) -> String {
    parsed
        .patient_id
        .clone()
        .unwrap_or_else(|| DEFAULT_PATIENT_ID.to_string())
}

/// Evidence-accumulation confidence heuristic. The additive terms are a
/// fixed contract shared with downstream consumers; the result is
/// clamped to [0.10, 0.99] and rounded to two decimals.
fn confidence_score(
    gene_variant_count: usize,
    method: DiplotypeMethod,
    phenotype: Phenotype,
) -> f64 {
    let mut score: f64 = 0.50;

    if gene_variant_count > 0 {
        score += 0.15;
    }
    if gene_variant_count > 1 {
        score += 0.10;
    }

    match method {
        DiplotypeMethod::VariantBased => score += 0.15,
        DiplotypeMethod::DefaultWildtype => score -= 0.10,
        _ => {}
    }

    if phenotype != Phenotype::Unknown {
        score += 0.10;
    }

    (score.clamp(0.10, 0.99) * 100.0).round() / 100.0
}

fn enrich_variant(v: &PharmacogenomicVariant) -> DetectedVariant {
    let info = kb::variant_info(&v.rsid);
    DetectedVariant {
        rsid: v.rsid.clone(),
        gene: v.gene,
        chromosome: v.chromosome.clone(),
        position: v.position,
        ref_allele: v.ref_allele.clone(),
        alt_allele: v.alt_allele.clone(),
        zygosity: v.zygosity,
        star_allele: info
            .map(|i| i.star_allele.to_string())
            .or_else(|| v.star_allele.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        functional_effect: info
            .map(|i| i.effect.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        clinical_description: info
            .map(|i| i.description.to_string())
            .unwrap_or_else(|| "No description available".to_string()),
    }
}
