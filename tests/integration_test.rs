use pgx_risk::{
    DiplotypeMethod, Drug, Gene, ParsedVcf, ReportFormat, ReportGenerator, RiskEvaluator,
    RiskLabel, Severity, VcfParser, Zygosity,
};

const PATIENT_VCF: &str = "\
##fileformat=VCFv4.2
##source=ClinicalExomePipeline
##reference=GRCh38
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_042
22\t42524947\trs3892097\tG\tA\t99\tPASS\tRS=rs3892097;GENE=CYP2D6;STAR=*4;CLNSIG=drug_response;AF=0.19\tGT:DP\t1/1:40
10\t96702047\trs1799853\tC\tT\t88\tPASS\tGENE=CYP2C9;STAR=*2\tGT\t0/1
12\t21178615\trs4149056\tT\tC\t92\tPASS\tGENE=SLCO1B1;STAR=*5\tGT\t0/1
7\t117559590\trs0000099\tG\tT\t45\tPASS\tGENE=CFTR\tGT\t0/1
";

fn parse_patient() -> ParsedVcf {
    VcfParser::new().parse(PATIENT_VCF)
}

#[test]
fn test_end_to_end_parse() {
    let parsed = parse_patient();
    assert!(parsed.parsing_success);
    assert_eq!(parsed.patient_id.as_deref(), Some("PATIENT_042"));
    assert_eq!(parsed.variants.len(), 4);
    // CFTR is outside the target gene list
    assert_eq!(parsed.pharmacogenomic_variants.len(), 3);
    assert_eq!(
        parsed.pharmacogenomic_variants[0].zygosity,
        Zygosity::HomozygousVariant
    );
}

#[test]
fn test_end_to_end_codeine_poor_metabolizer() {
    let parsed = parse_patient();
    let result = RiskEvaluator::new().predict_risk(&parsed, "CODEINE");

    assert_eq!(result.patient_id, "PATIENT_042");
    assert_eq!(result.pharmacogenomic_profile.primary_gene, "CYP2D6");
    assert_eq!(result.pharmacogenomic_profile.diplotype, "*4/*4");
    assert_eq!(result.pharmacogenomic_profile.phenotype, "PM");
    assert_eq!(result.risk_assessment.risk_label, RiskLabel::Ineffective);
    assert_eq!(result.risk_assessment.severity, Severity::High);
    assert_eq!(result.pharmacogenomic_profile.detected_variants.len(), 1);

    let dv = &result.pharmacogenomic_profile.detected_variants[0];
    assert_eq!(dv.rsid, "rs3892097");
    assert_eq!(dv.star_allele, "*4");
    assert_eq!(dv.functional_effect, "non-functional");

    assert!(!result.clinical_recommendation.alternative_drugs.is_empty());
    assert_eq!(result.quality_metrics.total_variants_parsed, 4);
    assert_eq!(result.quality_metrics.gene_specific_variants, 1);
}

#[test]
fn test_end_to_end_warfarin_dose_adjustment() {
    let parsed = parse_patient();
    let result = RiskEvaluator::new().predict_risk(&parsed, "WARFARIN");

    assert_eq!(result.pharmacogenomic_profile.diplotype, "*1/*2");
    assert_eq!(result.pharmacogenomic_profile.phenotype, "IM");
    assert_eq!(result.risk_assessment.risk_label, RiskLabel::AdjustDosage);
    assert!(result
        .clinical_recommendation
        .dosing_guideline
        .contains("25-50%"));
}

#[test]
fn test_end_to_end_wildtype_gene_is_safe() {
    let parsed = parse_patient();
    // No TPMT variants in the file
    let result = RiskEvaluator::new().predict_risk(&parsed, "AZATHIOPRINE");

    assert_eq!(result.pharmacogenomic_profile.diplotype, "*1/*1");
    assert_eq!(result.pharmacogenomic_profile.phenotype, "NM");
    assert_eq!(result.risk_assessment.risk_label, RiskLabel::Safe);
    assert_eq!(result.risk_assessment.confidence_score, 0.50);
    assert_eq!(
        result.quality_metrics.diplotype_determination_method,
        DiplotypeMethod::DefaultWildtype
    );
    assert!(result.clinical_recommendation.alternative_drugs.is_empty());
}

#[test]
fn test_bad_position_line_does_not_mask_later_variants() {
    let vcf = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_042
1\tbad_pos\trs9999999\tG\tA\t50\tPASS\tGENE=MTHFR\tGT\t0/1
22\t42524947\trs3892097\tG\tA\t99\tPASS\tGENE=CYP2D6;STAR=*4\tGT\t1/1
";
    let parsed = VcfParser::new().parse(vcf);
    assert!(parsed.parsing_success);
    assert_eq!(parsed.errors.len(), 1);

    let result = RiskEvaluator::new().predict_risk(&parsed, "CODEINE");
    assert_eq!(result.pharmacogenomic_profile.diplotype, "*4/*4");
    assert_eq!(result.pharmacogenomic_profile.phenotype, "PM");
    assert_eq!(result.risk_assessment.risk_label, RiskLabel::Ineffective);
    assert_eq!(
        result.quality_metrics.diplotype_determination_method,
        DiplotypeMethod::VariantBased
    );
}

#[test]
fn test_end_to_end_unsupported_drug() {
    let parsed = parse_patient();
    let result = RiskEvaluator::new().predict_risk(&parsed, "Aspirin");

    assert_eq!(result.drug, "ASPIRIN");
    assert_eq!(result.risk_assessment.risk_label, RiskLabel::Unknown);
    assert_eq!(result.risk_assessment.confidence_score, 0.0);
    assert_eq!(result.pharmacogenomic_profile.primary_gene, "Unknown");
    assert!(result.pharmacogenomic_profile.detected_variants.is_empty());
    // Quality metrics still reflect the underlying parse
    assert!(result.quality_metrics.vcf_parsing_success);
    assert_eq!(result.quality_metrics.total_variants_parsed, 4);
}

#[test]
fn test_all_supported_drugs_resolve_deterministically() {
    let parsed = parse_patient();
    let evaluator = RiskEvaluator::new();
    let expected_genes = [
        (Drug::Codeine, Gene::Cyp2d6),
        (Drug::Clopidogrel, Gene::Cyp2c19),
        (Drug::Warfarin, Gene::Cyp2c9),
        (Drug::Simvastatin, Gene::Slco1b1),
        (Drug::Azathioprine, Gene::Tpmt),
        (Drug::Fluorouracil, Gene::Dpyd),
    ];
    for (drug, gene) in expected_genes {
        let result = evaluator.predict_risk(&parsed, drug.as_str());
        assert_eq!(result.pharmacogenomic_profile.primary_gene, gene.as_str());
        let score = result.risk_assessment.confidence_score;
        assert!(
            (0.10..=0.99).contains(&score),
            "confidence {score} out of range for {drug}"
        );
    }
}

#[test]
fn test_result_json_schema_round_trip() {
    let parsed = parse_patient();
    let result = RiskEvaluator::new().predict_risk(&parsed, "SIMVASTATIN");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["drug"], "SIMVASTATIN");
    assert_eq!(json["risk_assessment"]["risk_label"], "Adjust Dosage");
    assert_eq!(json["pharmacogenomic_profile"]["diplotype"], "*1/*5");
    assert_eq!(json["pharmacogenomic_profile"]["phenotype"], "IM");
    assert_eq!(
        json["quality_metrics"]["diplotype_determination_method"],
        "variant_based"
    );
    assert_eq!(
        json["pharmacogenomic_profile"]["detected_variants"][0]["zygosity"],
        "heterozygous"
    );
}

#[test]
fn test_validation_rejects_garbage_before_analysis() {
    let parser = VcfParser::new();
    let report = parser.validate("not a vcf at all");
    assert!(!report.valid);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("##fileformat=VCF")));
}

#[test]
fn test_file_based_workflow_with_reports() -> anyhow::Result<()> {
    use std::io::Write;
    use tempfile::TempDir;

    let dir = TempDir::new()?;
    let vcf_path = dir.path().join("patient.vcf");
    let mut file = std::fs::File::create(&vcf_path)?;
    write!(file, "{PATIENT_VCF}")?;

    let content = pgx_risk::parsers::read_variant_file(&vcf_path)?;
    let parser = VcfParser::new();
    assert!(parser.validate(&content).valid);

    let parsed = parser.parse(&content);
    let results = RiskEvaluator::new().predict_all(&parsed, &Drug::ALL);
    assert_eq!(results.len(), 6);

    let report_dir = dir.path().join("reports");
    let generator = ReportGenerator::new(&report_dir)?;
    let written = generator.generate(&results, ReportFormat::All)?;
    assert_eq!(written.len(), 4);
    for path in written {
        assert!(path.exists());
    }
    Ok(())
}
