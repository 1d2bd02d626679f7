//! VCF parser for pharmacogenomic analysis.
//!
//! Accepts a restricted VCF dialect: `##key=value` meta lines, a
//! `#CHROM` column header, and tab-separated data lines whose INFO
//! field may carry `RS`, `GENE`, `STAR`, `CLNSIG` and `AF` annotations.
//! Data-quality problems never abort the parse: malformed lines are
//! dropped (recorded in `errors` when they carried a parse failure)
//! and every well-formed line still contributes to the result.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::{Gene, PharmacogenomicVariant, VariantRecord, Zygosity};

lazy_static! {
    static ref META_RE: Regex = Regex::new(r"^##(\w+)=(.+)$").unwrap();
}

#[derive(Debug, Error)]
enum VcfError {
    #[error("invalid POS field '{0}'")]
    InvalidPosition(String),
}

/// File-level metadata retained from meta-information lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VcfMetadata {
    pub file_format: String,
    pub source: String,
    pub reference: String,
    pub sample_ids: Vec<String>,
}

/// Outcome of parsing one variant file.
///
/// `parsing_success` stays true for dropped malformed lines; those
/// are per-line data-quality problems, recorded in `errors` as
/// non-fatal warnings while the rest of the file still parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedVcf {
    pub metadata: VcfMetadata,
    pub patient_id: Option<String>,
    pub variants: Vec<VariantRecord>,
    pub pharmacogenomic_variants: Vec<PharmacogenomicVariant>,
    pub parsing_success: bool,
    pub errors: Vec<String>,
}

/// Result of the pre-parse structural validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

pub struct VcfParser;

impl VcfParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw VCF content into structured variant data
    pub fn parse(&self, content: &str) -> ParsedVcf {
        let mut result = ParsedVcf {
            parsing_success: true,
            ..Default::default()
        };

        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.starts_with("##") {
                self.parse_meta_line(line, &mut result.metadata);
                continue;
            }

            if line.starts_with("#CHROM") {
                self.parse_header_line(line, &mut result.metadata);
                continue;
            }

            match self.parse_data_line(line) {
                Ok(Some(variant)) => {
                    if let Some(gene) = variant
                        .gene
                        .as_deref()
                        .and_then(Gene::from_symbol)
                    {
                        result
                            .pharmacogenomic_variants
                            .push(Self::to_pharmacogenomic(&variant, gene));
                    }
                    result.variants.push(variant);
                }
                // Lines with too few fields are dropped, not fatal
                Ok(None) => {}
                // Unparseable fields drop the line too; record the
                // problem and keep going so later variants still count
                Err(e) => {
                    debug!(line, error = %e, "dropping malformed data line");
                    result.errors.push(format!("VCF parsing error: {e}"));
                }
            }
        }

        result.patient_id = result.metadata.sample_ids.first().cloned();

        debug!(
            total = result.variants.len(),
            pharmacogenomic = result.pharmacogenomic_variants.len(),
            success = result.parsing_success,
            "parsed variant file"
        );

        result
    }

    /// Pre-parse structural check. All failing conditions are collected,
    /// except empty content which short-circuits.
    pub fn validate(&self, content: &str) -> ValidationReport {
        let mut errors = Vec::new();

        if content.trim().is_empty() {
            errors.push("VCF file is empty".to_string());
            return ValidationReport {
                valid: false,
                errors,
            };
        }

        if !content.contains("##fileformat=VCF") {
            errors.push("Missing VCF file format header (##fileformat=VCF)".to_string());
        }

        if !content.contains("#CHROM") {
            errors.push("Missing column header line (#CHROM)".to_string());
        }

        let has_data = content
            .lines()
            .map(str::trim)
            .any(|l| !l.is_empty() && !l.starts_with('#'));
        if !has_data {
            errors.push("No variant data lines found".to_string());
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    fn parse_meta_line(&self, line: &str, metadata: &mut VcfMetadata) {
        let Some(caps) = META_RE.captures(line) else {
            return;
        };
        let value = caps[2].to_string();
        match caps[1].to_lowercase().as_str() {
            "fileformat" => metadata.file_format = value,
            "source" => metadata.source = value,
            "reference" => metadata.reference = value,
            _ => {}
        }
    }

    fn parse_header_line(&self, line: &str, metadata: &mut VcfMetadata) {
        let columns: Vec<&str> = line[1..].split('\t').collect();
        if let Some(format_idx) = columns.iter().position(|&c| c == "FORMAT") {
            if format_idx < columns.len() - 1 {
                metadata.sample_ids = columns[format_idx + 1..]
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
            }
        }
    }

    fn parse_data_line(&self, line: &str) -> Result<Option<VariantRecord>, VcfError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 8 {
            return Ok(None);
        }

        let position: u64 = fields[1]
            .parse()
            .map_err(|_| VcfError::InvalidPosition(fields[1].to_string()))?;

        let id = if fields[2].is_empty() {
            ".".to_string()
        } else {
            fields[2].to_string()
        };
        let quality = if fields[5] == "." {
            None
        } else {
            fields[5].parse().ok()
        };

        let info = Self::parse_info_field(fields[7]);

        // Derived annotations from ID and INFO
        let mut rsid = id.starts_with("rs").then(|| id.clone());
        if let Some(rs) = info.get("RS") {
            rsid = Some(if rs.starts_with("rs") {
                rs.clone()
            } else {
                format!("rs{rs}")
            });
        }
        let gene = info.get("GENE").cloned();
        let star_allele = info.get("STAR").cloned();
        let clinical_significance = info.get("CLNSIG").cloned();
        let frequency = info.get("AF").and_then(|af| af.parse().ok());

        // Genotype from the GT subfield of the FORMAT/SAMPLE columns
        let mut genotype = None;
        if fields.len() > 9 {
            let format_keys: Vec<&str> = fields[8].split(':').collect();
            let sample_values: Vec<&str> = fields[9].split(':').collect();
            if let Some(gt_index) = format_keys.iter().position(|&k| k == "GT") {
                genotype = sample_values.get(gt_index).map(|s| s.to_string());
            }
        }

        Ok(Some(VariantRecord {
            chromosome: fields[0].to_string(),
            position,
            id,
            ref_allele: fields[3].to_string(),
            alt_allele: fields[4].to_string(),
            quality,
            filter: fields[6].to_string(),
            info,
            genotype,
            rsid,
            gene,
            star_allele,
            clinical_significance,
            frequency,
        }))
    }

    /// INFO is `;`-separated `KEY=VALUE` pairs; bare tokens are flags
    fn parse_info_field(info_str: &str) -> IndexMap<String, String> {
        let mut info = IndexMap::new();
        if info_str.is_empty() || info_str == "." {
            return info;
        }
        for entry in info_str.split(';') {
            match entry.find('=') {
                Some(eq) => {
                    info.insert(entry[..eq].to_string(), entry[eq + 1..].to_string());
                }
                None => {
                    info.insert(entry.to_string(), "true".to_string());
                }
            }
        }
        info
    }

    fn to_pharmacogenomic(variant: &VariantRecord, gene: Gene) -> PharmacogenomicVariant {
        PharmacogenomicVariant {
            rsid: variant
                .rsid
                .clone()
                .unwrap_or_else(|| variant.id.clone()),
            gene,
            chromosome: variant.chromosome.clone(),
            position: variant.position,
            ref_allele: variant.ref_allele.clone(),
            alt_allele: variant.alt_allele.clone(),
            star_allele: variant.star_allele.clone(),
            genotype: variant.genotype.clone(),
            quality: variant.quality,
            filter: variant.filter.clone(),
            zygosity: Zygosity::from_genotype(variant.genotype.as_deref()),
            clinical_significance: variant
                .clinical_significance
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            frequency: variant.frequency,
        }
    }
}

impl Default for VcfParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_VCF: &str = "\
##fileformat=VCFv4.2
##source=ClinicalSequencer
##reference=GRCh38
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_001
22\t42524947\trs3892097\tG\tA\t99\tPASS\tRS=rs3892097;GENE=CYP2D6;STAR=*4;AF=0.19\tGT:DP\t1/1:35
10\t96541616\trs4244285\tG\tA\t87\tPASS\tGENE=CYP2C19;STAR=*2;CLNSIG=drug_response\tGT\t0/1
1\t11856378\trs9999999\tG\tA\t50\tPASS\tGENE=MTHFR\tGT\t0/1
";

    #[test]
    fn test_parse_metadata_and_patient_id() {
        let parsed = VcfParser::new().parse(SAMPLE_VCF);
        assert!(parsed.parsing_success);
        assert_eq!(parsed.metadata.file_format, "VCFv4.2");
        assert_eq!(parsed.metadata.source, "ClinicalSequencer");
        assert_eq!(parsed.metadata.reference, "GRCh38");
        assert_eq!(parsed.metadata.sample_ids, vec!["PATIENT_001"]);
        assert_eq!(parsed.patient_id.as_deref(), Some("PATIENT_001"));
    }

    #[test]
    fn test_parse_variants_and_pharmacogenomic_subset() {
        let parsed = VcfParser::new().parse(SAMPLE_VCF);
        assert_eq!(parsed.variants.len(), 3);
        // MTHFR is not a target gene
        assert_eq!(parsed.pharmacogenomic_variants.len(), 2);

        let first = &parsed.pharmacogenomic_variants[0];
        assert_eq!(first.rsid, "rs3892097");
        assert_eq!(first.gene, Gene::Cyp2d6);
        assert_eq!(first.star_allele.as_deref(), Some("*4"));
        assert_eq!(first.zygosity, Zygosity::HomozygousVariant);
        assert_eq!(first.frequency, Some(0.19));

        let second = &parsed.pharmacogenomic_variants[1];
        assert_eq!(second.gene, Gene::Cyp2c19);
        assert_eq!(second.zygosity, Zygosity::Heterozygous);
        assert_eq!(second.clinical_significance, "drug_response");
    }

    #[test]
    fn test_rsid_from_info_rs_tag_without_prefix() {
        let vcf = "\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
22\t42524947\t.\tG\tA\t.\tPASS\tRS=3892097;GENE=CYP2D6
";
        let parsed = VcfParser::new().parse(vcf);
        assert_eq!(
            parsed.pharmacogenomic_variants[0].rsid,
            "rs3892097",
            "bare RS values get an rs prefix"
        );
    }

    #[test]
    fn test_short_lines_are_silently_dropped() {
        let vcf = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
22\t100\trs1\tG\tA
10\t200\trs4244285\tG\tA\t87\tPASS\tGENE=CYP2C19;STAR=*2
";
        let parsed = VcfParser::new().parse(vcf);
        assert!(parsed.parsing_success);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.variants.len(), 1);
    }

    #[test]
    fn test_bad_position_drops_only_that_line() {
        let vcf = "\
##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
10\t200\trs4244285\tG\tA\t87\tPASS\tGENE=CYP2C19;STAR=*2
10\tnot_a_number\trs2\tG\tA\t87\tPASS\tGENE=CYP2C19
10\t300\trs4986893\tG\tA\t87\tPASS\tGENE=CYP2C19;STAR=*3
";
        let parsed = VcfParser::new().parse(vcf);
        assert!(parsed.parsing_success);
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].contains("not_a_number"));
        // Lines after the bad one still parse
        assert_eq!(parsed.variants.len(), 2);
        assert_eq!(parsed.pharmacogenomic_variants.len(), 2);
        assert_eq!(parsed.variants[1].position, 300);
    }

    #[test]
    fn test_info_flags_and_order() {
        let info = VcfParser::parse_info_field("DB;RS=rs42;GENE=TPMT");
        assert_eq!(info.get("DB").map(String::as_str), Some("true"));
        assert_eq!(info.get("RS").map(String::as_str), Some("rs42"));
        let keys: Vec<&str> = info.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["DB", "RS", "GENE"]);
    }

    #[test]
    fn test_missing_quality_and_genotype() {
        let vcf = "\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
22\t100\trs3892097\tG\tA\t.\tPASS\tGENE=CYP2D6;STAR=*4
";
        let parsed = VcfParser::new().parse(vcf);
        let v = &parsed.variants[0];
        assert_eq!(v.quality, None);
        assert_eq!(v.genotype, None);
        assert_eq!(
            parsed.pharmacogenomic_variants[0].zygosity,
            Zygosity::Unknown
        );
    }

    #[test]
    fn test_gt_index_respected_in_format_column() {
        let vcf = "\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1
22\t100\trs3892097\tG\tA\t99\tPASS\tGENE=CYP2D6\tDP:GT:GQ\t35:0/1:40
";
        let parsed = VcfParser::new().parse(vcf);
        assert_eq!(parsed.variants[0].genotype.as_deref(), Some("0/1"));
        assert_eq!(
            parsed.pharmacogenomic_variants[0].zygosity,
            Zygosity::Heterozygous
        );
    }

    #[test]
    fn test_validate_passes_well_formed_content() {
        let report = VcfParser::new().validate(SAMPLE_VCF);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_validate_empty_content() {
        let report = VcfParser::new().validate("   \n  ");
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["VCF file is empty"]);
    }

    #[test]
    fn test_validate_indented_comment_is_not_data() {
        let vcf = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\n   #annotation note\n";
        let report = VcfParser::new().validate(vcf);
        assert!(!report.valid);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("No variant data lines")));
    }

    #[test]
    fn test_validate_collects_all_failures() {
        let report = VcfParser::new().validate("##source=foo\n");
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[0].contains("##fileformat=VCF"));
        assert!(report.errors[1].contains("#CHROM"));
        assert!(report.errors[2].contains("No variant data lines"));
    }
}
