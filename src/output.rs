use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use serde_json::to_string_pretty;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::RiskAssessmentResult;

/// Supported report formats
#[derive(Debug, Clone, Copy)]
pub enum ReportFormat {
    Html,
    Csv,
    Json,
    Tsv,
    All,
}

/// Report generator for risk assessment results
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: &Path) -> Result<Self> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).with_context(|| {
                format!("Failed to create output directory {}", output_dir.display())
            })?;
        }
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Write reports in the requested format(s); returns the paths written
    pub fn generate(
        &self,
        results: &[RiskAssessmentResult],
        format: ReportFormat,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        match format {
            ReportFormat::Json => written.push(self.generate_json_report(results)?),
            ReportFormat::Csv => written.push(self.generate_csv_report(results)?),
            ReportFormat::Tsv => written.push(self.generate_tsv_report(results)?),
            ReportFormat::Html => written.push(self.generate_html_report(results)?),
            ReportFormat::All => {
                written.push(self.generate_json_report(results)?);
                written.push(self.generate_csv_report(results)?);
                written.push(self.generate_tsv_report(results)?);
                written.push(self.generate_html_report(results)?);
            }
        }
        Ok(written)
    }

    fn report_path(&self, extension: &str) -> PathBuf {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        self.output_dir
            .join(format!("risk_report_{timestamp}.{extension}"))
    }

    fn generate_json_report(&self, results: &[RiskAssessmentResult]) -> Result<PathBuf> {
        let path = self.report_path("json");
        let json = to_string_pretty(results)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
        Ok(path)
    }

    fn generate_csv_report(&self, results: &[RiskAssessmentResult]) -> Result<PathBuf> {
        let path = self.report_path("csv");
        let mut writer = Writer::from_path(&path)
            .with_context(|| format!("Failed to write CSV report to {}", path.display()))?;

        writer.write_record(Self::SUMMARY_COLUMNS)?;
        for result in results {
            writer.write_record(Self::summary_row(result))?;
        }
        writer.flush()?;
        Ok(path)
    }

    fn generate_tsv_report(&self, results: &[RiskAssessmentResult]) -> Result<PathBuf> {
        let path = self.report_path("tsv");
        let mut lines = vec![Self::SUMMARY_COLUMNS.join("\t")];
        for result in results {
            lines.push(Self::summary_row(result).join("\t"));
        }
        fs::write(&path, lines.join("\n") + "\n")
            .with_context(|| format!("Failed to write TSV report to {}", path.display()))?;
        Ok(path)
    }

    const SUMMARY_COLUMNS: [&'static str; 10] = [
        "patient_id",
        "drug",
        "risk_label",
        "confidence_score",
        "severity",
        "primary_gene",
        "diplotype",
        "phenotype",
        "detected_variants",
        "determination_method",
    ];

    fn summary_row(result: &RiskAssessmentResult) -> Vec<String> {
        vec![
            result.patient_id.clone(),
            result.drug.clone(),
            result.risk_assessment.risk_label.as_str().to_string(),
            format!("{:.2}", result.risk_assessment.confidence_score),
            result.risk_assessment.severity.as_str().to_string(),
            result.pharmacogenomic_profile.primary_gene.clone(),
            result.pharmacogenomic_profile.diplotype.clone(),
            result.pharmacogenomic_profile.phenotype.clone(),
            result
                .pharmacogenomic_profile
                .detected_variants
                .len()
                .to_string(),
            result
                .quality_metrics
                .diplotype_determination_method
                .as_str()
                .to_string(),
        ]
    }

    fn generate_html_report(&self, results: &[RiskAssessmentResult]) -> Result<PathBuf> {
        let path = self.report_path("html");
        fs::write(&path, self.create_html_content(results))
            .with_context(|| format!("Failed to write HTML report to {}", path.display()))?;
        Ok(path)
    }

    fn create_html_content(&self, results: &[RiskAssessmentResult]) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut rows = String::new();
        for result in results {
            let risk_class = match result.risk_assessment.risk_label.as_str() {
                "Safe" => "risk-safe",
                "Adjust Dosage" => "risk-adjust",
                "Toxic" | "Ineffective" => "risk-high",
                _ => "risk-unknown",
            };
            rows.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                risk_class,
                result.drug,
                result.risk_assessment.risk_label,
                result.risk_assessment.confidence_score,
                result.risk_assessment.severity.as_str(),
                result.pharmacogenomic_profile.primary_gene,
                result.pharmacogenomic_profile.diplotype,
                result.pharmacogenomic_profile.phenotype,
            ));
        }

        let patient = results
            .first()
            .map(|r| r.patient_id.as_str())
            .unwrap_or("unknown");

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Pharmacogenomic Risk Report</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            margin: 40px;
            background-color: #f5f5f5;
        }}
        .container {{
            max-width: 1000px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 0 10px rgba(0,0,0,0.1);
        }}
        h1 {{
            color: #2c3e50;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            margin: 20px 0;
        }}
        th, td {{
            border: 1px solid #ddd;
            padding: 12px;
            text-align: left;
        }}
        th {{
            background-color: #3498db;
            color: white;
        }}
        .risk-safe {{
            background-color: #d4edda;
        }}
        .risk-adjust {{
            background-color: #fff3cd;
        }}
        .risk-high {{
            background-color: #f8d7da;
        }}
        .risk-unknown {{
            background-color: #e2e3e5;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Pharmacogenomic Risk Report</h1>
        <p>Patient: {patient} &mdash; generated on {timestamp}</p>
        <table>
            <tr><th>Drug</th><th>Risk</th><th>Confidence</th><th>Severity</th><th>Gene</th><th>Diplotype</th><th>Phenotype</th></tr>
            {rows}
        </table>
    </div>
</body>
</html>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RiskEvaluator;
    use crate::parsers::VcfParser;
    use tempfile::TempDir;

    fn sample_results() -> Vec<RiskAssessmentResult> {
        let vcf = "##fileformat=VCFv4.2\n\
                   #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tP1\n\
                   22\t42524947\trs3892097\tG\tA\t99\tPASS\tGENE=CYP2D6;STAR=*4\tGT\t1/1\n";
        let parsed = VcfParser::new().parse(vcf);
        let evaluator = RiskEvaluator::new();
        vec![
            evaluator.predict_risk(&parsed, "CODEINE"),
            evaluator.predict_risk(&parsed, "WARFARIN"),
        ]
    }

    #[test]
    fn test_generate_json_report() -> Result<()> {
        let dir = TempDir::new()?;
        let generator = ReportGenerator::new(dir.path())?;
        let paths = generator.generate(&sample_results(), ReportFormat::Json)?;
        assert_eq!(paths.len(), 1);
        let content = fs::read_to_string(&paths[0])?;
        let parsed: Vec<RiskAssessmentResult> = serde_json::from_str(&content)?;
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].drug, "CODEINE");
        Ok(())
    }

    #[test]
    fn test_generate_csv_report_has_header_and_rows() -> Result<()> {
        let dir = TempDir::new()?;
        let generator = ReportGenerator::new(dir.path())?;
        let paths = generator.generate(&sample_results(), ReportFormat::Csv)?;
        let content = fs::read_to_string(&paths[0])?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("patient_id,drug,risk_label"));
        assert!(lines[1].contains("CODEINE"));
        Ok(())
    }

    #[test]
    fn test_generate_all_formats() -> Result<()> {
        let dir = TempDir::new()?;
        let generator = ReportGenerator::new(dir.path())?;
        let paths = generator.generate(&sample_results(), ReportFormat::All)?;
        assert_eq!(paths.len(), 4);
        Ok(())
    }
}
