//! # Pharmacogenomic Risk Engine
//!
//! A toolkit for assessing drug risk from a patient's genomic variant
//! file. Parses a VCF, resolves the patient's likely diplotype for the
//! drug's primary metabolizing gene, and emits a structured,
//! CPIC-aligned risk verdict.
//!
//! ## Features
//!
//! - VCF parsing with pharmacogenomic variant extraction for six target
//!   genes (CYP2D6, CYP2C19, CYP2C9, SLCO1B1, TPMT, DPYD)
//! - Zygosity inference and star-allele diplotype resolution
//! - Curated drug/gene/phenotype interaction knowledge base covering
//!   codeine, clopidogrel, warfarin, simvastatin, azathioprine and
//!   fluorouracil
//! - Deterministic confidence scoring and schema-complete results that
//!   degrade gracefully instead of failing
//! - Parallel per-drug evaluation and multiple report formats
//!   (JSON, CSV, TSV, HTML)

pub mod analysis;
pub mod diplotype;
pub mod kb;
pub mod output;
pub mod parsers;
pub mod types;

// Re-export key types
pub use analysis::RiskEvaluator;
pub use diplotype::{build_diplotype, DiplotypeCall};
pub use output::{ReportFormat, ReportGenerator};
pub use parsers::{ParsedVcf, ValidationReport, VcfParser};
pub use types::*;
