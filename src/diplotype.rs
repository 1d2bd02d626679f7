//! Diplotype resolution from detected pharmacogenomic variants.
//!
//! This is unphased calling: alleles are counted per zygosity, sorted
//! lexicographically and paired. When more than two alleles resolve for
//! a gene, only the first two after sorting are kept. That truncation
//! is a diploid approximation, not true haplotype phasing.

use crate::kb;
use crate::types::{DiplotypeMethod, Gene, PharmacogenomicVariant, Zygosity};

/// A resolved two-allele diplotype and how it was derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiplotypeCall {
    pub diplotype: String,
    pub method: DiplotypeMethod,
}

/// Derive a diplotype for `gene` from the full pharmacogenomic variant
/// list. With no gene-specific variants the wildtype `*1/*1` is assumed.
pub fn build_diplotype(variants: &[PharmacogenomicVariant], gene: Gene) -> DiplotypeCall {
    let gene_variants: Vec<&PharmacogenomicVariant> =
        variants.iter().filter(|v| v.gene == gene).collect();

    if gene_variants.is_empty() {
        return DiplotypeCall {
            diplotype: "*1/*1".to_string(),
            method: DiplotypeMethod::DefaultWildtype,
        };
    }

    // One allele copy per heterozygous call, two per homozygous-variant
    // call. The knowledge base annotation wins over the STAR tag carried
    // on the variant itself.
    let mut star_alleles: Vec<String> = Vec::new();
    for v in &gene_variants {
        let allele = kb::variant_info(&v.rsid)
            .map(|info| info.star_allele.to_string())
            .or_else(|| v.star_allele.clone());
        let Some(allele) = allele else {
            continue;
        };
        match v.zygosity {
            Zygosity::HomozygousVariant => {
                star_alleles.push(allele.clone());
                star_alleles.push(allele);
            }
            Zygosity::Heterozygous => star_alleles.push(allele),
            Zygosity::HomozygousReference | Zygosity::Unknown => {}
        }
    }

    if star_alleles.is_empty() {
        return DiplotypeCall {
            diplotype: "*1/*1".to_string(),
            method: DiplotypeMethod::NoStarAllelesFound,
        };
    }

    let (allele1, allele2) = if star_alleles.len() >= 2 {
        star_alleles.sort();
        (star_alleles[0].clone(), star_alleles[1].clone())
    } else {
        // Single variant allele pairs with wildtype
        ("*1".to_string(), star_alleles[0].clone())
    };

    DiplotypeCall {
        diplotype: format!(
            "{}/{}",
            normalize_allele(&allele1),
            normalize_allele(&allele2)
        ),
        method: DiplotypeMethod::VariantBased,
    }
}

/// Prefix numeric allele labels with `*`; named alleles such as
/// `HapB3` or `D949V` are left as given.
fn normalize_allele(allele: &str) -> String {
    if allele.starts_with('*') {
        return allele.to_string();
    }
    match allele.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("*{allele}"),
        _ => allele.to_string(),
    }
}
