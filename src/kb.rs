//! CPIC-aligned pharmacogenomic knowledge base.
//!
//! Static lookup tables mapping variants to star alleles, gene+diplotype
//! pairs to metabolizer phenotypes, and drug+phenotype pairs to clinical
//! interaction profiles. Tables are built once and only read afterwards,
//! so concurrent lookups need no synchronization.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::types::{Drug, Gene, Phenotype, RiskLabel, Severity};

/// Annotation for a single known pharmacogenomic variant
#[derive(Debug, Clone, Copy)]
pub struct VariantAnnotation {
    pub gene: Gene,
    pub star_allele: &'static str,
    pub effect: &'static str,
    pub description: &'static str,
}

/// Static interaction entry for a (drug, phenotype) pair
#[derive(Debug, Clone, Copy)]
struct InteractionEntry {
    risk_label: RiskLabel,
    severity: Severity,
    recommendation: &'static str,
    dosing_guideline: &'static str,
    cpic_level: &'static str,
}

struct DrugEntry {
    gene: Gene,
    mechanism: &'static str,
    interactions: HashMap<Phenotype, InteractionEntry>,
}

/// Resolved interaction profile returned to callers
#[derive(Debug, Clone)]
pub struct DrugInteraction {
    pub risk_label: RiskLabel,
    pub severity: Severity,
    pub recommendation: String,
    pub dosing_guideline: String,
    pub cpic_level: String,
    pub mechanism: String,
}

lazy_static! {
    static ref VARIANT_DATABASE: HashMap<&'static str, VariantAnnotation> = {
        let mut m = HashMap::new();
        // CYP2D6
        m.insert("rs3892097", VariantAnnotation {
            gene: Gene::Cyp2d6,
            star_allele: "*4",
            effect: "non-functional",
            description: "Splicing defect leading to non-functional enzyme. Most common loss-of-function variant in Caucasians.",
        });
        m.insert("rs5030655", VariantAnnotation {
            gene: Gene::Cyp2d6,
            star_allele: "*6",
            effect: "non-functional",
            description: "Single nucleotide deletion causing frameshift. Results in non-functional protein.",
        });
        m.insert("rs16947", VariantAnnotation {
            gene: Gene::Cyp2d6,
            star_allele: "*2",
            effect: "functional",
            description: "Normal function variant with amino acid change R296C.",
        });
        m.insert("rs1065852", VariantAnnotation {
            gene: Gene::Cyp2d6,
            star_allele: "*10",
            effect: "decreased",
            description: "Decreased enzyme activity. Common in East Asian populations.",
        });
        m.insert("rs28371725", VariantAnnotation {
            gene: Gene::Cyp2d6,
            star_allele: "*41",
            effect: "decreased",
            description: "Decreased expression due to splicing defect.",
        });
        m.insert("rs35742686", VariantAnnotation {
            gene: Gene::Cyp2d6,
            star_allele: "*3",
            effect: "non-functional",
            description: "Frameshift mutation resulting in non-functional enzyme.",
        });
        m.insert("rs1135840", VariantAnnotation {
            gene: Gene::Cyp2d6,
            star_allele: "*2",
            effect: "functional",
            description: "Normal function variant S486T.",
        });
        // CYP2C19
        m.insert("rs4244285", VariantAnnotation {
            gene: Gene::Cyp2c19,
            star_allele: "*2",
            effect: "non-functional",
            description: "Aberrant splice site leading to non-functional enzyme. Most common loss-of-function allele.",
        });
        m.insert("rs4986893", VariantAnnotation {
            gene: Gene::Cyp2c19,
            star_allele: "*3",
            effect: "non-functional",
            description: "Premature stop codon (W212X). Common in Asian populations.",
        });
        m.insert("rs12248560", VariantAnnotation {
            gene: Gene::Cyp2c19,
            star_allele: "*17",
            effect: "increased",
            description: "Increased transcription leading to ultra-rapid metabolism.",
        });
        m.insert("rs28399504", VariantAnnotation {
            gene: Gene::Cyp2c19,
            star_allele: "*4",
            effect: "non-functional",
            description: "Loss-of-function variant affecting enzyme activity.",
        });
        // CYP2C9
        m.insert("rs1799853", VariantAnnotation {
            gene: Gene::Cyp2c9,
            star_allele: "*2",
            effect: "decreased",
            description: "R144C amino acid change causing ~30% reduced activity. Affects warfarin metabolism.",
        });
        m.insert("rs1057910", VariantAnnotation {
            gene: Gene::Cyp2c9,
            star_allele: "*3",
            effect: "decreased",
            description: "I359L amino acid change causing ~80% reduced activity. Major impact on warfarin dosing.",
        });
        m.insert("rs28371686", VariantAnnotation {
            gene: Gene::Cyp2c9,
            star_allele: "*5",
            effect: "decreased",
            description: "D360E substitution with decreased enzyme activity.",
        });
        // SLCO1B1
        m.insert("rs4149056", VariantAnnotation {
            gene: Gene::Slco1b1,
            star_allele: "*5",
            effect: "decreased_transport",
            description: "V174A substitution decreasing hepatic uptake of statins. Major risk factor for simvastatin-induced myopathy.",
        });
        m.insert("rs2306283", VariantAnnotation {
            gene: Gene::Slco1b1,
            star_allele: "*1b",
            effect: "normal",
            description: "Normal function transporter variant N130D.",
        });
        m.insert("rs4149015", VariantAnnotation {
            gene: Gene::Slco1b1,
            star_allele: "*15",
            effect: "decreased_transport",
            description: "Significantly decreased transporter function.",
        });
        // TPMT
        m.insert("rs1800462", VariantAnnotation {
            gene: Gene::Tpmt,
            star_allele: "*2",
            effect: "non-functional",
            description: "A80P substitution causing enzyme instability. Rare but severe impact on thiopurine metabolism.",
        });
        m.insert("rs1800460", VariantAnnotation {
            gene: Gene::Tpmt,
            star_allele: "*3B",
            effect: "non-functional",
            description: "A154T substitution causing loss of catalytic activity.",
        });
        m.insert("rs1142345", VariantAnnotation {
            gene: Gene::Tpmt,
            star_allele: "*3C",
            effect: "non-functional",
            description: "Y240C substitution. Most common non-functional allele in East Asians and African Americans.",
        });
        // DPYD
        m.insert("rs3918290", VariantAnnotation {
            gene: Gene::Dpyd,
            star_allele: "*2A",
            effect: "non-functional",
            description: "IVS14+1G>A splice site mutation causing complete loss of DPD activity. High risk so fluoropyrimidine toxicity.",
        });
        m.insert("rs55886062", VariantAnnotation {
            gene: Gene::Dpyd,
            star_allele: "*13",
            effect: "non-functional",
            description: "I560S substitution causing loss of DPD enzyme function.",
        });
        m.insert("rs67376798", VariantAnnotation {
            gene: Gene::Dpyd,
            star_allele: "D949V",
            effect: "decreased",
            description: "D949V substitution with decreased DPD activity.",
        });
        m.insert("rs75017182", VariantAnnotation {
            gene: Gene::Dpyd,
            star_allele: "HapB3",
            effect: "decreased",
            description: "Intronic variant affecting splicing and reducing DPD activity by ~50%.",
        });
        m
    };

    static ref DIPLOTYPE_PHENOTYPES: HashMap<Gene, HashMap<&'static str, Phenotype>> = {
        use Phenotype::*;
        let mut m = HashMap::new();
        m.insert(Gene::Cyp2d6, HashMap::from([
            ("*1/*1", Nm),
            ("*1/*2", Nm),
            ("*2/*2", Nm),
            ("*1/*4", Im),
            ("*1/*10", Im),
            ("*1/*41", Im),
            ("*2/*4", Im),
            ("*2/*10", Im),
            ("*1/*3", Im),
            ("*1/*6", Im),
            ("*2/*41", Im),
            ("*4/*4", Pm),
            ("*4/*6", Pm),
            ("*3/*4", Pm),
            ("*6/*6", Pm),
            ("*4/*10", Pm),
            ("*3/*3", Pm),
            ("*3/*6", Pm),
            ("*1/*1xN", Urm),
            ("*2/*2xN", Urm),
            ("*1/*2xN", Urm),
            ("*10/*10", Pm),
            ("*41/*41", Im),
            ("*10/*41", Im),
        ]));
        m.insert(Gene::Cyp2c19, HashMap::from([
            ("*1/*1", Nm),
            ("*1/*17", Rm),
            ("*17/*17", Urm),
            ("*1/*2", Im),
            ("*1/*3", Im),
            ("*2/*17", Im),
            ("*3/*17", Im),
            ("*2/*2", Pm),
            ("*2/*3", Pm),
            ("*3/*3", Pm),
        ]));
        m.insert(Gene::Cyp2c9, HashMap::from([
            ("*1/*1", Nm),
            ("*1/*2", Im),
            ("*1/*3", Im),
            ("*1/*5", Im),
            ("*2/*2", Pm),
            ("*2/*3", Pm),
            ("*3/*3", Pm),
            ("*2/*5", Pm),
            ("*3/*5", Pm),
        ]));
        m.insert(Gene::Slco1b1, HashMap::from([
            // *1a-based wildtype entries (primary)
            ("*1a/*1a", Nm),
            ("*1a/*1b", Nm),
            ("*1b/*1b", Nm),
            ("*1a/*5", Im),
            ("*1b/*5", Im),
            ("*1a/*15", Im),
            ("*5/*5", Pm),
            ("*15/*15", Pm),
            ("*5/*15", Pm),
            // Safety net: *1-based entries (in case of fallback)
            ("*1/*1", Nm),
            ("*1/*5", Im),
            ("*1/*15", Im),
            ("*1/*1b", Nm),
        ]));
        m.insert(Gene::Tpmt, HashMap::from([
            ("*1/*1", Nm),
            ("*1/*2", Im),
            ("*1/*3A", Im),
            ("*1/*3B", Im),
            ("*1/*3C", Im),
            ("*3A/*3A", Pm),
            ("*3C/*3C", Pm),
            ("*2/*3A", Pm),
            ("*3A/*3C", Pm),
            ("*3B/*3B", Pm),
            ("*3B/*3C", Pm),
            ("*2/*3B", Pm),
            ("*2/*3C", Pm),
            ("*2/*2", Pm),
        ]));
        m.insert(Gene::Dpyd, HashMap::from([
            ("*1/*1", Nm),
            ("Normal/Normal", Nm),
            ("*1/*2A", Im),
            ("*1/*13", Im),
            ("*1/D949V", Im),
            ("*1/HapB3", Im),
            ("*2A/*2A", Pm),
            ("*13/*13", Pm),
            ("*2A/*13", Pm),
            ("*2A/D949V", Pm),
            ("D949V/D949V", Pm),
        ]));
        m
    };

    static ref DRUG_GENE_INTERACTIONS: HashMap<Drug, DrugEntry> = {
        use Phenotype::*;
        use RiskLabel::*;
        let mut m = HashMap::new();
        m.insert(Drug::Codeine, DrugEntry {
            gene: Gene::Cyp2d6,
            mechanism: "CYP2D6 converts codeine to its active metabolite morphine via O-demethylation. Variations in CYP2D6 activity directly affect the amount of morphine produced.",
            interactions: HashMap::from([
                (Urm, InteractionEntry {
                    risk_label: Toxic,
                    severity: Severity::Critical,
                    recommendation: "AVOID codeine. Ultra-rapid CYP2D6 metabolism causes excessive morphine production, risking life-threatening respiratory depression and death.",
                    dosing_guideline: "Use alternative analgesic NOT metabolized by CYP2D6 (e.g., morphine, acetaminophen, NSAIDs). Codeine is CONTRAINDICATED.",
                    cpic_level: "Strong recommendation",
                }),
                (Rm, InteractionEntry {
                    risk_label: AdjustDosage,
                    severity: Severity::Moderate,
                    recommendation: "Use codeine with caution. Rapid metabolism may increase morphine levels. Consider lower doses and close monitoring.",
                    dosing_guideline: "If codeine is necessary, use lowest effective dose. Monitor for signs of opioid toxicity. Consider alternative analgesic.",
                    cpic_level: "Moderate recommendation",
                }),
                (Nm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Standard codeine therapy is expected to produce normal morphine levels. Use at standard dosing.",
                    dosing_guideline: "Use label-recommended age-appropriate dosing.",
                    cpic_level: "Strong recommendation",
                }),
                (Im, InteractionEntry {
                    risk_label: Ineffective,
                    severity: Severity::Moderate,
                    recommendation: "Reduced codeine-to-morphine conversion. Codeine may provide insufficient pain relief.",
                    dosing_guideline: "Use alternative analgesic NOT metabolized by CYP2D6 (e.g., morphine, acetaminophen, NSAIDs). If codeine is used, monitor for adequate pain control.",
                    cpic_level: "Moderate recommendation",
                }),
                (Pm, InteractionEntry {
                    risk_label: Ineffective,
                    severity: Severity::High,
                    recommendation: "AVOID codeine. No CYP2D6-mediated conversion to morphine. Codeine will provide NO analgesic effect.",
                    dosing_guideline: "Use alternative analgesic NOT metabolized by CYP2D6 (e.g., morphine for pain). Codeine is INEFFECTIVE in poor metabolizers.",
                    cpic_level: "Strong recommendation",
                }),
            ]),
        });
        m.insert(Drug::Clopidogrel, DrugEntry {
            gene: Gene::Cyp2c19,
            mechanism: "CYP2C19 bioactivates clopidogrel (a prodrug) into its active thiol metabolite. Without adequate CYP2C19 activity, clopidogrel cannot inhibit platelet aggregation.",
            interactions: HashMap::from([
                (Urm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Enhanced clopidogrel activation. Standard dosing is expected to be effective with potentially increased antiplatelet effect.",
                    dosing_guideline: "Use label-recommended dosing. Monitor for signs of increased bleeding risk.",
                    cpic_level: "Moderate recommendation",
                }),
                (Rm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Standard clopidogrel therapy expected to be effective.",
                    dosing_guideline: "Use label-recommended dosing.",
                    cpic_level: "Strong recommendation",
                }),
                (Nm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Standard clopidogrel therapy expected to be effective with normal antiplatelet response.",
                    dosing_guideline: "Use label-recommended dosing.",
                    cpic_level: "Strong recommendation",
                }),
                (Im, InteractionEntry {
                    risk_label: AdjustDosage,
                    severity: Severity::High,
                    recommendation: "Reduced clopidogrel activation. Increased risk of cardiovascular events due to inadequate platelet inhibition.",
                    dosing_guideline: "Consider alternative antiplatelet therapy (e.g., prasugrel, ticagrelor) if no contraindications. If clopidogrel is used, consider higher loading doses with platelet function testing.",
                    cpic_level: "Strong recommendation",
                }),
                (Pm, InteractionEntry {
                    risk_label: Ineffective,
                    severity: Severity::Critical,
                    recommendation: "AVOID clopidogrel. Significantly reduced or absent bioactivation results in minimal antiplatelet effect. High risk of stent thrombosis and cardiovascular events.",
                    dosing_guideline: "Use alternative antiplatelet therapy (e.g., prasugrel, ticagrelor). Clopidogrel is CONTRAINDICATED in CYP2C19 poor metabolizers.",
                    cpic_level: "Strong recommendation",
                }),
            ]),
        });
        m.insert(Drug::Warfarin, DrugEntry {
            gene: Gene::Cyp2c9,
            mechanism: "CYP2C9 is the primary enzyme responsible for metabolizing the more potent S-warfarin enantiomer. Reduced CYP2C9 activity leads to decreased warfarin clearance and increased bleeding risk.",
            interactions: HashMap::from([
                (Nm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Standard warfarin metabolism expected. Use standard dosing algorithm with INR monitoring.",
                    dosing_guideline: "Initiate warfarin per clinical protocol with standard INR monitoring. Consider pharmacogenomic-guided dosing algorithms (e.g., warfarindosing.org).",
                    cpic_level: "Strong recommendation",
                }),
                (Im, InteractionEntry {
                    risk_label: AdjustDosage,
                    severity: Severity::High,
                    recommendation: "Reduced warfarin metabolism. Requires lower doses to achieve therapeutic INR. Higher bleeding risk at standard doses.",
                    dosing_guideline: "Reduce initial dose by 25-50% per CPIC guidelines. Monitor INR more frequently. Consider pharmacogenomic dosing calculator.",
                    cpic_level: "Strong recommendation",
                }),
                (Pm, InteractionEntry {
                    risk_label: Toxic,
                    severity: Severity::Critical,
                    recommendation: "Severely impaired warfarin metabolism. Standard doses cause supratherapeutic INR and high risk of major bleeding including intracranial hemorrhage.",
                    dosing_guideline: "Reduce initial dose by 50-80%. Increase INR monitoring frequency to every 1-3 days initially. Consider alternative anticoagulant (e.g., DOAC).",
                    cpic_level: "Strong recommendation",
                }),
            ]),
        });
        m.insert(Drug::Simvastatin, DrugEntry {
            gene: Gene::Slco1b1,
            mechanism: "SLCO1B1 encodes the hepatic uptake transporter OATP1B1, which facilitates statin entry into hepatocytes. Reduced SLCO1B1 function increases systemic statin exposure, raising myopathy risk.",
            interactions: HashMap::from([
                (Nm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Normal hepatic statin uptake. Standard simvastatin dosing is appropriate.",
                    dosing_guideline: "Use label-recommended dosing (up to 40mg/day). Monitor for muscle symptoms.",
                    cpic_level: "Strong recommendation",
                }),
                (Im, InteractionEntry {
                    risk_label: AdjustDosage,
                    severity: Severity::High,
                    recommendation: "Decreased hepatic statin uptake increases systemic exposure. Elevated risk for simvastatin-induced myopathy.",
                    dosing_guideline: "Limit simvastatin to 20mg/day or consider alternative statin (pravastatin, rosuvastatin). Avoid simvastatin 80mg. Monitor CK levels.",
                    cpic_level: "Strong recommendation",
                }),
                (Pm, InteractionEntry {
                    risk_label: Toxic,
                    severity: Severity::Critical,
                    recommendation: "Markedly increased systemic simvastatin exposure. HIGH risk of myopathy and rhabdomyolysis.",
                    dosing_guideline: "AVOID simvastatin. Use alternative statin with lower myopathy risk (pravastatin, rosuvastatin) at lowest effective dose. Monitor CK levels regularly.",
                    cpic_level: "Strong recommendation",
                }),
            ]),
        });
        m.insert(Drug::Azathioprine, DrugEntry {
            gene: Gene::Tpmt,
            mechanism: "TPMT methylates thiopurine drugs (azathioprine → 6-MP). Reduced TPMT activity leads to accumulation of cytotoxic thioguanine nucleotides (TGN), causing severe and potentially fatal myelosuppression.",
            interactions: HashMap::from([
                (Nm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Normal TPMT activity. Standard azathioprine dosing with routine monitoring.",
                    dosing_guideline: "Use standard starting dose (2-3 mg/kg/day). Monitor CBC weekly for first month, then monthly.",
                    cpic_level: "Strong recommendation",
                }),
                (Im, InteractionEntry {
                    risk_label: AdjustDosage,
                    severity: Severity::High,
                    recommendation: "Intermediate TPMT activity leads to increased TGN accumulation. Moderate risk of myelosuppression at standard doses.",
                    dosing_guideline: "Reduce starting dose to 30-70% of standard dose. Monitor CBC more frequently (weekly for 2-3 months). Titrate based on tolerance.",
                    cpic_level: "Strong recommendation",
                }),
                (Pm, InteractionEntry {
                    risk_label: Toxic,
                    severity: Severity::Critical,
                    recommendation: "Absent TPMT activity causes extreme TGN accumulation. LIFE-THREATENING myelosuppression (pancytopenia) at standard doses.",
                    dosing_guideline: "Drastically reduce dose to 10% of standard dose (3x weekly instead of daily) OR consider alternative immunosuppressant. MANDATORY frequent CBC monitoring (weekly).",
                    cpic_level: "Strong recommendation",
                }),
            ]),
        });
        m.insert(Drug::Fluorouracil, DrugEntry {
            gene: Gene::Dpyd,
            mechanism: "DPYD encodes dihydropyrimidine dehydrogenase (DPD), the rate-limiting enzyme for fluoropyrimidine catabolism. DPD deficiency causes accumulation of 5-FU, leading to severe and potentially fatal toxicity.",
            interactions: HashMap::from([
                (Nm, InteractionEntry {
                    risk_label: Safe,
                    severity: Severity::None,
                    recommendation: "Normal DPD activity. Standard fluorouracil dosing with routine monitoring.",
                    dosing_guideline: "Use standard dosing per treatment protocol. Monitor for toxicity per clinical guidelines.",
                    cpic_level: "Strong recommendation",
                }),
                (Im, InteractionEntry {
                    risk_label: AdjustDosage,
                    severity: Severity::High,
                    recommendation: "Partial DPD deficiency increases fluorouracil exposure. Elevated risk of severe toxicity including mucositis, diarrhea, and neutropenia.",
                    dosing_guideline: "Reduce starting dose by 25-50% based on specific DPYD variant activity score. Titrate dose based on clinical tolerance and therapeutic drug monitoring if available.",
                    cpic_level: "Strong recommendation",
                }),
                (Pm, InteractionEntry {
                    risk_label: Toxic,
                    severity: Severity::Critical,
                    recommendation: "Complete or near-complete DPD deficiency. LIFE-THREATENING toxicity expected: severe neutropenia, mucositis, hand-foot syndrome, neurotoxicity. Potentially FATAL.",
                    dosing_guideline: "AVOID fluorouracil and all fluoropyrimidines (capecitabine). Use alternative chemotherapy agents. If fluoropyrimidine is essential, reduce dose by ≥75% with intensive monitoring.",
                    cpic_level: "Strong recommendation",
                }),
            ]),
        });
        m
    };

    static ref MONITORING: HashMap<Drug, HashMap<Phenotype, &'static str>> = {
        use Phenotype::*;
        let mut m = HashMap::new();
        m.insert(Drug::Codeine, HashMap::from([
            (Pm, "Monitor for inadequate pain relief. Consider pain scoring."),
            (Im, "Monitor pain control efficacy."),
            (Urm, "Monitor for respiratory depression, sedation, and signs of opioid toxicity."),
            (Nm, "Standard monitoring."),
            (Rm, "Monitor for signs of increased opioid effect."),
        ]));
        m.insert(Drug::Clopidogrel, HashMap::from([
            (Pm, "Monitor platelet function. Consider VerifyNow P2Y12 assay."),
            (Im, "Monitor platelet reactivity. Consider platelet function testing."),
            (Nm, "Standard monitoring."),
            (Rm, "Standard monitoring."),
            (Urm, "Monitor for bleeding."),
        ]));
        m.insert(Drug::Warfarin, HashMap::from([
            (Pm, "INR monitoring every 1-3 days initially. Watch for bleeding signs."),
            (Im, "INR monitoring twice weekly initially. Adjust dose to target INR 2-3."),
            (Nm, "Standard INR monitoring per protocol."),
        ]));
        m.insert(Drug::Simvastatin, HashMap::from([
            (Pm, "Monitor CK levels every 2-4 weeks. Report any muscle pain immediately."),
            (Im, "Monitor CK levels. Report muscle symptoms."),
            (Nm, "Standard lipid panel monitoring."),
        ]));
        m.insert(Drug::Azathioprine, HashMap::from([
            (Pm, "CBC with differential WEEKLY. Monitor for signs of infection."),
            (Im, "CBC weekly for first 2-3 months, then monthly."),
            (Nm, "CBC monthly after initial weekly monitoring."),
        ]));
        m.insert(Drug::Fluorouracil, HashMap::from([
            (Pm, "INTENSIVE monitoring: CBC, hepatic/renal function. Watch for mucositis, diarrhea, hand-foot syndrome."),
            (Im, "Enhanced monitoring of CBC and toxicity signs."),
            (Nm, "Standard chemotherapy monitoring protocol."),
        ]));
        m
    };

    static ref ALTERNATIVES: HashMap<Drug, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert(Drug::Codeine, vec![
            "Morphine (direct agonist)",
            "Acetaminophen",
            "NSAIDs (ibuprofen)",
            "Tramadol (caution — also CYP2D6)",
        ]);
        m.insert(Drug::Clopidogrel, vec!["Prasugrel", "Ticagrelor"]);
        m.insert(Drug::Warfarin, vec![
            "Apixaban (Eliquis)",
            "Rivaroxaban (Xarelto)",
            "Dabigatran (Pradaxa)",
        ]);
        m.insert(Drug::Simvastatin, vec!["Pravastatin", "Rosuvastatin", "Fluvastatin"]);
        m.insert(Drug::Azathioprine, vec![
            "Mycophenolate mofetil",
            "Methotrexate (with monitoring)",
        ]);
        m.insert(Drug::Fluorouracil, vec![
            "Alternative chemotherapy per oncology consult",
        ]);
        m
    };
}

/// Primary gene governing a drug's metabolism, or None for unsupported drugs
pub fn gene_for_drug(drug_name: &str) -> Option<Gene> {
    let drug = Drug::from_name(drug_name)?;
    Some(primary_gene(drug))
}

pub fn primary_gene(drug: Drug) -> Gene {
    DRUG_GENE_INTERACTIONS[&drug].gene
}

/// Phenotype for a (gene, diplotype) pair; Unknown when no table entry exists
pub fn phenotype_for(gene: Gene, diplotype: &str) -> Phenotype {
    DIPLOTYPE_PHENOTYPES
        .get(&gene)
        .and_then(|table| table.get(diplotype))
        .copied()
        .unwrap_or(Phenotype::Unknown)
}

/// Interaction profile for a (drug, phenotype) pair.
///
/// Phenotypes without a curated entry get a generic low-severity profile
/// rather than an error, so every supported drug resolves to something.
pub fn interaction_for(drug: Drug, phenotype: Phenotype) -> DrugInteraction {
    let entry = &DRUG_GENE_INTERACTIONS[&drug];
    match entry.interactions.get(&phenotype) {
        Some(i) => DrugInteraction {
            risk_label: i.risk_label,
            severity: i.severity,
            recommendation: i.recommendation.to_string(),
            dosing_guideline: i.dosing_guideline.to_string(),
            cpic_level: i.cpic_level.to_string(),
            mechanism: entry.mechanism.to_string(),
        },
        None => DrugInteraction {
            risk_label: RiskLabel::Unknown,
            severity: Severity::Low,
            recommendation: format!(
                "Insufficient data to determine {} risk for {} phenotype. Consult clinical pharmacogenomics specialist.",
                drug,
                phenotype.display_name()
            ),
            dosing_guideline: "Use standard dosing with enhanced monitoring. Consider specialist consultation."
                .to_string(),
            cpic_level: "No recommendation".to_string(),
            mechanism: entry.mechanism.to_string(),
        },
    }
}

/// Annotation for a known rsID, or None
pub fn variant_info(rsid: &str) -> Option<&'static VariantAnnotation> {
    VARIANT_DATABASE.get(rsid)
}

/// Monitoring recommendation text for a (drug, phenotype) pair
pub fn monitoring_for(drug: Drug, phenotype: Phenotype) -> &'static str {
    MONITORING
        .get(&drug)
        .and_then(|table| table.get(&phenotype))
        .copied()
        .unwrap_or("Standard clinical monitoring recommended.")
}

/// Alternative drug suggestions; empty for normal/rapid metabolizers
pub fn alternative_drugs(drug: Drug, phenotype: Phenotype) -> Vec<String> {
    if !phenotype.needs_alternatives() {
        return Vec::new();
    }
    ALTERNATIVES
        .get(&drug)
        .map(|alts| alts.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}
