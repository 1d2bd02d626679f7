use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{generate, Shell};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

mod analysis;
mod diplotype;
mod kb;
mod output;
mod parsers;
mod types;

use analysis::RiskEvaluator;
use output::ReportGenerator;
use parsers::{read_variant_file, VcfParser};
use types::Drug;

/// Pharmacogenomic drug risk assessment from VCF variant data
#[derive(Parser, Debug)]
#[command(
    name = "pgx-risk",
    version,
    about = "Assess drug risk from a patient's genomic variant file",
    long_about = r#"
Parses a VCF file, resolves the patient's diplotype for each drug's
primary metabolizing gene, and emits a CPIC-aligned risk verdict with
confidence score, clinical recommendation and monitoring guidance.

Supported drugs: codeine, clopidogrel, warfarin, simvastatin,
azathioprine, fluorouracil.
"#
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Patient VCF file (.vcf or .vcf.gz)
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    patient: Option<PathBuf>,

    /// Drugs to assess (default: all six supported drugs)
    #[arg(short, long, value_enum, num_args = 1..)]
    drug: Vec<Drug>,

    /// Number of threads (0 = auto-detect)
    #[arg(short, long, default_value = "0")]
    threads: usize,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output directory for reports
    #[arg(short, long, default_value = "./reports")]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions { shell: Shell },
    /// List supported drugs and their primary genes
    Drugs,
    /// Validate a VCF file without running the analysis
    Validate { file: PathBuf },
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
    Html,
    All,
}

impl From<OutputFormat> for output::ReportFormat {
    fn from(format: OutputFormat) -> output::ReportFormat {
        match format {
            OutputFormat::Json => output::ReportFormat::Json,
            OutputFormat::Csv => output::ReportFormat::Csv,
            OutputFormat::Tsv => output::ReportFormat::Tsv,
            OutputFormat::Html => output::ReportFormat::Html,
            OutputFormat::All => output::ReportFormat::All,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            return Ok(());
        }
        Some(Commands::Drugs) => {
            list_drugs();
            return Ok(());
        }
        Some(Commands::Validate { ref file }) => {
            init_logging(cli.verbose);
            return validate_file(file);
        }
        None => {}
    }

    init_logging(cli.verbose);
    init_thread_pool(cli.threads)?;

    let Some(vcf_path) = cli.patient.clone() else {
        bail!("No VCF file given; use --patient <FILE>");
    };

    let drugs = if cli.drug.is_empty() {
        Drug::ALL.to_vec()
    } else {
        cli.drug.clone()
    };

    info!("Starting pharmacogenomic risk analysis...");
    info!("Using {} threads", rayon::current_num_threads());

    run_analysis(&vcf_path, &drugs, cli.format, &cli.output)
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn list_drugs() {
    println!("{}", style("Supported Drugs:").bold().cyan());
    println!();
    for drug in Drug::ALL {
        let gene = kb::primary_gene(drug);
        println!(
            "  {} - primary gene {}",
            style(drug.as_str()).green().bold(),
            style(gene.as_str()).yellow()
        );
    }
}

fn validate_file(path: &Path) -> Result<()> {
    let content = read_variant_file(path)?;
    let report = VcfParser::new().validate(&content);

    if report.valid {
        println!(
            "{} {} is a valid VCF file",
            style("✓").green(),
            path.display()
        );
        Ok(())
    } else {
        for error in &report.errors {
            println!("  {} {}", style("✗").red(), error);
        }
        bail!("{} failed validation", path.display());
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("pgx_risk={}", level))
        .init();
}

fn init_thread_pool(threads: usize) -> Result<()> {
    let num_threads = if threads == 0 {
        num_cpus::get()
    } else {
        threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| anyhow::anyhow!("Failed to initialize thread pool: {}", e))?;

    Ok(())
}

fn run_analysis(
    vcf_path: &Path,
    drugs: &[Drug],
    format: OutputFormat,
    output_dir: &Path,
) -> Result<()> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")?
            .progress_chars("#>-"),
    );

    // Step 1: Load and validate
    pb.set_message("Validating variant file...");
    let content = read_variant_file(vcf_path)?;
    let parser = VcfParser::new();
    let validation = parser.validate(&content);
    if !validation.valid {
        pb.finish_and_clear();
        for error in &validation.errors {
            eprintln!("  {} {}", style("✗").red(), error);
        }
        bail!("{} failed validation", vcf_path.display());
    }
    pb.set_position(10);

    // Step 2: Parse
    pb.set_message("Parsing variant file...");
    let parsed = parser.parse(&content);
    pb.set_position(30);

    info!(
        "Parsed {} variants, {} pharmacogenomically relevant",
        parsed.variants.len(),
        parsed.pharmacogenomic_variants.len()
    );
    for error in &parsed.errors {
        eprintln!("  {} {}", style("!").yellow(), error);
    }

    // Step 3: Evaluate drugs in parallel
    pb.set_message("Assessing drug risks...");
    let results = RiskEvaluator::new().predict_all(&parsed, drugs);
    pb.set_position(70);

    // Step 4: Generate reports
    pb.set_message("Generating reports...");
    let generator = ReportGenerator::new(output_dir)?;
    let written = generator.generate(&results, format.into())?;
    pb.set_position(100);
    pb.finish_with_message("Analysis complete!");

    println!();
    for result in &results {
        let label = result.risk_assessment.risk_label.as_str();
        let styled = match label {
            "Safe" => style(label).green(),
            "Adjust Dosage" => style(label).yellow(),
            "Toxic" | "Ineffective" => style(label).red().bold(),
            _ => style(label).dim(),
        };
        println!(
            "  {:<14} {} ({} {}, confidence {:.2})",
            result.drug,
            styled,
            result.pharmacogenomic_profile.diplotype,
            result.pharmacogenomic_profile.phenotype,
            result.risk_assessment.confidence_score
        );
    }

    println!();
    for path in written {
        println!(
            "{} Report saved to: {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    }

    Ok(())
}
