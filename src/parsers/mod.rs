use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

mod vcf;

pub use vcf::{ParsedVcf, ValidationReport, VcfMetadata, VcfParser};

/// Read a variant file into memory, transparently decompressing gzip.
/// Detection is by magic bytes rather than extension so `.vcf.gz`
/// renamed to `.vcf` still loads.
pub fn read_variant_file(path: &Path) -> Result<String> {
    let mut raw = Vec::new();
    File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .read_to_end(&mut raw)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut content = String::new();
    if raw.starts_with(&[0x1f, 0x8b]) {
        GzDecoder::new(&raw[..])
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to decompress {}", path.display()))?;
    } else {
        content = String::from_utf8(raw)
            .with_context(|| format!("{} is not valid UTF-8 text", path.display()))?;
    }
    Ok(content)
}
