//! Sous-commandes du CLI

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod simulate;

use anyhow::{Context, Result};
use molfs_io::{read_csv, read_fastq};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Lit tous les conteneurs d'oligos d'un répertoire (csv, fastq, fq)
///
/// Les fichiers sont parcourus en ordre de nom pour garder le décodage
/// déterministe (le départage des doublons est premier-rencontré).
pub fn read_oligo_containers(dir: &Path) -> Result<Vec<String>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("lecture du répertoire {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("csv") | Some("fastq") | Some("fq")
            )
        })
        .collect();
    paths.sort();

    let mut oligos = Vec::new();
    for path in paths {
        let file = File::open(&path)
            .with_context(|| format!("ouverture de {}", path.display()))?;

        let mut read = match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => read_csv(BufReader::new(file))?,
            _ => read_fastq(file)?,
        };
        oligos.append(&mut read);
    }

    Ok(oligos)
}
