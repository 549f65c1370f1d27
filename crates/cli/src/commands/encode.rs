//! Commande d'encodage

use crate::{create_progress_bar, create_spinner, OligoFormat, Strategy};
use anyhow::{Context, Result};
use molfs_core::{
    encode_file, split_blocks, DistributionStrategy, MirrorAll, PrimerPair, PrimerRegistry,
    RoundRobin, SinglePool, CORE_NT, RECOMMENDED_PRIMER_NT,
};
use molfs_io::{write_csv, write_fastq, FileManifest};
use std::fs::File;
use std::path::PathBuf;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    block_size: usize,
    strategy: Strategy,
    pools: u32,
    seed: u64,
    format: OligoFormat,
) -> Result<()> {
    println!("🧬 Encodage de: {}", input.display());

    // 1. Lire le fichier
    let spinner = create_spinner("Lecture du fichier...");
    let data = std::fs::read(&input)
        .with_context(|| format!("lecture de {}", input.display()))?;
    spinner.finish_with_message(format!("Fichier lu ({} octets)", data.len()));

    // 2. Construire la stratégie et le registre de primers
    let pool_ids: Vec<u32> = (1..=pools.max(1)).collect();
    let strategy: Box<dyn DistributionStrategy> = match strategy {
        Strategy::Single => Box::new(SinglePool(pool_ids[0])),
        Strategy::RoundRobin => Box::new(RoundRobin(pool_ids)),
        Strategy::MirrorAll => Box::new(MirrorAll(pool_ids)),
    };

    let blocks = split_blocks(&data, block_size)?;
    let total_blocks = blocks.len() as u32;

    let mut registry = PrimerRegistry::new();
    for (index, _) in &blocks {
        for pool in strategy.pools_for(*index, total_blocks) {
            registry.register(
                pool,
                *index,
                PrimerPair::synthesize(pool, *index, RECOMMENDED_PRIMER_NT, seed),
            );
        }
    }

    // 3. Encoder
    let pb = create_progress_bar(total_blocks as u64, "Encodage des blocs...");
    let encoded = encode_file(&registry, &data, block_size, strategy.as_ref())?;
    pb.finish_with_message(format!("{} ensembles d'oligos générés", encoded.len()));

    // 4. Écrire les conteneurs
    std::fs::create_dir_all(&output)?;

    let spinner = create_spinner("Écriture des conteneurs...");
    let mut total_oligos = 0usize;
    for block in &encoded {
        let name = format!(
            "pool{:03}_block{:05}.{}",
            block.metadata.pool_id,
            block.metadata.block_index,
            format.extension()
        );
        let mut file = File::create(output.join(&name))?;
        match format {
            OligoFormat::Csv => write_csv(&mut file, &block.oligos)?,
            OligoFormat::Fastq => write_fastq(&mut file, &block.oligos)?,
        }
        total_oligos += block.oligos.len();
    }
    spinner.finish_with_message(format!("{} conteneurs écrits", encoded.len()));

    // 5. Écrire le manifeste (seule trace des longueurs d'origine)
    let manifest = FileManifest::new(
        input
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("input")
            .to_string(),
        &data,
        block_size,
        total_blocks,
        encoded.iter().map(|b| b.metadata.clone()).collect(),
        &registry,
    );
    manifest.save(output.join("manifest.json"))?;

    // 6. Statistiques
    println!("\n📊 Statistiques:");
    println!("   Blocs: {}", total_blocks);
    println!("   Ensembles (pool, bloc): {}", encoded.len());
    println!("   Oligos générés: {}", total_oligos);
    println!(
        "   Nucléotides: {}",
        total_oligos * (2 * RECOMMENDED_PRIMER_NT + CORE_NT)
    );

    println!("\n✅ Encodage terminé!");

    Ok(())
}
