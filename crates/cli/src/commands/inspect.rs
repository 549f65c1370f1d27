//! Commande d'inspection des conteneurs

use crate::commands::read_oligo_containers;
use anyhow::{Context, Result};
use molfs_core::decode_collection;
use molfs_io::FileManifest;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ManifestRow {
    #[tabled(rename = "Pool")]
    pool: u32,
    #[tabled(rename = "Bloc")]
    block: u32,
    #[tabled(rename = "Oligos attendus")]
    expected: usize,
    #[tabled(rename = "Longueur (octets)")]
    length: usize,
    #[tabled(rename = "CRC valides")]
    crc_valid: usize,
    #[tabled(rename = "CRC invalides")]
    crc_invalid: usize,
    #[tabled(rename = "Adresses manquantes")]
    missing: usize,
}

pub fn run(input: PathBuf) -> Result<()> {
    let manifest_path = input.join("manifest.json");
    let manifest = FileManifest::load(&manifest_path)
        .with_context(|| format!("chargement du manifeste {}", manifest_path.display()))?;

    println!("🧬 Fichier: {}", manifest.original_file);
    println!("   Longueur: {} octets", manifest.file_length);
    println!("   Taille de bloc: {} octets", manifest.block_size);
    println!("   Blocs: {}", manifest.total_blocks);
    println!("   Encodé le: {}", manifest.created_at);
    println!("   SHA-256: {}", manifest.checksum);

    let registry = manifest.registry();
    let lengths = manifest.block_lengths();
    let oligos = read_oligo_containers(&input)?;
    let collection = decode_collection(&registry, &oligos, &lengths);

    let rows: Vec<ManifestRow> = manifest
        .blocks
        .iter()
        .map(|meta| {
            let decoded = collection
                .blocks
                .iter()
                .find(|b| b.pool == meta.pool_id && b.block == meta.block_index);

            ManifestRow {
                pool: meta.pool_id,
                block: meta.block_index,
                expected: meta.num_oligos,
                length: meta.original_block_length_bytes,
                crc_valid: decoded.map_or(0, |b| b.stats.crc_valid),
                crc_invalid: decoded.map_or(0, |b| b.stats.crc_invalid),
                missing: decoded.map_or(meta.num_oligos, |b| b.stats.missing_addresses.len()),
            }
        })
        .collect();

    println!("\n{}", Table::new(rows).with(Style::modern()));
    println!("   Séquences inclassables: {}", collection.unclassified);

    Ok(())
}
