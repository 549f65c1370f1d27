//! Commande de décodage

use crate::commands::read_oligo_containers;
use crate::create_spinner;
use crate::display::stats::print_block_table;
use anyhow::{Context, Result};
use console::style;
use molfs_core::{decode_collection, reassemble};
use molfs_io::FileManifest;
use std::path::PathBuf;

pub fn run(input: PathBuf, output: PathBuf, manifest: Option<PathBuf>) -> Result<()> {
    println!("🧬 Décodage de: {}", input.display());

    // 1. Charger le manifeste
    let manifest_path = manifest.unwrap_or_else(|| input.join("manifest.json"));
    let manifest = FileManifest::load(&manifest_path)
        .with_context(|| format!("chargement du manifeste {}", manifest_path.display()))?;

    let registry = manifest.registry();
    let lengths = manifest.block_lengths();

    // 2. Lire les conteneurs
    let spinner = create_spinner("Lecture des conteneurs...");
    let oligos = read_oligo_containers(&input)?;
    spinner.finish_with_message(format!("{} séquences lues", oligos.len()));

    // 3. Décoder et réassembler
    let spinner = create_spinner("Décodage...");
    let collection = decode_collection(&registry, &oligos, &lengths);
    let mut report = reassemble(
        &collection.blocks,
        Some(manifest.total_blocks),
        manifest.block_size,
        Some(manifest.file_length as usize),
    )?;
    report.stats.unclassified += collection.unclassified;
    spinner.finish_with_message(format!("Données récupérées ({} octets)", report.data.len()));

    // 4. Écrire le fichier de sortie
    std::fs::write(&output, &report.data)?;
    println!("   Fichier écrit: {}", output.display());

    // 5. État par bloc
    print_block_table(&collection.blocks);

    if report.stats.unclassified > 0 {
        println!(
            "   {} séquences inclassables ignorées",
            report.stats.unclassified
        );
    }

    // 6. Intégrité
    if manifest.verify_checksum(&report.data) {
        println!("{}", style("✅ Checksum SHA-256 vérifié").green());
    } else {
        println!("{}", style("⚠️  Checksum SHA-256 divergent").yellow());
    }

    if !report.missing_blocks.is_empty() {
        println!(
            "{}",
            style(format!(
                "⚠️  Blocs comblés par des zéros: {:?}",
                report.missing_blocks
            ))
            .yellow()
        );
        report.ensure_complete()?;
    }

    println!("\n✅ Décodage terminé!");

    Ok(())
}
