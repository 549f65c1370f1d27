//! Commande de simulation de canal bruité

use crate::commands::read_oligo_containers;
use crate::create_spinner;
use crate::display::stats::print_block_table;
use anyhow::Result;
use console::style;
use molfs_core::{decode_collection, reassemble};
use molfs_io::FileManifest;
use molfs_simulation::{ErrorModel, NoisyChannel};
use std::path::PathBuf;

pub fn run(
    input: PathBuf,
    substitution_rate: f64,
    insertion_rate: f64,
    deletion_rate: f64,
    seed: u64,
) -> Result<()> {
    println!("🧬 Simulation de canal sur: {}", input.display());

    let model = ErrorModel::new(substitution_rate, insertion_rate, deletion_rate).with_seed(seed);
    if !model.is_valid() {
        anyhow::bail!("modèle d'erreur invalide (taux cumulé ≥ 1.0)");
    }

    // 1. Lire les conteneurs
    let spinner = create_spinner("Lecture des conteneurs...");
    let oligos = read_oligo_containers(&input)?;
    spinner.finish_with_message(format!("{} oligos lus", oligos.len()));

    // 2. Traverser le canal bruité
    let spinner = create_spinner("Transmission...");
    let (received, metrics) = NoisyChannel::new(model).transmit(&oligos);
    spinner.finish_with_message("Transmission terminée");

    println!("\n{}", metrics.format_table());

    // 3. Tenter la récupération si le manifeste est présent
    let manifest_path = input.join("manifest.json");
    if !manifest_path.exists() {
        println!("   (pas de manifeste: récupération non évaluée)");
        return Ok(());
    }

    let manifest = FileManifest::load(&manifest_path)?;
    let registry = manifest.registry();
    let lengths = manifest.block_lengths();

    let collection = decode_collection(&registry, &received, &lengths);
    let report = reassemble(
        &collection.blocks,
        Some(manifest.total_blocks),
        manifest.block_size,
        Some(manifest.file_length as usize),
    )?;

    print_block_table(&collection.blocks);
    println!("   Séquences inclassables: {}", collection.unclassified);
    println!("   Blocs manquants: {}", report.missing_blocks.len());

    if manifest.verify_checksum(&report.data) {
        println!("{}", style("✅ Fichier intégralement récupéré").green());
    } else {
        println!(
            "{}",
            style("⚠️  Récupération partielle (checksum divergent)").yellow()
        );
    }

    Ok(())
}
