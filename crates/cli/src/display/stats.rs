//! Affichage des statistiques de décodage

use molfs_core::DecodedBlock;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct BlockRow {
    #[tabled(rename = "Pool")]
    pool: u32,
    #[tabled(rename = "Bloc")]
    block: u32,
    #[tabled(rename = "Octets")]
    bytes: usize,
    #[tabled(rename = "CRC valides")]
    crc_valid: usize,
    #[tabled(rename = "CRC invalides")]
    crc_invalid: usize,
    #[tabled(rename = "Conflits")]
    conflicts: usize,
    #[tabled(rename = "Malformés")]
    malformed: usize,
    #[tabled(rename = "Adresses manquantes")]
    missing: usize,
}

/// Affiche l'état de chaque (pool, bloc) décodé
pub fn print_block_table(blocks: &[DecodedBlock]) {
    if blocks.is_empty() {
        println!("   Aucun bloc décodé");
        return;
    }

    let rows: Vec<BlockRow> = blocks
        .iter()
        .map(|block| BlockRow {
            pool: block.pool,
            block: block.block,
            bytes: block.bytes.len(),
            crc_valid: block.stats.crc_valid,
            crc_invalid: block.stats.crc_invalid,
            conflicts: block.stats.crc_conflict,
            malformed: block.stats.malformed,
            missing: block.stats.missing_addresses.len(),
        })
        .collect();

    println!("\n{}", Table::new(rows).with(Style::modern()));
}
