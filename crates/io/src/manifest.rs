//! Sidecar de métadonnées d'encodage
//!
//! Le manifeste est le seul endroit où la longueur d'origine de chaque bloc
//! est préservée (nécessaire pour retirer la complétion de zéros du dernier
//! chunk). Il transporte aussi les primers utilisés, pour reconstruire le
//! registre au décodage.

use crate::error::Result;
use chrono::{DateTime, Utc};
use molfs_core::{BlockMetadata, PoolBlockId, PrimerPair, PrimerRegistry};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// Primers d'un (pool, bloc), tels qu'utilisés à l'encodage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerEntry {
    pub pool: u32,
    pub block: u32,
    pub forward: String,
    pub reverse: String,
}

/// Manifeste d'un fichier encodé
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileManifest {
    /// Nom du fichier original
    pub original_file: String,
    /// Longueur du fichier (octets)
    pub file_length: u64,
    /// Taille de bloc utilisée au découpage
    pub block_size: usize,
    /// Nombre total de blocs
    pub total_blocks: u32,
    /// Checksum SHA-256 du fichier original
    pub checksum: String,
    /// Timestamp de création
    pub created_at: DateTime<Utc>,
    /// Sidecars par (pool, bloc) encodé
    pub blocks: Vec<BlockMetadata>,
    /// Primers par (pool, bloc), dans l'ordre d'enregistrement
    pub primers: Vec<PrimerEntry>,
}

impl FileManifest {
    /// Construit le manifeste d'un fichier encodé
    pub fn new(
        original_file: impl Into<String>,
        data: &[u8],
        block_size: usize,
        total_blocks: u32,
        blocks: Vec<BlockMetadata>,
        registry: &PrimerRegistry,
    ) -> Self {
        let primers = registry
            .iter()
            .map(|((pool, block), pair)| PrimerEntry {
                pool,
                block,
                forward: pair.forward.clone(),
                reverse: pair.reverse.clone(),
            })
            .collect();

        Self {
            original_file: original_file.into(),
            file_length: data.len() as u64,
            block_size,
            total_blocks,
            checksum: sha256_hex(data),
            created_at: Utc::now(),
            blocks,
            primers,
        }
    }

    /// Reconstruit le registre de primers dans l'ordre du manifeste
    pub fn registry(&self) -> PrimerRegistry {
        let mut registry = PrimerRegistry::new();
        for entry in &self.primers {
            registry.register(
                entry.pool,
                entry.block,
                PrimerPair::new(entry.forward.clone(), entry.reverse.clone()),
            );
        }
        registry
    }

    /// Longueurs d'origine par (pool, bloc), pour le décodeur
    pub fn block_lengths(&self) -> HashMap<PoolBlockId, usize> {
        self.blocks
            .iter()
            .map(|meta| {
                (
                    (meta.pool_id, meta.block_index),
                    meta.original_block_length_bytes,
                )
            })
            .collect()
    }

    /// Vérifie le checksum d'un contenu reconstruit
    pub fn verify_checksum(&self, data: &[u8]) -> bool {
        sha256_hex(data) == self.checksum
    }

    /// Sauvegarde le manifeste sur disque (JSON indenté)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Charge un manifeste depuis disque
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// SHA-256 en hexadécimal
fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
