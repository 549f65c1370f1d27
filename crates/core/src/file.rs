//! Découpage de fichiers en blocs, distribution vers les pools et
//! réassemblage des blocs décodés
//!
//! Le découpeur émet des blocs contigus de taille fixe (le dernier peut être
//! plus court). La stratégie de distribution est une politique enfichable;
//! le réassembleur choisit, par index de bloc, la copie la mieux reconstruite
//! parmi les pools redondants.

use crate::codec::block::{encode_block, DecodeStats, DecodedBlock, EncodedBlock};
use crate::error::{MolfsError, Result};
use crate::log_operation;
use crate::primer::PrimerRegistry;

/// Découpe un fichier en blocs contigus `(block_index, octets)`
///
/// Tous les blocs font `block_size` octets sauf éventuellement le dernier.
pub fn split_blocks(data: &[u8], block_size: usize) -> Result<Vec<(u32, &[u8])>> {
    if block_size == 0 {
        return Err(MolfsError::Encoding(
            "taille de bloc nulle".to_string(),
        ));
    }

    Ok(data
        .chunks(block_size)
        .enumerate()
        .map(|(i, chunk)| (i as u32, chunk))
        .collect())
}

/// Politique de distribution des blocs vers les pools
pub trait DistributionStrategy {
    /// Pools destinataires d'un bloc
    fn pools_for(&self, block_index: u32, total_blocks: u32) -> Vec<u32>;
}

/// Tous les blocs vers un pool unique
pub struct SinglePool(pub u32);

impl DistributionStrategy for SinglePool {
    fn pools_for(&self, _block_index: u32, _total_blocks: u32) -> Vec<u32> {
        vec![self.0]
    }
}

/// Répartition cyclique sur une liste de pools
pub struct RoundRobin(pub Vec<u32>);

impl DistributionStrategy for RoundRobin {
    fn pools_for(&self, block_index: u32, _total_blocks: u32) -> Vec<u32> {
        if self.0.is_empty() {
            return Vec::new();
        }
        vec![self.0[block_index as usize % self.0.len()]]
    }
}

/// Chaque bloc répliqué sur tous les pools listés
pub struct MirrorAll(pub Vec<u32>);

impl DistributionStrategy for MirrorAll {
    fn pools_for(&self, _block_index: u32, _total_blocks: u32) -> Vec<u32> {
        self.0.clone()
    }
}

impl<F> DistributionStrategy for F
where
    F: Fn(u32, u32) -> Vec<u32>,
{
    fn pools_for(&self, block_index: u32, total_blocks: u32) -> Vec<u32> {
        self(block_index, total_blocks)
    }
}

/// Encode un fichier entier: découpage, distribution, trames par (pool, bloc)
///
/// Les primers de chaque (pool, bloc) produit doivent être enregistrés au
/// préalable; une stratégie qui n'attribue aucun pool à un bloc est refusée,
/// car ce bloc serait irrécupérable.
pub fn encode_file(
    registry: &PrimerRegistry,
    data: &[u8],
    block_size: usize,
    strategy: &dyn DistributionStrategy,
) -> Result<Vec<EncodedBlock>> {
    log_operation!("encode_file", {
        let blocks = split_blocks(data, block_size)?;
        let total_blocks = blocks.len() as u32;

        let mut encoded = Vec::new();
        for (index, bytes) in blocks {
            let pools = strategy.pools_for(index, total_blocks);
            if pools.is_empty() {
                return Err(MolfsError::Encoding(format!(
                    "la stratégie n'attribue aucun pool au bloc {}",
                    index
                )));
            }

            for pool in pools {
                encoded.push(encode_block(registry, pool, index, bytes)?);
            }
        }

        Ok(encoded)
    })
}

/// Rapport de réassemblage d'un fichier
#[derive(Debug, Clone, Default)]
pub struct FileDecodeReport {
    /// Octets reconstruits, trous compris
    pub data: Vec<u8>,
    /// Pool retenu pour chaque bloc présent: `(block_index, pool_id)`
    pub served_by: Vec<(u32, u32)>,
    /// Blocs sans aucune copie décodée, comblés par des zéros
    pub missing_blocks: Vec<u32>,
    /// Compteurs agrégés des copies retenues
    pub stats: DecodeStats,
}

impl FileDecodeReport {
    /// Convertit un premier bloc manquant en erreur `BlockMissing`
    pub fn ensure_complete(&self) -> Result<()> {
        match self.missing_blocks.first() {
            Some(&block) => Err(MolfsError::BlockMissing(block)),
            None => Ok(()),
        }
    }
}

/// Concatène les blocs décodés en ordre d'index croissant
///
/// Entre copies redondantes d'un même bloc, préfère la copie au moins
/// d'adresses manquantes, puis au moins de CRC invalides, puis la première
/// rencontrée. Les blocs absents sont comblés par des zéros et listés dans
/// `missing_blocks` (erreur remontée avec le résultat, jamais levée ici).
pub fn reassemble(
    decoded: &[DecodedBlock],
    total_blocks: Option<u32>,
    block_size: usize,
    file_length: Option<usize>,
) -> Result<FileDecodeReport> {
    log_operation!("reassemble", {
        if block_size == 0 {
            return Err(MolfsError::Decoding(
                "taille de bloc nulle".to_string(),
            ));
        }

        let total = total_blocks.unwrap_or_else(|| {
            decoded
                .iter()
                .map(|b| b.block + 1)
                .max()
                .unwrap_or(0)
        });

        let mut report = FileDecodeReport::default();

        for index in 0..total {
            // Meilleure copie: moins de trous, puis moins de CRC invalides,
            // puis première rencontrée (comparaison strictement inférieure)
            let best = decoded
                .iter()
                .filter(|b| b.block == index)
                .reduce(|best, candidate| {
                    let best_key =
                        (best.stats.missing_addresses.len(), best.stats.crc_invalid);
                    let candidate_key = (
                        candidate.stats.missing_addresses.len(),
                        candidate.stats.crc_invalid,
                    );
                    if candidate_key < best_key {
                        candidate
                    } else {
                        best
                    }
                });

            match best {
                Some(copy) => {
                    report.data.extend_from_slice(&copy.bytes);
                    report.served_by.push((index, copy.pool));
                    report.stats.merge(&copy.stats);
                }
                None => {
                    // Trou de la taille d'un bloc entier
                    let gap = match file_length {
                        Some(len) if index == total - 1 => len
                            .saturating_sub((total as usize - 1) * block_size)
                            .min(block_size),
                        _ => block_size,
                    };
                    report.data.extend(std::iter::repeat(0u8).take(gap));
                    report.missing_blocks.push(index);
                    tracing::warn!(block = index, "bloc manquant, comblé par des zéros");
                }
            }
        }

        if let Some(len) = file_length {
            report.data.truncate(len);
        }

        Ok(report)
    })
}
