//! Encodage et décodage de blocs d'octets en ensembles d'oligos
//!
//! L'encodeur découpe un bloc en chunks de 12 octets (dernier chunk complété
//! de zéros), adresse chaque chunk et émet les oligos trames. Le décodeur est
//! tolérant aux pertes: il classe, parse, filtre par CRC, résout les
//! doublons, comble les trous par des zéros et remonte des compteurs plutôt
//! que des erreurs.

use crate::codec::oligo::{build_oligo, parse_oligo, OligoFields, ADDRESS_SPACE, PAYLOAD_BYTES};
use crate::error::{MolfsError, Result};
use crate::log_operation;
use crate::primer::{PoolBlockId, PrimerPair, PrimerRegistry};
use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Taille de bloc par défaut (octets)
pub const DEFAULT_BLOCK_SIZE: usize = 5120;

/// Métadonnées d'un bloc encodé (sidecar)
///
/// Seul endroit où la longueur d'origine est préservée; sans elle, un
/// décodeur traite la longueur du bloc comme `num_oligos * 12`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Index du bloc dans le fichier
    pub block_index: u32,
    /// Pool de destination
    pub pool_id: u32,
    /// Longueur du bloc avant complétion à un multiple de 12
    pub original_block_length_bytes: usize,
    /// Nombre d'oligos émis
    pub num_oligos: usize,
}

/// Bloc encodé: oligos en ordre d'adresse, plus sidecar
#[derive(Debug, Clone)]
pub struct EncodedBlock {
    pub oligos: Vec<String>,
    pub metadata: BlockMetadata,
}

/// Compteurs de décodage d'un bloc
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Oligos dont le CRC recalculé correspond au champ décodé
    pub crc_valid: usize,
    /// Oligos écartés sur désaccord CRC
    pub crc_invalid: usize,
    /// Doublons d'adresse à payloads divergents mais CRC valides
    pub crc_conflict: usize,
    /// Oligos écartés pour caractère hors ACGT dans un champ codé
    pub invalid_base: usize,
    /// Séquences ne correspondant à aucune paire de primers enregistrée
    pub unclassified: usize,
    /// Oligos de longueur inattendue ou d'adresse hors de l'espace du bloc
    pub malformed: usize,
    /// Adresses sans oligo survivant, comblées par des zéros
    pub missing_addresses: Vec<u32>,
}

impl DecodeStats {
    /// Nombre d'adresses attendues restées sans CRC valide
    pub fn crc_missing(&self) -> usize {
        self.missing_addresses.len()
    }

    /// Vérifie qu'aucun oligo n'a été écarté ni aucune adresse comblée
    pub fn is_clean(&self) -> bool {
        self.crc_invalid == 0
            && self.crc_conflict == 0
            && self.invalid_base == 0
            && self.unclassified == 0
            && self.malformed == 0
            && self.missing_addresses.is_empty()
    }

    /// Agrège les compteurs d'un autre décodage
    pub fn merge(&mut self, other: &DecodeStats) {
        self.crc_valid += other.crc_valid;
        self.crc_invalid += other.crc_invalid;
        self.crc_conflict += other.crc_conflict;
        self.invalid_base += other.invalid_base;
        self.unclassified += other.unclassified;
        self.malformed += other.malformed;
        self.missing_addresses
            .extend_from_slice(&other.missing_addresses);
    }
}

/// Résultat du décodage d'un (pool, bloc)
#[derive(Debug, Clone)]
pub struct DecodedBlock {
    pub pool: u32,
    pub block: u32,
    pub bytes: Vec<u8>,
    pub stats: DecodeStats,
}

/// Résultat du décodage d'une collection mixte
#[derive(Debug, Clone, Default)]
pub struct CollectionDecode {
    /// Blocs décodés, dans l'ordre de première rencontre
    pub blocks: Vec<DecodedBlock>,
    /// Séquences ne correspondant à aucune paire enregistrée
    pub unclassified: usize,
}

/// Encode un bloc d'octets en oligos adressés pour un (pool, bloc)
///
/// Échoue si les primers ne sont pas enregistrés (`PrimerMissing`) ou si le
/// bloc excède l'espace d'adresses de 19 bits.
pub fn encode_block(
    registry: &PrimerRegistry,
    pool: u32,
    block: u32,
    data: &[u8],
) -> Result<EncodedBlock> {
    log_operation!("encode_block", {
        let pair = registry
            .get(pool, block)
            .ok_or(MolfsError::PrimerMissing { pool, block })?;

        let num_chunks = (data.len() + PAYLOAD_BYTES - 1) / PAYLOAD_BYTES;
        if num_chunks as u64 > u64::from(ADDRESS_SPACE) {
            return Err(MolfsError::Encoding(format!(
                "bloc de {} octets: {} chunks excèdent l'espace d'adresses",
                data.len(),
                num_chunks
            )));
        }

        // Chaque chunk est indépendant: trame en parallèle, ordre préservé
        let oligos = (0..num_chunks)
            .into_par_iter()
            .map(|i| {
                let mut payload = [0u8; PAYLOAD_BYTES];
                let start = i * PAYLOAD_BYTES;
                let end = (start + PAYLOAD_BYTES).min(data.len());
                payload[..end - start].copy_from_slice(&data[start..end]);

                build_oligo(&pair.forward, &pair.reverse, i as u32, &payload)
            })
            .collect::<Result<Vec<String>>>()?;

        tracing::debug!(pool, block, oligos = oligos.len(), "bloc encodé");

        Ok(EncodedBlock {
            metadata: BlockMetadata {
                block_index: block,
                pool_id: pool,
                original_block_length_bytes: data.len(),
                num_oligos: oligos.len(),
            },
            oligos,
        })
    })
}

/// Décode les séquences d'un (pool, bloc) ciblé
///
/// Les séquences classées vers un autre (pool, bloc) enregistré sont
/// ignorées; celles qui ne correspondent à aucune paire comptent dans
/// `unclassified`. `expected_len` vient du sidecar; sans lui, la longueur
/// reconstruite est `K * 12` avec `K` = adresse max observée + 1.
pub fn decode_block(
    registry: &PrimerRegistry,
    pool: u32,
    block: u32,
    candidates: &[String],
    expected_len: Option<usize>,
) -> Result<(Vec<u8>, DecodeStats)> {
    let pair = registry
        .get(pool, block)
        .ok_or(MolfsError::PrimerMissing { pool, block })?;

    let mut unclassified = 0usize;
    let mut selected: Vec<&String> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match registry.classify(candidate) {
            Some(id) if id == (pool, block) => selected.push(candidate),
            Some(_) => {} // appartient à un autre bloc
            None => unclassified += 1,
        }
    }

    let (bytes, mut stats) = decode_group(pair, &selected, expected_len);
    stats.unclassified = unclassified;

    Ok((bytes, stats))
}

/// Classe une collection mixte et décode chaque (pool, bloc) rencontré
///
/// La classification suit l'ordre d'enregistrement du registre; les groupes
/// sont restitués dans l'ordre de première rencontre, de sorte que le
/// décodage est déterministe pour une entrée donnée.
pub fn decode_collection(
    registry: &PrimerRegistry,
    candidates: &[String],
    lengths: &HashMap<PoolBlockId, usize>,
) -> CollectionDecode {
    log_operation!("decode_collection", {
        // Classification en parallèle, ordre des candidats préservé
        let classified: Vec<Option<PoolBlockId>> = candidates
            .par_iter()
            .map(|s| registry.classify(s))
            .collect();

        let mut unclassified = 0usize;
        let mut order: Vec<PoolBlockId> = Vec::new();
        let mut groups: HashMap<PoolBlockId, Vec<&String>> = HashMap::new();

        for (candidate, id) in candidates.iter().zip(&classified) {
            match id {
                Some(id) => {
                    groups
                        .entry(*id)
                        .or_insert_with(|| {
                            order.push(*id);
                            Vec::new()
                        })
                        .push(candidate);
                }
                None => unclassified += 1,
            }
        }

        let blocks = order
            .into_iter()
            .map(|(pool, block)| {
                let pair = registry
                    .get(pool, block)
                    .expect("classification issue du registre");
                let sequences = &groups[&(pool, block)];
                let expected_len = lengths.get(&(pool, block)).copied();

                let (bytes, stats) = decode_group(pair, sequences, expected_len);

                DecodedBlock {
                    pool,
                    block,
                    bytes,
                    stats,
                }
            })
            .collect();

        CollectionDecode {
            blocks,
            unclassified,
        }
    })
}

/// Pipeline parse → porte CRC → dédoublonnage → trous → assemblage
fn decode_group(
    pair: &PrimerPair,
    sequences: &[&String],
    expected_len: Option<usize>,
) -> (Vec<u8>, DecodeStats) {
    let fwd_len = pair.forward.len();
    let rev_len = pair.reverse.len();

    // Parse en parallèle; la résolution des doublons reste séquentielle pour
    // conserver le départage premier-rencontré
    let parsed: Vec<Result<OligoFields>> = sequences
        .par_iter()
        .map(|s| parse_oligo(s, fwd_len, rev_len))
        .collect();

    let mut stats = DecodeStats::default();
    let expected_chunks = expected_len.map(|len| (len + PAYLOAD_BYTES - 1) / PAYLOAD_BYTES);
    let mut chunks: BTreeMap<u32, [u8; PAYLOAD_BYTES]> = BTreeMap::new();

    for outcome in parsed {
        let fields = match outcome {
            Ok(fields) => fields,
            Err(MolfsError::InvalidBase(_)) => {
                stats.invalid_base += 1;
                continue;
            }
            Err(_) => {
                stats.malformed += 1;
                continue;
            }
        };

        // Une adresse hors de l'espace attendu du bloc est écartée comme
        // malformée (le CRC ne couvre pas l'adresse et n'y peut rien)
        if let Some(k) = expected_chunks {
            if fields.address as usize >= k {
                stats.malformed += 1;
                continue;
            }
        }

        if !fields.crc_ok() {
            stats.crc_invalid += 1;
            continue;
        }
        stats.crc_valid += 1;

        match chunks.get(&fields.address) {
            None => {
                chunks.insert(fields.address, fields.payload);
            }
            Some(existing) if *existing == fields.payload => {
                // doublon identique, conservé silencieusement
            }
            Some(_) => {
                stats.crc_conflict += 1;
            }
        }
    }

    let num_chunks = expected_chunks.unwrap_or_else(|| {
        chunks
            .keys()
            .next_back()
            .map_or(0, |&max| max as usize + 1)
    });

    let mut bytes = vec![0u8; num_chunks * PAYLOAD_BYTES];
    for address in 0..num_chunks as u32 {
        match chunks.get(&address) {
            Some(payload) => {
                let start = address as usize * PAYLOAD_BYTES;
                bytes[start..start + PAYLOAD_BYTES].copy_from_slice(payload);
            }
            None => stats.missing_addresses.push(address),
        }
    }

    if let Some(len) = expected_len {
        bytes.truncate(len);
    }

    (bytes, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_one() -> PrimerRegistry {
        let mut registry = PrimerRegistry::new();
        registry.register(1, 0, PrimerPair::synthesize(1, 0, 22, 7));
        registry
    }

    #[test]
    fn test_encode_block_geometry() {
        let registry = registry_one();
        let data: Vec<u8> = (0..30).collect();

        let encoded = encode_block(&registry, 1, 0, &data).unwrap();

        assert_eq!(encoded.oligos.len(), 3);
        assert!(encoded.oligos.iter().all(|o| o.len() == 191));
        assert_eq!(encoded.metadata.original_block_length_bytes, 30);
        assert_eq!(encoded.metadata.num_oligos, 3);
    }

    #[test]
    fn test_encode_block_requires_primers() {
        let registry = PrimerRegistry::new();
        let err = encode_block(&registry, 9, 9, b"abc").unwrap_err();

        assert!(matches!(
            err,
            MolfsError::PrimerMissing { pool: 9, block: 9 }
        ));
    }

    #[test]
    fn test_encode_empty_block() {
        let registry = registry_one();
        let encoded = encode_block(&registry, 1, 0, &[]).unwrap();

        assert!(encoded.oligos.is_empty());
        assert_eq!(encoded.metadata.original_block_length_bytes, 0);
    }

    #[test]
    fn test_decode_roundtrip_with_length() {
        let registry = registry_one();
        let data: Vec<u8> = (0..100).map(|i| (i * 31 % 256) as u8).collect();

        let encoded = encode_block(&registry, 1, 0, &data).unwrap();
        let (bytes, stats) =
            decode_block(&registry, 1, 0, &encoded.oligos, Some(data.len())).unwrap();

        assert_eq!(bytes, data);
        assert_eq!(stats.crc_valid, encoded.oligos.len());
        assert!(stats.is_clean());
    }

    #[test]
    fn test_decode_without_length_keeps_padding() {
        let registry = registry_one();
        let data = vec![0xABu8; 25];

        let encoded = encode_block(&registry, 1, 0, &data).unwrap();
        let (bytes, stats) = decode_block(&registry, 1, 0, &encoded.oligos, None).unwrap();

        // Sans sidecar, la longueur reconstruite est K * 12
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..25], &data[..]);
        assert!(bytes[25..].iter().all(|&b| b == 0));
        assert!(stats.is_clean());
    }

    #[test]
    fn test_decode_permutation_invariant() {
        let registry = registry_one();
        let data: Vec<u8> = (0..60).collect();

        let encoded = encode_block(&registry, 1, 0, &data).unwrap();
        let mut shuffled = encoded.oligos.clone();
        shuffled.reverse();
        shuffled.swap(0, 2);

        let (bytes, _) =
            decode_block(&registry, 1, 0, &shuffled, Some(data.len())).unwrap();
        assert_eq!(bytes, data);
    }

    #[test]
    fn test_decode_drops_corrupted_payload() {
        let registry = registry_one();
        let data: Vec<u8> = (0..12).collect();

        let encoded = encode_block(&registry, 1, 0, &data).unwrap();
        let mut oligos = encoded.oligos.clone();

        // Substitution au milieu du champ payload
        let mut bytes = oligos[0].clone().into_bytes();
        let pos = 22 + 19 + 48;
        bytes[pos] = match bytes[pos] {
            b'A' | b'C' => b'G',
            _ => b'A',
        };
        oligos[0] = String::from_utf8(bytes).unwrap();

        let (decoded, stats) =
            decode_block(&registry, 1, 0, &oligos, Some(data.len())).unwrap();

        assert_eq!(stats.crc_invalid, 1);
        assert_eq!(stats.missing_addresses, vec![0]);
        assert_eq!(decoded, vec![0u8; 12]);
    }

    #[test]
    fn test_decode_counts_invalid_base_separately() {
        let registry = registry_one();
        let encoded = encode_block(&registry, 1, 0, &[1u8; 12]).unwrap();

        let mut oligos = encoded.oligos.clone();
        let mut bytes = oligos[0].clone().into_bytes();
        bytes[22 + 5] = b'N';
        oligos[0] = String::from_utf8(bytes).unwrap();

        let (_, stats) = decode_block(&registry, 1, 0, &oligos, Some(12)).unwrap();

        assert_eq!(stats.invalid_base, 1);
        assert_eq!(stats.crc_invalid, 0);
        assert_eq!(stats.missing_addresses, vec![0]);
    }

    #[test]
    fn test_decode_duplicates() {
        let registry = registry_one();
        let data: Vec<u8> = (0..24).collect();
        let encoded = encode_block(&registry, 1, 0, &data).unwrap();

        // Doublon identique: silencieux
        let mut oligos = encoded.oligos.clone();
        oligos.push(encoded.oligos[0].clone());
        let (bytes, stats) =
            decode_block(&registry, 1, 0, &oligos, Some(data.len())).unwrap();
        assert_eq!(bytes, data);
        assert_eq!(stats.crc_conflict, 0);

        // Doublon divergent à CRC valide: premier rencontré conservé
        let pair = registry.get(1, 0).unwrap().clone();
        let conflicting = build_oligo(&pair.forward, &pair.reverse, 0, &[9u8; 12]).unwrap();
        let mut oligos = encoded.oligos.clone();
        oligos.push(conflicting);

        let (bytes, stats) =
            decode_block(&registry, 1, 0, &oligos, Some(data.len())).unwrap();
        assert_eq!(bytes, data);
        assert_eq!(stats.crc_conflict, 1);
    }

    #[test]
    fn test_decode_unclassified_counter() {
        let registry = registry_one();
        let data = vec![7u8; 12];
        let encoded = encode_block(&registry, 1, 0, &data).unwrap();

        let mut oligos = encoded.oligos.clone();
        let foreign = PrimerPair::synthesize(99, 99, 22, 1234);
        oligos.push(build_oligo(&foreign.forward, &foreign.reverse, 0, &[0u8; 12]).unwrap());

        let (bytes, stats) =
            decode_block(&registry, 1, 0, &oligos, Some(data.len())).unwrap();

        assert_eq!(bytes, data);
        assert_eq!(stats.unclassified, 1);
    }

    #[test]
    fn test_decode_collection_groups_by_identity() {
        let mut registry = PrimerRegistry::new();
        registry.register(1, 0, PrimerPair::synthesize(1, 0, 22, 7));
        registry.register(2, 0, PrimerPair::synthesize(2, 0, 22, 7));

        let data_a: Vec<u8> = (0..24).collect();
        let data_b = vec![0x5Au8; 12];

        let mut mixed = encode_block(&registry, 1, 0, &data_a).unwrap().oligos;
        mixed.extend(encode_block(&registry, 2, 0, &data_b).unwrap().oligos);

        let mut lengths = HashMap::new();
        lengths.insert((1, 0), data_a.len());
        lengths.insert((2, 0), data_b.len());

        let decoded = decode_collection(&registry, &mixed, &lengths);

        assert_eq!(decoded.unclassified, 0);
        assert_eq!(decoded.blocks.len(), 2);
        assert_eq!(decoded.blocks[0].bytes, data_a);
        assert_eq!(decoded.blocks[1].bytes, data_b);
    }
}
