//! Tests de roundtrip de bout en bout
//!
//! Ces tests vérifient que l'encodage et le décodage préservent l'intégrité
//! des octets, y compris sous permutation, corruption ciblée et redondance
//! multi-pools.

use molfs_core::{
    decode_block, decode_collection, encode_block, encode_file, reassemble, MirrorAll,
    PrimerPair, PrimerRegistry, SinglePool,
};
use std::collections::HashMap;

fn registry_with(ids: &[(u32, u32)]) -> PrimerRegistry {
    let mut registry = PrimerRegistry::new();
    for &(pool, block) in ids {
        registry.register(pool, block, PrimerPair::synthesize(pool, block, 22, 2024));
    }
    registry
}

#[test]
fn test_single_chunk_block() {
    // Bloc d'exactement 12 octets: un seul oligo de 191 nt
    let registry = registry_with(&[(1, 0)]);
    let data: Vec<u8> = (0x00..0x0C).collect();

    let encoded = encode_block(&registry, 1, 0, &data).unwrap();
    assert_eq!(encoded.oligos.len(), 1);
    assert_eq!(encoded.oligos[0].len(), 191);

    let (bytes, stats) = decode_block(&registry, 1, 0, &encoded.oligos, Some(12)).unwrap();
    assert_eq!(bytes, data);
    assert_eq!(stats.crc_valid, 1);
    assert_eq!(stats.crc_invalid, 0);
    assert_eq!(stats.crc_conflict, 0);
    assert_eq!(stats.invalid_base, 0);
    assert_eq!(stats.unclassified, 0);
    assert_eq!(stats.malformed, 0);
    assert!(stats.missing_addresses.is_empty());
}

#[test]
fn test_final_chunk_not_multiple_of_twelve() {
    // 25 octets: un bloc, 3 oligos, et la longueur d'origine retrouvée
    let registry = registry_with(&[(1, 0)]);
    let data: Vec<u8> = (0..25).collect();

    let encoded = encode_file(&registry, &data, 5120, &SinglePool(1)).unwrap();
    assert_eq!(encoded.len(), 1);
    assert_eq!(encoded[0].oligos.len(), 3);

    let (bytes, _) =
        decode_block(&registry, 1, 0, &encoded[0].oligos, Some(data.len())).unwrap();
    assert_eq!(bytes, data);
}

#[test]
fn test_all_ones_payload_homopolymer_stress() {
    let registry = registry_with(&[(1, 0)]);
    let data = vec![0xFFu8; 12];

    let encoded = encode_block(&registry, 1, 0, &data).unwrap();
    let pair = registry.get(1, 0).unwrap();
    let core = &encoded.oligos[0][pair.forward.len()..pair.forward.len() + 147];

    assert!(!core.contains("GGGG"));
    assert!(!core.contains("TTTT"));
    assert!(!core.contains("AAAA"));
    assert!(!core.contains("CCCC"));

    let (bytes, stats) = decode_block(&registry, 1, 0, &encoded.oligos, Some(12)).unwrap();
    assert_eq!(bytes, data);
    assert_eq!(stats.crc_valid, 1);
}

#[test]
fn test_single_base_corruption_dropped() {
    let registry = registry_with(&[(1, 0)]);
    let data: Vec<u8> = (0x00..0x0C).collect();

    let encoded = encode_block(&registry, 1, 0, &data).unwrap();
    let mut oligos = encoded.oligos.clone();

    // Substitution au milieu du champ payload, vers l'autre classe de bit
    let pair = registry.get(1, 0).unwrap();
    let pos = pair.forward.len() + 19 + 48;
    let mut raw = oligos[0].clone().into_bytes();
    raw[pos] = match raw[pos] {
        b'A' | b'C' => b'G',
        _ => b'A',
    };
    oligos[0] = String::from_utf8(raw).unwrap();

    let (bytes, stats) = decode_block(&registry, 1, 0, &oligos, Some(12)).unwrap();

    assert_eq!(bytes, vec![0u8; 12]);
    assert_eq!(stats.crc_invalid, 1);
    assert_eq!(stats.missing_addresses, vec![0]);
}

#[test]
fn test_permuted_multiset_same_result() {
    let registry = registry_with(&[(1, 0)]);
    let data: Vec<u8> = (0..240).map(|i| (i * 7 % 256) as u8).collect();

    let encoded = encode_block(&registry, 1, 0, &data).unwrap();

    let (reference, _) =
        decode_block(&registry, 1, 0, &encoded.oligos, Some(data.len())).unwrap();

    let mut shuffled = encoded.oligos.clone();
    shuffled.reverse();
    shuffled.rotate_left(5);

    let (permuted, stats) =
        decode_block(&registry, 1, 0, &shuffled, Some(data.len())).unwrap();

    assert_eq!(reference, permuted);
    assert_eq!(reference, data);
    assert!(stats.is_clean());
}

#[test]
fn test_redundant_recovery_from_surviving_pool() {
    // Bloc 1 encodé sous les pools 1 et 2; les oligos du pool 1 disparaissent
    let registry = registry_with(&[(1, 1), (2, 1)]);
    let data: Vec<u8> = (0..36).map(|i| (255 - i) as u8).collect();

    let pool1 = encode_block(&registry, 1, 1, &data).unwrap();
    let pool2 = encode_block(&registry, 2, 1, &data).unwrap();

    let survivors: Vec<String> = pool2.oligos.clone();
    let mut union = pool1.oligos.clone();
    union.extend(pool2.oligos.clone());

    let mut lengths = HashMap::new();
    lengths.insert((1u32, 1u32), data.len());
    lengths.insert((2u32, 1u32), data.len());

    // L'union et le pool survivant seuls donnent les mêmes octets
    for input in [union, survivors] {
        let collection = decode_collection(&registry, &input, &lengths);
        let report = reassemble(&collection.blocks, Some(2), 5120, None).unwrap();

        assert_eq!(&report.data[5120..5120 + data.len()], &data[..]);
        assert!(report.missing_blocks.contains(&0)); // le bloc 0 n'existe pas ici
    }

    // Après disparition du pool 1, le bloc est servi par le pool 2
    let collection = decode_collection(&registry, &pool2.oligos, &lengths);
    let report = reassemble(&collection.blocks, Some(2), 5120, None).unwrap();
    assert!(report.served_by.contains(&(1, 2)));
}

#[test]
fn test_unknown_primer_does_not_disturb_block() {
    let registry = registry_with(&[(1, 0)]);
    let data = vec![0x42u8; 24];

    let encoded = encode_block(&registry, 1, 0, &data).unwrap();
    let mut oligos = encoded.oligos.clone();

    let stranger = PrimerPair::synthesize(77, 77, 22, 1);
    oligos.insert(
        1,
        molfs_core::codec::build_oligo(&stranger.forward, &stranger.reverse, 0, &[0u8; 12])
            .unwrap(),
    );

    let (bytes, stats) = decode_block(&registry, 1, 0, &oligos, Some(data.len())).unwrap();

    assert_eq!(bytes, data);
    assert_eq!(stats.unclassified, 1);
    assert!(stats.missing_addresses.is_empty());
}

#[test]
fn test_file_roundtrip_multiblock_mirrored() {
    let registry = registry_with(&[(1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    let data: Vec<u8> = (0..5120 * 2 + 100).map(|i| (i * 31 % 251) as u8).collect();

    let encoded = encode_file(&registry, &data, 5120, &MirrorAll(vec![1, 2])).unwrap();
    assert_eq!(encoded.len(), 6);

    let mut lengths = HashMap::new();
    let mut oligos = Vec::new();
    for block in &encoded {
        lengths.insert(
            (block.metadata.pool_id, block.metadata.block_index),
            block.metadata.original_block_length_bytes,
        );
        oligos.extend(block.oligos.iter().cloned());
    }

    let collection = decode_collection(&registry, &oligos, &lengths);
    let report = reassemble(&collection.blocks, Some(3), 5120, Some(data.len())).unwrap();

    assert_eq!(report.data, data);
    assert!(report.missing_blocks.is_empty());
    assert_eq!(report.stats.crc_invalid, 0);
}
