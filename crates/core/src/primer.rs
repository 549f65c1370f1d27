//! Registre de primers et classification inverse des oligos
//!
//! Une paire (primer avant, primer arrière) identifie un (pool, bloc). Le
//! registre est une valeur possédée par l'appelant; la classification parcourt
//! les entrées dans l'ordre d'enregistrement et retourne la première paire qui
//! encadre la séquence.

use crate::error::{MolfsError, Result};
use crate::sequence::Base;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifiant (pool, bloc)
pub type PoolBlockId = (u32, u32);

/// Paire de primers PCR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerPair {
    /// Primer avant
    pub forward: String,
    /// Primer arrière
    pub reverse: String,
}

impl PrimerPair {
    /// Crée une paire depuis deux chaînes fournies par l'appelant
    pub fn new(forward: impl Into<String>, reverse: impl Into<String>) -> Self {
        Self {
            forward: forward.into(),
            reverse: reverse.into(),
        }
    }

    /// Synthétise une paire déterministe pour un (pool, bloc)
    ///
    /// Le tirage est reproductible (ChaCha8 seedé) et évite les runs de 4
    /// bases identiques. Les primers restent des valeurs quelconques du point
    /// de vue du codec; ce générateur est une commodité pour les outils.
    pub fn synthesize(pool: u32, block: u32, len: usize, seed: u64) -> Self {
        let mut rng =
            ChaCha8Rng::seed_from_u64(seed ^ (u64::from(pool) << 32) ^ u64::from(block));

        let forward = synthesize_one(&mut rng, len);
        let reverse = synthesize_one(&mut rng, len);

        Self { forward, reverse }
    }
}

/// Tire une séquence de primer sans homopolymère de longueur 4
fn synthesize_one(rng: &mut ChaCha8Rng, len: usize) -> String {
    const BASES: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    let mut primer = String::with_capacity(len);
    let mut last: Option<Base> = None;
    let mut run = 0usize;

    while primer.len() < len {
        let base = BASES[rng.gen_range(0..4)];

        if Some(base) == last && run >= 3 {
            continue;
        }

        if Some(base) == last {
            run += 1;
        } else {
            last = Some(base);
            run = 1;
        }

        primer.push(base.as_char());
    }

    primer
}

/// Registre (pool, bloc) → paire de primers, à ordre d'itération stable
#[derive(Debug, Clone, Default)]
pub struct PrimerRegistry {
    entries: Vec<(PoolBlockId, PrimerPair)>,
    index: HashMap<PoolBlockId, usize>,
}

impl PrimerRegistry {
    /// Crée un registre vide
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruit un registre depuis des entrées ordonnées
    pub fn from_entries(entries: Vec<(PoolBlockId, PrimerPair)>) -> Self {
        let mut registry = Self::new();
        for (id, pair) in entries {
            registry.register(id.0, id.1, pair);
        }
        registry
    }

    /// Enregistre une paire; écrase l'entrée existante en conservant sa
    /// position d'origine et retourne l'ancienne paire
    pub fn register(&mut self, pool: u32, block: u32, pair: PrimerPair) -> Option<PrimerPair> {
        match self.index.get(&(pool, block)) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, pair)),
            None => {
                self.index.insert((pool, block), self.entries.len());
                self.entries.push(((pool, block), pair));
                None
            }
        }
    }

    /// Variante qui signale (`PrimerDuplicate`) une paire déjà liée à un
    /// autre (pool, bloc); l'enregistrement est refusé dans ce cas
    pub fn register_checked(&mut self, pool: u32, block: u32, pair: PrimerPair) -> Result<()> {
        if let Some(((p, b), _)) = self
            .entries
            .iter()
            .find(|(id, existing)| *id != (pool, block) && *existing == pair)
        {
            return Err(MolfsError::PrimerDuplicate {
                pool: *p,
                block: *b,
            });
        }

        self.register(pool, block, pair);
        Ok(())
    }

    /// Retourne la paire d'un (pool, bloc)
    pub fn get(&self, pool: u32, block: u32) -> Option<&PrimerPair> {
        self.index.get(&(pool, block)).map(|&i| &self.entries[i].1)
    }

    /// Nombre d'entrées enregistrées
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Vérifie si le registre est vide
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itère dans l'ordre d'enregistrement
    pub fn iter(&self) -> impl Iterator<Item = (PoolBlockId, &PrimerPair)> {
        self.entries.iter().map(|(id, pair)| (*id, pair))
    }

    /// Identifie le (pool, bloc) d'une séquence par ses extrémités
    ///
    /// Parcourt les paires dans l'ordre d'enregistrement et retourne la
    /// première dont le primer avant préfixe la séquence et le primer arrière
    /// la suffixe. Le repli de brin complémentaire relève de l'adaptateur
    /// d'entrée, pas du classifieur.
    pub fn classify(&self, s: &str) -> Option<PoolBlockId> {
        self.entries
            .iter()
            .find(|(_, pair)| {
                s.len() >= pair.forward.len() + pair.reverse.len()
                    && s.starts_with(&pair.forward)
                    && s.ends_with(&pair.reverse)
            })
            .map(|(id, _)| *id)
    }
}
