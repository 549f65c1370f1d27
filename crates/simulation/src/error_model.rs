//! Modèle d'erreur par base pour la simulation

use serde::{Deserialize, Serialize};

/// Taux d'erreur par base, appliqués indépendamment à chaque position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorModel {
    /// Taux de substitution (par base)
    pub substitution_rate: f64,

    /// Taux d'insertion (par base)
    pub insertion_rate: f64,

    /// Taux de délétion (par base)
    pub deletion_rate: f64,

    /// Seed pour reproductibilité
    pub seed: u64,
}

impl Default for ErrorModel {
    fn default() -> Self {
        Self {
            substitution_rate: 0.01,
            insertion_rate: 0.005,
            deletion_rate: 0.005,
            seed: 42,
        }
    }
}

impl ErrorModel {
    /// Crée un modèle à partir des trois taux
    pub fn new(substitution_rate: f64, insertion_rate: f64, deletion_rate: f64) -> Self {
        Self {
            substitution_rate,
            insertion_rate,
            deletion_rate,
            ..Self::default()
        }
    }

    /// Modèle limité aux substitutions (la géométrie des oligos survit)
    pub fn substitutions_only(rate: f64) -> Self {
        Self::new(rate, 0.0, 0.0)
    }

    /// Définit le seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Taux d'erreur cumulé
    pub fn total_error_rate(&self) -> f64 {
        self.substitution_rate + self.insertion_rate + self.deletion_rate
    }

    /// Vérifie que les taux forment un modèle exploitable
    pub fn is_valid(&self) -> bool {
        self.substitution_rate >= 0.0
            && self.insertion_rate >= 0.0
            && self.deletion_rate >= 0.0
            && self.total_error_rate() < 1.0
    }
}
