//! Métriques de simulation

use serde::{Deserialize, Serialize};

/// Compteurs d'édition appliqués par le canal bruité
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Nombre total de bases traversant le canal
    pub total_bases: usize,

    /// Substitutions appliquées
    pub substitutions: usize,

    /// Insertions appliquées
    pub insertions: usize,

    /// Délétions appliquées
    pub deletions: usize,
}

impl SimulationMetrics {
    /// Crée des métriques vides
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre total de bases affectées
    pub fn affected(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }

    /// Taux d'erreur observé
    pub fn error_rate(&self) -> f64 {
        if self.total_bases == 0 {
            return 0.0;
        }
        self.affected() as f64 / self.total_bases as f64
    }

    /// Formate les métriques en tableau
    pub fn format_table(&self) -> String {
        format!(
            "┌────────────────────────────────────┐\n\
             │ Métriques de Simulation            │\n\
             ├────────────────────────────────────┤\n\
             │ Bases totales    : {:>8}        │\n\
             │ Substitutions    : {:>8}        │\n\
             │ Insertions       : {:>8}        │\n\
             │ Délétions        : {:>8}        │\n\
             │ Taux d'erreur    : {:>7.2}%        │\n\
             └────────────────────────────────────┘",
            self.total_bases,
            self.substitutions,
            self.insertions,
            self.deletions,
            100.0 * self.error_rate()
        )
    }
}
