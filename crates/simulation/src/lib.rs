//! Simulation de bruit sur des ensembles d'oligos
//!
//! Reproduit les erreurs de synthèse/séquençage (substitutions, insertions,
//! délétions) sur des chaînes d'oligos, de façon reproductible par seed, pour
//! exercer les bandes de tolérance du décodeur.

pub mod channel;
pub mod error_model;
pub mod metrics;

pub use channel::NoisyChannel;
pub use error_model::ErrorModel;
pub use metrics::SimulationMetrics;
