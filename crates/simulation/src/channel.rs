//! Canal bruité appliqué à des chaînes d'oligos

use crate::error_model::ErrorModel;
use crate::metrics::SimulationMetrics;
use molfs_core::Base;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Canal de transmission bruité, reproductible par seed
pub struct NoisyChannel {
    model: ErrorModel,
    rng: ChaCha8Rng,
}

impl NoisyChannel {
    /// Crée un canal à partir d'un modèle d'erreur
    pub fn new(model: ErrorModel) -> Self {
        let seed = model.seed;
        Self {
            model,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Transmet un ensemble d'oligos à travers le canal
    pub fn transmit(&mut self, oligos: &[String]) -> (Vec<String>, SimulationMetrics) {
        let mut metrics = SimulationMetrics::new();
        let transmitted = oligos
            .iter()
            .map(|oligo| self.transmit_one(oligo, &mut metrics))
            .collect();

        (transmitted, metrics)
    }

    /// Transmet un seul oligo, en accumulant les métriques
    pub fn transmit_one(&mut self, oligo: &str, metrics: &mut SimulationMetrics) -> String {
        let mut output = String::with_capacity(oligo.len() + 4);

        for c in oligo.chars() {
            metrics.total_bases += 1;
            let draw: f64 = self.rng.gen();

            if draw < self.model.deletion_rate {
                metrics.deletions += 1;
                continue;
            }

            if draw < self.model.deletion_rate + self.model.insertion_rate {
                metrics.insertions += 1;
                output.push(self.random_base());
                output.push(c);
                continue;
            }

            let substitution_ceiling = self.model.deletion_rate
                + self.model.insertion_rate
                + self.model.substitution_rate;
            if draw < substitution_ceiling {
                metrics.substitutions += 1;
                output.push(self.substitute(c));
                continue;
            }

            output.push(c);
        }

        output
    }

    /// Tire une base uniforme
    fn random_base(&mut self) -> char {
        const BASES: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];
        BASES[self.rng.gen_range(0..4)].as_char()
    }

    /// Substitue une base par une base différente
    fn substitute(&mut self, original: char) -> char {
        loop {
            let candidate = self.random_base();
            if candidate != original {
                return candidate;
            }
        }
    }
}
