//! Selection and variation operators.
//!
//! These are pure functions of `(population, space, rng, constants)`; the
//! engine only sequences them. Every function draws from `rng` in a fixed
//! order so a seeded run is bit-reproducible:
//!
//! - initial population: per individual, one draw per parameter in
//!   declaration order;
//! - per child: the parent index, then one draw per categorical gene, then
//!   for each integer gene a mutation trigger and, if it fires, a redraw.
//!
//! Crossover is single-parent: a child copies its integer genes from one
//! parent and never blends two parents. Categorical genes are redrawn for
//! every child regardless of parentage.

use rand::Rng;

use super::{GeneRole, Genes, Individual, ParameterSpace, Population};

/// Sample `size` unevaluated individuals uniformly from `space`.
pub fn initial_population<R: Rng + ?Sized>(
    space: &ParameterSpace,
    size: usize,
    rng: &mut R,
) -> Population {
    (0..size)
        .map(|_| Individual::new(space.sample_genes(rng)))
        .collect()
}

/// The parent pool: the top `parent_count` individuals of a ranked population.
#[must_use]
pub fn select_parents(ranked: &Population, parent_count: usize) -> Vec<Individual> {
    ranked.top_k(parent_count).to_vec()
}

/// Breed one child from a uniformly chosen parent.
///
/// # Panics
///
/// Panics if `parents` is empty or a domain in `space` is empty.
pub fn breed_child<R: Rng + ?Sized>(
    parents: &[Individual],
    space: &ParameterSpace,
    mutation_rate: f64,
    rng: &mut R,
) -> Individual {
    let parent = &parents[rng.gen_range(0..parents.len())];
    let mut genes = Genes::new();

    for param in space.iter().filter(|p| p.domain.role() == GeneRole::Resampled) {
        genes = genes.with(&param.name, param.domain.sample(rng));
    }

    for param in space.iter().filter(|p| p.domain.role() == GeneRole::Inherited) {
        let mutate = rng.gen::<f64>() < mutation_rate;
        let value = match parent.genes().get(&param.name) {
            Some(inherited) if !mutate => inherited.clone(),
            _ => param.domain.sample(rng),
        };
        genes = genes.with(&param.name, value);
    }

    Individual::new(genes)
}

/// Produce `size` unevaluated children from `parents`.
///
/// # Panics
///
/// Panics if `parents` is empty while `size > 0`.
pub fn breed<R: Rng + ?Sized>(
    parents: &[Individual],
    space: &ParameterSpace,
    size: usize,
    mutation_rate: f64,
    rng: &mut R,
) -> Population {
    (0..size)
        .map(|_| {
            let child = breed_child(parents, space, mutation_rate, rng);
            tracing::debug!(genes = %child.genes(), "bred child");
            child
        })
        .collect()
}

/// Select the parent pool from `ranked` and breed a full next generation.
pub fn next_generation<R: Rng + ?Sized>(
    ranked: &Population,
    space: &ParameterSpace,
    parent_count: usize,
    mutation_rate: f64,
    rng: &mut R,
) -> Population {
    let parents = select_parents(ranked, parent_count);
    breed(&parents, space, ranked.len(), mutation_rate, rng)
}

#[cfg(test)]
#[path = "variation_tests.rs"]
mod tests;
