/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Presentation order for a test's questions.
//!
//! When a definition asks for randomized presentation, questions are shuffled
//! with Fisher–Yates: for `i` from `n - 1` down to `1`, draw `j` uniformly from
//! `[0, i]` and swap positions `i` and `j`.
//!
//! The random source is a parameter. [`presentation_order`] uses the calling
//! thread's generator and is unseeded, so two sessions see different
//! orders; tests pass a seeded generator to
//! [`presentation_order_with`]. Nothing here can affect a score, because the
//! scorer keys answers by question id.

use alloc::vec::Vec;

use rand::Rng;

use crate::definition::TestDefinition;
use crate::question::Question;

/// In-place Fisher–Yates shuffle.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Questions in the order they should be shown, drawing from `rng`.
///
/// Returns the canonical order untouched when
/// [`randomize_presentation`](TestDefinition::randomize_presentation) is off.
/// The definition itself is never reordered.
pub fn presentation_order_with<'d, R: Rng + ?Sized>(
    definition: &'d TestDefinition,
    rng: &mut R,
) -> Vec<&'d Question> {
    let mut order: Vec<&Question> = definition.questions.iter().collect();
    if definition.randomize_presentation {
        fisher_yates(&mut order, rng);
    }
    tracing::trace!(
        test_id = %definition.id,
        version = definition.version,
        shuffled = definition.randomize_presentation,
        "presentation order built"
    );
    order
}

/// Questions in presentation order, shuffled with the thread-local generator.
#[cfg(feature = "std")]
pub fn presentation_order(definition: &TestDefinition) -> Vec<&Question> {
    presentation_order_with(definition, &mut rand::thread_rng())
}
