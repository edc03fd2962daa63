//! # Questionnaire walkthrough
//!
//! Three respondents take the reference `clarity` questionnaire. Shows the
//! shuffled presentation order, reverse scoring, per-axis and global zones,
//! defaulted answers and the strict policy rejecting a bad sheet.
//!
//! ```bash
//! RUST_LOG=clarity_core=debug cargo run --example questionnaire
//! ```

use clarity_core::builtin::CLARITY_TEST_ID;
use clarity_core::{Answers, Engine, ScoringPolicy, ScoringResult, TestCatalog};
use tracing_subscriber::{fmt, EnvFilter};

// ── Logging ──────────────────────────────────────────────────────────────────

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ── Respondents ──────────────────────────────────────────────────────────────

fn sheet(pairs: &[(&str, i32)]) -> Answers {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Mostly untroubled; agrees strongly with the reversed boundaries item.
fn ana() -> Answers {
    sheet(&[
        ("n1", 1), ("n2", 0), ("n3", 1), ("n4", 0),
        ("m1", 1), ("m2", 1), ("m3", 0), ("m4", 1),
        ("l1", 0), ("l2", 1), ("l3", 0), ("l4", 4),
    ])
}

/// Fear-dominated, fog around the middle band.
fn bruno() -> Answers {
    sheet(&[
        ("n1", 2), ("n2", 2), ("n3", 1), ("n4", 3),
        ("m1", 4), ("m2", 3), ("m3", 4), ("m4", 3),
        ("l1", 2), ("l2", 3), ("l3", 2), ("l4", 1),
    ])
}

/// Stopped after the first half; the rest defaults to the scale minimum.
fn carla() -> Answers {
    sheet(&[("n1", 4), ("n2", 4), ("n3", 3), ("n4", 4), ("m1", 2), ("m2", 3)])
}

// ── Printing ─────────────────────────────────────────────────────────────────

fn print_result(name: &str, result: &ScoringResult) {
    println!("  {name}: global {} → {}", result.global_total, result.global_zone);
    for (axis, total) in &result.axis_totals {
        let zone = result.axis_zone(axis).unwrap_or("?");
        println!("    {axis:<8} {total:>3}  {zone}");
    }
    if !result.defaulted.is_empty() {
        println!("    defaulted: {}", result.defaulted.join(", "));
    }
}

fn main() {
    init_logging("info");

    let engine = Engine::new(TestCatalog::builtin());

    println!("══ Schema ══");
    let schema = engine.schema(CLARITY_TEST_ID).expect("builtin test");
    println!("  {} v{}: {}", schema.id, schema.version, schema.title);
    let options: Vec<String> = schema
        .scale
        .iter()
        .map(|o| format!("{}={}", o.value, o.label))
        .collect();
    println!("  scale: {}", options.join(" | "));
    for axis in &schema.axes {
        let zones: Vec<String> = axis
            .range
            .zones
            .iter()
            .map(|z| format!("{} {}..={}", z.label, z.min, z.max))
            .collect();
        println!("  {:<8} {} questions, {}", axis.label, axis.question_count, zones.join(", "));
    }

    println!();
    println!("══ Presentation order ══");
    for (i, q) in engine
        .list_questions(CLARITY_TEST_ID)
        .expect("builtin test")
        .iter()
        .enumerate()
    {
        println!("  {:>2}. [{}] {}", i + 1, q.axis, q.text);
    }

    println!();
    println!("══ Results ══");
    for (name, answers) in [("Ana", ana()), ("Bruno", bruno()), ("Carla", carla())] {
        match engine.submit(CLARITY_TEST_ID, &answers) {
            Ok(result) => print_result(name, &result),
            Err(err) => println!("  {name}: {err}"),
        }
    }

    println!();
    println!("══ Strict policy ══");
    let strict = Engine::with_policy(TestCatalog::builtin(), ScoringPolicy::strict());
    let mut typo = ana();
    typo.insert("m5".into(), 2);
    for (name, answers) in [("Carla", carla()), ("Ana (typo)", typo)] {
        match strict.submit(CLARITY_TEST_ID, &answers) {
            Ok(result) => print_result(name, &result),
            Err(err) => println!("  {name}: rejected, {err}"),
        }
    }
}
