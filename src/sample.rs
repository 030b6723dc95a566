//! Synthetic waitlist entries for exercising a backend.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Entry;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Casey", "Morgan", "Riley", "Avery", "Quinn", "Blake", "Cameron",
    "Drew", "Emery", "Finley", "Hayden", "Jamie", "Kendall", "Logan", "Peyton", "Reese", "Sage",
    "Skyler", "Sydney", "Tatum", "River",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Davis", "Garcia", "Johnson", "Jones", "Miller", "Rodriguez", "Smith",
    "Taylor", "Thomas", "Wilson", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
    "Harris", "Sanchez", "Clark",
];

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

const DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com", "icloud.com"];

const LINKEDIN_PROBABILITY: f64 = 0.7;
const TWITTER_PROBABILITY: f64 = 0.5;

/// Generate `count` entries with the thread-local RNG.
pub fn generate_sample_data(count: usize) -> Vec<Entry> {
    generate_with_rng(&mut rand::thread_rng(), count)
}

/// Generate `count` entries from the given RNG. Emails carry the generation
/// index, so they are unique even when name pairs repeat.
pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Entry> {
    (0..count).map(|i| sample_entry(rng, i)).collect()
}

fn sample_entry<R: Rng + ?Sized>(rng: &mut R, index: usize) -> Entry {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let (first_lc, last_lc) = (first.to_lowercase(), last.to_lowercase());
    let domain = pick(rng, DOMAINS);
    let handle = format!("@{}{}", first_lc, last_lc);

    Entry {
        email: format!("{}.{}{}@{}", first_lc, last_lc, index, domain),
        name: format!("{} {}", first, last),
        phone: generate_phone(rng),
        gender: pick(rng, GENDERS).to_string(),
        age: rng.gen_range(18..=35),
        instagram: handle.clone(),
        linkedin: rng
            .gen_bool(LINKEDIN_PROBABILITY)
            .then(|| format!("linkedin.com/in/{}-{}", first_lc, last_lc)),
        twitter: rng.gen_bool(TWITTER_PROBABILITY).then_some(handle),
        batch_number: Some(rng.gen_range(1..=5)),
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// US-style number; no numbering-plan validity check.
fn generate_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let area_code = rng.gen_range(200..=999);
    let exchange = rng.gen_range(200..=999);
    let line = rng.gen_range(1000..=9999);
    format!("+1{}{}{}", area_code, exchange, line)
}
