//! Plausible customer bodies for populating the in-memory store at boot.

use rand::Rng;
use serde_json::{json, Value};

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Amelia", "Oliver", "Sophia", "Elijah", "Charlotte", "James",
    "Mia", "Lucas", "Harper", "Mateo", "Evelyn", "Henry", "Aria", "Theodore", "Luna", "Kai",
    "Isla", "Hugo", "Freya", "Milo", "Nora", "Ezra", "Zoe", "Felix", "Ines", "Tomas",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Kowalski", "Nguyen", "Okafor", "Muller", "Rossi", "Tanaka", "Silva", "Jensen",
    "Dubois", "Novak", "Haddad", "Larsen", "Moreau", "Fischer", "Costa", "Lindqvist", "Ahmed", "Walsh",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test", "inbox.test"];

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// One `{name, email}` body: a first name and an address derived from it.
pub fn random_customer<R: Rng>(rng: &mut R) -> Value {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let domain = pick(rng, DOMAINS);
    let email = match rng.gen_range(0..3) {
        0 => format!("{}.{}@{}", first, last, domain),
        1 => format!("{}_{}{}@{}", first, last, rng.gen_range(1..100), domain),
        _ => format!("{}{}@{}", &first[..1], last, domain),
    };
    json!({ "name": first, "email": email.to_lowercase() })
}

/// `count` bodies from the thread-local generator.
pub fn random_customers(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| random_customer(&mut rng)).collect()
}
