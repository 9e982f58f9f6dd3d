//! # Test Data
//!
//! Random but valid products for demos and load testing.

use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

use super::model::{Category, NewProduct};

const ADJECTIVES: &[&str] = &[
    "Compact", "Deluxe", "Classic", "Wireless", "Organic", "Vintage", "Smart", "Portable",
    "Premium", "Rugged",
];

const NOUNS: &[&str] = &[
    "Headphones", "Jacket", "Coffee", "Keyboard", "Sneakers", "Honey", "Lamp", "Backpack",
    "Tea", "Monitor",
];

const WORDS: &[&str] = &[
    "quality", "everyday", "design", "built", "comfort", "light", "durable", "fresh", "value",
    "simple", "crafted", "reliable",
];

/// Generate `count` random products.
///
/// Prices fall in [10, 1000] with two decimals; quantities in [1, 100].
pub fn random_products<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<NewProduct> {
    (0..count).map(|_| random_product(rng)).collect()
}

fn random_product<R: Rng + ?Sized>(rng: &mut R) -> NewProduct {
    let name = format!(
        "{} {}",
        ADJECTIVES.choose(rng).copied().unwrap_or("Plain"),
        NOUNS.choose(rng).copied().unwrap_or("Item")
    );

    let sentence_len = rng.gen_range(4..=9);
    let mut description: Vec<&str> = (0..sentence_len)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect();
    description.dedup();
    let mut description = description.join(" ");
    if let Some(first) = description.get(..1) {
        description = format!("{}{}.", first.to_uppercase(), &description[1..]);
    }

    let cents: i64 = rng.gen_range(1_000..=100_000);
    let quantity = rng.gen_range(1..=100);
    let category = Category::ALL
        .choose(rng)
        .copied()
        .unwrap_or(Category::Electronics);

    NewProduct {
        name,
        description,
        quantity,
        category,
        price: Decimal::new(cents, 2),
    }
}
