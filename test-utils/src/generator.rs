//! Randomized and unique scalar values for test fixtures.
//!
//! Only [`name`] is unique within the process, through the shared counter behind
//! [`next_unique_id`]. The other generators draw random tokens and can collide,
//! however unlikely.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use rand::{seq::IndexedRandom, Rng};

use crate::error::TestError;

/// Counter shared by every generator in the process. Never reset.
static COUNTER: AtomicU64 = AtomicU64::new(1);

const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_SUFFIX_LENGTH: usize = 6;

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Maple Dr", "Cedar Ln", "Elm St", "Park Rd", "Hill St", "Lake Ave",
];

const CITIES: &[&str] = &[
    "Springfield",
    "Riverside",
    "Fairview",
    "Greenville",
    "Franklin",
    "Madison",
];

const SUBJECTS: &[&str] = &[
    "Mathematics",
    "English",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Art",
    "Music",
    "Computer Science",
];

/// Gets the next value of the process-wide counter, starting at 1.
pub fn next_unique_id() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

fn random_token(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Current time in milliseconds followed by a short random suffix, e.g. `1760000000000-k3x9qa`.
pub fn timestamp_token() -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        random_token(TOKEN_SUFFIX_LENGTH)
    )
}

/// Email address such as `teacher.1760000000000-k3x9qa@example.test`.
///
/// # Arguments
/// - `prefix` - Local-part prefix, `"user"` when `None`
pub fn email(prefix: Option<&str>) -> String {
    format!(
        "{}.{}@example.test",
        prefix.unwrap_or("user"),
        timestamp_token()
    )
}

/// Phone number shaped like `555-123-4567`.
pub fn phone() -> String {
    let mut rng = rand::rng();

    format!(
        "555-{:03}-{:04}",
        rng.random_range(0..1000),
        rng.random_range(0..10000)
    )
}

/// Display name embedding the unique counter, e.g. `School 12`.
///
/// # Arguments
/// - `prefix` - Leading word, `"Name"` when `None`
pub fn name(prefix: Option<&str>) -> String {
    format!("{} {}", prefix.unwrap_or("Name"), next_unique_id())
}

/// Street address such as `742 Oak Ave, Springfield`.
pub fn address() -> String {
    let mut rng = rand::rng();
    let street = STREETS.choose(&mut rng).copied().unwrap_or("Main St");
    let city = CITIES.choose(&mut rng).copied().unwrap_or("Springfield");

    format!("{} {}, {}", rng.random_range(1..10000), street, city)
}

/// Teaching subject picked from a fixed list.
pub fn subject() -> String {
    random_choice(SUBJECTS)
        .copied()
        .unwrap_or("Mathematics")
        .to_string()
}

/// Picks a random element, `None` for an empty slice.
pub fn random_choice<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::rng())
}

/// Fair coin flip.
///
/// # Returns
/// `true` or `false` with equal probability.
pub fn random_bool() -> bool {
    rand::rng().random_bool(0.5)
}

/// Random integer in the inclusive range `min..=max`.
///
/// # Returns
/// - `Ok(i64)` - Value within the range
/// - `Err(TestError::InvalidRange)` - `min` is greater than `max`
pub fn random_int(min: i64, max: i64) -> Result<i64, TestError> {
    if min > max {
        return Err(TestError::InvalidRange { min, max });
    }

    Ok(rand::rng().random_range(min..=max))
}
