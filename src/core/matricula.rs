//! Matrícula (employee identifier) generation
//!
//! A matrícula packs four fields into six characters:
//!
//! ```text
//! 1 1 001 7
//! | | |   `- check digit, drawn at random (0-9)
//! | | `----- sequence: decimal up to 999, uppercase hex from 1000 (3E8)
//! | `------- job level within the department (0 if unmapped)
//! `--------- department digit (0 if unmapped)
//! ```
//!
//! The sequence is a single plant-wide counter recomputed from the records
//! passed in: the highest sequence among well-formed identifiers, plus one.
//! There is no persisted counter, so deleting the record holding the highest
//! sequence frees that value for the next hire.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::core::catalog::{department_digit, job_level_digit};

/// Length of a well-formed matrícula, in characters
pub const MATRICULA_LEN: usize = 6;

/// Largest sequence rendered in decimal
pub const DECIMAL_SEQUENCE_MAX: u32 = 999;

/// Largest sequence that still fits the three-character field
pub const SEQUENCE_FIELD_MAX: u32 = 0xFFF;

/// Source of the trailing check digit
pub trait DigitSource {
    /// Draw one digit in `0..=9`
    fn next_digit(&mut self) -> u8;
}

/// Uniform random digits from any [`rand::Rng`]
#[derive(Debug)]
pub struct RandomDigits<R> {
    rng: R,
}

impl<R: Rng> RandomDigits<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDigits<ThreadRng> {
    /// Digits from the thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> DigitSource for RandomDigits<R> {
    fn next_digit(&mut self) -> u8 {
        self.rng.random_range(0..=9)
    }
}

/// Always yields the same digit
#[derive(Debug, Clone, Copy)]
pub struct FixedDigit(pub u8);

impl DigitSource for FixedDigit {
    fn next_digit(&mut self) -> u8 {
        self.0 % 10
    }
}

/// Parse the sequence field of an existing matrícula
///
/// Returns `None` for identifiers that are not exactly six characters long or
/// whose sequence field parses neither as decimal nor as hexadecimal. A `0x`
/// prefix is accepted on the hex form. Underscore separators are not, so a
/// field like `1_F` counts as malformed.
pub fn sequence_of(matricula: &str) -> Option<u32> {
    let chars: Vec<char> = matricula.chars().collect();
    if chars.len() != MATRICULA_LEN {
        return None;
    }
    let field: String = chars[2..5].iter().collect();

    field
        .parse::<u32>()
        .ok()
        .or_else(|| {
            let hex = field
                .strip_prefix("0x")
                .or_else(|| field.strip_prefix("0X"))
                .unwrap_or(&field);
            u32::from_str_radix(hex, 16).ok()
        })
}

/// Next sequence number given every identifier currently on file
pub fn next_sequence<'a, I>(existing: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut max: u32 = 0;
    for matricula in existing {
        match sequence_of(matricula) {
            Some(seq) => max = max.max(seq),
            None => tracing::debug!(matricula, "skipping malformed matrícula"),
        }
    }
    max + 1
}

/// Render a sequence number into the three-character field
pub fn format_sequence(sequence: u32) -> String {
    if sequence <= DECIMAL_SEQUENCE_MAX {
        format!("{:03}", sequence)
    } else {
        if sequence > SEQUENCE_FIELD_MAX {
            tracing::warn!(
                sequence,
                "sequence no longer fits three hex digits; matrícula will be longer than {} characters",
                MATRICULA_LEN
            );
        } else {
            tracing::info!(sequence, "sequence rendered as hexadecimal");
        }
        format!("{:03X}", sequence)
    }
}

/// Generate a matrícula for a new hire
///
/// `department` is a department code (e.g., "OPERACIONAL") and `title` a job
/// title from the catalog; either one degrades to `0` when unmapped.
/// `existing` must cover every record on file, whatever its department.
pub fn generate<'a, I, D>(department: &str, title: &str, existing: I, digits: &mut D) -> String
where
    I: IntoIterator<Item = &'a str>,
    D: DigitSource + ?Sized,
{
    let sequence = next_sequence(existing);

    let mut matricula = String::with_capacity(MATRICULA_LEN);
    matricula.push(department_digit(department));
    matricula.push(job_level_digit(title));
    matricula.push_str(&format_sequence(sequence));
    matricula.push(char::from(b'0' + digits.next_digit() % 10));
    matricula
}
