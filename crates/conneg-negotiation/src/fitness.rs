//! Scoring how well two media types fit each other.
//!
//! A [`Score`] ranks a match first by specificity, then by the product of both
//! quality factors, and finally by the position of the matched candidate, with
//! earlier candidates preferred. "No match" is `None`, which orders below every
//! `Some(score)`.

use std::cmp::Ordering;

use tracing::trace;

use crate::media_type::MediaType;

const WILDCARD: &str = "*";
const QUALITY_PARAM: &str = "q";

const TYPE_WEIGHT: u32 = 100;
const SUBTYPE_WEIGHT: u32 = 10;
const PARAM_WEIGHT: u32 = 1;

/// Number of decimal places kept in a combined quality factor.
const QUALITY_PRECISION: i32 = 3;

/// Fitness of one media type against another.
#[derive(Debug, Clone, Copy, Default)]
pub struct Score {
	/// Specificity: 100 for equal types, 10 for equal subtypes, 1 per shared parameter.
	pub value: u32,
	/// Product of both quality factors, rounded to three decimals.
	pub q: f64,
	/// Position of the matched candidate; lower wins ties.
	pub index: usize,
}

impl Score {
	/// Creates a score from its three ranking keys.
	pub fn new(value: u32, q: f64, index: usize) -> Self {
		Self { value, q, index }
	}

	/// Returns this score positioned at `index`.
	pub fn with_index(mut self, index: usize) -> Self {
		self.index = index;
		self
	}

	/// Compares against a possibly absent score.
	///
	/// # Examples
	///
	/// ```
	/// use std::cmp::Ordering;
	/// use conneg_negotiation::fitness::Score;
	///
	/// let a = Score::new(110, 1.0, 0);
	/// assert_eq!(a.compare(None), Ordering::Greater);
	/// assert_eq!(a.compare(Some(&Score::new(110, 1.0, 1))), Ordering::Greater);
	/// assert_eq!(a.compare(Some(&Score::new(110, 1.0, 0))), Ordering::Equal);
	/// ```
	pub fn compare(&self, other: Option<&Score>) -> Ordering {
		let Some(other) = other else {
			return Ordering::Greater;
		};

		self.value
			.cmp(&other.value)
			.then_with(|| cmp_quality(self.q, other.q))
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl PartialEq for Score {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Score {}

impl PartialOrd for Score {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Score {
	fn cmp(&self, other: &Self) -> Ordering {
		self.compare(Some(other))
	}
}

// Total over all f64: NaN falls back to `total_cmp`, signed zeros stay equal.
fn cmp_quality(a: f64, b: f64) -> Ordering {
	a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Scores how closely `a` and `b` match, or `None` if they are incompatible.
///
/// Equal type strings add 100 and equal subtype strings add 10, so `*/*` against
/// `*/*` scores like an exact match. Each non-`q` parameter of `a` with the same
/// value in `b` adds 1.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::MediaType;
/// use conneg_negotiation::fitness;
///
/// let a = MediaType::parse("text/plain;q=0.8").unwrap();
/// let b = MediaType::parse("text/plain;q=0.2").unwrap();
/// let score = fitness::score(&a, &b).unwrap();
/// assert_eq!(score.value, 110);
/// assert_eq!(score.q, 0.16);
///
/// let audio = MediaType::parse("audio/basic").unwrap();
/// assert!(fitness::score(&a, &audio).is_none());
/// ```
pub fn score(a: &MediaType, b: &MediaType) -> Option<Score> {
	if !compatible(a.type_(), b.type_()) || !compatible(a.subtype(), b.subtype()) {
		return None;
	}

	let mut value = 0;
	if a.type_() == b.type_() {
		value += TYPE_WEIGHT;
	}
	if a.subtype() == b.subtype() {
		value += SUBTYPE_WEIGHT;
	}
	for (name, expected) in a.params() {
		if name != QUALITY_PARAM && b.params().get(name) == Some(expected) {
			value += PARAM_WEIGHT;
		}
	}

	Some(Score {
		value,
		q: to_fixed(a.quality() * b.quality(), QUALITY_PRECISION),
		index: 0,
	})
}

fn compatible(a: &str, b: &str) -> bool {
	a == b || a == WILDCARD || b == WILDCARD
}

/// Finds the highest score of `m` against `candidates`.
///
/// The returned score's `index` is the position of the winning candidate. On a
/// tie the earliest candidate wins.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::MediaType;
/// use conneg_negotiation::fitness;
///
/// let any = MediaType::parse("*/*").unwrap();
/// let offers = vec![
///     MediaType::parse("application/json").unwrap(),
///     MediaType::parse("application/yaml").unwrap(),
/// ];
/// assert_eq!(fitness::best_match(&any, &offers).unwrap().index, 0);
/// ```
pub fn best_match(m: &MediaType, candidates: &[MediaType]) -> Option<Score> {
	let mut best: Option<Score> = None;

	for (index, candidate) in candidates.iter().enumerate() {
		let Some(score) = score(m, candidate) else {
			continue;
		};
		let score = score.with_index(index);
		trace!(
			accepted = %m,
			candidate = %candidate,
			value = score.value,
			q = score.q,
			"scored candidate"
		);
		if score.compare(best.as_ref()) == Ordering::Greater {
			best = Some(score);
		}
	}

	best
}

/// Rounds half away from zero at `precision` decimal places.
fn to_fixed(num: f64, precision: i32) -> f64 {
	let scale = 10_f64.powi(precision);
	round_half_away_from_zero(num * scale) / scale
}

fn round_half_away_from_zero(num: f64) -> f64 {
	(num + 0.5_f64.copysign(num)).trunc()
}
