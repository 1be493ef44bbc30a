//! Property-based tests for media type parsing and scoring.

use std::cmp::Ordering;

use conneg_negotiation::fitness::{self, Score};
use conneg_negotiation::{Accepts, MediaType};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
	"[a-z][a-z0-9.+-]{0,8}"
}

fn type_or_wildcard() -> impl Strategy<Value = String> {
	prop_oneof![1 => Just("*".to_string()), 4 => token()]
}

fn quality() -> impl Strategy<Value = f64> {
	(0u32..=1000).prop_map(|millis| f64::from(millis) / 1000.0)
}

/// Short strings drawn from token characters, separators, whitespace and line breaks.
fn loose_text() -> impl Strategy<Value = String> {
	let chars = vec!['a', 'Z', '*', '+', '/', ';', '=', ',', '"', '\\', ' ', '\t', '\r', '\n', 'é'];
	prop::collection::vec(prop::sample::select(chars), 0..6)
		.prop_map(|chars| chars.into_iter().collect::<String>())
}

prop_compose! {
	fn media_type()(
		type_ in type_or_wildcard(),
		subtype in type_or_wildcard(),
		params in prop::collection::btree_map("[a-p]{1,4}", "[a-z0-9]{1,4}", 0..3),
		q in prop::option::of(quality()),
	) -> MediaType {
		let mut mt = MediaType::new(type_, subtype).unwrap();
		for (name, value) in params {
			mt = mt.with_param(name, value).unwrap();
		}
		match q {
			Some(q) => mt.with_quality(q).unwrap(),
			None => mt,
		}
	}
}

proptest! {
	/// Formatting then parsing yields an equal media type.
	#[test]
	fn prop_format_parse_roundtrip(mt in media_type()) {
		let formatted = mt.to_string();
		let parsed = MediaType::parse(&formatted).unwrap();

		prop_assert_eq!(&parsed, &mt);
		prop_assert_eq!(parsed.quality(), mt.quality());
		prop_assert_eq!(parsed.to_string(), formatted);
	}

	/// Whatever the builders accept formats to a string that parses back to it.
	#[test]
	fn prop_built_media_type_reparses(
		type_ in loose_text(),
		subtype in loose_text(),
		value in loose_text(),
		q in prop::num::f64::ANY,
	) {
		let built = MediaType::new(&type_, &subtype)
			.and_then(|mt| mt.with_param("p", value.as_str()))
			.and_then(|mt| mt.with_quality(q));

		if let Ok(mt) = built {
			let reparsed = MediaType::parse(&mt.to_string());
			prop_assert_eq!(reparsed.as_ref(), Ok(&mt));
			prop_assert_eq!(reparsed.map(|r| r.quality()), Ok(q));
		}
	}

	/// Scoring is symmetric in value and quality.
	#[test]
	fn prop_score_is_symmetric(a in media_type(), b in media_type()) {
		let ab = fitness::score(&a, &b);
		let ba = fitness::score(&b, &a);

		prop_assert_eq!(ab.is_some(), ba.is_some());
		if let (Some(ab), Some(ba)) = (ab, ba) {
			prop_assert_eq!(ab.value, ba.value);
			prop_assert_eq!(ab.q, ba.q);
		}
	}

	/// The combined quality is rounded to three decimals.
	#[test]
	fn prop_combined_quality_has_three_decimals(a in quality(), b in quality()) {
		let x = MediaType::any().with_quality(a).unwrap();
		let y = MediaType::any().with_quality(b).unwrap();

		let score = fitness::score(&x, &y).unwrap();

		let millis = score.q * 1000.0;
		prop_assert!((millis - millis.round()).abs() < 1e-6);
		prop_assert!((score.q - a * b).abs() <= 0.0005 + 1e-12);
	}

	/// The best match scores at least as high as every other candidate.
	#[test]
	fn prop_best_match_is_maximal(
		m in media_type(),
		candidates in prop::collection::vec(media_type(), 0..6),
	) {
		let best = fitness::best_match(&m, &candidates);

		for (index, candidate) in candidates.iter().enumerate() {
			let score = fitness::score(&m, candidate).map(|s| s.with_index(index));
			prop_assert_ne!(score.cmp(&best), Ordering::Greater);
		}
		if let Some(best) = best {
			prop_assert!(fitness::score(&m, &candidates[best.index]).is_some());
		}
	}

	/// An absent score never outranks a present one.
	#[test]
	fn prop_absent_score_is_least(value in 0u32..200, millis in 0u32..=1000, index in 0usize..10) {
		let score = Score::new(value, f64::from(millis) / 1000.0, index);
		prop_assert_eq!(score.compare(None), Ordering::Greater);
	}

	/// Reordering the Accept header does not change the chosen offer.
	#[test]
	fn prop_accept_order_is_irrelevant(
		accepted in prop::collection::vec(media_type(), 1..5),
		offers in prop::collection::vec(media_type(), 0..5),
	) {
		let forward = Accepts::from(accepted.clone());
		let reverse = Accepts::from(accepted.into_iter().rev().collect::<Vec<_>>());

		prop_assert_eq!(forward.best_match_index(&offers), reverse.best_match_index(&offers));
	}
}

#[test]
fn test_specificity_ordering_at_equal_quality() {
	let offer = [MediaType::parse("text/plain").unwrap()];
	let exact = fitness::best_match(&MediaType::parse("text/plain").unwrap(), &offer).unwrap();
	let subtype = fitness::best_match(&MediaType::parse("text/*").unwrap(), &offer).unwrap();
	let any = fitness::best_match(&MediaType::parse("*/*").unwrap(), &offer).unwrap();

	assert!(exact > subtype);
	assert!(subtype > any);
}
