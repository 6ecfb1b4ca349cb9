//! Property-based tests for rule algebra, refinement and accumulation

use proptest::prelude::*;
use sluice::predicate::prelude::*;
use sluice::refined::{PosInt, Percentage};
use sluice::rule::not;
use sluice::{Refined, Validation, ValidationErrors};

fn small() -> impl Strategy<Value = i64> {
    -1_000i64..1_000
}

proptest! {
    #[test]
    fn prop_not_inverts(x in small(), bound in small()) {
        let rule: Rule<i64> = gt(bound).into();
        prop_assert_eq!(not(rule.clone()).evaluate(&x), !rule.evaluate(&x));
        prop_assert_eq!((!rule.clone()).evaluate(&x), !rule.evaluate(&x));
    }

    #[test]
    fn prop_double_negation(x in small(), bound in small()) {
        let rule: Rule<i64> = le(bound).into();
        prop_assert_eq!(not(not(rule.clone())).evaluate(&x), rule.evaluate(&x));
    }

    #[test]
    fn prop_and_is_conjunction(x in small(), lo in small(), hi in small()) {
        let left: Rule<i64> = ge(lo).into();
        let right: Rule<i64> = lt(hi).into();
        let both = left.clone().and(right.clone());
        prop_assert_eq!(both.evaluate(&x), left.evaluate(&x) && right.evaluate(&x));
        prop_assert_eq!(both.check(&x).is_ok(), both.evaluate(&x));
    }

    #[test]
    fn prop_or_is_disjunction(x in small(), lo in small(), hi in small()) {
        let left: Rule<i64> = lt(lo).into();
        let right: Rule<i64> = gt(hi).into();
        let either = left.clone() | right.clone();
        prop_assert_eq!(either.evaluate(&x), left.evaluate(&x) || right.evaluate(&x));
        prop_assert_eq!(either.check(&x).is_ok(), either.evaluate(&x));
    }

    #[test]
    fn prop_de_morgan(x in small(), a in small(), b in small()) {
        let p: Rule<i64> = gt(a).into();
        let q: Rule<i64> = divisible(b.abs() + 1).into();
        let lhs = not(p.clone().and(q.clone()));
        let rhs = not(p).or(not(q));
        prop_assert_eq!(lhs.evaluate(&x), rhs.evaluate(&x));
    }

    #[test]
    fn prop_all_of_matches_iterated_and(x in small(), bounds in prop::collection::vec(small(), 0..6)) {
        let rules: Vec<Rule<i64>> = bounds.iter().map(|b| Rule::from(ge(*b))).collect();
        let expected = bounds.iter().all(|b| x >= *b);
        prop_assert_eq!(Rule::<i64>::all_of(rules.clone()).evaluate(&x), expected);
        prop_assert_eq!(Rule::<i64>::all_of(rules).check(&x).is_ok(), expected);
    }

    #[test]
    fn prop_any_of_matches_iterated_or(x in small(), bounds in prop::collection::vec(small(), 0..6)) {
        let rules: Vec<Rule<i64>> = bounds.iter().map(|b| Rule::from(eq(*b))).collect();
        let expected = bounds.contains(&x);
        prop_assert_eq!(Rule::<i64>::any_of(rules.clone()).evaluate(&x), expected);

        if let Err(failure) = Rule::<i64>::any_of(rules).check(&x) {
            prop_assert_eq!(failure.leaves().len(), bounds.len());
        }
    }

    #[test]
    fn prop_refined_round_trip(x in 1i32..i32::MAX) {
        let refined = PosInt::<i32>::new(x).unwrap();
        prop_assert_eq!(refined.into_inner(), x);
    }

    #[test]
    fn prop_refinement_is_idempotent(x in -200i32..200) {
        if let Ok(first) = Percentage::<i32>::new(x) {
            let again = Percentage::<i32>::new(first.into_inner()).unwrap();
            prop_assert_eq!(*again, x);
        } else {
            prop_assert!(!(0..=100).contains(&x));
        }
    }

    #[test]
    fn prop_refinement_agrees_with_rule(s in "[a-zA-Z0-9 ]{0,24}") {
        let rule = Rule::<String>::all_of([
            Rule::leaf(non_empty()),
            Rule::leaf(max_size(20)),
            Rule::leaf(trimmed()),
        ]);
        let refined = Refined::<String, sluice::refined::TrimmedText>::new(s.clone());
        prop_assert_eq!(refined.is_ok(), trimmed().evaluate(&s));
        prop_assert_eq!(rule.check(&s).is_ok(), rule.evaluate(&s));
    }

    #[test]
    fn prop_accumulation_is_complete(values in prop::collection::vec(-50i32..50, 1..12)) {
        let validations: Vec<Validation<PosInt<i32>, ValidationErrors>> = values
            .iter()
            .enumerate()
            .map(|(i, v)| PosInt::<i32>::validate_field(*v, i))
            .collect();

        let invalid: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v <= 0)
            .map(|(i, _)| i)
            .collect();

        match Validation::all_vec(validations) {
            Validation::Success(all) => {
                prop_assert!(invalid.is_empty());
                prop_assert_eq!(all.len(), values.len());
            }
            Validation::Failure(errors) => {
                prop_assert_eq!(errors.len(), invalid.len());
                let reported: Vec<String> = errors
                    .iter()
                    .filter_map(|e| e.path().map(ToString::to_string))
                    .collect();
                let expected: Vec<String> = invalid.iter().map(|i| format!("[{}]", i)).collect();
                prop_assert_eq!(reported, expected);
            }
        }
    }
}
