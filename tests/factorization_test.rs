// tests/factorization_test.rs
//
// End-to-end coverage of the full pipeline through the public API, plus the
// concrete scenarios worked through the spec.

use num::BigInt;
use qsieve::core::cancellation_token::CancellationToken;
use qsieve::core::counters::Counters;
use qsieve::factor_base::FactorBase;
use qsieve::integer_math::bigint_math::BigIntMath;
use qsieve::integer_math::legendre::Legendre;
use qsieve::matrix::BitMatrix;
use qsieve::orchestrator::Orchestrator;
use qsieve::sieve::SieveArray;
use qsieve::{combine, sieve::input_builder::InputBuilder, sieve::smoothness::sieve_shard};

#[test]
fn factors_5959_into_59_and_101() {
    let orchestrator = Orchestrator::new(10, 1 << 16);
    let (f1, f2) = orchestrator.run(&BigInt::from(5959), Some(2)).unwrap();

    assert!(f1 > BigInt::from(1) && f1 < BigInt::from(5959));
    assert!(f2 > BigInt::from(1) && f2 < BigInt::from(5959));
    assert_eq!(&f1 * &f2, BigInt::from(5959));

    let mut factors = [f1, f2];
    factors.sort();
    assert_eq!(factors, [BigInt::from(59), BigInt::from(101)]);
}

#[test]
fn factors_15_into_3_and_5() {
    let orchestrator = Orchestrator::new(10, 1 << 16);
    let (f1, f2) = orchestrator.run(&BigInt::from(15), Some(2)).unwrap();

    let mut factors = [f1, f2];
    factors.sort();
    assert_eq!(factors, [BigInt::from(3), BigInt::from(5)]);
}

#[test]
fn sqrt_and_is_square_scenarios() {
    assert_eq!(BigIntMath::sqrt(&BigInt::from(16)).unwrap(), BigInt::from(4));
    assert!(BigIntMath::is_square(&BigInt::from(16)));
    assert_eq!(BigIntMath::sqrt(&BigInt::from(17)).unwrap(), BigInt::from(4));
    assert!(!BigIntMath::is_square(&BigInt::from(17)));
}

#[test]
fn legendre_symbol_scenarios() {
    assert_eq!(Legendre::symbol(&BigInt::from(5), &BigInt::from(7)).unwrap(), -1);
    assert_eq!(Legendre::symbol(&BigInt::from(2), &BigInt::from(7)).unwrap(), 1);
    assert_eq!(Legendre::symbol(&BigInt::from(14), &BigInt::from(7)).unwrap(), 0);
}

#[test]
fn sieve_array_round_trip_scenario() {
    let s: SieveArray = "[[1,5],[2,6],[3,7]]".parse().unwrap();
    assert_eq!(s.to_string(), "[[1,5],[2,6],[3,7]]");
}

#[test]
fn bit_matrix_solve_scenario() {
    let m: BitMatrix = "[1101]\n[0110]\n[0011]\n".parse().unwrap();
    let x = m.solve(&[]).unwrap();
    assert_eq!(x, vec![0, 1, 1]);
}

#[test]
fn pipeline_stages_compose_directly() {
    let n = BigInt::from(5959);
    let factor_base = FactorBase::build(&n).unwrap();
    let shards = InputBuilder::write_shards(&n, 10);

    let mut relations = SieveArray::new();
    for shard in &shards {
        relations.extend(sieve_shard(shard, &factor_base));
    }
    assert!(!relations.is_empty());

    let counters = Counters::new();
    let cancellation = CancellationToken::new();
    let (f1, f2) = combine::run(&n, &relations, &factor_base, 1 << 16, &cancellation, &counters).unwrap();
    assert_eq!(&f1 * &f2, n);
}
