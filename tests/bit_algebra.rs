#![cfg(feature = "bits")]

use lmatrix::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_bits(rng: &mut StdRng, length: i64) -> BitMatrix1D {
    (0..length).map(|_| rng.gen_bool(0.3)).collect()
}

fn full(length: i64) -> BitMatrix1D {
    let mut b = BitMatrix1D::new(length).unwrap();
    b.assign(true);
    b
}

#[test]
fn test_algebra_laws() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..100 {
        let length = rng.gen_range(0..300);
        let a = random_bits(&mut rng, length);
        let b = random_bits(&mut rng, length);
        let empty = BitMatrix1D::new(length).unwrap();

        let mut x = a.clone();
        x.and(&full(length)).unwrap();
        assert_eq!(x, a);

        let mut x = a.clone();
        x.and(&empty).unwrap();
        assert_eq!(x, empty);

        let mut x = a.clone();
        x.or(&empty).unwrap();
        assert_eq!(x, a);

        let mut meet = a.clone();
        meet.and(&b.clone()).unwrap();
        assert_eq!(a.intersects(&b).unwrap(), !meet.is_empty());

        // a ^ b == (a | b) & !(a & b)
        let mut xor = a.clone();
        xor.xor(&b).unwrap();
        let mut join = a.clone();
        join.or(&b).unwrap();
        join.and_not(&meet).unwrap();
        assert_eq!(xor, join);
        assert_eq!(
            xor.cardinality(),
            a.cardinality() + b.cardinality() - 2 * meet.cardinality()
        );
    }
}

#[test]
fn test_bitwise_matches_bool_reference() {
    let mut rng = StdRng::seed_from_u64(99);
    let length = 130;
    let a = random_bits(&mut rng, length);
    let b = random_bits(&mut rng, length);
    let mut and_not = a.clone();
    and_not.and_not(&b).unwrap();
    for i in 0..length {
        let expected = a.get(i).unwrap() && !b.get(i).unwrap();
        assert_eq!(and_not.get(i).unwrap(), expected);
    }
}

#[test]
fn test_mismatched_lengths_fail() {
    let mut a = BitMatrix1D::new(10).unwrap();
    let b = BitMatrix1D::new(11).unwrap();
    for err in [
        a.clone().and(&b).unwrap_err(),
        a.clone().or(&b).unwrap_err(),
        a.clone().xor(&b).unwrap_err(),
        a.and_not(&b).unwrap_err(),
        a.intersects(&b).unwrap_err(),
    ] {
        assert!(err.is_invalid_argument());
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }
}

#[test]
fn test_bounds_and_construction() {
    assert_eq!(
        BitMatrix1D::new(-1).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    let mut b = BitMatrix1D::new(8).unwrap();
    assert_eq!(b.get(8).unwrap_err().kind(), ErrorKind::OutOfBounds);
    assert_eq!(b.set(-1, true).unwrap_err().kind(), ErrorKind::OutOfBounds);
    assert_eq!(b.flip(8).unwrap_err().kind(), ErrorKind::OutOfBounds);
    b.assign(true);
    assert_eq!(b.cardinality(), 8);
    b.assign(false);
    assert_eq!(b.cardinality(), 0);
}

#[test]
fn test_zero_length_equality() {
    let a = BitMatrix1D::new(0).unwrap();
    let b = BitMatrix1D::new(0).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, BitMatrix1D::new(1).unwrap());
    assert_ne!(a, full(1));
}
