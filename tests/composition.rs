//! Random view chains checked against an explicit index map.

use lmatrix::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Root matrix holding its own backing index at every position.
fn identity_1d(size: i64) -> Matrix1D<i64> {
    Matrix1D::from_values((0..size).map(Some), Storage::Dense).unwrap()
}

fn identity_2d(rows: i64, columns: i64) -> Matrix2D<i64> {
    let m = Matrix2D::new(rows, columns).unwrap();
    m.for_each_indexed(|[r, c], _| m.set(r, c, Some(r * columns + c)).unwrap());
    m
}

/// Apply one random view operation to both the matrix and its index map.
fn step_1d(rng: &mut StdRng, view: Matrix1D<i64>, map: Vec<i64>) -> (Matrix1D<i64>, Vec<i64>) {
    let len = map.len() as i64;
    match rng.gen_range(0..3) {
        0 => {
            let mut map = map;
            map.reverse();
            (view.view_flip(), map)
        }
        1 => {
            let start = rng.gen_range(0..=len);
            let length = rng.gen_range(0..=len - start);
            let map = map[start as usize..(start + length) as usize].to_vec();
            (view.view_part(start, length).unwrap(), map)
        }
        _ => {
            let factor = rng.gen_range(1..=4);
            let map = map.into_iter().step_by(factor as usize).collect();
            (view.view_strides(factor).unwrap(), map)
        }
    }
}

#[test]
fn test_random_chains_1d() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let size = rng.gen_range(0..60);
        let root = identity_1d(size);
        let mut view = root.clone();
        let mut map: Vec<i64> = (0..size).collect();
        let depth = rng.gen_range(1..6);
        for _ in 0..depth {
            (view, map) = step_1d(&mut rng, view, map);
        }

        assert_eq!(view.size(), map.len() as i64);
        let seen: Vec<i64> = view.iter_non_null().collect();
        assert_eq!(seen, map);

        for (i, &backing) in map.iter().enumerate() {
            view.set(i as i64, Some(-backing - 1)).unwrap();
            assert_eq!(root.get(backing).unwrap(), Some(-backing - 1));
        }
        assert!(view.get(map.len() as i64).is_err());
    }
}

#[test]
fn test_flip_part_strides_flip_chain() {
    let root = identity_1d(50);
    let leaf = root
        .view_flip()
        .view_part(5, 30)
        .unwrap()
        .view_strides(3)
        .unwrap()
        .view_flip();
    // flip: 49..0, part: 44..15, strides: 44,41,...,17, flip: 17..44
    let expected: Vec<i64> = (0..10).map(|k| 17 + 3 * k).collect();
    assert_eq!(leaf.iter_non_null().collect::<Vec<_>>(), expected);

    leaf.set(0, None).unwrap();
    assert_eq!(root.get(17).unwrap(), None);
    assert_eq!(root.cardinality(), 49);
    assert_eq!(leaf.cardinality(), 9);
}

type Map2 = Vec<Vec<i64>>;

fn transpose(map: &Map2, columns: usize) -> Map2 {
    (0..columns)
        .map(|c| map.iter().map(|row| row[c]).collect())
        .collect()
}

fn step_2d(
    rng: &mut StdRng,
    view: Matrix2D<i64>,
    map: Map2,
) -> (Matrix2D<i64>, Map2) {
    let rows = map.len() as i64;
    let columns = view.columns();
    match rng.gen_range(0..5) {
        0 => {
            let mut map = map;
            map.reverse();
            (view.view_row_flip(), map)
        }
        1 => {
            let map = map
                .into_iter()
                .map(|mut row| {
                    row.reverse();
                    row
                })
                .collect();
            (view.view_column_flip(), map)
        }
        2 => {
            let row = rng.gen_range(0..=rows);
            let height = rng.gen_range(0..=rows - row);
            let column = rng.gen_range(0..=columns);
            let width = rng.gen_range(0..=columns - column);
            let map = map[row as usize..(row + height) as usize]
                .iter()
                .map(|r| r[column as usize..(column + width) as usize].to_vec())
                .collect();
            (view.view_part(row, column, height, width).unwrap(), map)
        }
        3 => {
            let rf = rng.gen_range(1..=3);
            let cf = rng.gen_range(1..=3);
            let map = map
                .into_iter()
                .step_by(rf as usize)
                .map(|r| r.into_iter().step_by(cf as usize).collect())
                .collect();
            (view.view_strides(rf, cf).unwrap(), map)
        }
        _ => {
            let map = transpose(&map, columns as usize);
            (view.view_dice(), map)
        }
    }
}

#[test]
fn test_random_chains_2d() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..150 {
        let rows = rng.gen_range(1..12);
        let columns = rng.gen_range(1..12);
        let root = identity_2d(rows, columns);
        let mut view = root.clone();
        let mut map: Map2 = (0..rows)
            .map(|r| (0..columns).map(|c| r * columns + c).collect())
            .collect();
        for _ in 0..rng.gen_range(1..6) {
            (view, map) = step_2d(&mut rng, view, map);
        }

        assert_eq!(view.rows(), map.len() as i64);
        let flat: Vec<i64> = map.iter().flatten().copied().collect();
        assert_eq!(view.size(), flat.len() as i64);
        assert_eq!(view.iter_non_null().collect::<Vec<_>>(), flat);

        // row and column views agree with the map
        if view.rows() > 0 && view.columns() > 0 {
            let r = rng.gen_range(0..view.rows());
            let c = rng.gen_range(0..view.columns());
            let row: Vec<i64> = view.view_row(r).unwrap().iter_non_null().collect();
            assert_eq!(row, map[r as usize]);
            let column: Vec<i64> = view.view_column(c).unwrap().iter_non_null().collect();
            let expected: Vec<i64> = map.iter().map(|row| row[c as usize]).collect();
            assert_eq!(column, expected);
        }

        view.for_each_indexed(|[r, c], value| {
            let backing = map[r as usize][c as usize];
            assert_eq!(value, Some(backing));
            view.set(r, c, None).unwrap();
            assert_eq!(root.get(backing / columns, backing % columns).unwrap(), None);
        });
        assert_eq!(view.cardinality(), 0);
        assert_eq!(root.cardinality(), rows * columns - flat.len() as i64);
    }
}

#[test]
fn test_random_chains_3d_slices() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let dims = [
            rng.gen_range(1..6),
            rng.gen_range(1..6),
            rng.gen_range(1..6),
        ];
        let m = Matrix3D::<i64>::new(dims[0], dims[1], dims[2]).unwrap();
        let [s, r, c] = [
            rng.gen_range(0..dims[0]),
            rng.gen_range(0..dims[1]),
            rng.gen_range(0..dims[2]),
        ];
        let flipped = m.view_slice_flip().view_column_flip();
        let (fs, fc) = (dims[0] - 1 - s, dims[2] - 1 - c);

        flipped.view_slice(fs).unwrap().set(r, fc, Some(1)).unwrap();
        assert_eq!(m.get(s, r, c).unwrap(), Some(1));
        assert_eq!(flipped.view_row(r).unwrap().get(fs, fc).unwrap(), Some(1));
        assert_eq!(flipped.view_column(fc).unwrap().get(fs, r).unwrap(), Some(1));
        assert_eq!(m.cardinality(), 1);
    }
}
