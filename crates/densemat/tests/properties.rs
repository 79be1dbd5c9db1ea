//! Algebraic properties of `Matrix` checked on fixed and random inputs.

use densemat::{ErrorKind, Matrix, Operand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
    let data = (0..rows * cols)
        .map(|_| rng.gen_range(-10.0..10.0))
        .collect();
    Matrix::from_shape_vec((rows, cols), data).expect("failed to create random matrix")
}

fn random_invertible(rng: &mut StdRng, n: usize) -> Matrix<f64> {
    loop {
        let m = random_matrix(rng, n, n);
        if m.determinant().unwrap().abs() > 1.0 {
            return m;
        }
    }
}

#[test]
fn test_get_matches_row_major_offset() {
    let data: Vec<i32> = (0..12).collect();
    let m = Matrix::new(3, 4, data.clone()).unwrap();
    for i in 1..=3 {
        for j in 1..=4 {
            assert_eq!(m.get(i, j).unwrap(), data[(i - 1) * 4 + (j - 1)]);
        }
    }
}

#[test]
fn test_additive_inverse_is_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    for (rows, cols) in [(1, 1), (2, 3), (4, 2), (3, 3)] {
        let a = random_matrix(&mut rng, rows, cols);
        let sum = a.checked_add(&(&a * -1.0)).unwrap();
        assert_eq!(sum, Matrix::zeros(rows, cols).unwrap());
    }
}

#[test]
fn test_multiplicative_identity() {
    let a = Matrix::from_shape_vec((2, 3), vec![1, -2, 3, 4, 0, -6]).unwrap();
    let right = Matrix::identity(a.ncols()).unwrap();
    let left = Matrix::identity(a.nrows()).unwrap();
    assert_eq!(a.matmul(&right).unwrap(), a);
    assert_eq!(left.matmul(&a).unwrap(), a);
}

#[test]
fn test_determinant_base_cases() {
    let (a, b, c, d) = (3.5, -2.0, 0.25, 8.0);
    let one = Matrix::from_shape_vec((1, 1), vec![a]).unwrap();
    assert_eq!(one.determinant().unwrap(), a);
    let two = Matrix::from_shape_vec((2, 2), vec![a, b, c, d]).unwrap();
    assert_eq!(two.determinant().unwrap(), a * d - b * c);
}

#[test]
fn test_inverse_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 1..=4 {
        for _ in 0..5 {
            let a = random_invertible(&mut rng, n);
            let id = Matrix::identity(n).unwrap();
            let product = a.matmul(&a.inverse().unwrap()).unwrap();
            assert!(product.approx_eq(&id, 1e-8), "A * A^-1 != I for {:?}", a);
            let product = a.inverse().unwrap().matmul(&a).unwrap();
            assert!(product.approx_eq(&id, 1e-8));
        }
    }
}

#[test]
fn test_transpose_involution() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_matrix(&mut rng, 3, 5);
    let mut b = a.clone();
    b.transpose();
    assert_eq!(b.shape(), (5, 3));
    b.transpose();
    assert_eq!(a, b);
}

#[test]
fn test_power_laws() {
    let a = Matrix::from_rows(vec![
        vec![2.0, 1.0, 0.0],
        vec![1.0, 3.0, 1.0],
        vec![0.0, 1.0, 4.0],
    ])
    .unwrap();
    assert_eq!(a.powi(0).unwrap(), Matrix::identity(3).unwrap());
    assert_eq!(a.powi(1).unwrap(), a);
    assert_eq!(a.powi(2).unwrap(), a.matmul(&a).unwrap());
    assert_eq!(a.powi(-1).unwrap(), a.inverse().unwrap());

    let cubed = a.matmul(&a).unwrap().matmul(&a).unwrap();
    assert!(a.powi(3).unwrap().approx_eq(&cubed, 1e-9));
    let inv_cubed = a.powi(-3).unwrap();
    assert!(inv_cubed
        .matmul(&cubed)
        .unwrap()
        .approx_eq(&Matrix::identity(3).unwrap(), 1e-6));
}

#[test]
fn test_singular_rejection() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
    assert_eq!(a.determinant().unwrap(), 0.0);
    assert_eq!(a.inverse().unwrap_err().kind(), ErrorKind::Singular);
}

#[test]
fn test_shape_mismatch_rejection() {
    let row = Matrix::from_rows(vec![vec![1, 2]]).unwrap();
    let col = Matrix::from_rows(vec![vec![1], vec![2]]).unwrap();
    assert_eq!(row.checked_add(&col).unwrap_err().kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn test_end_to_end_2x2() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    assert_eq!(a.determinant().unwrap(), -2.0);

    let inv = a.inverse().unwrap();
    assert_eq!(inv.to_nested(), vec![vec![-2.0, 1.0], vec![1.5, -0.5]]);

    let product = a.multiply(&Operand::Matrix(inv)).unwrap();
    assert!(product.approx_eq(&Matrix::identity(2).unwrap(), 1e-12));
}

#[test]
fn test_integer_matrix_inverse_through_cast() {
    let a = Matrix::from_rows(vec![vec![4i64, 7], vec![2, 6]]).unwrap();
    assert_eq!(a.determinant().unwrap(), 10);
    let inv = a.cast::<f64>().unwrap().inverse().unwrap();
    assert!(inv.approx_eq(
        &Matrix::from_rows(vec![vec![0.6, -0.7], vec![-0.2, 0.4]]).unwrap(),
        1e-12
    ));
}
