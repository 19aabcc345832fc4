//! Integration tests for the contraction engine

use rankflow::{
    dot, evaluate_contraction, ArrayValue, ContractAxes, ContractionOptions, KernelError, Shape,
    ShapeDim,
};

fn seq(dims: &[usize]) -> ArrayValue {
    let n: usize = dims.iter().product();
    ArrayValue::from_dims(dims, (0..n).map(|i| (i as f64) - 2.0).collect::<Vec<_>>()).unwrap()
}

/// Textbook triple loop used as the reference for matrix products.
fn naive_matmul(a: &ArrayValue, b: &ArrayValue) -> Vec<f64> {
    let (r, k) = a.shape_2d();
    let (_, c) = b.shape_2d();
    let mut out = vec![0.0; r * c];
    for i in 0..r {
        for j in 0..c {
            for p in 0..k {
                out[i * c + j] += a.get_f64(&[i, p]).unwrap() * b.get_f64(&[p, j]).unwrap();
            }
        }
    }
    out
}

// -------------------------------
// Rank-driven dot
// -------------------------------

#[test]
fn test_inner_product() {
    let u = ArrayValue::vector(vec![1.0, -2.0, 3.0, 0.5]);
    let v = ArrayValue::vector(vec![4.0, 1.0, -1.0, 2.0]);
    let r = evaluate_contraction(&u, &v, &ContractionOptions::default()).unwrap();
    assert_eq!(r.shape(), ShapeDim::Rank0);
    assert_eq!(r.scalar_value(), Some(4.0 - 2.0 - 3.0 + 1.0));
}

#[test]
fn test_inner_product_length_mismatch() {
    let u = ArrayValue::vector(vec![1.0; 5]);
    let v = ArrayValue::vector(vec![1.0; 7]);
    let err = evaluate_contraction(&u, &v, &ContractionOptions::dot()).unwrap_err();
    assert!(matches!(err, KernelError::ShapeMismatch { .. }));
}

#[test]
fn test_matrix_products_match_reference() {
    for (r, k, c) in [(1, 1, 1), (2, 3, 4), (4, 3, 2), (5, 1, 5), (3, 7, 1)] {
        let a = seq(&[r, k]);
        let b = seq(&[k, c]);
        let got = dot(&a, &b).unwrap();
        assert_eq!(got.shape(), ShapeDim::Rank2 { rows: r, cols: c });
        assert_eq!(&*got.numeric_data(), naive_matmul(&a, &b).as_slice());
    }
}

#[test]
fn test_matrix_inner_dimension_mismatch() {
    let a = seq(&[2, 3]);
    let b = seq(&[4, 2]);
    assert!(dot(&a, &b).unwrap_err().is_shape_mismatch());
}

#[test]
fn test_vector_matrix_agrees_with_row_matrix() {
    let v = ArrayValue::vector(vec![1.0, 2.0, 3.0]);
    let m = seq(&[3, 2]);
    let as_vector = dot(&v, &m).unwrap();
    let as_row = dot(&v.reshape(ShapeDim::Rank2 { rows: 1, cols: 3 }).unwrap(), &m).unwrap();
    assert_eq!(as_vector.shape(), ShapeDim::Rank1(2));
    assert_eq!(as_vector.numeric_data(), as_row.numeric_data());
}

#[test]
fn test_scalar_scales_tensor() {
    let t = seq(&[2, 2, 2]);
    let r = dot(&ArrayValue::scalar(3.0), &t).unwrap();
    assert_eq!(r.shape(), t.shape());
    let expected: Vec<f64> = t.numeric_data().iter().map(|x| x * 3.0).collect();
    assert_eq!(&*r.numeric_data(), expected.as_slice());
}

#[test]
fn test_matrix_tensor_dot() {
    // (2, 3) . (4, 3, 2) -> (2, 4, 2), summing lhs axis 1 with rhs axis 1
    let a = seq(&[2, 3]);
    let t = seq(&[4, 3, 2]);
    let r = dot(&a, &t).unwrap();
    assert_eq!(r.shape(), ShapeDim::Rank3 { pages: 2, rows: 4, cols: 2 });
    for i in 0..2 {
        for p in 0..4 {
            for c in 0..2 {
                let expected: f64 = (0..3)
                    .map(|k| a.get_f64(&[i, k]).unwrap() * t.get_f64(&[p, k, c]).unwrap())
                    .sum();
                assert_eq!(r.get_f64(&[i, p, c]), Some(expected));
            }
        }
    }
}

#[test]
fn test_tensor_matrix_dot() {
    // (2, 2, 3) . (3, 2) -> (2, 2, 2)
    let t = seq(&[2, 2, 3]);
    let b = seq(&[3, 2]);
    let r = dot(&t, &b).unwrap();
    assert_eq!(r.shape(), ShapeDim::Rank3 { pages: 2, rows: 2, cols: 2 });
    for p in 0..2 {
        let page = ArrayValue::matrix(
            2,
            3,
            (0..6).map(|n| t.get_f64(&[p, n / 3, n % 3]).unwrap()).collect::<Vec<_>>(),
        )
        .unwrap();
        let expected = naive_matmul(&page, &b);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(r.get_f64(&[p, i, j]), Some(expected[i * 2 + j]));
            }
        }
    }
}

#[test]
fn test_tensor_axis_mismatch() {
    let t = seq(&[2, 2, 3]);
    let v = ArrayValue::vector(vec![1.0, 1.0]);
    assert!(dot(&t, &v).unwrap_err().is_shape_mismatch());
}

#[test]
fn test_tensor_tensor_unsupported() {
    let t = seq(&[2, 2, 2]);
    let err = evaluate_contraction(&t, &t, &ContractionOptions::dot()).unwrap_err();
    assert!(err.is_unsupported_rank());
}

// -------------------------------
// Outer
// -------------------------------

#[test]
fn test_outer_product() {
    let u = ArrayValue::vector(vec![1.0, 2.0, 3.0]);
    let m = ArrayValue::matrix(2, 1, vec![1.0, -1.0]).unwrap();
    let r = evaluate_contraction(&u, &m, &ContractionOptions::outer()).unwrap();
    assert_eq!(r.shape(), ShapeDim::Rank3 { pages: 3, rows: 2, cols: 1 });
    assert_eq!(&*r.numeric_data(), &[1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
}

#[test]
fn test_outer_rejects_scalar() {
    let err = evaluate_contraction(
        &ArrayValue::scalar(2.0),
        &ArrayValue::vector(vec![1.0]),
        &ContractionOptions::outer(),
    )
    .unwrap_err();
    assert!(err.is_unsupported_rank());
}

// -------------------------------
// Tensordot
// -------------------------------

#[test]
fn test_tensordot_one_axis_is_matmul() {
    let a = seq(&[3, 4]);
    let b = seq(&[4, 2]);
    let td = evaluate_contraction(&a, &b, &ContractionOptions::tensordot(ContractAxes::Trailing(1))).unwrap();
    assert_eq!(td, dot(&a, &b).unwrap());
}

#[test]
fn test_tensordot_zero_axes_is_outer() {
    let u = ArrayValue::vector(vec![1.0, 2.0]);
    let m = seq(&[2, 2]);
    let td = evaluate_contraction(&u, &m, &ContractionOptions::tensordot(ContractAxes::Trailing(0))).unwrap();
    let out = evaluate_contraction(&u, &m, &ContractionOptions::outer()).unwrap();
    assert_eq!(td, out);
}

#[test]
fn test_tensordot_two_axes_of_tensor() {
    // (2, 3, 4) against (3, 4, 2) over lhs axes (1, 2) and rhs axes (0, 1) -> (2, 2)
    let a = seq(&[2, 3, 4]);
    let b = seq(&[3, 4, 2]);
    let r = evaluate_contraction(
        &a,
        &b,
        &ContractionOptions::tensordot(ContractAxes::ranges(1..3, 0..2)),
    )
    .unwrap();
    assert_eq!(r.shape(), ShapeDim::Rank2 { rows: 2, cols: 2 });
    for i in 0..2 {
        for j in 0..2 {
            let mut expected = 0.0;
            for x in 0..3 {
                for y in 0..4 {
                    expected += a.get_f64(&[i, x, y]).unwrap() * b.get_f64(&[x, y, j]).unwrap();
                }
            }
            assert_eq!(r.get_f64(&[i, j]), Some(expected));
        }
    }
}

#[test]
fn test_tensordot_extent_mismatch() {
    let a = seq(&[2, 3]);
    let b = seq(&[4, 2]);
    let err = evaluate_contraction(&a, &b, &ContractionOptions::tensordot(ContractAxes::Trailing(1))).unwrap_err();
    assert!(err.is_shape_mismatch());
}

#[test]
fn test_tensordot_axis_out_of_range() {
    let a = seq(&[2, 3]);
    let err = evaluate_contraction(&a, &a, &ContractionOptions::tensordot(ContractAxes::single(0, 5))).unwrap_err();
    assert!(err.is_invalid_options());
}

#[test]
fn test_boolean_operands_contract_numerically() {
    let b = ArrayValue::bool_matrix(2, 2, &[true, false, true, true]).unwrap();
    let v = ArrayValue::bool_vector(&[true, true]);
    let r = dot(&b, &v).unwrap();
    assert!(r.is_numeric());
    assert_eq!(&*r.numeric_data(), &[1.0, 2.0]);
}
