//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use sigkit_rs::Complex64;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Assert two complex values are approximately equal
pub fn assert_complex_eq(a: Complex64, b: Complex64, epsilon: f64) {
    assert!(
        (a - b).norm() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Assert two complex sequences have the same length and match element-wise
pub fn assert_complex_slices_eq(a: &[Complex64], b: &[Complex64], epsilon: f64) {
    assert_eq!(a.len(), b.len(), "length mismatch");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!(
            (x - y).norm() < epsilon,
            "Sample {}: {} vs {} (epsilon: {})",
            i,
            x,
            y,
            epsilon
        );
    }
}
