/// Tolerance used by every zero / pivot test unless the caller picks one.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Combined relative/absolute comparison, well-behaved near zero:
/// `|a - b| <= epsilon * (|a| + |b| + 1)`.
#[inline(always)]
pub fn approx_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= (a.abs() + b.abs() + 1.0) * epsilon
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
