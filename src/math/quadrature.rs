//! Numerical integration used for arc-length queries.

/// Maximum recursion depth used by callers that do not pick their own.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Integrates `f` over `[a, b]` with adaptive Simpson's rule.
///
/// Intervals are bisected until the Richardson error estimate drops under
/// `tolerance` or `max_depth` is reached.
pub fn adaptive_simpson<F>(f: F, a: f64, b: f64, tolerance: f64, max_depth: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let fa = f(a);
    let fb = f(b);
    let fm = f(0.5 * (a + b));
    let whole = simpson(a, b, fa, fm, fb);
    refine(&f, a, b, fa, fm, fb, whole, tolerance, max_depth)
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn refine<F>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tolerance: f64,
    depth: usize,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = f(lm);
    let frm = f(rm);
    let left = simpson(a, m, fa, flm, fm);
    let right = simpson(m, b, fm, frm, fb);
    let delta = left + right - whole;

    if depth == 0 || delta.abs() <= 15.0 * tolerance {
        return left + right + delta / 15.0;
    }

    refine(f, a, m, fa, flm, fm, left, 0.5 * tolerance, depth - 1)
        + refine(f, m, b, fm, frm, fb, right, 0.5 * tolerance, depth - 1)
}
