use num::Float;

// A ramp whose two parameters coincide has no slope to speak of; it is treated as the
// plateau so the set becomes an open shoulder instead of evaluating 0/0.
#[inline]
fn rising<F: Float>(x: F, a: F, b: F) -> F {
    if b == a {
        F::one()
    } else {
        (x - a) / (b - a)
    }
}

#[inline]
fn falling<F: Float>(x: F, c: F, d: F) -> F {
    if d == c {
        F::one()
    } else {
        (d - x) / (d - c)
    }
}

/// Triangular membership: 0 at `a`, 1 at `b`, 0 at `c`.
pub fn triangular<F: Float>(x: F, a: F, b: F, c: F) -> F {
    F::max(F::zero(), F::min(rising(x, a, b), falling(x, b, c)))
}

/// Trapezoidal membership: 0 at `a`, 1 from `b` through `c`, 0 at `d`.
pub fn trapezoidal<F: Float>(x: F, a: F, b: F, c: F, d: F) -> F {
    F::max(F::zero(), F::min(F::min(rising(x, a, b), F::one()), falling(x, c, d)))
}

/// Similar to numpy.interp
pub(crate) fn interp<F: Float>(x_input: F, coords: impl IntoIterator<Item = (F, F)>) -> F {
    let mut iter = coords.into_iter().peekable();
    let mut first = true;

    while let Some((x1, y1)) = iter.next() {
        // Base cases
        if first && x_input < x1 {
            return y1;
        }
        first = false;

        let Some(&(x2, y2)) = iter.peek() else {
            return y1;
        };

        if x1 <= x_input && x_input <= x2 {
            if x2 == x1 {
                return y2;
            }

            return y1 + (x_input - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    F::zero()
}

#[test]
fn test_triangular() {
    assert_eq!(triangular(24., 20., 24., 28.), 1.);
    assert_eq!(triangular(22., 20., 24., 28.), 0.5);
    assert_eq!(triangular(27., 20., 24., 28.), 0.25);
    assert_eq!(triangular(19., 20., 24., 28.), 0.);
    assert_eq!(triangular(29., 20., 24., 28.), 0.);
    assert_eq!(triangular(10.0f32, 4., 8., 12.), 0.5);
}

#[test]
fn test_trapezoidal() {
    assert_eq!(trapezoidal(0., -10., 0., 30., 50.), 1.);
    assert_eq!(trapezoidal(15., -10., 0., 30., 50.), 1.);
    assert_eq!(trapezoidal(40., -10., 0., 30., 50.), 0.5);
    assert_eq!(trapezoidal(-5., -10., 0., 30., 50.), 0.5);
    assert_eq!(trapezoidal(60., -10., 0., 30., 50.), 0.);
    assert_eq!(trapezoidal(-11., -10., 0., 30., 50.), 0.);
}

#[test]
fn test_degenerate_shoulders() {
    // Right shoulder: c == d
    assert_eq!(trapezoidal(50., 26., 30., 50., 50.), 1.);
    assert_eq!(trapezoidal(75., 26., 30., 50., 50.), 1.);
    assert_eq!(trapezoidal(28., 26., 30., 50., 50.), 0.5);
    assert_eq!(trapezoidal(20., 26., 30., 50., 50.), 0.);

    // Left shoulder: a == b
    assert_eq!(trapezoidal(0., 0., 0., 3., 6.), 1.);
    assert_eq!(trapezoidal(-4., 0., 0., 3., 6.), 1.);
    assert_eq!(trapezoidal(4.5, 0., 0., 3., 6.), 0.5);

    assert_eq!(triangular(5., 5., 5., 9.), 1.);
    assert_eq!(triangular(9., 5., 9., 9.), 1.);
    assert!(!trapezoidal(25., 10., 14., 25., 25.).is_nan());
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let points = || xs.into_iter().zip(ys);

    assert_eq!(interp(0., points()), 3.);
    assert_eq!(interp(1.5, points()), 2.5);
    assert_eq!(interp(2.5, points()), 1.);
    assert_eq!(interp(3.24, points()), 0.);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(interp(2.5, xs.into_iter().zip(ys)), 4.);
    assert_eq!(interp(-1., xs.into_iter().zip(ys)), 0.);
    assert_eq!(interp(7.5, xs.into_iter().zip(ys)), 2.);
}
