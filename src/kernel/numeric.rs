//! Real-root solvers and an ODE stepper backing the geometry kernel.

use crate::{Fp, EPSILON};
use std::f64::consts::PI;

/// Up to three real roots in ascending order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots {
    vals: [Fp; 3],
    len: usize,
}
impl Roots {
    const NONE: Roots = Roots { vals: [0.0; 3], len: 0 };

    fn from_slice(roots: &[Fp]) -> Roots {
        let mut vals = [0.0; 3];
        vals[..roots.len()].copy_from_slice(roots);
        vals[..roots.len()].sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Roots { vals, len: roots.len() }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Fp] {
        &self.vals[..self.len]
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub fn solve_quadratic(a: Fp, b: Fp, c: Fp) -> Roots {
    //! Real roots of `a*x^2 + b*x + c = 0`. A tangent (near-zero discriminant) yields one root.
    if a == 0.0 {
        return if b == 0.0 { Roots::NONE } else { Roots::from_slice(&[-c / b]) };
    }

    let disc = b * b - 4.0 * a * c;
    let tol = EPSILON * (b * b + (4.0 * a * c).abs());
    if disc.abs() <= tol {
        Roots::from_slice(&[-b / (2.0 * a)])
    } else if disc < 0.0 {
        Roots::NONE
    } else {
        // avoids cancellation between -b and the root of the discriminant
        let q = -0.5 * (b + b.signum() * disc.sqrt());
        Roots::from_slice(&[q / a, c / q])
    }
}

pub fn solve_cubic(a: Fp, b: Fp, c: Fp, d: Fp) -> Roots {
    //! Real roots of `a*x^3 + b*x^2 + c*x + d = 0`. Repeated roots are reported once.
    if a == 0.0 {
        return solve_quadratic(b, c, d);
    }

    // depressed cubic t^3 + p*t + q, x = t - b/3a
    let (b, c, d) = (b / a, c / a, d / a);
    let shift = b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;

    let disc = q * q / 4.0 + p * p * p / 27.0;
    if disc.abs() <= EPSILON {
        if p.abs() <= EPSILON {
            Roots::from_slice(&[-shift])
        } else {
            Roots::from_slice(&[3.0 * q / p - shift, -1.5 * q / p - shift])
        }
    } else if disc > 0.0 {
        let s = disc.sqrt();
        Roots::from_slice(&[(-q / 2.0 + s).cbrt() + (-q / 2.0 - s).cbrt() - shift])
    } else {
        let r = 2.0 * (-p / 3.0).sqrt();
        let phi = Fp::acos((1.5 * q / p * (-3.0 / p).sqrt()).max(-1.0).min(1.0)) / 3.0;
        Roots::from_slice(&[
            r * phi.cos() - shift,
            r * (phi - 2.0 * PI / 3.0).cos() - shift,
            r * (phi - 4.0 * PI / 3.0).cos() - shift,
        ])
    }
}

pub fn rk4_step<F: Fn(Fp, Fp) -> Fp>(f: F, t: Fp, y: Fp, h: Fp) -> Fp {
    //! Advances `dy/dt = f(t, y)` from `(t, y)` by `h` with the classic 4th-order Runge-Kutta step.
    let k1 = f(t, y);
    let k2 = f(t + h * 0.5, y + h * 0.5 * k1);
    let k3 = f(t + h * 0.5, y + h * 0.5 * k2);
    let k4 = f(t + h, y + h * k3);
    y + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quadratic() {
        assert_eq!(solve_quadratic(1.0, -5.0, 6.0).as_slice(), &[2.0, 3.0]);
        assert_eq!(solve_quadratic(1.0, -2.0, 1.0).as_slice(), &[1.0]);
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0).as_slice(), &[2.0]);
        assert!(solve_quadratic(0.0, 0.0, 1.0).is_empty());
        assert_eq!(solve_quadratic(1.0, 0.0, -4.0).as_slice(), &[-2.0, 2.0]);
    }

    #[test]
    fn cubic() {
        let r = solve_cubic(1.0, -6.0, 11.0, -6.0);
        assert_eq!(r.len(), 3);
        for (got, want) in r.as_slice().iter().zip(&[1.0, 2.0, 3.0]) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9);
        }

        let r = solve_cubic(1.0, 0.0, 0.0, -1.0);
        assert_eq!(r.len(), 1);
        assert_relative_eq!(r.as_slice()[0], 1.0, epsilon = 1e-12);

        // (x - 1)^2 (x + 2)
        let r = solve_cubic(1.0, 0.0, -3.0, 2.0);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r.as_slice()[0], -2.0, epsilon = 1e-9);
        assert_relative_eq!(r.as_slice()[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn runge_kutta() {
        // y' = y, y(0) = 1
        let y = rk4_step(|_, y| y, 0.0, 1.0, 0.1);
        assert_relative_eq!(y, (0.1 as Fp).exp(), epsilon = 1e-6);

        let mut y = 1.0;
        for i in 0..10 {
            y = rk4_step(|_, y| y, i as Fp * 0.1, y, 0.1);
        }
        assert_relative_eq!(y, (1.0 as Fp).exp(), epsilon = 1e-5);
    }
}
