//! Closed-form polynomial root finders
//!
//! Real-coefficient, real-root solvers for quadratic, cubic (Cardano), and
//! quartic (Ferrari) equations. The quartic is the workhorse behind
//! ray-torus intersection. Complex roots are never reported; callers must
//! expect fewer roots than the polynomial degree.

/// Fixed-capacity root set. No allocation; at most `N` real roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots<const N: usize> {
    num: usize,
    values: [f32; N],
}

impl<const N: usize> Roots<N> {
    /// The empty root set
    pub fn none() -> Self {
        Self {
            num: 0,
            values: [0.0; N],
        }
    }

    fn push(&mut self, root: f32) {
        self.values[self.num] = root;
        self.num += 1;
    }

    /// Number of real roots found
    pub fn len(&self) -> usize {
        self.num
    }

    /// Whether no real roots were found
    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// The roots, unsorted
    pub fn as_slice(&self) -> &[f32] {
        &self.values[..self.num]
    }

    /// Iterator over the roots
    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.as_slice().iter()
    }
}

impl<const N: usize> From<&[f32]> for Roots<N> {
    fn from(roots: &[f32]) -> Self {
        let mut result = Self::none();
        for &r in roots {
            result.push(r);
        }
        result
    }
}

/// Tolerance for the solvers' "is zero" branch decisions
const SOLVER_EPSILON: f32 = 1e-6;

fn is_zero(x: f32) -> bool {
    x.abs() < SOLVER_EPSILON
}

/// Solves `c0 + c1*x + c2*x^2 = 0`.
///
/// Returns two roots, one root (tangent case, discriminant near zero), or
/// none (complex pair).
pub fn solve_quadratic(c0: f32, c1: f32, c2: f32) -> Roots<2> {
    let p = c1 / (2.0 * c2);
    let q = c0 / c2;

    let d = p * p - q;

    if is_zero(d) {
        Roots::from([-p].as_slice())
    } else if d < 0.0 {
        Roots::none()
    } else {
        let sqrt_d = d.sqrt();
        Roots::from([sqrt_d - p, -sqrt_d - p].as_slice())
    }
}

/// Solves `c0 + c1*x + c2*x^2 + c3*x^3 = 0` via Cardano's method.
///
/// Branches on the discriminant of the depressed cubic: near-zero yields a
/// triple or a double root, negative the trigonometric three-root form
/// (casus irreducibilis), positive a single real root.
pub fn solve_cubic(c0: f32, c1: f32, c2: f32, c3: f32) -> Roots<3> {
    let a = c2 / c3;
    let b = c1 / c3;
    let c = c0 / c3;

    // Substitute x = y - A/3 to get y^3 + 3py + 2q = 0 (depressed form)
    let sq_a = a * a;
    let p = 1.0 / 3.0 * (-1.0 / 3.0 * sq_a + b);
    let q = 0.5 * (2.0 / 27.0 * a * sq_a - 1.0 / 3.0 * a * b + c);

    let cb_p = p * p * p;
    let d = q * q + cb_p;

    let mut s = if is_zero(d) {
        if is_zero(q) {
            // Triple root 0
            Roots::from([0.0].as_slice())
        } else {
            // One single and one double root
            let u = (-q).cbrt();
            Roots::from([2.0 * u, -u].as_slice())
        }
    } else if d < 0.0 {
        // Casus irreducibilis: three real solutions
        let phi = 1.0 / 3.0 * (-q / (-cb_p).sqrt()).acos();
        let t = 2.0 * (-p).sqrt();
        Roots::from(
            [
                t * phi.cos(),
                -t * (phi + std::f32::consts::PI / 3.0).cos(),
                -t * (phi - std::f32::consts::PI / 3.0).cos(),
            ]
            .as_slice(),
        )
    } else {
        // One real solution
        let sqrt_d = d.sqrt();
        let u = (sqrt_d - q).cbrt();
        let v = -(sqrt_d + q).cbrt();
        Roots::from([u + v].as_slice())
    };

    // Resubstitute
    let sub = 1.0 / 3.0 * a;
    for r in &mut s.values[..s.num] {
        *r -= sub;
    }

    s
}

/// Solves `c0 + c1*x + c2*x^2 + c3*x^3 + c4*x^4 = 0` via Ferrari's method.
///
/// Depresses the quartic, special-cases a vanishing absolute term, otherwise
/// solves the resolvent cubic and resubstitutes through two quadratics.
/// Returns only the real roots (0 to 4 of them); degenerate input yields an
/// empty result rather than a panic.
pub fn solve_quartic(c0: f32, c1: f32, c2: f32, c3: f32, c4: f32) -> Roots<4> {
    // Normal form: x^4 + Ax^3 + Bx^2 + Cx + D = 0
    let a = c3 / c4;
    let b = c2 / c4;
    let c = c1 / c4;
    let d = c0 / c4;

    // Substitute x = y - A/4 to eliminate the cubic term:
    // y^4 + py^2 + qy + r = 0
    let sq_a = a * a;
    let p = -3.0 / 8.0 * sq_a + b;
    let q = 1.0 / 8.0 * sq_a * a - 0.5 * a * b + c;
    let r = -3.0 / 256.0 * sq_a * sq_a + 1.0 / 16.0 * sq_a * b - 0.25 * a * c + d;

    let mut s = Roots::<4>::none();

    if is_zero(r) {
        // No absolute term: y * (y^3 + py + q) = 0
        let s3 = solve_cubic(q, p, 0.0, 1.0);
        for &root in s3.iter() {
            s.push(root);
        }
        s.push(0.0);
    } else {
        // Solve the resolvent cubic ...
        let s3 = solve_cubic(0.5 * r * p - 1.0 / 8.0 * q * q, -r, -0.5 * p, 1.0);

        // ... and take the one real solution ...
        let z = s3.as_slice()[0];

        // ... to build two quadric equations
        let mut u = z * z - r;
        let mut v = 2.0 * z - p;

        if is_zero(u) {
            u = 0.0;
        } else if u > 0.0 {
            u = u.sqrt();
        } else {
            return Roots::none();
        }

        if is_zero(v) {
            v = 0.0;
        } else if v > 0.0 {
            v = v.sqrt();
        } else {
            return Roots::none();
        }

        let s2 = solve_quadratic(z - u, if q < 0.0 { -v } else { v }, 1.0);
        for &root in s2.iter() {
            s.push(root);
        }

        let s2 = solve_quadratic(z + u, if q < 0.0 { v } else { -v }, 1.0);
        for &root in s2.iter() {
            s.push(root);
        }
    }

    // Resubstitute
    let sub = 0.25 * a;
    for root in &mut s.values[..s.num] {
        *root -= sub;
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sorted(roots: &[f32]) -> Vec<f32> {
        let mut v = roots.to_vec();
        v.sort_by(f32::total_cmp);
        v
    }

    #[test]
    fn test_quadratic_two_roots() {
        // (x - 1)(x + 3) = x^2 + 2x - 3
        let roots = solve_quadratic(-3.0, 2.0, 1.0);
        assert_eq!(roots.len(), 2);
        let r = sorted(roots.as_slice());
        assert_relative_eq!(r[0], -3.0, epsilon = 1e-5);
        assert_relative_eq!(r[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_quadratic_tangent() {
        // (x - 2)^2 = x^2 - 4x + 4
        let roots = solve_quadratic(4.0, -4.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots.as_slice()[0], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_quadratic_complex_pair() {
        // x^2 + 1 has no real roots
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_cubic_three_real_roots() {
        // (x - 1)(x - 2)(x - 3) = x^3 - 6x^2 + 11x - 6
        let roots = solve_cubic(-6.0, 11.0, -6.0, 1.0);
        assert_eq!(roots.len(), 3);
        let r = sorted(roots.as_slice());
        assert_relative_eq!(r[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(r[1], 2.0, epsilon = 1e-3);
        assert_relative_eq!(r[2], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn test_cubic_single_real_root() {
        // x^3 - 1 = 0 has one real root (plus a complex pair)
        let roots = solve_cubic(-1.0, 0.0, 0.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots.as_slice()[0], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cubic_triple_root() {
        // x^3 = 0
        let roots = solve_cubic(0.0, 0.0, 0.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots.as_slice()[0], 0.0);
    }

    #[test]
    fn test_quartic_round_trip() {
        // (x - r1)(x - r2)(x - r3)(x - r4) expanded via elementary symmetric
        // polynomials; the solver must recover the chosen roots within 1e-3.
        let expected = [-2.0_f32, -0.5, 1.0, 3.0];
        let [r1, r2, r3, r4] = expected;
        let e1 = r1 + r2 + r3 + r4;
        let e2 = r1 * r2 + r1 * r3 + r1 * r4 + r2 * r3 + r2 * r4 + r3 * r4;
        let e3 = r1 * r2 * r3 + r1 * r2 * r4 + r1 * r3 * r4 + r2 * r3 * r4;
        let e4 = r1 * r2 * r3 * r4;

        let roots = solve_quartic(e4, -e3, e2, -e1, 1.0);
        assert_eq!(roots.len(), 4);
        let got = sorted(roots.as_slice());
        for (&g, &e) in got.iter().zip(expected.iter()) {
            assert_relative_eq!(g, e, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_quartic_two_real_two_complex() {
        // (x^2 + 1)(x - 1)(x + 2) = x^4 + x^3 - x^2 + x - 2
        let roots = solve_quartic(-2.0, 1.0, -1.0, 1.0, 1.0);
        assert_eq!(roots.len(), 2);
        let r = sorted(roots.as_slice());
        assert_relative_eq!(r[0], -2.0, epsilon = 1e-3);
        assert_relative_eq!(r[1], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_quartic_no_real_roots() {
        // (x^2 + 1)(x^2 + 4) = x^4 + 5x^2 + 4
        assert!(solve_quartic(4.0, 0.0, 5.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_quartic_zero_absolute_term() {
        // x(x^3 - x) = x^4 - x^2: roots -1, 0, 1
        let roots = solve_quartic(0.0, 0.0, -1.0, 0.0, 1.0);
        let r = sorted(roots.as_slice());
        assert!(r.contains(&0.0));
        assert!(r.iter().any(|&x| (x - 1.0).abs() < 1e-3));
        assert!(r.iter().any(|&x| (x + 1.0).abs() < 1e-3));
    }
}
