//! Rotors of 4D Euclidean geometric algebra.
//!
//! Products are computed on full 16-component multivectors indexed by basis
//! blade bitmask (`x = 0b0001` .. `w = 0b1000`), then projected back to the
//! even or vector grade they belong to.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign, Neg};

const X: usize = 0b0001;
const Y: usize = 0b0010;
const Z: usize = 0b0100;
const W: usize = 0b1000;
const XY: usize = X | Y;
const XZ: usize = X | Z;
const XW: usize = X | W;
const YZ: usize = Y | Z;
const YW: usize = Y | W;
const ZW: usize = Z | W;
const XYZW: usize = X | Y | Z | W;

type Multivector = [f32; 16];

/// Sign picked up when reordering the product of blades `a` and `b` into
/// canonical order. Every basis vector squares to +1.
fn reorder_sign(a: usize, b: usize) -> f32 {
    let mut a = a >> 1;
    let mut swaps = 0;
    while a != 0 {
        swaps += (a & b).count_ones();
        a >>= 1;
    }
    if swaps % 2 == 0 { 1.0 } else { -1.0 }
}

fn geometric_product(a: &Multivector, b: &Multivector) -> Multivector {
    let mut out = [0.0; 16];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0.0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            if bj != 0.0 {
                out[i ^ j] += reorder_sign(i, j) * ai * bj;
            }
        }
    }
    out
}

fn vector_to_mv(v: Vec4) -> Multivector {
    let mut mv = [0.0; 16];
    mv[X] = v.x;
    mv[Y] = v.y;
    mv[Z] = v.z;
    mv[W] = v.w;
    mv
}

fn mv_to_vector(mv: &Multivector) -> Vec4 {
    Vec4::new(mv[X], mv[Y], mv[Z], mv[W])
}

/// Oriented plane segment in 4D.
#[derive(Copy, Clone, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct Bivec4 {
    pub xy: f32,
    pub xz: f32,
    pub xw: f32,
    pub yz: f32,
    pub yw: f32,
    pub zw: f32,
}

impl Bivec4 {
    pub const ZERO: Bivec4 = Bivec4::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const XY: Bivec4 = Bivec4::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const XZ: Bivec4 = Bivec4::new(0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
    pub const XW: Bivec4 = Bivec4::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0);
    pub const YZ: Bivec4 = Bivec4::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    pub const YW: Bivec4 = Bivec4::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
    pub const ZW: Bivec4 = Bivec4::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(xy: f32, xz: f32, xw: f32, yz: f32, yw: f32, zw: f32) -> Self {
        Self {
            xy,
            xz,
            xw,
            yz,
            yw,
            zw,
        }
    }

    /// Outer product `a ∧ b`.
    pub fn wedge(a: Vec4, b: Vec4) -> Self {
        Self::new(
            a.x * b.y - a.y * b.x,
            a.x * b.z - a.z * b.x,
            a.x * b.w - a.w * b.x,
            a.y * b.z - a.z * b.y,
            a.y * b.w - a.w * b.y,
            a.z * b.w - a.w * b.z,
        )
    }

    #[inline]
    pub fn mag_sq(&self) -> f32 {
        self.xy * self.xy
            + self.xz * self.xz
            + self.xw * self.xw
            + self.yz * self.yz
            + self.yw * self.yw
            + self.zw * self.zw
    }

    #[inline]
    pub fn mag(&self) -> f32 {
        self.mag_sq().sqrt()
    }

    /// Unit bivector in the same plane. The zero bivector stays zero.
    pub fn normalized(&self) -> Self {
        let mag_sq = self.mag_sq();
        if mag_sq == 0.0 {
            return Self::ZERO;
        }
        *self * mag_sq.sqrt().recip()
    }
}

impl Neg for Bivec4 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl Mul<f32> for Bivec4 {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self::Output {
        self *= rhs;
        self
    }
}

impl MulAssign<f32> for Bivec4 {
    fn mul_assign(&mut self, rhs: f32) {
        self.xy *= rhs;
        self.xz *= rhs;
        self.xw *= rhs;
        self.yz *= rhs;
        self.yw *= rhs;
        self.zw *= rhs;
    }
}

/// Even-grade element: scalar, bivector and pseudoscalar parts.
///
/// Composing two simple rotations in different planes produces a
/// pseudoscalar part, so it is kept rather than dropped.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Rotor4 {
    pub s: f32,
    pub bv: Bivec4,
    pub xyzw: f32,
}

impl Default for Rotor4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotor4 {
    pub const IDENTITY: Rotor4 = Rotor4::new(1.0, Bivec4::ZERO, 0.0);

    pub const fn new(s: f32, bv: Bivec4, xyzw: f32) -> Self {
        Self { s, bv, xyzw }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation by `angle` radians in `plane`. For `Bivec4::XY` this turns
    /// +x towards +y. A zero plane has no orientation and gives the identity.
    pub fn from_plane_angle(plane: Bivec4, angle: f32) -> Self {
        if plane.mag_sq() == 0.0 {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        Self::new(half.cos(), plane.normalized() * -half.sin(), 0.0)
    }

    /// Shortest rotation taking the direction of `from` onto the direction of
    /// `to`. Zero vectors give the identity. Opposite vectors have no unique
    /// plane; a half turn in the plane of `from` and its smallest axis is used.
    pub fn from_rotation_between(from: Vec4, to: Vec4) -> Self {
        let from = from.normalize_or_zero();
        let to = to.normalize_or_zero();
        if from == Vec4::ZERO || to == Vec4::ZERO {
            return Self::IDENTITY;
        }

        let s = 1.0 + to.dot(from);
        if s <= 1e-6 {
            let abs = from.abs();
            let axis = if abs.x <= abs.y && abs.x <= abs.z && abs.x <= abs.w {
                Vec4::X
            } else if abs.y <= abs.z && abs.y <= abs.w {
                Vec4::Y
            } else if abs.z <= abs.w {
                Vec4::Z
            } else {
                Vec4::W
            };
            return Self::from_plane_angle(Bivec4::wedge(from, axis), std::f32::consts::PI);
        }

        Self::new(s, Bivec4::wedge(to, from), 0.0).normalized()
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.s, -self.bv, self.xyzw)
    }

    pub fn mag_sq(&self) -> f32 {
        self.s * self.s + self.bv.mag_sq() + self.xyzw * self.xyzw
    }

    pub fn mag(&self) -> f32 {
        self.mag_sq().sqrt()
    }

    #[inline]
    pub fn normalize(&mut self) {
        let inv = self.mag().recip();
        self.s *= inv;
        self.bv *= inv;
        self.xyzw *= inv;
    }

    #[inline]
    #[must_use = "Did you mean to use `.normalize()` to normalize `self` in place?"]
    pub fn normalized(&self) -> Self {
        let mut me = *self;
        me.normalize();
        me
    }

    /// Sandwich product `R v R~`.
    pub fn rotate(&self, v: Vec4) -> Vec4 {
        let r = self.to_mv();
        let rv = geometric_product(&r, &vector_to_mv(v));
        mv_to_vector(&geometric_product(&rv, &self.reverse().to_mv()))
    }

    fn to_mv(self) -> Multivector {
        let mut mv = [0.0; 16];
        mv[0] = self.s;
        mv[XY] = self.bv.xy;
        mv[XZ] = self.bv.xz;
        mv[XW] = self.bv.xw;
        mv[YZ] = self.bv.yz;
        mv[YW] = self.bv.yw;
        mv[ZW] = self.bv.zw;
        mv[XYZW] = self.xyzw;
        mv
    }

    fn from_mv(mv: &Multivector) -> Self {
        Self::new(
            mv[0],
            Bivec4::new(mv[XY], mv[XZ], mv[XW], mv[YZ], mv[YW], mv[ZW]),
            mv[XYZW],
        )
    }
}

/// `a * b` is the rotation that applies `b` first, then `a`.
impl Mul for Rotor4 {
    type Output = Rotor4;

    fn mul(self, rhs: Rotor4) -> Self::Output {
        Rotor4::from_mv(&geometric_product(&self.to_mv(), &rhs.to_mv()))
    }
}

impl Mul<Vec4> for Rotor4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        self.rotate(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    fn assert_vec_eq(a: Vec4, b: Vec4) {
        assert!((a - b).length() < EPS, "{a:?} != {b:?}");
    }

    #[test]
    fn identity_leaves_vectors_alone() {
        let v = Vec4::new(1.0, -2.0, 3.0, 0.5);
        assert_vec_eq(Rotor4::identity() * v, v);
    }

    #[test]
    fn quarter_turn_in_each_plane() {
        let cases = [
            (Bivec4::XY, Vec4::X, Vec4::Y),
            (Bivec4::XZ, Vec4::X, Vec4::Z),
            (Bivec4::XW, Vec4::X, Vec4::W),
            (Bivec4::YZ, Vec4::Y, Vec4::Z),
            (Bivec4::YW, Vec4::Y, Vec4::W),
            (Bivec4::ZW, Vec4::Z, Vec4::W),
        ];
        for (plane, from, to) in cases {
            let r = Rotor4::from_plane_angle(plane, FRAC_PI_2);
            assert_vec_eq(r.rotate(from), to);
            assert_vec_eq(r.rotate(to), -from);
        }
    }

    #[test]
    fn vectors_orthogonal_to_plane_are_fixed() {
        let r = Rotor4::from_plane_angle(Bivec4::XY, 1.1);
        assert_vec_eq(r * Vec4::Z, Vec4::Z);
        assert_vec_eq(r * Vec4::W, Vec4::W);
    }

    #[test]
    fn composition_applies_right_operand_first() {
        let a = Rotor4::from_plane_angle(Bivec4::XY, FRAC_PI_2);
        let b = Rotor4::from_plane_angle(Bivec4::ZW, 0.7);
        let c = Rotor4::from_plane_angle(Bivec4::XZ, -0.3);
        let v = Vec4::new(0.3, -1.2, 2.0, 0.9);

        let composed = a * b * c;
        assert_vec_eq(composed * v, a * (b * (c * v)));
    }

    #[test]
    fn double_rotation_has_pseudoscalar_part() {
        let a = Rotor4::from_plane_angle(Bivec4::XY, FRAC_PI_2);
        let b = Rotor4::from_plane_angle(Bivec4::ZW, FRAC_PI_2);
        let ab = a * b;
        assert!(ab.xyzw.abs() > 0.1);
        assert!((ab.mag() - 1.0).abs() < EPS);
        assert_vec_eq(ab * Vec4::X, Vec4::Y);
        assert_vec_eq(ab * Vec4::Z, Vec4::W);
    }

    #[test]
    fn rotation_preserves_length() {
        let plane = Bivec4::wedge(Vec4::new(1.0, 2.0, 0.0, -1.0), Vec4::new(0.0, 1.0, 3.0, 2.0));
        let r = Rotor4::from_plane_angle(plane, 2.3);
        let v = Vec4::new(4.0, -1.0, 0.25, 7.0);
        assert!(((r * v).length() - v.length()).abs() < 1e-4);
    }

    #[test]
    fn reverse_undoes_rotation() {
        let r = Rotor4::from_plane_angle(Bivec4::YW, 0.9) * Rotor4::from_plane_angle(Bivec4::XZ, 0.4);
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_vec_eq(r.reverse() * (r * v), v);
    }

    #[test]
    fn half_turn_negates_plane_vectors() {
        let r = Rotor4::from_plane_angle(Bivec4::wedge(Vec4::X, Vec4::Y), PI);
        assert_vec_eq(r * Vec4::X, -Vec4::X);
        assert_vec_eq(r * Vec4::Y, -Vec4::Y);
    }

    #[test]
    fn normalize_scales_to_unit() {
        let r = Rotor4::new(2.0, Bivec4::new(0.0, 2.0, 0.0, 0.0, 0.0, 0.0), 1.0).normalized();
        assert!((r.mag() - 1.0).abs() < EPS);
    }

    #[test]
    fn zero_plane_gives_identity() {
        assert_eq!(Bivec4::ZERO.normalized(), Bivec4::ZERO);
        let r = Rotor4::from_plane_angle(Bivec4::ZERO, 1.3);
        assert_eq!(r, Rotor4::IDENTITY);
        let v = Vec4::new(1.0, -2.0, 3.0, 0.5);
        assert_vec_eq(r * v, v);
    }

    #[test]
    fn rotation_between_axes() {
        let r = Rotor4::from_rotation_between(Vec4::X, Vec4::Y);
        assert_vec_eq(r * Vec4::X, Vec4::Y);
        assert_vec_eq(r * Vec4::Z, Vec4::Z);
        let expected = Rotor4::from_plane_angle(Bivec4::XY, FRAC_PI_2);
        assert!((r.s - expected.s).abs() < EPS);
        assert!((r.bv.xy - expected.bv.xy).abs() < EPS);
    }

    #[test]
    fn rotation_between_general_vectors() {
        let from = Vec4::new(1.0, 2.0, 0.0, -1.0);
        let to = Vec4::new(0.0, 1.0, 3.0, 2.0);
        let r = Rotor4::from_rotation_between(from, to);
        assert!((r.mag() - 1.0).abs() < EPS);
        assert_vec_eq(r * from.normalize(), to.normalize());
    }

    #[test]
    fn rotation_between_degenerate_inputs() {
        assert_eq!(Rotor4::from_rotation_between(Vec4::ZERO, Vec4::X), Rotor4::IDENTITY);
        assert_vec_eq(Rotor4::from_rotation_between(Vec4::Z, Vec4::Z) * Vec4::Z, Vec4::Z);

        let from = Vec4::new(0.5, -1.0, 2.0, 0.0);
        let r = Rotor4::from_rotation_between(from, -from);
        assert!(!r.s.is_nan());
        assert_vec_eq(r * from, -from);
    }
}
