//! Runtime dimensions and units for Arrhenius coefficients.
//!
//! Pre-exponential factors carry units such as `particle m^-3 Pa^-0.5`: a
//! half-integer pressure exponent whose value is only known once the source
//! data is read. The static `uom` quantities cover temperatures and energies;
//! this module covers the coefficient side.
//!
//! # Basis
//!
//! Four engineering base dimensions: length, time, amount and pressure.
//! Canonical symbols are `m`, `s`, `particle` and `Pa`. Pressure is kept as
//! its own base so the Henry/Sievert law can be read directly off its exponent.
//! Exponents are stored in half steps.

use crate::numeric::{Tolerances, nearly_equal};
use crate::units::constants::AVOGADRO;
use crate::{CoreError, CoreResult};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Dimension exponent, stored as a count of halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Exponent(i16);

impl Exponent {
    pub const ZERO: Self = Self(0);
    pub const HALF: Self = Self(1);
    pub const ONE: Self = Self(2);
    /// Largest magnitude a parsed or combined exponent may reach (±64).
    pub const MAX: Self = Self(128);

    /// Whole-number exponent.
    pub const fn whole(n: i16) -> Self {
        Self(n * 2)
    }

    /// Exponent of `n / 2`.
    pub const fn halves(n: i16) -> Self {
        Self(n)
    }

    /// Accepts only whole and half-integer values no larger than [`Self::MAX`].
    pub fn from_f64(v: f64) -> Option<Self> {
        let h = v * 2.0;
        if !h.is_finite()
            || (h - h.round()).abs() > 1e-9
            || h.abs() > f64::from(Self::MAX.0)
        {
            return None;
        }
        Some(Self(h.round() as i16))
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Sum of two exponents, `None` past [`Self::MAX`].
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .filter(|h| h.abs() <= Self::MAX.0)
            .map(Self)
    }

    /// Product of two exponents, if it is still a half-integer.
    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let p = i32::from(self.0) * i32::from(other.0);
        if p % 2 != 0 {
            return None;
        }
        i16::try_from(p / 2).ok().map(Self)
    }
}

impl Add for Exponent {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Exponent {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Exponent {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}", self.as_f64())
        }
    }
}

/// Exponents over the four base dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub length: Exponent,
    pub time: Exponent,
    pub amount: Exponent,
    pub pressure: Exponent,
}

impl Dimension {
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0);
    pub const LENGTH: Self = Self::new(1, 0, 0, 0);
    pub const TIME: Self = Self::new(0, 1, 0, 0);
    pub const AMOUNT: Self = Self::new(0, 0, 1, 0);
    pub const PRESSURE: Self = Self::new(0, 0, 0, 1);

    /// Whole-number exponents for length, time, amount, pressure.
    pub const fn new(length: i16, time: i16, amount: i16, pressure: i16) -> Self {
        Self {
            length: Exponent::whole(length),
            time: Exponent::whole(time),
            amount: Exponent::whole(amount),
            pressure: Exponent::whole(pressure),
        }
    }

    pub const fn with_pressure(self, pressure: Exponent) -> Self {
        Self { pressure, ..self }
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }

    pub fn recip(self) -> Self {
        Self {
            length: -self.length,
            time: -self.time,
            amount: -self.amount,
            pressure: -self.pressure,
        }
    }

    /// Raise to a (half-integer) power. `None` if any exponent would leave the
    /// half-integer lattice.
    pub fn pow(self, e: Exponent) -> Option<Self> {
        Some(Self {
            length: self.length.checked_mul(e)?,
            time: self.time.checked_mul(e)?,
            amount: self.amount.checked_mul(e)?,
            pressure: self.pressure.checked_mul(e)?,
        })
    }

    /// Exponent-wise sum, `None` if any exponent would pass [`Exponent::MAX`].
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Some(Self {
            length: self.length.checked_add(rhs.length)?,
            time: self.time.checked_add(rhs.time)?,
            amount: self.amount.checked_add(rhs.amount)?,
            pressure: self.pressure.checked_add(rhs.pressure)?,
        })
    }

    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.checked_mul(rhs.recip())
    }

    fn components(&self) -> [(&'static str, Exponent); 4] {
        [
            ("amount", self.amount),
            ("length", self.length),
            ("time", self.time),
            ("pressure", self.pressure),
        ]
    }

    fn symbols(&self) -> [(&'static str, Exponent); 4] {
        [
            ("particle", self.amount),
            ("m", self.length),
            ("s", self.time),
            ("Pa", self.pressure),
        ]
    }
}

impl Mul for Dimension {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            length: self.length + rhs.length,
            time: self.time + rhs.time,
            amount: self.amount + rhs.amount,
            pressure: self.pressure + rhs.pressure,
        }
    }
}

impl Div for Dimension {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        self * rhs.recip()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "[dimensionless]");
        }
        let mut first = true;
        for (name, e) in self.components() {
            if e.is_zero() {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if e == Exponent::ONE {
                write!(f, "[{name}]")?;
            } else {
                write!(f, "[{name}]^{e}")?;
            }
        }
        Ok(())
    }
}

/// A coefficient unit: dimension plus scale to the canonical unit of that
/// dimension (`m`, `s`, `particle`, `Pa` products).
#[derive(Clone, Debug)]
pub struct Unit {
    dimension: Dimension,
    scale: f64,
    label: Option<String>,
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && nearly_equal(self.scale, other.scale, Tolerances::relative(1e-12))
    }
}

impl Unit {
    pub fn new(dimension: Dimension, scale: f64) -> Self {
        Self {
            dimension,
            scale,
            label: None,
        }
    }

    /// Canonical unit of a dimension (scale 1).
    pub fn canonical(dimension: Dimension) -> Self {
        Self::new(dimension, 1.0)
    }

    pub fn dimensionless() -> Self {
        Self::canonical(Dimension::DIMENSIONLESS)
    }

    pub fn meter() -> Self {
        Self::canonical(Dimension::LENGTH)
    }

    pub fn second() -> Self {
        Self::canonical(Dimension::TIME)
    }

    pub fn particle() -> Self {
        Self::canonical(Dimension::AMOUNT)
    }

    pub fn mol() -> Self {
        Self::new(Dimension::AMOUNT, AVOGADRO)
    }

    pub fn pascal() -> Self {
        Self::canonical(Dimension::PRESSURE)
    }

    /// Attach a display label (e.g. the text it was parsed from).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_canonical(&self) -> bool {
        self.scale == 1.0
    }

    pub fn to_canonical(&self) -> Self {
        Self::canonical(self.dimension)
    }

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Multiplier taking a value in `self` to a value in `other`.
    pub fn conversion_factor(&self, other: &Unit) -> CoreResult<f64> {
        if !self.is_compatible(other) {
            return Err(CoreError::IncompatibleUnits {
                from: self.to_string(),
                to: other.to_string(),
            });
        }
        Ok(self.scale / other.scale)
    }

    pub fn recip(&self) -> Self {
        Self::new(self.dimension.recip(), 1.0 / self.scale)
    }

    pub fn pow(&self, e: Exponent) -> Option<Self> {
        let dimension = self.dimension.pow(e)?;
        Some(Self::new(dimension, self.scale.powf(e.as_f64())))
    }

    pub fn checked_mul(&self, rhs: &Unit) -> Option<Self> {
        let dimension = self.dimension.checked_mul(rhs.dimension)?;
        Some(Self::new(dimension, self.scale * rhs.scale))
    }

    pub fn checked_div(&self, rhs: &Unit) -> Option<Self> {
        let dimension = self.dimension.checked_div(rhs.dimension)?;
        Some(Self::new(dimension, self.scale / rhs.scale))
    }

    /// Parse unit text such as `m^2/s`, `mol m^-3 Pa^-0.5`, `cm²·s⁻¹` or
    /// `particle/m^3/Pa^0.5`.
    ///
    /// Factors are separated by whitespace, `*` or `·`; a `/` inverts the
    /// factor that follows it. Exponents use `^`, `**` or superscripts, and
    /// may be written as fractions: `Pa^-1/2` and `Pa^(-1/2)` both mean
    /// `Pa^-0.5`.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let normalized = normalize_unit_text(text);
        let mut unit = Unit::dimensionless();
        let mut invert_next = false;
        let mut saw_factor = false;

        for token in normalized.split_whitespace() {
            if token == "/" {
                if invert_next || !saw_factor {
                    return Err(parse_error(text, "dangling '/'"));
                }
                invert_next = true;
                continue;
            }
            let factor = parse_factor(text, token)?;
            let combined = if invert_next {
                unit.checked_div(&factor)
            } else {
                unit.checked_mul(&factor)
            };
            unit = combined.ok_or_else(|| {
                parse_error(text, format!("exponent out of range at '{token}'"))
            })?;
            invert_next = false;
            saw_factor = true;
        }

        if invert_next {
            return Err(parse_error(text, "trailing '/'"));
        }
        if !saw_factor {
            return Err(parse_error(text, "empty unit"));
        }
        Ok(unit.with_label(text.trim()))
    }
}

impl FromStr for Unit {
    type Err = CoreError;
    fn from_str(s: &str) -> CoreResult<Self> {
        Unit::parse(s)
    }
}

impl Mul for &Unit {
    type Output = Unit;
    fn mul(self, rhs: &Unit) -> Unit {
        Unit::new(self.dimension * rhs.dimension, self.scale * rhs.scale)
    }
}

impl Div for &Unit {
    type Output = Unit;
    fn div(self, rhs: &Unit) -> Unit {
        Unit::new(self.dimension / rhs.dimension, self.scale / rhs.scale)
    }
}

impl Mul for Unit {
    type Output = Unit;
    fn mul(self, rhs: Unit) -> Unit {
        &self * &rhs
    }
}

impl Div for Unit {
    type Output = Unit;
    fn div(self, rhs: Unit) -> Unit {
        &self / &rhs
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            return write!(f, "{label}");
        }
        let mut parts = Vec::new();
        if self.scale != 1.0 {
            parts.push(format!("{:e}", self.scale));
        }
        for (symbol, e) in self.dimension.symbols() {
            if e.is_zero() {
                continue;
            }
            if e == Exponent::ONE {
                parts.push(symbol.to_string());
            } else {
                parts.push(format!("{symbol}^{e}"));
            }
        }
        if parts.is_empty() {
            return write!(f, "dimensionless");
        }
        write!(f, "{}", parts.join(" "))
    }
}

fn parse_error(input: &str, reason: impl Into<String>) -> CoreError {
    CoreError::UnitParse {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn superscript_to_ascii(c: char) -> Option<char> {
    match c {
        '⁰' => Some('0'),
        '¹' => Some('1'),
        '²' => Some('2'),
        '³' => Some('3'),
        '⁴' => Some('4'),
        '⁵' => Some('5'),
        '⁶' => Some('6'),
        '⁷' => Some('7'),
        '⁸' => Some('8'),
        '⁹' => Some('9'),
        '⁻' => Some('-'),
        _ => None,
    }
}

/// Rewrite separators, `**` and superscript exponents into the plain
/// `base^exp` token form.
fn normalize_unit_text(text: &str) -> String {
    let chars: Vec<char> = text.trim().replace("**", "^").chars().collect();
    let mut out = String::with_capacity(chars.len() + 8);
    let mut in_superscript = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if let Some(ascii) = superscript_to_ascii(c) {
            if !in_superscript {
                out.push('^');
                in_superscript = true;
            }
            out.push(ascii);
            i += 1;
            continue;
        }
        // ⁰·⁵ style half exponents
        let next_is_superscript = chars
            .get(i + 1)
            .is_some_and(|n| superscript_to_ascii(*n).is_some());
        if c == '·' && in_superscript && next_is_superscript {
            out.push('.');
            i += 1;
            continue;
        }
        in_superscript = false;
        match c {
            '^' => {
                out.push('^');
                i = copy_exponent(&chars, i + 1, &mut out);
                continue;
            }
            '·' | '*' => out.push(' '),
            '/' => out.push_str(" / "),
            _ => out.push(c),
        }
        i += 1;
    }
    out
}

/// Copy the exponent starting at `start` into `out` as a single token and
/// return the index just past it. A parenthesised exponent is copied whole; a
/// bare one keeps an `n/d` fraction, so `Pa^-1/2` is not read as `Pa^-1 / 2`.
fn copy_exponent(chars: &[char], start: usize, out: &mut String) -> usize {
    let mut i = start;
    if chars.get(i) == Some(&'(') {
        while let Some(&c) = chars.get(i) {
            i += 1;
            if !c.is_whitespace() {
                out.push(c);
            }
            if c == ')' {
                break;
            }
        }
        return i;
    }

    let number = |i: &mut usize, out: &mut String| {
        while let Some(&c) = chars.get(*i) {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            out.push(c);
            *i += 1;
        }
    };
    if let Some(&sign) = chars.get(i)
        && (sign == '-' || sign == '+')
    {
        out.push(sign);
        i += 1;
    }
    number(&mut i, &mut *out);
    if chars.get(i) == Some(&'/')
        && chars.get(i + 1).is_some_and(char::is_ascii_digit)
    {
        out.push('/');
        i += 1;
        number(&mut i, &mut *out);
    }
    i
}

fn parse_exponent(input: &str, text: &str) -> CoreResult<Exponent> {
    let bad = || parse_error(input, format!("bad exponent '{text}'"));
    let inner = match text.strip_prefix('(') {
        Some(rest) => rest.strip_suffix(')').ok_or_else(bad)?,
        None => text,
    };
    let raw = match inner.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().map_err(|_| bad())?;
            let den: f64 = den.parse().map_err(|_| bad())?;
            if den == 0.0 {
                return Err(bad());
            }
            num / den
        }
        None => inner.parse().map_err(|_| bad())?,
    };
    Exponent::from_f64(raw).ok_or_else(|| {
        parse_error(
            input,
            format!(
                "exponent {raw} is not a multiple of 0.5 within ±{}",
                Exponent::MAX
            ),
        )
    })
}

fn parse_factor(input: &str, token: &str) -> CoreResult<Unit> {
    let (base, exponent) = match token.split_once('^') {
        Some((base, exp_text)) => (base, parse_exponent(input, exp_text)?),
        None => (token, Exponent::ONE),
    };

    if let Ok(number) = base.parse::<f64>() {
        if !number.is_finite() || number <= 0.0 {
            return Err(parse_error(input, format!("bad numeric factor '{base}'")));
        }
        return Ok(Unit::new(
            Dimension::DIMENSIONLESS,
            number.powf(exponent.as_f64()),
        ));
    }

    let atom = base_unit(base).ok_or_else(|| parse_error(input, format!("unknown unit '{base}'")))?;
    atom.pow(exponent)
        .ok_or_else(|| parse_error(input, format!("cannot raise '{base}' to {exponent}")))
}

fn base_unit(symbol: &str) -> Option<Unit> {
    let length = |scale: f64| Unit::new(Dimension::LENGTH, scale);
    let time = |scale: f64| Unit::new(Dimension::TIME, scale);
    let amount = |scale: f64| Unit::new(Dimension::AMOUNT, scale);
    let pressure = |scale: f64| Unit::new(Dimension::PRESSURE, scale);

    let unit = match symbol {
        "m" => length(1.0),
        "cm" => length(1e-2),
        "mm" => length(1e-3),
        "um" | "µm" | "μm" => length(1e-6),
        "nm" => length(1e-9),
        "L" | "l" => Unit::new(Dimension::new(3, 0, 0, 0), 1e-3),
        "s" => time(1.0),
        "ms" => time(1e-3),
        "min" => time(60.0),
        "h" | "hr" => time(3600.0),
        "particle" | "particles" | "molecule" | "molecules" | "atom" | "atoms" => amount(1.0),
        "mol" => amount(AVOGADRO),
        "mmol" => amount(AVOGADRO * 1e-3),
        "Pa" => pressure(1.0),
        "kPa" => pressure(1e3),
        "MPa" => pressure(1e6),
        "bar" => pressure(1e5),
        "mbar" => pressure(1e2),
        "atm" => pressure(101_325.0),
        "torr" | "Torr" => pressure(133.322_368_4),
        "mtorr" | "mTorr" => pressure(0.133_322_368_4),
        "1" | "dimensionless" => Unit::dimensionless(),
        _ => return None,
    };
    Some(unit)
}

/// A scalar value carrying a coefficient unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Coefficient {
    pub value: f64,
    pub unit: Unit,
}

impl Coefficient {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Parse the unit text and attach it to `value`.
    pub fn parse(value: f64, unit: &str) -> CoreResult<Self> {
        Ok(Self::new(value, Unit::parse(unit)?))
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Express in another compatible unit.
    pub fn to_unit(&self, unit: &Unit) -> CoreResult<Self> {
        let factor = self.unit.conversion_factor(unit)?;
        Ok(Self::new(self.value * factor, unit.clone()))
    }

    pub fn value_in(&self, unit: &Unit) -> CoreResult<f64> {
        Ok(self.to_unit(unit)?.value)
    }

    pub fn to_canonical(&self) -> Self {
        Self::new(self.value * self.unit.scale(), self.unit.to_canonical())
    }
}

impl Mul for &Coefficient {
    type Output = Coefficient;
    fn mul(self, rhs: &Coefficient) -> Coefficient {
        Coefficient::new(self.value * rhs.value, &self.unit * &rhs.unit)
    }
}

impl Div for &Coefficient {
    type Output = Coefficient;
    fn div(self, rhs: &Coefficient) -> Coefficient {
        Coefficient::new(self.value / rhs.value, &self.unit / &rhs.unit)
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4e} {}", self.value, self.unit)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn canonical_display_parses_back(
            length in -8_i16..8,
            time in -4_i16..4,
            amount in -3_i16..3,
            pressure_halves in -4_i16..4,
        ) {
            let dimension = Dimension::new(length, time, amount, 0)
                .with_pressure(Exponent::halves(pressure_halves));
            let unit = Unit::canonical(dimension);
            let text = unit.to_string();
            let parsed = Unit::parse(&text).unwrap();
            prop_assert_eq!(parsed.dimension(), dimension);
            prop_assert!(parsed.is_canonical());
        }
    }
}
