use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

use crate::error::LinalgError;
use crate::scalar::Scalar;

/// Exact quotient of two integers, kept canonical: `gcd(num, den) == 1`
/// and `den > 0`.
#[derive(Debug, Clone)]
pub struct Rational {
    num: BigInt,
    den: BigInt,
}

impl Rational {
    pub fn new(num: BigInt, den: BigInt) -> Self {
        assert!(!den.is_zero(), "Denominator cannot be zero");

        if num.is_zero() {
            return Self {
                num,
                den: BigInt::one(),
            };
        }

        let g = num.gcd(&den);
        let num = num / &g;
        let den = den / &g;

        if den.is_negative() {
            return Self {
                num: -num,
                den: -den,
            };
        }
        Self { num, den }
    }

    pub fn from_integer(n: i64) -> Self {
        Self {
            num: BigInt::from(n),
            den: BigInt::one(),
        }
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    pub fn to_f64(&self) -> f64 {
        match (self.num.to_f64(), self.den.to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_integer(n)
    }
}

impl FromStr for Rational {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self, LinalgError> {
        let parse = |part: &str| {
            BigInt::parse_bytes(part.trim().as_bytes(), 10)
                .ok_or_else(|| LinalgError::Parse(s.to_string()))
        };

        let mut parts = s.split('/');
        let num = parse(parts.next().unwrap_or(""))?;
        let den = match parts.next() {
            Some(d) => parse(d)?,
            None => BigInt::one(),
        };
        if parts.next().is_some() || den.is_zero() {
            return Err(LinalgError::Parse(s.to_string()));
        }

        Ok(Rational::new(num, den))
    }
}

impl ops::Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        if self.den == rhs.den {
            return Rational::new(self.num + rhs.num, self.den);
        }

        Rational::new(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        self + (-rhs)
    }
}

impl ops::Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl ops::Div for Rational {
    type Output = Rational;

    fn div(self, rhs: Rational) -> Rational {
        assert!(!rhs.num.is_zero(), "Division by zero");
        Rational::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        // sign flip keeps the canonical form
        Rational {
            num: -self.num,
            den: self.den,
        }
    }
}

impl One for Rational {
    fn one() -> Rational {
        Rational::from_integer(1)
    }
}

impl Zero for Rational {
    fn zero() -> Rational {
        Rational::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl PartialEq<Rational> for Rational {
    fn eq(&self, rhs: &Rational) -> bool {
        // both sides are canonical
        self.num == rhs.num && self.den == rhs.den
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, rhs: &i64) -> bool {
        self.den.is_one() && self.num == BigInt::from(*rhs)
    }
}

impl PartialOrd<Rational> for Rational {
    fn partial_cmp(&self, rhs: &Rational) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Eq for Rational {}
impl Ord for Rational {
    fn cmp(&self, rhs: &Rational) -> Ordering {
        (&self.num * &rhs.den).cmp(&(&rhs.num * &self.den))
    }
}

impl std::iter::Sum<Rational> for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::zero(), |acc, f| acc + f)
    }
}

impl Scalar for Rational {
    fn magnitude(&self) -> Rational {
        Rational {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    fn approx_eq(&self, other: &Rational, _epsilon: f64) -> bool {
        self == other
    }

    /// Halves round up.
    fn nearest_integer(&self) -> Rational {
        let two = BigInt::from(2);
        let n = (&self.num * &two + &self.den).div_floor(&(&self.den * &two));
        Rational {
            num: n,
            den: BigInt::one(),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
