//! Reference functions approximated by the tables.
//!
//! [`Activation`] is the closed set of base formulas. A [`FunctionSpec`]
//! names one of them together with an input shift and the width of its
//! default sweep domain, so a sweep cell never depends on captured state.
//!
//! ```
//! use wavelut::function::{Activation, FunctionSpec};
//!
//! let sigmoid = FunctionSpec::new("Sigmoid", Activation::Sigmoid, -16.0, 5);
//! assert_eq!(sigmoid.evaluate(16.0), 0.5);
//! assert_eq!(Activation::Reciprocal.eval(0.0), f64::INFINITY);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};
use crate::fixed::FixedPointFormat;

const SELU_ALPHA: f64 = 1.6733;
const SELU_LAMBDA: f64 = 1.0507;

/// Base nonlinear functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// `x/2 · (1 + erf(x/√2))`.
    Gelu,
    /// `1 / (1 + e^-x)`.
    Sigmoid,
    /// Hyperbolic tangent.
    Tanh,
    /// `x · sigmoid(x)`.
    Silu,
    /// `ln(1 + e^x)`.
    Softplus,
    /// Scaled exponential linear unit.
    Selu,
    /// `x · tanh(softplus(x))`.
    Mish,
    /// `e^x`.
    Exp,
    /// `e^-x`.
    Nexp,
    /// `1 / x`.
    Reciprocal,
}

impl Activation {
    /// All activations in catalog order.
    pub const ALL: [Activation; 10] = [
        Activation::Gelu,
        Activation::Sigmoid,
        Activation::Tanh,
        Activation::Silu,
        Activation::Softplus,
        Activation::Selu,
        Activation::Mish,
        Activation::Exp,
        Activation::Nexp,
        Activation::Reciprocal,
    ];

    /// Lower-case identifier used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Activation::Gelu => "gelu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Silu => "silu",
            Activation::Softplus => "softplus",
            Activation::Selu => "selu",
            Activation::Mish => "mish",
            Activation::Exp => "exp",
            Activation::Nexp => "nexp",
            Activation::Reciprocal => "reciprocal",
        }
    }

    /// Evaluates the function. May return infinities (`reciprocal(0)`).
    #[must_use]
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Activation::Gelu => x / 2.0 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2)),
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
            Activation::Silu => x * sigmoid(x),
            Activation::Softplus => softplus(x),
            Activation::Selu => {
                if x < 0.0 {
                    SELU_ALPHA * SELU_LAMBDA * (x.exp() - 1.0)
                } else {
                    SELU_LAMBDA * x
                }
            }
            Activation::Mish => x * softplus(x).tanh(),
            Activation::Exp => x.exp(),
            Activation::Nexp => (-x).exp(),
            Activation::Reciprocal => x.recip(),
        }
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[inline]
fn softplus(x: f64) -> f64 {
    (1.0 + x.exp()).ln()
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Activation::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .ok_or_else(|| LutError::UnknownFunction(s.to_string()))
    }
}

/// A named, shifted activation with a default sweep domain.
///
/// `evaluate(x) = activation(x + shift)`. The default domain at precision
/// `p` is the unsigned domain of `p + extra_bits` input bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Identity used in reports and as the cache key.
    pub name: String,
    /// Base formula.
    pub activation: Activation,
    /// Added to the input before evaluation.
    #[serde(default)]
    pub shift: f64,
    /// Integer bits of the default domain.
    pub extra_bits: u32,
}

impl FunctionSpec {
    /// Creates a function spec.
    pub fn new(name: impl Into<String>, activation: Activation, shift: f64, extra_bits: u32) -> Self {
        Self {
            name: name.into(),
            activation,
            shift,
            extra_bits,
        }
    }

    /// The bare activation, unshifted, named after it.
    #[must_use]
    pub fn plain(activation: Activation) -> Self {
        Self::new(activation.name(), activation, 0.0, 0)
    }

    /// Evaluates the shifted function at a real input.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.activation.eval(x + self.shift)
    }

    /// Format of the default sweep domain at `precision` fractional bits.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidFormat`] if the resulting width is invalid.
    pub fn default_format(&self, precision: u32) -> Result<FixedPointFormat> {
        FixedPointFormat::new(precision + self.extra_bits, precision)
    }

    /// The nine shifted functions of the accuracy study.
    #[must_use]
    pub fn catalog() -> Vec<FunctionSpec> {
        vec![
            FunctionSpec::new("GeLU", Activation::Gelu, -8.0, 4),
            FunctionSpec::new("Sigmoid", Activation::Sigmoid, -16.0, 5),
            FunctionSpec::new("Tanh", Activation::Tanh, -8.0, 4),
            FunctionSpec::new("SiLU", Activation::Silu, -16.0, 5),
            FunctionSpec::new("Softplus", Activation::Softplus, -16.0, 5),
            FunctionSpec::new("SELU", Activation::Selu, -16.0, 4),
            FunctionSpec::new("Mish", Activation::Mish, -16.0, 5),
            FunctionSpec::new("Exponential", Activation::Exp, -16.0, 4),
            FunctionSpec::new("Reciprocal", Activation::Reciprocal, 1.0, 6),
        ]
    }

    /// Looks up a catalog entry by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::UnknownFunction`] if no entry matches.
    pub fn from_catalog(name: &str) -> Result<FunctionSpec> {
        Self::catalog()
            .into_iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LutError::UnknownFunction(name.to_string()))
    }
}
