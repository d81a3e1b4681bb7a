//! Butcher tableaux for explicit Runge-Kutta schemes
//!
//! An explicit s-stage scheme is described by three arrays:
//!
//! ```text
//!   c₀  |
//!   c₁  | a₁₀
//!   c₂  | a₂₀  a₂₁
//!   ... | ...
//!  c_{s-1} | a_{s-1,0} ... a_{s-1,s-2}
//!  -----+---------------------------
//!       | b₀   b₁  ...  b_{s-1}
//! ```
//!
//! `a` is stored lower-triangular without its diagonal: row `i - 1` holds
//! the `i` coefficients of stage `i`. A one-stage scheme has no rows at all.
//!
//! # Registry
//!
//! | Name    | Stages | Order |
//! |---------|--------|-------|
//! | Euler-1 | 1      | 1     |
//! | Euler-2 | 2      | 2     |
//! | Hoin    | 3      | 3     |
//! | RK-6    | 7      | 6     |
//! | RK-7    | 9      | 7     |
//!
//! Tables are plain constants; selecting a scheme by name checks the
//! layout before handing the table out.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TransportError};

/// Tolerance used by [`ButcherTableau::consistency_defect`] callers
pub const CONSISTENCY_TOLERANCE: f64 = 1e-12;

/// Coefficients of an explicit Runge-Kutta scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButcherTableau {
    pub name: &'static str,

    /// Nominal order of accuracy
    pub order: usize,

    /// Stage time fractions, length s
    pub c: &'static [f64],

    /// Stage weights, length s
    pub b: &'static [f64],

    /// Strictly lower-triangular stage coefficients, s - 1 rows
    pub a: &'static [&'static [f64]],
}

impl ButcherTableau {
    /// Number of stages s
    pub fn stages(&self) -> usize {
        self.c.len()
    }

    /// Check the explicit layout
    ///
    /// Requires `len(c) == len(b) == s ≥ 1`, `s - 1` rows in `a`, and row
    /// `i - 1` of length `i`.
    pub fn validate(&self) -> Result<()> {
        let s = self.c.len();
        if s == 0 {
            return Err(TransportError::malformed_tableau(self.name, "no stages"));
        }
        if self.b.len() != s {
            return Err(TransportError::malformed_tableau(
                self.name,
                format!("{} weights for {} stages", self.b.len(), s),
            ));
        }
        if self.a.len() != s - 1 {
            return Err(TransportError::malformed_tableau(
                self.name,
                format!("{} rows in a, expected {}", self.a.len(), s - 1),
            ));
        }
        for (row, coefficients) in self.a.iter().enumerate() {
            if coefficients.len() != row + 1 {
                return Err(TransportError::malformed_tableau(
                    self.name,
                    format!(
                        "row {} of a has {} entries, expected {}",
                        row,
                        coefficients.len(),
                        row + 1
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Largest violation of `Σb = 1` and `cᵢ = Σⱼ aᵢⱼ`
    ///
    /// Zero (up to rounding) for a consistent scheme. Assumes a valid layout.
    pub fn consistency_defect(&self) -> f64 {
        let weights = (self.b.iter().sum::<f64>() - 1.0).abs();
        let first = self.c.first().map_or(0.0, |c| c.abs());

        self.a
            .iter()
            .zip(self.c.iter().skip(1))
            .map(|(row, c)| (row.iter().sum::<f64>() - c).abs())
            .fold(weights.max(first), f64::max)
    }
}

// =================================================================================================
// Registry
// =================================================================================================

/// Forward Euler
pub const EULER_1: ButcherTableau = ButcherTableau {
    name: "Euler-1",
    order: 1,
    c: &[0.0],
    b: &[1.0],
    a: &[],
};

/// Explicit midpoint rule
pub const EULER_2: ButcherTableau = ButcherTableau {
    name: "Euler-2",
    order: 2,
    c: &[0.0, 0.5],
    b: &[0.0, 1.0],
    a: &[&[0.5]],
};

/// Heun's third-order scheme
pub const HOIN: ButcherTableau = ButcherTableau {
    name: "Hoin",
    order: 3,
    c: &[0.0, 1.0 / 3.0, 2.0 / 3.0],
    b: &[1.0 / 4.0, 0.0, 3.0 / 4.0],
    a: &[&[1.0 / 3.0], &[0.0, 2.0 / 3.0]],
};

/// Seven-stage sixth-order scheme
pub const RK_6: ButcherTableau = ButcherTableau {
    name: "RK-6",
    order: 6,
    c: &[
        0.0,
        1.0 / 3.0,
        2.0 / 3.0,
        1.0 / 3.0,
        5.0 / 6.0,
        1.0 / 6.0,
        1.0,
    ],
    b: &[
        13.0 / 200.0,
        0.0,
        11.0 / 40.0,
        11.0 / 40.0,
        4.0 / 25.0,
        4.0 / 25.0,
        13.0 / 200.0,
    ],
    a: &[
        &[1.0 / 3.0],
        &[0.0, 2.0 / 3.0],
        &[1.0 / 12.0, 1.0 / 3.0, -1.0 / 12.0],
        &[25.0 / 48.0, -55.0 / 24.0, 35.0 / 48.0, 15.0 / 8.0],
        &[3.0 / 20.0, -11.0 / 24.0, -1.0 / 8.0, 1.0 / 2.0, 1.0 / 10.0],
        &[
            -261.0 / 260.0,
            33.0 / 13.0,
            43.0 / 156.0,
            -118.0 / 39.0,
            32.0 / 195.0,
            80.0 / 39.0,
        ],
    ],
};

/// Nine-stage seventh-order scheme
pub const RK_7: ButcherTableau = ButcherTableau {
    name: "RK-7",
    order: 7,
    c: &[
        0.0,
        1.0 / 6.0,
        1.0 / 3.0,
        1.0 / 2.0,
        2.0 / 11.0,
        2.0 / 3.0,
        6.0 / 7.0,
        0.0,
        1.0,
    ],
    b: &[
        0.0,
        0.0,
        0.0,
        32.0 / 105.0,
        1771561.0 / 6289920.0,
        243.0 / 2560.0,
        16807.0 / 74880.0,
        77.0 / 1440.0,
        11.0 / 270.0,
    ],
    a: &[
        &[1.0 / 6.0],
        &[0.0, 1.0 / 3.0],
        &[1.0 / 8.0, 0.0, 3.0 / 8.0],
        &[148.0 / 1331.0, 0.0, 150.0 / 1331.0, -56.0 / 1331.0],
        &[
            -404.0 / 243.0,
            0.0,
            -170.0 / 27.0,
            4024.0 / 1701.0,
            10648.0 / 1701.0,
        ],
        &[
            2466.0 / 2401.0,
            0.0,
            1242.0 / 343.0,
            -19176.0 / 16807.0,
            -51909.0 / 16807.0,
            1053.0 / 2401.0,
        ],
        &[
            5.0 / 154.0,
            0.0,
            0.0,
            96.0 / 539.0,
            -1815.0 / 20384.0,
            -405.0 / 2464.0,
            49.0 / 1144.0,
        ],
        &[
            -113.0 / 32.0,
            0.0,
            -195.0 / 22.0,
            32.0 / 7.0,
            29403.0 / 3584.0,
            -729.0 / 512.0,
            1029.0 / 1408.0,
            21.0 / 16.0,
        ],
    ],
};

/// Named time integration schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeScheme {
    Euler1,
    Euler2,
    Hoin,
    Rk6,
    Rk7,
}

impl TimeScheme {
    pub const ALL: [TimeScheme; 5] = [
        TimeScheme::Euler1,
        TimeScheme::Euler2,
        TimeScheme::Hoin,
        TimeScheme::Rk6,
        TimeScheme::Rk7,
    ];

    /// Registry key
    pub fn name(&self) -> &'static str {
        self.raw_tableau().name
    }

    /// Nominal order of accuracy
    pub fn order(&self) -> usize {
        self.raw_tableau().order
    }

    /// Coefficient table, checked for a valid explicit layout
    ///
    /// # Errors
    ///
    /// `MalformedTableau` when the array lengths disagree.
    pub fn tableau(&self) -> Result<&'static ButcherTableau> {
        let tableau = self.raw_tableau();
        tableau.validate()?;
        Ok(tableau)
    }

    fn raw_tableau(&self) -> &'static ButcherTableau {
        match self {
            TimeScheme::Euler1 => &EULER_1,
            TimeScheme::Euler2 => &EULER_2,
            TimeScheme::Hoin => &HOIN,
            TimeScheme::Rk6 => &RK_6,
            TimeScheme::Rk7 => &RK_7,
        }
    }

    /// Look a scheme up by registry key
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|s| s.name()).collect();
                TransportError::unknown_scheme("time integration scheme", name, &known)
            })
    }
}

impl FromStr for TimeScheme {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for TimeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
