//! Menu-driven calculator: arithmetic, logarithms and trigonometry on `f64`.
//! Angles are in radians.

mod session;

use std::str::FromStr;

use thiserror::Error;

pub use session::run_session;

/// Reasons an operation has no result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("Division by zero!")]
    DivisionByZero,
    #[error("Cannot calculate square root of a negative number!")]
    NegativeSquareRoot,
    #[error("Logarithm input must be positive!")]
    NonPositiveLogarithm,
    #[error("Tangent undefined for this angle.")]
    TangentUndefined,
    #[error("Invalid input. Please enter a valid choice (1-12).")]
    InvalidChoice(String),
}

/// Operations taking two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn apply(self, x: f64, y: f64) -> Result<f64, CalcError> {
        match self {
            BinaryOp::Add => Ok(x + y),
            BinaryOp::Subtract => Ok(x - y),
            BinaryOp::Multiply => Ok(x * y),
            BinaryOp::Divide if y == 0.0 => Err(CalcError::DivisionByZero),
            BinaryOp::Divide => Ok(x / y),
            BinaryOp::Power => Ok(x.powf(y)),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }
}

/// Operations taking one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    SquareRoot,
    Log10,
    NaturalLog,
    Sine,
    Cosine,
    Tangent,
}

impl UnaryOp {
    pub fn apply(self, x: f64) -> Result<f64, CalcError> {
        match self {
            UnaryOp::SquareRoot if x < 0.0 => Err(CalcError::NegativeSquareRoot),
            UnaryOp::SquareRoot => Ok(x.sqrt()),
            UnaryOp::Log10 | UnaryOp::NaturalLog if x <= 0.0 => {
                Err(CalcError::NonPositiveLogarithm)
            }
            UnaryOp::Log10 => Ok(x.log10()),
            UnaryOp::NaturalLog => Ok(x.ln()),
            UnaryOp::Sine => Ok(x.sin()),
            UnaryOp::Cosine => Ok(x.cos()),
            UnaryOp::Tangent => {
                let tan = x.tan();
                if tan.is_finite() {
                    Ok(tan)
                } else {
                    Err(CalcError::TangentUndefined)
                }
            }
        }
    }

    /// Left-hand side of the result line, e.g. `Square root of 9.0`.
    pub fn describe(self, x: f64) -> String {
        let x = format_number(x);
        match self {
            UnaryOp::SquareRoot => format!("Square root of {x}"),
            UnaryOp::Log10 => format!("Log base 10 of {x}"),
            UnaryOp::NaturalLog => format!("Natural log of {x}"),
            UnaryOp::Sine => format!("Sine of {x} radians"),
            UnaryOp::Cosine => format!("Cosine of {x} radians"),
            UnaryOp::Tangent => format!("Tangent of {x} radians"),
        }
    }
}

/// Render a value the way the menu prints it: whole numbers keep a `.0`.
pub fn format_number(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

/// One entry of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Exit,
}

impl FromStr for MenuChoice {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = match s.trim() {
            "1" => MenuChoice::Binary(BinaryOp::Add),
            "2" => MenuChoice::Binary(BinaryOp::Subtract),
            "3" => MenuChoice::Binary(BinaryOp::Multiply),
            "4" => MenuChoice::Binary(BinaryOp::Divide),
            "5" => MenuChoice::Binary(BinaryOp::Power),
            "6" => MenuChoice::Unary(UnaryOp::SquareRoot),
            "7" => MenuChoice::Unary(UnaryOp::Log10),
            "8" => MenuChoice::Unary(UnaryOp::NaturalLog),
            "9" => MenuChoice::Unary(UnaryOp::Sine),
            "10" => MenuChoice::Unary(UnaryOp::Cosine),
            "11" => MenuChoice::Unary(UnaryOp::Tangent),
            "12" => MenuChoice::Exit,
            other => return Err(CalcError::InvalidChoice(other.to_string())),
        };
        Ok(choice)
    }
}

pub const MENU: &str = "\
Advanced Calculator
Select operation:
1. Add
2. Subtract
3. Multiply
4. Divide
5. Power (x^y)
6. Square Root
7. Logarithm (base 10)
8. Natural Logarithm (ln)
9. Sine
10. Cosine
11. Tangent
12. Exit";

#[cfg(test)]
mod tests {
    use std::f64::consts::{E, FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn binary_arithmetic() {
        assert_eq!(BinaryOp::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(BinaryOp::Subtract.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(BinaryOp::Multiply.apply(2.5, 4.0), Ok(10.0));
        assert_eq!(BinaryOp::Divide.apply(9.0, 3.0), Ok(3.0));
        assert_eq!(BinaryOp::Power.apply(2.0, 10.0), Ok(1024.0));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            BinaryOp::Divide.apply(1.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            BinaryOp::Divide.apply(1.0, -0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn square_root_domain() {
        assert_eq!(UnaryOp::SquareRoot.apply(9.0), Ok(3.0));
        assert_eq!(UnaryOp::SquareRoot.apply(0.0), Ok(0.0));
        assert_eq!(
            UnaryOp::SquareRoot.apply(-1.0),
            Err(CalcError::NegativeSquareRoot)
        );
    }

    #[test]
    fn logarithm_domain() {
        let log = UnaryOp::Log10.apply(1000.0).expect("log10");
        assert!((log - 3.0).abs() < 1e-12);
        let ln = UnaryOp::NaturalLog.apply(E).expect("ln e");
        assert!((ln - 1.0).abs() < 1e-12);
        for x in [0.0, -5.0] {
            assert_eq!(UnaryOp::Log10.apply(x), Err(CalcError::NonPositiveLogarithm));
            assert_eq!(
                UnaryOp::NaturalLog.apply(x),
                Err(CalcError::NonPositiveLogarithm)
            );
        }
    }

    #[test]
    fn trigonometry_in_radians() {
        let sin = UnaryOp::Sine.apply(FRAC_PI_2).expect("sin");
        assert!((sin - 1.0).abs() < 1e-12);
        let cos = UnaryOp::Cosine.apply(PI).expect("cos");
        assert!((cos + 1.0).abs() < 1e-12);
        let tan = UnaryOp::Tangent.apply(PI / 4.0).expect("tan");
        assert!((tan - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tangent_near_odd_half_pi_is_large_but_finite() {
        for k in [1.0, 3.0, 5.0, 7.0] {
            let tan = UnaryOp::Tangent
                .apply(k * FRAC_PI_2)
                .expect("finite input gives a finite tangent");
            assert!(tan.abs() > 1e15, "k={k} gave {tan}");
        }
    }

    #[test]
    fn tangent_undefined_for_non_finite_input() {
        for x in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(UnaryOp::Tangent.apply(x), Err(CalcError::TangentUndefined));
        }
    }

    #[test]
    fn whole_numbers_print_with_trailing_zero() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(-4.0), "-4.0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(UnaryOp::SquareRoot.describe(16.0), "Square root of 16.0");
    }

    #[test]
    fn parses_menu_choices() {
        assert_eq!(
            "1".parse::<MenuChoice>(),
            Ok(MenuChoice::Binary(BinaryOp::Add))
        );
        assert_eq!(
            " 3 ".parse::<MenuChoice>(),
            Ok(MenuChoice::Binary(BinaryOp::Multiply))
        );
        assert_eq!(
            "11".parse::<MenuChoice>(),
            Ok(MenuChoice::Unary(UnaryOp::Tangent))
        );
        assert_eq!("12".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!(
            "13".parse::<MenuChoice>(),
            Err(CalcError::InvalidChoice("13".into()))
        );
    }
}
