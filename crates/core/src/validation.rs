//! Custom field validators used by the job DTOs.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Equity is a fraction of the company and must lie in `[0, 1]`.
pub fn validate_equity(equity: &Decimal) -> Result<(), ValidationError> {
    if *equity < Decimal::ZERO || *equity > Decimal::ONE {
        let mut err = ValidationError::new("equity_range");
        err.message = Some("Equity must be between 0 and 1".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn accepts_bounds_and_fractions() {
        for value in ["0", "0.0", "0.5", "1", "1.00"] {
            let equity = Decimal::from_str(value).unwrap();
            assert!(validate_equity(&equity).is_ok(), "{value} should be accepted");
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for value in ["-0.1", "1.01", "2"] {
            let equity = Decimal::from_str(value).unwrap();
            assert!(validate_equity(&equity).is_err(), "{value} should be rejected");
        }
    }
}
