use anyhow::Result;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Working days value is invalid: {reason}")]
    InvalidWorkingDays { reason: String },

    #[error("Report period is invalid: {field} - {reason}")]
    InvalidPeriod { field: String, reason: String },
}

/// Working days is the user-supplied days-in-month proxy for man-day math.
pub fn validate_working_days(working_days: u32) -> Result<u32> {
    if working_days == 0 || working_days > 31 {
        return Err(ValidationError::InvalidWorkingDays {
            reason: format!("{} is outside the 1-31 range", working_days),
        }
        .into());
    }

    Ok(working_days)
}

pub fn validate_month(month: u32) -> Result<u32> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidPeriod {
            field: "month".to_string(),
            reason: format!("{} is outside the 1-12 range", month),
        }
        .into());
    }

    Ok(month)
}

pub fn validate_year(year: i32) -> Result<i32> {
    if !(2000..=2100).contains(&year) {
        return Err(ValidationError::InvalidPeriod {
            field: "year".to_string(),
            reason: format!("{} is not a plausible report year", year),
        }
        .into());
    }

    Ok(year)
}
