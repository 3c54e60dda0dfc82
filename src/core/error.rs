/// Broad class of an [`IndexError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required year record is missing or the input is malformed
    Data,
    /// A ratio could not be formed because its denominator is zero
    Division,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("base year {0} not present in series")]
    MissingBaseYear(i32),
    #[error("no nominal revenue for {0}, which has an inflation rate")]
    MissingNominalYear(i32),
    #[error("year {0} appears more than once in series")]
    DuplicateYear(i32),
    #[error("year {0} appears more than once in inflation rates")]
    DuplicateRateYear(i32),
    #[error("inflation rates not in ascending year order: {year} follows {previous}")]
    UnsortedRates { year: i32, previous: i32 },
    #[error("no inflation rate supplied for {0}")]
    MissingRate(i32),
    #[error("real revenue is zero in {0}")]
    ZeroRealRevenue(i32),
    #[error("nominal revenue is zero in base year {0}")]
    ZeroBaseRatio(i32),
}

impl IndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexError::ZeroRealRevenue(_) | IndexError::ZeroBaseRatio(_) => ErrorKind::Division,
            IndexError::MissingBaseYear(_)
            | IndexError::MissingNominalYear(_)
            | IndexError::DuplicateYear(_)
            | IndexError::DuplicateRateYear(_)
            | IndexError::UnsortedRates { .. }
            | IndexError::MissingRate(_) => ErrorKind::Data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_errors_classified() {
        assert_eq!(IndexError::ZeroRealRevenue(2021).kind(), ErrorKind::Division);
        assert_eq!(IndexError::ZeroBaseRatio(2020).kind(), ErrorKind::Division);
    }

    #[test]
    fn data_errors_classified() {
        assert_eq!(IndexError::MissingBaseYear(2020).kind(), ErrorKind::Data);
        assert_eq!(IndexError::MissingRate(2019).kind(), ErrorKind::Data);
        assert_eq!(
            IndexError::UnsortedRates {
                year: 2021,
                previous: 2022
            }
            .kind(),
            ErrorKind::Data
        );
    }

    #[test]
    fn messages_name_the_year() {
        assert_eq!(
            IndexError::MissingBaseYear(2020).to_string(),
            "base year 2020 not present in series"
        );
        assert_eq!(
            IndexError::ZeroRealRevenue(2023).to_string(),
            "real revenue is zero in 2023"
        );
    }
}
