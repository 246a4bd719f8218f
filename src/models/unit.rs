use std::fmt;

/// Fixed display unit for the throughput summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSpec {
    B,
    KB,
    #[default]
    MB,
    GB,
}

impl UnitSpec {
    /// Case-insensitive lookup. Anything unrecognised falls back to MB.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "B"  => Self::B,
            "KB" => Self::KB,
            "MB" => Self::MB,
            "GB" => Self::GB,
            _    => Self::MB,
        }
    }

    pub fn divisor(&self) -> f64 {
        match self {
            Self::B  => 1.0,
            Self::KB => 1024.0,
            Self::MB => 1024.0 * 1024.0,
            Self::GB => 1024.0 * 1024.0 * 1024.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::B  => "B",
            Self::KB => "KB",
            Self::MB => "MB",
            Self::GB => "GB",
        }
    }
}

impl fmt::Display for UnitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(UnitSpec::from_name("kb"), UnitSpec::KB);
        assert_eq!(UnitSpec::from_name("Gb"), UnitSpec::GB);
        assert_eq!(UnitSpec::from_name("b"), UnitSpec::B);
    }

    #[test]
    fn unknown_names_fall_back_to_mb() {
        assert_eq!(UnitSpec::from_name("TB"), UnitSpec::MB);
        assert_eq!(UnitSpec::from_name(""), UnitSpec::MB);
    }

    #[test]
    fn divisors_are_powers_of_1024() {
        assert_eq!(UnitSpec::B.divisor(), 1.0);
        assert_eq!(UnitSpec::KB.divisor(), 1024.0);
        assert_eq!(UnitSpec::MB.divisor(), 1_048_576.0);
        assert_eq!(UnitSpec::GB.divisor(), 1_073_741_824.0);
    }
}
