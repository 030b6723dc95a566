use std::str::FromStr;

use super::SupabaseError;

/// Parsed `content-range` response header, e.g. `0-9/42` or `*/42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub total: u64,
}

impl FromStr for ContentRange {
    type Err = SupabaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let total = match value.rsplit_once('/') {
            Some((_, total)) => total,
            None => value,
        };
        total
            .trim()
            .parse::<u64>()
            .map(|total| ContentRange { total })
            .map_err(|_| SupabaseError::MalformedContentRange(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_total_after_slash() {
        assert_eq!("0-9/42".parse::<ContentRange>().unwrap().total, 42);
        assert_eq!("*/7".parse::<ContentRange>().unwrap().total, 7);
    }

    #[test]
    fn bare_number_is_total() {
        assert_eq!("0".parse::<ContentRange>().unwrap().total, 0);
        assert_eq!("15".parse::<ContentRange>().unwrap().total, 15);
    }

    #[test]
    fn rejects_non_numeric_total() {
        assert!(matches!(
            "0-9/*".parse::<ContentRange>(),
            Err(SupabaseError::MalformedContentRange(_))
        ));
        assert!("bytes".parse::<ContentRange>().is_err());
        assert!("".parse::<ContentRange>().is_err());
    }
}
