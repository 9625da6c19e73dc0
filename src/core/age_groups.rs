/// Inclusive student age range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Inclusive overlap with `[job_min, job_max]`; a shared boundary counts
    #[inline]
    pub fn overlaps(&self, job_min: f64, job_max: f64) -> bool {
        f64::from(self.min) <= job_max && f64::from(self.max) >= job_min
    }
}

/// Age group labels used by the profile form and by teaching experience entries
const AGE_GROUP_RANGES: [(&str, AgeRange); 11] = [
    ("0-5", AgeRange::new(0, 5)),
    ("6-11", AgeRange::new(6, 11)),
    ("12-14", AgeRange::new(12, 14)),
    ("15-18", AgeRange::new(15, 18)),
    ("19-30", AgeRange::new(19, 30)),
    ("30+", AgeRange::new(30, 100)),
    ("Kids (5-12)", AgeRange::new(5, 12)),
    ("Teens (13-17)", AgeRange::new(13, 17)),
    ("Adults (18+)", AgeRange::new(18, 100)),
    ("Young Adults (18-25)", AgeRange::new(18, 25)),
    ("Adults (25+)", AgeRange::new(25, 100)),
];

/// Numeric range for an age group label; labels match exactly
pub fn age_range(label: &str) -> Option<AgeRange> {
    AGE_GROUP_RANGES
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, range)| *range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(age_range("0-5"), Some(AgeRange::new(0, 5)));
        assert_eq!(age_range("30+"), Some(AgeRange::new(30, 100)));
        assert_eq!(age_range("Young Adults (18-25)"), Some(AgeRange::new(18, 25)));
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(age_range("toddlers"), None);
        assert_eq!(age_range("kids (5-12)"), None);
    }

    #[test]
    fn test_shared_boundary_overlaps() {
        let range = age_range("12-14").unwrap();
        assert!(range.overlaps(14.0, 18.0));
        assert!(range.overlaps(5.0, 12.0));
        assert!(!range.overlaps(15.0, 18.0));
        assert!(!range.overlaps(0.0, 11.0));
    }

    #[test]
    fn test_open_ended_range() {
        let adults = age_range("Adults (18+)").unwrap();
        assert!(adults.overlaps(40.0, 65.0));
        assert!(!adults.overlaps(6.0, 11.0));
    }
}
