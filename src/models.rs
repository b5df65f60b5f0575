use std::fmt;

/// Label written for a roster name whose first name is absent from the reference table.
pub const UNKNOWN_SEX: &str = "U";

/// Header of the primary output.
pub const OUTPUT_HEADERS: [&str; 4] = ["LastName", "FirstName", "MiddleName", "Sex"];

/// One parsed roster name. Equality is exact over all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameRecord {
    last: String,
    first: String,
    middle_initial: String,
}

/// Deduplication key: (last, first, middle_initial).
pub type DedupKey = (String, String, String);

impl NameRecord {
    /// Build a record from raw components; each is trimmed.
    pub fn new(last: &str, first: &str, middle_initial: &str) -> Self {
        Self {
            last: last.trim().to_string(),
            first: first.trim().to_string(),
            middle_initial: middle_initial.trim().to_string(),
        }
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn middle_initial(&self) -> &str {
        &self.middle_initial
    }

    pub fn dedup_key(&self) -> DedupKey {
        (
            self.last.clone(),
            self.first.clone(),
            self.middle_initial.clone(),
        )
    }
}

/// `Last, First` or `Last, First M.`
impl fmt::Display for NameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last, self.first)?;
        if !self.middle_initial.is_empty() {
            write!(f, " {}.", self.middle_initial)?;
        }
        Ok(())
    }
}

/// A roster name joined with its sex label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledName<'a> {
    pub record: &'a NameRecord,
    pub sex: &'a str,
}

impl LabeledName<'_> {
    pub fn is_unknown(&self) -> bool {
        self.sex == UNKNOWN_SEX
    }

    pub fn as_row(&self) -> [&str; 4] {
        [
            self.record.last(),
            self.record.first(),
            self.record.middle_initial(),
            self.sex,
        ]
    }
}

/// Which of the required reference columns a header carries, and where.
#[derive(Debug, Clone, Default)]
pub struct ReferenceColumns {
    pub name: Option<usize>,
    pub gender: Option<usize>,
    pub frequency: Option<usize>,
}

impl ReferenceColumns {
    pub const NAME: &'static str = "name";
    pub const GENDER: &'static str = "gender";
    pub const FREQUENCY: &'static str = "frequency";

    pub fn from_headers<'h>(headers: impl IntoIterator<Item = &'h str>) -> Self {
        let mut cols = Self::default();
        for (idx, h) in headers.into_iter().enumerate() {
            match h.trim() {
                Self::NAME => cols.name = Some(idx),
                Self::GENDER => cols.gender = Some(idx),
                Self::FREQUENCY => cols.frequency = Some(idx),
                _ => {}
            }
        }
        cols
    }

    /// Names of the required columns the header lacks, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.name.is_none() {
            out.push(Self::NAME);
        }
        if self.gender.is_none() {
            out.push(Self::GENDER);
        }
        if self.frequency.is_none() {
            out.push(Self::FREQUENCY);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_and_without_middle() {
        assert_eq!(NameRecord::new("Aalami", "Oliver", "O").to_string(), "Aalami, Oliver O.");
        assert_eq!(NameRecord::new("Aanjaneya", "Mridul", "").to_string(), "Aanjaneya, Mridul");
    }

    #[test]
    fn components_are_trimmed() {
        let r = NameRecord::new("  Li ", " Fei-Fei\n", "\t");
        assert_eq!(r.last(), "Li");
        assert_eq!(r.first(), "Fei-Fei");
        assert_eq!(r.middle_initial(), "");
    }

    #[test]
    fn key_is_case_sensitive() {
        let a = NameRecord::new("Smith", "Ann", "B");
        let b = NameRecord::new("smith", "Ann", "B");
        assert_ne!(a.dedup_key(), b.dedup_key());
        assert_eq!(a.dedup_key(), NameRecord::new("Smith ", "Ann", " B").dedup_key());
    }

    #[test]
    fn reference_columns_any_order() {
        let cols = ReferenceColumns::from_headers(["frequency", " gender", "name "]);
        assert_eq!(cols.name, Some(2));
        assert_eq!(cols.gender, Some(1));
        assert!(cols.missing().is_empty());

        let cols = ReferenceColumns::from_headers(["name", "sex", "count"]);
        assert_eq!(cols.missing(), vec!["gender", "frequency"]);
    }

    #[test]
    fn labeled_row_order() {
        let r = NameRecord::new("Engler", "Dawson", "R");
        let l = LabeledName { record: &r, sex: UNKNOWN_SEX };
        assert!(l.is_unknown());
        assert_eq!(l.as_row(), ["Engler", "Dawson", "R", "U"]);
    }
}
