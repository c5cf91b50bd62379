//! Passenger table schema
//!
//! The loader keeps a fixed whitelist of source columns and renames them to
//! lowercase names. Each field has a fixed storage kind.
//!
//! | source     | normalized    | kind     |
//! |------------|---------------|----------|
//! | `Survived` | `survived`    | int64    |
//! | `Pclass`   | `pclass`      | int64    |
//! | `Sex`      | `sex`         | category |
//! | `Age`      | `age`         | float64  |
//! | `SibSp`    | `sibsp`       | int64    |
//! | `Parch`    | `parch`       | int64    |
//! | `Fare`     | `fare`        | float64  |
//! | `Embarked` | `embarked`    | category |
//! | (derived)  | `family_size` | int64    |

use std::fmt;

use serde::Serialize;

/// A column of the passenger table.
///
/// The declaration order is the column order of every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Survived,
    Pclass,
    Sex,
    Age,
    SibSp,
    Parch,
    Fare,
    Embarked,
    FamilySize,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

impl Field {
    /// Fields read from the raw dataset, in whitelist order.
    pub const SOURCE: [Self; 8] = [
        Self::Survived,
        Self::Pclass,
        Self::Sex,
        Self::Age,
        Self::SibSp,
        Self::Parch,
        Self::Fare,
        Self::Embarked,
    ];

    /// All fields, including derived ones.
    pub const ALL: [Self; 9] = [
        Self::Survived,
        Self::Pclass,
        Self::Sex,
        Self::Age,
        Self::SibSp,
        Self::Parch,
        Self::Fare,
        Self::Embarked,
        Self::FamilySize,
    ];

    /// Normalized (lowercase) column name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Survived => "survived",
            Self::Pclass => "pclass",
            Self::Sex => "sex",
            Self::Age => "age",
            Self::SibSp => "sibsp",
            Self::Parch => "parch",
            Self::Fare => "fare",
            Self::Embarked => "embarked",
            Self::FamilySize => "family_size",
        }
    }

    /// Column name in the raw dataset, `None` for derived fields.
    #[must_use]
    pub fn source_name(self) -> Option<&'static str> {
        let name = match self {
            Self::Survived => "Survived",
            Self::Pclass => "Pclass",
            Self::Sex => "Sex",
            Self::Age => "Age",
            Self::SibSp => "SibSp",
            Self::Parch => "Parch",
            Self::Fare => "Fare",
            Self::Embarked => "Embarked",
            Self::FamilySize => return None,
        };
        Some(name)
    }

    #[must_use]
    pub fn kind(self) -> ColumnKind {
        match self {
            Self::Survived | Self::Pclass | Self::SibSp | Self::Parch | Self::FamilySize => {
                ColumnKind::Int
            }
            Self::Age | Self::Fare => ColumnKind::Float,
            Self::Sex | Self::Embarked => ColumnKind::Category,
        }
    }

    /// Whether a null in this column is a load error.
    #[must_use]
    pub fn is_required(self) -> bool {
        self == Self::Survived
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    #[must_use]
    pub fn from_source_name(name: &str) -> Option<Self> {
        Self::SOURCE
            .into_iter()
            .find(|f| f.source_name() == Some(name))
    }
}

/// Storage kind of a column, displayed as its dtype name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[display("int64")]
    Int,
    #[display("float64")]
    Float,
    #[display("category")]
    Category,
}

impl ColumnKind {
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        for field in Field::SOURCE {
            let source = field.source_name().unwrap();
            assert_eq!(Field::from_source_name(source), Some(field));
        }
    }

    #[test]
    fn test_derived_field_has_no_source() {
        assert_eq!(Field::FamilySize.source_name(), None);
        assert_eq!(Field::from_source_name("family_size"), None);
        assert_eq!(Field::from_source_name("survived"), None);
    }

    #[test]
    fn test_dtype_names() {
        assert_eq!(Field::Age.kind().to_string(), "float64");
        assert_eq!(Field::Sex.kind().to_string(), "category");
        assert_eq!(Field::Survived.kind().to_string(), "int64");
    }
}
