use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("destination at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate destination id '{0}'")]
    DuplicateId(String),
}

/// Which of a destination's option lists a trip choice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Transportation,
    Accommodation,
    Activity,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OptionKind::Transportation => "transportation",
            OptionKind::Accommodation => "accommodation",
            OptionKind::Activity => "activity",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TripError {
    #[error("'{value}' is not a {kind} option offered by {destination}")]
    UnknownOption {
        kind: OptionKind,
        value: String,
        destination: String,
    },

    #[error("trip ends ({end}) before it starts ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("travelers must be between 1 and 10, got {0}")]
    TravelersOutOfRange(u32),

    #[error("no {0} selected")]
    MissingChoice(OptionKind),
}
