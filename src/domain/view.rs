//! View state owned by the caller and passed into filter/sort calls.

use serde::{Deserialize, Serialize};

/// Field a link view can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Originating message timestamp.
    #[default]
    Date,
    /// Message author.
    User,
    /// URL hostname.
    Domain,
    /// The URL itself.
    Url,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "user" => Ok(Self::User),
            "domain" => Ok(Self::Domain),
            "url" => Ok(Self::Url),
            _ => Err(format!("Unknown sort field: {s}. Use: date, user, domain, url")),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::User => write!(f, "user"),
            Self::Domain => write!(f, "domain"),
            Self::Url => write!(f, "url"),
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!("Unknown sort direction: {s}. Use: asc, desc")),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Search, user selection and sort order for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Case-insensitive substring matched against url, message and domain.
    pub search: String,
    /// Exact author to keep; `None` keeps everyone.
    pub user: Option<String>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl ViewState {
    /// Selects a sort column the way a clickable table header does:
    /// the same field flips direction, a new field starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// The selected user, treating an empty selection as none.
    #[must_use]
    pub fn selected_user(&self) -> Option<&str> {
        self.user.as_deref().filter(|u| !u.is_empty())
    }
}
