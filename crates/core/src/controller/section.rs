use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Named screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Auth,
    Dashboard,
    Trading,
    Portfolio,
    Instruments,
    History,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Auth,
        Section::Dashboard,
        Section::Trading,
        Section::Portfolio,
        Section::Instruments,
        Section::History,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Auth => "auth",
            Section::Dashboard => "dashboard",
            Section::Trading => "trading",
            Section::Portfolio => "portfolio",
            Section::Instruments => "instruments",
            Section::History => "history",
        }
    }

    /// Everything except the auth screen needs a signed-in user.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Section::Auth)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Section::Auth => 0,
            Section::Dashboard => 1,
            Section::Trading => 2,
            Section::Portfolio => 3,
            Section::Instruments => 4,
            Section::History => 5,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auth" | "login" => Ok(Section::Auth),
            "dashboard" => Ok(Section::Dashboard),
            "trading" => Ok(Section::Trading),
            "portfolio" | "portafoglio" => Ok(Section::Portfolio),
            "instruments" | "strumenti" => Ok(Section::Instruments),
            "history" | "storico" => Ok(Section::History),
            other => Err(ValidationError::UnknownSection(other.to_string())),
        }
    }
}

/// Tabs of the auth screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Register,
}
