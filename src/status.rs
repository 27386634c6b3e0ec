use std::str::FromStr;

use crate::error::{Error, Result};
use crate::message::Homework;

/// Review states the homework API may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Verdict text for this status. Fixed for the process lifetime.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

/// Builds the status-change message for a single homework entry.
///
/// Fails with `MissingHomework` when no entry is given, and with
/// `UnknownStatus` when the entry's status is not in the verdict mapping.
pub fn parse_status(homework: Option<&Homework>) -> Result<String> {
    let homework = homework.ok_or(Error::MissingHomework)?;
    let status: HomeworkStatus = homework.status.parse()?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.homework_name,
        status.verdict()
    ))
}
