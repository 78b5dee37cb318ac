//! Attendance domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daily time block an attendance record applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    Morning,
    Afternoon,
    Evening,
}

impl Session {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

/// Outcome recorded for a student in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
        }
    }
}

/// How an attendance record was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceMethod {
    #[default]
    FaceRecognition,
    Manual,
}

impl AttendanceMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FaceRecognition => "face_recognition",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AttendanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored or supplied string is not a known attendance value.
#[derive(Debug, Error)]
#[error("unknown attendance {field}: {value:?}")]
pub struct UnknownAttendanceValue {
    pub field: &'static str,
    pub value: String,
}

impl UnknownAttendanceValue {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}

impl FromStr for Session {
    type Err = UnknownAttendanceValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(UnknownAttendanceValue::new("session", other)),
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = UnknownAttendanceValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            "excused" => Ok(Self::Excused),
            other => Err(UnknownAttendanceValue::new("status", other)),
        }
    }
}

impl FromStr for AttendanceMethod {
    type Err = UnknownAttendanceValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "face_recognition" => Ok(Self::FaceRecognition),
            "manual" => Ok(Self::Manual),
            other => Err(UnknownAttendanceValue::new("method", other)),
        }
    }
}

/// Per-status attendance counts for a class or a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_records: i64,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub excused_count: i64,
}

impl AttendanceSummary {
    /// Fold grouped `(status, count)` rows into a summary.
    ///
    /// Statuses that never appear stay at zero, so an empty input yields the
    /// zeroed summary.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (AttendanceStatus, i64)>,
    {
        counts
            .into_iter()
            .fold(Self::default(), |mut summary, (status, count)| {
                summary.total_records += count;
                match status {
                    AttendanceStatus::Present => summary.present_count += count,
                    AttendanceStatus::Absent => summary.absent_count += count,
                    AttendanceStatus::Late => summary.late_count += count,
                    AttendanceStatus::Excused => summary.excused_count += count,
                }
                summary
            })
    }
}
