//! Player record model.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Validation errors for a loaded player record.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing player name")]
    MissingName,

    #[error("missing position")]
    MissingPosition,

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// One player's aggregate performance record, as served by the stats API.
///
/// Field names on the wire follow the source dataset's column headers
/// ("PlayerName", "Win rate", "KP%", ...), so the JSON array this maps to
/// is exactly what the dashboard frontend consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player handle. Not guaranteed unique across teams.
    #[serde(rename = "PlayerName")]
    pub player_name: String,

    /// Team the player competes for.
    #[serde(rename = "TeamName", default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,

    /// Lane/role, e.g. "Top", "Jungle", "Mid", "Bot", "Support".
    #[serde(rename = "Position")]
    pub position: String,

    /// Win rate as a fraction in [0, 1].
    #[serde(rename = "Win rate")]
    pub win_rate: f64,

    /// (Kills + Assists) / Deaths.
    #[serde(rename = "KDA")]
    pub kda: f64,

    /// Kill participation percentage on a 0-100 scale.
    #[serde(rename = "KP%")]
    pub kill_participation: f64,

    /// Damage dealt per minute.
    #[serde(rename = "DPM")]
    pub damage_per_minute: f64,

    /// Gold earned per minute. Not present in every dataset export.
    #[serde(
        rename = "GoldPerMin",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gold_per_minute: Option<f64>,
}

impl PlayerRecord {
    /// Check that all required fields are present and numerically sane.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.player_name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.position.trim().is_empty() {
            return Err(ValidationError::MissingPosition);
        }

        check_finite("Win rate", self.win_rate)?;
        check_range("Win rate", self.win_rate, 0.0, 1.0)?;
        check_finite("KDA", self.kda)?;
        check_range("KDA", self.kda, 0.0, f64::INFINITY)?;
        check_finite("KP%", self.kill_participation)?;
        check_range("KP%", self.kill_participation, 0.0, 100.0)?;
        check_finite("DPM", self.damage_per_minute)?;
        check_range("DPM", self.damage_per_minute, 0.0, f64::INFINITY)?;
        if let Some(gpm) = self.gold_per_minute {
            check_finite("GoldPerMin", gpm)?;
            check_range("GoldPerMin", gpm, 0.0, f64::INFINITY)?;
        }

        Ok(())
    }

    /// Read the value of a rankable metric out of this record.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::WinRate => Some(self.win_rate),
            Metric::Kda => Some(self.kda),
            Metric::KillParticipation => Some(self.kill_participation),
            Metric::DamagePerMinute => Some(self.damage_per_minute),
            Metric::GoldPerMinute => self.gold_per_minute,
        }
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value < min || value > max {
        Err(ValidationError::OutOfRange { field, value })
    } else {
        Ok(())
    }
}

/// Drop records that fail validation, logging each drop.
///
/// Records with NaN or out-of-range metrics would otherwise sort
/// unpredictably in the leaderboards; they are rejected at the load
/// boundary instead. Original relative order of the survivors is kept.
pub fn retain_valid(records: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
    let total = records.len();
    let valid: Vec<PlayerRecord> = records
        .into_iter()
        .filter(|r| match r.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(player = %r.player_name, "Dropping invalid player record: {}", e);
                false
            }
        })
        .collect();

    if valid.len() < total {
        warn!("Dropped {} of {} player records", total - valid.len(), total);
    }
    valid
}

/// A rankable performance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    WinRate,
    Kda,
    KillParticipation,
    DamagePerMinute,
    GoldPerMinute,
}

impl Metric {
    /// Parse an API metric key ("winrate", "kda", "kp", "dpm", "gpm").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "winrate" => Some(Metric::WinRate),
            "kda" => Some(Metric::Kda),
            "kp" => Some(Metric::KillParticipation),
            "dpm" => Some(Metric::DamagePerMinute),
            "gpm" => Some(Metric::GoldPerMinute),
            _ => None,
        }
    }

    /// The dataset column header for this metric.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::WinRate => "Win rate",
            Metric::Kda => "KDA",
            Metric::KillParticipation => "KP%",
            Metric::DamagePerMinute => "DPM",
            Metric::GoldPerMinute => "GoldPerMin",
        }
    }
}
