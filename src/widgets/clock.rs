//! Clock and timezone list controller.

use crate::settings::ClockSettings;
use crate::store::{keys, Accessor, KvStore};
use crate::StoreError;
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;

/// Controller over the `timezones` list plus time formatting.
///
/// Zones are IANA names (`Asia/Tokyo`). The list holds extra zones shown
/// beside the local clock; the local clock itself is not an entry.
#[derive(Debug, Clone)]
pub struct WorldClock {
    timezones: Accessor<Vec<String>>,
}

impl WorldClock {
    pub fn new(store: KvStore) -> Self {
        Self {
            timezones: Accessor::new(store, keys::TIMEZONES),
        }
    }

    /// The stored zone names, in insertion order.
    pub async fn zones(&self) -> Result<Vec<String>, StoreError> {
        self.timezones.get_or_default().await
    }

    /// Adds a zone unless it is already present. Returns whether it was new.
    pub async fn add_zone(&self, zone: &str) -> Result<bool, StoreError> {
        let zone = zone.trim();
        if zone.is_empty() {
            return Err(StoreError::EmptyInput { what: "timezone" });
        }
        let mut added = false;
        self.timezones
            .update(|zones| {
                if !zones.iter().any(|z| z == zone) {
                    zones.push(zone.to_string());
                    added = true;
                }
            })
            .await?;
        Ok(added)
    }

    /// Removes a zone; absent zones are a no-op.
    pub async fn remove_zone(&self, zone: &str) -> Result<(), StoreError> {
        self.timezones
            .update(|zones| zones.retain(|z| z != zone))
            .await?;
        Ok(())
    }

    /// Formats `now` in `zone` according to the clock settings.
    ///
    /// An unknown or `"local"` zone falls back to local time rather than
    /// failing; a wrong extra clock beats a dead one.
    pub fn time_in_zone(&self, now: DateTime<Utc>, zone: &str, settings: &ClockSettings) -> String {
        match zone.parse::<Tz>() {
            Ok(tz) if zone != "local" => format_time(&tz.from_utc_datetime(&now.naive_utc()), settings),
            _ => {
                if zone != "local" {
                    tracing::debug!("unknown timezone '{}', showing local time", zone);
                }
                format_time(&now.with_timezone(&Local), settings)
            }
        }
    }
}

fn format_time<Tz2: TimeZone>(time: &DateTime<Tz2>, settings: &ClockSettings) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    if settings.use_24_hour {
        time.format("%H:%M").to_string()
    } else {
        time.format("%I:%M %p").to_string()
    }
}
