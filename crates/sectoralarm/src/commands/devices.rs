//! Lock and temperature sensor listings.

use tabled::Tabled;

use sectoralarm_core::{Lock, Site, TemperatureSensor};

use crate::error::CliError;
use crate::output::{self, or_dash, yes_no};

#[derive(Tabled)]
struct LockRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sound")]
    sound_level: String,
    #[tabled(rename = "Auto-lock")]
    auto_lock: String,
}

impl From<&Lock> for LockRow {
    fn from(l: &Lock) -> Self {
        Self {
            id: l.lock_id.clone(),
            name: l.name.clone(),
            status: or_dash(l.status.as_deref()),
            sound_level: l.sound_level.map_or_else(|| "-".into(), |v| v.to_string()),
            auto_lock: yes_no(l.auto_lock_enabled),
        }
    }
}

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "°C")]
    temperature: String,
}

impl From<&TemperatureSensor> for SensorRow {
    fn from(s: &TemperatureSensor) -> Self {
        Self {
            id: s.sensor_id.clone(),
            name: s.name.clone(),
            temperature: s.temperature.clone(),
        }
    }
}

pub async fn temperatures(site: &Site, id: Option<&str>) -> Result<(), CliError> {
    let out = output::render_list(site.temperatures(id).await?, |s| SensorRow::from(s));
    output::print_output(&out)?;
    Ok(())
}

pub async fn locks(site: &Site, id: Option<&str>) -> Result<(), CliError> {
    let out = output::render_list(site.locks(id).await?, |l| LockRow::from(l));
    output::print_output(&out)?;
    Ok(())
}
