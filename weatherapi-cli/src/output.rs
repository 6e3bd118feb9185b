//! Human-readable rendering of fetch replies.

use std::io::{self, Write};

use serde_json::Value;
use weatherapi_core::{AlertsReport, CurrentConditions, Outcome, Reply};

pub fn write_current(out: &mut impl Write, reply: &Reply<CurrentConditions>) -> io::Result<()> {
    match &reply.outcome {
        Outcome::Success { raw, data } => {
            write_raw(out, raw)?;
            writeln!(out, "Location: {}", data.location_name)?;
            writeln!(out, "Temperature: {}°C", data.temp_c)?;
            writeln!(out, "Condition: {}", data.condition_text)?;
            if let Some(index) = &data.air_quality_index {
                writeln!(out, "Air Quality Index: {index}")?;
            }
            Ok(())
        }
        Outcome::Failure => write_failure(out, reply),
    }
}

pub fn write_alerts(out: &mut impl Write, reply: &Reply<AlertsReport>) -> io::Result<()> {
    match &reply.outcome {
        Outcome::Success { raw, data } => {
            write_raw(out, raw)?;
            writeln!(out, "Location: {}", data.location_name)?;
            for alert in &data.alerts {
                writeln!(out, "Alert: {alert}")?;
            }
            Ok(())
        }
        Outcome::Failure => write_failure(out, reply),
    }
}

/// The decoded body line. Also shown on its own when a required field is missing.
pub fn write_raw(out: &mut impl Write, raw: &Value) -> io::Result<()> {
    writeln!(out, "JSON: {raw}")
}

fn write_failure<T>(out: &mut impl Write, reply: &Reply<T>) -> io::Result<()> {
    writeln!(out, "Error: {}", reply.http.status.as_u16())?;
    writeln!(out, "{}", reply.http.body)
}
