use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use common::constants::{N_SENSOR_GROUPS, N_XYZ_COORDINATES};
use common::{ChannelReading, Presence, SensorGroup, SensorSnapshot, XYZ};

use crate::constants::group_channels;
use crate::errors::PhyphoxError;

const STATUS: &str = "status";
const MEASURING: &str = "measuring";
const BUFFER: &str = "buffer";

/// Builds the `/get?` query that requests every channel in `channels`.
///
/// ```
/// assert_eq!(phyphox_rs::build_query(&["accX", "accY"]), "accX&accY");
/// ```
pub fn build_query(channels: &[&str]) -> String {
    channels.join("&")
}

/// Returns the `status.measuring` flag of a response, if the device reported it.
pub(crate) fn measuring_status(data: &Value) -> Option<bool> {
    data.get(STATUS)?.get(MEASURING)?.as_bool()
}

/// Parses a phyphox `/get` response into a snapshot captured at `captured_at`.
///
/// Only the first sample of every channel is used. Channels that are absent, empty
/// or hold a non-numeric first sample (phyphox reports NaN as `null`) read `0.0`
/// and are flagged missing in the reading's [`Presence`].
///
/// # Errors
/// IncorrectDataFormat if the payload is not a JSON object, or if `buffer`, a channel
/// entry or a channel's sample list has the wrong JSON type.
pub fn parse_snapshot(
    data: &Value,
    captured_at: DateTime<Local>,
) -> Result<SensorSnapshot, PhyphoxError> {
    let root = data.as_object().ok_or(PhyphoxError::IncorrectDataFormat(
        "Payload is not a JSON object".to_string(),
    ))?;
    let buffers = match root.get(BUFFER) {
        Some(buffers) => Some(buffers.as_object().ok_or(
            PhyphoxError::IncorrectDataFormat("Invalid buffer format".to_string()),
        )?),
        None => None,
    };

    let mut readings = [ChannelReading::default(); N_SENSOR_GROUPS];
    for group in SensorGroup::ALL {
        readings[usize::from(group)] = parse_group(buffers, group)?;
    }
    Ok(SensorSnapshot::new(captured_at, readings))
}

fn parse_group(
    buffers: Option<&Map<String, Value>>,
    group: SensorGroup,
) -> Result<ChannelReading, PhyphoxError> {
    let (time_var, variables) = group_channels(group);

    let mut axes = [0.0; N_XYZ_COORDINATES];
    let mut present = [false; N_XYZ_COORDINATES];
    for (idx, var) in variables.iter().enumerate() {
        if let Some(value) = first_sample(buffers, var)? {
            axes[idx] = value;
            present[idx] = true;
        }
    }
    let device_time = first_sample(buffers, time_var)?;

    let presence = Presence::from_flags(present[0], present[1], present[2], device_time.is_some());
    Ok(ChannelReading::with_presence(
        XYZ::new(axes),
        device_time.unwrap_or_default(),
        presence,
    ))
}

/// Returns the first numeric sample of channel `var`, `None` if there is none.
fn first_sample(
    buffers: Option<&Map<String, Value>>,
    var: &str,
) -> Result<Option<f64>, PhyphoxError> {
    let Some(channel) = buffers.and_then(|b| b.get(var)) else {
        return Ok(None);
    };
    let channel = channel
        .as_object()
        .ok_or(PhyphoxError::IncorrectDataFormat(format!(
            "Invalid channel format for {}",
            var
        )))?;
    let Some(samples) = channel.get(BUFFER) else {
        return Ok(None);
    };
    let samples = samples
        .as_array()
        .ok_or(PhyphoxError::IncorrectDataFormat(format!(
            "Invalid buffer format for {}",
            var
        )))?;
    Ok(samples.first().and_then(Value::as_f64))
}
