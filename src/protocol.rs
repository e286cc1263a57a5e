//! # Sensor Protocols and Readings
//!
//! Every supported sensor family is described by a static
//! [`ProtocolDescriptor`]: its validator, its decode step, and the limits the
//! dispatcher applies before a row is even offered to the validator. The
//! dispatcher is driven entirely from [`DESCRIPTORS`].

use crate::codec;
use crate::constants::{
    FIVE_IN_ONE_FRAME_LEN, FIVE_IN_ONE_MSG_WIND_RAIN, FIVE_IN_ONE_MSG_WIND_TEMP_HUMIDITY,
    RAIN_GAUGE_FRAME_LEN, ROW_CAPACITY, TH592_SUM_LEN, TH_SUM_LEN,
};
use crate::error::{ConfigError, DecodeError};
use crate::dispatch::DecoderState;
use crate::validate::{self, ValidatedRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The supported sensor families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Protocol {
    /// Acurite 5n1 weather station (wind, rain, temperature, humidity)
    #[serde(rename = "5n1")]
    FiveInOne,
    /// Acurite 896 tipping-bucket rain gauge
    #[serde(rename = "rain-gauge")]
    RainGauge,
    /// Acurite temperature/humidity sensor
    #[serde(rename = "th")]
    Th,
    /// Acurite 00592TXR temperature/humidity sensor with parity bits
    #[serde(rename = "592txr")]
    Th592,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [
        Protocol::FiveInOne,
        Protocol::RainGauge,
        Protocol::Th,
        Protocol::Th592,
    ];

    /// Short key used in configuration files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Protocol::FiveInOne => "5n1",
            Protocol::RainGauge => "rain-gauge",
            Protocol::Th => "th",
            Protocol::Th592 => "592txr",
        }
    }

    /// Number of bytes making up the frame, checksum included.
    pub fn frame_len(&self) -> usize {
        match self {
            Protocol::FiveInOne => FIVE_IN_ONE_FRAME_LEN,
            Protocol::RainGauge => RAIN_GAUGE_FRAME_LEN,
            Protocol::Th => TH_SUM_LEN + 1,
            Protocol::Th592 => TH592_SUM_LEN + 1,
        }
    }

    pub fn descriptor(&self) -> &'static ProtocolDescriptor {
        match self {
            Protocol::FiveInOne => &DESCRIPTORS[0],
            Protocol::RainGauge => &DESCRIPTORS[1],
            Protocol::Th => &DESCRIPTORS[2],
            Protocol::Th592 => &DESCRIPTORS[3],
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::ALL
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownProtocol(s.to_string()))
    }
}

/// Validator entry point: reject the row or hand back a normalized copy.
pub type ValidateFn = fn(&[u8; ROW_CAPACITY]) -> Result<ValidatedRow, DecodeError>;

/// Decode entry point: turn a validated row into a reading. Only frames that
/// carry a rain counter touch the session's rain baseline.
pub type DecodeFn = fn(&ValidatedRow, &mut DecoderState) -> Result<Reading, DecodeError>;

/// Static description of one sensor family.
pub struct ProtocolDescriptor {
    pub protocol: Protocol,
    /// Device model name
    pub name: &'static str,
    /// Rows with fewer bits than this are skipped without validation
    pub min_bits: u16,
    /// Only the first `max_rows` rows of a batch are considered
    pub max_rows: Option<usize>,
    pub validate: ValidateFn,
    pub decode: DecodeFn,
}

impl fmt::Debug for ProtocolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolDescriptor")
            .field("protocol", &self.protocol)
            .field("name", &self.name)
            .field("min_bits", &self.min_bits)
            .field("max_rows", &self.max_rows)
            .finish_non_exhaustive()
    }
}

/// Descriptor table, in default dispatch order.
pub static DESCRIPTORS: [ProtocolDescriptor; 4] = [
    ProtocolDescriptor {
        protocol: Protocol::FiveInOne,
        name: "Acurite 5n1 Weather Station",
        min_bits: 0,
        max_rows: None,
        validate: validate::validate_five_in_one,
        decode: decode_five_in_one,
    },
    ProtocolDescriptor {
        protocol: Protocol::RainGauge,
        name: "Acurite 896 Rain Gauge",
        min_bits: 0,
        max_rows: Some(1),
        validate: validate::validate_rain_gauge,
        decode: decode_rain_gauge,
    },
    ProtocolDescriptor {
        protocol: Protocol::Th,
        name: "Acurite Temperature and Humidity Sensor",
        min_bits: 0,
        max_rows: None,
        validate: validate::validate_th,
        decode: decode_th,
    },
    ProtocolDescriptor {
        protocol: Protocol::Th592,
        name: "Acurite Temperature and Humidity Sensor (00592TXR)",
        min_bits: 1,
        max_rows: None,
        validate: validate::validate_th592,
        decode: decode_th592,
    },
];

/// A decoded sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Reading {
    /// 5n1 message type 1
    WindRainFrame {
        /// Uncalibrated wind speed (raw sensor units)
        wind_speed: u8,
        wind_direction_degrees: f64,
        /// Rainfall since the session's first rain frame
        rainfall_delta_in: f64,
    },
    /// 5n1 message type 8
    WindTempHumidityFrame {
        /// Uncalibrated wind speed (raw sensor units)
        wind_speed: u8,
        temp_f: f64,
        humidity_pct: u8,
    },
    RainGaugeTotalFrame {
        total_rain_mm: f64,
    },
    TempHumidityFrame {
        temp_c: f64,
        humidity_pct: u8,
    },
    ParityTempHumidityFrame {
        sensor_id: u8,
        temp_c: f64,
        temp_f: f64,
        humidity_pct: u8,
    },
}

impl Reading {
    /// Channel letter for 592TXR readings.
    pub fn channel(&self) -> Option<char> {
        match self {
            Reading::ParityTempHumidityFrame { sensor_id, .. } => codec::th592_channel(*sensor_id),
            _ => None,
        }
    }
}

/// A reading together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    pub protocol: Protocol,
    pub model: &'static str,
    pub reading: Reading,
    /// Normalized frame bytes the reading was decoded from
    #[serde(with = "hex::serde")]
    pub raw: Vec<u8>,
    /// Reception time, supplied by the caller's clock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
}

fn decode_five_in_one(
    row: &ValidatedRow,
    state: &mut DecoderState,
) -> Result<Reading, DecodeError> {
    let buf = row.bytes();
    match codec::message_type(buf[2]) {
        FIVE_IN_ONE_MSG_WIND_RAIN => Ok(Reading::WindRainFrame {
            wind_speed: codec::wind_speed(buf[3], buf[4]),
            wind_direction_degrees: codec::wind_direction(buf[4]),
            rainfall_delta_in: state
                .rain_baseline_mut(Protocol::FiveInOne)
                .rainfall_inches(codec::rain_counter(buf[5], buf[6])),
        }),
        FIVE_IN_ONE_MSG_WIND_TEMP_HUMIDITY => Ok(Reading::WindTempHumidityFrame {
            wind_speed: codec::wind_speed(buf[3], buf[4]),
            temp_f: codec::five_in_one_temperature_f(buf[4], buf[5]),
            humidity_pct: codec::humidity(buf[6]),
        }),
        other => Err(DecodeError::UnknownSubtype(other)),
    }
}

fn decode_rain_gauge(
    row: &ValidatedRow,
    _state: &mut DecoderState,
) -> Result<Reading, DecodeError> {
    let buf = row.bytes();
    Ok(Reading::RainGaugeTotalFrame {
        total_rain_mm: codec::rain_gauge_total_mm(buf[1], buf[2]),
    })
}

fn decode_th(row: &ValidatedRow, _state: &mut DecoderState) -> Result<Reading, DecodeError> {
    let buf = row.bytes();
    // Humidity is covered by the checksum and sent as a plain byte.
    Ok(Reading::TempHumidityFrame {
        temp_c: codec::th_temperature_c(buf[1], buf[2]),
        humidity_pct: buf[3],
    })
}

fn decode_th592(row: &ValidatedRow, _state: &mut DecoderState) -> Result<Reading, DecodeError> {
    let buf = row.bytes();
    let temp_c = codec::th592_temperature_c(buf[4], buf[5]);
    Ok(Reading::ParityTempHumidityFrame {
        sensor_id: buf[0],
        temp_c,
        temp_f: codec::celsius_to_fahrenheit(temp_c),
        humidity_pct: codec::humidity(buf[3]),
    })
}
