//! Integration tests for batch dispatch across protocols

use acurite_rs::util::hex::hex_to_bytes;
use acurite_rs::{
    CandidateFrame, DecoderConfig, DecoderState, Dispatcher, Protocol, RainRollover, Reading,
};
use chrono::{TimeZone, Utc};

const FIVE_IN_ONE_RAIN_1: &str = "3bed8ef9e4fefa9001"; // counter 133
const FIVE_IN_ONE_RAIN_2: &str = "3bed8ef9e4fef58b01"; // counter 138
const FIVE_IN_ONE_TEMP: &str = "3bed87f9ebc3cd2801"; // type 8: 17.2 F, 50 %RH
const FIVE_IN_ONE_TYPE_3: &str = "3bed8cf9ebc3cd2d01"; // valid sum, unknown type
const TH592_A: &str = "ce1c44b2093f28"; // 21.5 C, 50 %RH
const TH592_COLD: &str = "ce1c44a387368e"; // -5.0 C, 35 %RH
const NOISE: &str = "a55a0ff00ff0a55a";

fn batch(rows: &[(&str, u16)]) -> CandidateFrame {
    let mut frame = CandidateFrame::new();
    for (hex, bits) in rows {
        frame.push_row(&hex_to_bytes(hex), *bits).unwrap();
    }
    frame
}

#[test]
fn test_five_in_one_rain_delta_across_calls() {
    let dispatcher = Dispatcher::default();
    let mut state = dispatcher.new_state();

    let first = dispatcher
        .decode(&batch(&[(NOISE, 64), (FIVE_IN_ONE_RAIN_1, 65)]), &mut state)
        .unwrap();
    assert_eq!(first.protocol, Protocol::FiveInOne);
    assert_eq!(first.model, "Acurite 5n1 Weather Station");
    assert_eq!(
        first.reading,
        Reading::WindRainFrame {
            wind_speed: 49,
            wind_direction_degrees: 90.0,
            rainfall_delta_in: 0.0,
        }
    );
    assert_eq!(
        state.rain_baseline(Protocol::FiveInOne).unwrap().baseline(),
        Some(133)
    );

    let second = dispatcher
        .decode(&batch(&[(FIVE_IN_ONE_RAIN_2, 65)]), &mut state)
        .unwrap();
    match second.reading {
        Reading::WindRainFrame { rainfall_delta_in, .. } => {
            assert!((rainfall_delta_in - 0.05).abs() < 1e-9)
        }
        other => panic!("Expected wind/rain frame, got {other:?}"),
    }
}

#[test]
fn test_five_in_one_temperature_path_leaves_rain_alone() {
    let dispatcher = Dispatcher::default();
    let mut state = dispatcher.new_state();

    let decoded = dispatcher
        .decode(&batch(&[(FIVE_IN_ONE_TEMP, 65)]), &mut state)
        .unwrap();
    match decoded.reading {
        Reading::WindTempHumidityFrame { wind_speed, temp_f, humidity_pct } => {
            assert_eq!(wind_speed, 49);
            assert!((temp_f - 17.2).abs() < 1e-9);
            assert_eq!(humidity_pct, 50);
        }
        other => panic!("Expected wind/temp/humidity frame, got {other:?}"),
    }
    assert!(state.rain_baseline(Protocol::FiveInOne).is_none());
}

#[test]
fn test_rainless_protocols_create_no_baseline() {
    let dispatcher = Dispatcher::default();
    let mut state = dispatcher.new_state();

    for rows in [
        &[("1101f43238", 40)][..],
        &[("10010a0000", 40)][..],
        &[(TH592_A, 56)][..],
        &[(FIVE_IN_ONE_TEMP, 65)][..],
    ] {
        assert!(dispatcher.decode(&batch(rows), &mut state).is_some());
    }

    for protocol in Protocol::ALL {
        assert!(state.rain_baseline(protocol).is_none(), "{protocol} has a baseline");
    }
}

#[test]
fn test_unknown_subtype_stops_the_scan() {
    let dispatcher = Dispatcher::new(DecoderConfig::only(&[Protocol::FiveInOne]));
    let mut state = dispatcher.new_state();

    // the first valid row decides the outcome even though a decodable row follows
    let frame = batch(&[(FIVE_IN_ONE_TYPE_3, 65), (FIVE_IN_ONE_TEMP, 65)]);
    assert!(dispatcher.decode(&frame, &mut state).is_none());

    let stats = state.stats().protocol(Protocol::FiveInOne);
    assert_eq!(stats.rows_examined, 1);
    assert_eq!(stats.unknown_subtypes, 1);
    assert_eq!(stats.readings, 0);
}

#[test]
fn test_rain_baselines_are_per_session() {
    let dispatcher = Dispatcher::default();
    let mut session_a = dispatcher.new_state();
    let mut session_b = DecoderState::default();

    dispatcher.decode(&batch(&[(FIVE_IN_ONE_RAIN_1, 65)]), &mut session_a);
    let b = dispatcher
        .decode(&batch(&[(FIVE_IN_ONE_RAIN_2, 65)]), &mut session_b)
        .unwrap();

    // session B has never seen counter 133, so 138 is its baseline
    assert_eq!(
        b.reading,
        Reading::WindRainFrame {
            wind_speed: 49,
            wind_direction_degrees: 90.0,
            rainfall_delta_in: 0.0,
        }
    );
    assert_eq!(
        session_a.rain_baseline(Protocol::FiveInOne).unwrap().baseline(),
        Some(133)
    );
}

#[test]
fn test_rain_rollover_reset_policy() {
    let config = DecoderConfig {
        rain_rollover: RainRollover::Reset,
        ..DecoderConfig::default()
    };
    let dispatcher = Dispatcher::new(config);
    let mut state = dispatcher.new_state();

    dispatcher.decode(&batch(&[(FIVE_IN_ONE_RAIN_2, 65)]), &mut state);
    let decoded = dispatcher
        .decode(&batch(&[(FIVE_IN_ONE_RAIN_1, 65)]), &mut state)
        .unwrap();
    assert!(matches!(
        decoded.reading,
        Reading::WindRainFrame { rainfall_delta_in, .. } if rainfall_delta_in == 0.0
    ));
    assert_eq!(
        state.rain_baseline(Protocol::FiveInOne).unwrap().baseline(),
        Some(133)
    );
}

#[test]
fn test_rain_gauge_only_reads_first_row() {
    let dispatcher = Dispatcher::new(DecoderConfig::only(&[Protocol::RainGauge]));
    let mut state = dispatcher.new_state();

    let decoded = dispatcher
        .decode(&batch(&[("10010a0000", 40)]), &mut state)
        .unwrap();
    assert_eq!(decoded.reading, Reading::RainGaugeTotalFrame { total_rain_mm: 133.0 });
    assert_eq!(decoded.raw, vec![0x10, 0x01, 0x0A, 0x00, 0x00]);

    let late = batch(&[(NOISE, 64), ("10010a0000", 40)]);
    assert!(dispatcher.decode(&late, &mut state).is_none());
}

#[test]
fn test_th592_requires_bits() {
    let dispatcher = Dispatcher::new(DecoderConfig::only(&[Protocol::Th592]));
    let mut state = dispatcher.new_state();

    assert!(dispatcher.decode(&batch(&[(TH592_A, 0)]), &mut state).is_none());
    assert_eq!(state.stats().protocol(Protocol::Th592).too_short, 1);

    let decoded = dispatcher
        .decode(&batch(&[(TH592_A, 0), (TH592_COLD, 56)]), &mut state)
        .unwrap();
    match decoded.reading {
        Reading::ParityTempHumidityFrame { sensor_id, temp_c, temp_f, humidity_pct } => {
            assert_eq!(sensor_id, 0xCE);
            assert_eq!(temp_c, -5.0);
            assert!((temp_f - 23.0).abs() < 1e-9);
            assert_eq!(humidity_pct, 35);
        }
        other => panic!("Expected 592TXR frame, got {other:?}"),
    }
    assert_eq!(decoded.reading.channel(), Some('A'));
}

#[test]
fn test_single_protocol_decode() {
    // TH rows are not considered when the demodulator asked for 592TXR
    let dispatcher = Dispatcher::new(DecoderConfig::only(&[]));
    let mut state = dispatcher.new_state();
    let frame = batch(&[("1101f43238", 40), (TH592_A, 56)]);

    assert!(dispatcher.decode(&frame, &mut state).is_none());
    let decoded = dispatcher
        .decode_protocol(Protocol::Th592, &frame, &mut state)
        .unwrap();
    assert_eq!(decoded.protocol, Protocol::Th592);
}

#[test]
fn test_protocol_order_follows_config() {
    let frame = batch(&[("1101f43238", 40), (TH592_A, 56)]);

    let th_first = Dispatcher::new(DecoderConfig::only(&[Protocol::Th, Protocol::Th592]));
    let mut state = th_first.new_state();
    assert_eq!(th_first.decode(&frame, &mut state).unwrap().protocol, Protocol::Th);

    let parity_first = Dispatcher::new(DecoderConfig::only(&[Protocol::Th592, Protocol::Th]));
    let mut state = parity_first.new_state();
    assert_eq!(
        parity_first.decode(&frame, &mut state).unwrap().protocol,
        Protocol::Th592
    );
}

#[test]
fn test_decoded_json() {
    let dispatcher = Dispatcher::default();
    let mut state = dispatcher.new_state();
    let at = Utc.with_ymd_and_hms(2014, 6, 1, 12, 0, 0).unwrap();

    let decoded = dispatcher
        .decode_at(&batch(&[(TH592_A, 56)]), &mut state, at)
        .unwrap();
    let json = serde_json::to_value(&decoded).unwrap();

    assert_eq!(json["protocol"], "592txr");
    assert_eq!(json["reading"]["type"], "ParityTempHumidityFrame");
    assert_eq!(json["reading"]["humidity_pct"], 50);
    assert_eq!(json["raw"], TH592_A);
    assert_eq!(json["received_at"], "2014-06-01T12:00:00Z");
}
