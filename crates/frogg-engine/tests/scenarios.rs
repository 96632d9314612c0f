//! End-to-end scenarios for the modulation engine.
//!
//! Impulse responses with the LFO depth at zero pin the delay to the centre
//! of each type's range, which makes echo positions exact:
//!
//! | type | centre | at 48 kHz |
//! |------|--------|-----------|
//! | Chorus | 17.5 ms | 840 samples |
//! | Flanger | 3 ms | 144 samples |

use frogg_core::ParameterInfo;
use frogg_engine::{EngineError, ModulationEngine, ModulationParams, ModulationType};

const SAMPLE_RATE: f64 = 48000.0;
const TOLERANCE: f32 = 1e-5;

fn prepared_engine() -> ModulationEngine {
    let mut engine = ModulationEngine::new();
    engine.prepare(SAMPLE_RATE, 2.0).unwrap();
    engine
}

/// Fully wet, no modulation, no feedback.
fn static_delay(mod_type: ModulationType) -> ModulationParams {
    ModulationParams {
        dry_wet: 1.0,
        depth: 0.0,
        feedback: 0.0,
        mod_type,
        ..ModulationParams::default()
    }
}

fn impulse(len: usize) -> Vec<f32> {
    let mut buf = vec![0.0f32; len];
    buf[0] = 1.0;
    buf
}

fn test_signal(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

/// Indices whose magnitude exceeds `threshold`.
fn peaks(buf: &[f32], threshold: f32) -> Vec<usize> {
    buf.iter()
        .enumerate()
        .filter(|(_, s)| s.abs() > threshold)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn buffer_holds_two_seconds() {
    let engine = prepared_engine();
    assert_eq!(engine.buffer_len(), 96000);
}

#[test]
fn chorus_impulse_reappears_at_840() {
    let mut engine = prepared_engine();
    let mut left = impulse(2000);
    let mut right = impulse(2000);

    engine
        .process(&mut left, &mut right, &static_delay(ModulationType::Chorus))
        .unwrap();

    for out in [&left, &right] {
        assert!((out[840] - 1.0).abs() < TOLERANCE, "got {}", out[840]);
        assert_eq!(peaks(out, TOLERANCE), vec![840]);
    }
}

#[test]
fn flanger_impulse_reappears_at_144() {
    let mut engine = prepared_engine();
    let mut left = impulse(500);
    let mut right = impulse(500);

    engine
        .process(&mut left, &mut right, &static_delay(ModulationType::Flanger))
        .unwrap();

    assert!((left[144] - 1.0).abs() < TOLERANCE);
    assert_eq!(peaks(&left, TOLERANCE), vec![144]);
    assert_eq!(peaks(&right, TOLERANCE), vec![144]);
}

#[test]
fn flanger_feedback_echo_train() {
    let mut engine = prepared_engine();
    let params = ModulationParams {
        feedback: 0.5,
        ..static_delay(ModulationType::Flanger)
    };

    let mut left = impulse(1000);
    let mut right = impulse(1000);
    engine.process(&mut left, &mut right, &params).unwrap();

    // First echo after the 144-sample delay, then one extra sample per
    // round trip because the fed-back value is written on the next sample.
    let expected = [(144, 1.0), (289, 0.5), (434, 0.25), (579, 0.125), (724, 0.0625), (869, 0.03125)];
    for &(index, gain) in &expected {
        assert!(
            (left[index] - gain).abs() < TOLERANCE,
            "echo at {index}: expected {gain}, got {}",
            left[index]
        );
    }
    let found = peaks(&left, TOLERANCE);
    let expected_indices: Vec<usize> = expected.iter().map(|&(i, _)| i).collect();
    assert_eq!(found, expected_indices);

    // Each echo is half the previous one
    for pair in expected.windows(2) {
        let ratio = left[pair[1].0] / left[pair[0].0];
        assert!((ratio - 0.5).abs() < 1e-4, "ratio {ratio}");
    }
}

#[test]
fn dry_only_is_identity() {
    let mut engine = prepared_engine();
    let input = test_signal(4096);
    let mut left = input.clone();
    let mut right: Vec<f32> = input.iter().map(|s| -s).collect();

    let params = ModulationParams {
        dry_wet: 0.0,
        depth: 1.0,
        feedback: 0.98,
        rate: 20.0,
        mod_type: ModulationType::Chorus,
        ..ModulationParams::default()
    };
    engine.process(&mut left, &mut right, &params).unwrap();

    assert_eq!(left, input);
    for (r, x) in right.iter().zip(&input) {
        assert_eq!(*r, -x);
    }
}

#[test]
fn full_wet_is_delayed_input() {
    let mut engine = prepared_engine();
    let input = test_signal(2048);
    let mut left = input.clone();
    let mut right = input.clone();

    engine
        .process(&mut left, &mut right, &static_delay(ModulationType::Flanger))
        .unwrap();

    for i in 0..144 {
        assert!(left[i].abs() < TOLERANCE, "sample {i} before delay: {}", left[i]);
    }
    for i in 144..input.len() {
        assert!(
            (left[i] - input[i - 144]).abs() < TOLERANCE,
            "sample {i}: {} vs {}",
            left[i],
            input[i - 144]
        );
    }
}

#[test]
fn half_mix_blends_dry_and_delayed() {
    let mut engine = prepared_engine();
    let mut left = impulse(300);
    let mut right = impulse(300);

    let params = ModulationParams {
        dry_wet: 0.5,
        ..static_delay(ModulationType::Flanger)
    };
    engine.process(&mut left, &mut right, &params).unwrap();

    assert!((left[0] - 0.5).abs() < TOLERANCE);
    assert!((left[144] - 0.5).abs() < TOLERANCE);
}

#[test]
fn block_size_does_not_change_output() {
    let params = ModulationParams {
        depth: 0.8,
        rate: 3.0,
        feedback: 0.6,
        ..ModulationParams::default()
    };
    let input = test_signal(3000);

    let mut whole = prepared_engine();
    let mut left_a = input.clone();
    let mut right_a = input.clone();
    whole.process(&mut left_a, &mut right_a, &params).unwrap();

    let mut chunked = prepared_engine();
    let mut left_b = input.clone();
    let mut right_b = input;
    for (l, r) in left_b.chunks_mut(37).zip(right_b.chunks_mut(37)) {
        chunked.process(l, r, &params).unwrap();
    }

    assert_eq!(left_a, left_b);
    assert_eq!(right_a, right_b);
}

#[test]
fn zero_phase_offset_keeps_channels_identical() {
    let mut engine = prepared_engine();
    let input = test_signal(2048);
    let mut left = input.clone();
    let mut right = input;

    let params = ModulationParams {
        depth: 1.0,
        phase_offset: 0.0,
        ..ModulationParams::default()
    };
    engine.process(&mut left, &mut right, &params).unwrap();
    assert_eq!(left, right);
}

#[test]
fn phase_offset_spreads_channels() {
    let mut engine = prepared_engine();
    let input = test_signal(4096);
    let mut left = input.clone();
    let mut right = input;

    let params = ModulationParams {
        depth: 1.0,
        rate: 5.0,
        phase_offset: 0.5,
        ..ModulationParams::default()
    };
    engine.process(&mut left, &mut right, &params).unwrap();

    let diff: f32 = left.iter().zip(&right).map(|(l, r)| (l - r).abs()).sum();
    assert!(diff > 1.0, "channels barely differ: {diff}");
}

#[test]
fn prepare_again_rezeroes_everything() {
    let mut engine = prepared_engine();
    let params = ModulationParams {
        feedback: 0.9,
        ..static_delay(ModulationType::Chorus)
    };
    let mut left = vec![1.0f32; 5000];
    let mut right = vec![1.0f32; 5000];
    engine.process(&mut left, &mut right, &params).unwrap();
    assert!(engine.write_head() > 0);

    engine.prepare(SAMPLE_RATE, 2.0).unwrap();
    assert_eq!(engine.write_head(), 0);
    assert_eq!(engine.lfo_phase(), 0.0);

    let mut left = vec![0.0f32; 5000];
    let mut right = vec![0.0f32; 5000];
    engine.process(&mut left, &mut right, &params).unwrap();
    assert!(left.iter().chain(&right).all(|&s| s == 0.0));
}

#[test]
fn unprepared_and_mismatch_errors() {
    let mut engine = ModulationEngine::new();
    let mut l = vec![0.0f32; 16];
    let mut r = vec![0.0f32; 16];
    assert_eq!(
        engine.process(&mut l, &mut r, &ModulationParams::default()),
        Err(EngineError::Unprepared)
    );

    engine.prepare(SAMPLE_RATE, 2.0).unwrap();
    let mut short = vec![0.0f32; 15];
    assert_eq!(
        engine.process(&mut l, &mut short, &ModulationParams::default()),
        Err(EngineError::ChannelLengthMismatch { left: 16, right: 15 })
    );
}

#[test]
fn empty_block_is_a_no_op() {
    let mut engine = prepared_engine();
    engine
        .process(&mut [], &mut [], &ModulationParams::default())
        .unwrap();
    assert_eq!(engine.write_head(), 0);
    assert_eq!(engine.lfo_phase(), 0.0);
}

#[test]
fn extreme_params_stay_finite() {
    for sample_rate in [8000.0, 44100.0, 192_000.0] {
        for use_max in [false, true] {
            let mut params = ModulationParams::default();
            for i in 0..params.param_count() {
                let desc = params.param_info(i).unwrap();
                params.set_param(i, if use_max { desc.max } else { desc.min });
            }

            let mut engine = ModulationEngine::new();
            engine.prepare(sample_rate, 2.0).unwrap();

            let mut left: Vec<f32> = (0..20_000)
                .map(|i| match i % 3 {
                    0 => 0.5,
                    1 => -0.5,
                    _ => 0.0,
                })
                .collect();
            let mut right = left.clone();
            engine.process(&mut left, &mut right, &params).unwrap();

            assert!(
                left.iter().chain(&right).all(|s| s.is_finite()),
                "non-finite output at {sample_rate} Hz (max = {use_max})"
            );
        }
    }
}

#[test]
fn feedback_tail_decays_to_exact_zero() {
    let mut engine = prepared_engine();
    let params = ModulationParams {
        feedback: 0.5,
        ..static_delay(ModulationType::Flanger)
    };

    let mut left = impulse(48000);
    let mut right = impulse(48000);
    engine.process(&mut left, &mut right, &params).unwrap();

    // 0.5^n passes the flush threshold long before a second has elapsed
    assert!(left[40_000..].iter().all(|&s| s == 0.0));
}
