//! Integration tests for the HPGL command encoder.

use plotkit_hpgl::{HpglEncoder, PlotterCommand};

#[test]
fn test_empty_buffer_renders_empty_string() {
    let encoder = HpglEncoder::new();
    assert_eq!(encoder.to_string(), "");
    assert!(encoder.is_empty());
}

#[test]
fn test_command_sequence_renders_in_order() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(150.0, 50.0);
    assert_eq!(encoder.to_string(), "PU 150 -50;\n");
    encoder.line_to(200.0, 100.0);
    assert_eq!(encoder.to_string(), "PU 150 -50;\nPD 200 -100;\n");
    encoder.move_to(-200.0, -500.0);
    assert_eq!(encoder.to_string(), "PU 150 -50;\nPD 200 -100;\nPU -200 500;\n");
    encoder.line_to(-300.0, 150.0);
    assert_eq!(
        encoder.to_string(),
        "PU 150 -50;\nPD 200 -100;\nPU -200 500;\nPD -300 -150;\n"
    );
}

#[test]
fn test_begin_path_clears_buffer() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(150.0, 50.0);
    encoder.begin_path();
    assert_eq!(encoder.to_string(), "");
}

#[test]
fn test_begin_path_keeps_transform() {
    let mut encoder = HpglEncoder::new();
    encoder.scale(2.0, 2.0);
    encoder.move_to(10.0, 0.0);
    encoder.begin_path();
    encoder.move_to(10.0, 0.0);
    assert_eq!(encoder.to_string(), "PU 20 0;\n");
}

#[test]
fn test_consecutive_pen_up_collapses_to_last() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(150.0, 50.0);
    assert_eq!(encoder.to_string(), "PU 150 -50;\n");
    encoder.move_to(200.0, 100.0);
    assert_eq!(encoder.to_string(), "PU 200 -100;\n");
    encoder.move_to(100.0, 50.0);
    assert_eq!(encoder.to_string(), "PU 100 -50;\n");
}

#[test]
fn test_repeated_pen_down_to_same_point_suppressed() {
    let mut encoder = HpglEncoder::new();
    encoder.line_to(150.0, 50.0);
    encoder.line_to(150.0, 50.0);
    encoder.line_to(150.0, 50.0);
    assert_eq!(encoder.to_string(), "PD 150 -50;\n");
}

#[test]
fn test_pen_down_to_new_points_appends() {
    let mut encoder = HpglEncoder::new();
    encoder.line_to(150.0, 50.0);
    encoder.line_to(200.0, 100.0);
    encoder.line_to(100.0, 50.0);
    assert_eq!(
        encoder.to_string(),
        "PD 150 -50;\nPD 200 -100;\nPD 100 -50;\n"
    );
}

#[test]
fn test_scale_applies_to_subsequent_commands() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(0.0, 0.0);
    encoder.line_to(100.0, 0.0);
    assert_eq!(encoder.to_string(), "PU 0 0;\nPD 100 0;\n");
    encoder.move_to(0.0, 0.0);
    encoder.scale(2.0, 2.0);
    encoder.line_to(100.0, 0.0);
    assert_eq!(encoder.to_string(), "PU 0 0;\nPD 100 0;\nPU 0 0;\nPD 200 0;\n");
}

#[test]
fn test_reset_transform_removes_scaling() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(0.0, 0.0);
    encoder.scale(2.0, 2.0);
    encoder.line_to(100.0, 0.0);
    assert_eq!(encoder.to_string(), "PU 0 0;\nPD 200 0;\n");
    encoder.reset_transform();
    encoder.move_to(0.0, 0.0);
    encoder.line_to(100.0, 0.0);
    assert_eq!(
        encoder.to_string(),
        "PU 0 0;\nPD 200 0;\nPU 0 0;\nPD 100 0;\n"
    );
}

#[test]
fn test_translate_applies_after_y_inversion() {
    let mut encoder = HpglEncoder::new();
    encoder.translate(10.0, 20.0);
    encoder.move_to(5.0, 5.0);
    // y is negated before the transform: (5, -5) + (10, 20) = (15, 15).
    assert_eq!(encoder.to_string(), "PU 15 15;\n");
}

#[test]
fn test_coordinates_round_to_nearest_integer() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(10.4, 10.6);
    encoder.line_to(0.5, -0.5);
    assert_eq!(encoder.to_string(), "PU 10 -11;\nPD 1 1;\n");
}

#[test]
fn test_save_restore_round_trip() {
    let mut encoder = HpglEncoder::new();
    encoder.scale(2.0, 2.0);
    encoder.save();
    encoder.scale(3.0, 3.0);
    encoder.restore();
    encoder.line_to(10.0, 0.0);
    assert_eq!(encoder.to_string(), "PD 20 0;\n");
}

#[test]
fn test_restore_without_save_is_noop() {
    let mut encoder = HpglEncoder::new();
    encoder.scale(2.0, 2.0);
    encoder.restore();
    encoder.line_to(10.0, 0.0);
    assert_eq!(encoder.to_string(), "PD 20 0;\n");
}

#[test]
fn test_commands_accessor_exposes_buffer() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(1.0, 2.0);
    encoder.line_to(3.0, 4.0);
    assert_eq!(
        encoder.commands(),
        &[
            PlotterCommand::PenUp { x: 1, y: -2 },
            PlotterCommand::PenDown { x: 3, y: -4 },
        ]
    );
}

#[test]
fn test_commands_serde_round_trip() {
    let mut encoder = HpglEncoder::new();
    encoder.move_to(10.0, 20.0);
    encoder.line_to(30.0, 40.0);

    let json = serde_json::to_string(encoder.commands()).unwrap();
    let parsed: Vec<PlotterCommand> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_slice(), encoder.commands());
}
