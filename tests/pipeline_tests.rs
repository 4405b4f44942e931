//! # Pipeline Tests
//!
//! End-to-end runs through the public API: SVG markup in, HPGL job bytes
//! out.

use plotline::document::{CollectOptions, parse_document};
use plotline::job::{JobInput, encode_job};
use plotline::mask::{FitTransform, Mask, MaskMode};
use plotline::pattern::{self, PatternKind, PatternOutput, PatternSpec};
use plotline::plotter::{DeviceTransform, PlotterConfig};
use plotline::protocol::hpgl::{FOOTER, HEADER};
use pretty_assertions::assert_eq;

const TRIANGLE_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="layer1">
    <path id="triangle" d="M0,0 L100,0 L50,100 Z"/>
  </g>
</svg>"#;

/// Split a job into its command strings, checking the framing.
fn commands(job: &[u8]) -> Vec<String> {
    let text = std::str::from_utf8(job).expect("job is not ASCII");
    let body = text
        .strip_prefix(HEADER)
        .and_then(|rest| rest.strip_suffix(FOOTER))
        .expect("job is not framed by header and footer");
    body.split_terminator(';').map(|c| format!("{};", c)).collect()
}

/// `PU<int>,<int>;` or `PD<int>,<int>;`
fn is_pen_command(command: &str) -> bool {
    let Some(args) = command
        .strip_prefix("PU")
        .or_else(|| command.strip_prefix("PD"))
        .and_then(|rest| rest.strip_suffix(';'))
    else {
        return false;
    };
    match args.split_once(',') {
        Some((x, y)) => x.parse::<i32>().is_ok() && y.parse::<i32>().is_ok(),
        None => false,
    }
}

fn triangle_mask(size: u32) -> Mask {
    let collected = parse_document(TRIANGLE_SVG, &CollectOptions::default()).unwrap();
    Mask::build(&collected.paths, size, size, MaskMode::Fused).unwrap()
}

#[test]
fn test_masked_pattern_job() {
    let mask = triangle_mask(200);
    let spec = PatternSpec {
        kind: PatternKind::Horizontal,
        width: 200,
        height: 200,
        seed: 4,
        ..Default::default()
    };
    let output = pattern::generate(&spec, Some(&mask)).unwrap();
    let transform = PlotterConfig::DEFAULT.pattern_transform();

    let masked = encode_job(&JobInput::from(&output), transform, Some(&mask));
    let unmasked = encode_job(&JobInput::from(&output), transform, None);

    let masked = commands(&masked);
    let unmasked = commands(&unmasked);
    assert!(!masked.is_empty());
    assert!(masked.len() < unmasked.len());
    assert!(masked.iter().all(|c| is_pen_command(c)));
    assert!(masked[0].starts_with("PU"));
}

#[test]
fn test_dots_only_inside_silhouette() {
    let mask = triangle_mask(100);
    let spec = PatternSpec {
        kind: PatternKind::Dots,
        width: 100,
        height: 100,
        ..Default::default()
    };
    let output = pattern::generate(&spec, Some(&mask)).unwrap();
    let PatternOutput::Cloud(points) = &output else {
        panic!("dots should produce a point cloud");
    };
    let inside = points.iter().filter(|p| mask.is_inside(p.x, p.y)).count();
    assert!(inside > 0 && inside < points.len());

    let job = encode_job(&JobInput::from(&output), DeviceTransform::identity(), Some(&mask));
    let commands = commands(&job);
    assert_eq!(commands.len(), inside * 2);
    for pair in commands.chunks(2) {
        assert!(pair[0].starts_with("PU"));
        assert_eq!(&pair[0][2..], &pair[1][2..]);
    }
}

#[test]
fn test_jobs_are_deterministic() {
    let mask = triangle_mask(150);
    for kind in PatternKind::ALL {
        let spec = PatternSpec {
            kind,
            width: 150,
            height: 150,
            seed: 21,
            ..Default::default()
        };
        let run = || {
            let output = pattern::generate(&spec, Some(&mask)).unwrap();
            encode_job(&JobInput::from(&output), DeviceTransform::identity(), Some(&mask))
        };
        assert_eq!(run(), run(), "{} job differs between runs", kind);
    }
}

#[test]
fn test_noisy_circles_inside_mask() {
    let mask = triangle_mask(300);
    let spec = PatternSpec {
        kind: PatternKind::NoisyCircles,
        width: 300,
        height: 300,
        seed: 5,
        ..Default::default()
    };
    let PatternOutput::Strokes(paths) = pattern::generate(&spec, Some(&mask)).unwrap() else {
        panic!("noisy_circles should produce strokes");
    };
    assert!(!paths.is_empty());
    for path in &paths {
        assert!(path.len() > 2);
        assert!(path.iter().all(|p| mask.is_inside(p.x, p.y)));
    }
}

#[test]
fn test_broken_element_does_not_stop_job() {
    let svg = r#"<svg>
        <path id="bad" d="M10,10 L"/>
        <polyline points="0,0 10,0 10,10"/>
        <rect x="0" y="0" width="5" height="5"/>
    </svg>"#;
    let collected = parse_document(svg, &CollectOptions::default()).unwrap();
    assert_eq!(collected.paths.len(), 1);
    assert_eq!(collected.diagnostics.len(), 1);
    assert_eq!(collected.diagnostics[0].element, "<path id=\"bad\">");

    let job = encode_job(&JobInput::Paths(&collected.paths), DeviceTransform::identity(), None);
    assert_eq!(
        commands(&job),
        vec!["PU0,0;", "PD10,0;", "PD10,10;", "PD0,0;"]
    );
}

#[test]
fn test_trace_job() {
    let collected = parse_document(TRIANGLE_SVG, &CollectOptions::default()).unwrap();
    let fit = FitTransform::fit(&collected.paths, 100, 100).unwrap();
    let fitted = fit.apply_all(&collected.paths);

    let transform = PlotterConfig::DEFAULT.trace_transform();
    let job = encode_job(&JobInput::Paths(&fitted), transform, None);
    assert_eq!(
        commands(&job),
        vec!["PU0,0;", "PD0,200;", "PD200,100;", "PD0,0;"]
    );
}

#[test]
fn test_empty_artwork_is_an_error() {
    let collected = parse_document("<svg><g/></svg>", &CollectOptions::default()).unwrap();
    assert!(collected.paths.is_empty());
    assert!(matches!(
        Mask::build(&collected.paths, 100, 100, MaskMode::Fused),
        Err(plotline::PlotlineError::EmptyArtwork)
    ));
}
