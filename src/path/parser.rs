//! # Path Data Parser
//!
//! Parses the `d` attribute mini-language into a flattened polyline.
//!
//! ## Supported Commands
//!
//! | Command | Arguments | Effect |
//! |---------|-----------|--------|
//! | `M m` | x y | Move, start a subpath, emit the point |
//! | `L l` | x y | Line to |
//! | `H h` | x | Horizontal line to |
//! | `V v` | y | Vertical line to |
//! | `C c` | x1 y1 x2 y2 x y | Cubic Bézier, flattened |
//! | `S s` | x2 y2 x y | Smooth cubic, first control reflected |
//! | `Z z` | | Close back to the subpath start |
//!
//! Uppercase is absolute, lowercase is relative to the current point.
//! Extra argument groups repeat the command (`M` repeats as `L`).
//!
//! Quadratic and arc commands (`Q T A`) are not supported. By default they
//! fail the parse; [`UnsupportedPolicy::Skip`] drops them together with
//! their arguments instead.

use tracing::warn;

use super::bezier::{self, DEFAULT_SEGMENTS};
use super::{PathSequence, Point};
use crate::error::ParseError;

/// What to do with `Q q T t A a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedPolicy {
    /// Fail with [`ParseError::UnsupportedCommand`].
    #[default]
    Reject,
    /// Skip the command and its arguments, keep the rest of the path.
    Skip,
}

/// Result of [`PathParser::parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPath {
    pub points: PathSequence,
    /// Unsupported command letters that were skipped, in order.
    pub skipped: Vec<char>,
}

/// Configurable path data parser.
#[derive(Debug, Clone, Copy)]
pub struct PathParser {
    segments: usize,
    unsupported: UnsupportedPolicy,
}

impl Default for PathParser {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            unsupported: UnsupportedPolicy::Reject,
        }
    }
}

/// Parse path data with default settings.
pub fn parse_path(d: &str) -> Result<PathSequence, ParseError> {
    PathParser::default().parse(d).map(|parsed| parsed.points)
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments per cubic curve.
    pub fn segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    pub fn parse(&self, d: &str) -> Result<ParsedPath, ParseError> {
        let tokens = tokenize(d)?;
        let mut state = State::default();
        let mut skipped = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let command = match tokens[i] {
                Token::Number(_, offset) => return Err(ParseError::UnexpectedNumber { offset }),
                Token::Command(c, _) => c,
            };
            i += 1;

            let start = i;
            while let Some(Token::Number(..)) = tokens.get(i) {
                i += 1;
            }
            let args: Vec<f64> = tokens[start..i]
                .iter()
                .filter_map(|t| match t {
                    Token::Number(v, _) => Some(*v),
                    Token::Command(..) => None,
                })
                .collect();

            match command {
                'Z' | 'z' => {
                    if let Some(&Token::Number(_, offset)) = tokens[start..i].first() {
                        return Err(ParseError::UnexpectedNumber { offset });
                    }
                    state.close();
                }
                'Q' | 'q' | 'T' | 't' | 'A' | 'a' => match self.unsupported {
                    UnsupportedPolicy::Reject => return Err(ParseError::UnsupportedCommand(command)),
                    UnsupportedPolicy::Skip => {
                        warn!(command = %command, args = args.len(), "skipping unsupported path command");
                        skipped.push(command);
                        state.last_ctrl = None;
                    }
                },
                _ => {
                    let arity = arity(command);
                    let rem = args.len() % arity;
                    if args.is_empty() || rem != 0 {
                        return Err(ParseError::MissingArguments {
                            command,
                            expected: arity,
                            found: rem,
                        });
                    }
                    for (n, group) in args.chunks(arity).enumerate() {
                        let effective = match command {
                            'M' if n > 0 => 'L',
                            'm' if n > 0 => 'l',
                            c => c,
                        };
                        state.apply(effective, group, self.segments)?;
                    }
                }
            }
        }

        let points = dedup_adjacent(state.out);
        let points = PathSequence::new(points).ok_or(ParseError::Empty)?;
        Ok(ParsedPath { points, skipped })
    }
}

fn arity(command: char) -> usize {
    match command.to_ascii_uppercase() {
        'M' | 'L' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' => 4,
        _ => 0,
    }
}

#[derive(Debug, Default)]
struct State {
    current: Point,
    start: Point,
    last_ctrl: Option<Point>,
    out: Vec<Point>,
}

impl State {
    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn emit(&mut self, p: Point) -> Result<(), ParseError> {
        if !p.is_finite() {
            return Err(ParseError::NonFinite);
        }
        self.current = p;
        self.out.push(p);
        Ok(())
    }

    fn apply(&mut self, command: char, a: &[f64], segments: usize) -> Result<(), ParseError> {
        let rel = command.is_ascii_lowercase();
        match command.to_ascii_uppercase() {
            'M' => {
                let p = self.resolve(rel, a[0], a[1]);
                self.emit(p)?;
                self.start = p;
                self.last_ctrl = None;
            }
            'L' => {
                let p = self.resolve(rel, a[0], a[1]);
                self.emit(p)?;
                self.last_ctrl = None;
            }
            'H' => {
                let x = if rel { self.current.x + a[0] } else { a[0] };
                self.emit(Point::new(x, self.current.y))?;
                self.last_ctrl = None;
            }
            'V' => {
                let y = if rel { self.current.y + a[0] } else { a[0] };
                self.emit(Point::new(self.current.x, y))?;
                self.last_ctrl = None;
            }
            'C' => {
                let p1 = self.resolve(rel, a[0], a[1]);
                let p2 = self.resolve(rel, a[2], a[3]);
                let p3 = self.resolve(rel, a[4], a[5]);
                self.curve(p1, p2, p3, segments)?;
            }
            'S' => {
                let p1 = self
                    .last_ctrl
                    .map_or(self.current, |ctrl| ctrl.reflect(self.current));
                let p2 = self.resolve(rel, a[0], a[1]);
                let p3 = self.resolve(rel, a[2], a[3]);
                self.curve(p1, p2, p3, segments)?;
            }
            _ => unreachable!("arity() admits only M L H V C S"),
        }
        Ok(())
    }

    fn curve(&mut self, p1: Point, p2: Point, p3: Point, segments: usize) -> Result<(), ParseError> {
        if !(p1.is_finite() && p2.is_finite() && p3.is_finite()) {
            return Err(ParseError::NonFinite);
        }
        let p0 = self.current;
        self.out.extend(bezier::flatten(p0, p1, p2, p3, segments));
        self.current = p3;
        self.last_ctrl = Some(p2);
        Ok(())
    }

    fn close(&mut self) {
        self.out.push(self.start);
        self.current = self.start;
        self.last_ctrl = None;
    }
}

/// Drop points equal to their immediate predecessor.
fn dedup_adjacent(mut points: Vec<Point>) -> Vec<Point> {
    points.dedup_by(|b, a| a.x == b.x && a.y == b.y);
    points
}

// ============================================================================
// TOKENIZER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char, usize),
    Number(f64, usize),
}

fn tokenize(d: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0C' | b',' => i += 1,
            b'M' | b'm' | b'L' | b'l' | b'H' | b'h' | b'V' | b'v' | b'C' | b'c' | b'S' | b's'
            | b'Z' | b'z' | b'Q' | b'q' | b'T' | b't' | b'A' | b'a' => {
                tokens.push(Token::Command(b as char, i));
                i += 1;
            }
            b'+' | b'-' | b'.' | b'0'..=b'9' => {
                let end = scan_number(bytes, i);
                let literal = &d[i..end];
                let value: f64 = literal
                    .parse()
                    .map_err(|_| ParseError::InvalidNumber(literal.to_string()))?;
                if !value.is_finite() {
                    return Err(ParseError::NonFinite);
                }
                tokens.push(Token::Number(value, i));
                i = end;
            }
            _ => {
                let ch = d[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(ParseError::UnexpectedCharacter { ch, offset: i });
            }
        }
    }

    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(tokens)
}

/// Return the end offset of the number starting at `start`.
///
/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`. A second `.` starts a
/// new number, so `1.5.5` scans as `1.5` then `.5`.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            i = j;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_closed_square() {
        let path = parse_path("M0,0 L10,0 L10,10 Z").unwrap();
        assert_eq!(path.points(), &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 0.0)]);
    }

    #[test]
    fn test_relative_commands() {
        let path = parse_path("m5 5 l10 0 v10 h-10 z").unwrap();
        assert_eq!(
            path.points(),
            &[p(5.0, 5.0), p(15.0, 5.0), p(15.0, 15.0), p(5.0, 15.0), p(5.0, 5.0)]
        );
    }

    #[test]
    fn test_absolute_h_v() {
        let path = parse_path("M1,2 H7 V9").unwrap();
        assert_eq!(path.points(), &[p(1.0, 2.0), p(7.0, 2.0), p(7.0, 9.0)]);
    }

    #[test]
    fn test_cubic_default_segments() {
        let path = parse_path("M0,0 C0,10 10,10 10,0").unwrap();
        assert_eq!(path.len(), 51);
        assert_eq!(path.first(), p(0.0, 0.0));
        assert_eq!(path.last(), p(10.0, 0.0));
        let mid = path[25];
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_relative_cubic() {
        let path = parse_path("M10,10 c0,10 10,10 10,0").unwrap();
        assert_eq!(path.last(), p(20.0, 10.0));
    }

    #[test]
    fn test_smooth_reflects_previous_control() {
        let parser = PathParser::new().segments(2);
        // Previous control (10,10) reflected through (10,0) gives (10,-10).
        let path = parser.parse("M0,0 C0,10 10,10 10,0 S20,-10 20,0").unwrap().points;
        let expected_mid = bezier::eval(p(10.0, 0.0), p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0), 0.5);
        assert_eq!(path.last(), p(20.0, 0.0));
        assert_eq!(path[path.len() - 2], expected_mid);
    }

    #[test]
    fn test_relative_smooth() {
        let parser = PathParser::new().segments(2);
        let path = parser.parse("M0,0 c0,10 10,10 10,0 s10,-10 10,0").unwrap().points;
        let expected_mid = bezier::eval(p(10.0, 0.0), p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0), 0.5);
        assert_eq!(path.last(), p(20.0, 0.0));
        assert_eq!(path[path.len() - 2], expected_mid);
    }

    #[test]
    fn test_repeated_cubic_groups() {
        let parser = PathParser::new().segments(2);
        let path = parser
            .parse("M0,0 C0,10 10,10 10,0 10,-10 20,-10 20,0 S30,10 30,0")
            .unwrap()
            .points;
        assert_eq!(path.len(), 7);
        assert_eq!(path[2], p(10.0, 0.0));
        assert_eq!(path[4], p(20.0, 0.0));
        // The smooth segment reflects the second group's control (20,-10).
        let expected_mid = bezier::eval(p(20.0, 0.0), p(20.0, 10.0), p(30.0, 10.0), p(30.0, 0.0), 0.5);
        assert_eq!(path[5], expected_mid);
        assert_eq!(path.last(), p(30.0, 0.0));

        let path = parse_path("M0,0 c0,10 10,10 10,0 0,-10 10,-10 10,0").unwrap();
        assert_eq!(path.last(), p(20.0, 0.0));
        assert_eq!(path.len(), 101);
    }

    #[test]
    fn test_smooth_without_previous_cubic() {
        let parser = PathParser::new().segments(2);
        let path = parser.parse("M0,0 L10,0 S20,10 20,0").unwrap().points;
        let expected_mid = bezier::eval(p(10.0, 0.0), p(10.0, 0.0), p(20.0, 10.0), p(20.0, 0.0), 0.5);
        assert_eq!(path[path.len() - 2], expected_mid);
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            parse_path("M1"),
            Err(ParseError::MissingArguments {
                command: 'M',
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            parse_path("M0,0 C1,1 2,2"),
            Err(ParseError::MissingArguments { command: 'C', .. })
        ));
        assert!(matches!(
            parse_path("M0,0 L"),
            Err(ParseError::MissingArguments { found: 0, .. })
        ));
    }

    #[test]
    fn test_implicit_repeat() {
        let path = parse_path("M0 0 10 0 10 10").unwrap();
        assert_eq!(path.points(), &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]);
        let path = parse_path("m1 1 2 2").unwrap();
        assert_eq!(path.points(), &[p(1.0, 1.0), p(3.0, 3.0)]);
    }

    #[test]
    fn test_number_forms() {
        let path = parse_path("M.5-.5L1e1,2.5").unwrap();
        assert_eq!(path.points(), &[p(0.5, -0.5), p(10.0, 2.5)]);
        let path = parse_path("M0,0L1.5.5").unwrap();
        assert_eq!(path.points(), &[p(0.0, 0.0), p(1.5, 0.5)]);
        assert!(parse_path("M0,0L1.5.5.5").is_err());
    }

    #[test]
    fn test_unsupported_rejected() {
        assert_eq!(
            parse_path("M0,0 Q5,5 10,0"),
            Err(ParseError::UnsupportedCommand('Q'))
        );
        assert_eq!(
            parse_path("M0,0 A5,5 0 0 1 10,0"),
            Err(ParseError::UnsupportedCommand('A'))
        );
    }

    #[test]
    fn test_unsupported_skipped() {
        let parser = PathParser::new().unsupported(UnsupportedPolicy::Skip);
        let parsed = parser.parse("M0,0 Q5,5 10,0 L20,0").unwrap();
        assert_eq!(parsed.skipped, vec!['Q']);
        // Q's arguments are not read as extra L points
        assert_eq!(parsed.points.points(), &[p(0.0, 0.0), p(20.0, 0.0)]);
    }

    #[test]
    fn test_dedup_only_adjacent() {
        let path = parse_path("M0,0 L0,0 L5,5 L0,0").unwrap();
        assert_eq!(path.points(), &[p(0.0, 0.0), p(5.0, 5.0), p(0.0, 0.0)]);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(parse_path(""), Err(ParseError::Empty));
        assert_eq!(parse_path("   "), Err(ParseError::Empty));
        assert_eq!(parse_path("10 10"), Err(ParseError::UnexpectedNumber { offset: 0 }));
        assert!(matches!(
            parse_path("M0,0 X1"),
            Err(ParseError::UnexpectedCharacter { ch: 'X', .. })
        ));
        assert!(matches!(parse_path("M-,0"), Err(ParseError::InvalidNumber(_))));
        assert_eq!(parse_path("M1e999,0"), Err(ParseError::NonFinite));
        assert!(matches!(parse_path("M0,0 Z 5"), Err(ParseError::UnexpectedNumber { .. })));
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let path = parse_path("M0,0 L5,0 Z M10,10 l5,0 z").unwrap();
        assert_eq!(
            path.points(),
            &[
                p(0.0, 0.0),
                p(5.0, 0.0),
                p(0.0, 0.0),
                p(10.0, 10.0),
                p(15.0, 10.0),
                p(10.0, 10.0)
            ]
        );
    }
}
