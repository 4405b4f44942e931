//! Parser for the `points` attribute of `<polygon>` and `<polyline>`.
//!
//! The attribute is a whitespace-separated list of `x,y` tokens:
//!
//! ```text
//! points="0,0 10,0 10,10"
//! ```

use super::{PathSequence, Point};
use crate::error::ParseError;

/// Parse a `points` attribute.
///
/// When `close` is set, a copy of the first point is appended.
pub fn parse_points(s: &str, close: bool) -> Result<PathSequence, ParseError> {
    let mut points = s
        .split_whitespace()
        .map(parse_pair)
        .collect::<Result<Vec<_>, _>>()?;

    if close {
        if let Some(&first) = points.first() {
            points.push(first);
        }
    }

    PathSequence::new(points).ok_or(ParseError::Empty)
}

fn parse_pair(token: &str) -> Result<Point, ParseError> {
    let invalid = || ParseError::InvalidPoint(token.to_string());
    let (x, y) = token.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.parse().map_err(|_| invalid())?;
    let y: f64 = y.parse().map_err(|_| invalid())?;
    let p = Point::new(x, y);
    if !p.is_finite() {
        return Err(ParseError::NonFinite);
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_closed() {
        let path = parse_points("0,0 10,0\n10,10", true).unwrap();
        assert_eq!(
            path.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_open() {
        let path = parse_points("  1.5,-2 3,4  ", false).unwrap();
        assert_eq!(path.points(), &[Point::new(1.5, -2.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_points("", true), Err(ParseError::Empty));
        assert_eq!(
            parse_points("0,0 10", true),
            Err(ParseError::InvalidPoint("10".to_string()))
        );
        assert_eq!(
            parse_points("0,0 a,b", true),
            Err(ParseError::InvalidPoint("a,b".to_string()))
        );
        assert_eq!(
            parse_points("1,2,3", true),
            Err(ParseError::InvalidPoint("1,2,3".to_string()))
        );
        // NaN literals never reach a coordinate
        assert_eq!(parse_points("NaN,0", true), Err(ParseError::NonFinite));
    }
}
