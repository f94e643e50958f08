//! Integer range lists such as `"2-3,5,7-"`.

use crate::base::neterror::NetError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Range {
    start: i32,
    end: i32,
}

/// A set of non-negative integer ranges.
///
/// Ranges are comma separated and bounds are separated by a dash. Either bound
/// may be omitted: `"-3"` means `0..=3` and `"7-"` means seven and above.
/// So `"2-3,5,7-"` includes 2, 3, 5 and every value from 7 upwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerRanges {
    ranges: Vec<Range>,
}

impl IntegerRanges {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `value` inside any range?
    pub fn is_included(&self, value: i32) -> bool {
        self.ranges
            .iter()
            .any(|r| r.start <= value && value <= r.end)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Start of the first range, `None` if there are no ranges.
    pub fn range_start(&self) -> Option<i32> {
        self.ranges.first().map(|r| r.start)
    }

    /// Every included value, range by range, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.ranges.iter().flat_map(|r| r.start..=r.end)
    }
}

fn parse_bound(value: &str, default: i32, range: &str) -> Result<i32, NetError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse()
        .map_err(|_| NetError::InvalidRange(range.to_string()))
}

impl FromStr for IntegerRanges {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for token in s.split(',').filter(|t| !t.is_empty()) {
            let rng = token.trim();
            let parts: Vec<&str> = rng.splitn(3, '-').collect();
            if parts.len() > 2 {
                return Err(NetError::InvalidRange(rng.to_string()));
            }
            let start = parse_bound(parts[0], 0, rng)?;
            let end = match parts.get(1) {
                Some(upper) => parse_bound(upper, i32::MAX, rng)?,
                None => start,
            };
            if start > end {
                return Err(NetError::InvalidRange(rng.to_string()));
            }
            ranges.push(Range { start, end });
        }
        Ok(Self { ranges })
    }
}

impl fmt::Display for IntegerRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}-{}", r.start, r.end)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a IntegerRanges {
    type Item = i32;
    type IntoIter = Box<dyn Iterator<Item = i32> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
