//! How many fingers go on an edge, and how wide they are.

use serde::{Deserialize, Serialize};
use tabcut_geom::Dim;
use tracing::{debug, warn};

use crate::{BoxError, Result};

/// How tab counts are chosen for an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TabPolicy {
    /// Derive from material thickness: prefer segments of about three
    /// thicknesses when that still gives three or more tabs, otherwise
    /// about two.
    #[default]
    Auto,
    /// Aim for segments no wider than `width`.
    Width {
        /// Target segment width (mm).
        width: f64,
    },
    /// A fixed number of tabs.
    Count {
        /// Tabs per edge.
        count: u32,
    },
}

/// Tabs along one edge: `count` tabs separated and flanked by gaps, so the
/// edge splits into `2 * count + 1` equal segments.
#[derive(Debug, Clone, PartialEq)]
pub struct TabLayout {
    /// Number of tabs.
    pub count: u32,
    /// Width of each segment (tab or gap).
    pub segment: Dim,
}

impl TabLayout {
    /// Number of segments along the edge.
    pub fn segments(&self) -> u32 {
        2 * self.count + 1
    }
}

fn odd_floor(k: i64) -> i64 {
    if k.rem_euclid(2) == 1 {
        k
    } else {
        k - 1
    }
}

fn auto_count(ratio: f64, per_segment: f64) -> i64 {
    let segments = (ratio / per_segment).floor() as i64;
    odd_floor((segments - 1).div_euclid(2))
}

/// Work out the tab layout for an interior edge of `length` in material of
/// `thickness`.
pub fn tab_layout(length: &Dim, thickness: &Dim, policy: &TabPolicy) -> Result<TabLayout> {
    let count: i64 = match *policy {
        TabPolicy::Auto => {
            let ratio = length.dist / thickness.dist;
            let with_three = auto_count(ratio, 3.0);
            if with_three >= 3 {
                with_three
            } else {
                auto_count(ratio, 2.0)
            }
        }
        TabPolicy::Width { width } => {
            if !(width.is_finite() && width > 0.0) {
                return Err(BoxError::InvalidDimension {
                    name: "tab width",
                    value: width,
                });
            }
            let mut segments = (length.dist / width).floor() as i64;
            if segments.rem_euclid(2) == 0 {
                segments -= 1;
            }
            (segments - 1).div_euclid(2)
        }
        TabPolicy::Count { count } => i64::from(count),
    };

    if count < 1 {
        return Err(BoxError::EdgeTooShort {
            length: length.dist,
            reason: format!("{policy:?} yields {count} tabs"),
        });
    }

    let Some((count, segments)) = u32::try_from(count)
        .ok()
        .and_then(|c| Some((c, c.checked_mul(2)?.checked_add(1)?)))
    else {
        return Err(BoxError::InvalidDimension {
            name: "tab count",
            value: count as f64,
        });
    };
    let segment = length / f64::from(segments);
    if segment.dist < thickness.dist {
        warn!(
            length = length.dist,
            segment = segment.dist,
            thickness = thickness.dist,
            "tab segments are narrower than the material"
        );
    }
    debug!(length = length.dist, count, segment = segment.dist, "tab layout");

    Ok(TabLayout { count, segment })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t(v: f64) -> Dim {
        Dim::labeled(v, "THICKNESS")
    }

    #[test]
    fn test_auto_prefers_three_thickness_segments() {
        let layout = tab_layout(&Dim::labeled(100.0, "W"), &t(3.0), &TabPolicy::Auto).unwrap();
        assert_eq!(layout.count, 5);
        assert_eq!(layout.segments(), 11);
        assert_relative_eq!(layout.segment.dist, 100.0 / 11.0);
        assert_eq!(layout.segment.label(), Some("(W / 11)"));
    }

    #[test]
    fn test_auto_falls_back_to_two_thickness_segments() {
        // 50 / 3 gives only one tab at three thicknesses
        let layout = tab_layout(&Dim::new(50.0), &t(3.0), &TabPolicy::Auto).unwrap();
        assert_eq!(layout.count, 3);
        assert_relative_eq!(layout.segment.dist, 50.0 / 7.0);
    }

    #[test]
    fn test_auto_depth_example() {
        let layout = tab_layout(&Dim::new(65.0), &t(3.0), &TabPolicy::Auto).unwrap();
        assert_eq!(layout.count, 3);
    }

    #[test]
    fn test_auto_counts_are_odd() {
        for length in [30.0, 37.0, 80.0, 120.0, 220.0, 500.0] {
            let layout = tab_layout(&Dim::new(length), &t(4.7625), &TabPolicy::Auto).unwrap();
            assert_eq!(layout.count % 2, 1, "length {length}");
        }
    }

    #[test]
    fn test_too_short_edge() {
        let err = tab_layout(&Dim::new(10.0), &t(3.0), &TabPolicy::Auto).unwrap_err();
        assert!(matches!(err, BoxError::EdgeTooShort { .. }));
    }

    #[test]
    fn test_width_policy() {
        // 100 / 12 = 8 segments, reduced to 7 -> 3 tabs
        let layout = tab_layout(
            &Dim::new(100.0),
            &t(3.0),
            &TabPolicy::Width { width: 12.0 },
        )
        .unwrap();
        assert_eq!(layout.count, 3);
        assert_relative_eq!(layout.segment.dist, 100.0 / 7.0);

        assert!(tab_layout(&Dim::new(100.0), &t(3.0), &TabPolicy::Width { width: 0.0 }).is_err());
        assert!(tab_layout(&Dim::new(20.0), &t(3.0), &TabPolicy::Width { width: 15.0 }).is_err());
    }

    #[test]
    fn test_count_policy() {
        let layout =
            tab_layout(&Dim::new(90.0), &t(3.0), &TabPolicy::Count { count: 4 }).unwrap();
        assert_eq!(layout.count, 4);
        assert_relative_eq!(layout.segment.dist, 10.0);
        assert!(tab_layout(&Dim::new(90.0), &t(3.0), &TabPolicy::Count { count: 0 }).is_err());
    }

    #[test]
    fn test_tab_count_out_of_range() {
        let err = tab_layout(&Dim::new(90.0), &t(3.0), &TabPolicy::Count { count: u32::MAX })
            .unwrap_err();
        assert!(matches!(err, BoxError::InvalidDimension { name: "tab count", .. }));

        // Over u32::MAX tabs at three thicknesses per segment
        let err = tab_layout(&Dim::new(25769803786.5), &t(1.0), &TabPolicy::Auto).unwrap_err();
        assert!(matches!(err, BoxError::InvalidDimension { name: "tab count", .. }));

        let err = tab_layout(&Dim::new(100.0), &t(3.0), &TabPolicy::Width { width: 1e-9 })
            .unwrap_err();
        assert!(matches!(err, BoxError::InvalidDimension { name: "tab count", .. }));

        let max = (u32::MAX - 1) / 2;
        let layout =
            tab_layout(&Dim::new(90.0), &t(3.0), &TabPolicy::Count { count: max }).unwrap();
        assert_eq!(layout.segments(), u32::MAX);
    }

    #[test]
    fn test_segments_sum_to_length() {
        let length = Dim::new(123.4);
        let layout = tab_layout(&length, &t(3.0), &TabPolicy::Auto).unwrap();
        assert_relative_eq!(
            layout.segment.dist * f64::from(layout.segments()),
            length.dist,
            epsilon = 1e-9
        );
    }
}
