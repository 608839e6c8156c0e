use crate::aspects::types::{Aspect, AspectSettings};
use crate::math::{angular_separation, signed_deg};
use crate::points::ChartPoint;

/// A point taking part in aspect detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectPoint {
    pub point: ChartPoint,
    pub longitude: f64,
    /// Longitudinal speed in degrees per day, when known
    pub speed: Option<f64>,
}

impl AspectPoint {
    pub fn new(point: impl Into<ChartPoint>, longitude: f64, speed: Option<f64>) -> Self {
        Self {
            point: point.into(),
            longitude,
            speed,
        }
    }
}

/// Aspect calculator
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    pub fn new(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// All aspects among `points`, at most one per unordered pair, sorted by
    /// the canonical order of (first, second).
    pub fn detect(&self, points: &[AspectPoint]) -> Vec<Aspect> {
        let mut included: Vec<&AspectPoint> = points
            .iter()
            .filter(|p| !self.settings.exclude.contains(&p.point))
            .collect();
        included.sort_by(|a, b| a.point.cmp(&b.point));
        included.dedup_by(|a, b| a.point == b.point);

        let mut aspects = Vec::new();
        for i in 0..included.len() {
            for j in (i + 1)..included.len() {
                if let Some(aspect) = self.calculate_aspect(included[i], included[j]) {
                    aspects.push(aspect);
                }
            }
        }
        aspects.sort_by(|a, b| (a.first, a.second).cmp(&(b.first, b.second)));
        aspects
    }

    /// The closest-matching aspect between two points, if any is within orb.
    ///
    /// The smallest deviation wins; on an exact tie the smaller angle wins.
    pub fn calculate_aspect(&self, a: &AspectPoint, b: &AspectPoint) -> Option<Aspect> {
        if a.point == b.point {
            return None;
        }
        let (p1, p2) = if a.point <= b.point { (a, b) } else { (b, a) };
        let separation = angular_separation(p1.longitude, p2.longitude);

        let mut best: Option<(f64, f64, &_)> = None;
        for definition in &self.settings.aspects {
            let angle = definition.kind.angle();
            let deviation = (separation - angle).abs();
            if deviation > self.settings.orb_for(definition) {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_dev, best_angle, _)) => {
                    deviation < best_dev || (deviation == best_dev && angle < best_angle)
                }
            };
            if better {
                best = Some((deviation, angle, definition));
            }
        }

        best.map(|(deviation, angle, definition)| Aspect {
            first: p1.point,
            second: p2.point,
            kind: definition.kind,
            separation,
            orb: deviation,
            applying: match (p1.speed, p2.speed) {
                (Some(s1), Some(s2)) => is_aspect_applying(p1.longitude, p2.longitude, s1, s2, angle),
                _ => None,
            },
        })
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(AspectSettings::default())
    }
}

/// Detect aspects among `points` under `settings`.
pub fn detect(points: &[AspectPoint], settings: &AspectSettings) -> Vec<Aspect> {
    AspectCalculator::new(settings.clone()).detect(points)
}

/// Determine if an aspect is applying (approaching exact) or separating.
///
/// `None` when the two points move at the same speed. An exact aspect is
/// about to separate, so it reports `Some(false)`.
fn is_aspect_applying(lon1: f64, lon2: f64, speed1: f64, speed2: f64, aspect_angle: f64) -> Option<bool> {
    let relative_speed = speed1 - speed2;
    if relative_speed == 0.0 {
        return None;
    }

    // separation widens while the signed difference moves away from zero
    let signed_diff = signed_deg(lon1 - lon2);
    let separation = signed_diff.abs();
    let separation_rate = if signed_diff >= 0.0 {
        relative_speed
    } else {
        -relative_speed
    };

    if separation > aspect_angle {
        Some(separation_rate < 0.0)
    } else if separation < aspect_angle {
        Some(separation_rate > 0.0)
    } else {
        Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::types::{AspectDefinition, AspectKind};
    use crate::points::Body;

    fn body(b: Body, lon: f64) -> AspectPoint {
        AspectPoint::new(b, lon, None)
    }

    #[test]
    fn applying_when_faster_body_closes_in() {
        // Moon 5 degrees behind a square to the Sun and catching up
        assert_eq!(is_aspect_applying(85.0, 0.0, 13.0, 1.0, 90.0), Some(true));
        assert_eq!(is_aspect_applying(95.0, 0.0, 13.0, 1.0, 90.0), Some(false));
        // same geometry, measured from the other side
        assert_eq!(is_aspect_applying(0.0, 85.0, 1.0, 13.0, 90.0), Some(true));
        assert_eq!(is_aspect_applying(10.0, 0.0, 1.0, 1.0, 0.0), None);
    }

    #[test]
    fn retrograde_motion_can_apply() {
        // Mercury retrograde backing into a conjunction with the Sun
        assert_eq!(is_aspect_applying(5.0, 0.0, -0.5, 1.0, 0.0), Some(true));
    }

    #[test]
    fn pair_is_stored_in_canonical_order() {
        let calc = AspectCalculator::new(AspectSettings::with_kinds(&AspectKind::MAJOR, 8.0));
        let aspect = calc
            .calculate_aspect(&body(Body::Mars, 95.0), &body(Body::Sun, 0.0))
            .unwrap();
        assert_eq!(aspect.first, ChartPoint::Body(Body::Sun));
        assert_eq!(aspect.second, ChartPoint::Body(Body::Mars));
        assert_eq!(aspect.kind, AspectKind::Square);
        assert!((aspect.orb - 5.0).abs() < 1e-12);
        assert_eq!(aspect.applying, None);
    }

    #[test]
    fn per_kind_orb_overrides_default() {
        let mut settings = AspectSettings::with_kinds(&[], 8.0);
        settings.aspects.push(AspectDefinition::with_orb(AspectKind::Trine, 2.0));
        let calc = AspectCalculator::new(settings);
        assert!(calc
            .calculate_aspect(&body(Body::Sun, 0.0), &body(Body::Moon, 123.0))
            .is_none());
        assert!(calc
            .calculate_aspect(&body(Body::Sun, 0.0), &body(Body::Moon, 121.5))
            .is_some());
    }

    #[test]
    fn duplicate_points_are_ignored() {
        let points = [body(Body::Sun, 0.0), body(Body::Sun, 0.0), body(Body::Moon, 180.0)];
        let aspects = detect(&points, &AspectSettings::default());
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].kind, AspectKind::Opposition);
    }
}
