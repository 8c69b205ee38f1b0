use std::f64::consts::PI;

fn unit(t: f64) -> f64 {
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

pub fn smoothstep(t: f64) -> f64 {
    let t = unit(t);
    t * t * (3.0 - 2.0 * t)
}

pub fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    let t = unit(t);
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Overshoots past 1 before settling.
pub fn elastic_out(t: f64) -> f64 {
    let t = unit(t);
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let c4 = (2.0 * PI) / 3.0;
    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        let eases: [fn(f64) -> f64; 3] = [smoothstep, bounce_out, elastic_out];
        for ease in eases {
            assert_relative_eq!(ease(0.0), 0.0, epsilon = 1e-9);
            assert_relative_eq!(ease(1.0), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inputs_are_clamped() {
        assert_eq!(smoothstep(-2.0), 0.0);
        assert_eq!(smoothstep(3.0), 1.0);
        assert_eq!(bounce_out(f64::NAN), 0.0);
    }

    #[test]
    fn test_smoothstep_midpoint() {
        assert_relative_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn test_bounce_stays_in_unit_range() {
        for i in 0..=100 {
            let v = bounce_out(i as f64 / 100.0);
            assert!((0.0..=1.0 + 1e-9).contains(&v));
        }
    }

    #[test]
    fn test_elastic_overshoots() {
        let peak = (1..100)
            .map(|i| elastic_out(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}
