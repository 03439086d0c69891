/// Convert a base distance into the effective edge weight.
///
/// When `apply_traffic` is set the traffic factor multiplies the base
/// distance exactly; otherwise the base distance is returned untouched.
pub fn effective_weight(base_distance: f64, traffic_factor: f64, apply_traffic: bool) -> f64 {
    if apply_traffic {
        base_distance * traffic_factor
    } else {
        base_distance
    }
}

#[cfg(test)]
mod tests {
    use super::effective_weight;

    #[test]
    fn traffic_multiplies_when_enabled() {
        assert_eq!(effective_weight(10.0, 2.0, true), 20.0);
        assert_eq!(effective_weight(7.5, 1.2, true), 7.5 * 1.2);
    }

    #[test]
    fn traffic_ignored_when_disabled() {
        assert_eq!(effective_weight(10.0, 2.0, false), 10.0);
        assert_eq!(effective_weight(10.0, 0.0, false), 10.0);
    }
}
