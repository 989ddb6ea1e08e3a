use statrs::statistics::Statistics;

/// Arithmetic mean of `values` that is independent of their order.
///
/// Floating point addition is not associative, so the values are sorted with a
/// total order before accumulation. Any permutation of the same multiset yields
/// a bit-identical result. Returns `None` for an empty slice.
pub fn order_independent_mean(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(|a, b| a.total_cmp(b));
    Some(values.iter().mean())
}

/// Linear axis bounds covering `min..=max` with `pad` (a fraction of the span)
/// added on both sides.
///
/// A degenerate span is widened around its single value so that the
/// resulting range is never empty.
pub fn padded_range(min: f64, max: f64, pad: f64) -> (f64, f64) {
    let span = max - min;
    if span.abs() < f64::EPSILON {
        let half = if min.abs() > f64::EPSILON { min.abs() * 0.5 } else { 1.0 };
        return (min - half, max + half);
    }
    (min - span * pad, max + span * pad)
}

/// Log10 axis bounds covering `min..=max`, both strictly positive.
///
/// The bounds are widened by `pad` decades on each side.
pub fn log_padded_range(min: f64, max: f64, pad: f64) -> (f64, f64) {
    let lo = min.max(f64::MIN_POSITIVE).log10();
    let hi = max.max(f64::MIN_POSITIVE).log10();
    let pad = if (hi - lo).abs() < f64::EPSILON { pad.max(0.5) } else { pad };
    (10f64.powf(lo - pad), 10f64.powf(hi + pad))
}

/// Min and max of an iterator of finite values.
pub fn min_max<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(order_independent_mean(&mut []), None);
    }

    #[test]
    fn mean_ignores_input_order() {
        let mut a = vec![0.1, 1e16, 0.2, -1e16, 0.3, 7.25];
        let mut b = vec![7.25, 0.3, -1e16, 0.2, 1e16, 0.1];
        let ma = order_independent_mean(&mut a).unwrap();
        let mb = order_independent_mean(&mut b).unwrap();
        assert_eq!(ma.to_bits(), mb.to_bits());
    }

    #[test]
    fn mean_of_simple_values() {
        let mut v = vec![8.0, 10.0, 12.0];
        assert!((order_independent_mean(&mut v).unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn padded_range_widens_single_point() {
        let (lo, hi) = padded_range(100.0, 100.0, 0.05);
        assert!(lo < 100.0 && hi > 100.0);
        let (lo, hi) = padded_range(0.0, 0.0, 0.05);
        assert_eq!((lo, hi), (-1.0, 1.0));
    }

    #[test]
    fn padded_range_adds_fraction_of_span() {
        let (lo, hi) = padded_range(0.0, 100.0, 0.05);
        assert!((lo + 5.0).abs() < 1e-9);
        assert!((hi - 105.0).abs() < 1e-9);
    }

    #[test]
    fn log_range_brackets_values() {
        let (lo, hi) = log_padded_range(5.0, 50.0, 0.1);
        assert!(lo > 0.0 && lo < 5.0);
        assert!(hi > 50.0);
        let (lo, hi) = log_padded_range(16.0, 16.0, 0.1);
        assert!(lo < 16.0 && hi > 16.0);
    }

    #[test]
    fn min_max_of_values() {
        assert_eq!(min_max(vec![3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(min_max(Vec::<f64>::new()), None);
    }
}
