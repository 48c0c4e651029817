use rand::Rng;

use crate::models::Demographics;

/// Independent draws per bucket, scaled to whole percentages that sum to
/// exactly 100. The rounding residual goes to the largest bucket.
pub fn generate<R: Rng>(rng: &mut R) -> Demographics {
    let white = rng.gen_range(20..80);
    let black = rng.gen_range(5..35);
    let asian = rng.gen_range(2..22);
    let hispanic = rng.gen_range(5..45);
    let other = rng.gen_range(1..11);

    let [white, black, asian, hispanic, other] = normalize([white, black, asian, hispanic, other]);
    Demographics {
        white,
        black,
        hispanic,
        asian,
        other,
    }
}

/// Scale `raw` to percentages summing to 100.
pub fn normalize<const N: usize>(raw: [i32; N]) -> [i32; N] {
    let total: i32 = raw.iter().sum();
    if total <= 0 {
        let mut even = [0; N];
        if let Some(first) = even.first_mut() {
            *first = 100;
        }
        return even;
    }

    let mut shares = raw.map(|value| (f64::from(value) / f64::from(total) * 100.0).round() as i32);
    let residual = 100 - shares.iter().sum::<i32>();
    if residual != 0 {
        // First of the largest buckets on ties.
        let largest = shares
            .iter()
            .enumerate()
            .fold(0, |best, (i, &share)| if share > shares[best] { i } else { best });
        shares[largest] += residual;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn always_sums_to_one_hundred() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1000 {
            let demographics = generate(&mut rng);
            assert_eq!(demographics.total(), 100);
            assert!(demographics.buckets().iter().all(|(_, share)| *share >= 0));
        }
    }

    #[test]
    fn residual_goes_to_largest_bucket() {
        // 1/3 each rounds to 33 + 33 + 33 = 99.
        assert_eq!(normalize([1, 1, 1]), [34, 33, 33]);
        assert_eq!(normalize([2, 1, 1]), [50, 25, 25]);
        // 14 + 29 * 3 = 101; the first 29 gives one back.
        assert_eq!(normalize([1, 2, 2, 2]), [14, 28, 29, 29]);
    }

    #[test]
    fn all_zero_input_is_still_one_hundred() {
        assert_eq!(normalize([0, 0, 0]).iter().sum::<i32>(), 100);
    }
}
