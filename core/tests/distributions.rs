use delve_core::{Direction, DungeonRng};

const SAMPLES: usize = 20_000;

#[test]
fn gaussian_centres_on_mean_and_respects_clamps() {
    let mut rng = DungeonRng::new(0x5eed);
    let mut total = 0i64;

    for _ in 0..SAMPLES {
        let value = rng.gaussian(6.0, 1.0, 2, 999);
        assert!((2..=999).contains(&value), "sample {value} escaped clamp");
        total += i64::from(value);
    }

    let mean = total as f64 / SAMPLES as f64;
    assert!((mean - 6.0).abs() < 0.05, "empirical mean {mean} drifted");
}

#[test]
fn gaussian_clamp_is_tight() {
    let mut rng = DungeonRng::new(9);

    for _ in 0..SAMPLES {
        let value = rng.gaussian(10.0, 4.0, 8, 11);
        assert!((8..=11).contains(&value), "sample {value} escaped clamp");
    }
}

#[test]
fn weighted_choice_converges_to_weight_ratio() {
    let mut rng = DungeonRng::new(1234);
    let items = [('A', 3), ('B', 1)];
    let mut a = 0usize;
    let mut b = 0usize;

    for _ in 0..SAMPLES {
        match rng.choose_weighted(&items) {
            Ok('A') => a += 1,
            Ok('B') => b += 1,
            other => panic!("unexpected choice {other:?}"),
        }
    }

    let ratio = a as f64 / b as f64;
    assert!((ratio - 3.0).abs() < 0.2, "ratio {ratio} far from 3:1");
}

#[test]
fn random_direction_covers_every_variant() {
    let mut rng = DungeonRng::new(77);
    let mut counts = [0usize; 4];

    for _ in 0..SAMPLES {
        counts[rng.random_direction().index()] += 1;
    }

    for direction in Direction::ALL {
        let share = counts[direction.index()] as f64 / SAMPLES as f64;
        assert!((share - 0.25).abs() < 0.02, "{direction:?} drawn {share}");
    }
}
