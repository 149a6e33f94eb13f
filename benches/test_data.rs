use lazy_static::lazy_static;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use scoreboard::Score;

pub struct ScoreData {
    pub scores: Vec<Score>,
}

fn gen_scores(n: i64, seed: u64) -> ScoreData {
    let mut rng = SmallRng::seed_from_u64(seed);
    let scores = (0..n)
        .map(|user| Score {
            user,
            value: rng.gen_range(0, 1_000_000),
        })
        .collect();
    ScoreData { scores }
}

lazy_static! {
    pub static ref RAND_100: ScoreData = gen_scores(100, 0xC0FFEE);
    pub static ref RAND_1_000: ScoreData = gen_scores(1_000, 0xBEEF);
    pub static ref RAND_10_000: ScoreData = gen_scores(10_000, 0xCAFE);
}
