//! Random implementations.

use pokebot_domain::{Ivs, Nature, MAX_IV};

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Roll six IVs uniformly in `0..=31`.
pub fn random_ivs(random: &dyn RandomPort) -> Ivs {
    Ivs::generate(|_| random.gen_range(0, i32::from(MAX_IV)).clamp(0, i32::from(MAX_IV)) as u8)
}

pub fn random_nature(random: &dyn RandomPort) -> Nature {
    let last = Nature::ALL.len() as i32 - 1;
    let idx = random.gen_range(0, last).clamp(0, last) as usize;
    Nature::ALL[idx]
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockRandomPort;

    #[test]
    fn fixed_random_produces_uniform_ivs() {
        let ivs = random_ivs(&FixedRandom(20));
        assert_eq!(ivs.total(), 120);
    }

    #[test]
    fn nature_index_is_clamped() {
        let mut random = MockRandomPort::new();
        random.expect_gen_range().returning(|_, _| 99);
        assert_eq!(random_nature(&random), Nature::Quirky);
    }

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom::new();
        for _ in 0..100 {
            let v = random.gen_range(0, 31);
            assert!((0..=31).contains(&v));
        }
    }
}
