use crate::utils::Random;
use std::sync::Mutex;

/// Returns predefined values in the given order.
pub struct FakeRandom {
    ints: Mutex<Vec<i32>>,
    reals: Mutex<Vec<f64>>,
}

impl FakeRandom {
    pub fn new(ints: Vec<i32>, reals: Vec<f64>) -> Self {
        let (mut ints, mut reals) = (ints, reals);
        ints.reverse();
        reals.reverse();

        Self { ints: Mutex::new(ints), reals: Mutex::new(reals) }
    }
}

impl Random for FakeRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        assert!(min <= max);
        self.ints.lock().unwrap().pop().expect("no more ints")
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        assert!(min < max);
        self.reals.lock().unwrap().pop().expect("no more reals")
    }
}
