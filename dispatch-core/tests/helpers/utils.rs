use moea::prelude::{InfoLogger, Random};
use std::sync::{Arc, Mutex};

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
        let value = self.ints.lock().unwrap().pop().expect("no more ints");
        assert!(value >= min && value <= max, "value {value} is out of [{min}, {max}]");

        value
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        assert!(min < max);
        self.reals.lock().unwrap().pop().expect("no more reals")
    }
}

pub fn create_test_logger() -> InfoLogger {
    Arc::new(|_| ())
}
