use super::*;

fn run_for_each(parallelism: Parallelism) -> Vec<i32> {
    let mut data = (0..100).collect::<Vec<i32>>();
    parallelism.for_each_mut(data.as_mut_slice(), |value| *value *= 2);

    data
}

#[test]
fn can_run_for_each_mut_with_any_parallelism() {
    let expected = (0..100).map(|value| value * 2).collect::<Vec<i32>>();

    assert_eq!(run_for_each(Parallelism::Sequential), expected);
    assert_eq!(run_for_each(Parallelism::Available), expected);
    assert_eq!(run_for_each(Parallelism::new_with_threads(2).unwrap()), expected);
}

#[test]
fn can_execute_on_thread_pool() {
    let pool = ThreadPool::new(2).unwrap();

    assert_eq!(pool.execute(|| 40 + 2), 42);
}
