use serde::Serialize;

/// Single-page list envelope used by every collection endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct Paginated<T: Serialize> {
    pub results: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> From<Vec<T>> for Paginated<T> {
    fn from(results: Vec<T>) -> Self {
        let count = results.len();
        Self { results, count }
    }
}
