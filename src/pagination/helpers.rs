/// One page of a larger sequence plus the length of that sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginated<'a, T> {
    pub page: &'a [T],
    pub total: usize,
}

/// Slice `data` into the 1-based page `page_number` of `page_size` items.
///
/// Out-of-range pages yield an empty slice. `total` is always `data.len()`.
#[must_use]
pub fn paginate<T>(data: &[T], page_number: usize, page_size: usize) -> Paginated<'_, T> {
    let total = data.len();

    if page_number == 0 || page_size == 0 {
        return Paginated { page: &[], total };
    }

    let start = (page_number - 1).saturating_mul(page_size).min(total);
    let end = page_number.saturating_mul(page_size).min(total);

    Paginated {
        page: &data[start..end],
        total,
    }
}
