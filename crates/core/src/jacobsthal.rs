/// Returns the order in which pending indices `1..=m` are inserted.
///
/// Pending index `i` holds element `b(i + 1)` in the usual 1-based
/// numbering, and `b(1)` is inserted before the schedule runs. Elements are
/// grouped by Jacobsthal numbers `J(k) = J(k-1) + 2 * J(k-2)` into windows
/// `(J(k-1), J(k)]` and each window is walked from its top down, so the
/// schedule starts `2, 1, 4, 3, 10, 9, 8, 7, 6, 5, 20, ...`. The last window
/// is cut at `b(m + 1)`.
///
/// Inserting top-down keeps every binary search inside a prefix of at most
/// `2^k - 1` elements.
#[must_use]
pub fn jacobsthal_order(m: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(m);
    let last = m + 1;

    // (J(k-1), J(k)), starting from k = 2.
    let (mut prev, mut curr) = (1usize, 1usize);
    let mut covered = 1usize;
    while curr < last {
        (prev, curr) = (curr, curr + 2 * prev);
        let top = curr.min(last);
        for b in (covered + 1..=top).rev() {
            order.push(b - 1);
        }
        covered = top;
    }

    // Anything the windows missed goes last, ascending.
    order.extend(covered..=m);
    order
}
