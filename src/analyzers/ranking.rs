use crate::analyzers::types::{Rankings, StudentRecord};

/// Default number of students in each ranking list.
pub const DEFAULT_RANKING_SIZE: usize = 3;

/// Picks the `n` highest and `n` lowest totals.
///
/// Both lists come from one stable descending ordering, so equal totals keep
/// their input order and the lists never share a student when there are at
/// least `2 * n` rows. `top` is highest-first; `bottom` is lowest-first with
/// ties in input order.
pub fn rank(records: &[StudentRecord], n: usize) -> Rankings {
    let mut order: Vec<&StudentRecord> = records.iter().collect();
    order.sort_by(|a, b| b.total.total_cmp(&a.total));

    let len = n.min(order.len());

    let top = order[..len].iter().map(|r| (*r).clone()).collect();

    let mut bottom: Vec<StudentRecord> = order[order.len() - len..]
        .iter()
        .map(|r| (*r).clone())
        .collect();
    bottom.sort_by(|a, b| a.total.total_cmp(&b.total).then(a.row.cmp(&b.row)));

    Rankings { top, bottom }
}
