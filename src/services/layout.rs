//! Column layout of intervals sharing one calendar group.
//!
//! Greedy interval partitioning: intervals are visited by start time and
//! dropped into the first column that is already free, opening a new column
//! only when none is. Every block of a call gets the same width, the final
//! column count, even when its own neighbourhood needed fewer columns.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::interval::Interval;
use crate::domain::types::InterventionId;

/// Horizontal placement of one interval.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct LayoutResult {
    pub intervention_id: InterventionId,
    pub column: usize,
    pub total_columns: usize,
}

/// Assigns a column to every interval. Results follow the input order.
pub fn layout(intervals: &[Interval]) -> Vec<LayoutResult> {
    match intervals {
        [] => return Vec::new(),
        [single] => {
            return vec![LayoutResult {
                intervention_id: single.id,
                column: 0,
                total_columns: 1,
            }];
        }
        _ => {}
    }

    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // Stable: equal starts keep their input order.
    order.sort_by_key(|&index| intervals[index].start);

    let mut column_ends: Vec<NaiveDateTime> = Vec::new();
    let mut columns = vec![0; intervals.len()];

    for index in order {
        let interval = &intervals[index];
        let free = column_ends.iter().position(|end| *end <= interval.start);
        let column = match free {
            Some(column) => {
                column_ends[column] = interval.end;
                column
            }
            None => {
                column_ends.push(interval.end);
                column_ends.len() - 1
            }
        };
        columns[index] = column;
    }

    let total_columns = column_ends.len();
    intervals
        .iter()
        .zip(columns)
        .map(|(interval, column)| LayoutResult {
            intervention_id: interval.id,
            column,
            total_columns,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::interval::overlaps;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn span(id: i64, from: (u32, u32), to: (u32, u32)) -> Interval {
        Interval::new(
            InterventionId::new(id).unwrap(),
            at(from.0, from.1),
            at(to.0, to.1),
        )
    }

    fn placement(results: &[LayoutResult]) -> Vec<(usize, usize)> {
        results
            .iter()
            .map(|r| (r.column, r.total_columns))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        assert!(layout(&[]).is_empty());
    }

    #[test]
    fn single_interval_takes_full_width() {
        let results = layout(&[span(1, (9, 0), (10, 0))]);
        assert_eq!(placement(&results), vec![(0, 1)]);
    }

    #[test]
    fn overlapping_pair_gets_two_columns() {
        let results = layout(&[span(1, (9, 0), (10, 0)), span(2, (9, 30), (10, 30))]);
        assert_eq!(placement(&results), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn touching_pair_shares_a_column() {
        let results = layout(&[span(1, (9, 0), (10, 0)), span(2, (10, 0), (11, 0))]);
        assert_eq!(placement(&results), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn results_follow_input_order_not_start_order() {
        let results = layout(&[span(1, (11, 0), (12, 0)), span(2, (9, 0), (11, 30))]);
        assert_eq!(results[0].intervention_id.get(), 1);
        assert_eq!(placement(&results), vec![(1, 2), (0, 2)]);
    }

    #[test]
    fn freed_column_is_reused_before_opening_a_new_one() {
        let results = layout(&[
            span(1, (8, 0), (12, 0)),
            span(2, (8, 0), (9, 0)),
            span(3, (9, 0), (10, 0)),
            span(4, (9, 30), (11, 0)),
        ]);
        assert_eq!(placement(&results), vec![(0, 3), (1, 3), (1, 3), (2, 3)]);
    }

    #[test]
    fn width_is_global_even_for_isolated_blocks() {
        let results = layout(&[
            span(1, (8, 0), (9, 0)),
            span(2, (8, 30), (9, 30)),
            span(3, (15, 0), (16, 0)),
        ]);
        assert_eq!(placement(&results), vec![(0, 2), (1, 2), (0, 2)]);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let results = layout(&[
            span(1, (9, 0), (10, 0)),
            span(2, (9, 0), (10, 0)),
            span(3, (9, 0), (10, 0)),
        ]);
        assert_eq!(placement(&results), vec![(0, 3), (1, 3), (2, 3)]);
    }

    #[test]
    fn no_column_holds_overlapping_intervals() {
        let intervals = vec![
            span(1, (8, 0), (10, 0)),
            span(2, (8, 15), (8, 45)),
            span(3, (8, 45), (9, 15)),
            span(4, (9, 0), (12, 0)),
            span(5, (10, 0), (11, 0)),
            span(6, (10, 30), (13, 0)),
            span(7, (12, 0), (12, 30)),
        ];
        let results = layout(&intervals);
        let total = results[0].total_columns;

        for (i, a) in results.iter().enumerate() {
            assert_eq!(a.total_columns, total);
            assert!(a.column < total);
            for (j, b) in results.iter().enumerate().skip(i + 1) {
                if a.column == b.column {
                    assert!(!overlaps(&intervals[i], &intervals[j]));
                }
            }
        }
        let used = results.iter().map(|r| r.column).max().unwrap() + 1;
        assert_eq!(used, total);
    }
}
