//! Maps listing options onto exactly one repository query.
//!
//! Pagination is on only for an explicit page of 1 or more; a missing page and
//! page `0` both mean "return everything". With pagination the offset is
//! `(page - 1) * PAGE_SIZE`.
//!
//! | date | status | page | query                 |
//! |------|--------|------|-----------------------|
//! | ✓    | ✓      | ✓    | `ByDateAndStatusPage` |
//! |      | ✓      | ✓    | `ByStatusPage`        |
//! |      |        | ✓    | `Page`                |
//! | ✓    | ✓      |      | `ByDateAndStatus`     |
//! |      | ✓      |      | `ByStatus`            |
//! |      |        |      | `All`                 |
//! | ✓    |        | ✓    | `ByDatePage`          |
//! | ✓    |        |      | `ByDate`              |

use crate::models::task::PAGE_SIZE;
use crate::models::{TaskFilter, TaskListQuery};

/// Row offset of a 1-based page, or `None` when pagination is off.
pub fn page_offset(page: Option<u32>) -> Option<i64> {
    match page {
        Some(page) if page >= 1 => Some((i64::from(page) - 1) * PAGE_SIZE),
        _ => None,
    }
}

pub fn resolve(filter: &TaskFilter) -> TaskListQuery {
    let offset = page_offset(filter.page);

    match (filter.date, filter.done, offset) {
        (Some(date), Some(done), Some(offset)) => {
            TaskListQuery::ByDateAndStatusPage { date, done, offset }
        }
        (None, Some(done), Some(offset)) => TaskListQuery::ByStatusPage { done, offset },
        (None, None, Some(offset)) => TaskListQuery::Page { offset },
        (Some(date), Some(done), None) => TaskListQuery::ByDateAndStatus { date, done },
        (None, Some(done), None) => TaskListQuery::ByStatus { done },
        (None, None, None) => TaskListQuery::All,
        (Some(date), None, Some(offset)) => TaskListQuery::ByDatePage { date, offset },
        (Some(date), None, None) => TaskListQuery::ByDate { date },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn filter(page: Option<u32>, done: Option<bool>, date: Option<NaiveDateTime>) -> TaskFilter {
        TaskFilter { page, done, date }
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(None), None);
        assert_eq!(page_offset(Some(0)), None);
        assert_eq!(page_offset(Some(1)), Some(0));
        assert_eq!(page_offset(Some(2)), Some(3));
        assert_eq!(page_offset(Some(10)), Some(27));
    }

    #[test]
    fn test_zero_page_without_filters_lists_everything() {
        assert_eq!(resolve(&filter(Some(0), None, None)), TaskListQuery::All);
        assert_eq!(resolve(&TaskFilter::default()), TaskListQuery::All);
    }

    #[test]
    fn test_second_page_by_status() {
        assert_eq!(
            resolve(&filter(Some(2), Some(true), None)),
            TaskListQuery::ByStatusPage { done: true, offset: 3 }
        );
    }

    #[test]
    fn test_date_and_status_without_page() {
        assert_eq!(
            resolve(&filter(Some(0), Some(true), Some(date()))),
            TaskListQuery::ByDateAndStatus { date: date(), done: true }
        );
    }

    #[test]
    fn test_full_decision_table() {
        let cases = [
            (
                filter(Some(1), Some(false), Some(date())),
                TaskListQuery::ByDateAndStatusPage { date: date(), done: false, offset: 0 },
            ),
            (
                filter(Some(3), Some(false), None),
                TaskListQuery::ByStatusPage { done: false, offset: 6 },
            ),
            (filter(Some(1), None, None), TaskListQuery::Page { offset: 0 }),
            (
                filter(None, Some(true), Some(date())),
                TaskListQuery::ByDateAndStatus { date: date(), done: true },
            ),
            (filter(None, Some(false), None), TaskListQuery::ByStatus { done: false }),
            (filter(None, None, None), TaskListQuery::All),
            (
                filter(Some(2), None, Some(date())),
                TaskListQuery::ByDatePage { date: date(), offset: 3 },
            ),
            (filter(None, None, Some(date())), TaskListQuery::ByDate { date: date() }),
        ];

        for (input, expected) in cases {
            assert_eq!(resolve(&input), expected, "filter {:?}", input);
        }
    }
}
