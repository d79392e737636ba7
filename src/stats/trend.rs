use crate::model::Member;
use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

/// One calendar day of the pull-request trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendDay {
    pub date: NaiveDate,
    pub count: u64,
}

/// Bucket pull-request activity into the `days` calendar days ending at
/// `today`, earliest day first.
///
/// Members that carry per-pull timestamps have each pull counted in the local
/// calendar day it falls in (day boundaries at local midnight); pulls outside
/// the window are dropped. When no member supplies timestamps at all, the
/// aggregate pull-request count is spread across the window as evenly as
/// possible, with the leftover going to the earliest days.
#[must_use]
pub fn pull_request_trend(members: &[Member], days: u32, today: NaiveDate) -> Vec<TrendDay> {
    if days == 0 {
        return Vec::new();
    }

    let start = today - Days::new(u64::from(days) - 1);

    let mut counts = vec![0_u64; days as usize];
    let mut have_timestamps = false;

    for member in members {
        let Some(data) = &member.github_data else { continue };
        if data.recent_pulls.is_empty() {
            continue;
        }

        have_timestamps = true;
        for opened_at in &data.recent_pulls {
            let day = opened_at.with_timezone(&Local).date_naive();
            if day < start || day > today {
                continue;
            }

            let offset = usize::try_from((day - start).num_days()).ok();
            if let Some(slot) = offset.and_then(|i| counts.get_mut(i)) {
                *slot += 1;
            }
        }
    }

    if !have_timestamps {
        let aggregate = members
            .iter()
            .filter_map(|member| member.github_data.as_ref())
            .map(|data| data.pull_requests.total())
            .sum();
        counts = distribute(aggregate, days);
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(offset, count)| TrendDay {
            date: start + Days::new(offset as u64),
            count,
        })
        .collect()
}

/// Spread `count` across `days` buckets as evenly as possible. Every bucket
/// gets `count / days`, and the first `count % days` buckets get one more.
fn distribute(count: u64, days: u32) -> Vec<u64> {
    let days = u64::from(days);
    let base = count / days;
    let extra = count % days;

    (0..days).map(|day| if day < extra { base + 1 } else { base }).collect()
}
