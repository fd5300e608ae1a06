use chrono::NaiveDate;

use atomwalk::RawActivity;

use crate::domain::models::{ActivityStatus, ActivityView, NormalizedActivity};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses the backend's `DD-Mon-YYYY` due dates, e.g. `01-Jan-2020`.
///
/// Month names are matched against a fixed English table. Unknown months and days that
/// do not exist in the month give `None`.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().splitn(3, '-');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month = parts.next()?.trim();
    let year: i32 = parts.next()?.trim().parse().ok()?;

    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))?;

    NaiveDate::from_ymd_opt(year, month as u32 + 1, day)
}

/// Derives the status label of an activity card.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityStatusResolver;

impl ActivityStatusResolver {
    /// First matching rule wins:
    /// 1. the status code gives the base label,
    /// 2. planned or in-progress work flagged over-due is OVER-DUE,
    /// 3. in-progress work is OVER-DUE from the start of its due day,
    /// 4. nothing on hold and nothing pending is COMPLETED.
    pub fn resolve(&self, activity: &RawActivity, today: NaiveDate) -> ActivityStatus {
        let base = ActivityStatus::from_code(activity.activity_status.as_deref());

        if matches!(base, ActivityStatus::Planned | ActivityStatus::InProgress)
            && activity.is_over_due
        {
            return ActivityStatus::OverDue;
        }

        let due_date = activity.due_date.as_deref().and_then(parse_due_date);
        if base == ActivityStatus::InProgress && due_date.is_some_and(|due| due <= today) {
            return ActivityStatus::OverDue;
        }

        if activity.no_hold == Some(0) && activity.no_pending == Some(0) {
            return ActivityStatus::Completed;
        }

        base
    }

    pub fn normalize(&self, activity: RawActivity, today: NaiveDate) -> NormalizedActivity {
        let status = self.resolve(&activity, today);
        NormalizedActivity {
            activity_id: activity.activity_id.clone(),
            activity_name: activity.activity_name.clone(),
            ref_num: activity.ref_num.clone(),
            sale_order_no: activity.sale_order_no.clone(),
            status_code: activity.activity_status.clone(),
            due_date: activity.due_date.as_deref().and_then(parse_due_date),
            status,
            no_hold: activity.no_hold,
            no_pending: activity.no_pending,
            original: activity,
        }
    }

    pub fn normalize_all(
        &self,
        activities: impl IntoIterator<Item = RawActivity>,
        today: NaiveDate,
    ) -> Vec<NormalizedActivity> {
        activities
            .into_iter()
            .map(|activity| self.normalize(activity, today))
            .collect()
    }
}

/// Activities in the given view, narrowed to one reference number unless `ref_num` is
/// empty.
pub fn filter_view<'a>(
    activities: &'a [NormalizedActivity],
    view: ActivityView,
    ref_num: Option<&str>,
) -> Vec<&'a NormalizedActivity> {
    let ref_num = ref_num.filter(|r| !r.is_empty());
    activities
        .iter()
        .filter(|activity| view.includes(activity))
        .filter(|activity| ref_num.is_none() || activity.ref_num.as_deref() == ref_num)
        .collect()
}

/// Distinct non-empty reference numbers, in the order they first appear.
pub fn unique_ref_nums(activities: &[NormalizedActivity]) -> Vec<&str> {
    let mut seen = Vec::new();
    for ref_num in activities.iter().filter_map(|a| a.ref_num.as_deref()) {
        if !ref_num.is_empty() && !seen.contains(&ref_num) {
            seen.push(ref_num);
        }
    }
    seen
}
