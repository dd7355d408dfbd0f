//! Calendar page workflow: classification, bucketing, layout and stacking.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{FixedOffset, NaiveDate, Timelike};

use crate::PIXELS_PER_HOUR;
use crate::domain::filter::CalendarFilter;
use crate::domain::intervention::Intervention;
use crate::domain::interval::{Interval, overlaps};
use crate::domain::status::display_status;
use crate::domain::types::{CalendarMode, InterventionId};
use crate::dto::calendar::{CalendarBlock, CalendarCell, CalendarPageData};
use crate::dto::status::{StatusCategory, status_options};
use crate::forms::calendar::CalendarFilterForm;
use crate::models::config::CalendarConfig;
use crate::repository::InterventionReader;
use crate::services::ServiceResult;
use crate::services::bucket::{BucketAxis, bucket};
use crate::services::layout::{LayoutResult, layout};
use crate::services::z_order::ZOrderManager;

/// Manual restacking requested by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackAction {
    BringToFront,
    SendToBack,
}

/// Placement of one intervention inside its layout group.
struct Placement {
    interval: Interval,
    layout: LayoutResult,
    reorderable: bool,
}

/// Lays out every group independently. A group is one grid column (a day
/// or a technician), so blocks starting in different rows still share
/// the column packing.
fn place_groups(
    groups: BTreeMap<&BucketAxis, Vec<&Intervention>>,
    offset: &FixedOffset,
) -> HashMap<InterventionId, Placement> {
    let mut placements = HashMap::new();

    for members in groups.into_values() {
        let intervals: Vec<Interval> = members
            .iter()
            .filter_map(|intervention| Interval::from_intervention(intervention, offset))
            .collect();

        for (interval, result) in intervals.iter().zip(layout(&intervals)) {
            let reorderable = intervals
                .iter()
                .any(|other| other.id != interval.id && overlaps(interval, other));
            let placement = Placement {
                interval: *interval,
                layout: result,
                reorderable,
            };
            if placements.insert(interval.id, placement).is_some() {
                log::warn!("Duplicate intervention id {}, keeping last placement", interval.id);
            }
        }
    }

    placements
}

/// Distinct technicians of the loaded data, the unassigned placeholder last.
fn technician_options(interventions: &[Intervention]) -> Vec<String> {
    let names: BTreeSet<_> = interventions.iter().map(Intervention::technician).collect();
    let (unassigned, mut assigned): (Vec<_>, Vec<_>) =
        names.into_iter().partition(|name| name.is_unassigned());
    assigned.extend(unassigned);
    assigned.into_iter().map(|name| name.into_inner()).collect()
}

/// Builds the render-ready calendar for already loaded interventions.
///
/// Stacking values are seeded into `z_order` the first time each block is
/// seen and read back from it afterwards, so earlier manual restacking
/// survives data refreshes.
pub fn build_calendar(
    interventions: &[Intervention],
    filter: &CalendarFilter,
    offset: &FixedOffset,
    z_order: &mut ZOrderManager,
) -> CalendarPageData {
    let buckets = bucket(interventions, filter, offset);

    let mut groups: BTreeMap<&BucketAxis, Vec<&Intervention>> = BTreeMap::new();
    for (key, members) in &buckets {
        groups
            .entry(&key.axis)
            .or_default()
            .extend(members.iter().copied());
    }
    let placements = place_groups(groups, offset);

    let mut cells = Vec::with_capacity(buckets.len());
    for (key, members) in &buckets {
        let mut blocks = Vec::with_capacity(members.len());
        for (index, intervention) in members.iter().enumerate() {
            let Some(placement) = placements.get(&intervention.id) else {
                log::debug!("Intervention {} has no interval, skipping", intervention.id);
                continue;
            };
            z_order.observe(intervention.id, index);
            let status = display_status(intervention);
            let start_offset_minutes = placement.interval.start.minute();
            let duration_hours = placement.interval.duration_hours();

            blocks.push(CalendarBlock {
                intervention: (*intervention).clone(),
                status,
                category: StatusCategory::from(status.key),
                column: placement.layout.column,
                total_columns: placement.layout.total_columns,
                z_index: z_order.get(intervention.id, index),
                start_offset_minutes,
                top_px: f64::from(start_offset_minutes) * PIXELS_PER_HOUR / 60.0,
                height_px: duration_hours * PIXELS_PER_HOUR,
                duration_hours,
                reorderable: placement.reorderable,
                notes_html: intervention.sanitized_notes(),
                manual_check: intervention.manual_check,
            });
        }
        cells.push(CalendarCell {
            key: key.clone(),
            blocks,
        });
    }

    let columns = match filter.mode {
        CalendarMode::Weekly => filter
            .visible_days()
            .into_iter()
            .map(BucketAxis::Day)
            .collect(),
        CalendarMode::Daily => {
            let axes: BTreeSet<&BucketAxis> = buckets.keys().map(|key| &key.axis).collect();
            axes.into_iter().cloned().collect()
        }
    };

    CalendarPageData {
        mode: filter.mode,
        anchor: filter.anchor,
        days: filter.visible_days(),
        columns,
        cells,
        technicians: technician_options(interventions),
        status_options: status_options(),
    }
}

/// Loads interventions from the repository and renders the calendar page
/// for the submitted filter form.
pub fn load_calendar_page<R>(
    repo: &R,
    form: CalendarFilterForm,
    config: &CalendarConfig,
    today: NaiveDate,
    z_order: &mut ZOrderManager,
) -> ServiceResult<CalendarPageData>
where
    R: InterventionReader + ?Sized,
{
    let filter = form.into_filter(config.default_mode, today).map_err(|err| {
        log::error!("Failed to validate calendar filter: {err}");
        err
    })?;

    let interventions = repo.list_interventions().map_err(|err| {
        log::error!("Failed to load interventions: {err}");
        err
    })?;

    log::info!(
        "Rendering {:?} calendar for {} with {} interventions",
        filter.mode,
        filter.anchor,
        interventions.len()
    );

    Ok(build_calendar(
        &interventions,
        &filter,
        &config.display_offset(),
        z_order,
    ))
}

/// Applies a restacking action to a rendered block.
///
/// Only blocks overlapping another block can be restacked; for any other
/// id nothing changes and `None` is returned.
pub fn restack_block(
    page: &CalendarPageData,
    z_order: &mut ZOrderManager,
    id: i64,
    action: StackAction,
) -> ServiceResult<Option<i32>> {
    let id = InterventionId::new(id)?;

    let Some(block) = page.find_block(id) else {
        log::debug!("Intervention {id} is not on the calendar, ignoring restack");
        return Ok(None);
    };
    if !block.reorderable {
        log::debug!("Intervention {id} overlaps nothing, ignoring restack");
        return Ok(None);
    }

    let value = match action {
        StackAction::BringToFront => z_order.bring_to_front(id),
        StackAction::SendToBack => z_order.send_to_back(id),
    };
    Ok(Some(value))
}
