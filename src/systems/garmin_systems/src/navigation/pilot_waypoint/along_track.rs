use super::{FacilityDatabase, GeoPoint, GreatCircle, PlanLeg, PilotWaypointError};
use systems::navigation::LegType;
use uom::si::{f64::*, length::nautical_mile};

/// Legs along-track waypoints may be placed behind the end of.
const VALID_PREVIOUS_LEG_TYPES: [LegType; 5] = [
    LegType::CF,
    LegType::DF,
    LegType::IF,
    LegType::TF,
    LegType::RF,
];

/// Legs along-track waypoints may be placed on.
const VALID_NEXT_LEG_TYPES: [LegType; 2] = [LegType::IF, LegType::TF];

/// Where an along-track offset is entered: the flight plan, the leg whose fix was selected and
/// how far LNAV has progressed along the leg it tracks.
#[derive(Clone, Copy, Debug)]
pub struct AlongTrackContext<'a> {
    pub plan: &'a [PlanLeg],
    pub leg_index: usize,
    pub lnav_tracked_leg_index: usize,
    pub lnav_distance_along: Length,
}

/// Computes the position of an along-track offset from the fix of the selected leg. Positive
/// distances lie on the following leg and the waypoint goes after the fix, negative ones on
/// the selected leg itself and the waypoint goes before it.
///
/// Returns the position and whether the waypoint is inserted after the selected leg.
pub(super) fn along_track_offset(
    database: &impl FacilityDatabase,
    context: &AlongTrackContext,
    distance: Length,
) -> Result<(GeoPoint, bool), PilotWaypointError> {
    let plan = context.plan;
    let index = context.leg_index;
    let leg = plan
        .get(index)
        .ok_or(PilotWaypointError::AlongTrackNotAvailable)?;
    let backwards = distance < Length::new::<nautical_mile>(0.);

    let (from, to) = if backwards {
        let previous = index
            .checked_sub(1)
            .and_then(|previous| plan.get(previous))
            .filter(|previous| VALID_PREVIOUS_LEG_TYPES.contains(&previous.leg_type))
            .filter(|_| VALID_NEXT_LEG_TYPES.contains(&leg.leg_type))
            .ok_or(PilotWaypointError::AlongTrackNotAvailable)?;

        let mut max_distance = leg.distance;
        if context.lnav_tracked_leg_index == index {
            max_distance = max_distance.map(|max| {
                let remaining = max - context.lnav_distance_along;
                remaining.max(Length::new::<nautical_mile>(0.))
            });
        }

        if !max_distance.map_or(false, |max| distance.abs() < max) {
            return Err(PilotWaypointError::DistanceTooLarge);
        }

        (previous, leg)
    } else {
        let next = plan
            .get(index + 1)
            .filter(|next| {
                VALID_PREVIOUS_LEG_TYPES.contains(&leg.leg_type)
                    && VALID_NEXT_LEG_TYPES.contains(&next.leg_type)
            })
            .ok_or(PilotWaypointError::AlongTrackNotAvailable)?;

        let min_distance = if context.lnav_tracked_leg_index == index + 1 {
            context.lnav_distance_along
        } else {
            Length::new::<nautical_mile>(0.)
        };

        if !(distance > min_distance && next.distance.map_or(false, |max| distance < max)) {
            return Err(PilotWaypointError::DistanceTooLarge);
        }

        (leg, next)
    };

    let fix = |leg: &PlanLeg| {
        leg.fix_icao
            .as_deref()
            .and_then(|icao| database.facility(icao))
            .ok_or(PilotWaypointError::AlongTrackNotAvailable)
    };
    let from = fix(from)?;
    let to = fix(to)?;

    let circle = GreatCircle::through(from.position, to.position)
        .ok_or(PilotWaypointError::AlongTrackNotAvailable)?;
    let origin = if backwards { to.position } else { from.position };

    Ok((circle.offset_distance_along(origin, distance), !backwards))
}
