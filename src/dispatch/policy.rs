/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, ElevatorSnapshot, Floor};

/// Picks the elevator best placed to serve `target_floor`: the in-service
/// car with the smallest vertical distance, skipping `exclude` if given.
///
/// Snapshots are scanned in ascending id order and only a strictly smaller
/// distance displaces the current best, so equal distances keep the
/// lower-id car. Returns `None` when no car is eligible; the caller must
/// leave the demand pending rather than treat that as an error.
pub fn select_eligible(
    snapshots: &[ElevatorSnapshot],
    exclude: Option<ElevatorId>,
    target_floor: Floor,
) -> Option<ElevatorId> {
    let mut best: Option<(ElevatorId, u8)> = None;

    for snapshot in snapshots {
        if snapshot.faulted || Some(snapshot.id) == exclude {
            continue;
        }

        let distance = snapshot.floor.abs_diff(target_floor);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((snapshot.id, distance)),
        }
    }

    best.map(|(id, _)| id)
}
