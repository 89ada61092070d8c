// Path: crates/agora-consensus/src/active_set.rs
//! The height-parametrised projections every other operation in this crate
//! is built from. Two predicates, not one: signing eligibility excludes a
//! slashed record the moment it is slashed; index-stable enumeration keeps
//! it in place so slot numbers never renumber mid-cycle.

use agora_types::{Height, ValidatorRecord};

/// `minEnrollmentHeight(H) = max(0, H - validator_cycle)`.
pub fn min_enrollment_height(at_height: Height, validator_cycle: u32) -> Height {
    Height(at_height.value().saturating_sub(u64::from(validator_cycle)))
}

fn in_enrollment_window(record: &ValidatorRecord, at_height: Height, validator_cycle: u32) -> bool {
    let min_height = min_enrollment_height(at_height, validator_cycle);
    min_height <= record.enrolled_height && record.enrolled_height < at_height
}

/// A record is active for signing block `at_height` iff
/// `minEnrollmentHeight(at_height) <= enrolled_height < at_height` and it is
/// not slashed at or before `at_height`.
///
/// The strict `<` on `enrolled_height` means a record enrolled *at* H signs
/// from H+1 onward, never H itself. This is what `getValidators` and
/// `countActive` report.
pub fn is_active_for_signing(
    record: &ValidatorRecord,
    at_height: Height,
    validator_cycle: u32,
) -> bool {
    let not_slashed = match record.slashed_height {
        Some(slashed_height) => slashed_height > at_height,
        None => true,
    };
    in_enrollment_window(record, at_height, validator_cycle) && not_slashed
}

/// A record is retained in index-stable enumerations (`hasEnrollment`,
/// `getEnrolledUTXOs`) for as long as it is within its enrollment window,
/// regardless of whether it has since been slashed — slot indices must not
/// renumber when a validator is slashed mid-cycle.
pub fn is_retained_for_indexing(
    record: &ValidatorRecord,
    at_height: Height,
    validator_cycle: u32,
) -> bool {
    in_enrollment_window(record, at_height, validator_cycle)
}
