use crate::resolution::domain::FlagId;

/// Deterministic bucket in `[0, 100)` for one `(identity, flag)` pair.
///
/// `fxhash` is a fixed-key hash, so the bucket is a pure function of its
/// inputs and repeated evaluations for the same caller stay sticky.
pub(crate) fn bucket(identity: &str, flag_id: &FlagId) -> u8 {
    let key = format!("{identity}:{}", flag_id.0);
    (fxhash::hash64(&key) % 100) as u8
}

pub(crate) fn in_rollout(identity: &str, flag_id: &FlagId, percentage: u8) -> bool {
    bucket(identity, flag_id) < percentage
}
