//! Invariant checking helpers

use crate::controller::Coronation;
use crate::denomination::Denomination;
use crate::Identity;

/// First four bytes of a key, hex encoded, for log lines
pub fn short_id(id: &Identity) -> String {
    id.iter().take(4).map(|b| format!("{:02x}", b)).collect()
}

/// Accepted canonical values must strictly increase reign over reign
pub fn strictly_increasing(coronations: &[Coronation]) -> bool {
    coronations
        .windows(2)
        .all(|w| w[1].deposit.canonical_value > w[0].deposit.canonical_value)
}

/// Every coronation after the first displaced exactly the previous holder,
/// with exactly the deposit that holder locked
pub fn payouts_match_locked(coronations: &[Coronation]) -> bool {
    let first_ok = coronations.first().map_or(true, |c| c.displaced.is_none());
    first_ok
        && coronations.windows(2).all(|w| {
            w[1].displaced == Some((w[0].holder, w[0].deposit))
        })
}

/// Custody may only hold the current holder's deposit: everything else has
/// been paid back
pub fn custody_holds_only(
    held_primary: u64,
    held_secondary: u64,
    last: Option<&Coronation>,
) -> bool {
    let (want_primary, want_secondary) = match last {
        None => (0, 0),
        Some(c) => match c.deposit.denomination {
            Denomination::Primary => (c.deposit.raw_amount, 0),
            Denomination::Secondary => (0, c.deposit.raw_amount),
        },
    };
    held_primary == want_primary && held_secondary == want_secondary
}
