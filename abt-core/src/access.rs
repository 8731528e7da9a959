//! The pool access-mode matrix.
//!
//! P = private, S = shared; R = reader/popper, W = writer/pusher
//! (single vs multiple). The five modes gate three distinct operations;
//! the tables below are transcribed literally from the authoritative
//! scenario vectors (S1-S3). Where the generic summary table and the
//! S1-S3 vectors disagree, S1-S3 wins: reproducing the asymmetry is the
//! point, not a bug to paper over.

use serde::{Deserialize, Serialize};

/// Pool access mode: who may pop (read) and who may push (write).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Private reader, private writer: only the binding scheduler touches it.
    Prw,
    /// Private reader, shared writer.
    PrPw,
    /// Private reader, shared... (reader-private, writer-shared variant).
    PrSw,
    /// Shared reader, private writer.
    SrPw,
    /// Shared reader, shared writer.
    SrSw,
}

impl AccessMode {
    const ALL: [AccessMode; 5] = [
        AccessMode::Prw,
        AccessMode::PrPw,
        AccessMode::PrSw,
        AccessMode::SrPw,
        AccessMode::SrSw,
    ];

    pub fn all() -> impl Iterator<Item = AccessMode> {
        Self::ALL.into_iter()
    }
}

/// Scenario S1: "add a scheduler binding this pool inside another ES."
/// Accept iff the pool's access mode is reader-shared.
pub fn accept_bind_other_es(access: AccessMode) -> bool {
    matches!(access, AccessMode::SrPw | AccessMode::SrSw)
}

/// Direction of a same-ES cross-pool scheduler bind, scenario S2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindDirection {
    /// Bind a scheduler drawn from the secondary pool into the ES's main
    /// (PR_SW) pool.
    SecondaryIntoMain,
    /// Bind a scheduler drawn from the ES's main (PR_SW) pool into the
    /// secondary pool.
    MainIntoSecondary,
}

/// Scenario S2: "add to another access," evaluated from an ES whose top
/// scheduler runs a PR_SW-access pool. `secondary` is the access mode of
/// the other pool involved in the bind.
pub fn accept_bind_same_es(direction: BindDirection, secondary: AccessMode) -> bool {
    match direction {
        // secondary -> main: reader-private secondary pools may hand a
        // scheduler into the shared-writer main pool; shared-reader
        // secondary pools may not (their own readership would be violated).
        BindDirection::SecondaryIntoMain => {
            matches!(secondary, AccessMode::Prw | AccessMode::PrPw | AccessMode::PrSw)
        }
        // main -> secondary: the main pool's PR_SW access admits handing a
        // scheduler out to any secondary access mode.
        BindDirection::MainIntoSecondary => true,
    }
}

/// Scenario S3: "push from another ES." A task running on an ES whose top
/// scheduler has access mode `access` calls back into `task_create` on that
/// ES's own pool, either directly ("from within") or recursively (the
/// created task itself creates another task before returning).
pub fn accept_push_from_other_es(access: AccessMode, recursive: bool) -> bool {
    match (access, recursive) {
        (AccessMode::Prw, _) => false,
        (AccessMode::PrPw, false) => true,
        (AccessMode::PrPw, true) => false,
        (AccessMode::PrSw, _) => true,
        (AccessMode::SrPw, false) => true,
        (AccessMode::SrPw, true) => false,
        (AccessMode::SrSw, _) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_accepts_only_shared_reader_modes() {
        for a in AccessMode::all() {
            let expect = matches!(a, AccessMode::SrPw | AccessMode::SrSw);
            assert_eq!(accept_bind_other_es(a), expect, "{a:?}");
        }
    }

    #[test]
    fn s2_secondary_into_main_vector() {
        let expect = [true, true, true, false, false];
        for (a, exp) in AccessMode::all().zip(expect) {
            assert_eq!(
                accept_bind_same_es(BindDirection::SecondaryIntoMain, a),
                exp,
                "{a:?}"
            );
        }
    }

    #[test]
    fn s2_main_into_secondary_always_succeeds() {
        for a in AccessMode::all() {
            assert!(accept_bind_same_es(BindDirection::MainIntoSecondary, a));
        }
    }

    #[test]
    fn s3_vector_matches_spec() {
        assert_eq!(
            (
                accept_push_from_other_es(AccessMode::Prw, false),
                accept_push_from_other_es(AccessMode::Prw, true)
            ),
            (false, false)
        );
        assert_eq!(
            (
                accept_push_from_other_es(AccessMode::PrPw, false),
                accept_push_from_other_es(AccessMode::PrPw, true)
            ),
            (true, false)
        );
        assert_eq!(
            (
                accept_push_from_other_es(AccessMode::PrSw, false),
                accept_push_from_other_es(AccessMode::PrSw, true)
            ),
            (true, true)
        );
        assert_eq!(
            (
                accept_push_from_other_es(AccessMode::SrPw, false),
                accept_push_from_other_es(AccessMode::SrPw, true)
            ),
            (true, false)
        );
        assert_eq!(
            (
                accept_push_from_other_es(AccessMode::SrSw, false),
                accept_push_from_other_es(AccessMode::SrSw, true)
            ),
            (true, true)
        );
    }
}
