//! Status transition rules for complaint processes.
//!
//! Forward path is `Pending -> Verifikasi -> On Progress -> Selesai`, with
//! `Ditolak` reachable only from `Pending`. Removing the latest process walks
//! the complaint back one step along the same path.

use thiserror::Error;

use crate::core::error::AppError;
use crate::features::complaints::models::ComplaintStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Complaint has already been verified")]
    AlreadyVerified,
    #[error("Complaint is already on progress")]
    AlreadyOnProgress,
    #[error("Complaint has already been finished")]
    AlreadyFinished,
    #[error("Complaint has already been rejected")]
    AlreadyRejected,
    #[error("Complaint has not been verified yet")]
    NotYetVerified,
    #[error("Complaint is not on progress yet")]
    NotYetOnProgress,
    #[error("Invalid status")]
    InvalidStatus,
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Check that a process with status `requested` may be added to a complaint
/// currently in `current`
pub fn check_transition(
    current: ComplaintStatus,
    requested: ComplaintStatus,
) -> Result<(), TransitionError> {
    use ComplaintStatus::*;

    if requested == Pending {
        return Err(TransitionError::InvalidStatus);
    }

    match (current, requested) {
        (Selesai, _) => Err(TransitionError::AlreadyFinished),
        (Ditolak, _) => Err(TransitionError::AlreadyRejected),
        (OnProgress, Selesai) => Ok(()),
        (OnProgress, _) => Err(TransitionError::AlreadyOnProgress),
        (Verifikasi, OnProgress) => Ok(()),
        (Verifikasi, Selesai) => Err(TransitionError::NotYetOnProgress),
        (Verifikasi, _) => Err(TransitionError::AlreadyVerified),
        (Pending, Verifikasi | Ditolak) => Ok(()),
        (Pending, _) => Err(TransitionError::NotYetVerified),
    }
}

/// Status a complaint returns to when its latest process with `status` is removed
pub fn rollback_status(status: ComplaintStatus) -> ComplaintStatus {
    use ComplaintStatus::*;

    match status {
        Verifikasi | Ditolak | Pending => Pending,
        OnProgress => Verifikasi,
        Selesai => OnProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplaintStatus::*;

    #[test]
    fn test_transition_table() {
        use TransitionError::*;

        let ok = Ok(());
        let cases = [
            // requested Verifikasi
            (Pending, Verifikasi, ok),
            (Verifikasi, Verifikasi, Err(AlreadyVerified)),
            (OnProgress, Verifikasi, Err(AlreadyOnProgress)),
            (Selesai, Verifikasi, Err(AlreadyFinished)),
            (Ditolak, Verifikasi, Err(AlreadyRejected)),
            // requested On Progress
            (Pending, OnProgress, Err(NotYetVerified)),
            (Verifikasi, OnProgress, ok),
            (OnProgress, OnProgress, Err(AlreadyOnProgress)),
            (Selesai, OnProgress, Err(AlreadyFinished)),
            (Ditolak, OnProgress, Err(AlreadyRejected)),
            // requested Selesai
            (Pending, Selesai, Err(NotYetVerified)),
            (Verifikasi, Selesai, Err(NotYetOnProgress)),
            (OnProgress, Selesai, ok),
            (Selesai, Selesai, Err(AlreadyFinished)),
            (Ditolak, Selesai, Err(AlreadyRejected)),
            // requested Ditolak
            (Pending, Ditolak, ok),
            (Verifikasi, Ditolak, Err(AlreadyVerified)),
            (OnProgress, Ditolak, Err(AlreadyOnProgress)),
            (Selesai, Ditolak, Err(AlreadyFinished)),
            (Ditolak, Ditolak, Err(AlreadyRejected)),
        ];

        for (current, requested, expected) in cases {
            assert_eq!(
                check_transition(current, requested),
                expected,
                "{} -> {}",
                current,
                requested
            );
        }
    }

    #[test]
    fn test_pending_is_never_requestable() {
        for current in ComplaintStatus::ALL {
            assert_eq!(
                check_transition(current, Pending),
                Err(TransitionError::InvalidStatus)
            );
        }
    }

    #[test]
    fn test_rollback_walks_back_one_step() {
        assert_eq!(rollback_status(Verifikasi), Pending);
        assert_eq!(rollback_status(OnProgress), Verifikasi);
        assert_eq!(rollback_status(Selesai), OnProgress);
        assert_eq!(rollback_status(Ditolak), Pending);
    }

    #[test]
    fn test_transition_error_is_bad_request() {
        let err: AppError = TransitionError::NotYetVerified.into();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("not been verified")));
    }
}
