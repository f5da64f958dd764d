//! The single ownership predicate used by every component.

use uuid::Uuid;

use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_entity::Owned;

/// Require that `user_id` owns the resource.
///
/// Fails with `Forbidden` otherwise. Services call this before any
/// mutation; a failure aborts the operation with no side effects.
pub fn require_owner(user_id: Uuid, resource: &impl Owned) -> AppResult<()> {
    if resource.owner_id() == user_id {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_core::error::ErrorKind;

    struct Doc {
        owner: Uuid,
    }

    impl Owned for Doc {
        fn owner_id(&self) -> Uuid {
            self.owner
        }
    }

    #[test]
    fn test_owner_passes() {
        let user = Uuid::new_v4();
        assert!(require_owner(user, &Doc { owner: user }).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let err = require_owner(Uuid::new_v4(), &Doc { owner: Uuid::new_v4() }).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }
}
