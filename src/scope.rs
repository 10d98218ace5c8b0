use uuid::Uuid;

use crate::error::ApiError;

/// A resource may only be acted on by the user who owns it.
pub fn authorize(resource_owner: Uuid, caller: Uuid) -> bool {
    resource_owner == caller
}

/// Collapses "row does not exist" and "row belongs to someone else" into the
/// same `NotFound`, so callers cannot probe for other users' resource ids.
///
/// Entry handlers resolve ownership transitively: the parent meal is fetched
/// by id alone and passed through here before any entry query runs.
pub fn ensure_owned<T>(
    resource: Option<T>,
    owner_of: impl Fn(&T) -> Uuid,
    caller: Uuid,
) -> Result<T, ApiError> {
    match resource {
        Some(r) if authorize(owner_of(&r), caller) => Ok(r),
        _ => Err(ApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Owned {
        owner: Uuid,
    }

    #[test]
    fn owner_is_authorized() {
        let user = Uuid::new_v4();
        assert!(authorize(user, user));
    }

    #[test]
    fn other_user_is_not_authorized() {
        assert!(!authorize(Uuid::new_v4(), Uuid::new_v4()));
    }

    #[test]
    fn owned_resource_passes_through() {
        let caller = Uuid::new_v4();
        let got = ensure_owned(Some(Owned { owner: caller }), |r| r.owner, caller)
            .expect("owner should pass");
        assert_eq!(got.owner, caller);
    }

    #[test]
    fn missing_and_foreign_are_indistinguishable() {
        let caller = Uuid::new_v4();

        let missing = ensure_owned(None::<Owned>, |r| r.owner, caller).unwrap_err();
        let foreign = ensure_owned(
            Some(Owned {
                owner: Uuid::new_v4(),
            }),
            |r| r.owner,
            caller,
        )
        .unwrap_err();

        assert!(matches!(missing, ApiError::NotFound));
        assert!(matches!(foreign, ApiError::NotFound));
        // Same outcome, same message: nothing leaks which case applied.
        assert_eq!(missing.to_string(), foreign.to_string());
    }
}
